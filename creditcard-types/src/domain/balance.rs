//! Balance rules for charging and paying a credit card.
//!
//! Pure functions: they take a card and an amount and hand back the card the
//! caller should persist. Persisting it and recording the ledger entry is the
//! caller's job.

use rust_decimal::{Decimal, RoundingStrategy};

use super::card::CreditCard;
use crate::error::DomainError;

/// Rounds a monetary amount to cents, halves away from zero.
pub fn round_half_up(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Charges `amount` to the card.
///
/// Fails with [`DomainError::InsufficientFunds`] when the current balance
/// does not cover the amount.
pub fn apply_charge(card: &CreditCard, amount: Decimal) -> Result<CreditCard, DomainError> {
    let insufficient = || DomainError::InsufficientFunds {
        current_balance: card.current_balance,
        amount,
    };
    if card.current_balance < amount {
        return Err(insufficient());
    }

    let remaining = card
        .current_balance
        .checked_sub(amount)
        .ok_or_else(insufficient)?;

    let mut charged = card.clone();
    charged.current_balance = round_half_up(remaining);
    Ok(charged)
}

/// Applies a payment of `amount` to the card.
///
/// Fails with [`DomainError::PaymentExceedsLimit`] when the resulting balance
/// would exceed the credit limit. A total too large to represent exceeds
/// every limit.
pub fn apply_payment(card: &CreditCard, amount: Decimal) -> Result<CreditCard, DomainError> {
    let total_after_payment = card
        .current_balance
        .checked_add(amount)
        .map(round_half_up)
        .ok_or(DomainError::PaymentExceedsLimit {
            credit_limit: card.credit_limit,
            total_after_payment: Decimal::MAX,
        })?;
    if total_after_payment > card.credit_limit {
        return Err(DomainError::PaymentExceedsLimit {
            credit_limit: card.credit_limit,
            total_after_payment,
        });
    }

    let mut paid = card.clone();
    paid.current_balance = total_after_payment;
    Ok(paid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::card::tests::card;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(dec!(1.005)), dec!(1.01));
        assert_eq!(round_half_up(dec!(1.004)), dec!(1.00));
        assert_eq!(round_half_up(dec!(-1.005)), dec!(-1.01));
        assert_eq!(round_half_up(dec!(2.5)), dec!(2.50));
    }

    #[test]
    fn test_charge_full_balance() {
        let c = card(dec!(1000), dec!(200));
        let charged = apply_charge(&c, dec!(200)).unwrap();
        assert_eq!(charged.current_balance, dec!(0));
        // input untouched
        assert_eq!(c.current_balance, dec!(200));
    }

    #[test]
    fn test_charge_rounds_result() {
        let c = card(dec!(1000), dec!(100));
        let charged = apply_charge(&c, dec!(0.005)).unwrap();
        assert_eq!(charged.current_balance, dec!(100.00));

        let charged = apply_charge(&c, dec!(33.333)).unwrap();
        assert_eq!(charged.current_balance, dec!(66.67));
    }

    #[test]
    fn test_charge_more_than_balance_fails() {
        let c = card(dec!(1000), dec!(200));
        let result = apply_charge(&c, dec!(250));
        assert!(matches!(
            result,
            Err(DomainError::InsufficientFunds { current_balance, amount })
                if current_balance == dec!(200) && amount == dec!(250)
        ));
    }

    #[test]
    fn test_charge_by_a_cent_too_much_fails() {
        let c = card(dec!(1000), dec!(10.00));
        assert!(apply_charge(&c, dec!(10.01)).is_err());
        assert!(apply_charge(&c, dec!(10.00)).is_ok());
    }

    #[test]
    fn test_charge_never_goes_negative() {
        let c = card(dec!(1000), dec!(75.40));
        for amount in [dec!(0.01), dec!(10), dec!(75.39), dec!(75.40)] {
            let charged = apply_charge(&c, amount).unwrap();
            assert_eq!(charged.current_balance, round_half_up(dec!(75.40) - amount));
            assert!(charged.current_balance >= Decimal::ZERO);
        }
    }

    #[test]
    fn test_payment_within_limit() {
        let c = card(dec!(1000), dec!(900));
        let paid = apply_payment(&c, dec!(50)).unwrap();
        assert_eq!(paid.current_balance, dec!(950));
        assert!(paid.current_balance <= paid.credit_limit);
    }

    #[test]
    fn test_payment_up_to_exact_limit() {
        let c = card(dec!(1000), dec!(900));
        let paid = apply_payment(&c, dec!(100)).unwrap();
        assert_eq!(paid.current_balance, dec!(1000));
    }

    #[test]
    fn test_payment_over_limit_fails() {
        let c = card(dec!(1000), dec!(900));
        let result = apply_payment(&c, dec!(150));
        assert!(matches!(
            result,
            Err(DomainError::PaymentExceedsLimit { total_after_payment, .. })
                if total_after_payment == dec!(1050)
        ));
    }

    #[test]
    fn test_payment_rounding_applies_before_limit_check() {
        // 999.994 rounds down to 999.99 and fits
        let c = card(dec!(999.99), dec!(999.99));
        let paid = apply_payment(&c, dec!(0.004)).unwrap();
        assert_eq!(paid.current_balance, dec!(999.99));

        // 999.995 rounds up to 1000.00 and does not
        assert!(apply_payment(&c, dec!(0.005)).is_err());
    }

    #[test]
    fn test_decimal_arithmetic_has_no_drift() {
        let mut c = card(dec!(1000), dec!(0));
        for _ in 0..10 {
            c = apply_payment(&c, dec!(0.1)).unwrap();
        }
        assert_eq!(c.current_balance, dec!(1.00));
    }

    #[test]
    fn test_payment_overflowing_total_exceeds_limit() {
        let c = card(Decimal::MAX, Decimal::ONE);
        let result = apply_payment(&c, Decimal::MAX);
        assert!(matches!(
            result,
            Err(DomainError::PaymentExceedsLimit { credit_limit, .. }) if credit_limit == Decimal::MAX
        ));
    }

    #[test]
    fn test_charge_with_unrepresentable_result_fails() {
        let c = card(dec!(1000), dec!(1));
        let result = apply_charge(&c, -Decimal::MAX);
        assert!(matches!(result, Err(DomainError::InsufficientFunds { .. })));
    }
}
