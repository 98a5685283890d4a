//! Data Transfer Objects (DTOs) for requests and responses.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{CardTransaction, CreditCard, CreditCardId};
use crate::error::DomainError;

// ─────────────────────────────────────────────────────────────────────────────
// Credit card DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Credit card payload accepted by create and update.
///
/// Every field is optional on the wire so that missing required fields are
/// reported together by [`CreditCardDto::validate`] instead of failing at the
/// first one during deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreditCardDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<CreditCardId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "C1")]
    pub customer_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "GOLD")]
    pub card_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, example = "1000.00")]
    pub credit_limit: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, example = "0.00")]
    pub current_balance: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "15")]
    pub issue_statement_day: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, example = "9.90")]
    pub maintenance_fee: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "active")]
    pub status: Option<String>,
    /// Accepted for compatibility, not persisted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
    /// Accepted for compatibility, not persisted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDateTime>,
    /// Ignored on input; the ledger is only written by charge and pay
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transactions: Option<Vec<CardTransaction>>,
}

impl CreditCardDto {
    /// Checks required fields, collecting one message per violation.
    pub fn validate(&self) -> Result<(), DomainError> {
        self.collect_errors(Vec::new())
    }

    /// Like [`validate`](Self::validate), but the payload must also name the
    /// card it updates. A missing id is reported alongside the field errors.
    pub fn validate_identified(&self) -> Result<(), DomainError> {
        let mut errors = Vec::new();
        if self.id.is_none() {
            errors.push("Identifier cannot be null".to_string());
        }
        self.collect_errors(errors)
    }

    fn collect_errors(&self, mut errors: Vec<String>) -> Result<(), DomainError> {
        if self.customer_id.is_none() {
            errors.push("Customer Identifier cannot be null".to_string());
        }
        match self.credit_limit {
            None => errors.push("Credit Limit cannot be null".to_string()),
            Some(limit) if limit < Decimal::ZERO => {
                errors.push("Credit Limit must be greater than or equal to 0".to_string())
            }
            Some(_) => {}
        }
        if self.expiration_date.is_none() {
            errors.push("Expiration Date cannot be null".to_string());
        }
        if self.issue_statement_day.is_none() {
            errors.push("Issue Statement Day cannot be null".to_string());
        }
        if self.maintenance_fee.is_none() {
            errors.push("Maintenance Fee cannot be null".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(DomainError::Validation(errors))
        }
    }

    /// Validates the payload and converts it into a card with the given id.
    ///
    /// A missing current balance becomes zero. Timestamps and any attached
    /// ledger entries are dropped.
    pub fn into_card(self, id: CreditCardId) -> Result<CreditCard, DomainError> {
        self.validate()?;

        let missing =
            |field: &str| DomainError::Validation(vec![format!("{} cannot be null", field)]);

        Ok(CreditCard {
            id,
            customer_id: self
                .customer_id
                .ok_or_else(|| missing("Customer Identifier"))?,
            card_type: self.card_type,
            credit_limit: self.credit_limit.ok_or_else(|| missing("Credit Limit"))?,
            current_balance: self.current_balance.unwrap_or(Decimal::ZERO),
            expiration_date: self
                .expiration_date
                .ok_or_else(|| missing("Expiration Date"))?,
            issue_statement_day: self
                .issue_statement_day
                .ok_or_else(|| missing("Issue Statement Day"))?,
            maintenance_fee: self
                .maintenance_fee
                .ok_or_else(|| missing("Maintenance Fee"))?,
            status: self.status,
            transactions: None,
        })
    }
}

impl From<CreditCard> for CreditCardDto {
    fn from(card: CreditCard) -> Self {
        Self {
            id: Some(card.id),
            customer_id: Some(card.customer_id),
            card_type: card.card_type,
            credit_limit: Some(card.credit_limit),
            current_balance: Some(card.current_balance),
            expiration_date: Some(card.expiration_date),
            issue_statement_day: Some(card.issue_statement_day),
            maintenance_fee: Some(card.maintenance_fee),
            status: card.status,
            created_at: None,
            updated_at: None,
            transactions: None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Query parameters
// ─────────────────────────────────────────────────────────────────────────────

/// Query for charge and pay.
#[derive(Debug, Clone, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AmountQuery {
    /// Amount to move, in currency units (e.g. `49.99`)
    #[param(value_type = String, example = "50.00")]
    pub amount: Decimal,
}

/// Query for the per-customer card count.
#[derive(Debug, Clone, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StatusQuery {
    /// Card status to match exactly
    #[param(example = "active")]
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn complete() -> CreditCardDto {
        CreditCardDto {
            customer_id: Some("C1".into()),
            card_type: Some("GOLD".into()),
            credit_limit: Some(dec!(1000)),
            expiration_date: NaiveDate::from_ymd_opt(2030, 6, 30),
            issue_statement_day: Some("10".into()),
            maintenance_fee: Some(dec!(5)),
            status: Some("active".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_complete_payload_converts() {
        let card = complete().into_card(CreditCardId::from("cc-1")).unwrap();
        assert_eq!(card.id.as_str(), "cc-1");
        assert_eq!(card.customer_id, "C1");
        assert_eq!(card.current_balance, Decimal::ZERO);
        assert!(card.transactions.is_none());
    }

    #[test]
    fn test_empty_payload_reports_every_required_field() {
        let err = CreditCardDto::default().validate().unwrap_err();
        let DomainError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        assert_eq!(
            errors,
            vec![
                "Customer Identifier cannot be null",
                "Credit Limit cannot be null",
                "Expiration Date cannot be null",
                "Issue Statement Day cannot be null",
                "Maintenance Fee cannot be null",
            ]
        );
    }

    #[test]
    fn test_update_payload_reports_missing_id_with_field_errors() {
        let dto = CreditCardDto {
            maintenance_fee: None,
            ..complete()
        };
        match dto.validate_identified() {
            Err(DomainError::Validation(errors)) => assert_eq!(
                errors,
                vec!["Identifier cannot be null", "Maintenance Fee cannot be null"]
            ),
            other => panic!("expected validation error, got {:?}", other),
        }

        let identified = CreditCardDto {
            id: Some(CreditCardId::from("cc-1")),
            ..complete()
        };
        assert!(identified.validate_identified().is_ok());
        assert!(complete().validate().is_ok());
    }

    #[test]
    fn test_negative_credit_limit_rejected() {
        let dto = CreditCardDto {
            credit_limit: Some(dec!(-1)),
            ..complete()
        };
        let err = dto.into_card(CreditCardId::new()).unwrap_err();
        assert!(matches!(
            err,
            DomainError::Validation(e) if e == vec!["Credit Limit must be greater than or equal to 0"]
        ));
    }

    #[test]
    fn test_optional_fields_may_be_absent() {
        let dto = CreditCardDto {
            card_type: None,
            status: None,
            ..complete()
        };
        let card = dto.into_card(CreditCardId::new()).unwrap();
        assert!(card.card_type.is_none());
        assert!(card.status.is_none());
    }

    #[test]
    fn test_deserializes_camel_case_payload() {
        let dto: CreditCardDto = serde_json::from_value(serde_json::json!({
            "customerId": "C7",
            "creditLimit": 2500.50,
            "currentBalance": "100.25",
            "expirationDate": "2029-02-28",
            "issueStatementDay": "1",
            "maintenanceFee": 0
        }))
        .unwrap();
        let card = dto.into_card(CreditCardId::new()).unwrap();
        assert_eq!(card.credit_limit, dec!(2500.50));
        assert_eq!(card.current_balance, dec!(100.25));
    }
}
