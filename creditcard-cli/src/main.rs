//! Credit Card CLI
//!
//! Command-line interface for the credit card API.

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;

use creditcard_client::CreditCardClient;
use creditcard_types::{CreditCardDto, CreditCardId};

#[derive(Parser)]
#[command(name = "creditcards")]
#[command(author, version, about = "Credit card API CLI client", long_about = None)]
struct Cli {
    /// Base URL of the credit card API
    #[arg(
        long,
        env = "CREDITCARD_API_URL",
        default_value = "http://localhost:3000"
    )]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Card operations
    Card {
        #[command(subcommand)]
        action: CardCommands,
    },
    /// Charge an amount to a card
    Charge {
        /// Card ID
        id: String,
        #[arg(long)]
        amount: Decimal,
    },
    /// Pay an amount towards a card
    Pay {
        /// Card ID
        id: String,
        #[arg(long)]
        amount: Decimal,
    },
    /// Check API health
    Health,
}

#[derive(Subcommand)]
enum CardCommands {
    /// List all cards
    List,
    /// Get card details with its transactions
    Get {
        /// Card ID
        id: String,
    },
    /// Create a new card
    Create {
        /// Card ID (assigned by the server when omitted)
        #[arg(long)]
        id: Option<String>,
        #[command(flatten)]
        fields: CardFields,
    },
    /// Update an existing card. Only the given fields change.
    Update {
        /// Card ID
        #[arg(long)]
        id: String,
        #[command(flatten)]
        fields: CardFields,
    },
    /// Delete a card
    Delete {
        /// Card ID
        id: String,
    },
    /// Count a customer's cards in a status
    Count {
        #[arg(long)]
        customer: String,
        #[arg(long, default_value = "active")]
        status: String,
    },
}

/// Card fields. Missing required ones are reported by the server.
#[derive(Args)]
struct CardFields {
    #[arg(long)]
    customer: Option<String>,
    #[arg(long)]
    card_type: Option<String>,
    #[arg(long)]
    limit: Option<Decimal>,
    #[arg(long)]
    balance: Option<Decimal>,
    /// Expiration date (YYYY-MM-DD)
    #[arg(long)]
    expires: Option<NaiveDate>,
    #[arg(long)]
    statement_day: Option<String>,
    #[arg(long)]
    fee: Option<Decimal>,
    #[arg(long)]
    status: Option<String>,
}

impl CardFields {
    fn into_dto(self, id: Option<String>) -> CreditCardDto {
        CreditCardDto {
            id: id.map(CreditCardId::from),
            customer_id: self.customer,
            card_type: self.card_type,
            credit_limit: self.limit,
            current_balance: self.balance,
            expiration_date: self.expires,
            issue_statement_day: self.statement_day,
            maintenance_fee: self.fee,
            status: self.status,
            ..Default::default()
        }
    }

    /// Overlays the given fields onto an existing payload.
    fn apply_to(self, dto: CreditCardDto) -> CreditCardDto {
        CreditCardDto {
            customer_id: self.customer.or(dto.customer_id),
            card_type: self.card_type.or(dto.card_type),
            credit_limit: self.limit.or(dto.credit_limit),
            current_balance: self.balance.or(dto.current_balance),
            expiration_date: self.expires.or(dto.expiration_date),
            issue_statement_day: self.statement_day.or(dto.issue_statement_day),
            maintenance_fee: self.fee.or(dto.maintenance_fee),
            status: self.status.or(dto.status),
            ..dto
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let client = CreditCardClient::new(&cli.api_url);

    match cli.command {
        Commands::Health => {
            let healthy = client.health().await?;
            if healthy {
                println!("✓ API is healthy");
            } else {
                println!("✗ API is not healthy");
                std::process::exit(1);
            }
        }

        Commands::Card { action } => match action {
            CardCommands::List => {
                let cards = client.list_cards().await?;
                println!("{}", serde_json::to_string_pretty(&cards)?);
            }
            CardCommands::Get { id } => {
                let card = client.get_card(&CreditCardId::from(id)).await?;
                println!("{}", serde_json::to_string_pretty(&card)?);
            }
            CardCommands::Create { id, fields } => {
                let card = client.create_card(&fields.into_dto(id)).await?;
                println!("{}", serde_json::to_string_pretty(&card)?);
            }
            CardCommands::Update { id, fields } => {
                let stored = client.get_card(&CreditCardId::from(id)).await?;
                let dto = fields.apply_to(CreditCardDto::from(stored));
                let card = client.update_card(&dto).await?;
                println!("{}", serde_json::to_string_pretty(&card)?);
            }
            CardCommands::Delete { id } => {
                client.delete_card(&CreditCardId::from(id)).await?;
                println!("✓ Card deleted");
            }
            CardCommands::Count { customer, status } => {
                let total = client.count_by_customer(&customer, &status).await?;
                println!("{}", total);
            }
        },

        Commands::Charge { id, amount } => {
            let card = client.charge(&CreditCardId::from(id), amount).await?;
            println!("{}", serde_json::to_string_pretty(&card)?);
        }

        Commands::Pay { id, amount } => {
            let card = client.pay(&CreditCardId::from(id), amount).await?;
            println!("{}", serde_json::to_string_pretty(&card)?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use creditcard_types::CreditCard;

    #[test]
    fn test_parse_charge() {
        let cli = Cli::try_parse_from(["creditcards", "charge", "cc-1", "--amount", "49.99"])
            .unwrap();
        match cli.command {
            Commands::Charge { id, amount } => {
                assert_eq!(id, "cc-1");
                assert_eq!(amount, Decimal::new(4999, 2));
            }
            _ => panic!("expected charge"),
        }
    }

    #[test]
    fn test_parse_create_builds_dto() {
        let cli = Cli::try_parse_from([
            "creditcards",
            "card",
            "create",
            "--customer",
            "C1",
            "--limit",
            "1000.00",
            "--expires",
            "2030-12-31",
            "--statement-day",
            "15",
            "--fee",
            "9.99",
        ])
        .unwrap();
        let Commands::Card {
            action: CardCommands::Create { id, fields },
        } = cli.command
        else {
            panic!("expected card create");
        };

        let dto = fields.into_dto(id);
        assert!(dto.id.is_none());
        assert_eq!(dto.customer_id.as_deref(), Some("C1"));
        assert_eq!(dto.credit_limit, Some(Decimal::new(100000, 2)));
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_update_overlays_given_fields_on_stored_card() {
        let cli = Cli::try_parse_from([
            "creditcards",
            "card",
            "update",
            "--id",
            "cc-1",
            "--status",
            "blocked",
        ])
        .unwrap();
        let Commands::Card {
            action: CardCommands::Update { fields, .. },
        } = cli.command
        else {
            panic!("expected card update");
        };

        let stored = CreditCard {
            id: CreditCardId::from("cc-1"),
            customer_id: "C1".into(),
            card_type: Some("GOLD".into()),
            credit_limit: Decimal::new(1000, 0),
            current_balance: Decimal::new(250, 0),
            expiration_date: NaiveDate::from_ymd_opt(2030, 12, 31).unwrap(),
            issue_statement_day: "15".into(),
            maintenance_fee: Decimal::new(999, 2),
            status: Some("active".into()),
            transactions: Some(Vec::new()),
        };

        let dto = fields.apply_to(CreditCardDto::from(stored));
        assert_eq!(dto.id, Some(CreditCardId::from("cc-1")));
        assert_eq!(dto.status.as_deref(), Some("blocked"));
        assert_eq!(dto.current_balance, Some(Decimal::new(250, 0)));
        assert!(dto.transactions.is_none());
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_update_requires_id() {
        assert!(Cli::try_parse_from(["creditcards", "card", "update", "--customer", "C1"]).is_err());
    }

    #[test]
    fn test_rejects_bad_amount() {
        assert!(Cli::try_parse_from(["creditcards", "pay", "cc-1", "--amount", "ten"]).is_err());
    }
}
