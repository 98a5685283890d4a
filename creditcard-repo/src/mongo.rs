//! MongoDB store adapter.
//!
//! Cards live in the `credit_cards` collection and ledger entries in
//! `creditcard_transactions`. Both use the string id as `_id`. Decimals are
//! written as strings so amounts keep their exact scale.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use futures::{StreamExt, TryStreamExt, future, stream};
use mongodb::bson::{self, Document, doc};
use mongodb::{Client, Collection, Database, IndexModel};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use creditcard_types::{
    CardStore, CardStream, CardTransaction, CreditCard, CreditCardId, RepoError, TransactionId,
    TransactionStore, TransactionType,
};

use crate::SerializationOptions;

const CARDS: &str = "credit_cards";
const TRANSACTIONS: &str = "creditcard_transactions";
const TYPE_FIELD: &str = "_class";
const CARD_TYPE_NAME: &str = "CreditCard";
const TRANSACTION_TYPE_NAME: &str = "CreditCardTransactions";

fn db_err(e: impl std::fmt::Display) -> RepoError {
    RepoError::Database(e.to_string())
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CardDocument {
    #[serde(rename = "_id")]
    id: String,
    customer_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    card_type: Option<String>,
    credit_limit: Decimal,
    current_balance: Decimal,
    expiration_date: NaiveDate,
    issue_statement_day: String,
    maintenance_fee: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    status: Option<String>,
}

impl From<CreditCard> for CardDocument {
    fn from(card: CreditCard) -> Self {
        Self {
            id: card.id.into_string(),
            customer_id: card.customer_id,
            card_type: card.card_type,
            credit_limit: card.credit_limit,
            current_balance: card.current_balance,
            expiration_date: card.expiration_date,
            issue_statement_day: card.issue_statement_day,
            maintenance_fee: card.maintenance_fee,
            status: card.status,
        }
    }
}

impl From<CardDocument> for CreditCard {
    fn from(doc: CardDocument) -> Self {
        Self {
            id: CreditCardId::from(doc.id),
            customer_id: doc.customer_id,
            card_type: doc.card_type,
            credit_limit: doc.credit_limit,
            current_balance: doc.current_balance,
            expiration_date: doc.expiration_date,
            issue_statement_day: doc.issue_statement_day,
            maintenance_fee: doc.maintenance_fee,
            status: doc.status,
            transactions: None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TransactionDocument {
    #[serde(rename = "_id")]
    id: String,
    customer_id: String,
    credit_card_id: String,
    #[serde(rename = "type")]
    transaction_type: TransactionType,
    amount: Decimal,
    balance_after_movement: Decimal,
    created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl From<CardTransaction> for TransactionDocument {
    fn from(tx: CardTransaction) -> Self {
        Self {
            id: tx.id.to_string(),
            customer_id: tx.customer_id,
            credit_card_id: tx.credit_card_id.into_string(),
            transaction_type: tx.transaction_type,
            amount: tx.amount,
            balance_after_movement: tx.balance_after_movement,
            created_at: tx.created_at,
            description: tx.description,
        }
    }
}

impl From<TransactionDocument> for CardTransaction {
    fn from(doc: TransactionDocument) -> Self {
        CardTransaction::from_parts(
            TransactionId::from(doc.id),
            doc.customer_id,
            CreditCardId::from(doc.credit_card_id),
            doc.transaction_type,
            doc.amount,
            doc.balance_after_movement,
            doc.created_at,
            doc.description,
        )
    }
}

/// Serializes a record, tagging it with its type name when enabled.
fn to_document<T: Serialize>(
    value: &T,
    type_name: &str,
    options: SerializationOptions,
) -> Result<Document, RepoError> {
    let mut document = bson::to_document(value).map_err(db_err)?;
    if options.include_type_metadata {
        document.insert(TYPE_FIELD, type_name);
    }
    Ok(document)
}

fn card_from_document(mut document: Document) -> Result<CreditCard, RepoError> {
    document.remove(TYPE_FIELD);
    bson::from_document::<CardDocument>(document)
        .map(CreditCard::from)
        .map_err(db_err)
}

fn transaction_from_document(mut document: Document) -> Result<CardTransaction, RepoError> {
    document.remove(TYPE_FIELD);
    bson::from_document::<TransactionDocument>(document)
        .map(CardTransaction::from)
        .map_err(db_err)
}

/// MongoDB store implementation. Cloning shares the client.
///
/// # Example
///
/// ```rust,ignore
/// let repo = MongoRepo::new("mongodb://localhost:27017", "creditcard", SerializationOptions::default()).await?;
/// ```
#[derive(Clone)]
pub struct MongoRepo {
    database: Database,
    options: SerializationOptions,
}

impl MongoRepo {
    /// Connects to the server and prepares collection indexes.
    pub async fn new(
        url: &str,
        database_name: &str,
        options: SerializationOptions,
    ) -> anyhow::Result<Self> {
        let client = Client::with_uri_str(url).await?;
        let repo = Self::with_database(client.database(database_name), options);
        repo.ensure_indexes().await?;
        tracing::debug!(database = database_name, "MongoDB store ready");
        Ok(repo)
    }

    /// Wraps an existing database handle without touching the server.
    pub fn with_database(database: Database, options: SerializationOptions) -> Self {
        Self { database, options }
    }

    /// Get a reference to the underlying database.
    pub fn database(&self) -> &Database {
        &self.database
    }

    /// Creates the lookup indexes. Idempotent.
    pub async fn ensure_indexes(&self) -> anyhow::Result<()> {
        self.cards()
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "customerId": 1, "status": 1 })
                    .build(),
            )
            .await?;
        self.transactions()
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "creditCardId": 1 })
                    .build(),
            )
            .await?;
        Ok(())
    }

    fn cards(&self) -> Collection<Document> {
        self.database.collection(CARDS)
    }

    fn transactions(&self) -> Collection<Document> {
        self.database.collection(TRANSACTIONS)
    }
}

#[async_trait]
impl CardStore for MongoRepo {
    async fn save(&self, card: CreditCard) -> Result<CreditCard, RepoError> {
        let card = card.without_transactions();
        let document = to_document(
            &CardDocument::from(card.clone()),
            CARD_TYPE_NAME,
            self.options,
        )?;

        self.cards()
            .replace_one(doc! { "_id": card.id.as_str() }, document)
            .upsert(true)
            .await
            .map_err(db_err)?;

        Ok(card)
    }

    async fn find_by_id(&self, id: &CreditCardId) -> Result<Option<CreditCard>, RepoError> {
        self.cards()
            .find_one(doc! { "_id": id.as_str() })
            .await
            .map_err(db_err)?
            .map(card_from_document)
            .transpose()
    }

    fn find_all(&self) -> CardStream {
        let cards = self.cards();
        stream::once(async move { cards.find(doc! {}).await.map_err(db_err) })
            .map_ok(|cursor| {
                cursor
                    .map_err(db_err)
                    .and_then(|document| future::ready(card_from_document(document)))
            })
            .try_flatten()
            .boxed()
    }

    async fn delete_by_id(&self, id: &CreditCardId) -> Result<(), RepoError> {
        self.cards()
            .delete_one(doc! { "_id": id.as_str() })
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn count_by_customer_and_status(
        &self,
        customer_id: &str,
        status: &str,
    ) -> Result<u64, RepoError> {
        self.cards()
            .count_documents(doc! { "customerId": customer_id, "status": status })
            .await
            .map_err(db_err)
    }
}

#[async_trait]
impl TransactionStore for MongoRepo {
    async fn append(&self, transaction: CardTransaction) -> Result<CardTransaction, RepoError> {
        let document = to_document(
            &TransactionDocument::from(transaction.clone()),
            TRANSACTION_TYPE_NAME,
            self.options,
        )?;

        self.transactions()
            .insert_one(document)
            .await
            .map_err(db_err)?;

        Ok(transaction)
    }

    async fn find_by_credit_card_id(
        &self,
        credit_card_id: &CreditCardId,
    ) -> Result<Vec<CardTransaction>, RepoError> {
        let documents: Vec<Document> = self
            .transactions()
            .find(doc! { "creditCardId": credit_card_id.as_str() })
            .await
            .map_err(db_err)?
            .try_collect()
            .await
            .map_err(db_err)?;

        documents
            .into_iter()
            .map(transaction_from_document)
            .collect()
    }
}
