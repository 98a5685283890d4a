//! # Credit Card Repository
//!
//! Concrete store implementations (adapters) for the credit card service.
//! This crate provides database adapters that implement the `CardStore` and
//! `TransactionStore` ports.

#[cfg(not(any(feature = "mongodb", feature = "sqlite")))]
compile_error!("Enable a repo feature: `mongodb` or `sqlite`.");

use async_trait::async_trait;
use creditcard_types::{
    CardStore, CardStream, CardTransaction, CreditCard, CreditCardId, RepoError, TransactionStore,
};

#[cfg(feature = "mongodb")]
pub mod mongo;
#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "sqlite")]
mod types;

#[cfg(feature = "sqlite")]
#[cfg(test)]
mod sqlite_tests;

// Re-export individual repos for direct use if needed
#[cfg(feature = "mongodb")]
pub use mongo::MongoRepo;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteRepo;

/// How records are shaped when written to a document store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SerializationOptions {
    /// Adds a `_class` field naming the record type to every stored document.
    pub include_type_metadata: bool,
}

/// Connection settings for [`build_repo`].
#[derive(Debug, Clone)]
pub struct RepoConfig {
    pub database_url: String,
    /// Database name inside the server. Unused by SQLite.
    pub database_name: String,
    pub serialization: SerializationOptions,
}

#[cfg(feature = "mongodb")]
type Backend = mongo::MongoRepo;
#[cfg(all(feature = "sqlite", not(feature = "mongodb")))]
type Backend = sqlite::SqliteRepo;

/// Unified store wrapper over the enabled backend.
///
/// MongoDB wins when both features are enabled. Cloning is cheap, so the
/// same `Repo` can back both ports.
#[derive(Clone)]
pub struct Repo {
    inner: Backend,
}

/// Build and initialize a repository from connection settings.
///
/// This function:
/// 1. Connects to the database
/// 2. Creates tables or indexes
/// 3. Returns a ready-to-use `Repo`
///
/// # Examples
///
/// ```ignore
/// let config = RepoConfig {
///     database_url: "mongodb://localhost:27017".into(),
///     database_name: "creditcard".into(),
///     serialization: SerializationOptions::default(),
/// };
/// let repo = build_repo(&config).await?;
/// ```
pub async fn build_repo(config: &RepoConfig) -> anyhow::Result<Repo> {
    Repo::new(config).await
}

impl Repo {
    #[cfg(feature = "mongodb")]
    pub async fn new(config: &RepoConfig) -> anyhow::Result<Self> {
        let inner = mongo::MongoRepo::new(
            &config.database_url,
            &config.database_name,
            config.serialization,
        )
        .await?;
        Ok(Self { inner })
    }

    #[cfg(all(feature = "sqlite", not(feature = "mongodb")))]
    pub async fn new(config: &RepoConfig) -> anyhow::Result<Self> {
        let inner = sqlite::SqliteRepo::new(&config.database_url).await?;
        Ok(Self { inner })
    }
}

#[async_trait]
impl CardStore for Repo {
    async fn save(&self, card: CreditCard) -> Result<CreditCard, RepoError> {
        self.inner.save(card).await
    }

    async fn find_by_id(&self, id: &CreditCardId) -> Result<Option<CreditCard>, RepoError> {
        self.inner.find_by_id(id).await
    }

    fn find_all(&self) -> CardStream {
        self.inner.find_all()
    }

    async fn delete_by_id(&self, id: &CreditCardId) -> Result<(), RepoError> {
        self.inner.delete_by_id(id).await
    }

    async fn count_by_customer_and_status(
        &self,
        customer_id: &str,
        status: &str,
    ) -> Result<u64, RepoError> {
        self.inner
            .count_by_customer_and_status(customer_id, status)
            .await
    }
}

#[async_trait]
impl TransactionStore for Repo {
    async fn append(&self, transaction: CardTransaction) -> Result<CardTransaction, RepoError> {
        self.inner.append(transaction).await
    }

    async fn find_by_credit_card_id(
        &self,
        credit_card_id: &CreditCardId,
    ) -> Result<Vec<CardTransaction>, RepoError> {
        self.inner.find_by_credit_card_id(credit_card_id).await
    }
}
