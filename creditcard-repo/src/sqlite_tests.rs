//! SQLite store integration tests.

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use futures::TryStreamExt;
    use rust_decimal_macros::dec;

    use creditcard_types::{
        CardStore, CardTransaction, CreditCard, CreditCardId, TransactionStore, TransactionType,
    };

    use crate::SqliteRepo;

    async fn setup_repo() -> SqliteRepo {
        SqliteRepo::new("sqlite::memory:").await.unwrap()
    }

    fn card(id: &str, customer_id: &str, status: Option<&str>) -> CreditCard {
        CreditCard {
            id: CreditCardId::from(id),
            customer_id: customer_id.to_string(),
            card_type: Some("GOLD".to_string()),
            credit_limit: dec!(1000.00),
            current_balance: dec!(1000.00),
            expiration_date: NaiveDate::from_ymd_opt(2030, 12, 31).unwrap(),
            issue_statement_day: "15".to_string(),
            maintenance_fee: dec!(9.99),
            status: status.map(str::to_string),
            transactions: None,
        }
    }

    #[tokio::test]
    async fn test_save_and_find() {
        let repo = setup_repo().await;

        let saved = repo.save(card("cc-1", "C1", Some("active"))).await.unwrap();
        let fetched = repo
            .find_by_id(&CreditCardId::from("cc-1"))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(fetched, saved);
        assert_eq!(fetched.credit_limit, dec!(1000.00));
        assert_eq!(fetched.maintenance_fee, dec!(9.99));
    }

    #[tokio::test]
    async fn test_save_drops_transactions() {
        let repo = setup_repo().await;

        let with_history = card("cc-1", "C1", None).with_transactions(Vec::new());
        let saved = repo.save(with_history).await.unwrap();

        assert!(saved.transactions.is_none());
    }

    #[tokio::test]
    async fn test_save_replaces_existing() {
        let repo = setup_repo().await;
        repo.save(card("cc-1", "C1", Some("active"))).await.unwrap();

        let mut changed = card("cc-1", "C1", Some("blocked"));
        changed.current_balance = dec!(420.10);
        repo.save(changed).await.unwrap();

        let fetched = repo
            .find_by_id(&CreditCardId::from("cc-1"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched.status.as_deref(), Some("blocked"));
        assert_eq!(fetched.current_balance, dec!(420.10));

        let all: Vec<CreditCard> = repo.find_all().try_collect().await.unwrap();
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn test_find_not_found() {
        let repo = setup_repo().await;

        let result = repo.find_by_id(&CreditCardId::from("missing")).await.unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_find_all() {
        let repo = setup_repo().await;

        let empty: Vec<CreditCard> = repo.find_all().try_collect().await.unwrap();
        assert!(empty.is_empty());

        repo.save(card("cc-1", "C1", None)).await.unwrap();
        repo.save(card("cc-2", "C2", None)).await.unwrap();

        let mut ids: Vec<String> = repo
            .find_all()
            .map_ok(|c| c.id.into_string())
            .try_collect()
            .await
            .unwrap();
        ids.sort();
        assert_eq!(ids, vec!["cc-1", "cc-2"]);
    }

    #[tokio::test]
    async fn test_find_all_is_lazy() {
        let repo = setup_repo().await;

        let stream = repo.find_all();
        repo.save(card("cc-1", "C1", None)).await.unwrap();

        let cards: Vec<CreditCard> = stream.try_collect().await.unwrap();
        assert_eq!(cards.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let repo = setup_repo().await;
        repo.save(card("cc-1", "C1", None)).await.unwrap();

        let id = CreditCardId::from("cc-1");
        repo.delete_by_id(&id).await.unwrap();
        repo.delete_by_id(&id).await.unwrap();

        assert!(repo.find_by_id(&id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_count_by_customer_and_status() {
        let repo = setup_repo().await;
        repo.save(card("cc-1", "C1", Some("active"))).await.unwrap();
        repo.save(card("cc-2", "C1", Some("active"))).await.unwrap();
        repo.save(card("cc-3", "C1", Some("blocked"))).await.unwrap();
        repo.save(card("cc-4", "C2", Some("active"))).await.unwrap();
        repo.save(card("cc-5", "C1", None)).await.unwrap();

        assert_eq!(
            repo.count_by_customer_and_status("C1", "active").await.unwrap(),
            2
        );
        assert_eq!(
            repo.count_by_customer_and_status("C1", "blocked").await.unwrap(),
            1
        );
        assert_eq!(
            repo.count_by_customer_and_status("C3", "active").await.unwrap(),
            0
        );
    }

    #[tokio::test]
    async fn test_append_and_list_transactions() {
        let repo = setup_repo().await;
        let c = card("cc-1", "C1", None);

        let charge = CardTransaction::record(&c, TransactionType::Charge, dec!(30.00));
        let payment = CardTransaction::record(&c, TransactionType::Payment, dec!(12.34));
        repo.append(charge.clone()).await.unwrap();
        repo.append(payment.clone()).await.unwrap();
        repo.append(CardTransaction::record(
            &card("cc-2", "C1", None),
            TransactionType::Charge,
            dec!(1),
        ))
        .await
        .unwrap();

        let mut entries = repo
            .find_by_credit_card_id(&CreditCardId::from("cc-1"))
            .await
            .unwrap();
        entries.sort_by_key(|t| t.transaction_type.as_str());

        assert_eq!(entries, vec![charge, payment]);
    }

    #[tokio::test]
    async fn test_transactions_survive_card_delete() {
        let repo = setup_repo().await;
        let c = repo.save(card("cc-1", "C1", None)).await.unwrap();
        repo.append(CardTransaction::record(&c, TransactionType::Charge, dec!(5)))
            .await
            .unwrap();

        repo.delete_by_id(&c.id).await.unwrap();

        let entries = repo.find_by_credit_card_id(&c.id).await.unwrap();
        assert_eq!(entries.len(), 1);
    }

    #[tokio::test]
    async fn test_file_database_is_created() {
        let dir = std::env::temp_dir().join(format!("creditcard-repo-{}", CreditCardId::new()));
        let url = format!("sqlite://{}/cards.db", dir.display());

        let repo = SqliteRepo::new(&url).await.unwrap();
        repo.save(card("cc-1", "C1", None)).await.unwrap();
        assert!(dir.join("cards.db").exists());

        drop(repo);
        let _ = std::fs::remove_dir_all(dir);
    }
}
