//! Client example demonstrating a card's lifecycle against a running server.
//!
//! Run with: cargo run -p creditcard-app --example client_example --no-default-features --features sqlite

use chrono::NaiveDate;
use creditcard_client::CreditCardClient;
use creditcard_hex::{CreditCardService, inbound::HttpServer};
use creditcard_repo::SqliteRepo;
use creditcard_types::CreditCardDto;
use rust_decimal_macros::dec;
use std::net::SocketAddr;
use tempfile::tempdir;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt().with_env_filter("info").init();

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr: SocketAddr = listener.local_addr()?;

    // Use a temp file-backed SQLite DB
    let tmp = tempdir()?;
    let db_url = format!("sqlite://{}", tmp.path().join("creditcard.db").display());

    println!("🚀 Starting server on {addr}...");
    println!("   Database: {db_url}");

    let repo = SqliteRepo::new(&db_url).await?;
    let router = HttpServer::new(CreditCardService::new(repo.clone(), repo)).router();

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router).await {
            eprintln!("server stopped: {e}");
        }
    });

    let client = CreditCardClient::new(format!("http://{addr}"));

    // ─────────────────────────────────────────────────────────────────────────
    // Demo: card lifecycle
    // ─────────────────────────────────────────────────────────────────────────

    println!("✅ Server health: {}", client.health().await?);

    let rejected = client.create_card(&CreditCardDto::default()).await;
    if let Err(e) = rejected {
        println!("✅ Empty card rejected: {e}");
    }

    let card = client
        .create_card(&CreditCardDto {
            customer_id: Some("C1".into()),
            card_type: Some("GOLD".into()),
            credit_limit: Some(dec!(1000.00)),
            current_balance: Some(dec!(1000.00)),
            expiration_date: NaiveDate::from_ymd_opt(2030, 12, 31),
            issue_statement_day: Some("15".into()),
            maintenance_fee: Some(dec!(9.99)),
            status: Some("active".into()),
            ..Default::default()
        })
        .await?;
    println!("✅ Created card {} (balance {})", card.id, card.current_balance);

    let card = client.charge(&card.id, dec!(120.50)).await?;
    println!("✅ Charged 120.50, balance {}", card.current_balance);

    let card = client.pay(&card.id, dec!(20.50)).await?;
    println!("✅ Paid 20.50, balance {}", card.current_balance);

    match client.charge(&card.id, dec!(5000)).await {
        Err(e) => println!("✅ Over-charge rejected: {e}"),
        Ok(_) => println!("❌ Over-charge accepted"),
    }

    let card = client.get_card(&card.id).await?;
    println!(
        "✅ Card {} has {} transactions",
        card.id,
        card.transactions.as_ref().map_or(0, Vec::len)
    );

    let active = client.count_by_customer("C1", "active").await?;
    println!("✅ Customer C1 has {active} active card(s)");

    client.delete_card(&card.id).await?;
    println!("✅ Deleted card, {} card(s) left", client.list_cards().await?.len());

    Ok(())
}
