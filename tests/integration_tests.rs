use std::sync::Arc;

use anyhow::Result;
use brew_order::core::render::{render_orders, OutputFormat};
use brew_order::utils::validation::Validate;
use brew_order::{AppConfig, OrderError, OrderExtractor, OrderService, SaveOutcome};
use chrono::Local;
use httpmock::prelude::*;
use tempfile::TempDir;

fn service_from(config: &AppConfig) -> Result<OrderService> {
    config.validate()?;
    let extractor = OrderExtractor::new(Arc::new(config.vocabulary()));
    Ok(OrderService::new(extractor, config.build_store()?))
}

#[tokio::test]
async fn test_place_order_against_supabase() -> Result<()> {
    let server = MockServer::start();
    let today = Local::now().date_naive().format("%d/%m/%Y").to_string();

    let insert_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/rest/v1/Orders")
            .header("apikey", "anon-key")
            .json_body(serde_json::json!({
                "quantity": 3,
                "drink": "Cappuccino",
                "size": "unspecified",
                "modifiers": "ice cream",
                "created_at": today
            }));
        then.status(201)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!([{
                "id": 7,
                "quantity": 3,
                "drink": "Cappuccino",
                "size": "unspecified",
                "modifiers": "ice cream",
                "created_at": today
            }]));
    });

    let config = AppConfig::from_toml_str(&format!(
        r#"
[store]
backend = "supabase"
url = "{}"
api_key = "anon-key"
"#,
        server.base_url()
    ))?;

    let service = service_from(&config)?;
    let submission = service.submit("Get 3 cappuccino with ice cream").await?;

    insert_mock.assert();
    assert_eq!(submission.record.modifiers_display(), "ice cream");
    match submission.saved {
        SaveOutcome::Saved(stored) => assert_eq!(stored.id, Some(7)),
        SaveOutcome::NotConnected => panic!("order should have been saved"),
    }
    Ok(())
}

#[tokio::test]
async fn test_rejected_order_never_reaches_store() -> Result<()> {
    let server = MockServer::start();
    let insert_mock = server.mock(|when, then| {
        when.method(POST).path("/rest/v1/Orders");
        then.status(201).json_body(serde_json::json!([]));
    });

    let config = AppConfig::from_toml_str(&format!(
        r#"
[store]
backend = "supabase"
url = "{}"
api_key = "anon-key"
"#,
        server.base_url()
    ))?;

    let service = service_from(&config)?;
    let result = service.submit("two teas please").await;

    assert!(matches!(result, Err(OrderError::OrderRejected { .. })));
    insert_mock.assert_hits(0);
    Ok(())
}

#[tokio::test]
async fn test_store_failure_surfaces_on_list() -> Result<()> {
    let server = MockServer::start();
    let list_mock = server.mock(|when, then| {
        when.method(GET).path("/rest/v1/Orders");
        then.status(503).body("service unavailable");
    });

    let config = AppConfig::from_toml_str(&format!(
        r#"
[store]
backend = "supabase"
url = "{}"
api_key = "anon-key"
timeout_seconds = 2
"#,
        server.base_url()
    ))?;

    let service = service_from(&config)?;
    let err = service.list().await.unwrap_err();

    list_mock.assert();
    assert!(matches!(err, OrderError::StoreRequestError { status: 503, .. }));
    assert!(err.user_friendly_message().starts_with("Database error"));
    Ok(())
}

#[tokio::test]
async fn test_local_store_round_trip_with_custom_vocabulary() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let orders_path = temp_dir.path().join("orders.jsonl");
    let normalized_path = orders_path.to_string_lossy().replace('\\', "/");

    let config_path = temp_dir.path().join("brew-order.toml");
    tokio::fs::write(
        &config_path,
        format!(
            r#"
[store]
backend = "local"
path = "{}"

[vocabulary]
drinks = ["coffee", "latte", "mocha"]
sizes = ["small", "tall"]
"#,
            normalized_path
        ),
    )
    .await?;

    let config = AppConfig::from_file(&config_path)?;
    let service = service_from(&config)?;

    service.submit("I need a tall mocha with milk").await?;
    service.submit("Order 2 latte with sugar").await?;

    let orders = service.list().await?;
    assert_eq!(orders.len(), 2);
    assert_eq!(orders[0].row.drink.as_deref(), Some("Mocha"));
    assert_eq!(orders[0].row.size, "Tall");
    assert_eq!(orders[0].row.modifiers, "milk");
    assert_eq!(orders[1].row.quantity, 2);

    let csv = render_orders(&orders, OutputFormat::Csv)?;
    assert_eq!(csv.lines().count(), 3);
    assert!(csv.contains(",Mocha,Tall,milk,"));
    Ok(())
}

#[tokio::test]
async fn test_without_store_orders_are_parsed_but_not_saved() -> Result<()> {
    let config = AppConfig::from_toml_str("")?;
    let service = service_from(&config)?;

    let submission = service.submit("Make an espresso please").await?;
    assert_eq!(submission.record.drink.as_deref(), Some("Espresso"));
    assert_eq!(submission.saved, SaveOutcome::NotConnected);
    assert!(matches!(
        service.list().await,
        Err(OrderError::StoreNotConfigured)
    ));
    Ok(())
}
