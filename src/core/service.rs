use crate::core::extractor::OrderExtractor;
use crate::domain::model::{OrderRecord, StoredOrder};
use crate::domain::ports::OrderStore;
use crate::utils::error::{OrderError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved(StoredOrder),
    /// No store configured; the order was parsed but not persisted.
    NotConnected,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub record: OrderRecord,
    pub saved: SaveOutcome,
}

/// One order at a time: validate, extract, persist.
pub struct OrderService {
    extractor: OrderExtractor,
    store: Option<Box<dyn OrderStore>>,
}

impl OrderService {
    pub fn new(extractor: OrderExtractor, store: Option<Box<dyn OrderStore>>) -> Self {
        Self { extractor, store }
    }

    pub fn extractor(&self) -> &OrderExtractor {
        &self.extractor
    }

    pub fn has_store(&self) -> bool {
        self.store.is_some()
    }

    pub fn check(&self, text: &str) -> bool {
        self.extractor.is_valid_order(text)
    }

    /// Blank text is `EmptyInput`; anything else the grammar refuses is `OrderRejected`.
    pub fn validate(&self, text: &str) -> Result<()> {
        if text.trim().is_empty() {
            return Err(OrderError::EmptyInput);
        }
        if !self.check(text) {
            return Err(OrderError::OrderRejected {
                text: text.trim().to_string(),
            });
        }
        Ok(())
    }

    pub async fn submit(&self, text: &str) -> Result<Submission> {
        self.validate(text)?;

        let record = self.extractor.extract_order(text);
        tracing::info!(
            "Accepted order: {} x {}",
            record.quantity,
            record.drink.as_deref().unwrap_or("?")
        );

        let saved = match &self.store {
            Some(store) => {
                let stored = store.insert_order(&record.to_row()).await?;
                tracing::info!("Order saved to {} store (id {:?})", store.name(), stored.id);
                SaveOutcome::Saved(stored)
            }
            None => {
                tracing::warn!("No order store configured, order not saved");
                SaveOutcome::NotConnected
            }
        };

        Ok(Submission { record, saved })
    }

    pub async fn list(&self) -> Result<Vec<StoredOrder>> {
        let store = self.store.as_ref().ok_or(OrderError::StoreNotConfigured)?;
        let orders = store.list_orders().await?;
        tracing::info!("Loaded {} orders from {} store", orders.len(), store.name());
        Ok(orders)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::OrderRow;
    use async_trait::async_trait;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone, Default)]
    struct MockStore {
        rows: Arc<Mutex<Vec<OrderRow>>>,
        fail: bool,
    }

    #[async_trait]
    impl OrderStore for MockStore {
        fn name(&self) -> &str {
            "mock"
        }

        async fn insert_order(&self, row: &OrderRow) -> Result<StoredOrder> {
            if self.fail {
                return Err(OrderError::StoreRequestError {
                    status: 500,
                    message: "boom".to_string(),
                });
            }
            let mut rows = self.rows.lock().await;
            rows.push(row.clone());
            Ok(StoredOrder {
                id: Some(rows.len() as i64),
                row: row.clone(),
            })
        }

        async fn list_orders(&self) -> Result<Vec<StoredOrder>> {
            let rows = self.rows.lock().await;
            Ok(rows
                .iter()
                .enumerate()
                .map(|(i, row)| StoredOrder {
                    id: Some(i as i64 + 1),
                    row: row.clone(),
                })
                .collect())
        }
    }

    fn service_with(store: MockStore) -> OrderService {
        OrderService::new(OrderExtractor::default(), Some(Box::new(store)))
    }

    #[tokio::test]
    async fn test_submit_saves_valid_order() {
        let store = MockStore::default();
        let service = service_with(store.clone());

        let submission = service.submit("Order 2 latte with sugar").await.unwrap();
        assert_eq!(submission.record.quantity, 2);
        match submission.saved {
            SaveOutcome::Saved(stored) => {
                assert_eq!(stored.id, Some(1));
                assert_eq!(stored.row.drink.as_deref(), Some("Latte"));
                assert_eq!(stored.row.modifiers, "sugar");
            }
            SaveOutcome::NotConnected => panic!("expected saved order"),
        }
        assert_eq!(store.rows.lock().await.len(), 1);
    }

    #[tokio::test]
    async fn test_rejected_order_is_not_saved() {
        let store = MockStore::default();
        let service = service_with(store.clone());

        assert!(matches!(
            service.submit("I would like tea").await,
            Err(OrderError::OrderRejected { .. })
        ));
        assert!(matches!(
            service.submit("   ").await,
            Err(OrderError::EmptyInput)
        ));
        assert!(store.rows.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_store_failure_is_surfaced() {
        let service = service_with(MockStore {
            fail: true,
            ..MockStore::default()
        });

        let err = service.submit("I want a coffee").await.unwrap_err();
        assert!(matches!(err, OrderError::StoreRequestError { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_without_store() {
        let service = OrderService::new(OrderExtractor::default(), None);
        assert!(!service.has_store());

        let submission = service.submit("I want a coffee").await.unwrap();
        assert_eq!(submission.saved, SaveOutcome::NotConnected);
        assert!(matches!(
            service.list().await,
            Err(OrderError::StoreNotConfigured)
        ));
    }

    #[tokio::test]
    async fn test_list_returns_saved_orders() {
        let service = service_with(MockStore::default());
        service.submit("I want a coffee").await.unwrap();
        service.submit("Get 3 cappuccino with ice cream").await.unwrap();

        let orders = service.list().await.unwrap();
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[1].row.modifiers, "ice cream");
    }

    #[test]
    fn test_validate_separates_blank_from_rejected() {
        let service = OrderService::new(OrderExtractor::default(), None);
        assert!(matches!(service.validate(""), Err(OrderError::EmptyInput)));
        assert!(matches!(service.validate(" \t "), Err(OrderError::EmptyInput)));
        assert!(matches!(
            service.validate("coffee"),
            Err(OrderError::OrderRejected { .. })
        ));
        assert!(service.validate("I want a coffee").is_ok());
    }

    #[test]
    fn test_check_runs_without_runtime() {
        let service = OrderService::new(OrderExtractor::default(), None);
        assert!(service.check("Make an espresso please"));
        assert!(!service.check("espresso"));
        let listed = tokio_test::block_on(service.list());
        assert!(listed.is_err());
    }
}
