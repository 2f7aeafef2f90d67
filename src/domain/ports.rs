use crate::domain::model::{OrderRow, StoredOrder};
use crate::utils::error::Result;
use async_trait::async_trait;

/// The orders table. Failures are returned to the caller, never swallowed.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Backend name for log lines.
    fn name(&self) -> &str;

    async fn insert_order(&self, row: &OrderRow) -> Result<StoredOrder>;

    async fn list_orders(&self) -> Result<Vec<StoredOrder>>;
}
