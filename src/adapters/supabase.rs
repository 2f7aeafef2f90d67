use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};

use crate::domain::model::{OrderRow, StoredOrder};
use crate::domain::ports::OrderStore;
use crate::utils::error::{OrderError, Result};

pub const DEFAULT_TABLE: &str = "Orders";

/// Orders table behind a Supabase (PostgREST) endpoint.
#[derive(Debug, Clone)]
pub struct SupabaseStore {
    client: Client,
    base_url: String,
    api_key: String,
    table: String,
    timeout: Option<Duration>,
}

impl SupabaseStore {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            table: DEFAULT_TABLE.to_string(),
            timeout: None,
        }
    }

    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, self.table)
    }

    fn authorize(&self, mut request: RequestBuilder) -> RequestBuilder {
        request = request
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }
        request
    }

    async fn check_status(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response.text().await.unwrap_or_default();
        tracing::warn!("Store responded with {}: {}", status, message);
        Err(OrderError::StoreRequestError {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl OrderStore for SupabaseStore {
    fn name(&self) -> &str {
        "supabase"
    }

    async fn insert_order(&self, row: &OrderRow) -> Result<StoredOrder> {
        tracing::debug!("Inserting order into {}", self.table_url());
        let request = self
            .client
            .post(self.table_url())
            .header("prefer", "return=representation")
            .json(row);

        let response = Self::check_status(self.authorize(request).send().await?).await?;
        let mut inserted: Vec<StoredOrder> = response.json().await?;

        // An empty representation still means the insert succeeded.
        Ok(if inserted.is_empty() {
            StoredOrder {
                id: None,
                row: row.clone(),
            }
        } else {
            inserted.swap_remove(0)
        })
    }

    async fn list_orders(&self) -> Result<Vec<StoredOrder>> {
        tracing::debug!("Listing orders from {}", self.table_url());
        let request = self
            .client
            .get(self.table_url())
            .query(&[("select", "*")]);

        let response = Self::check_status(self.authorize(request).send().await?).await?;
        let orders: Vec<StoredOrder> = response.json().await?;
        tracing::debug!("Fetched {} orders", orders.len());
        Ok(orders)
    }
}
