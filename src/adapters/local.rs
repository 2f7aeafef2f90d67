use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::domain::model::{OrderRow, StoredOrder};
use crate::domain::ports::OrderStore;
use crate::utils::error::{OrderError, Result};

/// Orders kept as JSON lines in a local file, one order per line.
#[derive(Debug, Clone)]
pub struct LocalFileStore {
    path: PathBuf,
}

impl LocalFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> Result<Vec<StoredOrder>> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| serde_json::from_str::<StoredOrder>(line).map_err(OrderError::from))
            .collect()
    }
}

#[async_trait]
impl OrderStore for LocalFileStore {
    fn name(&self) -> &str {
        "local"
    }

    async fn insert_order(&self, row: &OrderRow) -> Result<StoredOrder> {
        let existing = self.read_all().await?;
        let next_id = existing.iter().filter_map(|o| o.id).max().unwrap_or(0) + 1;

        let stored = StoredOrder {
            id: Some(next_id),
            row: row.clone(),
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let mut line = serde_json::to_string(&stored)?;
        line.push('\n');

        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;

        tracing::debug!("Appended order {} to {}", next_id, self.path.display());
        Ok(stored)
    }

    async fn list_orders(&self) -> Result<Vec<StoredOrder>> {
        self.read_all().await
    }
}
