pub mod extractor;
pub mod patterns;
pub mod render;
pub mod service;
pub mod vocabulary;

pub use crate::domain::model::{OrderRecord, OrderRow, StoredOrder};
pub use crate::domain::ports::OrderStore;
pub use crate::utils::error::Result;
