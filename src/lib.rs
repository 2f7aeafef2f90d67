pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use adapters::{LocalFileStore, SupabaseStore};
pub use config::AppConfig;
pub use crate::core::{
    extractor::OrderExtractor,
    service::{OrderService, SaveOutcome, Submission},
    vocabulary::Vocabulary,
};
pub use utils::error::{OrderError, Result};
