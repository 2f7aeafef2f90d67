use crate::adapters::supabase::DEFAULT_TABLE;
use crate::adapters::{LocalFileStore, SupabaseStore};
use crate::core::vocabulary::Vocabulary;
use crate::domain::ports::OrderStore;
use crate::utils::error::{OrderError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_positive_number, validate_required_field,
    validate_url, Validate,
};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const SUPABASE_URL_VAR: &str = "SUPABASE_URL";
pub const SUPABASE_KEY_VAR: &str = "SUPABASE_KEY";
const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

static ENV_VAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern must compile"));

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub store: StoreConfig,
    pub vocabulary: Option<VocabularyConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Supabase,
    Local,
    #[default]
    None,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,
    pub url: Option<String>,
    pub api_key: Option<String>,
    pub table: Option<String>,
    pub timeout_seconds: Option<u64>,
    /// JSON-lines file for the local backend.
    pub path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VocabularyConfig {
    pub drinks: Option<Vec<String>>,
    pub modifiers: Option<Vec<String>>,
    pub sizes: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub json: Option<bool>,
}

impl AppConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(OrderError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| OrderError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Reads `KEY=value` lines from a `.env` file into the process environment.
    /// Variables already set win. A missing file is not an error.
    pub fn load_dotenv(path: Option<&Path>) -> Result<()> {
        let loaded = match path {
            Some(path) => dotenvy::from_path(path),
            None => dotenvy::dotenv().map(|_| ()),
        };

        match loaded {
            Ok(()) => Ok(()),
            Err(e) if e.not_found() => Ok(()),
            Err(e) => Err(OrderError::ConfigValidationError {
                field: ".env".to_string(),
                message: e.to_string(),
            }),
        }
    }

    /// Without a config file: Supabase when both credentials are set, no store otherwise.
    pub fn from_env() -> Self {
        let url = non_empty_env(SUPABASE_URL_VAR);
        let key = non_empty_env(SUPABASE_KEY_VAR);

        let store = match (url, key) {
            (Some(url), Some(key)) => StoreConfig {
                backend: StoreBackend::Supabase,
                url: Some(url),
                api_key: Some(key),
                ..StoreConfig::default()
            },
            _ => StoreConfig::default(),
        };

        Self {
            store,
            ..Self::default()
        }
    }

    /// Replaces `${VAR}` with the variable's value; unset variables are left as written.
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn vocabulary(&self) -> Vocabulary {
        self.vocabulary
            .as_ref()
            .map(Vocabulary::from_config)
            .unwrap_or_default()
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.level.as_deref())
    }

    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.store.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS))
    }

    pub fn table(&self) -> &str {
        self.store.table.as_deref().unwrap_or(DEFAULT_TABLE)
    }

    /// Builds the configured store; `None` for the `none` backend.
    pub fn build_store(&self) -> Result<Option<Box<dyn OrderStore>>> {
        match self.store.backend {
            StoreBackend::Supabase => {
                let url = validate_required_field("store.url", &self.store.url)?;
                let key = validate_required_field("store.api_key", &self.store.api_key)?;
                let store = SupabaseStore::new(url.as_str(), key.as_str())
                    .with_table(self.table())
                    .with_timeout(self.timeout());
                Ok(Some(Box::new(store)))
            }
            StoreBackend::Local => {
                let path = validate_required_field("store.path", &self.store.path)?;
                Ok(Some(Box::new(LocalFileStore::new(path.as_str()))))
            }
            StoreBackend::None => Ok(None),
        }
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        match self.store.backend {
            StoreBackend::Supabase => {
                let url = validate_required_field("store.url", &self.store.url)?;
                validate_url("store.url", url)?;
                let key = validate_required_field("store.api_key", &self.store.api_key)?;
                validate_non_empty_string("store.api_key", key)?;
                if let Some(table) = &self.store.table {
                    validate_non_empty_string("store.table", table)?;
                }
            }
            StoreBackend::Local => {
                let path = validate_required_field("store.path", &self.store.path)?;
                validate_path("store.path", path)?;
            }
            StoreBackend::None => {}
        }

        if let Some(timeout) = self.store.timeout_seconds {
            validate_positive_number("store.timeout_seconds", timeout, 1)?;
        }

        self.vocabulary().validate()
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
