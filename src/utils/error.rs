use thiserror::Error;

#[derive(Error, Debug)]
pub enum OrderError {
    #[error("Order text is empty")]
    EmptyInput,

    #[error("Order rejected by grammar check: {text}")]
    OrderRejected { text: String },

    #[error("Order store is not configured")]
    StoreNotConfigured,

    #[error("Store request failed with status {status}: {message}")]
    StoreRequestError { status: u16, message: String },

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("CSV rendering error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Storage,
    Network,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl OrderError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            OrderError::EmptyInput | OrderError::OrderRejected { .. } => ErrorCategory::Input,
            OrderError::StoreNotConfigured | OrderError::StoreRequestError { .. } => {
                ErrorCategory::Storage
            }
            OrderError::HttpError(_) => ErrorCategory::Network,
            OrderError::ConfigValidationError { .. }
            | OrderError::InvalidConfigValueError { .. }
            | OrderError::MissingConfigError { .. } => ErrorCategory::Configuration,
            OrderError::CsvError(_)
            | OrderError::IoError(_)
            | OrderError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            OrderError::EmptyInput | OrderError::StoreNotConfigured => ErrorSeverity::Low,
            OrderError::OrderRejected { .. } => ErrorSeverity::Medium,
            OrderError::StoreRequestError { status, .. } if *status >= 500 => {
                ErrorSeverity::Medium
            }
            OrderError::StoreRequestError { .. } | OrderError::HttpError(_) => ErrorSeverity::High,
            OrderError::ConfigValidationError { .. }
            | OrderError::InvalidConfigValueError { .. }
            | OrderError::MissingConfigError { .. } => ErrorSeverity::High,
            OrderError::CsvError(_)
            | OrderError::IoError(_)
            | OrderError::SerializationError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            OrderError::EmptyInput => "Type an order such as 'Order 2 latte with sugar'",
            OrderError::OrderRejected { .. } => {
                "Name a drink and use a structure like 'I want a coffee' or 'Make an espresso please'"
            }
            OrderError::StoreNotConfigured => {
                "Set SUPABASE_URL and SUPABASE_KEY or configure [store] in the config file"
            }
            OrderError::StoreRequestError { status, .. } => match status {
                401 | 403 => "Check the store API key and table permissions",
                404 => "Check that the orders table exists",
                _ => "Check the store service status and try again",
            },
            OrderError::HttpError(_) => "Check network connectivity and the store URL",
            OrderError::CsvError(_) | OrderError::SerializationError(_) => {
                "Try another output format"
            }
            OrderError::IoError(_) => "Check file permissions and available disk space",
            OrderError::ConfigValidationError { .. }
            | OrderError::InvalidConfigValueError { .. }
            | OrderError::MissingConfigError { .. } => "Review the configuration file",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            OrderError::EmptyInput => "Please enter an order first.".to_string(),
            OrderError::OrderRejected { .. } => {
                "Invalid grammar. Please use a proper structure (e.g., 'Order 2 latte with sugar')"
                    .to_string()
            }
            OrderError::StoreNotConfigured => {
                "Database not connected. Please check your store credentials.".to_string()
            }
            OrderError::StoreRequestError { .. } | OrderError::HttpError(_) => {
                format!("Database error: {}", self)
            }
            _ => self.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, OrderError>;
