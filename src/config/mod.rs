pub mod toml_config;

pub use toml_config::{AppConfig, StoreBackend, StoreConfig, VocabularyConfig};

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command};

#[cfg(feature = "cli")]
mod cli {
    use crate::core::render::OutputFormat;
    use clap::{Parser, Subcommand};

    #[derive(Debug, Clone, Parser)]
    #[command(name = "brew-order")]
    #[command(about = "Take drink orders written in plain English")]
    pub struct CliConfig {
        /// Path to TOML configuration file (defaults to SUPABASE_URL / SUPABASE_KEY)
        #[arg(short, long, global = true)]
        pub config: Option<String>,

        /// Enable verbose output
        #[arg(short, long, global = true)]
        pub verbose: bool,

        /// Emit logs as JSON lines
        #[arg(long, global = true)]
        pub json_logs: bool,

        #[command(subcommand)]
        pub command: Command,
    }

    #[derive(Debug, Clone, Subcommand)]
    pub enum Command {
        /// Check whether an order would be accepted
        Check { text: String },

        /// Validate, extract and save an order
        Place { text: String },

        /// List saved orders
        List {
            #[arg(long, default_value = "table")]
            format: OutputFormat,
        },

        /// Show the recognised drinks, sizes and modifiers
        Vocab,
    }

}
