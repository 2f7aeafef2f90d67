use std::sync::Arc;

use brew_order::core::render::{render_order_card, render_orders};
use brew_order::utils::error::ErrorSeverity;
use brew_order::utils::{logger, validation::Validate};
use brew_order::{
    AppConfig, CliConfig, Command, OrderError, OrderExtractor, OrderService, SaveOutcome,
};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let config = match &cli.config {
        Some(path) => match AppConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path, e);
                eprintln!("💡 Make sure the file exists and is valid TOML format");
                std::process::exit(1);
            }
        },
        None => {
            if let Err(e) = AppConfig::load_dotenv(None) {
                eprintln!("❌ Failed to read .env: {}", e);
                std::process::exit(1);
            }
            AppConfig::from_env()
        }
    };

    // Logging
    if cli.json_logs || config.json_logs() {
        logger::init_json_logger(cli.verbose, config.log_level());
    } else {
        logger::init_cli_logger(cli.verbose, config.log_level());
    }

    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let vocabulary = Arc::new(config.vocabulary());
    let store = config.build_store()?;
    let service = OrderService::new(OrderExtractor::new(vocabulary), store);

    if let Err(e) = run(&service, cli.command).await {
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        report(&e);
        std::process::exit(exit_code(&e));
    }

    Ok(())
}

async fn run(service: &OrderService, command: Command) -> brew_order::Result<()> {
    match command {
        Command::Check { text } => {
            service.validate(&text)?;
            println!("✅ Grammar accepted! Order validated successfully.");
        }
        Command::Place { text } => {
            let submission = service.submit(&text).await?;
            println!("✅ Grammar accepted! Order validated successfully.");
            println!("{}", render_order_card(&submission.record));
            match submission.saved {
                SaveOutcome::Saved(_) => println!("💾 Order saved to database successfully!"),
                SaveOutcome::NotConnected => eprintln!(
                    "⚠️ Database not connected. Please check your store credentials."
                ),
            }
        }
        Command::List { format } => {
            let orders = service.list().await?;
            println!("{}", render_orders(&orders, format)?);
        }
        Command::Vocab => {
            let vocabulary = service.extractor().vocabulary();
            println!("Drinks:    {}", vocabulary.drinks().join(", "));
            println!("Sizes:     {}", vocabulary.sizes().join(", "));
            println!("Modifiers: {}", vocabulary.modifiers().join(", "));
        }
    }
    Ok(())
}

fn report(e: &OrderError) {
    match e.severity() {
        ErrorSeverity::Low => eprintln!("⚠️ {}", e.user_friendly_message()),
        _ => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
        }
    }
}

// Exit code by error severity
fn exit_code(e: &OrderError) -> i32 {
    match e.severity() {
        ErrorSeverity::Low => 4,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}
