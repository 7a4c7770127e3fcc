//! Lingo - Command-Line Text Translation
//!
//! Entry point for the lingo binary: translate text through the MyMemory
//! public API, keep a bounded history of recent translations, and expose
//! them through list/export/clear commands or an interactive session.

use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use indicatif::ProgressBar;
use tokio::io::AsyncReadExt;
use tracing::{info, Level};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use tracing_appender::{non_blocking, rolling};

use lingo::catalog;
use lingo::cli::{Args, Commands, HistoryAction};
use lingo::config::Config;
use lingo::error::LingoError;
use lingo::history::{FileHistoryStorage, HistoryStore};
use lingo::interactive::{InteractiveSession, LinkShare};
use lingo::provider::ProviderFactory;
use lingo::session::SessionController;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    setup_logging(args.verbose)?;

    // Load configuration
    let config = match &args.config {
        Some(config_path) => Config::from_file(config_path)?,
        None => {
            if Path::new("config.toml").exists() {
                info!("Found config.toml in current directory, loading...");
                Config::from_file("config.toml")?
            } else {
                Config::default()
            }
        }
    };

    match args.command {
        Commands::Translate { text, from, to } => {
            let from = from.unwrap_or_else(|| config.provider.default_from.clone());
            let to = to.unwrap_or_else(|| config.provider.default_to.clone());

            let text = match text {
                Some(text) => text,
                None => read_stdin().await?,
            };

            let mut session = build_session(&config);

            let spinner = ProgressBar::new_spinner();
            spinner.set_message("Translating…");
            spinner.enable_steady_tick(Duration::from_millis(120));

            let outcome = session.submit(&text, &from, &to).await;
            spinner.finish_and_clear();

            match outcome {
                Ok(result) => {
                    println!("{}", result.translated_text);
                    eprintln!("Powered by: {}", result.provider_name);
                    if let Some(detected) = &result.detected_from {
                        eprintln!("Detected language: {}", detected);
                    }
                }
                Err(e) => {
                    info!("Translation command failed: {}", e);
                    let message = session
                        .state()
                        .error
                        .clone()
                        .unwrap_or_else(|| e.to_string());
                    return Err(anyhow::anyhow!(message));
                }
            }
        }
        Commands::Interactive { from, to } => {
            let from = from.unwrap_or_else(|| config.provider.default_from.clone());
            let to = to.unwrap_or_else(|| config.provider.default_to.clone());

            let session = build_session(&config).with_share_sink(Box::new(LinkShare));
            InteractiveSession::new(session, from, to).run().await?;
        }
        Commands::Languages => {
            println!("\nSupported Languages:");
            println!("{:<8} {}", "Code", "Name");
            println!("{}", "-".repeat(30));
            for entry in catalog::all() {
                println!("{:<8} {}", entry.code, entry.name);
            }
        }
        Commands::History { action } => {
            let mut history = load_history(&config);

            match action {
                HistoryAction::List => {
                    let entries = history.entries();
                    if entries.is_empty() {
                        println!("No history yet.");
                    } else {
                        println!("\nRecent Translations:");
                        for (i, entry) in entries.iter().enumerate() {
                            println!(
                                "{}. {} → {} ({} → {}, {})",
                                i + 1,
                                entry.input,
                                entry.output,
                                entry.from,
                                entry.to,
                                entry.timestamp
                            );
                        }
                    }
                }
                HistoryAction::Export { output } => {
                    match history.export_to_file(&output).await {
                        Ok(()) => println!("History exported to {}", output.display()),
                        Err(LingoError::Validation(notice)) => println!("{}", notice),
                        Err(e) => return Err(e.into()),
                    }
                }
                HistoryAction::Clear => {
                    history.clear()?;
                    println!("History cleared.");
                }
            }
        }
    }

    Ok(())
}

fn build_session(config: &Config) -> SessionController {
    let provider = ProviderFactory::create_provider(config.provider.clone());
    SessionController::new(provider, load_history(config))
}

fn load_history(config: &Config) -> HistoryStore {
    let storage = FileHistoryStorage::new(&config.storage.data_dir);
    HistoryStore::load(Box::new(storage))
}

async fn read_stdin() -> Result<String> {
    let mut text = String::new();
    tokio::io::stdin().read_to_string(&mut text).await?;
    Ok(text)
}

/// Setup logging to both console and file
fn setup_logging(verbose: bool) -> Result<()> {
    // Create log directory
    let lingo_dir = std::env::current_dir()?.join(".lingo");
    let log_dir = lingo_dir.join("log");
    std::fs::create_dir_all(&log_dir)?;

    // Set up file appender with daily rotation
    let file_appender = rolling::daily(&log_dir, "lingo.log");
    let (non_blocking_file, _guard) = non_blocking(file_appender);
    // Keep the guard alive for the duration of the program
    std::mem::forget(_guard);

    // Determine log level
    let log_level = if verbose { Level::DEBUG } else { Level::WARN };

    // Create console layer
    let console_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    // Create file layer
    let file_layer = fmt::layer()
        .with_writer(non_blocking_file)
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false); // No ANSI colors in file

    // Setup layered subscriber
    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(console_layer)
        .with(file_layer);

    // Initialize the subscriber
    subscriber.try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}
