use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Translate text between languages
    Translate {
        /// Text to translate; read from stdin when omitted
        text: Option<String>,

        /// Source language code ("auto" to detect)
        #[arg(short, long)]
        from: Option<String>,

        /// Target language code
        #[arg(short, long)]
        to: Option<String>,
    },

    /// Start an interactive translation session
    Interactive {
        /// Initial source language code
        #[arg(short, long)]
        from: Option<String>,

        /// Initial target language code
        #[arg(short, long)]
        to: Option<String>,
    },

    /// List supported languages
    Languages,

    /// Manage the translation history
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },
}

#[derive(Subcommand)]
pub enum HistoryAction {
    /// List recent translations
    List,

    /// Export the history to a plain-text file
    Export {
        /// Output file path
        #[arg(short, long, default_value = "translation_history.txt")]
        output: PathBuf,
    },

    /// Clear all recorded translations
    Clear,
}
