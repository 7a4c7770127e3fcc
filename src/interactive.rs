//! Interactive translation session.
//!
//! REPL-style loop over the session controller: plain lines are translated,
//! colon commands drive the session (swap, clear, history, export, share).

use std::io::Write;
use std::time::Duration;

use indicatif::ProgressBar;
use tokio::io::{self, AsyncBufReadExt, BufReader};
use tracing::debug;

use crate::capability::{telegram_share_url, whatsapp_share_url, CapabilityResult, ShareSink};
use crate::catalog;
use crate::error::{LingoError, Result};
use crate::session::SessionController;

const EXPORT_FILENAME: &str = "translation_history.txt";

/// Share sink that renders messenger share links
pub struct LinkShare;

impl ShareSink for LinkShare {
    fn share(&self, message: &str) -> CapabilityResult<()> {
        println!("WhatsApp: {}", whatsapp_share_url(message));
        println!("Telegram: {}", telegram_share_url(message));
        Ok(())
    }
}

pub struct InteractiveSession {
    session: SessionController,
    from: String,
    to: String,
}

impl InteractiveSession {
    pub fn new(session: SessionController, from: String, to: String) -> Self {
        Self { session, from, to }
    }

    pub async fn run(&mut self) -> Result<()> {
        println!("Type text to translate, :help for commands, :quit to leave.");

        let mut lines = BufReader::new(io::stdin()).lines();
        self.prompt();

        while let Some(line) = lines.next_line().await? {
            let line = line.trim();

            if line.is_empty() {
                self.prompt();
                continue;
            }

            if let Some(command) = line.strip_prefix(':') {
                if self.handle_command(command).await {
                    break;
                }
            } else {
                self.translate(line).await;
            }

            self.prompt();
        }

        Ok(())
    }

    fn prompt(&self) {
        print!("{} → {} > ", self.from, self.to);
        let _ = std::io::stdout().flush();
    }

    async fn translate(&mut self, text: &str) {
        let spinner = ProgressBar::new_spinner();
        spinner.set_message("Translating…");
        spinner.enable_steady_tick(Duration::from_millis(120));

        let outcome = self.session.submit(text, &self.from, &self.to).await;
        spinner.finish_and_clear();

        match outcome {
            Ok(result) => {
                println!("{}", result.translated_text);
                println!("  Powered by: {}", result.provider_name);
                if let Some(detected) = &result.detected_from {
                    println!("  Detected language: {}", detected);
                }
            }
            Err(e) => {
                debug!("Submit failed: {}", e);
                if let Some(message) = &self.session.state().error {
                    println!("{}", message);
                }
            }
        }
    }

    /// Handle a colon command; returns true when the session should end
    async fn handle_command(&mut self, command: &str) -> bool {
        let mut parts = command.split_whitespace();
        let name = parts.next().unwrap_or_default();
        let argument = parts.next();

        match name {
            "quit" | "q" => return true,
            "swap" => {
                let (from, to) = self.session.swap(&self.from, &self.to);
                self.from = from;
                self.to = to;
            }
            "clear" => self.session.clear(),
            "from" => match argument {
                Some(code) if catalog::is_valid_source(code) => self.from = code.to_string(),
                Some(code) => println!("Unknown source language: {}", code),
                None => println!("Usage: :from <code>"),
            },
            "to" => match argument {
                Some(code) if catalog::is_valid_target(code) => self.to = code.to_string(),
                Some(code) => println!("Unknown target language: {}", code),
                None => println!("Usage: :to <code>"),
            },
            "history" => self.print_history(),
            "export" => match self.session.history().export_to_file(EXPORT_FILENAME).await {
                Ok(()) => println!("History exported to {}", EXPORT_FILENAME),
                Err(LingoError::Validation(notice)) => println!("{}", notice),
                Err(e) => println!("Export failed: {}", e),
            },
            "share" => {
                if let Err(notice) = self.session.share_translation(&self.from, &self.to) {
                    println!("{}", notice);
                }
            }
            "speak" => {
                if let Err(notice) = self.session.speak_translated(&self.to) {
                    println!("{}", notice);
                }
            }
            "copy" => {
                if let Err(notice) = self.session.copy_translated() {
                    println!("{}", notice);
                }
            }
            "help" => print_help(),
            other => println!("Unknown command: :{}", other),
        }

        false
    }

    fn print_history(&self) {
        let entries = self.session.history().entries();
        if entries.is_empty() {
            println!("No history yet.");
            return;
        }

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

fn print_help() {
    println!("Commands:");
    println!("  :swap          swap source and target languages");
    println!("  :from <code>   set the source language");
    println!("  :to <code>     set the target language");
    println!("  :clear         clear input and output");
    println!("  :history       show recent translations");
    println!("  :export        write the history to {}", EXPORT_FILENAME);
    println!("  :share         show share links for the last translation");
    println!("  :speak         read the last translation aloud");
    println!("  :copy          copy the last translation");
    println!("  :quit          leave the session");
}
