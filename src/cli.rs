//! Command-line arguments and the non-interactive commands

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};

use crate::api::{Quote, QuoteId};
use crate::config::{load_settings_file, Settings, SettingsManager};
use crate::viewmodel::{FormBuffer, SyncEvent, ViewModel};

/// Terminal client for a quotes REST API
#[derive(Parser, Debug)]
#[command(name = "quotedeck", version, about)]
pub struct Cli {
    /// URL of the quotes collection, e.g. http://localhost:5000/quotes
    #[arg(long, env = "QUOTEDECK_API_URL")]
    pub api_url: Option<String>,

    /// Settings file to use instead of ~/.quotedeck/config.toml
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Per-request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Run one command and print the resulting list instead of starting the TUI
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// List every quote
    List,
    /// List quotes by author, as matched by the server
    Search { author: String },
    /// Add a quote
    Add(QuoteArgs),
    /// Replace the quote with the given id
    Update {
        id: String,
        #[command(flatten)]
        quote: QuoteArgs,
    },
    /// Delete the quote with the given id
    Delete { id: String },
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct QuoteArgs {
    #[arg(long)]
    pub author: String,
    /// Comma-separated tags
    #[arg(long, default_value = "")]
    pub tags: String,
    #[arg(long)]
    pub text: String,
}

impl QuoteArgs {
    fn to_buffer(&self) -> FormBuffer {
        FormBuffer::new(self.author.as_str(), self.tags.as_str(), self.text.as_str())
    }
}

impl Cli {
    /// Settings from the file (or defaults), with command-line overrides applied
    pub fn resolve_settings(&self, manager: &SettingsManager) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => load_settings_file(path)?,
            None => manager.load()?,
        };

        if let Some(ref url) = self.api_url {
            settings.api_url = url.clone();
        }
        if let Some(timeout) = self.timeout {
            settings.request_timeout_secs = timeout;
        }
        if let Some(ref level) = self.log_level {
            settings.log_level = level.clone();
        }

        settings.validate()?;
        Ok(settings)
    }
}

/// Runs `command`, waits for it and the refresh it triggers, then prints the list
pub fn run_command(
    vm: &mut ViewModel,
    command: &Command,
    timeout: Duration,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        Command::List => vm.load_all(),
        Command::Search { author } => vm.search(author.as_str()),
        Command::Add(quote) => {
            vm.form = quote.to_buffer();
            vm.create()?;
        }
        Command::Update { id, quote } => {
            vm.form = quote.to_buffer();
            vm.update(QuoteId::new(id.as_str()))?;
        }
        Command::Delete { id } => vm.remove(QuoteId::new(id.as_str())),
    }

    for event in vm.settle(timeout) {
        if let SyncEvent::Failed { op, error } = event {
            bail!("Failed to {}: {}", op.label(), error);
        }
    }
    if vm.is_busy() {
        bail!("Timed out waiting for the server after {:?}", timeout);
    }

    print_quotes(vm.quotes(), out)?;
    Ok(())
}

/// One line per quote: `id | author | tags | quote`
pub fn print_quotes(quotes: &[Quote], out: &mut impl Write) -> std::io::Result<()> {
    for quote in quotes {
        writeln!(
            out,
            "{} | {} | {} | {}",
            quote.id,
            quote.author,
            quote.tags_joined(),
            quote.quote_text
        )?;
    }
    Ok(())
}
