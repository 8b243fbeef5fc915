use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use log::error;

use quotedeck::api::QuotesClient;
use quotedeck::app::App;
use quotedeck::cli::{run_command, Cli};
use quotedeck::config::SettingsManager;
use quotedeck::logging::init_logging;
use quotedeck::viewmodel::ViewModel;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let manager = SettingsManager::new()?;
    let settings = cli.resolve_settings(&manager)?;

    // Logging is best effort; the app works without it
    let _logger = match init_logging(&settings.log_level, &manager.log_dir()) {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("Logging disabled: {:#}", e);
            None
        }
    };

    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    let client = QuotesClient::new(&settings.api_url, settings.request_timeout())?;
    let mut vm = ViewModel::new(client, runtime.handle().clone());

    if let Some(ref command) = cli.command {
        // A mutation is followed by a refresh, so allow two round trips
        let timeout = settings
            .request_timeout()
            .saturating_mul(2)
            .saturating_add(Duration::from_secs(1));
        let stdout = io::stdout();
        return run_command(&mut vm, command, timeout, &mut stdout.lock());
    }

    // Initialize terminal with panic hook
    let mut terminal = ratatui::init();

    let result = App::new(vm).run(&mut terminal);

    // Restore terminal
    ratatui::restore();

    if let Err(ref e) = result {
        error!("Exited with error: {:#}", e);
    }
    result
}
