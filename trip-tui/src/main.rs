mod api;
mod app;
mod bootstrap;
mod cli;
mod config;
mod logging;
mod runtime;
mod session_store;
mod time_utils;
mod ui;

use anyhow::Result;
use app::App;
use clap::Parser;
use cli::{Cli, Commands};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

use crate::api::SharedApi;
use crate::config::TripConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env.trip
    dotenvy::from_filename(".env.trip").ok();

    let cli = Cli::parse();
    let cfg = TripConfig::load()?;

    match cli.command {
        Commands::Run => {
            let trip_id = cfg.require_trip_id()?.to_string();
            let api = api::connect(&cfg)?;
            run_tui(&cfg, api, trip_id).await
        }
        Commands::Dev => {
            println!("Running against the in-memory sample trip");
            run_tui(&cfg, api::dev(), api::DEV_TRIP_ID.to_string()).await
        }
        Commands::Login { token } => {
            session_store::save_session(&token)?;
            println!("Session saved to {}", session_store::session_path()?.display());
            Ok(())
        }
        Commands::Logout => {
            session_store::clear_session()?;
            println!("Logged out");
            Ok(())
        }
        Commands::ConfigPath => {
            let path = TripConfig::config_path()?;
            if !path.exists() {
                TripConfig::default().save()?;
                println!("Created default config");
            }
            println!("{}", path.display());
            Ok(())
        }
    }
}

async fn run_tui(cfg: &TripConfig, api: SharedApi, trip_id: String) -> Result<()> {
    let log_path = cfg.log_path()?;
    logging::init_tracing(&log_path)?;
    tracing::info!(api_url = %cfg.api_url, %trip_id, "starting trip-tui");

    let offset = time_utils::local_offset();
    let mut app = App::new(&trip_id, cfg, offset);
    bootstrap::initialize_app_state(&mut app, &api).await?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = runtime::run_app(&mut terminal, &mut app, api).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = ?err, "trip-tui exited with an error");
        eprintln!("Error: {:?}", err);
    }

    println!("Logs written to {}", log_path.display());
    Ok(())
}
