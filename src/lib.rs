//! rSleepTracker library root.
//! Exposes the CLI parser, the high-level run() function, the record store
//! and the session tracker.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod logging;
pub mod models;
pub mod store;
pub mod tracker;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub async fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Start => cli::commands::start::handle(cfg).await,
        Commands::Stop => cli::commands::stop::handle(cfg).await,
        Commands::Rate { .. } => cli::commands::rate::handle(&cli.command, cfg).await,
        Commands::Status => cli::commands::status::handle(cfg).await,
        Commands::List { .. } => cli::commands::list::handle(&cli.command, cfg).await,
        Commands::Clear { .. } => cli::commands::clear::handle(&cli.command, cfg).await,
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Db { .. } => cli::commands::db::handle(&cli.command, cfg),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, cfg),
        Commands::Backup { .. } => cli::commands::backup::handle(&cli.command, cfg),
    }
}

/// Entry point used by main.rs
pub async fn run() -> AppResult<()> {
    // 1️⃣ parse CLI
    let cli = Cli::parse();

    // 2️⃣ load config once
    let mut cfg = Config::load()?;

    // 3️⃣ diagnostics: RUST_LOG > --verbose > config
    logging::init(if cli.verbose {
        "debug"
    } else {
        cfg.log_level.as_str()
    });

    // 4️⃣ command-line DB override
    if let Some(custom_db) = &cli.db {
        cfg.database = utils::path::expand_tilde(custom_db)
            .to_string_lossy()
            .to_string();
    }

    tracing::debug!(database = %cfg.database, "configuration loaded");

    // 5️⃣ hand everything to the dispatcher
    dispatch(&cli, &cfg).await
}
