use clap::{Parser, Subcommand};

/// Command-line interface definition for rSleepTracker
/// CLI application to track nightly sleep with SQLite
#[derive(Parser)]
#[command(
    name = "rsleeptracker",
    version = env!("CARGO_PKG_VERSION"),
    about = "A simple sleep tracking CLI: record nights, rate their quality and browse the history using SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    /// Verbose diagnostics on stderr
    #[arg(global = true, short = 'v', long = "verbose")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Start tracking tonight's sleep
    Start,

    /// Stop tracking the open night
    Stop,

    /// Rate the quality of a night (0 = very bad … 5 = excellent)
    Rate {
        /// Quality from 0 to 5
        #[arg(value_parser = clap::value_parser!(i32).range(0..=5))]
        quality: i32,

        #[arg(long = "id", help = "Night id to rate (default: most recent night)")]
        id: Option<i64>,
    },

    /// Show tonight's session and the available actions
    Status,

    /// List recorded nights, newest first
    List {
        #[arg(long = "json", help = "Print the history as JSON")]
        json: bool,

        #[arg(long = "compact", help = "One row per night")]
        compact: bool,

        #[arg(long = "limit", short = 'n', help = "Show at most N nights")]
        limit: Option<usize>,
    },

    /// Delete the whole sleep history
    Clear {
        #[arg(long = "yes", short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Add missing fields with their defaults")]
        migrate: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, help = "Compress the backup into a .zip archive")]
        compress: bool,

        #[arg(long, short = 'f', help = "Overwrite FILE without asking")]
        force: bool,
    },
}
