use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::track::TrackSession;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};

use std::io::{self, Write};

/// Ask a yes/no confirmation from the user
fn ask_confirmation(prompt: &str) -> bool {
    warning(prompt);
    print!("Confirm [y/N]: ");
    let _ = io::stdout().flush();

    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        matches!(s.trim().to_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}

pub async fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Clear { yes } = cmd {
        if !*yes && !ask_confirmation("Delete the WHOLE sleep history? This action is irreversible.")
        {
            info("Operation cancelled.");
            return Ok(());
        }

        let session = TrackSession::open(&cfg.database).await?;
        let result = session.clear().await;
        let notice = session.tracker().state().cleared_notice;
        session.tracker().done_showing_cleared();
        session.close().await;

        let deleted = result?;
        if notice {
            success(format!("Sleep history cleared ({} nights deleted).", deleted));
        }
    }

    Ok(())
}
