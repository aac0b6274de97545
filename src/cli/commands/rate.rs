use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::track::TrackSession;
use crate::errors::AppResult;
use crate::models::quality::SleepQuality;
use crate::ui::messages::{success, warning};

pub async fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Rate { quality, id } = cmd {
        let session = TrackSession::open(&cfg.database).await?;
        let result = session.rate(*id, *quality).await;
        session.close().await;

        let (id, found) = result?;
        if found {
            success(format!(
                "Night #{} rated: {}",
                id,
                SleepQuality::label_for(*quality)
            ));
        } else {
            warning(format!("No night with id {}.", id));
        }
    }

    Ok(())
}
