use crate::config::Config;
use crate::core::track::TrackSession;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};
use crate::utils::time::format_millis;

pub async fn handle(cfg: &Config) -> AppResult<()> {
    let session = TrackSession::open(&cfg.database).await?;
    let result = session.start().await;
    let tonight = session.tracker().tonight();
    session.close().await;

    match (result?, tonight) {
        (Some(night), _) => success(format!(
            "Night #{} started at {}",
            night.id,
            format_millis(night.start_time, &cfg.time_format)
        )),
        (None, Some(open)) => warning(format!(
            "Night #{} is already in progress since {}. Stop it first.",
            open.id,
            format_millis(open.start_time, &cfg.time_format)
        )),
        (None, None) => warning("No night was started."),
    }

    Ok(())
}
