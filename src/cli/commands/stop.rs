use crate::config::Config;
use crate::core::track::TrackSession;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};
use crate::utils::formatting::millis2readable;

pub async fn handle(cfg: &Config) -> AppResult<()> {
    let session = TrackSession::open(&cfg.database).await?;

    let stopped = match session.stop().await {
        Ok(Some(id)) => session.store().get(id).await,
        Ok(None) => Ok(None),
        Err(e) => Err(e),
    };
    let pending = session.tracker().take_pending_rating();
    session.close().await;

    let Some(night) = stopped? else {
        warning("No night in progress. Use `rsleeptracker start` first.");
        return Ok(());
    };

    let slept = night
        .duration_millis()
        .map(|ms| millis2readable(ms, false))
        .unwrap_or_else(|| "00h 00m".to_string());
    success(format!("Night #{} stopped after {}", night.id, slept));

    if let Some(id) = pending {
        info(format!(
            "How did you sleep? Rate it with: rsleeptracker rate <0-5> --id {}",
            id
        ));
    }

    Ok(())
}
