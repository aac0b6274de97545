use crate::config::Config;
use crate::core::track::TrackSession;
use crate::errors::AppResult;
use crate::models::quality::SleepQuality;
use crate::ui::messages::info;
use crate::utils::colors::colorize_optional;
use crate::utils::formatting::millis2readable;
use crate::utils::time::{format_millis, now_millis};

pub async fn handle(cfg: &Config) -> AppResult<()> {
    let session = TrackSession::open(&cfg.database).await?;
    let tracker = session.tracker();
    let tonight = tracker.tonight();
    let flags = tracker.flags();
    let last = tracker.history().into_iter().find(|n| !n.is_open());
    session.close().await;

    match tonight {
        Some(night) => info(format!(
            "Night #{} in progress since {} ({})",
            night.id,
            format_millis(night.start_time, &cfg.time_format),
            millis2readable(now_millis() - night.start_time, false)
        )),
        None => info("No night in progress."),
    }

    if let Some(night) = last {
        let quality = SleepQuality::label_for(night.quality);
        println!(
            "Last night: #{} | {} | quality {}",
            night.id,
            night
                .duration_millis()
                .map(|ms| millis2readable(ms, false))
                .unwrap_or_default(),
            colorize_optional(quality)
        );
    }

    let mut actions = Vec::new();
    if flags.start_enabled {
        actions.push("start");
    }
    if flags.stop_enabled {
        actions.push("stop");
    }
    if flags.clear_enabled {
        actions.push("clear");
    }
    println!("Available actions: {}", actions.join(", "));

    Ok(())
}
