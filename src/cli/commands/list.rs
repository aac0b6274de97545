use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::models::night::SleepNight;
use crate::models::quality::SleepQuality;
use crate::store::SleepStore;
use crate::ui::messages::header;
use crate::utils::colors::{RESET, color_for_quality};
use crate::utils::formatting::{format_nights, millis2readable};
use crate::utils::table::{Column, Table};
use crate::utils::time::format_millis;

pub async fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List {
        json,
        compact,
        limit,
    } = cmd
    {
        let store = SleepStore::open(&cfg.database).await?;
        let mut nights = store.get_all_nights().await?;
        if let Some(n) = limit {
            nights.truncate(*n);
        }

        if *json {
            println!("{}", serde_json::to_string_pretty(&nights)?);
        } else if *compact {
            print!("{}", render_table(&nights, cfg));
        } else {
            header("Sleep history");
            print!("{}", format_nights(&nights, &cfg.time_format));
        }
    }
    Ok(())
}

fn render_table(nights: &[SleepNight], cfg: &Config) -> String {
    let mut table = Table::new(
        vec![
            Column::new("ID", 5),
            Column::new("Start", 22),
            Column::new("End", 22),
            Column::new("Hours", 8),
            Column::new("Quality", 12),
        ],
        cfg.separator(),
    );

    for n in nights {
        let end = if n.is_open() {
            "--".to_string()
        } else {
            format_millis(n.stop_time, &cfg.time_format)
        };
        let hours = n
            .duration_millis()
            .map(|ms| millis2readable(ms, true))
            .unwrap_or_else(|| "--:--".to_string());
        // last column, so the color codes do not shift alignment
        let quality = format!(
            "{}{}{}",
            color_for_quality(n.quality),
            SleepQuality::label_for(n.quality),
            RESET
        );

        table.add_row(vec![
            n.id.to_string(),
            format_millis(n.start_time, &cfg.time_format),
            end,
            hours,
            quality,
        ]);
    }

    table.render()
}
