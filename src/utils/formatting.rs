//! Formatting utilities used for CLI outputs.

use crate::models::night::SleepNight;
use crate::utils::time::format_millis;

pub fn pad_right(s: &str, width: usize) -> String {
    format!("{:<width$}", s, width = width)
}

/// Render a duration in milliseconds as "07h 32m" (or "07:32" when short).
/// Seconds are truncated; negative durations keep their sign.
pub fn millis2readable(millis: i64, short: bool) -> String {
    let sign = if millis < 0 { "-" } else { "" };
    let mins = millis.unsigned_abs() / 60_000;
    let hours = mins / 60;
    let minutes = mins % 60;

    if short {
        format!("{}{:02}:{:02}", sign, hours, minutes)
    } else {
        format!("{}{:02}h {:02}m", sign, hours, minutes)
    }
}

/// Multi-line description of a single night.
pub fn format_night(night: &SleepNight, time_format: &str) -> String {
    let end = if night.is_open() {
        "--".to_string()
    } else {
        format_millis(night.stop_time, time_format)
    };
    let hours = match night.duration_millis() {
        Some(ms) => millis2readable(ms, false),
        None => "in progress".to_string(),
    };
    // off-scale ratings are shown as the raw number
    let quality = match night.rating() {
        Some(q) => q.label().to_string(),
        None if night.is_rated() => night.quality.to_string(),
        None => "--".to_string(),
    };

    let mut out = String::new();
    out.push_str(&format!("Night #{}\n", night.id));
    out.push_str(&format!(
        "  {} {}\n",
        pad_right("Start:", 9),
        format_millis(night.start_time, time_format)
    ));
    out.push_str(&format!("  {} {}\n", pad_right("End:", 9), end));
    out.push_str(&format!(
        "  {} {}\n",
        pad_right("Quality:", 9),
        quality
    ));
    out.push_str(&format!("  {} {}\n", pad_right("Hours:", 9), hours));
    out
}

/// Render the whole history as display text, in the order given.
pub fn format_nights(nights: &[SleepNight], time_format: &str) -> String {
    if nights.is_empty() {
        return "No nights recorded yet.\n".to_string();
    }

    nights
        .iter()
        .map(|n| format_night(n, time_format))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn millis_are_rendered_as_hours_and_minutes() {
        assert_eq!(millis2readable(0, false), "00h 00m");
        assert_eq!(millis2readable(27_120_000, false), "07h 32m");
        assert_eq!(millis2readable(27_120_000, true), "07:32");
        assert_eq!(millis2readable(-3_600_000, true), "-01:00");
    }

    #[test]
    fn extreme_durations_do_not_overflow() {
        assert_eq!(millis2readable(i64::MIN, true), "-2562047788015:12");
        assert_eq!(millis2readable(i64::MAX, false), "2562047788015h 12m");

        let text = format_night(&SleepNight::new(9, i64::MIN, i64::MAX, -1), "%H:%M");
        assert!(text.starts_with("Night #9\n"));
    }

    #[test]
    fn open_night_is_shown_in_progress() {
        let text = format_night(&SleepNight::new(4, 1_000, 1_000, -1), "%H:%M");
        assert!(text.starts_with("Night #4\n"));
        assert!(text.contains("End:      --"));
        assert!(text.contains("Quality:  --"));
        assert!(text.contains("Hours:    in progress"));
    }

    #[test]
    fn history_keeps_given_order() {
        let nights = vec![
            SleepNight::new(2, 0, 3_600_000, 5),
            SleepNight::new(1, 0, 7_200_000, 1),
        ];
        let text = format_nights(&nights, "%H:%M");
        let first = text.find("Night #2").expect("night 2");
        let second = text.find("Night #1").expect("night 1");
        assert!(first < second);
        assert!(text.contains("Excellent"));
        assert!(text.contains("02h 00m"));
    }

    #[test]
    fn off_scale_rating_shows_raw_value() {
        let text = format_night(&SleepNight::new(7, 0, 3_600_000, 8), "%H:%M");
        assert!(text.contains("Quality:  8"));
    }

    #[test]
    fn empty_history_has_placeholder() {
        assert_eq!(format_nights(&[], "%H:%M"), "No nights recorded yet.\n");
    }
}
