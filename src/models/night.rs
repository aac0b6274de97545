use super::quality::SleepQuality;
use serde::{Deserialize, Serialize};

/// Identifier value meaning "let the store assign one".
pub const UNASSIGNED_ID: i64 = 0;

/// Quality value of a night that has not been rated yet.
pub const UNRATED: i32 = -1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SleepNight {
    pub id: i64,         // ⇔ sleep_nights.id (INTEGER PRIMARY KEY AUTOINCREMENT)
    pub start_time: i64, // ⇔ sleep_nights.start_time (epoch millis)
    pub stop_time: i64,  // ⇔ sleep_nights.stop_time (== start_time while open)
    pub quality: i32,    // ⇔ sleep_nights.quality (-1 = unrated)
}

impl SleepNight {
    pub fn new(id: i64, start_time: i64, stop_time: i64, quality: i32) -> Self {
        Self {
            id,
            start_time,
            stop_time,
            quality,
        }
    }

    /// A freshly started, unrated night whose id is assigned on insert.
    pub fn begin(now_millis: i64) -> Self {
        Self::new(UNASSIGNED_ID, now_millis, now_millis, UNRATED)
    }

    /// Open = the stop time has not diverged from the start time yet.
    pub fn is_open(&self) -> bool {
        self.stop_time == self.start_time
    }

    pub fn is_rated(&self) -> bool {
        self.quality != UNRATED
    }

    pub fn rating(&self) -> Option<SleepQuality> {
        SleepQuality::from_value(self.quality)
    }

    /// Elapsed time in milliseconds, `None` while the night is still open.
    /// Saturates for timestamps too far apart to subtract.
    pub fn duration_millis(&self) -> Option<i64> {
        if self.is_open() {
            None
        } else {
            Some(self.stop_time.saturating_sub(self.start_time))
        }
    }
}
