use serde::Serialize;

/// Self-rated sleep quality, from worst (0) to best (5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SleepQuality {
    VeryBad,    // 0
    Poor,       // 1
    SoSo,       // 2
    Ok,         // 3
    PrettyGood, // 4
    Excellent,  // 5
}

impl SleepQuality {
    pub const MIN: i32 = 0;
    pub const MAX: i32 = 5;

    /// Convert DB value → enum
    pub fn from_value(v: i32) -> Option<Self> {
        match v {
            0 => Some(SleepQuality::VeryBad),
            1 => Some(SleepQuality::Poor),
            2 => Some(SleepQuality::SoSo),
            3 => Some(SleepQuality::Ok),
            4 => Some(SleepQuality::PrettyGood),
            5 => Some(SleepQuality::Excellent),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SleepQuality::VeryBad => "Very bad",
            SleepQuality::Poor => "Poor",
            SleepQuality::SoSo => "So-so",
            SleepQuality::Ok => "OK",
            SleepQuality::PrettyGood => "Pretty good",
            SleepQuality::Excellent => "Excellent",
        }
    }

    /// Label for any stored value; unrated or out-of-range values render as "--".
    pub fn label_for(v: i32) -> &'static str {
        Self::from_value(v).map(|q| q.label()).unwrap_or("--")
    }
}
