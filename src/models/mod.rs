pub mod night;
pub mod quality;

pub use night::{SleepNight, UNASSIGNED_ID, UNRATED};
pub use quality::SleepQuality;
