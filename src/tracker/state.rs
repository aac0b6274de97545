use crate::models::night::SleepNight;

/// Observable controller state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackerState {
    /// The open session, if any.
    pub tonight: Option<SleepNight>,
    /// Id of a night that was just stopped and is waiting to be rated.
    pub pending_rating: Option<i64>,
    /// Set after the history has been cleared, until acknowledged.
    pub cleared_notice: bool,
}

/// Which user actions currently make sense.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlFlags {
    pub start_enabled: bool,
    pub stop_enabled: bool,
    pub clear_enabled: bool,
}

impl ControlFlags {
    pub fn derive(tonight: Option<&SleepNight>, history: &[SleepNight]) -> Self {
        Self {
            start_enabled: tonight.is_none(),
            stop_enabled: tonight.is_some(),
            clear_enabled: !history.is_empty(),
        }
    }
}
