pub mod backup;
pub mod log;
pub mod track;
