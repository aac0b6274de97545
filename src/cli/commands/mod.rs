pub mod backup;
pub mod clear;
pub mod config;
pub mod db;
pub mod init;
pub mod list;
pub mod log;
pub mod rate;
pub mod start;
pub mod status;
pub mod stop;
