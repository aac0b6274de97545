//! Unified application error type.
//! All modules (db, store, tracker, cli, utils) return AppError to keep the
//! error handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    #[error("A night with id {0} already exists")]
    DuplicateNight(i64),

    // ---------------------------
    // Input errors
    // ---------------------------
    #[error("Invalid sleep quality: {0} (ratings start at 0)")]
    InvalidQuality(i32),

    #[error("No nights recorded yet")]
    NoNights,

    // ---------------------------
    // Background execution
    // ---------------------------
    #[error("Background task failed: {0}")]
    Background(String),

    #[error("Operation cancelled")]
    Cancelled,

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,

    // ---------------------------
    // Output
    // ---------------------------
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
