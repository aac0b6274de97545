/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Quality color:
/// 0..=1 → red
/// 2..=3 → yellow
/// 4..=5 → green
/// anything else (unrated) → grey
pub fn color_for_quality(value: i32) -> &'static str {
    match value {
        0 | 1 => RED,
        2 | 3 => YELLOW,
        4 | 5 => GREEN,
        _ => GREY,
    }
}

/// Grey out placeholder values ("--", empty), leave the rest untouched.
pub fn colorize_optional(value: &str) -> String {
    if value.trim().is_empty() || value.trim() == "--" {
        format!("{GREY}{value}{RESET}")
    } else {
        value.to_string()
    }
}
