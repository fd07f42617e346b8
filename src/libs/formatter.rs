//! Time duration formatting utilities for user-friendly display.
//!
//! All durations shown on the terminal use the same "HH:MM" format; events
//! are pre-formatted into plain strings so the table renderer and the CSV
//! export never deal with raw time types.

use chrono::Duration;
use serde::{Deserialize, Serialize};

/// A time-based event pre-formatted for display.
///
/// Holds string representations only, making it directly usable with the
/// table renderer and data export without repeated formatting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormattedEvent {
    /// Sequential number for ordering and reference.
    pub id: i32,
    /// Formatted start time (e.g. "09:00").
    pub start: String,
    /// Formatted end time, or "-" while the event is still open.
    pub end: String,
    /// Formatted duration, or "--:--" when it cannot be determined.
    pub duration: String,
}

/// Formats a `chrono::Duration` into a standardized "HH:MM" string.
///
/// Negative durations are clamped to "00:00"; seconds are not displayed.
///
/// # Examples
///
/// ```rust
/// use vigil::libs::formatter::format_duration;
/// use chrono::Duration;
///
/// assert_eq!(format_duration(&Duration::hours(8)), "08:00");
/// assert_eq!(format_duration(&Duration::minutes(90)), "01:30");
/// assert_eq!(format_duration(&Duration::hours(-1)), "00:00");
/// ```
pub fn format_duration(duration: &Duration) -> String {
    let hours = duration.num_hours();
    let mins = duration.num_minutes() % 60;

    // Clamp to zero so calculation edge cases never show negative time
    format!("{:02}:{:02}", hours.max(0), mins.max(0))
}
