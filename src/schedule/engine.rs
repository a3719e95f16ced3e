//! Overlap testing and boundary clamping for day windows

use chrono::{DateTime, FixedOffset};

use crate::models::DisplayEntry;
use crate::schedule::episode::split_episode;
use crate::schedule::timestamp::format_time;
use crate::schedule::window::DayWindow;

/// A programme with normalized instants, ready for window testing.
#[derive(Debug, Clone)]
pub struct ProgramInterval {
    pub title: String,
    pub episode: String,
    pub icon: Option<String>,
    pub start: DateTime<FixedOffset>,
    pub stop: DateTime<FixedOffset>,
}

/// Half-open overlap of `[start, stop)` against `[window.start, window.end)`.
///
/// Inverted and zero-duration intervals never overlap anything; upstream
/// guides do produce them and they are skipped, not errors.
pub fn overlaps(interval: &ProgramInterval, window: &DayWindow) -> bool {
    interval.start < interval.stop
        && interval.start < window.end
        && interval.stop > window.start
}

/// Produce the window-local display entry for a programme, or `None` when it
/// does not overlap the window.
///
/// Only the start is clamped: a programme carried over from a previous day
/// shows `00:00:00`. The end is always the true stop time, even past the
/// window bound, so a spillover row reads `23:00:00`–`01:00:00`. That
/// asymmetry is the established guide-display convention.
pub fn entry_for_window(interval: &ProgramInterval, window: &DayWindow) -> Option<DisplayEntry> {
    if !overlaps(interval, window) {
        return None;
    }

    let tz = *window.start.offset();
    let start_time = if interval.start < window.start {
        "00:00:00".to_string()
    } else {
        format_time(&interval.start.with_timezone(&tz))
    };
    let end_time = format_time(&interval.stop.with_timezone(&tz));
    let (show_name, episode_number) = split_episode(&interval.title, &interval.episode);

    Some(DisplayEntry {
        show_name,
        show_logo: interval.icon.clone(),
        start_time,
        end_time,
        episode_number,
    })
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
