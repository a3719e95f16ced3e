//! Data models for the EPG schedule extractor

use serde::{Deserialize, Serialize};

/// One displayed program row in a channel's daily schedule.
///
/// `start_time` and `end_time` are fixed-width local `HH:MM:SS` strings;
/// a carried-over program shows `00:00:00` as its start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayEntry {
    pub show_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_logo: Option<String>,
    pub start_time: String,
    pub end_time: String,
    pub episode_number: String,
}

/// A channel's schedule for one local calendar day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelSchedule {
    pub channel_name: String,
    /// ISO calendar date, `YYYY-MM-DD`
    pub date: String,
    pub programs: Vec<DisplayEntry>,
}

/// All non-empty channel schedules for one day window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaySchedule {
    /// Window key, `today` or `tomorrow`
    pub day: String,
    pub date: String,
    pub channels: Vec<ChannelSchedule>,
}

/// A channel the operator asked for, from the channel list file.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetChannel {
    pub id: String,
    pub name: String,
}

/// Per-run counters for the end-of-run summary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunReport {
    /// Programme records dropped because start or stop failed to parse
    pub malformed_timestamps: usize,
    /// Target channels with no catalog match in any source
    pub unresolved_channels: usize,
    /// Target channels resolved but with no overlapping programs in any window
    pub empty_channels: usize,
    /// Target channels that produced at least one schedule
    pub written_channels: usize,
}
