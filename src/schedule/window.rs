//! Calendar day windows in the target timezone

use chrono::{DateTime, Days, Duration, FixedOffset, NaiveDate, NaiveTime, TimeZone};

/// Which calendar day a window covers, relative to the run's `now` snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayLabel {
    Today,
    Tomorrow,
}

impl DayLabel {
    /// Every window the extractor computes, in output order.
    pub const ALL: [DayLabel; 2] = [DayLabel::Today, DayLabel::Tomorrow];

    /// Stable lowercase key used in the emitted JSON.
    pub fn key(&self) -> &'static str {
        match self {
            DayLabel::Today => "today",
            DayLabel::Tomorrow => "tomorrow",
        }
    }

    /// Days past the reference date this label covers.
    pub fn day_offset(&self) -> u64 {
        match self {
            DayLabel::Today => 0,
            DayLabel::Tomorrow => 1,
        }
    }
}

/// One local calendar day as a half-open range of absolute instants.
///
/// `start` is local midnight of `local_date`; `end` is the next local
/// midnight, exclusive. Keeping the upper bound exclusive avoids the
/// 23:59:59 fencepost during overlap testing.
#[derive(Debug, Clone)]
pub struct DayWindow {
    pub label: DayLabel,
    pub local_date: NaiveDate,
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
}

/// Build one window per label from a single `now` snapshot. Every window of
/// a run must come from the same snapshot.
pub fn build_windows(now: DateTime<FixedOffset>, labels: &[DayLabel]) -> Vec<DayWindow> {
    let tz = *now.offset();
    labels
        .iter()
        .filter_map(|&label| {
            let date = now
                .date_naive()
                .checked_add_days(Days::new(label.day_offset()))?;
            let next = date.checked_add_days(Days::new(1))?;
            Some(DayWindow {
                label,
                local_date: date,
                start: local_midnight(date, tz),
                end: local_midnight(next, tz),
            })
        })
        .collect()
}

/// Midnight of `date` in a fixed-offset zone. Fixed offsets have no DST
/// transitions, so the local-to-absolute conversion is always unambiguous.
fn local_midnight(date: NaiveDate, tz: FixedOffset) -> DateTime<FixedOffset> {
    let utc = date.and_time(NaiveTime::MIN) - Duration::seconds(i64::from(tz.local_minus_utc()));
    tz.from_utc_datetime(&utc)
}
