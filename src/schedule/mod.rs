//! Schedule extraction core
//!
//! Day-window construction, overlap/clamp testing, channel resolution and
//! the merge pass that turns raw guide data into per-day channel schedules.

mod engine;
mod episode;
mod resolver;
mod timestamp;
mod window;

pub use engine::{entry_for_window, overlaps, ProgramInterval};
pub use episode::split_episode;
pub use resolver::resolve_channel;
pub use timestamp::{format_date, format_time, parse_guide_timestamp, parse_zone_offset};
pub use window::{build_windows, DayLabel, DayWindow};

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::guide::{GuideData, GuideProgram};
use crate::models::{ChannelSchedule, DaySchedule, DisplayEntry, RunReport, TargetChannel};

/// Merge guide sources and produce the per-day channel schedules.
///
/// Sources are applied in the given order and the first source that supplies
/// a guide channel id wins, for the catalog entry and the programme list
/// alike. Within each (window, channel) bucket entries are sorted by start
/// time; `00:00:00` rows (carried-over programmes) sort first. Buckets with
/// no entries are dropped, not emitted empty.
pub fn assemble(
    sources: &[GuideData],
    targets: &[TargetChannel],
    windows: &[DayWindow],
) -> (Vec<DaySchedule>, RunReport) {
    let mut report = RunReport::default();

    // First-wins merge across sources.
    let mut catalog: HashMap<String, String> = HashMap::new();
    let mut programs: HashMap<&str, &[GuideProgram]> = HashMap::new();
    for source in sources {
        for (id, name) in &source.channels {
            catalog
                .entry(id.clone())
                .or_insert_with(|| name.clone());
        }
        for (id, list) in &source.programs {
            programs.entry(id.as_str()).or_insert(list.as_slice());
        }
    }

    let mut days: Vec<DaySchedule> = windows
        .iter()
        .map(|w| DaySchedule {
            day: w.label.key().to_string(),
            date: format_date(w.local_date),
            channels: Vec::new(),
        })
        .collect();

    for target in targets {
        let resolved = match resolve_channel(&catalog, &target.id, &target.name) {
            Ok(id) => id,
            Err(err) => {
                warn!("{err}");
                report.unresolved_channels += 1;
                continue;
            }
        };
        let channel_name = catalog[resolved].clone();

        let Some(channel_programs) = programs.get(resolved).copied() else {
            debug!(channel = %channel_name, "no programmes in any source");
            report.empty_channels += 1;
            continue;
        };

        // Normalize every record once, then test it against each window.
        let mut intervals = Vec::with_capacity(channel_programs.len());
        for prog in channel_programs {
            match (
                parse_guide_timestamp(&prog.start),
                parse_guide_timestamp(&prog.stop),
            ) {
                (Ok(start), Ok(stop)) => intervals.push(ProgramInterval {
                    title: prog.title.clone(),
                    episode: prog.episode.clone(),
                    icon: prog.icon.clone(),
                    start,
                    stop,
                }),
                _ => {
                    warn!(
                        channel = %channel_name,
                        title = %prog.title,
                        start = %prog.start,
                        stop = %prog.stop,
                        "dropping programme with malformed timestamp"
                    );
                    report.malformed_timestamps += 1;
                }
            }
        }

        let mut wrote_any = false;
        for (window, day) in windows.iter().zip(days.iter_mut()) {
            let mut entries: Vec<DisplayEntry> = intervals
                .iter()
                .filter_map(|iv| entry_for_window(iv, window))
                .collect();
            if entries.is_empty() {
                continue;
            }
            entries.sort_by(|a, b| a.start_time.cmp(&b.start_time));
            day.channels.push(ChannelSchedule {
                channel_name: channel_name.clone(),
                date: day.date.clone(),
                programs: entries,
            });
            wrote_any = true;
        }

        if wrote_any {
            report.written_channels += 1;
        } else {
            debug!(channel = %channel_name, "no overlapping programmes in any window");
            report.empty_channels += 1;
        }
    }

    (days, report)
}
