//! Target channel list loading
//!
//! One channel per line: `id, display name` or a bare `id` (which doubles
//! as the name). Blank lines and `#` comments are skipped.

use std::fs;
use std::io;
use std::path::Path;

use tracing::info;

use crate::models::TargetChannel;

pub fn load_channel_list(path: &Path) -> io::Result<Vec<TargetChannel>> {
    let content = fs::read_to_string(path)?;
    let channels = parse_channel_list(&content);
    info!("loaded {} target channels from {}", channels.len(), path.display());
    Ok(channels)
}

pub fn parse_channel_list(content: &str) -> Vec<TargetChannel> {
    content
        .lines()
        .filter_map(|line| {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                return None;
            }
            let (id, name) = match line.split_once(',') {
                Some((id, name)) => (id.trim(), name.trim()),
                None => (line, line),
            };
            Some(TargetChannel {
                id: id.to_string(),
                name: name.to_string(),
            })
        })
        .collect()
}
