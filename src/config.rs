//! Run configuration

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Scrape run settings, optionally loaded from a JSON file.
///
/// Every field has a default so a partial file works; command-line flags
/// override whatever the file says.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeConfig {
    /// Guide documents to scan, highest priority first
    #[serde(default)]
    pub sources: Vec<PathBuf>,
    #[serde(default = "default_channel_list")]
    pub channel_list: PathBuf,
    /// Fixed UTC offset of the schedule's local timezone, e.g. "+0700"
    #[serde(default = "default_timezone")]
    pub timezone: String,
    /// Output path for the assembled schedule JSON; stdout when absent
    #[serde(default)]
    pub output: Option<PathBuf>,
}

fn default_channel_list() -> PathBuf {
    PathBuf::from("channel.txt")
}
fn default_timezone() -> String {
    "+0700".to_string()
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            sources: Vec::new(),
            channel_list: default_channel_list(),
            timezone: default_timezone(),
            output: None,
        }
    }
}

impl ScrapeConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_the_usual_run() {
        let config = ScrapeConfig::default();
        assert_eq!(config.channel_list, PathBuf::from("channel.txt"));
        assert_eq!(config.timezone, "+0700");
        assert!(config.sources.is_empty());
        assert!(config.output.is_none());
    }

    #[test]
    fn test_partial_file_fills_in_defaults() {
        let config: ScrapeConfig =
            serde_json::from_str(r#"{"sources": ["guide.xml.gz"]}"#).unwrap();
        assert_eq!(config.sources, vec![PathBuf::from("guide.xml.gz")]);
        assert_eq!(config.timezone, "+0700");
    }

    #[test]
    fn test_full_file_overrides_everything() {
        let config: ScrapeConfig = serde_json::from_str(
            r#"{
                "sources": ["a.xml", "b.xml"],
                "channel_list": "targets.txt",
                "timezone": "-0500",
                "output": "schedule.json"
            }"#,
        )
        .unwrap();
        assert_eq!(config.sources.len(), 2);
        assert_eq!(config.channel_list, PathBuf::from("targets.txt"));
        assert_eq!(config.timezone, "-0500");
        assert_eq!(config.output, Some(PathBuf::from("schedule.json")));
    }
}
