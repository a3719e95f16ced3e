//! Trailing episode marker extraction from programme titles

use std::sync::LazyLock;

use regex::Regex;

// Matches `<name><sep>Eps[.][ ]<digits>` anchored at end-of-string.
// The lazy title capture plus greedy separator means the split happens at
// the last marker in the title.
static EPISODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(.+?)[\s-]+eps\.?\s?(\d+)$").unwrap());

/// Split a trailing episode marker out of a title.
///
/// `("Drama Seru - Eps.12", "")` becomes `("Drama Seru", "Eps -12")`.
/// A non-empty incoming episode label disables extraction, and a title
/// without a trailing marker passes through unchanged. Best effort only:
/// a marker buried mid-title is left alone.
pub fn split_episode(title: &str, episode: &str) -> (String, String) {
    if !episode.is_empty() {
        return (title.to_string(), episode.to_string());
    }
    match EPISODE_RE.captures(title) {
        Some(caps) => {
            let clean = caps[1].trim().to_string();
            let number = format!("Eps -{}", &caps[2]);
            (clean, number)
        }
        None => (title.to_string(), String::new()),
    }
}
