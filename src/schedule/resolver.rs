//! Target channel resolution against the guide catalog

use std::collections::HashMap;

use crate::error::{Result, ScheduleError};

/// Find the guide channel id for a target channel.
///
/// Resolution order: exact id match against catalog keys, then
/// case-insensitive exact match of the display name against catalog values.
/// Returns the catalog's own key so callers can index the catalog and the
/// programme map with it.
pub fn resolve_channel<'a>(
    catalog: &'a HashMap<String, String>,
    target_id: &str,
    target_name: &str,
) -> Result<&'a str> {
    if let Some((id, _)) = catalog.get_key_value(target_id) {
        return Ok(id.as_str());
    }

    let wanted = target_name.to_lowercase();
    catalog
        .iter()
        .find(|(_, name)| name.to_lowercase() == wanted)
        .map(|(id, _)| id.as_str())
        .ok_or_else(|| ScheduleError::ChannelNotFound {
            id: target_id.to_string(),
            name: target_name.to_string(),
        })
}
