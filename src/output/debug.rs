//! Lines of the `kea_dhcp_debug` section.

use crate::models::SeenNames;

/// Distinct metric names, first seen first, capped at `limit` plus a remainder line.
pub fn debug_section(seen: &SeenNames, limit: usize) -> Vec<String> {
    let (shown, rest) = seen.truncated(limit);
    let mut lines: Vec<String> = shown.into_iter().map(str::to_string).collect();
    if rest > 0 {
        lines.push(format!("... ({rest} more)"));
    }
    lines
}
