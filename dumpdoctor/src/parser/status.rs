use regex::Regex;
use std::sync::LazyLock;

use crate::parser::schema::{StatusMap, StatusValue};
use crate::parser::section::{self, find_section};

static PROPERTY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([^:=]+?)\s*[:=]\s*(.+?)\s*$").unwrap());

/// Status key holding the space-separated arming prevention flags.
pub const ARMING_DISABLE_FLAGS: &str = "Arming disable flags";

/// Parse the `# status` section into a key/value map.
pub fn extract_status(text: &str) -> Option<StatusMap> {
    let body = find_section(text, section::STATUS, None)?;
    Some(parse_status_lines(body))
}

/// Parse comma-separated `key: value` / `key=value` properties, one or more
/// per line. Properties that do not match are skipped.
pub fn parse_status_lines(body: &str) -> StatusMap {
    let mut status = StatusMap::new();
    for line in body.lines() {
        for property in line.split(',') {
            if let Some(caps) = PROPERTY.captures(property) {
                let key = caps[1].trim().to_string();
                status.insert(key, StatusValue::coerce(&caps[2]));
            }
        }
    }
    status
}

/// Split the arming-disable status entry into its flags.
pub fn arming_disable_flags(status: Option<&StatusMap>) -> Vec<String> {
    status
        .and_then(|s| s.get(ARMING_DISABLE_FLAGS))
        .map(|v| {
            v.to_string()
                .split_whitespace()
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
