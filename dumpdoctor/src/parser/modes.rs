//! Parser for the `# aux` mode activation ranges.
//!
//! Empty slots (`low == high`) are dropped, then the first range seen for a
//! mode wins and later ranges for the same mode are discarded.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

use crate::parser::schema::AuxRange;
use crate::parser::section::{self, find_section};
use crate::tables::boxes::{box_name, UNKNOWN_MODE};

static AUX_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^aux (\d+) (\d+) (\d+) (\d+) (\d+)").unwrap());

pub fn extract_modes(text: &str) -> Option<Vec<AuxRange>> {
    let body = find_section(text, section::AUX, None)?;
    Some(dedup_modes(body.lines().filter_map(parse_aux_line)))
}

/// Decode `aux <index> <boxId> <channel> <low> <high>`; trailing logic and
/// linked-mode fields are ignored. Box ids outside the table, however large,
/// decode to `"Unknown"`.
pub fn parse_aux_line(line: &str) -> Option<AuxRange> {
    let caps = AUX_LINE.captures(line.trim())?;
    let number = |i: usize| caps[i].parse::<u32>().ok();
    let mode = caps[2].parse::<u32>().map_or(UNKNOWN_MODE, box_name);

    Some(AuxRange {
        mode: mode.to_string(),
        channel: number(3)?,
        low: number(4)?,
        high: number(5)?,
    })
}

pub fn dedup_modes(ranges: impl IntoIterator<Item = AuxRange>) -> Vec<AuxRange> {
    let mut seen = HashSet::new();
    let mut modes = Vec::new();
    for range in ranges {
        if range.is_empty() {
            continue;
        }
        if !seen.insert(range.mode.clone()) {
            tracing::debug!(
                "Dropping duplicate aux range for {} ({}..{})",
                range.mode,
                range.low,
                range.high
            );
            continue;
        }
        modes.push(range);
    }
    modes
}
