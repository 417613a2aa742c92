//! Parsers for the `# dma show` and `# timer show` resource listings.

use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

use crate::parser::schema::{DmaAssignments, TimerAssignment, TimerAssignments, TIMER_FREE};
use crate::parser::section::{self, find_section};

static DMA_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(DMA\d+) (Channel|Stream) (\d+)\s*:\s*(.*)").unwrap()
});
static TIMER_LINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(TIM\d+):(.*)").unwrap());
static CHANNEL_LINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(CH\d+) : (.*)").unwrap());

/// DMA channel map. The listing is only recognised when it is followed by
/// `# timer show`, which is how the firmware prints the two together.
pub fn extract_dma(text: &str) -> Option<DmaAssignments> {
    let body = find_section(text, section::DMA_SHOW, Some(section::TIMER_SHOW))?;
    Some(parse_dma_lines(body))
}

pub fn parse_dma_lines(body: &str) -> DmaAssignments {
    let mut dma = DmaAssignments::new();
    for line in body.lines() {
        let Some(caps) = DMA_LINE.captures(line) else {
            continue;
        };
        let unit = caps[1].to_string();
        let channel = format!("{} {}", &caps[2], &caps[3]);
        dma.entry(unit)
            .or_default()
            .insert(channel, caps[4].trim().to_string());
    }
    dma
}

pub fn extract_timers(text: &str) -> Option<TimerAssignments> {
    let body = find_section(text, section::TIMER_SHOW, None)?;
    Some(parse_timer_lines(body))
}

pub fn parse_timer_lines(body: &str) -> TimerAssignments {
    let mut timers = TimerAssignments::new();
    let mut current: Option<String> = None;

    for line in body.lines() {
        if let Some(caps) = TIMER_LINE.captures(line) {
            let name = caps[1].to_string();
            let assignment = if caps[2].trim() == TIMER_FREE {
                TimerAssignment::Free
            } else {
                TimerAssignment::Channels(BTreeMap::new())
            };
            timers.insert(name.clone(), assignment);
            current = Some(name);
        } else if let Some(caps) = CHANNEL_LINE.captures(line) {
            // Channels before the first timer line or under a FREE timer are dropped.
            let Some(TimerAssignment::Channels(channels)) =
                current.as_ref().and_then(|name| timers.get_mut(name))
            else {
                continue;
            };
            channels.insert(caps[1].to_string(), caps[2].trim().to_string());
        }
    }

    timers
}
