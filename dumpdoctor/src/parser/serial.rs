use regex::Regex;
use std::sync::LazyLock;

use crate::parser::schema::SerialPortConfig;
use crate::parser::section::{self, find_section};
use crate::tables::serial::{decode_functions, identifier_name};

static SERIAL_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^serial\s+(-?\w+)\s+(\d+)\s+(\d+)\s+(\d+)\s+(\d+)\s+(\d+)").unwrap()
});

pub fn extract_serial(text: &str) -> Option<Vec<SerialPortConfig>> {
    let body = find_section(text, section::SERIAL, None)?;
    Some(body.lines().filter_map(parse_serial_line).collect())
}

/// Decode one `serial <id> <functions> <msp> <gps> <telemetry> <blackbox>` line.
pub fn parse_serial_line(line: &str) -> Option<SerialPortConfig> {
    let caps = SERIAL_LINE.captures(line.trim())?;
    let number = |i: usize| caps[i].parse::<u32>().ok();

    Some(SerialPortConfig {
        identifier: identifier_name(&caps[1]),
        function: decode_functions(caps[2].parse::<u64>().ok()?),
        msp: number(3)?,
        gps: number(4)?,
        telemetry: number(5)?,
        blackbox: number(6)?,
    })
}
