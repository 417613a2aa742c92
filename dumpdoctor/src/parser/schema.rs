use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// A single value from the `# status` section after coercion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatusValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl StatusValue {
    /// Coerce a raw status value: finite number first, then `true`/`false`,
    /// otherwise the trimmed text.
    pub fn coerce(raw: &str) -> Self {
        let raw = raw.trim();
        if let Ok(n) = raw.parse::<f64>() {
            if n.is_finite() {
                return StatusValue::Number(n);
            }
        }
        match raw {
            "true" => StatusValue::Bool(true),
            "false" => StatusValue::Bool(false),
            _ => StatusValue::Text(raw.to_string()),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            StatusValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric reading of the value. Text values yield their leading number,
    /// so `"51%"` reads as `51.0`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            StatusValue::Number(n) => Some(*n),
            StatusValue::Text(s) => leading_number(s),
            StatusValue::Bool(_) => None,
        }
    }
}

impl fmt::Display for StatusValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusValue::Bool(b) => write!(f, "{}", b),
            StatusValue::Number(n) => write!(f, "{}", n),
            StatusValue::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Parse the longest numeric prefix of `s`, ignoring leading whitespace.
pub(crate) fn leading_number(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;
    for (i, ch) in s.char_indices() {
        match ch {
            '0'..='9' => {
                seen_digit = true;
                end = i + 1;
            }
            '.' if !seen_dot => {
                seen_dot = true;
            }
            '-' | '+' if i == 0 => {}
            _ => break,
        }
    }
    if !seen_digit {
        return None;
    }
    s[..end].parse::<f64>().ok()
}

pub type StatusMap = BTreeMap<String, StatusValue>;

/// DMA unit (`DMA1`) to channel label (`Channel 1`) to peripheral.
pub type DmaAssignments = BTreeMap<String, BTreeMap<String, String>>;

pub type TimerAssignments = BTreeMap<String, TimerAssignment>;

/// State of one hardware timer from `# timer show`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TimerRepr", into = "TimerRepr")]
pub enum TimerAssignment {
    Free,
    Channels(BTreeMap<String, String>),
}

impl TimerAssignment {
    pub fn is_free(&self) -> bool {
        matches!(self, TimerAssignment::Free)
    }

    pub fn channels(&self) -> Option<&BTreeMap<String, String>> {
        match self {
            TimerAssignment::Channels(c) => Some(c),
            TimerAssignment::Free => None,
        }
    }
}

pub const TIMER_FREE: &str = "FREE";

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum TimerRepr {
    Marker(String),
    Channels(BTreeMap<String, String>),
}

impl TryFrom<TimerRepr> for TimerAssignment {
    type Error = String;

    fn try_from(repr: TimerRepr) -> Result<Self, Self::Error> {
        match repr {
            TimerRepr::Marker(m) if m == TIMER_FREE => Ok(TimerAssignment::Free),
            TimerRepr::Marker(m) => Err(format!("unexpected timer marker: {}", m)),
            TimerRepr::Channels(c) => Ok(TimerAssignment::Channels(c)),
        }
    }
}

impl From<TimerAssignment> for TimerRepr {
    fn from(t: TimerAssignment) -> Self {
        match t {
            TimerAssignment::Free => TimerRepr::Marker(TIMER_FREE.to_string()),
            TimerAssignment::Channels(c) => TimerRepr::Channels(c),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerialPortConfig {
    pub identifier: String,
    pub function: Vec<String>,
    pub msp: u32,
    pub gps: u32,
    pub telemetry: u32,
    pub blackbox: u32,
}

impl SerialPortConfig {
    pub fn has_function(&self, name: &str) -> bool {
        self.function.iter().any(|f| f == name)
    }
}

/// Activation window of a flight mode on an aux channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuxRange {
    pub mode: String,
    pub channel: u32,
    pub low: u32,
    pub high: u32,
}

impl AuxRange {
    pub fn width(&self) -> u32 {
        self.high.saturating_sub(self.low)
    }

    pub fn is_empty(&self) -> bool {
        self.low == self.high
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommonSetting {
    pub display_name: String,
    pub raw_value: Option<String>,
}

pub type CommonSettings = BTreeMap<String, BTreeMap<String, CommonSetting>>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildMetadata {
    pub manufacturer: Option<String>,
    pub target: Option<String>,
    pub mcu: Option<String>,
    pub release: Option<String>,
    pub options: BTreeSet<String>,
}

impl BuildMetadata {
    pub fn has_option(&self, option: &str) -> bool {
        self.options.contains(option)
    }
}

/// Everything extracted from one support dump.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticRecord {
    pub status: Option<StatusMap>,
    pub problem_description: Option<String>,
    pub memory_dump: Option<String>,
    pub dma_assignments: Option<DmaAssignments>,
    pub timer_assignments: Option<TimerAssignments>,
    pub serial_ports: Option<Vec<SerialPortConfig>>,
    pub aux_modes: Option<Vec<AuxRange>>,
    pub common_settings: CommonSettings,
    pub arming_disable_flags: Vec<String>,
    pub build_metadata: BuildMetadata,
}

impl DiagnosticRecord {
    pub fn status_value(&self, key: &str) -> Option<&StatusValue> {
        self.status.as_ref()?.get(key)
    }

    /// Resolved raw value of a common setting, `None` if missing or unresolved.
    pub fn setting(&self, category: &str, key: &str) -> Option<&str> {
        self.common_settings
            .get(category)?
            .get(key)?
            .raw_value
            .as_deref()
    }

    pub fn aux_mode(&self, mode: &str) -> Option<&AuxRange> {
        self.aux_modes.as_ref()?.iter().find(|a| a.mode == mode)
    }
}
