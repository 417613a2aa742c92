//! Assembles every section parser into one [`DiagnosticRecord`].

use crate::parser::cli::{extract_cli_line, extract_non_set_cli_line, extract_problem};
use crate::parser::hardware::{extract_dma, extract_timers};
use crate::parser::modes::extract_modes;
use crate::parser::schema::{BuildMetadata, CommonSetting, CommonSettings, DiagnosticRecord};
use crate::parser::section::extract_memory_dump;
use crate::parser::serial::extract_serial;
use crate::parser::status::{arming_disable_flags, extract_status};

/// How a common setting is found in the CLI transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliLookup {
    /// `set <name> = <value>`
    Set(&'static str),
    /// `<prefix> <value>`
    Directive(&'static str),
}

#[derive(Debug, Clone, Copy)]
pub struct SettingSpec {
    pub category: &'static str,
    pub key: &'static str,
    pub display_name: &'static str,
    pub lookup: CliLookup,
}

pub const BOARD: &str = "Board";
pub const DENOMINATIONS: &str = "Denominations";
pub const DSHOT_CONFIG: &str = "DShot Config";
pub const RECEIVER_SETTINGS: &str = "Receiver Settings";
pub const FILTERS: &str = "Filters";
pub const BATTERY: &str = "Battery";

const fn setting(
    category: &'static str,
    key: &'static str,
    display_name: &'static str,
    lookup: CliLookup,
) -> SettingSpec {
    SettingSpec {
        category,
        key,
        display_name,
        lookup,
    }
}

/// Settings surfaced in `commonSettings`, grouped by display category.
pub const COMMON_SETTINGS: &[SettingSpec] = &[
    setting(BOARD, "boardName", "Board Name", CliLookup::Directive("board_name")),
    setting(BOARD, "manufacturerId", "Manufacturer ID", CliLookup::Directive("manufacturer_id")),
    setting(
        DENOMINATIONS,
        "pidDenom",
        "PID Process Denominator",
        CliLookup::Set("pid_process_denom"),
    ),
    setting(DSHOT_CONFIG, "escProtocol", "Motor Protocol", CliLookup::Set("motor_pwm_protocol")),
    setting(DSHOT_CONFIG, "dshotBidir", "Bidirectional DShot", CliLookup::Set("dshot_bidir")),
    setting(DSHOT_CONFIG, "motorPoles", "Motor Poles", CliLookup::Set("motor_poles")),
    setting(DSHOT_CONFIG, "dshotIdle", "DShot Idle Value", CliLookup::Set("dshot_idle_value")),
    setting(
        RECEIVER_SETTINGS,
        "rxProtocol",
        "Serial RX Provider",
        CliLookup::Set("serialrx_provider"),
    ),
    setting(
        RECEIVER_SETTINGS,
        "rxInverted",
        "Serial RX Inverted",
        CliLookup::Set("serialrx_inverted"),
    ),
    setting(RECEIVER_SETTINGS, "rcSmoothing", "RC Smoothing", CliLookup::Set("rc_smoothing")),
    setting(FILTERS, "gyroLpf1", "Gyro LPF1 Static Hz", CliLookup::Set("gyro_lpf1_static_hz")),
    setting(FILTERS, "dtermLpf1", "D-Term LPF1 Static Hz", CliLookup::Set("dterm_lpf1_static_hz")),
    setting(FILTERS, "dynNotchCount", "Dynamic Notch Count", CliLookup::Set("dyn_notch_count")),
    setting(BATTERY, "vbatMinCell", "Min Cell Voltage", CliLookup::Set("vbat_min_cell_voltage")),
    setting(BATTERY, "vbatMaxCell", "Max Cell Voltage", CliLookup::Set("vbat_max_cell_voltage")),
];

impl CliLookup {
    pub fn resolve(&self, text: &str) -> Option<String> {
        match self {
            CliLookup::Set(name) => extract_cli_line(text, name),
            CliLookup::Directive(prefix) => extract_non_set_cli_line(text, prefix),
        }
    }
}

/// Resolve every catalog entry; unresolved settings keep their key with a
/// `None` value.
pub fn extract_common_settings(text: &str) -> CommonSettings {
    let mut settings = CommonSettings::new();
    for spec in COMMON_SETTINGS {
        settings.entry(spec.category.to_string()).or_default().insert(
            spec.key.to_string(),
            CommonSetting {
                display_name: spec.display_name.to_string(),
                raw_value: spec.lookup.resolve(text),
            },
        );
    }
    settings
}

/// Builder that turns one support dump into a [`DiagnosticRecord`].
pub struct RecordBuilder<'a> {
    text: &'a str,
    build: BuildMetadata,
    full_dump: bool,
}

impl<'a> RecordBuilder<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            build: BuildMetadata::default(),
            full_dump: false,
        }
    }

    pub fn with_build(mut self, build: BuildMetadata) -> Self {
        self.build = build;
        self
    }

    /// Capture the memory dump including the version preamble.
    pub fn full_dump(mut self, full: bool) -> Self {
        self.full_dump = full;
        self
    }

    pub fn build(self) -> DiagnosticRecord {
        let text = self.text;
        let status = extract_status(text);
        let arming_disable_flags = arming_disable_flags(status.as_ref());

        let record = DiagnosticRecord {
            status,
            problem_description: extract_problem(text),
            memory_dump: extract_memory_dump(text, self.full_dump),
            dma_assignments: extract_dma(text),
            timer_assignments: extract_timers(text),
            serial_ports: extract_serial(text),
            aux_modes: extract_modes(text),
            common_settings: extract_common_settings(text),
            arming_disable_flags,
            build_metadata: self.build,
        };

        tracing::debug!(
            status = record.status.is_some(),
            dma = record.dma_assignments.is_some(),
            timers = record.timer_assignments.is_some(),
            serial = record.serial_ports.is_some(),
            aux = record.aux_modes.is_some(),
            "Assembled diagnostic record"
        );

        record
    }
}
