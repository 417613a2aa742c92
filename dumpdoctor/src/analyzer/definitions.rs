//! Built-in problem definitions, evaluated in the order listed here.

use serde_json::json;

use crate::analyzer::rules::{
    Description, RuleDefinition, RuleError, RuleOutcome, RuleValues, Severity,
};
use crate::parser::schema::{leading_number, DiagnosticRecord};
use crate::record::{DENOMINATIONS, DSHOT_CONFIG, RECEIVER_SETTINGS};
use crate::tables::boxes::ARM;
use crate::tables::serial::FUNCTION_RX_SERIAL;

/// MCUs that struggle with 8 kHz PID loops and DShot600.
pub const LOWER_END_MCUS: &[&str] = &["F411", "F405", "F435", "F722", "G473"];

/// Firmware build define for each receiver protocol and the
/// `serialrx_provider` values it enables.
pub const RX_PROTOCOLS: &[(&str, &[&str])] = &[
    ("USE_SERIALRX_CRSF", &["CRSF"]),
    ("USE_SERIALRX_FPORT", &["FPORT"]),
    ("USE_SERIALRX_GHST", &["GHST"]),
    ("USE_SERIALRX_IBUS", &["IBUS"]),
    ("USE_SERIALRX_JETIEXBUS", &["JETIEXBUS"]),
    ("USE_SERIALRX_SBUS", &["SBUS"]),
    ("USE_SERIALRX_SPEKTRUM", &["SPEK2048", "SPEK1024", "SRXL"]),
    ("USE_SERIALRX_SRXL2", &["SRXL2"]),
    ("USE_SERIALRX_SUMD", &["SUMD"]),
    ("USE_SERIALRX_SUMH", &["SUMH"]),
    ("USE_SERIALRX_TARGET_CUSTOM", &["CUSTOM"]),
    ("USE_SERIALRX_XBUS", &["XBUS"]),
];

/// Widest ARM window, in stick units, that is not reported.
pub const MAX_ARM_RANGE_WIDTH: u32 = 800;

const EXPECTED_ARMING_FLAGS: &[&str] = &["NONE", "CLI", "MSP"];

pub fn default_rules() -> Vec<RuleDefinition> {
    vec![
        RuleDefinition {
            id: "low-pid-rate",
            title: "Low PID Loop Rate",
            severity: Severity::Warning,
            description: Description::Static(
                "PID loop rate is lower than 1/4 of the gyro rate, which may cause reduced performance in most setups.",
            ),
            check: check_low_pid_rate,
        },
        RuleDefinition {
            id: "high-pid-rate",
            title: "High PID Loop Rate",
            severity: Severity::Warning,
            description: Description::Dynamic(describe_high_pid_rate),
            check: check_high_pid_rate,
        },
        RuleDefinition {
            id: "high-dshot-rate",
            title: "High DShot Rate",
            severity: Severity::Warning,
            description: Description::Dynamic(describe_high_dshot_rate),
            check: check_high_dshot_rate,
        },
        RuleDefinition {
            id: "high-cpu-load",
            title: "High CPU Load",
            severity: Severity::Warning,
            description: Description::Static(
                "The CPU load is higher than 50%. In flight this value will be higher, and may cause issues in flight and even crashes.",
            ),
            check: check_high_cpu_load,
        },
        RuleDefinition {
            id: "dshot-without-bidir",
            title: "DShot Without Bidirectional DShot",
            severity: Severity::Info,
            description: Description::Static(
                "Using DShot protocol without bidirectional enabled. Consider enabling bidirectional DShot for better performance.",
            ),
            check: check_dshot_without_bidir,
        },
        RuleDefinition {
            id: "arming-disabled",
            title: "Unexpected Arming Prevention Flags Present",
            severity: Severity::Error,
            description: Description::Dynamic(describe_arming_disabled),
            check: check_arming_disabled,
        },
        RuleDefinition {
            id: "rx-protocol-not-matching",
            title: "Configured receiver protocol does not match",
            severity: Severity::Error,
            description: Description::Dynamic(describe_rx_protocol),
            check: check_rx_protocol,
        },
        RuleDefinition {
            id: "analog-osd-incompatibility",
            title: "Potential analog OSD incompatibility",
            severity: Severity::Warning,
            description: Description::Static(
                "The firmware build includes both OSD_SD and OSD_HD options. When OSD_HD is defined, the settings are \
                 automatically set up for digital OSD. Either flash the firmware with only OSD_SD enabled, or set up the \
                 OSD in the CLI with `set osd_displayport_device = MAX7456` and `set vcd_video_system = PAL` (or NTSC), \
                 followed by `save`.",
            ),
            check: check_analog_osd,
        },
        RuleDefinition {
            id: "no-arm-mode",
            title: "No ARM Mode Configured",
            severity: Severity::Error,
            description: Description::Static(
                "No aux channel range is assigned to ARM. The craft cannot be armed until an ARM switch is set up in the Modes tab.",
            ),
            check: check_no_arm_mode,
        },
        RuleDefinition {
            id: "wide-arm-range",
            title: "Wide ARM Range",
            severity: Severity::Warning,
            description: Description::Dynamic(describe_wide_arm_range),
            check: check_wide_arm_range,
        },
        RuleDefinition {
            id: "multiple-serialrx-ports",
            title: "Multiple Serial RX Ports",
            severity: Severity::Error,
            description: Description::Dynamic(describe_multiple_serialrx),
            check: check_multiple_serialrx,
        },
    ]
}

// Helper functions

fn pid_denom(record: &DiagnosticRecord) -> Result<Option<u32>, RuleError> {
    let Some(raw) = record.setting(DENOMINATIONS, "pidDenom") else {
        return Ok(None);
    };
    raw.trim()
        .parse::<u32>()
        .map(Some)
        .map_err(|_| RuleError::InvalidValue {
            field: "pid_process_denom",
            value: raw.to_string(),
        })
}

fn is_lower_end_mcu(mcu: &str) -> bool {
    LOWER_END_MCUS.iter().any(|m| mcu.contains(m))
}

/// DShot speed from a protocol name such as `DSHOT600`; `None` for non-DShot
/// protocols.
fn dshot_rate(protocol: &str) -> Option<u32> {
    let (_, rest) = protocol.split_once("DSHOT")?;
    leading_number(rest).map(|n| n as u32)
}

fn value_str<'a>(values: Option<&'a RuleValues>, key: &str) -> Option<&'a str> {
    values?.get(key)?.as_str()
}

fn value_list(values: Option<&RuleValues>, key: &str) -> Vec<String> {
    values
        .and_then(|v| v.get(key))
        .and_then(|v| v.as_array())
        .map(|items| {
            items
                .iter()
                .filter_map(|i| i.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

// Checks and descriptions

fn check_low_pid_rate(record: &DiagnosticRecord) -> Result<RuleOutcome, RuleError> {
    Ok(pid_denom(record)?.is_some_and(|d| d > 4).into())
}

fn check_high_pid_rate(record: &DiagnosticRecord) -> Result<RuleOutcome, RuleError> {
    let gyro_rate = record.status_value("GYRO rate").and_then(|v| v.as_f64());
    let mcu = record.build_metadata.mcu.as_deref();
    let (Some(gyro_rate), Some(denom), Some(mcu)) = (gyro_rate, pid_denom(record)?, mcu) else {
        return Ok(RuleOutcome::NoMatch);
    };
    if denom == 0 {
        return Ok(RuleOutcome::NoMatch);
    }

    let pid_rate = (gyro_rate / denom as f64).round() as u64;
    if pid_rate >= 8000 && is_lower_end_mcu(mcu) {
        let mut values = RuleValues::new();
        values.insert("pidRate".to_string(), json!(pid_rate));
        values.insert("mcu".to_string(), json!(mcu));
        return Ok(RuleOutcome::MatchedWith(values));
    }
    Ok(RuleOutcome::NoMatch)
}

fn describe_high_pid_rate(_: &DiagnosticRecord, values: Option<&RuleValues>) -> String {
    let advice = "G4, F4, and F722 MCUs can struggle with an 8kHz PID loop rate. Consider using a lower rate to avoid instability.";
    match (values.and_then(|v| v.get("pidRate")), value_str(values, "mcu")) {
        (Some(rate), Some(mcu)) => format!(
            "Current PID loop rate: {}Hz, Detected MCU: {}. {}",
            rate, mcu, advice
        ),
        _ => advice.to_string(),
    }
}

fn check_high_dshot_rate(record: &DiagnosticRecord) -> Result<RuleOutcome, RuleError> {
    let rate = record.setting(DSHOT_CONFIG, "escProtocol").and_then(dshot_rate);
    let (Some(rate), Some(mcu)) = (rate, record.build_metadata.mcu.as_deref()) else {
        return Ok(RuleOutcome::NoMatch);
    };

    if rate > 300 && is_lower_end_mcu(mcu) {
        let mut values = RuleValues::new();
        values.insert("dshotRate".to_string(), json!(rate));
        values.insert("mcu".to_string(), json!(mcu));
        return Ok(RuleOutcome::MatchedWith(values));
    }
    Ok(RuleOutcome::NoMatch)
}

fn describe_high_dshot_rate(_: &DiagnosticRecord, values: Option<&RuleValues>) -> String {
    let advice = "G4, F4, and F722 MCUs can struggle with DShot 600. Consider using DShot 300 to avoid instability. \
                  It's better to use a lower DShot rate with bidirectional DShot enabled than a higher one without.";
    match (values.and_then(|v| v.get("dshotRate")), value_str(values, "mcu")) {
        (Some(rate), Some(mcu)) => format!(
            "Current DShot rate: {}, Detected MCU: {}. {}",
            rate, mcu, advice
        ),
        _ => advice.to_string(),
    }
}

fn check_high_cpu_load(record: &DiagnosticRecord) -> Result<RuleOutcome, RuleError> {
    let Some(value) = record
        .status_value("CPU Load")
        .or_else(|| record.status_value("CPU"))
    else {
        return Ok(RuleOutcome::NoMatch);
    };
    let load = value.as_f64().ok_or_else(|| RuleError::InvalidValue {
        field: "CPU Load",
        value: value.to_string(),
    })?;
    Ok((load > 50.0).into())
}

fn check_dshot_without_bidir(record: &DiagnosticRecord) -> Result<RuleOutcome, RuleError> {
    let Some(protocol) = record.setting(DSHOT_CONFIG, "escProtocol") else {
        return Ok(RuleOutcome::NoMatch);
    };
    let is_dshot = protocol.to_lowercase().contains("dshot");
    let bidir_enabled = record.setting(DSHOT_CONFIG, "dshotBidir") == Some("ON");
    Ok((is_dshot && !bidir_enabled).into())
}

fn unexpected_arming_flags(record: &DiagnosticRecord) -> Vec<&str> {
    record
        .arming_disable_flags
        .iter()
        .map(String::as_str)
        .filter(|f| !EXPECTED_ARMING_FLAGS.contains(f))
        .collect()
}

fn check_arming_disabled(record: &DiagnosticRecord) -> Result<RuleOutcome, RuleError> {
    let flags = unexpected_arming_flags(record);
    if flags.is_empty() {
        return Ok(RuleOutcome::NoMatch);
    }
    let mut values = RuleValues::new();
    values.insert("flags".to_string(), json!(flags));
    Ok(RuleOutcome::MatchedWith(values))
}

fn describe_arming_disabled(_: &DiagnosticRecord, values: Option<&RuleValues>) -> String {
    let base = "Detected unexpected arming prevention flags. The flight controller may not arm. \
                MSP and CLI are expected, and should go away after disconnecting from the Configurator.";
    let flags = value_list(values, "flags");
    if flags.is_empty() {
        base.to_string()
    } else {
        format!("{} Unexpected flags: {}.", base, flags.join(", "))
    }
}

fn check_rx_protocol(record: &DiagnosticRecord) -> Result<RuleOutcome, RuleError> {
    let options = &record.build_metadata.options;
    let Some(configured) = record.setting(RECEIVER_SETTINGS, "rxProtocol") else {
        return Ok(RuleOutcome::NoMatch);
    };
    // Without build options there is nothing to compare against.
    if options.is_empty() || configured == "NONE" {
        return Ok(RuleOutcome::NoMatch);
    }

    let required: Vec<&str> = RX_PROTOCOLS
        .iter()
        .filter(|(_, cli)| cli.contains(&configured))
        .map(|(define, _)| *define)
        .collect();
    if required.is_empty() || required.iter().any(|d| options.contains(*d)) {
        return Ok(RuleOutcome::NoMatch);
    }

    let built_in: Vec<String> = options
        .iter()
        .filter(|o| o.starts_with("USE_SERIALRX_") && o.as_str() != "USE_SERIALRX")
        .map(|o| {
            RX_PROTOCOLS
                .iter()
                .find(|(define, _)| *define == o.as_str())
                .map(|(_, cli)| cli.join("/"))
                .unwrap_or_else(|| o.trim_start_matches("USE_SERIALRX_").to_string())
        })
        .collect();

    let mut values = RuleValues::new();
    values.insert("cliRxProtocol".to_string(), json!(configured));
    values.insert("builtInRxProtocols".to_string(), json!(built_in));
    values.insert("requiredDefines".to_string(), json!(required));
    Ok(RuleOutcome::MatchedWith(values))
}

fn describe_rx_protocol(_: &DiagnosticRecord, values: Option<&RuleValues>) -> String {
    let Some(configured) = value_str(values, "cliRxProtocol") else {
        return "The configured receiver protocol does not match the protocol built into the firmware."
            .to_string();
    };
    let built_in = value_list(values, "builtInRxProtocols");
    let built_in = if built_in.is_empty() {
        "None".to_string()
    } else {
        built_in.join(", ")
    };
    format!(
        "Configured receiver protocol: {}, protocol(s) defined in firmware: {}. \
         You will not be able to get communication from the receiver until firmware is re-flashed with the correct protocol ({}).",
        configured,
        built_in,
        value_list(values, "requiredDefines").join(" or ")
    )
}

fn check_analog_osd(record: &DiagnosticRecord) -> Result<RuleOutcome, RuleError> {
    let build = &record.build_metadata;
    Ok((build.has_option("OSD_SD") && build.has_option("OSD_HD")).into())
}

fn check_no_arm_mode(record: &DiagnosticRecord) -> Result<RuleOutcome, RuleError> {
    let Some(modes) = &record.aux_modes else {
        return Ok(RuleOutcome::NoMatch);
    };
    Ok((!modes.iter().any(|m| m.mode == ARM)).into())
}

fn check_wide_arm_range(record: &DiagnosticRecord) -> Result<RuleOutcome, RuleError> {
    let Some(arm) = record.aux_mode(ARM) else {
        return Ok(RuleOutcome::NoMatch);
    };
    if arm.width() <= MAX_ARM_RANGE_WIDTH {
        return Ok(RuleOutcome::NoMatch);
    }
    let mut values = RuleValues::new();
    values.insert("low".to_string(), json!(arm.low));
    values.insert("high".to_string(), json!(arm.high));
    values.insert("channel".to_string(), json!(arm.channel));
    Ok(RuleOutcome::MatchedWith(values))
}

fn describe_wide_arm_range(_: &DiagnosticRecord, values: Option<&RuleValues>) -> String {
    let advice = "A wide ARM range makes it easy to arm by accident. Use a narrow window at one end of the switch travel.";
    let bound = |key: &str| values.and_then(|v| v.get(key)).and_then(|v| v.as_u64());
    match (bound("low"), bound("high")) {
        (Some(low), Some(high)) => format!(
            "ARM is active from {} to {} ({} units wide). {}",
            low,
            high,
            high.saturating_sub(low),
            advice
        ),
        _ => advice.to_string(),
    }
}

fn check_multiple_serialrx(record: &DiagnosticRecord) -> Result<RuleOutcome, RuleError> {
    let Some(ports) = &record.serial_ports else {
        return Ok(RuleOutcome::NoMatch);
    };
    let rx_ports: Vec<&str> = ports
        .iter()
        .filter(|p| p.has_function(FUNCTION_RX_SERIAL))
        .map(|p| p.identifier.as_str())
        .collect();
    if rx_ports.len() <= 1 {
        return Ok(RuleOutcome::NoMatch);
    }
    let mut values = RuleValues::new();
    values.insert("ports".to_string(), json!(rx_ports));
    Ok(RuleOutcome::MatchedWith(values))
}

fn describe_multiple_serialrx(_: &DiagnosticRecord, values: Option<&RuleValues>) -> String {
    let base = "Serial RX is enabled on more than one port. Only one port can receive the RC link; disable Serial RX on the others.";
    let ports = value_list(values, "ports");
    if ports.is_empty() {
        base.to_string()
    } else {
        format!("Serial RX enabled on: {}. {}", ports.join(", "), base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::schema::{AuxRange, BuildMetadata, SerialPortConfig, StatusValue};
    use crate::record::extract_common_settings;

    fn record_with(cli: &str) -> DiagnosticRecord {
        DiagnosticRecord {
            common_settings: extract_common_settings(cli),
            ..Default::default()
        }
    }

    fn find(id: &str) -> RuleDefinition {
        default_rules().into_iter().find(|r| r.id == id).unwrap()
    }

    fn matches(id: &str, record: &DiagnosticRecord) -> bool {
        find(id).evaluate(record).is_some()
    }

    fn with_status(
        mut record: DiagnosticRecord,
        key: &str,
        value: StatusValue,
    ) -> DiagnosticRecord {
        record
            .status
            .get_or_insert_with(Default::default)
            .insert(key.to_string(), value);
        record
    }

    fn with_mcu(mut record: DiagnosticRecord, mcu: &str) -> DiagnosticRecord {
        record.build_metadata.mcu = Some(mcu.to_string());
        record
    }

    #[test]
    fn test_registry_order_and_ids_unique() {
        let ids: Vec<_> = default_rules().iter().map(|r| r.id).collect();
        assert_eq!(ids[0], "low-pid-rate");
        assert_eq!(ids.last(), Some(&"multiple-serialrx-ports"));
        let mut sorted = ids.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), ids.len());
    }

    #[test]
    fn test_low_pid_rate() {
        assert!(matches("low-pid-rate", &record_with("set pid_process_denom = 8")));
        assert!(!matches("low-pid-rate", &record_with("set pid_process_denom = 4")));
        assert!(!matches("low-pid-rate", &record_with("")));
        assert!(!matches("low-pid-rate", &record_with("set pid_process_denom = x")));
    }

    #[test]
    fn test_high_pid_rate_embeds_values() {
        let record = with_mcu(
            with_status(
                record_with("set pid_process_denom = 1"),
                "GYRO rate",
                StatusValue::Number(8000.0),
            ),
            "STM32F411",
        );
        let finding = find("high-pid-rate").evaluate(&record).unwrap();
        assert!(finding.description.contains("8000Hz"));
        assert!(finding.description.contains("STM32F411"));

        let h7 = with_mcu(record.clone(), "STM32H743");
        assert!(!matches("high-pid-rate", &h7));

        let halved = with_mcu(
            with_status(
                record_with("set pid_process_denom = 2"),
                "GYRO rate",
                StatusValue::Number(8000.0),
            ),
            "STM32F411",
        );
        assert!(!matches("high-pid-rate", &halved));
    }

    #[test]
    fn test_high_dshot_rate() {
        let record = with_mcu(record_with("set motor_pwm_protocol = DSHOT600"), "STM32F405");
        let finding = find("high-dshot-rate").evaluate(&record).unwrap();
        assert!(finding.description.contains("600"));

        let dshot300 = with_mcu(record_with("set motor_pwm_protocol = DSHOT300"), "STM32F405");
        assert!(!matches("high-dshot-rate", &dshot300));
        let pwm = with_mcu(record_with("set motor_pwm_protocol = ONESHOT125"), "STM32F405");
        assert!(!matches("high-dshot-rate", &pwm));
        assert!(!matches("high-dshot-rate", &record_with("set motor_pwm_protocol = DSHOT600")));
    }

    #[test]
    fn test_high_cpu_load_threshold() {
        let load = |v: &str| {
            with_status(DiagnosticRecord::default(), "CPU Load", StatusValue::coerce(v))
        };
        assert!(matches("high-cpu-load", &load("51")));
        assert!(!matches("high-cpu-load", &load("50")));
        assert!(matches("high-cpu-load", &load("75%")));
        assert!(!matches("high-cpu-load", &load("busy")));

        let short_key = with_status(DiagnosticRecord::default(), "CPU", StatusValue::coerce("61%"));
        assert!(matches("high-cpu-load", &short_key));
    }

    #[test]
    fn test_dshot_without_bidir() {
        assert!(matches(
            "dshot-without-bidir",
            &record_with("set motor_pwm_protocol = DSHOT300\nset dshot_bidir = OFF")
        ));
        assert!(matches(
            "dshot-without-bidir",
            &record_with("set motor_pwm_protocol = DSHOT300")
        ));
        assert!(!matches(
            "dshot-without-bidir",
            &record_with("set motor_pwm_protocol = DSHOT300\nset dshot_bidir = ON")
        ));
        assert!(!matches(
            "dshot-without-bidir",
            &record_with("set motor_pwm_protocol = MULTISHOT")
        ));
    }

    #[test]
    fn test_arming_disabled() {
        let flags = |f: &[&str]| DiagnosticRecord {
            arming_disable_flags: f.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        };
        let finding = find("arming-disabled")
            .evaluate(&flags(&["RXLOSS", "CLI", "MSP"]))
            .unwrap();
        assert!(finding.description.contains("RXLOSS"));
        assert!(!matches("arming-disabled", &flags(&["CLI", "MSP"])));
        assert!(!matches("arming-disabled", &flags(&["NONE"])));
        assert!(!matches("arming-disabled", &flags(&[])));
    }

    #[test]
    fn test_rx_protocol_not_matching() {
        let mut record = record_with("set serialrx_provider = CRSF");
        record.build_metadata = BuildMetadata {
            options: ["USE_SERIALRX_SBUS", "USE_SERIALRX", "USE_SERIALRX_FOO"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            ..Default::default()
        };
        let finding = find("rx-protocol-not-matching").evaluate(&record).unwrap();
        assert!(finding.description.contains("CRSF"));
        assert!(finding.description.contains("FOO, SBUS"));
        assert!(finding.description.contains("USE_SERIALRX_CRSF"));

        record.build_metadata.options.insert("USE_SERIALRX_CRSF".to_string());
        assert!(!matches("rx-protocol-not-matching", &record));
    }

    #[test]
    fn test_rx_protocol_spektrum_aliases_and_skips() {
        let mut record = record_with("set serialrx_provider = SRXL");
        record.build_metadata.options.insert("USE_SERIALRX_SPEKTRUM".to_string());
        assert!(!matches("rx-protocol-not-matching", &record));

        let mut unknown = record_with("set serialrx_provider = NONE");
        unknown.build_metadata.options.insert("USE_SERIALRX_CRSF".to_string());
        assert!(!matches("rx-protocol-not-matching", &unknown));

        // No build metadata means nothing to compare against.
        assert!(!matches(
            "rx-protocol-not-matching",
            &record_with("set serialrx_provider = CRSF")
        ));
    }

    #[test]
    fn test_analog_osd() {
        let mut record = DiagnosticRecord::default();
        record.build_metadata.options.insert("OSD_SD".to_string());
        assert!(!matches("analog-osd-incompatibility", &record));
        record.build_metadata.options.insert("OSD_HD".to_string());
        assert!(matches("analog-osd-incompatibility", &record));
    }

    fn aux(mode: &str, low: u32, high: u32) -> AuxRange {
        AuxRange {
            mode: mode.to_string(),
            channel: 0,
            low,
            high,
        }
    }

    #[test]
    fn test_arm_mode_rules() {
        let with_modes = |modes: Vec<AuxRange>| DiagnosticRecord {
            aux_modes: Some(modes),
            ..Default::default()
        };
        assert!(matches("no-arm-mode", &with_modes(vec![aux("ANGLE", 900, 1300)])));
        assert!(matches("no-arm-mode", &with_modes(vec![])));
        assert!(!matches("no-arm-mode", &DiagnosticRecord::default()));
        assert!(!matches("no-arm-mode", &with_modes(vec![aux("ARM", 1700, 2100)])));

        assert!(!matches("wide-arm-range", &with_modes(vec![aux("ARM", 1300, 2100)])));
        let finding = find("wide-arm-range")
            .evaluate(&with_modes(vec![aux("ARM", 900, 2100)]))
            .unwrap();
        assert!(finding.description.contains("1200 units"));
    }

    #[test]
    fn test_multiple_serialrx_ports() {
        let port = |id: &str, function: &[&str]| SerialPortConfig {
            identifier: id.to_string(),
            function: function.iter().map(|s| s.to_string()).collect(),
            msp: 115200,
            gps: 57600,
            telemetry: 0,
            blackbox: 115200,
        };
        let mut record = DiagnosticRecord {
            serial_ports: Some(vec![port("UART 1", &["RX Serial"]), port("UART 2", &["MSP"])]),
            ..Default::default()
        };
        assert!(!matches("multiple-serialrx-ports", &record));

        record
            .serial_ports
            .as_mut()
            .unwrap()
            .push(port("UART 3", &["MSP", "RX Serial"]));
        let finding = find("multiple-serialrx-ports").evaluate(&record).unwrap();
        assert!(finding.description.contains("UART 1, UART 3"));
    }
}
