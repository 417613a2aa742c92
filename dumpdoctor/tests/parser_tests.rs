//! Tests for support dump parsing

use dumpdoctor::parse_dump;
use dumpdoctor::parser::{StatusValue, TimerAssignment};
use std::path::PathBuf;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn read_fixture(name: &str) -> String {
    std::fs::read_to_string(fixture_path(name)).expect("Should read fixture")
}

#[test]
fn test_parse_status() {
    let record = parse_dump(&read_fixture("support_dump.txt"));
    let status = record.status.as_ref().expect("Should have status section");

    assert_eq!(status.get("GYRO rate"), Some(&StatusValue::Number(8000.0)));
    assert_eq!(status.get("CPU Load"), Some(&StatusValue::Number(63.0)));
    assert_eq!(
        status.get("Configuration"),
        Some(&StatusValue::Text("CONFIGURED".to_string()))
    );
    assert_eq!(
        status.get("Stack address"),
        Some(&StatusValue::Text("0x20010000".to_string()))
    );
    assert_eq!(record.arming_disable_flags, vec!["RXLOSS", "CLI", "MSP"]);
}

#[test]
fn test_parse_problem_description() {
    let record = parse_dump(&read_fixture("support_dump.txt"));
    assert_eq!(
        record.problem_description.as_deref(),
        Some("Quad will not arm after changing receivers")
    );
}

#[test]
fn test_parse_dma_and_timers() {
    let record = parse_dump(&read_fixture("support_dump.txt"));

    let dma = record.dma_assignments.as_ref().expect("Should have DMA map");
    assert_eq!(dma["DMA1"]["Channel 1"], "TIM1_UP");
    assert_eq!(dma["DMA1"]["Channel 2"], "FREE");
    assert_eq!(dma["DMA2"]["Stream 3"], "SPI_SDO 1");

    let timers = record.timer_assignments.as_ref().expect("Should have timers");
    assert_eq!(timers.len(), 3);
    assert_eq!(timers["TIM1"], TimerAssignment::Free);
    let tim2 = timers["TIM2"].channels().expect("TIM2 should be in use");
    assert_eq!(tim2["CH1"], "MOTOR 3");
    assert_eq!(tim2["CH2"], "LED 1");
}

#[test]
fn test_parse_serial_ports() {
    let record = parse_dump(&read_fixture("support_dump.txt"));
    let ports = record.serial_ports.as_ref().expect("Should have serial ports");

    let names: Vec<_> = ports.iter().map(|p| p.identifier.as_str()).collect();
    assert_eq!(names, vec!["USB VCP", "UART 1", "UART 2", "Soft Serial 1"]);
    assert_eq!(ports[0].function, vec!["MSP"]);
    assert!(ports[3].function.is_empty());
    assert_eq!(ports[1].gps, 57600);
}

#[test]
fn test_parse_aux_modes() {
    let record = parse_dump(&read_fixture("support_dump.txt"));
    let modes = record.aux_modes.as_ref().expect("Should have aux modes");

    assert_eq!(modes.len(), 2);
    let arm = record.aux_mode("ARM").expect("Should have ARM");
    assert_eq!((arm.low, arm.high), (900, 2100));
    assert_eq!(modes[1].mode, "ANGLE");
}

#[test]
fn test_parse_common_settings() {
    let record = parse_dump(&read_fixture("support_dump.txt"));

    assert_eq!(record.setting("Board", "boardName"), Some("MATEKF411RX"));
    assert_eq!(record.setting("DShot Config", "escProtocol"), Some("DSHOT600"));
    assert_eq!(record.setting("Receiver Settings", "rxProtocol"), Some("CRSF"));
    assert_eq!(record.setting("DShot Config", "dshotIdle"), None);
    assert!(record.common_settings["DShot Config"].contains_key("dshotIdle"));
}

#[test]
fn test_parse_memory_dump() {
    let record = parse_dump(&read_fixture("support_dump.txt"));
    let dump = record.memory_dump.as_ref().expect("Should have dump");

    assert!(dump.starts_with("batch start"));
    assert!(dump.ends_with("set vbat_max_cell_voltage = 430"));
}

#[test]
fn test_dma_timer_scenario() {
    let record = parse_dump("# dma show\nDMA1 Channel 1: TIM1_UP\n# timer show\nTIM1:FREE\n#");

    let dma = record.dma_assignments.expect("Should have DMA map");
    assert_eq!(dma.len(), 1);
    assert_eq!(dma["DMA1"].len(), 1);
    assert_eq!(dma["DMA1"]["Channel 1"], "TIM1_UP");

    let timers = record.timer_assignments.expect("Should have timers");
    assert_eq!(timers.len(), 1);
    assert!(timers["TIM1"].is_free());
}

#[test]
fn test_record_serializes_to_plain_structure() {
    let record = parse_dump(&read_fixture("support_dump.txt"));
    let json = serde_json::to_value(&record).expect("Should serialize");

    assert_eq!(json["timerAssignments"]["TIM1"], "FREE");
    assert_eq!(json["serialPorts"][1]["identifier"], "UART 1");
    assert!(json["commonSettings"]["DShot Config"]["dshotIdle"]["rawValue"].is_null());
    assert_eq!(json["status"]["GYRO rate"], 8000.0);
}

#[test]
fn test_parse_garbage_input() {
    let record = parse_dump("this is not a support dump\n# nope\nrandom text");
    assert!(record.status.is_none());
    assert!(record.serial_ports.is_none());
    assert!(record.aux_modes.is_none());
    assert!(record.timer_assignments.is_none());
}
