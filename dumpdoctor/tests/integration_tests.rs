//! Integration tests for the DumpDoctor library

use dumpdoctor::prelude::*;
use std::path::PathBuf;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn ids(result: &AnalysisResult) -> Vec<&str> {
    result.findings.iter().map(|f| f.id.as_str()).collect()
}

#[test]
fn test_analyze_problem_dump_with_build() {
    let result = DumpDoctorCore::analyze_files(
        &fixture_path("support_dump.txt"),
        Some(fixture_path("build.json").as_path()),
        &AnalysisOptions::default(),
    )
    .expect("Should analyze");

    assert_eq!(
        ids(&result),
        vec![
            "high-pid-rate",
            "high-dshot-rate",
            "high-cpu-load",
            "dshot-without-bidir",
            "arming-disabled",
            "rx-protocol-not-matching",
            "analog-osd-incompatibility",
            "wide-arm-range",
            "multiple-serialrx-ports",
        ]
    );
    assert_eq!(
        result.stats,
        AnalysisStats {
            errors: 3,
            warnings: 5,
            info: 1
        }
    );
    assert!(result.has_errors());
    assert_eq!(result.source, Some(fixture_path("support_dump.txt")));
    assert_eq!(result.record.build_metadata.mcu.as_deref(), Some("STM32F411"));
}

#[test]
fn test_descriptions_embed_detected_values() {
    let result = DumpDoctorCore::analyze_files(
        &fixture_path("support_dump.txt"),
        Some(fixture_path("build.json").as_path()),
        &AnalysisOptions::default(),
    )
    .expect("Should analyze");

    let find = |id: &str| {
        result
            .findings
            .iter()
            .find(|f| f.id == id)
            .unwrap_or_else(|| panic!("missing finding {}", id))
    };

    let pid = find("high-pid-rate");
    assert!(pid.description.contains("8000Hz"));
    assert!(pid.description.contains("STM32F411"));

    let rx = find("rx-protocol-not-matching");
    assert!(rx.description.contains("CRSF"));
    assert!(rx.description.contains("SBUS"));
    assert!(rx.description.contains("USE_SERIALRX_CRSF"));
}

#[test]
fn test_analyze_without_build_metadata() {
    let result = DumpDoctorCore::analyze_files(
        &fixture_path("support_dump.txt"),
        None,
        &AnalysisOptions::default(),
    )
    .expect("Should analyze");

    assert_eq!(
        ids(&result),
        vec![
            "high-cpu-load",
            "dshot-without-bidir",
            "arming-disabled",
            "wide-arm-range",
            "multiple-serialrx-ports",
        ]
    );
}

#[test]
fn test_healthy_dump_has_no_findings() {
    let result = DumpDoctorCore::analyze_files(
        &fixture_path("healthy_dump.txt"),
        Some(fixture_path("healthy_build.json").as_path()),
        &AnalysisOptions::default(),
    )
    .expect("Should analyze");

    assert_eq!(
        result.total_findings(),
        0,
        "Healthy dump should have no findings: {:?}",
        ids(&result)
    );
}

#[test]
fn test_full_dump_option() {
    let options = AnalysisOptions {
        full_dump: true,
        ..Default::default()
    };
    let result = DumpDoctorCore::analyze_files(&fixture_path("support_dump.txt"), None, &options)
        .expect("Should analyze");

    let dump = result.record.memory_dump.expect("Should have full dump");
    assert!(dump.contains("# version"));
    assert!(dump.contains("# dump master"));
    assert!(dump.ends_with("batch end"));
}

#[test]
fn test_missing_dump_file() {
    let result = DumpDoctorCore::analyze_files(
        &fixture_path("does_not_exist.txt"),
        None,
        &AnalysisOptions::default(),
    );
    let err = result.unwrap_err();
    assert!(matches!(err, DumpDoctorError::Io { .. }));
    assert!(err.to_string().contains("does_not_exist.txt"));
}

#[test]
fn test_invalid_build_json() {
    let dir = tempfile::tempdir().expect("Should create temp dir");
    let build = dir.path().join("build.json");
    std::fs::write(&build, "{ not json").expect("Should write");

    let result = DumpDoctorCore::analyze_files(
        &fixture_path("support_dump.txt"),
        Some(build.as_path()),
        &AnalysisOptions::default(),
    );
    assert!(matches!(result, Err(DumpDoctorError::BuildFile { .. })));
}

#[test]
fn test_support_and_build_keys() {
    let dump = std::fs::read_to_string(fixture_path("support_dump.txt")).expect("Should read");
    assert_eq!(
        dumpdoctor::extract_build_key(&dump).as_deref(),
        Some("24452661cf65e9f33f55404fc5dcea75")
    );
    let key =
        dumpdoctor::SupportKey::parse("24452661cf65e9f33f55404fc5dcea75").expect("Should parse");
    assert!(key.is_build_key());
}
