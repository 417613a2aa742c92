//! Example: adding a custom rule to the RulesEngine (without DumpDoctorCore).
//! Run with: cargo run --example custom_rules [path/to/dump.txt]

use dumpdoctor::analyzer::rules::{Description, RuleDefinition, RuleError, RuleOutcome};
use dumpdoctor::{parse_dump, DiagnosticRecord, RulesEngine, Severity};
use std::path::Path;

/// Flags craft that still run the stock 250 Hz gyro lowpass.
fn check_stock_gyro_lpf(record: &DiagnosticRecord) -> Result<RuleOutcome, RuleError> {
    Ok((record.setting("Filters", "gyroLpf1") == Some("250")).into())
}

fn main() {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "tests/fixtures/support_dump.txt".to_string());
    let path = Path::new(&path);

    let dump = match std::fs::read_to_string(path) {
        Ok(dump) => dump,
        Err(e) => {
            eprintln!("Cannot read {}: {}", path.display(), e);
            eprintln!("Usage: cargo run --example custom_rules [path/to/dump.txt]");
            std::process::exit(1);
        }
    };

    let mut engine = RulesEngine::with_default_rules();
    engine.add_rule(RuleDefinition {
        id: "stock-gyro-lpf",
        title: "Stock Gyro Lowpass",
        severity: Severity::Info,
        description: Description::Static("Gyro LPF1 is still at the 250 Hz default."),
        check: check_stock_gyro_lpf,
    });

    let record = parse_dump(&dump);
    let findings = engine.analyze(&record);

    println!("Custom analysis found {} problems for {}", findings.len(), path.display());
    for finding in &findings {
        println!("  [{}] {} ({})", finding.severity, finding.title, finding.id);
    }

    let errors = findings.iter().filter(|f| matches!(f.severity, Severity::Error)).count();
    if errors > 0 {
        std::process::exit(1);
    }
}
