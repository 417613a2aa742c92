//! DumpDoctor - flight-controller support dump analysis library
//!
//! This library turns the free-text CLI transcript a flight controller
//! produces for support requests into a structured [`DiagnosticRecord`], and
//! runs a registry of problem rules over it, such as PID loop rates too high
//! for the MCU, missing ARM switches, or receiver protocols that are not
//! compiled into the firmware.
//!
//! # Quick Start
//!
//! ```no_run
//! use dumpdoctor::{AnalysisOptions, DumpDoctorCore};
//!
//! let dump = std::fs::read_to_string("support.txt").unwrap();
//! let result = DumpDoctorCore::analyze(&dump, None, &AnalysisOptions::default());
//!
//! for finding in &result.findings {
//!     println!("{}: {}", finding.severity, finding.title);
//! }
//! ```
//!
//! # Features
//!
//! - **Section parsing**: status, DMA and timer maps, serial ports, aux modes
//! - **Code tables**: serial identifiers, serial functions, flight-mode boxes
//! - **Rules**: ordered, declarative problem definitions with isolated failures

pub mod analyzer;
pub mod core;
pub mod keys;
pub mod metadata;
pub mod parser;
pub mod record;
pub mod tables;

// Re-export main types
pub use crate::core::{
    AnalysisOptions, AnalysisResult, AnalysisStats, DumpDoctorCore, DumpDoctorError,
};
pub use analyzer::rules::{Finding, RuleDefinition, RuleOutcome, RulesEngine, Severity};
pub use keys::{extract_build_key, extract_support_id, SupportKey};
pub use parser::schema::{BuildMetadata, DiagnosticRecord};
pub use record::RecordBuilder;

/// Parse a support dump into a record without evaluating rules.
pub fn parse_dump(dump: &str) -> DiagnosticRecord {
    RecordBuilder::new(dump).build()
}

/// Evaluate the built-in rules against a record.
pub fn detect_problems(record: &DiagnosticRecord) -> Vec<Finding> {
    RulesEngine::with_default_rules().analyze(record)
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        AnalysisOptions, AnalysisResult, AnalysisStats, BuildMetadata, DiagnosticRecord,
        DumpDoctorCore, DumpDoctorError, Finding, Severity,
    };
}
