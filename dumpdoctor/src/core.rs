//! Core analysis API shared by the CLI and library users.
//! No networking; file access only in `analyze_files`.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::analyzer::rules::{Finding, RulesEngine, Severity};
use crate::metadata::parse_build_record;
use crate::parser::schema::{BuildMetadata, DiagnosticRecord};
use crate::record::RecordBuilder;

#[derive(Debug, thiserror::Error)]
pub enum DumpDoctorError {
    #[error("Invalid build metadata: {0}")]
    BuildMetadata(#[from] serde_json::Error),
    #[error("Invalid build metadata in {}: {source}", .path.display())]
    BuildFile {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

fn read_file(path: &Path) -> Result<String, DumpDoctorError> {
    std::fs::read_to_string(path).map_err(|source| DumpDoctorError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Options for an analysis run.
#[derive(Clone, Debug, Default)]
pub struct AnalysisOptions {
    /// Capture the memory dump including the `# version` preamble.
    pub full_dump: bool,
    /// Rule ids to evaluate; empty evaluates every registered rule.
    pub rules: Vec<String>,
}

/// Record and findings for one support dump.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    pub source: Option<PathBuf>,
    pub record: DiagnosticRecord,
    pub findings: Vec<Finding>,
    pub stats: AnalysisStats,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnalysisStats {
    pub errors: usize,
    pub warnings: usize,
    pub info: usize,
}

impl AnalysisResult {
    pub fn has_errors(&self) -> bool {
        self.stats.errors > 0
    }

    pub fn has_warnings_or_errors(&self) -> bool {
        self.stats.errors > 0 || self.stats.warnings > 0
    }

    pub fn total_findings(&self) -> usize {
        self.stats.errors + self.stats.warnings + self.stats.info
    }
}

fn findings_to_stats(findings: &[Finding]) -> AnalysisStats {
    let mut stats = AnalysisStats::default();
    for f in findings {
        match f.severity {
            Severity::Error => stats.errors += 1,
            Severity::Warning => stats.warnings += 1,
            Severity::Info => stats.info += 1,
        }
    }
    stats
}

/// Core analysis API.
pub struct DumpDoctorCore;

impl DumpDoctorCore {
    /// Parse a support dump and evaluate the rule registry against it.
    pub fn analyze(
        dump: &str,
        build: Option<BuildMetadata>,
        options: &AnalysisOptions,
    ) -> AnalysisResult {
        let record = RecordBuilder::new(dump)
            .with_build(build.unwrap_or_default())
            .full_dump(options.full_dump)
            .build();

        let mut engine = RulesEngine::with_default_rules();
        engine.retain_ids(&options.rules);
        let findings = engine.analyze(&record);

        tracing::debug!(
            rules = engine.rules().len(),
            findings = findings.len(),
            "Evaluated support dump"
        );

        let stats = findings_to_stats(&findings);
        AnalysisResult {
            source: None,
            record,
            findings,
            stats,
        }
    }

    /// Read a dump (and optionally a build JSON record) from disk and analyze it.
    pub fn analyze_files(
        dump_path: &Path,
        build_path: Option<&Path>,
        options: &AnalysisOptions,
    ) -> Result<AnalysisResult, DumpDoctorError> {
        let dump = read_file(dump_path)?;
        let build = match build_path {
            Some(path) => {
                let json = read_file(path)?;
                let build = parse_build_record(&json).map_err(|source| {
                    DumpDoctorError::BuildFile {
                        path: path.to_path_buf(),
                        source,
                    }
                })?;
                Some(build)
            }
            None => None,
        };

        let mut result = Self::analyze(&dump, build, options);
        result.source = Some(dump_path.to_path_buf());
        Ok(result)
    }
}
