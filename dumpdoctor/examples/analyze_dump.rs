//! Example: analyze a support dump with DumpDoctorCore.
//! Run with: cargo run --example analyze_dump [path/to/dump.txt] [path/to/build.json]

use dumpdoctor::prelude::*;
use std::path::PathBuf;

fn main() -> Result<(), DumpDoctorError> {
    let mut args = std::env::args().skip(1);
    let dump = PathBuf::from(
        args.next()
            .unwrap_or_else(|| "tests/fixtures/support_dump.txt".to_string()),
    );
    let build = args.next().map(PathBuf::from);

    let options = AnalysisOptions::default();
    let result = DumpDoctorCore::analyze_files(&dump, build.as_deref(), &options)?;

    if let Some(ref problem) = result.record.problem_description {
        println!("Reported problem: {}", problem);
    }
    println!("Found {} problems in {}", result.total_findings(), dump.display());
    for finding in &result.findings {
        println!("  [{}] {}", finding.severity, finding.title);
        println!("    {}", finding.description);
    }
    Ok(())
}
