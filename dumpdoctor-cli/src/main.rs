//! DumpDoctor CLI - flight-controller support dump analysis from the command line.

use clap::{Parser, Subcommand, ValueEnum};
use dumpdoctor::{
    AnalysisOptions, AnalysisResult, DiagnosticRecord, DumpDoctorCore, Finding, RulesEngine,
    Severity, SupportKey,
};
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dumpdoctor")]
#[command(about = "Flight-controller support dump analyzer", long_about = None)]
#[command(version)]
struct Cli {
    /// Log parser and rule diagnostics to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a support dump and report detected problems
    Check {
        /// Path to the support dump text file
        #[arg(value_name = "DUMP")]
        dump: PathBuf,

        /// Build metadata JSON from the build server
        #[arg(short, long, value_name = "FILE")]
        build: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,

        /// Exit with error code if findings exist at this severity or higher
        #[arg(long, value_enum)]
        fail_on: Option<FailOnSeverity>,

        /// Capture the memory dump including the version preamble
        #[arg(long)]
        full_dump: bool,

        /// Only evaluate these rule ids (repeatable)
        #[arg(long = "rule", value_name = "ID")]
        rules: Vec<String>,
    },

    /// Print the parsed diagnostic record as JSON
    Record {
        /// Path to the support dump text file
        #[arg(value_name = "DUMP")]
        dump: PathBuf,

        /// Build metadata JSON from the build server
        #[arg(short, long, value_name = "FILE")]
        build: Option<PathBuf>,

        /// Capture the memory dump including the version preamble
        #[arg(long)]
        full_dump: bool,
    },

    /// List available problem rules
    Rules {
        /// Show rule descriptions
        #[arg(short, long)]
        details: bool,
    },

    /// Identify a support id or build key
    Key {
        #[arg(value_name = "KEY")]
        key: String,
    },
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output for tooling
    Json,
    /// GitHub Actions annotations
    Github,
}

#[derive(Clone, ValueEnum)]
enum FailOnSeverity {
    Error,
    Warning,
    Info,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let outcome = match cli.command {
        Commands::Check {
            dump,
            build,
            format,
            fail_on,
            full_dump,
            rules,
        } => {
            let options = AnalysisOptions { full_dump, rules };
            handle_check(&dump, build.as_deref(), format, fail_on, &options)
        }
        Commands::Record {
            dump,
            build,
            full_dump,
        } => {
            let options = AnalysisOptions {
                full_dump,
                ..Default::default()
            };
            handle_record(&dump, build.as_deref(), &options)
        }
        Commands::Rules { details } => {
            handle_rules(details);
            Ok(0)
        }
        Commands::Key { key } => handle_key(&key),
    };

    let exit_code = outcome.unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        1
    });
    process::exit(exit_code);
}

fn handle_check(
    dump: &Path,
    build: Option<&Path>,
    format: OutputFormat,
    fail_on: Option<FailOnSeverity>,
    options: &AnalysisOptions,
) -> anyhow::Result<i32> {
    let unknown = RulesEngine::with_default_rules().unknown_ids(&options.rules);
    if !unknown.is_empty() {
        anyhow::bail!(
            "Unknown rule id(s): {} (see `dumpdoctor rules`)",
            unknown.join(", ")
        );
    }

    let result = DumpDoctorCore::analyze_files(dump, build, options)?;
    output_result(&result, &format);
    Ok(match fail_on {
        Some(severity) if should_fail(&result, &severity) => 1,
        _ => 0,
    })
}

fn handle_record(
    dump: &Path,
    build: Option<&Path>,
    options: &AnalysisOptions,
) -> anyhow::Result<i32> {
    let result = DumpDoctorCore::analyze_files(dump, build, options)?;
    println!("{}", serde_json::to_string_pretty(&result.record)?);
    Ok(0)
}

fn should_fail(result: &AnalysisResult, severity: &FailOnSeverity) -> bool {
    match severity {
        FailOnSeverity::Error => result.has_errors(),
        FailOnSeverity::Warning => result.has_warnings_or_errors(),
        FailOnSeverity::Info => result.total_findings() > 0,
    }
}

fn output_result(result: &AnalysisResult, format: &OutputFormat) {
    match format {
        OutputFormat::Human => output_human(result),
        OutputFormat::Json => output_json(result),
        OutputFormat::Github => output_github(result),
    }
}

fn print_group(label: &str, findings: &[&Finding]) {
    if findings.is_empty() {
        return;
    }
    println!("\n  {}:", label);
    for finding in findings {
        println!("    - {} ({})", finding.title, finding.id);
        println!("      {}", finding.description);
    }
}

fn output_human(result: &AnalysisResult) {
    if let Some(ref source) = result.source {
        println!("\nDump: {}", source.display());
    }
    println!("{}", "─".repeat(60));

    let record = &result.record;
    let build = &record.build_metadata;
    if let Some(ref target) = build.target {
        println!("  Target:  {}", target);
    }
    if let Some(ref mcu) = build.mcu {
        println!("  MCU:     {}", mcu);
    }
    if let Some(ref release) = build.release {
        println!("  Release: {}", release);
    }
    if let Some(ref problem) = record.problem_description {
        println!("  Problem: {}", problem);
    }

    if result.total_findings() == 0 {
        println!("  No problems found");
        return;
    }

    let by_severity = |severity: Severity| -> Vec<&Finding> {
        result
            .findings
            .iter()
            .filter(|f| f.severity == severity)
            .collect()
    };
    print_group("ERROR", &by_severity(Severity::Error));
    print_group("WARNING", &by_severity(Severity::Warning));
    print_group("INFO", &by_severity(Severity::Info));

    println!("\n  Summary:");
    println!("    Errors:   {}", result.stats.errors);
    println!("    Warnings: {}", result.stats.warnings);
    println!("    Info:     {}", result.stats.info);
}

fn output_json(result: &AnalysisResult) {
    let output = serde_json::json!({
        "generated_at": chrono::Utc::now().to_rfc3339(),
        "source": result.source.as_ref().map(|p| p.display().to_string()),
        "findings": result.findings,
        "stats": result.stats,
        "record": result.record,
    });
    match serde_json::to_string_pretty(&output) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error: {}", e),
    }
}

fn severity_to_github(finding: &Finding) -> &'static str {
    match finding.severity {
        Severity::Error => "error",
        Severity::Warning => "warning",
        Severity::Info => "notice",
    }
}

fn output_github(result: &AnalysisResult) {
    let file = result
        .source
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_default();
    for finding in &result.findings {
        println!(
            "::{} file={},title={}::{}",
            severity_to_github(finding),
            file,
            finding.title,
            finding.description.replace('\n', " ")
        );
    }
}

fn handle_rules(details: bool) {
    println!("Available problem rules:\n");

    let engine = RulesEngine::with_default_rules();
    let empty = DiagnosticRecord::default();
    for rule in engine.rules() {
        println!("  {} [{}]", rule.id, rule.severity);
        println!("    {}", rule.title);
        if details {
            println!("    {}", rule.describe(&empty, None));
        }
        println!();
    }
}

fn handle_key(key: &str) -> anyhow::Result<i32> {
    match SupportKey::parse(key)? {
        SupportKey::Support(id) => println!("support id: {}", id),
        SupportKey::Build(key) => println!("build key: {}", key),
    }
    Ok(0)
}
