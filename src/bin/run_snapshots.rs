use clap::Parser;
use clap::error::ErrorKind;
use std::path::PathBuf;
use std::process::ExitCode;

use action_validator::config::{self, ColorMode};
use action_validator::{BuiltinValidator, HarnessConfig, Reporter, RunMode, run_harness};

/// Snapshot runner - validate every fixture and compare against stored snapshots
#[derive(Parser, Debug)]
#[command(
    name = "run_snapshots",
    about = "Run validation snapshot tests over a fixture directory",
    after_help = "ENVIRONMENT VARIABLES:\n\
        ACTION_VALIDATOR_FIXTURE_DIR     Default fixture root\n\
        ACTION_VALIDATOR_SNAPSHOT_FILE   Snapshot file name in each case\n\
        ACTION_VALIDATOR_COLOR           Default color mode (auto, always, never)"
)]
struct Args {
    /// Rewrite snapshots that do not match instead of failing
    #[arg(short, long)]
    update: bool,

    /// Fixture root directory (one subdirectory per test case)
    #[arg(long)]
    root: Option<PathBuf>,

    /// Snapshot file name inside each test case directory
    #[arg(long)]
    snapshot_file: Option<String>,

    /// When to use colored output
    #[arg(long, value_enum)]
    color: Option<ColorMode>,

    /// Print a JSON run summary after the report
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            return match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let settings = config::get();
    let harness_config = HarnessConfig {
        fixture_dir: args
            .root
            .unwrap_or_else(|| PathBuf::from(&settings.fixtures.root_dir)),
        snapshot_file: args
            .snapshot_file
            .unwrap_or_else(|| settings.fixtures.snapshot_file.clone()),
        mode: RunMode::from_update_flag(args.update),
    };
    let color = args.color.unwrap_or(settings.output.color).enabled_for_stdout();

    let mut reporter = Reporter::stdio(color);
    let summary = match run_harness(&harness_config, &BuiltinValidator::new(), &mut reporter) {
        Ok(summary) => summary,
        Err(e) => {
            eprintln!("Snapshot run failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = reporter.summary(&summary) {
        eprintln!("Unable to write summary: {}", e);
    }

    if args.json {
        match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("Unable to serialize run summary: {}", e),
        }
    }

    if summary.passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
