use clap::Parser;
use clap::error::ErrorKind;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use action_validator::{ActionType, BuiltinValidator, Validator};

/// Action Validator - validate a GitHub Action or Workflow YAML file
#[derive(Parser, Debug)]
#[command(
    name = "action-validator",
    about = "A validator for GitHub Action and Workflow YAML files",
    version,
    arg_required_else_help = true
)]
struct Args {
    /// Be more verbose
    #[arg(short, long)]
    verbose: bool,

    /// Input file
    #[arg(value_name = "path_to_action_yaml")]
    path: PathBuf,
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            // Help and version go to stdout; everything else is a usage error.
            let _ = err.print();
            return match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };

    let default_level = if args.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    validate_file(&args.path)
}

fn validate_file(path: &Path) -> ExitCode {
    if !path.exists() {
        eprintln!("File not found: {}", path.display());
        return ExitCode::FAILURE;
    }

    let src = match fs::read_to_string(path) {
        Ok(src) => src,
        Err(err) => {
            eprintln!("Unable to read file: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let action_type = ActionType::from_path(path);
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| "file".to_string());
    match action_type {
        ActionType::Action => info!("Treating {} as an Action definition", file_name),
        ActionType::Workflow => info!("Treating {} as a Workflow definition", file_name),
    }

    let state = BuiltinValidator::new().validate(action_type, &src);
    if state.is_valid() {
        return ExitCode::SUCCESS;
    }

    match serde_json::to_string_pretty(&state) {
        Ok(json) => eprintln!("{}", json),
        Err(err) => eprintln!("Unable to serialize validation state: {}", err),
    }
    ExitCode::FAILURE
}
