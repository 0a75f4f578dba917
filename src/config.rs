//! Configuration management with environment variable support.
//!
//! This module provides centralized configuration for the snapshot harness,
//! supporting:
//! - Environment variables for all configurable values
//! - Sensible defaults matching the conventional fixture layout
//!
//! # Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `ACTION_VALIDATOR_FIXTURE_DIR` | Root directory holding one subdirectory per test case | `test` |
//! | `ACTION_VALIDATOR_SNAPSHOT_FILE` | File name of the persisted snapshot in each case | `validation_state.snap.json` |
//! | `ACTION_VALIDATOR_COLOR` | Colored output: `auto`, `always` or `never` | `auto` |
//!
//! `NO_COLOR` is honoured when the color mode is `auto`.

use clap::ValueEnum;
use std::env;
use std::io::IsTerminal;
use std::sync::OnceLock;

// ============================================================================
// Default Values
// ============================================================================

/// Default fixture root, relative to the working directory
pub const DEFAULT_FIXTURE_DIR: &str = "test";

/// Default snapshot file name inside each test case directory
pub const DEFAULT_SNAPSHOT_FILE: &str = "validation_state.snap.json";

/// Default color mode
pub const DEFAULT_COLOR: ColorMode = ColorMode::Auto;

// ============================================================================
// Environment Variable Names
// ============================================================================

/// Environment variable for the fixture root
pub const ENV_FIXTURE_DIR: &str = "ACTION_VALIDATOR_FIXTURE_DIR";

/// Environment variable for the snapshot file name
pub const ENV_SNAPSHOT_FILE: &str = "ACTION_VALIDATOR_SNAPSHOT_FILE";

/// Environment variable for the color mode
pub const ENV_COLOR: &str = "ACTION_VALIDATOR_COLOR";

/// Conventional opt-out of colored output
pub const ENV_NO_COLOR: &str = "NO_COLOR";

// ============================================================================
// Color Mode
// ============================================================================

/// When to emit ANSI styling
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Color when stdout is a terminal and `NO_COLOR` is unset
    Auto,
    /// Always color
    Always,
    /// Never color
    Never,
}

impl ColorMode {
    /// Parse a mode name, case-insensitively
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "auto" => Some(ColorMode::Auto),
            "always" => Some(ColorMode::Always),
            "never" => Some(ColorMode::Never),
            _ => None,
        }
    }

    /// Decide whether to color, given whether output goes to a terminal
    pub fn enabled(self, is_terminal: bool) -> bool {
        match self {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => is_terminal && env::var_os(ENV_NO_COLOR).is_none(),
        }
    }

    /// Decide against the process stdout
    pub fn enabled_for_stdout(self) -> bool {
        self.enabled(std::io::stdout().is_terminal())
    }
}

// ============================================================================
// Configuration Getters (with caching)
// ============================================================================

static CONFIG: OnceLock<Config> = OnceLock::new();

/// Get the global configuration (initialized from environment on first access)
pub fn get() -> &'static Config {
    CONFIG.get_or_init(Config::from_env)
}

/// Centralized configuration for the harness
#[derive(Debug, Clone)]
pub struct Config {
    /// Fixture layout settings
    pub fixtures: FixtureSettings,
    /// Output settings
    pub output: OutputSettings,
}

/// Where fixtures live and how snapshots are named
#[derive(Debug, Clone)]
pub struct FixtureSettings {
    /// Root directory with one subdirectory per case
    pub root_dir: String,
    /// Snapshot file name inside each case
    pub snapshot_file: String,
}

/// Terminal output settings
#[derive(Debug, Clone)]
pub struct OutputSettings {
    /// Color mode
    pub color: ColorMode,
}

impl Config {
    /// Create configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        Self {
            fixtures: FixtureSettings::from_env(),
            output: OutputSettings::from_env(),
        }
    }

    /// Create configuration with all defaults (ignoring environment)
    pub fn defaults() -> Self {
        Self {
            fixtures: FixtureSettings::defaults(),
            output: OutputSettings::defaults(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

impl FixtureSettings {
    pub fn from_env() -> Self {
        Self {
            root_dir: env::var(ENV_FIXTURE_DIR).unwrap_or_else(|_| DEFAULT_FIXTURE_DIR.to_string()),
            snapshot_file: env::var(ENV_SNAPSHOT_FILE)
                .unwrap_or_else(|_| DEFAULT_SNAPSHOT_FILE.to_string()),
        }
    }

    pub fn defaults() -> Self {
        Self {
            root_dir: DEFAULT_FIXTURE_DIR.to_string(),
            snapshot_file: DEFAULT_SNAPSHOT_FILE.to_string(),
        }
    }
}

impl OutputSettings {
    pub fn from_env() -> Self {
        Self {
            color: env::var(ENV_COLOR)
                .ok()
                .and_then(|s| ColorMode::parse(&s))
                .unwrap_or(DEFAULT_COLOR),
        }
    }

    pub fn defaults() -> Self {
        Self { color: DEFAULT_COLOR }
    }
}
