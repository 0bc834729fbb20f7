//! Client configuration.
//!
//! A validated struct loaded once at startup from `~/.fogbugz/cli.toml` (or
//! a path given on the command line) and passed by reference. Every section
//! is optional; missing connection settings are resolved interactively by
//! the CLI layer, everything else has a documented default.

use serde::Deserialize;
use snafu::ResultExt;
use std::fs;
use std::path::PathBuf;

use crate::error::{ConfigParseSnafu, ConfigReadSnafu, ConfigurationSnafu, Result};

/// Columns requested from a search when the configuration does not name any.
pub const DEFAULT_COLUMNS: &str =
    "ixBug,ixBugParent,ixBugChildren,fOpen,sTitle,sPersonAssignedTo,sEmailAssignedTo,sStatus";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub server: ServerConfig,
    pub user: UserConfig,
    pub output: OutputConfig,
    pub cases: CasesConfig,
    pub colors: ColorConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Base URL of the FogBugz server. Prompted for when absent.
    pub address: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UserConfig {
    pub email: Option<String>,
    pub password: Option<String>,
    /// A pre-obtained session token. When present the client never submits
    /// the password at all.
    pub token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Show a per-case progress indicator during batch mutations.
    pub progress: bool,
    /// Colorize tables and messages.
    pub colorize: bool,
    /// Print quoted delimited rows instead of tables.
    pub clean: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            progress: true,
            colorize: true,
            clean: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CasesConfig {
    /// Comma-joined column list sent with every search.
    pub default_columns: String,
}

impl Default for CasesConfig {
    fn default() -> Self {
        Self {
            default_columns: DEFAULT_COLUMNS.to_string(),
        }
    }
}

/// Color names used by the presentation layer, keyed by message level plus
/// the "Active" status highlight.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    pub error: String,
    pub warn: String,
    pub success: String,
    pub active: String,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            error: "red".to_string(),
            warn: "yellow".to_string(),
            success: "green".to_string(),
            active: "green".to_string(),
        }
    }
}

impl CliConfig {
    /// Load the configuration, falling back to defaults when no file exists.
    pub fn load(custom_path: Option<PathBuf>) -> Result<Self> {
        let path = match custom_path {
            Some(path) => path,
            None => default_path()?,
        };
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path).context(ConfigReadSnafu { path: path.clone() })?;
        toml::from_str(&content).context(ConfigParseSnafu { path })
    }

    /// The configured column list. Never empty: a blank value falls back to
    /// the built-in default so a search call is always given columns.
    pub fn default_columns(&self) -> &str {
        if self.cases.default_columns.trim().is_empty() {
            DEFAULT_COLUMNS
        } else {
            &self.cases.default_columns
        }
    }
}

fn default_path() -> Result<PathBuf> {
    let mut path = dirs::home_dir().ok_or_else(|| {
        ConfigurationSnafu {
            message: "could not determine the home directory".to_string(),
        }
        .build()
    })?;
    path.push(".fogbugz");
    path.push("cli.toml");
    Ok(path)
}
