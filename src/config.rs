//! Run configuration: where archives come from and where things land.
//!
//! Every key is optional; an absent config file or an empty one yields the
//! stock Kaizen sources.  Per-run switches (target directory, overwrite,
//! dry run) come from the command line, not from this file.
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;

/// Placeholder in [`VendorTool::args`] replaced with the vendor directory.
pub const DIR_PLACEHOLDER: &str = "{dir}";

/// Complete run configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Primary (project) archive.
    pub project: ProjectSource,
    /// Secondary archive providing the base stylesheet.
    pub stylesheet: StylesheetSource,
    /// External vendor library installer.
    pub vendor: VendorTool,
}

/// Primary archive location and layout.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectSource {
    /// URL of the zip archive.
    pub url: String,
    /// Name of the archive's single top-level folder.
    pub root_folder: String,
    /// File extension of the manifest resource inside `root_folder`.
    pub manifest_extension: String,
}

impl Default for ProjectSource {
    fn default() -> Self {
        Self {
            url: "https://codeload.github.com/Wixel/Kaizen/zip/master".to_string(),
            root_folder: "Kaizen-master".to_string(),
            manifest_extension: "yml".to_string(),
        }
    }
}

impl ProjectSource {
    /// Human-readable pattern of the manifest resource, e.g. `Kaizen-master/*.yml`.
    #[must_use]
    pub fn manifest_pattern(&self) -> String {
        format!("{}/*.{}", self.root_folder, self.manifest_extension)
    }
}

/// Secondary archive and the one entry taken from it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StylesheetSource {
    /// URL of the zip archive.
    pub url: String,
    /// Exact internal path of the entry to install.
    pub entry: String,
    /// Destination relative to the target directory.
    pub destination: PathBuf,
}

impl Default for StylesheetSource {
    fn default() -> Self {
        Self {
            url: "https://codeload.github.com/necolas/normalize.css/zip/master".to_string(),
            entry: "normalize.css-master/normalize.css".to_string(),
            destination: PathBuf::from("scss/vendor/_normalize.scss"),
        }
    }
}

/// External command that installs the vendor asset library.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VendorTool {
    /// Vendor directory relative to the target directory.
    pub directory: PathBuf,
    /// Program to run.
    pub program: String,
    /// Arguments; [`DIR_PLACEHOLDER`] is replaced with the vendor directory.
    pub args: Vec<String>,
}

impl Default for VendorTool {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("scss/vendor/"),
            program: "bourbon".to_string(),
            args: vec![
                "install".to_string(),
                "--path".to_string(),
                DIR_PLACEHOLDER.to_string(),
            ],
        }
    }
}

impl VendorTool {
    /// Arguments with the placeholder expanded to `vendor_dir`.
    #[must_use]
    pub fn command_args(&self, vendor_dir: &Path) -> Vec<String> {
        let dir = vendor_dir.display().to_string();
        self.args
            .iter()
            .map(|arg| arg.replace(DIR_PLACEHOLDER, &dir))
            .collect()
    }
}

/// Load the configuration from `path`, or the defaults when no path is given.
///
/// # Errors
///
/// Returns [`ConfigError::Read`] if the file cannot be read and
/// [`ConfigError::Parse`] if it is not valid for the schema.
pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&content).map_err(|message| ConfigError::Parse {
        path: path.to_path_buf(),
        message,
    })
}

/// Parse configuration from TOML text.
///
/// # Errors
///
/// Returns the parser message if `content` is not valid for the schema.
pub fn parse(content: &str) -> Result<Config, String> {
    toml::from_str(content).map_err(|e| e.message().to_string())
}

/// Resolve the installation target to an absolute, existing directory.
///
/// # Errors
///
/// Returns [`ConfigError::TargetMissing`] if `dir` is not an existing directory.
pub fn resolve_target(dir: &Path) -> Result<PathBuf, ConfigError> {
    if !dir.is_dir() {
        return Err(ConfigError::TargetMissing(dir.to_path_buf()));
    }
    dunce::canonicalize(dir).map_err(|_| ConfigError::TargetMissing(dir.to_path_buf()))
}
