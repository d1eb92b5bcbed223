//! Reading instance files.

use std::path::Path;

use super::{ProblemData, RawProblemData};
use crate::error::{MclpError, Result};

/// Serialization format of an instance file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Json,
    Toml,
    Yaml,
}

impl InputFormat {
    /// Picks the format from the file extension, defaulting to JSON.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("toml") => InputFormat::Toml,
            Some("yaml") | Some("yml") => InputFormat::Yaml,
            _ => InputFormat::Json,
        }
    }

    fn label(self) -> &'static str {
        match self {
            InputFormat::Json => "JSON",
            InputFormat::Toml => "TOML",
            InputFormat::Yaml => "YAML",
        }
    }
}

impl RawProblemData {
    /// Parses a record from a string in the given format.
    pub fn from_str_as(s: &str, format: InputFormat) -> Result<Self> {
        let parsed = match format {
            InputFormat::Json => serde_json::from_str(s).map_err(|e| e.to_string()),
            InputFormat::Toml => toml::from_str(s).map_err(|e| e.to_string()),
            InputFormat::Yaml => serde_yaml::from_str(s).map_err(|e| e.to_string()),
        };
        parsed.map_err(|message| MclpError::Parse {
            format: format.label(),
            message,
        })
    }

    /// Reads a record from a file; the format follows the extension.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        Self::from_str_as(&contents, InputFormat::from_path(path))
    }
}

impl ProblemData {
    /// Reads and validates an instance file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        RawProblemData::from_file(path)?.validate()
    }

    /// Parses and validates a JSON instance.
    pub fn from_json_str(s: &str) -> Result<Self> {
        RawProblemData::from_str_as(s, InputFormat::Json)?.validate()
    }
}
