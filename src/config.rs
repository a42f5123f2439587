use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{CONFIG_ENV, GENERAL_SHEET, PN_SHEET};
use crate::error::{CatalogError, Result};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub sheets: SheetNames,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

/// Names of the two required sheets
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct SheetNames {
    pub pn: String,
    pub general: String,
}

impl Default for SheetNames {
    fn default() -> Self {
        Self {
            pn: PN_SHEET.to_string(),
            general: GENERAL_SHEET.to_string(),
        }
    }
}

impl SheetNames {
    /// Sheets that are not attribute sheets
    pub fn is_reserved(&self, name: &str) -> bool {
        name == self.pn || name == self.general
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Indent the JSON output
    pub pretty: bool,
    /// Directory for derived output paths; defaults to the input file's directory
    pub directory: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// Enables the daily rolling JSON log file when set
    pub directory: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
        }
    }
}

impl Config {
    pub fn load(config_path: &Path) -> Result<Self> {
        let config_content = fs::read_to_string(config_path).map_err(|e| {
            CatalogError::Config(format!(
                "Failed to read config file '{}': {}",
                config_path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&config_content)?;
        Ok(config)
    }

    /// Load from an explicit path, then from `PN_CATALOG_CONFIG`, else defaults.
    pub fn load_or_default(config_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = config_path {
            return Self::load(path);
        }
        match std::env::var(CONFIG_ENV) {
            Ok(path) if !path.trim().is_empty() => Self::load(Path::new(path.trim())),
            _ => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.sheets.pn, "PN");
        assert_eq!(config.sheets.general, "GENERAL");
        assert!(!config.output.pretty);
        assert_eq!(config.logging.level, "info");
        assert!(config.sheets.is_reserved("PN"));
        assert!(!config.sheets.is_reserved("Size"));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            [sheets]
            pn = "Codes"

            [output]
            pretty = true
            "#,
        )
        .unwrap();
        assert_eq!(config.sheets.pn, "Codes");
        assert_eq!(config.sheets.general, "GENERAL");
        assert!(config.output.pretty);
        assert!(config.logging.directory.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[logging]\nlevel = \"debug\"").unwrap();
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_load_missing_file_is_config_error() {
        let err = Config::load(Path::new("/nonexistent/pn_catalog.toml")).unwrap_err();
        assert!(matches!(err, CatalogError::Config(_)));
    }
}
