use crate::core::{RecordsError, Result};
use crate::export::{CsvOptions, ExportFormat};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Top-level configuration structure parsed from a TOML file.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
}

/// Export-related configuration.
#[derive(Debug, Deserialize)]
pub struct ExportConfig {
    #[serde(default)]
    pub format: ExportFormat,
    #[serde(default = "default_header")]
    pub header: bool,
    /// Text written for null cells in CSV output.
    #[serde(default)]
    pub null_text: String,
}

fn default_header() -> bool {
    true
}

impl Default for ExportConfig {
    fn default() -> Self {
        ExportConfig {
            format: ExportFormat::default(),
            header: default_header(),
            null_text: String::new(),
        }
    }
}

impl ExportConfig {
    pub fn csv_options(&self) -> CsvOptions {
        CsvOptions::with_null_text(self.null_text.clone())
    }
}

/// Database-related configuration.
#[derive(Debug, Default, Deserialize)]
pub struct DatabaseConfig {
    /// Connection URL used when none is given on the command line.
    pub url: Option<String>,
}

/// Loads configuration from a TOML file at the given path.
///
/// # Example
///
/// ```no_run
/// let config = sqlrecords::config::load_config("config.toml").expect("Failed to load config");
/// println!("{:?}", config);
/// ```
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let content = fs::read_to_string(path.as_ref())?;
    parse_config(&content)
}

/// Parses configuration from TOML text.
pub fn parse_config(content: &str) -> Result<Config> {
    toml::from_str(content).map_err(|e| RecordsError::Config(e.to_string()))
}

/// `<config dir>/sqlrecords/config.toml`, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("sqlrecords").join("config.toml"))
}

/// Loads the configuration at the default path, falling back to defaults when
/// there is no file there.
pub fn load_default_config() -> Result<Config> {
    match default_config_path() {
        Some(path) if path.exists() => {
            debug!("Loading configuration from {:?}", path);
            load_config(path)
        }
        _ => Ok(Config::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE_CONFIG: &str = r#"
[export]
format = "csv"
header = false
null_text = "NULL"

[database]
url = "file:/var/data/app.db?mode=ro"
"#;

    #[test]
    fn test_load_config_from_str() {
        let config = parse_config(SAMPLE_CONFIG).expect("Failed to parse sample config");
        assert_eq!(config.export.format, ExportFormat::Csv);
        assert!(!config.export.header);
        assert_eq!(config.export.csv_options().null_text, "NULL");
        assert_eq!(config.database.url.as_deref(), Some("file:/var/data/app.db?mode=ro"));
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.export.format, ExportFormat::Json);
        assert!(config.export.header);
        assert_eq!(config.export.null_text, "");
        assert!(config.database.url.is_none());
    }

    #[test]
    fn test_invalid_format_is_config_error() {
        let result = parse_config("[export]\nformat = \"xml\"\n");
        assert!(matches!(result, Err(RecordsError::Config(_))));
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE_CONFIG.as_bytes()).unwrap();
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.export.format, ExportFormat::Csv);
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("/nonexistent/sqlrecords.toml");
        assert!(matches!(result, Err(RecordsError::Io(_))));
    }
}
