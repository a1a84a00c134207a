//! Configuration files in JSON or TOML.

use std::fmt;
use std::path::Path;

use colsense_model::Configuration;

use crate::error::{IngestError, Result, read_error};

/// On-disk configuration format, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    /// Format for `path`: `.toml` is TOML, `.json` is JSON.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_lowercase();
        match extension.as_str() {
            "json" => Ok(ConfigFormat::Json),
            "toml" => Ok(ConfigFormat::Toml),
            _ => Err(IngestError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension,
            }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigFormat::Json => "json",
            ConfigFormat::Toml => "toml",
        }
    }
}

impl fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Loads a configuration file.
///
/// Sections missing from the file are empty and `merge_with_default`
/// defaults to true.
pub fn load_configuration(path: &Path) -> Result<Configuration> {
    let format = ConfigFormat::from_path(path)?;
    let content = std::fs::read_to_string(path).map_err(|e| read_error(path, e))?;
    let config: Configuration = match format {
        ConfigFormat::Json => serde_json::from_str(&content).map_err(|e| IngestError::JsonParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?,
        ConfigFormat::Toml => toml::from_str(&content).map_err(|e| IngestError::TomlParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?,
    };
    tracing::info!(
        path = %path.display(),
        direct = config.direct_mappings.len(),
        context = config.context_mappings.len(),
        classifiers = config.classifiers.len(),
        "Loaded configuration"
    );
    Ok(config)
}

/// Renders a configuration in `format`.
pub fn render_configuration(config: &Configuration, format: ConfigFormat) -> Result<String> {
    match format {
        ConfigFormat::Json => serde_json::to_string_pretty(config).map_err(|e| IngestError::Serialize {
            message: e.to_string(),
        }),
        ConfigFormat::Toml => toml::to_string_pretty(config).map_err(|e| IngestError::Serialize {
            message: e.to_string(),
        }),
    }
}

/// Writes a configuration, in the format given by the file extension.
pub fn write_configuration(config: &Configuration, path: &Path) -> Result<ConfigFormat> {
    let format = ConfigFormat::from_path(path)?;
    let content = render_configuration(config, format)?;
    std::fs::write(path, content).map_err(|e| IngestError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })?;
    tracing::info!(path = %path.display(), format = %format, "Saved configuration");
    Ok(format)
}
