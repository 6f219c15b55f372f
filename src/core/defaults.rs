use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::encoding::Encoding;
use crate::error::{Error, Result};
use crate::io;
use crate::paths;
use crate::rewrite::ExtensionSet;

/// Root configuration structure for mediaref.json
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MediarefConfig {
    #[serde(default)]
    pub defaults: Defaults,
}

/// All configurable defaults that can be overridden via mediaref.json
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Defaults {
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    #[serde(default)]
    pub encoding: Encoding,

    #[serde(default)]
    pub exclude: Vec<String>,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            encoding: Encoding::default(),
            exclude: Vec::new(),
        }
    }
}

impl Defaults {
    /// Configured extensions as a validated set.
    pub fn extension_set(&self) -> Result<ExtensionSet> {
        ExtensionSet::new(self.extensions.iter().cloned()).map_err(|e| {
            Error::config_invalid_value(
                "defaults.extensions",
                Some(self.extensions.join(",")),
                e.details["problem"]
                    .as_str()
                    .unwrap_or("invalid extension list")
                    .to_string(),
            )
        })
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_extensions() -> Vec<String> {
    [".html", ".md", ".js", ".css"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

// =============================================================================
// Loading functions
// =============================================================================

/// Load defaults, merging file config with built-in defaults.
/// If mediaref.json is missing or invalid, silently returns built-in defaults.
pub fn load_defaults() -> Defaults {
    load_config().defaults
}

/// Load the full mediaref.json config, falling back to defaults on any error.
pub fn load_config() -> MediarefConfig {
    let Ok(path) = paths::mediaref_json() else {
        return MediarefConfig::default();
    };
    if !path.exists() {
        return MediarefConfig::default();
    }

    load_config_from_file(&path).unwrap_or_default()
}

/// Load config from a mediaref.json file.
pub fn load_config_from_file(path: &Path) -> Result<MediarefConfig> {
    let content = io::read_file(path, &format!("read {}", path.display()))?;

    serde_json::from_str(&content)
        .map_err(|e| Error::config_invalid_json(path.display().to_string(), e))
}

/// Check if mediaref.json file exists
pub fn config_exists() -> bool {
    paths::mediaref_json()
        .map(|p| p.exists())
        .unwrap_or(false)
}

/// Delete mediaref.json file (reset to defaults)
pub fn reset_config() -> Result<bool> {
    let path = paths::mediaref_json()?;

    if path.exists() {
        std::fs::remove_file(&path).map_err(|e| {
            Error::internal_io(e.to_string(), Some(format!("delete {}", path.display())))
        })?;
        Ok(true)
    } else {
        Ok(false)
    }
}

/// Get the path to mediaref.json (for display purposes)
pub fn config_path() -> Result<String> {
    Ok(paths::mediaref_json()?.display().to_string())
}

/// Get built-in defaults (ignoring any file config)
pub fn builtin_defaults() -> Defaults {
    Defaults::default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn builtin_extensions_match_site_sources() {
        let set = builtin_defaults().extension_set().unwrap();
        assert_eq!(
            set.iter().collect::<Vec<_>>(),
            vec![".css", ".html", ".js", ".md"]
        );
        assert_eq!(builtin_defaults().encoding, Encoding::Utf8);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("mediaref.json");
        std::fs::write(
            &path,
            r#"{"defaults": {"exclude": ["node_modules/**"], "encoding": "latin-1"}}"#,
        )
        .unwrap();

        let config = load_config_from_file(&path).unwrap();
        assert_eq!(config.defaults.exclude, vec!["node_modules/**".to_string()]);
        assert_eq!(config.defaults.encoding, Encoding::Latin1);
        assert_eq!(config.defaults.extensions, default_extensions());
    }

    #[test]
    fn encoding_names_are_case_insensitive() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("mediaref.json");
        std::fs::write(
            &path,
            r#"{"defaults": {"exclude": ["vendor/**"], "encoding": "UTF-8"}}"#,
        )
        .unwrap();

        let config = load_config_from_file(&path).unwrap();
        assert_eq!(config.defaults.encoding, Encoding::Utf8);
        assert_eq!(config.defaults.exclude, vec!["vendor/**".to_string()]);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let err = load_config_from_file(&dir.path().join("mediaref.json")).unwrap_err();
        assert_eq!(err.code.as_str(), "internal.io_error");
    }

    #[test]
    fn invalid_file_is_config_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("mediaref.json");
        std::fs::write(&path, "{ nope").unwrap();

        let err = load_config_from_file(&path).unwrap_err();
        assert_eq!(err.code.as_str(), "config.invalid_json");
    }

    #[test]
    fn bad_extension_is_config_value_error() {
        let defaults = Defaults {
            extensions: vec!["html".to_string()],
            ..Defaults::default()
        };
        let err = defaults.extension_set().unwrap_err();
        assert_eq!(err.code.as_str(), "config.invalid_value");
        assert_eq!(err.details["key"], "defaults.extensions");
    }
}
