use crate::error::{Error, Result};
use std::env;
use std::path::PathBuf;

/// Base mediaref config directory (~/.config/mediaref/, %APPDATA%\mediaref on Windows)
pub fn mediaref() -> Result<PathBuf> {
    #[cfg(windows)]
    {
        let appdata = env::var("APPDATA").map_err(|_| {
            Error::internal_unexpected(
                "APPDATA environment variable not set on Windows".to_string(),
            )
        })?;
        Ok(PathBuf::from(appdata).join("mediaref"))
    }

    #[cfg(not(windows))]
    {
        let home = env::var("HOME").map_err(|_| {
            Error::internal_unexpected(
                "HOME environment variable not set on Unix-like system".to_string(),
            )
        })?;
        Ok(PathBuf::from(home).join(".config").join("mediaref"))
    }
}

/// Global mediaref.json config file path
pub fn mediaref_json() -> Result<PathBuf> {
    Ok(mediaref()?.join("mediaref.json"))
}
