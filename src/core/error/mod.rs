use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigInvalidJson,
    ConfigInvalidValue,

    ValidationInvalidArgument,
    ValidationInvalidJson,

    PresetNotFound,

    RewriteRootNotFound,
    RewriteDecodeFailed,
    RewriteEncodeFailed,
    RewritePermissionDenied,

    InternalIoError,
    InternalJsonError,
    InternalUnexpected,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ConfigInvalidJson => "config.invalid_json",
            ErrorCode::ConfigInvalidValue => "config.invalid_value",

            ErrorCode::ValidationInvalidArgument => "validation.invalid_argument",
            ErrorCode::ValidationInvalidJson => "validation.invalid_json",

            ErrorCode::PresetNotFound => "preset.not_found",

            ErrorCode::RewriteRootNotFound => "rewrite.root_not_found",
            ErrorCode::RewriteDecodeFailed => "rewrite.decode_failed",
            ErrorCode::RewriteEncodeFailed => "rewrite.encode_failed",
            ErrorCode::RewritePermissionDenied => "rewrite.permission_denied",

            ErrorCode::InternalIoError => "internal.io_error",
            ErrorCode::InternalJsonError => "internal.json_error",
            ErrorCode::InternalUnexpected => "internal.unexpected",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hint {
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct Error {
    pub code: ErrorCode,
    pub message: String,
    pub details: Value,
    pub hints: Vec<Hint>,
}

pub type Result<T> = std::result::Result<T, Error>;

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigInvalidValueDetails {
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    pub problem: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvalidArgumentDetails {
    pub field: String,
    pub problem: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tried: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotFoundDetails {
    pub id: String,
}

/// Details attached to every error raised while touching a file under the root.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileErrorDetails {
    pub path: String,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoding: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalIoErrorDetails {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalJsonErrorDetails {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

fn to_details<T: Serialize>(details: T) -> Value {
    serde_json::to_value(details).unwrap_or_else(|_| Value::Object(serde_json::Map::new()))
}

impl Error {
    pub fn new(code: ErrorCode, message: impl Into<String>, details: Value) -> Self {
        Self {
            code,
            message: message.into(),
            details,
            hints: Vec::new(),
        }
    }

    pub fn validation_invalid_argument(
        field: impl Into<String>,
        problem: impl Into<String>,
        id: Option<String>,
        tried: Option<Vec<String>>,
    ) -> Self {
        let details = to_details(InvalidArgumentDetails {
            field: field.into(),
            problem: problem.into(),
            id,
            tried,
        });

        Self::new(
            ErrorCode::ValidationInvalidArgument,
            "Invalid argument",
            details,
        )
    }

    pub fn validation_invalid_json(
        err: serde_json::Error,
        context: Option<String>,
        input: Option<String>,
    ) -> Self {
        let details = serde_json::json!({
            "error": err.to_string(),
            "context": context,
            "input": input,
        });

        Self::new(ErrorCode::ValidationInvalidJson, "Invalid JSON", details)
    }

    pub fn config_invalid_json(path: impl Into<String>, err: serde_json::Error) -> Self {
        let details = serde_json::json!({
            "path": path.into(),
            "error": err.to_string(),
        });

        Self::new(
            ErrorCode::ConfigInvalidJson,
            "Invalid JSON in configuration",
            details,
        )
        .with_hint("Run 'mediaref config reset' to restore built-in defaults")
    }

    pub fn config_invalid_value(
        key: impl Into<String>,
        value: Option<String>,
        problem: impl Into<String>,
    ) -> Self {
        let details = to_details(ConfigInvalidValueDetails {
            key: key.into(),
            value,
            problem: problem.into(),
        });

        Self::new(
            ErrorCode::ConfigInvalidValue,
            "Invalid configuration value",
            details,
        )
    }

    pub fn preset_not_found(id: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::PresetNotFound,
            "Preset not found",
            to_details(NotFoundDetails { id: id.into() }),
        )
        .with_hint("Run 'mediaref presets' to see available presets")
    }

    pub fn rewrite_root_not_found(root: &Path) -> Self {
        Self::new(
            ErrorCode::RewriteRootNotFound,
            format!("Root directory not found: {}", root.display()),
            to_details(NotFoundDetails {
                id: root.display().to_string(),
            }),
        )
        .with_hint("Pass --path to point at the site root")
    }

    pub fn rewrite_decode_failed(path: &Path, encoding: &str, error: impl Into<String>) -> Self {
        Self::file_error(
            ErrorCode::RewriteDecodeFailed,
            format!("Cannot decode {} as {}", path.display(), encoding),
            path,
            error,
            Some(encoding),
        )
    }

    pub fn rewrite_encode_failed(path: &Path, encoding: &str, error: impl Into<String>) -> Self {
        Self::file_error(
            ErrorCode::RewriteEncodeFailed,
            format!("Cannot encode rewritten {} as {}", path.display(), encoding),
            path,
            error,
            Some(encoding),
        )
    }

    pub fn rewrite_permission_denied(path: &Path, error: impl Into<String>) -> Self {
        Self::file_error(
            ErrorCode::RewritePermissionDenied,
            format!("Permission denied: {}", path.display()),
            path,
            error,
            None,
        )
    }

    fn file_error(
        code: ErrorCode,
        message: String,
        path: &Path,
        error: impl Into<String>,
        encoding: Option<&str>,
    ) -> Self {
        let details = to_details(FileErrorDetails {
            path: path.display().to_string(),
            error: error.into(),
            encoding: encoding.map(str::to_string),
        });
        Self::new(code, message, details)
    }

    /// Map an I/O failure on `path` into the rewrite taxonomy.
    pub fn from_io(err: std::io::Error, path: &Path, operation: &str) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::internal_io(
                format!("File not found: {}", path.display()),
                Some(operation.to_string()),
            ),
            std::io::ErrorKind::PermissionDenied => {
                Self::rewrite_permission_denied(path, err.to_string())
            }
            _ => Self::internal_io(
                err.to_string(),
                Some(format!("{} {}", operation, path.display())),
            ),
        }
    }

    pub fn internal_io(error: impl Into<String>, context: Option<String>) -> Self {
        let details = to_details(InternalIoErrorDetails {
            error: error.into(),
            context,
        });

        Self::new(ErrorCode::InternalIoError, "IO error", details)
    }

    pub fn internal_json(error: impl Into<String>, context: Option<String>) -> Self {
        let details = to_details(InternalJsonErrorDetails {
            error: error.into(),
            context,
        });

        Self::new(ErrorCode::InternalJsonError, "JSON error", details)
    }

    pub fn internal_unexpected(error: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::InternalUnexpected,
            "Unexpected error",
            serde_json::json!({ "error": error.into() }),
        )
    }

    pub fn with_hint(mut self, message: impl Into<String>) -> Self {
        self.hints.push(Hint {
            message: message.into(),
        });
        self
    }
}
