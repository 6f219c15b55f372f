//! File I/O primitives with consistent error handling.

use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

/// Read file contents with standardized error handling.
///
/// Wraps `fs::read_to_string` with consistent `Error::internal_io` formatting.
pub fn read_file(path: &Path, operation: &str) -> Result<String> {
    fs::read_to_string(path)
        .map_err(|e| Error::internal_io(e.to_string(), Some(operation.to_string())))
}

/// Read a rule spec from an inline string, a file (`@path`), or stdin (`-`).
pub fn read_spec_to_string(spec: &str) -> Result<String> {
    use std::io::{IsTerminal, Read};

    if spec.trim() == "-" {
        let mut buf = String::new();
        let mut stdin = std::io::stdin();
        if stdin.is_terminal() {
            return Err(Error::validation_invalid_argument(
                "rules",
                "Cannot read rules from stdin when stdin is a TTY",
                None,
                None,
            ));
        }
        stdin
            .read_to_string(&mut buf)
            .map_err(|e| Error::internal_io(e.to_string(), Some("read stdin".to_string())))?;
        return Ok(buf);
    }

    if let Some(path) = spec.strip_prefix('@') {
        if path.trim().is_empty() {
            return Err(Error::validation_invalid_argument(
                "rules",
                "Invalid rules spec '@' (missing file path)",
                None,
                None,
            ));
        }
        let path = crate::expand::expand_path(path);
        return read_file(&path, &format!("read {}", path.display()));
    }

    Ok(spec.to_string())
}
