use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Dir,
    /// Symlinked directories, sockets, devices and dangling links.
    Other,
}

/// Entry returned from directory listing
#[derive(Debug, Clone)]
pub struct Entry {
    pub path: PathBuf,
    pub kind: EntryKind,
}

impl Entry {
    /// Suffix including the leading dot (`.html`), or `None` for names like `.bashrc`.
    pub fn suffix(&self) -> Option<String> {
        self.path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| format!(".{}", ext))
    }
}

/// Trait for the file operations the rewriter needs.
pub trait FileSystem {
    fn read(&self, path: &Path) -> Result<Vec<u8>>;
    fn write(&self, path: &Path, content: &[u8]) -> Result<()>;
    fn list(&self, dir: &Path) -> Result<Vec<Entry>>;
    fn exists(&self, path: &Path) -> bool;
    fn is_dir(&self, path: &Path) -> bool;
}

/// Local filesystem implementation
pub struct LocalFs;

impl LocalFs {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFs {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for LocalFs {
    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        fs::read(path).map_err(|e| Error::from_io(e, path, "read file"))
    }

    // Plain in-place overwrite: keeps the file's inode, mode and ownership.
    fn write(&self, path: &Path, content: &[u8]) -> Result<()> {
        fs::write(path, content).map_err(|e| Error::from_io(e, path, "write file"))
    }

    fn list(&self, dir: &Path) -> Result<Vec<Entry>> {
        let entries = fs::read_dir(dir).map_err(|e| Error::from_io(e, dir, "list directory"))?;

        let mut result = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| Error::from_io(e, dir, "list directory"))?;
            let path = entry.path();
            let file_type = entry
                .file_type()
                .map_err(|e| Error::from_io(e, &path, "stat"))?;

            let kind = if file_type.is_dir() {
                EntryKind::Dir
            } else if file_type.is_file() || (file_type.is_symlink() && path.is_file()) {
                EntryKind::File
            } else {
                EntryKind::Other
            };

            result.push(Entry { path, kind });
        }

        result.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(result)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }
}

/// Convenience function to get local filesystem
pub fn local() -> LocalFs {
    LocalFs::new()
}
