use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};
use log::{debug, warn};
use crate::errors::ServeError;

/// Filesystem access confined to the served root
#[derive(Clone)]
pub struct FileService {
    root: PathBuf,
}

impl FileService {
    /// Create a new file service; `root` should already be canonical
    pub fn new(root: PathBuf) -> Self {
        debug!("Creating FileService with root: {:?}", root);
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Join a cleaned relative path onto the root
    pub fn join(&self, relative: &str) -> PathBuf {
        if relative.is_empty() {
            self.root.clone()
        } else {
            self.root.join(relative)
        }
    }

    /// Canonical form of `path` if it exists and stays under the root.
    ///
    /// Symlinks are followed, so a link pointing outside the root is refused.
    pub fn confine(&self, path: &Path) -> Option<PathBuf> {
        let canonical = fs::canonicalize(path).ok()?;
        if canonical.starts_with(&self.root) {
            Some(canonical)
        } else {
            warn!("Refusing path outside served root: {:?}", path);
            None
        }
    }

    /// Check if a regular file exists at `path` inside the root
    pub fn file_exists(&self, path: &Path) -> bool {
        let exists = self.confine(path).map(|p| p.is_file()).unwrap_or(false);
        debug!("File exists check: {:?} -> {}", path, exists);
        exists
    }

    /// Read the whole file
    pub fn read(&self, path: &Path) -> Result<Vec<u8>, ServeError> {
        let confined = self.confine(path).ok_or(ServeError::NotFound)?;
        let bytes = fs::read(&confined).map_err(|e| {
            warn!("Failed to read file {:?}: {}", confined, e);
            ServeError::NotFound
        })?;
        debug!("Read file {:?}, {} bytes", confined, bytes.len());
        Ok(bytes)
    }

    /// Length of the file in bytes
    pub fn size(&self, path: &Path) -> Result<u64, ServeError> {
        let confined = self.confine(path).ok_or(ServeError::NotFound)?;
        Ok(fs::metadata(&confined)?.len())
    }

    /// Read at most `limit` bytes from the start of the file
    pub fn read_prefix(&self, path: &Path, limit: usize) -> Result<Vec<u8>, ServeError> {
        let confined = self.confine(path).ok_or(ServeError::NotFound)?;
        let file = File::open(&confined)?;
        let mut buf = Vec::with_capacity(limit);
        file.take(limit as u64).read_to_end(&mut buf)?;
        Ok(buf)
    }
}
