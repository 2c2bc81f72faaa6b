use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::Config;
use crate::errors::ServeError;

/// Stylesheet route shared by every rendered page
pub const STYLE_ROUTE: &str = "/__godown_style.css";

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub root: Arc<PathBuf>,
}

impl AppState {
    /// Build state from configuration, canonicalising the served root once
    pub fn new(config: Config) -> Result<Self, ServeError> {
        let root = std::fs::canonicalize(&config.root).map_err(|e| {
            ServeError::InvalidConfig(format!("cannot serve {:?}: {}", config.root, e))
        })?;
        if !root.is_dir() {
            return Err(ServeError::InvalidConfig(format!("{:?} is not a directory", root)));
        }
        Ok(Self { config: Arc::new(config), root: Arc::new(root) })
    }
}

/// A single request travelling through the pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRequest {
    /// Percent-decoded request path, not yet cleaned
    pub requested: String,
    /// Filesystem path once resolved; empty before
    pub resolved: PathBuf,
}

impl RenderRequest {
    pub fn new(requested: impl Into<String>) -> Self {
        Self { requested: requested.into(), resolved: PathBuf::new() }
    }

    pub fn with_resolved(self, resolved: PathBuf) -> Self {
        Self { resolved, ..self }
    }
}

/// A recognised media extension: being in the table makes it media, and it
/// always carries its MIME type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MediaType {
    pub mime: &'static str,
}

/// How the resolver reached a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Media extension; existence is checked when the file is opened
    Media { path: PathBuf, media: MediaType },
    /// Non-Markdown request that exists as-is
    Direct(PathBuf),
    /// Reached through the `.md` candidate
    Markdown(PathBuf),
    /// Reached through `<dir>/README.md`
    DirectoryReadme(PathBuf),
}

impl Resolution {
    pub fn path(&self) -> &Path {
        match self {
            Resolution::Media { path, .. } => path,
            Resolution::Direct(path) | Resolution::Markdown(path) | Resolution::DirectoryReadme(path) => path,
        }
    }
}

/// Rendering strategy chosen for a resolved path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Markdown,
    Media(MediaType),
    Text,
    Binary,
}

/// One line of a hex dump
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HexDumpLine<'a> {
    pub offset: usize,
    pub bytes: &'a [u8],
}

impl HexDumpLine<'_> {
    /// ASCII column: printable bytes as themselves, everything else as `.`
    pub fn ascii(&self) -> impl Iterator<Item = char> + '_ {
        self.bytes
            .iter()
            .map(|&b| if (0x20..=0x7e).contains(&b) { b as char } else { '.' })
    }
}

/// Page handed to the template component
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    pub title: String,
    pub content: String,
    pub style_path: &'static str,
}

impl RenderedPage {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self { title: title.into(), content: content.into(), style_path: STYLE_ROUTE }
    }
}
