use std::borrow::Cow;
use std::path::PathBuf;
use log::warn;

/// Stylesheet compiled into the binary
pub const DEFAULT_CSS: &str = include_str!("../../static/godown.css");

/// Serves the page stylesheet, preferring a configured external file
#[derive(Clone)]
pub struct StyleService {
    custom: Option<PathBuf>,
}

impl StyleService {
    pub fn new(custom: Option<PathBuf>) -> Self {
        Self { custom }
    }

    /// Current stylesheet; an unreadable custom file falls back to the default
    pub fn stylesheet(&self) -> Cow<'static, str> {
        let Some(path) = &self.custom else {
            return Cow::Borrowed(DEFAULT_CSS);
        };
        match std::fs::read(path) {
            Ok(bytes) => Cow::Owned(String::from_utf8_lossy(&bytes).into_owned()),
            Err(e) => {
                warn!("Error reading custom CSS file {:?}: {}, falling back to embedded CSS", path, e);
                Cow::Borrowed(DEFAULT_CSS)
            }
        }
    }
}
