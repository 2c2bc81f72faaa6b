use std::path::Path;
use log::debug;
use crate::errors::ServeError;
use crate::services::FileService;
use crate::types::{Classification, MediaType, Resolution};

/// Bytes inspected when deciding between text and binary
pub const SNIFF_LEN: usize = 512;

/// Fallback MIME type for content without a known type
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Every extension served verbatim, with its MIME type
const MEDIA_TYPES: &[(&str, &str)] = &[
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("gif", "image/gif"),
    ("bmp", "image/bmp"),
    ("webp", "image/webp"),
    ("ico", "image/x-icon"),
    ("svg", "image/svg+xml"),
    ("mp4", "video/mp4"),
    ("webm", "video/webm"),
    ("ogg", "video/ogg"),
    ("avi", "video/x-msvideo"),
    ("mov", "video/quicktime"),
    ("mkv", "video/x-matroska"),
    ("css", "text/css"),
];

/// Look up the media type for a path's extension, case-insensitively
pub fn media_type_for(path: &Path) -> Option<MediaType> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    MEDIA_TYPES
        .iter()
        .find(|(e, _)| *e == ext)
        .map(|&(_, mime)| MediaType { mime })
}

/// MIME type for a path, `application/octet-stream` when unknown
pub fn content_type_for(path: &Path) -> &'static str {
    media_type_for(path).map(|m| m.mime).unwrap_or(OCTET_STREAM)
}

/// Text heuristic: valid UTF-8 and no control bytes other than TAB, LF, CR.
///
/// With `truncated` set, a multi-byte sequence cut off at the end of the
/// buffer is accepted.
pub fn looks_like_text(bytes: &[u8], truncated: bool) -> bool {
    match std::str::from_utf8(bytes) {
        Ok(_) => {}
        Err(e) if truncated && e.error_len().is_none() => {}
        Err(_) => return false,
    }
    !bytes.iter().any(|&b| b < 0x20 && !matches!(b, b'\t' | b'\n' | b'\r'))
}

/// Decides the rendering strategy for a resolved path
pub struct ContentClassifier {
    files: FileService,
}

impl ContentClassifier {
    pub fn new(files: FileService) -> Self {
        Self { files }
    }

    pub fn classify(&self, resolution: &Resolution) -> Result<Classification, ServeError> {
        let classification = match resolution {
            Resolution::Media { media, .. } => Classification::Media(*media),
            Resolution::Markdown(_) | Resolution::DirectoryReadme(_) => Classification::Markdown,
            Resolution::Direct(path) => self.sniff(path)?,
        };
        debug!("Classified {:?} as {:?}", resolution.path(), classification);
        Ok(classification)
    }

    fn sniff(&self, path: &Path) -> Result<Classification, ServeError> {
        // One extra byte tells us whether the window cut the file short.
        let mut prefix = self.files.read_prefix(path, SNIFF_LEN + 1)?;
        let truncated = prefix.len() > SNIFF_LEN;
        prefix.truncate(SNIFF_LEN);
        Ok(if looks_like_text(&prefix, truncated) {
            Classification::Text
        } else {
            Classification::Binary
        })
    }
}
