use log::{debug, warn};
use crate::errors::ServeError;
use crate::services::{media_type_for, FileService};
use crate::types::Resolution;

const README: &str = "README.md";

/// Clean a request path without touching the filesystem.
///
/// Collapses `.`, `..` and duplicate separators. Returns `None` when a `..`
/// would climb above the root or a segment could be reinterpreted by the
/// filesystem (backslash, NUL).
pub fn clean_request_path(req_path: &str) -> Option<String> {
    let mut parts: Vec<&str> = Vec::new();
    for part in req_path.split('/') {
        match part {
            "" | "." => continue,
            ".." => {
                parts.pop()?;
            }
            seg if seg.contains('\\') || seg.contains('\0') => return None,
            seg => parts.push(seg),
        }
    }
    Some(parts.join("/"))
}

/// Maps request paths onto files through the fallback chain:
/// exact file, `.md` suffix, then `<dir>/README.md`.
pub struct PathResolver {
    files: FileService,
    index_file: String,
}

impl PathResolver {
    pub fn new(files: FileService, index_file: impl Into<String>) -> Self {
        Self { files, index_file: index_file.into() }
    }

    pub fn resolve(&self, req_path: &str) -> Result<Resolution, ServeError> {
        let req_path = if req_path.trim_matches('/').is_empty() {
            self.index_file.as_str()
        } else {
            req_path
        };

        let Some(cleaned) = clean_request_path(req_path) else {
            warn!("Rejected traversal attempt: '{}'", req_path);
            return Err(ServeError::NotFound);
        };
        if cleaned.is_empty() {
            return Err(ServeError::NotFound);
        }
        debug!("Resolving '{}' (cleaned: '{}')", req_path, cleaned);

        let direct = self.files.join(&cleaned);
        if let Some(media) = media_type_for(&direct) {
            return Ok(Resolution::Media { path: direct, media });
        }

        let candidate = if cleaned.ends_with(".md") {
            cleaned
        } else {
            if self.files.file_exists(&direct) {
                return Ok(Resolution::Direct(direct));
            }
            format!("{}.md", cleaned)
        };

        let markdown = self.files.join(&candidate);
        if self.files.file_exists(&markdown) {
            return Ok(Resolution::Markdown(markdown));
        }

        let dir = candidate.strip_suffix(".md").unwrap_or(&candidate);
        let readme = self.files.join(dir).join(README);
        if self.files.file_exists(&readme) {
            return Ok(Resolution::DirectoryReadme(readme));
        }

        debug!("No file, markdown or README match for '{}'", req_path);
        Err(ServeError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn resolver(dir: &TempDir) -> PathResolver {
        let files = FileService::new(fs::canonicalize(dir.path()).unwrap());
        PathResolver::new(files, "README.md")
    }

    fn rel(dir: &TempDir, res: &Resolution) -> String {
        let root = fs::canonicalize(dir.path()).unwrap();
        res.path().strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/")
    }

    #[test]
    fn cleaning_collapses_segments() {
        assert_eq!(clean_request_path("/a//b/./c").as_deref(), Some("a/b/c"));
        assert_eq!(clean_request_path("/a/../b").as_deref(), Some("b"));
        assert_eq!(clean_request_path("/").as_deref(), Some(""));
        assert_eq!(clean_request_path("/../etc/passwd"), None);
        assert_eq!(clean_request_path("/a/../../b"), None);
        assert_eq!(clean_request_path("/a\\..\\b"), None);
    }

    #[test]
    fn root_serves_index_document() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("README.md"), "# Home").unwrap();
        let r = resolver(&dir);
        let res = r.resolve("/").unwrap();
        assert!(matches!(res, Resolution::Markdown(_)));
        assert_eq!(rel(&dir, &res), "README.md");
    }

    #[test]
    fn custom_index_document() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("home.md"), "# Home").unwrap();
        let files = FileService::new(fs::canonicalize(dir.path()).unwrap());
        let r = PathResolver::new(files, "home.md");
        assert!(matches!(r.resolve("/").unwrap(), Resolution::Markdown(_)));
    }

    #[test]
    fn extensionless_file_wins_over_markdown() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a"), "plain").unwrap();
        fs::write(dir.path().join("a.md"), "# Markdown").unwrap();
        let r = resolver(&dir);
        let res = r.resolve("/a").unwrap();
        assert!(matches!(res, Resolution::Direct(_)));
        assert_eq!(rel(&dir, &res), "a");
    }

    #[test]
    fn md_suffix_fallback() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("guide.md"), "# Guide").unwrap();
        let r = resolver(&dir);
        let res = r.resolve("/guide").unwrap();
        assert!(matches!(res, Resolution::Markdown(_)));
        assert_eq!(rel(&dir, &res), "guide.md");
    }

    #[test]
    fn directory_readme_fallback() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("docs")).unwrap();
        fs::write(dir.path().join("docs/README.md"), "# Docs").unwrap();
        let r = resolver(&dir);
        for req in ["/docs", "/docs/", "/docs.md"] {
            let res = r.resolve(req).unwrap();
            assert!(matches!(res, Resolution::DirectoryReadme(_)), "{}", req);
            assert_eq!(rel(&dir, &res), "docs/README.md");
        }
    }

    #[test]
    fn directory_without_readme_is_not_found() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("foo")).unwrap();
        let r = resolver(&dir);
        assert!(matches!(r.resolve("/foo/"), Err(ServeError::NotFound)));
    }

    #[test]
    fn media_skips_existence_check() {
        let dir = TempDir::new().unwrap();
        let r = resolver(&dir);
        match r.resolve("/img/missing.PNG").unwrap() {
            Resolution::Media { media, .. } => assert_eq!(media.mime, "image/png"),
            other => panic!("expected media, got {:?}", other),
        }
    }

    #[test]
    fn unknown_path_is_not_found() {
        let dir = TempDir::new().unwrap();
        let r = resolver(&dir);
        assert!(matches!(r.resolve("/nothing/here"), Err(ServeError::NotFound)));
    }

    #[test]
    fn traversal_is_not_found() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("served")).unwrap();
        fs::write(dir.path().join("outside.txt"), "secret").unwrap();
        let files = FileService::new(fs::canonicalize(dir.path().join("served")).unwrap());
        let r = PathResolver::new(files, "README.md");
        assert!(matches!(r.resolve("/../outside.txt"), Err(ServeError::NotFound)));
        assert!(matches!(r.resolve("/../outside"), Err(ServeError::NotFound)));
    }
}
