use std::path::{Path, PathBuf};
use log::debug;
use crate::components::TemplateComponent;
use crate::errors::ServeError;
use crate::services::hexdump::MAX_DISPLAY_SIZE;
use crate::services::{looks_like_text, ContentClassifier, FileService, HexDumpFormatter, MarkdownService, PathResolver};
use crate::types::{AppState, Classification, RenderRequest, RenderedPage};
use crate::utils::{base_name, escape_html, last_modified_html};

/// Outcome of the pipeline for one request
#[derive(Debug)]
pub enum Rendered {
    /// Complete HTML document
    Page(String),
    /// File to stream verbatim
    Media { path: PathBuf, mime: &'static str },
}

/// Resolves, classifies and renders a request path
pub struct RenderService {
    files: FileService,
    resolver: PathResolver,
    classifier: ContentClassifier,
    markdown: MarkdownService,
    hexdump: HexDumpFormatter,
    templates: TemplateComponent,
}

impl RenderService {
    pub fn new(files: FileService, index_file: &str, templates: TemplateComponent) -> Self {
        Self {
            resolver: PathResolver::new(files.clone(), index_file),
            classifier: ContentClassifier::new(files.clone()),
            markdown: MarkdownService::new(),
            hexdump: HexDumpFormatter::new(),
            templates,
            files,
        }
    }

    pub fn from_state(state: &AppState) -> Self {
        let files = FileService::new(state.root.as_ref().clone());
        Self::new(files, &state.config.index_file, TemplateComponent::new())
    }

    pub fn render(&self, request: RenderRequest) -> Result<Rendered, ServeError> {
        let resolution = self.resolver.resolve(&request.requested)?;
        let request = request.with_resolved(resolution.path().to_path_buf());
        let classification = self.classifier.classify(&resolution)?;
        debug!("Serving '{}' as {:?}", request.requested, classification);

        match classification {
            Classification::Markdown => self.render_markdown(&request.resolved),
            Classification::Text => self.render_text(&request.resolved),
            Classification::Binary => {
                let prefix = self.files.read_prefix(&request.resolved, MAX_DISPLAY_SIZE)?;
                let total_len = self.files.size(&request.resolved)?;
                self.render_binary(&request.resolved, &prefix, total_len)
            }
            Classification::Media(media) => {
                Ok(Rendered::Media { path: request.resolved, mime: media.mime })
            }
        }
    }

    /// Canonical path of a media file that may be opened, or `NotFound`
    pub fn media_path(&self, path: &Path) -> Result<PathBuf, ServeError> {
        self.files.confine(path).filter(|p| p.is_file()).ok_or(ServeError::NotFound)
    }

    fn render_markdown(&self, path: &Path) -> Result<Rendered, ServeError> {
        let content = self.files.read(path)?;
        let html = self.markdown.render(&String::from_utf8_lossy(&content));
        self.page(RenderedPage::new(base_name(path), html))
    }

    fn render_text(&self, path: &Path) -> Result<Rendered, ServeError> {
        let content = self.files.read(path)?;
        // The classifier only saw a prefix; anything that fails the check
        // over the whole file is shown as a dump instead.
        let text = match String::from_utf8(content) {
            Ok(text) if looks_like_text(text.as_bytes(), false) => text,
            Ok(text) => return self.demote(path, text.into_bytes()),
            Err(e) => return self.demote(path, e.into_bytes()),
        };

        let html = format!(
            "<pre style=\"white-space: pre-wrap; word-wrap: break-word;\">{}</pre>",
            escape_html(&text)
        );
        self.page(RenderedPage::new(base_name(path), html))
    }

    fn demote(&self, path: &Path, content: Vec<u8>) -> Result<Rendered, ServeError> {
        debug!("{:?} has binary content past the sniffed prefix", path);
        self.render_binary(path, &content, content.len() as u64)
    }

    fn render_binary(&self, path: &Path, prefix: &[u8], total_len: u64) -> Result<Rendered, ServeError> {
        let name = base_name(path);
        let html = self.hexdump.render(&name, prefix, total_len, &last_modified_html(path));
        self.page(RenderedPage::new(format!("{} (binary)", name), html))
    }

    fn page(&self, page: RenderedPage) -> Result<Rendered, ServeError> {
        self.templates.render_page(&page).map(Rendered::Page)
    }
}
