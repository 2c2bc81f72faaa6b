//! godown - serve a directory of Markdown documents as HTML
//!
//! Requests flow through a small pipeline: the path resolver maps a request
//! onto a file, the classifier picks one of four rendering strategies
//! (Markdown, media passthrough, text, hex dump) and the render service
//! produces the response body.

pub mod components;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod logger;
pub mod services;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use config::{Cli, Config};
pub use errors::ServeError;
pub use handlers::create_app;
pub use types::{AppState, Classification, HexDumpLine, MediaType, RenderRequest, RenderedPage, Resolution};
pub use services::{ContentClassifier, FileService, HexDumpFormatter, MarkdownService, PathResolver, RenderService, StyleService};
pub use components::TemplateComponent;

// Re-export utility functions
pub use utils::{escape_attr, escape_html, format_bytes};
