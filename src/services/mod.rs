pub mod classifier;
pub mod file_service;
pub mod hexdump;
pub mod markdown_service;
pub mod render_service;
pub mod resolver;
pub mod style_service;

pub use classifier::{content_type_for, looks_like_text, media_type_for, ContentClassifier};
pub use file_service::FileService;
pub use hexdump::{format_hex_dump, hex_lines, HexDumpFormatter};
pub use markdown_service::MarkdownService;
pub use render_service::{RenderService, Rendered};
pub use resolver::{clean_request_path, PathResolver};
pub use style_service::StyleService;
