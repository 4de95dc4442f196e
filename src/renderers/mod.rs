// workorder-generation-service/src/renderers/mod.rs

mod docx;
mod html;
mod markdown;

pub use docx::DocxRenderer;
pub use html::HtmlRenderer;
pub use markdown::MarkdownRenderer;
