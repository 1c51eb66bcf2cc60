//! Rendering of analysis results to JSON and Markdown.

mod json;
mod markdown;

pub use json::{to_json, JsonFormat};
pub use markdown::outline_to_markdown;
