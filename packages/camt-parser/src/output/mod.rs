//! Generic tree output and its text rendering.

mod tree;
mod writer;

pub use tree::{to_tree, ToTree};
pub use writer::{render, render_json, write_output, OutputFormat};
