// ABOUTME: Library module for the slidewire program.
// ABOUTME: Mounts a markdown slide deck and re-highlights code blocks on slide changes.

// Reexport modules
pub mod app;
pub mod bootstrap;
pub mod config;
pub mod deck;
pub mod dom;
pub mod errors;
pub mod highlight;
pub mod source;
pub mod utils;

// Reexport common types and functions
pub use app::{AppFlags, Presentation, SlideChange};
pub use bootstrap::{initialize, Bootstrap};
pub use config::Config;
pub use deck::{export_html, Deck, Slide, SlideBlock};
pub use dom::{Document, NodeId};
pub use errors::{Result, WireError};
pub use highlight::Highlighter;
pub use source::SourceFile;

#[cfg(test)]
mod tests;
