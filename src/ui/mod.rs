//! UI components for Quillpad
//!
//! This module contains the toolbar and the rich-text editor view.

mod editor_view;
mod toolbar;

pub use editor_view::EditorView;
pub use toolbar::{Toolbar, ToolbarAction};
