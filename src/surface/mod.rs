//! Text surface abstraction
//!
//! The formatting core never talks to a GUI widget directly. It drives a
//! [`TextSurface`], the narrow interface the host text widget exposes:
//! selection queries, character-format reads and writes, paragraph alignment,
//! whole-text access, and the global display font. The production
//! implementation is [`buffer::RichBuffer`]; tests drive the same trait.

pub mod buffer;

pub use buffer::RichBuffer;

use crate::format::state::{Alignment, CharFormat, FormatPatch};

// ─────────────────────────────────────────────────────────────────────────────
// Selection Context
// ─────────────────────────────────────────────────────────────────────────────

/// The current selection state of the surface.
///
/// This is a transient view, queried fresh on every intent and never cached
/// across UI events: the underlying text can change between events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionContext {
    /// A non-empty selection of `[start, end)` in character indices.
    Selection { start: usize, end: usize },
    /// A collapsed caret at the given character index.
    Caret(usize),
}

// ─────────────────────────────────────────────────────────────────────────────
// Display Font
// ─────────────────────────────────────────────────────────────────────────────

/// The surface's global default display font.
///
/// Zoom operates on this font, never on per-character formats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontSpec {
    /// Font family name (None uses the toolkit default)
    pub family: Option<String>,
    /// Point size; zoom keeps this at 1 or above
    pub point_size: u32,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            family: None,
            point_size: 14,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Text Surface Trait
// ─────────────────────────────────────────────────────────────────────────────

/// The editable rich-text widget as seen by the formatting core.
///
/// Injected into the controller at construction so the core can be exercised
/// against an in-memory surface instead of a live widget.
pub trait TextSurface {
    /// The current selection, or `None` when the surface has no caret
    /// (e.g. an empty, never-focused document).
    fn selection(&self) -> Option<SelectionContext>;

    /// The character format at the selection anchor.
    ///
    /// Policy: a selection's representative format is the format of the run
    /// containing the selection start, not a merge across runs.
    fn format_at_anchor(&self) -> CharFormat;

    /// The caret's pending format: what the next typed character adopts.
    fn pending_format(&self) -> CharFormat;

    /// Replace the caret's pending format.
    fn set_pending_format(&mut self, format: CharFormat);

    /// Merge a partial format onto every run inside `[start, end)`.
    ///
    /// Fields the patch leaves unset keep their per-run values.
    fn merge_format(&mut self, start: usize, end: usize, patch: &FormatPatch);

    /// The alignment of the paragraph at the caret (or selection start).
    /// Without a caret, the first paragraph's alignment.
    fn alignment(&self) -> Alignment;

    /// Set the alignment of every paragraph the caret or selection touches.
    /// Other paragraphs keep theirs. Without a caret, the first paragraph.
    fn set_alignment(&mut self, alignment: Alignment);

    /// The whole document as plain text.
    fn text(&self) -> String;

    /// Replace the whole document. Existing formatting is discarded.
    fn set_text(&mut self, text: String);

    /// The global default display font.
    fn display_font(&self) -> FontSpec;

    /// Replace the global default display font.
    fn set_display_font(&mut self, font: FontSpec);
}
