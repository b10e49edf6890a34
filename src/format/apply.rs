//! Selection-aware format application
//!
//! Every character-format mutation funnels through [`apply_char_patch`]. It
//! queries the surface's selection fresh, resolves the patch against the
//! format that governs the edit (anchor format for a selection, pending
//! format for a caret), and routes the patch to the right place:
//!
//! - selection: merge onto the selected range, leaving the rest untouched
//! - caret: fold into the pending format so only future typing is affected
//! - no caret at all: nothing to do
//!
//! Alignment never takes the pending route: it is applied directly to the
//! paragraphs the caret or selection touches.

use crate::format::state::{Alignment, CharFormat, FormatPatch};
use crate::surface::{SelectionContext, TextSurface};

/// Apply a character-format change to the surface.
///
/// `resolve` turns the governing format into a patch. Toggles use it to read
/// the current value; absolute setters ignore their argument.
pub fn apply_char_patch<S, F>(surface: &mut S, resolve: F)
where
    S: TextSurface + ?Sized,
    F: FnOnce(&CharFormat) -> FormatPatch,
{
    match surface.selection() {
        Some(SelectionContext::Selection { start, end }) => {
            let anchor = surface.format_at_anchor();
            let patch = resolve(&anchor);
            if patch.is_empty() {
                return;
            }
            surface.merge_format(start, end, &patch);
            // Typing after the change continues the merged style.
            let pending = surface.pending_format().with(&patch);
            surface.set_pending_format(pending);
        }
        Some(SelectionContext::Caret(_)) => {
            let current = surface.pending_format();
            let patch = resolve(&current);
            if patch.is_empty() {
                return;
            }
            surface.set_pending_format(current.with(&patch));
        }
        // No caret: nothing governs the change, so it has no target.
        None => {}
    }
}

/// Apply a paragraph alignment to the paragraphs the caret or selection
/// touches. Never degrades to pending semantics; a caret is enough.
pub fn apply_alignment<S>(surface: &mut S, alignment: Alignment)
where
    S: TextSurface + ?Sized,
{
    surface.set_alignment(alignment);
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
