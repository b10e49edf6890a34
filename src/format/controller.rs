//! Formatting intent dispatch
//!
//! The UI layer reduces every user action to an [`Intent`] and hands it to
//! [`dispatch`], which routes it through the selection-aware applier, the
//! zoom path, or document I/O. The controller holds no state of its own;
//! everything it needs lives on the surface it is given.

use std::path::PathBuf;

use crate::error::Result;
use crate::files;
use crate::format::apply::{apply_alignment, apply_char_patch};
use crate::format::state::{Alignment, FormatPatch, Rgb};
use crate::format::toggle::{toggle, toggle_weight};
use crate::surface::TextSurface;

/// Smallest display font size zoom-out can reach.
pub const MIN_ZOOM_POINT_SIZE: u32 = 1;

// ─────────────────────────────────────────────────────────────────────────────
// Intents
// ─────────────────────────────────────────────────────────────────────────────

/// A user action, reduced to its semantic content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Load the file at the given path, replacing the document.
    Open(PathBuf),
    /// Save the document as plain text to the given path.
    Save(PathBuf),
    /// Grow the global display font by one point.
    ZoomIn,
    /// Shrink the global display font by one point, floor 1.
    ZoomOut,
    /// Set the font family for the selection or future typing.
    FontFamily(String),
    /// Set the point size for the selection or future typing. Clamped.
    PointSize(i64),
    /// Toggle bold for the selection or future typing.
    ToggleBold,
    /// Toggle italic for the selection or future typing.
    ToggleItalic,
    /// Toggle underline for the selection or future typing.
    ToggleUnderline,
    /// Toggle strike-out for the selection or future typing.
    ToggleStrikeout,
    /// Set the text color for the selection or future typing.
    TextColor(Rgb),
    /// Set the alignment of the paragraphs the caret or selection touches.
    Align(Alignment),
}

// ─────────────────────────────────────────────────────────────────────────────
// Dispatch
// ─────────────────────────────────────────────────────────────────────────────

/// Execute an intent against the surface.
///
/// Formatting intents cannot fail; only `Open` and `Save` return errors, and
/// those are for the caller to surface as a warning, never to abort on.
pub fn dispatch<S>(surface: &mut S, intent: Intent) -> Result<()>
where
    S: TextSurface + ?Sized,
{
    match intent {
        Intent::Open(path) => {
            let text = files::read_document(&path)?;
            surface.set_text(text);
        }
        Intent::Save(path) => {
            files::write_document(&path, &surface.text())?;
        }
        Intent::ZoomIn => zoom(surface, 1),
        Intent::ZoomOut => zoom(surface, -1),
        Intent::FontFamily(family) => {
            apply_char_patch(surface, |_| FormatPatch::family(family));
        }
        Intent::PointSize(requested) => {
            apply_char_patch(surface, |_| FormatPatch::point_size(requested));
        }
        Intent::ToggleBold => {
            apply_char_patch(surface, |current| {
                FormatPatch::weight(toggle_weight(current.weight))
            });
        }
        Intent::ToggleItalic => {
            apply_char_patch(surface, |current| FormatPatch::italic(toggle(current.italic)));
        }
        Intent::ToggleUnderline => {
            apply_char_patch(surface, |current| {
                FormatPatch::underline(toggle(current.underline))
            });
        }
        Intent::ToggleStrikeout => {
            apply_char_patch(surface, |current| {
                FormatPatch::strikeout(toggle(current.strikeout))
            });
        }
        Intent::TextColor(color) => {
            apply_char_patch(surface, |_| FormatPatch::color(color));
        }
        Intent::Align(alignment) => apply_alignment(surface, alignment),
    }
    Ok(())
}

/// Step the global display font size by `delta` points, never below
/// [`MIN_ZOOM_POINT_SIZE`]. Zoom ignores the selection entirely: it changes
/// how the whole document renders, not any character format.
fn zoom<S>(surface: &mut S, delta: i32)
where
    S: TextSurface + ?Sized,
{
    let mut font = surface.display_font();
    let next = font.point_size as i64 + delta as i64;
    font.point_size = next.max(MIN_ZOOM_POINT_SIZE as i64) as u32;
    surface.set_display_font(font);
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
