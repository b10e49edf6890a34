//! In-memory rich-text buffer
//!
//! `RichBuffer` is the concrete [`TextSurface`]: owned text, a contiguous
//! list of format runs covering it, the caret's pending format, a
//! caret/anchor pair, the paragraph alignment, and the global display font.
//!
//! Run invariants, maintained by every mutation:
//! - runs are sorted, non-empty, and exactly cover `[0, len)`
//! - adjacent runs never carry equal formats (they are coalesced)
//! - an empty document has no runs
//! - `alignments` holds exactly one entry per newline-delimited paragraph
//!   (an empty document is one empty paragraph)

use crate::format::state::{Alignment, CharFormat, FormatPatch};
use crate::surface::{FontSpec, SelectionContext, TextSurface};

// ─────────────────────────────────────────────────────────────────────────────
// Format Run
// ─────────────────────────────────────────────────────────────────────────────

/// A maximal stretch of characters sharing one format. `[start, end)` in
/// character indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatRun {
    pub start: usize,
    pub end: usize,
    pub format: CharFormat,
}

impl FormatRun {
    fn len(&self) -> usize {
        self.end - self.start
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Rich Buffer
// ─────────────────────────────────────────────────────────────────────────────

/// The editable rich-text document.
#[derive(Debug, Clone)]
pub struct RichBuffer {
    /// Document content, one entry per character.
    chars: Vec<char>,
    /// Format runs covering the content.
    runs: Vec<FormatRun>,
    /// Format the next typed character adopts.
    pending: CharFormat,
    /// Caret position (None until the surface first gains a caret).
    caret: Option<usize>,
    /// Selection anchor; a selection exists when this differs from the caret.
    anchor: Option<usize>,
    /// Alignment per paragraph, one entry per newline-delimited paragraph.
    alignments: Vec<Alignment>,
    /// Global default display font (the zoom target).
    display_font: FontSpec,
}

impl Default for RichBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl RichBuffer {
    /// Create an empty buffer with no caret.
    pub fn new() -> Self {
        Self {
            chars: Vec::new(),
            runs: Vec::new(),
            pending: CharFormat::default(),
            caret: None,
            anchor: None,
            alignments: vec![Alignment::default()],
            display_font: FontSpec::default(),
        }
    }

    /// Create a buffer from plain text, caret at the start.
    pub fn from_text(text: &str) -> Self {
        let mut buffer = Self::new();
        buffer.set_text(text.to_string());
        buffer
    }

    /// Document length in characters.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Whether the document is empty.
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// The format runs (for rendering).
    pub fn runs(&self) -> &[FormatRun] {
        &self.runs
    }

    /// The caret position, if the surface has one.
    pub fn caret(&self) -> Option<usize> {
        self.caret
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Caret & Selection
    // ─────────────────────────────────────────────────────────────────────────

    /// Place a collapsed caret, dropping any selection.
    ///
    /// The pending format follows the caret: it becomes the format of the
    /// character left of the new position, so typing continues the
    /// surrounding style until the user toggles something.
    pub fn set_caret(&mut self, position: usize) {
        let position = position.min(self.len());
        self.caret = Some(position);
        self.anchor = None;
        self.pending = self.format_left_of(position);
    }

    /// Select `[anchor, caret)` (either order). Equal positions collapse to a
    /// caret.
    pub fn select(&mut self, anchor: usize, caret: usize) {
        let anchor = anchor.min(self.len());
        let caret = caret.min(self.len());
        if anchor == caret {
            self.set_caret(caret);
        } else {
            self.anchor = Some(anchor);
            self.caret = Some(caret);
        }
    }

    /// The format governing a caret at `position`: the character to its left,
    /// falling back to the first run, then to the pending format.
    fn format_left_of(&self, position: usize) -> CharFormat {
        if position > 0 {
            self.format_at(position - 1)
        } else if let Some(run) = self.runs.first() {
            run.format.clone()
        } else {
            self.pending.clone()
        }
    }

    /// The format of the run containing character index `index`.
    pub fn format_at(&self, index: usize) -> CharFormat {
        self.runs
            .iter()
            .find(|run| run.start <= index && index < run.end)
            .map(|run| run.format.clone())
            .unwrap_or_else(|| self.pending.clone())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Paragraphs
    // ─────────────────────────────────────────────────────────────────────────

    /// Number of paragraphs. Always at least one.
    pub fn paragraph_count(&self) -> usize {
        self.alignments.len()
    }

    /// The character range `[start, end)` of each paragraph, excluding the
    /// terminating newline.
    pub fn paragraph_ranges(&self) -> Vec<(usize, usize)> {
        let mut ranges = Vec::with_capacity(self.alignments.len());
        let mut start = 0;
        for (index, ch) in self.chars.iter().enumerate() {
            if *ch == '\n' {
                ranges.push((start, index));
                start = index + 1;
            }
        }
        ranges.push((start, self.chars.len()));
        ranges
    }

    /// The paragraph containing the given character position. A position
    /// right after a newline belongs to the following paragraph.
    pub fn paragraph_index_at(&self, position: usize) -> usize {
        let position = position.min(self.len());
        self.chars[..position].iter().filter(|c| **c == '\n').count()
    }

    /// The alignment of the paragraph at `index`.
    pub fn paragraph_alignment(&self, index: usize) -> Alignment {
        self.alignments.get(index).copied().unwrap_or_default()
    }

    /// The inclusive paragraph range the caret or selection touches.
    /// Without a caret this is the first paragraph.
    fn touched_paragraphs(&self) -> (usize, usize) {
        match self.selection() {
            Some(SelectionContext::Selection { start, end }) => {
                (self.paragraph_index_at(start), self.paragraph_index_at(end))
            }
            Some(SelectionContext::Caret(position)) => {
                let paragraph = self.paragraph_index_at(position);
                (paragraph, paragraph)
            }
            None => (0, 0),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Editing
    // ─────────────────────────────────────────────────────────────────────────

    /// Insert text at the caret, replacing the selection if one exists.
    /// Inserted characters adopt the pending format. No-op without a caret.
    pub fn insert_text(&mut self, text: &str) {
        if text.is_empty() || self.caret.is_none() {
            return;
        }
        self.delete_selection();
        let at = self.caret.unwrap_or(0).min(self.len());
        let inserted: Vec<char> = text.chars().collect();
        let count = inserted.len();
        let paragraph = self.paragraph_index_at(at);
        let new_paragraphs = inserted.iter().filter(|c| **c == '\n').count();

        self.chars.splice(at..at, inserted);
        self.insert_run(at, count, self.pending.clone());
        // Splitting a paragraph: both halves keep its alignment.
        let inherited = self.alignments[paragraph];
        for _ in 0..new_paragraphs {
            self.alignments.insert(paragraph + 1, inherited);
        }
        self.caret = Some(at + count);
    }

    /// Delete the selected range, if any. Returns whether anything was removed.
    pub fn delete_selection(&mut self) -> bool {
        if let Some(SelectionContext::Selection { start, end }) = self.selection() {
            self.remove_range(start, end);
            self.anchor = None;
            self.caret = Some(start);
            true
        } else {
            false
        }
    }

    /// Delete the selection, or the character before the caret.
    pub fn backspace(&mut self) {
        if self.delete_selection() {
            return;
        }
        if let Some(caret) = self.caret {
            if caret > 0 {
                self.remove_range(caret - 1, caret);
                self.caret = Some(caret - 1);
            }
        }
    }

    fn remove_range(&mut self, start: usize, end: usize) {
        let start = start.min(self.len());
        let end = end.min(self.len());
        if start >= end {
            return;
        }
        let paragraph = self.paragraph_index_at(start);
        let removed_paragraphs = self.chars[start..end].iter().filter(|c| **c == '\n').count();
        self.chars.drain(start..end);

        let removed = end - start;
        self.split_run_at(start);
        self.split_run_at(end);
        self.runs.retain(|run| run.start < start || run.end > end);
        for run in &mut self.runs {
            if run.start >= end {
                run.start -= removed;
                run.end -= removed;
            }
        }
        // Merged paragraphs keep the first one's alignment.
        self.alignments
            .drain(paragraph + 1..paragraph + 1 + removed_paragraphs);
        self.coalesce_runs();
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Run Maintenance
    // ─────────────────────────────────────────────────────────────────────────

    /// Split the run containing `index` so that a run boundary falls on it.
    fn split_run_at(&mut self, index: usize) {
        if let Some(pos) = self
            .runs
            .iter()
            .position(|run| run.start < index && index < run.end)
        {
            let tail = FormatRun {
                start: index,
                end: self.runs[pos].end,
                format: self.runs[pos].format.clone(),
            };
            self.runs[pos].end = index;
            self.runs.insert(pos + 1, tail);
        }
    }

    /// Insert a run of `count` characters at `at`, shifting later runs.
    fn insert_run(&mut self, at: usize, count: usize, format: CharFormat) {
        self.split_run_at(at);
        for run in &mut self.runs {
            if run.start >= at {
                run.start += count;
                run.end += count;
            }
        }
        let index = self
            .runs
            .iter()
            .position(|run| run.start >= at + count)
            .unwrap_or(self.runs.len());
        self.runs.insert(
            index,
            FormatRun {
                start: at,
                end: at + count,
                format,
            },
        );
        self.coalesce_runs();
    }

    /// Drop empty runs and merge adjacent runs with equal formats.
    fn coalesce_runs(&mut self) {
        self.runs.retain(|run| run.len() > 0);
        let mut merged: Vec<FormatRun> = Vec::with_capacity(self.runs.len());
        for run in self.runs.drain(..) {
            match merged.last_mut() {
                Some(last) if last.end == run.start && last.format == run.format => {
                    last.end = run.end;
                }
                _ => merged.push(run),
            }
        }
        self.runs = merged;
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// TextSurface Implementation
// ─────────────────────────────────────────────────────────────────────────────

impl TextSurface for RichBuffer {
    fn selection(&self) -> Option<SelectionContext> {
        let caret = self.caret?;
        match self.anchor {
            Some(anchor) if anchor != caret => Some(SelectionContext::Selection {
                start: anchor.min(caret),
                end: anchor.max(caret),
            }),
            _ => Some(SelectionContext::Caret(caret)),
        }
    }

    fn format_at_anchor(&self) -> CharFormat {
        match self.selection() {
            Some(SelectionContext::Selection { start, .. }) => self.format_at(start),
            _ => self.pending.clone(),
        }
    }

    fn pending_format(&self) -> CharFormat {
        self.pending.clone()
    }

    fn set_pending_format(&mut self, format: CharFormat) {
        self.pending = format;
    }

    fn merge_format(&mut self, start: usize, end: usize, patch: &FormatPatch) {
        let start = start.min(self.len());
        let end = end.min(self.len());
        if start >= end || patch.is_empty() {
            return;
        }
        self.split_run_at(start);
        self.split_run_at(end);
        for run in &mut self.runs {
            if run.start >= start && run.end <= end {
                run.format.apply(patch);
            }
        }
        self.coalesce_runs();
    }

    fn alignment(&self) -> Alignment {
        let index = match self.selection() {
            Some(SelectionContext::Selection { start, .. }) => self.paragraph_index_at(start),
            Some(SelectionContext::Caret(position)) => self.paragraph_index_at(position),
            None => 0,
        };
        self.paragraph_alignment(index)
    }

    fn set_alignment(&mut self, alignment: Alignment) {
        let (first, last) = self.touched_paragraphs();
        for entry in &mut self.alignments[first..=last] {
            *entry = alignment;
        }
    }

    fn text(&self) -> String {
        self.chars.iter().collect()
    }

    fn set_text(&mut self, text: String) {
        self.chars = text.chars().collect();
        self.runs.clear();
        if !self.chars.is_empty() {
            self.runs.push(FormatRun {
                start: 0,
                end: self.chars.len(),
                format: CharFormat::default(),
            });
        }
        self.pending = CharFormat::default();
        self.alignments = vec![
            Alignment::default();
            self.chars.iter().filter(|c| **c == '\n').count() + 1
        ];
        self.caret = Some(0);
        self.anchor = None;
    }

    fn display_font(&self) -> FontSpec {
        self.display_font.clone()
    }

    fn set_display_font(&mut self, font: FontSpec) {
        self.display_font = font;
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::state::{FontWeight, Rgb};

    fn assert_runs_cover(buffer: &RichBuffer) {
        let mut expected_start = 0;
        for run in buffer.runs() {
            assert_eq!(run.start, expected_start, "runs must be contiguous");
            assert!(run.end > run.start, "runs must be non-empty");
            expected_start = run.end;
        }
        assert_eq!(expected_start, buffer.len(), "runs must cover the text");
        assert_eq!(
            buffer.paragraph_count(),
            buffer.text().matches('\n').count() + 1,
            "one alignment entry per paragraph"
        );
    }

    #[test]
    fn test_empty_buffer_has_no_selection() {
        let buffer = RichBuffer::new();
        assert!(buffer.selection().is_none());
        assert!(buffer.is_empty());
        assert!(buffer.runs().is_empty());
    }

    #[test]
    fn test_from_text_single_run() {
        let buffer = RichBuffer::from_text("Hello World");
        assert_eq!(buffer.text(), "Hello World");
        assert_eq!(buffer.runs().len(), 1);
        assert_eq!(buffer.selection(), Some(SelectionContext::Caret(0)));
        assert_runs_cover(&buffer);
    }

    #[test]
    fn test_select_and_collapse() {
        let mut buffer = RichBuffer::from_text("Hello World");
        buffer.select(0, 5);
        assert_eq!(
            buffer.selection(),
            Some(SelectionContext::Selection { start: 0, end: 5 })
        );

        // Reversed order normalizes
        buffer.select(5, 0);
        assert_eq!(
            buffer.selection(),
            Some(SelectionContext::Selection { start: 0, end: 5 })
        );

        // Equal endpoints collapse to a caret
        buffer.select(3, 3);
        assert_eq!(buffer.selection(), Some(SelectionContext::Caret(3)));
    }

    #[test]
    fn test_merge_format_splits_runs() {
        let mut buffer = RichBuffer::from_text("Hello World");
        buffer.merge_format(0, 5, &FormatPatch::weight(FontWeight::Bold));

        assert_eq!(buffer.runs().len(), 2);
        assert!(buffer.format_at(0).is_bold());
        assert!(buffer.format_at(4).is_bold());
        assert!(!buffer.format_at(5).is_bold());
        assert!(!buffer.format_at(10).is_bold());
        assert_runs_cover(&buffer);
    }

    #[test]
    fn test_merge_format_preserves_unrelated_attributes() {
        let mut buffer = RichBuffer::from_text("Hello World");
        // Mixed formats: italic on [0,5), colored on [6,11)
        buffer.merge_format(0, 5, &FormatPatch::italic(true));
        buffer.merge_format(6, 11, &FormatPatch::color(Rgb::new(10, 20, 30)));

        // Strike the whole document
        buffer.merge_format(0, 11, &FormatPatch::strikeout(true));

        let head = buffer.format_at(0);
        assert!(head.strikeout);
        assert!(head.italic);
        assert!(head.color.is_none());

        let tail = buffer.format_at(7);
        assert!(tail.strikeout);
        assert!(!tail.italic);
        assert_eq!(tail.color, Some(Rgb::new(10, 20, 30)));
        assert_runs_cover(&buffer);
    }

    #[test]
    fn test_merge_format_coalesces_equal_neighbors() {
        let mut buffer = RichBuffer::from_text("Hello World");
        buffer.merge_format(0, 5, &FormatPatch::italic(true));
        assert_eq!(buffer.runs().len(), 2);

        // Un-italicize the head again: formats equalize, runs merge back
        buffer.merge_format(0, 5, &FormatPatch::italic(false));
        assert_eq!(buffer.runs().len(), 1);
        assert_runs_cover(&buffer);
    }

    #[test]
    fn test_merge_format_clamps_range_to_text() {
        let mut buffer = RichBuffer::from_text("Hi");
        buffer.merge_format(0, 500, &FormatPatch::underline(true));
        assert!(buffer.format_at(1).underline);
        assert_runs_cover(&buffer);
    }

    #[test]
    fn test_merge_format_does_not_move_selection() {
        let mut buffer = RichBuffer::from_text("Hello World");
        buffer.select(0, 5);
        buffer.merge_format(0, 5, &FormatPatch::weight(FontWeight::Bold));
        assert_eq!(
            buffer.selection(),
            Some(SelectionContext::Selection { start: 0, end: 5 })
        );
    }

    #[test]
    fn test_insert_adopts_pending_format() {
        let mut buffer = RichBuffer::from_text("Hello World");
        buffer.set_caret(11);

        let mut pending = buffer.pending_format();
        pending.italic = true;
        buffer.set_pending_format(pending);

        buffer.insert_text("!");

        assert_eq!(buffer.text(), "Hello World!");
        assert!(buffer.format_at(11).italic);
        // Prior text untouched
        assert!(!buffer.format_at(0).italic);
        assert!(!buffer.format_at(10).italic);
        assert_runs_cover(&buffer);
    }

    #[test]
    fn test_insert_replaces_selection() {
        let mut buffer = RichBuffer::from_text("Hello World");
        buffer.select(0, 5);
        buffer.insert_text("Goodbye");
        assert_eq!(buffer.text(), "Goodbye World");
        assert_eq!(buffer.caret(), Some(7));
        assert_runs_cover(&buffer);
    }

    #[test]
    fn test_insert_without_caret_is_noop() {
        let mut buffer = RichBuffer::new();
        buffer.insert_text("hello");
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_backspace() {
        let mut buffer = RichBuffer::from_text("Hi!");
        buffer.set_caret(3);
        buffer.backspace();
        assert_eq!(buffer.text(), "Hi");
        assert_eq!(buffer.caret(), Some(2));

        // Backspace at start is a no-op
        buffer.set_caret(0);
        buffer.backspace();
        assert_eq!(buffer.text(), "Hi");
        assert_runs_cover(&buffer);
    }

    #[test]
    fn test_backspace_deletes_selection_first() {
        let mut buffer = RichBuffer::from_text("Hello World");
        buffer.select(5, 11);
        buffer.backspace();
        assert_eq!(buffer.text(), "Hello");
        assert_eq!(buffer.caret(), Some(5));
        assert_runs_cover(&buffer);
    }

    #[test]
    fn test_pending_format_follows_caret() {
        let mut buffer = RichBuffer::from_text("Hello World");
        buffer.merge_format(0, 5, &FormatPatch::weight(FontWeight::Bold));

        buffer.set_caret(3);
        assert!(buffer.pending_format().is_bold());

        buffer.set_caret(8);
        assert!(!buffer.pending_format().is_bold());
    }

    #[test]
    fn test_format_at_anchor_uses_selection_start() {
        let mut buffer = RichBuffer::from_text("Hello World");
        buffer.merge_format(0, 5, &FormatPatch::italic(true));
        buffer.select(2, 9);
        assert!(buffer.format_at_anchor().italic);

        buffer.select(6, 9);
        assert!(!buffer.format_at_anchor().italic);
    }

    #[test]
    fn test_set_text_resets_formatting_and_caret() {
        let mut buffer = RichBuffer::from_text("old");
        buffer.merge_format(0, 3, &FormatPatch::underline(true));
        buffer.select(0, 3);

        buffer.set_text("brand new".to_string());

        assert_eq!(buffer.text(), "brand new");
        assert_eq!(buffer.runs().len(), 1);
        assert!(!buffer.format_at(0).underline);
        assert_eq!(buffer.selection(), Some(SelectionContext::Caret(0)));
    }

    #[test]
    fn test_display_font_roundtrip() {
        let mut buffer = RichBuffer::new();
        assert_eq!(buffer.display_font().point_size, 14);

        buffer.set_display_font(FontSpec {
            family: Some("Monospace".to_string()),
            point_size: 20,
        });
        assert_eq!(buffer.display_font().point_size, 20);
        assert_eq!(buffer.display_font().family.as_deref(), Some("Monospace"));
    }

    #[test]
    fn test_paragraph_ranges_exclude_newlines() {
        let buffer = RichBuffer::from_text("First\nSecond\n\nFourth");
        assert_eq!(buffer.paragraph_count(), 4);
        assert_eq!(
            buffer.paragraph_ranges(),
            vec![(0, 5), (6, 12), (13, 13), (14, 20)]
        );
        // A position right after a newline belongs to the next paragraph
        assert_eq!(buffer.paragraph_index_at(5), 0);
        assert_eq!(buffer.paragraph_index_at(6), 1);
    }

    #[test]
    fn test_set_alignment_scopes_to_caret_paragraph() {
        let mut buffer = RichBuffer::from_text("First\nSecond");
        buffer.set_caret(8);
        buffer.set_alignment(Alignment::Center);

        assert_eq!(buffer.paragraph_alignment(0), Alignment::Left);
        assert_eq!(buffer.paragraph_alignment(1), Alignment::Center);
        assert_eq!(buffer.alignment(), Alignment::Center);

        // Moving the caret back reads the first paragraph again
        buffer.set_caret(0);
        assert_eq!(buffer.alignment(), Alignment::Left);
    }

    #[test]
    fn test_set_alignment_spans_selection_paragraphs() {
        let mut buffer = RichBuffer::from_text("First\nSecond\nThird");
        buffer.select(3, 8);
        buffer.set_alignment(Alignment::Right);

        assert_eq!(buffer.paragraph_alignment(0), Alignment::Right);
        assert_eq!(buffer.paragraph_alignment(1), Alignment::Right);
        assert_eq!(buffer.paragraph_alignment(2), Alignment::Left);
    }

    #[test]
    fn test_newline_split_inherits_alignment() {
        let mut buffer = RichBuffer::from_text("Centered line");
        buffer.set_caret(0);
        buffer.set_alignment(Alignment::Center);

        buffer.set_caret(8);
        buffer.insert_text("\n");

        assert_eq!(buffer.text(), "Centered\n line");
        assert_eq!(buffer.paragraph_alignment(0), Alignment::Center);
        assert_eq!(buffer.paragraph_alignment(1), Alignment::Center);
        assert_runs_cover(&buffer);
    }

    #[test]
    fn test_paragraph_merge_keeps_first_alignment() {
        let mut buffer = RichBuffer::from_text("First\nSecond");
        buffer.set_caret(8);
        buffer.set_alignment(Alignment::Right);

        // Delete the newline: the merged paragraph keeps the first one's
        buffer.set_caret(6);
        buffer.backspace();

        assert_eq!(buffer.text(), "FirstSecond");
        assert_eq!(buffer.paragraph_count(), 1);
        assert_eq!(buffer.paragraph_alignment(0), Alignment::Left);
        assert_runs_cover(&buffer);
    }

    #[test]
    fn test_set_text_resets_alignments() {
        let mut buffer = RichBuffer::from_text("one");
        buffer.set_caret(1);
        buffer.set_alignment(Alignment::Justify);

        buffer.set_text("a\nb\nc".to_string());

        assert_eq!(buffer.paragraph_count(), 3);
        for index in 0..3 {
            assert_eq!(buffer.paragraph_alignment(index), Alignment::Left);
        }
        assert_runs_cover(&buffer);
    }

    #[test]
    fn test_remove_range_inside_formatted_region() {
        let mut buffer = RichBuffer::from_text("Hello World");
        buffer.merge_format(0, 5, &FormatPatch::italic(true));

        buffer.select(3, 8);
        buffer.delete_selection();

        assert_eq!(buffer.text(), "Helrld");
        assert!(buffer.format_at(0).italic);
        assert!(!buffer.format_at(4).italic);
        assert_runs_cover(&buffer);
    }
}
