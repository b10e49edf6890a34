//! Rich-text editor view
//!
//! Renders a `RichBuffer` and feeds pointer and keyboard input back into the
//! buffer. Alignment is per paragraph and an egui layout job carries a single
//! horizontal alignment, so each paragraph is laid out as its own galley and
//! the galleys are stacked vertically. The view owns no document state; it
//! only keeps the in-progress drag anchor.
//!
//! Bold rendering note: the bundled egui fonts ship a single weight, so bold
//! runs are drawn in the theme's strong text color instead of a heavier face.

use crate::format::state::{Alignment, CharFormat};
use crate::surface::{FontSpec, RichBuffer, SelectionContext, TextSurface};
use eframe::egui::text::{CCursor, LayoutJob};
use eframe::egui::{
    self, Align, Color32, FontFamily, FontId, Key, Pos2, Rect, Sense, Stroke, TextFormat, Ui, Vec2,
};
use std::sync::Arc;

/// Padding around the text area.
const EDITOR_MARGIN: f32 = 8.0;

/// One laid-out paragraph: its character range (newline excluded), its
/// alignment, and its vertical slot below the text origin.
struct ParagraphLayout {
    start: usize,
    end: usize,
    alignment: Alignment,
    galley: Arc<egui::Galley>,
    top: f32,
    height: f32,
}

/// The editor widget.
#[derive(Debug, Default)]
pub struct EditorView {
    /// Character index where the current pointer drag started.
    drag_anchor: Option<usize>,
}

impl EditorView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render the buffer and process input. Returns true if the document
    /// content changed this frame.
    pub fn show(&mut self, ui: &mut Ui, buffer: &mut RichBuffer, is_dark: bool) -> bool {
        let mut changed = false;

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                let width = ui.available_width() - 2.0 * EDITOR_MARGIN;
                let paragraphs = layout_paragraphs(ui, buffer, width.max(0.0), is_dark);
                let total_height = paragraphs
                    .last()
                    .map(|paragraph| paragraph.top + paragraph.height)
                    .unwrap_or(0.0);

                let desired = Vec2::new(
                    ui.available_width(),
                    (total_height + 2.0 * EDITOR_MARGIN).max(ui.available_height()),
                );
                let (response, painter) =
                    ui.allocate_painter(desired, Sense::click_and_drag());

                // Pointer: click places the caret, drag extends a selection.
                if response.clicked() || response.drag_started() {
                    response.request_focus();
                    if let Some(pointer) = response.interact_pointer_pos() {
                        let index = char_index_at(&paragraphs, &response.rect, pointer);
                        buffer.set_caret(index);
                        self.drag_anchor = Some(index);
                    }
                } else if response.dragged() {
                    if let (Some(anchor), Some(pointer)) =
                        (self.drag_anchor, response.interact_pointer_pos())
                    {
                        let index = char_index_at(&paragraphs, &response.rect, pointer);
                        buffer.select(anchor, index);
                    }
                } else if response.drag_stopped() {
                    self.drag_anchor = None;
                }

                // Selection highlight under the text.
                if let Some(SelectionContext::Selection { start, end }) = buffer.selection() {
                    let highlight = if is_dark {
                        Color32::from_rgb(60, 80, 110)
                    } else {
                        Color32::from_rgb(180, 210, 240)
                    };
                    for paragraph in &paragraphs {
                        paint_paragraph_selection(
                            &painter,
                            paragraph,
                            &response.rect,
                            start,
                            end,
                            highlight,
                        );
                    }
                }

                for paragraph in &paragraphs {
                    let origin = paragraph_origin(&response.rect, paragraph);
                    painter.galley(origin, paragraph.galley.clone(), Color32::PLACEHOLDER);
                }

                // Keyboard input, only while focused.
                if response.has_focus() {
                    let events = ui.input(|i| i.events.clone());
                    for event in events {
                        match event {
                            egui::Event::Text(text) => {
                                buffer.insert_text(&text);
                                changed = true;
                            }
                            egui::Event::Key {
                                key: Key::Enter,
                                pressed: true,
                                ..
                            } => {
                                buffer.insert_text("\n");
                                changed = true;
                            }
                            egui::Event::Key {
                                key: Key::Backspace,
                                pressed: true,
                                ..
                            } => {
                                buffer.backspace();
                                changed = true;
                            }
                            egui::Event::Key {
                                key: Key::ArrowLeft,
                                pressed: true,
                                ..
                            } => {
                                if let Some(caret) = buffer.caret() {
                                    buffer.set_caret(caret.saturating_sub(1));
                                }
                            }
                            egui::Event::Key {
                                key: Key::ArrowRight,
                                pressed: true,
                                ..
                            } => {
                                if let Some(caret) = buffer.caret() {
                                    buffer.set_caret(caret + 1);
                                }
                            }
                            _ => {}
                        }
                    }

                    // Caret bar.
                    if let Some(SelectionContext::Caret(index)) = buffer.selection() {
                        let caret_color = if is_dark {
                            Color32::from_rgb(220, 220, 220)
                        } else {
                            Color32::from_rgb(40, 40, 40)
                        };
                        if let Some((top, bottom)) =
                            caret_endpoints(&paragraphs, &response.rect, index)
                        {
                            painter.line_segment([top, bottom], Stroke::new(1.5, caret_color));
                        }
                        ui.ctx().request_repaint();
                    }
                }
            });

        changed
    }
}

/// Lay out every paragraph as its own galley, stacked top to bottom.
fn layout_paragraphs(
    ui: &Ui,
    buffer: &RichBuffer,
    wrap_width: f32,
    is_dark: bool,
) -> Vec<ParagraphLayout> {
    let display = buffer.display_font();
    let zoom = display.point_size as f32 / FontSpec::default().point_size as f32;
    let text = buffer.text();
    let chars: Vec<char> = text.chars().collect();

    let mut paragraphs = Vec::new();
    let mut top = 0.0;
    for (index, (start, end)) in buffer.paragraph_ranges().into_iter().enumerate() {
        let alignment = buffer.paragraph_alignment(index);

        let mut job = LayoutJob::default();
        job.wrap.max_width = wrap_width;
        match alignment {
            Alignment::Left => job.halign = Align::LEFT,
            Alignment::Center => job.halign = Align::Center,
            Alignment::Right => job.halign = Align::RIGHT,
            Alignment::Justify => {
                job.halign = Align::LEFT;
                job.justify = true;
            }
        }

        for run in buffer.runs() {
            let run_start = run.start.max(start);
            let run_end = run.end.min(end);
            if run_start < run_end {
                let segment: String = chars[run_start..run_end].iter().collect();
                job.append(&segment, 0.0, text_format(&run.format, &display, zoom, is_dark));
            }
        }

        let galley = ui.fonts(|fonts| fonts.layout_job(job));
        // An empty paragraph still occupies one row of its governing font.
        let height = if start == end {
            let format = if start < buffer.len() {
                buffer.format_at(start)
            } else {
                buffer.pending_format()
            };
            let font_id = text_format(&format, &display, zoom, is_dark).font_id;
            ui.fonts(|fonts| fonts.row_height(&font_id))
        } else {
            galley.size().y
        };

        paragraphs.push(ParagraphLayout {
            start,
            end,
            alignment,
            galley,
            top,
            height,
        });
        top += height;
    }
    paragraphs
}

/// Where a paragraph's galley is anchored. The x coordinate is the galley
/// anchor, which the halign interprets (left edge, center, or right edge).
fn paragraph_origin(rect: &Rect, paragraph: &ParagraphLayout) -> Pos2 {
    let x = match paragraph.alignment {
        Alignment::Left | Alignment::Justify => rect.min.x + EDITOR_MARGIN,
        Alignment::Center => rect.center().x,
        Alignment::Right => rect.max.x - EDITOR_MARGIN,
    };
    egui::pos2(x, rect.min.y + EDITOR_MARGIN + paragraph.top)
}

/// Map a pointer position to a character index: pick the paragraph under the
/// pointer (clamping to the last one below the text) and hit-test its galley.
fn char_index_at(paragraphs: &[ParagraphLayout], rect: &Rect, pointer: Pos2) -> usize {
    let local_y = pointer.y - rect.min.y - EDITOR_MARGIN;
    let position = paragraphs
        .iter()
        .position(|paragraph| local_y < paragraph.top + paragraph.height)
        .unwrap_or(paragraphs.len().saturating_sub(1));
    let paragraph = &paragraphs[position];
    let origin = paragraph_origin(rect, paragraph);
    let offset = paragraph
        .galley
        .cursor_from_pos(pointer - origin)
        .ccursor
        .index;
    (paragraph.start + offset).min(paragraph.end)
}

/// Highlight the part of the selection that falls inside one paragraph. An
/// empty paragraph wholly inside the selection gets a thin marker so the
/// selection reads as continuous.
fn paint_paragraph_selection(
    painter: &egui::Painter,
    paragraph: &ParagraphLayout,
    rect: &Rect,
    start: usize,
    end: usize,
    highlight: Color32,
) {
    let origin = paragraph_origin(rect, paragraph);
    let local_start = start.clamp(paragraph.start, paragraph.end) - paragraph.start;
    let local_end = end.clamp(paragraph.start, paragraph.end) - paragraph.start;
    if local_start < local_end {
        let galley = &paragraph.galley;
        let start_cursor = galley.from_ccursor(CCursor::new(local_start));
        let end_cursor = galley.from_ccursor(CCursor::new(local_end));
        for row_index in start_cursor.rcursor.row..=end_cursor.rcursor.row {
            let row = &galley.rows[row_index];
            let mut row_rect = row.rect.translate(origin.to_vec2());
            if row_index == start_cursor.rcursor.row {
                row_rect.min.x = galley.pos_from_cursor(&start_cursor).min.x + origin.x;
            }
            if row_index == end_cursor.rcursor.row {
                row_rect.max.x = galley.pos_from_cursor(&end_cursor).min.x + origin.x;
            }
            painter.rect_filled(row_rect, 0.0, highlight);
        }
    } else if paragraph.start == paragraph.end
        && start <= paragraph.start
        && paragraph.end < end
    {
        let marker = Rect::from_min_size(origin, Vec2::new(4.0, paragraph.height));
        painter.rect_filled(marker, 0.0, highlight);
    }
}

/// The caret bar's endpoints in screen space.
fn caret_endpoints(paragraphs: &[ParagraphLayout], rect: &Rect, index: usize) -> Option<(Pos2, Pos2)> {
    let paragraph = paragraphs
        .iter()
        .find(|paragraph| index <= paragraph.end)
        .or_else(|| paragraphs.last())?;
    let origin = paragraph_origin(rect, paragraph);
    if paragraph.start == paragraph.end {
        return Some((origin, egui::pos2(origin.x, origin.y + paragraph.height)));
    }
    let cursor = paragraph
        .galley
        .from_ccursor(CCursor::new(index - paragraph.start));
    let caret_rect = paragraph
        .galley
        .pos_from_cursor(&cursor)
        .translate(origin.to_vec2());
    Some((
        caret_rect.min,
        egui::pos2(caret_rect.min.x, caret_rect.max.y),
    ))
}

/// Map a character format onto an egui text format.
pub(crate) fn text_format(
    format: &CharFormat,
    display: &FontSpec,
    zoom: f32,
    is_dark: bool,
) -> TextFormat {
    let family_name = format
        .family
        .as_deref()
        .or(display.family.as_deref())
        .unwrap_or("Proportional");
    let family = if family_name.eq_ignore_ascii_case("monospace") {
        FontFamily::Monospace
    } else {
        FontFamily::Proportional
    };

    // Size 0 is a legal stored value but cannot be laid out; render at 1pt.
    let size = (format.point_size as f32 * zoom).max(1.0);

    let color = match format.color {
        Some(rgb) => Color32::from_rgb(rgb.r, rgb.g, rgb.b),
        None if format.is_bold() => {
            if is_dark {
                Color32::WHITE
            } else {
                Color32::BLACK
            }
        }
        None => {
            if is_dark {
                Color32::from_rgb(200, 200, 200)
            } else {
                Color32::from_rgb(60, 60, 60)
            }
        }
    };

    let decoration = |on: bool| {
        if on {
            Stroke::new(1.0, color)
        } else {
            Stroke::NONE
        }
    };

    TextFormat {
        font_id: FontId::new(size, family),
        color,
        italics: format.italic,
        underline: decoration(format.underline),
        strikethrough: decoration(format.strikeout),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::state::{FontWeight, FormatPatch, Rgb};

    fn display() -> FontSpec {
        FontSpec::default()
    }

    #[test]
    fn test_text_format_scales_with_zoom() {
        let format = CharFormat::default();
        let out = text_format(&format, &display(), 2.0, false);
        assert_eq!(out.font_id.size, format.point_size as f32 * 2.0);
    }

    #[test]
    fn test_text_format_zero_size_renders_at_floor() {
        let format = CharFormat::default().with(&FormatPatch::point_size(0));
        let out = text_format(&format, &display(), 1.0, false);
        assert_eq!(out.font_id.size, 1.0);
    }

    #[test]
    fn test_text_format_monospace_family() {
        let format = CharFormat::default().with(&FormatPatch::family("Monospace"));
        let out = text_format(&format, &display(), 1.0, false);
        assert_eq!(out.font_id.family, FontFamily::Monospace);

        let format = CharFormat::default();
        let out = text_format(&format, &display(), 1.0, false);
        assert_eq!(out.font_id.family, FontFamily::Proportional);
    }

    #[test]
    fn test_text_format_family_falls_back_to_display_font() {
        let display = FontSpec {
            family: Some("Monospace".to_string()),
            point_size: 14,
        };
        let out = text_format(&CharFormat::default(), &display, 1.0, false);
        assert_eq!(out.font_id.family, FontFamily::Monospace);
    }

    #[test]
    fn test_text_format_bold_uses_strong_color() {
        let format = CharFormat::default().with(&FormatPatch::weight(FontWeight::Bold));
        assert_eq!(text_format(&format, &display(), 1.0, false).color, Color32::BLACK);
        assert_eq!(text_format(&format, &display(), 1.0, true).color, Color32::WHITE);
    }

    #[test]
    fn test_text_format_explicit_color_wins() {
        let format = CharFormat::default()
            .with(&FormatPatch::weight(FontWeight::Bold))
            .with(&FormatPatch::color(Rgb::new(10, 20, 30)));
        let out = text_format(&format, &display(), 1.0, false);
        assert_eq!(out.color, Color32::from_rgb(10, 20, 30));
    }

    #[test]
    fn test_text_format_decorations() {
        let format = CharFormat::default()
            .with(&FormatPatch::underline(true))
            .with(&FormatPatch::strikeout(true));
        let out = text_format(&format, &display(), 1.0, false);
        assert_ne!(out.underline, Stroke::NONE);
        assert_ne!(out.strikethrough, Stroke::NONE);

        let plain = text_format(&CharFormat::default(), &display(), 1.0, false);
        assert_eq!(plain.underline, Stroke::NONE);
        assert_eq!(plain.strikethrough, Stroke::NONE);
    }

    #[test]
    fn test_text_format_italics_flag() {
        let format = CharFormat::default().with(&FormatPatch::italic(true));
        assert!(text_format(&format, &display(), 1.0, false).italics);
        assert!(!text_format(&CharFormat::default(), &display(), 1.0, false).italics);
    }
}
