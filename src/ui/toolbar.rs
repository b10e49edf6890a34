//! Toolbar UI Component for Quillpad
//!
//! This module implements a ribbon-style toolbar with icon-based controls
//! organized into logical groups: file operations, font selection, style
//! toggles, alignment, and zoom.

use crate::format::state::{Alignment, CharFormat, Rgb};
use eframe::egui::{self, Color32, Response, RichText, Ui, Vec2};

/// Height of the toolbar.
const TOOLBAR_HEIGHT: f32 = 36.0;

/// Size of icon buttons.
const ICON_BUTTON_SIZE: Vec2 = Vec2::new(30.0, 26.0);

/// Font families offered in the family picker.
const FONT_FAMILIES: &[&str] = &["Proportional", "Monospace"];

/// Actions that can be triggered from the toolbar.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolbarAction {
    // File operations
    /// Open file dialog
    Open,
    /// Save current file
    Save,
    /// Save As dialog
    SaveAs,

    // Font operations
    /// Set the font family for the selection or future typing
    FontFamily(String),
    /// Set the point size for the selection or future typing
    PointSize(i64),

    // Style toggles
    /// Toggle bold
    ToggleBold,
    /// Toggle italic
    ToggleItalic,
    /// Toggle underline
    ToggleUnderline,
    /// Toggle strike-through
    ToggleStrikeout,
    /// Set the text color
    TextColor(Rgb),

    // Paragraph operations
    /// Set the paragraph alignment
    Align(Alignment),

    // View operations
    /// Grow the display font by one point
    ZoomIn,
    /// Shrink the display font by one point
    ZoomOut,
    /// Cycle through themes
    CycleTheme,
}

/// Toolbar UI state and rendering.
#[derive(Debug, Clone)]
pub struct Toolbar {
    /// Point size shown in the size box; committed as an action on change.
    size_edit: u32,
    /// Color shown in the color picker; committed as an action on change.
    color_edit: [u8; 3],
}

impl Default for Toolbar {
    fn default() -> Self {
        Self::new()
    }
}

impl Toolbar {
    /// Create a new toolbar instance.
    pub fn new() -> Self {
        Self {
            size_edit: CharFormat::default().point_size,
            color_edit: [0, 0, 0],
        }
    }

    /// Get the toolbar height.
    pub fn height(&self) -> f32 {
        TOOLBAR_HEIGHT
    }

    /// Render the toolbar and return any triggered action.
    ///
    /// `current` is the format governing the caret or selection anchor; it
    /// drives the active-state highlighting and the size box. `alignment` is
    /// the current paragraph alignment.
    pub fn show(
        &mut self,
        ui: &mut Ui,
        current: &CharFormat,
        alignment: Alignment,
        is_dark: bool,
    ) -> Option<ToolbarAction> {
        let mut action: Option<ToolbarAction> = None;

        let toolbar_bg = if is_dark {
            Color32::from_rgb(40, 40, 40)
        } else {
            Color32::from_rgb(248, 248, 248)
        };

        let separator_color = if is_dark {
            Color32::from_rgb(70, 70, 70)
        } else {
            Color32::from_rgb(210, 210, 210)
        };

        // Keep the widgets in sync with the surface between interactions.
        self.size_edit = current.point_size;
        if let Some(color) = current.color {
            self.color_edit = [color.r, color.g, color.b];
        }

        ui.painter()
            .rect_filled(ui.available_rect_before_wrap(), 0.0, toolbar_bg);

        ui.horizontal(|ui| {
            ui.set_height(self.height());
            ui.spacing_mut().item_spacing.x = 2.0;

            // ═══════════════════════════════════════════════════════════════════
            // File Group
            // ═══════════════════════════════════════════════════════════════════
            if icon_button(ui, "📂", "Open File (Ctrl+O)", true, is_dark).clicked() {
                action = Some(ToolbarAction::Open);
            }

            if icon_button(ui, "💾", "Save (Ctrl+S)", true, is_dark).clicked() {
                action = Some(ToolbarAction::Save);
            }

            if icon_button(ui, "📥", "Save As (Ctrl+Shift+S)", true, is_dark).clicked() {
                action = Some(ToolbarAction::SaveAs);
            }

            ui.add_space(4.0);
            vertical_separator(ui, separator_color, self.height() - 8.0);
            ui.add_space(4.0);

            // ═══════════════════════════════════════════════════════════════════
            // Font Group
            // ═══════════════════════════════════════════════════════════════════
            let family_label = current.family.as_deref().unwrap_or(FONT_FAMILIES[0]);
            egui::ComboBox::from_id_source("font_family_picker")
                .selected_text(RichText::new(family_label).size(12.0))
                .width(110.0)
                .show_ui(ui, |ui| {
                    for family in FONT_FAMILIES {
                        let selected = family_label == *family;
                        if ui.selectable_label(selected, *family).clicked() {
                            action = Some(ToolbarAction::FontFamily(family.to_string()));
                        }
                    }
                });

            ui.add_space(2.0);

            // Point size box. Out-of-range input is clamped downstream, so the
            // widget range is cosmetic.
            let size_response = ui
                .add(
                    egui::DragValue::new(&mut self.size_edit)
                        .range(0..=100)
                        .speed(0.2),
                )
                .on_hover_text("Font size");
            if size_response.changed() {
                action = Some(ToolbarAction::PointSize(self.size_edit as i64));
            }

            ui.add_space(4.0);
            vertical_separator(ui, separator_color, self.height() - 8.0);
            ui.add_space(4.0);

            // ═══════════════════════════════════════════════════════════════════
            // Style Group
            // ═══════════════════════════════════════════════════════════════════
            if format_button(ui, "B", "Bold", current.is_bold(), is_dark, true).clicked() {
                action = Some(ToolbarAction::ToggleBold);
            }

            if format_button(ui, "I", "Italic", current.italic, is_dark, false).clicked() {
                action = Some(ToolbarAction::ToggleItalic);
            }

            if format_button(ui, "U", "Underline", current.underline, is_dark, false).clicked() {
                action = Some(ToolbarAction::ToggleUnderline);
            }

            if format_button(ui, "S̶", "Strikethrough", current.strikeout, is_dark, false).clicked()
            {
                action = Some(ToolbarAction::ToggleStrikeout);
            }

            ui.add_space(2.0);

            // Text color picker
            let color_response = ui
                .color_edit_button_srgb(&mut self.color_edit)
                .on_hover_text("Text color");
            if color_response.changed() {
                action = Some(ToolbarAction::TextColor(Rgb::new(
                    self.color_edit[0],
                    self.color_edit[1],
                    self.color_edit[2],
                )));
            }

            ui.add_space(4.0);
            vertical_separator(ui, separator_color, self.height() - 8.0);
            ui.add_space(4.0);

            // ═══════════════════════════════════════════════════════════════════
            // Alignment Group
            // ═══════════════════════════════════════════════════════════════════
            let alignments = [
                (Alignment::Left, "⬅", "Align Left"),
                (Alignment::Center, "↔", "Align Center"),
                (Alignment::Right, "➡", "Align Right"),
                (Alignment::Justify, "☰", "Justify"),
            ];
            for (value, icon, tooltip) in alignments {
                if format_button(ui, icon, tooltip, alignment == value, is_dark, false).clicked() {
                    action = Some(ToolbarAction::Align(value));
                }
            }

            ui.add_space(4.0);
            vertical_separator(ui, separator_color, self.height() - 8.0);
            ui.add_space(4.0);

            // ═══════════════════════════════════════════════════════════════════
            // View Group
            // ═══════════════════════════════════════════════════════════════════
            if icon_button(ui, "🔍+", "Zoom In", true, is_dark).clicked() {
                action = Some(ToolbarAction::ZoomIn);
            }

            if icon_button(ui, "🔍-", "Zoom Out", true, is_dark).clicked() {
                action = Some(ToolbarAction::ZoomOut);
            }

            // Theme button (right-aligned)
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.add_space(8.0);
                if icon_button(ui, "🎨", "Change Theme", true, is_dark).clicked() {
                    action = Some(ToolbarAction::CycleTheme);
                }
            });
        });

        // Draw bottom border
        let rect = ui.min_rect();
        ui.painter().line_segment(
            [
                egui::pos2(rect.min.x, rect.max.y),
                egui::pos2(rect.max.x, rect.max.y),
            ],
            egui::Stroke::new(1.0, separator_color),
        );

        action
    }
}

/// Render an icon button with consistent styling.
fn icon_button(ui: &mut Ui, icon: &str, tooltip: &str, enabled: bool, is_dark: bool) -> Response {
    let text_color = if enabled {
        if is_dark {
            Color32::from_rgb(220, 220, 220)
        } else {
            Color32::from_rgb(50, 50, 50)
        }
    } else if is_dark {
        Color32::from_rgb(100, 100, 100)
    } else {
        Color32::from_rgb(160, 160, 160)
    };

    let hover_bg = if is_dark {
        Color32::from_rgb(60, 60, 60)
    } else {
        Color32::from_rgb(220, 220, 220)
    };

    // Invisible button as the clickable area; the icon is painted on top.
    let btn = ui.add_enabled(
        enabled,
        egui::Button::new(RichText::new(" ").size(15.0))
            .frame(false)
            .min_size(ICON_BUTTON_SIZE),
    );

    if btn.hovered() && enabled {
        ui.painter()
            .rect_filled(btn.rect, egui::Rounding::same(3.0), hover_bg);
    }

    ui.painter().text(
        btn.rect.center(),
        egui::Align2::CENTER_CENTER,
        icon,
        egui::FontId::proportional(15.0),
        text_color,
    );

    btn.on_hover_text(tooltip)
}

/// Render a format button with active state highlighting.
fn format_button(
    ui: &mut Ui,
    icon: &str,
    tooltip: &str,
    active: bool,
    is_dark: bool,
    bold_text: bool,
) -> Response {
    let text_color = if is_dark {
        Color32::from_rgb(220, 220, 220)
    } else {
        Color32::from_rgb(50, 50, 50)
    };

    let active_bg = if is_dark {
        Color32::from_rgb(70, 90, 120)
    } else {
        Color32::from_rgb(200, 220, 240)
    };

    let hover_bg = if is_dark {
        Color32::from_rgb(60, 60, 60)
    } else {
        Color32::from_rgb(220, 220, 220)
    };

    let mut text = RichText::new(icon).size(12.0).color(text_color);
    if bold_text {
        text = text.strong();
    }

    let btn = ui.add(
        egui::Button::new(text)
            .frame(false)
            .min_size(Vec2::new(24.0, 22.0)),
    );

    if active {
        ui.painter()
            .rect_filled(btn.rect, egui::Rounding::same(3.0), active_bg);
        ui.painter().text(
            btn.rect.center(),
            egui::Align2::CENTER_CENTER,
            icon,
            egui::FontId::proportional(12.0),
            text_color,
        );
    } else if btn.hovered() {
        ui.painter()
            .rect_filled(btn.rect, egui::Rounding::same(3.0), hover_bg);
        ui.painter().text(
            btn.rect.center(),
            egui::Align2::CENTER_CENTER,
            icon,
            egui::FontId::proportional(12.0),
            text_color,
        );
    }

    btn.on_hover_text(tooltip)
}

/// Draw a vertical separator line.
fn vertical_separator(ui: &mut Ui, color: Color32, height: f32) {
    let (rect, _response) = ui.allocate_exact_size(Vec2::new(1.0, height), egui::Sense::hover());
    ui.painter().line_segment(
        [rect.center_top(), rect.center_bottom()],
        egui::Stroke::new(1.0, color),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toolbar_new() {
        let toolbar = Toolbar::new();
        assert_eq!(toolbar.size_edit, CharFormat::default().point_size);
        assert_eq!(toolbar.height(), TOOLBAR_HEIGHT);
    }

    #[test]
    fn test_toolbar_action_equality() {
        assert_eq!(ToolbarAction::Open, ToolbarAction::Open);
        assert_ne!(ToolbarAction::Open, ToolbarAction::Save);
        assert_eq!(
            ToolbarAction::Align(Alignment::Center),
            ToolbarAction::Align(Alignment::Center)
        );
    }
}
