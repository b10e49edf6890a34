//! Main application for Quillpad
//!
//! `QuillpadApp` owns the document buffer, the toolbar, the editor view, and
//! the user settings. It reduces toolbar actions to formatting intents,
//! routes them through the controller, and surfaces I/O failures in a modal
//! warning without aborting anything.

use std::path::PathBuf;

use eframe::egui;
use log::{debug, info};

use crate::config::{save_config_silent, Settings, Theme};
use crate::files::dialogs;
use crate::format::controller::{dispatch, Intent};
use crate::surface::{FontSpec, RichBuffer, TextSurface};
use crate::ui::{EditorView, Toolbar, ToolbarAction};

/// The main application state.
pub struct QuillpadApp {
    /// The document being edited.
    buffer: RichBuffer,
    /// Toolbar widget state.
    toolbar: Toolbar,
    /// Editor widget state.
    editor: EditorView,
    /// User settings, persisted on exit.
    settings: Settings,
    /// Path of the current document (None for an unsaved document).
    current_file: Option<PathBuf>,
    /// Whether the document has unsaved changes.
    modified: bool,
    /// Whether to show the error modal.
    show_error_modal: bool,
    /// Error message for the modal.
    error_message: String,
    /// Transient confirmation shown after a successful save.
    toast_message: Option<String>,
    /// When the toast disappears, in `ctx.input(|i| i.time)` seconds.
    toast_expires_at: Option<f64>,
}

/// How long the save confirmation stays on screen.
const TOAST_SECONDS: f64 = 2.5;

impl QuillpadApp {
    /// Create the application from loaded settings.
    pub fn new(cc: &eframe::CreationContext<'_>, settings: Settings) -> Self {
        let mut buffer = RichBuffer::new();
        buffer.set_display_font(FontSpec {
            family: settings.display_font_family.clone(),
            point_size: settings.display_font_size,
        });

        apply_theme(&cc.egui_ctx, settings.theme);

        Self {
            buffer,
            toolbar: Toolbar::new(),
            editor: EditorView::new(),
            settings,
            current_file: None,
            modified: false,
            show_error_modal: false,
            error_message: String::new(),
            toast_message: None,
            toast_expires_at: None,
        }
    }

    /// Show an error in a modal dialog.
    fn show_error(&mut self, message: impl Into<String>) {
        self.error_message = message.into();
        self.show_error_modal = true;
    }

    /// Dismiss the error modal.
    fn dismiss_error(&mut self) {
        self.show_error_modal = false;
        self.error_message.clear();
    }

    /// Run an intent against the buffer, surfacing failures in the modal.
    /// Returns whether the intent succeeded.
    fn run_intent(&mut self, intent: Intent) -> bool {
        match dispatch(&mut self.buffer, intent) {
            Ok(()) => true,
            Err(err) => {
                self.show_error(err.to_string());
                false
            }
        }
    }

    /// Open the document at `path`, replacing the current buffer.
    fn open_path(&mut self, path: PathBuf) {
        if self.run_intent(Intent::Open(path.clone())) {
            self.remember_file(path);
            self.modified = false;
        }
    }

    /// Save the buffer to `path` as plain text. On success a transient
    /// confirmation appears; failures go through the error modal.
    fn save_to_path(&mut self, path: PathBuf) {
        if self.run_intent(Intent::Save(path.clone())) {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            self.toast_message = Some(format!("Saved {}", name));
            self.toast_expires_at = None;
            self.remember_file(path);
            self.modified = false;
        }
    }

    fn remember_file(&mut self, path: PathBuf) {
        if let Some(dir) = path.parent() {
            self.settings.last_open_directory = Some(dir.to_path_buf());
        }
        self.settings.add_recent_file(path.clone());
        self.current_file = Some(path);
    }

    /// Default file name offered by the save dialog.
    fn default_save_name(&self) -> String {
        self.current_file
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "untitled.txt".to_string())
    }

    /// Handle a toolbar action.
    fn handle_action(&mut self, ctx: &egui::Context, action: ToolbarAction) {
        debug!("Toolbar action: {:?}", action);
        match action {
            ToolbarAction::Open => {
                let initial = self.settings.last_open_directory.clone();
                if let Some(path) = dialogs::open_file_dialog(initial.as_ref()) {
                    self.open_path(path);
                }
            }
            ToolbarAction::Save => match self.current_file.clone() {
                Some(path) => self.save_to_path(path),
                None => self.save_as(),
            },
            ToolbarAction::SaveAs => self.save_as(),
            ToolbarAction::FontFamily(family) => {
                self.run_intent(Intent::FontFamily(family));
            }
            ToolbarAction::PointSize(size) => {
                self.run_intent(Intent::PointSize(size));
            }
            ToolbarAction::ToggleBold => {
                self.run_intent(Intent::ToggleBold);
            }
            ToolbarAction::ToggleItalic => {
                self.run_intent(Intent::ToggleItalic);
            }
            ToolbarAction::ToggleUnderline => {
                self.run_intent(Intent::ToggleUnderline);
            }
            ToolbarAction::ToggleStrikeout => {
                self.run_intent(Intent::ToggleStrikeout);
            }
            ToolbarAction::TextColor(color) => {
                self.run_intent(Intent::TextColor(color));
            }
            ToolbarAction::Align(alignment) => {
                self.run_intent(Intent::Align(alignment));
            }
            ToolbarAction::ZoomIn => {
                self.run_intent(Intent::ZoomIn);
                self.settings.display_font_size = self.buffer.display_font().point_size;
            }
            ToolbarAction::ZoomOut => {
                self.run_intent(Intent::ZoomOut);
                self.settings.display_font_size = self.buffer.display_font().point_size;
            }
            ToolbarAction::CycleTheme => {
                self.settings.theme = match self.settings.theme {
                    Theme::Light => Theme::Dark,
                    Theme::Dark => Theme::Light,
                };
                apply_theme(ctx, self.settings.theme);
            }
        }
    }

    fn save_as(&mut self) {
        let initial = self.settings.last_open_directory.clone();
        let name = self.default_save_name();
        if let Some(path) = dialogs::save_file_dialog(initial.as_ref(), Some(&name)) {
            self.save_to_path(path);
        }
    }

    /// Handle Ctrl+O / Ctrl+S / Ctrl+Shift+S shortcuts.
    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        let open = ctx.input_mut(|i| i.consume_key(egui::Modifiers::CTRL, egui::Key::O));
        let save_as = ctx.input_mut(|i| {
            i.consume_key(egui::Modifiers::CTRL | egui::Modifiers::SHIFT, egui::Key::S)
        });
        let save = ctx.input_mut(|i| i.consume_key(egui::Modifiers::CTRL, egui::Key::S));

        if open {
            self.handle_action(ctx, ToolbarAction::Open);
        }
        if save_as {
            self.handle_action(ctx, ToolbarAction::SaveAs);
        } else if save {
            self.handle_action(ctx, ToolbarAction::Save);
        }
    }

    /// Window title reflecting the current document and modified state.
    fn window_title(&self) -> String {
        let name = self
            .current_file
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Untitled".to_string());
        let marker = if self.modified { "● " } else { "" };
        format!("{}{} - Quillpad", marker, name)
    }
}

impl eframe::App for QuillpadApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let is_dark = self.settings.theme == Theme::Dark;

        self.handle_shortcuts(ctx);

        ctx.send_viewport_cmd(egui::ViewportCommand::Title(self.window_title()));

        // Track window geometry for the next session.
        if let Some(rect) = ctx.input(|i| i.viewport().inner_rect) {
            self.settings.window_size.width = rect.width();
            self.settings.window_size.height = rect.height();
        }
        if let Some(pos) = ctx.input(|i| i.viewport().outer_rect.map(|r| r.min)) {
            self.settings.window_size.x = Some(pos.x);
            self.settings.window_size.y = Some(pos.y);
        }

        // Toolbar
        let mut toolbar_action = None;
        egui::TopBottomPanel::top("toolbar")
            .exact_height(self.toolbar.height())
            .show(ctx, |ui| {
                // Highlight from the format governing the caret or selection.
                let current = self.buffer.format_at_anchor();
                let alignment = self.buffer.alignment();
                toolbar_action = self.toolbar.show(ui, &current, alignment, is_dark);
            });
        if let Some(action) = toolbar_action {
            self.handle_action(ctx, action);
        }

        // Editor
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.editor.show(ui, &mut self.buffer, is_dark) {
                self.modified = true;
            }
        });

        // Save confirmation toast
        if self.toast_message.is_some() {
            let now = ctx.input(|i| i.time);
            let expires_at = *self.toast_expires_at.get_or_insert(now + TOAST_SECONDS);
            if now >= expires_at {
                self.toast_message = None;
                self.toast_expires_at = None;
            } else {
                egui::Area::new(egui::Id::new("save_toast"))
                    .anchor(egui::Align2::CENTER_BOTTOM, [0.0, -16.0])
                    .show(ctx, |ui| {
                        egui::Frame::popup(ui.style()).show(ui, |ui| {
                            if let Some(message) = &self.toast_message {
                                ui.label(message);
                            }
                        });
                    });
                ctx.request_repaint_after(std::time::Duration::from_millis(100));
            }
        }

        // Error modal
        if self.show_error_modal {
            egui::Window::new("Warning")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.label(egui::RichText::new("⚠").size(24.0));
                    ui.label(&self.error_message);
                    ui.separator();
                    if ui.button("OK").clicked() {
                        self.dismiss_error();
                    }
                });
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        info!("Saving settings on exit");
        save_config_silent(&self.settings);
    }
}

/// Apply the theme's egui visuals.
fn apply_theme(ctx: &egui::Context, theme: Theme) {
    match theme {
        Theme::Light => ctx.set_visuals(egui::Visuals::light()),
        Theme::Dark => ctx.set_visuals(egui::Visuals::dark()),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
