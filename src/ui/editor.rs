//! Editor area: tab strip and text-editing surface

use eframe::egui;

use super::pdf_viewer::PdfViewerPanel;
use crate::app::{StudyMateApp, Tab};

/// Central editor panel
pub struct EditorPanel;

impl EditorPanel {
    pub fn show(ui: &mut egui::Ui, app: &mut StudyMateApp) {
        Self::show_tabs(ui, app);
        ui.separator();

        let active = app.active_tab;
        match app.tabs.get(active) {
            Some(Tab::Editor(_)) => Self::show_editor(ui, app),
            Some(Tab::Pdf(_)) => {
                if let Some(Tab::Pdf(state)) = app.tabs.get_mut(active) {
                    PdfViewerPanel::show(ui, state);
                }
            }
            None => {}
        }
    }

    /// Tab strip with close buttons
    fn show_tabs(ui: &mut egui::Ui, app: &mut StudyMateApp) {
        let tabs: Vec<(String, bool, String)> = app
            .tabs
            .iter()
            .map(|tab| {
                (
                    tab.title(),
                    tab.modified(),
                    tab.path()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "New unsaved file".to_string()),
                )
            })
            .collect();

        let mut activate = None;
        let mut close_requested = None;
        ui.horizontal_wrapped(|ui| {
            for (i, (title, modified, tooltip)) in tabs.iter().enumerate() {
                let label = if *modified {
                    format!("{title}*")
                } else {
                    title.clone()
                };
                let response = ui
                    .selectable_label(i == app.active_tab, label)
                    .on_hover_text(tooltip);
                if response.clicked() {
                    activate = Some(i);
                }
                if ui.small_button("✕").on_hover_text("Close tab").clicked() {
                    close_requested = Some(i);
                }
            }
        });

        if let Some(i) = activate {
            app.active_tab = i;
        }
        if let Some(i) = close_requested {
            app.request_close_tab(i);
        }
    }

    fn show_editor(ui: &mut egui::Ui, app: &mut StudyMateApp) {
        let font = app.editor_font();
        let wrap = app.config.editor.word_wrap;
        let mut cursor = app.editor_cursor;

        if let Some(Tab::Editor(doc)) = app.tabs.get_mut(app.active_tab) {
            let scroll = if wrap {
                egui::ScrollArea::vertical()
            } else {
                egui::ScrollArea::both()
            };
            scroll.id_salt("editor_scroll").show(ui, |ui| {
                let width = if wrap {
                    ui.available_width()
                } else {
                    f32::INFINITY
                };
                let output = egui::TextEdit::multiline(&mut doc.content)
                    .font(font.clone())
                    .code_editor()
                    .hint_text("Create or open a file to start studying...")
                    .desired_width(width)
                    .desired_rows(30)
                    .show(ui);

                if output.response.changed() {
                    doc.modified = true;
                }
                if let Some(range) = output.state.cursor.char_range() {
                    cursor = Some(range.primary.index);
                }
            });
        }

        app.editor_cursor = cursor;
    }
}
