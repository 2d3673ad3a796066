//! Rendered-page PDF viewer with navigation and zoom controls

use std::path::{Path, PathBuf};

use eframe::egui;

use crate::core::pdf::{dpi_for_zoom, poppler_available, PdfDocument};

const ZOOM_STEP: f32 = 1.2;
const MIN_ZOOM: f32 = 0.2;
const MAX_ZOOM: f32 = 5.0;

/// View state for one open PDF tab
pub struct PdfViewState {
    pub path: PathBuf,
    doc: Option<PdfDocument>,
    /// Load failure shown instead of the document
    pub error: Option<String>,
    pub page_count: usize,
    /// 0-based current page
    pub current_page: usize,
    pub zoom: f32,
    /// Cached texture for (page, dpi)
    texture: Option<((usize, u32), egui::TextureHandle)>,
    /// Extracted text, cached for the AI services and the fallback view
    text_cache: Option<Result<String, String>>,
    render_error: Option<String>,
    /// (page, dpi) that last failed to render, to avoid retrying each frame
    failed_key: Option<(usize, u32)>,
    use_poppler: bool,
    /// Owns conversion output for ODT-sourced tabs; dropped on close
    pub temp_dir: Option<tempfile::TempDir>,
}

impl PdfViewState {
    /// Open a PDF, capturing a load failure as an error view
    pub fn open(path: &Path) -> Self {
        let mut state = Self {
            path: path.to_path_buf(),
            doc: None,
            error: None,
            page_count: 0,
            current_page: 0,
            zoom: 1.0,
            texture: None,
            text_cache: None,
            render_error: None,
            failed_key: None,
            use_poppler: poppler_available(),
            temp_dir: None,
        };
        match PdfDocument::open(path) {
            Ok(doc) => {
                state.page_count = doc.page_count();
                state.doc = Some(doc);
            }
            Err(e) => {
                tracing::error!("Failed to load PDF {}: {e}", path.display());
                state.error = Some(format!("Failed to load PDF: {e}"));
            }
        }
        state
    }

    /// Keep a conversion directory alive for this tab's lifetime
    pub fn with_temp_dir(mut self, dir: tempfile::TempDir) -> Self {
        self.temp_dir = Some(dir);
        self
    }

    pub fn title(&self) -> String {
        self.path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "PDF".to_string())
    }

    /// Full document text for the AI services and the fallback view.
    ///
    /// Extraction runs once; both outcomes are cached.
    pub fn extract_text(&mut self) -> Result<String, String> {
        if self.text_cache.is_none() {
            let result = match &self.doc {
                Some(doc) => doc.extract_text().map_err(|e| e.to_string()),
                None => Err("PDF is not loaded".to_string()),
            };
            self.text_cache = Some(result);
        }
        self.text_cache
            .clone()
            .unwrap_or_else(|| Err("PDF is not loaded".to_string()))
    }

    pub fn go_to_previous_page(&mut self) {
        if self.current_page > 0 {
            self.current_page -= 1;
        }
    }

    pub fn go_to_next_page(&mut self) {
        if self.current_page + 1 < self.page_count {
            self.current_page += 1;
        }
    }

    /// Jump to a 1-based page number, clamped to range
    pub fn jump_to_page(&mut self, page_num: usize) {
        if self.page_count > 0 {
            self.current_page = page_num.clamp(1, self.page_count) - 1;
        }
    }

    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom * ZOOM_STEP).min(MAX_ZOOM);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = (self.zoom / ZOOM_STEP).max(MIN_ZOOM);
    }

    pub fn reset_zoom(&mut self) {
        self.zoom = 1.0;
    }

    /// Scale the current page to the given width in points
    fn fit_to_width(&mut self, available: f32) {
        if let Some((_, texture)) = &self.texture {
            let page_width = texture.size_vec2().x / self.zoom;
            if page_width > 1.0 {
                self.zoom = (available / page_width).clamp(MIN_ZOOM, MAX_ZOOM);
            }
        }
    }

    /// Make sure the cached texture matches the current page and zoom.
    ///
    /// A failed (page, dpi) is remembered and not retried until the view
    /// changes.
    fn ensure_texture(&mut self, ctx: &egui::Context) {
        let key = (self.current_page, dpi_for_zoom(self.zoom));
        if self.texture.as_ref().map(|(k, _)| *k) == Some(key) || self.failed_key == Some(key) {
            return;
        }
        let Some(doc) = &self.doc else {
            return;
        };
        match doc.render_page(self.current_page, self.zoom) {
            Ok(img) => {
                let size = [img.width() as usize, img.height() as usize];
                let color = egui::ColorImage::from_rgba_unmultiplied(size, img.as_raw());
                let texture = ctx.load_texture(
                    format!("pdf-{}-{}", self.path.display(), self.current_page),
                    color,
                    egui::TextureOptions::LINEAR,
                );
                self.texture = Some((key, texture));
                self.render_error = None;
                self.failed_key = None;
            }
            Err(e) => {
                tracing::error!("Failed to render page {}: {e}", self.current_page + 1);
                self.render_error = Some(e.to_string());
                self.failed_key = Some(key);
            }
        }
    }
}

/// PDF viewer panel
pub struct PdfViewerPanel;

impl PdfViewerPanel {
    pub fn show(ui: &mut egui::Ui, state: &mut PdfViewState) {
        if let Some(error) = state.error.clone() {
            ui.centered_and_justified(|ui| {
                ui.label(error);
            });
            return;
        }

        let content_width = ui.available_width();
        Self::show_nav_bar(ui, state, content_width);
        ui.separator();

        if state.use_poppler {
            state.ensure_texture(ui.ctx());
        }

        match (&state.texture, state.use_poppler && state.render_error.is_none()) {
            (Some((_, texture)), true) => {
                let size = texture.size_vec2();
                let id = texture.id();
                egui::ScrollArea::both()
                    .id_salt("pdf_scroll")
                    .show(ui, |ui| {
                        ui.image((id, size));
                    });
            }
            _ => Self::show_text_fallback(ui, state),
        }
    }

    fn show_nav_bar(ui: &mut egui::Ui, state: &mut PdfViewState, content_width: f32) {
        ui.horizontal(|ui| {
            if ui
                .add_enabled(state.current_page > 0, egui::Button::new("Previous"))
                .clicked()
            {
                state.go_to_previous_page();
            }
            if ui
                .add_enabled(
                    state.current_page + 1 < state.page_count,
                    egui::Button::new("Next"),
                )
                .clicked()
            {
                state.go_to_next_page();
            }

            ui.add_space(10.0);
            ui.label("Page:");
            let mut page_num = state.current_page + 1;
            if ui
                .add(egui::DragValue::new(&mut page_num).range(1..=state.page_count.max(1)))
                .changed()
            {
                state.jump_to_page(page_num);
            }
            ui.label(format!("/ {}", state.page_count));

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Fit Width").clicked() {
                    state.fit_to_width(content_width.max(100.0));
                }
                if ui.button("Reset Zoom").clicked() {
                    state.reset_zoom();
                }
                if ui.button("Zoom In").clicked() {
                    state.zoom_in();
                }
                if ui.button("Zoom Out").clicked() {
                    state.zoom_out();
                }
                ui.add_space(10.0);
                ui.label(format!("Zoom: {:.0}%", state.zoom * 100.0));
            });
        });
    }

    fn show_text_fallback(ui: &mut egui::Ui, state: &mut PdfViewState) {
        if !state.use_poppler {
            ui.label("Page rendering unavailable (install poppler-utils); showing extracted text.");
        } else if let Some(e) = &state.render_error {
            ui.label(format!("Page rendering failed: {e}"));
        }

        match state.extract_text() {
            Ok(text) => {
                egui::ScrollArea::vertical()
                    .id_salt("pdf_text_scroll")
                    .show(ui, |ui| {
                        ui.label(egui::RichText::new(text).monospace());
                    });
            }
            Err(e) => {
                ui.label(format!("Text extraction failed: {e}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare_state(page_count: usize) -> PdfViewState {
        PdfViewState {
            path: PathBuf::from("test.pdf"),
            doc: None,
            error: None,
            page_count,
            current_page: 0,
            zoom: 1.0,
            texture: None,
            text_cache: None,
            render_error: None,
            failed_key: None,
            use_poppler: false,
            temp_dir: None,
        }
    }

    #[test]
    fn test_page_navigation_clamps() {
        let mut state = bare_state(3);
        state.go_to_previous_page();
        assert_eq!(state.current_page, 0);

        state.go_to_next_page();
        state.go_to_next_page();
        state.go_to_next_page();
        assert_eq!(state.current_page, 2);

        state.jump_to_page(99);
        assert_eq!(state.current_page, 2);
        state.jump_to_page(0);
        assert_eq!(state.current_page, 0);
    }

    #[test]
    fn test_zoom_bounds() {
        let mut state = bare_state(1);
        for _ in 0..30 {
            state.zoom_in();
        }
        assert!(state.zoom <= MAX_ZOOM);

        for _ in 0..60 {
            state.zoom_out();
        }
        assert!(state.zoom >= MIN_ZOOM);

        state.reset_zoom();
        assert_eq!(state.zoom, 1.0);
    }

    #[test]
    fn test_extract_without_doc_fails() {
        let mut state = bare_state(1);
        assert!(state.extract_text().is_err());
    }
}
