//! Bottom status bar: transient messages and editor info

use std::time::{Duration, Instant};

use eframe::egui;

use crate::app::{StudyMateApp, Tab};

/// Transient status message state
#[derive(Debug, Default)]
pub struct StatusState {
    message: Option<(String, Instant)>,
}

impl StatusState {
    /// Show a message for `secs` seconds
    pub fn show_message(&mut self, text: impl Into<String>, secs: u64) {
        self.message = Some((text.into(), Instant::now() + Duration::from_secs(secs)));
    }

    /// The current message, if it has not expired
    pub fn current(&mut self) -> Option<&str> {
        let expired = matches!(&self.message, Some((_, deadline)) if *deadline <= Instant::now());
        if expired {
            self.message = None;
            return None;
        }
        match &self.message {
            Some((text, _)) => Some(text.as_str()),
            None => None,
        }
    }
}

/// Status bar panel
pub struct StatusBar;

impl StatusBar {
    pub fn show(ctx: &egui::Context, app: &mut StudyMateApp) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let message = app
                    .status
                    .current()
                    .unwrap_or("Ready")
                    .to_string();
                ui.label(message);

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if let Some(Tab::Editor(doc)) = app.tabs.get(app.active_tab) {
                        let (line, col) = doc.line_col(app.editor_cursor.unwrap_or(0));
                        ui.label(format!(
                            "  Ln {}, Col {}   |   Words: {}  ",
                            line,
                            col,
                            doc.word_count()
                        ));
                    }
                });
            });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_visible_then_expires() {
        let mut status = StatusState::default();
        status.show_message("Saved to notes.txt", 3);
        assert_eq!(status.current(), Some("Saved to notes.txt"));

        // Force expiry.
        status.message = Some(("old".to_string(), Instant::now() - Duration::from_secs(1)));
        assert_eq!(status.current(), None);
        assert!(status.message.is_none());
    }
}
