//! Main application state and UI coordination

use std::path::{Path, PathBuf};

use eframe::egui;

use crate::ai::{key_points, outline, summarizer, AiRuntime, AiTask};
use crate::core::config::AppConfig;
use crate::core::document::Document;
use crate::core::file_tree::FileTree;
use crate::core::formats::{self, FileKind};
use crate::core::tasks::TaskStore;
use crate::ui::editor::EditorPanel;
use crate::ui::find_replace::{FindReplaceBar, FindReplaceState};
use crate::ui::menu_bar::MenuBar;
use crate::ui::mind_map::{MindMapState, MindMapWindow};
use crate::ui::pdf_viewer::PdfViewState;
use crate::ui::scheduler::SchedulerState;
use crate::ui::sidebar::{AiPanelState, Sidebar, SidebarTab};
use crate::ui::status_bar::{StatusBar, StatusState};

/// An open tab: a text document or a rendered PDF
pub enum Tab {
    Editor(Document),
    Pdf(PdfViewState),
}

impl Tab {
    pub fn title(&self) -> String {
        match self {
            Tab::Editor(doc) => doc.title(),
            Tab::Pdf(state) => state.title(),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            Tab::Editor(doc) => doc.path.as_deref(),
            Tab::Pdf(state) => Some(&state.path),
        }
    }

    pub fn modified(&self) -> bool {
        match self {
            Tab::Editor(doc) => doc.modified,
            Tab::Pdf(_) => false,
        }
    }
}

/// Outcome of the save-changes prompt
#[derive(Debug, Clone, Copy)]
enum CloseAction {
    Save,
    Discard,
    Cancel,
}

/// Main application state
pub struct StudyMateApp {
    /// Application configuration
    pub config: AppConfig,
    /// Open tabs
    pub tabs: Vec<Tab>,
    /// Index of the active tab
    pub active_tab: usize,
    /// Explore-tab file tree
    pub explorer: FileTree,
    /// Scheduler task list
    pub tasks: TaskStore,
    /// Background AI runtime
    pub ai: AiRuntime,
    /// AI tab UI state
    pub ai_panel: AiPanelState,
    /// Active sidebar tab
    pub sidebar_tab: SidebarTab,
    /// Scheduler tab UI state
    pub scheduler: SchedulerState,
    /// Mind-map window state
    pub mind_map: MindMapState,
    /// Find/replace state
    pub find: FindReplaceState,
    /// Status bar state
    pub status: StatusState,
    /// Character index of the editor cursor, for the status bar
    pub editor_cursor: Option<usize>,
    /// Whether the About window is open
    pub about_open: bool,
    /// Tab awaiting the save-changes prompt
    pending_close: Option<usize>,
    /// Close All in progress; keeps prompting through remaining tabs
    closing_all: bool,
    /// Conversion failure shown as a modal
    convert_error: Option<String>,
    applied_theme: Option<String>,
    window_title: String,
}

impl StudyMateApp {
    /// Create the application instance
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let config = AppConfig::load().unwrap_or_else(|e| {
            tracing::error!("Failed to load config: {e}");
            AppConfig::default()
        });
        let mut app = Self::with_state(
            config,
            TaskStore::load(),
            AiRuntime::new(Some(cc.egui_ctx.clone())),
        );
        // Warm the summarizer so the first request does not pay for the load.
        app.ai.submit(AiTask::Preload, || {
            summarizer::preload();
            Ok(String::new())
        });
        app
    }

    fn with_state(config: AppConfig, tasks: TaskStore, ai: AiRuntime) -> Self {
        let explorer = config
            .explorer_root
            .as_ref()
            .and_then(|p| FileTree::from_path(p).ok())
            .unwrap_or_default();

        Self {
            config,
            tabs: vec![Tab::Editor(Document::untitled())],
            active_tab: 0,
            explorer,
            tasks,
            ai,
            ai_panel: AiPanelState::default(),
            sidebar_tab: SidebarTab::default(),
            scheduler: SchedulerState::default(),
            mind_map: MindMapState::default(),
            find: FindReplaceState::default(),
            status: StatusState::default(),
            editor_cursor: None,
            about_open: false,
            pending_close: None,
            closing_all: false,
            convert_error: None,
            applied_theme: None,
            window_title: String::new(),
        }
    }

    // ----- tab lifecycle -----

    /// Focus an already-open tab for `path`; true when one was found
    fn focus_tab_for_path(&mut self, path: &Path) -> bool {
        if let Some(i) = self.tabs.iter().position(|t| t.path() == Some(path)) {
            self.active_tab = i;
            return true;
        }
        false
    }

    /// Add a tab and make it active; a lone pristine untitled tab is
    /// replaced by the newcomer
    fn push_tab(&mut self, tab: Tab) {
        if self.tabs.len() == 1 {
            if let Some(Tab::Editor(doc)) = self.tabs.first() {
                if doc.path.is_none() && doc.content.is_empty() && !doc.modified {
                    self.tabs.clear();
                }
            }
        }
        self.tabs.push(tab);
        self.active_tab = self.tabs.len() - 1;
    }

    /// Create a new file; `is_initial_tab` skips the location prompt and
    /// opens an untitled buffer
    pub fn new_file(&mut self, is_initial_tab: bool) {
        let mut file_path = None;
        if !is_initial_tab {
            let Some(path) = rfd::FileDialog::new()
                .add_filter("Text Files", &["txt"])
                .add_filter("Markdown Files", &["md", "markdown"])
                .add_filter("Python Files", &["py"])
                .save_file()
            else {
                return;
            };
            if self.focus_tab_for_path(&path) {
                return;
            }
            if let Err(e) = std::fs::write(&path, "") {
                self.status.show_message(format!("Error creating file: {e}"), 5);
                return;
            }
            self.reveal_in_explorer(&path);
            file_path = Some(path);
        }
        self.push_tab(Tab::Editor(Document::with_content(file_path, String::new())));
    }

    /// Open a file, prompting when no path is given
    pub fn open_file(&mut self, path: Option<PathBuf>) {
        let path = match path {
            Some(p) => p,
            None => {
                let picked = rfd::FileDialog::new()
                    .add_filter(
                        "All Supported",
                        &["txt", "md", "markdown", "py", "pdf", "docx", "odt"],
                    )
                    .add_filter("Text Files", &["txt"])
                    .add_filter("Markdown Files", &["md", "markdown"])
                    .add_filter("Python Files", &["py"])
                    .add_filter("PDF Files", &["pdf"])
                    .add_filter("Word Documents", &["docx"])
                    .add_filter("OpenDocument Text", &["odt"])
                    .pick_file();
                match picked {
                    Some(p) => p,
                    None => return,
                }
            }
        };

        if self.focus_tab_for_path(&path) {
            return;
        }
        self.load_file(path);
    }

    fn load_file(&mut self, path: PathBuf) {
        let tab = match formats::classify(&path) {
            FileKind::Pdf => Tab::Pdf(PdfViewState::open(&path)),
            FileKind::Text => match formats::read_to_text(&path) {
                Ok(content) => Tab::Editor(Document::with_content(Some(path.clone()), content)),
                Err(e) => {
                    tracing::error!("Error loading file: {e}");
                    self.status.show_message("Error loading file", 5);
                    return;
                }
            },
        };
        self.push_tab(tab);

        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        self.status
            .show_message(format!("Successfully loaded {name}"), 5);
        self.config.add_recent_file(path.clone());
        self.save_config();
        self.reveal_in_explorer(&path);
    }

    /// Convert an ODT file and open the result in the PDF viewer
    pub fn open_odt_as_pdf(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("OpenDocument Text", &["odt"])
            .pick_file()
        else {
            return;
        };

        let dir = match tempfile::tempdir() {
            Ok(dir) => dir,
            Err(e) => {
                self.convert_error = Some(format!("Could not create a working directory: {e}"));
                return;
            }
        };

        match formats::convert_odt_to_pdf(&path, dir.path()) {
            Ok(pdf_path) => {
                let state = PdfViewState::open(&pdf_path).with_temp_dir(dir);
                self.push_tab(Tab::Pdf(state));
                self.config.add_recent_file(path);
                self.save_config();
            }
            Err(e) => {
                tracing::error!("ODT conversion failed: {e}");
                self.convert_error = Some(e.to_string());
            }
        }
    }

    /// Save the active tab
    pub fn save_active_tab(&mut self) {
        self.save_tab(self.active_tab);
    }

    /// Save As for the active tab
    pub fn save_active_tab_as(&mut self) {
        self.save_tab_as(self.active_tab);
    }

    /// Save a tab; false when the user cancelled or the write failed
    fn save_tab(&mut self, index: usize) -> bool {
        let needs_save_as = match self.tabs.get(index) {
            Some(Tab::Editor(doc)) => doc.path.is_none(),
            // PDF tabs have nothing to save.
            _ => return true,
        };
        if needs_save_as {
            return self.save_tab_as(index);
        }

        if let Some(Tab::Editor(doc)) = self.tabs.get_mut(index) {
            match doc.save() {
                Ok(()) => {
                    let title = doc.title();
                    self.status.show_message(format!("Saved to {title}"), 3);
                    true
                }
                Err(e) => {
                    tracing::error!("Error saving file: {e}");
                    self.status.show_message(format!("Error saving file: {e}"), 5);
                    false
                }
            }
        } else {
            true
        }
    }

    fn save_tab_as(&mut self, index: usize) -> bool {
        let current_name = match self.tabs.get(index) {
            Some(Tab::Editor(doc)) => doc.title(),
            _ => return true,
        };

        let Some(path) = rfd::FileDialog::new()
            .set_file_name(current_name)
            .add_filter("Text Files", &["txt"])
            .add_filter("Markdown Files", &["md"])
            .save_file()
        else {
            return false;
        };

        let saved = match self.tabs.get_mut(index) {
            Some(Tab::Editor(doc)) => match doc.save_as(&path) {
                Ok(()) => true,
                Err(e) => {
                    tracing::error!("Error saving file: {e}");
                    self.status.show_message(format!("Error saving file: {e}"), 5);
                    false
                }
            },
            _ => true,
        };

        if saved {
            let name = path
                .file_name()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_default();
            self.status.show_message(format!("Saved to {name}"), 3);
            self.config.add_recent_file(path.clone());
            self.save_config();
            self.reveal_in_explorer(&path);
        }
        saved
    }

    /// Close a tab, prompting first when it has unsaved changes
    pub fn request_close_tab(&mut self, index: usize) {
        let modified = self.tabs.get(index).map(|t| t.modified()).unwrap_or(false);
        if modified {
            self.pending_close = Some(index);
        } else {
            self.close_tab(index);
        }
    }

    fn close_tab(&mut self, index: usize) {
        if index >= self.tabs.len() {
            return;
        }
        // Dropping a converted-PDF tab removes its temp directory with it.
        self.tabs.remove(index);
        if self.tabs.is_empty() {
            self.active_tab = 0;
            self.new_file(true);
        } else if self.active_tab >= self.tabs.len() {
            self.active_tab = self.tabs.len() - 1;
        }
    }

    /// Close every tab, prompting per modified tab
    pub fn close_all_tabs(&mut self) {
        self.tabs.retain(|t| t.modified());
        if self.tabs.is_empty() {
            self.closing_all = false;
            self.active_tab = 0;
            self.new_file(true);
        } else {
            self.closing_all = true;
            self.active_tab = 0;
            self.pending_close = Some(0);
        }
    }

    // ----- explorer -----

    /// Point the Explore tab at a directory
    pub fn set_explorer_root(&mut self, path: PathBuf) {
        match FileTree::from_path(&path) {
            Ok(tree) => {
                self.explorer = tree;
                self.config.explorer_root = Some(path);
                self.save_config();
            }
            Err(e) => {
                tracing::error!("Failed to read directory: {e}");
                self.status.show_message("Error reading directory", 5);
            }
        }
    }

    /// Show the file's directory in the Explore tab
    fn reveal_in_explorer(&mut self, path: &Path) {
        let Some(parent) = path.parent() else {
            return;
        };
        let inside_root = self
            .explorer
            .root_path
            .as_deref()
            .map(|root| parent.starts_with(root))
            .unwrap_or(false);
        if inside_root {
            if let Err(e) = self.explorer.refresh() {
                tracing::error!("Failed to refresh explorer: {e}");
            }
        } else {
            self.set_explorer_root(parent.to_path_buf());
        }
    }

    // ----- AI services -----

    /// The active tab's text, extracting from PDFs on demand
    fn study_text(&mut self) -> Option<String> {
        match self.tabs.get_mut(self.active_tab) {
            Some(Tab::Editor(doc)) => Some(doc.content.clone()),
            Some(Tab::Pdf(state)) => match state.extract_text() {
                Ok(text) => Some(text),
                Err(e) => {
                    self.status
                        .show_message(format!("Text extraction failed: {e}"), 5);
                    None
                }
            },
            None => None,
        }
    }

    pub fn run_summarize(&mut self) {
        let Some(text) = self.study_text() else {
            return;
        };
        let length = self.ai_panel.length;
        let accepted = self
            .ai
            .submit(AiTask::Summarize, move || summarizer::summarize(&text, length));
        if !accepted {
            self.status.show_message("Summarization is already running", 3);
        }
    }

    pub fn run_key_points(&mut self) {
        let Some(text) = self.study_text() else {
            return;
        };
        let accepted = self
            .ai
            .submit(AiTask::KeyPoints, move || key_points::extract(&text));
        if !accepted {
            self.status
                .show_message("Key points extraction is already running", 3);
        }
    }

    pub fn run_mind_map(&mut self) {
        let Some(text) = self.study_text() else {
            return;
        };
        let accepted = self
            .ai
            .submit(AiTask::MindMap, move || outline::generate(&text));
        if !accepted {
            self.status
                .show_message("Mind map generation is already running", 3);
        }
    }

    fn handle_ai_events(&mut self) {
        for event in self.ai.poll() {
            match event.task {
                AiTask::Preload => {
                    if let Err(e) = event.outcome {
                        tracing::debug!("Preload failed: {e}");
                    }
                }
                AiTask::MindMap => match event.outcome {
                    Ok(text) => {
                        self.ai_panel.output = text.clone();
                        if text == outline::EMPTY_INPUT_MESSAGE {
                            self.status.show_message(text, 5);
                        } else {
                            match self.mind_map.set_outline(text) {
                                Ok(()) => {
                                    self.mind_map.open = true;
                                    self.status.show_message("Mind map ready", 5);
                                }
                                Err(e) => {
                                    self.status
                                        .show_message(format!("Mind map parse failed: {e}"), 5);
                                }
                            }
                        }
                    }
                    Err(message) => {
                        self.ai_panel.output = message.clone();
                        self.status.show_message(message, 5);
                    }
                },
                task => match event.outcome {
                    Ok(text) => {
                        self.ai_panel.output = text;
                        self.status
                            .show_message(format!("{} complete", task.label()), 5);
                    }
                    Err(message) => {
                        self.ai_panel.output = message.clone();
                        self.status.show_message(message, 5);
                    }
                },
            }
        }
    }

    // ----- settings -----

    /// Persist the configuration, logging failures
    pub fn save_config(&mut self) {
        if let Err(e) = self.config.save() {
            tracing::error!("Failed to save config: {e}");
        }
    }

    /// Persist the task list, surfacing failures in the status bar
    pub fn save_tasks(&mut self) {
        if let Err(e) = self.tasks.save() {
            tracing::error!("Failed to save tasks: {e}");
            self.status.show_message("Error saving tasks", 5);
        }
    }

    /// Font for the editor surface, from the configured family and size
    pub fn editor_font(&self) -> egui::FontId {
        let size = self.config.editor.font_size;
        match self.config.editor.font_family.as_str() {
            "proportional" => egui::FontId::proportional(size),
            _ => egui::FontId::monospace(size),
        }
    }

    pub fn zoom_editor(&mut self, delta: f32) {
        self.config.editor.font_size = (self.config.editor.font_size + delta).clamp(8.0, 32.0);
        self.save_config();
    }

    pub fn reset_editor_zoom(&mut self) {
        self.config.editor.font_size = 14.0;
        self.save_config();
    }

    fn apply_theme(&mut self, ctx: &egui::Context) {
        let theme = self.config.ui.theme.clone();
        if self.applied_theme.as_deref() != Some(theme.as_str()) {
            if theme == "dark" {
                ctx.set_visuals(egui::Visuals::dark());
            } else {
                ctx.set_visuals(egui::Visuals::light());
            }
            self.applied_theme = Some(theme);
        }
    }

    fn update_window_title(&mut self, ctx: &egui::Context) {
        let title = match self.tabs.get(self.active_tab) {
            Some(tab) => format!("{} - StudyMate", tab.title()),
            None => "StudyMate".to_string(),
        };
        if title != self.window_title {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(title.clone()));
            self.window_title = title;
        }
    }

    // ----- frame plumbing -----

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        // Read the input state first; dialogs opened by the handlers must
        // not run under the input lock.
        let (new_file, open, save, save_as, close, find, toggle_sidebar) = ctx.input(|i| {
            let ctrl = i.modifiers.ctrl;
            (
                ctrl && i.key_pressed(egui::Key::N),
                ctrl && i.key_pressed(egui::Key::O),
                ctrl && !i.modifiers.shift && i.key_pressed(egui::Key::S),
                ctrl && i.modifiers.shift && i.key_pressed(egui::Key::S),
                ctrl && i.key_pressed(egui::Key::W),
                ctrl && i.key_pressed(egui::Key::F),
                ctrl && i.key_pressed(egui::Key::M),
            )
        });

        if new_file {
            self.new_file(false);
        }
        if open {
            self.open_file(None);
        }
        if save {
            self.save_active_tab();
        }
        if save_as {
            self.save_active_tab_as();
        }
        if close {
            self.request_close_tab(self.active_tab);
        }
        if find {
            self.find.open = !self.find.open;
        }
        if toggle_sidebar {
            self.config.ui.sidebar_visible = !self.config.ui.sidebar_visible;
        }
    }

    fn show_close_prompt(&mut self, ctx: &egui::Context) {
        let Some(index) = self.pending_close else {
            return;
        };
        let name = self.tabs.get(index).map(|t| t.title()).unwrap_or_default();

        let mut action = None;
        egui::Window::new("Save Changes?")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(format!(
                    "Do you want to save the changes you made to '{name}'?"
                ));
                ui.horizontal(|ui| {
                    if ui.button("Save").clicked() {
                        action = Some(CloseAction::Save);
                    }
                    if ui.button("Discard").clicked() {
                        action = Some(CloseAction::Discard);
                    }
                    if ui.button("Cancel").clicked() {
                        action = Some(CloseAction::Cancel);
                    }
                });
            });

        match action {
            Some(CloseAction::Save) => {
                self.pending_close = None;
                if self.save_tab(index) {
                    self.close_tab(index);
                    if self.closing_all {
                        self.close_all_tabs();
                    }
                } else {
                    self.closing_all = false;
                }
            }
            Some(CloseAction::Discard) => {
                self.pending_close = None;
                self.close_tab(index);
                if self.closing_all {
                    self.close_all_tabs();
                }
            }
            Some(CloseAction::Cancel) => {
                self.pending_close = None;
                self.closing_all = false;
            }
            None => {}
        }
    }

    fn show_convert_error(&mut self, ctx: &egui::Context) {
        let Some(message) = self.convert_error.clone() else {
            return;
        };
        let mut dismissed = false;
        egui::Window::new("Conversion Failed")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(message);
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });
        if dismissed {
            self.convert_error = None;
        }
    }

    fn show_about(&mut self, ctx: &egui::Context) {
        if !self.about_open {
            return;
        }
        let mut open = self.about_open;
        egui::Window::new("About StudyMate")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.heading("StudyMate");
                ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
                ui.label("Note-taking and study companion with AI-assisted summaries.");
            });
        self.about_open = open;
    }
}

impl eframe::App for StudyMateApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_theme(ctx);
        self.handle_ai_events();
        self.handle_shortcuts(ctx);
        self.update_window_title(ctx);

        MenuBar::show(ctx, self);

        let find_message = {
            let doc = match self.tabs.get_mut(self.active_tab) {
                Some(Tab::Editor(doc)) => Some(doc),
                _ => None,
            };
            FindReplaceBar::show(ctx, &mut self.find, doc)
        };
        if let Some(message) = find_message {
            self.status.show_message(message, 3);
        }

        if self.config.ui.sidebar_visible {
            egui::SidePanel::left("sidebar")
                .resizable(true)
                .default_width(self.config.ui.sidebar_width)
                .min_width(150.0)
                .show(ctx, |ui| {
                    Sidebar::show(ui, self);
                });
        }

        if self.config.ui.status_bar_visible {
            StatusBar::show(ctx, self);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            EditorPanel::show(ui, self);
        });

        let dark_theme = self.config.is_dark_theme();
        if let Some(message) = MindMapWindow::show(ctx, &mut self.mind_map, dark_theme) {
            self.status.show_message(message, 5);
        }

        self.show_close_prompt(ctx);
        self.show_convert_error(ctx);
        self.show_about(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_app() -> StudyMateApp {
        StudyMateApp::with_state(
            AppConfig::default(),
            TaskStore::default(),
            AiRuntime::new(None),
        )
    }

    #[test]
    fn test_starts_with_untitled_tab() {
        let app = test_app();
        assert_eq!(app.tabs.len(), 1);
        assert_eq!(app.tabs[0].title(), "Untitled");
        assert!(!app.tabs[0].modified());
    }

    #[test]
    fn test_push_tab_replaces_pristine_untitled() {
        let mut app = test_app();
        app.push_tab(Tab::Editor(Document::with_content(
            Some(PathBuf::from("/notes/a.txt")),
            "a".to_string(),
        )));
        assert_eq!(app.tabs.len(), 1);
        assert_eq!(app.tabs[0].title(), "a.txt");
    }

    #[test]
    fn test_push_tab_keeps_modified_untitled() {
        let mut app = test_app();
        if let Tab::Editor(doc) = &mut app.tabs[0] {
            doc.set_content("draft".to_string());
        }
        app.push_tab(Tab::Editor(Document::with_content(
            Some(PathBuf::from("/notes/a.txt")),
            "a".to_string(),
        )));
        assert_eq!(app.tabs.len(), 2);
        assert_eq!(app.active_tab, 1);
    }

    #[test]
    fn test_focus_existing_tab() {
        let mut app = test_app();
        let path = PathBuf::from("/notes/a.txt");
        app.push_tab(Tab::Editor(Document::with_content(
            Some(path.clone()),
            String::new(),
        )));
        app.push_tab(Tab::Editor(Document::with_content(
            Some(PathBuf::from("/notes/b.txt")),
            String::new(),
        )));

        assert!(app.focus_tab_for_path(&path));
        assert_eq!(app.active_tab, 0);
        assert!(!app.focus_tab_for_path(Path::new("/notes/c.txt")));
    }

    #[test]
    fn test_close_last_tab_spawns_untitled() {
        let mut app = test_app();
        app.close_tab(0);
        assert_eq!(app.tabs.len(), 1);
        assert_eq!(app.tabs[0].title(), "Untitled");
    }

    #[test]
    fn test_close_tab_clamps_active_index() {
        let mut app = test_app();
        app.push_tab(Tab::Editor(Document::with_content(
            Some(PathBuf::from("/notes/a.txt")),
            String::new(),
        )));
        app.push_tab(Tab::Editor(Document::with_content(
            Some(PathBuf::from("/notes/b.txt")),
            String::new(),
        )));
        assert_eq!(app.active_tab, 1);

        app.close_tab(1);
        assert_eq!(app.active_tab, 0);
        assert_eq!(app.tabs.len(), 1);
    }

    #[test]
    fn test_request_close_modified_tab_prompts() {
        let mut app = test_app();
        if let Tab::Editor(doc) = &mut app.tabs[0] {
            doc.set_content("unsaved".to_string());
        }
        app.request_close_tab(0);
        assert_eq!(app.pending_close, Some(0));
        assert_eq!(app.tabs.len(), 1);
    }

    #[test]
    fn test_close_all_keeps_modified_for_prompt() {
        let mut app = test_app();
        app.push_tab(Tab::Editor(Document::with_content(
            Some(PathBuf::from("/notes/a.txt")),
            String::new(),
        )));
        let mut dirty = Document::with_content(Some(PathBuf::from("/notes/b.txt")), String::new());
        dirty.set_content("changed".to_string());
        app.push_tab(Tab::Editor(dirty));

        app.close_all_tabs();
        assert_eq!(app.tabs.len(), 1);
        assert_eq!(app.tabs[0].title(), "b.txt");
        assert_eq!(app.pending_close, Some(0));
    }
}
