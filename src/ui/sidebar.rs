//! Sidebar with Explore, AI, Scheduler, and Settings tabs

use eframe::egui;

use super::scheduler::SchedulerPanel;
use crate::ai::summarizer::SummaryLength;
use crate::ai::AiTask;
use crate::app::StudyMateApp;
use crate::core::file_tree::FileNode;

/// Which sidebar tab is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SidebarTab {
    #[default]
    Explore,
    Ai,
    Scheduler,
    Settings,
}

impl SidebarTab {
    const ALL: [SidebarTab; 4] = [
        SidebarTab::Explore,
        SidebarTab::Ai,
        SidebarTab::Scheduler,
        SidebarTab::Settings,
    ];

    fn label(self) -> &'static str {
        match self {
            SidebarTab::Explore => "Explore",
            SidebarTab::Ai => "AI",
            SidebarTab::Scheduler => "Scheduler",
            SidebarTab::Settings => "Settings",
        }
    }
}

/// UI state for the AI tab
#[derive(Debug)]
pub struct AiPanelState {
    pub length: SummaryLength,
    pub output: String,
}

impl Default for AiPanelState {
    fn default() -> Self {
        Self {
            length: SummaryLength::Medium,
            output: String::new(),
        }
    }
}

/// The sidebar panel
pub struct Sidebar;

impl Sidebar {
    pub fn show(ui: &mut egui::Ui, app: &mut StudyMateApp) {
        ui.horizontal(|ui| {
            for tab in SidebarTab::ALL {
                if ui
                    .selectable_label(app.sidebar_tab == tab, tab.label())
                    .clicked()
                {
                    app.sidebar_tab = tab;
                }
            }
        });
        ui.separator();

        match app.sidebar_tab {
            SidebarTab::Explore => Self::show_explore(ui, app),
            SidebarTab::Ai => Self::show_ai(ui, app),
            SidebarTab::Scheduler => {
                let font_size = app.config.ui.sidebar_font_size;
                let changed =
                    SchedulerPanel::show(ui, &mut app.scheduler, &mut app.tasks, font_size);
                if changed {
                    app.save_tasks();
                }
            }
            SidebarTab::Settings => Self::show_settings(ui, app),
        }
    }

    fn show_explore(ui: &mut egui::Ui, app: &mut StudyMateApp) {
        ui.horizontal(|ui| {
            if ui.button("Open Folder...").clicked() {
                if let Some(path) = rfd::FileDialog::new().pick_folder() {
                    app.set_explorer_root(path);
                }
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("\u{21BB}").on_hover_text("Refresh").clicked() {
                    if let Err(e) = app.explorer.refresh() {
                        tracing::error!("Failed to refresh explorer: {e}");
                    }
                }
                if ui
                    .button("\u{2197}")
                    .on_hover_text("Open folder in file manager")
                    .clicked()
                {
                    if let Some(root) = &app.explorer.root_path {
                        if let Err(e) = open::that(root) {
                            tracing::error!("Failed to open file manager: {e}");
                        }
                    }
                }
            });
        });
        ui.separator();

        egui::ScrollArea::vertical()
            .id_salt("explorer_scroll")
            .show(ui, |ui| {
                if let Some(root) = app.explorer.root.clone() {
                    for child in &root.children {
                        Self::show_node(ui, child, app);
                    }
                    if root.children.is_empty() {
                        ui.label("Folder is empty");
                    }
                } else {
                    ui.label("No folder open");
                }
            });
    }

    /// Recursively show an explorer node
    fn show_node(ui: &mut egui::Ui, node: &FileNode, app: &mut StudyMateApp) {
        if node.is_dir {
            let id = ui.make_persistent_id(&node.path);
            egui::collapsing_header::CollapsingState::load_with_default_open(
                ui.ctx(),
                id,
                node.expanded,
            )
            .show_header(ui, |ui| {
                let icon = if node.expanded { "\u{1F4C2}" } else { "\u{1F4C1}" };
                if ui
                    .selectable_label(false, Self::sidebar_text(app, format!("{icon} {}", node.name)))
                    .clicked()
                {
                    app.explorer.toggle_expanded(&node.path);
                }
            })
            .body(|ui| {
                for child in &node.children {
                    Self::show_node(ui, child, app);
                }
            });
        } else {
            let icon = if node.is_document() {
                "\u{1F4DD}"
            } else {
                "\u{1F4C4}"
            };
            let is_active = app
                .tabs
                .get(app.active_tab)
                .and_then(|t| t.path())
                .map(|p| p == node.path)
                .unwrap_or(false);

            ui.horizontal(|ui| {
                ui.add_space(16.0);
                if ui
                    .selectable_label(
                        is_active,
                        Self::sidebar_text(app, format!("{icon} {}", node.name)),
                    )
                    .clicked()
                {
                    app.open_file(Some(node.path.clone()));
                }
            });
        }
    }

    fn sidebar_text(app: &StudyMateApp, text: String) -> egui::RichText {
        egui::RichText::new(text).size(app.config.ui.sidebar_font_size)
    }

    fn show_ai(ui: &mut egui::Ui, app: &mut StudyMateApp) {
        ui.horizontal(|ui| {
            ui.label("Summary length:");
            egui::ComboBox::from_id_salt("summary_length")
                .selected_text(app.ai_panel.length.label())
                .show_ui(ui, |ui| {
                    for length in SummaryLength::ALL {
                        ui.selectable_value(&mut app.ai_panel.length, length, length.label());
                    }
                });
        });

        let busy = app.ai.busy();
        ui.add_enabled_ui(!busy, |ui| {
            if ui.button("Summarize").clicked() {
                app.run_summarize();
            }
            if ui.button("Extract Key Points").clicked() {
                app.run_key_points();
            }
            if ui.button("Generate Mind Map").clicked() {
                app.run_mind_map();
            }
        });
        ui.add_enabled(false, egui::Button::new("Extract Online"))
            .on_disabled_hover_text("Online extraction is not available yet");

        if busy {
            ui.horizontal(|ui| {
                ui.spinner();
                let running = [AiTask::Summarize, AiTask::KeyPoints, AiTask::MindMap]
                    .into_iter()
                    .find(|t| app.ai.is_running(*t));
                if let Some(task) = running {
                    ui.label(format!("{} in progress...", task.label()));
                }
            });
        }

        if ui.button("Show Mind Map").clicked() {
            app.mind_map.open = true;
        }

        ui.separator();
        egui::ScrollArea::vertical()
            .id_salt("ai_output_scroll")
            .show(ui, |ui| {
                if app.ai_panel.output.is_empty() {
                    ui.label("Results appear here.");
                } else {
                    ui.add(
                        egui::Label::new(
                            egui::RichText::new(&app.ai_panel.output)
                                .size(app.config.ui.sidebar_font_size),
                        )
                        .selectable(true),
                    );
                }
            });
    }

    fn show_settings(ui: &mut egui::Ui, app: &mut StudyMateApp) {
        let mut changed = false;

        if ui.button("Toggle Theme").clicked() {
            app.config.ui.theme = if app.config.is_dark_theme() {
                "light".to_string()
            } else {
                "dark".to_string()
            };
            changed = true;
        }
        ui.separator();

        ui.label("Editor font");
        egui::ComboBox::from_id_salt("editor_font_family")
            .selected_text(app.config.editor.font_family.clone())
            .show_ui(ui, |ui| {
                for family in ["monospace", "proportional"] {
                    changed |= ui
                        .selectable_value(
                            &mut app.config.editor.font_family,
                            family.to_string(),
                            family,
                        )
                        .changed();
                }
            });
        changed |= ui
            .add(egui::Slider::new(&mut app.config.editor.font_size, 8.0..=32.0).text("Font size"))
            .changed();
        changed |= ui
            .checkbox(&mut app.config.editor.word_wrap, "Word wrap")
            .changed();

        ui.separator();
        ui.label("Sidebar");
        changed |= ui
            .add(
                egui::Slider::new(&mut app.config.ui.sidebar_width, 150.0..=450.0)
                    .text("Width"),
            )
            .changed();
        changed |= ui
            .add(
                egui::Slider::new(&mut app.config.ui.sidebar_font_size, 10.0..=20.0)
                    .text("Font size"),
            )
            .changed();
        changed |= ui
            .checkbox(&mut app.config.ui.status_bar_visible, "Show status bar")
            .changed();

        if changed {
            app.save_config();
        }
    }
}
