//! Scheduler tab: quick-add bar and the task list

use eframe::egui;
use egui_extras::{Column, TableBuilder};

use crate::core::tasks::{Priority, TaskStatus, TaskStore};

/// UI state for the scheduler tab
#[derive(Debug)]
pub struct SchedulerState {
    pub input: String,
    pub priority: Priority,
    pub confirm_clear: bool,
}

impl Default for SchedulerState {
    fn default() -> Self {
        Self {
            input: String::new(),
            priority: Priority::Medium,
            confirm_clear: false,
        }
    }
}

/// Indicator color for a priority
pub fn priority_color(priority: Priority) -> egui::Color32 {
    match priority {
        Priority::High => egui::Color32::from_rgb(0xff, 0x47, 0x57),
        Priority::Medium => egui::Color32::from_rgb(0xff, 0xa5, 0x02),
        Priority::Low => egui::Color32::from_rgb(0x2e, 0xd5, 0x73),
    }
}

/// Scheduler panel
pub struct SchedulerPanel;

impl SchedulerPanel {
    /// Render the panel; returns true when the task list changed and
    /// should be persisted
    pub fn show(
        ui: &mut egui::Ui,
        state: &mut SchedulerState,
        tasks: &mut TaskStore,
        font_size: f32,
    ) -> bool {
        let mut changed = false;

        ui.horizontal(|ui| {
            let response = ui.add(
                egui::TextEdit::singleline(&mut state.input)
                    .hint_text("Add a new task and press Enter...")
                    .desired_width(ui.available_width() - 90.0),
            );
            if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                if tasks.add(&state.input, state.priority).is_some() {
                    state.input.clear();
                    changed = true;
                }
                response.request_focus();
            }

            egui::ComboBox::from_id_salt("task_priority")
                .selected_text(state.priority.label())
                .show_ui(ui, |ui| {
                    for priority in [Priority::Low, Priority::Medium, Priority::High] {
                        ui.selectable_value(&mut state.priority, priority, priority.label());
                    }
                });
        });

        ui.separator();

        let row_height = font_size + 10.0;
        let mut toggled = None;
        TableBuilder::new(ui)
            .striped(true)
            .column(Column::exact(8.0))
            .column(Column::auto())
            .column(Column::remainder())
            .body(|mut body| {
                for task in &tasks.tasks {
                    body.row(row_height, |mut row| {
                        row.col(|ui| {
                            let (rect, _) = ui.allocate_exact_size(
                                egui::vec2(4.0, row_height - 4.0),
                                egui::Sense::hover(),
                            );
                            ui.painter()
                                .rect_filled(rect, 1.0, priority_color(task.priority));
                        });
                        row.col(|ui| {
                            let mut done = task.status == TaskStatus::Done;
                            if ui.checkbox(&mut done, "").changed() {
                                toggled = Some(task.id);
                            }
                        });
                        row.col(|ui| {
                            let text = egui::RichText::new(&task.title).size(font_size);
                            if task.status == TaskStatus::Done {
                                ui.label(text.strikethrough().weak());
                            } else {
                                ui.label(text);
                            }
                        });
                    });
                }
            });
        if let Some(id) = toggled {
            tasks.toggle(id);
            changed = true;
        }

        ui.separator();
        if ui.button("Clear Scheduler").clicked() && !tasks.is_empty() {
            if tasks.has_pending() {
                state.confirm_clear = true;
            } else {
                tasks.clear();
                changed = true;
            }
        }

        if state.confirm_clear {
            egui::Window::new("Confirm Clear")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ui.ctx(), |ui| {
                    ui.label(
                        "You have incomplete tasks. Are you sure you want to clear \
                         the entire list?",
                    );
                    ui.horizontal(|ui| {
                        if ui.button("Yes").clicked() {
                            tasks.clear();
                            changed = true;
                            state.confirm_clear = false;
                        }
                        if ui.button("No").clicked() {
                            state.confirm_clear = false;
                        }
                    });
                });
        }

        changed
    }
}
