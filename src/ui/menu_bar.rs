//! Top menu bar

use eframe::egui;

use crate::app::StudyMateApp;

/// Application menu bar
pub struct MenuBar;

impl MenuBar {
    pub fn show(ctx: &egui::Context, app: &mut StudyMateApp) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                Self::file_menu(ui, ctx, app);
                Self::edit_menu(ui, app);
                Self::view_menu(ui, app);
                Self::help_menu(ui, app);
            });
        });
    }

    fn file_menu(ui: &mut egui::Ui, ctx: &egui::Context, app: &mut StudyMateApp) {
        ui.menu_button("File", |ui| {
            if ui.button("New").clicked() {
                app.new_file(false);
                ui.close();
            }
            if ui.button("Open...").clicked() {
                app.open_file(None);
                ui.close();
            }
            ui.menu_button("Open Recent", |ui| {
                if app.config.recent_files.is_empty() {
                    ui.label("No recent files");
                }
                for path in app.config.recent_files.clone() {
                    let name = path
                        .file_name()
                        .map(|s| s.to_string_lossy().to_string())
                        .unwrap_or_else(|| path.display().to_string());
                    if ui.button(name).on_hover_text(path.display().to_string()).clicked() {
                        app.open_file(Some(path));
                        ui.close();
                    }
                }
            });
            if ui.button("Open ODT as PDF...").clicked() {
                app.open_odt_as_pdf();
                ui.close();
            }
            ui.separator();
            if ui.button("Save").clicked() {
                app.save_active_tab();
                ui.close();
            }
            if ui.button("Save As...").clicked() {
                app.save_active_tab_as();
                ui.close();
            }
            ui.separator();
            if ui.button("Close").clicked() {
                app.request_close_tab(app.active_tab);
                ui.close();
            }
            if ui.button("Close All").clicked() {
                app.close_all_tabs();
                ui.close();
            }
            ui.separator();
            if ui.button("Exit").clicked() {
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
        });
    }

    fn edit_menu(ui: &mut egui::Ui, app: &mut StudyMateApp) {
        ui.menu_button("Edit", |ui| {
            if ui.button("Find/Replace...").clicked() {
                app.find.open = !app.find.open;
                ui.close();
            }
        });
    }

    fn view_menu(ui: &mut egui::Ui, app: &mut StudyMateApp) {
        ui.menu_button("View", |ui| {
            if ui.button("Zoom In").clicked() {
                app.zoom_editor(1.0);
                ui.close();
            }
            if ui.button("Zoom Out").clicked() {
                app.zoom_editor(-1.0);
                ui.close();
            }
            if ui.button("Reset Zoom").clicked() {
                app.reset_editor_zoom();
                ui.close();
            }
            ui.separator();
            if ui
                .selectable_label(app.config.ui.sidebar_visible, "Toggle Sidebar")
                .clicked()
            {
                app.config.ui.sidebar_visible = !app.config.ui.sidebar_visible;
                app.save_config();
                ui.close();
            }
            if ui
                .selectable_label(app.config.ui.status_bar_visible, "Toggle Status Bar")
                .clicked()
            {
                app.config.ui.status_bar_visible = !app.config.ui.status_bar_visible;
                app.save_config();
                ui.close();
            }
            ui.separator();
            if ui
                .selectable_label(app.config.is_dark_theme(), "Dark Mode")
                .clicked()
            {
                app.config.ui.theme = if app.config.is_dark_theme() {
                    "light".to_string()
                } else {
                    "dark".to_string()
                };
                app.save_config();
                ui.close();
            }
        });
    }

    fn help_menu(ui: &mut egui::Ui, app: &mut StudyMateApp) {
        ui.menu_button("Help", |ui| {
            if ui.button("About").clicked() {
                app.about_open = true;
                ui.close();
            }
        });
    }
}
