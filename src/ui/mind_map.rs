//! Interactive mind-map window
//!
//! Draws the parsed graph with painter primitives; clicking a node selects
//! it and exposes its description for editing.

use eframe::egui;

use crate::graph::{parse_indented_text, spring_layout, MindMapGraph, ParseError, DEFAULT_SEED};

const NODE_RADIUS: f32 = 26.0;
const CANVAS_MARGIN: f32 = 40.0;

/// Mind-map window state
#[derive(Debug, Default)]
pub struct MindMapState {
    pub open: bool,
    /// The indented outline backing the graph
    pub outline: String,
    pub show_outline_editor: bool,
    graph: MindMapGraph,
    positions: Vec<[f32; 2]>,
    pub selected: Option<usize>,
    description_buffer: String,
}

impl MindMapState {
    /// Parse an outline and lay out the resulting graph
    pub fn set_outline(&mut self, outline: String) -> Result<(), ParseError> {
        let graph = parse_indented_text(&outline)?;
        self.positions = spring_layout(graph.node_count(), graph.edges(), DEFAULT_SEED);
        self.graph = graph;
        self.outline = outline;
        self.selected = None;
        self.description_buffer.clear();
        Ok(())
    }

    /// Drop the graph but keep the outline text for re-rendering
    pub fn clear_graph(&mut self) {
        self.graph = MindMapGraph::default();
        self.positions.clear();
        self.selected = None;
        self.description_buffer.clear();
    }
}

/// Mind-map window
pub struct MindMapWindow;

impl MindMapWindow {
    /// Render the window; returns a status message when an action ran
    pub fn show(
        ctx: &egui::Context,
        state: &mut MindMapState,
        dark_theme: bool,
    ) -> Option<String> {
        if !state.open {
            return None;
        }

        let mut message = None;
        let mut open = state.open;
        egui::Window::new("Mind Map")
            .open(&mut open)
            .default_size([720.0, 520.0])
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    if ui.button("Render Outline").clicked() {
                        let outline = state.outline.clone();
                        message = Some(match state.set_outline(outline) {
                            Ok(()) => "Mind map rendered".to_string(),
                            Err(e) => format!("Mind map parse failed: {e}"),
                        });
                    }
                    if ui.button("Clear").clicked() {
                        state.clear_graph();
                    }
                    ui.checkbox(&mut state.show_outline_editor, "Edit outline");
                });

                if state.show_outline_editor {
                    ui.add(
                        egui::TextEdit::multiline(&mut state.outline)
                            .font(egui::TextStyle::Monospace)
                            .desired_width(f32::INFINITY)
                            .desired_rows(5),
                    );
                }
                ui.separator();

                Self::show_canvas(ui, state, dark_theme);

                if let Some(selected) = state.selected {
                    let label = state.graph.node(selected).map(|n| n.label.clone());
                    if let Some(label) = label {
                        ui.separator();
                        ui.label(egui::RichText::new(label).strong());
                        ui.add(
                            egui::TextEdit::multiline(&mut state.description_buffer)
                                .hint_text("Describe this topic...")
                                .desired_width(f32::INFINITY)
                                .desired_rows(3),
                        );
                        if ui.button("Save Description").clicked() {
                            let description = state.description_buffer.clone();
                            if state.graph.set_description(selected, description) {
                                message = Some("Description saved".to_string());
                            }
                        }
                    }
                }
            });
        state.open = open;

        message
    }

    fn show_canvas(ui: &mut egui::Ui, state: &mut MindMapState, dark_theme: bool) {
        let reserved = if state.selected.is_some() { 130.0 } else { 10.0 };
        let size = egui::vec2(
            ui.available_width(),
            (ui.available_height() - reserved).max(240.0),
        );
        let (response, painter) = ui.allocate_painter(size, egui::Sense::click());
        let rect = response.rect;

        let face_color = if dark_theme {
            egui::Color32::from_rgb(0x1e, 0x1e, 0x1e)
        } else {
            egui::Color32::WHITE
        };
        let edge_color = if dark_theme {
            egui::Color32::from_rgb(0xcc, 0xcc, 0xcc)
        } else {
            egui::Color32::from_rgb(0x55, 0x55, 0x55)
        };
        let font_color = if dark_theme {
            egui::Color32::from_rgb(0xd4, 0xd4, 0xd4)
        } else {
            egui::Color32::BLACK
        };
        let node_color = egui::Color32::from_rgb(0x00, 0x7a, 0xcc);
        let selected_color = egui::Color32::from_rgb(0xff, 0x8c, 0x00);

        painter.rect_filled(rect, 4.0, face_color);

        if state.graph.is_empty() {
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                "Mind map is empty or not generated.",
                egui::FontId::proportional(14.0),
                font_color,
            );
            return;
        }

        let inner = rect.shrink(CANVAS_MARGIN);
        let to_screen = |p: [f32; 2]| {
            egui::pos2(
                inner.left() + p[0] * inner.width(),
                inner.top() + p[1] * inner.height(),
            )
        };

        for &(parent, child) in state.graph.edges() {
            if let (Some(&a), Some(&b)) = (state.positions.get(parent), state.positions.get(child))
            {
                painter.line_segment(
                    [to_screen(a), to_screen(b)],
                    egui::Stroke::new(1.5, edge_color),
                );
            }
        }

        for (i, node) in state.graph.nodes().iter().enumerate() {
            let Some(&p) = state.positions.get(i) else {
                continue;
            };
            let center = to_screen(p);
            let fill = if state.selected == Some(i) {
                selected_color
            } else {
                node_color
            };
            painter.circle_filled(center, NODE_RADIUS, fill);
            painter.text(
                center,
                egui::Align2::CENTER_CENTER,
                &node.label,
                egui::FontId::proportional(11.0),
                egui::Color32::WHITE,
            );
            // Ring marks nodes that carry a description.
            if node.description.is_some() {
                painter.circle_stroke(center, NODE_RADIUS + 2.0, egui::Stroke::new(1.0, font_color));
            }
        }

        if response.clicked() {
            if let Some(pointer) = response.interact_pointer_pos() {
                let hit = (0..state.graph.node_count()).find(|&i| {
                    state
                        .positions
                        .get(i)
                        .map(|&p| to_screen(p).distance(pointer) <= NODE_RADIUS)
                        .unwrap_or(false)
                });
                if let Some(i) = hit {
                    state.selected = Some(i);
                    state.description_buffer = state
                        .graph
                        .node(i)
                        .and_then(|n| n.description.clone())
                        .unwrap_or_default();
                }
            }
        }
    }
}
