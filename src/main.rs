//! StudyMate - note-taking and study application
//!
//! A tabbed text/PDF workspace with AI-assisted summarization, key point
//! extraction, mind maps, and a task scheduler.

mod ai;
mod app;
mod core;
mod graph;
mod ui;

use app::StudyMateApp;
use eframe::egui;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> eframe::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::filter::LevelFilter::INFO)
        .init();

    tracing::info!("Starting StudyMate...");

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("StudyMate"),
        ..Default::default()
    };

    eframe::run_native(
        "StudyMate",
        native_options,
        Box::new(|cc| Ok(Box::new(StudyMateApp::new(cc)))),
    )
}
