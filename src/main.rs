mod app;
mod color;
mod data;
mod state;
mod ui;

use std::path::PathBuf;

use app::LaunchDashApp;
use eframe::egui;

/// Dataset file read from the working directory unless a path is given.
const DEFAULT_DATASET: &str = "launch_records.csv";

fn main() -> eframe::Result {
    env_logger::init();

    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATASET));

    // The table is fixed at startup; a missing or malformed file aborts.
    let dataset = match data::loader::load_file(&path) {
        Ok(dataset) => dataset,
        Err(e) => {
            log::error!("Failed to load launch records from {}: {e:#}", path.display());
            std::process::exit(1);
        }
    };
    log::info!(
        "Loaded {} launch records across {} sites (payload {:.0}-{:.0} kg)",
        dataset.len(),
        dataset.sites.len(),
        dataset.payload_min,
        dataset.payload_max,
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Launch Records Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(LaunchDashApp::new(dataset)))),
    )
}
