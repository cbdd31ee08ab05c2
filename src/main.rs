mod app;
mod color;
mod config;
mod data;
mod report;
mod state;
mod ui;

use anyhow::Context;
use app::JobAnalyzerApp;
use config::{AppConfig, MIN_WINDOW_SIZE, WINDOW_SIZE};
use eframe::egui;
use state::AppState;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = AppConfig::from_env();
    log::info!("Loading postings from {}", config.data_path.display());

    // Without a dataset there is nothing to show.
    let dataset = data::loader::load_file(&config.data_path)
        .inspect_err(|e| log::error!("Failed to load startup dataset: {e:#}"))
        .with_context(|| format!("no usable dataset at {}", config.data_path.display()))?;

    let mut state = AppState::new(&config);
    state.set_dataset(dataset);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(WINDOW_SIZE)
            .with_min_inner_size(MIN_WINDOW_SIZE),
        ..Default::default()
    };

    eframe::run_native(
        "Job Analyzer",
        options,
        Box::new(move |_cc| Ok(Box::new(JobAnalyzerApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("running UI: {e}"))
}
