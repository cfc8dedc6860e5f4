use clap::Parser;
use eframe::egui;

use driblab_viewer::app::DriblabApp;
use driblab_viewer::config::{Cli, DashboardConfig};
use driblab_viewer::data::store::DatasetStore;
use driblab_viewer::state::AppState;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = DashboardConfig::from_cli(&cli)?;

    // Both exports must load before any window opens.
    let store = match DatasetStore::load(&config) {
        Ok(store) => store,
        Err(e) => {
            log::error!("Failed to load data: {e:#}");
            return Err(e);
        }
    };
    let state = AppState::new(store, config);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Análisis Driblab",
        options,
        Box::new(|_cc| Ok(Box::new(DriblabApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("running the dashboard window: {e}"))
}
