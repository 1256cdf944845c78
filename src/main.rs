mod app;
mod color;
mod state;
mod ui;

use std::path::PathBuf;

use app::SapreApp;
use eframe::egui;
use sapre_dashboard::config::{Config, DEFAULT_CONFIG_FILE};
use state::AppState;

fn main() -> eframe::Result {
    env_logger::init();

    // Optional first argument: configuration file to load and save to.
    let arg = std::env::args_os().nth(1).map(PathBuf::from);
    let config = Config::load_or_default(arg.as_deref());
    let config_path = arg.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

    let state = match AppState::new(config, config_path.clone()) {
        Ok(state) => state,
        Err(e) => {
            log::warn!("{e}; starting with the default configuration");
            AppState::new(Config::default(), config_path)
                .expect("default configuration is valid")
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Dashboard SAPRE",
        options,
        Box::new(|_cc| Ok(Box::new(SapreApp::new(state)))),
    )
}
