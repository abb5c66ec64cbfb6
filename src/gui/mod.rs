pub mod app;
pub mod dialogs;

use crate::session::SearchSession;
use crate::AppConfig;

pub use app::HnSearchApp;

/// Entry point: launch the native GUI window
pub fn run(config: &AppConfig) -> crate::Result<()> {
    let (store, client) = config.open()?;
    tracing::info!(store = %store.path().display(), "starting GUI");

    let session = SearchSession::new(store, config, client);

    let native_options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_title("hnsearch - Hacker News Search")
            .with_inner_size([1024.0, 768.0])
            .with_min_inner_size([640.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "hnsearch",
        native_options,
        Box::new(|cc| Ok(Box::new(HnSearchApp::new(cc, session)))),
    )
    .map_err(|e| crate::HnSearchError::Gui(e.to_string()))
}
