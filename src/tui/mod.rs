pub mod app;
pub mod colors;
pub mod search;
pub mod table;
pub mod ui;

use crate::session::SearchSession;
use crate::AppConfig;

/// Entry point: open the store, take over the terminal and run until quit
pub fn run(config: &AppConfig) -> crate::Result<()> {
    let (store, client) = config.open()?;
    tracing::info!(store = %store.path().display(), "starting TUI");

    let session = SearchSession::new(store, config, client);
    let mut app = app::App::new(session);

    let mut terminal = ratatui::init();
    let result = app.run(&mut terminal);
    ratatui::restore();

    result
}
