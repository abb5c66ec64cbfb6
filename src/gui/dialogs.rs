use eframe::egui;

/// About window. Clears `open` when dismissed.
pub fn about(ctx: &egui::Context, open: &mut bool) {
    if !*open {
        return;
    }

    let mut keep_open = true;
    egui::Window::new("About hnsearch")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.heading(format!("hnsearch {}", crate::VERSION));
            ui.label("Search Hacker News stories via the Algolia API.");
            ui.add_space(4.0);
            ui.hyperlink("https://hn.algolia.com/api");
            ui.add_space(8.0);
            if ui.button("OK").clicked() {
                keep_open = false;
            }
        });

    *open = keep_open;
}

// ============================================================================
// OS helpers (clipboard, browser)
// ============================================================================

pub fn copy_to_clipboard(text: &str) -> bool {
    match arboard::Clipboard::new().and_then(|mut cb| cb.set_text(text.to_owned())) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "clipboard unavailable");
            false
        }
    }
}

pub fn open_link(link: &str) -> bool {
    match open::that_detached(link) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(link, error = %e, "failed to open link");
            false
        }
    }
}
