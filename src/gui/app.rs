//! Main hnsearch desktop application

use crate::gui::dialogs;
use crate::session::SearchSession;
use crate::sort::{sorted_indices, SortColumn, SortState};
use crate::storage::KeyValueStore;
use crate::stories::Phase;
use crate::story::Story;
use eframe::egui;

/// Main application state
pub struct HnSearchApp<S> {
    session: SearchSession<S>,
    /// Sort selection for the results table
    sort: SortState,
    /// Indices into the stories data, in display order
    view: Vec<usize>,
    /// Selected row (logical index into `view`)
    selected: Option<usize>,
    /// First frame flag (for auto-focus)
    first_frame: bool,
    /// Show about dialog
    show_about: bool,
    /// Status bar message
    status_message: String,
}

impl<S: KeyValueStore> HnSearchApp<S> {
    /// Create the app and kick off the initial search
    pub fn new(_cc: &eframe::CreationContext<'_>, session: SearchSession<S>) -> Self {
        let mut app = Self {
            session,
            sort: SortState::default(),
            view: Vec::new(),
            selected: None,
            first_frame: true,
            show_about: false,
            status_message: "Ready".to_string(),
        };
        app.session.start();
        app
    }

    /// Apply finished fetches
    fn process_messages(&mut self) {
        if self.session.poll() {
            let stories = self.session.stories();
            self.status_message = if stories.is_error {
                "Search failed".to_string()
            } else {
                format!("{} stories", stories.data.len())
            };
            self.selected = None;
            self.rebuild_view();
        }
    }

    fn rebuild_view(&mut self) {
        self.view = sorted_indices(&self.session.stories().data, self.sort);
        if let Some(i) = self.selected {
            if i >= self.view.len() {
                self.selected = self.view.len().checked_sub(1);
            }
        }
    }

    fn submit(&mut self) {
        if self.session.submit().is_some() {
            self.status_message = format!("Searching \"{}\"", self.session.term());
        }
    }

    fn selected_story(&self) -> Option<&Story> {
        let idx = *self.view.get(self.selected?)?;
        self.session.stories().data.get(idx)
    }

    fn selected_link(&self) -> Option<String> {
        self.selected_story().map(Story::link)
    }

    fn dismiss(&mut self, object_id: &str) {
        self.session.dismiss(object_id);
        self.rebuild_view();
        self.status_message = format!("{} stories", self.view.len());
    }

    fn dismiss_selected(&mut self) {
        if let Some(object_id) = self.selected_story().map(|s| s.object_id.clone()) {
            self.dismiss(&object_id);
        }
    }

    /// Render menu bar
    fn render_menu(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Refresh").clicked() {
                        self.submit();
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Exit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.menu_button("Story", |ui| {
                    let link = self.selected_link();
                    if ui
                        .add_enabled(link.is_some(), egui::Button::new("Open Link"))
                        .clicked()
                    {
                        if let Some(link) = &link {
                            if dialogs::open_link(link) {
                                self.status_message = format!("Opened {}", link);
                            }
                        }
                        ui.close_menu();
                    }
                    if ui
                        .add_enabled(link.is_some(), egui::Button::new("Copy Link"))
                        .clicked()
                    {
                        if let Some(link) = &link {
                            if dialogs::copy_to_clipboard(link) {
                                self.status_message = format!("Copied {}", link);
                            }
                        }
                        ui.close_menu();
                    }
                    if ui
                        .add_enabled(link.is_some(), egui::Button::new("Dismiss"))
                        .clicked()
                    {
                        self.dismiss_selected();
                        ui.close_menu();
                    }
                });

                ui.menu_button("Help", |ui| {
                    if ui.button("About hnsearch").clicked() {
                        self.show_about = true;
                        ui.close_menu();
                    }
                });
            });
        });
    }

    /// Render search bar
    fn render_search_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("search_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("Search:");

                let mut term = self.session.term().to_string();
                let response = ui.add(
                    egui::TextEdit::singleline(&mut term)
                        .desired_width(ui.available_width() - 80.0)
                        .hint_text("Search stories..."),
                );

                if self.first_frame {
                    response.request_focus();
                    self.first_frame = false;
                }

                if response.changed() {
                    self.session.set_term(term);
                }

                let enter = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                let clicked = ui
                    .add_enabled(self.session.can_submit(), egui::Button::new("Submit"))
                    .clicked();

                if clicked || (enter && self.session.can_submit()) {
                    self.submit();
                }
            });
        });
    }

    /// Render status bar
    fn render_status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| match self.session.stories().phase() {
                Phase::Loading => {
                    ui.spinner();
                    ui.label("Loading ...");
                }
                Phase::Failure => {
                    ui.colored_label(egui::Color32::LIGHT_RED, crate::FETCH_ERROR_MESSAGE);
                }
                Phase::Idle | Phase::Success => {
                    ui.label(&self.status_message);
                    if let Some(link) = self.selected_link() {
                        ui.separator();
                        ui.label(link);
                    }
                }
            });
        });
    }

    /// Render the results table
    fn render_results_table(&mut self, ui: &mut egui::Ui) {
        use egui_extras::{Column, TableBuilder};

        let available_height = ui.available_height();
        let row_count = self.view.len();
        let now = chrono::Utc::now();

        let mut clicked_column: Option<SortColumn> = None;
        let mut new_selection: Option<usize> = None;
        let mut dismissed: Option<String> = None;

        let sort = self.sort;
        let current_selection = self.selected;
        let stories = &self.session.stories().data;
        let view = &self.view;

        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .column(Column::remainder().at_least(120.0).clip(true))
            .column(Column::initial(120.0).at_least(40.0).clip(true))
            .column(Column::initial(80.0).at_least(40.0))
            .column(Column::initial(70.0).at_least(40.0))
            .column(Column::initial(50.0).at_least(30.0))
            .column(Column::initial(70.0).at_least(60.0))
            .min_scrolled_height(0.0)
            .max_scroll_height(available_height)
            .sense(egui::Sense::click())
            .header(20.0, |mut header| {
                let columns = [
                    (SortColumn::Title, "Title"),
                    (SortColumn::Author, "Author"),
                    (SortColumn::Comments, "Comments"),
                    (SortColumn::Points, "Points"),
                ];
                for (column, name) in columns {
                    header.col(|ui| {
                        if ui
                            .selectable_label(sort.column == column, sort.label(column, name))
                            .clicked()
                        {
                            clicked_column = Some(column);
                        }
                    });
                }
                header.col(|ui| {
                    ui.strong("Age");
                });
                header.col(|_ui| {});
            })
            .body(|body| {
                body.rows(22.0, row_count, |mut row| {
                    let row_index = row.index();
                    let Some(story) = view.get(row_index).and_then(|&i| stories.get(i)) else {
                        return;
                    };

                    row.set_selected(current_selection == Some(row_index));

                    row.col(|ui| {
                        let title = if story.title.is_empty() {
                            "(untitled)"
                        } else {
                            story.title.as_str()
                        };
                        ui.hyperlink_to(title, story.link());
                        if let Some(domain) = story.domain() {
                            ui.weak(format!("({})", domain));
                        }
                    });
                    row.col(|ui| {
                        ui.label(&story.author);
                    });
                    row.col(|ui| {
                        ui.hyperlink_to(
                            crate::format_count(story.num_comments),
                            story.discussion_url(),
                        );
                    });
                    row.col(|ui| {
                        ui.label(crate::format_count(story.points));
                    });
                    row.col(|ui| {
                        ui.weak(crate::format_age(story.created_at, now));
                    });
                    row.col(|ui| {
                        if ui.small_button("Dismiss").clicked() {
                            dismissed = Some(story.object_id.clone());
                        }
                    });

                    if row.response().clicked() {
                        new_selection = Some(row_index);
                    }
                });
            });

        if let Some(idx) = new_selection {
            self.selected = Some(idx);
        }

        if let Some(object_id) = dismissed {
            self.dismiss(&object_id);
        }

        if let Some(column) = clicked_column {
            self.sort.click(column);
            self.rebuild_view();
        }
    }
}

impl<S: KeyValueStore> eframe::App for HnSearchApp<S> {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_messages();

        self.render_menu(ctx);
        self.render_search_bar(ctx);
        self.render_status_bar(ctx);
        dialogs::about(ctx, &mut self.show_about);

        egui::CentralPanel::default().show(ctx, |ui| {
            if self.view.is_empty() && !self.session.stories().is_loading {
                ui.centered_and_justified(|ui| {
                    ui.weak("No stories");
                });
            } else {
                self.render_results_table(ui);
            }
        });

        // Keep polling while a fetch is outstanding
        if self.session.is_fetching() {
            ctx.request_repaint_after(std::time::Duration::from_millis(50));
        }
    }
}
