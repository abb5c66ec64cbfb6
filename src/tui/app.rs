use crate::session::SearchSession;
use crate::sort::{sorted_indices, SortColumn, SortState};
use crate::storage::KeyValueStore;
use crate::story::Story;
use crate::tui::search::SearchInput;
use crate::tui::table::TableState;
use crate::tui::ui;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::DefaultTerminal;
use std::time::{Duration, Instant};

pub struct App<S> {
    pub session: SearchSession<S>,

    // Sub-states
    pub input: SearchInput,
    pub table: TableState,
    pub sort: SortState,

    /// Indices into the stories data, in display order
    pub view: Vec<usize>,
    pub status_message: String,

    // Quit flag
    pub should_quit: bool,
}

impl<S: KeyValueStore> App<S> {
    pub fn new(session: SearchSession<S>) -> Self {
        let input = SearchInput::new(session.term());
        Self {
            session,
            input,
            table: TableState::default(),
            sort: SortState::default(),
            view: Vec::new(),
            status_message: "Ready".to_string(),
            should_quit: false,
        }
    }

    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> crate::Result<()> {
        let tick_rate = Duration::from_millis(50);
        let mut last_tick = Instant::now();

        self.session.start();

        loop {
            terminal.draw(|frame| ui::draw(frame, self))?;

            let timeout = tick_rate.saturating_sub(last_tick.elapsed());
            if event::poll(timeout).unwrap_or(false) {
                if let Ok(Event::Key(key)) = event::read() {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key);
                    }
                }
            }

            if last_tick.elapsed() >= tick_rate {
                self.process_messages();
                last_tick = Instant::now();
            }

            if self.should_quit {
                return Ok(());
            }
        }
    }

    /// Apply finished fetches and refresh the view
    pub fn process_messages(&mut self) {
        if self.session.poll() {
            let stories = self.session.stories();
            self.status_message = if stories.is_error {
                "Search failed".to_string()
            } else {
                format!("{} stories", stories.data.len())
            };
            self.rebuild_view();
            self.table.reset(self.view.len());
        }
    }

    pub fn rebuild_view(&mut self) {
        self.view = sorted_indices(&self.session.stories().data, self.sort);
        self.table.clamp(self.view.len());
    }

    pub fn selected_story(&self) -> Option<&Story> {
        let logical = self.table.selected?;
        let idx = *self.view.get(logical)?;
        self.session.stories().data.get(idx)
    }

    fn submit(&mut self) {
        match self.session.submit() {
            Some(seq) => {
                self.status_message = format!("Searching \"{}\"", self.session.term());
                tracing::debug!(seq, "submitted from TUI");
                self.input.focused = false;
            }
            None => {
                self.status_message = "Type a search term first".to_string();
            }
        }
    }

    fn dismiss_selected(&mut self) {
        let Some(object_id) = self.selected_story().map(|s| s.object_id.clone()) else {
            return;
        };
        self.session.dismiss(&object_id);
        self.rebuild_view();
        self.status_message = format!("{} stories", self.view.len());
    }

    fn open_selected(&mut self) {
        let Some(link) = self.selected_story().map(Story::link) else {
            return;
        };
        match open::that_detached(&link) {
            Ok(()) => self.status_message = format!("Opened {}", link),
            Err(e) => {
                tracing::warn!(link, error = %e, "failed to open link");
                self.status_message = format!("Could not open {}", link);
            }
        }
    }

    fn copy_selected(&mut self) {
        let Some(link) = self.selected_story().map(Story::link) else {
            return;
        };
        let copied = arboard::Clipboard::new().and_then(|mut cb| cb.set_text(link.clone()));
        match copied {
            Ok(()) => self.status_message = format!("Copied {}", link),
            Err(e) => {
                tracing::warn!(error = %e, "clipboard unavailable");
                self.status_message = "Clipboard unavailable".to_string();
            }
        }
    }

    pub fn handle_sort_click(&mut self, column: SortColumn) {
        self.sort.click(column);
        self.rebuild_view();
    }

    // --- Key handling ---

    pub fn handle_key(&mut self, key: KeyEvent) {
        // Global keys
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('q') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
                return;
            }
            KeyCode::Esc => {
                if self.input.focused {
                    self.input.focused = false;
                } else {
                    self.should_quit = true;
                }
                return;
            }
            KeyCode::F(1) => return self.handle_sort_click(SortColumn::Title),
            KeyCode::F(2) => return self.handle_sort_click(SortColumn::Author),
            KeyCode::F(3) => return self.handle_sort_click(SortColumn::Comments),
            KeyCode::F(4) => return self.handle_sort_click(SortColumn::Points),
            KeyCode::F(5) => return self.handle_sort_click(SortColumn::Relevance),
            _ => {}
        }

        if self.input.focused {
            self.handle_search_key(key);
        } else {
            self.handle_table_key(key);
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Enter {
            return self.submit();
        }

        let input = &mut self.input;
        match key.code {
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.session.edit_term(|t| input.clear(t));
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.session.edit_term(|t| input.insert(t, c));
            }
            KeyCode::Backspace => {
                self.session.edit_term(|t| input.backspace(t));
            }
            KeyCode::Delete => {
                self.session.edit_term(|t| input.delete(t));
            }
            KeyCode::Left => input.left(self.session.term()),
            KeyCode::Right => input.right(self.session.term()),
            KeyCode::Home => input.home(),
            KeyCode::End => input.end(self.session.term()),
            KeyCode::Tab | KeyCode::Down => {
                input.focused = false;
            }
            _ => {}
        }
    }

    fn handle_table_key(&mut self, key: KeyEvent) {
        let total = self.view.len();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.table.select_prev(total),
            KeyCode::Down | KeyCode::Char('j') => self.table.select_next(total),
            KeyCode::PageUp => self.table.page_up(total),
            KeyCode::PageDown => self.table.page_down(total),
            KeyCode::Home => self.table.select_first(total),
            KeyCode::End => self.table.select_last(total),

            KeyCode::Tab | KeyCode::Char('/') => {
                self.input.focused = true;
                self.input.end(self.session.term());
            }

            KeyCode::Char('d') | KeyCode::Delete => self.dismiss_selected(),
            KeyCode::Char('o') | KeyCode::Enter => self.open_selected(),
            KeyCode::Char('y') => self.copy_selected(),
            KeyCode::Char('r') => self.submit(),
            KeyCode::Char('q') => self.should_quit = true,

            _ => {}
        }
    }
}
