/// Result list display state
pub struct TableState {
    pub selected: Option<usize>,
    pub scroll_offset: usize,
    pub visible_rows: usize,
}

impl Default for TableState {
    fn default() -> Self {
        Self {
            selected: None,
            scroll_offset: 0,
            visible_rows: 20,
        }
    }
}

impl TableState {
    pub fn select_next(&mut self, total: usize) {
        if total == 0 {
            return;
        }
        let i = match self.selected {
            Some(i) => (i + 1).min(total - 1),
            None => 0,
        };
        self.selected = Some(i);
        self.ensure_visible(i);
    }

    pub fn select_prev(&mut self, total: usize) {
        if total == 0 {
            return;
        }
        let i = match self.selected {
            Some(0) | None => 0,
            Some(i) => i - 1,
        };
        self.selected = Some(i);
        self.ensure_visible(i);
    }

    pub fn page_down(&mut self, total: usize) {
        if total == 0 {
            return;
        }
        let jump = self.visible_rows.saturating_sub(1);
        let i = match self.selected {
            Some(i) => (i + jump).min(total - 1),
            None => jump.min(total - 1),
        };
        self.selected = Some(i);
        self.ensure_visible(i);
    }

    pub fn page_up(&mut self, total: usize) {
        if total == 0 {
            return;
        }
        let jump = self.visible_rows.saturating_sub(1);
        let i = match self.selected {
            Some(i) => i.saturating_sub(jump),
            None => 0,
        };
        self.selected = Some(i);
        self.ensure_visible(i);
    }

    pub fn select_first(&mut self, total: usize) {
        if total == 0 {
            return;
        }
        self.selected = Some(0);
        self.scroll_offset = 0;
    }

    pub fn select_last(&mut self, total: usize) {
        if total == 0 {
            return;
        }
        self.selected = Some(total - 1);
        self.ensure_visible(total - 1);
    }

    /// Keep the selection inside a list that just shrank or was replaced
    pub fn clamp(&mut self, total: usize) {
        if total == 0 {
            self.selected = None;
            self.scroll_offset = 0;
            return;
        }
        if let Some(i) = self.selected {
            let i = i.min(total - 1);
            self.selected = Some(i);
            self.ensure_visible(i);
        }
        self.scroll_offset = self.scroll_offset.min(total - 1);
    }

    pub fn reset(&mut self, total: usize) {
        self.selected = if total == 0 { None } else { Some(0) };
        self.scroll_offset = 0;
    }

    fn ensure_visible(&mut self, index: usize) {
        if index < self.scroll_offset {
            self.scroll_offset = index;
        } else if self.visible_rows > 0 && index >= self.scroll_offset + self.visible_rows {
            self.scroll_offset = index - self.visible_rows + 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moving_up_in_empty_list_selects_nothing() {
        let mut table = TableState::default();
        table.select_prev(0);
        table.page_up(0);
        assert_eq!(table.selected, None);

        table.select_prev(3);
        assert_eq!(table.selected, Some(0));
    }

    #[test]
    fn scrolling_follows_selection() {
        let mut table = TableState {
            visible_rows: 3,
            ..Default::default()
        };
        for _ in 0..5 {
            table.select_next(10);
        }
        assert_eq!(table.selected, Some(4));
        assert_eq!(table.scroll_offset, 2);

        table.select_first(10);
        assert_eq!(table.scroll_offset, 0);
    }

    #[test]
    fn clamp_after_last_row_removed() {
        let mut table = TableState::default();
        table.select_last(3);
        table.clamp(2);
        assert_eq!(table.selected, Some(1));

        table.clamp(0);
        assert_eq!(table.selected, None);
    }
}
