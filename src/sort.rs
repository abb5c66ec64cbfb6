//! View-side ordering of the result list.
//!
//! Sorting produces an index permutation; the stories state itself keeps the
//! order the API returned.

use crate::story::Story;

/// Which column is sorted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortColumn {
    /// API relevance order
    #[default]
    Relevance,
    Title,
    Author,
    Comments,
    Points,
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn indicator(&self) -> &'static str {
        match self {
            SortOrder::Ascending => " \u{25B2}",
            SortOrder::Descending => " \u{25BC}",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }
}

/// Current sort selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortState {
    pub column: SortColumn,
    pub order: SortOrder,
}

impl SortState {
    /// Header click: same column flips the order, a new column starts
    /// descending for numbers and ascending for text.
    pub fn click(&mut self, column: SortColumn) {
        if self.column == column {
            self.order = self.order.toggled();
        } else {
            self.column = column;
            self.order = match column {
                SortColumn::Comments | SortColumn::Points => SortOrder::Descending,
                _ => SortOrder::Ascending,
            };
        }
    }

    /// Header label with the sort indicator when `column` is active
    pub fn label(&self, column: SortColumn, name: &str) -> String {
        if self.column == column && column != SortColumn::Relevance {
            format!("{}{}", name, self.order.indicator())
        } else {
            name.to_string()
        }
    }
}

/// Indices into `stories` in display order. The sort is stable, so ties keep
/// relevance order.
pub fn sorted_indices(stories: &[Story], sort: SortState) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..stories.len()).collect();
    if sort.column == SortColumn::Relevance {
        if sort.order == SortOrder::Descending {
            indices.reverse();
        }
        return indices;
    }

    indices.sort_by(|&a, &b| {
        let sa = &stories[a];
        let sb = &stories[b];

        let cmp = match sort.column {
            SortColumn::Relevance => std::cmp::Ordering::Equal,
            SortColumn::Title => sa.title.to_lowercase().cmp(&sb.title.to_lowercase()),
            SortColumn::Author => sa.author.to_lowercase().cmp(&sb.author.to_lowercase()),
            SortColumn::Comments => sa.num_comments.cmp(&sb.num_comments),
            SortColumn::Points => sa.points.cmp(&sb.points),
        };

        if sort.order == SortOrder::Descending {
            cmp.reverse()
        } else {
            cmp
        }
    });
    indices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::story::story;

    fn sample() -> Vec<Story> {
        let mut a = story("1", "beta");
        a.points = 10;
        let mut b = story("2", "Alpha");
        b.points = 30;
        let mut c = story("3", "gamma");
        c.points = 10;
        vec![a, b, c]
    }

    #[test]
    fn relevance_keeps_api_order() {
        assert_eq!(sorted_indices(&sample(), SortState::default()), [0, 1, 2]);
    }

    #[test]
    fn title_sort_ignores_case() {
        let sort = SortState {
            column: SortColumn::Title,
            order: SortOrder::Ascending,
        };
        assert_eq!(sorted_indices(&sample(), sort), [1, 0, 2]);
    }

    #[test]
    fn points_descending_is_stable_on_ties() {
        let mut sort = SortState::default();
        sort.click(SortColumn::Points);
        assert_eq!(sort.order, SortOrder::Descending);
        assert_eq!(sorted_indices(&sample(), sort), [1, 0, 2]);
    }

    #[test]
    fn clicking_same_column_flips_order() {
        let mut sort = SortState::default();
        sort.click(SortColumn::Title);
        sort.click(SortColumn::Title);
        assert_eq!(sort.order, SortOrder::Descending);
        assert_eq!(sort.label(SortColumn::Title, "Title"), "Title \u{25BC}");
        assert_eq!(sort.label(SortColumn::Author, "Author"), "Author");
    }

    #[test]
    fn sorting_does_not_touch_the_slice() {
        let stories = sample();
        let before = stories.clone();
        let sort = SortState {
            column: SortColumn::Points,
            order: SortOrder::Ascending,
        };
        let _ = sorted_indices(&stories, sort);
        assert_eq!(stories, before);
    }
}
