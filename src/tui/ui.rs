use crate::sort::SortColumn;
use crate::storage::KeyValueStore;
use crate::stories::Phase;
use crate::tui::app::App;
use crate::tui::colors;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use unicode_width::UnicodeWidthStr;

pub fn draw<S: KeyValueStore>(frame: &mut Frame, app: &mut App<S>) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search bar
            Constraint::Length(1), // Fetch state line
            Constraint::Min(5),    // Table
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    draw_search_bar(frame, app, chunks[0]);
    draw_fetch_state(frame, app, chunks[1]);
    draw_table(frame, app, chunks[2]);
    draw_status_bar(frame, app, chunks[3]);

    if app.input.focused {
        // border (1) + " > " prompt (3)
        let cursor_x = chunks[0].x + 1 + 3 + app.input.cursor_column(app.session.term()) as u16;
        let cursor_y = chunks[0].y + 1;
        frame.set_cursor_position(Position::new(cursor_x, cursor_y));
    }
}

fn draw_search_bar<S: KeyValueStore>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let border_style = if app.input.focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    // Submit hint is dimmed while submitting is disabled
    let submit_style = if app.session.can_submit() {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(" Search ")
        .title_bottom(Line::from(Span::styled(" Enter: Submit ", submit_style)).right_aligned());

    let line = Line::from(vec![
        Span::styled(" > ", Style::default().fg(Color::Cyan)),
        Span::styled(app.session.term(), Style::default().fg(Color::White)),
    ]);

    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn draw_fetch_state<S: KeyValueStore>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let (text, style) = match app.session.stories().phase() {
        Phase::Loading => (
            " Loading ...".to_string(),
            Style::default().fg(Color::Yellow),
        ),
        Phase::Failure => (
            format!(" {}", crate::FETCH_ERROR_MESSAGE),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Phase::Idle => (" No stories".to_string(), Style::default().fg(Color::DarkGray)),
        Phase::Success => (String::new(), Style::default()),
    };
    frame.render_widget(Paragraph::new(text).style(style), area);
}

fn draw_table<S: KeyValueStore>(frame: &mut Frame, app: &mut App<S>, area: Rect) {
    // Area height minus header
    let table_inner_height = area.height.saturating_sub(1) as usize;
    app.table.visible_rows = table_inner_height;

    let header_columns: [(&str, SortColumn); 4] = [
        ("Title", SortColumn::Title),
        ("Author", SortColumn::Author),
        ("Comments", SortColumn::Comments),
        ("Points", SortColumn::Points),
    ];

    let header = Row::new(
        std::iter::once(Cell::from("#"))
            .chain(
                header_columns
                    .iter()
                    .map(|(name, col)| Cell::from(app.sort.label(*col, name))),
            )
            .chain(std::iter::once(Cell::from("Age"))),
    )
    .style(
        Style::default()
            .fg(Color::White)
            .bg(colors::HEADER_BG)
            .add_modifier(Modifier::BOLD),
    )
    .height(1);

    let stories = &app.session.stories().data;
    let now = chrono::Utc::now();
    let title_width = area.width.saturating_sub(5 + 16 + 10 + 8 + 6 + 5) as usize;

    // Build visible rows only
    let start = app.table.scroll_offset;
    let end = (start + table_inner_height).min(app.view.len());

    let rows: Vec<Row> = (start..end)
        .enumerate()
        .filter_map(|(visual_idx, logical_idx)| {
            let story = stories.get(*app.view.get(logical_idx)?)?;
            let is_selected = app.table.selected == Some(logical_idx);

            let bg = if is_selected {
                colors::SELECTED_BG
            } else if visual_idx % 2 == 1 {
                colors::STRIPE_BG
            } else {
                Color::Reset
            };
            let fg_modifier = if is_selected {
                Modifier::BOLD
            } else {
                Modifier::empty()
            };

            let title = match story.domain() {
                Some(domain) => format!("{} ({})", story.title, domain),
                None => story.title.clone(),
            };

            Some(Row::new(vec![
                Cell::from(format!("{}", logical_idx + 1))
                    .style(Style::default().fg(Color::DarkGray).bg(bg)),
                Cell::from(truncate(&title, title_width))
                    .style(Style::default().fg(Color::White).bg(bg).add_modifier(fg_modifier)),
                Cell::from(story.author.clone()).style(Style::default().fg(Color::Gray).bg(bg)),
                Cell::from(crate::format_count(story.num_comments)).style(
                    Style::default()
                        .fg(colors::color_for_comments(story.num_comments))
                        .bg(bg),
                ),
                Cell::from(crate::format_count(story.points)).style(
                    Style::default()
                        .fg(colors::color_for_points(story.points))
                        .bg(bg),
                ),
                Cell::from(crate::format_age(story.created_at, now))
                    .style(Style::default().fg(Color::DarkGray).bg(bg)),
            ]))
        })
        .collect();

    let widths = [
        Constraint::Length(4),
        Constraint::Fill(1),
        Constraint::Length(16),
        Constraint::Length(10),
        Constraint::Length(8),
        Constraint::Length(5),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::NONE));

    frame.render_widget(table, area);
}

fn draw_status_bar<S: KeyValueStore>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let left_text = format!(" {}", app.status_message);
    let right_text = if app.input.focused {
        " Enter:Submit  Tab:Results  Ctrl+U:Clear  Esc:Leave  Ctrl+Q:Quit "
    } else {
        " /:Search  d:Dismiss  o:Open  y:Copy  r:Refresh  F1-F5:Sort  q:Quit "
    };

    let available_width = area.width as usize;
    let left_len = left_text.width();
    let right_len = right_text.width();

    let status_str = if left_len + right_len < available_width {
        let padding = available_width - left_len - right_len;
        format!("{}{:padding$}{}", left_text, "", right_text, padding = padding)
    } else {
        // Not enough space, just show left text
        format!("{:width$}", left_text, width = available_width)
    };

    let status = Paragraph::new(status_str)
        .style(Style::default().fg(Color::White).bg(colors::HEADER_BG));

    frame.render_widget(status, area);
}

/// Cut `text` to at most `max_width` display columns, marking the cut with
/// an ellipsis
fn truncate(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w + 1 > max_width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('\u{2026}');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_keeps_short_text() {
        assert_eq!(truncate("Rust", 10), "Rust");
    }

    #[test]
    fn truncate_adds_ellipsis_within_width() {
        let out = truncate("Announcing Rust 1.0", 8);
        assert_eq!(out, "Announc\u{2026}");
        assert!(out.width() <= 8);
    }

    #[test]
    fn truncate_handles_wide_chars() {
        let out = truncate("日本語のタイトル", 5);
        assert_eq!(out, "日本\u{2026}");
    }
}
