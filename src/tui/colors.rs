use ratatui::style::Color;

pub const HEADER_BG: Color = Color::Rgb(0, 95, 135);
pub const SELECTED_BG: Color = Color::Rgb(60, 60, 80);
pub const STRIPE_BG: Color = Color::Rgb(25, 25, 35);

pub fn color_for_points(points: u32) -> Color {
    match points {
        0..=9 => Color::Gray,
        10..=99 => Color::White,
        100..=499 => Color::Yellow,
        _ => Color::LightRed,
    }
}

pub fn color_for_comments(num_comments: u32) -> Color {
    match num_comments {
        0 => Color::DarkGray,
        1..=49 => Color::Gray,
        50..=199 => Color::Cyan,
        _ => Color::LightCyan,
    }
}
