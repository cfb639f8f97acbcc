use tui::style::{Color, Modifier, Style};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Palette {
    Primary,
    Accent,
    Dim,
    Favourite,
    Result,
    Warning,
}

pub fn style(color: Palette) -> Style {
    match color {
        // Club green
        Palette::Primary => Style::default().fg(Color::Rgb(0, 135, 81)),
        Palette::Accent => Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        Palette::Dim => Style::default().fg(Color::Indexed(240)),
        Palette::Favourite => Style::default().fg(Color::Rgb(255, 193, 7)),
        Palette::Result => Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        Palette::Warning => Style::default().fg(Color::Red),
    }
}
