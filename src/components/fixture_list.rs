use crate::components::theme::{Palette, style};
use chrono::{DateTime, TimeZone};
use stands_api::{DisplayMode, Fixture, ResolvedFixtureSet};
use std::fmt::Display;
use tui::style::Modifier;
use tui::text::{Line, Span};

/// "Sat 04 Oct 15:00  Celtic v Motherwell", or the score once played.
pub fn fixture_row<Tz>(fixture: &Fixture, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let kickoff: DateTime<Tz> = fixture.kickoff.with_timezone(tz);
    let when = kickoff.format("%a %d %b %H:%M");
    match fixture.score {
        Some((home, away)) => format!("{when}  {} {home}-{away} {}", fixture.home, fixture.away),
        None => format!("{when}  {} v {}", fixture.home, fixture.away),
    }
}

/// Heading plus one line per fixture.
pub fn fixture_lines<Tz>(resolved: &ResolvedFixtureSet, tz: &Tz) -> Vec<Line<'static>>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let heading_style = match resolved.mode {
        DisplayMode::Error => style(Palette::Warning),
        DisplayMode::Example => style(Palette::Dim),
        DisplayMode::Upcoming | DisplayMode::Recent => style(Palette::Accent),
    };
    let row_style = match resolved.mode {
        DisplayMode::Recent => style(Palette::Result),
        DisplayMode::Example => style(Palette::Dim).add_modifier(Modifier::ITALIC),
        _ => style(Palette::Primary),
    };

    let mut lines = vec![
        Line::from(Span::styled(resolved.mode.heading(), heading_style)),
        Line::from(""),
    ];
    if resolved.is_error() {
        lines.push(Line::from(Span::styled(
            "Press r to try again.",
            style(Palette::Dim),
        )));
    }
    lines.extend(
        resolved
            .fixtures
            .iter()
            .map(|fixture| Line::from(Span::styled(fixture_row(fixture, tz), row_style))),
    );
    lines
}
