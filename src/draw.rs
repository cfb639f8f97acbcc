use chrono::Local;
use tui::backend::Backend;
use tui::layout::{Alignment, Constraint, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Paragraph, Tabs, Wrap};
use tui::{Frame, Terminal};
use tui_logger::TuiLoggerWidget;

use crate::app::{App, MenuItem};
use crate::components::club_card::ClubCards;
use crate::components::fixture_list::fixture_lines;
use crate::components::theme::{Palette, style};
use crate::state::app_state::ClubListState;
use crate::state::network::{ERROR_CHAR, LoadingState};
use crate::ui::layout::LayoutAreas;

static TABS: &[&str; 3] = &["Nearby", "Favourites", "Details"];

const HELP_TEXT: &str = "\
1  Nearby clubs        2  Favourites        3  Details        ?  Help

j/k, ↑/↓   move through clubs, or scroll fixtures
Enter      show fixtures for the selected club
s          add or remove the club from favourites
/          filter clubs by name, stadium or city (Enter keeps, Esc clears)
r          reload the current tab
\"          show or hide logs
f          full screen
Esc        back
q          quit";

pub fn draw<B>(terminal: &mut Terminal<B>, app: &mut App, loading: LoadingState)
where
    B: Backend,
{
    let current_size = terminal.size().unwrap_or_default();
    if current_size.width <= 10 || current_size.height <= 10 {
        return;
    }

    let mut layout = LayoutAreas::new(current_size);
    let app: &App = app;

    let _ = terminal.draw(|f| {
        layout.update(f.area(), app.settings.full_screen, app.state.show_logs);

        if !app.settings.full_screen {
            draw_tabs(f, layout.tab_bar, app);
            draw_status(f, layout.status, app);
        }

        match app.state.active_tab {
            MenuItem::Nearby => draw_club_list(f, layout.main, app, &app.state.nearby, " Nearby "),
            MenuItem::Favourites => {
                draw_club_list(f, layout.main, app, &app.state.favourites, " Favourites ")
            }
            MenuItem::Details => draw_details(f, layout.main, app),
            MenuItem::Help => draw_help(f, layout.main),
        }

        if let Some(logs) = layout.logs {
            draw_logs(f, logs);
        }

        draw_loading_spinner(f, f.area(), app, loading);
    });
}

pub fn default_border<'a>(color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

fn draw_tabs(f: &mut Frame, tab_bar: [Rect; 2], app: &App) {
    let style = Style::default().fg(Color::White);
    let border_type = BorderType::Rounded;

    let tab_index = match app.state.active_tab {
        MenuItem::Nearby => 0,
        MenuItem::Favourites => 1,
        MenuItem::Details => 2,
        MenuItem::Help => 0,
    };

    let titles: Vec<Line> = TABS.iter().map(|t| Line::from(*t)).collect();
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .highlight_style(Style::default().add_modifier(Modifier::UNDERLINED))
        .select(tab_index)
        .style(style);
    f.render_widget(tabs, tab_bar[0]);

    let help = Paragraph::new("Help: ? ")
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::RIGHT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .style(style);
    f.render_widget(help, tab_bar[1]);
}

/// Error first, then the search bar while typing, then the last status message.
fn draw_status(f: &mut Frame, area: Rect, app: &App) {
    let search = &app.state.search;
    let line = if let Some(err) = app.state.last_error.as_deref() {
        Line::from(Span::styled(format!(" {err}"), style(Palette::Warning)))
    } else if search.active || !search.query.is_empty() {
        let cursor = if search.active { "_" } else { "" };
        Line::from(vec![
            Span::styled(" Filter: ", style(Palette::Dim)),
            Span::styled(format!("{}{cursor}", search.query), style(Palette::Accent)),
        ])
    } else if let Some(status) = app.state.status.as_deref() {
        Line::from(Span::styled(format!(" {status}"), style(Palette::Dim)))
    } else {
        Line::from("")
    };
    f.render_widget(Paragraph::new(line), area);
}

fn draw_club_list(f: &mut Frame, area: Rect, app: &App, list: &ClubListState, title: &str) {
    let title = match list.country.as_deref() {
        Some(country) => format!("{}- {country} ", title),
        None => title.to_string(),
    };
    let block = default_border(Color::White).title(title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let visible = list.visible(&app.state.search.query);
    if visible.is_empty() {
        let msg = if !list.loaded {
            match app.state.active_tab {
                MenuItem::Favourites => "Loading favourites...",
                _ => "Fetching nearby clubs...",
            }
        } else if !app.state.search.query.is_empty() {
            "No clubs match the filter."
        } else if app.state.active_tab == MenuItem::Favourites {
            "No favourites yet. Press s on a club to add it."
        } else {
            "No clubs found near your location."
        };
        f.render_widget(
            Paragraph::new(msg)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    }

    let favourites = app.favourite_ids();
    let [cards, legend] = Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(inner);
    f.render_widget(
        ClubCards { clubs: &visible, selected: list.selected, favourites: &favourites },
        cards,
    );
    f.render_widget(
        Paragraph::new("j/k=move  Enter=fixtures  s=favourite  /=filter  r=reload")
            .style(Style::default().fg(Color::DarkGray)),
        legend,
    );
}

fn draw_details(f: &mut Frame, area: Rect, app: &App) {
    let details = &app.state.details;
    let Some(team) = details.team.as_ref() else {
        draw_placeholder(f, area, "Select a club and press Enter to see its fixtures");
        return;
    };

    let marker = if app.is_favourite(team.id) { " ★" } else { "" };
    let block = default_border(Color::White).title(format!(" {}{marker} ", team.name));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut lines = vec![
        Line::from(Span::styled(team.venue_label(), style(Palette::Dim))),
        Line::from(""),
    ];
    match details.resolved.as_ref() {
        Some(resolved) if !details.is_loading() => lines.extend(fixture_lines(resolved, &Local)),
        _ => lines.push(Line::from(Span::styled("Loading fixtures...", style(Palette::Dim)))),
    }

    f.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((details.scroll_offset, 0)),
        inner,
    );
}

fn draw_help(f: &mut Frame, area: Rect) {
    let block = default_border(Color::DarkGray).title(" Help ");
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(Paragraph::new(HELP_TEXT), inner);
}

fn draw_logs(f: &mut Frame, area: Rect) {
    let logs = TuiLoggerWidget::default()
        .block(default_border(Color::DarkGray).title(" Logs "))
        .style_error(Style::default().fg(Color::Red))
        .style_warn(Style::default().fg(Color::Yellow))
        .style_info(Style::default().fg(Color::Gray))
        .style_debug(Style::default().fg(Color::DarkGray));
    f.render_widget(logs, area);
}

fn draw_placeholder(f: &mut Frame, area: Rect, msg: &str) {
    let block = default_border(Color::DarkGray);
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(
        Paragraph::new(msg)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center),
        inner,
    );
}

fn draw_loading_spinner(f: &mut Frame, area: Rect, app: &App, loading: LoadingState) {
    if !loading.is_loading && loading.spinner_char != ERROR_CHAR {
        return;
    }
    let style = match loading.spinner_char {
        ERROR_CHAR => Style::default().fg(Color::Red),
        _ => Style::default().fg(Color::White),
    };
    let spinner = Paragraph::new(loading.spinner_char.to_string())
        .alignment(Alignment::Right)
        .style(style);
    let area = if app.settings.full_screen {
        Rect::new(area.width.saturating_sub(3), area.height.saturating_sub(2), 1, 1)
    } else {
        Rect::new(area.width.saturating_sub(11), 1, 1, 1)
    };
    f.render_widget(spinner, area);
}
