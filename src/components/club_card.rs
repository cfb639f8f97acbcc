use crate::components::theme::{Palette, style};
use stands_api::Team;
use std::collections::BTreeSet;
use tui::buffer::Buffer;
use tui::layout::Rect;
use tui::style::Modifier;
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Paragraph, Widget};

/// Border, name row, venue row, border.
pub const CARD_HEIGHT: u16 = 4;
const FAVOURITE_MARKER: &str = "★";

/// A column of club cards that keeps the selected card on screen.
pub struct ClubCards<'a> {
    pub clubs: &'a [&'a Team],
    pub selected: usize,
    pub favourites: &'a BTreeSet<u32>,
}

impl Widget for ClubCards<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < CARD_HEIGHT || area.width < 8 {
            return;
        }
        let per_page = (area.height / CARD_HEIGHT) as usize;
        let first = first_visible(self.selected, per_page);

        for (slot, (idx, team)) in self.clubs.iter().enumerate().skip(first).take(per_page).enumerate() {
            let card = Rect::new(area.x, area.y + slot as u16 * CARD_HEIGHT, area.width, CARD_HEIGHT);
            render_card(team, idx == self.selected, self.favourites.contains(&team.id), card, buf);
        }
    }
}

fn first_visible(selected: usize, per_page: usize) -> usize {
    selected.saturating_sub(per_page.saturating_sub(1))
}

fn render_card(team: &Team, selected: bool, favourite: bool, area: Rect, buf: &mut Buffer) {
    let (border_type, border_style) = if selected {
        (BorderType::Thick, style(Palette::Accent))
    } else {
        (BorderType::Rounded, style(Palette::Primary))
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(border_style);
    let inner = block.inner(area);
    block.render(area, buf);

    let mut name = vec![Span::styled(
        team.name.clone(),
        style(Palette::Primary).add_modifier(Modifier::BOLD),
    )];
    if favourite {
        name.push(Span::raw(" "));
        name.push(Span::styled(FAVOURITE_MARKER, style(Palette::Favourite)));
    }
    let lines = vec![
        Line::from(name),
        Line::from(Span::styled(team.venue_label(), style(Palette::Dim))),
    ];
    Paragraph::new(lines).render(inner, buf);
}
