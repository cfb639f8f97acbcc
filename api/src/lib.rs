pub mod api_football;
pub mod client;
pub mod clubs;
pub mod config;
pub mod country;
pub mod favourites;
pub mod nominatim;
pub mod resolve;
pub mod source;

use chrono::{DateTime, Utc};
use serde::Serialize;

// ---------------------------------------------------------------------------
// Domain types, independent of the provider wire format
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Team {
    pub id: u32,
    pub name: String,
    pub logo: String,
    pub venue: Venue,
}

impl Team {
    /// "Ibrox Stadium, Glasgow", or whichever half the provider knows.
    pub fn venue_label(&self) -> String {
        match (self.venue.name.as_deref(), self.venue.city.as_deref()) {
            (Some(name), Some(city)) => format!("{name}, {city}"),
            (Some(name), None) => name.to_owned(),
            (None, Some(city)) => city.to_owned(),
            (None, None) => "Venue unknown".to_owned(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Venue {
    pub name: Option<String>,
    pub city: Option<String>,
}

/// A single match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fixture {
    /// Provider fixture id. `None` for synthetic placeholders.
    pub id: Option<u64>,
    pub home: String,
    pub away: String,
    pub kickoff: DateTime<Utc>,
    pub score: Option<(u8, u8)>, // (home, away), once played
}

impl Fixture {
    pub fn is_synthetic(&self) -> bool {
        self.id.is_none()
    }
}

/// Why a fixture set looks the way it does. Drives the heading in the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    Upcoming,
    Recent,
    Example,
    Error,
}

impl DisplayMode {
    pub fn heading(&self) -> &'static str {
        match self {
            DisplayMode::Upcoming => "Upcoming fixtures",
            DisplayMode::Recent => "Recent fixtures",
            DisplayMode::Example => "Example fixture (no data available)",
            DisplayMode::Error => "Could not load fixtures",
        }
    }
}

/// Fixtures chosen for one team, with the mode explaining how they were chosen.
///
/// `fixtures` is empty exactly when `mode` is [`DisplayMode::Error`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedFixtureSet {
    pub mode: DisplayMode,
    pub fixtures: Vec<Fixture>,
}

impl ResolvedFixtureSet {
    pub fn error() -> Self {
        Self { mode: DisplayMode::Error, fixtures: Vec::new() }
    }

    /// `None` when `fixtures` is empty, which would break the mode invariant.
    pub(crate) fn found(mode: DisplayMode, fixtures: Vec<Fixture>) -> Option<Self> {
        debug_assert!(mode != DisplayMode::Error);
        if fixtures.is_empty() {
            None
        } else {
            Some(Self { mode, fixtures })
        }
    }

    pub fn is_error(&self) -> bool {
        self.mode == DisplayMode::Error
    }
}

/// Clubs found for a resolved country, already capped for display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClubListing {
    pub country: String,
    pub clubs: Vec<Team>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn venue_label_uses_what_is_known() {
        let mut team = Team::default();
        assert_eq!(team.venue_label(), "Venue unknown");
        team.venue.city = Some("Perth".into());
        assert_eq!(team.venue_label(), "Perth");
        team.venue.name = Some("McDiarmid Park".into());
        assert_eq!(team.venue_label(), "McDiarmid Park, Perth");
    }

    #[test]
    fn found_refuses_empty_fixture_lists() {
        assert!(ResolvedFixtureSet::found(DisplayMode::Recent, Vec::new()).is_none());
        assert!(ResolvedFixtureSet::error().fixtures.is_empty());
    }
}
