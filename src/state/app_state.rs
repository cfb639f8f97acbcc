use crate::app::MenuItem;
use stands_api::{ResolvedFixtureSet, Team};

/// Sequence number tagging a request. Only the latest one per view is honoured.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestToken(u64);

#[derive(Debug, Default)]
pub struct RequestCounter {
    last: u64,
}

impl RequestCounter {
    pub fn next(&mut self) -> RequestToken {
        self.last += 1;
        RequestToken(self.last)
    }
}

// ---------------------------------------------------------------------------
// Club list state (shared by the Nearby and Favourites tabs)
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct ClubListState {
    pub clubs: Vec<Team>,
    /// Index into the filtered view, not into `clubs`.
    pub selected: usize,
    /// Country that was searched. Favourites have none.
    pub country: Option<String>,
    pub loaded: bool,
    /// The listing request whose answer this list is waiting for.
    pub pending: Option<RequestToken>,
}

impl ClubListState {
    pub fn load(&mut self, clubs: Vec<Team>, country: Option<String>) {
        self.clubs = clubs;
        self.country = country;
        self.selected = 0;
        self.loaded = true;
    }

    /// Clubs matching the filter, provider order preserved.
    pub fn visible(&self, filter: &str) -> Vec<&Team> {
        let needle = filter.trim().to_lowercase();
        self.clubs
            .iter()
            .filter(|team| needle.is_empty() || matches_filter(team, &needle))
            .collect()
    }

    pub fn selected_team(&self, filter: &str) -> Option<&Team> {
        self.visible(filter).get(self.selected).copied()
    }

    pub fn move_down(&mut self, filter: &str) {
        let max = self.visible(filter).len().saturating_sub(1);
        if self.selected < max {
            self.selected += 1;
        }
    }

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Keep the selection inside the filtered view after the filter changes.
    pub fn clamp_selection(&mut self, filter: &str) {
        let len = self.visible(filter).len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }
}

fn matches_filter(team: &Team, needle: &str) -> bool {
    let venue = [team.venue.name.as_deref(), team.venue.city.as_deref()];
    std::iter::once(Some(team.name.as_str()))
        .chain(venue)
        .flatten()
        .any(|field| field.to_lowercase().contains(needle))
}

// ---------------------------------------------------------------------------
// Search and details
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct SearchState {
    /// True while keystrokes go into the query.
    pub active: bool,
    pub query: String,
}

#[derive(Debug, Default)]
pub struct DetailState {
    pub team: Option<Team>,
    /// Token of the request whose answer we are waiting for.
    pub pending: Option<RequestToken>,
    pub resolved: Option<ResolvedFixtureSet>,
    pub scroll_offset: u16,
}

impl DetailState {
    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }
}

// ---------------------------------------------------------------------------
// Root app state
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct AppState {
    pub active_tab: MenuItem,
    pub previous_tab: MenuItem,
    pub show_logs: bool,
    pub last_error: Option<String>,
    /// Short-lived confirmation shown in the status line.
    pub status: Option<String>,
    pub nearby: ClubListState,
    pub favourites: ClubListState,
    pub search: SearchState,
    pub details: DetailState,
    pub requests: RequestCounter,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The club list behind the active tab, if it has one.
    pub fn club_list(&self) -> Option<&ClubListState> {
        match self.active_tab {
            MenuItem::Nearby => Some(&self.nearby),
            MenuItem::Favourites => Some(&self.favourites),
            MenuItem::Details | MenuItem::Help => None,
        }
    }

    pub fn club_list_mut(&mut self) -> Option<&mut ClubListState> {
        match self.active_tab {
            MenuItem::Nearby => Some(&mut self.nearby),
            MenuItem::Favourites => Some(&mut self.favourites),
            MenuItem::Details | MenuItem::Help => None,
        }
    }
}
