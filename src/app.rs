use crate::state::app_settings::AppSettings;
use crate::state::app_state::{AppState, RequestToken};
use crate::state::favourites::FileFavourites;
use log::{debug, info, warn};
use stands_api::favourites::FavouritesStore;
use stands_api::{ClubListing, ResolvedFixtureSet, Team};
use std::collections::BTreeSet;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum MenuItem {
    #[default]
    Nearby,
    Favourites,
    Details,
    Help,
}

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
    pub favourites: Box<dyn FavouritesStore + Send>,
}

impl App {
    pub fn new() -> Self {
        let settings = AppSettings::load();
        let favourites = FileFavourites::load(settings.favourites_path.clone());
        info!("favourites stored at {}", favourites.path().display());
        let app = Self::with_parts(settings, Box::new(favourites));

        if let Some(level) = app.settings.log_level {
            log::set_max_level(level);
            tui_logger::set_default_level(level);
        }
        if app.settings.api_key.is_none() {
            warn!("STANDS_API_KEY is not set; club and fixture requests will be rejected");
        }

        app
    }

    pub fn with_parts(settings: AppSettings, favourites: Box<dyn FavouritesStore + Send>) -> Self {
        Self { settings, state: AppState::new(), favourites }
    }

    // -----------------------------------------------------------------------
    // Network response handlers, called from main_ui_loop
    // -----------------------------------------------------------------------

    /// Marks the nearby list as waiting and returns the token for the locate request.
    pub fn request_clubs(&mut self) -> RequestToken {
        let token = self.state.requests.next();
        self.state.nearby.pending = Some(token);
        self.state.last_error = None;
        self.state.status = Some("Fetching nearby clubs...".to_string());
        token
    }

    /// Token and id snapshot for a favourites reload.
    pub fn request_favourites(&mut self) -> (RequestToken, BTreeSet<u32>) {
        let token = self.state.requests.next();
        self.state.favourites.pending = Some(token);
        (token, self.favourites.all())
    }

    /// Returns false when a newer locate request is outstanding.
    pub fn on_clubs_loaded(&mut self, token: RequestToken, listing: ClubListing) -> bool {
        if self.state.nearby.pending != Some(token) {
            debug!("dropping stale club listing for {} ({token:?})", listing.country);
            return false;
        }
        self.state.nearby.pending = None;
        self.state.last_error = None;
        self.state.status = Some(if listing.clubs.is_empty() {
            format!("No clubs found in {}.", listing.country)
        } else {
            format!("Showing {} clubs near your location.", listing.clubs.len())
        });
        self.state.nearby.load(listing.clubs, Some(listing.country));
        self.clamp_selection();
        true
    }

    pub fn on_favourites_loaded(&mut self, token: RequestToken, clubs: Vec<Team>) -> bool {
        if self.state.favourites.pending != Some(token) {
            debug!("dropping stale favourites ({} club(s), {token:?})", clubs.len());
            return false;
        }
        self.state.favourites.pending = None;
        self.state.last_error = None;
        self.state.favourites.load(clubs, None);
        self.clamp_selection();
        true
    }

    /// Returns false when the answer belongs to a superseded request.
    pub fn on_fixtures_resolved(
        &mut self,
        token: RequestToken,
        team_id: u32,
        resolved: ResolvedFixtureSet,
    ) -> bool {
        let details = &mut self.state.details;
        if details.pending != Some(token) {
            debug!("dropping stale fixtures for team {team_id} ({token:?})");
            return false;
        }
        info!("team {team_id}: {}", resolved.mode.heading());
        details.pending = None;
        details.resolved = Some(resolved);
        details.scroll_offset = 0;
        true
    }

    pub fn on_error(&mut self, message: String) {
        self.state.status = None;
        self.state.last_error = Some(message);
    }

    // -----------------------------------------------------------------------
    // Details
    // -----------------------------------------------------------------------

    /// Opens the details tab for the selected club and returns the request to send.
    pub fn open_details(&mut self) -> Option<(RequestToken, u32)> {
        let team = self.selected_team()?.clone();
        let team_id = team.id;
        let token = self.state.requests.next();

        let details = &mut self.state.details;
        details.team = Some(team);
        details.pending = Some(token);
        details.resolved = None;
        details.scroll_offset = 0;

        self.update_tab(MenuItem::Details);
        Some((token, team_id))
    }

    /// Re-issue the details request for the team already on screen.
    pub fn reload_details(&mut self) -> Option<(RequestToken, u32)> {
        let team_id = self.state.details.team.as_ref()?.id;
        let token = self.state.requests.next();
        self.state.details.pending = Some(token);
        Some((token, team_id))
    }

    pub fn scroll_details_down(&mut self) {
        self.state.details.scroll_offset = self.state.details.scroll_offset.saturating_add(1);
    }

    pub fn scroll_details_up(&mut self) {
        self.state.details.scroll_offset = self.state.details.scroll_offset.saturating_sub(1);
    }

    // -----------------------------------------------------------------------
    // Favourites
    // -----------------------------------------------------------------------

    /// The club the favourite key acts on: the details team, or the list selection.
    fn favourite_target(&self) -> Option<&Team> {
        match self.state.active_tab {
            MenuItem::Details => self.state.details.team.as_ref(),
            _ => self.selected_team(),
        }
    }

    /// Returns the favourites reload to send when the set changed.
    pub fn toggle_favourite(&mut self) -> Option<(RequestToken, BTreeSet<u32>)> {
        let team = self.favourite_target()?.clone();
        match self.favourites.toggle(team.id) {
            Ok(now_favourite) => {
                self.state.status = Some(if now_favourite {
                    format!("{} added to favourites.", team.name)
                } else {
                    format!("{} removed from favourites.", team.name)
                });
                if !now_favourite {
                    self.state.favourites.clubs.retain(|t| t.id != team.id);
                    self.clamp_selection();
                }
                Some(self.request_favourites())
            }
            Err(e) => {
                warn!("could not save favourites: {e}");
                self.on_error(format!("Could not save favourites: {e}"));
                None
            }
        }
    }

    pub fn is_favourite(&self, team_id: u32) -> bool {
        self.favourites.contains(team_id)
    }

    pub fn favourite_ids(&self) -> BTreeSet<u32> {
        self.favourites.all()
    }

    // -----------------------------------------------------------------------
    // Club list navigation and search
    // -----------------------------------------------------------------------

    pub fn selected_team(&self) -> Option<&Team> {
        let filter = self.state.search.query.as_str();
        self.state.club_list()?.selected_team(filter)
    }

    pub fn select_down(&mut self) {
        let filter = self.state.search.query.clone();
        if let Some(list) = self.state.club_list_mut() {
            list.move_down(&filter);
        }
    }

    pub fn select_up(&mut self) {
        if let Some(list) = self.state.club_list_mut() {
            list.move_up();
        }
    }

    fn clamp_selection(&mut self) {
        let filter = self.state.search.query.clone();
        self.state.nearby.clamp_selection(&filter);
        self.state.favourites.clamp_selection(&filter);
    }

    pub fn start_search(&mut self) {
        self.state.search.active = true;
    }

    pub fn search_push(&mut self, c: char) {
        self.state.search.query.push(c);
        self.clamp_selection();
    }

    pub fn search_pop(&mut self) {
        self.state.search.query.pop();
        self.clamp_selection();
    }

    /// Stop typing but keep the filter applied.
    pub fn finish_search(&mut self) {
        self.state.search.active = false;
    }

    pub fn clear_search(&mut self) {
        self.state.search.active = false;
        self.state.search.query.clear();
    }

    // -----------------------------------------------------------------------
    // Tab management
    // -----------------------------------------------------------------------

    pub fn update_tab(&mut self, next: MenuItem) {
        if self.state.active_tab == next {
            return;
        }
        self.state.previous_tab = self.state.active_tab;
        self.state.active_tab = next;
        self.state.search.active = false;
        self.clamp_selection();
    }

    pub fn exit_help(&mut self) {
        if self.state.active_tab == MenuItem::Help {
            self.state.active_tab = self.state.previous_tab;
        }
    }

    pub fn toggle_show_logs(&mut self) {
        self.state.show_logs = !self.state.show_logs;
    }

    pub fn toggle_full_screen(&mut self) {
        self.settings.full_screen = !self.settings.full_screen;
    }
}
