use crate::state::app_state::RequestToken;
use crate::state::network::LoadingState;
use crossterm::event::KeyEvent;
use stands_api::{ClubListing, ResolvedFixtureSet, Team};
use std::collections::BTreeSet;

#[derive(Debug, Clone)]
pub enum NetworkRequest {
    LocateClubs { token: RequestToken },
    LoadFavourites { token: RequestToken, ids: BTreeSet<u32> },
    ResolveFixtures { token: RequestToken, team_id: u32 },
}

#[derive(Debug)]
pub enum NetworkResponse {
    LoadingStateChanged { loading_state: LoadingState },
    /// Listing answers carry the token of the request they answer so stale ones can be dropped.
    ClubsLoaded { token: RequestToken, listing: ClubListing },
    FavouritesLoaded { token: RequestToken, clubs: Vec<Team> },
    FixturesResolved { token: RequestToken, team_id: u32, resolved: ResolvedFixtureSet },
    Error { message: String },
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    KeyPressed(KeyEvent),
    Resize,
    AppStarted,
}
