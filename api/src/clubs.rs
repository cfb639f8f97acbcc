use crate::client::ApiResult;
use crate::config::ResolverConfig;
use crate::country::resolve_country;
use crate::favourites::FavouritesStore;
use crate::source::SportsData;
use crate::{ClubListing, Team};
use log::info;

/// Clubs near a coordinate: country resolution, team listing, display cap.
///
/// No teams for the resolved country is an empty listing, not an error.
pub async fn list_nearby_clubs<S: SportsData>(
    source: &S,
    config: &ResolverConfig,
    lat: f64,
    lon: f64,
) -> ApiResult<ClubListing> {
    let country = resolve_country(source, &config.country, lat, lon).await?;
    let mut clubs = source.list_teams(&country).await?;
    let found = clubs.len();
    clubs.truncate(config.club_cap);
    info!("{found} clubs listed for {country}, showing {}", clubs.len());
    Ok(ClubListing { country, clubs })
}

/// The teams behind the favourites store's ids.
pub async fn list_favourite_clubs<S: SportsData, F: FavouritesStore + ?Sized>(
    source: &S,
    favourites: &F,
) -> ApiResult<Vec<Team>> {
    let ids = favourites.all();
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    source.list_teams_by_ids(&ids).await
}
