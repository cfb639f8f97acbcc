//! The outbound operations the listing flow and the fixture engine rely on.
//!
//! [`crate::client::FootballApi`] is the production implementation; tests
//! supply scripted in-memory sources.

use crate::client::ApiResult;
use crate::{Fixture, Team};
use std::collections::BTreeSet;
use std::future::Future;

/// Which slice of a team's fixtures to ask the provider for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FixtureWindow {
    /// The next `n` fixtures, soonest first.
    Next(u8),
    /// The last `n` played fixtures.
    Last(u8),
    /// Every fixture the provider has for the query.
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FixtureQuery {
    pub season: Option<u16>,
    pub window: FixtureWindow,
}

impl FixtureQuery {
    pub fn next(season: u16, limit: u8) -> Self {
        Self { season: Some(season), window: FixtureWindow::Next(limit) }
    }

    pub fn last(season: u16, limit: u8) -> Self {
        Self { season: Some(season), window: FixtureWindow::Last(limit) }
    }

    pub fn whole_season(season: u16) -> Self {
        Self { season: Some(season), window: FixtureWindow::All }
    }
}

/// One request/response per call. No caching, no retries.
pub trait SportsData: Send + Sync {
    /// Teams for a provider country label, in provider order.
    fn list_teams(&self, country: &str) -> impl Future<Output = ApiResult<Vec<Team>>> + Send;

    /// Teams for a set of ids, ascending by id.
    fn list_teams_by_ids(
        &self,
        ids: &BTreeSet<u32>,
    ) -> impl Future<Output = ApiResult<Vec<Team>>> + Send;

    fn list_fixtures(
        &self,
        team_id: u32,
        query: FixtureQuery,
    ) -> impl Future<Output = ApiResult<Vec<Fixture>>> + Send;

    /// Raw country label for a coordinate, before any normalization.
    fn reverse_geocode(&self, lat: f64, lon: f64) -> impl Future<Output = ApiResult<String>> + Send;
}
