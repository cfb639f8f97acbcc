//! Decide which fixtures to show for a team.
//!
//! The provider's per-team data is patchy (missing current-season data,
//! inconsistent season boundaries), so resolution walks a plan of
//! increasingly weaker strategies until one yields fixtures:
//!
//! 1) upcoming fixtures, one candidate season at a time;
//! 2) the latest season's most recent fixtures;
//! 3) a single synthetic example fixture.
//!
//! Teams in the override table replace steps 1–2 with a whole-season fetch
//! filtered against the reference instant, then that season's recent
//! fixtures. A failed call ends resolution with [`DisplayMode::Error`]; it is
//! never a reason to move on to the next strategy.

use crate::client::ApiError;
use crate::config::{ResolverConfig, TeamOverride};
use crate::source::{FixtureQuery, SportsData};
use crate::{DisplayMode, Fixture, ResolvedFixtureSet};
use chrono::{DateTime, Utc};
use log::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Next fixtures for one season, in provider order.
    Upcoming { season: u16 },
    /// Last fixtures for one season, in provider order.
    Recent { season: u16 },
    /// A whole season, filtered to kickoffs at or after the reference instant
    /// and sorted locally.
    UpcomingInSeason { season: u16 },
}

/// Result of trying one strategy.
#[derive(Debug)]
pub enum Outcome {
    Found(ResolvedFixtureSet),
    Empty,
    Failed(ApiError),
}

#[derive(Debug, Clone)]
pub struct FixtureResolver<S> {
    source: S,
    config: ResolverConfig,
}

impl<S: SportsData> FixtureResolver<S> {
    pub fn new(source: S, config: ResolverConfig) -> Self {
        Self { source, config }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Strategies for `team_id`, in the order they are tried. The example
    /// fixture is not listed: it is what an exhausted plan produces.
    pub fn plan(&self, team_id: u32) -> Vec<Strategy> {
        match self.config.overrides.get(&team_id) {
            Some(TeamOverride::SingleSeason { season }) => vec![
                Strategy::UpcomingInSeason { season: *season },
                Strategy::Recent { season: *season },
            ],
            None => {
                let mut plan: Vec<Strategy> = self
                    .config
                    .seasons
                    .iter()
                    .map(|&season| Strategy::Upcoming { season })
                    .collect();
                if let Some(season) = self.config.latest_season() {
                    plan.push(Strategy::Recent { season });
                }
                plan
            }
        }
    }

    /// Fixtures to show for `team_id` as of `now`. Never fails: provider
    /// errors come back as an empty [`DisplayMode::Error`] set.
    pub async fn resolve(&self, team_id: u32, now: DateTime<Utc>) -> ResolvedFixtureSet {
        for strategy in self.plan(team_id) {
            match self.attempt(team_id, strategy, now).await {
                Outcome::Found(resolved) => {
                    info!(
                        "team {team_id}: {} fixture(s) via {strategy:?}",
                        resolved.fixtures.len()
                    );
                    return resolved;
                }
                Outcome::Empty => debug!("team {team_id}: nothing via {strategy:?}"),
                Outcome::Failed(err) => {
                    warn!("team {team_id}: {strategy:?} failed, giving up: {err}");
                    return ResolvedFixtureSet::error();
                }
            }
        }

        info!("team {team_id}: no fixtures anywhere, showing example");
        example_fixtures(&self.config, now)
    }

    pub async fn attempt(&self, team_id: u32, strategy: Strategy, now: DateTime<Utc>) -> Outcome {
        let limit = self.config.fixture_limit;
        let (query, mode) = match strategy {
            Strategy::Upcoming { season } => (FixtureQuery::next(season, limit), DisplayMode::Upcoming),
            Strategy::Recent { season } => (FixtureQuery::last(season, limit), DisplayMode::Recent),
            Strategy::UpcomingInSeason { season } => {
                (FixtureQuery::whole_season(season), DisplayMode::Upcoming)
            }
        };

        let fixtures = match self.source.list_fixtures(team_id, query).await {
            Ok(fixtures) => fixtures,
            Err(err) => return Outcome::Failed(err),
        };

        let fixtures = match strategy {
            Strategy::UpcomingInSeason { .. } => upcoming_from(fixtures, now),
            _ => fixtures,
        };

        match ResolvedFixtureSet::found(mode, fixtures) {
            Some(resolved) => Outcome::Found(resolved),
            None => Outcome::Empty,
        }
    }
}

/// Fixtures kicking off at or after `now`, earliest first. Filtering can
/// disturb provider order, so this always sorts.
pub fn upcoming_from(fixtures: Vec<Fixture>, now: DateTime<Utc>) -> Vec<Fixture> {
    let mut upcoming: Vec<Fixture> = fixtures.into_iter().filter(|f| f.kickoff >= now).collect();
    upcoming.sort_by_key(|f| f.kickoff);
    upcoming
}

/// One clearly synthetic fixture, kicking off at `now`, with no provider id.
pub fn example_fixtures(config: &ResolverConfig, now: DateTime<Utc>) -> ResolvedFixtureSet {
    let (home, away) = &config.placeholder_teams;
    ResolvedFixtureSet {
        mode: DisplayMode::Example,
        fixtures: vec![Fixture {
            id: None,
            home: home.clone(),
            away: away.clone(),
            kickoff: now,
            score: None,
        }],
    }
}
