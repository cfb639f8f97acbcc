use std::collections::HashMap;

pub const DEFAULT_SEASONS: [u16; 3] = [2025, 2024, 2023];
pub const DEFAULT_FIXTURE_LIMIT: u8 = 5;
pub const DEFAULT_CLUB_CAP: usize = 12;
pub const UK_UMBRELLA_LABEL: &str = "United Kingdom";
pub const DEFAULT_NATION: &str = "Scotland";

/// Per-team replacement for the general season ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeamOverride {
    /// Fetch one whole season, keep what kicks off at or after the reference
    /// instant, and fall back to that season's most recent fixtures.
    SingleSeason { season: u16 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryConfig {
    /// Label the geocoder returns for the union of home nations.
    pub umbrella_label: String,
    /// Nation the club listing is searched under instead.
    pub default_nation: String,
}

impl Default for CountryConfig {
    fn default() -> Self {
        Self {
            umbrella_label: UK_UMBRELLA_LABEL.to_owned(),
            default_nation: DEFAULT_NATION.to_owned(),
        }
    }
}

/// Every policy value the listing flow and the fixture engine depend on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Seasons to try for upcoming fixtures, highest priority first.
    pub seasons: Vec<u16>,
    /// Provider-side `next`/`last` limit for fixture requests.
    pub fixture_limit: u8,
    /// Maximum clubs shown for one country.
    pub club_cap: usize,
    /// Team names used for the synthetic example fixture.
    pub placeholder_teams: (String, String),
    pub overrides: HashMap<u32, TeamOverride>,
    pub country: CountryConfig,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            seasons: DEFAULT_SEASONS.to_vec(),
            fixture_limit: DEFAULT_FIXTURE_LIMIT,
            club_cap: DEFAULT_CLUB_CAP,
            placeholder_teams: ("Home FC".to_owned(), "Away United".to_owned()),
            overrides: HashMap::new(),
            country: CountryConfig::default(),
        }
    }
}

impl ResolverConfig {
    pub fn with_override(mut self, team_id: u32, strategy: TeamOverride) -> Self {
        self.overrides.insert(team_id, strategy);
        self
    }

    /// The season used for the "recent fixtures" fallback.
    pub fn latest_season(&self) -> Option<u16> {
        self.seasons.first().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_keep_display_caps() {
        let config = ResolverConfig::default();
        assert_eq!(config.fixture_limit, 5);
        assert_eq!(config.club_cap, 12);
        assert_eq!(config.latest_season(), Some(2025));
        assert!(config.overrides.is_empty());
    }

    #[test]
    fn latest_season_follows_priority_order_not_magnitude() {
        let config = ResolverConfig { seasons: vec![2022, 2024], ..Default::default() };
        assert_eq!(config.latest_season(), Some(2022));
    }
}
