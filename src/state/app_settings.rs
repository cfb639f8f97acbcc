use chrono::{DateTime, Utc};
use log::LevelFilter;
use stands_api::client::{API_FOOTBALL_URL, FootballApi, NOMINATIM_URL};
use stands_api::config::{ResolverConfig, TeamOverride};
use std::collections::HashMap;
use std::path::PathBuf;

// Glasgow city centre.
const DEFAULT_LATITUDE: f64 = 55.8642;
const DEFAULT_LONGITUDE: f64 = -4.2518;

#[derive(Debug, Clone)]
pub struct AppSettings {
    pub full_screen: bool,
    pub log_level: Option<LevelFilter>,
    pub api_key: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    /// Fixed "now" for classifying fixtures; wall-clock time when unset.
    pub reference_now: Option<DateTime<Utc>>,
    pub football_url: String,
    pub geocode_url: String,
    pub favourites_path: PathBuf,
    pub resolver: ResolverConfig,
}

impl AppSettings {
    pub fn load() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from a variable lookup. Unparseable values keep the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());

        let mut resolver = ResolverConfig::default();
        if let Some(seasons) = get("STANDS_SEASONS").as_deref().and_then(parse_seasons) {
            resolver.seasons = seasons;
        }
        if let Some(overrides) = get("STANDS_OVERRIDES").as_deref().and_then(parse_overrides) {
            resolver.overrides = overrides;
        }
        if let Some(nation) = get("STANDS_DEFAULT_NATION") {
            resolver.country.default_nation = nation;
        }

        Self {
            full_screen: false,
            log_level: get("STANDS_LOG").and_then(|v| v.parse().ok()),
            api_key: get("STANDS_API_KEY"),
            latitude: get("STANDS_LAT")
                .and_then(|v| v.parse::<f64>().ok())
                .filter(|lat| (-90.0..=90.0).contains(lat))
                .unwrap_or(DEFAULT_LATITUDE),
            longitude: get("STANDS_LON")
                .and_then(|v| v.parse::<f64>().ok())
                .filter(|lon| (-180.0..=180.0).contains(lon))
                .unwrap_or(DEFAULT_LONGITUDE),
            reference_now: get("STANDS_NOW").as_deref().and_then(parse_instant),
            football_url: get("STANDS_FOOTBALL_URL").unwrap_or_else(|| API_FOOTBALL_URL.to_owned()),
            geocode_url: get("STANDS_GEOCODE_URL").unwrap_or_else(|| NOMINATIM_URL.to_owned()),
            favourites_path: get("STANDS_FAVOURITES")
                .map(PathBuf::from)
                .unwrap_or_else(|| favourites_path(&get)),
            resolver,
        }
    }

    /// The reference instant fixtures are classified against.
    pub fn now(&self) -> DateTime<Utc> {
        self.reference_now.unwrap_or_else(Utc::now)
    }

    pub fn api(&self) -> FootballApi {
        FootballApi::new(self.api_key.clone().unwrap_or_default())
            .with_base_urls(&self.football_url, &self.geocode_url)
    }
}

fn favourites_path(get: &impl Fn(&str) -> Option<String>) -> PathBuf {
    if let Some(config_dir) = get("XDG_CONFIG_HOME") {
        return PathBuf::from(config_dir).join("stands").join("favourites.json");
    }
    if let Some(home) = get("HOME") {
        return PathBuf::from(home).join(".config").join("stands").join("favourites.json");
    }
    PathBuf::from("favourites.json")
}

/// "2025, 2024" → [2025, 2024]. Any bad entry rejects the whole list.
fn parse_seasons(raw: &str) -> Option<Vec<u16>> {
    let seasons: Vec<u16> = raw
        .split(',')
        .map(|s| s.trim().parse().ok())
        .collect::<Option<Vec<u16>>>()?;
    (!seasons.is_empty()).then_some(seasons)
}

/// "247:2024,257:2023" → team → single-season override.
fn parse_overrides(raw: &str) -> Option<HashMap<u32, TeamOverride>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|pair| {
            let (team, season) = pair.split_once(':')?;
            let team: u32 = team.trim().parse().ok()?;
            let season: u16 = season.trim().parse().ok()?;
            Some((team, TeamOverride::SingleSeason { season }))
        })
        .collect()
}

fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn settings(vars: &[(&str, &str)]) -> AppSettings {
        let vars: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        AppSettings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_without_environment() {
        let s = settings(&[]);
        assert_eq!(s.api_key, None);
        assert_eq!(s.latitude, DEFAULT_LATITUDE);
        assert_eq!(s.reference_now, None);
        assert_eq!(s.resolver, ResolverConfig::default());
        assert_eq!(s.favourites_path, PathBuf::from("favourites.json"));
        assert_eq!(s.football_url, API_FOOTBALL_URL);
    }

    #[test]
    fn reads_policy_values() {
        let s = settings(&[
            ("STANDS_API_KEY", " secret "),
            ("STANDS_SEASONS", "2026, 2025"),
            ("STANDS_OVERRIDES", "247:2024, 257:2023"),
            ("STANDS_DEFAULT_NATION", "England"),
            ("STANDS_NOW", "2025-03-01T15:00:00Z"),
            ("STANDS_LOG", "debug"),
        ]);
        assert_eq!(s.api_key.as_deref(), Some("secret"));
        assert_eq!(s.resolver.seasons, vec![2026, 2025]);
        assert_eq!(
            s.resolver.overrides.get(&247),
            Some(&TeamOverride::SingleSeason { season: 2024 })
        );
        assert_eq!(s.resolver.overrides.len(), 2);
        assert_eq!(s.resolver.country.default_nation, "England");
        assert_eq!(s.now(), Utc.with_ymd_and_hms(2025, 3, 1, 15, 0, 0).unwrap());
        assert_eq!(s.log_level, Some(LevelFilter::Debug));
    }

    #[test]
    fn bad_values_keep_defaults() {
        let s = settings(&[
            ("STANDS_SEASONS", "2025, last year"),
            ("STANDS_OVERRIDES", "247"),
            ("STANDS_LAT", "91"),
            ("STANDS_LON", "west"),
            ("STANDS_NOW", "tomorrow"),
        ]);
        assert_eq!(s.resolver.seasons, ResolverConfig::default().seasons);
        assert!(s.resolver.overrides.is_empty());
        assert_eq!(s.latitude, DEFAULT_LATITUDE);
        assert_eq!(s.longitude, DEFAULT_LONGITUDE);
        assert_eq!(s.reference_now, None);
    }

    #[test]
    fn favourites_live_under_config_dir() {
        let s = settings(&[("HOME", "/home/fan")]);
        assert_eq!(s.favourites_path, PathBuf::from("/home/fan/.config/stands/favourites.json"));

        let s = settings(&[("HOME", "/home/fan"), ("XDG_CONFIG_HOME", "/cfg")]);
        assert_eq!(s.favourites_path, PathBuf::from("/cfg/stands/favourites.json"));

        let s = settings(&[("STANDS_FAVOURITES", "/tmp/favs.json")]);
        assert_eq!(s.favourites_path, PathBuf::from("/tmp/favs.json"));
    }
}
