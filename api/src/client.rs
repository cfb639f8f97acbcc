use crate::api_football::{self, FixtureItem, TeamItem};
use crate::nominatim::ReverseResponse;
use crate::source::{FixtureQuery, FixtureWindow, SportsData};
use crate::{Fixture, Team};
use log::debug;
use reqwest::{Client, RequestBuilder, Url};
use serde_json::Value;
use std::collections::BTreeSet;
use std::fmt;
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

pub const API_FOOTBALL_URL: &str = "https://v3.football.api-sports.io";
pub const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";
const API_KEY_HEADER: &str = "x-apisports-key";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// api-football and reverse-geocoding client.
#[derive(Debug, Clone)]
pub struct FootballApi {
    client: Client,
    api_key: String,
    football_url: String,
    geocode_url: String,
    timeout: Duration,
}

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    Api(reqwest::Error, String),
    Parsing(reqwest::Error, String),
    Malformed { url: String, reason: String },
    GeoLookup(String),
    Other(String),
}

/// The two failure classes callers act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    GeoLookupFailed,
    ProviderUnavailable,
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::GeoLookup(_) => ErrorKind::GeoLookupFailed,
            _ => ErrorKind::ProviderUnavailable,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Api(e, url) => write!(f, "API error for {url}: {e}"),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
            ApiError::Malformed { url, reason } => write!(f, "Malformed payload from {url}: {reason}"),
            ApiError::GeoLookup(msg) => write!(f, "Location lookup failed: {msg}"),
            ApiError::Other(msg) => write!(f, "Error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl FootballApi {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .user_agent("stands/0.1 (terminal club finder)")
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            football_url: API_FOOTBALL_URL.to_owned(),
            geocode_url: NOMINATIM_URL.to_owned(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Point the client at different hosts (self-hosted geocoder, test servers).
    pub fn with_base_urls(mut self, football_url: &str, geocode_url: &str) -> Self {
        self.football_url = football_url.trim_end_matches('/').to_owned();
        self.geocode_url = geocode_url.trim_end_matches('/').to_owned();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Fetch teams for a provider country label.
    pub async fn fetch_teams(&self, country: &str) -> ApiResult<Vec<Team>> {
        let url = self.football_endpoint("teams", &[("country", country.to_owned())])?;
        let items: Vec<TeamItem> = self.get_response(url).await?;
        Ok(items.into_iter().map(api_football::map_team).collect())
    }

    /// Fetch teams by id. `/teams` only filters on a single `id`, so this makes one
    /// request per id, ascending, and stops at the first failure.
    pub async fn fetch_teams_by_ids(&self, ids: &BTreeSet<u32>) -> ApiResult<Vec<Team>> {
        let mut teams = Vec::with_capacity(ids.len());
        for id in ids {
            let url = self.football_endpoint("teams", &[("id", id.to_string())])?;
            let items: Vec<TeamItem> = self.get_response(url).await?;
            teams.extend(items.into_iter().map(api_football::map_team));
        }
        Ok(teams)
    }

    pub async fn fetch_fixtures(&self, team_id: u32, query: FixtureQuery) -> ApiResult<Vec<Fixture>> {
        let url = self.football_endpoint("fixtures", &fixture_params(team_id, query))?;
        let items: Vec<FixtureItem> = self.get_response(url.clone()).await?;
        items
            .into_iter()
            .map(|item| {
                api_football::map_fixture(item).ok_or_else(|| ApiError::Malformed {
                    url: url.to_string(),
                    reason: "fixture without kickoff time".into(),
                })
            })
            .collect()
    }

    /// Reverse-geocode a coordinate to the geocoder's country label.
    pub async fn fetch_country(&self, lat: f64, lon: f64) -> ApiResult<String> {
        let url = Url::parse_with_params(
            &format!("{}/reverse", self.geocode_url),
            &[
                ("format", "jsonv2".to_owned()),
                ("lat", lat.to_string()),
                ("lon", lon.to_string()),
                ("accept-language", "en".to_owned()),
            ],
        )
        .map_err(|e| ApiError::GeoLookup(format!("bad geocoder url: {e}")))?;

        let raw: ReverseResponse = self
            .get_json(self.client.get(url.clone()), &url)
            .await
            .map_err(|e| ApiError::GeoLookup(e.to_string()))?;
        raw.country().map_err(ApiError::GeoLookup)
    }

    fn football_endpoint(&self, path: &str, params: &[(&str, String)]) -> ApiResult<Url> {
        Url::parse_with_params(&format!("{}/{path}", self.football_url), params)
            .map_err(|e| ApiError::Other(format!("bad provider url: {e}")))
    }

    /// GET an api-football endpoint and decode the `response` array.
    async fn get_response<T: serde::de::DeserializeOwned>(&self, url: Url) -> ApiResult<Vec<T>> {
        let request = self.client.get(url.clone()).header(API_KEY_HEADER, &self.api_key);
        let body: Value = self.get_json(request, &url).await?;
        api_football::response_items(body).map_err(|e| ApiError::Malformed {
            url: url.to_string(),
            reason: e.to_string(),
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        request: RequestBuilder,
        url: &Url,
    ) -> ApiResult<T> {
        debug!("GET {}", url.path());
        let response = request
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.to_string()))?;

        response
            .error_for_status()
            .map_err(|e| ApiError::Api(e, url.to_string()))?
            .json::<T>()
            .await
            .map_err(|e| ApiError::Parsing(e, url.to_string()))
    }
}

fn fixture_params(team_id: u32, query: FixtureQuery) -> Vec<(&'static str, String)> {
    let mut params = vec![("team", team_id.to_string())];
    if let Some(season) = query.season {
        params.push(("season", season.to_string()));
    }
    match query.window {
        FixtureWindow::Next(n) => params.push(("next", n.to_string())),
        FixtureWindow::Last(n) => params.push(("last", n.to_string())),
        FixtureWindow::All => {}
    }
    params
}

impl SportsData for FootballApi {
    async fn list_teams(&self, country: &str) -> ApiResult<Vec<Team>> {
        self.fetch_teams(country).await
    }

    async fn list_teams_by_ids(&self, ids: &BTreeSet<u32>) -> ApiResult<Vec<Team>> {
        self.fetch_teams_by_ids(ids).await
    }

    async fn list_fixtures(&self, team_id: u32, query: FixtureQuery) -> ApiResult<Vec<Fixture>> {
        self.fetch_fixtures(team_id, query).await
    }

    async fn reverse_geocode(&self, lat: f64, lon: f64) -> ApiResult<String> {
        self.fetch_country(lat, lon).await
    }
}
