/// api-football (v3) raw wire types: serde shapes for the `response` items.
/// Mapped onto the clean domain types by the functions at the bottom.
use crate::{Fixture, Team, Venue};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

// ---------------------------------------------------------------------------
// Envelope
// ---------------------------------------------------------------------------

/// Why an api-football body could not be used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvelopeError {
    NotAnObject,
    MissingResponse,
    ResponseNotArray,
    ProviderErrors(String),
    Item(String),
}

impl std::fmt::Display for EnvelopeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EnvelopeError::NotAnObject => write!(f, "body is not a JSON object"),
            EnvelopeError::MissingResponse => write!(f, "`response` field missing"),
            EnvelopeError::ResponseNotArray => write!(f, "`response` is not an array"),
            EnvelopeError::ProviderErrors(errors) => write!(f, "provider reported errors: {errors}"),
            EnvelopeError::Item(e) => write!(f, "unexpected item shape: {e}"),
        }
    }
}

/// Pull the `response` array out of an api-football body and decode its items.
///
/// api-football answers quota and credential problems with HTTP 200 and a
/// populated `errors` field, so that is checked before the payload.
pub fn response_items<T: serde::de::DeserializeOwned>(body: Value) -> Result<Vec<T>, EnvelopeError> {
    let Value::Object(mut map) = body else {
        return Err(EnvelopeError::NotAnObject);
    };

    if let Some(errors) = map.get("errors")
        && has_errors(errors)
    {
        return Err(EnvelopeError::ProviderErrors(errors.to_string()));
    }

    match map.remove("response") {
        None | Some(Value::Null) => Err(EnvelopeError::MissingResponse),
        Some(items @ Value::Array(_)) => {
            serde_json::from_value(items).map_err(|e| EnvelopeError::Item(e.to_string()))
        }
        Some(_) => Err(EnvelopeError::ResponseNotArray),
    }
}

fn has_errors(errors: &Value) -> bool {
    match errors {
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
        Value::String(s) => !s.is_empty(),
        _ => false,
    }
}

// ---------------------------------------------------------------------------
// Teams  (/teams)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Clone)]
pub struct TeamItem {
    pub team: TeamInfo,
    #[serde(default)]
    pub venue: Option<VenueInfo>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TeamInfo {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct VenueInfo {
    pub name: Option<String>,
    pub city: Option<String>,
}

// ---------------------------------------------------------------------------
// Fixtures  (/fixtures)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Clone)]
pub struct FixtureItem {
    pub fixture: FixtureInfo,
    pub teams: FixtureTeams,
    #[serde(default)]
    pub goals: Option<Goals>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct FixtureInfo {
    pub id: Option<u64>,
    /// ISO 8601 with offset, e.g. "2024-08-03T11:30:00+00:00".
    pub date: Option<String>,
    pub timestamp: Option<i64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct FixtureTeams {
    pub home: FixtureSide,
    pub away: FixtureSide,
}

#[derive(Debug, Deserialize, Clone)]
pub struct FixtureSide {
    pub id: Option<u32>,
    pub name: String,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct Goals {
    pub home: Option<u8>,
    pub away: Option<u8>,
}

// ---------------------------------------------------------------------------
// Mapping: wire → domain
// ---------------------------------------------------------------------------

pub fn map_team(item: TeamItem) -> Team {
    let venue = item.venue.unwrap_or_default();
    Team {
        id: item.team.id,
        name: item.team.name,
        logo: item.team.logo.unwrap_or_default(),
        venue: Venue {
            name: venue.name.filter(|s| !s.trim().is_empty()),
            city: venue.city.filter(|s| !s.trim().is_empty()),
        },
    }
}

/// `None` when the item carries no usable kickoff. Such a fixture cannot be
/// ordered or classified, so the client rejects the payload.
pub fn map_fixture(item: FixtureItem) -> Option<Fixture> {
    let kickoff = parse_kickoff(&item.fixture)?;
    let score = item.goals.and_then(|g| Some((g.home?, g.away?)));
    Some(Fixture {
        id: item.fixture.id,
        home: item.teams.home.name,
        away: item.teams.away.name,
        kickoff,
        score,
    })
}

fn parse_kickoff(info: &FixtureInfo) -> Option<DateTime<Utc>> {
    info.date
        .as_deref()
        .and_then(|d| DateTime::parse_from_rfc3339(d).ok())
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|| info.timestamp.and_then(|ts| DateTime::from_timestamp(ts, 0)))
}
