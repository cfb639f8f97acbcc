use crate::state::app_settings::AppSettings;
use anyhow::Context;
use stands_api::clubs::list_nearby_clubs;
use stands_api::resolve::FixtureResolver;

/// What the command line asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Tui,
    Help,
    Version,
    /// Print the nearby club listing as JSON.
    Clubs,
    /// Print the resolved fixture set for one team as JSON.
    Resolve { team_id: u32 },
}

pub fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Command, String> {
    let Some(arg) = args.next() else {
        return Ok(Command::Tui);
    };

    let command = match arg.as_str() {
        "-h" | "--help" => Command::Help,
        "-V" | "--version" => Command::Version,
        "--clubs" => Command::Clubs,
        "--resolve" => {
            let raw = args.next().ok_or("--resolve needs a team id")?;
            let team_id = raw.parse().map_err(|_| format!("not a team id: {raw}"))?;
            Command::Resolve { team_id }
        }
        _ => return Err(format!("Unknown argument: {arg}")),
    };

    match args.next() {
        Some(extra) => Err(format!("Unexpected argument: {extra}")),
        None => Ok(command),
    }
}

pub fn usage_text() -> &'static str {
    "stands - football clubs near you, their fixtures and your favourites

Usage:
  stands
  stands --clubs
  stands --resolve <TEAM_ID>
  stands --help
  stands --version

Environment:
  STANDS_API_KEY         api-football key (required for club and fixture data)
  STANDS_LAT, STANDS_LON Location to search from (default Glasgow)
  STANDS_NOW             RFC 3339 instant fixtures are classified against
  STANDS_SEASONS         Candidate seasons, most recent first (default 2025,2024,2023)
  STANDS_OVERRIDES       team:season pairs that use a single season
  STANDS_DEFAULT_NATION  Country searched when the location is in the United Kingdom
  STANDS_FAVOURITES      Favourites file (default ~/.config/stands/favourites.json)
  STANDS_LOG             Log level for the log pane (error, warn, info, debug, trace)"
}

pub async fn print_clubs(settings: &AppSettings) -> anyhow::Result<()> {
    let api = settings.api();
    let listing = list_nearby_clubs(&api, &settings.resolver, settings.latitude, settings.longitude)
        .await
        .context("Could not load clubs")?;
    println!("{}", serde_json::to_string_pretty(&listing)?);
    Ok(())
}

pub async fn print_fixtures(settings: &AppSettings, team_id: u32) -> anyhow::Result<()> {
    let resolver = FixtureResolver::new(settings.api(), settings.resolver.clone());
    let resolved = resolver.resolve(team_id, settings.now()).await;
    println!("{}", serde_json::to_string_pretty(&resolved)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Command, String> {
        parse_args(args.iter().map(|a| a.to_string()))
    }

    #[test]
    fn no_arguments_starts_the_tui() {
        assert_eq!(parse(&[]), Ok(Command::Tui));
    }

    #[test]
    fn headless_modes() {
        assert_eq!(parse(&["--clubs"]), Ok(Command::Clubs));
        assert_eq!(parse(&["--resolve", "247"]), Ok(Command::Resolve { team_id: 247 }));
        assert_eq!(parse(&["-V"]), Ok(Command::Version));
    }

    #[test]
    fn bad_arguments_are_rejected() {
        assert!(parse(&["--resolve"]).is_err());
        assert!(parse(&["--resolve", "celtic"]).is_err());
        assert!(parse(&["--clubs", "extra"]).is_err());
        assert!(parse(&["--teams"]).is_err());
    }
}
