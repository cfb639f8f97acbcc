use crate::client::ApiResult;
use crate::config::CountryConfig;
use crate::source::SportsData;
use log::debug;

/// Resolve a coordinate to a country label the club listing understands.
///
/// Errors are always [`crate::client::ErrorKind::GeoLookupFailed`]: the
/// geocoding call is the only I/O here.
pub async fn resolve_country<S: SportsData>(
    source: &S,
    config: &CountryConfig,
    lat: f64,
    lon: f64,
) -> ApiResult<String> {
    let raw = source.reverse_geocode(lat, lon).await?;
    let country = normalize_country(&raw, config);
    debug!("geocoded ({lat:.3}, {lon:.3}) to {raw:?}, searching clubs in {country:?}");
    Ok(country)
}

/// Clubs are indexed by home nation, not by the union, so the umbrella label
/// is swapped for the configured nation. Everything else passes through.
pub fn normalize_country(label: &str, config: &CountryConfig) -> String {
    if label.trim().eq_ignore_ascii_case(config.umbrella_label.trim()) {
        config.default_nation.clone()
    } else {
        label.to_owned()
    }
}
