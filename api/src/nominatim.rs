/// Wire types for the Nominatim reverse geocoder.
/// Endpoint: https://nominatim.openstreetmap.org/reverse?format=jsonv2&lat={lat}&lon={lon}
use serde::Deserialize;

#[derive(Deserialize, Default, Debug)]
pub struct ReverseResponse {
    #[serde(default)]
    pub address: Option<Address>,
    /// Present instead of `address` when the point cannot be geocoded (open sea, etc).
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Deserialize, Default, Debug)]
pub struct Address {
    pub country: Option<String>,
    pub country_code: Option<String>,
    pub state: Option<String>,
}

impl ReverseResponse {
    /// The country label, if the geocoder produced a usable one.
    pub fn country(self) -> Result<String, String> {
        if let Some(error) = self.error {
            return Err(error);
        }
        self.address
            .and_then(|a| a.country)
            .map(|c| c.trim().to_owned())
            .filter(|c| !c.is_empty())
            .ok_or_else(|| "no country in geocoder response".to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_country_from_address() {
        let raw: ReverseResponse = serde_json::from_str(
            r#"{"place_id":1,"address":{"city":"Glasgow","state":"Scotland","country":"United Kingdom","country_code":"gb"}}"#,
        )
        .unwrap();
        assert_eq!(raw.country().unwrap(), "United Kingdom");
    }

    #[test]
    fn error_payload_and_blank_country_fail() {
        let raw: ReverseResponse = serde_json::from_str(r#"{"error":"Unable to geocode"}"#).unwrap();
        assert_eq!(raw.country().unwrap_err(), "Unable to geocode");

        let raw: ReverseResponse = serde_json::from_str(r#"{"address":{"country":"  "}}"#).unwrap();
        assert!(raw.country().is_err());
    }
}
