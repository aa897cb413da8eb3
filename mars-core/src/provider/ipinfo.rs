use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::model::Coordinates;

use super::{LocationError, LocationProvider, truncate_body};

pub const IPINFO_URL: &str = "https://ipinfo.io/json";

/// Approximate location of the caller's public IP via ipinfo.io.
#[derive(Debug, Clone)]
pub struct IpInfoLocator {
    http: Client,
    url: String,
}

#[derive(Debug, Deserialize)]
struct IpInfoResponse {
    loc: Option<String>,
}

impl IpInfoLocator {
    pub fn new(http: Client) -> Self {
        Self::with_url(http, IPINFO_URL)
    }

    pub fn with_url(http: Client, url: impl Into<String>) -> Self {
        Self { http, url: url.into() }
    }
}

#[async_trait]
impl LocationProvider for IpInfoLocator {
    async fn locate(&self) -> Result<Coordinates, LocationError> {
        tracing::debug!(url = %self.url, "requesting IP geolocation");

        let res = self.http.get(&self.url).send().await?;
        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(LocationError::Status {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        let coords = parse_location_body(&body)?;
        tracing::info!(
            latitude = coords.latitude,
            longitude = coords.longitude,
            "resolved location"
        );
        Ok(coords)
    }
}

/// Extract coordinates from an ipinfo JSON body.
pub fn parse_location_body(body: &str) -> Result<Coordinates, LocationError> {
    let parsed: IpInfoResponse = serde_json::from_str(body)?;
    let loc = parsed.loc.ok_or(LocationError::MissingField)?;
    parse_loc(&loc).ok_or(LocationError::Malformed(loc))
}

/// Parse a `"lat,lon"` pair. Exactly two finite decimal components are required.
pub fn parse_loc(loc: &str) -> Option<Coordinates> {
    let mut parts = loc.split(',');
    let latitude = parse_component(parts.next()?)?;
    let longitude = parse_component(parts.next()?)?;
    if parts.next().is_some() {
        return None;
    }
    Some(Coordinates::new(latitude, longitude))
}

fn parse_component(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_loc_accepts_valid_pairs() {
        assert_eq!(parse_loc("47.6062,-122.3321"), Some(Coordinates::new(47.6062, -122.3321)));
        assert_eq!(parse_loc("0,0"), Some(Coordinates::new(0.0, 0.0)));
        assert_eq!(parse_loc(" 51.5 , -0.12 "), Some(Coordinates::new(51.5, -0.12)));
    }

    #[test]
    fn parse_loc_rejects_wrong_component_count() {
        assert_eq!(parse_loc(""), None);
        assert_eq!(parse_loc("47.6"), None);
        assert_eq!(parse_loc("47.6,-122.3,10"), None);
        assert_eq!(parse_loc("47.6;-122.3"), None);
    }

    #[test]
    fn parse_loc_rejects_non_numeric_or_non_finite() {
        assert_eq!(parse_loc("abc,-122.3"), None);
        assert_eq!(parse_loc("47.6,"), None);
        assert_eq!(parse_loc("NaN,1"), None);
        assert_eq!(parse_loc("1,inf"), None);
    }

    #[test]
    fn parse_location_body_reads_loc_field() {
        let body = r#"{"ip":"1.2.3.4","city":"Seattle","loc":"47.6062,-122.3321"}"#;
        let coords = parse_location_body(body).expect("coords");
        assert_eq!(coords, Coordinates::new(47.6062, -122.3321));
    }

    #[test]
    fn parse_location_body_missing_field() {
        let err = parse_location_body(r#"{"ip":"1.2.3.4"}"#).unwrap_err();
        assert!(matches!(err, LocationError::MissingField));
    }

    #[test]
    fn parse_location_body_malformed_loc() {
        let err = parse_location_body(r#"{"loc":"somewhere"}"#).unwrap_err();
        assert!(matches!(err, LocationError::Malformed(ref s) if s == "somewhere"));
    }

    #[test]
    fn parse_location_body_rejects_non_string_loc() {
        let err = parse_location_body(r#"{"loc":[47.6,-122.3]}"#).unwrap_err();
        assert!(matches!(err, LocationError::Json(_)));
    }

    #[test]
    fn parse_location_body_rejects_garbage() {
        assert!(parse_location_body("<html>").is_err());
    }
}
