//! Place-name resolution via Nominatim.

use anyhow::{bail, Result};
use geo::geometry::Coord;
use serde::Deserialize;
use std::{
    thread,
    time::{Duration, Instant},
};

const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org/search";
const USER_AGENT: &str = "MarineRadarLocationGenerator/1.0";

/// Nominatim's usage policy allows at most one request per second.
const MIN_REQUEST_INTERVAL: Duration = Duration::from_secs(1);

/// A resolved place.
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    pub point: Coord,
    pub display_name: String,
}

/// Spaces successive requests at least `min_interval` apart by
/// sleeping. Owned by the caller rather than hidden in a global, so
/// throttling is visible at the call site.
#[derive(Debug)]
pub struct RateLimiter {
    min_interval: Duration,
    last_request: Option<Instant>,
}

impl RateLimiter {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_request: None,
        }
    }

    pub fn wait(&mut self) {
        if let Some(last) = self.last_request {
            let elapsed = last.elapsed();
            if elapsed < self.min_interval {
                thread::sleep(self.min_interval - elapsed);
            }
        }
        self.last_request = Some(Instant::now());
    }
}

pub struct Geocoder {
    client: reqwest::blocking::Client,
    limiter: RateLimiter,
}

/// Nominatim returns lat/lon as JSON strings.
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
    #[serde(default)]
    display_name: String,
}

impl Geocoder {
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            client,
            limiter: RateLimiter::new(MIN_REQUEST_INTERVAL),
        })
    }

    /// Resolves a place name to coordinates using the first
    /// Nominatim match.
    pub fn geocode(&mut self, location: &str) -> Result<Place> {
        self.limiter.wait();
        let results: Vec<NominatimPlace> = self
            .client
            .get(NOMINATIM_URL)
            .query(&[("q", location), ("format", "json"), ("limit", "1")])
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .send()?
            .error_for_status()?
            .json()?;
        let Some(place) = results.into_iter().next() else {
            bail!("location not found: {location}");
        };
        let point = Coord {
            y: place.lat.parse()?,
            x: place.lon.parse()?,
        };
        let display_name = if place.display_name.is_empty() {
            location.to_string()
        } else {
            place.display_name
        };
        Ok(Place {
            point,
            display_name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{NominatimPlace, RateLimiter};
    use std::time::{Duration, Instant};

    #[test]
    fn test_rate_limiter_spaces_requests() {
        let mut limiter = RateLimiter::new(Duration::from_millis(20));
        let started = Instant::now();
        limiter.wait();
        limiter.wait();
        limiter.wait();
        assert!(started.elapsed() >= Duration::from_millis(40));
    }

    #[test]
    fn test_first_request_not_delayed() {
        let mut limiter = RateLimiter::new(Duration::from_secs(60));
        let started = Instant::now();
        limiter.wait();
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn test_parses_string_coordinates() {
        let raw = r#"[{"lat": "34.0486", "lon": "-81.2312",
                       "display_name": "Lake Murray, South Carolina"}]"#;
        let results: Vec<NominatimPlace> = serde_json::from_str(raw).unwrap();
        assert_eq!(results[0].lat.parse::<f64>().unwrap(), 34.0486);
        assert_eq!(results[0].lon.parse::<f64>().unwrap(), -81.2312);
    }
}
