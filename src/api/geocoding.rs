use std::time::Duration;

use serde::Deserialize;

use crate::{core::error::DataFetchError, prelude::*};

const BASE_URL: &str = "https://api.opencagedata.com/geocode/v1/json";

/// Client for the OpenCage forward-geocoding API.
pub struct Client {
    inner: reqwest::Client,
    api_key: String,
}

impl Client {
    pub fn new(api_key: String) -> Result<Self, DataFetchError> {
        let inner = reqwest::Client::builder().timeout(Duration::from_secs(10)).build()?;
        Ok(Self { inner, api_key })
    }

    /// Resolve a French city name to coordinates, rounded to 4 decimal places.
    #[instrument(skip_all, fields(city = city))]
    pub async fn get_coordinates(&self, city: &str) -> Result<(f64, f64), DataFetchError> {
        let response: Response = self
            .inner
            .get(BASE_URL)
            .query(&[("q", format!("{city}, France")), ("key", self.api_key.clone())])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        let hit = response
            .results
            .first()
            .ok_or_else(|| DataFetchError::new(format!("no geocoding match for `{city}`")))?;
        let (lat, lon) = (round4(hit.geometry.lat), round4(hit.geometry.lng));
        info!(lat = lat, lon = lon, "resolved");
        Ok((lat, lon))
    }
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

#[derive(Deserialize)]
struct Response {
    results: Vec<GeocodingResult>,
}

#[derive(Deserialize)]
struct GeocodingResult {
    geometry: Geometry,
}

#[derive(Deserialize)]
struct Geometry {
    lat: f64,
    lng: f64,
}
