//! # ah-weather-openmeteo
//!
//! Open-Meteo implementation of `WeatherProvider`. The forecast JSON is
//! handed back untouched; the dashboard reads the fields it needs.

use ah_core::error::{AppError, Result};
use ah_core::traits::WeatherProvider;
use async_trait::async_trait;
use tracing::debug;

const CURRENT_FIELDS: &str =
    "temperature_2m,relative_humidity_2m,precipitation,weather_code,wind_speed_10m";
const DAILY_FIELDS: &str =
    "temperature_2m_max,temperature_2m_min,precipitation_sum,weather_code";

pub struct OpenMeteoClient {
    http: reqwest::Client,
    base_url: String,
}

impl OpenMeteoClient {
    pub fn new(http: reqwest::Client, base_url: &str) -> Self {
        Self { http, base_url: base_url.trim_end_matches('/').to_string() }
    }
}

fn forecast_query<'a>(latitude: &'a str, longitude: &'a str) -> [(&'static str, &'a str); 5] {
    [
        ("latitude", latitude),
        ("longitude", longitude),
        ("current", CURRENT_FIELDS),
        ("daily", DAILY_FIELDS),
        ("timezone", "auto"),
    ]
}

fn upstream(e: reqwest::Error) -> AppError {
    AppError::upstream(format!("open-meteo: {e}"))
}

#[async_trait]
impl WeatherProvider for OpenMeteoClient {
    async fn forecast(&self, latitude: &str, longitude: &str) -> Result<serde_json::Value> {
        debug!(%latitude, %longitude, "fetching forecast");
        self.http
            .get(format!("{}/v1/forecast", self.base_url))
            .query(&forecast_query(latitude, longitude))
            .send()
            .await
            .map_err(upstream)?
            .error_for_status()
            .map_err(upstream)?
            .json()
            .await
            .map_err(upstream)
    }
}
