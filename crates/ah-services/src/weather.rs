//! # Weather
//!
//! Cache-or-fetch over the forecast provider. A fresh cache entry is
//! returned as-is; a stale or missing one triggers exactly one upstream call
//! whose result replaces the entry. A stale entry is never served when the
//! upstream call fails.

use std::sync::Arc;

use ah_core::clock::Clock;
use ah_core::error::Result;
use ah_core::models::NewWeatherCache;
use ah_core::traits::{FarmRepo, WeatherProvider};
use ah_core::weather::{cache_key, check_coordinate, default_ttl};
use chrono::Duration;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForecastSource {
    Cache,
    Upstream,
}

#[derive(Debug, Clone)]
pub struct Forecast {
    pub data: serde_json::Value,
    pub source: ForecastSource,
}

#[derive(Clone)]
pub struct WeatherService {
    repo: Arc<dyn FarmRepo>,
    provider: Arc<dyn WeatherProvider>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
}

impl WeatherService {
    pub fn new(repo: Arc<dyn FarmRepo>, provider: Arc<dyn WeatherProvider>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, provider, clock, ttl: default_ttl() }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub async fn forecast(&self, latitude: &str, longitude: &str) -> Result<Forecast> {
        check_coordinate("latitude", latitude)?;
        check_coordinate("longitude", longitude)?;

        let key = cache_key(latitude, longitude);
        if let Some(cached) = self.repo.get_weather_cache(&key).await? {
            if cached.is_fresh(self.clock.now(), self.ttl) {
                debug!(%key, "weather cache hit");
                return Ok(Forecast { data: cached.data, source: ForecastSource::Cache });
            }
            debug!(%key, last_updated = %cached.last_updated, "weather cache stale");
        }

        let data = self.provider.forecast(latitude, longitude).await?;
        let stored = self
            .repo
            .set_weather_cache(NewWeatherCache { id: key.clone(), location: key, data })
            .await?;

        Ok(Forecast { data: stored.data, source: ForecastSource::Upstream })
    }
}
