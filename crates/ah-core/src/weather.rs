//! # Weather cache policy
//!
//! Forecasts are cached per coordinate pair and trusted for one hour.
//! The key is built from the coordinates exactly as the caller wrote them,
//! so "6.5,3.4" and "6.50,3.40" are different entries.

use chrono::{DateTime, Duration, Utc};

use crate::error::{AppError, Result};
use crate::models::WeatherCache;

pub const WEATHER_TTL_SECS: i64 = 60 * 60;

pub fn default_ttl() -> Duration {
    Duration::seconds(WEATHER_TTL_SECS)
}

pub fn cache_key(latitude: &str, longitude: &str) -> String {
    format!("{latitude},{longitude}")
}

/// Rejects path segments that are not finite numbers. The raw string is
/// still what goes into the cache key.
pub fn check_coordinate(name: &str, raw: &str) -> Result<()> {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(()),
        _ => Err(AppError::validation(format!("{name} must be a number, got {raw:?}"))),
    }
}

impl WeatherCache {
    pub fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now - self.last_updated < ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(at: DateTime<Utc>) -> WeatherCache {
        WeatherCache {
            id: cache_key("6.52", "3.37"),
            location: cache_key("6.52", "3.37"),
            data: json!({ "current": { "temperature_2m": 29.1 } }),
            last_updated: at,
        }
    }

    #[test]
    fn fresh_until_one_hour() {
        let t0 = Utc::now();
        let cached = entry(t0);
        assert!(cached.is_fresh(t0, default_ttl()));
        assert!(cached.is_fresh(t0 + Duration::minutes(59), default_ttl()));
        assert!(!cached.is_fresh(t0 + Duration::hours(1), default_ttl()));
        assert!(!cached.is_fresh(t0 + Duration::hours(3), default_ttl()));
    }

    #[test]
    fn key_keeps_raw_precision() {
        assert_eq!(cache_key("6.5", "3.4"), "6.5,3.4");
        assert_ne!(cache_key("6.5", "3.4"), cache_key("6.50", "3.40"));
    }

    #[test]
    fn coordinates_must_be_numeric() {
        assert!(check_coordinate("latitude", "-1.2921").is_ok());
        assert!(check_coordinate("latitude", "north").is_err());
        assert!(check_coordinate("longitude", "NaN").is_err());
    }
}
