//! Prometheus counters for the upstream proxies and the weather cache.

use std::fmt;
use std::sync::Arc;

use prometheus_client::encoding::text::encode;
use prometheus_client::encoding::EncodeLabelSet;
use prometheus_client::metrics::counter::Counter;
use prometheus_client::metrics::family::Family;
use prometheus_client::registry::Registry;

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
struct UpstreamLabels {
    service: String,
    outcome: String,
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
struct CacheLabels {
    result: String,
}

#[derive(Clone)]
pub struct Metrics {
    registry: Arc<Registry>,
    upstream: Family<UpstreamLabels, Counter>,
    weather_cache: Family<CacheLabels, Counter>,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    pub fn new() -> Self {
        let mut registry = Registry::default();
        let upstream = Family::<UpstreamLabels, Counter>::default();
        let weather_cache = Family::<CacheLabels, Counter>::default();

        registry.register(
            "agrihub_upstream_requests",
            "Calls to third-party AI, weather and file hosting services",
            upstream.clone(),
        );
        registry.register(
            "agrihub_weather_cache",
            "Weather lookups answered from cache (hit) or upstream (miss)",
            weather_cache.clone(),
        );

        Self { registry: Arc::new(registry), upstream, weather_cache }
    }

    pub fn record_upstream(&self, service: &str, ok: bool) {
        self.upstream
            .get_or_create(&UpstreamLabels {
                service: service.to_string(),
                outcome: if ok { "ok" } else { "error" }.to_string(),
            })
            .inc();
    }

    pub fn record_weather_cache(&self, hit: bool) {
        self.weather_cache
            .get_or_create(&CacheLabels { result: if hit { "hit" } else { "miss" }.to_string() })
            .inc();
    }

    pub fn render(&self) -> Result<String, fmt::Error> {
        let mut buffer = String::new();
        encode(&mut buffer, &self.registry)?;
        Ok(buffer)
    }
}
