//! State shared across all request handlers.

use std::sync::Arc;

use ah_core::clock::Clock;
use ah_core::traits::{ChatProvider, FarmRepo, MediaHost, VisionProvider, WeatherProvider};
use ah_services::{ChatService, DiagnosisService, WeatherService};
use chrono::Duration;

use crate::metrics::Metrics;

/// The plugin implementations the binary picked, before they are wrapped
/// into services.
pub struct Ports {
    pub repo: Arc<dyn FarmRepo>,
    pub chat: Arc<dyn ChatProvider>,
    pub vision: Arc<dyn VisionProvider>,
    pub weather: Arc<dyn WeatherProvider>,
    pub media: Arc<dyn MediaHost>,
    pub clock: Arc<dyn Clock>,
}

pub struct AppState {
    pub repo: Arc<dyn FarmRepo>,
    pub chat: ChatService,
    pub diagnosis: DiagnosisService,
    pub weather: WeatherService,
    pub media: Arc<dyn MediaHost>,
    pub metrics: Metrics,
    /// Request body cap, mostly relevant for `/api/upload`
    pub body_limit: usize,
}

pub type SharedState = Arc<AppState>;

pub const DEFAULT_BODY_LIMIT: usize = 20 * 1024 * 1024;

impl AppState {
    pub fn new(ports: Ports) -> Self {
        Self {
            chat: ChatService::new(ports.repo.clone(), ports.chat),
            diagnosis: DiagnosisService::new(ports.repo.clone(), ports.vision),
            weather: WeatherService::new(ports.repo.clone(), ports.weather, ports.clock),
            repo: ports.repo,
            media: ports.media,
            metrics: Metrics::new(),
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }

    pub fn with_weather_ttl(mut self, ttl: Duration) -> Self {
        self.weather = self.weather.with_ttl(ttl);
        self
    }

    pub fn with_body_limit(mut self, bytes: usize) -> Self {
        self.body_limit = bytes;
        self
    }
}
