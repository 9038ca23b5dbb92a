//! # ah-services
//!
//! Orchestration that sits between the HTTP handlers and the ports:
//! the background chat reply, inline image diagnosis and the weather cache.

pub mod assistant;
pub mod weather;

pub use assistant::{ChatService, DiagnosisService};
pub use weather::{Forecast, ForecastSource, WeatherService};
