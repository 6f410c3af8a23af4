use crate::{
    error::LookupError,
    model::{ForecastSnapshot, Place},
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod weatherapi;

pub use weatherapi::WeatherApiProvider;

/// Read-only access to a remote weather service.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Places whose name matches `query`.
    async fn search_places(&self, query: &str) -> Result<Vec<Place>, LookupError>;

    /// Current conditions plus `days` daily entries (today included) for `city`.
    async fn fetch_forecast(&self, city: &str, days: u8)
    -> Result<ForecastSnapshot, LookupError>;
}
