//! The call boundary between the app and the weather provider.
//!
//! Every failure is logged here and collapses to `None`; callers never see
//! an error and cannot tell "nothing found" from "request failed" beyond the
//! `Some(vec![])` / `None` split.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::{
    model::{ForecastSnapshot, Place},
    provider::WeatherProvider,
};

#[derive(Debug, Clone)]
pub struct LookupClient {
    provider: Arc<dyn WeatherProvider>,
}

impl LookupClient {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self { provider }
    }

    pub async fn search_places(&self, query: &str) -> Option<Vec<Place>> {
        debug!(query, "searching places");

        match self.provider.search_places(query).await {
            Ok(places) => {
                debug!(query, count = places.len(), "place search finished");
                Some(places)
            }
            Err(err) => {
                warn!(query, error = %err, "place search failed");
                None
            }
        }
    }

    pub async fn fetch_forecast(&self, city: &str, days: u8) -> Option<ForecastSnapshot> {
        debug!(city, days, "fetching forecast");

        match self.provider.fetch_forecast(city, days).await {
            Ok(snapshot) => Some(snapshot),
            Err(err) => {
                warn!(city, days, error = %err, "forecast fetch failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{StubProvider, place};

    #[tokio::test]
    async fn passes_results_through() {
        let stub = Arc::new(StubProvider::new(vec![place("Paris", "France")]));
        let client = LookupClient::new(stub.clone());

        let places = client.search_places("Par").await.expect("search should succeed");
        assert_eq!(places, vec![place("Paris", "France")]);

        let snap = client.fetch_forecast("Paris", 4).await.expect("forecast should succeed");
        assert_eq!(snap.place.name, "Paris");
        assert_eq!(snap.days.len(), 4);

        assert_eq!(stub.searches(), vec!["Par".to_string()]);
        assert_eq!(stub.forecasts(), vec![("Paris".to_string(), 4)]);
    }

    #[tokio::test]
    async fn failures_collapse_to_none() {
        let client = LookupClient::new(Arc::new(StubProvider::failing()));

        assert_eq!(client.search_places("Paris").await, None);
        assert_eq!(client.fetch_forecast("Paris", 7).await, None);
    }
}
