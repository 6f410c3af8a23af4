use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{Days, NaiveDate};

use crate::{
    error::LookupError,
    model::{CurrentConditions, DailyEntry, ForecastSnapshot, Place},
    provider::WeatherProvider,
};

pub(crate) fn place(name: &str, country: &str) -> Place {
    Place {
        id: Some(name.len() as u64),
        name: name.to_string(),
        region: String::new(),
        country: country.to_string(),
        latitude: 0.0,
        longitude: 0.0,
        url: Some(format!("{}-{}", name, country).to_lowercase()),
    }
}

pub(crate) fn snapshot(name: &str, country: &str, days: u8) -> ForecastSnapshot {
    let start = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
    let conditions = ["Sunny", "Partly cloudy", "Moderate rain", "Overcast"];

    ForecastSnapshot {
        place: Place { id: None, url: None, ..place(name, country) },
        current: CurrentConditions {
            temperature_c: 24.5,
            humidity_pct: 60,
            wind_kph: 11.2,
            condition: "Sunny".to_string(),
        },
        days: (0..days)
            .map(|i| DailyEntry {
                date: start + Days::new(u64::from(i)),
                avg_temperature_c: 20.0 + f64::from(i),
                condition: conditions[usize::from(i) % conditions.len()].to_string(),
                sunrise: format!("05:{:02} AM", 10 + i),
            })
            .collect(),
    }
}

/// Canned provider that records every call it receives.
#[derive(Debug, Default)]
pub(crate) struct StubProvider {
    places: Vec<Place>,
    failing: bool,
    searches: Mutex<Vec<String>>,
    forecasts: Mutex<Vec<(String, u8)>>,
}

impl StubProvider {
    pub(crate) fn new(places: Vec<Place>) -> Self {
        Self { places, ..Self::default() }
    }

    pub(crate) fn failing() -> Self {
        Self { failing: true, ..Self::default() }
    }

    pub(crate) fn searches(&self) -> Vec<String> {
        self.searches.lock().unwrap().clone()
    }

    pub(crate) fn forecasts(&self) -> Vec<(String, u8)> {
        self.forecasts.lock().unwrap().clone()
    }

    fn outage(endpoint: &'static str) -> LookupError {
        LookupError::Status {
            endpoint,
            status: reqwest::StatusCode::BAD_GATEWAY,
            body: "upstream unavailable".to_string(),
        }
    }
}

#[async_trait]
impl WeatherProvider for StubProvider {
    async fn search_places(&self, query: &str) -> Result<Vec<Place>, LookupError> {
        self.searches.lock().unwrap().push(query.to_string());
        if self.failing {
            return Err(Self::outage("stub search"));
        }

        let needle = query.to_lowercase();
        Ok(self.places.iter().filter(|p| p.name.to_lowercase().contains(&needle)).cloned().collect())
    }

    async fn fetch_forecast(
        &self,
        city: &str,
        days: u8,
    ) -> Result<ForecastSnapshot, LookupError> {
        self.forecasts.lock().unwrap().push((city.to_string(), days));
        if self.failing {
            return Err(Self::outage("stub forecast"));
        }

        let country = self
            .places
            .iter()
            .find(|p| p.name == city)
            .map_or("Testland", |p| p.country.as_str());
        Ok(snapshot(city, country, days))
    }
}
