use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;

use crate::{
    error::LookupError,
    model::{CurrentConditions, DailyEntry, ForecastSnapshot, Place},
};

use super::WeatherProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.weatherapi.com/v1";

const SEARCH_ENDPOINT: &str = "WeatherAPI search";
const FORECAST_ENDPOINT: &str = "WeatherAPI forecast";

/// WeatherAPI.com client for `search.json` and `forecast.json`.
#[derive(Debug, Clone)]
pub struct WeatherApiProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl WeatherApiProvider {
    pub fn new(api_key: String, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { api_key, base_url, http: Client::new() }
    }

    async fn get(
        &self,
        endpoint: &'static str,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<String, LookupError> {
        let url = format!("{}/{path}", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(&[("key", self.api_key.as_str())])
            .query(query)
            .send()
            .await
            .map_err(|source| LookupError::Transport { endpoint, source })?;

        let status = res.status();
        let body = res.text().await.map_err(|source| LookupError::Transport { endpoint, source })?;

        if !status.is_success() {
            return Err(LookupError::Status { endpoint, status, body: truncate_body(&body) });
        }

        Ok(body)
    }
}

#[async_trait]
impl WeatherProvider for WeatherApiProvider {
    async fn search_places(&self, query: &str) -> Result<Vec<Place>, LookupError> {
        let body = self.get(SEARCH_ENDPOINT, "search.json", &[("q", query)]).await?;
        parse_places(&body)
    }

    async fn fetch_forecast(
        &self,
        city: &str,
        days: u8,
    ) -> Result<ForecastSnapshot, LookupError> {
        let days = days.to_string();
        let body = self
            .get(
                FORECAST_ENDPOINT,
                "forecast.json",
                &[("q", city), ("days", days.as_str()), ("aqi", "no"), ("alerts", "no")],
            )
            .await?;
        parse_forecast(&body)
    }
}

#[derive(Debug, Deserialize)]
struct WaSearchHit {
    id: u64,
    name: String,
    region: String,
    country: String,
    lat: f64,
    lon: f64,
    url: String,
}

#[derive(Debug, Deserialize)]
struct WaLocation {
    name: String,
    region: String,
    country: String,
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct WaCondition {
    text: String,
}

#[derive(Debug, Deserialize)]
struct WaCurrent {
    temp_c: f64,
    humidity: u8,
    wind_kph: f64,
    condition: WaCondition,
}

#[derive(Debug, Deserialize)]
struct WaDay {
    avgtemp_c: f64,
    condition: WaCondition,
}

#[derive(Debug, Deserialize)]
struct WaAstro {
    sunrise: String,
}

#[derive(Debug, Deserialize)]
struct WaForecastDay {
    date: NaiveDate,
    day: WaDay,
    astro: WaAstro,
}

#[derive(Debug, Deserialize)]
struct WaForecast {
    forecastday: Vec<WaForecastDay>,
}

#[derive(Debug, Deserialize)]
struct WaForecastResponse {
    location: WaLocation,
    current: WaCurrent,
    forecast: WaForecast,
}

pub(crate) fn parse_places(body: &str) -> Result<Vec<Place>, LookupError> {
    let hits: Vec<WaSearchHit> = serde_json::from_str(body)
        .map_err(|source| LookupError::Decode { endpoint: SEARCH_ENDPOINT, source })?;

    Ok(hits
        .into_iter()
        .map(|hit| Place {
            id: Some(hit.id),
            name: hit.name,
            region: hit.region,
            country: hit.country,
            latitude: hit.lat,
            longitude: hit.lon,
            url: Some(hit.url),
        })
        .collect())
}

pub(crate) fn parse_forecast(body: &str) -> Result<ForecastSnapshot, LookupError> {
    let parsed: WaForecastResponse = serde_json::from_str(body)
        .map_err(|source| LookupError::Decode { endpoint: FORECAST_ENDPOINT, source })?;

    let place = Place {
        id: None,
        name: parsed.location.name,
        region: parsed.location.region,
        country: parsed.location.country,
        latitude: parsed.location.lat,
        longitude: parsed.location.lon,
        url: None,
    };

    let current = CurrentConditions {
        temperature_c: parsed.current.temp_c,
        humidity_pct: parsed.current.humidity,
        wind_kph: parsed.current.wind_kph,
        condition: parsed.current.condition.text,
    };

    let days = parsed
        .forecast
        .forecastday
        .into_iter()
        .map(|fd| DailyEntry {
            date: fd.date,
            avg_temperature_c: fd.day.avgtemp_c,
            condition: fd.day.condition.text,
            sunrise: fd.astro.sunrise,
        })
        .collect();

    Ok(ForecastSnapshot { place, current, days })
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}
