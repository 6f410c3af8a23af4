//! What the user is looking at, and the requests needed to change it.
//!
//! [`Session`] is a plain reducer: it never performs I/O. Each method updates
//! [`ViewState`] and returns the [`Command`]s the caller has to carry out.
//! Results of those commands come back in through [`Session::apply`].
//!
//! Requests are tagged with a generation number. In-flight requests are never
//! cancelled, but only the result of the most recently issued one is applied;
//! anything older is dropped on arrival.

use std::time::Duration;

use tracing::debug;

use crate::model::{ForecastSnapshot, Place};

pub const DEFAULT_DEBOUNCE_MS: u64 = 500;
pub const DEFAULT_LOADING_DELAY_MS: u64 = 1000;

/// Tunables for a session, usually derived from [`crate::Config`].
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSettings {
    pub default_city: String,
    pub forecast_days: u8,
    pub min_query_chars: usize,
    pub debounce: Duration,
    pub loading_delay: Duration,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            default_city: "Da Nang".to_string(),
            forecast_days: 7,
            min_query_chars: 2,
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            loading_delay: Duration::from_millis(DEFAULT_LOADING_DELAY_MS),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub loading: bool,
    /// Search results; cleared once one of them is picked.
    pub places: Vec<Place>,
    pub selected: Option<Place>,
    pub snapshot: Option<ForecastSnapshot>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    SearchPlaces { generation: u64, query: String },
    FetchForecast { generation: u64, city: String, days: u8, remember: bool },
    /// Clear the loading flag after a fixed delay, whatever the fetch does.
    ClearLoadingAfter(Duration),
    PersistSelection(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    PlacesLoaded { generation: u64, places: Option<Vec<Place>> },
    ForecastLoaded {
        generation: u64,
        city: String,
        remember: bool,
        snapshot: Option<ForecastSnapshot>,
    },
    LoadingElapsed,
}

/// True when `text`, trimmed, is long enough to be worth a lookup.
pub fn is_searchable(text: &str, min_chars: usize) -> bool {
    text.trim().chars().count() > min_chars
}

#[derive(Debug)]
pub struct Session {
    settings: SessionSettings,
    view: ViewState,
    search_generation: u64,
    forecast_generation: u64,
}

impl Session {
    pub fn new(settings: SessionSettings) -> Self {
        Self { settings, view: ViewState::default(), search_generation: 0, forecast_generation: 0 }
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    /// Initial load: the remembered city, or the configured default.
    pub fn start(&mut self, last_selection: Option<String>) -> Vec<Command> {
        let city = last_selection
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| self.settings.default_city.clone());

        self.view.loading = true;
        vec![self.forecast_command(city, false), self.loading_timer()]
    }

    /// The search text has stopped changing.
    pub fn query_settled(&mut self, text: &str) -> Vec<Command> {
        if !is_searchable(text, self.settings.min_query_chars) {
            debug!(text, "query too short; not searching");
            return Vec::new();
        }

        self.search_generation += 1;
        vec![Command::SearchPlaces {
            generation: self.search_generation,
            query: text.trim().to_string(),
        }]
    }

    pub fn select(&mut self, place: Place) -> Vec<Command> {
        let city = place.name.clone();

        self.view.loading = true;
        self.view.places.clear();
        self.view.selected = Some(place);

        vec![self.forecast_command(city, true), self.loading_timer()]
    }

    /// Select the `index`-th (0-based) search result, if there is one.
    pub fn select_index(&mut self, index: usize) -> Vec<Command> {
        match self.view.places.get(index).cloned() {
            Some(place) => self.select(place),
            None => {
                debug!(index, available = self.view.places.len(), "no search result at index");
                Vec::new()
            }
        }
    }

    pub fn apply(&mut self, event: Event) -> Vec<Command> {
        match event {
            Event::PlacesLoaded { generation, places } => {
                if generation != self.search_generation {
                    debug!(generation, latest = self.search_generation, "dropping stale search");
                    return Vec::new();
                }
                if let Some(places) = places {
                    self.view.places = places;
                }
                Vec::new()
            }
            Event::ForecastLoaded { generation, city, remember, snapshot } => {
                if generation != self.forecast_generation {
                    debug!(generation, latest = self.forecast_generation, %city, "dropping stale forecast");
                    return Vec::new();
                }
                match snapshot {
                    Some(snapshot) => {
                        self.view.snapshot = Some(snapshot);
                        if remember { vec![Command::PersistSelection(city)] } else { Vec::new() }
                    }
                    None => Vec::new(),
                }
            }
            Event::LoadingElapsed => {
                self.view.loading = false;
                Vec::new()
            }
        }
    }

    fn forecast_command(&mut self, city: String, remember: bool) -> Command {
        self.forecast_generation += 1;
        Command::FetchForecast {
            generation: self.forecast_generation,
            city,
            days: self.settings.forecast_days,
            remember,
        }
    }

    fn loading_timer(&self) -> Command {
        Command::ClearLoadingAfter(self.settings.loading_delay)
    }
}
