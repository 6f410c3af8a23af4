//! Core library for the `citycast` weather lookup app.
//!
//! This crate defines:
//! - Configuration handling
//! - The WeatherAPI.com client behind a provider trait
//! - A debounced search dispatcher and the session state it drives
//! - Last-selection persistence
//! - Plain-text presentation of the current view
//!
//! It is used by `citycast-cli`, but can also be reused by other front-ends.

pub mod app;
pub mod client;
pub mod config;
pub mod debounce;
pub mod error;
pub mod icon;
pub mod model;
pub mod provider;
pub mod render;
pub mod session;
pub mod store;

#[cfg(test)]
mod testing;

pub use app::{App, UserAction};
pub use client::LookupClient;
pub use config::Config;
pub use error::LookupError;
pub use model::{CurrentConditions, DailyEntry, ForecastSnapshot, Place};
pub use provider::{WeatherApiProvider, WeatherProvider};
pub use session::{Session, SessionSettings, ViewState, is_searchable};
pub use store::{FileSelectionStore, MemorySelectionStore, SelectionStore};
