use std::{fmt, sync::Arc};

use anyhow::{Context, bail};
use citycast_core::{
    App, Config, FileSelectionStore, LookupClient, Place, SelectionStore, ViewState,
    WeatherApiProvider, is_searchable, render::render,
};
use clap::{Parser, Subcommand};
use inquire::{InquireError, Password, Select, Text};
use tokio::{io::BufReader, sync::mpsc};

use crate::input::forward_lines;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "citycast", version, about = "Current weather and the days ahead for any city")]
pub struct Cli {
    /// WeatherAPI.com key; takes priority over the configured one.
    #[arg(long, global = true, env = "WEATHERAPI_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Log debug output to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the API key and default city.
    Configure,

    /// Show the forecast for a city.
    Show {
        /// City name; defaults to the last selected city.
        city: Option<String>,

        /// Days to request, today included.
        #[arg(long)]
        days: Option<u8>,
    },

    /// Search for a place, pick one and show its forecast.
    Search {
        /// Part of the place name (more than two characters).
        query: String,
    },

    /// Search as you type. `/N` picks a result, `/q` quits.
    Interactive,
}

/// Search result as shown in the picker.
struct PlaceChoice(Place);

impl fmt::Display for PlaceChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let place = &self.0;
        if place.region.is_empty() {
            write!(f, "{}, {}", place.name, place.country)
        } else {
            write!(f, "{}, {} ({})", place.name, place.country, place.region)
        }
    }
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = Config::load()?;

        match self.command {
            Command::Configure => configure(config).await,
            Command::Show { city, days } => {
                let client = lookup_client(&config, self.api_key.as_deref())?;
                let store = FileSelectionStore::in_data_dir()?;

                let city = match city {
                    Some(city) => city,
                    None => store.load()?.unwrap_or_else(|| config.default_city.clone()),
                };
                let days = days.unwrap_or(config.forecast_days).max(1);

                match client.fetch_forecast(&city, days).await {
                    Some(snapshot) => print_snapshot(snapshot),
                    None => println!("No forecast available for {city}."),
                }
                Ok(())
            }
            Command::Search { query } => {
                if !is_searchable(&query, config.min_query_chars) {
                    bail!("Search text must be longer than {} characters.", config.min_query_chars);
                }

                let client = lookup_client(&config, self.api_key.as_deref())?;
                let store = FileSelectionStore::in_data_dir()?;

                let places = client.search_places(query.trim()).await.unwrap_or_default();
                if places.is_empty() {
                    println!("No places found for \"{}\".", query.trim());
                    return Ok(());
                }

                let choices: Vec<PlaceChoice> = places.into_iter().map(PlaceChoice).collect();
                let PlaceChoice(place) =
                    blocking_prompt(move || Select::new("Pick a place:", choices).prompt())
                        .await
                        .context("No place selected")?;

                match client.fetch_forecast(&place.name, config.forecast_days.max(1)).await {
                    Some(snapshot) => {
                        if let Err(err) = store.save(&place.name) {
                            tracing::warn!(city = %place.name, error = %err, "could not persist selection");
                        }
                        print_snapshot(snapshot);
                    }
                    None => println!("No forecast available for {}.", place.name),
                }
                Ok(())
            }
            Command::Interactive => {
                let client = lookup_client(&config, self.api_key.as_deref())?;
                let store: Arc<dyn SelectionStore> = Arc::new(FileSelectionStore::in_data_dir()?);
                interactive(&config, client, store).await
            }
        }
    }
}

/// Run a terminal prompt on the blocking pool; inquire reads the terminal synchronously.
async fn blocking_prompt<T, F>(prompt: F) -> anyhow::Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, InquireError> + Send + 'static,
{
    let answer = tokio::task::spawn_blocking(prompt).await.context("Prompt task failed")??;
    Ok(answer)
}

async fn configure(mut config: Config) -> anyhow::Result<()> {
    let key = blocking_prompt(|| {
        Password::new("WeatherAPI.com key:")
            .without_confirmation()
            .with_help_message("Create one at https://www.weatherapi.com/my/")
            .prompt()
    })
    .await
    .context("Failed to read API key")?;

    let default_city = config.default_city.clone();
    let city = blocking_prompt(move || {
        Text::new("Default city:").with_default(&default_city).prompt()
    })
    .await
    .context("Failed to read default city")?;

    config.api_key = Some(key.trim().to_string());
    config.default_city = city.trim().to_string();
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

fn lookup_client(config: &Config, api_key: Option<&str>) -> anyhow::Result<LookupClient> {
    let key = config.resolve_api_key(api_key)?;
    let provider = WeatherApiProvider::new(key.to_string(), config.base_url.clone());
    Ok(LookupClient::new(Arc::new(provider)))
}

fn print_snapshot(snapshot: citycast_core::ForecastSnapshot) {
    let view = ViewState { snapshot: Some(snapshot), ..ViewState::default() };
    print!("{}", render(&view));
}

async fn interactive(
    config: &Config,
    client: LookupClient,
    store: Arc<dyn SelectionStore>,
) -> anyhow::Result<()> {
    println!("Type a city name to search. /N picks a result, /q quits.");

    let (actions_tx, actions) = mpsc::unbounded_channel();
    tokio::spawn(forward_lines(BufReader::new(tokio::io::stdin()), actions_tx));

    let app = App::new(config.session_settings(), client, store);
    app.run(actions, |view| {
        println!("----------------------------------------");
        print!("{}", render(view));
    })
    .await;
    Ok(())
}
