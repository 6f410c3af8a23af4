//! The event loop tying the session to the network, timers and storage.
//!
//! One task owns the [`Session`]; everything else (lookups, forecast fetches,
//! loading timers, the debouncer) runs in spawned tasks and reports back over
//! a channel. Session state is only ever touched from the loop.

use std::sync::Arc;

use tokio::{sync::mpsc, task::JoinSet};
use tracing::{debug, warn};

use crate::{
    client::LookupClient,
    debounce::Debouncer,
    session::{Command, Event, Session, SessionSettings, ViewState},
    store::SelectionStore,
};

/// Input from whatever front-end drives the app.
#[derive(Debug, Clone, PartialEq)]
pub enum UserAction {
    /// The search text changed to this value.
    Type(String),
    /// Pick the search result at this 0-based index.
    Pick(usize),
    Quit,
}

#[derive(Debug)]
pub struct App {
    session: Session,
    client: LookupClient,
    store: Arc<dyn SelectionStore>,
    /// Selection writes running on the blocking pool.
    writes: JoinSet<()>,
}

impl App {
    pub fn new(
        settings: SessionSettings,
        client: LookupClient,
        store: Arc<dyn SelectionStore>,
    ) -> Self {
        Self { session: Session::new(settings), client, store, writes: JoinSet::new() }
    }

    /// Run until `Quit` arrives or the action channel closes.
    ///
    /// `render` is called with the current view after every state change.
    /// Selection writes still in progress are finished before returning.
    pub async fn run<F>(
        mut self,
        mut actions: mpsc::UnboundedReceiver<UserAction>,
        mut render: F,
    ) where
        F: FnMut(&ViewState),
    {
        let (events_tx, mut events) = mpsc::unbounded_channel::<Event>();
        let (debouncer, mut settled) = Debouncer::<String>::spawn(self.session.settings().debounce);

        let last = self.store.load().unwrap_or_else(|err| {
            warn!(error = %err, "could not read last selection; using default city");
            None
        });
        let commands = self.session.start(last);
        self.execute(commands, &events_tx);
        render(self.session.view());

        loop {
            tokio::select! {
                action = actions.recv() => match action {
                    None | Some(UserAction::Quit) => break,
                    Some(UserAction::Type(text)) => debouncer.push(text),
                    Some(UserAction::Pick(index)) => {
                        let commands = self.session.select_index(index);
                        if !commands.is_empty() {
                            self.execute(commands, &events_tx);
                            render(self.session.view());
                        }
                    }
                },
                Some(query) = settled.recv() => {
                    let commands = self.session.query_settled(&query);
                    self.execute(commands, &events_tx);
                }
                Some(event) = events.recv() => {
                    let commands = self.session.apply(event);
                    self.execute(commands, &events_tx);
                    render(self.session.view());
                }
            }
        }

        while let Some(joined) = self.writes.join_next().await {
            if let Err(err) = joined {
                warn!(error = %err, "selection write did not finish");
            }
        }
        debug!("event loop finished");
    }

    fn execute(&mut self, commands: Vec<Command>, events: &mpsc::UnboundedSender<Event>) {
        for command in commands {
            match command {
                Command::SearchPlaces { generation, query } => {
                    let client = self.client.clone();
                    let events = events.clone();
                    tokio::spawn(async move {
                        let places = client.search_places(&query).await;
                        let _ = events.send(Event::PlacesLoaded { generation, places });
                    });
                }
                Command::FetchForecast { generation, city, days, remember } => {
                    let client = self.client.clone();
                    let events = events.clone();
                    tokio::spawn(async move {
                        let snapshot = client.fetch_forecast(&city, days).await;
                        let _ =
                            events.send(Event::ForecastLoaded { generation, city, remember, snapshot });
                    });
                }
                Command::ClearLoadingAfter(delay) => {
                    let events = events.clone();
                    tokio::spawn(async move {
                        tokio::time::sleep(delay).await;
                        let _ = events.send(Event::LoadingElapsed);
                    });
                }
                Command::PersistSelection(city) => {
                    while self.writes.try_join_next().is_some() {}

                    let store = self.store.clone();
                    self.writes.spawn_blocking(move || {
                        if let Err(err) = store.save(&city) {
                            warn!(%city, error = %err, "could not persist selection");
                        }
                    });
                }
            }
        }
    }
}
