use std::time::Duration;

use tokio::{
    sync::mpsc,
    time::{self, Instant},
};

/// Trailing-edge debouncer.
///
/// Values pushed in quick succession are coalesced; only the last one is
/// emitted, once nothing new has arrived for `period`. There is no leading
/// edge: the first value of a burst waits like the rest.
#[derive(Debug)]
pub struct Debouncer<T> {
    input: mpsc::UnboundedSender<T>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Start the debouncing task. Settled values arrive on the returned receiver.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(period: Duration) -> (Self, mpsc::UnboundedReceiver<T>) {
        let (input, mut incoming) = mpsc::unbounded_channel::<T>();
        let (settled, output) = mpsc::unbounded_channel::<T>();

        tokio::spawn(async move {
            let mut pending: Option<T> = None;
            let quiet = time::sleep(period);
            tokio::pin!(quiet);

            loop {
                tokio::select! {
                    received = incoming.recv() => match received {
                        Some(value) => {
                            pending = Some(value);
                            quiet.as_mut().reset(Instant::now() + period);
                        }
                        None => {
                            // Sender dropped: flush what is left, on schedule.
                            if let Some(value) = pending.take() {
                                quiet.as_mut().await;
                                let _ = settled.send(value);
                            }
                            break;
                        }
                    },
                    () = quiet.as_mut(), if pending.is_some() => {
                        if let Some(value) = pending.take() {
                            if settled.send(value).is_err() {
                                break;
                            }
                        }
                    }
                }
            }
        });

        (Self { input }, output)
    }

    /// Feed a new value, restarting the quiet period.
    pub fn push(&self, value: T) {
        if self.input.send(value).is_err() {
            tracing::debug!("debouncer task has stopped; input dropped");
        }
    }
}
