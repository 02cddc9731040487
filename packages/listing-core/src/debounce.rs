//! Quiescence-window propagation for fast-changing inputs.
//!
//! A [`Debounced<T>`] accepts raw edits at any rate and publishes a settled
//! value only once the input has stopped changing for a fixed window. Every
//! new edit restarts the wait.
//!
//! # Guarantees
//!
//! - The settled channel only ever changes to a value the input actually
//!   held, and only after it was stable for the full window (or was pushed
//!   through [`Debounced::set_immediate`]).
//! - Equal settled values are not re-published, so one subscriber
//!   notification corresponds to one distinct settled value.
//! - After [`Debounced::cancel`] (or drop) no pending timer ever fires.
//!
//! # Accepted limit
//!
//! Sustained edits arriving faster than the window defer propagation
//! indefinitely; there is no maximum wait. Callers that need an immediate
//! path (filter reset, enum selects) use `set_immediate`.

use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

/// The uniform quiescence window for text/date filter inputs.
pub const DEFAULT_DEBOUNCE_WINDOW: Duration = Duration::from_millis(500);

enum Input<T> {
    /// Restart the window with this value.
    Edit(T),
    /// Publish this value now, discarding any pending window.
    Immediate(T),
}

/// A debounced value: raw edits in, settled values out.
pub struct Debounced<T> {
    input_tx: mpsc::UnboundedSender<Input<T>>,
    settled_rx: watch::Receiver<T>,
    cancel: CancellationToken,
}

impl<T> Debounced<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    /// Spawn the debounce worker. `initial` is published as the first
    /// settled value without waiting.
    pub fn spawn(initial: T, window: Duration) -> Self {
        let (input_tx, input_rx) = mpsc::unbounded_channel();
        let (settled_tx, settled_rx) = watch::channel(initial);
        let cancel = CancellationToken::new();

        tokio::spawn(worker(input_rx, settled_tx, window, cancel.clone()));

        Self {
            input_tx,
            settled_rx,
            cancel,
        }
    }

    /// Record a raw edit. Restarts the quiescence window.
    pub fn set(&self, value: T) {
        // Send fails only after cancel; edits after teardown are dropped.
        let _ = self.input_tx.send(Input::Edit(value));
    }

    /// Publish a value immediately, bypassing the window and discarding any
    /// pending edit. Used by `clear_filters()` and non-text inputs.
    pub fn set_immediate(&self, value: T) {
        let _ = self.input_tx.send(Input::Immediate(value));
    }

    /// Subscribe to settled values.
    pub fn settled(&self) -> watch::Receiver<T> {
        self.settled_rx.clone()
    }

    /// Stop the worker. Pending windows never fire afterwards.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }
}

impl<T> Drop for Debounced<T> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn worker<T>(
    mut input_rx: mpsc::UnboundedReceiver<Input<T>>,
    settled_tx: watch::Sender<T>,
    window: Duration,
    cancel: CancellationToken,
) where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    loop {
        let first = tokio::select! {
            _ = cancel.cancelled() => return,
            msg = input_rx.recv() => match msg {
                Some(msg) => msg,
                None => return,
            },
        };

        let mut pending = match first {
            Input::Immediate(value) => {
                publish(&settled_tx, value);
                continue;
            }
            Input::Edit(value) => value,
        };

        // A window is open. Each further edit restarts it; an immediate
        // publish closes it.
        loop {
            tokio::select! {
                _ = cancel.cancelled() => return,
                _ = sleep(window) => {
                    publish(&settled_tx, pending);
                    break;
                }
                msg = input_rx.recv() => match msg {
                    Some(Input::Edit(value)) => pending = value,
                    Some(Input::Immediate(value)) => {
                        publish(&settled_tx, value);
                        break;
                    }
                    None => return,
                },
            }
        }
    }
}

fn publish<T: PartialEq>(settled_tx: &watch::Sender<T>, value: T) {
    settled_tx.send_if_modified(|current| {
        if *current == value {
            false
        } else {
            *current = value;
            true
        }
    });
}
