//! Async reducer that owns the current state of one resource.
//!
//! Producers send lifecycle events through a [`DriverHandle`]. The driver
//! applies each event with [`Resource::reduce`] and publishes the new state
//! on a `watch` channel, so observers always see the latest snapshot.
//! Observers that fall behind see only the newest state, never a backlog.
//!
//! The driver stops when every handle has been dropped and returns the
//! final state.

use std::fmt::Debug;

use refreshable_data::{Event, Resource};
use tokio::sync::{mpsc, watch};

/// Errors from talking to the driver.
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error("Driver has shut down")]
    Closed,
}

/// Cloneable sender side of a [`ResourceDriver`].
#[derive(Debug)]
pub struct DriverHandle<E, A> {
    events: mpsc::Sender<Event<E, A>>,
}

impl<E, A> Clone for DriverHandle<E, A> {
    fn clone(&self) -> Self {
        Self {
            events: self.events.clone(),
        }
    }
}

impl<E, A> DriverHandle<E, A> {
    /// Queue an event for the driver.
    pub async fn dispatch(&self, event: Event<E, A>) -> Result<(), DriverError> {
        self.events.send(event).await.map_err(|_| DriverError::Closed)
    }
}

/// The reducer loop for a single resource.
pub struct ResourceDriver<E, A> {
    state: Resource<E, A>,
    events: mpsc::Receiver<Event<E, A>>,
    publisher: watch::Sender<Resource<E, A>>,
    applied: u64,
}

impl<E, A> ResourceDriver<E, A>
where
    E: Clone + Debug + Send + Sync + 'static,
    A: Clone + Debug + Send + Sync + 'static,
{
    /// Create a driver starting from `Absent`.
    ///
    /// Returns the driver, a handle for producers and a receiver for
    /// observers.
    pub fn new(
        capacity: usize,
    ) -> (Self, DriverHandle<E, A>, watch::Receiver<Resource<E, A>>) {
        Self::with_state(Resource::Absent, capacity)
    }

    /// Create a driver starting from an existing state.
    pub fn with_state(
        initial: Resource<E, A>,
        capacity: usize,
    ) -> (Self, DriverHandle<E, A>, watch::Receiver<Resource<E, A>>) {
        let (event_tx, event_rx) = mpsc::channel(capacity.max(1));
        let (state_tx, state_rx) = watch::channel(initial.clone());
        let driver = Self {
            state: initial,
            events: event_rx,
            publisher: state_tx,
            applied: 0,
        };
        (driver, DriverHandle { events: event_tx }, state_rx)
    }

    /// Current state.
    pub fn state(&self) -> &Resource<E, A> {
        &self.state
    }

    /// Apply one event and publish the result.
    pub fn apply(&mut self, event: Event<E, A>) {
        let previous = self.state.kind();
        let stale = matches!(event, Event::Fail { .. }) && self.state.result().is_some();
        let state = std::mem::take(&mut self.state).reduce(event);
        self.applied += 1;

        tracing::debug!(
            from = %previous,
            to = %state.kind(),
            refreshing = state.is_refreshing(),
            applied = self.applied,
            "Resource transition"
        );
        if stale {
            tracing::warn!(error = ?state.error(), "Refresh failed, serving stale value");
        }

        self.publisher.send_replace(state.clone());
        self.state = state;
    }

    /// Run until all handles are dropped. Returns the final state.
    pub async fn run(mut self) -> Resource<E, A> {
        tracing::info!("Resource driver started");

        while let Some(event) = self.events.recv().await {
            self.apply(event);
        }

        tracing::info!(
            applied = self.applied,
            state = %self.state.kind(),
            "Resource driver stopped"
        );
        self.state
    }
}
