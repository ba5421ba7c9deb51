//! Simulated data source that periodically refreshes a resource.
//!
//! On every tick the fetcher issues a `Request`, waits half an interval to
//! stand in for network latency, then reports the outcome chosen by the
//! configured pattern. The pattern repeats when there are more ticks than
//! characters.

use std::time::Duration;

use refreshable_data::Event;
use serde_json::{json, Value};
use tokio::task::{JoinError, JoinHandle};

use crate::config::SimulationConfig;
use crate::driver::{DriverError, DriverHandle};

/// Errors from building a simulation.
#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    #[error("Outcome pattern is empty")]
    EmptyPattern,

    #[error("Invalid outcome {ch:?} at position {position}, expected 's' or 'f'")]
    InvalidOutcome { ch: char, position: usize },

    #[error("Fetcher stopped: {0}")]
    Driver(#[from] DriverError),

    #[error("Fetcher task failed: {0}")]
    Task(#[from] JoinError),
}

/// The result of one simulated request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Succeed,
    Fail,
}

impl Outcome {
    /// Parse a pattern such as `"ssf"` into outcomes.
    pub fn parse_pattern(pattern: &str) -> Result<Vec<Outcome>, SimulationError> {
        let outcomes = pattern
            .chars()
            .enumerate()
            .map(|(position, ch)| match ch.to_ascii_lowercase() {
                's' => Ok(Outcome::Succeed),
                'f' => Ok(Outcome::Fail),
                _ => Err(SimulationError::InvalidOutcome { ch, position }),
            })
            .collect::<Result<Vec<_>, _>>()?;

        if outcomes.is_empty() {
            return Err(SimulationError::EmptyPattern);
        }
        Ok(outcomes)
    }
}

/// Periodic refresher feeding a driver.
#[derive(Debug, Clone)]
pub struct Fetcher {
    interval: Duration,
    ticks: u32,
    outcomes: Vec<Outcome>,
}

impl Fetcher {
    /// Fails with [`SimulationError::EmptyPattern`] when `outcomes` is empty.
    pub fn new(
        interval: Duration,
        ticks: u32,
        outcomes: Vec<Outcome>,
    ) -> Result<Self, SimulationError> {
        if outcomes.is_empty() {
            return Err(SimulationError::EmptyPattern);
        }
        Ok(Self {
            interval,
            ticks,
            outcomes,
        })
    }

    pub fn from_config(config: &SimulationConfig) -> Result<Self, SimulationError> {
        let outcomes = Outcome::parse_pattern(&config.pattern)?;
        Self::new(config.interval(), config.ticks, outcomes)
    }

    /// The outcome reported on a given tick.
    pub fn outcome_at(&self, tick: u32) -> Outcome {
        self.outcomes[tick as usize % self.outcomes.len()]
    }

    /// Run every tick, then drop the handle.
    pub async fn run(self, handle: DriverHandle<String, Value>) -> Result<(), DriverError> {
        // A zero period panics inside tokio.
        let mut interval = tokio::time::interval(self.interval.max(Duration::from_millis(1)));
        let latency = self.interval / 2;

        for tick in 0..self.ticks {
            interval.tick().await;
            tracing::debug!(tick, "Issuing request");
            handle.dispatch(Event::Request).await?;

            tokio::time::sleep(latency).await;
            let event = match self.outcome_at(tick) {
                Outcome::Succeed => Event::Succeed {
                    value: json!({ "tick": tick }),
                },
                Outcome::Fail => Event::Fail {
                    error: format!("request {} failed", tick),
                },
            };
            handle.dispatch(event).await?;
        }

        tracing::info!(ticks = self.ticks, "Fetcher finished");
        Ok(())
    }
}

/// Wait for a spawned [`Fetcher::run`] task.
///
/// A task cancelled with `abort` counts as a clean stop. A panic or a closed
/// driver is reported.
pub async fn join_fetcher(
    task: JoinHandle<Result<(), DriverError>>,
) -> Result<(), SimulationError> {
    match task.await {
        Ok(result) => Ok(result?),
        Err(err) if err.is_cancelled() => {
            tracing::debug!("Fetcher cancelled");
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pattern() {
        assert_eq!(
            Outcome::parse_pattern("sFs").unwrap(),
            vec![Outcome::Succeed, Outcome::Fail, Outcome::Succeed]
        );
    }

    #[test]
    fn test_parse_pattern_rejects_unknown() {
        let err = Outcome::parse_pattern("sx").unwrap_err();
        assert!(matches!(
            err,
            SimulationError::InvalidOutcome { ch: 'x', position: 1 }
        ));
        assert!(matches!(
            Outcome::parse_pattern(""),
            Err(SimulationError::EmptyPattern)
        ));
    }

    #[test]
    fn test_pattern_repeats() {
        let fetcher = Fetcher::new(
            Duration::from_millis(1),
            5,
            vec![Outcome::Succeed, Outcome::Fail],
        )
        .unwrap();
        assert_eq!(fetcher.outcome_at(0), Outcome::Succeed);
        assert_eq!(fetcher.outcome_at(3), Outcome::Fail);
        assert_eq!(fetcher.outcome_at(4), Outcome::Succeed);
    }

    #[test]
    fn test_new_rejects_empty_outcomes() {
        let result = Fetcher::new(Duration::from_millis(1), 1, Vec::new());
        assert!(matches!(result, Err(SimulationError::EmptyPattern)));
    }
}
