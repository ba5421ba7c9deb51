//! Refreshable CLI - replay and simulation tooling for `refreshable-data`
//!
//! Plays the role of the outside world around a single resource:
//! - Config loading from TOML with environment overrides
//! - Event scripts replayed through `Resource` or `RemoteData`
//! - An async reducer (`ResourceDriver`) that owns one current state and
//!   publishes every update on a `watch` channel
//! - A periodic `Fetcher` that simulates a refreshing data source

pub mod config;
pub mod driver;
pub mod script;
pub mod simulation;

pub use config::CliConfig;
pub use driver::{DriverError, DriverHandle, ResourceDriver};
pub use script::{EventScript, ScriptError};
pub use simulation::{join_fetcher, Fetcher, Outcome, SimulationError};
