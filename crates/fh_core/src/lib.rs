//! `fh_core`: galaxy generation, turn processing and species reports.
//!
//! No IO, no clock. All randomness via the passed-in Rng.

mod coords;
pub mod dice;
pub mod error;
pub mod generator;
pub mod life_support;
pub mod report;
pub mod setup;
mod ship;
mod tables;
pub mod text;
pub mod turn;
mod types;

pub use coords::*;
pub use error::{GenerateError, PlayerError, PlayerErrors, ReportError, SetupError, TurnError};
pub use generator::{generate_galaxy, home_scans, Generated};
pub use report::{render_orders, render_report, PriorLog};
pub use tables::*;
pub use turn::{finish_turn, TurnInputs, TurnOutcome};
pub use types::*;

#[cfg(any(test, feature = "test-support"))]
pub mod test_fixtures;

#[cfg(test)]
mod tests;
