//! Scenario engine
//!
//! A scenario is an ordered sequence of dependent steps with its own
//! isolated [`ScenarioState`] and a guaranteed teardown of whatever it
//! created. Steps run strictly sequentially; concurrent scenarios each own
//! their state and session, so no locking happens at this layer.

mod runner;
mod state;
pub mod steps;

pub use runner::{run_scenario, ScenarioResult, SCENARIOS};
pub use state::ScenarioState;
