//! Bookstore API scenario harness
//!
//! Drives a remote bookstore-style REST service through multi-step,
//! stateful scenarios: create a throwaway user, authenticate, mutate its
//! book shelf, assert the results and always tear the user down again.

pub mod client;
pub mod common;
pub mod data;
pub mod scenario;

// Re-export commonly used types for tests
pub use client::{ApiClient, Outcome, Session};
pub use common::{Config, Error, Result};
pub use data::Credentials;
pub use scenario::{run_scenario, ScenarioResult, ScenarioState};
