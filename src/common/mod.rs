//! Common utilities shared between the CLI and the scenario engine

pub mod config;
pub mod error;
pub mod logging;

pub use config::Config;
pub use error::{Error, Result};
