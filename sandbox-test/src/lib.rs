//! Shared fixtures for the sandbox codec tests.

pub mod accounts;
pub mod log;
pub mod mail;
pub mod utils;

pub use log::init_logging;
