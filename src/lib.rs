//! userfetch — random user profile fetcher (library crate).
//!
//! Re-exports public modules for integration tests and external use.

pub mod cache;
pub mod config;
pub mod constants;
pub mod env;
pub mod logging;
pub mod models;
pub mod output;
pub mod service;
pub mod source;
pub mod throttle;
