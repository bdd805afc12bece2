//! Core library for newsdesk.
//!
//! Holds everything that is not tied to a particular front-end: the data
//! model, configuration, the token store, HTTP clients for the auth backend,
//! the news API and saved articles, plus the session and routing rules that
//! both the TUI and the CLI drive.

pub mod api;
pub mod config;
pub mod logging;
pub mod models;
pub mod routes;
pub mod services;
pub mod session;
pub mod token;
