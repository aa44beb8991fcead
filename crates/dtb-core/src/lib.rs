//! Core logic for the Discord language-channel translation relay.
//!
//! This crate is framework-agnostic. Discord and OpenAI live behind ports
//! (traits) implemented in adapter crates.

pub mod classify;
pub mod config;
pub mod conversation;
pub mod dispatch;
pub mod domain;
pub mod errors;
pub mod fanout;
pub mod formatting;
pub mod grouping;
pub mod languages;
pub mod logging;
pub mod messaging;
pub mod model;
pub mod prompt;

pub use errors::{Error, Result};
