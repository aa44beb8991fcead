//! Language-model port and the message types sent through it.

pub mod client;
pub mod types;
