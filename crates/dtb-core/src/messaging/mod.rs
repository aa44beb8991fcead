//! Chat-platform port and outgoing message model.

pub mod port;
pub mod types;
