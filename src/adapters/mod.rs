//! Adapters - concrete implementations of ports plus the inbound HTTP surface.

pub mod backend;
pub mod http;
