//! Adapters Layer
//!
//! Inbound: the HTTP API. Outbound: CEP providers, caches and in-memory
//! stores implementing the domain ports.

pub mod inbound;
pub mod outbound;
