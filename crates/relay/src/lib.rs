//! Emergency notification relay.
//!
//! This crate provides:
//! - `DeliveryMethod` trait for pluggable delivery transports
//! - Socket, HTTP API, and plain-form delivery implementations
//! - `Relay` that tries each method in fixed order, stopping at first success
//! - A read-only connectivity probe against the admin panel

pub mod http_api;
pub mod probe;
pub mod relay;
pub mod simple_post;
pub mod socket;
pub mod traits;

pub use probe::{ConnectivityProbe, ProbeReport};
pub use relay::Relay;
pub use traits::{DeliveryMethod, RelayError};
