//! HTTP adapters for the two external services behind the deployment
//! pipeline.
//!
//! This crate owns everything wire-level:
//! - request construction and authentication for both services
//! - the camelCase JSON shapes each service speaks
//! - converting transport, status, and decoding failures into the core's
//!   `ProviderError` at the adapter edge
//!
//! # Architecture
//!
//! The core defines `AssistantProviderClient` and `CarrierClient` as traits
//! and never builds an HTTP request itself. Each adapter here is a plain
//! struct around a `reqwest::Client` constructed once at startup from
//! `AppConfig` and injected where it is needed — there are no module-level
//! singletons and no lazy construction.
//!
//! # Safety principle
//!
//! No panic and no raw transport error crosses the trait boundary. Anything
//! that goes wrong talking to a service becomes a typed `ProviderError`,
//! and an upstream-outage signature is folded into
//! `ProviderError::Unavailable` so callers can show a retry-later message
//! instead of provider internals.

pub mod assistant;
pub mod carrier;
mod classify;

pub use assistant::HostedAssistantClient;
pub use carrier::NumberCarrierClient;
