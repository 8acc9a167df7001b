//! Backend library: session-authenticated account and note management.
//!
//! Layered hexagonally: `domain` holds the services, entities, and ports;
//! `inbound` exposes the REST adapter; `outbound` provides the persistence
//! adapters behind the ports.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod outbound;

/// Public OpenAPI surface used by docs tooling.
pub use doc::ApiDoc;
