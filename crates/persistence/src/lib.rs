//! Persistence layer for the Realm Portal backend.
//!
//! All data lives in a hosted Postgres reached through its REST API. This
//! crate contains:
//! - The typed query client and its transports (HTTP, in-memory, unconfigured)
//! - Entity definitions (backend row mappings)
//! - Repository implementations

pub mod client;
pub mod db;
pub mod entities;
pub mod error;
pub mod memory;
pub mod metrics;
pub mod repositories;
pub mod transport;

pub use client::{DataClient, Databases};
pub use error::DataError;
