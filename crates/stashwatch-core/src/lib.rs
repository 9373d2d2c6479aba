//! Stashwatch Core — shared types, traits, and errors.
//!
//! This crate provides the foundational types used across all Stashwatch
//! crates. It has no internal Stashwatch dependencies (dependency level 0).
//!
//! # Modules
//!
//! - [`error`]: Error taxonomy and Result alias
//! - [`resource`]: Logical Logstash monitoring API resources
//! - [`snapshot`]: Immutable metric documents returned by the upstream
//! - [`connectivity`]: Outcome of the lightweight connectivity probe
//! - [`source`]: The [`MetricsSource`] trait implemented by upstream clients

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod connectivity;
pub mod error;
pub mod resource;
pub mod snapshot;
pub mod source;

// Re-export key types at crate root for convenience
pub use connectivity::{Connectivity, ProbeInfo};
pub use error::{Error, Result};
pub use resource::Resource;
pub use snapshot::Snapshot;
pub use source::MetricsSource;
