//! # stashwatch-client
//!
//! HTTP client for the Logstash monitoring API.
//!
//! This crate provides [`LogstashClient`], the production
//! [`MetricsSource`](stashwatch_core::MetricsSource):
//! - Typed resource paths joined onto a configurable base URL
//! - Optional `human=true` formatting
//! - A short-timeout connectivity probe
//! - Transport failures mapped onto the core error taxonomy

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod client;
pub mod config;

pub use client::{LogstashClient, validate_base_url};
pub use config::{ClientConfig, DEFAULT_LOGSTASH_URL};
