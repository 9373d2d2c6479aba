//! Diagnostic engine for Logstash metric snapshots.
//!
//! Every function here is pure: it reads the snapshots it is handed and
//! returns a fresh classification. Nothing is cached between calls.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     stashwatch-diag                         │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Tier / Assessment — ordered severity, issues, advice       │
//! │  Thresholds — heap and backpressure cut-offs                │
//! ├─────────────────────────────────────────────────────────────┤
//! │  health      — connectivity → heap → pipeline output        │
//! │  backpressure — queue backpressure tiers and trend          │
//! │  flow        — flat summary of current flow rates           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  DiagnosticEngine — the above, bound to one Thresholds      │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod assessment;
pub mod backpressure;
pub mod engine;
pub mod flow;
pub mod health;
pub mod thresholds;

mod proptests;

pub use assessment::{Assessment, Tier};
pub use backpressure::{BackpressureReport, BackpressureTrend, classify_backpressure};
pub use engine::DiagnosticEngine;
pub use flow::{FlowReport, FlowSummary, summarize_flow};
pub use health::{HealthInputs, HealthReport, OverallStatus, assess_health};
pub use thresholds::Thresholds;
