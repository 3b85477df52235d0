//! Scoring and standings service for Pencak Silat tournament dashboards.
//!
//! `workflows::tally` holds the aggregation and ranking core together with
//! its repository, service, and HTTP seams; `workflows::recap` imports the
//! circulator recap exports that feed it.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
