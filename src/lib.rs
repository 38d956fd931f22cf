//! # jobfeed: Daily job-listing ingestion
//!
//! Fetches Markdown job tables published in public GitHub repositories,
//! normalizes heterogeneous rows into one [`models::JobListing`] shape, and
//! filters the merged result.
//!
//! ## Architecture
//!
//! - **[`registry`]**: Category tabs, their source URLs and fallback samples
//! - **[`fetcher`]**: Ordered candidate fallback over a pluggable transport, URL variants
//! - **[`parser`]**: Header-anchored and line-scan table strategies, category detection
//! - **[`aggregator`]**: Concurrent per-source loading with settle-all merge
//! - **[`filter`]**: Prefix/equality predicates and dropdown option lists
//! - **[`samples`]**: Fixed records shown when nothing could be loaded
//! - **[`debug_log`]**: Timestamped diagnostic trail for the user
//! - **[`config`]**: JSON configuration loading and validation

pub mod aggregator;
pub mod config;
pub mod debug_log;
pub mod fetcher;
pub mod filter;
pub mod models;
pub mod parser;
pub mod registry;
pub mod samples;
