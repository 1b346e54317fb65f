//! Synthetic order load client for the S2 order-clustering service.
//!
//! This crate provides tools to:
//! - Generate banded synthetic order point clouds around a city center
//! - Send them to the clustering endpoint in a single measured request
//! - Summarize and persist the returned GeoJSON document
//! - Output run reports in multiple formats (console, JSON, CSV)

pub mod client;
pub mod config;
pub mod generator;
pub mod payload;
pub mod report;
pub mod response;

pub use client::{OrderClient, SendResult};
pub use config::{BandConfig, Center, TestConfig};
pub use generator::{band_counts, PointGenerator};
pub use payload::{GeoPoint, OrderPayload};
pub use report::RunReport;
pub use response::{handle_response, summarize, Outcome, ResponseSummary};
