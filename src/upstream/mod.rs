//! Outbound HTTP: the typed client wrapper around the upstream services.

pub mod client;

pub use client::{UpstreamClient, UpstreamFailure, UpstreamRequest, UpstreamResponse};
