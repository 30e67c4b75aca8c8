//! Proxy Layer Tests
//!
//! End-to-end tests across both crates:
//! - Record model: growth, positions, names, the wire round trip
//! - Conversion: default registries, custom converters, extension types
//! - Proxy round trip: every operation kind against an in-memory crud fake

mod common;

mod conversion;
mod proxy_roundtrip;
mod record_model;
