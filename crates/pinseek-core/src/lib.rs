//! Core library for the Pinseek postal lookup terminal.
//!
//! This crate holds everything below the presentation layer: the data model
//! for post office records, pincode validation, the search session state
//! machine that drives one lookup at a time, and the HTTP client for the
//! public postal pincode API.
//!
//! # Architecture Overview
//!
//! - **Search session**: a pure state machine over the input field and
//!   lookup lifecycle, with generation counters to discard stale responses
//! - **Lookup client**: trait-based backend abstraction with a reqwest
//!   implementation against `api.postalpincode.in`
//! - **Validation**: six-digit pincode rules applied while typing and again
//!   at submit time
//! - **Configuration**: YAML settings for the endpoint, timeout, and logging

pub mod client;
pub mod config;
pub mod core_types;
pub mod errors;
pub mod pincode;
pub mod session;

pub use client::{LookupClientBox, PincodeLookup, PostalApiClient};
pub use config::{ConfigLoader, PinseekConfig};
pub use core_types::{LookupOutcome, PostOffice};
pub use errors::PinseekError;
pub use pincode::Pincode;
pub use session::{DisplayState, LookupRequest, SearchPhase, SearchSession};

#[cfg(test)]
pub mod test_utils;
