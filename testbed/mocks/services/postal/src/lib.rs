//! Mock postal pincode lookup service for scenario testing
//!
//! Stands in for `api.postalpincode.in` so end-to-end scenarios run without
//! network access or rate limiting concerns. Pincode behavior comes from a
//! YAML fixture file when one is supplied and from a built-in fixture
//! otherwise; pincodes outside the fixture answer exactly like the real
//! service answering an unknown pincode. Individual entries can also
//! simulate upstream outages and slow responses.

pub mod fixtures;
pub mod handlers;
pub mod server;

pub use fixtures::{BranchRecord, PincodeEntry, PincodeFixture};
pub use server::MockServer;
