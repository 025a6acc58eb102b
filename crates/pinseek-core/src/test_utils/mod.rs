//! Shared helpers for exercising the lookup pipeline in tests.

pub mod mock_postal_server;

pub use mock_postal_server::MockPostalServer;
