use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::fixtures::PincodeFixture;
use crate::handlers::{health_check, lookup_pincode};

pub struct MockServer {
    fixture: Arc<PincodeFixture>,
}

impl MockServer {
    pub fn new() -> Self {
        Self {
            fixture: Arc::new(PincodeFixture::create_test_fixture()),
        }
    }

    pub fn with_fixture(fixture: PincodeFixture) -> Self {
        Self {
            fixture: Arc::new(fixture),
        }
    }

    /// The routes by themselves, so tests can serve on an ephemeral port.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/health", get(health_check))
            .route("/pincode/{pincode}", get(lookup_pincode))
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
            .with_state(self.fixture.clone())
    }

    pub async fn serve(self, bind_addr: &str) -> anyhow::Result<()> {
        let addr: SocketAddr = bind_addr.parse()?;
        let app = self.router();

        tracing::info!("Starting postal mock service on {}", addr);
        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }
}

impl Default for MockServer {
    fn default() -> Self {
        Self::new()
    }
}
