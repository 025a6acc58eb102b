// src/test_utils/mock_postal_server.rs
use axum::{routing::get, Json, Router};
use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

use crate::errors::PinseekError;

/// Canned response for one lookup: a JSON body to return with 200, or an
/// error to simulate as an HTTP 500.
pub type CannedLookup = Result<serde_json::Value, PinseekError>;

#[derive(Clone)]
struct MockServerState {
    responses: Arc<Mutex<VecDeque<CannedLookup>>>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockServerState {
    fn new(responses: Vec<CannedLookup>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::from(responses))),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

async fn pincode_handler(
    axum::extract::State(state): axum::extract::State<MockServerState>,
    axum::extract::Path(pincode): axum::extract::Path<String>,
) -> Result<Json<serde_json::Value>, axum::http::StatusCode> {
    log::debug!("Mock postal server received lookup for {}", pincode);
    state.requests.lock().unwrap().push(pincode);

    match state.responses.lock().unwrap().pop_front() {
        Some(Ok(body)) => {
            log::debug!("Mock postal server sending response: {}", body);
            Ok(Json(body))
        }
        Some(Err(e)) => {
            log::error!("Mock postal server simulating a failure: {:?}", e);
            Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
        }
        None => {
            log::error!("Mock postal server ran out of responses!");
            Err(axum::http::StatusCode::SERVICE_UNAVAILABLE)
        }
    }
}

pub struct MockPostalServer {
    addr: SocketAddr,
    shutdown_tx: tokio::sync::oneshot::Sender<()>,
    pub recorded_requests: Arc<Mutex<Vec<String>>>,
}

impl MockPostalServer {
    pub async fn start(responses: Vec<CannedLookup>) -> Self {
        let state = MockServerState::new(responses);
        let recorded_requests_clone = state.requests.clone();

        let app = Router::new()
            .route("/pincode/{pincode}", get(pincode_handler))
            .with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap_or_else(|e| {
            panic!("Failed to bind mock server to 127.0.0.1:0. Error: {}", e);
        });
        let addr = listener.local_addr().unwrap();
        log::info!("Mock postal server listening on {}", addr);

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                    log::info!("Mock postal server shutting down gracefully.");
                })
                .await
                .unwrap_or_else(|e| {
                    log::error!("Mock postal server error: {}", e);
                });
        });

        MockPostalServer {
            addr,
            shutdown_tx,
            recorded_requests: recorded_requests_clone,
        }
    }

    pub fn address(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub async fn shutdown(self) {
        if self.shutdown_tx.send(()).is_err() {
            log::warn!("Mock postal server shutdown signal already sent or receiver dropped.");
        }
        // Give the server a moment to process shutdown before the port is reused.
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
    }

    /// Pincodes looked up so far, in arrival order.
    pub fn get_requests(&self) -> Vec<String> {
        self.recorded_requests.lock().unwrap().clone()
    }
}
