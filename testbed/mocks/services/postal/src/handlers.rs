use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

use crate::fixtures::PincodeFixture;

pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "postal-mock"
    }))
}

/// Answer a lookup the way `api.postalpincode.in` does: a one-element JSON
/// array whose envelope carries a status line and the matching records.
/// Unknown pincodes get the same "No records found" envelope the real
/// service sends, not a 404.
pub async fn lookup_pincode(
    Path(pincode): Path<String>,
    State(fixture): State<Arc<PincodeFixture>>,
) -> Result<impl IntoResponse, StatusCode> {
    match fixture.get_entry(&pincode) {
        Some(entry) => {
            if entry.delay_ms > 0 {
                tracing::info!("Delaying answer for {} by {}ms", pincode, entry.delay_ms);
                tokio::time::sleep(Duration::from_millis(entry.delay_ms)).await;
            }

            if entry.fail {
                tracing::info!("Simulating an upstream failure for {}", pincode);
                return Err(StatusCode::INTERNAL_SERVER_ERROR);
            }

            if entry.records.is_empty() {
                return Ok(Json(no_records_envelope()));
            }

            tracing::info!(
                "Answering {} with {} record(s)",
                pincode,
                entry.records.len()
            );
            Ok(Json(json!([
                {
                    "Message": format!("Number of pincode(s) found:{}", entry.records.len()),
                    "Status": "Success",
                    "PostOffice": entry.records,
                }
            ])))
        }
        None => {
            tracing::info!("No fixture entry for {}", pincode);
            Ok(Json(no_records_envelope()))
        }
    }
}

fn no_records_envelope() -> serde_json::Value {
    json!([
        {
            "Message": "No records found",
            "Status": "Error",
            "PostOffice": null
        }
    ])
}
