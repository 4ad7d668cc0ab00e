use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::Value;

use crate::models::{
    ErrorResponse, HelloResponse, IngestFailure, IngestResponse, ReadinessResponse,
};
use crate::state::AppState;
use crate::store::check_relational;
use crate::validation::validate_ping;

const INGEST_FAILED: &str = "Failed to ingest GPS data";

pub async fn hello() -> Json<HelloResponse> {
    Json(HelloResponse { hello: "world" })
}

pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

pub async fn readyz(State(state): State<AppState>) -> impl IntoResponse {
    let document_store = match state.pings.check().await {
        Ok(()) => "ok",
        Err(err) => {
            tracing::warn!(error = %err, "document store not ready");
            "unavailable"
        }
    };
    let relational_store = match state.relational.as_deref() {
        None => "disabled",
        Some(client) => match check_relational(client).await {
            Ok(()) => "ok",
            Err(err) => {
                tracing::warn!(error = %err, "relational store not ready");
                "unavailable"
            }
        },
    };

    let ready = document_store == "ok" && relational_store != "unavailable";
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (
        status,
        Json(ReadinessResponse {
            status: if ready { "ok" } else { "degraded" },
            document_store,
            relational_store,
        }),
    )
}

pub async fn ingest_ping(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> impl IntoResponse {
    let body = match payload {
        Ok(Json(body)) => body,
        Err(rejection) => {
            return (
                rejection.status(),
                Json(ErrorResponse {
                    success: false,
                    code: "invalid_json",
                    message: rejection.body_text(),
                }),
            )
                .into_response();
        }
    };

    // Reject schema violations before touching the store.
    let ping = match validate_ping(&body) {
        Ok(ping) => ping,
        Err(err) => {
            tracing::debug!(error = %err, "gps ping rejected");
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    success: false,
                    code: "invalid_body",
                    message: err.to_string(),
                }),
            )
                .into_response();
        }
    };

    match state.pings.insert_ping(&ping).await {
        Ok(inserted_id) => {
            tracing::info!(
                vehicle_id = ping.vehicle_id.as_str(),
                inserted_id = inserted_id.as_str(),
                longitude = ping.location.longitude,
                latitude = ping.location.latitude,
                reported_at = %ping.timestamp,
                "received gps ping"
            );
            (
                StatusCode::OK,
                Json(IngestResponse {
                    success: true,
                    inserted_id,
                }),
            )
                .into_response()
        }
        Err(err) => {
            tracing::error!(
                error = %err,
                vehicle_id = ping.vehicle_id.as_str(),
                "gps ping insert failed"
            );
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(IngestFailure {
                    success: false,
                    message: INGEST_FAILED,
                }),
            )
                .into_response()
        }
    }
}
