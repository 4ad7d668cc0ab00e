use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use serde_json::{Map, Value};

// The submitted body is kept so the stored document is exactly what was sent.
#[derive(Debug, Clone)]
pub struct LocationPing {
    pub vehicle_id: String,
    pub location: GeoPoint,
    pub timestamp: DateTime<FixedOffset>,
    body: Map<String, Value>,
}

impl LocationPing {
    pub(crate) fn new(
        vehicle_id: String,
        location: GeoPoint,
        timestamp: DateTime<FixedOffset>,
        body: Map<String, Value>,
    ) -> Self {
        Self {
            vehicle_id,
            location,
            timestamp,
            body,
        }
    }

    pub fn body(&self) -> &Map<String, Value> {
        &self.body
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub longitude: f64,
    pub latitude: f64,
}

#[derive(Serialize)]
pub struct HelloResponse {
    pub hello: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestResponse {
    pub success: bool,
    pub inserted_id: String,
}

#[derive(Serialize)]
pub struct IngestFailure {
    pub success: bool,
    pub message: &'static str,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub code: &'static str,
    pub message: String,
}

#[derive(Serialize)]
pub struct ReadinessResponse {
    pub status: &'static str,
    pub document_store: &'static str,
    pub relational_store: &'static str,
}
