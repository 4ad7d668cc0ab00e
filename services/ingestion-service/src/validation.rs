use chrono::DateTime;
use serde_json::{Map, Value};

use crate::models::{GeoPoint, LocationPing};

const POINT: &str = "Point";
const COORDINATE_ARITY: usize = 2;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("body must be object")]
    NotAnObject,
    #[error("body{path} must have required property '{field}'")]
    MissingField {
        path: &'static str,
        field: &'static str,
    },
    #[error("body{path} must be {expected}")]
    WrongType {
        path: &'static str,
        expected: &'static str,
    },
    #[error("body/location/type must be equal to one of the allowed values")]
    NotAPoint,
    #[error("body/location/coordinates must NOT have fewer than 2 items")]
    TooFewCoordinates,
    #[error("body/location/coordinates must NOT have more than 2 items")]
    TooManyCoordinates,
    #[error("body/timestamp must match format \"date-time\"")]
    InvalidTimestamp,
}

pub fn validate_ping(body: &Value) -> Result<LocationPing, ValidationError> {
    // Stops at the first violation, checking parents before their fields.
    let root = body.as_object().ok_or(ValidationError::NotAnObject)?;
    for field in ["vehicle_id", "location", "timestamp"] {
        require(root, "", field)?;
    }

    let vehicle_id = root["vehicle_id"]
        .as_str()
        .ok_or(ValidationError::WrongType {
            path: "/vehicle_id",
            expected: "string",
        })?;

    let location = validate_location(&root["location"])?;

    let timestamp = root["timestamp"]
        .as_str()
        .ok_or(ValidationError::WrongType {
            path: "/timestamp",
            expected: "string",
        })?;
    let timestamp =
        DateTime::parse_from_rfc3339(timestamp).map_err(|_| ValidationError::InvalidTimestamp)?;

    Ok(LocationPing::new(
        vehicle_id.to_string(),
        location,
        timestamp,
        root.clone(),
    ))
}

fn validate_location(value: &Value) -> Result<GeoPoint, ValidationError> {
    let location = value.as_object().ok_or(ValidationError::WrongType {
        path: "/location",
        expected: "object",
    })?;
    for field in ["type", "coordinates"] {
        require(location, "/location", field)?;
    }

    let kind = location["type"].as_str().ok_or(ValidationError::WrongType {
        path: "/location/type",
        expected: "string",
    })?;
    if kind != POINT {
        return Err(ValidationError::NotAPoint);
    }

    let coordinates = location["coordinates"]
        .as_array()
        .ok_or(ValidationError::WrongType {
            path: "/location/coordinates",
            expected: "array",
        })?;
    let mut numbers = Vec::with_capacity(coordinates.len());
    for item in coordinates {
        let number = item.as_f64().ok_or(ValidationError::WrongType {
            path: "/location/coordinates/items",
            expected: "number",
        })?;
        numbers.push(number);
    }
    match numbers.len() {
        len if len < COORDINATE_ARITY => Err(ValidationError::TooFewCoordinates),
        len if len > COORDINATE_ARITY => Err(ValidationError::TooManyCoordinates),
        _ => Ok(GeoPoint {
            longitude: numbers[0],
            latitude: numbers[1],
        }),
    }
}

fn require(
    object: &Map<String, Value>,
    path: &'static str,
    field: &'static str,
) -> Result<(), ValidationError> {
    if object.contains_key(field) {
        Ok(())
    } else {
        Err(ValidationError::MissingField { path, field })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_body() -> Value {
        json!({
            "vehicle_id": "truck-42",
            "location": { "type": "Point", "coordinates": [-73.9857, 40.7484] },
            "timestamp": "2024-05-01T12:30:00Z"
        })
    }

    #[test]
    fn accepts_valid_ping() {
        let ping = validate_ping(&valid_body()).expect("valid ping");
        assert_eq!(ping.vehicle_id, "truck-42");
        assert_eq!(
            ping.location,
            GeoPoint {
                longitude: -73.9857,
                latitude: 40.7484
            }
        );
        assert_eq!(ping.timestamp.timestamp(), 1_714_566_600);
        assert_eq!(ping.body(), valid_body().as_object().expect("object"));
    }

    #[test]
    fn keeps_extra_fields_in_body() {
        let mut body = valid_body();
        body["speed_kmh"] = json!(54.5);
        let ping = validate_ping(&body).expect("valid ping");
        assert_eq!(ping.body().get("speed_kmh"), Some(&json!(54.5)));
    }

    #[test]
    fn accepts_integer_coordinates_and_offsets() {
        let mut body = valid_body();
        body["location"]["coordinates"] = json!([13, 52]);
        body["timestamp"] = json!("2024-05-01T14:30:00.250+02:00");
        let ping = validate_ping(&body).expect("valid ping");
        assert_eq!(ping.location.longitude, 13.0);
        assert_eq!(ping.timestamp.timestamp(), 1_714_566_600);
    }

    #[test]
    fn empty_vehicle_id_is_accepted() {
        let mut body = valid_body();
        body["vehicle_id"] = json!("");
        assert!(validate_ping(&body).is_ok());
    }

    #[test]
    fn rejects_non_object_body() {
        assert_eq!(
            validate_ping(&json!([1, 2])).unwrap_err(),
            ValidationError::NotAnObject
        );
    }

    #[test]
    fn rejects_missing_vehicle_id() {
        let mut body = valid_body();
        body.as_object_mut().expect("object").remove("vehicle_id");
        let err = validate_ping(&body).unwrap_err();
        assert_eq!(
            err.to_string(),
            "body must have required property 'vehicle_id'"
        );
    }

    #[test]
    fn rejects_missing_coordinates() {
        let mut body = valid_body();
        body["location"]
            .as_object_mut()
            .expect("object")
            .remove("coordinates");
        let err = validate_ping(&body).unwrap_err();
        assert_eq!(
            err.to_string(),
            "body/location must have required property 'coordinates'"
        );
    }

    #[test]
    fn rejects_non_string_vehicle_id() {
        let mut body = valid_body();
        body["vehicle_id"] = json!(42);
        assert_eq!(
            validate_ping(&body).unwrap_err(),
            ValidationError::WrongType {
                path: "/vehicle_id",
                expected: "string"
            }
        );
    }

    #[test]
    fn rejects_non_point_location() {
        let mut body = valid_body();
        body["location"]["type"] = json!("LineString");
        assert_eq!(
            validate_ping(&body).unwrap_err(),
            ValidationError::NotAPoint
        );
    }

    #[test]
    fn rejects_wrong_coordinate_arity() {
        let mut body = valid_body();
        body["location"]["coordinates"] = json!([1.0]);
        assert_eq!(
            validate_ping(&body).unwrap_err(),
            ValidationError::TooFewCoordinates
        );

        body["location"]["coordinates"] = json!([1.0, 2.0, 3.0]);
        assert_eq!(
            validate_ping(&body).unwrap_err(),
            ValidationError::TooManyCoordinates
        );
    }

    #[test]
    fn rejects_non_numeric_coordinates() {
        let mut body = valid_body();
        body["location"]["coordinates"] = json!(["1.0", 2.0]);
        assert!(matches!(
            validate_ping(&body).unwrap_err(),
            ValidationError::WrongType {
                path: "/location/coordinates/items",
                ..
            }
        ));
    }

    #[test]
    fn rejects_malformed_timestamp() {
        for timestamp in [
            "yesterday",
            "2024-05-01",
            "2024-05-01T12:30:00",
            "2024-13-01T00:00:00Z",
            "2024-05-01T12:30:00+0200",
        ] {
            let mut body = valid_body();
            body["timestamp"] = json!(timestamp);
            assert_eq!(
                validate_ping(&body).unwrap_err(),
                ValidationError::InvalidTimestamp,
                "{timestamp} should be rejected"
            );
        }
    }
}
