use serde::{Deserialize, Serialize};

use crate::domain::{BuildingId, ReservationId, RoomId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildingSummary {
    pub building_id: BuildingId,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildingsResponse {
    pub buildings: Vec<BuildingSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FloorsResponse {
    pub floors: Vec<i64>,
}

/// Query string for `GET /search`. Fields hold the raw form values; the
/// server coerces empty strings for the optional filters to "any".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub building_id: String,
    pub floor: String,
    pub slot_date: String,
    pub start_hour: String,
    pub end_hour: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSummary {
    pub room_id: RoomId,
    pub room_num: String,
    pub building_name: String,
    pub floor: i64,
    pub capacity: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub rooms: Vec<RoomSummary>,
}

/// Body for `POST /reserve`. All fields are the raw form values as strings,
/// matching what the reservation modal collects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReserveRequest {
    pub room_id: String,
    pub slot_date: String,
    pub start_hour: String,
    pub end_hour: String,
    pub reserved_by: String,
}

/// Reply from `POST /reserve`. The server answers conflicts and validation
/// failures with a non-success status and an `error` field; success replies
/// carry a confirmation message plus the ids of the hourly slots created.
/// Callers must branch on `error` rather than on the HTTP status alone.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReserveResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reservation_ids: Vec<ReservationId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours_reserved: Option<i64>,
}

impl ReserveResponse {
    pub fn accepted(message: impl Into<String>, reservation_ids: Vec<ReservationId>) -> Self {
        Self {
            error: None,
            message: Some(message.into()),
            hours_reserved: Some(reservation_ids.len() as i64),
            reservation_ids,
        }
    }

    pub fn rejected(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserve_request_serializes_raw_form_fields() {
        let request = ReserveRequest {
            room_id: "3".to_string(),
            slot_date: "2024-01-01".to_string(),
            start_hour: "9".to_string(),
            end_hour: "10".to_string(),
            reserved_by: "Alice".to_string(),
        };
        let json = serde_json::to_value(&request).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({
                "room_id": "3",
                "slot_date": "2024-01-01",
                "start_hour": "9",
                "end_hour": "10",
                "reserved_by": "Alice",
            })
        );
    }

    #[test]
    fn reserve_response_parses_error_payload() {
        let response: ReserveResponse =
            serde_json::from_str(r#"{"error":"Room already booked"}"#).expect("parse");
        assert_eq!(response.error.as_deref(), Some("Room already booked"));
        assert!(response.message.is_none());
        assert!(response.reservation_ids.is_empty());
    }

    #[test]
    fn reserve_response_parses_success_payload() {
        let response: ReserveResponse = serde_json::from_str(
            r#"{"message":"Reservation submitted for approval (2 hours)","reservation_ids":[41,42],"hours_reserved":2}"#,
        )
        .expect("parse");
        assert!(response.error.is_none());
        assert_eq!(
            response.reservation_ids,
            vec![ReservationId(41), ReservationId(42)]
        );
        assert_eq!(response.hours_reserved, Some(2));
    }
}
