//! Wire shapes exchanged with the hotel inventory backend.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One room record from the inventory listing. Fields the backend adds
/// beyond the known ones are preserved in `extra` so the model sees the
/// listing unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    #[serde(rename = "roomId")]
    pub room_id: i64,
    pub name: String,
    pub price: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateBookingRequest {
    #[serde(rename = "roomId")]
    pub room_id: i64,
    #[serde(rename = "fullName")]
    pub full_name: String,
    pub email: String,
    pub nights: u32,
}

/// The booking backend's confirmation payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingConfirmation {
    #[serde(rename = "bookingId")]
    pub booking_id: String,
    #[serde(rename = "totalPrice")]
    pub total_price: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn room_round_trips_unknown_fields() {
        let body = r#"{"roomId":1,"name":"Deluxe","price":100,"view":"sea"}"#;
        let room: Room = serde_json::from_str(body).expect("room should parse");

        assert_eq!(room.room_id, 1);
        assert_eq!(room.name, "Deluxe");
        assert_eq!(room.price, 100.0);

        let back = serde_json::to_value(&room).expect("room should serialize");
        assert_eq!(back["view"], "sea");
    }

    #[test]
    fn booking_confirmation_keeps_backend_extras() {
        let body = r#"{"bookingId":"BK-1","totalPrice":300,"roomName":"Deluxe"}"#;
        let confirmation: BookingConfirmation =
            serde_json::from_str(body).expect("confirmation should parse");

        assert_eq!(confirmation.booking_id, "BK-1");
        assert_eq!(confirmation.total_price, 300.0);

        let back = serde_json::to_value(&confirmation).expect("confirmation should serialize");
        assert_eq!(back["roomName"], "Deluxe");
    }
}
