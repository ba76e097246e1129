//! Static capability catalog presented to the completion client.
//!
//! The assistant exposes exactly three callable capabilities. Their
//! parameter schemas are part of the function-calling contract and must
//! stay in sync with the typed argument parsers in `call`.

use cprovider::ToolDefinition;
use serde_json::json;

pub const GET_ROOMS: &str = "get_rooms";
pub const BOOK_ROOM: &str = "book_room";
pub const PROCESS_PAYMENT: &str = "process_payment";

pub const PAYMENT_METHODS: [&str; 3] = ["credit_card", "debit_card", "paypal"];

#[derive(Debug, Clone)]
pub struct ToolCatalog {
    definitions: Vec<ToolDefinition>,
}

impl ToolCatalog {
    /// The fixed three-entry booking catalog.
    pub fn standard() -> Self {
        Self {
            definitions: vec![
                get_rooms_definition(),
                book_room_definition(),
                process_payment_definition(),
            ],
        }
    }

    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.definitions.clone()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.definitions.iter().any(|tool| tool.name == name)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl Default for ToolCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

fn get_rooms_definition() -> ToolDefinition {
    ToolDefinition {
        name: GET_ROOMS.to_string(),
        description: "Get available hotel rooms".to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {}
        })
        .to_string(),
    }
}

fn book_room_definition() -> ToolDefinition {
    ToolDefinition {
        name: BOOK_ROOM.to_string(),
        description: "Book a hotel room".to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "roomId": { "type": "number" },
                "fullName": { "type": "string" },
                "email": { "type": "string" },
                "nights": { "type": "number" }
            },
            "required": ["roomId", "fullName", "email", "nights"]
        })
        .to_string(),
    }
}

fn process_payment_definition() -> ToolDefinition {
    ToolDefinition {
        name: PROCESS_PAYMENT.to_string(),
        description: "Process payment for a booking".to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "bookingId": { "type": "string" },
                "amount": { "type": "number" },
                "method": { "type": "string", "enum": PAYMENT_METHODS }
            },
            "required": ["bookingId", "amount", "method"]
        })
        .to_string(),
    }
}
