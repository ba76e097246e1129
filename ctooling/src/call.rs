//! Typed capability calls parsed and validated from model tool requests.
//!
//! Model-supplied arguments are never forwarded to side-effecting
//! services raw: `CapabilityCall::parse` checks the capability name and
//! every declared parameter before dispatch becomes possible.
//!
//! ```rust
//! use cprovider::ToolCall;
//! use ctooling::CapabilityCall;
//!
//! let call = ToolCall {
//!     id: "call_1".to_string(),
//!     name: "get_rooms".to_string(),
//!     arguments: "{}".to_string(),
//! };
//!
//! assert_eq!(CapabilityCall::parse(&call).expect("parse"), CapabilityCall::ListRooms);
//! ```

use std::fmt::{Display, Formatter};

use cprovider::ToolCall;

use crate::args::{parse_json_object, required_f64, required_i64, required_string};
use crate::catalog::{BOOK_ROOM, GET_ROOMS, PROCESS_PAYMENT};
use crate::ToolError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    CreditCard,
    DebitCard,
    Paypal,
}

impl PaymentMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CreditCard => "credit_card",
            Self::DebitCard => "debit_card",
            Self::Paypal => "paypal",
        }
    }

    pub fn from_str(value: &str) -> Result<Self, ToolError> {
        match value {
            "credit_card" => Ok(Self::CreditCard),
            "debit_card" => Ok(Self::DebitCard),
            "paypal" => Ok(Self::Paypal),
            _ => Err(ToolError::invalid_arguments(format!(
                "unsupported payment method '{value}'"
            ))),
        }
    }
}

impl Display for PaymentMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BookRoomArgs {
    pub room_id: i64,
    pub full_name: String,
    pub email: String,
    pub nights: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProcessPaymentArgs {
    pub booking_id: String,
    pub amount: f64,
    pub method: PaymentMethod,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CapabilityCall {
    ListRooms,
    BookRoom(BookRoomArgs),
    ProcessPayment(ProcessPaymentArgs),
}

impl CapabilityCall {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ListRooms => GET_ROOMS,
            Self::BookRoom(_) => BOOK_ROOM,
            Self::ProcessPayment(_) => PROCESS_PAYMENT,
        }
    }

    /// Validates a model tool request against the capability contract.
    pub fn parse(call: &ToolCall) -> Result<Self, ToolError> {
        let parsed = match call.name.as_str() {
            GET_ROOMS => parse_list_rooms(&call.arguments),
            BOOK_ROOM => parse_book_room(&call.arguments),
            PROCESS_PAYMENT => parse_process_payment(&call.arguments),
            other => Err(ToolError::not_found(format!(
                "capability '{other}' is not in the catalog"
            ))),
        };

        parsed.map_err(|error| {
            error
                .with_tool_name(call.name.clone())
                .with_tool_call_id(call.id.clone())
        })
    }
}

fn parse_list_rooms(arguments: &str) -> Result<CapabilityCall, ToolError> {
    // The model usually sends "{}" here; an empty string is tolerated too.
    if !arguments.trim().is_empty() {
        parse_json_object(arguments)?;
    }

    Ok(CapabilityCall::ListRooms)
}

fn parse_book_room(arguments: &str) -> Result<CapabilityCall, ToolError> {
    let args = parse_json_object(arguments)?;
    let room_id = required_i64(&args, "roomId")?;
    let full_name = required_string(&args, "fullName")?;
    let email = required_string(&args, "email")?;
    let nights = required_i64(&args, "nights")?;

    if nights < 1 {
        return Err(ToolError::invalid_arguments(
            "nights must be at least one",
        ));
    }

    Ok(CapabilityCall::BookRoom(BookRoomArgs {
        room_id,
        full_name,
        email,
        nights: nights as u32,
    }))
}

fn parse_process_payment(arguments: &str) -> Result<CapabilityCall, ToolError> {
    let args = parse_json_object(arguments)?;
    let booking_id = required_string(&args, "bookingId")?;
    let amount = required_f64(&args, "amount")?;
    let method = PaymentMethod::from_str(&required_string(&args, "method")?)?;

    Ok(CapabilityCall::ProcessPayment(ProcessPaymentArgs {
        booking_id,
        amount,
        method,
    }))
}
