//! Persisted guest and booking record types.

use std::time::SystemTime;

use ccommon::{BookingId, UserId};

/// A guest known to the assistant. Created on first contact; only
/// `last_interaction` is touched on subsequent turns until a booking
/// supplies a name and email.
#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    pub user_id: UserId,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub last_interaction: SystemTime,
}

impl UserProfile {
    pub fn new(user_id: impl Into<UserId>, last_interaction: SystemTime) -> Self {
        Self {
            user_id: user_id.into(),
            full_name: None,
            email: None,
            last_interaction,
        }
    }
}

/// A reservation recorded after the booking backend confirms it.
///
/// `is_paid` only ever moves false to true.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingRecord {
    pub booking_id: BookingId,
    pub user_id: UserId,
    pub room_id: i64,
    pub check_in: SystemTime,
    pub check_out: SystemTime,
    pub total_amount: f64,
    pub is_paid: bool,
}
