//! Capability runtime context and execution result types.

use ccommon::{BookingId, MetadataMap, TraceId, UserId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapabilityContext {
    pub user_id: UserId,
    pub trace_id: Option<TraceId>,
    pub metadata: MetadataMap,
}

impl CapabilityContext {
    pub fn new(user_id: impl Into<UserId>) -> Self {
        Self {
            user_id: user_id.into(),
            trace_id: None,
            metadata: MetadataMap::new(),
        }
    }

    pub fn with_trace_id(mut self, trace_id: impl Into<TraceId>) -> Self {
        self.trace_id = Some(trace_id.into());
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// What a capability execution hands back to the dialogue loop.
///
/// `output` is the serialized result the model sees; `created_booking`
/// carries the id issued by the booking backend when a reservation was
/// recorded, so the orchestrator can echo it to the guest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapabilityOutcome {
    pub output: String,
    pub created_booking: Option<BookingId>,
}

impl CapabilityOutcome {
    pub fn new(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            created_booking: None,
        }
    }

    pub fn with_created_booking(mut self, booking_id: impl Into<BookingId>) -> Self {
        self.created_booking = Some(booking_id.into());
        self
    }
}
