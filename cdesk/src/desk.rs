//! Front-desk capability router: executes validated capability calls
//! against the inventory backend, the payment gateway, and the ledger.

use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime};

use ccommon::BookingId;
use cledger::{BookingRecord, LedgerBackend};
use ctooling::{
    BookRoomArgs, CapabilityCall, CapabilityContext, CapabilityOutcome, CapabilityRuntime,
    CapabilityRuntimeHooks, NoopCapabilityRuntimeHooks, ProcessPaymentArgs, ToolError, ToolFuture,
};
use serde_json::json;

use crate::inventory::InventoryApi;
use crate::payment::{PaymentGateway, PaymentOutcome};
use crate::types::CreateBookingRequest;

const SECONDS_PER_DAY: u64 = 86_400;

#[derive(Clone)]
pub struct FrontDesk {
    inventory: Arc<dyn InventoryApi>,
    gateway: Arc<dyn PaymentGateway>,
    ledger: Arc<dyn LedgerBackend>,
    hooks: Arc<dyn CapabilityRuntimeHooks>,
}

impl FrontDesk {
    pub fn new(
        inventory: Arc<dyn InventoryApi>,
        gateway: Arc<dyn PaymentGateway>,
        ledger: Arc<dyn LedgerBackend>,
    ) -> Self {
        Self {
            inventory,
            gateway,
            ledger,
            hooks: Arc::new(NoopCapabilityRuntimeHooks),
        }
    }

    pub fn with_hooks(mut self, hooks: Arc<dyn CapabilityRuntimeHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    /// Fetches the room listing, degrading to an empty list when the
    /// inventory backend is unreachable so the conversation stays alive.
    async fn list_rooms(
        &self,
        call: &CapabilityCall,
        context: &CapabilityContext,
    ) -> Result<CapabilityOutcome, ToolError> {
        match self.inventory.list_rooms().await {
            Ok(rooms) => {
                let output = serde_json::to_string(&rooms).map_err(|err| {
                    ToolError::execution(format!("failed to serialize room listing: {err}"))
                })?;
                Ok(CapabilityOutcome::new(output))
            }
            Err(error) => {
                self.hooks
                    .on_soft_degrade(call, context, &error.to_string());
                Ok(CapabilityOutcome::new("[]"))
            }
        }
    }

    /// Reserves a room and records the booking. A backend failure yields
    /// a `null` result rather than an error; the model tells the guest
    /// the booking failed.
    async fn book_room(
        &self,
        call: &CapabilityCall,
        context: &CapabilityContext,
        args: &BookRoomArgs,
    ) -> Result<CapabilityOutcome, ToolError> {
        let request = CreateBookingRequest {
            room_id: args.room_id,
            full_name: args.full_name.clone(),
            email: args.email.clone(),
            nights: args.nights,
        };

        let confirmation = match self.inventory.create_booking(request).await {
            Ok(confirmation) => confirmation,
            Err(error) => {
                self.hooks
                    .on_soft_degrade(call, context, &error.to_string());
                return Ok(CapabilityOutcome::new("null"));
            }
        };

        let check_in = SystemTime::now();
        let check_out = check_in + Duration::from_secs(u64::from(args.nights) * SECONDS_PER_DAY);
        let booking = BookingRecord {
            booking_id: BookingId::from(confirmation.booking_id.clone()),
            user_id: context.user_id.clone(),
            room_id: args.room_id,
            check_in,
            check_out,
            total_amount: confirmation.total_price,
            is_paid: false,
        };

        self.ledger
            .insert_booking(booking)
            .await
            .map_err(|error| ToolError::execution(error.to_string()))?;
        self.ledger
            .update_user_contact(&context.user_id, &args.full_name, &args.email)
            .await
            .map_err(|error| ToolError::execution(error.to_string()))?;

        let output = serde_json::to_string(&confirmation).map_err(|err| {
            ToolError::execution(format!("failed to serialize booking confirmation: {err}"))
        })?;

        Ok(CapabilityOutcome::new(output)
            .with_created_booking(BookingId::from(confirmation.booking_id)))
    }

    /// Runs the simulated gateway round trip. Both approval and decline
    /// are ordinary results; only the approval mutates the ledger.
    async fn process_payment(
        &self,
        call: &CapabilityCall,
        context: &CapabilityContext,
        args: &ProcessPaymentArgs,
    ) -> Result<CapabilityOutcome, ToolError> {
        let outcome = self
            .gateway
            .charge(&args.booking_id, args.amount, args.method)
            .await;

        let output = match outcome {
            PaymentOutcome::Approved { transaction_id } => {
                let booking_id = BookingId::from(args.booking_id.clone());
                let found = self
                    .ledger
                    .mark_booking_paid(&booking_id)
                    .await
                    .map_err(|error| ToolError::execution(error.to_string()))?;
                if !found {
                    self.hooks.on_soft_degrade(
                        call,
                        context,
                        &format!("booking '{booking_id}' not on ledger"),
                    );
                }

                json!({
                    "status": "success",
                    "message": format!(
                        "Payment of ${} processed via {}. Transaction ID: {}",
                        args.amount, args.method, transaction_id
                    ),
                })
            }
            PaymentOutcome::Declined => json!({
                "status": "failed",
                "message": "Payment processing failed. Please try again.",
            }),
        };

        Ok(CapabilityOutcome::new(output.to_string()))
    }
}

impl CapabilityRuntime for FrontDesk {
    fn execute<'a>(
        &'a self,
        call: CapabilityCall,
        context: CapabilityContext,
    ) -> ToolFuture<'a, Result<CapabilityOutcome, ToolError>> {
        Box::pin(async move {
            self.hooks.on_execution_start(&call, &context);
            let started = Instant::now();

            let result = match &call {
                CapabilityCall::ListRooms => self.list_rooms(&call, &context).await,
                CapabilityCall::BookRoom(args) => self.book_room(&call, &context, args).await,
                CapabilityCall::ProcessPayment(args) => {
                    self.process_payment(&call, &context, args).await
                }
            };

            let elapsed = started.elapsed();
            match &result {
                Ok(outcome) => {
                    self.hooks
                        .on_execution_success(&call, &context, outcome, elapsed);
                }
                Err(error) => {
                    self.hooks
                        .on_execution_failure(&call, &context, error, elapsed);
                }
            }

            result.map_err(|error| error.with_tool_name(call.name()))
        })
    }
}
