use std::sync::Arc;
use std::time::Duration;

use ccommon::{BookingId, BoxFuture, UserId};
use cdesk::{
    BookingConfirmation, CreateBookingRequest, InventoryApi, InventoryError, Room,
    SimulatedPaymentGateway,
};
use concierge::prelude::*;
use cprovider::adapters::openai::{
    OpenAiAssistantMessage, OpenAiAuth, OpenAiFinishReason, OpenAiRequest, OpenAiResponse,
    OpenAiRole, OpenAiToolCall, OpenAiTransport, OpenAiUsage,
};
use cprovider::{OpenAiProvider, ProviderFuture, SecureCredentialManager};

/// Scripts the model: with tools offered it requests the capability the
/// guest asked for; on the wrap-up call it restates the capability result.
#[derive(Debug)]
struct ScriptedTransport;

impl OpenAiTransport for ScriptedTransport {
    fn complete<'a>(
        &'a self,
        request: OpenAiRequest,
        _auth: OpenAiAuth,
    ) -> ProviderFuture<'a, Result<OpenAiResponse, cprovider::ProviderError>> {
        Box::pin(async move {
            let message = if request.tools.is_empty() {
                let tool_output = request
                    .messages
                    .iter()
                    .rev()
                    .find(|message| message.role == OpenAiRole::Tool)
                    .map(|message| message.content.clone())
                    .unwrap_or_default();

                OpenAiAssistantMessage {
                    content: format!("Here is what I found: {tool_output}"),
                    tool_calls: Vec::new(),
                }
            } else {
                let guest_text = request
                    .messages
                    .iter()
                    .rev()
                    .find(|message| message.role == OpenAiRole::User)
                    .map(|message| message.content.clone())
                    .unwrap_or_default();

                let tool_call = if guest_text.contains("pay") {
                    OpenAiToolCall {
                        id: "call_pay".to_string(),
                        name: "process_payment".to_string(),
                        arguments:
                            r#"{"bookingId":"BK-2001","amount":300,"method":"paypal"}"#.to_string(),
                    }
                } else if guest_text.contains("book") {
                    OpenAiToolCall {
                        id: "call_book".to_string(),
                        name: "book_room".to_string(),
                        arguments:
                            r#"{"roomId":1,"fullName":"Jane Doe","email":"jane@x.com","nights":3}"#
                                .to_string(),
                    }
                } else {
                    OpenAiToolCall {
                        id: "call_rooms".to_string(),
                        name: "get_rooms".to_string(),
                        arguments: "{}".to_string(),
                    }
                };

                OpenAiAssistantMessage {
                    content: "One moment.".to_string(),
                    tool_calls: vec![tool_call],
                }
            };

            Ok(OpenAiResponse {
                model: request.model,
                message,
                finish_reason: OpenAiFinishReason::Stop,
                usage: OpenAiUsage {
                    prompt_tokens: 0,
                    completion_tokens: 0,
                    total_tokens: 0,
                },
            })
        })
    }
}

#[derive(Debug, Default)]
struct FakeInventory;

impl InventoryApi for FakeInventory {
    fn list_rooms<'a>(&'a self) -> BoxFuture<'a, Result<Vec<Room>, InventoryError>> {
        Box::pin(async move {
            Ok(vec![Room {
                room_id: 1,
                name: "Deluxe".to_string(),
                price: 100.0,
                extra: serde_json::Map::new(),
            }])
        })
    }

    fn create_booking<'a>(
        &'a self,
        request: CreateBookingRequest,
    ) -> BoxFuture<'a, Result<BookingConfirmation, InventoryError>> {
        Box::pin(async move {
            Ok(BookingConfirmation {
                booking_id: "BK-2001".to_string(),
                total_price: 100.0 * f64::from(request.nights),
                extra: serde_json::Map::new(),
            })
        })
    }
}

fn scripted_provider() -> Arc<dyn ModelProvider> {
    let credentials = Arc::new(SecureCredentialManager::new());
    credentials
        .set_openai_api_key("sk-test")
        .expect("key should set");
    Arc::new(OpenAiProvider::new(credentials, Arc::new(ScriptedTransport)))
}

fn bundle_with_gateway(success_rate: f64) -> ConciergeBundle {
    ConciergeBuilder::new(scripted_provider())
        .ledger(Arc::new(InMemoryLedgerBackend::new()))
        .inventory(Arc::new(FakeInventory))
        .gateway(Arc::new(
            SimulatedPaymentGateway::new()
                .with_success_rate(success_rate)
                .with_latency(Duration::from_millis(1)),
        ))
        .build()
        .expect("bundle should build")
}

#[tokio::test]
async fn room_listing_flow_mentions_the_deluxe_room() {
    let bundle = bundle_with_gateway(1.0);

    let result = bundle
        .service
        .run_turn(TurnRequest::new("guest-1", "show me rooms"))
        .await
        .expect("listing turn should succeed");

    assert_eq!(result.capability.as_deref(), Some("get_rooms"));
    assert!(result.reply.contains("Deluxe"));
}

#[tokio::test]
async fn booking_then_payment_flow_round_trips_the_ledger() {
    let bundle = bundle_with_gateway(1.0);
    let user_id = UserId::from("guest-2");

    let booking_turn = bundle
        .service
        .run_turn(TurnRequest::new(
            "guest-2",
            "book the deluxe for 3 nights, Jane Doe, jane@x.com",
        ))
        .await
        .expect("booking turn should succeed");

    assert_eq!(booking_turn.capability.as_deref(), Some("book_room"));
    assert!(booking_turn.reply.contains("BK-2001"));

    let booking = bundle
        .ledger
        .load_booking(&BookingId::from("BK-2001"))
        .await
        .expect("load should work")
        .expect("booking should exist");
    assert_eq!(booking.user_id, user_id);
    assert!(!booking.is_paid);
    assert_eq!(
        booking
            .check_out
            .duration_since(booking.check_in)
            .expect("check_out after check_in"),
        Duration::from_secs(3 * 86_400)
    );

    let profile = bundle
        .ledger
        .load_user(&user_id)
        .await
        .expect("load should work")
        .expect("user should exist");
    assert_eq!(profile.full_name.as_deref(), Some("Jane Doe"));

    let payment_turn = bundle
        .service
        .run_turn(TurnRequest::new("guest-2", "pay with paypal"))
        .await
        .expect("payment turn should succeed");

    assert_eq!(payment_turn.capability.as_deref(), Some("process_payment"));
    assert!(payment_turn.reply.contains("success"));
    assert!(payment_turn.reply.contains("Transaction ID"));

    let paid = bundle
        .ledger
        .load_booking(&BookingId::from("BK-2001"))
        .await
        .expect("load should work")
        .expect("booking should exist");
    assert!(paid.is_paid);

    let history = bundle
        .ledger
        .load_conversation(&user_id)
        .await
        .expect("load should work");
    assert_eq!(history.len(), 8);
    assert_eq!(history[1].content, "One moment. Your booking ID is BK-2001.");
}

#[tokio::test]
async fn declined_payment_leaves_the_booking_unpaid() {
    let bundle = bundle_with_gateway(0.0);

    bundle
        .service
        .run_turn(TurnRequest::new("guest-3", "book the deluxe please"))
        .await
        .expect("booking turn should succeed");

    let payment_turn = bundle
        .service
        .run_turn(TurnRequest::new("guest-3", "pay with paypal"))
        .await
        .expect("declined payment is still a reply");

    assert!(payment_turn.reply.contains("failed"));

    let booking = bundle
        .ledger
        .load_booking(&BookingId::from("BK-2001"))
        .await
        .expect("load should work")
        .expect("booking should exist");
    assert!(!booking.is_paid);
}
