use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime};

use ccommon::{BookingId, BoxFuture, UserId};
use cdesk::{
    BookingConfirmation, CreateBookingRequest, FrontDesk, InventoryApi, InventoryError,
    PaymentGateway, PaymentOutcome, Room,
};
use cledger::{InMemoryLedgerBackend, LedgerBackend};
use ctooling::{
    BookRoomArgs, CapabilityCall, CapabilityContext, CapabilityRuntime, PaymentMethod,
    ProcessPaymentArgs,
};

#[derive(Default)]
struct FakeInventory {
    rooms: Vec<Room>,
    fail_rooms: bool,
    fail_booking: bool,
    captured_booking: Mutex<Option<CreateBookingRequest>>,
}

impl FakeInventory {
    fn with_deluxe_room() -> Self {
        Self {
            rooms: vec![Room {
                room_id: 1,
                name: "Deluxe".to_string(),
                price: 100.0,
                extra: serde_json::Map::new(),
            }],
            ..Self::default()
        }
    }
}

impl InventoryApi for FakeInventory {
    fn list_rooms<'a>(&'a self) -> BoxFuture<'a, Result<Vec<Room>, InventoryError>> {
        Box::pin(async move {
            if self.fail_rooms {
                return Err(InventoryError::transport("connection refused"));
            }
            Ok(self.rooms.clone())
        })
    }

    fn create_booking<'a>(
        &'a self,
        request: CreateBookingRequest,
    ) -> BoxFuture<'a, Result<BookingConfirmation, InventoryError>> {
        Box::pin(async move {
            if self.fail_booking {
                return Err(InventoryError::status("booking request failed with status 503"));
            }

            let total_price = 100.0 * f64::from(request.nights);
            *self.captured_booking.lock().expect("booking lock") = Some(request);

            Ok(BookingConfirmation {
                booking_id: "BK-2001".to_string(),
                total_price,
                extra: serde_json::Map::new(),
            })
        })
    }
}

struct FakeGateway {
    outcome: PaymentOutcome,
}

impl PaymentGateway for FakeGateway {
    fn charge<'a>(
        &'a self,
        _booking_id: &'a str,
        _amount: f64,
        _method: PaymentMethod,
    ) -> BoxFuture<'a, PaymentOutcome> {
        let outcome = self.outcome.clone();
        Box::pin(async move { outcome })
    }
}

fn approved_gateway() -> Arc<FakeGateway> {
    Arc::new(FakeGateway {
        outcome: PaymentOutcome::Approved {
            transaction_id: "A1B2C3D4E".to_string(),
        },
    })
}

fn declined_gateway() -> Arc<FakeGateway> {
    Arc::new(FakeGateway {
        outcome: PaymentOutcome::Declined,
    })
}

fn context() -> CapabilityContext {
    CapabilityContext::new("guest-1")
}

async fn seeded_ledger() -> Arc<InMemoryLedgerBackend> {
    let ledger = Arc::new(InMemoryLedgerBackend::new());
    ledger
        .upsert_user(&UserId::from("guest-1"), SystemTime::now())
        .await
        .expect("user should upsert");
    ledger
}

#[tokio::test]
async fn list_rooms_serializes_listing_and_mutates_nothing() {
    let ledger = seeded_ledger().await;
    let desk = FrontDesk::new(
        Arc::new(FakeInventory::with_deluxe_room()),
        approved_gateway(),
        ledger.clone(),
    );

    let outcome = desk
        .execute(CapabilityCall::ListRooms, context())
        .await
        .expect("listing should succeed");

    assert!(outcome.output.contains("Deluxe"));
    assert_eq!(outcome.created_booking, None);

    let history = ledger
        .load_conversation(&UserId::from("guest-1"))
        .await
        .expect("load should work");
    assert!(history.is_empty());
}

#[tokio::test]
async fn list_rooms_degrades_to_empty_on_transport_failure() {
    let inventory = FakeInventory {
        fail_rooms: true,
        ..FakeInventory::default()
    };
    let desk = FrontDesk::new(Arc::new(inventory), approved_gateway(), seeded_ledger().await);

    let outcome = desk
        .execute(CapabilityCall::ListRooms, context())
        .await
        .expect("degraded listing should still succeed");
    assert_eq!(outcome.output, "[]");
}

#[tokio::test]
async fn book_room_records_booking_with_computed_check_out() {
    let ledger = seeded_ledger().await;
    let inventory = Arc::new(FakeInventory::with_deluxe_room());
    let desk = FrontDesk::new(inventory.clone(), approved_gateway(), ledger.clone());

    let before = SystemTime::now();
    let outcome = desk
        .execute(
            CapabilityCall::BookRoom(BookRoomArgs {
                room_id: 1,
                full_name: "Jane Doe".to_string(),
                email: "jane@x.com".to_string(),
                nights: 3,
            }),
            context(),
        )
        .await
        .expect("booking should succeed");

    assert!(outcome.output.contains("BK-2001"));
    assert_eq!(outcome.created_booking, Some(BookingId::from("BK-2001")));

    let sent = inventory
        .captured_booking
        .lock()
        .expect("booking lock")
        .clone()
        .expect("request should be captured");
    assert_eq!(sent.full_name, "Jane Doe");
    assert_eq!(sent.nights, 3);

    let booking = ledger
        .load_booking(&BookingId::from("BK-2001"))
        .await
        .expect("load should work")
        .expect("booking should exist");
    assert_eq!(booking.user_id, UserId::from("guest-1"));
    assert_eq!(booking.room_id, 1);
    assert_eq!(booking.total_amount, 300.0);
    assert!(!booking.is_paid);

    let stay = booking
        .check_out
        .duration_since(booking.check_in)
        .expect("check_out should follow check_in");
    assert_eq!(stay, Duration::from_secs(3 * 86_400));
    assert!(booking.check_in >= before);

    let profile = ledger
        .load_user(&UserId::from("guest-1"))
        .await
        .expect("load should work")
        .expect("user should exist");
    assert_eq!(profile.full_name.as_deref(), Some("Jane Doe"));
    assert_eq!(profile.email.as_deref(), Some("jane@x.com"));
}

#[tokio::test]
async fn failed_booking_returns_null_and_records_nothing() {
    let ledger = seeded_ledger().await;
    let inventory = FakeInventory {
        fail_booking: true,
        ..FakeInventory::default()
    };
    let desk = FrontDesk::new(Arc::new(inventory), approved_gateway(), ledger.clone());

    let outcome = desk
        .execute(
            CapabilityCall::BookRoom(BookRoomArgs {
                room_id: 1,
                full_name: "Jane Doe".to_string(),
                email: "jane@x.com".to_string(),
                nights: 2,
            }),
            context(),
        )
        .await
        .expect("soft failure should not error");

    assert_eq!(outcome.output, "null");
    assert_eq!(outcome.created_booking, None);
    let booking = ledger
        .load_booking(&BookingId::from("BK-2001"))
        .await
        .expect("load should work");
    assert!(booking.is_none());
}

async fn ledger_with_unpaid_booking() -> Arc<InMemoryLedgerBackend> {
    let ledger = seeded_ledger().await;
    let check_in = SystemTime::now();
    ledger
        .insert_booking(cledger::BookingRecord {
            booking_id: BookingId::from("BK-2001"),
            user_id: UserId::from("guest-1"),
            room_id: 1,
            check_in,
            check_out: check_in + Duration::from_secs(3 * 86_400),
            total_amount: 300.0,
            is_paid: false,
        })
        .await
        .expect("insert should work");
    ledger
}

#[tokio::test]
async fn approved_payment_flips_is_paid_and_reports_transaction() {
    let ledger = ledger_with_unpaid_booking().await;
    let desk = FrontDesk::new(
        Arc::new(FakeInventory::default()),
        approved_gateway(),
        ledger.clone(),
    );

    let outcome = desk
        .execute(
            CapabilityCall::ProcessPayment(ProcessPaymentArgs {
                booking_id: "BK-2001".to_string(),
                amount: 300.0,
                method: PaymentMethod::Paypal,
            }),
            context(),
        )
        .await
        .expect("payment should succeed");

    assert!(outcome.output.contains("success"));
    assert!(outcome.output.contains("Transaction ID: A1B2C3D4E"));
    assert!(outcome.output.contains("$300"));
    assert!(outcome.output.contains("paypal"));

    let booking = ledger
        .load_booking(&BookingId::from("BK-2001"))
        .await
        .expect("load should work")
        .expect("booking should exist");
    assert!(booking.is_paid);
    assert_eq!(booking.total_amount, 300.0);
}

#[tokio::test]
async fn declined_payment_leaves_booking_unpaid() {
    let ledger = ledger_with_unpaid_booking().await;
    let desk = FrontDesk::new(
        Arc::new(FakeInventory::default()),
        declined_gateway(),
        ledger.clone(),
    );

    let outcome = desk
        .execute(
            CapabilityCall::ProcessPayment(ProcessPaymentArgs {
                booking_id: "BK-2001".to_string(),
                amount: 300.0,
                method: PaymentMethod::DebitCard,
            }),
            context(),
        )
        .await
        .expect("declined payment is still a result");

    assert!(outcome.output.contains("failed"));
    assert!(outcome.output.contains("Please try again"));

    let booking = ledger
        .load_booking(&BookingId::from("BK-2001"))
        .await
        .expect("load should work")
        .expect("booking should exist");
    assert!(!booking.is_paid);
}
