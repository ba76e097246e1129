//! Ledger backend trait and in-memory backend implementation.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::SystemTime;

use ccommon::{BookingId, BoxFuture, UserId};
use cprovider::Message;

use crate::backends::sqlite::default_sqlite_path;
use crate::error::LedgerError;
use crate::types::{BookingRecord, UserProfile};

pub use crate::backends::sqlite::SqliteLedgerBackend;

/// Persistence seam for the dialogue loop and the capability adapters.
///
/// Conversation order is canonical: `load_conversation` must return
/// messages exactly as appended, and `mark_booking_paid` is a monotonic
/// false-to-true flip that reports whether the booking existed.
pub trait LedgerBackend: Send + Sync {
    fn upsert_user<'a>(
        &'a self,
        user_id: &'a UserId,
        now: SystemTime,
    ) -> BoxFuture<'a, Result<UserProfile, LedgerError>>;

    fn update_user_contact<'a>(
        &'a self,
        user_id: &'a UserId,
        full_name: &'a str,
        email: &'a str,
    ) -> BoxFuture<'a, Result<(), LedgerError>>;

    fn load_user<'a>(
        &'a self,
        user_id: &'a UserId,
    ) -> BoxFuture<'a, Result<Option<UserProfile>, LedgerError>>;

    fn load_conversation<'a>(
        &'a self,
        user_id: &'a UserId,
    ) -> BoxFuture<'a, Result<Vec<Message>, LedgerError>>;

    fn append_conversation_messages<'a>(
        &'a self,
        user_id: &'a UserId,
        messages: Vec<Message>,
    ) -> BoxFuture<'a, Result<(), LedgerError>>;

    fn insert_booking<'a>(
        &'a self,
        booking: BookingRecord,
    ) -> BoxFuture<'a, Result<(), LedgerError>>;

    fn load_booking<'a>(
        &'a self,
        booking_id: &'a BookingId,
    ) -> BoxFuture<'a, Result<Option<BookingRecord>, LedgerError>>;

    fn mark_booking_paid<'a>(
        &'a self,
        booking_id: &'a BookingId,
    ) -> BoxFuture<'a, Result<bool, LedgerError>>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerBackendConfig {
    Sqlite { path: PathBuf },
    InMemory,
}

impl Default for LedgerBackendConfig {
    fn default() -> Self {
        Self::Sqlite {
            path: default_sqlite_path(),
        }
    }
}

pub fn create_ledger_backend(
    config: LedgerBackendConfig,
) -> Result<Arc<dyn LedgerBackend>, LedgerError> {
    match config {
        LedgerBackendConfig::Sqlite { path } => Ok(Arc::new(SqliteLedgerBackend::new(path)?)),
        LedgerBackendConfig::InMemory => Ok(Arc::new(InMemoryLedgerBackend::new())),
    }
}

pub fn create_default_ledger_backend() -> Result<Arc<dyn LedgerBackend>, LedgerError> {
    create_ledger_backend(LedgerBackendConfig::default())
}

#[derive(Debug, Default)]
struct LedgerState {
    users: HashMap<UserId, UserProfile>,
    conversations: HashMap<UserId, Vec<Message>>,
    bookings: HashMap<BookingId, BookingRecord>,
}

#[derive(Debug, Default)]
pub struct InMemoryLedgerBackend {
    state: Mutex<LedgerState>,
}

impl InMemoryLedgerBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> Result<std::sync::MutexGuard<'_, LedgerState>, LedgerError> {
        self.state
            .lock()
            .map_err(|_| LedgerError::storage("ledger backend lock poisoned"))
    }
}

impl LedgerBackend for InMemoryLedgerBackend {
    fn upsert_user<'a>(
        &'a self,
        user_id: &'a UserId,
        now: SystemTime,
    ) -> BoxFuture<'a, Result<UserProfile, LedgerError>> {
        Box::pin(async move {
            let mut state = self.state()?;
            let profile = state
                .users
                .entry(user_id.clone())
                .or_insert_with(|| UserProfile::new(user_id.clone(), now));
            profile.last_interaction = now;
            Ok(profile.clone())
        })
    }

    fn update_user_contact<'a>(
        &'a self,
        user_id: &'a UserId,
        full_name: &'a str,
        email: &'a str,
    ) -> BoxFuture<'a, Result<(), LedgerError>> {
        Box::pin(async move {
            let mut state = self.state()?;
            let Some(profile) = state.users.get_mut(user_id) else {
                return Err(LedgerError::not_found(format!(
                    "user '{user_id}' not found"
                )));
            };

            profile.full_name = Some(full_name.to_string());
            profile.email = Some(email.to_string());
            Ok(())
        })
    }

    fn load_user<'a>(
        &'a self,
        user_id: &'a UserId,
    ) -> BoxFuture<'a, Result<Option<UserProfile>, LedgerError>> {
        Box::pin(async move { Ok(self.state()?.users.get(user_id).cloned()) })
    }

    fn load_conversation<'a>(
        &'a self,
        user_id: &'a UserId,
    ) -> BoxFuture<'a, Result<Vec<Message>, LedgerError>> {
        Box::pin(async move {
            Ok(self
                .state()?
                .conversations
                .get(user_id)
                .cloned()
                .unwrap_or_default())
        })
    }

    fn append_conversation_messages<'a>(
        &'a self,
        user_id: &'a UserId,
        messages: Vec<Message>,
    ) -> BoxFuture<'a, Result<(), LedgerError>> {
        Box::pin(async move {
            self.state()?
                .conversations
                .entry(user_id.clone())
                .or_default()
                .extend(messages);
            Ok(())
        })
    }

    fn insert_booking<'a>(
        &'a self,
        booking: BookingRecord,
    ) -> BoxFuture<'a, Result<(), LedgerError>> {
        Box::pin(async move {
            self.state()?
                .bookings
                .insert(booking.booking_id.clone(), booking);
            Ok(())
        })
    }

    fn load_booking<'a>(
        &'a self,
        booking_id: &'a BookingId,
    ) -> BoxFuture<'a, Result<Option<BookingRecord>, LedgerError>> {
        Box::pin(async move { Ok(self.state()?.bookings.get(booking_id).cloned()) })
    }

    fn mark_booking_paid<'a>(
        &'a self,
        booking_id: &'a BookingId,
    ) -> BoxFuture<'a, Result<bool, LedgerError>> {
        Box::pin(async move {
            let mut state = self.state()?;
            match state.bookings.get_mut(booking_id) {
                Some(booking) => {
                    booking.is_paid = true;
                    Ok(true)
                }
                None => Ok(false),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, UNIX_EPOCH};

    use cprovider::{Message, Role};

    use super::*;

    #[tokio::test]
    async fn upsert_creates_then_touches_user() {
        let backend = InMemoryLedgerBackend::new();
        let user_id = UserId::from("guest-1");

        let first_seen = UNIX_EPOCH + Duration::from_secs(1_000);
        let created = backend
            .upsert_user(&user_id, first_seen)
            .await
            .expect("upsert should work");
        assert_eq!(created.last_interaction, first_seen);
        assert_eq!(created.full_name, None);

        let later = first_seen + Duration::from_secs(60);
        let touched = backend
            .upsert_user(&user_id, later)
            .await
            .expect("touch should work");
        assert_eq!(touched.last_interaction, later);
    }

    #[tokio::test]
    async fn conversation_append_preserves_order() {
        let backend = InMemoryLedgerBackend::new();
        let user_id = UserId::from("guest-2");

        backend
            .append_conversation_messages(
                &user_id,
                vec![
                    Message::new(Role::User, "one"),
                    Message::new(Role::Assistant, "two"),
                ],
            )
            .await
            .expect("append should work");
        backend
            .append_conversation_messages(&user_id, vec![Message::new(Role::User, "three")])
            .await
            .expect("append should work");

        let history = backend
            .load_conversation(&user_id)
            .await
            .expect("load should work");
        let contents: Vec<&str> = history.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["one", "two", "three"]);
    }

    #[tokio::test]
    async fn mark_booking_paid_reports_missing_booking() {
        let backend = InMemoryLedgerBackend::new();
        let found = backend
            .mark_booking_paid(&BookingId::from("BK-404"))
            .await
            .expect("flip should not error");
        assert!(!found);
    }
}
