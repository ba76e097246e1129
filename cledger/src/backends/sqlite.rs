use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use ccommon::{BookingId, BoxFuture, UserId};
use cprovider::{Message, Role, ToolCall};
use rusqlite::{Connection, OptionalExtension, params};

use crate::backend::LedgerBackend;
use crate::error::LedgerError;
use crate::types::{BookingRecord, UserProfile};

#[derive(Debug)]
pub struct SqliteLedgerBackend {
    connection: Mutex<Connection>,
}

impl SqliteLedgerBackend {
    pub fn new(path: impl AsRef<Path>) -> Result<Self, LedgerError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|error| {
                LedgerError::storage(format!(
                    "failed to create sqlite parent directory: {error}"
                ))
            })?;
        }

        let connection = Connection::open(path).map_err(|error| {
            LedgerError::storage(format!("failed to open sqlite database: {error}"))
        })?;
        Self::from_connection(connection)
    }

    pub fn new_in_memory() -> Result<Self, LedgerError> {
        let connection = Connection::open_in_memory().map_err(|error| {
            LedgerError::storage(format!("failed to open in-memory sqlite database: {error}"))
        })?;
        Self::from_connection(connection)
    }

    fn from_connection(connection: Connection) -> Result<Self, LedgerError> {
        connection
            .busy_timeout(Duration::from_secs(5))
            .map_err(|error| {
                LedgerError::storage(format!("failed to configure sqlite busy timeout: {error}"))
            })?;
        let backend = Self {
            connection: Mutex::new(connection),
        };
        backend.initialize_schema()?;
        Ok(backend)
    }

    fn connection(&self) -> Result<std::sync::MutexGuard<'_, Connection>, LedgerError> {
        self.connection
            .lock()
            .map_err(|_| LedgerError::storage("sqlite backend lock poisoned"))
    }

    fn initialize_schema(&self) -> Result<(), LedgerError> {
        let conn = self.connection()?;
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;

            CREATE TABLE IF NOT EXISTS users (
                user_id TEXT PRIMARY KEY,
                full_name TEXT,
                email TEXT,
                last_interaction_secs INTEGER NOT NULL,
                last_interaction_nanos INTEGER NOT NULL
            );

            CREATE TABLE IF NOT EXISTS conversation_messages (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id TEXT NOT NULL,
                role TEXT NOT NULL,
                content TEXT NOT NULL,
                tool_call_id TEXT,
                tool_call_name TEXT,
                tool_call_args TEXT,
                tool_name TEXT
            );

            CREATE INDEX IF NOT EXISTS idx_conversation_user_id
            ON conversation_messages(user_id, id);

            CREATE TABLE IF NOT EXISTS bookings (
                booking_id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                room_id INTEGER NOT NULL,
                check_in_secs INTEGER NOT NULL,
                check_in_nanos INTEGER NOT NULL,
                check_out_secs INTEGER NOT NULL,
                check_out_nanos INTEGER NOT NULL,
                total_amount REAL NOT NULL,
                is_paid INTEGER NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_bookings_user_id
            ON bookings(user_id);
            ",
        )
        .map_err(|error| {
            LedgerError::storage(format!("failed to initialize sqlite schema: {error}"))
        })?;

        Ok(())
    }
}

impl LedgerBackend for SqliteLedgerBackend {
    fn upsert_user<'a>(
        &'a self,
        user_id: &'a UserId,
        now: SystemTime,
    ) -> BoxFuture<'a, Result<UserProfile, LedgerError>> {
        Box::pin(async move {
            let conn = self.connection()?;
            let (secs, nanos) = encode_system_time(now)?;
            conn.execute(
                "
                INSERT INTO users (
                    user_id,
                    full_name,
                    email,
                    last_interaction_secs,
                    last_interaction_nanos
                )
                VALUES (?1, NULL, NULL, ?2, ?3)
                ON CONFLICT(user_id) DO UPDATE SET
                    last_interaction_secs = excluded.last_interaction_secs,
                    last_interaction_nanos = excluded.last_interaction_nanos
                ",
                params![user_id.as_str(), secs, nanos],
            )
            .map_err(|error| {
                LedgerError::storage(format!("failed to upsert user row: {error}"))
            })?;

            let profile = conn
                .query_row(
                    "
                    SELECT full_name, email, last_interaction_secs, last_interaction_nanos
                    FROM users
                    WHERE user_id = ?1
                    ",
                    params![user_id.as_str()],
                    |row| {
                        Ok((
                            row.get::<_, Option<String>>(0)?,
                            row.get::<_, Option<String>>(1)?,
                            row.get::<_, i64>(2)?,
                            row.get::<_, i64>(3)?,
                        ))
                    },
                )
                .map_err(|error| {
                    LedgerError::storage(format!("failed to read back user row: {error}"))
                })?;

            let (full_name, email, secs, nanos) = profile;
            Ok(UserProfile {
                user_id: user_id.clone(),
                full_name,
                email,
                last_interaction: decode_system_time(secs, nanos)?,
            })
        })
    }

    fn update_user_contact<'a>(
        &'a self,
        user_id: &'a UserId,
        full_name: &'a str,
        email: &'a str,
    ) -> BoxFuture<'a, Result<(), LedgerError>> {
        Box::pin(async move {
            let conn = self.connection()?;
            let updated = conn
                .execute(
                    "UPDATE users SET full_name = ?1, email = ?2 WHERE user_id = ?3",
                    params![full_name, email, user_id.as_str()],
                )
                .map_err(|error| {
                    LedgerError::storage(format!("failed to update user contact: {error}"))
                })?;

            if updated == 0 {
                return Err(LedgerError::not_found(format!(
                    "user '{user_id}' not found"
                )));
            }

            Ok(())
        })
    }

    fn load_user<'a>(
        &'a self,
        user_id: &'a UserId,
    ) -> BoxFuture<'a, Result<Option<UserProfile>, LedgerError>> {
        Box::pin(async move {
            let conn = self.connection()?;
            let row = conn
                .query_row(
                    "
                    SELECT full_name, email, last_interaction_secs, last_interaction_nanos
                    FROM users
                    WHERE user_id = ?1
                    ",
                    params![user_id.as_str()],
                    |row| {
                        Ok((
                            row.get::<_, Option<String>>(0)?,
                            row.get::<_, Option<String>>(1)?,
                            row.get::<_, i64>(2)?,
                            row.get::<_, i64>(3)?,
                        ))
                    },
                )
                .optional()
                .map_err(|error| {
                    LedgerError::storage(format!("failed to load user row: {error}"))
                })?;

            match row {
                Some((full_name, email, secs, nanos)) => Ok(Some(UserProfile {
                    user_id: user_id.clone(),
                    full_name,
                    email,
                    last_interaction: decode_system_time(secs, nanos)?,
                })),
                None => Ok(None),
            }
        })
    }

    fn load_conversation<'a>(
        &'a self,
        user_id: &'a UserId,
    ) -> BoxFuture<'a, Result<Vec<Message>, LedgerError>> {
        Box::pin(async move {
            let conn = self.connection()?;
            let mut stmt = conn
                .prepare(
                    "
                    SELECT role, content, tool_call_id, tool_call_name, tool_call_args, tool_name
                    FROM conversation_messages
                    WHERE user_id = ?1
                    ORDER BY id ASC
                    ",
                )
                .map_err(|error| {
                    LedgerError::storage(format!("failed to prepare conversation query: {error}"))
                })?;
            let rows = stmt
                .query_map(params![user_id.as_str()], |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, Option<String>>(2)?,
                        row.get::<_, Option<String>>(3)?,
                        row.get::<_, Option<String>>(4)?,
                        row.get::<_, Option<String>>(5)?,
                    ))
                })
                .map_err(|error| {
                    LedgerError::storage(format!("failed to query conversation rows: {error}"))
                })?;

            let mut messages = Vec::new();
            for row in rows {
                let (role, content, tool_call_id, tool_call_name, tool_call_args, tool_name) =
                    row.map_err(|error| {
                        LedgerError::storage(format!("failed to read conversation row: {error}"))
                    })?;

                let tool_call = match (tool_call_id, tool_call_name, tool_call_args) {
                    (Some(id), Some(name), Some(arguments)) => Some(ToolCall {
                        id,
                        name,
                        arguments,
                    }),
                    (None, None, None) => None,
                    _ => {
                        return Err(LedgerError::storage(
                            "conversation row has a partial tool call",
                        ));
                    }
                };

                messages.push(Message {
                    role: role_from_str(&role)?,
                    content,
                    tool_call,
                    tool_name,
                });
            }

            Ok(messages)
        })
    }

    fn append_conversation_messages<'a>(
        &'a self,
        user_id: &'a UserId,
        messages: Vec<Message>,
    ) -> BoxFuture<'a, Result<(), LedgerError>> {
        Box::pin(async move {
            let conn = self.connection()?;
            for message in messages {
                let (tool_call_id, tool_call_name, tool_call_args) = match &message.tool_call {
                    Some(call) => (
                        Some(call.id.as_str()),
                        Some(call.name.as_str()),
                        Some(call.arguments.as_str()),
                    ),
                    None => (None, None, None),
                };

                conn.execute(
                    "
                    INSERT INTO conversation_messages (
                        user_id,
                        role,
                        content,
                        tool_call_id,
                        tool_call_name,
                        tool_call_args,
                        tool_name
                    )
                    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                    ",
                    params![
                        user_id.as_str(),
                        role_to_str(message.role),
                        message.content,
                        tool_call_id,
                        tool_call_name,
                        tool_call_args,
                        message.tool_name,
                    ],
                )
                .map_err(|error| {
                    LedgerError::storage(format!("failed to append conversation message: {error}"))
                })?;
            }
            Ok(())
        })
    }

    fn insert_booking<'a>(
        &'a self,
        booking: BookingRecord,
    ) -> BoxFuture<'a, Result<(), LedgerError>> {
        Box::pin(async move {
            let conn = self.connection()?;
            let (check_in_secs, check_in_nanos) = encode_system_time(booking.check_in)?;
            let (check_out_secs, check_out_nanos) = encode_system_time(booking.check_out)?;
            conn.execute(
                "
                INSERT INTO bookings (
                    booking_id,
                    user_id,
                    room_id,
                    check_in_secs,
                    check_in_nanos,
                    check_out_secs,
                    check_out_nanos,
                    total_amount,
                    is_paid
                )
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
                ",
                params![
                    booking.booking_id.as_str(),
                    booking.user_id.as_str(),
                    booking.room_id,
                    check_in_secs,
                    check_in_nanos,
                    check_out_secs,
                    check_out_nanos,
                    booking.total_amount,
                    if booking.is_paid { 1_i64 } else { 0_i64 },
                ],
            )
            .map_err(|error| {
                LedgerError::storage(format!("failed to insert booking row: {error}"))
            })?;
            Ok(())
        })
    }

    fn load_booking<'a>(
        &'a self,
        booking_id: &'a BookingId,
    ) -> BoxFuture<'a, Result<Option<BookingRecord>, LedgerError>> {
        Box::pin(async move {
            let conn = self.connection()?;
            let row = conn
                .query_row(
                    "
                    SELECT
                        user_id,
                        room_id,
                        check_in_secs,
                        check_in_nanos,
                        check_out_secs,
                        check_out_nanos,
                        total_amount,
                        is_paid
                    FROM bookings
                    WHERE booking_id = ?1
                    ",
                    params![booking_id.as_str()],
                    |row| {
                        Ok((
                            row.get::<_, String>(0)?,
                            row.get::<_, i64>(1)?,
                            row.get::<_, i64>(2)?,
                            row.get::<_, i64>(3)?,
                            row.get::<_, i64>(4)?,
                            row.get::<_, i64>(5)?,
                            row.get::<_, f64>(6)?,
                            row.get::<_, i64>(7)?,
                        ))
                    },
                )
                .optional()
                .map_err(|error| {
                    LedgerError::storage(format!("failed to load booking row: {error}"))
                })?;

            match row {
                Some((
                    user_id,
                    room_id,
                    check_in_secs,
                    check_in_nanos,
                    check_out_secs,
                    check_out_nanos,
                    total_amount,
                    is_paid,
                )) => Ok(Some(BookingRecord {
                    booking_id: booking_id.clone(),
                    user_id: UserId::from(user_id),
                    room_id,
                    check_in: decode_system_time(check_in_secs, check_in_nanos)?,
                    check_out: decode_system_time(check_out_secs, check_out_nanos)?,
                    total_amount,
                    is_paid: is_paid != 0,
                })),
                None => Ok(None),
            }
        })
    }

    fn mark_booking_paid<'a>(
        &'a self,
        booking_id: &'a BookingId,
    ) -> BoxFuture<'a, Result<bool, LedgerError>> {
        Box::pin(async move {
            let conn = self.connection()?;
            let updated = conn
                .execute(
                    "UPDATE bookings SET is_paid = 1 WHERE booking_id = ?1",
                    params![booking_id.as_str()],
                )
                .map_err(|error| {
                    LedgerError::storage(format!("failed to mark booking paid: {error}"))
                })?;
            Ok(updated > 0)
        })
    }
}

fn encode_system_time(value: SystemTime) -> Result<(i64, i64), LedgerError> {
    let duration = value.duration_since(UNIX_EPOCH).map_err(|error| {
        LedgerError::invalid_request(format!("timestamp predates unix epoch: {error}"))
    })?;
    Ok((
        duration.as_secs() as i64,
        i64::from(duration.subsec_nanos()),
    ))
}

fn decode_system_time(seconds: i64, nanos: i64) -> Result<SystemTime, LedgerError> {
    if seconds < 0 {
        return Err(LedgerError::storage(format!(
            "timestamp seconds must be non-negative, got {seconds}"
        )));
    }
    if !(0..1_000_000_000).contains(&nanos) {
        return Err(LedgerError::storage(format!(
            "timestamp nanos must be in [0, 1_000_000_000), got {nanos}"
        )));
    }
    Ok(UNIX_EPOCH + Duration::new(seconds as u64, nanos as u32))
}

fn role_to_str(role: Role) -> &'static str {
    match role {
        Role::System => "system",
        Role::User => "user",
        Role::Assistant => "assistant",
        Role::Tool => "tool",
    }
}

fn role_from_str(value: &str) -> Result<Role, LedgerError> {
    match value {
        "system" => Ok(Role::System),
        "user" => Ok(Role::User),
        "assistant" => Ok(Role::Assistant),
        "tool" => Ok(Role::Tool),
        _ => Err(LedgerError::storage(format!(
            "unknown conversation role value '{value}'"
        ))),
    }
}

pub(crate) fn default_sqlite_path() -> PathBuf {
    if let Some(explicit) = std::env::var_os("CONCIERGE_SQLITE_PATH") {
        return PathBuf::from(explicit);
    }

    if let Some(home) = std::env::var_os("HOME").or_else(|| std::env::var_os("USERPROFILE")) {
        return PathBuf::from(home)
            .join(".concierge")
            .join("cledger.sqlite3");
    }

    PathBuf::from("cledger.sqlite3")
}
