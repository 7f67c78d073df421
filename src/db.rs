//! Database module
//!
//! `SQLite` persistence for dialogue state, support tickets and the audit
//! trail (inbound messages and flow events).

mod schema;

pub use schema::*;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Invalid state JSON: {0}")]
    StateEncoding(#[from] serde_json::Error),
    #[error("Ticket not found: {0}")]
    TicketNotFound(String),
    #[error("Database lock poisoned")]
    LockPoisoned,
}

pub type DbResult<T> = Result<T, DbError>;

/// Thread-safe database handle
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open or create database at the given path
    pub fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        let conn = Connection::open(path)?;
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.run_migrations()?;
        Ok(db)
    }

    /// Open an in-memory database (for testing)
    #[allow(dead_code)] // Used in tests
    pub fn open_in_memory() -> DbResult<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.run_migrations()?;
        Ok(db)
    }

    fn run_migrations(&self) -> DbResult<()> {
        let conn = self.lock()?;
        conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    fn lock(&self) -> DbResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| DbError::LockPoisoned)
    }

    // ==================== Message Log ====================

    /// Append an inbound message to the audit log
    pub fn log_message(&self, sender: &str, body: &str) -> DbResult<i64> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO messages (sender, body, created_at) VALUES (?1, ?2, ?3)",
            params![sender, body, Utc::now().to_rfc3339()],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Messages from a sender, oldest first
    pub fn list_messages(&self, sender: &str) -> DbResult<Vec<LoggedMessage>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT id, sender, body, created_at FROM messages WHERE sender = ?1 ORDER BY id",
        )?;

        let rows = stmt.query_map(params![sender], |row| {
            Ok(LoggedMessage {
                id: row.get(0)?,
                sender: row.get(1)?,
                body: row.get(2)?,
                created_at: parse_datetime(&row.get::<_, String>(3)?),
            })
        })?;

        rows.collect::<Result<Vec<_>, _>>().map_err(DbError::from)
    }

    // ==================== Dialogue State ====================

    /// Current state for a sender. Unknown senders have no active flow.
    pub fn get_state(&self, sender: &str) -> DbResult<DialogueState> {
        let conn = self.lock()?;
        let state_json: Option<String> = conn
            .query_row(
                "SELECT state FROM user_state WHERE sender = ?1",
                params![sender],
                |row| row.get(0),
            )
            .optional()?;

        let Some(json) = state_json else {
            return Ok(DialogueState::NoFlow);
        };

        Ok(serde_json::from_str(&json)?)
    }

    /// Replace the sender's state (last write wins)
    pub fn set_state(&self, sender: &str, state: &DialogueState) -> DbResult<()> {
        let state_json = serde_json::to_string(state)?;
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO user_state (sender, state, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(sender) DO UPDATE SET state = excluded.state, updated_at = excluded.updated_at",
            params![sender, state_json, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    /// Store a raw state column, bypassing encoding
    #[cfg(test)]
    pub fn put_raw_state(&self, sender: &str, raw: &str) -> DbResult<()> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT OR REPLACE INTO user_state (sender, state, updated_at) VALUES (?1, ?2, ?3)",
            params![sender, raw, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    // ==================== Support Tickets ====================

    /// Open a new ticket with empty description and urgency
    pub fn create_ticket(&self, id: &str, sender: &str) -> DbResult<SupportTicket> {
        let conn = self.lock()?;
        let now = Utc::now();
        conn.execute(
            "INSERT INTO support_tickets (id, sender, created_at) VALUES (?1, ?2, ?3)",
            params![id, sender, now.to_rfc3339()],
        )?;

        Ok(SupportTicket {
            id: id.to_string(),
            sender: sender.to_string(),
            description: None,
            urgency: None,
            created_at: now,
        })
    }

    pub fn set_ticket_description(&self, sender: &str, id: &str, description: &str) -> DbResult<()> {
        let conn = self.lock()?;
        let updated = conn.execute(
            "UPDATE support_tickets SET description = ?1 WHERE id = ?2 AND sender = ?3",
            params![description, id, sender],
        )?;

        if updated == 0 {
            return Err(DbError::TicketNotFound(id.to_string()));
        }
        Ok(())
    }

    pub fn set_ticket_urgency(&self, sender: &str, id: &str, urgency: Urgency) -> DbResult<()> {
        let conn = self.lock()?;
        let updated = conn.execute(
            "UPDATE support_tickets SET urgency = ?1 WHERE id = ?2 AND sender = ?3",
            params![urgency.as_str(), id, sender],
        )?;

        if updated == 0 {
            return Err(DbError::TicketNotFound(id.to_string()));
        }
        Ok(())
    }

    /// Get ticket by ID
    pub fn get_ticket(&self, id: &str) -> DbResult<SupportTicket> {
        let conn = self.lock()?;
        conn.query_row(
            "SELECT id, sender, description, urgency, created_at FROM support_tickets WHERE id = ?1",
            params![id],
            ticket_from_row,
        )
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => DbError::TicketNotFound(id.to_string()),
            other => DbError::Sqlite(other),
        })
    }

    /// Most recently created ticket for a sender
    pub fn latest_ticket(&self, sender: &str) -> DbResult<Option<SupportTicket>> {
        let conn = self.lock()?;
        conn.query_row(
            "SELECT id, sender, description, urgency, created_at FROM support_tickets
             WHERE sender = ?1 ORDER BY seq DESC LIMIT 1",
            params![sender],
            ticket_from_row,
        )
        .optional()
        .map_err(DbError::from)
    }

    /// Tickets, newest first, optionally for one sender
    pub fn list_tickets(&self, sender: Option<&str>) -> DbResult<Vec<SupportTicket>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT id, sender, description, urgency, created_at FROM support_tickets
             WHERE ?1 IS NULL OR sender = ?1
             ORDER BY seq DESC",
        )?;

        let rows = stmt.query_map(params![sender], ticket_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(DbError::from)
    }

    // ==================== Flow Events ====================

    /// Append a flow audit event
    pub fn log_event(&self, sender: &str, event: &str, value: Option<&str>) -> DbResult<i64> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO flow_events (sender, event, value, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![sender, event, value, Utc::now().to_rfc3339()],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Flow events for a sender, in the order they were written
    pub fn list_flow_events(&self, sender: &str) -> DbResult<Vec<FlowEvent>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT id, sender, event, value, created_at FROM flow_events
             WHERE sender = ?1 ORDER BY id",
        )?;

        let rows = stmt.query_map(params![sender], |row| {
            Ok(FlowEvent {
                id: row.get(0)?,
                sender: row.get(1)?,
                event: row.get(2)?,
                value: row.get(3)?,
                created_at: parse_datetime(&row.get::<_, String>(4)?),
            })
        })?;

        rows.collect::<Result<Vec<_>, _>>().map_err(DbError::from)
    }
}

fn ticket_from_row(row: &Row<'_>) -> rusqlite::Result<SupportTicket> {
    let urgency: Option<String> = row.get(3)?;
    Ok(SupportTicket {
        id: row.get(0)?,
        sender: row.get(1)?,
        description: row.get(2)?,
        urgency: urgency.as_deref().and_then(Urgency::parse),
        created_at: parse_datetime(&row.get::<_, String>(4)?),
    })
}

fn parse_datetime(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s).map_or_else(|_| Utc::now(), |dt| dt.with_timezone(&Utc))
}
