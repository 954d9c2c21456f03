//! Encoding and decoding helpers between Rust domain types and the
//! plain-text representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings, UUIDs as hyphenated
//! lowercase strings, and the kind-specific ticket payload as compact
//! JSON keyed by the kind discriminant.

use chrono::{DateTime, Utc};
use gatehouse_core::ticket::{Ticket, TicketKind, TicketState};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Row type ────────────────────────────────────────────────────────────────

/// Raw column values read directly from a `tickets` row.
pub struct RawTicket {
  pub code:              String,
  pub kind:              String,
  pub details_json:      String,
  pub issued_at:         String,
  pub price:             f64,
  pub buyer_id:          String,
  pub buyer_name:        String,
  pub employee_discount: bool,
  pub used:              bool,
}

impl RawTicket {
  pub fn into_ticket(self) -> Result<Ticket> {
    let details: serde_json::Value = serde_json::from_str(&self.details_json)?;
    let kind = TicketKind::from_parts(&self.kind, details)?;

    Ok(Ticket {
      code: decode_uuid(&self.code)?,
      issued_at: decode_dt(&self.issued_at)?,
      price: self.price,
      buyer_id: decode_uuid(&self.buyer_id)?,
      buyer_name: self.buyer_name,
      employee_discount: self.employee_discount,
      state: if self.used {
        TicketState::Used
      } else {
        TicketState::Issued
      },
      kind,
    })
  }
}
