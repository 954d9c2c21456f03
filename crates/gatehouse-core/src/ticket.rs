//! Ticket types — the credentials issued by the box office.
//!
//! A ticket is created once, priced at issuance, and mutated only by the
//! usage tracker (the single `Issued → Used` transition). The kind-specific
//! payload is a closed sum type; its variant name doubles as the
//! discriminant stored by persistence backends.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result, pricing, tier::TicketCategory};

// ─── Buyer ───────────────────────────────────────────────────────────────────

/// Identity snapshot of the purchaser at issuance time. Tickets copy the
/// id and display name; the buyer record itself may change independently.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Buyer {
  pub buyer_id: Uuid,
  pub name:     String,
  /// Park-employee classification; drives the issuance discount.
  pub employee: bool,
}

// ─── State ───────────────────────────────────────────────────────────────────

/// Consumption state. Monotonic: `Used` is terminal, there is no way back
/// to `Issued`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketState {
  Issued,
  Used,
}

// ─── Kind ────────────────────────────────────────────────────────────────────

/// The kind-specific payload of a ticket. The variant name serves as the
/// `kind` discriminant stored in the database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "details", rename_all = "snake_case")]
pub enum TicketKind {
  /// Park entry at the purchased category.
  General { category: TicketCategory },

  /// Park entry across a validity window. The category is never `Basic`
  /// and the window is never empty; both are checked at issuance.
  Season {
    category:    TicketCategory,
    valid_from:  DateTime<Utc>,
    valid_until: DateTime<Utc>,
  },

  /// Entry to exactly one attraction, bound at issuance.
  IndividualEntry { attraction_id: Uuid },

  /// Queue-skip supplement for a single day. Confers no admission on its
  /// own; only meaningful alongside a base ticket.
  FastPass { valid_on: NaiveDate },
}

impl TicketKind {
  /// The discriminant string stored in the `kind` column.
  /// Must match the `rename_all = "snake_case"` serde tags above.
  pub fn discriminant(&self) -> &'static str {
    match self {
      Self::General { .. } => "general",
      Self::Season { .. } => "season",
      Self::IndividualEntry { .. } => "individual_entry",
      Self::FastPass { .. } => "fast_pass",
    }
  }

  /// Check the issuance invariants that are not expressible in the type
  /// itself. Called once, when the ticket is constructed; never re-checked
  /// afterwards.
  pub fn validate(&self) -> Result<()> {
    match self {
      Self::Season {
        category: TicketCategory::Basic,
        ..
      } => Err(Error::BasicSeasonCategory),
      Self::Season {
        valid_from,
        valid_until,
        ..
      } if valid_from >= valid_until => Err(Error::EmptyValidityWindow {
        from:  *valid_from,
        until: *valid_until,
      }),
      _ => Ok(()),
    }
  }

  /// Serialise the inner payload (without the kind tag) for the
  /// `details_json` database column.
  pub fn to_json(&self) -> Result<serde_json::Value> {
    // The full serialised form is `{"kind": "...", "details": <payload>}`.
    // We want only the payload.
    let full = serde_json::to_value(self)?;
    Ok(
      full
        .get("details")
        .cloned()
        .unwrap_or(serde_json::Value::Null),
    )
  }

  /// Deserialise from the discriminant string and JSON payload stored in
  /// the database.
  pub fn from_parts(
    discriminant: &str,
    details: serde_json::Value,
  ) -> Result<Self> {
    if !matches!(
      discriminant,
      "general" | "season" | "individual_entry" | "fast_pass"
    ) {
      return Err(Error::UnknownTicketKind(discriminant.to_owned()));
    }
    let wrapped =
      serde_json::json!({ "kind": discriminant, "details": details });
    Ok(serde_json::from_value(wrapped)?)
  }
}

// ─── Ticket ──────────────────────────────────────────────────────────────────

/// An issued entry credential. The code is immutable and unique across the
/// registry for the ticket's lifetime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
  pub code:              Uuid,
  pub issued_at:         DateTime<Utc>,
  /// Final price after any discount; the base price is not retained.
  pub price:             f64,
  pub buyer_id:          Uuid,
  pub buyer_name:        String,
  pub employee_discount: bool,
  pub state:             TicketState,
  pub kind:              TicketKind,
}

impl Ticket {
  /// Build a freshly-issued ticket: validates `kind`, generates a unique
  /// code, stamps the issuance time, and applies the pricing policy.
  pub fn issue(buyer: &Buyer, kind: TicketKind, base_price: f64) -> Result<Self> {
    kind.validate()?;
    Ok(Self {
      code: Uuid::new_v4(),
      issued_at: Utc::now(),
      price: pricing::final_price(buyer.employee, base_price),
      buyer_id: buyer.buyer_id,
      buyer_name: buyer.name.clone(),
      employee_discount: buyer.employee,
      state: TicketState::Issued,
      kind,
    })
  }

  /// Time-window validity at `at`. A check, not a state change: season
  /// tickets are valid inside their window, fast passes on their valid-on
  /// calendar date, and the other kinds at any time.
  pub fn is_valid_at(&self, at: DateTime<Utc>) -> bool {
    match &self.kind {
      TicketKind::Season {
        valid_from,
        valid_until,
        ..
      } => *valid_from <= at && at <= *valid_until,
      TicketKind::FastPass { valid_on } => at.date_naive() == *valid_on,
      TicketKind::General { .. } | TicketKind::IndividualEntry { .. } => true,
    }
  }
}
