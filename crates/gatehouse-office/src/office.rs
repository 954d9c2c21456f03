//! [`BoxOffice`] — issuance, usage tracking, and the ticket registry.
//!
//! The registry (code → ticket) is the one piece of shared mutable state
//! in the system. It sits behind a single async mutex, and the lock is
//! held across the persist call, so each issuance or usage marking runs
//! as one atomic check-then-act sequence.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use gatehouse_core::{
  store::TicketStore,
  ticket::{Buyer, Ticket, TicketKind, TicketState},
  tier::TicketCategory,
};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::{Error, Result};

// ─── Box office ──────────────────────────────────────────────────────────────

/// The issuing authority for park tickets.
///
/// Owns every ticket it issues. Tickets are created here and nowhere else;
/// the only mutation ever applied afterwards is [`BoxOffice::mark_used`].
pub struct BoxOffice<S> {
  registry: Mutex<HashMap<Uuid, Ticket>>,
  store:    S,
}

impl<S: TicketStore> BoxOffice<S> {
  /// Open a box office over `store`, loading every persisted ticket into
  /// the registry. A duplicate code in the backing store is an error.
  pub async fn open(store: S) -> Result<Self> {
    let tickets = store
      .load_all()
      .await
      .map_err(|e| Error::Store(Box::new(e)))?;

    let mut registry = HashMap::with_capacity(tickets.len());
    for ticket in tickets {
      let code = ticket.code;
      if registry.insert(code, ticket).is_some() {
        return Err(gatehouse_core::Error::CodeCollision(code).into());
      }
    }

    tracing::info!(tickets = registry.len(), "box office opened");
    Ok(Self {
      registry: Mutex::new(registry),
      store,
    })
  }

  // ── Issuance ──────────────────────────────────────────────────────────

  /// Sell a general ticket at `category`.
  pub async fn issue_general(
    &self,
    buyer: &Buyer,
    category: TicketCategory,
    base_price: f64,
  ) -> Result<Ticket> {
    self
      .issue(buyer, TicketKind::General { category }, base_price)
      .await
  }

  /// Sell a season ticket valid across `[valid_from, valid_until]`.
  ///
  /// A `Basic` category or an empty window fails with an invalid-input
  /// error before any registry or store mutation.
  pub async fn issue_season(
    &self,
    buyer: &Buyer,
    category: TicketCategory,
    valid_from: DateTime<Utc>,
    valid_until: DateTime<Utc>,
    base_price: f64,
  ) -> Result<Ticket> {
    self
      .issue(
        buyer,
        TicketKind::Season {
          category,
          valid_from,
          valid_until,
        },
        base_price,
      )
      .await
  }

  /// Sell an individual entry bound to one attraction.
  pub async fn issue_individual(
    &self,
    buyer: &Buyer,
    attraction_id: Uuid,
    base_price: f64,
  ) -> Result<Ticket> {
    self
      .issue(buyer, TicketKind::IndividualEntry { attraction_id }, base_price)
      .await
  }

  /// Sell a fast pass for `valid_on`. The pass is a supplement; it grants
  /// no admission by itself.
  pub async fn issue_fast_pass(
    &self,
    buyer: &Buyer,
    valid_on: NaiveDate,
    base_price: f64,
  ) -> Result<Ticket> {
    self
      .issue(buyer, TicketKind::FastPass { valid_on }, base_price)
      .await
  }

  /// Shared issuance path: validate and build the ticket, then persist
  /// and register it under the registry lock. On any failure the registry
  /// and the store are left untouched.
  async fn issue(
    &self,
    buyer: &Buyer,
    kind: TicketKind,
    base_price: f64,
  ) -> Result<Ticket> {
    let ticket = Ticket::issue(buyer, kind, base_price)?;

    let mut registry = self.registry.lock().await;
    if registry.contains_key(&ticket.code) {
      return Err(gatehouse_core::Error::CodeCollision(ticket.code).into());
    }
    self
      .store
      .save(&ticket)
      .await
      .map_err(|e| Error::Store(Box::new(e)))?;
    registry.insert(ticket.code, ticket.clone());

    tracing::info!(
      code = %ticket.code,
      kind = ticket.kind.discriminant(),
      price = ticket.price,
      "ticket issued"
    );
    Ok(ticket)
  }

  // ── Usage tracking ────────────────────────────────────────────────────

  /// Record that a ticket has been consumed at a gate.
  ///
  /// The single legal transition is `Issued → Used`: an unknown code and
  /// an already-used ticket are both rejected. The registry is updated
  /// only after the store accepts the change.
  pub async fn mark_used(&self, code: Uuid) -> Result<Ticket> {
    let mut registry = self.registry.lock().await;
    let ticket = registry
      .get(&code)
      .ok_or(gatehouse_core::Error::TicketNotFound(code))?;
    if ticket.state == TicketState::Used {
      return Err(gatehouse_core::Error::AlreadyUsed(code).into());
    }

    let mut used = ticket.clone();
    used.state = TicketState::Used;
    self
      .store
      .save(&used)
      .await
      .map_err(|e| Error::Store(Box::new(e)))?;
    registry.insert(code, used.clone());

    tracing::info!(code = %code, "ticket marked used");
    Ok(used)
  }

  // ── Reads ─────────────────────────────────────────────────────────────

  /// Fetch a ticket by code. Returns `None` if no such ticket was issued.
  pub async fn lookup(&self, code: Uuid) -> Option<Ticket> {
    self.registry.lock().await.get(&code).cloned()
  }

  /// Snapshot of every ticket currently in the registry.
  pub async fn tickets(&self) -> Vec<Ticket> {
    self.registry.lock().await.values().cloned().collect()
  }
}
