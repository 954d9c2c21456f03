//! [`SqliteStore`] — the SQLite implementation of [`TicketStore`].

use std::path::Path;

use gatehouse_core::{
  store::TicketStore,
  ticket::{Ticket, TicketState},
};

use crate::{
  Error, Result,
  encode::{RawTicket, encode_dt, encode_uuid},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A ticket store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    tracing::debug!("ticket schema initialised");
    Ok(())
  }
}

// ─── TicketStore impl ────────────────────────────────────────────────────────

impl TicketStore for SqliteStore {
  type Error = Error;

  async fn save(&self, ticket: &Ticket) -> Result<()> {
    let code         = encode_uuid(ticket.code);
    let kind         = ticket.kind.discriminant().to_owned();
    let details_json = ticket.kind.to_json()?.to_string();
    let issued_at    = encode_dt(ticket.issued_at);
    let price        = ticket.price;
    let buyer_id     = encode_uuid(ticket.buyer_id);
    let buyer_name   = ticket.buyer_name.clone();
    let employee     = ticket.employee_discount;
    let used         = ticket.state == TicketState::Used;

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT OR REPLACE INTO tickets (
             code, kind, details_json, issued_at, price,
             buyer_id, buyer_name, employee_discount, used
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
          rusqlite::params![
            code,
            kind,
            details_json,
            issued_at,
            price,
            buyer_id,
            buyer_name,
            employee,
            used,
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn load_all(&self) -> Result<Vec<Ticket>> {
    let raws: Vec<RawTicket> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT code, kind, details_json, issued_at, price,
                  buyer_id, buyer_name, employee_discount, used
           FROM tickets
           ORDER BY issued_at",
        )?;
        let rows = stmt.query_map([], |r| {
          Ok(RawTicket {
            code:              r.get(0)?,
            kind:              r.get(1)?,
            details_json:      r.get(2)?,
            issued_at:         r.get(3)?,
            price:             r.get(4)?,
            buyer_id:          r.get(5)?,
            buyer_name:        r.get(6)?,
            employee_discount: r.get(7)?,
            used:              r.get(8)?,
          })
        })?;
        let raws = rows.collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(raws)
      })
      .await?;

    raws.into_iter().map(RawTicket::into_ticket).collect()
  }
}
