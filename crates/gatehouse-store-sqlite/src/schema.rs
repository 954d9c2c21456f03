//! SQL schema for the Gatehouse SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated
//! on the `PRAGMA user_version` number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- One row per issued ticket. `save` replaces the row wholesale, so the
-- only mutation ever observed here is the used flag flipping to 1.
CREATE TABLE IF NOT EXISTS tickets (
    code              TEXT PRIMARY KEY,
    kind              TEXT NOT NULL,   -- discriminant of TicketKind variant
    details_json      TEXT NOT NULL,   -- JSON payload (kind-specific fields)
    issued_at         TEXT NOT NULL,   -- ISO 8601 UTC; set at issuance
    price             REAL NOT NULL,   -- final post-discount price
    buyer_id          TEXT NOT NULL,
    buyer_name        TEXT NOT NULL,
    employee_discount INTEGER NOT NULL,
    used              INTEGER NOT NULL DEFAULT 0
);

CREATE INDEX IF NOT EXISTS tickets_kind_idx  ON tickets(kind);
CREATE INDEX IF NOT EXISTS tickets_buyer_idx ON tickets(buyer_id);

PRAGMA user_version = 1;
";
