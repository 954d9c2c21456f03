//! Exclusivity tiers and ticket categories — the two classification axes
//! of park admission, and the compatibility rule between them.

use serde::{Deserialize, Serialize};

/// An attraction's required admission level, least to most exclusive.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ExclusivityTier {
  Family,
  Gold,
  Diamond,
}

/// The admission level purchased with a general or season ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketCategory {
  Basic,
  Family,
  Gold,
  Diamond,
}

impl ExclusivityTier {
  /// Whether a ticket of `category` clears this tier.
  ///
  /// The match is total over both enums, so adding a tier or category
  /// later is a compile error until this table is extended.
  pub fn admits(self, category: TicketCategory) -> bool {
    use TicketCategory as Cat;
    match (self, category) {
      (Self::Family, Cat::Basic) => false,
      (Self::Family, Cat::Family | Cat::Gold | Cat::Diamond) => true,
      (Self::Gold, Cat::Basic | Cat::Family) => false,
      (Self::Gold, Cat::Gold | Cat::Diamond) => true,
      (Self::Diamond, Cat::Basic | Cat::Family | Cat::Gold) => false,
      (Self::Diamond, Cat::Diamond) => true,
    }
  }
}
