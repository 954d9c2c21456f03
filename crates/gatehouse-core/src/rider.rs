//! Rider profiles and the customer-lookup collaborator.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Physical and medical attributes of a rider-classified customer, as
/// recorded by the park.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiderProfile {
  /// Height in metres.
  pub height:     f64,
  /// Weight in kilograms.
  pub weight:     f64,
  /// Known medical conditions, free-text tags.
  pub conditions: Vec<String>,
}

/// Lookup of rider data for a buyer.
///
/// Returns `None` when the buyer has no rider profile on record (e.g. an
/// account that never registered physical data); the access engine then
/// skips the physical/medical check for that buyer.
pub trait RiderDirectory {
  fn rider_profile(&self, buyer_id: Uuid) -> Option<RiderProfile>;
}
