//! Attraction and show facts, and the venue-lookup collaborator.
//!
//! The park's catalogue of attractions and shows lives outside this
//! system; the access engine consumes it through [`VenueDirectory`] and
//! the fact structs below.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{rider::RiderProfile, tier::ExclusivityTier};

// ─── Climate ─────────────────────────────────────────────────────────────────

/// A weather condition under which an attraction cannot operate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClimateCondition {
  Rain,
  Storm,
  HighWind,
  Snow,
  ExtremeHeat,
}

// ─── Rider restrictions ──────────────────────────────────────────────────────

/// Physical and medical admission bounds declared by an attraction.
/// Absent bounds are unrestricted; all present bounds are inclusive.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RiderRestrictions {
  /// Minimum rider height in metres.
  pub min_height:        Option<f64>,
  /// Maximum rider height in metres.
  pub max_height:        Option<f64>,
  /// Minimum rider weight in kilograms.
  pub min_weight:        Option<f64>,
  /// Maximum rider weight in kilograms.
  pub max_weight:        Option<f64>,
  /// Medical conditions that exclude a rider; free-text tags matched
  /// ASCII-case-insensitively against the rider's known conditions.
  pub contraindications: Vec<String>,
}

impl RiderRestrictions {
  /// Whether `rider` clears every declared bound and carries none of the
  /// contraindicated conditions.
  pub fn permits(&self, rider: &RiderProfile) -> bool {
    if self.min_height.is_some_and(|min| rider.height < min) {
      return false;
    }
    if self.max_height.is_some_and(|max| rider.height > max) {
      return false;
    }
    if self.min_weight.is_some_and(|min| rider.weight < min) {
      return false;
    }
    if self.max_weight.is_some_and(|max| rider.weight > max) {
      return false;
    }
    !self.contraindications.iter().any(|tag| {
      rider
        .conditions
        .iter()
        .any(|known| known.eq_ignore_ascii_case(tag))
    })
  }
}

// ─── Venue facts ─────────────────────────────────────────────────────────────

/// Admission-relevant facts about an attraction, as declared by the
/// external catalogue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttractionFacts {
  pub attraction_id: Uuid,
  pub name:          String,
  /// Required admission tier. `None` is a data-integrity failure of the
  /// attraction record and denies at the gate; it is never read as
  /// "no restriction".
  pub required_tier: Option<ExclusivityTier>,
  pub restrictions:  RiderRestrictions,
  /// Conditions under which the attraction is closed.
  pub closed_under:  Vec<ClimateCondition>,
}

impl AttractionFacts {
  /// Whether the attraction operates under `condition`.
  pub fn operates_under(&self, condition: ClimateCondition) -> bool {
    !self.closed_under.contains(&condition)
  }
}

/// A show models no physical admission restriction; any ticket holder may
/// attend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShowFacts {
  pub show_id: Uuid,
  pub name:    String,
}

/// What a gate target resolves to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "venue", rename_all = "snake_case")]
pub enum Venue {
  Show(ShowFacts),
  Attraction(AttractionFacts),
}

// ─── Directory ───────────────────────────────────────────────────────────────

/// Lookup of gate targets by id.
pub trait VenueDirectory {
  /// Resolve a gate target. `None` means the id names nothing the park
  /// knows about.
  fn resolve(&self, id: Uuid) -> Option<Venue>;
}
