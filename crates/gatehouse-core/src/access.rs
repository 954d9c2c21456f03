//! The access decision engine — admit or deny a ticket at a gate.
//!
//! Denial is an expected outcome, not an error: the engine returns a value
//! carrying a machine-distinguishable reason. Evaluation order is part of
//! the contract; when several denial reasons would apply, the earliest one
//! in the sequence is the one reported.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  rider::RiderDirectory,
  ticket::{Ticket, TicketKind},
  venue::{Venue, VenueDirectory},
};

// ─── Decision types ──────────────────────────────────────────────────────────

/// Why a ticket was refused at a gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DenialReason {
  /// The target id does not resolve to any known venue.
  NotAnAttraction,
  /// The attraction record carries no required tier — a data-integrity
  /// failure of the catalogue, never a permissive default.
  TierUndefined,
  /// The rider fails the attraction's height, weight, or medical bounds.
  RiderRestricted,
  /// The ticket's category does not clear the attraction's tier.
  CategoryInsufficient,
  /// The individual entry is bound to a different attraction.
  WrongAttraction,
  /// A fast pass grants no admission on its own.
  FastPassAlone,
}

impl fmt::Display for DenialReason {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Self::NotAnAttraction => "not a valid attraction",
      Self::TierUndefined => "exclusivity tier undefined",
      Self::RiderRestricted => "restricted by medical/physical rules",
      Self::CategoryInsufficient => "category insufficient for tier",
      Self::WrongAttraction => "entry not valid for this attraction",
      Self::FastPassAlone => "a fast pass alone does not grant admission",
    })
  }
}

/// Outcome of an admission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AccessDecision {
  Admitted,
  Denied { reason: DenialReason },
}

impl AccessDecision {
  pub fn is_admitted(&self) -> bool { matches!(self, Self::Admitted) }

  const fn denied(reason: DenialReason) -> Self { Self::Denied { reason } }
}

// ─── Engine ──────────────────────────────────────────────────────────────────

/// Decide whether `ticket` admits its holder to `target`.
///
/// Pure: mutates neither the ticket nor any directory. Checks run in a
/// fixed order:
///
/// 1. shows admit unconditionally;
/// 2. an unresolvable target denies;
/// 3. an attraction with no required tier denies;
/// 4. for general, season, and individual-entry tickets whose buyer has a
///    rider profile on record, the attraction's physical/medical bounds
///    are evaluated, and a failure short-circuits everything after (a
///    buyer with no profile skips this step — there is no physical data
///    to evaluate);
/// 5. the kind-specific rule: tier compatibility for general and season
///    tickets, bound-attraction equality for individual entries, an
///    unconditional denial for fast passes.
///
/// Consumption state is not consulted here; that is the box office's
/// concern when it marks tickets used.
pub fn can_access(
  ticket: &Ticket,
  target: Uuid,
  venues: &impl VenueDirectory,
  riders: &impl RiderDirectory,
) -> AccessDecision {
  let attraction = match venues.resolve(target) {
    Some(Venue::Show(_)) => return AccessDecision::Admitted,
    Some(Venue::Attraction(facts)) => facts,
    None => return AccessDecision::denied(DenialReason::NotAnAttraction),
  };

  let Some(required_tier) = attraction.required_tier else {
    return AccessDecision::denied(DenialReason::TierUndefined);
  };

  if !matches!(ticket.kind, TicketKind::FastPass { .. })
    && let Some(profile) = riders.rider_profile(ticket.buyer_id)
    && !attraction.restrictions.permits(&profile)
  {
    return AccessDecision::denied(DenialReason::RiderRestricted);
  }

  match &ticket.kind {
    TicketKind::General { category } | TicketKind::Season { category, .. } => {
      if required_tier.admits(*category) {
        AccessDecision::Admitted
      } else {
        AccessDecision::denied(DenialReason::CategoryInsufficient)
      }
    }
    TicketKind::IndividualEntry { attraction_id } => {
      if *attraction_id == attraction.attraction_id {
        AccessDecision::Admitted
      } else {
        AccessDecision::denied(DenialReason::WrongAttraction)
      }
    }
    TicketKind::FastPass { .. } => {
      AccessDecision::denied(DenialReason::FastPassAlone)
    }
  }
}

#[cfg(test)]
mod tests {
  use std::collections::HashMap;

  use chrono::{Duration, NaiveDate, Utc};
  use uuid::Uuid;

  use super::{AccessDecision, DenialReason, can_access};
  use crate::{
    rider::{RiderDirectory, RiderProfile},
    ticket::{Buyer, Ticket, TicketKind},
    tier::{ExclusivityTier, TicketCategory},
    venue::{
      AttractionFacts, RiderRestrictions, ShowFacts, Venue, VenueDirectory,
    },
  };

  // ── Stub directories ──────────────────────────────────────────────────

  #[derive(Default)]
  struct Park {
    venues: HashMap<Uuid, Venue>,
  }

  impl Park {
    fn attraction(&mut self, facts: AttractionFacts) -> Uuid {
      let id = facts.attraction_id;
      self.venues.insert(id, Venue::Attraction(facts));
      id
    }

    fn show(&mut self, name: &str) -> Uuid {
      let show_id = Uuid::new_v4();
      self.venues.insert(
        show_id,
        Venue::Show(ShowFacts {
          show_id,
          name: name.into(),
        }),
      );
      show_id
    }
  }

  impl VenueDirectory for Park {
    fn resolve(&self, id: Uuid) -> Option<Venue> {
      self.venues.get(&id).cloned()
    }
  }

  #[derive(Default)]
  struct Riders {
    profiles: HashMap<Uuid, RiderProfile>,
  }

  impl RiderDirectory for Riders {
    fn rider_profile(&self, buyer_id: Uuid) -> Option<RiderProfile> {
      self.profiles.get(&buyer_id).cloned()
    }
  }

  // ── Fixtures ──────────────────────────────────────────────────────────

  fn buyer() -> Buyer {
    Buyer {
      buyer_id: Uuid::new_v4(),
      name: "Iris Fontaine".into(),
      employee: false,
    }
  }

  fn attraction(tier: Option<ExclusivityTier>) -> AttractionFacts {
    AttractionFacts {
      attraction_id: Uuid::new_v4(),
      name:          "Hollow Hill Coaster".into(),
      required_tier: tier,
      restrictions:  RiderRestrictions::default(),
      closed_under:  Vec::new(),
    }
  }

  fn general(b: &Buyer, category: TicketCategory) -> Ticket {
    Ticket::issue(b, TicketKind::General { category }, 50.0).unwrap()
  }

  fn denied(reason: DenialReason) -> AccessDecision {
    AccessDecision::Denied { reason }
  }

  // ── Target resolution ─────────────────────────────────────────────────

  #[test]
  fn shows_admit_unconditionally() {
    let b = buyer();
    let mut park = Park::default();
    let show = park.show("Night Parade");

    // Even a fast pass is admitted to a show.
    let pass = Ticket::issue(
      &b,
      TicketKind::FastPass {
        valid_on: NaiveDate::from_ymd_opt(2026, 7, 14).unwrap(),
      },
      15.0,
    )
    .unwrap();

    let decision = can_access(&pass, show, &park, &Riders::default());
    assert!(decision.is_admitted());
  }

  #[test]
  fn unknown_target_denies() {
    let b = buyer();
    let decision = can_access(
      &general(&b, TicketCategory::Diamond),
      Uuid::new_v4(),
      &Park::default(),
      &Riders::default(),
    );
    assert_eq!(decision, denied(DenialReason::NotAnAttraction));
  }

  #[test]
  fn missing_tier_denies_rather_than_defaulting_open() {
    let b = buyer();
    let mut park = Park::default();
    let id = park.attraction(attraction(None));

    let decision = can_access(
      &general(&b, TicketCategory::Diamond),
      id,
      &park,
      &Riders::default(),
    );
    assert_eq!(decision, denied(DenialReason::TierUndefined));
  }

  // ── Tier × category ───────────────────────────────────────────────────

  #[test]
  fn general_ticket_follows_the_admission_matrix() {
    let b = buyer();
    let riders = Riders::default();
    let table = [
      (ExclusivityTier::Family, TicketCategory::Basic, false),
      (ExclusivityTier::Family, TicketCategory::Family, true),
      (ExclusivityTier::Gold, TicketCategory::Family, false),
      (ExclusivityTier::Gold, TicketCategory::Gold, true),
      (ExclusivityTier::Diamond, TicketCategory::Gold, false),
      (ExclusivityTier::Diamond, TicketCategory::Diamond, true),
    ];
    for (tier, category, admit) in table {
      let mut park = Park::default();
      let id = park.attraction(attraction(Some(tier)));
      let decision = can_access(&general(&b, category), id, &park, &riders);
      if admit {
        assert!(decision.is_admitted(), "{tier:?} / {category:?}");
      } else {
        assert_eq!(decision, denied(DenialReason::CategoryInsufficient));
      }
    }
  }

  #[test]
  fn season_ticket_uses_the_same_matrix() {
    let b = buyer();
    let now = Utc::now();
    let season = Ticket::issue(
      &b,
      TicketKind::Season {
        category:    TicketCategory::Gold,
        valid_from:  now,
        valid_until: now + Duration::days(90),
      },
      300.0,
    )
    .unwrap();

    let mut park = Park::default();
    let gold = park.attraction(attraction(Some(ExclusivityTier::Gold)));
    let diamond = park.attraction(attraction(Some(ExclusivityTier::Diamond)));

    assert!(can_access(&season, gold, &park, &Riders::default()).is_admitted());
    assert_eq!(
      can_access(&season, diamond, &park, &Riders::default()),
      denied(DenialReason::CategoryInsufficient)
    );
  }

  // ── Individual entries ────────────────────────────────────────────────

  #[test]
  fn individual_entry_admits_only_its_bound_attraction() {
    let b = buyer();
    let mut park = Park::default();
    let bound = park.attraction(attraction(Some(ExclusivityTier::Family)));
    let other = park.attraction(attraction(Some(ExclusivityTier::Family)));

    let entry = Ticket::issue(
      &b,
      TicketKind::IndividualEntry {
        attraction_id: bound,
      },
      25.0,
    )
    .unwrap();

    assert!(can_access(&entry, bound, &park, &Riders::default()).is_admitted());
    assert_eq!(
      can_access(&entry, other, &park, &Riders::default()),
      denied(DenialReason::WrongAttraction)
    );
  }

  #[test]
  fn individual_entry_still_denies_on_undefined_tier() {
    // Target resolution and tier integrity come before the bound-id check.
    let b = buyer();
    let mut park = Park::default();
    let bound = park.attraction(attraction(None));

    let entry = Ticket::issue(
      &b,
      TicketKind::IndividualEntry {
        attraction_id: bound,
      },
      25.0,
    )
    .unwrap();

    assert_eq!(
      can_access(&entry, bound, &park, &Riders::default()),
      denied(DenialReason::TierUndefined)
    );
  }

  // ── Fast passes ───────────────────────────────────────────────────────

  #[test]
  fn fast_pass_never_admits_to_an_attraction() {
    let b = buyer();
    let mut park = Park::default();
    let id = park.attraction(attraction(Some(ExclusivityTier::Family)));

    let pass = Ticket::issue(
      &b,
      TicketKind::FastPass {
        valid_on: Utc::now().date_naive(),
      },
      15.0,
    )
    .unwrap();

    // Valid today, still denied: the pass is supplementary by design.
    assert_eq!(
      can_access(&pass, id, &park, &Riders::default()),
      denied(DenialReason::FastPassAlone)
    );
  }

  // ── Physical/medical gate and evaluation order ────────────────────────

  fn height_gated(
    tier: ExclusivityTier,
    min: f64,
    max: f64,
  ) -> AttractionFacts {
    AttractionFacts {
      restrictions: RiderRestrictions {
        min_height: Some(min),
        max_height: Some(max),
        ..RiderRestrictions::default()
      },
      ..attraction(Some(tier))
    }
  }

  #[test]
  fn physical_pass_then_tier_failure_reports_category() {
    // Rider is 1.50 m against a [1.20, 2.00] bound: the physical check
    // passes, so the Family-category ticket fails on the Gold tier.
    let b = buyer();
    let mut riders = Riders::default();
    riders.profiles.insert(
      b.buyer_id,
      RiderProfile {
        height: 1.50,
        weight: 70.0,
        conditions: Vec::new(),
      },
    );

    let mut park = Park::default();
    let id = park.attraction(height_gated(ExclusivityTier::Gold, 1.20, 2.00));

    let decision =
      can_access(&general(&b, TicketCategory::Family), id, &park, &riders);
    assert_eq!(decision, denied(DenialReason::CategoryInsufficient));
  }

  #[test]
  fn physical_failure_short_circuits_the_tier_check() {
    // Rider is 1.50 m against a [2.00, 2.50] bound: the physical check
    // fails first even though the Diamond category would clear the tier.
    let b = buyer();
    let mut riders = Riders::default();
    riders.profiles.insert(
      b.buyer_id,
      RiderProfile {
        height: 1.50,
        weight: 70.0,
        conditions: Vec::new(),
      },
    );

    let mut park = Park::default();
    let id = park.attraction(height_gated(ExclusivityTier::Gold, 2.00, 2.50));

    let decision =
      can_access(&general(&b, TicketCategory::Diamond), id, &park, &riders);
    assert_eq!(decision, denied(DenialReason::RiderRestricted));
  }

  #[test]
  fn contraindicated_rider_is_denied() {
    let b = buyer();
    let mut riders = Riders::default();
    riders.profiles.insert(
      b.buyer_id,
      RiderProfile {
        height: 1.70,
        weight: 70.0,
        conditions: vec!["vertigo".into()],
      },
    );

    let mut park = Park::default();
    let facts = AttractionFacts {
      restrictions: RiderRestrictions {
        contraindications: vec!["Vertigo".into()],
        ..RiderRestrictions::default()
      },
      ..attraction(Some(ExclusivityTier::Family))
    };
    let id = park.attraction(facts);

    let decision =
      can_access(&general(&b, TicketCategory::Diamond), id, &park, &riders);
    assert_eq!(decision, denied(DenialReason::RiderRestricted));
  }

  #[test]
  fn buyer_without_rider_profile_skips_the_physical_check() {
    let b = buyer();
    let mut park = Park::default();
    let id = park.attraction(height_gated(ExclusivityTier::Family, 1.20, 2.00));

    // No profile on record: the bounds cannot be evaluated, the tier
    // check still applies.
    let decision = can_access(
      &general(&b, TicketCategory::Family),
      id,
      &park,
      &Riders::default(),
    );
    assert!(decision.is_admitted());
  }

  // ── Reason display ────────────────────────────────────────────────────

  #[test]
  fn denial_reasons_are_distinguishable_and_printable() {
    let reasons = [
      DenialReason::NotAnAttraction,
      DenialReason::TierUndefined,
      DenialReason::RiderRestricted,
      DenialReason::CategoryInsufficient,
      DenialReason::WrongAttraction,
      DenialReason::FastPassAlone,
    ];
    let rendered: std::collections::HashSet<String> =
      reasons.iter().map(ToString::to_string).collect();
    assert_eq!(rendered.len(), reasons.len());
  }
}
