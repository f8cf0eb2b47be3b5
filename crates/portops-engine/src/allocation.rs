// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Berth allocation.
//!
//! [`allocate`] decides whether a vessel fits a requested berth, possibly
//! spanning one adjacent berth on the same quay. It never fails: an
//! infeasible request is an ordinary [`AllocationDecision`] carrying the
//! reason. The berths held by *other* ships are passed in as a
//! [`BerthOccupancy`] snapshot.

use crate::err::{
    DuplicateBerthIdError, DuplicateBerthPositionError, InvalidBerthLimitsError, TopologyError,
};
use portops_core::measure::Meters;
use portops_model::{
    berth::Berth,
    id::{BerthId, QuayId, ShipId},
    ship::{Ship, VesselDimensions},
};
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fmt::Display};
use tracing::{debug, instrument};

/// The ship currently holding a berth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occupant {
    ship: ShipId,
    name: String,
}

impl Occupant {
    #[inline]
    pub fn new(ship: ShipId, name: impl Into<String>) -> Self {
        Self {
            ship,
            name: name.into(),
        }
    }

    #[inline]
    pub fn ship(&self) -> ShipId {
        self.ship
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Display for Occupant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.ship)
    }
}

/// Which berths are held by which ship, as seen by one allocation request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BerthOccupancy {
    held: HashMap<BerthId, Occupant>,
}

impl BerthOccupancy {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects the berths of every ship except `excluding`.
    pub fn from_ships<'a, I>(ships: I, excluding: Option<ShipId>) -> Self
    where
        I: IntoIterator<Item = &'a Ship>,
    {
        let mut occupancy = Self::new();
        for ship in ships {
            if Some(ship.id()) == excluding {
                continue;
            }
            for &berth in ship.berths() {
                occupancy.insert(berth, Occupant::new(ship.id(), ship.name()));
            }
        }
        occupancy
    }

    #[inline]
    pub fn insert(&mut self, berth: BerthId, occupant: Occupant) -> Option<Occupant> {
        self.held.insert(berth, occupant)
    }

    #[inline]
    pub fn occupant(&self, berth: BerthId) -> Option<&Occupant> {
        self.held.get(&berth)
    }

    #[inline]
    pub fn is_occupied(&self, berth: BerthId) -> bool {
        self.held.contains_key(&berth)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.held.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.held.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AllocationReason {
    /// No berth requested; the ship stays at anchorage.
    Unassigned,
    BerthNotFound {
        berth: BerthId,
    },
    Occupied {
        berth: String,
        occupant: Occupant,
    },
    DraftExceeded {
        berth: String,
        draft: Meters,
        max_draft: Meters,
    },
    Fits {
        berth: String,
    },
    Combined {
        first: String,
        second: String,
        combined_length: Meters,
    },
    TooLong {
        length: Meters,
        max_length: Meters,
    },
}

impl Display for AllocationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AllocationReason::Unassigned => write!(f, "unassigned/anchorage"),
            AllocationReason::BerthNotFound { berth } => {
                write!(f, "berth not found: {}", berth)
            }
            AllocationReason::Occupied { berth, occupant } => {
                write!(f, "berth {} is occupied by {}", berth, occupant)
            }
            AllocationReason::DraftExceeded {
                berth,
                draft,
                max_draft,
            } => write!(
                f,
                "draft {} exceeds maximum draft {} of berth {}",
                draft, max_draft, berth
            ),
            AllocationReason::Fits { berth } => write!(f, "fits berth {}", berth),
            AllocationReason::Combined {
                first,
                second,
                combined_length,
            } => write!(
                f,
                "vessel spans berths {} + {} (combined length {})",
                first, second, combined_length
            ),
            AllocationReason::TooLong { length, max_length } => write!(
                f,
                "vessel too long ({} > {}), no adjacent berth available",
                length, max_length
            ),
        }
    }
}

/// Outcome of one allocation request. `berths` is sorted ascending and
/// empty whenever the decision is infeasible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationDecision {
    feasible: bool,
    berths: Vec<BerthId>,
    reason: AllocationReason,
}

impl AllocationDecision {
    #[inline]
    fn feasible(mut berths: Vec<BerthId>, reason: AllocationReason) -> Self {
        berths.sort();
        Self {
            feasible: true,
            berths,
            reason,
        }
    }

    #[inline]
    fn infeasible(reason: AllocationReason) -> Self {
        Self {
            feasible: false,
            berths: Vec::new(),
            reason,
        }
    }

    #[inline]
    pub fn is_feasible(&self) -> bool {
        self.feasible
    }

    #[inline]
    pub fn berths(&self) -> &[BerthId] {
        &self.berths
    }

    #[inline]
    pub fn reason(&self) -> &AllocationReason {
        &self.reason
    }

    #[inline]
    pub fn message(&self) -> String {
        self.reason.to_string()
    }
}

impl Display for AllocationDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let verdict = if self.feasible { "feasible" } else { "infeasible" };
        write!(f, "{} {:?}: {}", verdict, self.berths, self.reason)
    }
}

/// Berths on `candidate`'s quay at position ±1, ordered by position then id.
fn neighbours<'a>(candidate: &'a Berth, berths: &'a [Berth]) -> Vec<&'a Berth> {
    let mut adjacent: Vec<&Berth> = berths
        .iter()
        .filter(|b| candidate.is_adjacent_to(b))
        .collect();
    adjacent.sort_by_key(|b| (b.position(), b.id()));
    adjacent
}

/// Decides where a vessel of `dimensions` may berth given the requested
/// `candidate` berth. The first matching rule wins:
///
/// 1. no candidate: feasible, no berths (anchorage);
/// 2. unknown candidate: infeasible;
/// 3. candidate held by another ship: infeasible;
/// 4. draft deeper than the candidate allows: infeasible;
/// 5. vessel fits the candidate alone: feasible, `{candidate}`;
/// 6. first free, draft-compatible neighbour (position ±1 on the same quay,
///    lowest position first, then lowest id) whose length added to the
///    candidate's covers the vessel: feasible, both berths;
/// 7. otherwise infeasible.
#[instrument(level = "debug", skip(berths, occupancy), fields(berths = berths.len()))]
pub fn allocate(
    dimensions: VesselDimensions,
    candidate: Option<BerthId>,
    berths: &[Berth],
    occupancy: &BerthOccupancy,
) -> AllocationDecision {
    let decision = decide(dimensions, candidate, berths, occupancy);
    debug!(feasible = decision.is_feasible(), reason = %decision.reason(), "Allocation decided");
    decision
}

fn decide(
    dimensions: VesselDimensions,
    candidate: Option<BerthId>,
    berths: &[Berth],
    occupancy: &BerthOccupancy,
) -> AllocationDecision {
    let Some(candidate) = candidate else {
        return AllocationDecision::feasible(Vec::new(), AllocationReason::Unassigned);
    };
    let Some(berth) = berths.iter().find(|b| b.id() == candidate) else {
        return AllocationDecision::infeasible(AllocationReason::BerthNotFound { berth: candidate });
    };
    if let Some(occupant) = occupancy.occupant(berth.id()) {
        return AllocationDecision::infeasible(AllocationReason::Occupied {
            berth: berth.name().to_owned(),
            occupant: occupant.clone(),
        });
    }
    if dimensions.draft() > berth.max_draft() {
        return AllocationDecision::infeasible(AllocationReason::DraftExceeded {
            berth: berth.name().to_owned(),
            draft: dimensions.draft(),
            max_draft: berth.max_draft(),
        });
    }
    if dimensions.length() <= berth.max_length() {
        return AllocationDecision::feasible(
            vec![berth.id()],
            AllocationReason::Fits {
                berth: berth.name().to_owned(),
            },
        );
    }

    for adjacent in neighbours(berth, berths) {
        if occupancy.is_occupied(adjacent.id()) || dimensions.draft() > adjacent.max_draft() {
            continue;
        }
        let combined_length = berth.max_length() + adjacent.max_length();
        if combined_length >= dimensions.length() {
            return AllocationDecision::feasible(
                vec![berth.id(), adjacent.id()],
                AllocationReason::Combined {
                    first: berth.name().to_owned(),
                    second: adjacent.name().to_owned(),
                    combined_length,
                },
            );
        }
    }

    AllocationDecision::infeasible(AllocationReason::TooLong {
        length: dimensions.length(),
        max_length: berth.max_length(),
    })
}

/// A validated berth list: ids are unique, `(quay, position)` pairs are
/// unique and every berth has positive limits.
#[derive(Debug, Clone, PartialEq)]
pub struct BerthTopology {
    berths: Vec<Berth>,
    index: HashMap<BerthId, usize>,
}

impl BerthTopology {
    pub fn new(berths: Vec<Berth>) -> Result<Self, TopologyError> {
        let mut index = HashMap::with_capacity(berths.len());
        let mut slots: HashMap<(QuayId, i64), BerthId> = HashMap::with_capacity(berths.len());
        for (i, berth) in berths.iter().enumerate() {
            if !berth.max_length().is_positive() || !berth.max_draft().is_positive() {
                return Err(InvalidBerthLimitsError::new(
                    berth.id(),
                    berth.max_length(),
                    berth.max_draft(),
                )
                .into());
            }
            if index.insert(berth.id(), i).is_some() {
                return Err(DuplicateBerthIdError::new(berth.id()).into());
            }
            if let Some(first) = slots.insert((berth.quay(), berth.position()), berth.id()) {
                return Err(DuplicateBerthPositionError::new(
                    berth.quay(),
                    berth.position(),
                    first,
                    berth.id(),
                )
                .into());
            }
        }
        Ok(Self { berths, index })
    }

    #[inline]
    pub fn berths(&self) -> &[Berth] {
        &self.berths
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.berths.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.berths.is_empty()
    }

    #[inline]
    pub fn get(&self, id: BerthId) -> Option<&Berth> {
        self.index.get(&id).map(|&i| &self.berths[i])
    }

    #[inline]
    pub fn name_of(&self, id: BerthId) -> Option<&str> {
        self.get(id).map(Berth::name)
    }

    /// Berths adjacent to `id`, ordered by position then id.
    pub fn neighbours(&self, id: BerthId) -> Vec<&Berth> {
        match self.get(id) {
            Some(berth) => neighbours(berth, &self.berths),
            None => Vec::new(),
        }
    }

    #[inline]
    pub fn allocate(
        &self,
        dimensions: VesselDimensions,
        candidate: Option<BerthId>,
        occupancy: &BerthOccupancy,
    ) -> AllocationDecision {
        allocate(dimensions, candidate, &self.berths, occupancy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portops_model::{berth::BerthKind, id::PortId};

    const A: BerthId = BerthId::new(1);
    const B: BerthId = BerthId::new(2);

    fn berth(id: u64, quay: u64, position: i64, length: f64, draft: f64) -> Berth {
        Berth::new(
            BerthId::new(id),
            QuayId::new(quay),
            format!("Berth {}", (b'A' + (id - 1) as u8) as char),
            position,
            Meters::new(length),
            Meters::new(draft),
            BerthKind::Berth,
        )
    }

    fn quay_ab() -> Vec<Berth> {
        vec![berth(1, 1, 1, 100.0, 10.0), berth(2, 1, 2, 80.0, 10.0)]
    }

    fn vessel(length: f64, draft: f64) -> VesselDimensions {
        VesselDimensions::new(Meters::new(length), Meters::new(draft))
    }

    fn holder(id: u64, name: &str) -> Occupant {
        Occupant::new(ShipId::new(id), name)
    }

    #[test]
    fn test_no_candidate_is_anchorage() {
        let d = allocate(vessel(500.0, 30.0), None, &quay_ab(), &BerthOccupancy::new());
        assert!(d.is_feasible());
        assert!(d.berths().is_empty());
        assert_eq!(d.message(), "unassigned/anchorage");
    }

    #[test]
    fn test_unknown_candidate() {
        let d = allocate(
            vessel(50.0, 5.0),
            Some(BerthId::new(99)),
            &quay_ab(),
            &BerthOccupancy::new(),
        );
        assert!(!d.is_feasible());
        assert!(matches!(d.reason(), AllocationReason::BerthNotFound { .. }));
    }

    #[test]
    fn test_occupied_candidate_names_holder() {
        let mut occ = BerthOccupancy::new();
        occ.insert(A, holder(7, "MV Blocker"));
        let d = allocate(vessel(50.0, 5.0), Some(A), &quay_ab(), &occ);
        assert!(!d.is_feasible());
        assert!(d.message().contains("MV Blocker"));
    }

    #[test]
    fn test_draft_checked_before_length() {
        let d = allocate(vessel(500.0, 12.0), Some(A), &quay_ab(), &BerthOccupancy::new());
        assert!(!d.is_feasible());
        assert_eq!(
            d.reason(),
            &AllocationReason::DraftExceeded {
                berth: "Berth A".into(),
                draft: Meters::new(12.0),
                max_draft: Meters::new(10.0),
            }
        );
    }

    #[test]
    fn test_fits_single_berth() {
        let d = allocate(vessel(100.0, 10.0), Some(A), &quay_ab(), &BerthOccupancy::new());
        assert!(d.is_feasible());
        assert_eq!(d.berths(), &[A]);
    }

    #[test]
    fn test_spans_adjacent_berth() {
        let d = allocate(vessel(150.0, 8.0), Some(A), &quay_ab(), &BerthOccupancy::new());
        assert!(d.is_feasible());
        assert_eq!(d.berths(), &[A, B]);
        assert!(matches!(d.reason(), AllocationReason::Combined { .. }));
    }

    #[test]
    fn test_combined_berths_are_sorted() {
        let d = allocate(vessel(150.0, 8.0), Some(B), &quay_ab(), &BerthOccupancy::new());
        assert!(d.is_feasible());
        assert_eq!(d.berths(), &[A, B]);
    }

    #[test]
    fn test_exceeds_combined_capacity() {
        let d = allocate(vessel(250.0, 8.0), Some(A), &quay_ab(), &BerthOccupancy::new());
        assert!(!d.is_feasible());
        assert!(d.berths().is_empty());
        assert!(d.message().starts_with("vessel too long"));
    }

    #[test]
    fn test_occupied_neighbour_is_skipped() {
        let mut occ = BerthOccupancy::new();
        occ.insert(B, holder(3, "MV Other"));
        let d = allocate(vessel(150.0, 8.0), Some(A), &quay_ab(), &occ);
        assert!(!d.is_feasible());
    }

    #[test]
    fn test_shallow_neighbour_is_skipped() {
        let berths = vec![berth(1, 1, 1, 100.0, 10.0), berth(2, 1, 2, 80.0, 6.0)];
        let d = allocate(vessel(150.0, 8.0), Some(A), &berths, &BerthOccupancy::new());
        assert!(!d.is_feasible());
    }

    #[test]
    fn test_other_quay_is_not_adjacent() {
        let berths = vec![berth(1, 1, 1, 100.0, 10.0), berth(2, 2, 2, 80.0, 10.0)];
        let d = allocate(vessel(150.0, 8.0), Some(A), &berths, &BerthOccupancy::new());
        assert!(!d.is_feasible());
    }

    #[test]
    fn test_lower_position_neighbour_wins_tie() {
        // Candidate C at position 2 between A (1) and B (3); both would fit.
        let berths = vec![
            berth(2, 1, 3, 80.0, 10.0),
            berth(1, 1, 1, 80.0, 10.0),
            berth(3, 1, 2, 100.0, 10.0),
        ];
        let d = allocate(
            vessel(150.0, 8.0),
            Some(BerthId::new(3)),
            &berths,
            &BerthOccupancy::new(),
        );
        assert_eq!(d.berths(), &[BerthId::new(1), BerthId::new(3)]);
    }

    #[test]
    fn test_occupancy_excludes_requesting_ship() {
        let dims = vessel(90.0, 5.0);
        let me = Ship::new(ShipId::new(1), "Self", PortId::new(1), dims).with_berths(vec![A]);
        let other = Ship::new(ShipId::new(2), "Other", PortId::new(1), dims).with_berths(vec![B]);
        let occ = BerthOccupancy::from_ships([&me, &other], Some(me.id()));
        assert!(!occ.is_occupied(A));
        assert_eq!(occ.occupant(B).map(Occupant::ship), Some(ShipId::new(2)));
        assert!(allocate(dims, Some(A), &quay_ab(), &occ).is_feasible());
    }

    #[test]
    fn test_topology_rejects_duplicate_position() {
        let berths = vec![berth(1, 1, 1, 100.0, 10.0), berth(2, 1, 1, 80.0, 10.0)];
        assert!(matches!(
            BerthTopology::new(berths),
            Err(TopologyError::DuplicatePosition(_))
        ));
    }

    #[test]
    fn test_topology_rejects_duplicate_id() {
        let berths = vec![berth(1, 1, 1, 100.0, 10.0), berth(1, 1, 2, 80.0, 10.0)];
        assert!(matches!(
            BerthTopology::new(berths),
            Err(TopologyError::DuplicateId(_))
        ));
    }

    #[test]
    fn test_topology_rejects_non_positive_limits() {
        let berths = vec![berth(1, 1, 1, 0.0, 10.0)];
        assert!(matches!(
            BerthTopology::new(berths),
            Err(TopologyError::InvalidLimits(_))
        ));
    }

    #[test]
    fn test_topology_lookup_and_allocate() {
        let topo = BerthTopology::new(quay_ab()).unwrap();
        assert_eq!(topo.name_of(B), Some("Berth B"));
        assert_eq!(topo.neighbours(A).len(), 1);
        let d = topo.allocate(vessel(150.0, 8.0), Some(A), &BerthOccupancy::new());
        assert_eq!(d.berths(), &[A, B]);
    }
}
