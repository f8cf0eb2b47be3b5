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

//! Snapshot diffing: turns an old/new pair of ship snapshots into the
//! movement events that describe the change.

use crate::allocation::BerthTopology;
use portops_core::time::Timestamp;
use portops_model::{
    berth::Berth,
    event::{BerthSet, Change, ManualEntry, MovementDetails, MovementEvent, MovementKind},
    id::{BerthId, EventId, PortId, TripId},
    ship::Ship,
};
use std::collections::HashMap;
use tracing::trace;

/// Resolves berth ids to display names at write time.
pub trait BerthDirectory {
    fn berth_name(&self, id: BerthId) -> Option<&str>;

    fn berth_set(&self, ids: &[BerthId]) -> BerthSet {
        BerthSet::resolve(ids, |id| self.berth_name(id))
    }
}

impl BerthDirectory for BerthTopology {
    #[inline]
    fn berth_name(&self, id: BerthId) -> Option<&str> {
        self.name_of(id)
    }
}

impl BerthDirectory for [Berth] {
    fn berth_name(&self, id: BerthId) -> Option<&str> {
        self.iter().find(|b| b.id() == id).map(Berth::name)
    }
}

impl BerthDirectory for HashMap<BerthId, String> {
    #[inline]
    fn berth_name(&self, id: BerthId) -> Option<&str> {
        self.get(&id).map(String::as_str)
    }
}

/// The shared envelope of every event derived from one mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MutationStamp {
    port: PortId,
    trip: Option<TripId>,
    timestamp: Timestamp,
    first_event: EventId,
}

impl MutationStamp {
    #[inline]
    pub fn new(
        port: PortId,
        trip: Option<TripId>,
        timestamp: Timestamp,
        first_event: EventId,
    ) -> Self {
        Self {
            port,
            trip,
            timestamp,
            first_event,
        }
    }

    #[inline]
    pub fn port(&self) -> PortId {
        self.port
    }

    #[inline]
    pub fn trip(&self) -> Option<TripId> {
        self.trip
    }

    #[inline]
    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    #[inline]
    pub fn first_event(&self) -> EventId {
        self.first_event
    }
}

fn same_berths(a: &[BerthId], b: &[BerthId]) -> bool {
    let mut a = a.to_vec();
    let mut b = b.to_vec();
    a.sort();
    b.sort();
    a == b
}

/// The tracked field changes between two snapshots of the same ship, in
/// precedence order: status, berths, pilot, agent.
pub fn changes<D>(old: &Ship, new: &Ship, names: &D) -> Vec<(MovementKind, MovementDetails)>
where
    D: BerthDirectory + ?Sized,
{
    let mut out = Vec::with_capacity(4);
    if old.status() != new.status() {
        out.push((
            MovementKind::StatusChange,
            MovementDetails::status(Change::new(old.status(), new.status())),
        ));
    }
    if !same_berths(old.berths(), new.berths()) {
        out.push((
            MovementKind::BerthAssignment,
            MovementDetails::berths(Change::new(
                names.berth_set(old.berths()),
                names.berth_set(new.berths()),
            )),
        ));
    }
    if old.pilot() != new.pilot() {
        out.push((
            MovementKind::PilotAssignment,
            MovementDetails::pilot(Change::new(old.pilot(), new.pilot())),
        ));
    }
    if old.agent() != new.agent() {
        out.push((
            MovementKind::AgentAssignment,
            MovementDetails::agent(Change::new(old.agent(), new.agent())),
        ));
    }
    out
}

/// Derives the events for one mutation of `new.id()`.
///
/// Events are numbered consecutively from the stamp's first event id and
/// share its timestamp and trip. A `manual` entry is appended as one extra
/// event even when nothing else changed.
pub fn diff<D>(
    old: &Ship,
    new: &Ship,
    stamp: &MutationStamp,
    names: &D,
    manual: Option<&ManualEntry>,
) -> Vec<MovementEvent>
where
    D: BerthDirectory + ?Sized,
{
    let manual =
        manual.map(|m| (MovementKind::from(m.kind()), MovementDetails::message(m.message())));
    let mut id = stamp.first_event;
    let events: Vec<MovementEvent> = changes(old, new, names)
        .into_iter()
        .chain(manual)
        .map(|(kind, details)| {
            let event = MovementEvent::new(
                id,
                new.id(),
                stamp.port,
                stamp.trip,
                kind,
                stamp.timestamp,
                details,
            );
            id = id.next();
            event
        })
        .collect();
    trace!(ship = %new.id(), events = events.len(), "Snapshot diffed");
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use portops_core::measure::Meters;
    use portops_model::{
        id::{AgentId, PilotId, ShipId},
        ship::{ShipStatus, VesselDimensions},
    };

    fn names() -> HashMap<BerthId, String> {
        HashMap::from([
            (BerthId::new(1), "North 1".to_string()),
            (BerthId::new(2), "North 2".to_string()),
        ])
    }

    fn ship() -> Ship {
        Ship::new(
            ShipId::new(4),
            "MV Test",
            PortId::new(1),
            VesselDimensions::new(Meters::new(120.0), Meters::new(7.0)),
        )
    }

    fn stamp() -> MutationStamp {
        MutationStamp::new(
            PortId::new(1),
            Some(TripId::new(2)),
            Timestamp::from_millis(1_000),
            EventId::new(10),
        )
    }

    #[test]
    fn test_no_change_no_events() {
        let s = ship();
        assert!(diff(&s, &s, &stamp(), &names(), None).is_empty());
    }

    #[test]
    fn test_manual_entry_always_recorded() {
        let s = ship();
        let events = diff(&s, &s, &stamp(), &names(), Some(&ManualEntry::log("Hull inspected")));
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind(), MovementKind::ManualLog);
        assert_eq!(events[0].message(), Some("Hull inspected"));
    }

    #[test]
    fn test_precedence_and_shared_envelope() {
        let old = ship();
        let new = old
            .clone()
            .with_status(ShipStatus::Docked)
            .with_berths(vec![BerthId::new(1)])
            .with_pilot(Some(PilotId::new(3)))
            .with_agent(Some(AgentId::new(8)));
        let events = diff(&old, &new, &stamp(), &names(), Some(&ManualEntry::service("Bunkering")));
        let kinds: Vec<_> = events.iter().map(MovementEvent::kind).collect();
        assert_eq!(
            kinds,
            vec![
                MovementKind::StatusChange,
                MovementKind::BerthAssignment,
                MovementKind::PilotAssignment,
                MovementKind::AgentAssignment,
                MovementKind::PortService,
            ]
        );
        assert!(events.iter().all(|e| e.timestamp() == Timestamp::from_millis(1_000)));
        assert!(events.iter().all(|e| e.trip() == Some(TripId::new(2))));
        let ids: Vec<_> = events.iter().map(|e| e.id().value()).collect();
        assert_eq!(ids, vec![10, 11, 12, 13, 14]);
    }

    #[test]
    fn test_berth_change_resolves_names() {
        let old = ship().with_status(ShipStatus::Docked).with_berths(vec![BerthId::new(1)]);
        let new = old.clone().with_berths(vec![BerthId::new(2), BerthId::new(7)]);
        let events = diff(&old, &new, &stamp(), &names(), None);
        let change = events[0].berth_change().unwrap();
        assert_eq!(change.from.location_name(), "North 1");
        assert_eq!(change.to.location_name(), "North 2, #7");
    }

    #[test]
    fn test_reordered_berths_are_not_a_change() {
        let old = ship()
            .with_status(ShipStatus::Docked)
            .with_berths(vec![BerthId::new(1), BerthId::new(2)]);
        let new = old.clone().with_berths(vec![BerthId::new(2), BerthId::new(1)]);
        assert!(diff(&old, &new, &stamp(), &names(), None).is_empty());
    }

    #[test]
    fn test_slice_directory() {
        let berths = vec![Berth::new(
            BerthId::new(5),
            portops_model::id::QuayId::new(1),
            "East 5",
            1,
            Meters::new(200.0),
            Meters::new(12.0),
            portops_model::berth::BerthKind::Berth,
        )];
        assert_eq!(berths.as_slice().berth_name(BerthId::new(5)), Some("East 5"));
        assert_eq!(berths.as_slice().berth_name(BerthId::new(6)), None);
    }
}
