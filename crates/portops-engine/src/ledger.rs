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

//! The movement ledger: an append-only log of movement events plus the
//! trip book that stamps them.
//!
//! Every append validates first and writes second, so a rejected update
//! leaves both the events and the trips untouched. All events derived from
//! one update share one timestamp and one trip id.

use crate::{
    diff::{BerthDirectory, MutationStamp, diff},
    err::{AlreadyRegisteredError, LedgerError, ShipMismatchError, UnknownShipError},
    trips::{TripBook, TripState},
};
use portops_core::time::Timestamp;
use portops_model::{
    event::{BerthSet, Change, ManualEntry, MovementDetails, MovementEvent, MovementKind},
    id::{BerthId, EventId, ShipId, TripId},
    scenario::Scenario,
    ship::{Ship, ShipStatus},
};
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, instrument, trace};

/// The result of one successful append.
#[derive(Debug, Clone, PartialEq)]
pub struct Appended<'l> {
    ship: Ship,
    events: &'l [MovementEvent],
}

impl<'l> Appended<'l> {
    /// The snapshot to store, stamped with its current trip.
    #[inline]
    pub fn ship(&self) -> &Ship {
        &self.ship
    }

    #[inline]
    pub fn into_ship(self) -> Ship {
        self.ship
    }

    #[inline]
    pub fn events(&self) -> &'l [MovementEvent] {
        self.events
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MovementLedger {
    events: Vec<MovementEvent>,
    trips: TripBook,
    registered: HashSet<ShipId>,
    next_event: EventId,
}

impl Default for MovementLedger {
    fn default() -> Self {
        Self::starting_at(EventId::new(1), TripId::new(1))
    }
}

impl MovementLedger {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// A ledger whose first event and trip ids are `first_event` and
    /// `first_trip`.
    pub fn starting_at(first_event: EventId, first_trip: TripId) -> Self {
        Self {
            events: Vec::new(),
            trips: TripBook::starting_at(first_trip),
            registered: HashSet::new(),
            next_event: first_event,
        }
    }

    #[inline]
    pub fn events(&self) -> &[MovementEvent] {
        &self.events
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    #[inline]
    pub fn trips(&self) -> &TripBook {
        &self.trips
    }

    #[inline]
    pub fn trip_state(&self, ship: ShipId) -> TripState {
        self.trips.state(ship)
    }

    #[inline]
    pub fn is_registered(&self, ship: ShipId) -> bool {
        self.registered.contains(&ship)
    }

    pub fn events_for_ship(&self, ship: ShipId) -> impl Iterator<Item = &MovementEvent> + '_ {
        self.events.iter().filter(move |e| e.ship() == ship)
    }

    pub fn events_for_trip(&self, trip: TripId) -> impl Iterator<Item = &MovementEvent> + '_ {
        self.events.iter().filter(move |e| e.trip() == Some(trip))
    }

    /// Well-formed berth assignments that name `berth` on either side.
    pub fn events_for_berth(&self, berth: BerthId) -> impl Iterator<Item = &MovementEvent> + '_ {
        self.events.iter().filter(move |e| e.touches_berth(berth))
    }

    fn mint(&mut self) -> EventId {
        let id = self.next_event;
        self.next_event = id.next();
        id
    }

    /// Stores `ship` with its berths in ascending id order, matching the
    /// berth sets written to its events.
    fn commit(&mut self, ship: Ship, events: Vec<MovementEvent>) -> Appended<'_> {
        let mut berths = ship.berths().to_vec();
        berths.sort();
        let ship = ship.with_berths(berths);
        let start = self.events.len();
        self.next_event = events.last().map_or(self.next_event, |e| e.id().next());
        self.events.extend(events);
        Appended {
            ship,
            events: &self.events[start..],
        }
    }

    /// Registers a new ship. Unless it is registered as already gone, its
    /// first trip is opened. A `Created` event is appended, followed by a
    /// berth assignment when the ship arrives already holding berths.
    #[instrument(level = "debug", skip(self, ship, names), fields(ship = %ship.id()))]
    pub fn register<D>(
        &mut self,
        ship: Ship,
        at: Timestamp,
        names: &D,
    ) -> Result<Appended<'_>, LedgerError>
    where
        D: BerthDirectory + ?Sized,
    {
        if self.registered.contains(&ship.id()) {
            return Err(AlreadyRegisteredError::new(ship.id()).into());
        }
        ship.validate()?;

        let trip = if ship.status().is_in_port() {
            Some(self.trips.open(ship.id(), ship.port(), at)?)
        } else {
            None
        };
        self.registered.insert(ship.id());

        let mut events = vec![MovementEvent::new(
            self.mint(),
            ship.id(),
            ship.port(),
            trip,
            MovementKind::Created,
            at,
            MovementDetails::message(format!("{} registered as {}", ship.name(), ship.status())),
        )];
        if !ship.berths().is_empty() {
            events.push(MovementEvent::new(
                self.mint(),
                ship.id(),
                ship.port(),
                trip,
                MovementKind::BerthAssignment,
                at,
                MovementDetails::berths(Change::new(
                    BerthSet::empty(),
                    names.berth_set(ship.berths()),
                )),
            ));
        }
        debug!(events = events.len(), ?trip, "Ship registered");
        Ok(self.commit(ship.with_trip(trip), events))
    }

    /// Records the transition from `old` to `new` at `at`.
    ///
    /// The new snapshot must satisfy the berth invariants and `old -> new`
    /// must be a legal status transition. A ship re-entering after a
    /// completed trip gets a fresh trip before its events are stamped; a
    /// ship leaving port has its trip completed at `at`.
    #[instrument(level = "debug", skip(self, old, new, names, manual), fields(ship = %old.id()))]
    pub fn record_update<D>(
        &mut self,
        old: &Ship,
        new: Ship,
        at: Timestamp,
        names: &D,
        manual: Option<&ManualEntry>,
    ) -> Result<Appended<'_>, LedgerError>
    where
        D: BerthDirectory + ?Sized,
    {
        if !self.registered.contains(&old.id()) {
            return Err(UnknownShipError::new(old.id()).into());
        }
        if new.id() != old.id() {
            return Err(ShipMismatchError::new(old.id(), new.id()).into());
        }
        new.validate()?;
        old.check_transition(&new)?;

        let leaving = old.status() != ShipStatus::LeftPort && new.status() == ShipStatus::LeftPort;
        let (trip, reopened) = match self.trips.state(new.id()) {
            TripState::Active(trip) => (Some(trip), false),
            _ if new.status().is_in_port() => {
                (Some(self.trips.open(new.id(), new.port(), at)?), true)
            }
            _ => (None, false),
        };

        let stamp = MutationStamp::new(new.port(), trip, at, self.next_event);
        let events = diff(old, &new, &stamp, names, manual);

        let (trip, departure) = if leaving && trip.is_some() {
            self.trips.close(new.id(), at)?;
            (None, Some(at))
        } else if reopened {
            (trip, None)
        } else {
            (trip, new.departure())
        };
        trace!(events = events.len(), leaving, reopened, "Update derived");

        let ship = new.with_trip(trip).with_departure(departure);
        Ok(self.commit(ship, events))
    }

    /// Appends a free-text position report from the AIS feed.
    pub fn record_ais(
        &mut self,
        ship: &Ship,
        at: Timestamp,
        message: impl Into<String>,
    ) -> Result<&MovementEvent, LedgerError> {
        if !self.registered.contains(&ship.id()) {
            return Err(UnknownShipError::new(ship.id()).into());
        }
        let event = MovementEvent::new(
            self.mint(),
            ship.id(),
            ship.port(),
            self.trips.active_trip(ship.id()),
            MovementKind::AisUpdate,
            at,
            MovementDetails::message(message),
        );
        self.events.push(event);
        Ok(&self.events[self.events.len() - 1])
    }
}

/// A scenario played through a ledger: the resulting log and the latest
/// snapshot of every ship.
#[derive(Debug, Clone, PartialEq)]
pub struct Replay {
    ledger: MovementLedger,
    ships: BTreeMap<ShipId, Ship>,
    as_of: Timestamp,
}

impl Replay {
    #[inline]
    pub fn ledger(&self) -> &MovementLedger {
        &self.ledger
    }

    #[inline]
    pub fn ships(&self) -> impl Iterator<Item = &Ship> + '_ {
        self.ships.values()
    }

    #[inline]
    pub fn ship(&self, id: ShipId) -> Option<&Ship> {
        self.ships.get(&id)
    }

    /// Timestamp of the last applied update.
    #[inline]
    pub fn as_of(&self) -> Timestamp {
        self.as_of
    }
}

/// Registers every arrival of `scenario`, then applies its updates in
/// order. Stops at the first rejected update.
#[instrument(
    level = "info",
    skip_all,
    fields(arrivals = scenario.arrivals().len(), updates = scenario.updates().len())
)]
pub fn replay<D>(scenario: &Scenario, names: &D) -> Result<Replay, LedgerError>
where
    D: BerthDirectory + ?Sized,
{
    let mut ledger = MovementLedger::new();
    let mut ships = BTreeMap::new();
    let mut as_of = Timestamp::epoch();

    for arrival in scenario.arrivals() {
        let stored = ledger
            .register(arrival.ship().clone(), arrival.at(), names)?
            .into_ship();
        ships.insert(stored.id(), stored);
        as_of = as_of.max(arrival.at());
    }
    for update in scenario.updates() {
        let id = update.ship().id();
        let old = ships.get(&id).ok_or_else(|| UnknownShipError::new(id))?;
        let stored = ledger
            .record_update(old, update.ship().clone(), update.at(), names, update.manual())?
            .into_ship();
        ships.insert(id, stored);
        as_of = as_of.max(update.at());
    }

    debug!(events = ledger.len(), trips = ledger.trips().trips().len(), "Replay finished");
    Ok(Replay {
        ledger,
        ships,
        as_of,
    })
}
