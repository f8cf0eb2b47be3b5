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

//! Stay reconstruction: replays berth assignments into the intervals a
//! ship spent at each location, or a berth spent hosting each ship.

use portops_core::time::{Duration, Timestamp};
use portops_model::{
    event::{MovementEvent, UNASSIGNED},
    id::{BerthId, ShipId},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{instrument, trace};

/// Time spent at one location. Open stays have no departure and are
/// measured up to the `as_of` instant they were reconstructed at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stay {
    location: String,
    arrival: Timestamp,
    departure: Option<Timestamp>,
    duration: Duration,
}

impl Stay {
    #[inline]
    pub fn location(&self) -> &str {
        &self.location
    }

    #[inline]
    pub fn arrival(&self) -> Timestamp {
        self.arrival
    }

    #[inline]
    pub fn departure(&self) -> Option<Timestamp> {
        self.departure
    }

    #[inline]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        self.departure.is_none()
    }
}

fn chronological(events: &[MovementEvent]) -> Vec<&MovementEvent> {
    let mut sorted: Vec<&MovementEvent> = events.iter().collect();
    // Stable: events of one mutation share a timestamp and keep their order.
    sorted.sort_by_key(|e| e.timestamp());
    sorted
}

/// Replays the berth assignments among `events` (usually one ship's) into
/// stays, newest first.
///
/// Each change closes the stay at the location it leaves and opens one at
/// the location it enters; "Unassigned" never gets a stay. Assignments
/// whose two sides resolve to the same location are ignored, and malformed
/// assignments are skipped.
#[instrument(level = "debug", skip(events), fields(events = events.len()))]
pub fn reconstruct_stays(events: &[MovementEvent], as_of: Timestamp) -> Vec<Stay> {
    let mut open: HashMap<String, Timestamp> = HashMap::new();
    let mut stays = Vec::new();

    for event in chronological(events) {
        let Some(change) = event.berth_change() else {
            continue;
        };
        let from = change.from.location_name();
        let to = change.to.location_name();
        if from == to {
            continue;
        }
        let at = event.timestamp();
        if from != UNASSIGNED {
            if let Some(arrival) = open.remove(&from) {
                stays.push(Stay {
                    location: from,
                    arrival,
                    departure: Some(at),
                    duration: at.saturating_since(arrival),
                });
            }
        }
        if to != UNASSIGNED {
            open.insert(to, at);
        }
    }

    trace!(closed = stays.len(), open = open.len(), "Stays replayed");
    stays.extend(open.into_iter().map(|(location, arrival)| Stay {
        location,
        arrival,
        departure: None,
        duration: as_of.saturating_since(arrival),
    }));
    stays.sort_by(|a, b| {
        b.arrival
            .cmp(&a.arrival)
            .then_with(|| a.location.cmp(&b.location))
    });
    stays
}

/// One ship's time at one berth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BerthVisit {
    ship: ShipId,
    arrival: Timestamp,
    departure: Option<Timestamp>,
    duration: Duration,
}

impl BerthVisit {
    #[inline]
    pub fn ship(&self) -> ShipId {
        self.ship
    }

    #[inline]
    pub fn arrival(&self) -> Timestamp {
        self.arrival
    }

    #[inline]
    pub fn departure(&self) -> Option<Timestamp> {
        self.departure
    }

    #[inline]
    pub fn duration(&self) -> Duration {
        self.duration
    }
}

/// Replays `events` (any mix of ships) into the visits of `berth`, newest
/// first. A visit starts when the berth newly appears in a ship's berth set
/// and ends when it disappears; shifting between combinations that both
/// include the berth does not end the visit.
pub fn reconstruct_berth_visits(
    berth: BerthId,
    events: &[MovementEvent],
    as_of: Timestamp,
) -> Vec<BerthVisit> {
    let mut open: HashMap<ShipId, Timestamp> = HashMap::new();
    let mut visits = Vec::new();

    for event in chronological(events) {
        let Some(change) = event.berth_change() else {
            continue;
        };
        let before = change.from.contains(berth);
        let after = change.to.contains(berth);
        let at = event.timestamp();
        match (before, after) {
            (false, true) => {
                open.insert(event.ship(), at);
            }
            (true, false) => {
                if let Some(arrival) = open.remove(&event.ship()) {
                    visits.push(BerthVisit {
                        ship: event.ship(),
                        arrival,
                        departure: Some(at),
                        duration: at.saturating_since(arrival),
                    });
                }
            }
            _ => {}
        }
    }

    visits.extend(open.into_iter().map(|(ship, arrival)| BerthVisit {
        ship,
        arrival,
        departure: None,
        duration: as_of.saturating_since(arrival),
    }));
    visits.sort_by(|a, b| b.arrival.cmp(&a.arrival).then_with(|| a.ship.cmp(&b.ship)));
    visits
}
