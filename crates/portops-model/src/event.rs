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

//! Movement events: the immutable records of the movement ledger.
//!
//! An event carries a [`MovementKind`] and a [`MovementDetails`] payload. The
//! payload mirrors what the external store persists: every field is
//! optional, and an event whose payload lacks the field its kind requires is
//! *malformed*. The typed accessors ([`MovementEvent::berth_change`],
//! [`MovementEvent::status_change`], ...) return `None` for malformed events
//! so that folds over the ledger can skip them.

use crate::{
    id::{AgentId, BerthId, EventId, PilotId, PortId, ShipId, TripId},
    ship::ShipStatus,
};
use portops_core::time::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Location name of a ship that holds no berth.
pub const UNASSIGNED: &str = "Unassigned";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MovementKind {
    Created,
    StatusChange,
    BerthAssignment,
    PilotAssignment,
    AgentAssignment,
    AisUpdate,
    ManualLog,
    PortService,
}

impl Display for MovementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            MovementKind::Created => "Created",
            MovementKind::StatusChange => "Status Change",
            MovementKind::BerthAssignment => "Berth Assignment",
            MovementKind::PilotAssignment => "Pilot Assignment",
            MovementKind::AgentAssignment => "Agent Assignment",
            MovementKind::AisUpdate => "AIS Update",
            MovementKind::ManualLog => "Manual Log",
            MovementKind::PortService => "Port Service",
        };
        write!(f, "{s}")
    }
}

/// A before/after pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Change<T> {
    pub from: T,
    pub to: T,
}

impl<T: PartialEq> Change<T> {
    #[inline]
    pub fn new(from: T, to: T) -> Self {
        Self { from, to }
    }

    #[inline]
    pub fn is_noop(&self) -> bool {
        self.from == self.to
    }
}

/// The berths a ship occupies, with their names resolved at write time so
/// that renaming a berth later does not rewrite history.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BerthSet {
    #[serde(default)]
    ids: Vec<BerthId>,
    #[serde(default)]
    names: Vec<String>,
}

impl BerthSet {
    #[inline]
    pub fn empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn new(ids: Vec<BerthId>, names: Vec<String>) -> Self {
        Self { ids, names }
    }

    /// Builds the set for `ids` in ascending id order, looking every name
    /// up with `name_of`. Unknown ids fall back to their numeric form.
    pub fn resolve<'a, F>(ids: &[BerthId], name_of: F) -> Self
    where
        F: Fn(BerthId) -> Option<&'a str>,
    {
        let mut ids = ids.to_vec();
        ids.sort();
        ids.dedup();
        let names = ids
            .iter()
            .map(|&id| {
                name_of(id)
                    .map(str::to_owned)
                    .unwrap_or_else(|| format!("#{}", id.value()))
            })
            .collect();
        Self { ids, names }
    }

    #[inline]
    pub fn ids(&self) -> &[BerthId] {
        &self.ids
    }

    #[inline]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    #[inline]
    pub fn contains(&self, berth: BerthId) -> bool {
        self.ids.contains(&berth)
    }

    /// Human-readable location: the joined berth names, or [`UNASSIGNED`].
    ///
    /// ```
    /// use portops_model::{event::BerthSet, id::BerthId};
    ///
    /// assert_eq!(BerthSet::empty().location_name(), "Unassigned");
    /// let set = BerthSet::new(
    ///     vec![BerthId::new(1), BerthId::new(2)],
    ///     vec!["A".into(), "B".into()],
    /// );
    /// assert_eq!(set.location_name(), "A, B");
    /// ```
    pub fn location_name(&self) -> String {
        if self.ids.is_empty() {
            return UNASSIGNED.to_owned();
        }
        if self.names.len() == self.ids.len() {
            self.names.join(", ")
        } else {
            self.ids
                .iter()
                .map(|id| format!("#{}", id.value()))
                .collect::<Vec<_>>()
                .join(", ")
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MovementDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Change<ShipStatus>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub berths: Option<Change<BerthSet>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pilot: Option<Change<Option<PilotId>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent: Option<Change<Option<AgentId>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl MovementDetails {
    #[inline]
    pub fn status(change: Change<ShipStatus>) -> Self {
        Self {
            status: Some(change),
            ..Self::default()
        }
    }

    #[inline]
    pub fn berths(change: Change<BerthSet>) -> Self {
        Self {
            berths: Some(change),
            ..Self::default()
        }
    }

    #[inline]
    pub fn pilot(change: Change<Option<PilotId>>) -> Self {
        Self {
            pilot: Some(change),
            ..Self::default()
        }
    }

    #[inline]
    pub fn agent(change: Change<Option<AgentId>>) -> Self {
        Self {
            agent: Some(change),
            ..Self::default()
        }
    }

    #[inline]
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ManualKind {
    ManualLog,
    PortService,
}

impl From<ManualKind> for MovementKind {
    fn from(kind: ManualKind) -> Self {
        match kind {
            ManualKind::ManualLog => MovementKind::ManualLog,
            ManualKind::PortService => MovementKind::PortService,
        }
    }
}

/// An operator-supplied log line that is recorded regardless of the diff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManualEntry {
    kind: ManualKind,
    message: String,
}

impl ManualEntry {
    #[inline]
    pub fn new(kind: ManualKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    #[inline]
    pub fn log(message: impl Into<String>) -> Self {
        Self::new(ManualKind::ManualLog, message)
    }

    #[inline]
    pub fn service(message: impl Into<String>) -> Self {
        Self::new(ManualKind::PortService, message)
    }

    #[inline]
    pub fn kind(&self) -> ManualKind {
        self.kind
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementEvent {
    id: EventId,
    ship: ShipId,
    port: PortId,
    #[serde(default)]
    trip: Option<TripId>,
    kind: MovementKind,
    timestamp: Timestamp,
    #[serde(default)]
    details: MovementDetails,
}

impl MovementEvent {
    #[inline]
    pub fn new(
        id: EventId,
        ship: ShipId,
        port: PortId,
        trip: Option<TripId>,
        kind: MovementKind,
        timestamp: Timestamp,
        details: MovementDetails,
    ) -> Self {
        Self {
            id,
            ship,
            port,
            trip,
            kind,
            timestamp,
            details,
        }
    }

    #[inline]
    pub fn id(&self) -> EventId {
        self.id
    }

    #[inline]
    pub fn ship(&self) -> ShipId {
        self.ship
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
    pub fn kind(&self) -> MovementKind {
        self.kind
    }

    #[inline]
    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    #[inline]
    pub fn details(&self) -> &MovementDetails {
        &self.details
    }

    #[inline]
    pub fn status_change(&self) -> Option<&Change<ShipStatus>> {
        match self.kind {
            MovementKind::StatusChange => self.details.status.as_ref(),
            _ => None,
        }
    }

    #[inline]
    pub fn berth_change(&self) -> Option<&Change<BerthSet>> {
        match self.kind {
            MovementKind::BerthAssignment => self.details.berths.as_ref(),
            _ => None,
        }
    }

    #[inline]
    pub fn pilot_change(&self) -> Option<&Change<Option<PilotId>>> {
        match self.kind {
            MovementKind::PilotAssignment => self.details.pilot.as_ref(),
            _ => None,
        }
    }

    #[inline]
    pub fn agent_change(&self) -> Option<&Change<Option<AgentId>>> {
        match self.kind {
            MovementKind::AgentAssignment => self.details.agent.as_ref(),
            _ => None,
        }
    }

    #[inline]
    pub fn message(&self) -> Option<&str> {
        self.details.message.as_deref()
    }

    /// `true` for a well-formed berth assignment naming `berth` on either side.
    #[inline]
    pub fn touches_berth(&self, berth: BerthId) -> bool {
        self.berth_change()
            .is_some_and(|c| c.from.contains(berth) || c.to.contains(berth))
    }

    /// `true` for a well-formed status change into `LeftPort`.
    #[inline]
    pub fn is_departure(&self) -> bool {
        self.status_change()
            .is_some_and(|c| c.to == ShipStatus::LeftPort && c.from != ShipStatus::LeftPort)
    }
}

impl Display for MovementEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "MovementEvent({}, {}, {}, {})",
            self.id, self.ship, self.kind, self.timestamp
        )
    }
}
