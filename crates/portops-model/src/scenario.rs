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

use crate::{
    berth::{Berth, Port},
    event::ManualEntry,
    ship::Ship,
};
use portops_core::time::Timestamp;
use serde::{Deserialize, Serialize};

/// A new snapshot of one ship, as produced by the entity store's update path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipUpdate {
    at: Timestamp,
    ship: Ship,
    #[serde(default)]
    manual: Option<ManualEntry>,
}

impl ShipUpdate {
    #[inline]
    pub fn new(at: Timestamp, ship: Ship) -> Self {
        Self {
            at,
            ship,
            manual: None,
        }
    }

    #[inline]
    pub fn with_manual(mut self, manual: ManualEntry) -> Self {
        self.manual = Some(manual);
        self
    }

    #[inline]
    pub fn at(&self) -> Timestamp {
        self.at
    }

    #[inline]
    pub fn ship(&self) -> &Ship {
        &self.ship
    }

    #[inline]
    pub fn manual(&self) -> Option<&ManualEntry> {
        self.manual.as_ref()
    }
}

/// A port, its berth topology and a chronological stream of ship updates.
///
/// `arrivals` register ships (their first snapshot); `updates` are applied
/// afterwards in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    port: Port,
    berths: Vec<Berth>,
    arrivals: Vec<ShipUpdate>,
    #[serde(default)]
    updates: Vec<ShipUpdate>,
}

impl Scenario {
    #[inline]
    pub fn new(
        port: Port,
        berths: Vec<Berth>,
        arrivals: Vec<ShipUpdate>,
        updates: Vec<ShipUpdate>,
    ) -> Self {
        Self {
            port,
            berths,
            arrivals,
            updates,
        }
    }

    #[inline]
    pub fn port(&self) -> &Port {
        &self.port
    }

    #[inline]
    pub fn berths(&self) -> &[Berth] {
        &self.berths
    }

    #[inline]
    pub fn arrivals(&self) -> &[ShipUpdate] {
        &self.arrivals
    }

    #[inline]
    pub fn updates(&self) -> &[ShipUpdate] {
        &self.updates
    }

    /// Timestamp of the last arrival or update, if any.
    pub fn last_timestamp(&self) -> Option<Timestamp> {
        self.arrivals
            .iter()
            .chain(self.updates.iter())
            .map(ShipUpdate::at)
            .max()
    }
}
