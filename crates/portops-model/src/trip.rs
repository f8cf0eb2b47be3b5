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
    err::TripAlreadyCompletedError,
    id::{PortId, ShipId, TripId},
};
use portops_core::time::{Duration, TimeWindow, Timestamp};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TripStatus {
    Active,
    Completed,
}

impl Display for TripStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TripStatus::Active => write!(f, "Active"),
            TripStatus::Completed => write!(f, "Completed"),
        }
    }
}

/// One continuous port visit. `Completed` is terminal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trip {
    id: TripId,
    ship: ShipId,
    port: PortId,
    arrival: Timestamp,
    departure: Option<Timestamp>,
    status: TripStatus,
}

impl Trip {
    #[inline]
    pub fn open(id: TripId, ship: ShipId, port: PortId, arrival: Timestamp) -> Self {
        Self {
            id,
            ship,
            port,
            arrival,
            departure: None,
            status: TripStatus::Active,
        }
    }

    #[inline]
    pub fn id(&self) -> TripId {
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
    pub fn arrival(&self) -> Timestamp {
        self.arrival
    }

    #[inline]
    pub fn departure(&self) -> Option<Timestamp> {
        self.departure
    }

    #[inline]
    pub fn status(&self) -> TripStatus {
        self.status
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.status == TripStatus::Active
    }

    pub fn close(&mut self, departure: Timestamp) -> Result<(), TripAlreadyCompletedError> {
        if let Some(previous) = self.departure {
            return Err(TripAlreadyCompletedError::new(self.id, previous));
        }
        self.departure = Some(departure);
        self.status = TripStatus::Completed;
        Ok(())
    }

    /// Time spent in port; open trips are measured up to `as_of`.
    #[inline]
    pub fn duration(&self, as_of: Timestamp) -> Duration {
        self.departure
            .unwrap_or(as_of)
            .saturating_since(self.arrival)
            .non_negative()
    }

    /// The `[arrival, departure)` window of a completed trip.
    #[inline]
    pub fn window(&self) -> Option<TimeWindow> {
        self.departure
            .and_then(|departure| TimeWindow::try_new(self.arrival, departure))
    }
}

impl Display for Trip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.departure {
            Some(d) => write!(
                f,
                "Trip({}, ship: {}, {} -> {}, {})",
                self.id, self.ship, self.arrival, d, self.status
            ),
            None => write!(
                f,
                "Trip({}, ship: {}, {} -> open, {})",
                self.id, self.ship, self.arrival, self.status
            ),
        }
    }
}
