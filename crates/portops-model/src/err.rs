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
    id::{ShipId, TripId},
    ship::ShipStatus,
};
use portops_core::time::Timestamp;
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DockedWithoutBerthError {
    ship: ShipId,
}

impl DockedWithoutBerthError {
    #[inline]
    pub fn new(ship: ShipId) -> Self {
        Self { ship }
    }

    #[inline]
    pub fn ship(&self) -> ShipId {
        self.ship
    }
}

impl Display for DockedWithoutBerthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Ship {} is docked but has no berth assigned", self.ship)
    }
}

impl std::error::Error for DockedWithoutBerthError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BerthHeldWhileAwayError {
    ship: ShipId,
    status: ShipStatus,
    berth_count: usize,
}

impl BerthHeldWhileAwayError {
    #[inline]
    pub fn new(ship: ShipId, status: ShipStatus, berth_count: usize) -> Self {
        Self {
            ship,
            status,
            berth_count,
        }
    }

    #[inline]
    pub fn ship(&self) -> ShipId {
        self.ship
    }

    #[inline]
    pub fn status(&self) -> ShipStatus {
        self.status
    }

    #[inline]
    pub fn berth_count(&self) -> usize {
        self.berth_count
    }
}

impl Display for BerthHeldWhileAwayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Ship {} is {} but still holds {} berth(s)",
            self.ship, self.status, self.berth_count
        )
    }
}

impl std::error::Error for BerthHeldWhileAwayError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TooManyBerthsError {
    ship: ShipId,
    berth_count: usize,
}

impl TooManyBerthsError {
    #[inline]
    pub fn new(ship: ShipId, berth_count: usize) -> Self {
        Self { ship, berth_count }
    }

    #[inline]
    pub fn ship(&self) -> ShipId {
        self.ship
    }

    #[inline]
    pub fn berth_count(&self) -> usize {
        self.berth_count
    }
}

impl Display for TooManyBerthsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Ship {} occupies {} berths, at most 2 are allowed",
            self.ship, self.berth_count
        )
    }
}

impl std::error::Error for TooManyBerthsError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShipInvariantError {
    DockedWithoutBerth(DockedWithoutBerthError),
    BerthHeldWhileAway(BerthHeldWhileAwayError),
    TooManyBerths(TooManyBerthsError),
}

impl Display for ShipInvariantError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShipInvariantError::DockedWithoutBerth(e) => write!(f, "{}", e),
            ShipInvariantError::BerthHeldWhileAway(e) => write!(f, "{}", e),
            ShipInvariantError::TooManyBerths(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ShipInvariantError {}

impl From<DockedWithoutBerthError> for ShipInvariantError {
    fn from(err: DockedWithoutBerthError) -> Self {
        ShipInvariantError::DockedWithoutBerth(err)
    }
}

impl From<BerthHeldWhileAwayError> for ShipInvariantError {
    fn from(err: BerthHeldWhileAwayError) -> Self {
        ShipInvariantError::BerthHeldWhileAway(err)
    }
}

impl From<TooManyBerthsError> for ShipInvariantError {
    fn from(err: TooManyBerthsError) -> Self {
        ShipInvariantError::TooManyBerths(err)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StatusTransitionError {
    ship: ShipId,
    from: ShipStatus,
    to: ShipStatus,
}

impl StatusTransitionError {
    #[inline]
    pub fn new(ship: ShipId, from: ShipStatus, to: ShipStatus) -> Self {
        Self { ship, from, to }
    }

    #[inline]
    pub fn ship(&self) -> ShipId {
        self.ship
    }

    #[inline]
    pub fn from_status(&self) -> ShipStatus {
        self.from
    }

    #[inline]
    pub fn to_status(&self) -> ShipStatus {
        self.to
    }
}

impl Display for StatusTransitionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Ship {} cannot change status from {} to {}",
            self.ship, self.from, self.to
        )
    }
}

impl std::error::Error for StatusTransitionError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TripAlreadyCompletedError {
    trip: TripId,
    departure: Timestamp,
}

impl TripAlreadyCompletedError {
    #[inline]
    pub fn new(trip: TripId, departure: Timestamp) -> Self {
        Self { trip, departure }
    }

    #[inline]
    pub fn trip(&self) -> TripId {
        self.trip
    }

    #[inline]
    pub fn departure(&self) -> Timestamp {
        self.departure
    }
}

impl Display for TripAlreadyCompletedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Trip {} was already completed at {}",
            self.trip, self.departure
        )
    }
}

impl std::error::Error for TripAlreadyCompletedError {}
