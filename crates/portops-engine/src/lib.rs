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

//! # Port Operations Engine (`portops-engine`)
//!
//! The algorithms of the port operations core, built on `portops-model`.
//! Read paths are pure functions over snapshots and event slices and are
//! safe to call from many threads at once. The only write path is the
//! [`ledger::MovementLedger`], which takes `&mut self` for every append.
//!
//! ## Modules
//!
//! - **`allocation`**: decides whether a vessel fits a requested berth,
//!   spanning one adjacent berth on the same quay when needed, and
//!   validates berth topologies.
//! - **`diff`**: turns an old/new ship snapshot pair into movement events,
//!   in the fixed order status, berths, pilot, agent.
//! - **`ledger`**: the append-only event log with its trip lifecycle, plus
//!   scenario replay.
//! - **`trips`**: trip states, fresh trip ids and trip reconstruction.
//! - **`stays`**: location stays per ship and visits per berth.
//! - **`occupancy`**: berth occupancy percentages over a time window.
//! - **`alerts`**: proximity alerts with acknowledgement carry-over.

pub mod alerts;
pub mod allocation;
pub mod diff;
pub mod err;
pub mod ledger;
pub mod occupancy;
pub mod stays;
pub mod trips;

pub mod prelude {
    pub use crate::alerts::{
        Alert, AlertId, AlertKind, AlertThresholds, AlertThresholdsBuilder, Severity, acknowledge,
        generate_alerts,
    };
    pub use crate::allocation::{
        AllocationDecision, AllocationReason, BerthOccupancy, BerthTopology, Occupant, allocate,
    };
    pub use crate::diff::{BerthDirectory, MutationStamp, changes, diff};
    pub use crate::err::{
        AlreadyRegisteredError, DuplicateBerthIdError, DuplicateBerthPositionError,
        InvalidBerthLimitsError, InvalidThresholdError, LedgerError, NoActiveTripError,
        ShipMismatchError, TopologyError, TripAlreadyActiveError, TripLifecycleError,
        UnknownShipError,
    };
    pub use crate::ledger::{Appended, MovementLedger, Replay, replay};
    pub use crate::occupancy::{
        BerthOccupancyReport, berth_transitions, occupancy_in, occupancy_percent,
        occupancy_report, occupied_time,
    };
    pub use crate::stays::{BerthVisit, Stay, reconstruct_berth_visits, reconstruct_stays};
    pub use crate::trips::{TripBook, TripSpan, TripState, reconstruct_trips};
}
