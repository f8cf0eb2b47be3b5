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

//! # Port Operations Model (`portops-model`)
//!
//! The data model shared by the engine and its callers. It builds on the
//! typed primitives of `portops-core`.
//!
//! ## Key Data Structures
//!
//! - **`Berth`**: a mooring location on a quay with length/draft limits.
//!   Berths on the same quay whose positions differ by one are adjacent.
//! - **`Ship`**: the current snapshot of a vessel: dimensions, status,
//!   the 0–2 berths it holds, pilot, agent, trip and position. `ShipStatus`
//!   is an explicit state machine with a transition table.
//! - **`Trip`**: one continuous visit, `Active` until the ship leaves port.
//! - **`MovementEvent`**: an immutable ledger record describing one tracked
//!   change (status, berths, pilot, agent) or a free-text log line.
//! - **`Scenario`**: a port, its berths and a chronological stream of ship
//!   updates, as consumed by the command line tool and produced by the
//!   seeded `ScenarioGenerator`.

pub mod berth;
pub mod err;
pub mod event;
pub mod generator;
pub mod id;
pub mod scenario;
pub mod ship;
pub mod trip;

pub mod prelude {
    pub use crate::berth::{Berth, BerthKind, Port};
    pub use crate::err::{
        BerthHeldWhileAwayError, DockedWithoutBerthError, ShipInvariantError,
        StatusTransitionError, TooManyBerthsError, TripAlreadyCompletedError,
    };
    pub use crate::event::{
        BerthSet, Change, ManualEntry, ManualKind, MovementDetails, MovementEvent, MovementKind,
        UNASSIGNED,
    };
    pub use crate::generator::{
        ScenarioGenConfig, ScenarioGenConfigBuildError, ScenarioGenConfigBuilder,
        ScenarioGenerator,
    };
    pub use crate::id::{AgentId, BerthId, EventId, PilotId, PortId, QuayId, ShipId, TripId};
    pub use crate::scenario::{Scenario, ShipUpdate};
    pub use crate::ship::{MAX_BERTHS_PER_SHIP, Ship, ShipStatus, VesselDimensions};
    pub use crate::trip::{Trip, TripStatus};
}
