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

use serde::{Deserialize, Serialize};
use std::fmt::Display;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[repr(transparent)]
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            #[inline]
            pub const fn new(id: u64) -> Self {
                $name(id)
            }

            #[inline]
            pub const fn value(self) -> u64 {
                self.0
            }

            /// The id following this one, used when minting ids sequentially.
            #[inline]
            pub const fn next(self) -> Self {
                $name(self.0 + 1)
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($label, "({})"), self.0)
            }
        }

        impl From<u64> for $name {
            #[inline]
            fn from(value: u64) -> Self {
                $name(value)
            }
        }
    };
}

define_id!(
    /// Identifies a vessel across all of its trips.
    ShipId,
    "ShipId"
);
define_id!(BerthId, "BerthId");
define_id!(
    /// Groups berths into one physical quay; adjacency only exists within a quay.
    QuayId,
    "QuayId"
);
define_id!(PortId, "PortId");
define_id!(
    /// One continuous visit of a ship to a port.
    TripId,
    "TripId"
);
define_id!(EventId, "EventId");
define_id!(PilotId, "PilotId");
define_id!(AgentId, "AgentId");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", ShipId::new(7)), "ShipId(7)");
        assert_eq!(format!("{}", BerthId::new(2)), "BerthId(2)");
    }

    #[test]
    fn test_next_and_ordering() {
        let t = TripId::new(41);
        assert_eq!(t.next(), TripId::new(42));
        assert!(t < t.next());
    }

    #[test]
    fn test_serde_is_transparent() {
        assert_eq!(serde_json::to_string(&PilotId::new(3)).unwrap(), "3");
        let id: EventId = serde_json::from_str("12").unwrap();
        assert_eq!(id, EventId::new(12));
    }
}
