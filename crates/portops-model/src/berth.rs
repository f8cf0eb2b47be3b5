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

use crate::id::{BerthId, PortId, QuayId};
use portops_core::{geo::GeoPoint, measure::Meters};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BerthKind {
    Quay,
    Berth,
    /// Open-water holding area, not a physical quay slot.
    Anchorage,
}

impl Display for BerthKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BerthKind::Quay => write!(f, "Quay"),
            BerthKind::Berth => write!(f, "Berth"),
            BerthKind::Anchorage => write!(f, "Anchorage"),
        }
    }
}

/// A mooring location with length and draft limits.
///
/// `position` orders berths within their quay. Two berths are adjacent when
/// they share a quay and their positions differ by exactly one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Berth {
    id: BerthId,
    quay: QuayId,
    name: String,
    position: i64,
    max_length: Meters,
    max_draft: Meters,
    kind: BerthKind,
}

impl Berth {
    #[inline]
    pub fn new(
        id: BerthId,
        quay: QuayId,
        name: impl Into<String>,
        position: i64,
        max_length: Meters,
        max_draft: Meters,
        kind: BerthKind,
    ) -> Self {
        Self {
            id,
            quay,
            name: name.into(),
            position,
            max_length,
            max_draft,
            kind,
        }
    }

    #[inline]
    pub fn id(&self) -> BerthId {
        self.id
    }

    #[inline]
    pub fn quay(&self) -> QuayId {
        self.quay
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn position(&self) -> i64 {
        self.position
    }

    #[inline]
    pub fn max_length(&self) -> Meters {
        self.max_length
    }

    #[inline]
    pub fn max_draft(&self) -> Meters {
        self.max_draft
    }

    #[inline]
    pub fn kind(&self) -> BerthKind {
        self.kind
    }

    #[inline]
    pub fn is_adjacent_to(&self, other: &Berth) -> bool {
        self.quay == other.quay && self.position.abs_diff(other.position) == 1
    }
}

impl Display for Berth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Berth({}, {:?}, quay: {}, pos: {}, max_length: {}, max_draft: {}, kind: {})",
            self.id, self.name, self.quay, self.position, self.max_length, self.max_draft, self.kind
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Port {
    id: PortId,
    name: String,
    location: GeoPoint,
}

impl Port {
    #[inline]
    pub fn new(id: PortId, name: impl Into<String>, location: GeoPoint) -> Self {
        Self {
            id,
            name: name.into(),
            location,
        }
    }

    #[inline]
    pub fn id(&self) -> PortId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn location(&self) -> GeoPoint {
        self.location
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn berth(id: u64, quay: u64, position: i64) -> Berth {
        Berth::new(
            BerthId::new(id),
            QuayId::new(quay),
            format!("B{id}"),
            position,
            Meters::new(100.0),
            Meters::new(10.0),
            BerthKind::Berth,
        )
    }

    #[test]
    fn test_adjacent_on_same_quay() {
        assert!(berth(1, 1, 1).is_adjacent_to(&berth(2, 1, 2)));
        assert!(berth(2, 1, 2).is_adjacent_to(&berth(1, 1, 1)));
    }

    #[test]
    fn test_not_adjacent_across_quays() {
        assert!(!berth(1, 1, 1).is_adjacent_to(&berth(2, 2, 2)));
    }

    #[test]
    fn test_not_adjacent_with_gap_or_same_position() {
        assert!(!berth(1, 1, 1).is_adjacent_to(&berth(2, 1, 3)));
        assert!(!berth(1, 1, 1).is_adjacent_to(&berth(2, 1, 1)));
    }
}
