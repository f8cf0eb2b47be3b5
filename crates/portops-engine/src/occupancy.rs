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

//! Berth occupancy over a time window.
//!
//! A berth is *entered* by an assignment whose new berth set contains it
//! and whose old set does not, and *left* by the opposite. The occupancy of
//! a window is the fraction of it during which the berth was entered.

use crate::allocation::BerthTopology;
use num_traits::Zero;
use portops_core::time::{Duration, TimeWindow, Timestamp};
use portops_model::{event::MovementEvent, id::BerthId};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// The enter (`true`) and leave (`false`) instants of `berth`, in
/// chronological order. Malformed assignments are skipped.
pub fn berth_transitions(berth: BerthId, events: &[MovementEvent]) -> Vec<(Timestamp, bool)> {
    let mut transitions: Vec<(Timestamp, bool)> = events
        .iter()
        .filter_map(|e| {
            let change = e.berth_change()?;
            match (change.from.contains(berth), change.to.contains(berth)) {
                (false, true) => Some((e.timestamp(), true)),
                (true, false) => Some((e.timestamp(), false)),
                _ => None,
            }
        })
        .collect();
    transitions.sort_by_key(|&(at, _)| at);
    transitions
}

/// Time within `[start, end)` during which `berth` was occupied.
pub fn occupied_time(
    berth: BerthId,
    events: &[MovementEvent],
    start: Timestamp,
    end: Timestamp,
) -> Duration {
    if start >= end {
        return Duration::zero();
    }
    let transitions = berth_transitions(berth, events);
    let mut occupied = transitions
        .iter()
        .rev()
        .find(|&&(at, _)| at < start)
        .is_some_and(|&(_, entered)| entered);

    let mut cursor = start;
    let mut total = Duration::zero();
    for &(at, entered) in transitions.iter().filter(|&&(at, _)| at >= start && at <= end) {
        if occupied {
            total = total.saturating_add(at.saturating_since(cursor));
        }
        cursor = at;
        occupied = entered;
    }
    if occupied {
        total = total.saturating_add(end.saturating_since(cursor));
    }
    total
}

/// Percentage of `[start, end)` during which `berth` was occupied, in
/// `[0, 100]`. Empty or inverted windows yield zero.
pub fn occupancy_percent(
    berth: BerthId,
    events: &[MovementEvent],
    start: Timestamp,
    end: Timestamp,
) -> f64 {
    share(occupied_time(berth, events, start, end), start, end)
}

fn share(occupied: Duration, start: Timestamp, end: Timestamp) -> f64 {
    if start >= end {
        return 0.0;
    }
    let window = end.as_millis() as f64 - start.as_millis() as f64;
    (occupied.as_millis() as f64 / window * 100.0).clamp(0.0, 100.0)
}

/// [`occupancy_percent`] over a [`TimeWindow`], e.g. one built with
/// [`TimeWindow::trailing`].
#[inline]
pub fn occupancy_in(berth: BerthId, events: &[MovementEvent], window: TimeWindow) -> f64 {
    occupancy_percent(berth, events, window.start(), window.end())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BerthOccupancyReport {
    berth: BerthId,
    name: String,
    occupied: Duration,
    percent: f64,
}

impl BerthOccupancyReport {
    #[inline]
    pub fn berth(&self) -> BerthId {
        self.berth
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn occupied(&self) -> Duration {
        self.occupied
    }

    #[inline]
    pub fn percent(&self) -> f64 {
        self.percent
    }
}

/// Occupancy of every berth in `topology` over `window`, ordered by berth
/// id. Berths are evaluated in parallel.
#[instrument(
    level = "info",
    skip(topology, events),
    fields(berths = topology.len(), events = events.len())
)]
pub fn occupancy_report(
    topology: &BerthTopology,
    events: &[MovementEvent],
    window: TimeWindow,
) -> Vec<BerthOccupancyReport> {
    let mut report: Vec<BerthOccupancyReport> = topology
        .berths()
        .par_iter()
        .map(|berth| {
            let occupied = occupied_time(berth.id(), events, window.start(), window.end());
            BerthOccupancyReport {
                berth: berth.id(),
                name: berth.name().to_owned(),
                occupied,
                percent: share(occupied, window.start(), window.end()),
            }
        })
        .collect();
    report.sort_by_key(|r| r.berth);
    debug!(window = %window, "Occupancy report built");
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use portops_core::measure::Meters;
    use portops_model::{
        berth::{Berth, BerthKind},
        event::{BerthSet, Change, MovementDetails, MovementKind},
        id::{EventId, PortId, QuayId, ShipId},
    };

    const A: BerthId = BerthId::new(1);
    const B: BerthId = BerthId::new(2);

    fn set(ids: &[BerthId]) -> BerthSet {
        BerthSet::new(ids.to_vec(), ids.iter().map(|b| b.to_string()).collect())
    }

    fn assign(ms: i64, from: &[BerthId], to: &[BerthId]) -> MovementEvent {
        MovementEvent::new(
            EventId::new(ms as u64),
            ShipId::new(1),
            PortId::new(1),
            None,
            MovementKind::BerthAssignment,
            Timestamp::from_millis(ms),
            MovementDetails::berths(Change::new(set(from), set(to))),
        )
    }

    fn at(ms: i64) -> Timestamp {
        Timestamp::from_millis(ms)
    }

    #[test]
    fn test_never_occupied_is_zero() {
        let events = vec![assign(10, &[], &[B])];
        assert_eq!(occupancy_percent(A, &events, at(0), at(100)), 0.0);
    }

    #[test]
    fn test_occupied_before_window_is_full() {
        let events = vec![assign(-50, &[], &[A])];
        assert_eq!(occupancy_percent(A, &events, at(0), at(100)), 100.0);
    }

    #[test]
    fn test_partial_window() {
        let events = vec![assign(20, &[], &[A]), assign(70, &[A], &[])];
        assert_eq!(occupancy_percent(A, &events, at(0), at(100)), 50.0);
    }

    #[test]
    fn test_leave_inside_window_after_prior_enter() {
        let events = vec![assign(-10, &[], &[A]), assign(25, &[A], &[])];
        assert_eq!(occupancy_percent(A, &events, at(0), at(100)), 25.0);
    }

    #[test]
    fn test_empty_or_inverted_window_is_zero() {
        let events = vec![assign(-10, &[], &[A])];
        assert_eq!(occupancy_percent(A, &events, at(50), at(50)), 0.0);
        assert_eq!(occupancy_percent(A, &events, at(60), at(50)), 0.0);
    }

    #[test]
    fn test_shift_within_pair_keeps_berth_occupied() {
        let events = vec![assign(0, &[], &[A]), assign(40, &[A], &[A, B])];
        assert_eq!(occupancy_percent(A, &events, at(0), at(100)), 100.0);
        assert_eq!(occupancy_percent(B, &events, at(0), at(100)), 60.0);
    }

    #[test]
    fn test_adding_disjoint_interval_never_decreases() {
        let base = vec![assign(10, &[], &[A]), assign(30, &[A], &[])];
        let mut more = base.clone();
        more.push(assign(60, &[], &[A]));
        more.push(assign(80, &[A], &[]));
        let before = occupancy_percent(A, &base, at(0), at(100));
        let after = occupancy_percent(A, &more, at(0), at(100));
        assert!(after >= before);
        assert_eq!(after, 40.0);
    }

    #[test]
    fn test_malformed_assignment_skipped() {
        let malformed = MovementEvent::new(
            EventId::new(99),
            ShipId::new(1),
            PortId::new(1),
            None,
            MovementKind::BerthAssignment,
            at(10),
            MovementDetails::default(),
        );
        let events = vec![malformed, assign(50, &[], &[A])];
        assert_eq!(berth_transitions(A, &events), vec![(at(50), true)]);
        assert_eq!(occupancy_percent(A, &events, at(0), at(100)), 50.0);
    }

    #[test]
    fn test_extreme_window_does_not_overflow() {
        let events = vec![assign(0, &[], &[A])];
        let start = Timestamp::from_millis(i64::MIN);
        let end = Timestamp::from_millis(i64::MAX);
        let percent = occupancy_percent(A, &events, start, end);
        assert!((0.0..=100.0).contains(&percent));
        assert!(percent > 0.0);
    }

    #[test]
    fn test_rolling_window() {
        let events = vec![assign(0, &[], &[A])];
        let window = TimeWindow::trailing(at(1_000), Duration::from_millis(400));
        assert_eq!(occupancy_in(A, &events, window), 100.0);
    }

    #[test]
    fn test_report_covers_every_berth() {
        let berth = |id: u64, pos: i64| {
            Berth::new(
                BerthId::new(id),
                QuayId::new(1),
                format!("B{id}"),
                pos,
                Meters::new(100.0),
                Meters::new(10.0),
                BerthKind::Berth,
            )
        };
        let topology = BerthTopology::new(vec![berth(2, 2), berth(1, 1)]).unwrap();
        let events = vec![assign(0, &[], &[A])];
        let report = occupancy_report(&topology, &events, TimeWindow::new(at(0), at(100)));
        assert_eq!(report.len(), 2);
        assert_eq!(report[0].berth(), A);
        assert_eq!(report[0].percent(), 100.0);
        assert_eq!(report[0].occupied(), Duration::from_millis(100));
        assert_eq!(report[1].name(), "B2");
        assert_eq!(report[1].percent(), 0.0);
    }
}
