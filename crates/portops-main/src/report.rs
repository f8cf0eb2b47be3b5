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

//! Scenario input files and the JSON report written by `portops`.

use portops_core::time::{Duration, TimeWindow, Timestamp};
use portops_engine::{
    alerts::{Alert, AlertThresholds, generate_alerts},
    allocation::{BerthOccupancy, BerthTopology},
    ledger::Replay,
    occupancy::{BerthOccupancyReport, occupancy_report},
    stays::{Stay, reconstruct_stays},
    trips::{TripSpan, reconstruct_trips},
};
use portops_model::{
    id::{BerthId, ShipId},
    scenario::Scenario,
    ship::ShipStatus,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// A berth request evaluated against the final state of the replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationRequest {
    pub ship: ShipId,
    #[serde(default)]
    pub berth: Option<BerthId>,
}

/// Occupancy window; either explicit bounds or a look-back from the end
/// of the scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowSpec {
    Between { start: Timestamp, end: Timestamp },
    Trailing { lookback: Duration },
}

impl WindowSpec {
    pub fn resolve(self, now: Timestamp) -> TimeWindow {
        match self {
            WindowSpec::Between { start, end } => TimeWindow::new(start, end),
            WindowSpec::Trailing { lookback } => TimeWindow::trailing(now, lookback),
        }
    }
}

impl Default for WindowSpec {
    fn default() -> Self {
        WindowSpec::Trailing {
            lookback: Duration::from_days(7),
        }
    }
}

/// What `portops` reads from disk: a scenario plus the questions to ask
/// about it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioFile {
    #[serde(flatten)]
    pub scenario: Scenario,
    #[serde(default)]
    pub allocations: Vec<AllocationRequest>,
    #[serde(default)]
    pub window: Option<WindowSpec>,
    #[serde(default)]
    pub thresholds: Option<AlertThresholds>,
    #[serde(default)]
    pub previous_alerts: Vec<Alert>,
}

impl ScenarioFile {
    /// A scenario with no requests attached and every setting defaulted.
    pub fn new(scenario: Scenario) -> Self {
        Self {
            scenario,
            allocations: Vec::new(),
            window: None,
            thresholds: None,
            previous_alerts: Vec::new(),
        }
    }

    /// Asks one berth for every ship left anchored by `replay`, spreading
    /// requests over the berths by ship id.
    pub fn request_anchored(&mut self, replay: &Replay) {
        let berths = self.scenario.berths();
        if berths.is_empty() {
            return;
        }
        let requests: Vec<AllocationRequest> = replay
            .ships()
            .filter(|s| s.status() == ShipStatus::Anchored)
            .map(|s| AllocationRequest {
                ship: s.id(),
                berth: Some(berths[(s.id().value() as usize) % berths.len()].id()),
            })
            .collect();
        self.allocations.extend(requests);
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AllocationOutcome {
    ship: ShipId,
    berth: Option<BerthId>,
    feasible: bool,
    berths: Vec<BerthId>,
    reason: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ShipStays {
    ship: ShipId,
    name: String,
    status: ShipStatus,
    stays: Vec<Stay>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    port: String,
    as_of: Timestamp,
    events: usize,
    allocations: Vec<AllocationOutcome>,
    trips: Vec<TripSpan>,
    stays: Vec<ShipStays>,
    window: TimeWindow,
    occupancy: Vec<BerthOccupancyReport>,
    thresholds: AlertThresholds,
    alerts: Vec<Alert>,
}

impl Report {
    pub fn build(
        input: &ScenarioFile,
        topology: &BerthTopology,
        replay: &Replay,
        thresholds: AlertThresholds,
    ) -> Self {
        let as_of = replay.as_of();
        let events = replay.ledger().events();

        let allocations = input
            .allocations
            .iter()
            .filter_map(|req| {
                let Some(ship) = replay.ship(req.ship) else {
                    warn!(ship = %req.ship, "Allocation request for unknown ship skipped");
                    return None;
                };
                let occupancy = BerthOccupancy::from_ships(replay.ships(), Some(ship.id()));
                let decision = topology.allocate(ship.dimensions(), req.berth, &occupancy);
                Some(AllocationOutcome {
                    ship: ship.id(),
                    berth: req.berth,
                    feasible: decision.is_feasible(),
                    berths: decision.berths().to_vec(),
                    reason: decision.message(),
                })
            })
            .collect();

        let stays = replay
            .ships()
            .map(|ship| {
                let own: Vec<_> = replay.ledger().events_for_ship(ship.id()).cloned().collect();
                ShipStays {
                    ship: ship.id(),
                    name: ship.name().to_owned(),
                    status: ship.status(),
                    stays: reconstruct_stays(&own, as_of),
                }
            })
            .collect();

        let window = input.window.unwrap_or_default().resolve(as_of);
        let alerts = generate_alerts(
            replay.ships(),
            input.scenario.port().location(),
            &thresholds,
            &input.previous_alerts,
        );

        Self {
            port: input.scenario.port().name().to_owned(),
            as_of,
            events: events.len(),
            allocations,
            trips: reconstruct_trips(events),
            stays,
            window,
            occupancy: occupancy_report(topology, events, window),
            thresholds,
            alerts,
        }
    }

    #[inline]
    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }

    #[inline]
    pub fn events(&self) -> usize {
        self.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portops_engine::ledger::replay;
    use portops_model::generator::{ScenarioGenConfigBuilder, ScenarioGenerator};

    fn generated() -> Scenario {
        ScenarioGenerator::new(
            ScenarioGenConfigBuilder::new()
                .quays(2)
                .berths_per_quay(3)
                .ships(4)
                .updates(60)
                .seed(99)
                .build()
                .unwrap(),
        )
        .generate()
    }

    #[test]
    fn test_synthesized_requests_survive_json() {
        let scenario = generated();
        let topology = BerthTopology::new(scenario.berths().to_vec()).unwrap();
        let replayed = replay(&scenario, &topology).unwrap();
        let mut file = ScenarioFile::new(scenario);
        file.request_anchored(&replayed);
        for req in &file.allocations {
            let ship = replayed.ship(req.ship).unwrap();
            assert_eq!(ship.status(), ShipStatus::Anchored);
            assert!(req.berth.is_some());
        }
        let json = serde_json::to_string(&file).unwrap();
        let back: ScenarioFile = serde_json::from_str(&json).unwrap();
        assert_eq!(back.allocations, file.allocations);
        assert_eq!(back.scenario.updates().len(), file.scenario.updates().len());
    }

    #[test]
    fn test_minimal_file_uses_defaults() {
        let json = r#"{
            "port": {"id": 1, "name": "Kiel", "location": {"latitude": 54.32, "longitude": 10.14}},
            "berths": [],
            "arrivals": []
        }"#;
        let file: ScenarioFile = serde_json::from_str(json).unwrap();
        assert!(file.allocations.is_empty());
        assert!(file.window.is_none());
        assert!(file.scenario.updates().is_empty());
    }

    #[test]
    fn test_report_covers_every_ship_and_berth() {
        let scenario = generated();
        let topology = BerthTopology::new(scenario.berths().to_vec()).unwrap();
        let replayed = replay(&scenario, &topology).unwrap();
        let mut file = ScenarioFile::new(scenario);
        file.request_anchored(&replayed);
        let report = Report::build(&file, &topology, &replayed, AlertThresholds::default());
        assert_eq!(report.stays.len(), 4);
        assert_eq!(report.occupancy.len(), 6);
        assert_eq!(report.events(), replayed.ledger().len());
        assert_eq!(report.window.end(), replayed.as_of());
        assert!(report.occupancy.iter().all(|o| (0.0..=100.0).contains(&o.percent())));
    }

    #[test]
    fn test_window_spec_json() {
        let spec: WindowSpec = serde_json::from_str(r#"{"between": {"start": 0, "end": 10}}"#).unwrap();
        assert_eq!(
            spec.resolve(Timestamp::from_millis(99)),
            TimeWindow::new(Timestamp::from_millis(0), Timestamp::from_millis(10))
        );
    }
}
