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

//! Deterministic synthetic scenarios.
//!
//! The generator drives every ship through a plausible port visit
//! (approach, anchor, dock, shift, depart, leave, return) and emits one
//! [`ShipUpdate`] per step. Berths are handed out without overlap, ships
//! too long for a single free berth take two free adjacent ones, and
//! timestamps are strictly increasing. The same seed always yields the same
//! scenario.

mod config;
mod err;

pub use config::{ScenarioGenConfig, ScenarioGenConfigBuilder};
pub use err::{InvalidRangeError, ScenarioGenConfigBuildError};

use crate::{
    berth::{Berth, BerthKind, Port},
    event::ManualEntry,
    id::{AgentId, BerthId, PilotId, PortId, QuayId, ShipId},
    scenario::{Scenario, ShipUpdate},
    ship::{Ship, ShipStatus, VesselDimensions},
};
use portops_core::{
    geo::GeoPoint,
    measure::Meters,
    time::{Duration, Timestamp},
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::HashMap;

const SERVICE_MESSAGES: [&str; 4] = [
    "Bunkering completed",
    "Fresh water supplied",
    "Waste collection",
    "Provisions delivered",
];

pub struct ScenarioGenerator {
    config: ScenarioGenConfig,
    rng: ChaCha8Rng,
}

impl From<ScenarioGenConfig> for ScenarioGenerator {
    fn from(config: ScenarioGenConfig) -> Self {
        Self::new(config)
    }
}

impl ScenarioGenerator {
    pub fn new(config: ScenarioGenConfig) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(config.seed()),
            config,
        }
    }

    #[inline]
    pub fn config(&self) -> &ScenarioGenConfig {
        &self.config
    }

    #[inline]
    fn meters(&mut self, (min, max): (Meters, Meters)) -> Meters {
        let v = if min < max {
            self.rng.random_range(min.value()..=max.value())
        } else {
            min.value()
        };
        // Whole decimetres keep generated data readable.
        Meters::new((v * 10.0).round() / 10.0)
    }

    #[inline]
    fn step(&mut self) -> Duration {
        let (min, max) = self.config.step;
        Duration::from_millis(self.rng.random_range(min.as_millis()..=max.as_millis()))
    }

    fn pilot(&mut self) -> Option<PilotId> {
        (self.config.pilots > 0)
            .then(|| PilotId::new(self.rng.random_range(1..=self.config.pilots)))
    }

    fn agent(&mut self) -> Option<AgentId> {
        (self.config.agents > 0)
            .then(|| AgentId::new(self.rng.random_range(1..=self.config.agents)))
    }

    fn approach_position(&mut self) -> GeoPoint {
        let center = self.config.port_location;
        let radius_deg = self.config.approach_radius_nm / 60.0;
        let bearing = self.rng.random_range(0.0..std::f64::consts::TAU);
        let r = self.rng.random_range(0.0..=radius_deg.max(f64::EPSILON));
        GeoPoint::new(
            center.latitude() + r * bearing.cos(),
            center.longitude() + r * bearing.sin(),
        )
    }

    fn berths(&mut self) -> Vec<Berth> {
        let mut berths = Vec::with_capacity(self.config.quays * self.config.berths_per_quay);
        for q in 0..self.config.quays {
            for p in 0..self.config.berths_per_quay {
                let id = (q * self.config.berths_per_quay + p + 1) as u64;
                let max_length = self.meters(self.config.berth_length);
                let max_draft = self.meters(self.config.berth_draft);
                berths.push(Berth::new(
                    BerthId::new(id),
                    QuayId::new(q as u64 + 1),
                    format!("Q{}-{}", q + 1, p + 1),
                    p as i64 + 1,
                    max_length,
                    max_draft,
                    BerthKind::Berth,
                ));
            }
        }
        berths
    }

    pub fn generate(&mut self) -> Scenario {
        let port = Port::new(PortId::new(1), "Generated Port", self.config.port_location);
        let berths = self.berths();
        let mut occupancy: HashMap<BerthId, ShipId> = HashMap::new();

        let mut now = self.config.start;
        let mut ships = Vec::with_capacity(self.config.ships);
        let mut arrivals = Vec::with_capacity(self.config.ships);
        for i in 0..self.config.ships {
            let dimensions = VesselDimensions::new(
                self.meters(self.config.ship_length),
                self.meters(self.config.ship_draft),
            );
            let position = self.approach_position();
            let ship = Ship::new(
                ShipId::new(i as u64 + 1),
                format!("MV Synthetic {}", i + 1),
                port.id(),
                dimensions,
            )
            .with_position(Some(position));
            arrivals.push(ShipUpdate::new(now, ship.clone()));
            ships.push(ship);
            now += Duration::from_minutes(1);
        }

        let mut updates = Vec::with_capacity(self.config.updates);
        if ships.is_empty() {
            return Scenario::new(port, berths, arrivals, updates);
        }

        for _ in 0..self.config.updates {
            now += self.step();
            let idx = self.rng.random_range(0..ships.len());
            let next = self.advance(&ships[idx], &berths, &mut occupancy, now);
            let mut update = ShipUpdate::new(now, next.clone());
            if self.rng.random_bool(self.config.manual_entry_probability) {
                let msg = SERVICE_MESSAGES[self.rng.random_range(0..SERVICE_MESSAGES.len())];
                update = update.with_manual(ManualEntry::service(msg));
            }
            updates.push(update);
            ships[idx] = next;
        }

        Scenario::new(port, berths, arrivals, updates)
    }

    /// Picks a free berth (or a free adjacent pair) that fits `dimensions`.
    fn find_berths(
        &mut self,
        ship: ShipId,
        dimensions: VesselDimensions,
        berths: &[Berth],
        occupancy: &HashMap<BerthId, ShipId>,
    ) -> Option<Vec<BerthId>> {
        let free = |b: &Berth| {
            occupancy.get(&b.id()).is_none_or(|&holder| holder == ship)
                && dimensions.draft() <= b.max_draft()
        };

        let singles: Vec<&Berth> = berths
            .iter()
            .filter(|b| free(b) && dimensions.length() <= b.max_length())
            .collect();
        if !singles.is_empty() {
            let pick = singles[self.rng.random_range(0..singles.len())];
            return Some(vec![pick.id()]);
        }

        berths
            .iter()
            .filter(|a| free(a))
            .flat_map(move |a| {
                berths
                    .iter()
                    .filter(move |b| b.id() > a.id() && a.is_adjacent_to(b))
                    .map(move |b| (a, b))
            })
            .find(|(a, b)| free(b) && a.max_length() + b.max_length() >= dimensions.length())
            .map(|(a, b)| vec![a.id(), b.id()])
    }

    fn release(occupancy: &mut HashMap<BerthId, ShipId>, ship: &Ship) {
        for b in ship.berths() {
            if occupancy.get(b) == Some(&ship.id()) {
                occupancy.remove(b);
            }
        }
    }

    fn dock(
        &mut self,
        ship: &Ship,
        berths: &[Berth],
        occupancy: &mut HashMap<BerthId, ShipId>,
    ) -> Option<Ship> {
        let chosen = self.find_berths(ship.id(), ship.dimensions(), berths, occupancy)?;
        Self::release(occupancy, ship);
        for &b in &chosen {
            occupancy.insert(b, ship.id());
        }
        Some(
            ship.clone()
                .with_status(ShipStatus::Docked)
                .with_berths(chosen)
                .with_position(Some(self.config.port_location)),
        )
    }

    fn advance(
        &mut self,
        ship: &Ship,
        berths: &[Berth],
        occupancy: &mut HashMap<BerthId, ShipId>,
        now: Timestamp,
    ) -> Ship {
        match ship.status() {
            ShipStatus::Approaching => {
                let with_pilot = ship.clone().with_pilot(self.pilot());
                if self.rng.random_bool(0.5) {
                    if let Some(docked) = self.dock(&with_pilot, berths, occupancy) {
                        return docked;
                    }
                }
                with_pilot.with_status(ShipStatus::Anchored)
            }
            ShipStatus::Anchored => match self.dock(ship, berths, occupancy) {
                Some(docked) => docked,
                None => ship.clone().with_agent(self.agent()),
            },
            ShipStatus::Docked => {
                let roll: f64 = self.rng.random();
                if roll < 0.2 {
                    // Shift to another berth if one is free.
                    let mut without = occupancy.clone();
                    Self::release(&mut without, ship);
                    if let Some(chosen) =
                        self.find_berths(ship.id(), ship.dimensions(), berths, &without)
                    {
                        *occupancy = without;
                        for &b in &chosen {
                            occupancy.insert(b, ship.id());
                        }
                        return ship.clone().with_berths(chosen);
                    }
                    ship.clone().with_agent(self.agent())
                } else if roll < 0.7 {
                    Self::release(occupancy, ship);
                    ship.clone()
                        .with_status(ShipStatus::Departing)
                        .with_berths(Vec::new())
                        .with_pilot(self.pilot())
                } else {
                    ship.clone().with_agent(self.agent())
                }
            }
            ShipStatus::Departing => ship
                .clone()
                .with_status(ShipStatus::LeftPort)
                .with_pilot(None)
                .with_departure(Some(now))
                .with_position(None),
            ShipStatus::LeftPort => {
                let position = self.approach_position();
                ship.clone()
                    .with_status(ShipStatus::Approaching)
                    .with_departure(None)
                    .with_position(Some(position))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn generator(seed: u64) -> ScenarioGenerator {
        ScenarioGenConfigBuilder::new()
            .quays(2)
            .berths_per_quay(4)
            .ships(6)
            .updates(300)
            .seed(seed)
            .build()
            .expect("valid config")
            .into()
    }

    #[test]
    fn test_same_seed_same_scenario() {
        assert_eq!(generator(11).generate(), generator(11).generate());
    }

    #[test]
    fn test_berth_topology_shape() {
        let scenario = generator(3).generate();
        assert_eq!(scenario.berths().len(), 8);
        let keys: HashSet<_> = scenario
            .berths()
            .iter()
            .map(|b| (b.quay(), b.position()))
            .collect();
        assert_eq!(keys.len(), 8);
    }

    #[test]
    fn test_timestamps_strictly_increase() {
        let scenario = generator(5).generate();
        let times: Vec<_> = scenario
            .arrivals()
            .iter()
            .chain(scenario.updates())
            .map(ShipUpdate::at)
            .collect();
        assert!(times.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_snapshots_are_valid_and_transitions_legal() {
        let scenario = generator(9).generate();
        let mut current: HashMap<ShipId, Ship> = scenario
            .arrivals()
            .iter()
            .map(|u| (u.ship().id(), u.ship().clone()))
            .collect();
        for update in scenario.updates() {
            let next = update.ship();
            next.validate().expect("valid snapshot");
            let prev = &current[&next.id()];
            prev.check_transition(next).expect("legal transition");
            current.insert(next.id(), next.clone());
        }
    }

    #[test]
    fn test_no_two_ships_share_a_berth() {
        let scenario = generator(21).generate();
        let mut current: HashMap<ShipId, Ship> = scenario
            .arrivals()
            .iter()
            .map(|u| (u.ship().id(), u.ship().clone()))
            .collect();
        for update in scenario.updates() {
            current.insert(update.ship().id(), update.ship().clone());
            let mut seen = HashSet::new();
            for ship in current.values() {
                for b in ship.berths() {
                    assert!(seen.insert(*b), "berth {b} held twice");
                }
            }
        }
    }
}
