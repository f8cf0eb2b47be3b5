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

use std::fmt::Display;

use portops_core::{
    geo::GeoPoint,
    measure::Meters,
    time::{Duration, Timestamp},
};
use rand::Rng;

use super::err::{InvalidRangeError, ScenarioGenConfigBuildError};

/// Configuration for synthetic port scenarios (metres, milliseconds).
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioGenConfig {
    pub(crate) quays: usize,
    pub(crate) berths_per_quay: usize,
    pub(crate) berth_length: (Meters, Meters),
    pub(crate) berth_draft: (Meters, Meters),

    pub(crate) ships: usize,
    pub(crate) ship_length: (Meters, Meters),
    pub(crate) ship_draft: (Meters, Meters),

    pub(crate) updates: usize,
    pub(crate) start: Timestamp,
    pub(crate) step: (Duration, Duration),
    pub(crate) manual_entry_probability: f64,

    pub(crate) pilots: u64,
    pub(crate) agents: u64,

    pub(crate) port_location: GeoPoint,
    pub(crate) approach_radius_nm: f64,

    pub(crate) seed: u64,
}

impl Default for ScenarioGenConfig {
    fn default() -> Self {
        Self {
            quays: 3,
            berths_per_quay: 4,
            berth_length: (Meters::new(120.0), Meters::new(300.0)),
            berth_draft: (Meters::new(9.0), Meters::new(16.0)),

            ships: 12,
            ship_length: (Meters::new(80.0), Meters::new(400.0)),
            ship_draft: (Meters::new(5.0), Meters::new(15.0)),

            updates: 200,
            start: Timestamp::from_millis(1_767_225_600_000), // 2026-01-01T00:00:00Z
            step: (Duration::from_minutes(10), Duration::from_hours(6)),
            manual_entry_probability: 0.1,

            pilots: 6,
            agents: 4,

            port_location: GeoPoint::new(53.5461, 9.9661),
            approach_radius_nm: 25.0,

            seed: 42,
        }
    }
}

impl ScenarioGenConfig {
    #[inline]
    pub fn quays(&self) -> usize {
        self.quays
    }

    #[inline]
    pub fn berths_per_quay(&self) -> usize {
        self.berths_per_quay
    }

    #[inline]
    pub fn ships(&self) -> usize {
        self.ships
    }

    #[inline]
    pub fn updates(&self) -> usize {
        self.updates
    }

    #[inline]
    pub fn start(&self) -> Timestamp {
        self.start
    }

    #[inline]
    pub fn port_location(&self) -> GeoPoint {
        self.port_location
    }

    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Display for ScenarioGenConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ScenarioGenConfig(quays: {}, berths/quay: {}, ships: {}, updates: {}, seed: {})",
            self.quays, self.berths_per_quay, self.ships, self.updates, self.seed
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioGenConfigBuilder {
    quays: Option<usize>,
    berths_per_quay: Option<usize>,
    ships: Option<usize>,
    updates: Option<usize>,
    base: ScenarioGenConfig,
}

impl Default for ScenarioGenConfigBuilder {
    fn default() -> Self {
        Self {
            quays: None,
            berths_per_quay: None,
            ships: None,
            updates: None,
            base: ScenarioGenConfig {
                seed: rand::rng().random(),
                ..ScenarioGenConfig::default()
            },
        }
    }
}

fn check_meters(
    name: &'static str,
    (min, max): (Meters, Meters),
) -> Result<(Meters, Meters), InvalidRangeError> {
    if min.is_positive() && max.is_positive() && min <= max {
        Ok((min, max))
    } else {
        Err(InvalidRangeError::new(name, min.value(), max.value()))
    }
}

impl ScenarioGenConfigBuilder {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn quays(mut self, v: usize) -> Self {
        self.quays = Some(v);
        self
    }
    pub fn berths_per_quay(mut self, v: usize) -> Self {
        self.berths_per_quay = Some(v);
        self
    }
    pub fn ships(mut self, v: usize) -> Self {
        self.ships = Some(v);
        self
    }
    pub fn updates(mut self, v: usize) -> Self {
        self.updates = Some(v);
        self
    }
    pub fn berth_length(mut self, min: Meters, max: Meters) -> Self {
        self.base.berth_length = (min, max);
        self
    }
    pub fn berth_draft(mut self, min: Meters, max: Meters) -> Self {
        self.base.berth_draft = (min, max);
        self
    }
    pub fn ship_length(mut self, min: Meters, max: Meters) -> Self {
        self.base.ship_length = (min, max);
        self
    }
    pub fn ship_draft(mut self, min: Meters, max: Meters) -> Self {
        self.base.ship_draft = (min, max);
        self
    }
    pub fn start(mut self, v: Timestamp) -> Self {
        self.base.start = v;
        self
    }
    pub fn step(mut self, min: Duration, max: Duration) -> Self {
        self.base.step = (min, max);
        self
    }
    pub fn manual_entry_probability(mut self, p: f64) -> Self {
        self.base.manual_entry_probability = p.clamp(0.0, 1.0);
        self
    }
    pub fn pilots(mut self, v: u64) -> Self {
        self.base.pilots = v;
        self
    }
    pub fn agents(mut self, v: u64) -> Self {
        self.base.agents = v;
        self
    }
    pub fn port_location(mut self, v: GeoPoint) -> Self {
        self.base.port_location = v;
        self
    }
    pub fn approach_radius_nm(mut self, v: f64) -> Self {
        self.base.approach_radius_nm = v.max(0.0);
        self
    }
    pub fn random_seed(mut self) -> Self {
        self.base.seed = rand::rng().random();
        self
    }
    #[inline]
    pub fn seed(mut self, v: u64) -> Self {
        self.base.seed = v;
        self
    }

    pub fn build(self) -> Result<ScenarioGenConfig, ScenarioGenConfigBuildError> {
        use ScenarioGenConfigBuildError::*;
        let quays = self.quays.ok_or(MissingQuays)?;
        let berths_per_quay = self.berths_per_quay.ok_or(MissingBerthsPerQuay)?;
        let ships = self.ships.ok_or(MissingShips)?;
        let updates = self.updates.ok_or(MissingUpdates)?;
        if quays == 0 || berths_per_quay == 0 {
            return Err(NoBerths);
        }

        let base = self.base;
        let berth_length = check_meters("berth_length", base.berth_length)?;
        let berth_draft = check_meters("berth_draft", base.berth_draft)?;
        let ship_length = check_meters("ship_length", base.ship_length)?;
        let ship_draft = check_meters("ship_draft", base.ship_draft)?;
        let (min_step, max_step) = base.step;
        if !min_step.is_positive() || min_step > max_step {
            return Err(InvalidRangeError::new(
                "step",
                min_step.as_millis() as f64,
                max_step.as_millis() as f64,
            )
            .into());
        }

        Ok(ScenarioGenConfig {
            quays,
            berths_per_quay,
            ships,
            updates,
            berth_length,
            berth_draft,
            ship_length,
            ship_draft,
            ..base
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> ScenarioGenConfigBuilder {
        ScenarioGenConfigBuilder::new()
            .quays(2)
            .berths_per_quay(3)
            .ships(4)
            .updates(10)
            .seed(7)
    }

    #[test]
    fn test_build_ok() {
        let cfg = complete().build().unwrap();
        assert_eq!(cfg.quays(), 2);
        assert_eq!(cfg.berths_per_quay(), 3);
        assert_eq!(cfg.seed(), 7);
    }

    #[test]
    fn test_missing_field() {
        let err = ScenarioGenConfigBuilder::new().quays(1).build().unwrap_err();
        assert_eq!(err, ScenarioGenConfigBuildError::MissingBerthsPerQuay);
    }

    #[test]
    fn test_zero_berths_rejected() {
        let err = complete().quays(0).build().unwrap_err();
        assert_eq!(err, ScenarioGenConfigBuildError::NoBerths);
    }

    #[test]
    fn test_inverted_range_rejected() {
        let err = complete()
            .ship_length(Meters::new(300.0), Meters::new(100.0))
            .build()
            .unwrap_err();
        match err {
            ScenarioGenConfigBuildError::InvalidRange(e) => assert_eq!(e.name(), "ship_length"),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_zero_step_rejected() {
        let err = complete()
            .step(Duration::from_millis(0), Duration::from_minutes(5))
            .build()
            .unwrap_err();
        assert!(matches!(err, ScenarioGenConfigBuildError::InvalidRange(_)));
    }
}
