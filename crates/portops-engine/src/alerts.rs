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

//! Proximity alerts for ships approaching the port.
//!
//! Alerts are recomputed from scratch on every run; the only state carried
//! over from a previous run is whether an operator acknowledged an alert.
//! An alert's id depends only on the ship and the alert kind, so the same
//! situation always maps to the same id.

use crate::err::InvalidThresholdError;
use portops_core::geo::{GeoPoint, NauticalMiles};
use portops_model::{
    id::ShipId,
    ship::{Ship, ShipStatus},
};
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, fmt::Display};
use tracing::{debug, instrument};

/// Distance limits, in nautical miles from the port center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlertThresholds {
    approaching_nm: f64,
    pilot_nm: f64,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            approaching_nm: 10.0,
            pilot_nm: 3.0,
        }
    }
}

fn check(name: &'static str, value: f64) -> Result<f64, InvalidThresholdError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(InvalidThresholdError::new(name, value))
    }
}

impl AlertThresholds {
    pub fn new(approaching_nm: f64, pilot_nm: f64) -> Result<Self, InvalidThresholdError> {
        Ok(Self {
            approaching_nm: check("approaching_nm", approaching_nm)?,
            pilot_nm: check("pilot_nm", pilot_nm)?,
        })
    }

    #[inline]
    pub fn approaching(&self) -> NauticalMiles {
        NauticalMiles::new(self.approaching_nm)
    }

    #[inline]
    pub fn pilot(&self) -> NauticalMiles {
        NauticalMiles::new(self.pilot_nm)
    }

    /// Re-checks values that may have bypassed [`AlertThresholds::new`],
    /// e.g. after deserialization.
    pub fn validate(&self) -> Result<(), InvalidThresholdError> {
        check("approaching_nm", self.approaching_nm)?;
        check("pilot_nm", self.pilot_nm)?;
        Ok(())
    }
}

impl Display for AlertThresholds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "AlertThresholds(approaching: {}, pilot: {})",
            self.approaching(),
            self.pilot()
        )
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AlertThresholdsBuilder {
    approaching_nm: Option<f64>,
    pilot_nm: Option<f64>,
}

impl AlertThresholdsBuilder {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn approaching_nm(mut self, v: f64) -> Self {
        self.approaching_nm = Some(v);
        self
    }

    pub fn pilot_nm(mut self, v: f64) -> Self {
        self.pilot_nm = Some(v);
        self
    }

    /// Unset thresholds take their default value.
    pub fn build(self) -> Result<AlertThresholds, InvalidThresholdError> {
        let defaults = AlertThresholds::default();
        AlertThresholds::new(
            self.approaching_nm.unwrap_or(defaults.approaching_nm),
            self.pilot_nm.unwrap_or(defaults.pilot_nm),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AlertKind {
    Approaching,
    PilotRequired,
}

impl AlertKind {
    #[inline]
    pub fn severity(self) -> Severity {
        match self {
            AlertKind::Approaching => Severity::Info,
            AlertKind::PilotRequired => Severity::Warning,
        }
    }

    #[inline]
    fn slug(self) -> &'static str {
        match self {
            AlertKind::Approaching => "approaching",
            AlertKind::PilotRequired => "pilot-required",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Info,
    Warning,
}

impl Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Orders by ship first, then kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AlertId {
    ship: ShipId,
    kind: AlertKind,
}

impl AlertId {
    #[inline]
    pub fn new(ship: ShipId, kind: AlertKind) -> Self {
        Self { ship, kind }
    }

    #[inline]
    pub fn ship(&self) -> ShipId {
        self.ship
    }

    #[inline]
    pub fn kind(&self) -> AlertKind {
        self.kind
    }
}

impl Display for AlertId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.kind.slug(), self.ship.value())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    id: AlertId,
    ship_name: String,
    severity: Severity,
    message: String,
    distance: NauticalMiles,
    acknowledged: bool,
}

impl Alert {
    #[inline]
    pub fn id(&self) -> AlertId {
        self.id
    }

    #[inline]
    pub fn ship(&self) -> ShipId {
        self.id.ship
    }

    #[inline]
    pub fn ship_name(&self) -> &str {
        &self.ship_name
    }

    #[inline]
    pub fn kind(&self) -> AlertKind {
        self.id.kind
    }

    #[inline]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[inline]
    pub fn distance(&self) -> NauticalMiles {
        self.distance
    }

    #[inline]
    pub fn is_acknowledged(&self) -> bool {
        self.acknowledged
    }
}

impl Display for Alert {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.id, self.message)
    }
}

fn alert(
    ship: &Ship,
    kind: AlertKind,
    distance: NauticalMiles,
    acknowledged: &HashSet<AlertId>,
) -> Alert {
    let id = AlertId::new(ship.id(), kind);
    let message = match kind {
        AlertKind::Approaching => format!("{} approaching port, {} out", ship.name(), distance),
        AlertKind::PilotRequired => {
            format!("{} is {} from port without a pilot", ship.name(), distance)
        }
    };
    Alert {
        id,
        ship_name: ship.name().to_owned(),
        severity: kind.severity(),
        message,
        distance,
        acknowledged: acknowledged.contains(&id),
    }
}

/// Computes the current alert set.
///
/// Only `Approaching` ships with a known position are considered. Within
/// the approaching radius a ship raises an info alert; within the pilot
/// radius and without a pilot it also raises a warning. An alert whose id
/// appears acknowledged in `previous` stays acknowledged. Output is sorted
/// by id, so equal inputs give equal output.
#[instrument(level = "debug", skip(ships, previous), fields(previous = previous.len()))]
pub fn generate_alerts<'a, I>(
    ships: I,
    port: GeoPoint,
    thresholds: &AlertThresholds,
    previous: &[Alert],
) -> Vec<Alert>
where
    I: IntoIterator<Item = &'a Ship>,
{
    let acknowledged: HashSet<AlertId> = previous
        .iter()
        .filter(|a| a.acknowledged)
        .map(|a| a.id)
        .collect();

    let mut alerts = Vec::new();
    for ship in ships {
        if ship.status() != ShipStatus::Approaching {
            continue;
        }
        let Some(position) = ship.position() else {
            continue;
        };
        let distance = position.distance_to(&port);
        if distance <= thresholds.approaching() {
            alerts.push(alert(ship, AlertKind::Approaching, distance, &acknowledged));
        }
        if distance <= thresholds.pilot() && ship.pilot().is_none() {
            alerts.push(alert(ship, AlertKind::PilotRequired, distance, &acknowledged));
        }
    }
    alerts.sort_by_key(|a| a.id);
    debug!(alerts = alerts.len(), "Alerts generated");
    alerts
}

/// Marks the alert `id` as acknowledged. Returns `false` if no such alert
/// exists.
pub fn acknowledge(alerts: &mut [Alert], id: AlertId) -> bool {
    match alerts.iter_mut().find(|a| a.id == id) {
        Some(alert) => {
            alert.acknowledged = true;
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portops_core::measure::Meters;
    use portops_model::{
        id::{PilotId, PortId},
        ship::VesselDimensions,
    };

    fn port() -> GeoPoint {
        GeoPoint::new(53.5461, 9.9661)
    }

    /// A point `nm` nautical miles due north of the port.
    fn north(nm: f64) -> GeoPoint {
        GeoPoint::new(port().latitude() + nm / 60.0, port().longitude())
    }

    fn ship(id: u64, nm: f64) -> Ship {
        Ship::new(
            ShipId::new(id),
            format!("MV {id}"),
            PortId::new(1),
            VesselDimensions::new(Meters::new(100.0), Meters::new(6.0)),
        )
        .with_position(Some(north(nm)))
    }

    #[test]
    fn test_thresholds_validation() {
        assert!(AlertThresholds::new(10.0, 2.0).is_ok());
        assert_eq!(
            AlertThresholds::new(-1.0, 2.0).unwrap_err().name(),
            "approaching_nm"
        );
        assert!(AlertThresholdsBuilder::new().pilot_nm(f64::NAN).build().is_err());
        let t = AlertThresholdsBuilder::new().pilot_nm(1.5).build().unwrap();
        assert_eq!(t.pilot().value(), 1.5);
        assert_eq!(t.approaching().value(), 10.0);
    }

    #[test]
    fn test_pilot_warning_inside_radius() {
        let ships = [ship(1, 2.0)];
        let alerts = generate_alerts(&ships, port(), &AlertThresholds::default(), &[]);
        let kinds: Vec<_> = alerts.iter().map(Alert::kind).collect();
        assert_eq!(kinds, vec![AlertKind::Approaching, AlertKind::PilotRequired]);
        assert_eq!(alerts[1].severity(), Severity::Warning);
        assert_eq!(alerts[1].id().to_string(), "pilot-required-1");
        assert!(!alerts[1].is_acknowledged());
    }

    #[test]
    fn test_pilot_on_board_suppresses_warning() {
        let ships = [ship(1, 2.0).with_pilot(Some(PilotId::new(4)))];
        let alerts = generate_alerts(&ships, port(), &AlertThresholds::default(), &[]);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].kind(), AlertKind::Approaching);
    }

    #[test]
    fn test_far_docked_or_unpositioned_ships_ignored() {
        let ships = [
            ship(1, 50.0),
            ship(2, 1.0).with_status(ShipStatus::Anchored),
            ship(3, 1.0).with_position(None),
        ];
        assert!(generate_alerts(&ships, port(), &AlertThresholds::default(), &[]).is_empty());
    }

    #[test]
    fn test_idempotent_and_keeps_acknowledgement() {
        let ships = [ship(2, 1.0), ship(1, 5.0)];
        let t = AlertThresholds::default();
        let mut first = generate_alerts(&ships, port(), &t, &[]);
        let warning = AlertId::new(ShipId::new(2), AlertKind::PilotRequired);
        assert!(acknowledge(&mut first, warning));
        let second = generate_alerts(&ships, port(), &t, &first);
        assert_eq!(second, first);
        let third = generate_alerts(&ships, port(), &t, &second);
        assert_eq!(third, second);
        assert!(third.iter().find(|a| a.id() == warning).unwrap().is_acknowledged());
    }

    #[test]
    fn test_alerts_drop_when_ship_moves_away() {
        let t = AlertThresholds::default();
        let mut alerts = generate_alerts(&[ship(1, 1.0)], port(), &t, &[]);
        acknowledge(&mut alerts, AlertId::new(ShipId::new(1), AlertKind::PilotRequired));
        let later = generate_alerts(&[ship(1, 30.0)], port(), &t, &alerts);
        assert!(later.is_empty());
        // Coming back raises a fresh, unacknowledged warning.
        let back = generate_alerts(&[ship(1, 1.0)], port(), &t, &later);
        assert!(back.iter().all(|a| !a.is_acknowledged()));
    }

    #[test]
    fn test_sorted_by_id() {
        let ships = [ship(3, 1.0), ship(1, 1.0), ship(2, 1.0)];
        let alerts = generate_alerts(&ships, port(), &AlertThresholds::default(), &[]);
        let ids: Vec<_> = alerts.iter().map(|a| a.id()).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
        assert_eq!(alerts[0].ship(), ShipId::new(1));
    }

    #[test]
    fn test_acknowledge_unknown_id() {
        let mut alerts: Vec<Alert> = Vec::new();
        let id = AlertId::new(ShipId::new(9), AlertKind::Approaching);
        assert!(!acknowledge(&mut alerts, id));
    }
}
