//! Proximity dedup engine: two-threshold hysteresis over open reports.

use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};
use vigil_geo::haversine_m;
use vigil_model::{Position, Report, ReportId};

/// Distance at which a report becomes eligible to fire, in meters.
pub const ENTER_RADIUS_M: f64 = 200.0;

/// Distance beyond which an armed report re-arms, in meters.
pub const EXIT_RADIUS_M: f64 = 1000.0;

/// Radii for the hysteresis band.
#[derive(Debug, Clone, Copy)]
pub struct ProximityConfig {
    /// Fire when distance ≤ this.
    pub enter_radius_m: f64,
    /// Re-arm when distance > this.
    pub exit_radius_m: f64,
}

impl Default for ProximityConfig {
    fn default() -> Self {
        Self {
            enter_radius_m: ENTER_RADIUS_M,
            exit_radius_m: EXIT_RADIUS_M,
        }
    }
}

impl ProximityConfig {
    /// Override both radii. The exit radius must not be smaller than the
    /// enter radius or the hysteresis band inverts.
    #[must_use]
    pub fn with_radii(mut self, enter_m: f64, exit_m: f64) -> Self {
        debug_assert!(enter_m <= exit_m);
        self.enter_radius_m = enter_m;
        self.exit_radius_m = exit_m;
        self
    }
}

/// Decides which open reports should fire a notification for the current
/// position, suppressing repeats until the device has left and re-entered.
///
/// The only state is the per-report arm flag: `true` means "inside the
/// ring and already notified", `false` means "eligible to fire on the next
/// inside-ring observation". Unknown reports start disarmed.
///
/// Pure aside from that table: the engine never delivers notifications
/// itself, the caller fires the returned ids.
#[derive(Debug, Default)]
pub struct ProximityEngine {
    config: ProximityConfig,
    armed: HashMap<ReportId, bool>,
}

impl ProximityEngine {
    /// Engine with the standard radii.
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine with custom radii.
    pub fn with_config(config: ProximityConfig) -> Self {
        Self {
            config,
            armed: HashMap::new(),
        }
    }

    /// Evaluate one position against the current open-report snapshot.
    ///
    /// Returns the report ids that must fire *this call*. Reports with
    /// status Done are ignored; a report with invalid coordinates is
    /// skipped (and logged) without blocking the rest. Arm-state entries
    /// for ids no longer in the open set are dropped on every call, so
    /// the table tracks the open-report count rather than cumulative
    /// history.
    pub fn evaluate(&mut self, position: &Position, reports: &[Report]) -> Vec<ReportId> {
        if let Err(err) = position.point.validate() {
            warn!(%err, "ignoring position with invalid coordinates");
            return Vec::new();
        }

        let mut fired = Vec::new();
        for report in reports.iter().filter(|r| r.is_open()) {
            if let Err(err) = report.location.validate() {
                warn!(report = %report.id, %err, "skipping report with invalid coordinates");
                continue;
            }

            let distance = haversine_m(position.point, report.location);
            let armed = self.armed.get(&report.id).copied().unwrap_or(false);

            if distance <= self.config.enter_radius_m && !armed {
                debug!(report = %report.id, distance, "entered notify radius");
                self.armed.insert(report.id.clone(), true);
                fired.push(report.id.clone());
            } else if distance > self.config.exit_radius_m && armed {
                debug!(report = %report.id, distance, "left exit radius, re-arming");
                self.armed.insert(report.id.clone(), false);
            }
            // Inside the hysteresis band: leave the arm state alone.
        }

        self.prune(reports);
        fired
    }

    /// Drop arm-state entries for reports no longer open.
    ///
    /// Also driven directly by snapshot-only updates (report closed or
    /// deleted while the device is stationary), so a long session does not
    /// accumulate entries for dead reports.
    pub fn prune(&mut self, reports: &[Report]) {
        let open: HashSet<&ReportId> = reports
            .iter()
            .filter(|r| r.is_open())
            .map(|r| &r.id)
            .collect();
        self.armed.retain(|id, _| open.contains(id));
    }

    /// Number of reports currently holding arm state.
    pub fn tracked(&self) -> usize {
        self.armed.len()
    }

    /// Whether a report is currently armed (notified and still inside).
    pub fn is_armed(&self, report: &ReportId) -> bool {
        self.armed.get(report).copied().unwrap_or(false)
    }
}
