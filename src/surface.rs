use tracing::{info, warn};

use crate::sensor::PositionFix;

/// The map/indicator surface the trackers draw to.
///
/// Marker moves, view recentering, the bearing readout and the crosshair
/// rotation all go through here, as do user-facing alerts. Tests substitute
/// a recording implementation.
pub trait Surface {
    fn move_marker(&mut self, fix: PositionFix);
    fn recenter(&mut self, fix: PositionFix);
    fn set_bearing_text(&mut self, degrees: i64);
    fn rotate_crosshair(&mut self, degrees: f64);
    fn alert(&mut self, message: &str);
}

/// Headless surface for the demo binary: draws nothing, logs everything.
pub struct ConsoleSurface;

impl Surface for ConsoleSurface {
    fn move_marker(&mut self, fix: PositionFix) {
        info!("marker moved to {:.6}, {:.6}", fix.lat, fix.lon);
    }

    fn recenter(&mut self, fix: PositionFix) {
        info!("view recentered on {:.6}, {:.6}", fix.lat, fix.lon);
    }

    fn set_bearing_text(&mut self, degrees: i64) {
        info!("bearing readout: {}°", degrees);
    }

    fn rotate_crosshair(&mut self, degrees: f64) {
        info!("crosshair rotated to {:.1}°", degrees);
    }

    fn alert(&mut self, message: &str) {
        warn!("alert: {}", message);
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    /// Records every surface call for assertions.
    pub struct RecordingSurface {
        pub markers: Vec<PositionFix>,
        pub centers: Vec<PositionFix>,
        pub bearing_texts: Vec<i64>,
        pub crosshair_rotations: Vec<f64>,
        pub alerts: Vec<String>,
    }

    impl RecordingSurface {
        pub fn new() -> Self {
            Self {
                markers: Vec::new(),
                centers: Vec::new(),
                bearing_texts: Vec::new(),
                crosshair_rotations: Vec::new(),
                alerts: Vec::new(),
            }
        }
    }

    impl Surface for RecordingSurface {
        fn move_marker(&mut self, fix: PositionFix) {
            self.markers.push(fix);
        }

        fn recenter(&mut self, fix: PositionFix) {
            self.centers.push(fix);
        }

        fn set_bearing_text(&mut self, degrees: i64) {
            self.bearing_texts.push(degrees);
        }

        fn rotate_crosshair(&mut self, degrees: f64) {
            self.crosshair_rotations.push(degrees);
        }

        fn alert(&mut self, message: &str) {
            self.alerts.push(message.to_string());
        }
    }
}
