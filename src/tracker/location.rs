use tracing::debug;

use crate::sensor::PositionFix;
use crate::surface::Surface;

/// Re-center the view only when the fix drifts this far from the current
/// view center, to keep the map still while the operator walks (meters).
pub const RECENTER_THRESHOLD_M: f64 = 500.0;

const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Tracks the operator's position: caches the latest fix, keeps the marker
/// on it, and owns the recentering decision.
pub struct LocationTracker {
    current_fix: Option<PositionFix>,
    view_center: Option<PositionFix>,
}

impl LocationTracker {
    pub fn new() -> Self {
        Self {
            current_fix: None,
            view_center: None,
        }
    }

    /// Latest cached fix, `None` until the first position event arrives.
    pub fn current_fix(&self) -> Option<PositionFix> {
        self.current_fix
    }

    pub fn on_fix(&mut self, fix: PositionFix, surface: &mut dyn Surface) {
        self.current_fix = Some(fix);
        surface.move_marker(fix);

        let recenter = match self.view_center {
            Some(center) => distance_m(center, fix) > RECENTER_THRESHOLD_M,
            None => true, // first fix always centers the view
        };
        if recenter {
            debug!("recentering view on {:.6}, {:.6}", fix.lat, fix.lon);
            self.view_center = Some(fix);
            surface.recenter(fix);
        }
    }
}

impl Default for LocationTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// Equirectangular ground distance, adequate at field-session scale.
pub fn distance_m(a: PositionFix, b: PositionFix) -> f64 {
    let mid_lat = ((a.lat + b.lat) / 2.0).to_radians();
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();
    let x = d_lon * mid_lat.cos();
    EARTH_RADIUS_M * (x * x + d_lat * d_lat).sqrt()
}
