use tracing::info;

use crate::sensor::permission::PermissionStrategy;
use crate::sensor::{OrientationSample, SensorError};
use crate::surface::Surface;

/// Tracks the compass heading: owns the permission handshake, derives a
/// heading from each orientation sample, and drives the bearing readout and
/// crosshair rotation.
pub struct OrientationTracker {
    permission: Box<dyn PermissionStrategy>,
    started: bool,
    current_heading: f64,
}

impl OrientationTracker {
    pub fn new(permission: Box<dyn PermissionStrategy>) -> Self {
        Self {
            permission,
            started: false,
            current_heading: 0.0,
        }
    }

    /// Attach the orientation listener, asking the platform for permission
    /// first where one is required. Idempotent: once started, returns `Ok`
    /// without prompting again. A denial leaves the tracker not started, so
    /// the next user action asks again.
    pub fn request_sensor_access(&mut self) -> Result<(), SensorError> {
        if self.started {
            return Ok(());
        }
        self.permission.request()?;
        self.started = true;
        info!("orientation listener attached");
        Ok(())
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Latest cached heading in degrees. 0.0 until the first usable sample.
    pub fn current_heading(&self) -> f64 {
        self.current_heading
    }

    pub fn on_orientation(&mut self, sample: OrientationSample, surface: &mut dyn Surface) {
        if !self.started {
            return;
        }
        // A zero compass field reads as absent and falls back to the
        // derived angle, matching the shipped falsy-or chain.
        let heading = match sample.compass_heading {
            Some(h) if h != 0.0 => Some(h),
            _ => sample.alpha.map(|a| 360.0 - a),
        };
        let Some(heading) = heading else { return };
        // A zero heading is indistinguishable from "no reading" here, so an
        // exact due-north sample is dropped. Known defect, kept as shipped.
        if heading == 0.0 {
            return;
        }
        self.current_heading = heading;
        surface.set_bearing_text(heading.round() as i64);
        surface.rotate_crosshair(heading);
    }
}
