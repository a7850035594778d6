use chrono::{DateTime, SecondsFormat, Utc};
use tracing::{error, info, warn};

use crate::reading::{GroupBucket, Reading};
use crate::sensor::{OrientationSample, PositionFix};
use crate::store::PendingStore;
use crate::surface::Surface;
use crate::sync::Submit;
use crate::tracker::location::LocationTracker;
use crate::tracker::orientation::OrientationTracker;

/// Result of one user-triggered lock action.
#[derive(Debug, Clone, PartialEq)]
pub enum LockOutcome {
    /// Server accepted the reading; carries its first status message.
    Synced(String),
    /// Submission failed, reading appended to the pending queue.
    SavedOffline,
    /// Orientation permission unavailable, nothing sent.
    NoPermission,
    /// No GPS fix cached yet, nothing sent.
    NoFix,
}

/// One field session: owns both trackers, the group-id policy, the
/// participant id, the submitter and the offline queue. All event handlers
/// route through here instead of touching shared globals.
pub struct SessionController<S: Submit> {
    location: LocationTracker,
    orientation: OrientationTracker,
    bucket: GroupBucket,
    session_start: DateTime<Utc>,
    pango_id: String,
    submitter: S,
    pending: PendingStore,
}

impl<S: Submit> SessionController<S> {
    pub fn new(
        orientation: OrientationTracker,
        bucket: GroupBucket,
        pango_id: impl Into<String>,
        submitter: S,
        pending: PendingStore,
    ) -> Self {
        Self {
            location: LocationTracker::new(),
            orientation,
            bucket,
            session_start: Utc::now(),
            pango_id: pango_id.into(),
            submitter,
            pending,
        }
    }

    pub fn on_fix(&mut self, fix: PositionFix, surface: &mut dyn Surface) {
        self.location.on_fix(fix, surface);
    }

    pub fn on_orientation(&mut self, sample: OrientationSample, surface: &mut dyn Surface) {
        self.orientation.on_orientation(sample, surface);
    }

    /// The user-triggered lock action: make sure the sensors run, snapshot
    /// the freshest cached fix and heading into a Reading, and submit it.
    /// Every failure path ends in a user-facing alert; nothing propagates
    /// out of the handler.
    pub fn lock_and_sync(&mut self, surface: &mut dyn Surface) -> LockOutcome {
        if let Err(err) = self.orientation.request_sensor_access() {
            warn!("orientation access unavailable: {}", err);
            surface.alert("Compass access is required to record a bearing.");
            return LockOutcome::NoPermission;
        }

        let Some(fix) = self.location.current_fix() else {
            surface.alert("Waiting for GPS fix, try again in a moment.");
            return LockOutcome::NoFix;
        };

        let now = Utc::now();
        let reading = Reading {
            group_id: self.bucket.group_id(self.session_start, now),
            pango_id: self.pango_id.clone(),
            lat: fix.lat,
            lon: fix.lon,
            bearing: self.orientation.current_heading(),
            time: Some(now.to_rfc3339_opts(SecondsFormat::Millis, true)),
        };

        match self.submitter.submit(&reading) {
            Ok(message) => {
                info!("reading synced: {}", message);
                surface.alert(&message);
                LockOutcome::Synced(message)
            }
            Err(err) => {
                warn!("sync failed ({}), saving reading offline", err);
                match self.pending.append(reading) {
                    Ok(count) => {
                        surface.alert(&format!("Offline: reading saved locally ({} pending).", count));
                    }
                    Err(store_err) => {
                        error!("pending store write failed: {}", store_err);
                        surface.alert("Offline: reading could not be saved.");
                    }
                }
                LockOutcome::SavedOffline
            }
        }
    }
}
