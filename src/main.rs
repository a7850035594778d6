use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use tracing::{info, warn};
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cache::AssetCache;
use crate::config::Config;
use crate::sensor::scripted::ScriptedStream;
use crate::sensor::{OrientationSample, PositionFix, SampleStream, permission};
use crate::session::SessionController;
use crate::store::PendingStore;
use crate::surface::ConsoleSurface;
use crate::sync::SyncClient;
use crate::tracker::orientation::OrientationTracker;

pub mod cache;
pub mod config;
pub mod reading;
pub mod sensor;
pub mod session;
pub mod store;
pub mod surface;
pub mod sync;
pub mod tracker;

/// A short simulated walk north through Kathmandu, one fix per tick.
fn demo_position_script() -> Vec<PositionFix> {
    (0..12)
        .map(|i| PositionFix {
            lat: 27.7172 + 0.0008 * i as f64,
            lon: 85.3240,
        })
        .collect()
}

/// Slow sweep of the antenna from west toward north-west.
fn demo_orientation_script() -> Vec<OrientationSample> {
    (0..12)
        .map(|i| OrientationSample {
            alpha: Some(90.0 - 4.0 * i as f64),
            compass_heading: None,
        })
        .collect()
}

fn main() {
    let file_appender = rolling::daily("logs", "tracker.log");
    let (non_blocking_appender, _guard) = non_blocking(file_appender);
    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_writer(non_blocking_appender);

    let console_subscriber = fmt::layer().with_writer(std::io::stdout);

    tracing_subscriber::registry()
        .with(console_subscriber)
        .with(file_layer)
        .init();

    let config = Config::from_env();
    info!("sync endpoint: {}", config.sync_url);

    let running = Arc::new(AtomicBool::new(true));
    let flag = running.clone();
    ctrlc::set_handler(move || flag.store(false, Ordering::SeqCst))
        .expect("installing the Ctrl-C handler");

    match AssetCache::open(&config.data_dir) {
        Ok(asset_cache) => match asset_cache.install(&config.origin()) {
            Ok(count) => info!("asset cache ready, {} entries", count),
            Err(err) => warn!("asset pre-cache skipped: {}", err),
        },
        Err(err) => warn!("asset cache unavailable: {}", err),
    }

    let pending = PendingStore::open(&config.data_dir).expect("opening the pending store");
    match pending.len() {
        Ok(0) => {}
        Ok(count) => info!("{} readings already queued offline", count),
        Err(err) => warn!("pending queue unreadable: {}", err),
    }

    // No permission prompt on this platform, so sensors attach directly.
    let orientation = OrientationTracker::new(permission::detect(None));
    let mut session = SessionController::new(
        orientation,
        config.bucket,
        config.pango_id.clone(),
        SyncClient::new(config.sync_url.clone()),
        pending,
    );

    let mut positions = ScriptedStream::new(demo_position_script());
    let mut orientations = ScriptedStream::new(demo_orientation_script());
    let mut surface = ConsoleSurface;

    info!("field session started as {}", config.pango_id);
    let mut tick: u32 = 0;
    while running.load(Ordering::SeqCst) {
        let fix = positions.next_sample();
        let sample = orientations.next_sample();
        if fix.is_none() && sample.is_none() {
            break;
        }
        if let Some(fix) = fix {
            session.on_fix(fix, &mut surface);
        }
        if let Some(sample) = sample {
            session.on_orientation(sample, &mut surface);
        }

        tick += 1;
        // Lock a bearing every few ticks, standing in for the user action.
        if tick % 4 == 0 {
            let outcome = session.lock_and_sync(&mut surface);
            info!("lock outcome: {:?}", outcome);
        }
        thread::sleep(Duration::from_millis(500));
    }

    positions.cancel();
    orientations.cancel();
    info!("field session stopped");
}
