use std::fmt;

pub mod permission;
pub mod scripted;

/// A single GPS position sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionFix {
    pub lat: f64,
    pub lon: f64,
}

/// A raw device-orientation sample.
///
/// `compass_heading` is the platform-specific field some devices report
/// directly; when absent the heading is derived from `alpha`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OrientationSample {
    pub alpha: Option<f64>,           // rotation around z-axis, degrees
    pub compass_heading: Option<f64>, // degrees clockwise from north
}

#[derive(Debug, PartialEq)]
pub enum SensorError {
    PermissionDenied,
    Unavailable(String),
}

impl std::error::Error for SensorError {}
impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SensorError::PermissionDenied => write!(f, "orientation permission denied"),
            SensorError::Unavailable(reason) => write!(f, "sensor unavailable: {}", reason),
        }
    }
}

/// A cancellable, restartable sequence of sensor samples.
///
/// Platform push callbacks are adapted to this pull shape: the event loop
/// polls for the next sample and hands it to the matching tracker.
pub trait SampleStream {
    type Sample;

    /// Next sample, or `None` once the stream is cancelled or exhausted.
    fn next_sample(&mut self) -> Option<Self::Sample>;

    /// Stop delivering samples.
    fn cancel(&mut self);

    /// Undo a cancel and rewind to the start of the sequence.
    fn restart(&mut self);
}
