use super::SensorError;

/// Outcome of a platform permission prompt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Grant {
    Granted,
    Denied,
}

/// Platform handling for orientation-sensor access.
///
/// Some platforms gate orientation events behind an explicit user prompt,
/// others deliver them unconditionally. The tracker holds one of these and
/// never branches on the platform itself.
pub trait PermissionStrategy {
    fn request(&mut self) -> Result<(), SensorError>;
}

/// Ask the user through the platform prompt. A denial is reported as an
/// error and the prompt is shown again on the next request.
pub struct ExplicitPrompt {
    prompt: Box<dyn FnMut() -> Grant>,
}

impl ExplicitPrompt {
    pub fn new(prompt: Box<dyn FnMut() -> Grant>) -> Self {
        Self { prompt }
    }
}

impl PermissionStrategy for ExplicitPrompt {
    fn request(&mut self) -> Result<(), SensorError> {
        match (self.prompt)() {
            Grant::Granted => Ok(()),
            Grant::Denied => Err(SensorError::PermissionDenied),
        }
    }
}

/// Platforms without a permission gate attach the listener directly.
pub struct AutoGrant;

impl PermissionStrategy for AutoGrant {
    fn request(&mut self) -> Result<(), SensorError> {
        Ok(())
    }
}

/// Capability detection: the presence of a platform prompt decides the
/// strategy, the way feature presence does in the original environment.
pub fn detect(platform_prompt: Option<Box<dyn FnMut() -> Grant>>) -> Box<dyn PermissionStrategy> {
    match platform_prompt {
        Some(prompt) => Box::new(ExplicitPrompt::new(prompt)),
        None => Box::new(AutoGrant),
    }
}
