//! When does a validation error become a user-visible notice?
//!
//! The form recomputes its error on every keystroke, but flashing a message
//! each time would be noise. [`ErrorNotice`] raises a notice only once the
//! birth date is fully typed, and only when the error differs from the one
//! seen on the previous observation.

use super::rules::{FieldError, FieldState};

#[derive(Debug, Default)]
pub struct ErrorNotice {
    previous: Option<FieldError>,
}

impl ErrorNotice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the latest state; returns the message to show, if any.
    ///
    /// The previous error is updated on every call, including when the
    /// state has no error, so the same error re-appearing after being fixed
    /// is shown again.
    pub fn observe(&mut self, state: &FieldState) -> Option<&'static str> {
        let current = state.error;
        let changed = current != self.previous;
        self.previous = current;

        match current {
            Some(error) if changed && state.birth_date_complete() => Some(error.message()),
            _ => None,
        }
    }

    /// Message to show when the user tries to proceed and is refused.
    ///
    /// Not gated: an explicit action always explains why it failed.
    pub fn on_refused_proceed(state: &FieldState) -> Option<&'static str> {
        if state.proceed_allowed {
            None
        } else {
            state.error_message()
        }
    }
}
