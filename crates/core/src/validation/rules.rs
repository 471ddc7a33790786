//! Field state and validation result types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of characters in a complete `DD.MM.YYYY` birth date.
pub const BIRTH_DATE_LEN: usize = 10;

/// Minimum age, in whole years, required to register.
pub const ADULT_AGE: i32 = 18;

// ---------------------------------------------------------------------------
// Field errors
// ---------------------------------------------------------------------------

/// The single user-facing problem reported for a personal-data form.
///
/// Only the first failing rule is reported, so a form carries at most one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldError {
    FirstNameMissing,
    LastNameMissing,
    BirthDateMissing,
    InvalidDate,
    Underage,
}

impl FieldError {
    /// Human-readable message shown to the user.
    pub fn message(self) -> &'static str {
        match self {
            Self::FirstNameMissing => "enter first name",
            Self::LastNameMissing => "enter last name",
            Self::BirthDateMissing => "enter birth date",
            Self::InvalidDate => "invalid date",
            Self::Underage => "must be 18+",
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// Result of evaluating the rules against one [`FieldState`] snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    pub error: Option<FieldError>,
    pub proceed_allowed: bool,
}

impl ValidationOutcome {
    /// Message of the reported error, if any.
    pub fn message(&self) -> Option<&'static str> {
        self.error.map(FieldError::message)
    }
}

// ---------------------------------------------------------------------------
// Field state
// ---------------------------------------------------------------------------

/// Raw input of a personal-data screen plus its derived validation state.
///
/// `error` and `proceed_allowed` are only ever written through
/// [`FieldState::apply`], so they always describe the current inputs once the
/// owning controller has re-validated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldState {
    pub first_name: String,
    pub last_name: String,
    pub birth_date: String,
    pub error: Option<FieldError>,
    pub proceed_allowed: bool,
}

impl FieldState {
    /// Store a freshly computed outcome.
    pub fn apply(&mut self, outcome: ValidationOutcome) {
        self.error = outcome.error;
        self.proceed_allowed = outcome.proceed_allowed;
    }

    /// Message of the current error, if any.
    pub fn error_message(&self) -> Option<&'static str> {
        self.error.map(FieldError::message)
    }

    /// Whether the birth date has reached its full `DD.MM.YYYY` length.
    pub fn birth_date_complete(&self) -> bool {
        self.birth_date.chars().count() == BIRTH_DATE_LEN
    }
}
