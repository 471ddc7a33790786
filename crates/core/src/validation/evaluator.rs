//! Rule evaluator: pure logic, no I/O.

use chrono::{Local, NaiveDate};

use super::birth_date::{age_on, parse_birth_date};
use super::rules::{FieldError, FieldState, ValidationOutcome, ADULT_AGE, BIRTH_DATE_LEN};

/// Validate a snapshot against the local calendar date.
pub fn validate(state: &FieldState) -> ValidationOutcome {
    validate_on(state, Local::now().date_naive())
}

/// Validate a snapshot as of `today`.
///
/// Rules are checked in order and the first failure wins. A birth date that
/// is still being typed produces no error but keeps the form from
/// proceeding; only a complete, valid, adult date (or an empty one) lets the
/// user move on.
pub fn validate_on(state: &FieldState, today: NaiveDate) -> ValidationOutcome {
    let error = first_error(state, today);
    let birth_date_len = state.birth_date.chars().count();
    let proceed_allowed =
        error.is_none() && (state.birth_date.is_empty() || birth_date_len == BIRTH_DATE_LEN);

    ValidationOutcome {
        error,
        proceed_allowed,
    }
}

fn first_error(state: &FieldState, today: NaiveDate) -> Option<FieldError> {
    if is_blank(&state.first_name) {
        return Some(FieldError::FirstNameMissing);
    }
    if is_blank(&state.last_name) {
        return Some(FieldError::LastNameMissing);
    }
    if is_blank(&state.birth_date) {
        return Some(FieldError::BirthDateMissing);
    }
    if state.birth_date.chars().count() < BIRTH_DATE_LEN {
        return None;
    }

    match parse_birth_date(&state.birth_date) {
        None => Some(FieldError::InvalidDate),
        Some(birth) if age_on(birth, today) < ADULT_AGE => Some(FieldError::Underage),
        Some(_) => None,
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
