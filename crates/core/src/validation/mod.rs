//! Personal-data validation engine.
//!
//! Pure logic: a [`FieldState`] snapshot goes in, a [`ValidationOutcome`]
//! comes out. Nothing here touches the clock except [`evaluator::validate`],
//! which reads today's date once and delegates to the date-injected variant.

pub mod birth_date;
pub mod evaluator;
pub mod notice;
pub mod rules;

pub use evaluator::{validate, validate_on};
pub use notice::ErrorNotice;
pub use rules::{FieldError, FieldState, ValidationOutcome};
