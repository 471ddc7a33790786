//! Domain logic for the registration wizard.
//!
//! Holds the session record shared across wizard steps, the pure
//! personal-data validation engine, and the small step controllers that
//! sit between user input and the session record. No I/O lives here.

pub mod error;
pub mod interests;
pub mod personal_info;
pub mod session;
pub mod summary;
pub mod validation;
