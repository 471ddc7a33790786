//! Terminal front end for the signup wizard.
//!
//! The binary in `main.rs` only bootstraps logging and configuration; the
//! step-by-step dialogue lives in [`flow`] so it can be driven from tests
//! with in-memory input.

pub mod flow;
