//! Error type shared by the wizard's domain modules.

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// User-correctable input problem. The message is safe to show as-is.
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
