//! Final summary of a completed wizard flow.

use std::fmt;

use serde::Serialize;

use crate::error::CoreError;
use crate::session::SessionRecord;

/// Read-only view over the session record for the summary step.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(transparent)]
pub struct Summary<'a> {
    session: &'a SessionRecord,
}

impl<'a> Summary<'a> {
    pub fn from_session(session: &'a SessionRecord) -> Self {
        Self { session }
    }

    /// Label/value pairs in display order.
    pub fn lines(&self) -> Vec<(&'static str, String)> {
        let s = self.session;
        vec![
            ("First name", s.first_name.clone()),
            ("Last name", s.last_name.clone()),
            ("Birth date", s.birth_date.clone()),
            ("Country", s.country.clone()),
            ("City", s.city.clone()),
            ("Address", s.address.clone()),
            ("Interests", s.interests.join(", ")),
        ]
    }

    /// Pretty-printed JSON of the underlying record.
    pub fn to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CoreError::Internal(format!("Failed to serialize summary: {e}")))
    }
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (label, value) in self.lines() {
            writeln!(f, "{label}: {value}")?;
        }
        Ok(())
    }
}
