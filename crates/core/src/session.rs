//! In-memory session record shared by the wizard steps.

use serde::{Deserialize, Serialize};

/// Everything the wizard has collected so far.
///
/// One record lives for the duration of a wizard flow. It is owned by the
/// flow driver and handed to each step as `&mut SessionRecord` when that step
/// commits; a step only ever writes its own fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub first_name: String,
    pub last_name: String,
    /// Birth date exactly as entered (`DD.MM.YYYY`).
    pub birth_date: String,
    pub country: String,
    pub city: String,
    pub address: String,
    /// Selected interests in the order the user picked them.
    pub interests: Vec<String>,
}

impl SessionRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset every field, e.g. when the flow is abandoned.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Whether any step has written to the record yet.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_record_is_empty() {
        assert!(SessionRecord::new().is_empty());
    }

    #[test]
    fn clear_resets_all_fields() {
        let mut record = SessionRecord {
            first_name: "Ivan".into(),
            city: "Moscow".into(),
            interests: vec!["Music".into()],
            ..Default::default()
        };
        assert!(!record.is_empty());

        record.clear();
        assert!(record.is_empty());
    }

    #[test]
    fn serializes_with_snake_case_keys() {
        let record = SessionRecord {
            first_name: "Ivan".into(),
            birth_date: "01.01.2000".into(),
            ..Default::default()
        };
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["first_name"], "Ivan");
        assert_eq!(json["birth_date"], "01.01.2000");
        assert!(json["interests"].as_array().unwrap().is_empty());
    }
}
