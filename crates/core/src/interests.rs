//! Interests step: a fixed catalog and the user's selection from it.

use crate::error::CoreError;
use crate::session::SessionRecord;

/// Interests offered by the wizard, in display order.
pub const INTEREST_CATALOG: [&str; 5] = ["Sports", "Music", "Movies", "Travel", "Games"];

/// Look up a catalog entry by its exact name.
pub fn catalog_entry(name: &str) -> Option<&'static str> {
    INTEREST_CATALOG.iter().copied().find(|entry| *entry == name)
}

/// Normalize a selection: keep the caller's order, drop repeats, and reject
/// anything not in [`INTEREST_CATALOG`].
pub fn select_interests<S: AsRef<str>>(selected: &[S]) -> Result<Vec<String>, CoreError> {
    let mut picked: Vec<String> = Vec::with_capacity(selected.len());
    for name in selected {
        let name = name.as_ref().trim();
        let entry = catalog_entry(name).ok_or_else(|| {
            CoreError::Validation(format!(
                "Unknown interest '{name}'. Must be one of: {}",
                INTEREST_CATALOG.join(", ")
            ))
        })?;
        if !picked.iter().any(|p| p == entry) {
            picked.push(entry.to_string());
        }
    }
    Ok(picked)
}

/// Validate the selection and commit it to the session.
pub fn save_interests<S: AsRef<str>>(
    session: &mut SessionRecord,
    selected: &[S],
) -> Result<(), CoreError> {
    session.interests = select_interests(selected)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn keeps_caller_order() {
        let picked = select_interests(&["Travel", "Sports"]).unwrap();
        assert_eq!(picked, vec!["Travel", "Sports"]);
    }

    #[test]
    fn drops_duplicates() {
        let picked = select_interests(&["Music", " Music ", "Games", "Music"]).unwrap();
        assert_eq!(picked, vec!["Music", "Games"]);
    }

    #[test]
    fn empty_selection_is_allowed() {
        let picked = select_interests::<&str>(&[]).unwrap();
        assert!(picked.is_empty());
    }

    #[test]
    fn unknown_interest_is_rejected() {
        let err = select_interests(&["Music", "Knitting"]).unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg.contains("Knitting"));
    }

    #[test]
    fn save_replaces_previous_selection() {
        let mut session = SessionRecord {
            interests: vec!["Games".into()],
            address: "Moscow".into(),
            ..Default::default()
        };
        save_interests(&mut session, &["Movies".to_string()]).unwrap();

        assert_eq!(session.interests, vec!["Movies"]);
        assert_eq!(session.address, "Moscow");
    }

    #[test]
    fn failed_save_keeps_previous_selection() {
        let mut session = SessionRecord {
            interests: vec!["Games".into()],
            ..Default::default()
        };
        assert!(save_interests(&mut session, &["Nope"]).is_err());
        assert_eq!(session.interests, vec!["Games"]);
    }
}
