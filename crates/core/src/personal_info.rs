//! Personal-data step: first name, last name and birth date.

use chrono::{Local, NaiveDate};

use crate::error::CoreError;
use crate::session::SessionRecord;
use crate::validation::{validate_on, FieldState};

/// Controller for the personal-data step.
///
/// Each `on_*_change` call stores the new text and immediately re-validates,
/// so [`state`](Self::state) is consistent at every observation point. The
/// inputs live only as long as the step; they reach the session record only
/// through [`save_and_proceed`](Self::save_and_proceed).
#[derive(Debug)]
pub struct PersonalInfoForm {
    state: FieldState,
    /// Fixed reference date; `None` means "read the local clock".
    today: Option<NaiveDate>,
}

impl PersonalInfoForm {
    pub fn new() -> Self {
        Self::build(None)
    }

    /// Form whose age check is evaluated as of `today`.
    pub fn as_of(today: NaiveDate) -> Self {
        Self::build(Some(today))
    }

    fn build(today: Option<NaiveDate>) -> Self {
        let mut form = Self {
            state: FieldState::default(),
            today,
        };
        form.revalidate();
        form
    }

    pub fn state(&self) -> &FieldState {
        &self.state
    }

    pub fn on_first_name_change(&mut self, value: impl Into<String>) {
        self.state.first_name = value.into();
        self.revalidate();
    }

    pub fn on_last_name_change(&mut self, value: impl Into<String>) {
        self.state.last_name = value.into();
        self.revalidate();
    }

    pub fn on_birth_date_change(&mut self, value: impl Into<String>) {
        self.state.birth_date = value.into();
        self.revalidate();
    }

    /// Copy the inputs into the session if the form may proceed.
    ///
    /// A refused proceed leaves the session untouched and reports the
    /// current error message (or a generic one while the date is still
    /// being typed).
    pub fn save_and_proceed(&self, session: &mut SessionRecord) -> Result<(), CoreError> {
        if !self.state.proceed_allowed {
            let message = self
                .state
                .error_message()
                .unwrap_or("birth date is incomplete");
            return Err(CoreError::Validation(message.to_string()));
        }

        session.first_name = self.state.first_name.clone();
        session.last_name = self.state.last_name.clone();
        session.birth_date = self.state.birth_date.clone();
        Ok(())
    }

    fn revalidate(&mut self) {
        let today = self.today.unwrap_or_else(|| Local::now().date_naive());
        let outcome = validate_on(&self.state, today);
        self.state.apply(outcome);
    }
}

impl Default for PersonalInfoForm {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::validation::rules::FieldError;

    fn form() -> PersonalInfoForm {
        PersonalInfoForm::as_of(NaiveDate::from_ymd_opt(2026, 10, 19).unwrap())
    }

    #[test]
    fn fresh_form_reports_first_name() {
        let form = form();
        assert_eq!(form.state().error_message(), Some("enter first name"));
        assert!(!form.state().proceed_allowed);
    }

    #[test]
    fn each_change_revalidates() {
        let mut form = form();

        form.on_first_name_change("Petr");
        assert_eq!(form.state().first_name, "Petr");
        assert_eq!(form.state().error, Some(FieldError::LastNameMissing));

        form.on_last_name_change("Petrov");
        assert_eq!(form.state().last_name, "Petrov");
        assert_eq!(form.state().error, Some(FieldError::BirthDateMissing));

        form.on_birth_date_change("01.01.20");
        assert_eq!(form.state().error, None);
        assert!(!form.state().proceed_allowed);

        form.on_birth_date_change("01.01.2000");
        assert_eq!(form.state().error, None);
        assert!(form.state().proceed_allowed);
    }

    #[test]
    fn clearing_a_name_brings_the_error_back() {
        let mut form = form();
        form.on_first_name_change("Ivan");
        form.on_last_name_change("Ivanov");
        form.on_birth_date_change("01.01.2000");
        assert!(form.state().proceed_allowed);

        form.on_first_name_change("");
        assert_eq!(form.state().error, Some(FieldError::FirstNameMissing));
        assert!(!form.state().proceed_allowed);
    }

    #[test]
    fn save_copies_fields_into_session() {
        let mut form = form();
        form.on_first_name_change("Ivan");
        form.on_last_name_change("Ivanov");
        form.on_birth_date_change("01.01.2000");

        let mut session = SessionRecord {
            city: "Moscow".into(),
            ..Default::default()
        };
        form.save_and_proceed(&mut session).unwrap();

        assert_eq!(session.first_name, "Ivan");
        assert_eq!(session.last_name, "Ivanov");
        assert_eq!(session.birth_date, "01.01.2000");
        assert_eq!(session.city, "Moscow", "other steps' fields are kept");
    }

    #[test]
    fn refused_save_leaves_session_untouched() {
        let mut form = form();
        form.on_first_name_change("Ivan");
        form.on_last_name_change("Ivanov");
        form.on_birth_date_change("19.10.2016");

        let mut session = SessionRecord::new();
        let err = form.save_and_proceed(&mut session).unwrap_err();

        assert_matches!(err, CoreError::Validation(msg) if msg == "must be 18+");
        assert!(session.is_empty());
    }

    #[test]
    fn refused_save_while_typing_date() {
        let mut form = form();
        form.on_first_name_change("Ivan");
        form.on_last_name_change("Ivanov");
        form.on_birth_date_change("01.01");

        let mut session = SessionRecord::new();
        assert_matches!(
            form.save_and_proceed(&mut session),
            Err(CoreError::Validation(_))
        );
        assert!(session.is_empty());
    }
}
