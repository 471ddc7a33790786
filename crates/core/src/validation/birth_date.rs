//! Birth-date parsing and calendar age.

use chrono::{Datelike, Local, NaiveDate};

use super::rules::{ADULT_AGE, BIRTH_DATE_LEN};

/// Parse a `DD.MM.YYYY` birth date strictly.
///
/// Requires two-digit day, two-digit month, four-digit year and `.`
/// separators, and rejects dates that do not exist on the calendar
/// (`32.01.2000`, `31.04.2000`, `29.02.2001`) as well as year `0000`. Returns `None` instead of an
/// error: callers only need to know whether the input is usable.
pub fn parse_birth_date(input: &str) -> Option<NaiveDate> {
    let mut parts = input.split('.');
    let day = parts.next()?;
    let month = parts.next()?;
    let year = parts.next()?;
    if parts.next().is_some() {
        return None;
    }

    if day.len() != 2 || month.len() != 2 || year.len() != 4 {
        return None;
    }
    if ![day, month, year]
        .iter()
        .all(|part| part.bytes().all(|b| b.is_ascii_digit()))
    {
        return None;
    }

    let day: u32 = day.parse().ok()?;
    let month: u32 = month.parse().ok()?;
    let year: i32 = year.parse().ok()?;
    if year < 1 {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Age in whole years on `today`.
///
/// Takes the difference of the calendar years and subtracts one when
/// today's day-of-year is still before the birthday's day-of-year. The
/// birthday is placed in `today`'s year before comparing, so leap years do
/// not shift it by a day; a 29 February birthday falls on 1 March in common
/// years.
pub fn age_on(birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth.year();
    if today.ordinal() < birthday_ordinal(birth, today.year()) {
        age -= 1;
    }
    age
}

fn birthday_ordinal(birth: NaiveDate, year: i32) -> u32 {
    NaiveDate::from_ymd_opt(year, birth.month(), birth.day())
        .or_else(|| NaiveDate::from_ymd_opt(year, 3, 1))
        .map_or(birth.ordinal(), |d| d.ordinal())
}

/// Adult check against an explicit `today`.
///
/// Incomplete input (fewer than ten characters) is not judged yet and
/// counts as adult; unparseable input never does.
pub fn is_adult_on(input: &str, today: NaiveDate) -> bool {
    if input.chars().count() < BIRTH_DATE_LEN {
        return true;
    }
    match parse_birth_date(input) {
        Some(birth) => age_on(birth, today) >= ADULT_AGE,
        None => false,
    }
}

/// Adult check against the local calendar date.
pub fn is_adult(input: &str) -> bool {
    is_adult_on(input, Local::now().date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // -- parse_birth_date --

    #[test]
    fn parses_canonical_form() {
        assert_eq!(parse_birth_date("01.01.2000"), Some(date(2000, 1, 1)));
        assert_eq!(parse_birth_date("29.02.2000"), Some(date(2000, 2, 29)));
    }

    #[test]
    fn rejects_impossible_dates() {
        assert_eq!(parse_birth_date("32.13.2000"), None);
        assert_eq!(parse_birth_date("32.01.2000"), None);
        assert_eq!(parse_birth_date("01.13.2000"), None);
        assert_eq!(parse_birth_date("31.04.2000"), None);
        assert_eq!(parse_birth_date("29.02.2001"), None);
        assert_eq!(parse_birth_date("00.01.2000"), None);
    }

    #[test]
    fn rejects_year_zero() {
        assert_eq!(parse_birth_date("01.01.0000"), None);
        assert_eq!(parse_birth_date("01.01.0001"), Some(date(1, 1, 1)));
        assert!(!is_adult_on("01.01.0000", date(2026, 10, 19)));
    }

    #[test]
    fn rejects_malformed_shapes() {
        assert_eq!(parse_birth_date(""), None);
        assert_eq!(parse_birth_date("1.1.2000"), None);
        assert_eq!(parse_birth_date("01-01-2000"), None);
        assert_eq!(parse_birth_date("01.01.20"), None);
        assert_eq!(parse_birth_date("01.01.2000.1"), None);
        assert_eq!(parse_birth_date("+1.01.2000"), None);
        assert_eq!(parse_birth_date("ab.cd.efgh"), None);
    }

    // -- age_on --

    #[test]
    fn birthday_today_counts_full_year() {
        assert_eq!(age_on(date(2008, 10, 19), date(2026, 10, 19)), 18);
    }

    #[test]
    fn birthday_tomorrow_subtracts_one() {
        assert_eq!(age_on(date(2008, 10, 20), date(2026, 10, 19)), 17);
    }

    #[test]
    fn birthday_passed_this_year() {
        assert_eq!(age_on(date(2000, 1, 1), date(2026, 10, 19)), 26);
    }

    #[test]
    fn same_month_day_births_share_age_offset() {
        let today = date(2026, 10, 19);
        // 2008 and 2009 differ in leap-ness but not in birthday position.
        assert_eq!(age_on(date(2008, 12, 1), today), 17);
        assert_eq!(age_on(date(2009, 12, 1), today), 16);
        assert_eq!(age_on(date(2008, 3, 1), today), 18);
        assert_eq!(age_on(date(2009, 3, 1), today), 17);
    }

    #[test]
    fn leap_day_birthday_in_common_year() {
        let birth = date(2008, 2, 29);
        assert_eq!(age_on(birth, date(2026, 2, 28)), 17);
        assert_eq!(age_on(birth, date(2026, 3, 1)), 18);
        assert_eq!(age_on(birth, date(2028, 2, 29)), 20);
    }

    // -- is_adult_on --

    #[test]
    fn adult_for_twenty_year_old() {
        assert!(is_adult_on("19.10.2006", date(2026, 10, 19)));
    }

    #[test]
    fn not_adult_for_ten_year_old() {
        assert!(!is_adult_on("19.10.2016", date(2026, 10, 19)));
    }

    #[test]
    fn not_adult_for_invalid_date() {
        assert!(!is_adult_on("32.13.2000", date(2026, 10, 19)));
    }

    #[test]
    fn incomplete_date_is_not_judged() {
        assert!(is_adult_on("01.01.20", date(2026, 10, 19)));
    }

    #[test]
    fn exactly_eighteen_is_adult() {
        assert!(is_adult_on("19.10.2008", date(2026, 10, 19)));
        assert!(!is_adult_on("20.10.2008", date(2026, 10, 19)));
    }

    #[test]
    fn wall_clock_variant_accepts_old_dates() {
        assert!(is_adult("01.01.1970"));
        assert!(!is_adult("31.02.1970"));
    }
}
