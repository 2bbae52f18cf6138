//! The two textual date shapes and the conversions between them.
//!
//! Movements carry a [`NaiveDate`] internally, which serializes to the
//! canonical sortable shape `yyyy-mm-dd`. User-facing surfaces use the
//! display shape `dd/mm/yyyy`. Both parsers go through
//! [`NaiveDate::from_ymd_opt`], so impossible dates are rejected rather
//! than clamped.

use chrono::{Local, NaiveDate};

use crate::errors::LedgerError;

/// Parses the display shape `dd/mm/yyyy`. Day and month may be 1 or 2
/// digits; the year must be exactly 4.
pub fn parse_display(raw: &str) -> Option<NaiveDate> {
    let [day, month, year] = split3(raw, '/')?;
    if day.len() > 2 || month.len() > 2 || year.len() != 4 {
        return None;
    }
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)
}

/// Parses the canonical shape `yyyy-mm-dd`, all fields zero-padded.
pub fn parse_canonical(raw: &str) -> Option<NaiveDate> {
    let [year, month, day] = split3(raw, '-')?;
    if year.len() != 4 || month.len() != 2 || day.len() != 2 {
        return None;
    }
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)
}

/// Accepts either shape, detected by separator and year position.
/// Strings matching neither shape are rejected.
pub fn canonicalize(raw: &str) -> Result<NaiveDate, LedgerError> {
    parse_canonical(raw)
        .or_else(|| parse_display(raw))
        .ok_or_else(|| LedgerError::DateShape(raw.to_string()))
}

/// Renders the canonical shape.
pub fn to_canonical(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Renders the display shape, zero-padded.
pub fn to_display(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Today's date in display shape, for prefilling entry forms.
pub fn today_display() -> String {
    to_display(Local::now().date_naive())
}

/// Suggested file name for an export taken on `date`.
pub fn export_file_name(date: NaiveDate) -> String {
    format!("cashbook_{}.json", to_canonical(date))
}

fn split3(raw: &str, separator: char) -> Option<[&str; 3]> {
    let mut parts = raw.split(separator);
    let first = parts.next()?;
    let second = parts.next()?;
    let third = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    for part in [first, second, third] {
        if part.is_empty() || !part.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
    }
    Some([first, second, third])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_shape_round_trips() {
        for raw in ["25/12/2023", "01/01/2024", "29/02/2024"] {
            let date = parse_display(raw).expect(raw);
            assert_eq!(to_display(date), raw);
        }
    }

    #[test]
    fn short_day_and_month_are_normalized() {
        let date = parse_display("1/1/2024").unwrap();
        assert_eq!(to_display(date), "01/01/2024");
        assert_eq!(to_canonical(date), "2024-01-01");
    }

    #[test]
    fn impossible_dates_are_rejected_not_clamped() {
        assert!(parse_display("31/02/2024").is_none());
        assert!(parse_display("31/04/2023").is_none());
        assert!(parse_canonical("2023-02-29").is_none());
    }

    #[test]
    fn canonicalize_detects_both_shapes() {
        let from_display = canonicalize("25/12/2023").unwrap();
        let from_canonical = canonicalize("2023-12-25").unwrap();
        assert_eq!(from_display, from_canonical);
    }

    #[test]
    fn strings_matching_neither_shape_are_rejected() {
        for raw in [
            "",
            "soon",
            "25-12-2023",
            "2023/12/25",
            "12/2023",
            "1/1/24",
            "2023-1-05",
            "25/12/2023 ",
        ] {
            assert!(canonicalize(raw).is_err(), "accepted `{raw}`");
        }
    }

    #[test]
    fn export_file_name_uses_canonical_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(export_file_name(date), "cashbook_2024-03-07.json");
    }
}
