//! Presentation query layer: filtered views, entry-form validation, and
//! display formatting.
//!
//! Everything here operates on borrowed snapshots handed out by the
//! store and returns fresh values; the canonical movement list is never
//! mutated from this module.

use chrono::NaiveDate;
use thiserror::Error;

use crate::{
    dates,
    ledger::{AccountType, Movement, MovementDraft},
};

const CURRENCY_SUFFIX: &str = "€";

/// Validation failure for a single user-entered field. The `Display`
/// rendering is the user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("{field} must be a real calendar date in dd/mm/yyyy form")]
    Date { field: &'static str },
    #[error("subject must not be empty")]
    Subject,
    #[error("`{value}` is not a known account type")]
    AccountType { value: String },
    #[error("{field} must be a finite number")]
    Amount { field: &'static str },
}

impl FormError {
    /// Name of the offending form field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Date { field } | Self::Amount { field } => field,
            Self::Subject => "subject",
            Self::AccountType { .. } => "accountType",
        }
    }
}

/// Raw entry-form fields as a host view collects them.
#[derive(Debug, Clone, Default)]
pub struct EntryForm {
    pub date: String,
    pub subject: String,
    pub account_type: String,
    pub amount: String,
}

/// Validates raw entry fields into a draft ready for create/update.
/// Fails on the first bad field without touching any stored state.
pub fn parse_entry_form(form: &EntryForm) -> Result<MovementDraft, FormError> {
    let date =
        dates::parse_display(form.date.trim()).ok_or(FormError::Date { field: "date" })?;
    let subject = form.subject.trim();
    if subject.is_empty() {
        return Err(FormError::Subject);
    }
    let account_type = AccountType::from_tag(form.account_type.trim()).ok_or_else(|| {
        FormError::AccountType {
            value: form.account_type.trim().to_string(),
        }
    })?;
    let amount = parse_amount(&form.amount, "amount")?;
    Ok(MovementDraft {
        date,
        subject: subject.to_string(),
        account_type,
        amount,
    })
}

/// Raw filter controls; empty fields impose no constraint.
#[derive(Debug, Clone, Default)]
pub struct FilterForm {
    pub date_from: String,
    pub date_to: String,
    pub amount_min: String,
    pub amount_max: String,
    pub account_type: String,
}

/// Parsed filter options. Present options narrow the view with logical
/// AND; bounds are inclusive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSpec {
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub amount_min: Option<f64>,
    pub amount_max: Option<f64>,
    pub account_type: Option<AccountType>,
}

impl FilterSpec {
    /// Parses raw filter controls. Dates are accepted in either shape
    /// and compared in canonical form.
    pub fn parse(form: &FilterForm) -> Result<Self, FormError> {
        let account_type = match form.account_type.trim() {
            "" => None,
            raw => Some(
                AccountType::from_tag(raw).ok_or_else(|| FormError::AccountType {
                    value: raw.to_string(),
                })?,
            ),
        };
        Ok(Self {
            date_from: parse_optional_date(&form.date_from, "dateFrom")?,
            date_to: parse_optional_date(&form.date_to, "dateTo")?,
            amount_min: parse_optional_amount(&form.amount_min, "amountMin")?,
            amount_max: parse_optional_amount(&form.amount_max, "amountMax")?,
            account_type,
        })
    }

    fn matches(&self, movement: &Movement) -> bool {
        if let Some(from) = self.date_from {
            if movement.date < from {
                return false;
            }
        }
        if let Some(to) = self.date_to {
            if movement.date > to {
                return false;
            }
        }
        if let Some(min) = self.amount_min {
            if movement.amount < min {
                return false;
            }
        }
        if let Some(max) = self.amount_max {
            if movement.amount > max {
                return false;
            }
        }
        if let Some(account) = self.account_type {
            if movement.account_type != account {
                return false;
            }
        }
        true
    }
}

/// Returns a fresh filtered view sorted by canonical date descending;
/// equal dates keep their relative insertion order. The input is left
/// untouched.
pub fn apply_filters(movements: &[Movement], spec: &FilterSpec) -> Vec<Movement> {
    let mut view: Vec<Movement> = movements
        .iter()
        .filter(|movement| spec.matches(movement))
        .cloned()
        .collect();
    view.sort_by(|a, b| b.date.cmp(&a.date));
    view
}

/// One table row, formatted for display and keyed by movement id so the
/// host view can wire edit and delete affordances.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovementRow {
    pub id: String,
    pub date: String,
    pub subject: String,
    pub account_type: String,
    pub amount: String,
}

/// Renders an amount with exactly two decimals and the currency suffix.
pub fn format_amount(amount: f64) -> String {
    format!("{:.2} {}", amount, CURRENCY_SUFFIX)
}

pub fn display_row(movement: &Movement) -> MovementRow {
    MovementRow {
        id: movement.id.to_string(),
        date: dates::to_display(movement.date),
        subject: movement.subject.clone(),
        account_type: movement.account_type.to_string(),
        amount: format_amount(movement.amount),
    }
}

/// Formats a movement list into date-descending display rows.
pub fn display_rows(movements: &[Movement]) -> Vec<MovementRow> {
    apply_filters(movements, &FilterSpec::default())
        .iter()
        .map(display_row)
        .collect()
}

fn parse_optional_date(raw: &str, field: &'static str) -> Result<Option<NaiveDate>, FormError> {
    match raw.trim() {
        "" => Ok(None),
        raw => dates::canonicalize(raw)
            .map(Some)
            .map_err(|_| FormError::Date { field }),
    }
}

fn parse_optional_amount(raw: &str, field: &'static str) -> Result<Option<f64>, FormError> {
    match raw.trim() {
        "" => Ok(None),
        raw => parse_amount(raw, field).map(Some),
    }
}

/// Parses a user-entered amount, tolerating a comma as the decimal
/// separator.
fn parse_amount(raw: &str, field: &'static str) -> Result<f64, FormError> {
    let normalized = raw.trim().replace(',', ".");
    let value: f64 = normalized
        .parse()
        .map_err(|_| FormError::Amount { field })?;
    if !value.is_finite() {
        return Err(FormError::Amount { field });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::MovementId;

    fn movement(id: &str, date: (i32, u32, u32), account: AccountType, amount: f64) -> Movement {
        Movement {
            id: MovementId::new(id),
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            subject: format!("subject {id}"),
            account_type: account,
            amount,
        }
    }

    fn sample() -> Vec<Movement> {
        vec![
            movement("a", (2023, 12, 25), AccountType::Bank, 1000.0),
            movement("b", (2024, 1, 1), AccountType::Cash, -45.5),
            movement("c", (2024, 1, 1), AccountType::Bank, 12.0),
            movement("d", (2022, 6, 30), AccountType::Cash, 3.25),
        ]
    }

    #[test]
    fn no_options_returns_all_sorted_descending() {
        let movements = sample();
        let view = apply_filters(&movements, &FilterSpec::default());
        let ids: Vec<&str> = view.iter().map(|m| m.id.as_str()).collect();
        // b and c share a date and keep insertion order.
        assert_eq!(ids, ["b", "c", "a", "d"]);
        // Input order is untouched.
        assert_eq!(movements[0].id.as_str(), "a");
    }

    #[test]
    fn options_compose_with_logical_and() {
        let spec = FilterSpec {
            date_from: NaiveDate::from_ymd_opt(2023, 1, 1),
            account_type: Some(AccountType::Bank),
            ..FilterSpec::default()
        };
        let view = apply_filters(&sample(), &spec);
        let ids: Vec<&str> = view.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, ["c", "a"]);
    }

    #[test]
    fn bounds_are_inclusive() {
        let spec = FilterSpec {
            date_from: NaiveDate::from_ymd_opt(2024, 1, 1),
            date_to: NaiveDate::from_ymd_opt(2024, 1, 1),
            amount_min: Some(-45.5),
            amount_max: Some(12.0),
            ..FilterSpec::default()
        };
        let view = apply_filters(&sample(), &spec);
        assert_eq!(view.len(), 2);
    }

    #[test]
    fn filter_form_accepts_both_date_shapes() {
        let display = FilterSpec::parse(&FilterForm {
            date_from: "01/01/2024".into(),
            ..FilterForm::default()
        })
        .unwrap();
        let canonical = FilterSpec::parse(&FilterForm {
            date_from: "2024-01-01".into(),
            ..FilterForm::default()
        })
        .unwrap();
        assert_eq!(display, canonical);
    }

    #[test]
    fn filter_form_reports_offending_field() {
        let err = FilterSpec::parse(&FilterForm {
            date_to: "31/02/2024".into(),
            ..FilterForm::default()
        })
        .unwrap_err();
        assert_eq!(err.field(), "dateTo");

        let err = FilterSpec::parse(&FilterForm {
            amount_min: "lots".into(),
            ..FilterForm::default()
        })
        .unwrap_err();
        assert_eq!(err.field(), "amountMin");
    }

    #[test]
    fn entry_form_happy_path_normalizes_comma_amount() {
        let draft = parse_entry_form(&EntryForm {
            date: "1/1/2024".into(),
            subject: "  Groceries  ".into(),
            account_type: "CASH".into(),
            amount: "-45,5".into(),
        })
        .unwrap();
        assert_eq!(draft.date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(draft.subject, "Groceries");
        assert_eq!(draft.account_type, AccountType::Cash);
        assert_eq!(draft.amount, -45.5);
    }

    #[test]
    fn entry_form_rejects_each_bad_field() {
        let valid = EntryForm {
            date: "25/12/2023".into(),
            subject: "Salary".into(),
            account_type: "BANK".into(),
            amount: "1000".into(),
        };

        let mut form = valid.clone();
        form.date = "31/02/2024".into();
        assert_eq!(parse_entry_form(&form).unwrap_err().field(), "date");

        form = valid.clone();
        form.subject = "   ".into();
        assert_eq!(parse_entry_form(&form).unwrap_err(), FormError::Subject);

        form = valid.clone();
        form.account_type = "PETTY".into();
        assert_eq!(parse_entry_form(&form).unwrap_err().field(), "accountType");

        form = valid.clone();
        form.amount = "12.3.4".into();
        assert_eq!(parse_entry_form(&form).unwrap_err().field(), "amount");

        form = valid;
        form.amount = "inf".into();
        assert_eq!(parse_entry_form(&form).unwrap_err().field(), "amount");
    }

    #[test]
    fn rows_are_formatted_for_display() {
        let rows = display_rows(&sample());
        assert_eq!(rows[0].date, "01/01/2024");
        assert_eq!(rows[0].amount, "-45.50 €");
        assert_eq!(rows[2].subject, "subject a");
        assert_eq!(rows[2].account_type, "BANK");
        assert_eq!(format_amount(1000.0), "1000.00 €");
    }
}
