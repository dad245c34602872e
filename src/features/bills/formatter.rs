//! Pure conversions from a stored bill to its display form.

use chrono::{DateTime, Datelike, NaiveDate};
use thiserror::Error;

use crate::features::bills::models::{BillStatus, FormattedBill, RawBill};

/// French abbreviated month names, truncated to three letters
const MONTHS: [&str; 12] = [
    "Jan", "Fév", "Mar", "Avr", "Mai", "Jui", "Jui", "Aoû", "Sep", "Oct", "Nov", "Déc",
];

/// Data-integrity violation found in a stored bill
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("Invalid date: '{0}'")]
    InvalidDate(String),

    #[error("Unknown status: '{0}'")]
    UnknownStatus(String),
}

/// Parse an ISO-8601 calendar date. A full timestamp is accepted and
/// truncated to its date.
pub fn parse_date(raw: &str) -> Result<NaiveDate, FormatError> {
    let trimmed = raw.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(trimmed).map(|dt| dt.date_naive()))
        .map_err(|_| FormatError::InvalidDate(raw.to_string()))
}

/// Render a date as `D Mmm. YY`, e.g. `2004-04-04` becomes `4 Avr. 04`
pub fn format_date(raw: &str) -> Result<String, FormatError> {
    let date = parse_date(raw)?;
    Ok(render_date(date))
}

fn render_date(date: NaiveDate) -> String {
    format!(
        "{} {}. {:02}",
        date.day(),
        MONTHS[date.month0() as usize],
        date.year().rem_euclid(100)
    )
}

/// Map a stored status to its label. Unmapped values are an error, never a
/// default label.
pub fn format_status(raw: &str) -> Result<&'static str, FormatError> {
    BillStatus::parse(raw)
        .map(|s| s.label())
        .ok_or_else(|| FormatError::UnknownStatus(raw.to_string()))
}

/// Format a bill, failing on the first data-integrity violation
pub fn format(raw: &RawBill) -> Result<FormattedBill, FormatError> {
    let date = parse_date(&raw.date)?;
    let status = format_status(&raw.status)?;

    Ok(build(raw.clone(), render_date(date), status.to_string(), Some(date), Vec::new()))
}

/// Format a bill field by field, keeping the raw value of any field that
/// cannot be formatted and recording why.
pub fn format_degraded(raw: RawBill) -> FormattedBill {
    let mut issues = Vec::new();

    let (date, sort_date) = match parse_date(&raw.date) {
        Ok(d) => (render_date(d), Some(d)),
        Err(e) => {
            issues.push(e);
            (raw.date.clone(), None)
        }
    };

    let status = match format_status(&raw.status) {
        Ok(label) => label.to_string(),
        Err(e) => {
            issues.push(e);
            raw.status.clone()
        }
    };

    build(raw, date, status, sort_date, issues)
}

fn build(
    raw: RawBill,
    date: String,
    status: String,
    sort_date: Option<NaiveDate>,
    issues: Vec<FormatError>,
) -> FormattedBill {
    FormattedBill {
        id: raw.id,
        email: raw.email,
        expense_type: raw.expense_type,
        name: raw.name,
        amount: raw.amount,
        date,
        vat: raw.vat,
        pct: raw.pct,
        commentary: raw.commentary,
        comment_admin: raw.comment_admin,
        file_url: raw.file_url,
        file_name: raw.file_name,
        status,
        sort_date,
        issues,
    }
}
