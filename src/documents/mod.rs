//! # Document Generation
//!
//! Renders payslips and certificates as standalone HTML documents from
//! employee, salary and company data. Formatting follows French
//! conventions: amounts as `1 234,56 TND`, dates in long form
//! (`10 janvier 2024`).

use chrono::NaiveDate;

pub mod certificates;
pub mod payslip;

pub use certificates::{render_internship_certificate, render_work_certificate};
pub use payslip::render_payslip;

/// Working days per month used to monetize absences
pub const WORKING_DAYS_PER_MONTH: f64 = 26.0;

/// Capitalized French month names, indexed 1..=12
pub const MONTHS_FR: [&str; 13] = [
    "",
    "Janvier",
    "Février",
    "Mars",
    "Avril",
    "Mai",
    "Juin",
    "Juillet",
    "Août",
    "Septembre",
    "Octobre",
    "Novembre",
    "Décembre",
];

/// Month name for a payslip title; empty string for an out-of-range month
pub fn month_name(month: i32) -> &'static str {
    if (1..=12).contains(&month) {
        MONTHS_FR[month as usize]
    } else {
        ""
    }
}

/// Deduction corresponding to `absence` days off a monthly base salary
pub fn absence_adjustment(salaire: f64, absence_days: f64) -> f64 {
    salaire / WORKING_DAYS_PER_MONTH * absence_days
}

/// Net pay as displayed on payslips: gross minus absence deduction and
/// any advance already paid out. Computed at presentation time, never
/// stored.
pub fn net_pay(salaire: f64, prime: f64, absence_days: f64, avance: f64) -> f64 {
    salaire + prime - absence_adjustment(salaire, absence_days) - avance
}

/// Format an amount as French currency with two decimals, e.g.
/// `1 234,56 TND`
pub fn format_currency(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    let negative = rounded < 0.0;
    let cents = (rounded.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let fraction = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('\u{00A0}');
        }
        grouped.push(ch);
    }

    format!(
        "{}{},{:02} TND",
        if negative { "-" } else { "" },
        grouped,
        fraction
    )
}

/// Format a date in long French form, e.g. `10 janvier 2024`
pub fn format_date_fr(date: NaiveDate) -> String {
    use chrono::Datelike;

    let month = MONTHS_FR[date.month() as usize].to_lowercase();
    format!("{} {} {}", date.day(), month, date.year())
}

/// Minimal HTML escaping for user-supplied fields embedded in templates
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
