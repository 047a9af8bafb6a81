//! CSV format handling for scenario input, schedule export and batch summaries
//!
//! This module centralizes all CSV format concerns, providing:
//! - ScenarioRecord structure for deserialization
//! - Conversion from scenario records to loan inputs
//! - The three-block schedule export (loan terms, summary, month table)
//! - Batch summary serialization
//!
//! Values are rounded to three decimal places here and only here; the engine
//! always returns full precision.

use crate::types::{
    LoanInput, LoanTerms, Month, MortgageError, Result, ScenarioOutcome, ScheduleResult,
};
use csv::WriterBuilder;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Write;
use std::str::FromStr;

/// Decimal places shown in exported files
pub const DISPLAY_DECIMALS: u32 = 3;

/// CSV record structure for deserialization
///
/// Matches the scenario CSV format with columns:
/// mode, principal, rate_year1, rate_year2, monthly_payment, term_months.
/// The last two are optional because each mode only needs one of them.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ScenarioRecord {
    pub mode: String,
    pub principal: String,
    pub rate_year1: String,
    pub rate_year2: String,
    pub monthly_payment: Option<String>,
    pub term_months: Option<String>,
}

/// Convert a ScenarioRecord to a LoanInput
///
/// This function:
/// - Parses the mode as a code (`1`, `2`, `3`) or a name (`term`, `payment`, `bank`)
/// - Parses amounts and rates into Decimals
/// - Parses the term into an integer, keeping negative values for validation
///
/// Only the format is checked here. Range checks (negative values, missing
/// mode-specific field, unknown mode code) belong to [`LoanInput::validate`].
///
/// # Errors
///
/// Returns `MortgageError::ParseError` describing the first field that could
/// not be parsed.
pub fn convert_scenario_record(record: ScenarioRecord) -> Result<LoanInput> {
    let mode = parse_mode(&record.mode)?;

    Ok(LoanInput {
        mode,
        principal: parse_decimal("principal", &record.principal)?,
        rate_year1: parse_decimal("rate_year1", &record.rate_year1)?,
        rate_year2: parse_decimal("rate_year2", &record.rate_year2)?,
        monthly_payment: optional(record.monthly_payment)
            .map(|value| parse_decimal("monthly_payment", &value))
            .transpose()?,
        term_months: optional(record.term_months)
            .map(|value| {
                i64::from_str(&value).map_err(|_| parse_error("term_months", &value))
            })
            .transpose()?,
    })
}

fn parse_mode(value: &str) -> Result<u8> {
    match value.trim().to_lowercase().as_str() {
        "term" => Ok(1),
        "payment" => Ok(2),
        "bank" => Ok(3),
        other => u8::from_str(other).map_err(|_| parse_error("mode", value)),
    }
}

fn parse_decimal(field: &str, value: &str) -> Result<Decimal> {
    Decimal::from_str(value.trim()).map_err(|_| parse_error(field, value))
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_error(field: &str, value: &str) -> MortgageError {
    MortgageError::ParseError {
        line: None,
        message: format!("Invalid {} '{}'", field, value),
    }
}

/// Format a value for display, rounded to three decimal places
pub fn format_amount(value: Decimal) -> String {
    format!(
        "{:.prec$}",
        value.round_dp(DISPLAY_DECIMALS),
        prec = DISPLAY_DECIMALS as usize
    )
}

/// Render a month count with its years-and-months breakdown
///
/// For example `65` becomes `65 months (5 years and 5 months)`.
pub fn format_term(months: Month) -> String {
    format!(
        "{} months ({} years and {} months)",
        months,
        months / 12,
        months % 12
    )
}

/// Write one loan schedule as a three-block CSV document
///
/// 1. Loan terms: a header row and one value row (mode, principal, both
///    rates, the derived payment, the realized term)
/// 2. Summary: the payment value(s) and the term in years and months
/// 3. Schedule: one row per month
///
/// # Errors
///
/// Returns `MortgageError::EmptySchedule` if the schedule has no months, or an
/// I/O / CSV error if writing fails.
pub fn write_schedule_csv(
    terms: &LoanTerms,
    result: &ScheduleResult,
    output: &mut dyn Write,
) -> Result<()> {
    if result.records.is_empty() {
        return Err(MortgageError::EmptySchedule);
    }

    let mut writer = WriterBuilder::new().flexible(true).from_writer(output);

    // Loan terms block
    writer.write_record([
        "Mode",
        "Principal",
        "Rate year 1 (%)",
        "Rate year 2 (%)",
        "Monthly payment",
        "Term (months)",
    ])?;
    writer.write_record([
        format!("{} ({})", terms.mode.code(), terms.mode.description()),
        format_amount(terms.principal),
        format_amount(terms.rate_year1),
        format_amount(terms.rate_year2),
        format_amount(result.payment),
        result.total_months.to_string(),
    ])?;

    // Summary block
    match result.payment2 {
        Some(payment2) => {
            writer.write_record([
                "Monthly payment (year 1)",
                "Monthly payment (from year 2)",
                "Term",
            ])?;
            writer.write_record([
                format_amount(result.payment),
                format_amount(payment2),
                format_term(result.total_months),
            ])?;
        }
        None => {
            writer.write_record(["Monthly payment", "Term"])?;
            writer.write_record([
                format_amount(result.payment),
                format_term(result.total_months),
            ])?;
        }
    }

    // Month-by-month schedule
    writer.write_record([
        "Month",
        "Opening debt",
        "Interest",
        "Interest rate (%)",
        "Principal paid",
        "Payment",
    ])?;
    for record in &result.records {
        writer.write_record([
            record.month.to_string(),
            format_amount(record.opening_debt),
            format_amount(record.interest_amount),
            format_amount(record.interest_rate_percent),
            format_amount(record.principal_paid),
            format_amount(record.payment_applied),
        ])?;
    }

    writer.flush()?;

    Ok(())
}

/// Write batch scenario summaries in CSV format
///
/// Writes one row per scenario with columns: scenario, mode, principal,
/// rate_year1, rate_year2, payment, payment2, total_months, total_paid,
/// total_interest, status. Rows are sorted by scenario id for deterministic
/// output. Failed scenarios keep their input columns, leave the result
/// columns blank, and carry the error message as status.
///
/// # Errors
///
/// Returns an I/O / CSV error if writing fails.
pub fn write_summaries_csv(outcomes: &[ScenarioOutcome], output: &mut dyn Write) -> Result<()> {
    let mut writer = WriterBuilder::new().from_writer(output);

    writer.write_record([
        "scenario",
        "mode",
        "principal",
        "rate_year1",
        "rate_year2",
        "payment",
        "payment2",
        "total_months",
        "total_paid",
        "total_interest",
        "status",
    ])?;

    let mut sorted: Vec<&ScenarioOutcome> = outcomes.iter().collect();
    sorted.sort_by_key(|outcome| outcome.scenario.id);

    for outcome in sorted {
        let input = &outcome.scenario.input;
        let mut row = vec![
            outcome.scenario.id.to_string(),
            input.mode.to_string(),
            input.principal.normalize().to_string(),
            input.rate_year1.normalize().to_string(),
            input.rate_year2.normalize().to_string(),
        ];

        match &outcome.summary {
            Ok(summary) => row.extend([
                format_amount(summary.payment),
                summary.payment2.map(format_amount).unwrap_or_default(),
                summary.total_months.to_string(),
                format_amount(summary.total_paid),
                format_amount(summary.total_interest),
                "ok".to_string(),
            ]),
            Err(e) => row.extend([
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                e.to_string(),
            ]),
        }

        writer.write_record(&row)?;
    }

    writer.flush()?;

    Ok(())
}
