//! Input validation
//!
//! Raw user strings are checked here before a [`Task`] is constructed.
//! Validators run in a fixed order (name, priority, due date, dependencies)
//! and the first failure wins.

use std::num::IntErrorKind;

use chrono::NaiveDate;
use thiserror::Error;

use super::task::Task;

/// Date format accepted for due dates
pub const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidInput {
    #[error("Task name cannot be empty")]
    EmptyName,

    #[error("Priority must be an integer, got '{0}'")]
    Priority(String),

    #[error("Priority out of range (must fit in a signed 64-bit integer), got '{0}'")]
    PriorityOutOfRange(String),

    #[error("Due date must be a valid YYYY-MM-DD date, got '{0}'")]
    DueDate(String),
}

/// Trims the name and rejects it if nothing is left
pub fn validate_name(raw: &str) -> Result<String, InvalidInput> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(InvalidInput::EmptyName);
    }
    Ok(name.to_string())
}

/// Parses a base-10 integer priority
///
/// Any sign is accepted; the value must fit in an `i64`.
pub fn validate_priority(raw: &str) -> Result<i64, InvalidInput> {
    raw.trim().parse::<i64>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
            InvalidInput::PriorityOutOfRange(raw.to_string())
        }
        _ => InvalidInput::Priority(raw.to_string()),
    })
}

/// Parses an ISO `YYYY-MM-DD` calendar date; past dates are allowed
pub fn validate_due_date(raw: &str) -> Result<NaiveDate, InvalidInput> {
    parse_iso_date(raw.trim()).ok_or_else(|| InvalidInput::DueDate(raw.to_string()))
}

/// Parses `YYYY-MM-DD` with an unsigned four-digit year from 0001
///
/// chrono's `%Y` also takes a sign and year 0, which older readers of the
/// task file reject.
pub fn parse_iso_date(raw: &str) -> Option<NaiveDate> {
    let year = raw.split('-').next()?;
    if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) || year == "0000" {
        return None;
    }
    NaiveDate::parse_from_str(raw, DUE_DATE_FORMAT).ok()
}

/// Trims each label and drops the blank ones
pub fn validate_dependencies<S: AsRef<str>>(raw: &[S]) -> Vec<String> {
    raw.iter()
        .map(|dep| dep.as_ref().trim())
        .filter(|dep| !dep.is_empty())
        .map(str::to_string)
        .collect()
}

/// Splits a comma-separated dependency list as typed at a prompt
pub fn parse_dependency_list(raw: &str) -> Vec<String> {
    let parts: Vec<&str> = raw.split(',').collect();
    validate_dependencies(&parts)
}

/// Runs every validator in order and builds the task
pub fn build_task<S: AsRef<str>>(
    name: &str,
    priority: &str,
    due_date: &str,
    dependencies: &[S],
) -> Result<Task, InvalidInput> {
    let name = validate_name(name)?;
    let priority = validate_priority(priority)?;
    let due_date = validate_due_date(due_date)?;
    let dependencies = validate_dependencies(dependencies);

    Ok(Task::new(name, priority, due_date, dependencies))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_is_trimmed() {
        assert_eq!(validate_name("  Write report \n").unwrap(), "Write report");
    }

    #[test]
    fn blank_names_are_rejected() {
        assert_eq!(validate_name(""), Err(InvalidInput::EmptyName));
        assert_eq!(validate_name(" \t "), Err(InvalidInput::EmptyName));
    }

    #[test]
    fn priority_accepts_zero_and_negatives() {
        assert_eq!(validate_priority("0").unwrap(), 0);
        assert_eq!(validate_priority("-3").unwrap(), -3);
        assert_eq!(validate_priority(" 42 ").unwrap(), 42);
    }

    #[test]
    fn non_integer_priority_is_rejected() {
        for raw in ["abc", "", "1.5", "2x"] {
            assert_eq!(
                validate_priority(raw),
                Err(InvalidInput::Priority(raw.to_string())),
                "expected {:?} to be rejected",
                raw
            );
        }
    }

    #[test]
    fn priority_beyond_i64_is_out_of_range() {
        for raw in ["9223372036854775808", "-9223372036854775809"] {
            assert_eq!(
                validate_priority(raw),
                Err(InvalidInput::PriorityOutOfRange(raw.to_string()))
            );
        }
        assert_eq!(validate_priority("9223372036854775807").unwrap(), i64::MAX);
        assert_eq!(validate_priority("-9223372036854775808").unwrap(), i64::MIN);
    }

    #[test]
    fn due_date_parses_iso_dates() {
        let date = validate_due_date("2025-02-15").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 2, 15).unwrap());
    }

    #[test]
    fn past_dates_are_allowed() {
        assert!(validate_due_date("1999-12-31").is_ok());
    }

    #[test]
    fn malformed_dates_are_rejected() {
        for raw in [
            "2024-13-40",
            "Jan 1",
            "2023-02-29",
            "",
            "2025/01/01",
            "+2025-01-01",
            "0000-01-01",
            "-0001-01-01",
            "12025-01-01",
            "925-01-01",
        ] {
            assert!(
                matches!(validate_due_date(raw), Err(InvalidInput::DueDate(_))),
                "expected {:?} to be rejected",
                raw
            );
        }
    }

    #[test]
    fn lowest_four_digit_year_is_accepted() {
        assert_eq!(
            validate_due_date("0001-01-01").unwrap(),
            NaiveDate::from_ymd_opt(1, 1, 1).unwrap()
        );
    }

    #[test]
    fn blank_dependencies_are_dropped() {
        let deps = validate_dependencies(&[" Draft ", "", "  ", "Review"]);
        assert_eq!(deps, vec!["Draft", "Review"]);
    }

    #[test]
    fn dependency_list_splits_on_commas() {
        assert_eq!(parse_dependency_list("a, b,,c "), vec!["a", "b", "c"]);
        assert!(parse_dependency_list("").is_empty());
    }

    #[test]
    fn build_task_reports_first_failure() {
        let err = build_task("  ", "abc", "nope", &[] as &[&str]).unwrap_err();
        assert_eq!(err, InvalidInput::EmptyName);

        let err = build_task("ok", "abc", "nope", &[] as &[&str]).unwrap_err();
        assert_eq!(err, InvalidInput::Priority("abc".into()));

        let err = build_task("ok", "1", "nope", &[] as &[&str]).unwrap_err();
        assert_eq!(err, InvalidInput::DueDate("nope".into()));
    }

    #[test]
    fn build_task_assembles_validated_fields() {
        let task = build_task(" Write report ", "2", "2025-03-01", &["Draft", " "]).unwrap();

        assert_eq!(task.name, "Write report");
        assert_eq!(task.priority, 2);
        assert_eq!(task.due_date, NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
        assert_eq!(task.dependencies, vec!["Draft"]);
    }
}
