use crate::utils::error::{RecordsError, Result};
use regex::Regex;
use std::sync::LazyLock;

pub const MAX_NAME_LENGTH: usize = 100;

static NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9:,./&_\- ]+$").expect("name pattern is a valid regex")
});

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Normalizes and validates a course or assignment name.
///
/// Leading and trailing whitespace is removed and every inner run of whitespace
/// collapses to one space. The result must be 1..=100 characters drawn from
/// ASCII letters, digits, space and `: , . / & _ -`.
pub fn validate_name(candidate: Option<&str>) -> Result<String> {
    let raw = candidate.ok_or_else(|| RecordsError::invalid_argument("name", "Name cannot be absent"))?;

    let name = raw.split_whitespace().collect::<Vec<_>>().join(" ");

    let len = name.chars().count();
    if len == 0 || len > MAX_NAME_LENGTH {
        return Err(RecordsError::invalid_argument(
            "name",
            format!(
                "Name should be at least one character and cannot exceed {}",
                MAX_NAME_LENGTH
            ),
        ));
    }

    if !NAME_PATTERN.is_match(&name) {
        return Err(RecordsError::invalid_argument(
            "name",
            format!("`{}` may contain only letters, digits, spaces and : , . / & _ -", name),
        ));
    }

    Ok(name)
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(RecordsError::invalid_argument(
            field_name,
            format!("{} must be between {} and {}", value, min, max),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name_rejects_absent_and_blank() {
        assert!(validate_name(None).unwrap_err().is_invalid_argument());
        assert!(validate_name(Some("")).is_err());
        assert!(validate_name(Some(" ")).is_err());
        assert!(validate_name(Some("         ")).is_err());
        assert!(validate_name(Some("\t\n")).is_err());
    }

    #[test]
    fn test_validate_name_length_bounds() {
        let hundred = "Assignment".repeat(10);
        assert_eq!(validate_name(Some(&hundred)).unwrap(), hundred);

        let hundred_and_one = format!("{}A", hundred);
        assert!(validate_name(Some(&hundred_and_one)).is_err());

        assert_eq!(validate_name(Some("m")).unwrap(), "m");
    }

    #[test]
    fn test_validate_name_length_is_measured_after_normalization() {
        let padded = format!("   {}   ", "x".repeat(100));
        assert_eq!(validate_name(Some(&padded)).unwrap().len(), 100);
    }

    #[test]
    fn test_validate_name_charset() {
        assert!(validate_name(Some("!")).is_err());
        assert!(validate_name(Some("#")).is_err());
        assert!(validate_name(Some("Café")).is_err());
        assert_eq!(
            validate_name(Some("Abc9:,./&Z- z_")).unwrap(),
            "Abc9:,./&Z- z_"
        );
    }

    #[test]
    fn test_validate_name_normalizes_whitespace() {
        assert_eq!(validate_name(Some("  a   b  ")).unwrap(), "a b");
        assert_eq!(validate_name(Some("    Database    ")).unwrap(), "Database");
        assert_eq!(
            validate_name(Some("    object     oriented        programming    ")).unwrap(),
            "object oriented programming"
        );
        assert_eq!(validate_name(Some("Intro\tto\nRust")).unwrap(), "Intro to Rust");
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("grade", 0, 0, 100).is_ok());
        assert!(validate_range("grade", 100, 0, 100).is_ok());
        assert!(validate_range("grade", -1, 0, 100).is_err());
        assert!(validate_range("grade", 101, 0, 100).is_err());
    }
}
