use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer};

use crate::error::AppError;

/// Serde helper for PATCH semantics on nullable fields.
///
/// * JSON field absent  => `None`          (don't update)
/// * JSON field = null  => `Some(None)`    (set to NULL)
/// * JSON field = value => `Some(Some(v))` (set to value)
pub fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Some(Option::deserialize(deserializer)?))
}

/// Validate a trimmed display string (1-256 Unicode characters).
pub fn validate_label(field: &str, value: &str) -> Result<(), AppError> {
    let value = value.trim();
    if value.is_empty() || value.chars().count() > 256 {
        return Err(AppError::Validation(format!(
            "{field} must be 1-256 characters"
        )));
    }
    Ok(())
}

/// Validate that a location (path or URL) is present.
pub fn validate_location(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}

pub fn validate_non_negative(field: &str, value: i32) -> Result<(), AppError> {
    if value < 0 {
        return Err(AppError::Validation(format!("{field} must be >= 0")));
    }
    Ok(())
}

/// Validate that an interval does not end before it starts.
pub fn validate_interval(
    start: DateTime<Utc>,
    end: Option<DateTime<Utc>>,
    end_field: &str,
) -> Result<(), AppError> {
    if let Some(end) = end
        && end < start
    {
        return Err(AppError::Validation(format!(
            "{end_field} must not be earlier than the start"
        )));
    }
    Ok(())
}

/// Largest value storable in a `NUMERIC(10, 2)` column.
fn max_file_size() -> Decimal {
    Decimal::new(99_999_999_99, 2)
}

/// Round a file size to two decimals and check it fits `NUMERIC(10, 2)`.
pub fn normalize_file_size(value: Decimal) -> Result<Decimal, AppError> {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        return Ok(Decimal::ZERO);
    }
    if rounded.is_sign_negative() {
        return Err(AppError::Validation("file_size must be >= 0".into()));
    }
    if rounded > max_file_size() {
        return Err(AppError::Validation(
            "file_size must fit 10 digits with 2 decimals".into(),
        ));
    }
    Ok(rounded)
}
