//! Field validation shared by the core operations.
//!
//! Length limits mirror the column widths of the schema so that over-long input is
//! rejected the same way on every backend (`SQLite` does not enforce `VARCHAR(n)`).

use crate::errors::{Error, Result};

/// Maximum length of names and usernames
pub const NAME_MAX_LEN: usize = 50;
/// Maximum length of image and avatar URLs
pub const URL_MAX_LEN: usize = 100;
/// Maximum length of a comment
pub const COMMENT_MAX_LEN: usize = 255;

/// Trims `value` and checks that it is non-empty and at most `max_len` characters.
pub fn required_text(field: &'static str, value: &str, max_len: usize) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::validation(field, "cannot be empty"));
    }
    check_len(field, trimmed, max_len)?;
    Ok(trimmed.to_string())
}

/// Like [`required_text`] but blank input becomes `None`.
pub fn optional_text(
    field: &'static str,
    value: Option<String>,
    max_len: Option<usize>,
) -> Result<Option<String>> {
    let Some(value) = value else {
        return Ok(None);
    };
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if let Some(max_len) = max_len {
        check_len(field, trimmed, max_len)?;
    }
    Ok(Some(trimmed.to_string()))
}

/// Prices must be finite and non-negative.
pub fn price(field: &'static str, value: f64) -> Result<f64> {
    if !value.is_finite() {
        return Err(Error::validation(field, format!("{value} is not a finite number")));
    }
    if value < 0.0 {
        return Err(Error::validation(field, format!("{value} is negative")));
    }
    Ok(value)
}

/// Quantities must be non-negative.
pub fn quantity(value: i32) -> Result<i32> {
    if value < 0 {
        return Err(Error::validation("quantity", format!("{value} is negative")));
    }
    Ok(value)
}

fn check_len(field: &'static str, value: &str, max_len: usize) -> Result<()> {
    let len = value.chars().count();
    if len > max_len {
        return Err(Error::validation(
            field,
            format!("{len} characters exceeds the limit of {max_len}"),
        ));
    }
    Ok(())
}
