//! Typed parsing of console input

/// Why a line of console input was rejected
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InputError {
    #[error("empty input")]
    Empty,

    #[error("'{0}' is not a whole number")]
    NotAnInteger(String),

    #[error("'{0}' is not a decimal number")]
    NotADecimal(String),

    #[error("'{0}' is not a storable number")]
    NotANumber(String),
}

/// Parse a whole number, ignoring surrounding whitespace
pub fn parse_int(raw: &str) -> Result<i64, InputError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(InputError::Empty);
    }
    trimmed
        .parse()
        .map_err(|_| InputError::NotAnInteger(trimmed.to_string()))
}

/// Parse a decimal number, ignoring surrounding whitespace.
///
/// `nan` parses as an `f64` but cannot be stored in a `REAL NOT NULL`
/// column, so it is rejected here.
pub fn parse_decimal(raw: &str) -> Result<f64, InputError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(InputError::Empty);
    }
    let value: f64 = trimmed
        .parse()
        .map_err(|_| InputError::NotADecimal(trimmed.to_string()))?;
    if value.is_nan() {
        return Err(InputError::NotANumber(trimmed.to_string()));
    }
    Ok(value)
}
