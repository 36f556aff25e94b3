//! Numeric token parsing for light-curve measurements
//!
//! Light-curve exports carry measurement values in plain decimal or
//! scientific notation ("1.5e-2"). This module converts those tokens to
//! floats and time-column tokens to whole-second timestamps. Parsing is
//! strict: any malformed token is an error, never a silently dropped or
//! corrupted value.

use chrono::{DateTime, TimeZone, Utc};

use crate::{Error, Result};

/// Parse a decimal or scientific-notation token into a float
///
/// The token is split on the exponent marker (`e` or `E`); the left part
/// is parsed as a decimal mantissa and the right part, when present, as a
/// signed integer exponent. The result is mantissa × 10^exponent — the
/// exponent's own sign selects the scaling direction, independent of the
/// mantissa's sign.
pub fn parse_value(token: &str) -> Result<f64> {
    let trimmed = token.trim();

    match trimmed.split_once(['e', 'E']) {
        None => parse_mantissa(trimmed, trimmed),
        Some((mantissa_part, exponent_part)) => {
            let mantissa = parse_mantissa(trimmed, mantissa_part)?;
            let exponent: i32 = exponent_part.parse().map_err(|_| {
                Error::parse(trimmed, format!("invalid exponent '{}'", exponent_part))
            })?;
            Ok(mantissa * 10f64.powi(exponent))
        }
    }
}

/// Parse a time-column token into a UTC timestamp
///
/// Delegates to [`parse_value`] and truncates to whole seconds. Time
/// values are treated as already-offset Unix-like seconds; no
/// Barycentric-Julian-Date conversion is attempted.
pub fn parse_timestamp(token: &str) -> Result<DateTime<Utc>> {
    let seconds = parse_value(token)? as i64;

    Utc.timestamp_opt(seconds, 0)
        .single()
        .ok_or_else(|| Error::parse(token.trim(), "timestamp out of range"))
}

/// Parse the mantissa part of a token as a finite decimal float
fn parse_mantissa(token: &str, part: &str) -> Result<f64> {
    if part.is_empty() {
        return Err(Error::parse(token, "empty mantissa"));
    }

    let value: f64 = part
        .parse()
        .map_err(|_| Error::parse(token, format!("invalid decimal mantissa '{}'", part)))?;

    // f64::from_str accepts "inf" and "nan"; neither is a measurement
    if !value.is_finite() {
        return Err(Error::parse(token, "non-finite mantissa"));
    }

    Ok(value)
}
