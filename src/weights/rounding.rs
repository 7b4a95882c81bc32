// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Decimal rounding of weights
//!
//! Weights are rounded from their exact binary value to a fixed number of
//! decimal digits. Exact decimal ties go to the even digit, so `0.125` at two
//! digits becomes `0.12` while `0.375` becomes `0.38`. Values such as `2.675`
//! are not ties at all (their binary value sits just below the midpoint) and
//! round down. This matches the host application's native `round`.

/// A weight rounded to a fixed number of decimal digits
#[derive(Debug, Clone, PartialEq)]
pub struct RoundedWeight {
    /// Nearest `f64` to the rounded decimal
    pub value: f64,
    /// Fixed-point text with exactly `precision` fractional digits
    fixed: String,
}

impl RoundedWeight {
    pub fn new(weight: f64, precision: u8) -> Self {
        let fixed = format!("{:.*}", usize::from(precision), weight);
        // Parsing text produced by float formatting cannot fail for finite input.
        let value = fixed.parse::<f64>().unwrap_or(weight);
        Self { value, fixed }
    }

    /// True when the weight vanished at this precision
    pub fn is_zero(&self) -> bool {
        self.value == 0.0
    }

    /// Minimal decimal text: trailing zeros removed, one fractional digit kept
    pub fn to_minimal_string(&self) -> String {
        minimal_decimal(&self.fixed)
    }
}

/// Round `weight` to `precision` decimal digits
pub fn round_weight(weight: f64, precision: u8) -> f64 {
    RoundedWeight::new(weight, precision).value
}

fn minimal_decimal(fixed: &str) -> String {
    let Some(dot) = fixed.find('.') else {
        return format!("{}.0", fixed);
    };
    let trimmed = fixed.trim_end_matches('0');
    if trimmed.len() == dot + 1 {
        format!("{}0", trimmed)
    } else {
        trimmed.to_string()
    }
}
