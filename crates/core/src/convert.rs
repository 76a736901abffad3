// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Conversion of program output and expected values into comparable values.
//!
//! Actual stdout and the expected value from the job file go through the same
//! conversion, so a comparison never mixes types: under [`OutputType::Number`]
//! both `"3.14\n"` and the float `3.14` become `Value::Number(3.14)`.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use thiserror::Error;

/// How a task's output is interpreted before comparison.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputType {
    #[default]
    String,
    Number,
}

crate::simple_display! {
    OutputType {
        String => "string",
        Number => "number",
    }
}

/// A converted, comparable value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Text(String),
    Number(f64),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => f.write_str(s),
            Value::Number(n) => f.write_str(&format_number(*n)),
        }
    }
}

/// Expected output of a test as written in the job file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExpectedOutput {
    Int(i64),
    Float(f64),
    Text(String),
}

impl ExpectedOutput {
    /// Text form fed to the converter.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            ExpectedOutput::Int(i) => Cow::Owned(i.to_string()),
            ExpectedOutput::Float(f) => Cow::Owned(format_number(*f)),
            ExpectedOutput::Text(s) => Cow::Borrowed(s),
        }
    }
}

impl From<&str> for ExpectedOutput {
    fn from(s: &str) -> Self {
        ExpectedOutput::Text(s.to_string())
    }
}

impl From<i64> for ExpectedOutput {
    fn from(i: i64) -> Self {
        ExpectedOutput::Int(i)
    }
}

impl From<f64> for ExpectedOutput {
    fn from(f: f64) -> Self {
        ExpectedOutput::Float(f)
    }
}

/// Errors produced while converting raw text.
///
/// The messages are part of the grading output that students read, so their
/// wording is fixed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    #[error("No value. Cannot convert to '{0}'.")]
    Empty(OutputType),

    #[error("could not convert string to float: {literal}")]
    InvalidNumber { literal: String },
}

/// Convert `raw` into a [`Value`] of the requested type.
pub fn convert(output_type: OutputType, raw: &str) -> Result<Value, ConversionError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ConversionError::Empty(output_type));
    }
    match output_type {
        OutputType::String => Ok(Value::Text(trimmed.to_string())),
        OutputType::Number => trimmed
            .parse::<f64>()
            .map(Value::Number)
            .map_err(|_| ConversionError::InvalidNumber { literal: quote_literal(raw) }),
    }
}

/// Convert an expected value from the job file with the same rules as output.
pub fn convert_expected(
    output_type: OutputType,
    expected: &ExpectedOutput,
) -> Result<Value, ConversionError> {
    convert(output_type, &expected.as_text())
}

/// Render a float the way the grading reports always have: integral values
/// keep a trailing `.0`, and very large or small magnitudes use a signed
/// exponent of at least two digits (`1e+16`, `1.5e-05`).
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "nan".to_string();
    }
    let repr = format!("{:?}", n);
    match repr.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => repr,
    }
}

/// Quote a string as a single-quoted literal with control characters escaped.
///
/// Switches to double quotes when the text contains a single quote but no
/// double quote.
pub fn quote_literal(s: &str) -> String {
    let quote = if s.contains('\'') && !s.contains('"') { '"' } else { '\'' };
    let mut out = String::with_capacity(s.len() + 2);
    out.push(quote);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if (c as u32) < 0x20 || c as u32 == 0x7f => {
                out.push_str(&format!("\\x{:02x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

#[cfg(test)]
#[path = "convert_tests.rs"]
mod tests;
