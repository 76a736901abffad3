// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Homework deadlines in the job file's `YYYY-MM-DD HH:MM:SS` format.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Format of deadlines in job files.
pub const DEADLINE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Deadline used when a homework does not set one.
pub const NO_DEADLINE: &str = "9999-12-31 23:59:59";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid deadline '{input}': expected YYYY-MM-DD HH:MM:SS")]
pub struct DeadlineError {
    pub input: String,
}

/// Local wall-clock deadline of a homework.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Deadline(NaiveDateTime);

impl Deadline {
    pub fn new(at: NaiveDateTime) -> Self {
        Self(at)
    }

    /// The far-future deadline of homeworks that never expire.
    pub fn never() -> Self {
        NaiveDate::from_ymd_opt(9999, 12, 31)
            .and_then(|d| d.and_hms_opt(23, 59, 59))
            .map(Deadline)
            .unwrap_or(Deadline(NaiveDateTime::MAX))
    }

    pub fn at(&self) -> NaiveDateTime {
        self.0
    }

    /// Whether `now` lies strictly after the deadline.
    pub fn has_passed(&self, now: NaiveDateTime) -> bool {
        now > self.0
    }
}

impl Default for Deadline {
    fn default() -> Self {
        Self::never()
    }
}

impl FromStr for Deadline {
    type Err = DeadlineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDateTime::parse_from_str(s.trim(), DEADLINE_FORMAT)
            .map(Deadline)
            .map_err(|_| DeadlineError { input: s.to_string() })
    }
}

impl fmt::Display for Deadline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DEADLINE_FORMAT))
    }
}

impl Serialize for Deadline {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Deadline {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "deadline_tests.rs"]
mod tests;
