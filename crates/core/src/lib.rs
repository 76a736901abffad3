// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! hwc-core: Core types for the homework checker (hwc)

pub mod macros;

pub mod clock;
pub mod convert;
pub mod deadline;
pub mod result;
pub mod tree;

pub use clock::{Clock, FakeClock, SystemClock};
pub use convert::{
    convert, convert_expected, ConversionError, ExpectedOutput, OutputType, Value,
};
pub use deadline::{Deadline, DeadlineError, DEADLINE_FORMAT, NO_DEADLINE};
pub use result::{timeout_message, CommandResult};
pub use tree::{
    GradingResults, HomeworkResults, TaskResults, BUILD_KEY, EXPIRED_KEY, RESERVED_NAMES,
    STYLE_KEY,
};
