//! # Engine
//!
//! The orchestration layer that wires everything together.
//!
//! This is where:
//! - Section specs are validated and laid out
//! - The update mode picks the counter a write lands on
//! - The carry walk runs over the section list
//! - Renderers are handed the visible sections

mod carry;
mod counter;

pub use counter::{Counter, Updated};
