//! # Render Adapters
//!
//! Implementations of the Render port.
//!
//! - `Compact` - `3:04:01`, separator-joined and zero-padded
//! - `Verbose` - `{ name: hours, value: 3, range: 24 }, ...`, raw values

use crate::core::config::CounterConfig;
use crate::core::{Bound, Section};
use crate::ports::Render;

/// Separator-joined, zero-padded values
///
/// The leading value is printed as a plain integer. Every following value is
/// padded to the digit width of its range, one digit less when the range is a
/// power of ten: `60` and `24` pad to 2, `100` pads to 2, `365` pads to 3.
#[derive(Debug, Clone, Copy, Default)]
pub struct Compact;

impl Render for Compact {
    fn render(&self, sections: &[Section], config: &CounterConfig) -> String {
        let mut out = String::new();

        for (i, section) in sections.iter().enumerate() {
            if i == 0 {
                out.push_str(&section.value().to_string());
            } else {
                out.push_str(&config.separator);
                out.push_str(&pad(section.value(), section.range()));
            }
        }

        out
    }
}

/// Every field of every visible section, comma-space joined
#[derive(Debug, Clone, Copy, Default)]
pub struct Verbose;

impl Render for Verbose {
    fn render(&self, sections: &[Section], _config: &CounterConfig) -> String {
        sections
            .iter()
            .map(|s| format!("{{ name: {}, value: {}, range: {} }}", s.name(), s.value(), s.range()))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Is `range` written as `1` followed only by zeros?
pub fn is_power_of_ten(range: i64) -> bool {
    let digits = range.to_string();
    let mut chars = digits.chars();

    chars.next() == Some('1') && chars.all(|c| c == '0')
}

/// Width a value of this bound is zero-padded to
pub fn pad_width(bound: Bound) -> usize {
    match bound {
        Bound::Finite(range) => {
            let width = range.to_string().len();
            if is_power_of_ten(range) {
                width - 1
            } else {
                width
            }
        }
        Bound::Unbounded => 0,
    }
}

/// Zero-pad `value` to the width of `bound`
pub fn pad(value: i64, bound: Bound) -> String {
    format!("{:0width$}", value, width = pad_width(bound))
}
