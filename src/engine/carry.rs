//! # Carry Walk
//!
//! Propagates overflow and underflow from one section towards the most
//! significant one.
//!
//! A section that leaves `0..range` is normalized with Euclidean division:
//! the quotient moves one place left (positive on overflow, negative on
//! borrow) and the remainder stays. The walk stops as soon as a section is
//! back in range, and always at the unbounded excess section at index 0,
//! which simply accumulates. Nothing stops the excess from going negative.

use tracing::{debug, trace};

use crate::core::error::OverflowError;
use crate::core::{Bound, Section};

/// Add `delta` to `sections[index]` and carry or borrow leftwards
///
/// A positive `delta` increases, a negative one decreases. `sections[0]`
/// must be the unbounded excess section. New values are staged and only
/// written back once every addition fits, so an overflow leaves `sections`
/// untouched.
pub(crate) fn shift(sections: &mut [Section], index: usize, delta: i64) -> Result<(), OverflowError> {
    let mut staged = Vec::new();
    let mut carry = delta;

    for i in (0..=index).rev() {
        let section = &sections[i];
        let value = section
            .value
            .checked_add(carry)
            .ok_or_else(|| OverflowError::new(section.name.to_string()))?;

        let range = match section.range {
            Bound::Finite(range) => range,
            Bound::Unbounded => {
                if i != index {
                    debug!(excess = value, "carry reached the excess section");
                }
                if value < 0 {
                    debug!(excess = value, "excess went below zero");
                }
                staged.push((i, value));
                break;
            }
        };

        if (0..range).contains(&value) {
            staged.push((i, value));
            break;
        }

        carry = value.div_euclid(range);
        let value = value.rem_euclid(range);
        staged.push((i, value));

        trace!(index = i, carry, value, "normalized section");
    }

    for (i, value) in staged {
        sections[i].value = value;
    }

    Ok(())
}
