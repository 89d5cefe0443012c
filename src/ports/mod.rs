//! # Ports
//!
//! Trait contracts between the engine and its adapters.
//!
//! The engine decides *which* sections are visible (the excess section only
//! shows in expandable mode while non-zero); a renderer decides *how* the
//! visible sections become text.

use crate::core::config::CounterConfig;
use crate::core::Section;

/// Turns the visible sections of a counter into a string
pub trait Render {
    /// Render `sections`, most significant first
    ///
    /// `sections` is already filtered; renderers must not drop entries.
    fn render(&self, sections: &[Section], config: &CounterConfig) -> String;
}
