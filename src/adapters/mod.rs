//! # Adapters
//!
//! Swappable implementations of port traits.
//!
//! - Render adapters: Compact, Verbose
//! - Python bindings (when enabled)
//!
//! A display driver that needs another layout implements `Render` itself;
//! the engine does not change.

pub mod render;

#[cfg(feature = "python")]
pub mod python;
