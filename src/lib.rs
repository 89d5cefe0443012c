//! # Escalator - Mixed-Radix Counter
//!
//! > "An odometer with named wheels"
//!
//! An escalator is an ordered sequence of named sections, each with its own
//! bounded range, that counts like a multi-digit odometer: `hours:minutes:seconds`,
//! `degrees:minutes`, `sets:reps`. Increasing a section past its range carries
//! into the next more significant one; decreasing below zero borrows from it.
//! Whatever overflows the most significant section lands in an implicit
//! leading **excess** section that never wraps.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       ESCALATOR                             │
//! ├─────────────────────────────────────────────────────────────┤
//! │                                                             │
//! │  CORE (pure data, no I/O)                                   │
//! │    Section, SectionName, Bound, SectionSpec, CounterConfig  │
//! │                                                             │
//! │  PORTS (trait contracts)                                    │
//! │    Render                                                   │
//! │                                                             │
//! │  ADAPTERS (swappable implementations)                       │
//! │    Render: Compact, Verbose                                 │
//! │    API: Python bindings                                     │
//! │                                                             │
//! │  ENGINE (orchestration)                                     │
//! │    carry walk, Counter - the main entry point               │
//! │                                                             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use escalator::{Counter, SectionSpec};
//!
//! let mut clock = Counter::new([
//!     SectionSpec::new("hours").value(3).range(24),
//!     SectionSpec::new("minutes").value(3).range(60),
//!     SectionSpec::new("seconds").value(59).range(60),
//! ])
//! .unwrap();
//!
//! clock.increase("seconds", 2).unwrap();
//! assert_eq!(clock.print(), "3:04:01");
//! ```

// ============================================================================
// MODULES
// ============================================================================

/// Core domain - pure data, no I/O
/// Contains: Section, SectionName, Bound, SectionSpec, config, errors
pub mod core;

/// Port definitions - trait contracts for adapters
/// Contains: Render trait
pub mod ports;

/// Adapter implementations - swappable components
/// Contains: render, python submodules
pub mod adapters;

/// Engine - orchestration layer
/// Contains: carry walk, Counter main struct
pub mod engine;

// ============================================================================
// PYTHON BINDINGS (when enabled)
// ============================================================================

#[cfg(feature = "python")]
pub use adapters::python::*;

// ============================================================================
// RE-EXPORTS (public API)
// ============================================================================

// Core types
pub use crate::core::{Bound, Section, SectionName, SectionSpec, DEFAULT_RANGE};
pub use crate::core::config::{CounterConfig, Overflow, UpdateMode, DEFAULT_SEPARATOR};
pub use crate::core::error::{CounterError, CounterResult, NotFoundError, OverflowError, ValidationError};

// Port traits
pub use crate::ports::Render;

// Renderers
pub use crate::adapters::render::{Compact, Verbose};

// Engine
pub use crate::engine::{Counter, Updated};
