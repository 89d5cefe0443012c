//! # Counter Configuration
//!
//! The three knobs that alter how a counter behaves without touching its
//! sections: overflow display, update semantics and the display separator.

/// Separator used between section values when none is configured
pub const DEFAULT_SEPARATOR: &str = ":";

/// How overflow past the most significant section is displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overflow {
    /// Always hide the excess section; values silently wrap
    #[default]
    Cyclic,

    /// Show the excess section as the leading value while it is non-zero
    Expandable,
}

/// What a write operation hands back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpdateMode {
    /// Mutate the counter itself
    #[default]
    InPlace,

    /// Leave the counter untouched and return a modified deep copy
    CopyOnWrite,
}

/// Configuration of a counter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterConfig {
    /// Overflow display mode
    pub overflow: Overflow,

    /// Update semantics for writes
    pub update: UpdateMode,

    /// Joins section values in compact output
    pub separator: String,
}

impl CounterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the overflow display mode
    pub fn with_overflow(mut self, overflow: Overflow) -> Self {
        self.overflow = overflow;
        self
    }

    /// Set the update semantics
    pub fn with_update(mut self, update: UpdateMode) -> Self {
        self.update = update;
        self
    }

    /// Set the display separator
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    pub fn is_expandable(&self) -> bool {
        self.overflow == Overflow::Expandable
    }

    pub fn is_immutable(&self) -> bool {
        self.update == UpdateMode::CopyOnWrite
    }
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            overflow: Overflow::Cyclic,
            update: UpdateMode::InPlace,
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }
}
