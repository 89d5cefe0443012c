//! # Core Domain
//!
//! Pure data types. No I/O, no carry logic.
//!
//! A counter is an ordered list of [`Section`]s. Index 0 always holds the
//! implicit excess section; user sections follow from most to least
//! significant.

pub mod config;
pub mod error;

use std::fmt;

/// Range given to a section spec that does not name one
pub const DEFAULT_RANGE: i64 = 10;

// ============================================================================
// SECTION NAME
// ============================================================================

/// Identity of a section
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SectionName {
    /// The implicit leading accumulator for carry past the most significant section
    Excess,

    /// A user-supplied name
    Named(String),
}

impl SectionName {
    /// The user-supplied name, `None` for the excess section
    pub fn as_str(&self) -> Option<&str> {
        match self {
            SectionName::Excess => None,
            SectionName::Named(name) => Some(name),
        }
    }

    pub fn is_excess(&self) -> bool {
        matches!(self, SectionName::Excess)
    }

    /// Does this name refer to the user section `name`?
    pub fn matches(&self, name: &str) -> bool {
        self.as_str() == Some(name)
    }
}

impl fmt::Display for SectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SectionName::Excess => f.write_str("excess"),
            SectionName::Named(name) => f.write_str(name),
        }
    }
}

// ============================================================================
// BOUND
// ============================================================================

/// Exclusive upper bound of a section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// Values live in `0..range`
    Finite(i64),

    /// No upper bound (excess section only)
    Unbounded,
}

impl Bound {
    /// The finite limit, if any
    pub fn limit(&self) -> Option<i64> {
        match self {
            Bound::Finite(range) => Some(*range),
            Bound::Unbounded => None,
        }
    }

    pub fn is_unbounded(&self) -> bool {
        matches!(self, Bound::Unbounded)
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::Finite(range) => write!(f, "{}", range),
            Bound::Unbounded => f.write_str("unbounded"),
        }
    }
}

// ============================================================================
// SECTION
// ============================================================================

/// One named digit-place of a counter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub(crate) name: SectionName,
    pub(crate) value: i64,
    pub(crate) range: Bound,
}

impl Section {
    pub(crate) fn named(name: String, value: i64, range: i64) -> Self {
        Self {
            name: SectionName::Named(name),
            value,
            range: Bound::Finite(range),
        }
    }

    pub(crate) fn excess(value: i64) -> Self {
        Self {
            name: SectionName::Excess,
            value,
            range: Bound::Unbounded,
        }
    }

    pub fn name(&self) -> &SectionName {
        &self.name
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    pub fn range(&self) -> Bound {
        self.range
    }

    pub fn is_excess(&self) -> bool {
        self.name.is_excess()
    }
}

// ============================================================================
// SECTION SPEC
// ============================================================================

/// Construction input for one section
///
/// Missing pieces are filled with defaults: value `0`, range [`DEFAULT_RANGE`].
/// The name stays optional here so that construction can report it missing.
///
/// ```rust
/// use escalator::SectionSpec;
///
/// let minutes = SectionSpec::new("minutes").range(60);
/// let seconds: SectionSpec = ("seconds", 15, 60).into();
/// # let _ = (minutes, seconds);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionSpec {
    pub name: Option<SectionName>,
    pub value: i64,
    pub range: i64,
}

impl SectionSpec {
    /// Spec for a user section called `name`
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(SectionName::Named(name.into())),
            ..Self::default()
        }
    }

    /// Spec for an explicit excess entry; only accepted at the head of the list
    pub fn excess(value: i64) -> Self {
        Self {
            name: Some(SectionName::Excess),
            value,
            ..Self::default()
        }
    }

    /// Set the starting value
    pub fn value(mut self, value: i64) -> Self {
        self.value = value;
        self
    }

    /// Set the exclusive upper bound
    pub fn range(mut self, range: i64) -> Self {
        self.range = range;
        self
    }
}

impl Default for SectionSpec {
    fn default() -> Self {
        Self {
            name: None,
            value: 0,
            range: DEFAULT_RANGE,
        }
    }
}

impl From<&str> for SectionSpec {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for SectionSpec {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl From<(&str, i64)> for SectionSpec {
    fn from((name, value): (&str, i64)) -> Self {
        Self::new(name).value(value)
    }
}

impl From<(&str, i64, i64)> for SectionSpec {
    fn from((name, value, range): (&str, i64, i64)) -> Self {
        Self::new(name).value(value).range(range)
    }
}

impl From<&Section> for SectionSpec {
    fn from(section: &Section) -> Self {
        Self {
            name: Some(section.name.clone()),
            value: section.value,
            range: section.range.limit().unwrap_or(DEFAULT_RANGE),
        }
    }
}
