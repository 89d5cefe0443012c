//! # Counter Engine
//!
//! The main escalator type.
//!
//! Wires together:
//! - Section list (excess at index 0, user sections after it)
//! - Carry walk
//! - Configuration (overflow display, update mode, separator)
//! - Renderers
//!
//! Every write first picks its target counter, which resolves the update
//! mode once: in-place writes borrow the counter itself, copy-on-write
//! writes clone it first and leave the original untouched.

use std::collections::HashSet;
use std::fmt;
use std::ops::{Deref, DerefMut};

use tracing::debug;

use crate::adapters::render::{Compact, Verbose};
use crate::core::config::{CounterConfig, Overflow, UpdateMode};
use crate::core::error::{CounterResult, NotFoundError, OverflowError, ValidationError};
use crate::core::{Section, SectionName, SectionSpec};
use crate::engine::carry;
use crate::ports::Render;

/// A mixed-radix counter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Counter {
    /// Index 0 is the excess section
    sections: Vec<Section>,

    /// Configuration
    config: CounterConfig,
}

/// The counter a write produced
///
/// Derefs to [`Counter`], so calls chain regardless of the update mode.
#[derive(Debug)]
pub enum Updated<'a> {
    /// The counter was modified in place
    InPlace(&'a mut Counter),

    /// The counter was left alone; this is the modified copy
    Copied(Counter),
}

impl Updated<'_> {
    /// Take the copy out, `None` when the write happened in place
    pub fn into_copy(self) -> Option<Counter> {
        match self {
            Updated::InPlace(_) => None,
            Updated::Copied(counter) => Some(counter),
        }
    }

    /// An owned counter with the update applied
    ///
    /// Clones when the write happened in place.
    pub fn into_owned(self) -> Counter {
        match self {
            Updated::InPlace(counter) => counter.clone(),
            Updated::Copied(counter) => counter,
        }
    }

    pub fn is_copy(&self) -> bool {
        matches!(self, Updated::Copied(_))
    }
}

impl Deref for Updated<'_> {
    type Target = Counter;

    fn deref(&self) -> &Counter {
        match self {
            Updated::InPlace(counter) => counter,
            Updated::Copied(counter) => counter,
        }
    }
}

impl DerefMut for Updated<'_> {
    fn deref_mut(&mut self) -> &mut Counter {
        match self {
            Updated::InPlace(counter) => counter,
            Updated::Copied(counter) => counter,
        }
    }
}

impl Counter {
    /// Create a counter with the default configuration
    ///
    /// Sections are given most significant first. Fails when a name is
    /// missing, empty or repeated, when a range is not positive, or when a
    /// starting value lies outside its range.
    pub fn new<I, S>(specs: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<SectionSpec>,
    {
        Self::with_config(specs, CounterConfig::default())
    }

    /// Create a counter with a custom configuration
    pub fn with_config<I, S>(specs: I, config: CounterConfig) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<SectionSpec>,
    {
        let counter = Self {
            sections: build_sections(specs)?,
            config,
        };

        debug!(sections = counter.sections().len(), "counter created");

        Ok(counter)
    }

    // ========================================================================
    // UPDATE MODE
    // ========================================================================

    /// The counter a write should land on
    fn target(&mut self) -> Updated<'_> {
        let update = self.config.update;
        match update {
            UpdateMode::InPlace => Updated::InPlace(self),
            UpdateMode::CopyOnWrite => {
                debug!("copy-on-write: cloning counter before update");
                Updated::Copied(self.clone())
            }
        }
    }

    fn configure(&mut self, apply: impl FnOnce(&mut CounterConfig)) -> Updated<'_> {
        let mut target = self.target();
        apply(&mut target.config);
        target
    }

    fn shifted(&mut self, index: usize, delta: i64) -> Result<Updated<'_>, OverflowError> {
        let mut target = self.target();
        carry::shift(&mut target.sections, index, delta)?;
        Ok(target)
    }

    /// Negate a decrease amount; `i64::MIN` has no positive counterpart
    fn negated(&self, index: usize, amount: i64) -> Result<i64, OverflowError> {
        amount
            .checked_neg()
            .ok_or_else(|| OverflowError::new(self.sections[index].name.to_string()))
    }

    // ========================================================================
    // OPERATIONS
    // ========================================================================

    /// Increase section `name` by `amount`, carrying into more significant sections
    ///
    /// A negative `amount` decreases instead. Fails with an overflow error,
    /// leaving the counter as it was, when a carry does not fit an `i64`.
    pub fn increase(&mut self, name: &str, amount: i64) -> CounterResult<Updated<'_>> {
        let index = self.index_of(name)?;
        Ok(self.shifted(index, amount)?)
    }

    /// Decrease section `name` by `amount`, borrowing from more significant sections
    ///
    /// The excess section is not floored at zero: decreasing a counter past
    /// all zeros leaves a negative excess.
    pub fn decrease(&mut self, name: &str, amount: i64) -> CounterResult<Updated<'_>> {
        let index = self.index_of(name)?;
        let delta = self.negated(index, amount)?;
        Ok(self.shifted(index, delta)?)
    }

    /// Increase the least significant section
    pub fn increase_last(&mut self, amount: i64) -> Result<Updated<'_>, OverflowError> {
        let index = self.sections.len() - 1;
        self.shifted(index, amount)
    }

    /// Decrease the least significant section
    pub fn decrease_last(&mut self, amount: i64) -> Result<Updated<'_>, OverflowError> {
        let index = self.sections.len() - 1;
        let delta = self.negated(index, amount)?;
        self.shifted(index, delta)
    }

    // ========================================================================
    // SETTINGS
    // ========================================================================

    /// Show the excess section while it is non-zero
    pub fn set_expandable(&mut self) -> Updated<'_> {
        self.configure(|config| config.overflow = Overflow::Expandable)
    }

    /// Always hide the excess section
    pub fn set_cyclic(&mut self) -> Updated<'_> {
        self.configure(|config| config.overflow = Overflow::Cyclic)
    }

    /// Return modified copies from every later write
    pub fn set_immutable(&mut self) -> Updated<'_> {
        self.configure(|config| config.update = UpdateMode::CopyOnWrite)
    }

    /// Modify in place on every later write
    ///
    /// Called on an immutable counter, this itself returns a copy; the
    /// original stays immutable.
    pub fn set_mutable(&mut self) -> Updated<'_> {
        self.configure(|config| config.update = UpdateMode::InPlace)
    }

    pub fn set_separator(&mut self, separator: impl Into<String>) -> Updated<'_> {
        let separator = separator.into();
        self.configure(|config| config.separator = separator)
    }

    pub fn config(&self) -> &CounterConfig {
        &self.config
    }

    pub fn is_expandable(&self) -> bool {
        self.config.is_expandable()
    }

    pub fn is_immutable(&self) -> bool {
        self.config.is_immutable()
    }

    pub fn separator(&self) -> &str {
        &self.config.separator
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    fn index_of(&self, name: &str) -> Result<usize, NotFoundError> {
        self.sections
            .iter()
            .position(|section| section.name.matches(name))
            .ok_or_else(|| NotFoundError::new(name))
    }

    /// Get a user section by name
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|section| section.name.matches(name))
    }

    pub fn value(&self, name: &str) -> Option<i64> {
        self.section(name).map(Section::value)
    }

    /// Exclusive upper bound of a user section
    pub fn range(&self, name: &str) -> Option<i64> {
        self.section(name).and_then(|section| section.range.limit())
    }

    pub fn try_value(&self, name: &str) -> Result<i64, NotFoundError> {
        self.value(name).ok_or_else(|| NotFoundError::new(name))
    }

    pub fn try_range(&self, name: &str) -> Result<i64, NotFoundError> {
        self.range(name).ok_or_else(|| NotFoundError::new(name))
    }

    /// Accumulated carry past the most significant section
    pub fn excess(&self) -> i64 {
        self.sections[0].value
    }

    /// User sections, most significant first
    pub fn sections(&self) -> &[Section] {
        &self.sections[1..]
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.sections().iter().filter_map(|section| section.name.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = i64> + '_ {
        self.sections().iter().map(Section::value)
    }

    pub fn ranges(&self) -> impl Iterator<Item = i64> + '_ {
        self.sections().iter().filter_map(|section| section.range.limit())
    }

    /// Name of the least significant section, the default write target
    pub fn last_section_name(&self) -> &str {
        self.names().last().unwrap_or_default()
    }

    // ========================================================================
    // FORMATTING
    // ========================================================================

    /// Sections a renderer gets to see
    ///
    /// The excess section leads only in expandable mode while non-zero.
    pub fn visible(&self) -> &[Section] {
        if self.is_expandable() && self.excess() != 0 {
            &self.sections[..]
        } else {
            self.sections()
        }
    }

    /// Render with any renderer
    pub fn render<R: Render>(&self, renderer: &R) -> String {
        renderer.render(self.visible(), &self.config)
    }

    /// Separator-joined, zero-padded values, e.g. `3:04:01`
    pub fn print(&self) -> String {
        self.render(&Compact)
    }

    /// Every field of every visible section
    pub fn print_full(&self) -> String {
        self.render(&Verbose)
    }
}

impl fmt::Display for Counter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.print())
    }
}

/// Validate specs and lay them out behind the excess section
fn build_sections<I, S>(specs: I) -> Result<Vec<Section>, ValidationError>
where
    I: IntoIterator<Item = S>,
    S: Into<SectionSpec>,
{
    let mut sections = vec![Section::excess(0)];
    let mut seen = HashSet::new();

    for (position, spec) in specs.into_iter().map(Into::into).enumerate() {
        let name = match spec.name {
            None => return Err(ValidationError::MissingName { position }),
            Some(SectionName::Excess) if position == 0 => {
                sections[0].value = spec.value;
                continue;
            }
            Some(SectionName::Excess) => return Err(ValidationError::MisplacedExcess { position }),
            Some(SectionName::Named(name)) => name,
        };

        if name.is_empty() {
            return Err(ValidationError::EmptyName { position });
        }
        if !seen.insert(name.clone()) {
            return Err(ValidationError::DuplicateName { name });
        }
        if spec.range <= 0 {
            return Err(ValidationError::NonPositiveRange { name, range: spec.range });
        }
        if !(0..spec.range).contains(&spec.value) {
            return Err(ValidationError::ValueOutOfRange {
                name,
                value: spec.value,
                range: spec.range,
            });
        }

        sections.push(Section::named(name, spec.value, spec.range));
    }

    if sections.len() == 1 {
        return Err(ValidationError::NoSections);
    }

    Ok(sections)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::CounterError;
    use crate::core::Bound;

    fn clock(hours: i64, minutes: i64, seconds: i64) -> Counter {
        Counter::new([
            SectionSpec::new("hours").value(hours).range(24),
            SectionSpec::new("minutes").value(minutes).range(60),
            SectionSpec::new("seconds").value(seconds).range(60),
        ])
        .unwrap()
    }

    #[test]
    fn test_counter_one_section() {
        let counter = Counter::new(["test"]).unwrap();

        assert_eq!(counter.sections.len(), 2);
        assert_eq!(counter.sections[0], Section::excess(0));
        assert_eq!(counter.sections[1], Section::named("test".into(), 0, 10));
        assert_eq!(counter.config, CounterConfig::default());
    }

    #[test]
    fn test_counter_two_sections() {
        let counter = Counter::new([("minutes", 0, 60), ("seconds", 0, 60)]).unwrap();

        assert_eq!(counter.names().collect::<Vec<_>>(), vec!["minutes", "seconds"]);
        assert_eq!(counter.ranges().collect::<Vec<_>>(), vec![60, 60]);
        assert_eq!(counter.values().collect::<Vec<_>>(), vec![0, 0]);
        assert_eq!(counter.excess(), 0);
    }

    #[test]
    fn test_counter_rejects_repeated_names() {
        let err = Counter::new(["test", "test"]).unwrap_err();
        assert_eq!(err, ValidationError::DuplicateName { name: "test".into() });
    }

    #[test]
    fn test_counter_rejects_missing_name() {
        let err = Counter::new([SectionSpec::default()]).unwrap_err();
        assert_eq!(err, ValidationError::MissingName { position: 0 });
    }

    #[test]
    fn test_counter_rejects_empty_name() {
        let err = Counter::new(["a", ""]).unwrap_err();
        assert_eq!(err, ValidationError::EmptyName { position: 1 });
    }

    #[test]
    fn test_counter_rejects_bad_ranges_and_values() {
        let zero = Counter::new([SectionSpec::new("a").range(0)]).unwrap_err();
        assert!(matches!(zero, ValidationError::NonPositiveRange { range: 0, .. }));

        let over = Counter::new([SectionSpec::new("a").value(10)]).unwrap_err();
        assert!(matches!(over, ValidationError::ValueOutOfRange { value: 10, range: 10, .. }));

        let under = Counter::new([SectionSpec::new("a").value(-1)]).unwrap_err();
        assert!(matches!(under, ValidationError::ValueOutOfRange { value: -1, .. }));
    }

    #[test]
    fn test_counter_rejects_no_sections() {
        let err = Counter::new(Vec::<SectionSpec>::new()).unwrap_err();
        assert_eq!(err, ValidationError::NoSections);

        let only_excess = Counter::new([SectionSpec::excess(3)]).unwrap_err();
        assert_eq!(only_excess, ValidationError::NoSections);
    }

    #[test]
    fn test_counter_explicit_excess_replaces_implicit() {
        let counter = Counter::new([SectionSpec::excess(2), SectionSpec::new("a")]).unwrap();

        assert_eq!(counter.sections.len(), 2);
        assert_eq!(counter.excess(), 2);
        assert!(counter.sections[0].is_excess());
    }

    #[test]
    fn test_counter_rejects_misplaced_excess() {
        let err = Counter::new([SectionSpec::new("a"), SectionSpec::excess(1)]).unwrap_err();
        assert_eq!(err, ValidationError::MisplacedExcess { position: 1 });
    }

    #[test]
    fn test_increase_default_amount_and_target() {
        let mut counter = Counter::new([("minutes", 3, 60), ("seconds", 14, 60)]).unwrap();
        counter.increase_last(1).unwrap();

        assert_eq!(counter.print(), "3:15");
        assert_eq!(counter.last_section_name(), "seconds");
    }

    #[test]
    fn test_increase_crossing_three_sections() {
        let mut counter = clock(3, 3, 59);
        let printed = counter.set_separator("/").increase("seconds", 2).unwrap().print();

        assert_eq!(printed, "3/04/01");
    }

    #[test]
    fn test_decrease_crossing_three_sections() {
        let mut counter = clock(3, 4, 1);
        counter.set_separator("/");
        counter.decrease("seconds", 2).unwrap();

        assert_eq!(counter.print(), "3/03/59");
    }

    #[test]
    fn test_decrease_default_amount() {
        let mut counter = Counter::new([("minutes", 3, 60), ("seconds", 15, 60)]).unwrap();
        counter.decrease_last(1).unwrap();

        assert_eq!(counter.print(), "3:14");
    }

    #[test]
    fn test_negative_amount_flips_direction() {
        let mut counter = clock(0, 1, 0);
        counter.increase("seconds", -1).unwrap();
        assert_eq!(counter.print(), "0:00:59");

        counter.decrease("seconds", -1).unwrap();
        assert_eq!(counter.print(), "0:01:00");
    }

    #[test]
    fn test_increase_unknown_section() {
        let mut counter = clock(0, 0, 0);
        let err = counter.increase("days", 1).unwrap_err();

        assert_eq!(err, CounterError::NotFound(NotFoundError::new("days")));
        assert!(counter.decrease("", 1).is_err());
        assert!(counter.decrease("excess", 1).is_err());
    }

    #[test]
    fn test_expandable_shows_excess_only_when_non_zero() {
        let mut counter = clock(23, 59, 59);
        counter.set_expandable();
        assert_eq!(counter.print(), "23:59:59");

        counter.increase("seconds", 2).unwrap();
        assert_eq!(counter.print(), "1:00:00:01");
        assert_eq!(
            counter.print_full(),
            "{ name: excess, value: 1, range: unbounded }, \
             { name: hours, value: 0, range: 24 }, \
             { name: minutes, value: 0, range: 60 }, \
             { name: seconds, value: 1, range: 60 }"
        );

        counter.decrease("seconds", 2).unwrap();
        assert_eq!(counter.print(), "23:59:59");
        assert_eq!(counter.excess(), 0);
    }

    #[test]
    fn test_cyclic_hides_excess() {
        let mut counter = clock(23, 59, 59);
        counter.set_expandable();
        counter.set_cyclic();
        counter.increase("seconds", 2).unwrap();

        assert_eq!(counter.print(), "0:00:01");
        assert_eq!(counter.excess(), 1);
    }

    #[test]
    fn test_excess_underflow_is_unguarded() {
        let mut counter = clock(0, 0, 0);
        counter.set_expandable();
        counter.decrease("seconds", 1).unwrap();

        assert_eq!(counter.excess(), -1);
        assert_eq!(counter.print(), "-1:23:59:59");
    }

    #[test]
    fn test_immutable_increase_returns_copy() {
        let mut original = Counter::new([("immutable", 1)]).unwrap();
        original.set_immutable();

        let updated = original.increase("immutable", 1).unwrap();
        assert!(updated.is_copy());
        let next = updated.into_owned();

        assert_eq!(original.value("immutable"), Some(1));
        assert_eq!(next.value("immutable"), Some(2));
        assert!(next.is_immutable());
    }

    #[test]
    fn test_immutable_carry_leaves_original_untouched() {
        let mut original = clock(3, 59, 59);
        original.set_immutable();

        let next = original.increase("seconds", 1).unwrap().into_owned();

        assert_eq!(original.print(), "3:59:59");
        assert_eq!(next.print(), "4:00:00");
    }

    #[test]
    fn test_immutable_settings_return_copies() {
        let mut original = clock(1, 2, 3);
        original.set_immutable();

        let slashed = original.set_separator("/").into_owned();
        assert_eq!(original.separator(), ":");
        assert_eq!(slashed.separator(), "/");

        let mutable = original.set_mutable().into_owned();
        assert!(original.is_immutable());
        assert!(!mutable.is_immutable());
    }

    #[test]
    fn test_mutable_write_is_in_place() {
        let mut counter = clock(1, 2, 3);
        let updated = counter.increase("seconds", 1).unwrap();

        assert!(!updated.is_copy());
        assert!(updated.into_copy().is_none());
        assert_eq!(counter.value("seconds"), Some(4));
    }

    #[test]
    fn test_clone_is_independent() {
        let mut original = Counter::new(["Testario"]).unwrap();
        original.set_expandable().set_separator("-");

        let mut copy = original.clone();
        assert_eq!(copy, original);

        copy.increase("Testario", 3).unwrap();
        assert_eq!(original.value("Testario"), Some(0));
        assert_eq!(copy.value("Testario"), Some(3));
        assert!(copy.is_expandable());
        assert_eq!(copy.separator(), "-");
    }

    #[test]
    fn test_accessors() {
        let counter = Counter::new([("test1", 1, 11), ("test2", 2, 12)]).unwrap();

        let section = counter.section("test1").unwrap();
        assert!(section.name().matches("test1"));
        assert_eq!(section.value(), 1);
        assert_eq!(section.range(), Bound::Finite(11));

        assert_eq!(counter.value("test2"), Some(2));
        assert_eq!(counter.range("test2"), Some(12));
        assert_eq!(counter.section("test3"), None);
        assert_eq!(counter.try_range("test3"), Err(NotFoundError::new("test3")));
        assert_eq!(counter.try_value("test1"), Ok(1));
    }

    #[test]
    fn test_excess_after_overflowing_top_section() {
        let mut counter = Counter::new([("test1", 0, 11), ("test2", 0, 12)]).unwrap();
        counter.increase("test1", 11).unwrap();

        assert_eq!(counter.excess(), 1);
        assert_eq!(counter.value("test1"), Some(0));
    }

    #[test]
    fn test_display_matches_print() {
        let counter = clock(3, 4, 1);
        assert_eq!(counter.to_string(), counter.print());
    }

    #[test]
    fn test_with_config() {
        let config = CounterConfig::new().with_separator(".").with_overflow(Overflow::Expandable);
        let counter = Counter::with_config([("a", 1), ("b", 2)], config).unwrap();

        assert_eq!(counter.print(), "1.2");
        assert!(counter.is_expandable());
    }

    #[test]
    fn test_increase_overflow_is_reported_and_harmless() {
        let mut counter = Counter::new([("m", 0, 60), ("s", 59, 60)]).unwrap();
        let err = counter.increase("s", i64::MAX).unwrap_err();

        assert_eq!(err, CounterError::Overflow(OverflowError::new("s")));
        assert_eq!(counter.print(), "0:59");

        counter.increase("s", 1).unwrap();
        assert_eq!(counter.print(), "1:00");
    }

    #[test]
    fn test_excess_overflow_after_repeated_writes() {
        let mut counter = Counter::new([("s", 0, 2)]).unwrap();
        counter.increase("s", i64::MAX - 1).unwrap();
        counter.increase("s", i64::MAX - 1).unwrap();
        assert_eq!(counter.excess(), i64::MAX - 1);

        let err = counter.increase_last(i64::MAX - 1).unwrap_err();
        assert_eq!(err, OverflowError::new("excess"));
        assert_eq!(counter.excess(), i64::MAX - 1);
    }

    #[test]
    fn test_decrease_min_amount_overflows() {
        let mut counter = clock(1, 2, 3);

        let err = counter.decrease("seconds", i64::MIN).unwrap_err();
        assert_eq!(err, CounterError::Overflow(OverflowError::new("seconds")));
        assert!(counter.decrease_last(i64::MIN).is_err());
        assert_eq!(counter.print(), "1:02:03");
    }

    #[test]
    fn test_immutable_overflow_leaves_original() {
        let mut original = clock(0, 0, 59);
        original.set_immutable();

        assert!(original.increase("seconds", i64::MAX).is_err());
        assert_eq!(original.print(), "0:00:59");
    }
}
