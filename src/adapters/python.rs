//! # Python Bindings
//!
//! PyO3 bindings for escalator, so Python display drivers can poll a counter.
//!
//! ## Python API
//!
//! ```python
//! from escalator import Counter
//!
//! clock = Counter([
//!     {"name": "minutes", "range": 60},
//!     {"name": "seconds", "range": 60},
//! ])
//!
//! # Writes return the counter to keep using: the same object when
//! # mutable, a fresh copy when immutable
//! clock = clock.increase("seconds", 75)
//! print(clock.print())        # 1:15
//!
//! frozen = clock.set_immutable()
//! later = frozen.increase()   # frozen is unchanged
//! ```

use pyo3::exceptions::{PyKeyError, PyOverflowError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::core::error::CounterError;
use crate::core::SectionSpec;
use crate::engine::{Counter, Updated};

/// Python wrapper for a section
#[pyclass(name = "Section")]
#[derive(Clone)]
pub struct PySection {
    #[pyo3(get)]
    pub name: String,

    #[pyo3(get)]
    pub value: i64,

    /// `None` for the excess section
    #[pyo3(get)]
    pub range: Option<i64>,
}

#[pymethods]
impl PySection {
    fn __repr__(&self) -> String {
        match self.range {
            Some(range) => format!("Section(name='{}', value={}, range={})", self.name, self.value, range),
            None => format!("Section(name='{}', value={}, range=None)", self.name, self.value),
        }
    }
}

/// Mixed-radix counter
///
/// Sections are given most significant first as dicts with a required
/// `name` and optional `value` (default 0) and `range` (default 10).
#[pyclass(name = "Counter")]
pub struct PyCounter {
    inner: Counter,
}

impl PyCounter {
    /// Run a write and hand back the counter Python should keep using
    fn chain(
        slf: &Bound<'_, Self>,
        write: impl FnOnce(&mut Counter) -> Result<Option<Counter>, CounterError>,
    ) -> PyResult<Py<Self>> {
        let copy = {
            let mut this = slf.borrow_mut();
            write(&mut this.inner).map_err(to_py_err)?
        };

        match copy {
            Some(inner) => Py::new(slf.py(), Self { inner }),
            None => Ok(slf.clone().unbind()),
        }
    }

    fn target_name(&self, name: Option<&str>) -> String {
        name.unwrap_or_else(|| self.inner.last_section_name()).to_string()
    }
}

#[pymethods]
impl PyCounter {
    #[new]
    fn new(sections: Vec<Bound<'_, PyDict>>) -> PyResult<Self> {
        let specs = sections
            .iter()
            .map(section_spec)
            .collect::<PyResult<Vec<_>>>()?;

        let inner = Counter::new(specs).map_err(|e| to_py_err(e.into()))?;

        Ok(Self { inner })
    }

    /// Increase a section (default: the last one) by `amount`
    #[pyo3(signature = (name=None, amount=1))]
    fn increase(slf: &Bound<'_, Self>, name: Option<&str>, amount: i64) -> PyResult<Py<Self>> {
        let name = slf.borrow().target_name(name);
        Self::chain(slf, |counter| counter.increase(&name, amount).map(Updated::into_copy))
    }

    /// Decrease a section (default: the last one) by `amount`
    #[pyo3(signature = (name=None, amount=1))]
    fn decrease(slf: &Bound<'_, Self>, name: Option<&str>, amount: i64) -> PyResult<Py<Self>> {
        let name = slf.borrow().target_name(name);
        Self::chain(slf, |counter| counter.decrease(&name, amount).map(Updated::into_copy))
    }

    fn set_expandable(slf: &Bound<'_, Self>) -> PyResult<Py<Self>> {
        Self::chain(slf, |counter| Ok(counter.set_expandable().into_copy()))
    }

    fn set_cyclic(slf: &Bound<'_, Self>) -> PyResult<Py<Self>> {
        Self::chain(slf, |counter| Ok(counter.set_cyclic().into_copy()))
    }

    fn set_immutable(slf: &Bound<'_, Self>) -> PyResult<Py<Self>> {
        Self::chain(slf, |counter| Ok(counter.set_immutable().into_copy()))
    }

    fn set_mutable(slf: &Bound<'_, Self>) -> PyResult<Py<Self>> {
        Self::chain(slf, |counter| Ok(counter.set_mutable().into_copy()))
    }

    #[pyo3(signature = (separator=":"))]
    fn set_separator(slf: &Bound<'_, Self>, separator: &str) -> PyResult<Py<Self>> {
        Self::chain(slf, |counter| Ok(counter.set_separator(separator).into_copy()))
    }

    fn clone(&self) -> Self {
        Self { inner: self.inner.clone() }
    }

    fn get_section(&self, name: &str) -> Option<PySection> {
        self.inner.section(name).map(|section| PySection {
            name: section.name().to_string(),
            value: section.value(),
            range: section.range().limit(),
        })
    }

    fn get_value(&self, name: &str) -> PyResult<i64> {
        self.inner
            .try_value(name)
            .map_err(|e| to_py_err(e.into()))
    }

    fn get_range(&self, name: &str) -> PyResult<i64> {
        self.inner
            .try_range(name)
            .map_err(|e| to_py_err(e.into()))
    }

    fn get_excess(&self) -> i64 {
        self.inner.excess()
    }

    #[getter]
    fn names(&self) -> Vec<String> {
        self.inner.names().map(str::to_string).collect()
    }

    #[getter]
    fn expandable(&self) -> bool {
        self.inner.is_expandable()
    }

    #[getter]
    fn immutable(&self) -> bool {
        self.inner.is_immutable()
    }

    fn print(&self) -> String {
        self.inner.print()
    }

    fn print_full(&self) -> String {
        self.inner.print_full()
    }

    fn __str__(&self) -> String {
        self.inner.print()
    }

    fn __repr__(&self) -> String {
        format!("Counter('{}', excess={})", self.inner.print(), self.inner.excess())
    }
}

/// Map a counter error onto the closest Python exception
fn to_py_err(err: CounterError) -> PyErr {
    match err {
        CounterError::Validation(e) => PyValueError::new_err(format!("{}", e)),
        CounterError::NotFound(e) => PyKeyError::new_err(format!("{}", e)),
        CounterError::Overflow(e) => PyOverflowError::new_err(format!("{}", e)),
    }
}

/// Read one section dict into a spec, keeping absent keys at their defaults
fn section_spec(dict: &Bound<'_, PyDict>) -> PyResult<SectionSpec> {
    let mut spec = SectionSpec::default();

    if let Some(name) = dict.get_item("name")? {
        spec = SectionSpec::new(name.extract::<String>()?);
    }
    if let Some(value) = dict.get_item("value")? {
        spec = spec.value(value.extract()?);
    }
    if let Some(range) = dict.get_item("range")? {
        spec = spec.range(range.extract()?);
    }

    Ok(spec)
}

/// Escalator Python module
#[pymodule]
fn escalator(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyCounter>()?;
    m.add_class::<PySection>()?;

    // Add module docstring
    m.add("__doc__", "Escalator: mixed-radix counter with carry and borrow")?;
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;

    Ok(())
}
