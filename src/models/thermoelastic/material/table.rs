use std::collections::BTreeMap;

use crate::support::quadrature::{LookupError, MaterialProperties};

use super::ColumnLengthError;

/// Material property values for every quadrature point of one evaluation pass.
///
/// A table is filled once, by a material model or by the host, and is then
/// only read. Terms observe properties exclusively through a table, so every
/// value a term reads was written before the pass began.
///
/// # Example
///
/// ```
/// use twine_thermoelastic::models::thermoelastic::material::PropertyTable;
/// use twine_thermoelastic::support::quadrature::MaterialProperties;
///
/// let table = PropertyTable::new(2)
///     .with_uniform("mu", 2.0)
///     .with_values("density", vec![1000.0, 0.0])
///     .unwrap();
///
/// assert_eq!(table.value("mu", 1).unwrap(), 2.0);
/// assert_eq!(table.value("density", 1).unwrap(), 0.0);
/// assert!(table.value("lambda", 0).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyTable {
    len: usize,
    columns: BTreeMap<String, Vec<f64>>,
}

impl PropertyTable {
    /// Creates an empty table covering `len` quadrature points.
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            len,
            columns: BTreeMap::new(),
        }
    }

    /// Adds a property with the same value at every point.
    #[must_use]
    pub fn with_uniform(mut self, name: impl Into<String>, value: f64) -> Self {
        self.columns.insert(name.into(), vec![value; self.len]);
        self
    }

    /// Adds a property with one value per point.
    ///
    /// # Errors
    ///
    /// Returns [`ColumnLengthError`] if `values` does not hold exactly one
    /// value per quadrature point.
    pub fn with_values(
        mut self,
        name: impl Into<String>,
        values: Vec<f64>,
    ) -> Result<Self, ColumnLengthError> {
        let name = name.into();
        if values.len() != self.len {
            return Err(ColumnLengthError {
                name,
                expected: self.len,
                actual: values.len(),
            });
        }
        self.columns.insert(name, values);
        Ok(self)
    }

    /// Declares an empty column to be filled by [`push`](Self::push).
    pub(super) fn reserve(&mut self, name: &str) {
        self.columns
            .insert(name.to_string(), Vec::with_capacity(self.len));
    }

    pub(super) fn push(&mut self, name: &str, value: f64) {
        self.columns
            .entry(name.to_string())
            .or_default()
            .push(value);
    }

    /// Number of quadrature points covered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Names of the declared properties, in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }
}

impl MaterialProperties for PropertyTable {
    fn value(&self, name: &str, qp: usize) -> Result<f64, LookupError> {
        let column = self
            .columns
            .get(name)
            .ok_or_else(|| LookupError::UnknownProperty {
                name: name.to_string(),
            })?;

        column.get(qp).copied().ok_or(LookupError::OutOfRange {
            index: qp,
            len: column.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_must_cover_every_point() {
        let table = PropertyTable::new(2)
            .with_values("alpha", vec![1.0, 2.0])
            .unwrap();
        assert_eq!(table.value("alpha", 1).unwrap(), 2.0);
        assert_eq!(
            table.value("alpha", 2).unwrap_err(),
            LookupError::OutOfRange { index: 2, len: 2 }
        );

        let err = PropertyTable::new(3)
            .with_values("alpha", vec![1.0, 2.0])
            .unwrap_err();
        assert_eq!(
            err,
            ColumnLengthError {
                name: "alpha".into(),
                expected: 3,
                actual: 2,
            }
        );
    }

    #[test]
    fn long_columns_are_rejected() {
        let err = PropertyTable::new(1)
            .with_values("alpha", vec![1.0, 2.0])
            .unwrap_err();
        assert_eq!(err.actual, 2);
        assert_eq!(
            err.to_string(),
            "property `alpha` has 2 values for 1 quadrature points"
        );
    }
}
