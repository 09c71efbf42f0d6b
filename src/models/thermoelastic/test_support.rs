use std::collections::BTreeMap;

use nalgebra::Vector3;

use crate::support::quadrature::{CoupledFields, Gradient, LookupError};

/// In-memory gradients keyed by field name, standing in for a host engine.
#[derive(Debug, Clone, Default)]
pub(crate) struct GradientTable {
    len: usize,
    fields: BTreeMap<String, Vec<Gradient>>,
}

impl GradientTable {
    pub(crate) fn new(len: usize) -> Self {
        Self {
            len,
            fields: BTreeMap::new(),
        }
    }

    /// Adds a field whose gradient is the same at every point.
    pub(crate) fn with_uniform(mut self, name: &str, gradient: [f64; 3]) -> Self {
        self.fields
            .insert(name.to_string(), vec![Vector3::from(gradient); self.len]);
        self
    }

    /// Adds the three component fields of the linear field `(a·x, b·y, c·z)`.
    pub(crate) fn with_linear_components(self, names: [&str; 3], [a, b, c]: [f64; 3]) -> Self {
        self.with_uniform(names[0], [a, 0.0, 0.0])
            .with_uniform(names[1], [0.0, b, 0.0])
            .with_uniform(names[2], [0.0, 0.0, c])
    }
}

impl CoupledFields for GradientTable {
    fn gradient(&self, name: &str, qp: usize) -> Result<Gradient, LookupError> {
        let values = self
            .fields
            .get(name)
            .ok_or_else(|| LookupError::UnknownField {
                name: name.to_string(),
            })?;

        values.get(qp).copied().ok_or(LookupError::OutOfRange {
            index: qp,
            len: values.len(),
        })
    }
}
