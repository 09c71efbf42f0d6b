//! Coupled elastodynamic and bio-thermal residual terms.
//!
//! An evaluation pass has two phases:
//!
//! 1. A [`material::BioMaterial`] fills a [`material::PropertyTable`] for
//!    every quadrature point of the pass.
//! 2. The host evaluates each [`terms::Term`] at each quadrature point,
//!    reading gradients from its own field storage and properties from the
//!    table, and accumulates the returned contributions.
//!
//! The table is immutable once built, so the second phase can run on any
//! number of threads. Neither phase allocates global state or blocks.
//!
//! # Example
//!
//! ```
//! use twine_thermoelastic::models::thermoelastic::{
//!     material::{BioMaterial, BioMaterialParameters},
//!     terms::builtin_registry,
//! };
//! use twine_thermoelastic::support::{
//!     profile::FunctionTable,
//!     quadrature::{CoupledFields, Gradient, LookupError, QuadraturePoint},
//!     schema::TermParameters,
//! };
//! use uom::si::{
//!     f64::{MassDensity, Pressure, TemperatureCoefficient},
//!     mass_density::kilogram_per_cubic_meter,
//!     pressure::pascal,
//!     temperature_coefficient::per_kelvin,
//! };
//!
//! struct NoFields;
//!
//! impl CoupledFields for NoFields {
//!     fn gradient(&self, name: &str, _qp: usize) -> Result<Gradient, LookupError> {
//!         Err(LookupError::UnknownField { name: name.into() })
//!     }
//! }
//!
//! let material = BioMaterial::new(BioMaterialParameters {
//!     density: MassDensity::new::<kilogram_per_cubic_meter>(1000.0),
//!     mu: Pressure::new::<pascal>(2.0),
//!     lambda: Pressure::new::<pascal>(3.0),
//!     alpha: TemperatureCoefficient::new::<per_kelvin>(0.5),
//! })
//! .unwrap();
//!
//! let registry = builtin_registry().unwrap();
//! let params = TermParameters::new().with_properties(material.declared());
//! let sar = registry.create("SAR", &params, &FunctionTable::new()).unwrap();
//!
//! let table = material.compute_pass(1);
//! let r = sar.residual(&QuadraturePoint::new(0, 1.0), &NoFields, &table).unwrap();
//! assert_eq!(r, 6.5);
//! ```

pub mod material;
pub mod terms;

mod model;

#[cfg(test)]
mod test_support;

pub use model::BoundTerm;
