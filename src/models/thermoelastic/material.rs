//! Material model for biological tissue under thermoelastic loading.
//!
//! [`BioMaterial`] holds constant-per-region elastic and thermal constants
//! and publishes them, together with derived coefficients, as named scalar
//! properties at every quadrature point of a pass.
//!
//! Published properties (names are the constants in this module):
//!
//! | name         | value                        | published       |
//! |--------------|------------------------------|-----------------|
//! | `density`    | `ρ`                          | always          |
//! | `mu`         | `μ`                          | always          |
//! | `lambda`     | `λ`                          | always          |
//! | `alpha`      | `α`                          | always          |
//! | `Qs`         | `α·(3λ + 2μ)`                | by default      |
//! | `invdensity` | `1/ρ` (not floored)          | on request      |
//!
//! Values are in SI base units.
//!
//! # Example
//!
//! ```
//! use twine_thermoelastic::models::thermoelastic::material::{
//!     BioMaterial, BioMaterialParameters, HEAT_SOURCE,
//! };
//! use twine_thermoelastic::support::quadrature::MaterialProperties;
//! use uom::si::{
//!     f64::{MassDensity, Pressure, TemperatureCoefficient},
//!     mass_density::kilogram_per_cubic_meter,
//!     pressure::pascal,
//!     temperature_coefficient::per_kelvin,
//! };
//!
//! let material = BioMaterial::new(BioMaterialParameters {
//!     density: MassDensity::new::<kilogram_per_cubic_meter>(1000.0),
//!     mu: Pressure::new::<pascal>(2.0),
//!     lambda: Pressure::new::<pascal>(3.0),
//!     alpha: TemperatureCoefficient::new::<per_kelvin>(0.5),
//! })
//! .unwrap();
//!
//! let table = material.compute_pass(4);
//! assert_eq!(table.value(HEAT_SOURCE, 3).unwrap(), 6.5);
//! ```

mod error;
mod table;

pub use error::{BioMaterialError, ColumnLengthError};
pub use table::PropertyTable;

use uom::si::f64::{MassDensity, Pressure, TemperatureCoefficient};

use crate::support::constraint::{Constrained, Finite, NonNegative};

pub const DENSITY: &str = "density";
pub const INVERSE_DENSITY: &str = "invdensity";
pub const MU: &str = "mu";
pub const LAMBDA: &str = "lambda";
pub const ALPHA: &str = "alpha";
pub const HEAT_SOURCE: &str = "Qs";

/// Computes the thermoelastic heat-source coefficient `α·(3λ + 2μ)`.
///
/// Both the material model and the SAR term use this function, so the
/// published `Qs` and a recomputed coefficient agree bit for bit.
#[inline]
#[must_use]
pub fn heat_source_coefficient(alpha: f64, lambda: f64, mu: f64) -> f64 {
    alpha * (3.0 * lambda + 2.0 * mu)
}

/// Constant inputs for a [`BioMaterial`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BioMaterialParameters {
    pub density: MassDensity,
    /// Shear modulus (Lamé's second parameter).
    pub mu: Pressure,
    /// Lamé's first parameter.
    pub lambda: Pressure,
    /// Volumetric thermal expansion coefficient.
    pub alpha: TemperatureCoefficient,
}

/// Properties at a single quadrature point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BioProperties {
    pub density: f64,
    pub mu: f64,
    pub lambda: f64,
    pub alpha: f64,
    pub heat_source: Option<f64>,
    pub inverse_density: Option<f64>,
}

impl BioProperties {
    /// Iterates over the published `(name, value)` pairs.
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, f64)> {
        [
            (DENSITY, Some(self.density)),
            (MU, Some(self.mu)),
            (LAMBDA, Some(self.lambda)),
            (ALPHA, Some(self.alpha)),
            (HEAT_SOURCE, self.heat_source),
            (INVERSE_DENSITY, self.inverse_density),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name, v)))
    }
}

/// Piecewise-constant thermoelastic tissue material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BioMaterial {
    density: Constrained<f64, NonNegative>,
    mu: Constrained<f64, NonNegative>,
    lambda: Constrained<f64, Finite>,
    alpha: Constrained<f64, Finite>,
    heat_source: bool,
    inverse_density: bool,
}

impl BioMaterial {
    /// Creates a material that publishes `density`, `mu`, `lambda`, `alpha`, and `Qs`.
    ///
    /// # Errors
    ///
    /// Returns [`BioMaterialError`] if the density or shear modulus is
    /// negative, or if any constant is not a finite number.
    pub fn new(parameters: BioMaterialParameters) -> Result<Self, BioMaterialError> {
        let BioMaterialParameters {
            density,
            mu,
            lambda,
            alpha,
        } = parameters;

        let checked_density = NonNegative::new(density.value)
            .and_then(|d| Finite::new(d.into_inner()).map(|_| d))
            .map_err(|source| BioMaterialError::Density { density, source })?;

        let checked_mu = NonNegative::new(mu.value)
            .and_then(|m| Finite::new(m.into_inner()).map(|_| m))
            .map_err(|source| BioMaterialError::ShearModulus { mu, source })?;

        let checked_lambda = Finite::new(lambda.value)
            .map_err(|source| BioMaterialError::Lambda { lambda, source })?;

        let checked_alpha = Finite::new(alpha.value)
            .map_err(|source| BioMaterialError::Expansion { alpha, source })?;

        Ok(Self {
            density: checked_density,
            mu: checked_mu,
            lambda: checked_lambda,
            alpha: checked_alpha,
            heat_source: true,
            inverse_density: false,
        })
    }

    /// Sets whether the derived heat-source coefficient `Qs` is published.
    #[must_use]
    pub fn with_heat_source(mut self, publish: bool) -> Self {
        self.heat_source = publish;
        self
    }

    /// Sets whether the unfloored inverse density `invdensity` is published.
    #[must_use]
    pub fn with_inverse_density(mut self, publish: bool) -> Self {
        self.inverse_density = publish;
        self
    }

    /// Names of the properties this material publishes.
    #[must_use]
    pub fn declared(&self) -> Vec<&'static str> {
        self.compute(0).entries().map(|(name, _)| name).collect()
    }

    /// Computes the properties at quadrature point `qp`.
    ///
    /// Constants do not vary within the material's region, so `qp` does not
    /// affect the result.
    #[must_use]
    pub fn compute(&self, _qp: usize) -> BioProperties {
        let density = *self.density.as_ref();
        let mu = *self.mu.as_ref();
        let lambda = *self.lambda.as_ref();
        let alpha = *self.alpha.as_ref();

        BioProperties {
            density,
            mu,
            lambda,
            alpha,
            heat_source: self
                .heat_source
                .then(|| heat_source_coefficient(alpha, lambda, mu)),
            inverse_density: self.inverse_density.then(|| density.recip()),
        }
    }

    /// Computes the properties at every quadrature point of a pass.
    ///
    /// The returned table is complete before any term can read it.
    #[must_use]
    pub fn compute_pass(&self, len: usize) -> PropertyTable {
        let mut table = PropertyTable::new(len);
        for name in self.declared() {
            table.reserve(name);
        }

        for qp in 0..len {
            for (name, value) in self.compute(qp).entries() {
                table.push(name, value);
            }
        }

        log::debug!(
            "computed {} material properties at {len} quadrature points",
            self.declared().len()
        );
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        mass_density::kilogram_per_cubic_meter,
        pressure::{kilopascal, pascal},
        temperature_coefficient::per_kelvin,
    };

    use crate::support::{constraint::ConstraintError, quadrature::MaterialProperties};

    fn parameters(density: f64, mu: f64, lambda: f64, alpha: f64) -> BioMaterialParameters {
        BioMaterialParameters {
            density: MassDensity::new::<kilogram_per_cubic_meter>(density),
            mu: Pressure::new::<pascal>(mu),
            lambda: Pressure::new::<pascal>(lambda),
            alpha: TemperatureCoefficient::new::<per_kelvin>(alpha),
        }
    }

    #[test]
    fn heat_source_matches_formula() {
        let material = BioMaterial::new(parameters(1000.0, 2.0, 3.0, 0.5)).unwrap();
        let props = material.compute(0);

        assert_eq!(props.heat_source, Some(6.5));
        assert_eq!(props.inverse_density, None);
    }

    #[test]
    fn heat_source_is_exact_with_zeros() {
        for (alpha, lambda, mu) in [
            (0.0, 3.0, 2.0),
            (0.5, 0.0, 2.0),
            (0.5, 3.0, 0.0),
            (0.0, 0.0, 0.0),
            (1.0e-4, -1.5e6, 4.0e5),
        ] {
            let material = BioMaterial::new(parameters(1.0, mu, lambda, alpha))
                .expect("constants are valid");
            assert_eq!(
                material.compute(7).heat_source,
                Some(alpha * (3.0 * lambda + 2.0 * mu))
            );
        }
    }

    #[test]
    fn units_are_converted_to_si() {
        let material = BioMaterial::new(BioMaterialParameters {
            mu: Pressure::new::<kilopascal>(2.0),
            ..parameters(1000.0, 0.0, 0.0, 0.0)
        })
        .unwrap();

        assert_relative_eq!(material.compute(0).mu, 2000.0);
    }

    #[test]
    fn optional_outputs() {
        let material = BioMaterial::new(parameters(4.0, 2.0, 3.0, 0.5))
            .unwrap()
            .with_heat_source(false)
            .with_inverse_density(true);

        assert_eq!(
            material.declared(),
            [DENSITY, MU, LAMBDA, ALPHA, INVERSE_DENSITY]
        );
        assert_eq!(material.compute(0).inverse_density, Some(0.25));
    }

    #[test]
    fn pass_publishes_every_point() {
        let material = BioMaterial::new(parameters(1000.0, 2.0, 3.0, 0.5)).unwrap();
        let table = material.compute_pass(3);

        assert_eq!(table.len(), 3);
        for qp in 0..3 {
            assert_eq!(table.value(DENSITY, qp).unwrap(), 1000.0);
            assert_eq!(table.value(HEAT_SOURCE, qp).unwrap(), 6.5);
        }
        assert!(table.value(DENSITY, 3).is_err());
        assert!(!table.contains(INVERSE_DENSITY));
    }

    #[test]
    fn empty_pass_still_declares_properties() {
        let material = BioMaterial::new(parameters(1000.0, 2.0, 3.0, 0.5)).unwrap();
        let table = material.compute_pass(0);

        assert!(table.is_empty());
        assert!(table.contains(HEAT_SOURCE));
    }

    #[test]
    fn rejects_invalid_constants() {
        let err = BioMaterial::new(parameters(-1.0, 2.0, 3.0, 0.5))
            .expect_err("negative density");
        assert!(matches!(
            err,
            BioMaterialError::Density {
                source: ConstraintError::Negative,
                ..
            }
        ));

        let err = BioMaterial::new(parameters(1.0, f64::NAN, 3.0, 0.5))
            .expect_err("NaN shear modulus");
        assert!(matches!(err, BioMaterialError::ShearModulus { .. }));

        let err = BioMaterial::new(parameters(1.0, 2.0, f64::INFINITY, 0.5))
            .expect_err("infinite lambda");
        assert!(matches!(
            err,
            BioMaterialError::Lambda {
                source: ConstraintError::Infinite,
                ..
            }
        ));

        assert!(BioMaterial::new(parameters(0.0, 0.0, -1.0, -0.5)).is_ok());
    }
}
