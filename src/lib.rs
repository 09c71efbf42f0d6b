//! # Twine Thermoelastic
//!
//! Residual terms and a material model for coupled elastodynamic and
//! bio-thermal simulation, built on [Twine](https://github.com/isentropic-dev/twine).
//!
//! A host finite-element engine owns the mesh, the quadrature loop, and the
//! assembly of the global system. This crate supplies the per-point physics:
//! a material that publishes constant elastic and thermal properties, and a
//! set of named residual terms that turn field gradients and properties into
//! scalar contributions.
//!
//! ## Crate layout
//!
//! - [`models`]: The thermoelastic material, residual terms, and their
//!   [`twine_core::Model`] adapters.
//! - [`support`]: Configuration schemas, the term registry, quadrature-point
//!   provider traits, profile functions, and value constraints.
//!
//! Modules in [`support`] are part of the public API because hosts need them
//! to configure terms, but their APIs are not stable.

pub mod models;
pub mod support;
