//! Public Twine models.
//!
//! # Organization
//!
//! Models are organized into domain-specific submodules. The
//! [`thermoelastic`] domain holds the bio-thermal material and the weak-form
//! residual terms of the coupled velocity and stress equations.
//!
//! # Model structure
//!
//! Computation lives in plain types with their own APIs
//! ([`thermoelastic::material::BioMaterial`], [`thermoelastic::terms::Term`]).
//! The [`twine_core::Model`] implementations are thin adapters that delegate
//! to those APIs.

pub mod thermoelastic;
