//! Supporting utilities used by models.

pub mod constraint;
pub mod profile;
pub mod quadrature;
pub mod registry;
pub mod schema;
