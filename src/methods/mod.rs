//! Numerical methods

pub mod embedded;
pub mod implicit;
pub mod rk;
pub mod settings;
pub mod symplectic;
