//! Method selection and a marching driver on top of the steppers.

pub mod march;
pub mod method;

pub use march::{NMAX, march, march_on_grid};
pub use method::{Method, SymplecticMethod};
