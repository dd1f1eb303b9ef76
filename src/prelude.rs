//! Convenient prelude: import the most commonly used traits, types, and functions.
//!
//! Bring this into scope with:
//!
//! ```rust
//! use odestep::prelude::*;
//! ```
//!
//! Re-exports included:
//! - Core traits and types: `DriveFunction`, `Autonomous`, `Stepper`, `Step`,
//!   `Outcome`, `Solution`, `Status`.
//! - Symplectic trait: `Symplectic`.
//! - Configuration and errors: `Settings`, `Error`.
//! - High-level API: `Method`, `SymplecticMethod`, `march`, `march_on_grid`.

pub use crate::core::{
    drive::{Autonomous, DriveFunction},
    solution::Solution,
    status::Status,
    stepper::{Outcome, Step, Stepper},
};
pub use crate::error::Error;
pub use crate::methods::{settings::Settings, symplectic::Symplectic};
pub use crate::solve::{Method, SymplecticMethod, march, march_on_grid};
