//! Core traits and types used throughout the library.

pub mod drive;
pub mod solution;
pub mod status;
pub mod stepper;
pub mod workspace;
