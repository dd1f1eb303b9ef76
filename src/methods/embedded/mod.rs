//! Adaptive embedded Runge-Kutta pairs
//!
//! Every pair is data: an [`EmbeddedTableau`] with one set of stages and two
//! weight vectors. [`Embedded`] evaluates the stages once, forms both
//! solutions and estimates the local error as `E = |x_high - x_low| / |dt|`
//! (max-norm over a grid). A step is accepted when `E <= adaptive_tolerance`,
//! otherwise the state is handed back untouched and `dt` shrinks for the
//! retry.

mod adaptive;
mod tableau;

pub use adaptive::Embedded;
pub use tableau::{
    BOGACKI_SHAMPINE, CASH_KARP, DORMAND_PRINCE, EmbeddedTableau, FEHLBERG12, FEHLBERG45,
    HEUN_EULER, Propagate,
};
