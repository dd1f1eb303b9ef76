//! Embedded Runge-Kutta pairs.

use crate::Float;

/// Which of the two embedded solutions becomes the new state on acceptance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagate {
    /// Higher-order result (local extrapolation).
    High,
    /// Lower-order result.
    Low,
}

/// Two weight vectors of adjacent order sharing one set of stages.
#[derive(Debug, PartialEq)]
pub struct EmbeddedTableau {
    pub name: &'static str,
    /// Order of the `b_high` solution; `b_low` is one less.
    pub order: usize,
    pub c: &'static [Float],
    pub a: &'static [&'static [Float]],
    pub b_high: &'static [Float],
    pub b_low: &'static [Float],
    /// Default choice of propagated solution.
    pub propagate: Propagate,
}

impl EmbeddedTableau {
    pub const fn stages(&self) -> usize {
        self.c.len()
    }
}

pub const HEUN_EULER: EmbeddedTableau = EmbeddedTableau {
    name: "Heun-Euler 2(1)",
    order: 2,
    c: &[0.0, 1.0],
    a: &[&[], &[1.0]],
    b_high: &[0.5, 0.5],
    b_low: &[1.0, 0.0],
    propagate: Propagate::High,
};

/// Fehlberg's first-order pair; the third stage is evaluated at the
/// low-order solution (FSAL), hence propagating the low-order result.
pub const FEHLBERG12: EmbeddedTableau = EmbeddedTableau {
    name: "Fehlberg RK1(2)",
    order: 2,
    c: &[0.0, 0.5, 1.0],
    a: &[&[], &[0.5], &[1.0 / 256.0, 255.0 / 256.0]],
    b_high: &[1.0 / 512.0, 255.0 / 256.0, 1.0 / 512.0],
    b_low: &[1.0 / 256.0, 255.0 / 256.0, 0.0],
    propagate: Propagate::Low,
};

pub const BOGACKI_SHAMPINE: EmbeddedTableau = EmbeddedTableau {
    name: "Bogacki-Shampine 3(2)",
    order: 3,
    c: &[0.0, 0.5, 0.75, 1.0],
    a: &[
        &[],
        &[0.5],
        &[0.0, 0.75],
        &[2.0 / 9.0, 1.0 / 3.0, 4.0 / 9.0],
    ],
    b_high: &[2.0 / 9.0, 1.0 / 3.0, 4.0 / 9.0, 0.0],
    b_low: &[7.0 / 24.0, 0.25, 1.0 / 3.0, 0.125],
    propagate: Propagate::High,
};

/// Runge-Kutta-Fehlberg 4(5). Fehlberg designed the pair to carry the
/// fourth-order solution.
pub const FEHLBERG45: EmbeddedTableau = EmbeddedTableau {
    name: "Runge-Kutta-Fehlberg 4(5)",
    order: 5,
    c: &[0.0, 0.25, 3.0 / 8.0, 12.0 / 13.0, 1.0, 0.5],
    a: &[
        &[],
        &[0.25],
        &[3.0 / 32.0, 9.0 / 32.0],
        &[1932.0 / 2197.0, -7200.0 / 2197.0, 7296.0 / 2197.0],
        &[439.0 / 216.0, -8.0, 3680.0 / 513.0, -845.0 / 4104.0],
        &[-8.0 / 27.0, 2.0, -3544.0 / 2565.0, 1859.0 / 4104.0, -11.0 / 40.0],
    ],
    b_high: &[
        16.0 / 135.0,
        0.0,
        6656.0 / 12825.0,
        28561.0 / 56430.0,
        -9.0 / 50.0,
        2.0 / 55.0,
    ],
    b_low: &[
        25.0 / 216.0,
        0.0,
        1408.0 / 2565.0,
        2197.0 / 4104.0,
        -0.2,
        0.0,
    ],
    propagate: Propagate::Low,
};

pub const CASH_KARP: EmbeddedTableau = EmbeddedTableau {
    name: "Cash-Karp 5(4)",
    order: 5,
    c: &[0.0, 0.2, 0.3, 0.6, 1.0, 7.0 / 8.0],
    a: &[
        &[],
        &[0.2],
        &[3.0 / 40.0, 9.0 / 40.0],
        &[0.3, -0.9, 1.2],
        &[-11.0 / 54.0, 2.5, -70.0 / 27.0, 35.0 / 27.0],
        &[
            1631.0 / 55296.0,
            175.0 / 512.0,
            575.0 / 13824.0,
            44275.0 / 110592.0,
            253.0 / 4096.0,
        ],
    ],
    b_high: &[
        37.0 / 378.0,
        0.0,
        250.0 / 621.0,
        125.0 / 594.0,
        0.0,
        512.0 / 1771.0,
    ],
    b_low: &[
        2825.0 / 27648.0,
        0.0,
        18575.0 / 48384.0,
        13525.0 / 55296.0,
        277.0 / 14336.0,
        0.25,
    ],
    propagate: Propagate::High,
};

pub const DORMAND_PRINCE: EmbeddedTableau = EmbeddedTableau {
    name: "Dormand-Prince 5(4)",
    order: 5,
    c: &[0.0, 0.2, 0.3, 0.8, 8.0 / 9.0, 1.0, 1.0],
    a: &[
        &[],
        &[0.2],
        &[3.0 / 40.0, 9.0 / 40.0],
        &[44.0 / 45.0, -56.0 / 15.0, 32.0 / 9.0],
        &[
            19372.0 / 6561.0,
            -25360.0 / 2187.0,
            64448.0 / 6561.0,
            -212.0 / 729.0,
        ],
        &[
            9017.0 / 3168.0,
            -355.0 / 33.0,
            46732.0 / 5247.0,
            49.0 / 176.0,
            -5103.0 / 18656.0,
        ],
        &[
            35.0 / 384.0,
            0.0,
            500.0 / 1113.0,
            125.0 / 192.0,
            -2187.0 / 6784.0,
            11.0 / 84.0,
        ],
    ],
    b_high: &[
        35.0 / 384.0,
        0.0,
        500.0 / 1113.0,
        125.0 / 192.0,
        -2187.0 / 6784.0,
        11.0 / 84.0,
        0.0,
    ],
    b_low: &[
        5179.0 / 57600.0,
        0.0,
        7571.0 / 16695.0,
        393.0 / 640.0,
        -92097.0 / 339200.0,
        187.0 / 2100.0,
        1.0 / 40.0,
    ],
    propagate: Propagate::High,
};

pub(crate) const ALL: [&EmbeddedTableau; 6] = [
    &HEUN_EULER,
    &FEHLBERG12,
    &BOGACKI_SHAMPINE,
    &FEHLBERG45,
    &CASH_KARP,
    &DORMAND_PRINCE,
];
