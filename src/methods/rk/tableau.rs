//! Butcher tableaus of the explicit single-step methods.

use crate::Float;

/// Fixed coefficients of an explicit Runge-Kutta method.
///
/// `a[i]` holds the `i` coefficients multiplying `k1..ki` when forming the
/// state of stage `i + 1`; row 0 is empty. All entries are dimensionless and
/// scaled by `dt` when a stepper is configured.
#[derive(Debug, PartialEq)]
pub struct Tableau {
    pub name: &'static str,
    /// Order of accuracy
    pub order: usize,
    /// Node fractions
    pub c: &'static [Float],
    /// Stage matrix, strictly lower triangular
    pub a: &'static [&'static [Float]],
    /// Weights
    pub b: &'static [Float],
}

impl Tableau {
    pub const fn stages(&self) -> usize {
        self.b.len()
    }
}

pub const EULER: Tableau = Tableau {
    name: "Euler Explicit Method",
    order: 1,
    c: &[0.0],
    a: &[&[]],
    b: &[1.0],
};

pub const HEUN: Tableau = Tableau {
    name: "Heun's Explicit Method (Improved Euler method)",
    order: 2,
    c: &[0.0, 1.0],
    a: &[&[], &[1.0]],
    b: &[0.5, 0.5],
};

pub const MIDPOINT: Tableau = Tableau {
    name: "MidPoint Explicit Method",
    order: 2,
    c: &[0.0, 0.5],
    a: &[&[], &[0.5]],
    b: &[0.0, 1.0],
};

pub const RALSTON2: Tableau = Tableau {
    name: "Second order Ralston Explicit Method",
    order: 2,
    c: &[0.0, 2.0 / 3.0],
    a: &[&[], &[2.0 / 3.0]],
    b: &[0.25, 0.75],
};

pub const HEUN3: Tableau = Tableau {
    name: "Heun's third-order method",
    order: 3,
    c: &[0.0, 1.0 / 3.0, 2.0 / 3.0],
    a: &[&[], &[1.0 / 3.0], &[0.0, 2.0 / 3.0]],
    b: &[0.25, 0.0, 0.75],
};

pub const RALSTON3: Tableau = Tableau {
    name: "Third order Ralston Explicit Method",
    order: 3,
    c: &[0.0, 0.5, 0.75],
    a: &[&[], &[0.5], &[0.0, 0.75]],
    b: &[2.0 / 9.0, 1.0 / 3.0, 4.0 / 9.0],
};

pub const WRAY3: Tableau = Tableau {
    name: "Van der Houwen's/Wray's third-order method",
    order: 3,
    c: &[0.0, 8.0 / 15.0, 2.0 / 3.0],
    a: &[&[], &[8.0 / 15.0], &[0.25, 5.0 / 12.0]],
    b: &[0.25, 0.0, 0.75],
};

pub const SSPRK3: Tableau = Tableau {
    name: "Third-order Strong Stability Preserving Runge-Kutta",
    order: 3,
    c: &[0.0, 1.0, 0.5],
    a: &[&[], &[1.0], &[0.25, 0.25]],
    b: &[1.0 / 6.0, 1.0 / 6.0, 2.0 / 3.0],
};

pub const KUTTA3: Tableau = Tableau {
    name: "Runge-Kutta Order 3",
    order: 3,
    c: &[0.0, 0.5, 1.0],
    a: &[&[], &[0.5], &[-1.0, 2.0]],
    b: &[1.0 / 6.0, 2.0 / 3.0, 1.0 / 6.0],
};

pub const RK4: Tableau = Tableau {
    name: "Runge-Kutta Order 4",
    order: 4,
    c: &[0.0, 0.5, 0.5, 1.0],
    a: &[&[], &[0.5], &[0.0, 0.5], &[0.0, 0.0, 1.0]],
    b: &[1.0 / 6.0, 1.0 / 3.0, 1.0 / 3.0, 1.0 / 6.0],
};

pub const RK38: Tableau = Tableau {
    name: "Runge-Kutta-38 Order 4",
    order: 4,
    c: &[0.0, 1.0 / 3.0, 2.0 / 3.0, 1.0],
    a: &[&[], &[1.0 / 3.0], &[-1.0 / 3.0, 1.0], &[1.0, -1.0, 1.0]],
    b: &[0.125, 0.375, 0.375, 0.125],
};

// Ralston's minimum-error fourth-order coefficients involve sqrt(5); these
// are the closed forms evaluated to 20 digits.
pub const RALSTON4: Tableau = Tableau {
    name: "Ralston's fourth-order method",
    order: 4,
    c: &[0.0, 0.4, 0.45573725421878943192, 1.0],
    a: &[
        &[],
        &[0.4],
        &[0.29697760924775360007, 0.15875964497103583185],
        &[0.2181003882259204676, -3.0509651486929308054, 3.8328647604670103378],
    ],
    b: &[
        0.17476028226269037125,
        -0.55148066287873294055,
        1.205535599396523535,
        0.17118478121951903426,
    ],
};

pub const NYSTROM5: Tableau = Tableau {
    name: "Nystrom's fifth-order method",
    order: 5,
    c: &[0.0, 1.0 / 3.0, 0.4, 1.0, 2.0 / 3.0, 0.8],
    a: &[
        &[],
        &[1.0 / 3.0],
        &[4.0 / 25.0, 6.0 / 25.0],
        &[0.25, -3.0, 15.0 / 4.0],
        &[2.0 / 27.0, 10.0 / 9.0, -50.0 / 81.0, 8.0 / 81.0],
        &[2.0 / 25.0, 12.0 / 25.0, 2.0 / 15.0, 8.0 / 75.0, 0.0],
    ],
    b: &[23.0 / 192.0, 0.0, 125.0 / 192.0, 0.0, -27.0 / 64.0, 125.0 / 192.0],
};

/// Every bundled explicit tableau.
pub(crate) const ALL: [&Tableau; 13] = [
    &EULER, &HEUN, &MIDPOINT, &RALSTON2, &HEUN3, &RALSTON3, &WRAY3, &SSPRK3, &KUTTA3, &RK4,
    &RK38, &RALSTON4, &NYSTROM5,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_sum_to_nodes() {
        for t in ALL {
            assert_eq!(t.c.len(), t.stages(), "{}", t.name);
            assert_eq!(t.a.len(), t.stages(), "{}", t.name);
            for (i, row) in t.a.iter().enumerate() {
                assert_eq!(row.len(), i, "{}", t.name);
                let sum: Float = row.iter().sum();
                assert!((sum - t.c[i]).abs() < 1e-12, "{} row {}", t.name, i);
            }
        }
    }

    #[test]
    fn weights_are_consistent() {
        for t in ALL {
            let sum: Float = t.b.iter().sum();
            assert!((sum - 1.0).abs() < 1e-12, "{}", t.name);
            if t.order >= 2 {
                // Second-order condition sum b_i c_i = 1/2
                let bc: Float = t.b.iter().zip(t.c).map(|(b, c)| b * c).sum();
                assert!((bc - 0.5).abs() < 1e-12, "{}", t.name);
            }
            if t.order >= 3 {
                let bc2: Float = t.b.iter().zip(t.c).map(|(b, c)| b * c * c).sum();
                assert!((bc2 - 1.0 / 3.0).abs() < 1e-12, "{}", t.name);
            }
        }
    }
}
