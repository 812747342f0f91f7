use std::fmt;
use std::str::FromStr;

use ndarray::{Array3, ArrayView3};

use crate::{disc::variables::Direction, error::HydroError};

pub mod hll;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RiemannSolver {
    Hll,
}
impl RiemannSolver {
    /// Godunov fluxes across the interfaces between the left states `vl` and right states `vr`.
    pub fn solve(
        self,
        dir: Direction,
        vl: ArrayView3<f64>,
        vr: ArrayView3<f64>,
        hcr: f64,
    ) -> Result<Array3<f64>, HydroError> {
        match self {
            RiemannSolver::Hll => hll::hll(dir, vl, vr, hcr),
        }
    }
}
impl FromStr for RiemannSolver {
    type Err = HydroError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hll" => Ok(RiemannSolver::Hll),
            _ => Err(HydroError::unknown("Riemann solver", s)),
        }
    }
}
impl fmt::Display for RiemannSolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiemannSolver::Hll => f.write_str("hll"),
        }
    }
}
