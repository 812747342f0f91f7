use std::fmt;
use std::str::FromStr;

use crate::error::HydroError;

pub mod mesh2d;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoundaryType {
    Periodic,
    Outflow,
}
impl FromStr for BoundaryType {
    type Err = HydroError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "periodic" => Ok(BoundaryType::Periodic),
            "outflow" => Ok(BoundaryType::Outflow),
            _ => Err(HydroError::unknown("type of boundary condition", s)),
        }
    }
}
impl fmt::Display for BoundaryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BoundaryType::Periodic => "periodic",
            BoundaryType::Outflow => "outflow",
        };
        f.write_str(name)
    }
}
