use ndarray::{ArrayView1, ArrayViewMut1, Axis};
use serde::{Deserialize, Serialize};

/// Number of fluid variables in two dimensions.
pub const NQ: usize = 4;

// Primitive slots
pub const DN: usize = PrimitiveVar::Density as usize;
pub const VX: usize = PrimitiveVar::VelocityX as usize;
pub const VY: usize = PrimitiveVar::VelocityY as usize;
pub const PR: usize = PrimitiveVar::Pressure as usize;

// Conserved slots; density shares its slot with the primitive vector
pub const MS: usize = ConservedVar::Mass as usize;
pub const MX: usize = ConservedVar::MomentumX as usize;
pub const MY: usize = ConservedVar::MomentumY as usize;
pub const ET: usize = ConservedVar::TotalEnergy as usize;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PrimitiveVar {
    Density = 0,
    VelocityX = 1,
    VelocityY = 2,
    Pressure = 3,
}
impl PrimitiveVar {
    pub const ALL: [PrimitiveVar; NQ] = [
        PrimitiveVar::Density,
        PrimitiveVar::VelocityX,
        PrimitiveVar::VelocityY,
        PrimitiveVar::Pressure,
    ];
    pub fn index(self) -> usize {
        self as usize
    }
    pub fn name(self) -> &'static str {
        match self {
            PrimitiveVar::Density => "DN",
            PrimitiveVar::VelocityX => "VX",
            PrimitiveVar::VelocityY => "VY",
            PrimitiveVar::Pressure => "PR",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConservedVar {
    Mass = 0,
    MomentumX = 1,
    MomentumY = 2,
    TotalEnergy = 3,
}
impl ConservedVar {
    pub const ALL: [ConservedVar; NQ] = [
        ConservedVar::Mass,
        ConservedVar::MomentumX,
        ConservedVar::MomentumY,
        ConservedVar::TotalEnergy,
    ];
    pub fn index(self) -> usize {
        self as usize
    }
    pub fn name(self) -> &'static str {
        match self {
            ConservedVar::Mass => "MS",
            ConservedVar::MomentumX => "MX",
            ConservedVar::MomentumY => "MY",
            ConservedVar::TotalEnergy => "ET",
        }
    }
}

/// Sweep direction of a dimensionally split update.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    X,
    Y,
}
impl Direction {
    pub fn index(self) -> usize {
        match self {
            Direction::X => 0,
            Direction::Y => 1,
        }
    }
    pub fn other(self) -> Direction {
        match self {
            Direction::X => Direction::Y,
            Direction::Y => Direction::X,
        }
    }
    /// Array axis of this direction in a `[NQ, nx, ny]` field array.
    pub fn axis(self) -> Axis {
        Axis(1 + self.index())
    }
    /// Slot of the velocity (or momentum) component along this direction.
    pub fn along(self) -> usize {
        VX + self.index()
    }
    /// Slot of the velocity (or momentum) component across this direction.
    pub fn across(self) -> usize {
        VX + self.other().index()
    }
}

pub fn lane_to_cell(q: ArrayView1<f64>) -> [f64; NQ] {
    std::array::from_fn(|i| q[i])
}
pub fn cell_to_lane(cell: &[f64; NQ], mut q: ArrayViewMut1<f64>) {
    for (dst, src) in q.iter_mut().zip(cell.iter()) {
        *dst = *src;
    }
}
