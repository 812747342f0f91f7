use ndarray::Array3;

use crate::disc::{
    mesh::{BoundaryType, mesh2d::CartesianMesh2d},
    variables::Direction,
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BoundaryPosition {
    Lower,
    Right,
    Upper,
    Left,
}
impl BoundaryPosition {
    // x sides first; the y sides then run over the full x range and fill the corners.
    pub const FILL_ORDER: [BoundaryPosition; 4] = [
        BoundaryPosition::Left,
        BoundaryPosition::Right,
        BoundaryPosition::Lower,
        BoundaryPosition::Upper,
    ];
    pub fn direction(self) -> Direction {
        match self {
            BoundaryPosition::Left | BoundaryPosition::Right => Direction::X,
            BoundaryPosition::Lower | BoundaryPosition::Upper => Direction::Y,
        }
    }
    /// Index of the `k`-th ghost layer beyond this side, counted outwards.
    pub fn ghost_index(self, mesh: &CartesianMesh2d, k: usize) -> usize {
        let dir = self.direction();
        match self {
            BoundaryPosition::Left | BoundaryPosition::Lower => mesh.lo(dir) - 1 - k,
            BoundaryPosition::Right | BoundaryPosition::Upper => mesh.hi(dir) + 1 + k,
        }
    }
    /// Physical index that the `k`-th ghost layer copies from.
    pub fn source_index(
        self,
        mesh: &CartesianMesh2d,
        boundary_type: BoundaryType,
        k: usize,
    ) -> usize {
        let dir = self.direction();
        let lo = mesh.lo(dir);
        let hi = mesh.hi(dir);
        match (boundary_type, self) {
            (BoundaryType::Periodic, BoundaryPosition::Left | BoundaryPosition::Lower) => hi - k,
            (BoundaryType::Periodic, BoundaryPosition::Right | BoundaryPosition::Upper) => lo + k,
            (BoundaryType::Outflow, BoundaryPosition::Left | BoundaryPosition::Lower) => lo,
            (BoundaryType::Outflow, BoundaryPosition::Right | BoundaryPosition::Upper) => hi,
        }
    }
}

/// Fill every ghost layer of `field` from the physical domain.
///
/// Periodic ghosts wrap around to the opposite edge; outflow ghosts repeat the nearest edge cell.
pub fn enforce_boundary_conditions(mesh: &CartesianMesh2d, field: &mut Array3<f64>) {
    for position in BoundaryPosition::FILL_ORDER {
        let axis = position.direction().axis();
        for k in 0..mesh.nghost {
            let src = position.source_index(mesh, mesh.boundary_type, k);
            let dst = position.ghost_index(mesh, k);
            let layer = field.index_axis(axis, src).to_owned();
            field.index_axis_mut(axis, dst).assign(&layer);
        }
    }
}
