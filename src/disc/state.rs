use ndarray::Array3;

use crate::disc::{
    mesh::mesh2d::CartesianMesh2d,
    reconstruction::{EdgeStates, Reconstruction},
};

/// Primitive and conserved fields on the full grid, plus the edge states of the current sweep.
#[derive(Clone, Debug)]
pub struct FluidState {
    pub v: Array3<f64>,
    pub u: Array3<f64>,
    pub edges: EdgeStates,
}
impl FluidState {
    pub fn new(mesh: &CartesianMesh2d, reconstruction: Reconstruction) -> Self {
        Self {
            v: mesh.empty_array(),
            u: mesh.empty_array(),
            edges: EdgeStates::new(reconstruction, mesh),
        }
    }
}
