use std::ops::Range;

use ndarray::{Array1, Array2, Array3, ArrayView3, ArrayViewMut3, s};

use super::BoundaryType;
use crate::{
    disc::variables::{Direction, NQ},
    error::HydroError,
    solver::MeshParameters,
};

/// Uniform Cartesian grid with square cells and `nghost` ghost layers on every side.
///
/// Field arrays on this mesh have the shape `[NQ, nx + 2 nghost, ny + 2 nghost]`; the physical
/// cells occupy `xlo..=xhi` and `ylo..=yhi`.
#[derive(Clone, Debug)]
pub struct CartesianMesh2d {
    pub nx: usize,
    pub ny: usize,
    pub nghost: usize,
    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub ymax: f64,
    pub dx: f64,
    pub xlo: usize,
    pub xhi: usize,
    pub ylo: usize,
    pub yhi: usize,
    pub x: Array1<f64>, // cell centers including ghost cells
    pub y: Array1<f64>,
    pub boundary_type: BoundaryType,
}
impl CartesianMesh2d {
    pub fn new(mesh_param: &MeshParameters, nghost: usize) -> Result<Self, HydroError> {
        let nx = mesh_param.nx;
        let ny = mesh_param.ny;
        if nx == 0 || ny == 0 {
            return Err(HydroError::InvalidConfig(format!(
                "grid must have at least one cell in each direction, got {nx} x {ny}"
            )));
        }
        if !(mesh_param.xmax > mesh_param.xmin) {
            return Err(HydroError::InvalidConfig(format!(
                "domain extent must be positive, got x = [{} .. {}]",
                mesh_param.xmin, mesh_param.xmax
            )));
        }
        if nghost == 0 {
            return Err(HydroError::InvalidConfig(
                "at least one ghost layer is required".to_string(),
            ));
        }
        let xmin = mesh_param.xmin;
        let xmax = mesh_param.xmax;
        let ymin = mesh_param.ymin;
        let dx = (xmax - xmin) / nx as f64;
        let ymax = ymin + ny as f64 * dx;
        let ng = nghost;
        let x = Array1::from_shape_fn(nx + 2 * ng, |i| {
            xmin + (i as f64 - ng as f64) * dx + 0.5 * dx
        });
        let y = Array1::from_shape_fn(ny + 2 * ng, |j| {
            ymin + (j as f64 - ng as f64) * dx + 0.5 * dx
        });
        log::info!(
            "Grid setup {} x {}, dimensions x = [{:.2e} .. {:.2e}] y = [{:.2e} .. {:.2e}]",
            nx,
            ny,
            xmin,
            xmax,
            ymin,
            ymax
        );
        Ok(Self {
            nx,
            ny,
            nghost,
            xmin,
            xmax,
            ymin,
            ymax,
            dx,
            xlo: ng,
            xhi: ng + nx - 1,
            ylo: ng,
            yhi: ng + ny - 1,
            x,
            y,
            boundary_type: mesh_param.boundary_type,
        })
    }
    /// Number of cells along `dir`, ghost cells included.
    pub fn n_total(&self, dir: Direction) -> usize {
        match dir {
            Direction::X => self.nx + 2 * self.nghost,
            Direction::Y => self.ny + 2 * self.nghost,
        }
    }
    /// First physical index along `dir`.
    pub fn lo(&self, dir: Direction) -> usize {
        match dir {
            Direction::X => self.xlo,
            Direction::Y => self.ylo,
        }
    }
    /// Last physical index along `dir`.
    pub fn hi(&self, dir: Direction) -> usize {
        match dir {
            Direction::X => self.xhi,
            Direction::Y => self.yhi,
        }
    }
    pub fn interior_range(&self, dir: Direction) -> Range<usize> {
        self.lo(dir)..self.hi(dir) + 1
    }
    pub fn field_shape(&self) -> [usize; 3] {
        [NQ, self.n_total(Direction::X), self.n_total(Direction::Y)]
    }
    pub fn empty_array(&self) -> Array3<f64> {
        Array3::zeros(self.field_shape())
    }
    /// Cell-center coordinates of every cell (ghost cells included), indexed `[i, j]`.
    pub fn xy_grid(&self) -> (Array2<f64>, Array2<f64>) {
        let shape = (self.x.len(), self.y.len());
        let xs = Array2::from_shape_fn(shape, |(i, _)| self.x[i]);
        let ys = Array2::from_shape_fn(shape, |(_, j)| self.y[j]);
        (xs, ys)
    }
    /// Array index of the physical cell containing `(x, y)`, if any.
    pub fn locate(&self, x: f64, y: f64) -> Option<(usize, usize)> {
        if !(x >= self.xmin && x <= self.xmax && y >= self.ymin && y <= self.ymax) {
            return None;
        }
        let i = (((x - self.xmin) / self.dx).floor() as usize).min(self.nx - 1);
        let j = (((y - self.ymin) / self.dx).floor() as usize).min(self.ny - 1);
        Some((i + self.xlo, j + self.ylo))
    }
    pub fn interior<'a>(&self, arr: ArrayView3<'a, f64>) -> ArrayView3<'a, f64> {
        arr.slice_move(s![.., self.xlo..self.xhi + 1, self.ylo..self.yhi + 1])
    }
    pub fn interior_mut<'a>(&self, arr: ArrayViewMut3<'a, f64>) -> ArrayViewMut3<'a, f64> {
        arr.slice_move(s![.., self.xlo..self.xhi + 1, self.ylo..self.yhi + 1])
    }
}

/// Block of a field array given by a range along the sweep axis and a range across it.
pub fn sweep_block<'a>(
    arr: ArrayView3<'a, f64>,
    dir: Direction,
    along: Range<usize>,
    across: Range<usize>,
) -> ArrayView3<'a, f64> {
    match dir {
        Direction::X => arr.slice_move(s![.., along, across]),
        Direction::Y => arr.slice_move(s![.., across, along]),
    }
}
pub fn sweep_block_mut<'a>(
    arr: ArrayViewMut3<'a, f64>,
    dir: Direction,
    along: Range<usize>,
    across: Range<usize>,
) -> ArrayViewMut3<'a, f64> {
    match dir {
        Direction::X => arr.slice_move(s![.., along, across]),
        Direction::Y => arr.slice_move(s![.., across, along]),
    }
}
