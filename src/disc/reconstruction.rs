use std::fmt;
use std::str::FromStr;

use ndarray::{Array3, ArrayView3, Slice, Zip};

use crate::{
    disc::{
        conversion::{conserved_to_primitive, primitive_evolution, primitive_to_conserved_ret},
        flux::flux_vector,
        mesh::mesh2d::CartesianMesh2d,
        variables::Direction,
    },
    error::HydroError,
    solver::HydroScheme,
    temporal_disc::TimeIntegration,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reconstruction {
    /// Piecewise constant: edge states are the cell-center states.
    Constant,
    /// Piecewise linear with a limited slope.
    Linear,
}
impl Reconstruction {
    /// Ghost layers needed on each side; slopes need one more neighbour.
    pub fn nghost(self) -> usize {
        match self {
            Reconstruction::Constant => 1,
            Reconstruction::Linear => 2,
        }
    }
}
impl FromStr for Reconstruction {
    type Err = HydroError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "const" | "constant" => Ok(Reconstruction::Constant),
            "linear" => Ok(Reconstruction::Linear),
            _ => Err(HydroError::unknown("reconstruction scheme", s)),
        }
    }
}
impl fmt::Display for Reconstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Reconstruction::Constant => "const",
            Reconstruction::Linear => "linear",
        };
        f.write_str(name)
    }
}

/// Left and right cell-edge primitive states of the sweep in progress.
#[derive(Clone, Debug)]
pub enum EdgeStates {
    /// Edge states are the cell centers themselves.
    CellCenter,
    /// Edge states stored separately, recomputed every sweep.
    Computed { left: Array3<f64>, right: Array3<f64> },
}
impl EdgeStates {
    pub fn new(reconstruction: Reconstruction, mesh: &CartesianMesh2d) -> Self {
        match reconstruction {
            Reconstruction::Constant => EdgeStates::CellCenter,
            Reconstruction::Linear => EdgeStates::Computed {
                left: mesh.empty_array(),
                right: mesh.empty_array(),
            },
        }
    }
    /// Views of the left (`i - 1/2`) and right (`i + 1/2`) edge states of every cell.
    pub fn views<'a>(&'a self, v: &'a Array3<f64>) -> (ArrayView3<'a, f64>, ArrayView3<'a, f64>) {
        match self {
            EdgeStates::CellCenter => (v.view(), v.view()),
            EdgeStates::Computed { left, right } => (left.view(), right.view()),
        }
    }
}

/// Populate the edge states for a sweep along `dir`.
///
/// Linear reconstruction covers every cell except the outermost layer along the sweep axis. The
/// Hancock schemes then advance the edge states by half a timestep, either with the linearised
/// primitive equations or by differencing the analytic fluxes of the two edges.
pub fn reconstruct(
    scheme: &HydroScheme,
    v: &Array3<f64>,
    edges: &mut EdgeStates,
    dir: Direction,
    dt: f64,
    dx: f64,
    hcr: f64,
) -> Result<(), HydroError> {
    if scheme.reconstruction == Reconstruction::Constant {
        return Ok(());
    }
    let EdgeStates::Computed { left, right } = edges else {
        return Err(HydroError::NotInitialized("edge-state storage"));
    };
    let axis = dir.axis();
    let n = v.len_of(axis);
    let v_l = v.slice_axis(axis, Slice::from(0..n - 2));
    let v_c = v.slice_axis(axis, Slice::from(1..n - 1));
    let v_r = v.slice_axis(axis, Slice::from(2..n));

    // undivided differences
    let s_l = &v_c - &v_l;
    let s_r = &v_r - &v_c;
    let slim = scheme.limiter.limit_array(s_l.view(), s_r.view());

    let mut v_im12 = left.slice_axis_mut(axis, Slice::from(1..n - 1));
    let mut v_ip12 = right.slice_axis_mut(axis, Slice::from(1..n - 1));
    Zip::from(&mut v_im12)
        .and(&v_c)
        .and(&slim)
        .for_each(|e, &c, &s| *e = c - 0.5 * s);
    Zip::from(&mut v_ip12)
        .and(&v_c)
        .and(&slim)
        .for_each(|e, &c, &s| *e = c + 0.5 * s);

    let fac = 0.5 * dt / dx;
    match scheme.time_integration {
        TimeIntegration::Euler => {}
        TimeIntegration::HancockPrimitive => {
            let dv_im12 = primitive_evolution(dir, v_im12.view(), slim.view(), hcr);
            let dv_ip12 = primitive_evolution(dir, v_ip12.view(), slim.view(), hcr);
            v_im12.scaled_add(fac, &dv_im12);
            v_ip12.scaled_add(fac, &dv_ip12);
        }
        TimeIntegration::HancockConservative => {
            let mut u_im12 = primitive_to_conserved_ret(v_im12.view(), hcr);
            let mut u_ip12 = primitive_to_conserved_ret(v_ip12.view(), hcr);
            let f_diff =
                flux_vector(dir, v_im12.view(), hcr) - flux_vector(dir, v_ip12.view(), hcr);
            u_im12.scaled_add(fac, &f_diff);
            u_ip12.scaled_add(fac, &f_diff);
            conserved_to_primitive(u_im12.view(), v_im12.view_mut(), hcr)?;
            conserved_to_primitive(u_ip12.view(), v_ip12.view_mut(), hcr)?;
        }
    }
    Ok(())
}
