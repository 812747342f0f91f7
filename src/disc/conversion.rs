use ndarray::{Array2, Array3, ArrayView2, ArrayView3, ArrayViewMut3, Axis, Zip};

use crate::{
    disc::variables::{DN, ET, MS, MX, MY, NQ, PR, VX, VY, Direction, lane_to_cell},
    error::HydroError,
};

pub fn cell_primitive_to_conserved(q: &[f64; NQ], hcr: f64) -> [f64; NQ] {
    let rho = q[DN];
    let ux = q[VX];
    let uy = q[VY];
    let mut u = [0.0; NQ];
    u[MS] = rho;
    u[MX] = ux * rho;
    u[MY] = uy * rho;
    u[ET] = 0.5 * (ux * ux + uy * uy) * rho + q[PR] / (hcr - 1.0);
    u
}
pub fn cell_conserved_to_primitive(u: &[f64; NQ], hcr: f64) -> [f64; NQ] {
    let rho = u[MS];
    let ux = u[MX] / rho;
    let uy = u[MY] / rho;
    let mut q = [0.0; NQ];
    q[DN] = rho;
    q[VX] = ux;
    q[VY] = uy;
    q[PR] = (u[ET] - 0.5 * rho * (ux * ux + uy * uy)) * (hcr - 1.0);
    q
}

/// Write the conserved form of the primitive array `v` into `u`.
pub fn primitive_to_conserved(v: ArrayView3<f64>, mut u: ArrayViewMut3<f64>, hcr: f64) {
    Zip::from(v.lanes(Axis(0)))
        .and(u.lanes_mut(Axis(0)))
        .for_each(|q, mut w| {
            let cons = cell_primitive_to_conserved(&lane_to_cell(q), hcr);
            for (dst, src) in w.iter_mut().zip(cons) {
                *dst = src;
            }
        });
}
pub fn primitive_to_conserved_ret(v: ArrayView3<f64>, hcr: f64) -> Array3<f64> {
    let mut u = Array3::zeros(v.raw_dim());
    primitive_to_conserved(v, u.view_mut(), hcr);
    u
}

/// Write the primitive form of the conserved array `u` into `v`.
///
/// Zero or negative density or pressure anywhere in the result means the numerical state has
/// broken down; the first offending cell is reported.
pub fn conserved_to_primitive(
    u: ArrayView3<f64>,
    mut v: ArrayViewMut3<f64>,
    hcr: f64,
) -> Result<(), HydroError> {
    Zip::from(u.lanes(Axis(0)))
        .and(v.lanes_mut(Axis(0)))
        .for_each(|w, mut q| {
            let prim = cell_conserved_to_primitive(&lane_to_cell(w), hcr);
            for (dst, src) in q.iter_mut().zip(prim) {
                *dst = src;
            }
        });
    check_positive(v.view())
}
pub fn check_positive(v: ArrayView3<f64>) -> Result<(), HydroError> {
    if let Some(((i, j), value)) = first_non_positive(v.index_axis(Axis(0), DN)) {
        return Err(HydroError::NonPositiveDensity { i, j, value });
    }
    if let Some(((i, j), value)) = first_non_positive(v.index_axis(Axis(0), PR)) {
        return Err(HydroError::NonPositivePressure { i, j, value });
    }
    Ok(())
}
fn first_non_positive(field: ArrayView2<f64>) -> Option<((usize, usize), f64)> {
    // NaN fails the comparison and is reported as well
    field
        .indexed_iter()
        .find(|(_, value)| !(**value > 0.0))
        .map(|(idx, &value)| (idx, value))
}

/// Sound speed `sqrt(hcr p / rho)` in every cell of `v`.
pub fn sound_speed(v: ArrayView3<f64>, hcr: f64) -> Result<Array2<f64>, HydroError> {
    let cs = Zip::from(v.index_axis(Axis(0), PR))
        .and(v.index_axis(Axis(0), DN))
        .map_collect(|&p, &rho| (hcr * p / rho).sqrt());
    if let Some(((i, j), _)) = cs.indexed_iter().find(|(_, c)| !c.is_finite()) {
        return Err(HydroError::NonFiniteSoundSpeed {
            i,
            j,
            density: v[[DN, i, j]],
            pressure: v[[PR, i, j]],
        });
    }
    Ok(cs)
}

/// Linearised Euler equations in primitive form, `dV/dt = -A(V) dV/dx`.
///
/// `dv_dx` holds undivided differences; the caller scales the result by `dt / dx`.
pub fn primitive_evolution(
    dir: Direction,
    v: ArrayView3<f64>,
    dv_dx: ArrayView3<f64>,
    hcr: f64,
) -> Array3<f64> {
    let v1 = dir.along();
    let v2 = dir.across();
    let mut dv_dt = Array3::zeros(dv_dx.raw_dim());
    Zip::from(dv_dt.lanes_mut(Axis(0)))
        .and(v.lanes(Axis(0)))
        .and(dv_dx.lanes(Axis(0)))
        .for_each(|mut out, q, dq| {
            out[DN] = -(q[v1] * dq[DN] + dq[v1] * q[DN]);
            out[v1] = -(q[v1] * dq[v1] + dq[PR] / q[DN]);
            out[v2] = -(q[v1] * dq[v2]);
            out[PR] = -(q[v1] * dq[PR] + dq[v1] * q[PR] * hcr);
        });
    dv_dt
}
