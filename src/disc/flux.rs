use ndarray::{Array3, ArrayView3, Axis, Zip};

use crate::disc::variables::{DN, ET, MX, NQ, PR, Direction, cell_to_lane, lane_to_cell};

/// Analytic Euler flux of one primitive state along `dir`.
pub fn cell_flux(dir: Direction, q: &[f64; NQ], hcr: f64) -> [f64; NQ] {
    let idir = dir.index();
    let idir2 = dir.other().index();
    let rho = q[DN];
    let u1 = q[dir.along()];
    let u2 = q[dir.across()];
    let prs = q[PR];
    let rho_u1 = rho * u1;
    let etot = 0.5 * rho * (u1 * u1 + u2 * u2) + prs / (hcr - 1.0);
    let mut f = [0.0; NQ];
    f[DN] = rho_u1;
    f[MX + idir] = rho_u1 * u1 + prs;
    f[MX + idir2] = rho_u1 * u2;
    f[ET] = (etot + prs) * u1;
    f
}

pub fn flux_vector(dir: Direction, v: ArrayView3<f64>, hcr: f64) -> Array3<f64> {
    let mut f = Array3::zeros(v.raw_dim());
    Zip::from(f.lanes_mut(Axis(0)))
        .and(v.lanes(Axis(0)))
        .for_each(|fq, q| cell_to_lane(&cell_flux(dir, &lane_to_cell(q), hcr), fq));
    f
}
