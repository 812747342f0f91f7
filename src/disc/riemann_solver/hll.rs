use ndarray::{Array3, ArrayView3, Axis, Zip};

use crate::{
    disc::{
        conversion::{cell_primitive_to_conserved, sound_speed},
        flux::cell_flux,
        variables::{Direction, NQ, cell_to_lane, lane_to_cell},
    },
    error::HydroError,
};

/// HLL flux for one interface given primitive states and sound speeds on both sides.
pub fn hll_cell(
    dir: Direction,
    ql: &[f64; NQ],
    qr: &[f64; NQ],
    cl: f64,
    cr: f64,
    hcr: f64,
) -> [f64; NQ] {
    let sl = ql[dir.along()] - cl;
    let sr = qr[dir.along()] + cr;
    if sr <= 0.0 {
        return cell_flux(dir, qr, hcr);
    }
    if sl >= 0.0 {
        return cell_flux(dir, ql, hcr);
    }
    let fl = cell_flux(dir, ql, hcr);
    let fr = cell_flux(dir, qr, hcr);
    let ul = cell_primitive_to_conserved(ql, hcr);
    let ur = cell_primitive_to_conserved(qr, hcr);
    std::array::from_fn(|k| {
        (sr * fl[k] - sl * fr[k] + sl * sr * (ur[k] - ul[k])) / (sr - sl)
    })
}

/// HLL approximate Riemann solver over arrays of interface states.
///
/// Where all waves move right (`SL >= 0`) the flux is the left flux; where all move left
/// (`SR <= 0`) it is the right flux. The latter wins if both hold.
pub fn hll(
    dir: Direction,
    vl: ArrayView3<f64>,
    vr: ArrayView3<f64>,
    hcr: f64,
) -> Result<Array3<f64>, HydroError> {
    let csl = sound_speed(vl, hcr)?;
    let csr = sound_speed(vr, hcr)?;
    let mut flux = Array3::zeros(vl.raw_dim());
    Zip::from(flux.lanes_mut(Axis(0)))
        .and(vl.lanes(Axis(0)))
        .and(vr.lanes(Axis(0)))
        .and(&csl)
        .and(&csr)
        .for_each(|f, ql, qr, &cl, &cr| {
            let cell = hll_cell(dir, &lane_to_cell(ql), &lane_to_cell(qr), cl, cr, hcr);
            cell_to_lane(&cell, f);
        });
    Ok(flux)
}
