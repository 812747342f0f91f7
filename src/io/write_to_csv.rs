use csv::Writer;
use serde::Serialize;

use crate::{
    disc::variables::{DN, PR, VX, VY},
    error::HydroError,
    solver::Solver,
};

#[derive(Serialize)]
struct PointData {
    x: f64,
    y: f64,
    rho: f64,
    vx: f64,
    vy: f64,
    p: f64,
}

/// One row per physical cell, x varying fastest.
pub fn write_to_csv(solver: &Solver, filename: &str) -> Result<(), HydroError> {
    if !solver.is_initialized() {
        return Err(HydroError::NotInitialized("initial conditions"));
    }
    let mesh = &solver.mesh;
    let v = solver.primitive();
    let mut writer = Writer::from_path(filename)?;
    for j in mesh.ylo..=mesh.yhi {
        for i in mesh.xlo..=mesh.xhi {
            let data = PointData {
                x: mesh.x[i],
                y: mesh.y[j],
                rho: v[[DN, i, j]],
                vx: v[[VX, i, j]],
                vy: v[[VY, i, j]],
                p: v[[PR, i, j]],
            };
            writer.serialize(data)?;
        }
    }
    writer.flush()?;
    Ok(())
}
