use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};

use ndarray::{Array2, Array3, Axis};
use serde::{Deserialize, Serialize};

use super::param_parser::{HydroSchemeSection, PhysicsSection};
use crate::{
    disc::variables::{Direction, NQ, PrimitiveVar},
    error::HydroError,
    solver::{FlowParameters, MeshParameters, Solver},
    temporal_disc::SimulationClock,
};

/// Version written into new snapshots.
pub const FILE_VERSION_CURRENT: &str = "0.2.0";
/// Oldest snapshot version that can still be loaded.
pub const FILE_VERSION_OLDEST: &str = "0.2.0";

#[derive(Serialize, Deserialize, Debug)]
struct CodeRecord {
    file_version: String,
}

#[derive(Serialize, Deserialize, Debug)]
struct DomainRecord {
    nx: usize,
    ny: usize,
    xmin: f64,
    xmax: f64,
    ymin: f64,
    ymax: f64,
    dx: f64,
    nghost: usize,
    boundary: String,
}

#[derive(Serialize, Deserialize, Debug)]
struct RunRecord {
    t: f64,
    step: usize,
    last_dir: Option<Direction>,
}

#[derive(Serialize, Deserialize, Debug)]
struct Snapshot {
    code: CodeRecord,
    hydro_scheme: HydroSchemeSection,
    domain: DomainRecord,
    physics: PhysicsSection,
    run: RunRecord,
    /// Primitive fields of the physical cells, keyed by variable name.
    grid: BTreeMap<String, Array2<f64>>,
}

pub fn parse_version(version: &str) -> Result<(u32, u32, u32), HydroError> {
    let malformed = || HydroError::MalformedVersion(version.to_string());
    let parts = version
        .trim()
        .split('.')
        .map(|p| p.parse::<u32>().map_err(|_| malformed()))
        .collect::<Result<Vec<_>, _>>()?;
    match parts[..] {
        [major, minor, patch] => Ok((major, minor, patch)),
        _ => Err(malformed()),
    }
}

/// Write the scheme, domain, clock and interior primitive fields of `solver` to a JSON file.
pub fn save(solver: &Solver, file_path: &str) -> Result<(), HydroError> {
    if !solver.is_initialized() {
        return Err(HydroError::NotInitialized("initial conditions"));
    }
    let mesh = &solver.mesh;
    let interior = mesh.interior(solver.primitive());
    let grid = PrimitiveVar::ALL
        .iter()
        .map(|var| {
            (
                var.name().to_string(),
                interior.index_axis(Axis(0), var.index()).to_owned(),
            )
        })
        .collect();
    let snapshot = Snapshot {
        code: CodeRecord {
            file_version: FILE_VERSION_CURRENT.to_string(),
        },
        hydro_scheme: HydroSchemeSection::from(&solver.scheme),
        domain: DomainRecord {
            nx: mesh.nx,
            ny: mesh.ny,
            xmin: mesh.xmin,
            xmax: mesh.xmax,
            ymin: mesh.ymin,
            ymax: mesh.ymax,
            dx: mesh.dx,
            nghost: mesh.nghost,
            boundary: mesh.boundary_type.to_string(),
        },
        physics: PhysicsSection {
            gamma: solver.flow_param.hcr,
        },
        run: RunRecord {
            t: solver.clock.curr_time,
            step: solver.clock.curr_step,
            last_dir: solver.clock.last_dir,
        },
        grid,
    };
    let writer = BufWriter::new(File::create(file_path)?);
    serde_json::to_writer(writer, &snapshot)?;
    log::info!(
        "Saved snapshot of step {} (t = {:.6e}) to {}",
        solver.clock.curr_step,
        solver.clock.curr_time,
        file_path
    );
    Ok(())
}

/// The stored grid geometry must agree with the mesh rebuilt from the scheme and extents.
fn check_domain(domain: &DomainRecord, solver: &Solver, file_path: &str) -> Result<(), HydroError> {
    let mesh = &solver.mesh;
    let close = |a: f64, b: f64| (a - b).abs() <= 1e-12 * (1.0 + b.abs());
    let mismatch = if domain.nghost != mesh.nghost {
        Some(format!("nghost {} (expected {})", domain.nghost, mesh.nghost))
    } else if !close(domain.dx, mesh.dx) {
        Some(format!("dx {:e} (expected {:e})", domain.dx, mesh.dx))
    } else if !close(domain.ymax, mesh.ymax) {
        Some(format!("ymax {:e} (expected {:e})", domain.ymax, mesh.ymax))
    } else {
        None
    };
    match mismatch {
        Some(what) => Err(HydroError::InvalidConfig(format!(
            "snapshot {file_path} has inconsistent domain: {what}"
        ))),
        None => Ok(()),
    }
}

/// Rebuild a solver from a snapshot file. Ghost cells and conserved variables are recomputed.
pub fn load(file_path: &str) -> Result<Solver, HydroError> {
    let reader = BufReader::new(File::open(file_path)?);
    let snapshot: Snapshot = serde_json::from_reader(reader)?;

    let found = &snapshot.code.file_version;
    if parse_version(found)? < parse_version(FILE_VERSION_OLDEST)? {
        return Err(HydroError::IncompatibleVersion {
            file: file_path.to_string(),
            found: found.clone(),
            oldest: FILE_VERSION_OLDEST.to_string(),
        });
    }

    let scheme = snapshot.hydro_scheme.to_scheme()?;
    let domain = &snapshot.domain;
    let mesh_param = MeshParameters {
        nx: domain.nx,
        ny: domain.ny,
        xmin: domain.xmin,
        xmax: domain.xmax,
        ymin: domain.ymin,
        boundary_type: domain.boundary.parse()?,
    };
    let flow_param = FlowParameters::new(snapshot.physics.gamma)?;
    let mut solver = Solver::new(scheme, &mesh_param, flow_param)?;
    check_domain(domain, &solver, file_path)?;

    let mut v = Array3::zeros((NQ, domain.nx, domain.ny));
    for var in PrimitiveVar::ALL {
        let field = snapshot.grid.get(var.name()).ok_or_else(|| {
            HydroError::InvalidConfig(format!("snapshot {file_path} has no field {}", var.name()))
        })?;
        if field.dim() != (domain.nx, domain.ny) {
            return Err(HydroError::ShapeMismatch {
                expected: vec![domain.nx, domain.ny],
                found: field.shape().to_vec(),
            });
        }
        v.index_axis_mut(Axis(0), var.index()).assign(field);
    }
    solver.set_interior_primitive(v.view())?;
    solver.clock = SimulationClock {
        curr_time: snapshot.run.t,
        curr_step: snapshot.run.step,
        last_dir: snapshot.run.last_dir,
    };
    log::info!(
        "Loaded snapshot of step {} (t = {:.6e}) from {}",
        solver.clock.curr_step,
        solver.clock.curr_time,
        file_path
    );
    Ok(solver)
}
