use crate::{
    disc::variables::NQ,
    error::HydroError,
    io::param_parser::SolverParamParser,
    solver::{FlowParameters, HydroScheme, MeshParameters, Solver, SolverParameters},
};

/// Validated contents of a parameter file.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RunParameters {
    pub scheme: HydroScheme,
    pub mesh: MeshParameters,
    pub flow: FlowParameters,
    pub solver: SolverParameters,
}

pub fn initialize_params_by_file(file_path: &str) -> Result<RunParameters, HydroError> {
    let param = SolverParamParser::parse(file_path)?;
    params_from_parser(&param)
}
pub fn params_from_parser(param: &SolverParamParser) -> Result<RunParameters, HydroError> {
    Ok(RunParameters {
        scheme: param.hydro_scheme.to_scheme()?,
        mesh: param.domain.to_mesh_parameters()?,
        flow: param.flow_parameters()?,
        solver: param.solver_parameters()?,
    })
}
/// Build a solver on the configured grid and fill it with `init_func(x, y) -> [rho, vx, vy, p]`.
pub fn initialize_solver(
    params: &RunParameters,
    init_func: &dyn Fn(f64, f64) -> [f64; NQ],
) -> Result<Solver, HydroError> {
    let mut solver = Solver::new(params.scheme, &params.mesh, params.flow)?;
    solver.initialize_solution(init_func)?;
    Ok(solver)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::disc::{mesh::BoundaryType, reconstruction::Reconstruction};

    const KELVIN_HELMHOLTZ: &str = r#"{
        "hydro_scheme": {
            "reconstruction": "linear",
            "limiter": "mc",
            "time_integration": "hancock",
            "cfl": 0.6
        },
        "domain": { "nx": 32, "ny": 32 },
        "physics": { "gamma": 1.4 },
        "run": { "final_time": 0.05, "final_step": 3 }
    }"#;

    #[test]
    fn test_params_and_short_run() {
        let param = SolverParamParser::parse_str(KELVIN_HELMHOLTZ).unwrap();
        let params = params_from_parser(&param).unwrap();
        assert_eq!(params.scheme.reconstruction, Reconstruction::Linear);
        assert_eq!(params.mesh.boundary_type, BoundaryType::Periodic);
        let mut solver = initialize_solver(&params, &|_, y| {
            let inner = (y - 0.5).abs() < 0.25;
            let vx = if inner { 0.5 } else { -0.5 };
            let rho = if inner { 2.0 } else { 1.0 };
            [rho, vx, 0.01 * (4.0 * std::f64::consts::PI * y).sin(), 2.5]
        })
        .unwrap();
        assert_eq!(solver.mesh.nghost, 2);
        let nsteps = solver.time_march(&params.solver).unwrap();
        assert_eq!(nsteps, 3);
        assert!(solver.time() > 0.0 && solver.time() <= 0.05);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let content = KELVIN_HELMHOLTZ.replace("\"cfl\": 0.6", "\"cfl\": 1.5");
        let param = SolverParamParser::parse_str(&content).unwrap();
        assert!(matches!(params_from_parser(&param), Err(HydroError::InvalidConfig(_))));

        let content = KELVIN_HELMHOLTZ.replace("\"mc\"", "\"superbee\"");
        let param = SolverParamParser::parse_str(&content).unwrap();
        assert!(matches!(params_from_parser(&param), Err(HydroError::UnknownScheme { .. })));

        let content = KELVIN_HELMHOLTZ.replace("\"gamma\": 1.4", "\"gamma\": 0.9");
        let param = SolverParamParser::parse_str(&content).unwrap();
        assert!(matches!(params_from_parser(&param), Err(HydroError::InvalidConfig(_))));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            initialize_params_by_file("inputs/missing.json"),
            Err(HydroError::Io(_))
        ));
    }
}
