use std::fs;

use serde::{Deserialize, Serialize};

use crate::{
    error::HydroError,
    solver::{FlowParameters, HydroScheme, MeshParameters, SolverParameters},
};

/// Scheme names as they appear in parameter files and snapshots.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct HydroSchemeSection {
    pub reconstruction: String,
    pub limiter: String,
    pub riemann: String,
    pub time_integration: String,
    pub cfl: f64,
}
impl Default for HydroSchemeSection {
    fn default() -> Self {
        Self::from(&HydroScheme::default())
    }
}
impl From<&HydroScheme> for HydroSchemeSection {
    fn from(scheme: &HydroScheme) -> Self {
        Self {
            reconstruction: scheme.reconstruction.to_string(),
            limiter: scheme.limiter.to_string(),
            riemann: scheme.riemann.to_string(),
            time_integration: scheme.time_integration.to_string(),
            cfl: scheme.cfl,
        }
    }
}
impl HydroSchemeSection {
    pub fn to_scheme(&self) -> Result<HydroScheme, HydroError> {
        HydroScheme::new(
            self.reconstruction.parse()?,
            self.limiter.parse()?,
            self.riemann.parse()?,
            self.time_integration.parse()?,
            self.cfl,
        )
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct DomainSection {
    pub nx: usize,
    pub ny: usize,
    #[serde(default)]
    pub xmin: f64,
    #[serde(default = "default_xmax")]
    pub xmax: f64,
    #[serde(default)]
    pub ymin: f64,
    #[serde(default = "default_boundary")]
    pub boundary: String,
}
fn default_xmax() -> f64 {
    1.0
}
fn default_boundary() -> String {
    "periodic".to_string()
}
impl DomainSection {
    pub fn to_mesh_parameters(&self) -> Result<MeshParameters, HydroError> {
        Ok(MeshParameters {
            nx: self.nx,
            ny: self.ny,
            xmin: self.xmin,
            xmax: self.xmax,
            ymin: self.ymin,
            boundary_type: self.boundary.parse()?,
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct PhysicsSection {
    #[serde(default = "default_gamma")]
    pub gamma: f64,
}
fn default_gamma() -> f64 {
    5.0 / 3.0
}
impl Default for PhysicsSection {
    fn default() -> Self {
        Self {
            gamma: default_gamma(),
        }
    }
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct RunSection {
    pub final_time: f64,
    #[serde(default = "default_final_step")]
    pub final_step: usize,
}
fn default_final_step() -> usize {
    usize::MAX
}

#[derive(Deserialize, Debug)]
pub struct SolverParamParser {
    #[serde(default)]
    pub hydro_scheme: HydroSchemeSection,
    pub domain: DomainSection,
    #[serde(default)]
    pub physics: PhysicsSection,
    pub run: RunSection,
}
impl SolverParamParser {
    pub fn parse(file_path: &str) -> Result<Self, HydroError> {
        let file_content = fs::read_to_string(file_path)?;
        Self::parse_str(&file_content)
    }
    pub fn parse_str(content: &str) -> Result<Self, HydroError> {
        let param: SolverParamParser = serde_json::from_str(content)?;
        Ok(param)
    }
    pub fn solver_parameters(&self) -> Result<SolverParameters, HydroError> {
        if !(self.run.final_time > 0.0) {
            return Err(HydroError::InvalidConfig(format!(
                "final time must be positive, got {}",
                self.run.final_time
            )));
        }
        Ok(SolverParameters {
            final_time: self.run.final_time,
            final_step: self.run.final_step,
        })
    }
    pub fn flow_parameters(&self) -> Result<FlowParameters, HydroError> {
        FlowParameters::new(self.physics.gamma)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        disc::{limiter::Limiter, mesh::BoundaryType, reconstruction::Reconstruction},
        temporal_disc::TimeIntegration,
    };

    #[test]
    fn test_parse_full_file() {
        let content = r#"{
            "hydro_scheme": {
                "reconstruction": "linear",
                "limiter": "van_leer",
                "riemann": "hll",
                "time_integration": "hancock_cons",
                "cfl": 0.5
            },
            "domain": { "nx": 64, "ny": 32, "xmin": -1.0, "xmax": 1.0, "boundary": "outflow" },
            "physics": { "gamma": 1.4 },
            "run": { "final_time": 0.25, "final_step": 500 }
        }"#;
        let param = SolverParamParser::parse_str(content).unwrap();
        let scheme = param.hydro_scheme.to_scheme().unwrap();
        assert_eq!(scheme.reconstruction, Reconstruction::Linear);
        assert_eq!(scheme.limiter, Limiter::VanLeer);
        assert_eq!(scheme.time_integration, TimeIntegration::HancockConservative);
        let mesh = param.domain.to_mesh_parameters().unwrap();
        assert_eq!(mesh.boundary_type, BoundaryType::Outflow);
        assert_eq!(mesh.xmin, -1.0);
        assert_eq!(param.flow_parameters().unwrap().hcr, 1.4);
        assert_eq!(param.solver_parameters().unwrap().final_step, 500);
    }

    #[test]
    fn test_defaults_for_omitted_keys() {
        let content = r#"{ "domain": { "nx": 10, "ny": 10 }, "run": { "final_time": 1.0 } }"#;
        let param = SolverParamParser::parse_str(content).unwrap();
        assert_eq!(param.hydro_scheme.to_scheme().unwrap(), HydroScheme::default());
        let mesh = param.domain.to_mesh_parameters().unwrap();
        assert_eq!(mesh, MeshParameters::new(10, 10));
        assert!((param.flow_parameters().unwrap().hcr - 5.0 / 3.0).abs() < 1e-15);
        assert_eq!(param.run.final_step, usize::MAX);
    }

    #[test]
    fn test_unknown_names_are_rejected() {
        let content = r#"{
            "hydro_scheme": { "limiter": "superbee" },
            "domain": { "nx": 10, "ny": 10, "boundary": "reflective" },
            "run": { "final_time": 1.0 }
        }"#;
        let param = SolverParamParser::parse_str(content).unwrap();
        match param.hydro_scheme.to_scheme() {
            Err(HydroError::UnknownScheme { component, name }) => {
                assert_eq!(component, "limiter");
                assert_eq!(name, "superbee");
            }
            other => panic!("expected unknown limiter, got {:?}", other),
        }
        assert!(matches!(
            param.domain.to_mesh_parameters(),
            Err(HydroError::UnknownScheme { .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            SolverParamParser::parse("does/not/exist.json"),
            Err(HydroError::Io(_))
        ));
    }
}
