pub mod disc;
pub mod error;
pub mod initialization;
pub mod io;
pub mod solver;
pub mod temporal_disc;

pub use disc::variables::{Direction, NQ};
pub use error::HydroError;
pub use solver::{FlowParameters, HydroScheme, MeshParameters, Solver, SolverParameters};
