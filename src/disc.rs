pub mod boundary;
pub mod conversion;
pub mod flux;
pub mod limiter;
pub mod mesh;
pub mod reconstruction;
pub mod riemann_solver;
pub mod state;
pub mod variables;
