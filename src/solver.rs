use ndarray::{ArrayView3, Axis, Zip};

use crate::{
    disc::{
        boundary::enforce_boundary_conditions,
        conversion::{check_positive, primitive_to_conserved},
        limiter::Limiter,
        mesh::{BoundaryType, mesh2d::CartesianMesh2d},
        reconstruction::Reconstruction,
        riemann_solver::RiemannSolver,
        state::FluidState,
        variables::NQ,
    },
    error::HydroError,
    temporal_disc::{SimulationClock, TimeIntegration},
};

/// Algorithmic choices of the hydro solver, fixed for the lifetime of a run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HydroScheme {
    pub reconstruction: Reconstruction,
    pub limiter: Limiter,
    pub riemann: RiemannSolver,
    pub time_integration: TimeIntegration,
    pub cfl: f64,
}
impl HydroScheme {
    pub fn new(
        reconstruction: Reconstruction,
        limiter: Limiter,
        riemann: RiemannSolver,
        time_integration: TimeIntegration,
        cfl: f64,
    ) -> Result<Self, HydroError> {
        let scheme = Self {
            reconstruction,
            limiter,
            riemann,
            time_integration,
            cfl,
        };
        scheme.validate()?;
        if cfl > 0.8 {
            log::warn!("CFL number {cfl} leaves little stability margin");
        }
        if reconstruction == Reconstruction::Constant
            && time_integration != TimeIntegration::Euler
        {
            log::warn!(
                "time integration {time_integration} has no effect with piecewise-constant \
                 reconstruction"
            );
        }
        Ok(scheme)
    }
    pub fn validate(&self) -> Result<(), HydroError> {
        if !(self.cfl > 0.0 && self.cfl <= 1.0) {
            return Err(HydroError::InvalidConfig(format!(
                "CFL number must be in (0, 1], got {}",
                self.cfl
            )));
        }
        Ok(())
    }
}
impl Default for HydroScheme {
    fn default() -> Self {
        Self {
            reconstruction: Reconstruction::Constant,
            limiter: Limiter::MinMod,
            riemann: RiemannSolver::Hll,
            time_integration: TimeIntegration::Euler,
            cfl: 0.8,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlowParameters {
    pub hcr: f64, // heat capacity ratio
}
impl FlowParameters {
    pub fn new(hcr: f64) -> Result<Self, HydroError> {
        let flow_param = Self { hcr };
        flow_param.validate()?;
        Ok(flow_param)
    }
    pub fn validate(&self) -> Result<(), HydroError> {
        if !(self.hcr > 1.0) || !self.hcr.is_finite() {
            return Err(HydroError::InvalidConfig(format!(
                "adiabatic index must be greater than 1, got {}",
                self.hcr
            )));
        }
        Ok(())
    }
}
impl Default for FlowParameters {
    fn default() -> Self {
        Self { hcr: 5.0 / 3.0 }
    }
}

/// Grid resolution and extent. The cells are square, so the upper y edge follows from `dx`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeshParameters {
    pub nx: usize,
    pub ny: usize,
    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub boundary_type: BoundaryType,
}
impl MeshParameters {
    pub fn new(nx: usize, ny: usize) -> Self {
        Self {
            nx,
            ny,
            xmin: 0.0,
            xmax: 1.0,
            ymin: 0.0,
            boundary_type: BoundaryType::Periodic,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SolverParameters {
    pub final_time: f64,
    pub final_step: usize,
}

pub struct Solver {
    pub scheme: HydroScheme,
    pub flow_param: FlowParameters,
    pub mesh: CartesianMesh2d,
    pub clock: SimulationClock,
    pub(crate) state: FluidState,
    initialized: bool,
}
impl Solver {
    pub fn new(
        scheme: HydroScheme,
        mesh_param: &MeshParameters,
        flow_param: FlowParameters,
    ) -> Result<Self, HydroError> {
        // struct literals skip the checks in the constructors
        scheme.validate()?;
        flow_param.validate()?;
        let mesh = CartesianMesh2d::new(mesh_param, scheme.reconstruction.nghost())?;
        let state = FluidState::new(&mesh, scheme.reconstruction);
        Ok(Self {
            scheme,
            flow_param,
            mesh,
            clock: SimulationClock::default(),
            state,
            initialized: false,
        })
    }
    /// Set the primitive state of every cell from `init_func(x, y) -> [rho, vx, vy, p]`.
    pub fn initialize_solution(
        &mut self,
        init_func: &dyn Fn(f64, f64) -> [f64; NQ],
    ) -> Result<(), HydroError> {
        let x = &self.mesh.x;
        let y = &self.mesh.y;
        Zip::indexed(self.state.v.lanes_mut(Axis(0))).for_each(|(i, j), mut q| {
            let cell = init_func(x[i], y[j]);
            for (dst, src) in q.iter_mut().zip(cell) {
                *dst = src;
            }
        });
        self.finish_initialization()
    }
    /// Set the primitive state of the physical cells, shaped `[NQ, nx, ny]`.
    pub fn set_interior_primitive(&mut self, v: ArrayView3<f64>) -> Result<(), HydroError> {
        let expected = [NQ, self.mesh.nx, self.mesh.ny];
        if v.shape() != &expected[..] {
            return Err(HydroError::ShapeMismatch {
                expected: expected.to_vec(),
                found: v.shape().to_vec(),
            });
        }
        self.mesh.interior_mut(self.state.v.view_mut()).assign(&v);
        self.finish_initialization()
    }
    fn finish_initialization(&mut self) -> Result<(), HydroError> {
        enforce_boundary_conditions(&self.mesh, &mut self.state.v);
        check_positive(self.state.v.view())?;
        primitive_to_conserved(self.state.v.view(), self.state.u.view_mut(), self.flow_param.hcr);
        self.initialized = true;
        Ok(())
    }
    pub(crate) fn ensure_initialized(&self) -> Result<(), HydroError> {
        if self.initialized {
            Ok(())
        } else {
            Err(HydroError::NotInitialized("initial conditions"))
        }
    }
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }
    pub fn enforce_boundary_conditions(&mut self) -> Result<(), HydroError> {
        self.ensure_initialized()?;
        enforce_boundary_conditions(&self.mesh, &mut self.state.v);
        enforce_boundary_conditions(&self.mesh, &mut self.state.u);
        Ok(())
    }
    /// Primitive variables, ghost cells included.
    pub fn primitive(&self) -> ArrayView3<'_, f64> {
        self.state.v.view()
    }
    /// Conserved variables, ghost cells included.
    pub fn conserved(&self) -> ArrayView3<'_, f64> {
        self.state.u.view()
    }
    pub fn edge_states(&self) -> (ArrayView3<'_, f64>, ArrayView3<'_, f64>) {
        self.state.edges.views(&self.state.v)
    }
    pub fn time(&self) -> f64 {
        self.clock.curr_time
    }
    pub fn step(&self) -> usize {
        self.clock.curr_step
    }
    /// Domain integral of each conserved quantity over the physical cells.
    pub fn total_conserved(&self) -> [f64; NQ] {
        let interior = self.mesh.interior(self.state.u.view());
        let area = self.mesh.dx * self.mesh.dx;
        std::array::from_fn(|q| interior.index_axis(Axis(0), q).sum() * area)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::disc::variables::{DN, ET, MX, PR, VX};
    use ndarray::Array3;

    fn sod_like(x: f64, _y: f64) -> [f64; NQ] {
        if x < 0.5 { [1.0, 0.0, 0.0, 1.0] } else { [0.125, 0.0, 0.0, 0.1] }
    }
    fn default_solver(params: &MeshParameters) -> Solver {
        Solver::new(HydroScheme::default(), params, FlowParameters::default()).unwrap()
    }

    #[test]
    fn test_scheme_validation() {
        let ok = HydroScheme::new(
            Reconstruction::Linear,
            Limiter::VanLeer,
            RiemannSolver::Hll,
            TimeIntegration::HancockPrimitive,
            0.6,
        );
        assert!(ok.is_ok());
        for cfl in [0.0, -0.1, 1.2, f64::NAN] {
            let bad = HydroScheme::new(
                Reconstruction::Linear,
                Limiter::VanLeer,
                RiemannSolver::Hll,
                TimeIntegration::Euler,
                cfl,
            );
            assert!(matches!(bad, Err(HydroError::InvalidConfig(_))));
        }
        assert!(FlowParameters::new(1.0).is_err());
        assert!(FlowParameters::new(1.4).is_ok());
    }

    #[test]
    fn test_solver_rejects_unchecked_parameters() {
        let params = MeshParameters::new(8, 8);
        let fast = HydroScheme {
            cfl: 5.0,
            ..HydroScheme::default()
        };
        assert!(matches!(
            Solver::new(fast, &params, FlowParameters::default()),
            Err(HydroError::InvalidConfig(_))
        ));
        assert!(matches!(
            Solver::new(HydroScheme::default(), &params, FlowParameters { hcr: 0.5 }),
            Err(HydroError::InvalidConfig(_))
        ));
        assert!(matches!(
            Solver::new(fast, &params, FlowParameters { hcr: 0.5 }),
            Err(HydroError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_ghost_width_follows_reconstruction() {
        let params = MeshParameters::new(10, 6);
        let constant = default_solver(&params);
        assert_eq!(constant.mesh.nghost, 1);
        assert_eq!(constant.primitive().dim(), (NQ, 12, 8));
        let linear_scheme = HydroScheme::new(
            Reconstruction::Linear,
            Limiter::MinMod,
            RiemannSolver::Hll,
            TimeIntegration::Euler,
            0.8,
        )
        .unwrap();
        let linear = Solver::new(linear_scheme, &params, FlowParameters::default()).unwrap();
        assert_eq!(linear.mesh.nghost, 2);
        assert_eq!(linear.conserved().dim(), (NQ, 14, 10));
    }

    #[test]
    fn test_edge_states_storage() {
        let params = MeshParameters::new(6, 4);
        let mut constant = default_solver(&params);
        constant.initialize_solution(&|x, _| [1.0 + x, 0.2, 0.0, 1.0]).unwrap();
        let (left, right) = constant.edge_states();
        assert_eq!(left, constant.primitive());
        assert_eq!(right, constant.primitive());

        let linear_scheme = HydroScheme::new(
            Reconstruction::Linear,
            Limiter::MinMod,
            RiemannSolver::Hll,
            TimeIntegration::Euler,
            0.5,
        )
        .unwrap();
        let mut linear = Solver::new(linear_scheme, &params, FlowParameters::default()).unwrap();
        linear.initialize_solution(&|x, _| [1.0 + x, 0.2, 0.0, 1.0]).unwrap();
        let (left, right) = linear.edge_states();
        assert_eq!(left.dim(), linear.primitive().dim());
        assert!(left.iter().chain(right.iter()).all(|&e| e == 0.0));
        linear.advance(None).unwrap();
        // the last sweep was along x, where the density ramp gives the edges a slope
        let (left, right) = linear.edge_states();
        let (i, j) = (linear.mesh.xlo + 2, linear.mesh.ylo + 1);
        let rho = linear.primitive()[[DN, i, j]];
        assert!(left[[DN, i, j]] < rho && right[[DN, i, j]] > rho);
    }

    #[test]
    fn test_not_initialized() {
        let mut solver = default_solver(&MeshParameters::new(4, 4));
        assert!(!solver.is_initialized());
        assert!(matches!(
            solver.enforce_boundary_conditions(),
            Err(HydroError::NotInitialized(_))
        ));
    }

    #[test]
    fn test_initialize_solution_is_consistent() {
        let mut params = MeshParameters::new(20, 4);
        params.boundary_type = BoundaryType::Outflow;
        let flow_param = FlowParameters::new(1.4).unwrap();
        let mut solver = Solver::new(HydroScheme::default(), &params, flow_param).unwrap();
        solver.initialize_solution(&sod_like).unwrap();
        assert!(solver.is_initialized());
        let v = solver.primitive();
        let u = solver.conserved();
        assert_eq!(v[[DN, 0, 0]], 1.0);
        assert_eq!(v[[PR, 21, 5]], 0.1);
        assert_eq!(u[[MX, 3, 3]], 0.0);
        assert!((u[[ET, 3, 3]] - 1.0 / 0.4).abs() < 1e-14);
        let total = solver.total_conserved();
        let area = 1.0 * 0.2;
        assert!((total[DN] - area * 0.5 * (1.0 + 0.125)).abs() < 1e-12);
    }

    #[test]
    fn test_set_interior_primitive() {
        let mut solver = default_solver(&MeshParameters::new(3, 2));
        let wrong = Array3::<f64>::ones((NQ, 2, 3));
        assert!(matches!(
            solver.set_interior_primitive(wrong.view()),
            Err(HydroError::ShapeMismatch { .. })
        ));
        let mut interior = Array3::<f64>::ones((NQ, 3, 2));
        interior[[VX, 2, 1]] = 0.5;
        solver.set_interior_primitive(interior.view()).unwrap();
        // periodic wrap puts the last column into the left ghost layer
        assert_eq!(solver.primitive()[[VX, 0, 2]], 0.5);
        assert_eq!(solver.conserved()[[MX, 3, 2]], 0.5);

        interior[[PR, 0, 0]] = -1.0;
        assert!(matches!(
            solver.set_interior_primitive(interior.view()),
            Err(HydroError::NonPositivePressure { .. })
        ));
    }
}
