use std::fmt;
use std::str::FromStr;

use ndarray::{Axis, Zip};

use crate::{
    disc::{
        boundary::enforce_boundary_conditions,
        conversion::{conserved_to_primitive, sound_speed},
        mesh::mesh2d::{sweep_block, sweep_block_mut},
        reconstruction::reconstruct,
        variables::{Direction, VX, VY},
    },
    error::HydroError,
    solver::{Solver, SolverParameters},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeIntegration {
    Euler,
    /// Half-step prediction of the edge states with the primitive equations.
    HancockPrimitive,
    /// Half-step prediction of the edge states from the difference of their fluxes.
    HancockConservative,
}
impl FromStr for TimeIntegration {
    type Err = HydroError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "euler" => Ok(TimeIntegration::Euler),
            "hancock" | "hancock_prim" => Ok(TimeIntegration::HancockPrimitive),
            "hancock_cons" => Ok(TimeIntegration::HancockConservative),
            _ => Err(HydroError::unknown("time integration scheme", s)),
        }
    }
}
impl fmt::Display for TimeIntegration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TimeIntegration::Euler => "euler",
            TimeIntegration::HancockPrimitive => "hancock",
            TimeIntegration::HancockConservative => "hancock_cons",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SimulationClock {
    pub curr_time: f64,
    pub curr_step: usize,
    /// Direction of the last sweep of the previous timestep.
    pub last_dir: Option<Direction>,
}
impl SimulationClock {
    /// Sweep order of the next timestep: xy after a step that ended in x, yx otherwise.
    pub fn sweep_order(&self) -> [Direction; 2] {
        match self.last_dir {
            Some(Direction::X) => [Direction::X, Direction::Y],
            _ => [Direction::Y, Direction::X],
        }
    }
    pub fn tick(&mut self, dt: f64, last_dir: Direction) {
        self.curr_time += dt;
        self.curr_step += 1;
        self.last_dir = Some(last_dir);
    }
}

impl Solver {
    /// Largest signal speed anywhere in the domain.
    ///
    /// The sound speed is added to the larger of `|vx|` and `|vy|` rather than to the speed,
    /// since each sweep only sees motion along its own axis.
    pub fn max_speed_in_domain(&self) -> Result<f64, HydroError> {
        let v = self.state.v.view();
        let cs = sound_speed(v, self.flow_param.hcr)?;
        let c_max = Zip::from(&cs)
            .and(v.index_axis(Axis(0), VX))
            .and(v.index_axis(Axis(0), VY))
            .fold(0.0_f64, |acc, &c, &vx, &vy| {
                let speed = vx.abs().max(vy.abs()) + c;
                if acc.is_nan() || speed.is_nan() {
                    f64::NAN
                } else {
                    acc.max(speed)
                }
            });
        if !c_max.is_finite() || c_max <= 0.0 {
            return Err(HydroError::NonFiniteMaxSpeed(c_max));
        }
        Ok(c_max)
    }
    /// Timestep allowed by the CFL condition.
    pub fn compute_time_step(&self) -> Result<f64, HydroError> {
        self.ensure_initialized()?;
        let u_max = self.max_speed_in_domain()?;
        Ok(self.scheme.cfl * self.mesh.dx / u_max)
    }
    /// Advance the fluid by one dimensionally split timestep and return the timestep taken.
    ///
    /// Without `dt` the CFL timestep is used. The sweep order alternates between calls (xy, yx,
    /// xy, ...) so that the splitting error cancels to second order.
    pub fn advance(&mut self, dt: Option<f64>) -> Result<f64, HydroError> {
        self.ensure_initialized()?;
        let dt = match dt {
            Some(dt) => dt,
            None => self.compute_time_step()?,
        };
        if !(dt > 0.0) || !dt.is_finite() {
            return Err(HydroError::InvalidConfig(format!(
                "timestep must be positive and finite, got {dt}"
            )));
        }
        let dirs = self.clock.sweep_order();
        for dir in dirs {
            self.sweep(dir, dt)?;
        }
        self.clock.tick(dt, dirs[1]);
        log::debug!(
            "step {}, time {:.6e}, dt {:.4e}",
            self.clock.curr_step,
            self.clock.curr_time,
            dt
        );
        Ok(dt)
    }
    fn sweep(&mut self, dir: Direction, dt: f64) -> Result<(), HydroError> {
        let hcr = self.flow_param.hcr;
        let dx = self.mesh.dx;
        reconstruct(&self.scheme, &self.state.v, &mut self.state.edges, dir, dt, dx, hcr)?;

        let lo = self.mesh.lo(dir);
        let hi = self.mesh.hi(dir);
        let across = self.mesh.interior_range(dir.other());
        let n_across = across.len();
        // Interface i lies between cells i - 1 and i: the right edge of the left cell meets the
        // left edge of the right cell.
        let flux = {
            let (v_im12, v_ip12) = self.state.edges.views(&self.state.v);
            let vl = sweep_block(v_ip12, dir, lo - 1..hi + 1, across.clone());
            let vr = sweep_block(v_im12, dir, lo..hi + 2, across.clone());
            self.scheme.riemann.solve(dir, vl, vr, hcr)?
        };
        let nflux = hi - lo + 2;
        let flux_l = sweep_block(flux.view(), dir, 0..nflux - 1, 0..n_across);
        let flux_r = sweep_block(flux.view(), dir, 1..nflux, 0..n_across);
        let u_c = sweep_block_mut(self.state.u.view_mut(), dir, lo..hi + 1, across);
        let fac = dt / dx;
        Zip::from(u_c)
            .and(flux_l)
            .and(flux_r)
            .for_each(|u, &fl, &fr| *u += fac * (fl - fr));

        conserved_to_primitive(self.state.u.view(), self.state.v.view_mut(), hcr)?;
        // after every sweep, so the next sweep sees up-to-date ghost cells
        enforce_boundary_conditions(&self.mesh, &mut self.state.v);
        enforce_boundary_conditions(&self.mesh, &mut self.state.u);
        Ok(())
    }
    /// Advance until `final_time` or `final_step`, whichever comes first. The last timestep is
    /// shortened to land on `final_time`. Returns the number of steps taken.
    pub fn time_march(&mut self, solver_param: &SolverParameters) -> Result<usize, HydroError> {
        self.ensure_initialized()?;
        let first_step = self.clock.curr_step;
        while self.clock.curr_step < solver_param.final_step
            && self.clock.curr_time < solver_param.final_time
        {
            let mut dt = self.compute_time_step()?;
            if self.clock.curr_time + dt > solver_param.final_time {
                dt = solver_param.final_time - self.clock.curr_time;
            }
            self.advance(Some(dt))?;
        }
        log::info!(
            "Finished at step {}, time {:.6e}",
            self.clock.curr_step,
            self.clock.curr_time
        );
        Ok(self.clock.curr_step - first_step)
    }
}
