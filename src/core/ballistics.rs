use log::debug;
use serde::Serialize;

use crate::core::physics::PhysicsConstants;
use crate::error::{Result, SimError, require_positive};

pub const DEFAULT_TIME_STEP_S: f64 = 0.05;

/// Launch conditions for one throw.
///
/// Fields are public so a caller that has already validated its inputs can
/// build the value directly; [`SimulationParameters::new`] checks them.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SimulationParameters {
    pub mass_kg: f64,
    pub launch_force_n: f64,
    pub launch_angle_deg: f64,
    pub time_step_s: f64,
}

impl SimulationParameters {
    pub fn new(mass_kg: f64, launch_force_n: f64, launch_angle_deg: f64) -> Result<Self> {
        Self {
            mass_kg,
            launch_force_n,
            launch_angle_deg,
            time_step_s: DEFAULT_TIME_STEP_S,
        }
        .validated()
    }

    pub fn with_time_step(self, time_step_s: f64) -> Result<Self> {
        Self {
            time_step_s,
            ..self
        }
        .validated()
    }

    /// Angles at or beyond the open interval (0, 90) never bring `y` below
    /// zero, so they are rejected here rather than inside the integrator.
    pub fn validated(self) -> Result<Self> {
        require_positive("mass", self.mass_kg)?;
        require_positive("launch force", self.launch_force_n)?;
        require_positive("time step", self.time_step_s)?;
        if !self.launch_angle_deg.is_finite()
            || self.launch_angle_deg <= 0.0
            || self.launch_angle_deg >= 90.0
        {
            return Err(SimError::InvalidInput {
                name: "launch angle",
                value: self.launch_angle_deg,
                reason: "must be strictly between 0 and 90 degrees",
            });
        }
        // Finite inputs can still overflow the force/mass ratio.
        require_positive("initial speed", self.initial_speed_mps())?;
        Ok(self)
    }

    pub fn initial_speed_mps(&self) -> f64 {
        self.launch_force_n / self.mass_kg
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TrajectorySample {
    pub time_s: f64,
    pub x_m: f64,
    pub y_m: f64,
    pub speed_mps: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FlightResult {
    samples: Vec<TrajectorySample>,
    final_speed_mps: f64,
    landing_y_m: f64,
}

impl FlightResult {
    pub fn samples(&self) -> &[TrajectorySample] {
        &self.samples
    }

    /// Speed at the first integrated state below ground level.
    pub fn final_speed_mps(&self) -> f64 {
        self.final_speed_mps
    }

    /// Height of the discarded post-loop state; always negative.
    pub fn landing_y_m(&self) -> f64 {
        self.landing_y_m
    }

    pub fn last_sample(&self) -> &TrajectorySample {
        // The first sample is recorded before the loop condition can fail.
        &self.samples[self.samples.len() - 1]
    }

    pub fn max_height_m(&self) -> f64 {
        self.samples.iter().fold(0.0, |acc, s| acc.max(s.y_m))
    }

    pub fn range_m(&self) -> f64 {
        self.last_sample().x_m
    }

    pub fn flight_time_s(&self) -> f64 {
        self.last_sample().time_s
    }
}

#[derive(Clone, Copy, Debug)]
struct FlightState {
    step: u64,
    x: f64,
    y: f64,
    vx: f64,
    vy: f64,
}

impl FlightState {
    fn speed(&self) -> f64 {
        self.vx.hypot(self.vy)
    }

    fn advance(&mut self, constants: &PhysicsConstants, mass_kg: f64, dt: f64) {
        let speed = self.speed();
        let (drag_ax, drag_ay) = if speed == 0.0 {
            (0.0, 0.0)
        } else {
            let drag_accel = constants.drag_force(speed) / mass_kg;
            (drag_accel * (self.vx / speed), drag_accel * (self.vy / speed))
        };

        self.vx -= drag_ax * dt;
        self.vy -= (constants.gravity_mps2 + drag_ay) * dt;
        self.x += self.vx * dt;
        self.y += self.vy * dt;
        self.step += 1;
    }
}

pub fn velocity_components(speed_mps: f64, angle_deg: f64) -> (f64, f64) {
    let theta = angle_deg.to_radians();
    (speed_mps * theta.cos(), speed_mps * theta.sin())
}

/// Fixed-step explicit Euler integrator for a point mass under gravity and
/// quadratic drag.
#[derive(Clone, Copy, Debug, Default)]
pub struct FlightIntegrator {
    constants: PhysicsConstants,
}

impl FlightIntegrator {
    pub fn new(constants: PhysicsConstants) -> Self {
        Self { constants }
    }

    pub fn constants(&self) -> &PhysicsConstants {
        &self.constants
    }

    pub fn simulate(&self, params: SimulationParameters) -> FlightResult {
        self.simulate_notify(params, |_| {})
    }

    /// Runs the flight to ground impact. `on_complete` fires once, after the
    /// sample sequence is final and before the result is handed back.
    pub fn simulate_notify<F>(&self, params: SimulationParameters, on_complete: F) -> FlightResult
    where
        F: FnOnce(&FlightResult),
    {
        let dt = params.time_step_s;
        let (vx, vy) = velocity_components(params.initial_speed_mps(), params.launch_angle_deg);
        let mut state = FlightState {
            step: 0,
            x: 0.0,
            y: 0.0,
            vx,
            vy,
        };

        let mut samples = Vec::new();
        while state.y >= 0.0 {
            samples.push(TrajectorySample {
                time_s: state.step as f64 * dt,
                x_m: state.x,
                y_m: state.y,
                speed_mps: state.speed(),
            });
            state.advance(&self.constants, params.mass_kg, dt);
        }

        let result = FlightResult {
            samples,
            final_speed_mps: state.speed(),
            landing_y_m: state.y,
        };
        debug!(
            "flight finished after {} steps: range={:.3} m, final speed={:.3} m/s",
            state.step,
            result.range_m(),
            result.final_speed_mps
        );
        on_complete(&result);
        result
    }
}

/// Runs a flight with [`PhysicsConstants::STANDARD`].
pub fn simulate(params: SimulationParameters) -> FlightResult {
    FlightIntegrator::default().simulate(params)
}

/// Closed-form time of flight and range for drag-free motion launched from
/// ground level.
pub fn ideal_flight_time_and_range(
    speed_mps: f64,
    angle_deg: f64,
    gravity_mps2: f64,
) -> Result<(f64, f64)> {
    if !speed_mps.is_finite() {
        return Err(SimError::InvalidInput {
            name: "launch speed",
            value: speed_mps,
            reason: "must be a finite number",
        });
    }
    if !angle_deg.is_finite() {
        return Err(SimError::InvalidInput {
            name: "launch angle",
            value: angle_deg,
            reason: "must be a finite number",
        });
    }
    if speed_mps < 0.0 {
        return Err(SimError::InvalidInput {
            name: "launch speed",
            value: speed_mps,
            reason: "velocity cannot be negative",
        });
    }
    require_positive("gravity", gravity_mps2)?;

    let (vx, vy) = velocity_components(speed_mps, angle_deg);
    let t_land = (2.0 * vy / gravity_mps2).max(0.0);
    Ok((t_land, vx * t_land))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() <= tolerance,
            "actual={actual}, expected={expected}, tolerance={tolerance}"
        );
    }

    fn reference_params() -> SimulationParameters {
        SimulationParameters::new(1.0, 10.0, 45.0).expect("valid parameters")
    }

    #[test]
    fn first_sample_is_launch_point() {
        let flight = simulate(reference_params());
        let first = flight.samples()[0];

        assert_eq!(first.time_s, 0.0);
        assert_eq!(first.x_m, 0.0);
        assert_eq!(first.y_m, 0.0);
        assert_close(first.speed_mps, 10.0, 1e-12);
    }

    #[test]
    fn reference_throw_lands_with_drag_losses() {
        let flight = simulate(reference_params());

        assert_eq!(flight.samples().len(), 28);
        assert_close(flight.final_speed_mps(), 9.5562, 0.001);
        assert_close(flight.range_m(), 9.3913, 0.001);
        assert_close(flight.flight_time_s(), 1.35, 1e-9);
        assert!(flight.landing_y_m() < 0.0);
        assert!(flight.last_sample().y_m >= 0.0);
    }

    #[test]
    fn sample_times_advance_by_time_step() {
        let params = reference_params().with_time_step(0.02).expect("valid step");
        let flight = simulate(params);

        for pair in flight.samples().windows(2) {
            assert_close(pair[1].time_s - pair[0].time_s, 0.02, 1e-12);
        }
    }

    #[test]
    fn zero_speed_state_does_not_produce_nan() {
        let mut state = FlightState {
            step: 0,
            x: 0.0,
            y: 3.0,
            vx: 0.0,
            vy: 0.0,
        };
        state.advance(&PhysicsConstants::STANDARD, 1.0, 0.05);

        assert!(state.vx.is_finite() && state.vy.is_finite());
        assert_eq!(state.vx, 0.0);
        assert_close(state.vy, -0.49, 1e-12);
    }

    #[test]
    fn completion_callback_sees_final_result() {
        let mut seen = None;
        let flight = FlightIntegrator::default().simulate_notify(reference_params(), |r| {
            seen = Some((r.samples().len(), r.final_speed_mps()));
        });

        assert_eq!(seen, Some((flight.samples().len(), flight.final_speed_mps())));
    }

    #[test]
    fn computes_known_ideal_range_for_flat_ground() {
        let (time, distance) =
            ideal_flight_time_and_range(10.0, 45.0, 9.8).expect("calculation should succeed");

        assert_close(time, 1.4431, 0.001);
        assert_close(distance, 10.2041, 0.001);
    }

    #[test]
    fn rejects_out_of_range_angles() {
        for angle in [0.0, 90.0, -5.0, 135.0, f64::NAN] {
            let err = SimulationParameters::new(1.0, 10.0, angle).expect_err("angle should fail");
            assert!(err.to_string().contains("launch angle"), "{err}");
        }
    }

    #[test]
    fn rejects_non_positive_time_step() {
        let err = reference_params()
            .with_time_step(0.0)
            .expect_err("zero step should fail");
        assert!(err.to_string().contains("time step"));
    }

    #[test]
    fn rejects_launch_speed_that_overflows() {
        let err = SimulationParameters::new(1e-300, 1e10, 45.0)
            .expect_err("infinite launch speed should fail");
        assert!(matches!(err, SimError::InvalidInput { name: "initial speed", .. }));
    }

    #[test]
    fn ideal_range_names_the_bad_angle() {
        let err = ideal_flight_time_and_range(10.0, f64::INFINITY, 9.8)
            .expect_err("infinite angle should fail");
        match err {
            SimError::InvalidInput { name, value, .. } => {
                assert_eq!(name, "launch angle");
                assert_eq!(value, f64::INFINITY);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
