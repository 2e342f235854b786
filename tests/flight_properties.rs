use approx::assert_abs_diff_eq;
use pretty_assertions::assert_eq;

use flight_impact::core::ballistics::ideal_flight_time_and_range;
use flight_impact::{
    AttackMethod, Damageable, FlightIntegrator, PhysicsConstants, SimulationParameters,
    impact_force, simulate,
};

fn launches() -> Vec<SimulationParameters> {
    let mut out = Vec::new();
    for mass in [0.7, 1.0, 1.5] {
        for force in [2.0, 10.0, 35.0] {
            for angle in [5.0, 30.0, 45.0, 60.0, 85.0] {
                out.push(SimulationParameters::new(mass, force, angle).expect("valid launch"));
            }
        }
    }
    out
}

#[test]
fn every_flight_starts_at_origin_with_launch_speed() {
    for params in launches() {
        let flight = simulate(params);
        let first = flight.samples()[0];

        assert_eq!((first.time_s, first.x_m, first.y_m), (0.0, 0.0, 0.0));
        assert_abs_diff_eq!(first.speed_mps, params.launch_force_n / params.mass_kg, epsilon = 1e-12);
    }
}

#[test]
fn every_flight_terminates_just_below_ground() {
    for params in launches() {
        let flight = simulate(params);

        assert!(flight.samples().iter().all(|s| s.y_m >= 0.0), "{params:?}");
        assert!(flight.landing_y_m() < 0.0, "{params:?}");
        assert!(flight.final_speed_mps() >= 0.0);
        assert!(flight.final_speed_mps().is_finite());
    }
}

#[test]
fn sample_times_are_evenly_spaced() {
    for params in launches() {
        let flight = simulate(params);
        for pair in flight.samples().windows(2) {
            assert!(pair[1].time_s > pair[0].time_s);
            assert_abs_diff_eq!(pair[1].time_s - pair[0].time_s, params.time_step_s, epsilon = 1e-9);
        }
    }
}

#[test]
fn reference_throw_is_short_and_loses_speed() {
    let params = SimulationParameters::new(1.0, 10.0, 45.0).expect("valid launch");
    let flight = simulate(params);

    assert!(flight.samples().len() < 200);
    assert!(flight.final_speed_mps() < params.initial_speed_mps());
}

#[test]
fn vacuum_flight_matches_closed_form() {
    let params = SimulationParameters::new(1.0, 10.0, 45.0)
        .and_then(|p| p.with_time_step(0.001))
        .expect("valid launch");
    let flight = FlightIntegrator::new(PhysicsConstants::VACUUM).simulate(params);
    let (time, range) =
        ideal_flight_time_and_range(params.initial_speed_mps(), 45.0, PhysicsConstants::VACUUM.gravity_mps2)
            .expect("closed form");

    assert_abs_diff_eq!(flight.flight_time_s(), time, epsilon = 0.01);
    assert_abs_diff_eq!(flight.range_m(), range, epsilon = 0.05);
    assert_abs_diff_eq!(flight.final_speed_mps(), 10.0, epsilon = 0.01);
}

#[test]
fn drag_shortens_range() {
    let params = SimulationParameters::new(0.7, 35.0, 45.0).expect("valid launch");
    let with_drag = simulate(params);
    let without = FlightIntegrator::new(PhysicsConstants::VACUUM).simulate(params);

    assert!(with_drag.range_m() < without.range_m());
}

#[test]
fn damage_matches_single_truncated_subtraction() {
    for force in [0.0, 0.4, 29.9, 30.0, 35.7, 99.99] {
        let mut wood = Damageable::obstacle("Wood", 30);
        let destroyed = wood.apply_damage(force);

        assert_eq!(wood.stat, 30 - force.floor() as i32);
        assert_eq!(destroyed, wood.stat <= 0);
    }
}

#[test]
fn landing_force_drives_damage() {
    let params = SimulationParameters::new(1.0, 10.0, 45.0).expect("valid launch");
    let flight = simulate(params);
    let base = impact_force(flight.final_speed_mps(), params.mass_kg, 0.1);
    let boosted = AttackMethod::Boosted.apply(base);

    assert_abs_diff_eq!(base, 95.562, epsilon = 0.01);
    let mut pig = Damageable::creature("Big Pig", 100);
    assert!(pig.apply_damage(boosted));
    assert_eq!(pig.stat, 100 - 124);
}
