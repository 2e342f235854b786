use serde::Serialize;

pub const EARTH_GRAVITY_MPS2: f64 = 9.8;
pub const SEA_LEVEL_AIR_DENSITY_KGPM3: f64 = 1.225;
pub const SPHERE_DRAG_COEFFICIENT: f64 = 0.47;
pub const CROSS_SECTIONAL_AREA_M2: f64 = 0.01;

/// Environment the integrator flies through. Fixed for a run.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PhysicsConstants {
    pub gravity_mps2: f64,
    pub air_density_kgpm3: f64,
    pub drag_coefficient: f64,
    pub cross_sectional_area_m2: f64,
}

impl PhysicsConstants {
    pub const STANDARD: Self = Self {
        gravity_mps2: EARTH_GRAVITY_MPS2,
        air_density_kgpm3: SEA_LEVEL_AIR_DENSITY_KGPM3,
        drag_coefficient: SPHERE_DRAG_COEFFICIENT,
        cross_sectional_area_m2: CROSS_SECTIONAL_AREA_M2,
    };

    /// Same gravity, no air. Flight reduces to ideal parabolic motion.
    pub const VACUUM: Self = Self {
        gravity_mps2: EARTH_GRAVITY_MPS2,
        air_density_kgpm3: 0.0,
        drag_coefficient: 0.0,
        cross_sectional_area_m2: CROSS_SECTIONAL_AREA_M2,
    };

    /// Drag force in newtons for a body moving at `speed_mps`.
    pub fn drag_force(&self, speed_mps: f64) -> f64 {
        0.5 * self.air_density_kgpm3
            * self.drag_coefficient
            * self.cross_sectional_area_m2
            * speed_mps
            * speed_mps
    }
}

impl Default for PhysicsConstants {
    fn default() -> Self {
        Self::STANDARD
    }
}
