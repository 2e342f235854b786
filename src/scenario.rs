use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};

use crate::core::ballistics::{
    DEFAULT_TIME_STEP_S, FlightIntegrator, FlightResult, SimulationParameters,
    ideal_flight_time_and_range,
};
use crate::core::damage::{
    AttackMethod, DEFAULT_CONTACT_TIME_S, DamageReport, Damageable, apply_to_all, impact_force,
};
use crate::error::{Result, SimError, require_positive};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bird {
    #[default]
    Blues,
    Stella,
    Red,
}

impl Bird {
    pub const ALL: [Self; 3] = [Self::Blues, Self::Stella, Self::Red];

    pub fn mass_kg(self) -> f64 {
        match self {
            Self::Blues => 0.7,
            Self::Stella => 1.0,
            Self::Red => 1.5,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Blues => "the Blues",
            Self::Stella => "Stella",
            Self::Red => "Red",
        }
    }
}

impl fmt::Display for Bird {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Bird {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        let wanted = wanted.strip_prefix("the ").unwrap_or(&wanted);
        Self::ALL
            .into_iter()
            .find(|b| b.display_name().to_ascii_lowercase().trim_start_matches("the ") == wanted)
            .ok_or_else(|| SimError::UnknownBird(s.to_string()))
    }
}

/// Two obstacles then two pigs, the layout every level starts from.
pub fn default_targets() -> Vec<Damageable> {
    vec![
        Damageable::obstacle("Wood", 30),
        Damageable::obstacle("Stone", 80),
        Damageable::creature("Green Pig", 50),
        Damageable::creature("Big Pig", 100),
    ]
}

#[derive(Debug, Deserialize)]
struct TargetsFile {
    targets: Vec<Damageable>,
}

/// Reads `{"targets": [{"kind": "obstacle", "label": "Wood", "stat": 30}, ...]}`.
pub fn load_targets(path: impl AsRef<Path>) -> Result<Vec<Damageable>> {
    let text = fs::read_to_string(path)?;
    parse_targets(&text)
}

pub fn parse_targets(json: &str) -> Result<Vec<Damageable>> {
    let file: TargetsFile = serde_json::from_str(json)?;
    Ok(file.targets)
}

#[derive(Clone, Debug)]
pub struct Scenario {
    pub bird: Bird,
    pub launch_force_n: f64,
    pub launch_angle_deg: f64,
    pub attack: AttackMethod,
    pub time_step_s: f64,
    pub contact_time_s: f64,
    pub targets: Vec<Damageable>,
}

impl Scenario {
    pub fn new(bird: Bird, launch_force_n: f64, launch_angle_deg: f64) -> Self {
        Self {
            bird,
            launch_force_n,
            launch_angle_deg,
            attack: AttackMethod::Standard,
            time_step_s: DEFAULT_TIME_STEP_S,
            contact_time_s: DEFAULT_CONTACT_TIME_S,
            targets: default_targets(),
        }
    }

    pub fn parameters(&self) -> Result<SimulationParameters> {
        SimulationParameters::new(self.bird.mass_kg(), self.launch_force_n, self.launch_angle_deg)?
            .with_time_step(self.time_step_s)
    }

    pub fn run(self) -> Result<ScenarioReport> {
        self.run_notify(|_| {})
    }

    /// Validates, flies, and applies the landing to every target.
    /// `on_landing` is forwarded to the integrator's completion hook.
    pub fn run_notify<F>(self, on_landing: F) -> Result<ScenarioReport>
    where
        F: FnOnce(&FlightResult),
    {
        let params = self.parameters()?;
        require_positive("contact time", self.contact_time_s)?;
        let integrator = FlightIntegrator::default();
        let flight = integrator.simulate_notify(params, on_landing);

        let base_force_n = impact_force(flight.final_speed_mps(), params.mass_kg, self.contact_time_s);
        let impact_force_n = self.attack.apply(base_force_n);

        let mut targets = self.targets;
        let damage = apply_to_all(&mut targets, impact_force_n);
        for report in damage.iter().filter(|r| r.destroyed) {
            info!("{} destroyed by {:.2} N", report.label, impact_force_n);
        }

        let (_, ideal_range_m) = ideal_flight_time_and_range(
            params.initial_speed_mps(),
            params.launch_angle_deg,
            integrator.constants().gravity_mps2,
        )?;

        Ok(ScenarioReport {
            generated_at: Utc::now(),
            bird: self.bird,
            attack: self.attack,
            parameters: params,
            ideal_range_m,
            flight,
            base_force_n,
            impact_force_n,
            damage,
        })
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct ScenarioReport {
    pub generated_at: DateTime<Utc>,
    pub bird: Bird,
    pub attack: AttackMethod,
    pub parameters: SimulationParameters,
    /// Range the same throw would reach without air.
    pub ideal_range_m: f64,
    pub flight: FlightResult,
    pub base_force_n: f64,
    pub impact_force_n: f64,
    pub damage: Vec<DamageReport>,
}

impl ScenarioReport {
    pub fn destroyed_count(&self) -> usize {
        self.damage.iter().filter(|r| r.destroyed).count()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Human-readable summary, one line per event.
    pub fn render_table(&self) -> String {
        let mut lines = Vec::new();
        lines.push(format!(
            "Bird: {} ({:.1} kg), force {:.2} N at {:.1} deg",
            self.bird,
            self.parameters.mass_kg,
            self.parameters.launch_force_n,
            self.parameters.launch_angle_deg
        ));
        lines.push(format!(
            "Flight: {:.2} s, range {:.2} m (vacuum {:.2} m), peak {:.2} m, {} samples",
            self.flight.flight_time_s(),
            self.flight.range_m(),
            self.ideal_range_m,
            self.flight.max_height_m(),
            self.flight.samples().len()
        ));
        if let Some(note) = self.attack.announcement() {
            lines.push(note.to_string());
        }
        lines.push(format!("Impact force on landing: {:.2} N", self.impact_force_n));
        for report in &self.damage {
            if report.destroyed {
                lines.push(format!("{} destroyed!", report.label));
            } else {
                lines.push(format!(
                    "{} took {:.2} N of damage! Remaining {}",
                    report.label, self.impact_force_n, report.remaining
                ));
            }
        }
        lines.join("\n")
    }
}
