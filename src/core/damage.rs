use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError, require_positive};

pub const DEFAULT_CONTACT_TIME_S: f64 = 0.1;

/// Average force over the contact interval: momentum / time.
pub fn impact_force(final_speed_mps: f64, mass_kg: f64, contact_time_s: f64) -> f64 {
    (mass_kg * final_speed_mps) / contact_time_s
}

/// [`impact_force`] with the contact time checked first.
pub fn checked_impact_force(final_speed_mps: f64, mass_kg: f64, contact_time_s: f64) -> Result<f64> {
    require_positive("contact time", contact_time_s)?;
    Ok(impact_force(final_speed_mps, mass_kg, contact_time_s))
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttackMethod {
    #[default]
    Standard,
    Explosive,
    Boosted,
}

impl AttackMethod {
    pub const ALL: [Self; 3] = [Self::Standard, Self::Explosive, Self::Boosted];

    pub fn multiplier(self) -> f64 {
        match self {
            Self::Standard => 1.0,
            Self::Explosive => 1.5,
            Self::Boosted => 1.3,
        }
    }

    pub fn apply(self, base_force_n: f64) -> f64 {
        base_force_n * self.multiplier()
    }

    pub fn announcement(self) -> Option<&'static str> {
        match self {
            Self::Standard => None,
            Self::Explosive => Some("The bird explodes on impact, increasing damage!"),
            Self::Boosted => Some("The bird boosts before impact!"),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Explosive => "explosive",
            Self::Boosted => "boosted",
        }
    }
}

impl fmt::Display for AttackMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AttackMethod {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|m| m.name() == wanted)
            .ok_or_else(|| SimError::UnknownAttackMethod(s.to_string()))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    /// Stat is durability; label is the material.
    Obstacle,
    /// Stat is health; label is the creature's name.
    Creature,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum DamageState {
    Alive,
    Destroyed,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Damageable {
    pub kind: TargetKind,
    pub label: String,
    pub stat: i32,
}

impl Damageable {
    pub fn obstacle(material: impl Into<String>, durability: i32) -> Self {
        Self {
            kind: TargetKind::Obstacle,
            label: material.into(),
            stat: durability,
        }
    }

    pub fn creature(name: impl Into<String>, health: i32) -> Self {
        Self {
            kind: TargetKind::Creature,
            label: name.into(),
            stat: health,
        }
    }

    pub fn state(&self) -> DamageState {
        if self.stat <= 0 {
            DamageState::Destroyed
        } else {
            DamageState::Alive
        }
    }

    pub fn is_destroyed(&self) -> bool {
        self.state() == DamageState::Destroyed
    }

    /// Subtracts the whole-newton part of `force_n` and reports destruction.
    pub fn apply_damage(&mut self, force_n: f64) -> bool {
        self.stat = self.stat.saturating_sub(whole_newtons(force_n));
        self.is_destroyed()
    }
}

/// Truncates toward zero; 29.9 N counts as 29.
fn whole_newtons(force_n: f64) -> i32 {
    // `as` saturates out-of-range values and maps NaN to 0.
    force_n.trunc() as i32
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DamageReport {
    pub id: usize,
    pub kind: TargetKind,
    pub label: String,
    pub destroyed: bool,
    pub remaining: i32,
}

/// Hits every target with the same force, in order. Ids are list positions.
pub fn apply_to_all(targets: &mut [Damageable], force_n: f64) -> Vec<DamageReport> {
    targets
        .iter_mut()
        .enumerate()
        .map(|(id, target)| {
            let destroyed = target.apply_damage(force_n);
            DamageReport {
                id,
                kind: target.kind,
                label: target.label.clone(),
                destroyed,
                remaining: target.stat,
            }
        })
        .collect()
}
