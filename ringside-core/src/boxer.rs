//! Boxer records and derived stats

use serde::{Deserialize, Serialize};

use crate::error::{Result, RingsideError};

/// Boxer identifier, assigned by the store and never reused
pub type BoxerId = u64;

/// Youngest age accepted at registration
pub const MIN_REGISTRATION_AGE: u32 = 18;
/// Oldest age accepted at registration
pub const MAX_REGISTRATION_AGE: u32 = 40;

/// Weight class, derived from weight at read time
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum WeightClass {
    Featherweight,
    Lightweight,
    Middleweight,
    Heavyweight,
}

impl WeightClass {
    /// Classify a weight. Anything under 125 has no class.
    pub fn for_weight(weight: f64) -> Option<Self> {
        if weight >= 203.0 {
            Some(WeightClass::Heavyweight)
        } else if weight >= 166.0 {
            Some(WeightClass::Middleweight)
        } else if weight >= 133.0 {
            Some(WeightClass::Lightweight)
        } else if weight >= 125.0 {
            Some(WeightClass::Featherweight)
        } else {
            None
        }
    }
}

/// Registration request: everything a caller supplies for a new boxer
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewBoxer {
    pub name: String,
    pub weight: f64,
    pub height: f64,
    pub reach: f64,
    pub age: u32,
}

impl NewBoxer {
    pub fn new(name: impl Into<String>, weight: f64, height: f64, reach: f64, age: u32) -> Self {
        Self {
            name: name.into(),
            weight,
            height,
            reach,
            age,
        }
    }

    /// Check registration constraints. Fight eligibility is checked later, at the ring.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(RingsideError::validation(
                "name",
                "must be a non-empty string",
            ));
        }
        check_positive("weight", self.weight)?;
        check_positive("height", self.height)?;
        check_positive("reach", self.reach)?;
        if !(MIN_REGISTRATION_AGE..=MAX_REGISTRATION_AGE).contains(&self.age) {
            return Err(RingsideError::validation(
                "age",
                format!(
                    "{} (must be between {} and {})",
                    self.age, MIN_REGISTRATION_AGE, MAX_REGISTRATION_AGE
                ),
            ));
        }
        Ok(())
    }
}

fn check_positive(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(RingsideError::validation(
            field,
            format!("{} (must be greater than 0)", value),
        ))
    }
}

/// A registered boxer with cumulative record
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Boxer {
    pub id: BoxerId,
    pub name: String,
    pub weight: f64,
    pub height: f64,
    pub reach: f64,
    pub age: u32,
    /// Bouts won
    pub wins: u32,
    /// Bouts entered
    pub fights: u32,
}

impl Boxer {
    /// Build a fresh record with an empty fight history
    pub fn from_new(id: BoxerId, new: NewBoxer) -> Self {
        Self {
            id,
            name: new.name,
            weight: new.weight,
            height: new.height,
            reach: new.reach,
            age: new.age,
            wins: 0,
            fights: 0,
        }
    }

    /// Losses (fights - wins)
    pub fn losses(&self) -> u32 {
        self.fights - self.wins
    }

    /// Win rate in [0, 1], or None before the first fight
    pub fn win_pct(&self) -> Option<f64> {
        if self.fights == 0 {
            None
        } else {
            Some(self.wins as f64 / self.fights as f64)
        }
    }

    pub fn weight_class(&self) -> Option<WeightClass> {
        WeightClass::for_weight(self.weight)
    }
}
