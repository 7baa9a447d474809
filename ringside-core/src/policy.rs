//! Policy constants: fight eligibility and skill coefficients

use serde::{Deserialize, Serialize};

use crate::boxer::Boxer;
use crate::error::{Result, RingsideError};

/// Fight-time eligibility bounds, enforced when a boxer enters the ring
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FightPolicy {
    /// Minimum weight to fight
    pub min_weight: f64,
    /// Youngest age allowed to fight
    pub min_age: u32,
    /// Oldest age allowed to fight
    pub max_age: u32,
}

impl Default for FightPolicy {
    fn default() -> Self {
        Self {
            min_weight: 125.0,
            min_age: 18,
            max_age: 40,
        }
    }
}

impl FightPolicy {
    /// Check that a boxer may take part in a bout
    pub fn check(&self, boxer: &Boxer) -> Result<()> {
        if boxer.weight < self.min_weight {
            return Err(RingsideError::Eligibility {
                id: boxer.id,
                reason: format!(
                    "weight {} is below the minimum of {}",
                    boxer.weight, self.min_weight
                ),
            });
        }
        if boxer.age < self.min_age || boxer.age > self.max_age {
            return Err(RingsideError::Eligibility {
                id: boxer.id,
                reason: format!(
                    "age {} is outside {}..={}",
                    boxer.age, self.min_age, self.max_age
                ),
            });
        }
        Ok(())
    }
}

/// Coefficients for skill scoring and the score-to-probability mapping
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SkillWeights {
    /// Points per unit of weight
    pub weight: f64,
    /// Points per unit of height
    pub height: f64,
    /// Points per unit of reach
    pub reach: f64,
    /// Age after which the penalty applies
    pub prime_age: u32,
    /// Points lost per year past prime
    pub age_penalty: f64,
    /// Score difference that moves the logistic by one unit
    pub scale: f64,
    /// Lower clamp on any win probability (upper clamp is 1 - this)
    pub min_probability: f64,
}

impl Default for SkillWeights {
    fn default() -> Self {
        Self {
            weight: 1.0,
            height: 0.5,
            reach: 2.0,
            prime_age: 30,
            age_penalty: 1.5,
            scale: 10.0,
            min_probability: 0.001,
        }
    }
}
