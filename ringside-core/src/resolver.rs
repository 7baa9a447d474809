//! Match resolution
//!
//! Pure functions: a boxer's attributes become a skill score, two scores
//! become a win probability, and a single draw in [0, 1) picks the winner.
//! Nothing here touches the registry; the arena applies the outcome.

use serde::{Deserialize, Serialize};

use crate::boxer::Boxer;
use crate::policy::SkillWeights;

/// Which side of the bout
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Corner {
    /// First boxer to enter the ring
    A,
    /// Second boxer to enter the ring
    B,
}

impl Corner {
    pub fn opponent(self) -> Self {
        match self {
            Corner::A => Corner::B,
            Corner::B => Corner::A,
        }
    }
}

/// Everything that went into deciding a bout
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub winner: Corner,
    pub score_a: f64,
    pub score_b: f64,
    /// Probability that corner A wins
    pub probability_a: f64,
    /// The random draw used
    pub draw: f64,
}

/// Penalty for age past prime (zero up to and including prime age)
fn age_penalty(age: u32, weights: &SkillWeights) -> f64 {
    age.saturating_sub(weights.prime_age) as f64 * weights.age_penalty
}

/// Deterministic skill score.
///
/// Non-decreasing in weight, height and reach; non-increasing in age.
pub fn skill_score(boxer: &Boxer, weights: &SkillWeights) -> f64 {
    boxer.weight * weights.weight
        + boxer.height * weights.height
        + boxer.reach * weights.reach
        - age_penalty(boxer.age, weights)
}

/// Probability that the boxer with `score_a` beats the one with `score_b`.
///
/// Logistic in the scaled score difference, clamped to
/// `[min_probability, 1 - min_probability]` so every bout can be an upset.
/// `win_probability(a, b) + win_probability(b, a) == 1`.
pub fn win_probability(score_a: f64, score_b: f64, weights: &SkillWeights) -> f64 {
    let delta = (score_a - score_b) / weights.scale;
    let p = 1.0 / (1.0 + (-delta).exp());
    let floor = weights.min_probability;
    p.clamp(floor, 1.0 - floor)
}

/// Decide a bout between corner A and corner B for a given draw.
///
/// A wins iff `draw < P(A wins)`.
pub fn decide(a: &Boxer, b: &Boxer, draw: f64, weights: &SkillWeights) -> Decision {
    let score_a = skill_score(a, weights);
    let score_b = skill_score(b, weights);
    let probability_a = win_probability(score_a, score_b, weights);
    let winner = if draw < probability_a { Corner::A } else { Corner::B };

    tracing::debug!(
        "Bout {} vs {}: scores {:.2}/{:.2}, P(A)={:.4}, draw={:.4}",
        a.name,
        b.name,
        score_a,
        score_b,
        probability_a,
        draw
    );

    Decision {
        winner,
        score_a,
        score_b,
        probability_a,
        draw,
    }
}
