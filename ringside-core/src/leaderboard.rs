//! Leaderboard - boxers ranked by wins or win percentage

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::boxer::{Boxer, WeightClass};
use crate::error::RingsideError;

/// Ranking key
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    #[default]
    Wins,
    WinPct,
}

impl FromStr for SortBy {
    type Err = RingsideError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "wins" => Ok(SortBy::Wins),
            "win_pct" => Ok(SortBy::WinPct),
            other => Err(RingsideError::validation(
                "sort_by",
                format!("{} (expected 'wins' or 'win_pct')", other),
            )),
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortBy::Wins => write!(f, "wins"),
            SortBy::WinPct => write!(f, "win_pct"),
        }
    }
}

/// A boxer with the stats derived at read time
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    #[serde(flatten)]
    pub boxer: Boxer,
    pub losses: u32,
    /// wins / fights as a fraction in [0, 1] (not a percentage), absent
    /// before the first fight
    pub win_pct: Option<f64>,
    pub weight_class: Option<WeightClass>,
}

impl From<Boxer> for LeaderboardEntry {
    fn from(boxer: Boxer) -> Self {
        Self {
            losses: boxer.losses(),
            win_pct: boxer.win_pct(),
            weight_class: boxer.weight_class(),
            boxer,
        }
    }
}

/// Win percentage order: higher first, never-fought boxers last
fn by_win_pct(a: &LeaderboardEntry, b: &LeaderboardEntry) -> Ordering {
    match (a.win_pct, b.win_pct) {
        (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Rank boxers given in creation order.
///
/// Sorting is stable, so ties keep creation order.
pub fn rank(boxers: Vec<Boxer>, sort_by: SortBy) -> Vec<LeaderboardEntry> {
    let mut entries: Vec<LeaderboardEntry> = boxers.into_iter().map(Into::into).collect();
    match sort_by {
        SortBy::Wins => entries.sort_by(|a, b| b.boxer.wins.cmp(&a.boxer.wins)),
        SortBy::WinPct => entries.sort_by(by_win_pct),
    }
    entries
}
