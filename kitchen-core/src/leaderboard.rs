//! Leaderboard sort keys and ordering.

use crate::error::ValidationError;
use crate::Chef;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Key the leaderboard is sorted by (always descending).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum LeaderboardSort {
    /// Total cookoff wins.
    #[default]
    Wins,
    /// Win percentage (`wins / cookoffs`, zero without cookoffs).
    WinPct,
}

impl LeaderboardSort {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeaderboardSort::Wins => "wins",
            LeaderboardSort::WinPct => "win_pct",
        }
    }
}

impl fmt::Display for LeaderboardSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeaderboardSort {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wins" => Ok(LeaderboardSort::Wins),
            "win_pct" => Ok(LeaderboardSort::WinPct),
            other => Err(ValidationError::InvalidValue {
                field: "sort".to_string(),
                reason: format!("'{}' must be one of: wins, win_pct", other),
            }),
        }
    }
}

/// Sort chefs into leaderboard order for the given key, descending.
/// Ties break by name so the ordering is stable across runs.
pub fn sort_leaderboard(chefs: &mut [Chef], sort: LeaderboardSort) {
    chefs.sort_by(|a, b| {
        let by_key = match sort {
            LeaderboardSort::Wins => b.wins.cmp(&a.wins),
            LeaderboardSort::WinPct => b
                .win_pct()
                .partial_cmp(&a.win_pct())
                .unwrap_or(Ordering::Equal),
        };
        by_key.then_with(|| a.name.cmp(&b.name))
    });
}
