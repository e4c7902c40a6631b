/*
difficulty.rs

Copyright 2025 The Daily TSP Authors

This file is part of Daily TSP.

Daily TSP is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Daily TSP is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Daily TSP. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Difficulty levels and their generation parameters.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;
use strum_macros::FromRepr;

use crate::error::PuzzleError;

/// Puzzle difficulty level.
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Copy,
    Clone,
    PartialOrd,
    PartialEq,
    Eq,
    Hash,
    ValueEnum,
    FromRepr,
    Default,
)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// Iterate over the difficulty levels, from the easiest.
    pub fn all() -> impl Iterator<Item = Difficulty> {
        (0..).map_while(Difficulty::from_repr)
    }

    /// Name used in file names and logs.
    pub fn name(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Generation parameters for the difficulty level.
    pub fn config(&self) -> DifficultyConfig {
        match self {
            Difficulty::Easy => DifficultyConfig {
                house_range: 12..=12,
                min_gap: 0.0,
                min_complexity: 60.0,
                candidates: 4,
                min_grid_distance: 2,
                biased: false,
            },
            Difficulty::Medium => DifficultyConfig {
                house_range: 14..=14,
                min_gap: 0.05,
                min_complexity: 130.0,
                candidates: 6,
                min_grid_distance: 1,
                biased: false,
            },
            // 17 nodes is the most expensive size for the exact solver, so only one candidate
            Difficulty::Hard => DifficultyConfig {
                house_range: 16..=16,
                min_gap: 0.10,
                min_complexity: 180.0,
                candidates: 1,
                min_grid_distance: 1,
                biased: false,
            },
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Difficulty {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::all()
            .find(|d| d.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| PuzzleError::InvalidDifficulty(String::from(s)))
    }
}

/// Generation parameters for a difficulty level.
#[derive(Debug, Clone, PartialEq)]
pub struct DifficultyConfig {
    /// Range for the number of houses. The value is capped at the exact solver limit.
    pub house_range: RangeInclusive<usize>,

    /// Minimum heuristic gap the puzzle should reach.
    pub min_gap: f64,

    /// Minimum route complexity the puzzle should reach.
    pub min_complexity: f64,

    /// Number of candidate layouts to score.
    pub candidates: usize,

    /// Minimum Chebyshev distance, in grid units, between two houses and between a house and the
    /// north pole.
    pub min_grid_distance: i32,

    /// Whether to bias the layout toward clusters and outliers.
    pub biased: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iterate_levels() {
        let levels: Vec<Difficulty> = Difficulty::all().collect();
        assert_eq!(
            levels,
            vec![Difficulty::Easy, Difficulty::Medium, Difficulty::Hard]
        );
    }

    #[test]
    fn parse_names() {
        assert_eq!("easy".parse::<Difficulty>().unwrap(), Difficulty::Easy);
        assert_eq!("Hard".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        let err = "nightmare".parse::<Difficulty>().unwrap_err();
        assert!(matches!(err, PuzzleError::InvalidDifficulty(name) if name == "nightmare"));
    }

    #[test]
    fn configs_stay_within_solver_limit() {
        for d in Difficulty::all() {
            let c = d.config();
            assert!(*c.house_range.end() <= crate::config::MAX_HOUSES);
            assert!(c.candidates >= 1);
            assert!(c.min_grid_distance >= 1);
        }
    }

    #[test]
    fn serialized_lowercase() {
        assert_eq!(
            serde_json::to_string(&Difficulty::Medium).unwrap(),
            "\"medium\""
        );
    }
}
