/*
selector.rs

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

//! Generate candidate layouts and keep the most difficult one.

use log::{debug, info, warn};
use rand::Rng;
use std::time::Instant;

use super::complexity;
use super::difficulty::DifficultyConfig;
use super::distance::DistanceMatrix;
use super::exact::{self, ExactSolution};
use super::geometry::{House, Point};
use super::heuristic::{self, HeuristicEstimate};
use super::sampler::GeometrySampler;
use super::tour::Tour;
use crate::config::{GridConfig, MAX_HOUSES};
use crate::error::{PuzzleError, Result};

/// Weight of the heuristic gap in the difficulty score.
pub const GAP_WEIGHT: f64 = 1200.0;

/// Weight of the route complexity in the difficulty score.
pub const COMPLEXITY_WEIGHT: f64 = 0.4;

/// Number of layouts drawn for a candidate before giving up on it.
pub const PLACEMENT_ATTEMPTS: usize = 5;

/// Scored candidate layout.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateResult {
    /// House placement.
    pub houses: Vec<House>,

    /// Optimal tour.
    pub tour: Tour,

    /// Length of the optimal tour.
    pub optimal_distance: f64,

    /// Complexity of the optimal route.
    pub complexity: f64,

    /// Relative excess of the heuristic tour over the optimal tour.
    pub heuristic_gap: f64,

    /// Difficulty score used to rank the candidates.
    pub score: f64,
}

impl CandidateResult {
    /// Whether the candidate reaches the minimum gap and complexity of the configuration.
    pub fn meets_targets(&self, config: &DifficultyConfig) -> bool {
        self.heuristic_gap >= config.min_gap && self.complexity >= config.min_complexity
    }
}

/// Solve and score the given layout.
///
/// # Errors
///
/// The function returns an error when the layout is degenerate or too large for the exact
/// solver.
pub fn score_candidate(depot: Point, houses: Vec<House>) -> Result<CandidateResult> {
    let matrix: DistanceMatrix = DistanceMatrix::build(depot, &houses)?;
    let optimal: ExactSolution = exact::solve(&matrix)?;
    let complexity: f64 = complexity::score(&optimal.tour.points(depot, &houses));
    let estimate: HeuristicEstimate = heuristic::estimate(&matrix);
    let heuristic_gap: f64 = heuristic::heuristic_gap(estimate.distance, optimal.distance);
    let score: f64 = heuristic_gap * GAP_WEIGHT + complexity * COMPLEXITY_WEIGHT;

    Ok(CandidateResult {
        houses,
        tour: optimal.tour,
        optimal_distance: optimal.distance,
        complexity,
        heuristic_gap,
        score,
    })
}

/// [`CandidateSelector`] object.
#[derive(Debug, Clone)]
pub struct CandidateSelector {
    /// Board layout.
    pub grid: GridConfig,

    /// Parameters of the difficulty level.
    pub config: DifficultyConfig,
}

impl CandidateSelector {
    /// Create a [`CandidateSelector`] object.
    pub fn new(grid: GridConfig, config: DifficultyConfig) -> Self {
        Self { grid, config }
    }

    /// Generate the candidates and return the one with the highest score.
    ///
    /// When two candidates have the same score, the first one wins.
    ///
    /// # Errors
    ///
    /// The method returns [`PuzzleError::DegenerateInput`] when the grid layout is invalid or the
    /// house range is empty, [`PuzzleError::InsufficientPlacement`] when no candidate could place
    /// the requested number of houses, and propagates the solver errors.
    pub fn select<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<CandidateResult> {
        let start: Instant = Instant::now();
        self.grid.validate()?;
        if self.config.house_range.is_empty() {
            return Err(PuzzleError::DegenerateInput(format!(
                "empty house range {:?}",
                self.config.house_range
            )));
        }
        let num_houses: usize = rng.random_range(self.config.house_range.clone()).min(MAX_HOUSES);
        let sampler: GeometrySampler = GeometrySampler::new(
            self.grid,
            self.config.min_grid_distance,
            self.config.biased,
        );
        let mut best: Option<CandidateResult> = None;
        let mut best_placed: usize = 0;

        for i in 0..self.config.candidates.max(1) {
            let Some(houses) = self.place(&sampler, num_houses, rng, &mut best_placed) else {
                debug!("Candidate {i}: cannot place {num_houses} houses, skipped");
                continue;
            };
            let candidate: CandidateResult = score_candidate(self.grid.depot, houses)?;
            debug!(
                "Candidate {i}: gap = {:.3}  complexity = {:.1}  score = {:.1}",
                candidate.heuristic_gap, candidate.complexity, candidate.score
            );
            if best.as_ref().is_none_or(|b| candidate.score > b.score) {
                best = Some(candidate);
            }
        }

        let chosen: CandidateResult = best.ok_or(PuzzleError::InsufficientPlacement {
            requested: num_houses,
            achieved: best_placed,
        })?;
        info!(
            "Selected: houses = {}  gap = {:.3}  complexity = {:.1}  score = {:.1}  duration = {}s",
            chosen.houses.len(),
            chosen.heuristic_gap,
            chosen.complexity,
            chosen.score,
            start.elapsed().as_secs_f32()
        );
        if !chosen.meets_targets(&self.config) {
            warn!(
                "Selected puzzle is below the targets (gap >= {}, complexity >= {})",
                self.config.min_gap, self.config.min_complexity
            );
        }
        Ok(chosen)
    }

    /// Draw layouts until one has the requested number of houses.
    fn place<R: Rng + ?Sized>(
        &self,
        sampler: &GeometrySampler,
        num_houses: usize,
        rng: &mut R,
        best_placed: &mut usize,
    ) -> Option<Vec<House>> {
        for _ in 0..PLACEMENT_ATTEMPTS {
            let houses: Vec<House> = sampler.sample(num_houses, rng);
            *best_placed = (*best_placed).max(houses.len());
            if houses.len() == num_houses {
                return Some(houses);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn config(houses: usize, candidates: usize, min_grid_distance: i32) -> DifficultyConfig {
        DifficultyConfig {
            house_range: houses..=houses,
            min_gap: 0.0,
            min_complexity: 0.0,
            candidates,
            min_grid_distance,
            biased: false,
        }
    }

    #[test]
    fn selects_highest_score() {
        let selector = CandidateSelector::new(GridConfig::default(), config(8, 4, 1));
        let chosen = selector.select(&mut ChaCha8Rng::seed_from_u64(3)).unwrap();
        assert_eq!(chosen.houses.len(), 8);
        assert!(chosen.tour.is_valid(9));

        // Replay the same draws and score every candidate
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let n: usize = rng.random_range(8..=8);
        let sampler = GeometrySampler::new(GridConfig::default(), 1, false);
        let scores: Vec<f64> = (0..4)
            .map(|_| {
                score_candidate(Point::new(500, 500), sampler.sample(n, &mut rng))
                    .unwrap()
                    .score
            })
            .collect();
        let max = scores.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        assert_eq!(chosen.score, max);
    }

    #[test]
    fn single_house_candidate() {
        let c = score_candidate(Point::new(500, 500), vec![House::new(1, Point::new(700, 500))])
            .unwrap();
        assert_eq!(c.optimal_distance, 400.0);
        assert_eq!(c.heuristic_gap, 0.0);
        assert!(c.complexity > 0.0);
    }

    #[test]
    fn insufficient_placement() {
        let selector = CandidateSelector::new(GridConfig::default(), config(12, 2, 4));
        let err = selector.select(&mut ChaCha8Rng::seed_from_u64(0)).unwrap_err();
        match err {
            PuzzleError::InsufficientPlacement {
                requested,
                achieved,
            } => {
                assert_eq!(requested, 12);
                assert!(achieved < 12);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn invalid_grid_is_rejected() {
        let grid = GridConfig {
            spacing: 0,
            ..GridConfig::default()
        };
        let selector = CandidateSelector::new(grid, config(8, 2, 1));
        let err = selector.select(&mut ChaCha8Rng::seed_from_u64(0)).unwrap_err();
        assert!(matches!(err, PuzzleError::DegenerateInput(_)));
    }

    #[test]
    fn inverted_house_range_is_rejected() {
        let inverted = DifficultyConfig {
            house_range: 14..=12,
            ..config(1, 2, 1)
        };
        let selector = CandidateSelector::new(GridConfig::default(), inverted);
        let err = selector.select(&mut ChaCha8Rng::seed_from_u64(0)).unwrap_err();
        assert!(matches!(err, PuzzleError::DegenerateInput(_)));
    }

    #[test]
    fn house_count_is_capped() {
        let selector = CandidateSelector::new(GridConfig::default(), config(40, 1, 1));
        let chosen = selector.select(&mut ChaCha8Rng::seed_from_u64(9)).unwrap();
        assert_eq!(chosen.houses.len(), MAX_HOUSES);
    }

    #[test]
    fn targets() {
        let c = score_candidate(Point::new(500, 500), vec![House::new(1, Point::new(700, 500))])
            .unwrap();
        assert!(c.meets_targets(&config(1, 1, 1)));
        let strict = DifficultyConfig {
            min_gap: 0.5,
            ..config(1, 1, 1)
        };
        assert!(!c.meets_targets(&strict));
    }
}
