/*
verify.rs

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

//! Check stored puzzles against the exact solver and repair the ones that are not optimal.

use log::{debug, info, warn};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::MAX_NODES;
use crate::error::Result;
use crate::generator::distance::DistanceMatrix;
use crate::generator::exact::{self, ExactSolution};
use crate::puzzle::{self, PuzzleRecord, SolutionRecord};
use crate::saver::puzzle::{PuzzleStore, write_record};

/// Two distances closer than this value are considered equal.
pub const OPTIMALITY_TOLERANCE: f64 = 0.01;

/// How the stored distance was checked.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Method {
    /// Re-solved with the exact solver.
    Exact,

    /// More nodes than the exact solver accepts. Nothing was checked.
    TooLarge,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Method::Exact => write!(f, "exact"),
            Method::TooLarge => write!(f, "too_large"),
        }
    }
}

/// Result of the verification of a stored puzzle.
#[derive(Debug, Clone, PartialEq)]
pub struct Verification {
    pub puzzle_path: PathBuf,
    pub num_houses: usize,

    /// Distance stored in the puzzle file.
    pub stored: f64,

    /// Distance computed by the exact solver.
    pub verified: Option<f64>,

    /// Length of the route stored in the solution file, when that file exists.
    pub route_distance: Option<f64>,

    pub method: Method,
}

impl Verification {
    /// Absolute difference between the stored and the verified distances.
    pub fn difference(&self) -> Option<f64> {
        self.verified.map(|v| (self.stored - v).abs())
    }

    /// Whether the stored distance is optimal, or None if it could not be checked.
    pub fn is_optimal(&self) -> Option<bool> {
        self.difference().map(|d| d < OPTIMALITY_TOLERANCE)
    }

    /// Whether the route in the solution file has the optimal length.
    pub fn route_matches_optimal(&self) -> Option<bool> {
        let verified: f64 = self.verified?;
        self.route_distance
            .map(|r| (r - verified).abs() < OPTIMALITY_TOLERANCE)
    }
}

/// Re-solve the stored puzzle and compare the distances.
///
/// The solution file next to the puzzle file is also checked when it exists.
///
/// # Errors
///
/// The function returns an error when the files cannot be read or when the puzzle has no houses.
pub fn verify_puzzle(puzzle_path: &Path) -> Result<Verification> {
    let puzzle: PuzzleRecord = PuzzleStore::load_puzzle(puzzle_path)?;
    let (verification, _) = verify_record(puzzle_path, &puzzle)?;
    Ok(verification)
}

fn verify_record(
    puzzle_path: &Path,
    puzzle: &PuzzleRecord,
) -> Result<(Verification, Option<ExactSolution>)> {
    let num_nodes: usize = puzzle.houses.len() + 1;
    let mut verification: Verification = Verification {
        puzzle_path: puzzle_path.to_path_buf(),
        num_houses: puzzle.houses.len(),
        stored: puzzle.optimal_distance,
        verified: None,
        route_distance: None,
        method: Method::TooLarge,
    };

    if num_nodes > MAX_NODES {
        warn!("{puzzle_path:?}: too large for the exact solver ({num_nodes} nodes)");
        return Ok((verification, None));
    }

    let matrix: DistanceMatrix = DistanceMatrix::build(puzzle.north_pole, &puzzle.houses)?;
    let solution: ExactSolution = exact::solve(&matrix)?;
    verification.method = Method::Exact;
    verification.verified = Some(solution.distance);

    let solution_path: PathBuf = PuzzleStore::solution_path_for(puzzle_path);
    if let Some(stored) = PuzzleStore::load_solution(&solution_path)? {
        verification.route_distance = Some(puzzle::route_distance(&stored.route));
    }
    debug!(
        "{puzzle_path:?}: stored = {:.2}  verified = {:.2}  route = {:?}",
        verification.stored, solution.distance, verification.route_distance
    );
    Ok((verification, Some(solution)))
}

/// Result of an attempt to repair a stored puzzle.
#[derive(Debug, Clone, PartialEq)]
pub enum FixOutcome {
    AlreadyOptimal,

    /// The files were rewritten.
    Fixed { old: f64, new: f64 },

    /// The files would be rewritten, but this was a dry run.
    WouldFix { old: f64, new: f64 },

    CannotFix(String),
}

impl FixOutcome {
    /// Distance saved by the fix, in absolute value and in percent of the old distance.
    pub fn improvement(&self) -> Option<(f64, f64)> {
        match *self {
            FixOutcome::Fixed { old, new } | FixOutcome::WouldFix { old, new } => {
                let saved: f64 = old - new;
                let percent: f64 = if old > 0.0 { saved / old * 100.0 } else { 0.0 };
                Some((saved, percent))
            }
            _ => None,
        }
    }
}

impl fmt::Display for FixOutcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FixOutcome::AlreadyOptimal => write!(f, "Puzzle is already optimal"),
            FixOutcome::Fixed { old, new } | FixOutcome::WouldFix { old, new } => {
                let verb: &str = if matches!(self, FixOutcome::Fixed { .. }) {
                    "Updated"
                } else {
                    "Would update"
                };
                let (_, percent) = self.improvement().unwrap_or_default();
                write!(
                    f,
                    "{verb} optimal distance from {old:.2} to {new:.2} ({percent:.2}% improvement)"
                )
            }
            FixOutcome::CannotFix(reason) => write!(f, "Cannot fix: {reason}"),
        }
    }
}

/// Rewrite the optimal distance and route of a stored puzzle that is not optimal.
///
/// The puzzle file is rewritten, and so is the solution file when it exists.
/// With `dry_run`, nothing is written.
///
/// # Errors
///
/// The function returns an error when the files cannot be read or written.
pub fn fix_puzzle(puzzle_path: &Path, dry_run: bool) -> Result<FixOutcome> {
    let mut puzzle: PuzzleRecord = PuzzleStore::load_puzzle(puzzle_path)?;
    let (verification, solution) = verify_record(puzzle_path, &puzzle)?;

    if verification.is_optimal() == Some(true) {
        return Ok(FixOutcome::AlreadyOptimal);
    }
    let Some(solution) = solution else {
        return Ok(FixOutcome::CannotFix(format!(
            "puzzle too large for the exact solver ({} nodes)",
            verification.num_houses + 1
        )));
    };

    let old: f64 = puzzle.optimal_distance;
    let new: f64 = solution.distance;
    puzzle.optimal_distance = new;
    puzzle.optimal_route = puzzle::build_route(&solution.tour, puzzle.north_pole, &puzzle.houses);

    if dry_run {
        info!("{puzzle_path:?}: would fix ({old:.2} -> {new:.2})");
        return Ok(FixOutcome::WouldFix { old, new });
    }

    write_record(puzzle_path, &puzzle)?;
    let solution_path: PathBuf = PuzzleStore::solution_path_for(puzzle_path);
    if let Some(mut stored) = PuzzleStore::load_solution(&solution_path)? {
        let fixed: SolutionRecord = puzzle.solution();
        stored.route = fixed.route;
        stored.optimal_distance = fixed.optimal_distance;
        write_record(&solution_path, &stored)?;
    }
    info!("{puzzle_path:?}: fixed ({old:.2} -> {new:.2})");
    Ok(FixOutcome::Fixed { old, new })
}
