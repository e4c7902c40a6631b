/*
heuristic.rs

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

//! Approximate tour that mimics a human solving the puzzle by inspection.
//!
//! The tour is built greedily (always go to the closest house) and then improved with a bounded
//! number of 2-opt passes.
//! The result is only a difficulty signal: the further it is from the optimal tour, the harder
//! the puzzle is for a human.

use log::debug;

use super::distance::DistanceMatrix;
use super::tour::Tour;

/// Maximum number of 2-opt passes over the route.
pub const MAX_TWO_OPT_PASSES: usize = 30;

/// A 2-opt move must shorten the route by more than this value.
const IMPROVEMENT_EPSILON: f64 = 1e-6;

/// Approximate tour and its length.
#[derive(Debug, Clone, PartialEq)]
pub struct HeuristicEstimate {
    pub tour: Tour,
    pub distance: f64,

    /// Number of 2-opt passes that were run.
    pub passes: usize,
}

/// Build a closed route by always moving to the closest unvisited node.
///
/// When two nodes are at the same distance, the lowest index is selected.
pub fn nearest_neighbor(matrix: &DistanceMatrix) -> Vec<usize> {
    let n: usize = matrix.len();
    let mut visited: Vec<bool> = vec![false; n];
    let mut route: Vec<usize> = Vec::with_capacity(n + 1);
    let mut current: usize = 0;

    route.push(0);
    if n > 0 {
        visited[0] = true;
    }
    for _ in 1..n {
        let mut next: Option<usize> = None;
        for j in (1..n).filter(|&j| !visited[j]) {
            match next {
                Some(best) if matrix.get(current, j) >= matrix.get(current, best) => (),
                _ => next = Some(j),
            }
        }
        let Some(j) = next else { break };
        visited[j] = true;
        route.push(j);
        current = j;
    }
    route.push(0);
    route
}

/// Improve a closed route in place with 2-opt moves and return the number of passes.
///
/// For every pair of edges `(i-1, i)` and `(k, k+1)` with `i < k`, the segment `i..=k` is
/// reversed when that shortens the route. The search stops after a pass without improvement, or
/// after `max_passes` passes.
pub fn two_opt(matrix: &DistanceMatrix, route: &mut [usize], max_passes: usize) -> usize {
    let len: usize = route.len();
    let mut passes: usize = 0;

    while passes < max_passes {
        passes += 1;
        let mut improved: bool = false;

        for i in 1..len.saturating_sub(2) {
            for k in (i + 1)..(len - 1) {
                let (a, b) = (route[i - 1], route[i]);
                let (c, d) = (route[k], route[k + 1]);
                let current: f64 = matrix.get(a, b) + matrix.get(c, d);
                let swapped: f64 = matrix.get(a, c) + matrix.get(b, d);
                if swapped + IMPROVEMENT_EPSILON < current {
                    route[i..=k].reverse();
                    improved = true;
                }
            }
        }
        if !improved {
            break;
        }
    }
    passes
}

/// Compute the approximate tour for the given matrix.
pub fn estimate(matrix: &DistanceMatrix) -> HeuristicEstimate {
    let mut route: Vec<usize> = nearest_neighbor(matrix);
    let greedy: f64 = matrix.route_length(&route);
    let passes: usize = two_opt(matrix, &mut route, MAX_TWO_OPT_PASSES);
    let distance: f64 = matrix.route_length(&route);

    debug!("Heuristic: greedy = {greedy:.3}  2-opt = {distance:.3}  passes = {passes}");
    HeuristicEstimate {
        tour: Tour::from_route(route),
        distance,
        passes,
    }
}

/// Relative excess of the heuristic length over the optimal length, never negative.
pub fn heuristic_gap(heuristic: f64, optimal: f64) -> f64 {
    if optimal <= 0.0 {
        return 0.0;
    }
    ((heuristic - optimal) / optimal).max(0.0)
}
