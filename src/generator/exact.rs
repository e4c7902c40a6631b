/*
exact.rs

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

//! Exact solver for the closed tour (Held-Karp dynamic programming).
//!
//! `cost[S][j]` is the length of the shortest path that leaves the north pole, visits exactly the
//! nodes of the set `S`, and stops at node `j`.
//! Sets are bit masks over the node indexes and always contain node 0.
//! The base case is `cost[{0}][0] = 0`, and every other entry is computed from the smaller set
//! `S \ {j}`:
//!
//! ```text
//! cost[S][j] = min over k in S \ {j} of cost[S \ {j}][k] + d(k, j)
//! ```
//!
//! The optimal tour length is `min over j of cost[FULL][j] + d(j, 0)`, and the tour itself is
//! rebuilt by following the stored argmin of each entry back to the north pole.
//!
//! Both tables are dense arenas of `2^N * N` entries allocated up front, which is why the number
//! of nodes is capped at [`MAX_NODES`].
//!
//! When several tours have the same length, the lowest node index wins at every backtracking
//! step (the last house before returning to the north pole, then each predecessor): candidates
//! are scanned in increasing order and only a strictly shorter path replaces the current best.

use log::debug;
use std::time::Instant;

use super::distance::DistanceMatrix;
use super::tour::Tour;
use crate::config::MAX_NODES;
use crate::error::{PuzzleError, Result};

/// Marker for table entries without a predecessor.
const NO_PARENT: u8 = u8::MAX;

/// Optimal tour and its length.
#[derive(Debug, Clone, PartialEq)]
pub struct ExactSolution {
    pub tour: Tour,
    pub distance: f64,
}

/// Position of the `(mask, node)` entry in the tables.
#[inline]
fn slot(mask: usize, node: usize, num_nodes: usize) -> usize {
    mask * num_nodes + node
}

/// Compute the shortest closed tour that starts and ends at node 0.
///
/// # Errors
///
/// The function returns an error when the matrix has more than [`MAX_NODES`] nodes, or fewer than
/// two nodes.
pub fn solve(matrix: &DistanceMatrix) -> Result<ExactSolution> {
    let n: usize = matrix.len();
    if n > MAX_NODES {
        return Err(PuzzleError::CapacityExceeded {
            nodes: n,
            max: MAX_NODES,
        });
    }
    if n < 2 {
        return Err(PuzzleError::DegenerateInput(String::from(
            "the exact solver needs the north pole and at least one house",
        )));
    }

    let start: Instant = Instant::now();
    let states: usize = 1 << n;
    let mut cost: Vec<f64> = vec![f64::INFINITY; states * n];
    let mut parent: Vec<u8> = vec![NO_PARENT; states * n];
    cost[slot(1, 0, n)] = 0.0;

    // Odd masks are the sets that contain the north pole. Every mask is processed after all of
    // its subsets because the subsets are smaller integers.
    for mask in (3..states).step_by(2) {
        for j in 1..n {
            if mask & (1 << j) == 0 {
                continue;
            }
            let previous: usize = mask ^ (1 << j);
            let mut best: f64 = f64::INFINITY;
            let mut best_k: u8 = NO_PARENT;

            for k in 0..n {
                if previous & (1 << k) == 0 {
                    continue;
                }
                // Only the base set {0} has a finite path ending at the north pole
                let c: f64 = cost[slot(previous, k, n)];
                if c == f64::INFINITY {
                    continue;
                }
                let candidate: f64 = c + matrix.get(k, j);
                if candidate < best {
                    best = candidate;
                    best_k = k as u8;
                }
            }
            cost[slot(mask, j, n)] = best;
            parent[slot(mask, j, n)] = best_k;
        }
    }

    // Close the tour
    let full: usize = states - 1;
    let mut distance: f64 = f64::INFINITY;
    let mut last: usize = 0;
    for j in 1..n {
        let candidate: f64 = cost[slot(full, j, n)] + matrix.get(j, 0);
        if candidate < distance {
            distance = candidate;
            last = j;
        }
    }
    if last == 0 {
        return Err(PuzzleError::DegenerateInput(String::from(
            "the distance matrix does not contain any finite tour",
        )));
    }

    // Walk the argmin chain back to the north pole
    let mut visits: Vec<usize> = Vec::with_capacity(n - 1);
    let mut mask: usize = full;
    let mut node: usize = last;
    while node != 0 {
        visits.push(node);
        let p: u8 = parent[slot(mask, node, n)];
        if p == NO_PARENT {
            return Err(PuzzleError::DegenerateInput(format!(
                "no predecessor recorded for node {node}"
            )));
        }
        mask ^= 1 << node;
        node = p as usize;
    }
    visits.reverse();

    let tour: Tour = Tour::closed(visits);
    debug!(
        "Held-Karp over {n} nodes: distance = {distance:.3}  tour = {:?}  duration = {}s",
        tour.get(),
        start.elapsed().as_secs_f32()
    );
    Ok(ExactSolution { tour, distance })
}
