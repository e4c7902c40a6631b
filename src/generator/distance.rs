/*
distance.rs

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

//! Euclidean distance matrix over the north pole and the houses.

use log::{Level, debug, log_enabled};
use std::iter;

use super::geometry::{House, Point};
use crate::config::{MAX_HOUSES, MAX_NODES};
use crate::error::{PuzzleError, Result};

/// Symmetric distance matrix with a zero diagonal.
///
/// Index 0 is the north pole. Index `i > 0` is the house at position `i - 1` in the house list.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    /// Number of nodes.
    size: usize,

    /// Row-major distances.
    cells: Vec<f64>,
}

impl DistanceMatrix {
    /// Build the matrix for the given north pole and houses.
    ///
    /// # Errors
    ///
    /// The method returns an error when there are no houses, when a house sits on the north pole,
    /// or when there are more houses than the exact solver supports.
    pub fn build(depot: Point, houses: &[House]) -> Result<Self> {
        if houses.is_empty() {
            return Err(PuzzleError::DegenerateInput(String::from(
                "a puzzle needs at least one house",
            )));
        }
        if houses.len() > MAX_HOUSES {
            return Err(PuzzleError::CapacityExceeded {
                nodes: houses.len() + 1,
                max: MAX_NODES,
            });
        }
        if let Some(h) = houses.iter().find(|h| h.position() == depot) {
            return Err(PuzzleError::DegenerateInput(format!(
                "house {} is placed on the north pole",
                h.id
            )));
        }

        let points: Vec<Point> = iter::once(depot)
            .chain(houses.iter().map(House::position))
            .collect();
        let matrix: DistanceMatrix = Self::from_points(&points);
        if log_enabled!(Level::Debug) {
            matrix.debug();
        }
        Ok(matrix)
    }

    /// Build the matrix for an arbitrary list of points, without any validation.
    pub fn from_points(points: &[Point]) -> Self {
        let size: usize = points.len();
        let mut cells: Vec<f64> = vec![0.0; size * size];

        for i in 0..size {
            for j in (i + 1)..size {
                let d: f64 = points[i].distance(&points[j]);
                cells[i * size + j] = d;
                cells[j * size + i] = d;
            }
        }
        Self { size, cells }
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.size
    }

    /// Whether the matrix has no nodes.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Distance between nodes `i` and `j`.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.cells[i * self.size + j]
    }

    /// Total length of a route given as a sequence of node indexes.
    pub fn route_length(&self, route: &[usize]) -> f64 {
        route.windows(2).map(|w| self.get(w[0], w[1])).sum()
    }

    /// Print the matrix.
    pub fn debug(&self) {
        let mut s: String = String::new();
        for i in 0..self.size {
            s.clear();
            s.push_str(&format!("{i:>3} |"));
            for j in 0..self.size {
                s.push_str(&format!(" {:>7.1}", self.get(i, j)));
            }
            debug!("{s}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn houses(points: &[(i32, i32)]) -> Vec<House> {
        points
            .iter()
            .enumerate()
            .map(|(i, (x, y))| House::new(i as u32 + 1, Point::new(*x, *y)))
            .collect()
    }

    #[test]
    fn symmetric_with_zero_diagonal() {
        let m = DistanceMatrix::build(
            Point::new(500, 500),
            &houses(&[(600, 500), (500, 600), (400, 500), (100, 900)]),
        )
        .unwrap();
        assert_eq!(m.len(), 5);
        for i in 0..m.len() {
            assert_eq!(m.get(i, i), 0.0);
            for j in 0..m.len() {
                assert_eq!(m.get(i, j), m.get(j, i));
                assert!(m.get(i, j) >= 0.0);
            }
        }
        assert_eq!(m.get(0, 1), 100.0);
        assert_eq!(m.get(1, 3), 200.0);
    }

    #[test]
    fn houses_keep_input_order() {
        let m = DistanceMatrix::build(Point::new(0, 0), &houses(&[(0, 300), (400, 0)])).unwrap();
        assert_eq!(m.get(0, 1), 300.0);
        assert_eq!(m.get(0, 2), 400.0);
        assert_eq!(m.get(1, 2), 500.0);
    }

    #[test]
    fn rejects_empty_puzzle() {
        let err = DistanceMatrix::build(Point::new(500, 500), &[]).unwrap_err();
        assert!(matches!(err, PuzzleError::DegenerateInput(_)));
    }

    #[test]
    fn rejects_house_on_depot() {
        let err = DistanceMatrix::build(Point::new(500, 500), &houses(&[(500, 500)])).unwrap_err();
        assert!(matches!(err, PuzzleError::DegenerateInput(_)));
    }

    #[test]
    fn rejects_too_many_houses() {
        let many: Vec<(i32, i32)> = (1..=17).map(|i| (i * 10, 0)).collect();
        let err = DistanceMatrix::build(Point::new(500, 500), &houses(&many)).unwrap_err();
        assert!(matches!(
            err,
            PuzzleError::CapacityExceeded { nodes: 18, max: 17 }
        ));
    }

    #[test]
    fn route_length_sums_legs() {
        let m = DistanceMatrix::build(Point::new(500, 500), &houses(&[(700, 500)])).unwrap();
        assert_eq!(m.route_length(&[0, 1, 0]), 400.0);
        assert_eq!(m.route_length(&[0]), 0.0);
    }
}
