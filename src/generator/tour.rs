/*
tour.rs

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

//! Closed tour through the north pole.

use serde::{Deserialize, Serialize};
use std::iter;

use super::distance::DistanceMatrix;
use super::geometry::{House, Node, Point};

/// Tour object.
///
/// The tour is an ordered list of node indexes that starts and ends at the north pole (node 0).
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct Tour {
    nodes: Vec<usize>,
}

impl Tour {
    /// Create a [`Tour`] object that leaves the north pole, visits the given nodes in order, and
    /// comes back.
    pub fn closed<I>(visits: I) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        Self {
            nodes: iter::once(0)
                .chain(visits)
                .chain(iter::once(0))
                .collect(),
        }
    }

    /// Create a [`Tour`] object from a route that already starts and ends at the north pole.
    pub(crate) fn from_route(nodes: Vec<usize>) -> Self {
        Self { nodes }
    }

    /// Return the node indexes, both north pole entries included.
    pub fn get(&self) -> &[usize] {
        &self.nodes
    }

    /// Return the visited houses as node indexes, in order.
    pub fn visits(&self) -> &[usize] {
        if self.nodes.len() < 2 {
            &[]
        } else {
            &self.nodes[1..self.nodes.len() - 1]
        }
    }

    /// Number of entries in the tour, the closing return to the north pole included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tour is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether the tour is a closed Hamiltonian cycle over `num_nodes` nodes.
    pub fn is_valid(&self, num_nodes: usize) -> bool {
        if num_nodes == 0 || self.nodes.len() != num_nodes + 1 {
            return false;
        }
        if self.nodes.first() != Some(&0) || self.nodes.last() != Some(&0) {
            return false;
        }

        let mut seen: Vec<bool> = vec![false; num_nodes];
        seen[0] = true;
        for &v in self.visits() {
            if v == 0 || v >= num_nodes || seen[v] {
                return false;
            }
            seen[v] = true;
        }
        true
    }

    /// Total length of the tour.
    pub fn length(&self, matrix: &DistanceMatrix) -> f64 {
        matrix.route_length(&self.nodes)
    }

    /// Return the tour as nodes.
    ///
    /// Indexes that do not match a node are skipped.
    pub fn nodes(&self, depot: Point, houses: &[House]) -> Vec<Node> {
        self.nodes
            .iter()
            .filter_map(|&i| Node::at(i, depot, houses))
            .collect()
    }

    /// Return the tour as an ordered list of coordinates.
    pub fn points(&self, depot: Point, houses: &[House]) -> Vec<Point> {
        self.nodes(depot, houses)
            .iter()
            .map(Node::position)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closed_tour_wraps_depot() {
        let t = Tour::closed([2, 1, 3]);
        assert_eq!(t.get(), &[0, 2, 1, 3, 0]);
        assert_eq!(t.visits(), &[2, 1, 3]);
        assert_eq!(t.len(), 5);
        assert!(t.is_valid(4));
    }

    #[test]
    fn invalid_tours() {
        assert!(!Tour::closed([1, 1]).is_valid(3));
        assert!(!Tour::closed([1, 2]).is_valid(4));
        assert!(!Tour::closed([1, 5]).is_valid(3));
        assert!(!Tour::from_route(vec![1, 0, 2, 1]).is_valid(3));
        assert!(!Tour::default().is_valid(1));
    }

    #[test]
    fn points_follow_tour_order() {
        let depot = Point::new(500, 500);
        let houses = [
            House::new(1, Point::new(600, 500)),
            House::new(2, Point::new(400, 500)),
        ];
        let t = Tour::closed([2, 1]);
        assert_eq!(
            t.points(depot, &houses),
            vec![depot, Point::new(400, 500), Point::new(600, 500), depot]
        );
    }
}
