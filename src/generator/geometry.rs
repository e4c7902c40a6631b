/*
geometry.rs

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

//! Points, houses, and the nodes of a puzzle graph.

use serde::{Deserialize, Serialize};

/// Integer coordinates on the board.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Create a [`Point`] object.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to the given point.
    pub fn distance(&self, other: &Point) -> f64 {
        let dx: f64 = f64::from(self.x - other.x);
        let dy: f64 = f64::from(self.y - other.y);
        dx.hypot(dy)
    }

    /// Chebyshev distance in grid units.
    ///
    /// Each axis is converted to grid units with an integer division by `quantum` before taking
    /// the maximum, so two points less than one quantum apart are at distance 0.
    pub fn grid_distance(&self, other: &Point, quantum: i32) -> i32 {
        let dx: i32 = (self.x - other.x).abs() / quantum;
        let dy: i32 = (self.y - other.y).abs() / quantum;
        dx.max(dy)
    }
}

/// A house that the tour must visit.
///
/// House IDs start at 1 and follow the placement order.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct House {
    pub id: u32,
    pub x: i32,
    pub y: i32,
}

impl House {
    /// Create a [`House`] object at the given point.
    pub fn new(id: u32, position: Point) -> Self {
        Self {
            id,
            x: position.x,
            y: position.y,
        }
    }

    /// Return the location of the house.
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Node of the puzzle graph.
///
/// The north pole is always node 0. House `i` in the house list is node `i + 1`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Node {
    Depot(Point),
    House(House),
}

impl Node {
    /// Return the location of the node.
    pub fn position(&self) -> Point {
        match self {
            Node::Depot(p) => *p,
            Node::House(h) => h.position(),
        }
    }

    /// Return the node at the given index, or [`None`] if the index is out of range.
    pub fn at(index: usize, depot: Point, houses: &[House]) -> Option<Node> {
        if index == 0 {
            Some(Node::Depot(depot))
        } else {
            houses.get(index - 1).map(|h| Node::House(*h))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_distance_floors_each_axis() {
        let a = Point::new(100, 100);
        assert_eq!(a.grid_distance(&Point::new(300, 200), 100), 2);
        assert_eq!(a.grid_distance(&Point::new(150, 190), 100), 0);
        assert_eq!(a.grid_distance(&Point::new(100, 100), 100), 0);
    }

    #[test]
    fn euclidean_distance() {
        let a = Point::new(0, 0);
        assert_eq!(a.distance(&Point::new(300, 400)), 500.0);
        assert_eq!(Point::new(300, 400).distance(&a), 500.0);
    }

    #[test]
    fn node_lookup() {
        let depot = Point::new(500, 500);
        let houses = [House::new(1, Point::new(600, 500))];
        assert_eq!(Node::at(0, depot, &houses), Some(Node::Depot(depot)));
        assert_eq!(
            Node::at(1, depot, &houses).map(|n| n.position()),
            Some(Point::new(600, 500))
        );
        assert_eq!(Node::at(2, depot, &houses), None);
    }
}
