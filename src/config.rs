/*
config.rs

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

//! Grid constants and the board layout shared by every puzzle.

use crate::error::{PuzzleError, Result};
use crate::generator::geometry::Point;

/// Copyright text displayed by `--version`.
pub const COPYRIGHT_NOTICE: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "\nCopyright 2025 The Daily TSP Authors\nLicense GPL-3.0-or-later <https://gnu.org/licenses/gpl.html>"
);

/// Width and height of the board.
pub const GRID_SIZE: i32 = 1000;

/// Houses are only placed on multiples of this quantum.
pub const GRID_SPACING: i32 = 100;

/// Keep houses away from the board edges.
pub const MIN_MARGIN: i32 = GRID_SPACING;

/// Largest number of houses the exact solver accepts.
pub const MAX_HOUSES: usize = 16;

/// Largest number of nodes (houses plus the north pole) the exact solver accepts.
pub const MAX_NODES: usize = MAX_HOUSES + 1;

/// Default directory where the generated puzzles are stored.
pub const DEFAULT_OUTPUT_DIR: &str = "public/puzzles";

/// Board layout.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct GridConfig {
    /// Width and height of the board.
    pub size: i32,

    /// Grid quantum. Every house sits on a multiple of this value.
    pub spacing: i32,

    /// Minimum distance between a house and the board edges.
    pub margin: i32,

    /// Location of the north pole, where every tour starts and ends.
    pub depot: Point,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            size: GRID_SIZE,
            spacing: GRID_SPACING,
            margin: MIN_MARGIN,
            depot: Point::new(GRID_SIZE / 2, GRID_SIZE / 2),
        }
    }
}

impl GridConfig {
    /// Check that the layout leaves room for at least one grid line inside the margins.
    ///
    /// # Errors
    ///
    /// The method returns [`PuzzleError::DegenerateInput`] when the spacing is not positive or
    /// when the margins leave no room for the houses.
    pub fn validate(&self) -> Result<()> {
        if self.spacing <= 0 {
            return Err(PuzzleError::DegenerateInput(format!(
                "grid spacing must be positive (got {})",
                self.spacing
            )));
        }
        if self.margin < 0 || self.min_coordinate() > self.max_coordinate() {
            return Err(PuzzleError::DegenerateInput(format!(
                "no grid line between the margins (size {}, margin {}, spacing {})",
                self.size, self.margin, self.spacing
            )));
        }
        Ok(())
    }

    /// Smallest coordinate a house can use on both axes.
    pub fn min_coordinate(&self) -> i32 {
        // Round the margin up to the next grid line
        (self.margin + self.spacing - 1) / self.spacing * self.spacing
    }

    /// Largest coordinate a house can use on both axes.
    pub fn max_coordinate(&self) -> i32 {
        (self.size - self.margin) / self.spacing * self.spacing
    }

    /// The four board corners where outliers are placed, inset by one quantum.
    pub fn corners(&self) -> [Point; 4] {
        let low: i32 = self.spacing;
        let high: i32 = self.size - self.spacing;
        [
            Point::new(low, low),
            Point::new(low, high),
            Point::new(high, low),
            Point::new(high, high),
        ]
    }
}
