/*
sampler.rs

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

//! Place random houses on the board.
//!
//! Houses are placed on the grid lines, inside the margins, never on the north pole, and never
//! closer than the configured Chebyshev distance to the north pole or to another house.
//!
//! In biased mode, the houses are grouped in two or three clusters, with one or two outliers in
//! the board corners for the largest puzzles. That layout is harder to solve by inspection.
//!
//! The sampler never loops on random draws: every loop consumes a finite list of candidate
//! positions. When the list runs out before the requested count is reached, the shorter list of
//! houses is returned and the caller decides what to do.

use log::debug;
use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};

use super::geometry::{House, Point};
use crate::config::GridConfig;

/// Outliers are added to biased layouts from these house counts.
const FIRST_OUTLIER_MIN_HOUSES: usize = 15;
const SECOND_OUTLIER_MIN_HOUSES: usize = 16;

/// Each cluster receives at least that many houses.
const MIN_CLUSTER_SIZE: usize = 3;

/// [`GeometrySampler`] object.
#[derive(Debug, Clone)]
pub struct GeometrySampler {
    /// Board layout.
    pub grid: GridConfig,

    /// Minimum Chebyshev distance in grid units.
    pub min_grid_distance: i32,

    /// Whether to group houses in clusters.
    pub biased: bool,
}

/// Houses placed so far and the positions still available.
struct Placement<'a> {
    sampler: &'a GeometrySampler,
    available: Vec<Point>,
    houses: Vec<House>,
    count: usize,
}

impl Placement<'_> {
    fn is_full(&self) -> bool {
        self.houses.len() >= self.count
    }

    fn push(&mut self, position: Point) {
        let id: u32 = self.houses.len() as u32 + 1;
        self.houses.push(House::new(id, position));
    }

    /// Place a house at the first preferred position that is still available and far enough
    /// from the other houses.
    fn pick(&mut self, preferred: &[Point]) -> Option<Point> {
        let position: Point = *preferred.iter().find(|p| {
            self.available.contains(p) && self.sampler.is_far_enough(p, &self.houses)
        })?;
        self.available.retain(|p| *p != position);
        self.push(position);
        Some(position)
    }

    /// Place a house at the first available position that is far enough from the other houses.
    fn pick_any(&mut self) -> Option<Point> {
        let i: usize = self
            .available
            .iter()
            .position(|p| self.sampler.is_far_enough(p, &self.houses))?;
        let position: Point = self.available.remove(i);
        self.push(position);
        Some(position)
    }
}

impl GeometrySampler {
    /// Create a [`GeometrySampler`] object.
    pub fn new(grid: GridConfig, min_grid_distance: i32, biased: bool) -> Self {
        Self {
            grid,
            min_grid_distance,
            biased,
        }
    }

    /// Return every grid intersection inside the margins, except the north pole.
    ///
    /// An invalid grid layout has no position.
    pub fn valid_positions(&self) -> Vec<Point> {
        let mut positions: Vec<Point> = Vec::new();
        if let Err(e) = self.grid.validate() {
            debug!("No valid position: {e}");
            return positions;
        }
        let min: i32 = self.grid.min_coordinate();
        let max: i32 = self.grid.max_coordinate();
        let step: usize = self.grid.spacing as usize;

        for x in (min..=max).step_by(step) {
            for y in (min..=max).step_by(step) {
                let p: Point = Point::new(x, y);
                if p != self.grid.depot {
                    positions.push(p);
                }
            }
        }
        positions
    }

    /// Whether the position respects the minimum distance to the north pole and to the houses.
    pub fn is_far_enough(&self, target: &Point, houses: &[House]) -> bool {
        let quantum: i32 = self.grid.spacing;
        target.grid_distance(&self.grid.depot, quantum) >= self.min_grid_distance
            && houses
                .iter()
                .all(|h| target.grid_distance(&h.position(), quantum) >= self.min_grid_distance)
    }

    /// Place up to `count` houses.
    ///
    /// The returned list is shorter than `count` when the separation constraint cannot be met.
    pub fn sample<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<House> {
        let mut available: Vec<Point> = self.valid_positions();
        available.shuffle(rng);

        let mut placement: Placement = Placement {
            sampler: self,
            available,
            houses: Vec::with_capacity(count),
            count,
        };
        if self.biased {
            self.sample_biased(&mut placement, rng);
        } else {
            self.sample_uniform(&mut placement);
        }

        debug!(
            "Placed {}/{} houses (biased = {})",
            placement.houses.len(),
            count,
            self.biased
        );
        placement.houses.truncate(count);
        placement.houses
    }

    /// Accept the shuffled positions one by one.
    fn sample_uniform(&self, placement: &mut Placement) {
        while !placement.is_full() {
            let Some(position) = placement.available.pop() else {
                break;
            };
            if self.is_far_enough(&position, &placement.houses) {
                placement.push(position);
            }
        }
    }

    /// Fill clusters first, then the outliers, then any remaining position.
    fn sample_biased<R: Rng + ?Sized>(&self, placement: &mut Placement, rng: &mut R) {
        let count: usize = placement.count;
        let cluster_count: usize = rng.random_range(2..=3);
        let centers: Vec<Point> = placement
            .available
            .choose_multiple(rng, cluster_count)
            .copied()
            .collect();

        let mut cluster_sizes: Vec<usize> =
            vec![MIN_CLUSTER_SIZE.max(count / cluster_count); centers.len()];
        let remaining: usize = count.saturating_sub(cluster_sizes.iter().sum());
        let num_clusters: usize = cluster_sizes.len();
        for i in 0..remaining {
            if num_clusters > 0 {
                cluster_sizes[i % num_clusters] += 1;
            }
        }

        let mut outliers: Vec<Point> = Vec::with_capacity(2);
        if count >= FIRST_OUTLIER_MIN_HOUSES {
            let mut corners: [Point; 4] = self.grid.corners();
            corners.shuffle(rng);
            outliers.push(corners[0]);
            if count >= SECOND_OUTLIER_MIN_HOUSES {
                outliers.push(corners[1]);
            }
        }
        debug!("Clusters: centers = {centers:?}  sizes = {cluster_sizes:?}  outliers = {outliers:?}");

        // Clusters
        let quantum: i32 = self.grid.spacing;
        for (center, size) in centers.iter().zip(cluster_sizes) {
            if placement.is_full() {
                break;
            }
            let mut neighborhood: Vec<Point> = Vec::with_capacity(9);
            for dx in [-quantum, 0, quantum] {
                for dy in [-quantum, 0, quantum] {
                    neighborhood.push(Point::new(center.x + dx, center.y + dy));
                }
            }
            neighborhood.shuffle(rng);

            let mut placed: usize = 0;
            while placed < size && !placement.is_full() {
                if placement.pick(&neighborhood).is_none() {
                    break;
                }
                placed += 1;
            }
        }

        // Outliers
        for target in outliers {
            if placement.is_full() {
                break;
            }
            placement.pick(&[target]);
        }

        // Padding
        while !placement.is_full() {
            if placement.pick_any().is_none() {
                break;
            }
        }
    }
}
