/*
puzzle.rs

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

//! Daily puzzle records.
//!
//! A [`PuzzleRecord`] is what the players receive: the north pole, the houses, and the optimal
//! route to compare their own route with.
//! A [`SolutionRecord`] only carries the route and its length.
//!
//! Both records are serialized in JSON with [`serde`].
//! Each waypoint of a route is tagged with its type:
//!
//! ```json
//! { "type": "north_pole", "x": 500, "y": 500 }
//! { "type": "house", "id": 3, "x": 200, "y": 700 }
//! ```

use chrono::{Datelike, NaiveDate};
use log::{Level, debug, info, log_enabled};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::config::GridConfig;
use crate::error::Result;
use crate::generator::difficulty::Difficulty;
use crate::generator::geometry::{House, Node, Point};
use crate::generator::selector::{CandidateResult, CandidateSelector};
use crate::generator::tour::Tour;

/// Date format used in the records and on the command line.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Waypoint of a route.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Waypoint {
    NorthPole { x: i32, y: i32 },
    House { id: u32, x: i32, y: i32 },
}

impl Waypoint {
    /// Return the location of the waypoint.
    pub fn position(&self) -> Point {
        match *self {
            Waypoint::NorthPole { x, y } => Point::new(x, y),
            Waypoint::House { x, y, .. } => Point::new(x, y),
        }
    }
}

impl From<Node> for Waypoint {
    fn from(node: Node) -> Self {
        match node {
            Node::Depot(p) => Waypoint::NorthPole { x: p.x, y: p.y },
            Node::House(h) => Waypoint::House {
                id: h.id,
                x: h.x,
                y: h.y,
            },
        }
    }
}

/// Convert a tour to waypoints.
pub fn build_route(tour: &Tour, depot: Point, houses: &[House]) -> Vec<Waypoint> {
    tour.nodes(depot, houses)
        .into_iter()
        .map(Waypoint::from)
        .collect()
}

/// Length of the route, following the waypoints in order.
pub fn route_distance(route: &[Waypoint]) -> f64 {
    route
        .windows(2)
        .map(|leg| leg[0].position().distance(&leg[1].position()))
        .sum()
}

/// Puzzle published for a date and a difficulty level.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PuzzleRecord {
    pub date: NaiveDate,
    pub north_pole: Point,
    pub houses: Vec<House>,
    pub optimal_distance: f64,
    pub optimal_route: Vec<Waypoint>,
}

/// Optimal route of a puzzle, stored apart from the puzzle.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SolutionRecord {
    pub date: NaiveDate,
    pub route: Vec<Waypoint>,
    pub optimal_distance: f64,
}

impl PuzzleRecord {
    /// Create a [`PuzzleRecord`] object from the selected candidate.
    pub fn new(date: NaiveDate, north_pole: Point, candidate: &CandidateResult) -> Self {
        Self {
            date,
            north_pole,
            houses: candidate.houses.clone(),
            optimal_distance: candidate.optimal_distance,
            optimal_route: build_route(&candidate.tour, north_pole, &candidate.houses),
        }
    }

    /// Return the [`SolutionRecord`] object for the puzzle.
    pub fn solution(&self) -> SolutionRecord {
        SolutionRecord {
            date: self.date,
            route: self.optimal_route.clone(),
            optimal_distance: self.optimal_distance,
        }
    }
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    Ok(NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)?)
}

/// Return the random seed for the given date.
///
/// Without an explicit seed, the date itself (as `YYYYMMDD`) is the seed.
/// An explicit seed is mixed with the date so that every date of a range still gets its own
/// layout.
pub fn puzzle_seed(date: NaiveDate, seed: Option<u64>) -> u64 {
    let day: u64 = u64::from(date.year().unsigned_abs()) * 10000
        + u64::from(date.month()) * 100
        + u64::from(date.day());
    match seed {
        Some(s) => s ^ day,
        None => day,
    }
}

/// Generate the puzzle for the date and the difficulty level.
///
/// Each difficulty level draws from its own stream of the seeded generator, so generating one
/// level does not change the others.
///
/// # Errors
///
/// The function returns an error when no candidate layout could be placed or solved.
pub fn generate(
    date: NaiveDate,
    difficulty: Difficulty,
    grid: &GridConfig,
    seed: u64,
) -> Result<PuzzleRecord> {
    let start: Instant = Instant::now();
    let mut rng: ChaCha8Rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(difficulty as u64);

    debug!("[{difficulty}] Generating puzzle for {date} (seed = {seed})");
    let selector: CandidateSelector = CandidateSelector::new(*grid, difficulty.config());
    let chosen: CandidateResult = selector.select(&mut rng)?;
    let puzzle: PuzzleRecord = PuzzleRecord::new(date, grid.depot, &chosen);

    if log_enabled!(Level::Debug) {
        let route: Vec<String> = puzzle
            .optimal_route
            .iter()
            .map(|w| match w {
                Waypoint::NorthPole { .. } => String::from("NP"),
                Waypoint::House { id, .. } => id.to_string(),
            })
            .collect();
        debug!("[{difficulty}] Route: {}", route.join(" -> "));
    }
    info!(
        "[{difficulty}] Houses = {}  optimal distance = {:.2}  duration = {}s",
        puzzle.houses.len(),
        puzzle.optimal_distance,
        start.elapsed().as_secs_f32()
    );
    Ok(puzzle)
}
