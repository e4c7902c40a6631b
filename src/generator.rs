/*
generator.rs

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

//! Place houses, solve the tours, and rate the puzzles.
//!
//! A puzzle is built in several steps, each one in its own module:
//!
//! * A [`sampler::GeometrySampler`] object places the houses on the grid.
//!   Houses respect a minimum distance from each other and from the north pole.
//!   If the constraint leaves no room for all the houses, then a shorter list is returned.
//!
//! * [`distance::DistanceMatrix::build`] computes the distance between every pair of nodes.
//!   The north pole is always node 0.
//!
//! * [`exact::solve`] finds the shortest closed tour with the Held-Karp algorithm.
//!   The solver refuses graphs with more than 17 nodes instead of returning an approximation.
//!
//! * [`heuristic::estimate`] computes the tour that a human would likely find, and
//!   [`complexity::score`] measures how twisted the optimal route is.
//!   Both values rate the difficulty of the puzzle.
//!
//! A [`selector::CandidateSelector`] object repeats these steps for several layouts and keeps the
//! one with the best score.
//! The number of houses and candidates come from the [`difficulty::DifficultyConfig`] object of
//! the requested [`difficulty::Difficulty`] level.

pub mod complexity;
pub mod difficulty;
pub mod distance;
pub mod exact;
pub mod geometry;
pub mod heuristic;
pub mod sampler;
pub mod selector;
pub mod tour;
