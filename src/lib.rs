/*
lib.rs

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

//! Generate daily routing puzzles.
//!
//! Santa leaves the north pole, visits every house once, and comes back.
//! Each puzzle comes with its provably shortest route, so that players can compare their own
//! route with the optimal one.
//!
//! * [`generator`] builds and scores the candidate layouts.
//! * [`puzzle`] turns the selected candidate into the published records.
//! * [`saver`] stores the records on disk.
//! * [`verify`] checks stored puzzles against the exact solver.

pub mod config;
pub mod error;
pub mod generator;
pub mod puzzle;
pub mod saver;
pub mod verify;
