/*
error.rs

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

//! Error types.

use thiserror::Error;

/// Errors raised while generating, storing, or verifying puzzles.
#[derive(Debug, Error)]
pub enum PuzzleError {
    /// More nodes than the exact solver supports.
    #[error("Too many nodes ({nodes}) for the exact solver limit of {max}")]
    CapacityExceeded { nodes: usize, max: usize },

    /// The sampler could not place enough houses under the separation constraint.
    #[error("Insufficient houses placed ({achieved}/{requested})")]
    InsufficientPlacement { requested: usize, achieved: usize },

    /// No houses, or houses that cannot form a puzzle.
    #[error("Degenerate input: {0}")]
    DegenerateInput(String),

    /// Unknown difficulty name.
    #[error("Unknown difficulty '{0}'. Use: easy, medium, hard")]
    InvalidDifficulty(String),

    /// Date that does not follow the `YYYY-MM-DD` format.
    #[error("Invalid date format. Use YYYY-MM-DD: {0}")]
    Date(#[from] chrono::ParseError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result type alias for puzzle operations.
pub type Result<T> = std::result::Result<T, PuzzleError>;
