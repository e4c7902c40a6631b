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

//! Save and load the daily puzzles.
//!
//! Puzzles are stored under a root directory, one directory per year and month:
//!
//! ```text
//! <root>/2025/12/24_easy.json
//! <root>/2025/12/24_easy_solution.json
//! ```
//!
//! The files are serializations of the [`PuzzleRecord`] and [`SolutionRecord`] objects in JSON
//! format by using [`serde`].

use chrono::NaiveDate;
use log::debug;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::generator::difficulty::Difficulty;
use crate::puzzle::{PuzzleRecord, SolutionRecord};

const JSON_EXTENSION: &str = ".json";
const SOLUTION_SUFFIX: &str = "_solution.json";

/// Object to save and load the puzzles.
#[derive(Debug, Clone)]
pub struct PuzzleStore {
    /// Directory that contains the year directories.
    root: PathBuf,
}

impl PuzzleStore {
    /// Create a [`PuzzleStore`] object.
    ///
    /// The provided [`PathBuf`] is the path to the directory where the puzzles are stored.
    pub fn new(root: PathBuf) -> Self {
        debug!("Puzzle directory: {root:?}");
        Self { root }
    }

    /// Return the root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Return the path of the puzzle file for the date and difficulty level.
    pub fn puzzle_path(&self, date: NaiveDate, difficulty: Difficulty) -> PathBuf {
        let mut path: PathBuf = self.root.clone();
        path.push(date.format("%Y").to_string());
        path.push(date.format("%m").to_string());
        path.push(format!("{}_{difficulty}{JSON_EXTENSION}", date.format("%d")));
        path
    }

    /// Return the path of the solution file that goes with the given puzzle file.
    pub fn solution_path_for(puzzle_path: &Path) -> PathBuf {
        let name: String = puzzle_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let stem: &str = name.strip_suffix(JSON_EXTENSION).unwrap_or(&name);
        puzzle_path.with_file_name(format!("{stem}{SOLUTION_SUFFIX}"))
    }

    /// Save the puzzle and its solution, creating the directories if needed.
    ///
    /// Return the paths of the puzzle and solution files.
    pub fn save(&self, difficulty: Difficulty, puzzle: &PuzzleRecord) -> Result<(PathBuf, PathBuf)> {
        let puzzle_path: PathBuf = self.puzzle_path(puzzle.date, difficulty);
        let solution_path: PathBuf = Self::solution_path_for(&puzzle_path);

        write_record(&puzzle_path, puzzle)?;
        write_record(&solution_path, &puzzle.solution())?;
        Ok((puzzle_path, solution_path))
    }

    /// Load the puzzle file.
    pub fn load_puzzle(path: &Path) -> Result<PuzzleRecord> {
        let file: File = File::open(path)?;
        let reader: BufReader<File> = BufReader::new(file);
        let puzzle: PuzzleRecord = serde_json::from_reader(reader)?;
        Ok(puzzle)
    }

    /// Load the solution file.
    ///
    /// Return the [`SolutionRecord`] object or None if the solution file does not exist.
    pub fn load_solution(path: &Path) -> Result<Option<SolutionRecord>> {
        read_optional(path)
    }

    /// Return the puzzle files under the root directory, sorted by path.
    ///
    /// Solution files are not included. A missing root directory gives an empty list.
    pub fn list_puzzles(&self) -> Result<Vec<PathBuf>> {
        let mut puzzles: Vec<PathBuf> = Vec::new();
        collect_puzzles(&self.root, &mut puzzles)?;
        puzzles.sort();
        debug!("Found {} puzzles in {:?}", puzzles.len(), self.root);
        Ok(puzzles)
    }
}

/// Whether the file name is a puzzle file, `DD_difficulty.json`.
pub fn is_puzzle_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.ends_with(JSON_EXTENSION) && !n.ends_with(SOLUTION_SUFFIX))
}

/// Return the difficulty level from a puzzle file name.
pub fn difficulty_from_path(path: &Path) -> Option<Difficulty> {
    let stem: &str = path.file_stem()?.to_str()?;
    let (_, name) = stem.split_once('_')?;
    name.parse().ok()
}

fn collect_puzzles(dir: &Path, puzzles: &mut Vec<PathBuf>) -> Result<()> {
    let entries: fs::ReadDir = match fs::read_dir(dir) {
        Ok(e) => e,
        Err(error) => match error.kind() {
            ErrorKind::NotFound => return Ok(()),
            _ => return Err(error.into()),
        },
    };
    for entry in entries {
        let path: PathBuf = entry?.path();
        if path.is_dir() {
            collect_puzzles(&path, puzzles)?;
        } else if is_puzzle_file(&path) {
            puzzles.push(path);
        }
    }
    Ok(())
}

/// Write the record in JSON format, creating the parent directories if needed.
pub fn write_record<T: Serialize>(path: &Path, record: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file: File = File::create(path)?;
    let mut writer: BufWriter<File> = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, record)?;
    writer.flush()?;
    debug!("Saved {path:?}");
    Ok(())
}

/// Read a JSON record, or return None if the file does not exist.
fn read_optional<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    let file: File;
    match File::open(path) {
        Ok(f) => file = f,
        Err(error) => match error.kind() {
            ErrorKind::NotFound => return Ok(None),
            _ => return Err(error.into()),
        },
    }
    let reader: BufReader<File> = BufReader::new(file);
    let record: T = serde_json::from_reader(reader)?;
    Ok(Some(record))
}
