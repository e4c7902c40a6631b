/*
cli_options.rs

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

//! Process command-line options.
//!
//! # Examples
//!
//! Generate the three puzzles for today:
//!
//! ```text
//! $ daily-tsp
//! ```
//!
//! Generate the hard puzzles for the first week of December:
//!
//! ```text
//! $ daily-tsp 2025-12-01 --to 2025-12-07 -f hard
//! ```
//!
//! Verify every stored puzzle, and then show what would be fixed:
//!
//! ```text
//! $ daily-tsp --verify
//! $ daily-tsp --fix --dry-run
//! ```

use chrono::{Local, NaiveDate};
use clap::Parser;
use env_logger::Env;
use log::{LevelFilter, debug, error, info};
use std::path::PathBuf;
use std::time::Instant;

use daily_tsp::config::{COPYRIGHT_NOTICE, DEFAULT_OUTPUT_DIR, GridConfig};
use daily_tsp::error::Result;
use daily_tsp::generator::difficulty::Difficulty;
use daily_tsp::puzzle::{self, PuzzleRecord};
use daily_tsp::saver::puzzle::{self as store, PuzzleStore};
use daily_tsp::verify::{self, FixOutcome, Verification};

/// Generate daily north pole routing puzzles with their optimal route.
#[derive(Parser)]
#[command(about, long_about = None, version, long_version = COPYRIGHT_NOTICE)]
struct Args {
    /// First date to generate, in YYYY-MM-DD format (default: today)
    date: Option<String>,

    /// Last date to generate, in YYYY-MM-DD format (default: same as the first date)
    #[arg(long)]
    to: Option<String>,

    /// Difficulty level to generate. Repeat for several levels (default: all levels)
    #[arg(value_enum, short = 'f', long)]
    difficulty: Vec<Difficulty>,

    /// Random seed, mixed with the date (default: the date only)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Directory where the puzzles are stored
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    output: PathBuf,

    /// Check that the stored puzzles are optimal
    #[arg(long, default_value_t = false, conflicts_with = "fix")]
    verify: bool,

    /// Rewrite the stored puzzles that are not optimal
    #[arg(long, default_value_t = false)]
    fix: bool,

    /// With --fix, show what would be fixed without writing the files
    #[arg(long, default_value_t = false, requires = "fix")]
    dry_run: bool,

    /// Only verify or fix this puzzle file instead of every stored puzzle
    #[arg(short, long)]
    puzzle: Option<PathBuf>,

    /// Enable debug messages
    #[arg(short, long, default_value_t = false)]
    debug: bool,
}

/// Parse and process command-line options.
///
/// Return the exit code.
pub fn parse() -> u8 {
    let args: Args = Args::parse();

    let mut logger: env_logger::Builder =
        env_logger::Builder::from_env(Env::default().default_filter_or("info"));
    if args.debug {
        logger.filter_level(LevelFilter::Debug);
    }
    logger.init();

    let ret: Result<u8> = if args.verify {
        verify_puzzles(&args)
    } else if args.fix {
        fix_puzzles(&args)
    } else {
        generate_puzzles(&args)
    };
    match ret {
        Ok(code) => code,
        Err(e) => {
            error!("{e}");
            1
        }
    }
}

/// Generate and save the puzzles for every date and difficulty level.
fn generate_puzzles(args: &Args) -> Result<u8> {
    let first: NaiveDate = match &args.date {
        Some(d) => puzzle::parse_date(d)?,
        None => Local::now().date_naive(),
    };
    let last: NaiveDate = match &args.to {
        Some(d) => puzzle::parse_date(d)?,
        None => first,
    };
    let difficulties: Vec<Difficulty> = if args.difficulty.is_empty() {
        Difficulty::all().collect()
    } else {
        args.difficulty.clone()
    };
    if last < first {
        error!("The last date ({last}) is before the first date ({first})");
        return Ok(1);
    }

    let grid: GridConfig = GridConfig::default();
    let store: PuzzleStore = PuzzleStore::new(args.output.clone());
    let start: Instant = Instant::now();
    let mut generated: usize = 0;
    let mut errors: usize = 0;

    for date in first.iter_days().take_while(|d| *d <= last) {
        info!("Generating puzzles for {date}...");
        let seed: u64 = puzzle::puzzle_seed(date, args.seed);

        for &difficulty in &difficulties {
            let puzzle: PuzzleRecord = match puzzle::generate(date, difficulty, &grid, seed) {
                Ok(p) => p,
                Err(e) => {
                    error!("[{difficulty}] {date}: {e}");
                    errors += 1;
                    continue;
                }
            };
            let (puzzle_path, solution_path) = store.save(difficulty, &puzzle)?;
            debug!("Saved {puzzle_path:?} and {solution_path:?}");
            println!("Saved puzzle to {}", puzzle_path.display());
            generated += 1;
        }
    }

    info!(
        "Generated {generated} puzzles ({errors} errors) in {}s",
        start.elapsed().as_secs_f32()
    );
    Ok(if errors > 0 { 1 } else { 0 })
}

/// Return the puzzle files to verify or fix.
fn selected_puzzles(args: &Args) -> Result<Vec<PathBuf>> {
    match &args.puzzle {
        Some(p) => Ok(vec![p.clone()]),
        None => PuzzleStore::new(args.output.clone()).list_puzzles(),
    }
}

/// Verify the stored puzzles and print a line per puzzle.
///
/// Return 1 when at least one puzzle is not optimal.
fn verify_puzzles(args: &Args) -> Result<u8> {
    let puzzles: Vec<PathBuf> = selected_puzzles(args)?;
    println!("Found {} puzzles to verify...\n", puzzles.len());

    let mut optimal: usize = 0;
    let mut suboptimal: usize = 0;
    let mut unknown: usize = 0;

    for path in &puzzles {
        let v: Verification = match verify::verify_puzzle(path) {
            Ok(v) => v,
            Err(e) => {
                error!("{}: {e}", path.display());
                unknown += 1;
                continue;
            }
        };
        let status: &str = match v.is_optimal() {
            Some(true) => {
                optimal += 1;
                "✓"
            }
            Some(false) => {
                suboptimal += 1;
                "✗"
            }
            None => {
                unknown += 1;
                "?"
            }
        };
        let verified: String = v
            .verified
            .map_or_else(|| String::from("N/A"), |d| format!("{d:.2}"));
        let name: String = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let level: String = store::difficulty_from_path(path)
            .map_or_else(|| String::from("?"), |d| d.to_string());
        println!(
            "{status} {name:30} {level:6} {:2} houses  Stored: {:8.2}  Verified: {verified:>8}  Method: {}",
            v.num_houses, v.stored, v.method
        );
        if v.route_matches_optimal() == Some(false) {
            println!("    Solution route length differs: {:?}", v.route_distance);
        }
    }

    println!("\nSummary:\n  Optimal: {optimal}\n  Suboptimal: {suboptimal}\n  Unknown: {unknown}");
    Ok(if suboptimal > 0 { 1 } else { 0 })
}

/// Fix the stored puzzles that are not optimal and print a line per puzzle.
fn fix_puzzles(args: &Args) -> Result<u8> {
    let puzzles: Vec<PathBuf> = selected_puzzles(args)?;
    let mut fixed: usize = 0;
    let mut failed: usize = 0;

    for path in &puzzles {
        match verify::fix_puzzle(path, args.dry_run) {
            Ok(FixOutcome::AlreadyOptimal) => debug!("{}: already optimal", path.display()),
            Ok(outcome @ (FixOutcome::Fixed { .. } | FixOutcome::WouldFix { .. })) => {
                println!("{}: {outcome}", path.display());
                fixed += 1;
            }
            Ok(outcome @ FixOutcome::CannotFix(_)) => {
                println!("{}: {outcome}", path.display());
                failed += 1;
            }
            Err(e) => {
                error!("{}: {e}", path.display());
                failed += 1;
            }
        }
    }

    let verb: &str = if args.dry_run { "Would fix" } else { "Fixed" };
    println!("\n{verb} {fixed} of {} puzzles ({failed} failures)", puzzles.len());
    Ok(if failed > 0 { 1 } else { 0 })
}
