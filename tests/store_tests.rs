//! Persistence and verification tests.
//!
//! Every test works in its own temporary directory.

use chrono::NaiveDate;
use daily_tsp::config::GridConfig;
use daily_tsp::generator::difficulty::Difficulty;
use daily_tsp::generator::geometry::{House, Point};
use daily_tsp::generator::sampler::GeometrySampler;
use daily_tsp::generator::tour::Tour;
use daily_tsp::puzzle::{self, PuzzleRecord};
use daily_tsp::saver::puzzle::{PuzzleStore, difficulty_from_path, write_record};
use daily_tsp::verify::{self, FixOutcome, Method};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 12, 24).unwrap()
}

/// Depot in the middle of four houses, stored with a route that crosses itself.
fn suboptimal_puzzle() -> PuzzleRecord {
    let north_pole = Point::new(500, 500);
    let houses = vec![
        House::new(1, Point::new(600, 500)),
        House::new(2, Point::new(500, 600)),
        House::new(3, Point::new(400, 500)),
        House::new(4, Point::new(500, 400)),
    ];
    let route = puzzle::build_route(&Tour::closed([1, 3, 2, 4]), north_pole, &houses);
    PuzzleRecord {
        date: date(),
        north_pole,
        optimal_distance: puzzle::route_distance(&route),
        houses,
        optimal_route: route,
    }
}

#[test]
fn save_and_load() {
    let dir = TempDir::new().unwrap();
    let store = PuzzleStore::new(dir.path().to_path_buf());
    let puzzle = puzzle::generate(date(), Difficulty::Easy, &GridConfig::default(), 1).unwrap();

    let (puzzle_path, solution_path) = store.save(Difficulty::Easy, &puzzle).unwrap();
    assert_eq!(puzzle_path, dir.path().join("2025/12/24_easy.json"));
    assert_eq!(solution_path, dir.path().join("2025/12/24_easy_solution.json"));

    assert_eq!(PuzzleStore::load_puzzle(&puzzle_path).unwrap(), puzzle);
    assert_eq!(
        PuzzleStore::load_solution(&solution_path).unwrap(),
        Some(puzzle.solution())
    );
    assert_eq!(
        PuzzleStore::load_solution(&dir.path().join("missing_solution.json")).unwrap(),
        None
    );
}

#[test]
fn json_layout() {
    let dir = TempDir::new().unwrap();
    let store = PuzzleStore::new(dir.path().to_path_buf());
    let puzzle = puzzle::generate(date(), Difficulty::Easy, &GridConfig::default(), 2).unwrap();
    let (puzzle_path, solution_path) = store.save(Difficulty::Easy, &puzzle).unwrap();

    let text = fs::read_to_string(&puzzle_path).unwrap();
    assert!(text.starts_with("{\n  \"date\": \"2025-12-24\""));

    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(json["north_pole"]["x"], 500);
    assert_eq!(json["north_pole"]["y"], 500);
    assert_eq!(json["houses"].as_array().unwrap().len(), 12);
    assert_eq!(json["houses"][0]["id"], 1);
    assert!(json["optimal_distance"].is_f64());

    let route = json["optimal_route"].as_array().unwrap();
    assert_eq!(route.len(), 14);
    assert_eq!(route[0]["type"], "north_pole");
    assert_eq!(route[13]["type"], "north_pole");
    assert!(route[1..13].iter().all(|w| w["type"] == "house"));

    let solution: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&solution_path).unwrap()).unwrap();
    assert_eq!(solution["date"], "2025-12-24");
    assert_eq!(solution["route"], json["optimal_route"]);
    assert_eq!(solution["optimal_distance"], json["optimal_distance"]);
}

#[test]
fn same_seed_same_bytes() {
    let a = TempDir::new().unwrap();
    let b = TempDir::new().unwrap();
    let seed = puzzle::puzzle_seed(date(), None);

    for dir in [&a, &b] {
        let store = PuzzleStore::new(dir.path().to_path_buf());
        let puzzle =
            puzzle::generate(date(), Difficulty::Medium, &GridConfig::default(), seed).unwrap();
        store.save(Difficulty::Medium, &puzzle).unwrap();
    }

    let name = "2025/12/24_medium.json";
    assert_eq!(
        fs::read(a.path().join(name)).unwrap(),
        fs::read(b.path().join(name)).unwrap()
    );
}

#[test]
fn difficulty_levels_differ() {
    let grid = GridConfig::default();
    let easy = puzzle::generate(date(), Difficulty::Easy, &grid, 3).unwrap();
    let medium = puzzle::generate(date(), Difficulty::Medium, &grid, 3).unwrap();
    assert_eq!(easy.houses.len(), 12);
    assert_eq!(medium.houses.len(), 14);
}

#[test]
fn list_puzzles() {
    let dir = TempDir::new().unwrap();
    let store = PuzzleStore::new(dir.path().to_path_buf());
    let mut puzzle = suboptimal_puzzle();
    store.save(Difficulty::Hard, &puzzle).unwrap();
    puzzle.date = NaiveDate::from_ymd_opt(2026, 1, 2).unwrap();
    store.save(Difficulty::Easy, &puzzle).unwrap();

    let listed = store.list_puzzles().unwrap();
    assert_eq!(
        listed,
        vec![
            dir.path().join("2025/12/24_hard.json"),
            dir.path().join("2026/01/02_easy.json"),
        ]
    );

    let levels: Vec<Option<Difficulty>> = listed.iter().map(|p| difficulty_from_path(p)).collect();
    assert_eq!(levels, vec![Some(Difficulty::Hard), Some(Difficulty::Easy)]);

    let empty = PuzzleStore::new(dir.path().join("nothing here"));
    assert!(empty.list_puzzles().unwrap().is_empty());
}

#[test]
fn generated_puzzle_verifies() {
    let dir = TempDir::new().unwrap();
    let store = PuzzleStore::new(dir.path().to_path_buf());
    let puzzle = puzzle::generate(date(), Difficulty::Easy, &GridConfig::default(), 4).unwrap();
    let (path, _) = store.save(Difficulty::Easy, &puzzle).unwrap();

    let v = verify::verify_puzzle(&path).unwrap();
    assert_eq!(v.method, Method::Exact);
    assert_eq!(v.num_houses, 12);
    assert_eq!(v.is_optimal(), Some(true));
    assert_eq!(v.route_matches_optimal(), Some(true));
    assert_eq!(verify::fix_puzzle(&path, false).unwrap(), FixOutcome::AlreadyOptimal);
}

#[test]
fn fix_suboptimal_puzzle() {
    let dir = TempDir::new().unwrap();
    let store = PuzzleStore::new(dir.path().to_path_buf());
    let bad = suboptimal_puzzle();
    let (path, solution_path) = store.save(Difficulty::Easy, &bad).unwrap();
    let optimum = 200.0 + 300.0 * 2f64.sqrt();

    let v = verify::verify_puzzle(&path).unwrap();
    assert_eq!(v.is_optimal(), Some(false));
    assert_eq!(v.route_matches_optimal(), Some(false));
    assert!((v.verified.unwrap() - optimum).abs() < 1e-6);

    // Dry run leaves the files alone
    let before = fs::read(&path).unwrap();
    let solution_before = fs::read(&solution_path).unwrap();
    match verify::fix_puzzle(&path, true).unwrap() {
        FixOutcome::WouldFix { old, new } => {
            assert_eq!(old, bad.optimal_distance);
            assert!((new - optimum).abs() < 1e-6);
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert_eq!(fs::read(&path).unwrap(), before);
    assert_eq!(fs::read(&solution_path).unwrap(), solution_before);

    match verify::fix_puzzle(&path, false).unwrap() {
        FixOutcome::Fixed { old, new } => assert!(new < old),
        other => panic!("unexpected outcome: {other:?}"),
    }
    let fixed = PuzzleStore::load_puzzle(&path).unwrap();
    assert_eq!(fixed.houses, bad.houses);
    assert!((puzzle::route_distance(&fixed.optimal_route) - optimum).abs() < 1e-6);
    let solution = PuzzleStore::load_solution(&solution_path).unwrap().unwrap();
    assert_eq!(solution.route, fixed.optimal_route);

    let v = verify::verify_puzzle(&path).unwrap();
    assert_eq!(v.is_optimal(), Some(true));
    assert_eq!(v.route_matches_optimal(), Some(true));
}

#[test]
fn fix_without_solution_file() {
    let dir = TempDir::new().unwrap();
    let path: PathBuf = dir.path().join("24_easy.json");
    write_record(&path, &suboptimal_puzzle()).unwrap();

    let v = verify::verify_puzzle(&path).unwrap();
    assert_eq!(v.route_distance, None);
    assert!(matches!(
        verify::fix_puzzle(&path, false).unwrap(),
        FixOutcome::Fixed { .. }
    ));
    assert!(!dir.path().join("24_easy_solution.json").exists());
}

#[test]
fn too_large_puzzle() {
    let dir = TempDir::new().unwrap();
    let positions = GeometrySampler::new(GridConfig::default(), 1, false).valid_positions();
    let houses: Vec<House> = positions
        .iter()
        .take(17)
        .enumerate()
        .map(|(i, p)| House::new(i as u32 + 1, *p))
        .collect();
    let puzzle = PuzzleRecord {
        date: date(),
        north_pole: Point::new(500, 500),
        houses,
        optimal_distance: 1000.0,
        optimal_route: Vec::new(),
    };
    let path = dir.path().join("24_hard.json");
    write_record(&path, &puzzle).unwrap();

    let v = verify::verify_puzzle(&path).unwrap();
    assert_eq!(v.method, Method::TooLarge);
    assert_eq!(v.is_optimal(), None);
    assert!(matches!(
        verify::fix_puzzle(&path, true).unwrap(),
        FixOutcome::CannotFix(_)
    ));
}
