/*
complexity.rs

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

//! Geometric complexity of a route.

use super::geometry::Point;

/// A turn is a direction change when the cosine between the two legs is below this value
/// (turns sharper than about 45 degrees).
pub const SHARP_TURN_COSINE: f64 = 0.7;

/// Score added for each direction change.
pub const DIRECTION_CHANGE_WEIGHT: f64 = 120.0;

/// Score added per unit of route length.
pub const LENGTH_WEIGHT: f64 = 0.05;

/// Score added per radian of standard deviation of the turn angles.
pub const ANGLE_SPREAD_WEIGHT: f64 = 80.0;

/// Legs shorter than this value have no direction.
const MIN_LEG_LENGTH: f64 = 1e-6;

/// Details of the complexity computation.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct RouteComplexity {
    /// Number of turns sharper than [`SHARP_TURN_COSINE`].
    pub direction_changes: usize,

    /// Length of the route.
    pub total_length: f64,

    /// Population standard deviation of the turn angles, in radians.
    pub angle_std_dev: f64,

    /// Weighted sum of the three previous values.
    pub score: f64,
}

/// Analyze the route given as an ordered list of coordinates.
///
/// Routes with fewer than three points have no turn and get a zero score.
pub fn analyze(route: &[Point]) -> RouteComplexity {
    if route.len() < 3 {
        return RouteComplexity::default();
    }

    let mut direction_changes: usize = 0;
    let mut total_length: f64 = 0.0;
    let mut angles: Vec<f64> = Vec::with_capacity(route.len());
    let mut previous: Option<(f64, f64)> = None;

    for leg in route.windows(2) {
        let dx: f64 = f64::from(leg[1].x - leg[0].x);
        let dy: f64 = f64::from(leg[1].y - leg[0].y);
        let length: f64 = dx.hypot(dy);
        total_length += length;

        if let Some((pdx, pdy)) = previous {
            let previous_length: f64 = pdx.hypot(pdy);
            if previous_length > MIN_LEG_LENGTH && length > MIN_LEG_LENGTH {
                let dot: f64 = ((pdx / previous_length) * (dx / length)
                    + (pdy / previous_length) * (dy / length))
                    .clamp(-1.0, 1.0);
                angles.push(dot.acos());
                if dot < SHARP_TURN_COSINE {
                    direction_changes += 1;
                }
            }
        }
        previous = Some((dx, dy));
    }

    let angle_std_dev: f64 = std_dev(&angles);
    let score: f64 = direction_changes as f64 * DIRECTION_CHANGE_WEIGHT
        + total_length * LENGTH_WEIGHT
        + angle_std_dev * ANGLE_SPREAD_WEIGHT;

    RouteComplexity {
        direction_changes,
        total_length,
        angle_std_dev,
        score,
    }
}

/// Complexity score of the route.
pub fn score(route: &[Point]) -> f64 {
    analyze(route).score
}

/// Population standard deviation, zero for an empty list.
fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let count: f64 = values.len() as f64;
    let mean: f64 = values.iter().sum::<f64>() / count;
    let variance: f64 = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / count;
    variance.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(points: &[(i32, i32)]) -> Vec<Point> {
        points.iter().map(|(x, y)| Point::new(*x, *y)).collect()
    }

    #[test]
    fn short_routes_score_zero() {
        assert_eq!(score(&[]), 0.0);
        assert_eq!(score(&route(&[(0, 0), (100, 0)])), 0.0);
    }

    #[test]
    fn straight_line_has_no_direction_change() {
        let c = analyze(&route(&[(0, 0), (100, 0), (200, 0)]));
        assert_eq!(c.direction_changes, 0);
        assert_eq!(c.total_length, 200.0);
        assert_eq!(c.angle_std_dev, 0.0);
        assert!((c.score - 10.0).abs() < 1e-9);
    }

    #[test]
    fn right_angle_is_a_direction_change() {
        let c = analyze(&route(&[(0, 0), (100, 0), (100, 100)]));
        assert_eq!(c.direction_changes, 1);
        assert!(c.score >= DIRECTION_CHANGE_WEIGHT);
    }

    #[test]
    fn round_trip_turns_back() {
        // Going out and back is a 180 degree turn
        let c = analyze(&route(&[(500, 500), (700, 500), (500, 500)]));
        assert_eq!(c.direction_changes, 1);
        assert!((c.score - (120.0 + 400.0 * 0.05)).abs() < 1e-9);
    }

    #[test]
    fn zero_length_legs_are_ignored() {
        let c = analyze(&route(&[(0, 0), (0, 0), (100, 0)]));
        assert_eq!(c.direction_changes, 0);
        assert_eq!(c.total_length, 100.0);
    }

    #[test]
    fn angle_spread() {
        // One 90 degree turn and one straight segment
        let c = analyze(&route(&[(0, 0), (100, 0), (100, 100), (100, 200)]));
        assert_eq!(c.direction_changes, 1);
        assert!((c.angle_std_dev - std::f64::consts::FRAC_PI_4).abs() < 1e-9);
    }
}
