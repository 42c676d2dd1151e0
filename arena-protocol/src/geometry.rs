// Copyright (C) 2026 StarHuntingGames
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Angle and distance helpers for bots. Rotations are degrees measured
//! counter-clockwise from the positive x axis.

use crate::messages::{Position, Rotation};

const ROTATION_EPSILON: f64 = 1e-6;

/// Map any rotation into `[0, 360)`.
pub fn normalize_rotation(rotation: Rotation) -> Rotation {
    let normalized = rotation.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if normalized >= 360.0 { 0.0 } else { normalized }
}

/// Compare two rotations after normalizing both.
pub fn rotations_equal(a: Rotation, b: Rotation) -> bool {
    let delta = (normalize_rotation(a) - normalize_rotation(b)).abs();
    delta < ROTATION_EPSILON || (360.0 - delta) < ROTATION_EPSILON
}

/// Heading that points from `from` towards `to`, in `[0, 360)`.
pub fn rotation_between(from: Position, to: Position) -> Rotation {
    let degrees = (to.y - from.y).atan2(to.x - from.x).to_degrees();
    normalize_rotation(degrees)
}

pub fn distance(a: Position, b: Position) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}
