// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fixed state-to-color palette.

use serde::{Deserialize, Serialize};
use voxnav_core::CellState;

/// Linear RGB color with components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    #[inline]
    pub const fn gray(v: f32) -> Self {
        Self::new(v, v, v)
    }

    #[inline]
    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

pub const DARK_GRAY: Rgb = Rgb::gray(0.25);
pub const BROWN: Rgb = Rgb::new(0.6, 0.4, 0.2);
pub const LIGHT_GRAY: Rgb = Rgb::gray(0.75);
pub const PURPLE: Rgb = Rgb::new(0.6, 0.2, 0.8);
pub const WHITE: Rgb = Rgb::gray(1.0);

/// Start marker color
pub const START_GREEN: Rgb = Rgb::new(0.2, 0.8, 0.2);
/// Goal marker color
pub const GOAL_RED: Rgb = Rgb::new(0.9, 0.1, 0.1);
/// Viewer background
pub const BACKGROUND: Rgb = Rgb::gray(0.05);

/// Color of a visible voxel. Depends only on its state.
#[inline]
pub fn color_for(state: CellState) -> Rgb {
    match state {
        CellState::PerimeterWall => DARK_GRAY,
        CellState::InteriorWall => BROWN,
        CellState::Slab => LIGHT_GRAY,
        CellState::StairTread => PURPLE,
        // Empty space never reaches coloring
        CellState::Unknown | CellState::Free => WHITE,
    }
}
