// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Building layout parameters.
//!
//! Two rectangular wings (west and east) separated by a courtyard gap and
//! joined on the upper floor by covered bridges. Storey heights:
//! - base slab: z = 0..1
//! - floor 1:   z = 1..6
//! - floor 2:   slab z = 6..7, room space z = 7..12

use serde::{Deserialize, Serialize};

/// Second-floor bridge between the two wings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Distance from the north edge (`top_y`) to the bridge's clear span
    pub offset_from_top: f64,
    /// Clear walking width between the railings
    pub clear_width: f64,
}

/// Geometry of the default two-storey building.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildingLayout {
    /// Grid extent (width, depth, height) in meters
    pub grid_dimensions: [f64; 3],
    /// Voxel edge length in meters
    pub resolution: f64,

    /// West wing footprint
    pub west_width: f64,
    pub west_depth: f64,
    /// East wing footprint
    pub east_width: f64,
    pub east_depth: f64,
    /// Courtyard gap between the wings
    pub gap: f64,
    /// South-west corner of the east wing's y range and the west wing's x
    pub base_x: f64,
    pub base_y: f64,

    /// Top of the building envelope
    pub total_height: f64,
    /// Thickness of the ground base slab
    pub base_thickness: f64,
    /// Height of the floor 2 slab's underside
    pub floor2_elevation: f64,
    /// Slab thickness between storeys
    pub slab_thickness: f64,
    /// Height of partition walls on each storey
    pub partition_height: f64,
    /// Thickness of walls and railings
    pub wall_thickness: f64,
    /// Railing height on the bridges
    pub railing_height: f64,
    /// Height of the door openings cut where bridges meet the wings
    pub bridge_door_height: f64,

    /// Rise of each staircase (floor 1 to floor 2 walking height)
    pub stair_rise: f64,

    pub bridges: Vec<BridgeConfig>,

    /// Paint interior partitions, slab openings and stairs
    pub include_interiors: bool,

    /// Navigation start marker
    pub start: [f64; 3],
    /// Navigation goal marker
    pub goal: [f64; 3],
}

impl Default for BuildingLayout {
    fn default() -> Self {
        Self {
            grid_dimensions: [130.0, 80.0, 30.0],
            resolution: 0.5,
            west_width: 60.0,
            west_depth: 40.0,
            east_width: 36.0,
            east_depth: 56.0,
            gap: 8.0,
            base_x: 10.0,
            base_y: 12.0,
            total_height: 12.0,
            base_thickness: 1.0,
            floor2_elevation: 6.0,
            slab_thickness: 1.0,
            partition_height: 5.0,
            wall_thickness: 1.0,
            railing_height: 2.0,
            bridge_door_height: 4.0,
            stair_rise: 6.0,
            bridges: vec![
                BridgeConfig {
                    offset_from_top: 17.0,
                    clear_width: 5.0,
                },
                BridgeConfig {
                    offset_from_top: 27.0,
                    clear_width: 3.0,
                },
            ],
            include_interiors: true,
            start: [20.0, 30.0, 1.0],
            goal: [110.0, 40.0, 7.0],
        }
    }
}

impl BuildingLayout {
    /// Northern edge shared by both wings.
    #[inline]
    pub fn top_y(&self) -> f64 {
        self.base_y + self.east_depth
    }

    /// Southern edge of the west wing.
    #[inline]
    pub fn west_y(&self) -> f64 {
        self.top_y() - self.west_depth
    }

    /// Western edge of the east wing.
    #[inline]
    pub fn east_x(&self) -> f64 {
        self.base_x + self.west_width + self.gap
    }

    /// Anchor (south-west corner) of the west wing.
    #[inline]
    pub fn west_anchor(&self) -> [f64; 2] {
        [self.base_x, self.west_y()]
    }

    /// Anchor (south-west corner) of the east wing.
    #[inline]
    pub fn east_anchor(&self) -> [f64; 2] {
        [self.east_x(), self.base_y]
    }

    /// Walking height of floor 1.
    #[inline]
    pub fn floor1_height(&self) -> f64 {
        self.base_thickness
    }

    /// Walking height of floor 2.
    #[inline]
    pub fn floor2_height(&self) -> f64 {
        self.floor2_elevation + self.slab_thickness
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_anchors() {
        let layout = BuildingLayout::default();
        assert_eq!(layout.top_y(), 68.0);
        assert_eq!(layout.west_y(), 28.0);
        assert_eq!(layout.east_x(), 78.0);
        assert_eq!(layout.west_anchor(), [10.0, 28.0]);
        assert_eq!(layout.east_anchor(), [78.0, 12.0]);
        assert_eq!(layout.floor2_height(), 7.0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let layout: BuildingLayout =
            serde_json::from_str(r#"{"resolution": 0.25, "include_interiors": false}"#).unwrap();
        assert_eq!(layout.resolution, 0.25);
        assert!(!layout.include_interiors);
        assert_eq!(layout.west_width, 60.0);
        assert_eq!(layout.bridges.len(), 2);
    }
}
