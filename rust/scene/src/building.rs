// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The two-storey building as an ordered list of fill operations.
//!
//! Order matters: fog is painted first, walls and slabs over it, then
//! bridge doors and stair wells are carved back out as free space, and
//! stairs and partitions go in last.

use nalgebra::{Point3, Vector3};
use tracing::info;
use voxnav_core::{CellState, FillOp, Result, VoxelGrid};

use crate::layout::BuildingLayout;

/// Axis-aligned footprint relative to a wing anchor: `(dx, dy, width, depth)`.
type Rect = (f64, f64, f64, f64);

/// Which wing a table entry is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Wing {
    West,
    East,
}

const WEST_FLOOR1_PARTITIONS: &[Rect] = &[
    // server room 1
    (10.0, 10.0, 3.0, 1.0),
    (23.0, 10.0, 3.0, 1.0),
    (10.0, 1.0, 1.0, 4.0),
    (10.0, 7.0, 1.0, 4.0),
    (25.0, 1.0, 1.0, 9.0),
    // workbench
    (35.0, 1.0, 1.0, 9.0),
    (35.0, 10.0, 3.0, 1.0),
    (44.0, 1.0, 1.0, 8.0),
    // armory
    (49.0, 8.0, 10.0, 1.0),
    // server room 2
    (49.0, 15.0, 1.0, 20.0),
    (50.0, 26.0, 9.0, 1.0),
    (53.0, 15.0, 6.0, 1.0),
    (45.0, 34.0, 5.0, 1.0),
    // red room
    (1.0, 31.0, 5.0, 1.0),
    (8.0, 31.0, 1.0, 8.0),
    (5.0, 18.0, 1.0, 13.0),
    // gym
    (23.0, 31.0, 1.0, 8.0),
    (30.0, 31.0, 1.0, 1.0),
    (37.0, 31.0, 1.0, 8.0),
    (23.0, 22.0, 15.0, 1.0),
    // mission room
    (44.0, 29.0, 1.0, 10.0),
    (41.0, 31.0, 3.0, 1.0),
];

const EAST_FLOOR1_PARTITIONS: &[Rect] = &[
    // meeting rooms
    (5.0, 9.0, 1.0, 15.0),
    (15.0, 9.0, 1.0, 6.0),
    (15.0, 18.0, 1.0, 6.0),
    (20.0, 9.0, 1.0, 6.0),
    (20.0, 18.0, 1.0, 6.0),
    (30.0, 9.0, 1.0, 15.0),
    (5.0, 9.0, 4.0, 1.0),
    (12.0, 9.0, 4.0, 1.0),
    (20.0, 9.0, 4.0, 1.0),
    (27.0, 9.0, 4.0, 1.0),
    (1.0, 24.0, 15.0, 1.0),
    (20.0, 24.0, 11.0, 1.0),
    // stairwells
    (1.0, 17.0, 4.0, 1.0),
    (31.0, 17.0, 4.0, 1.0),
    // offices
    (5.0, 25.0, 1.0, 4.0),
    (5.0, 32.0, 1.0, 4.0),
    (15.0, 25.0, 1.0, 11.0),
    (5.0, 36.0, 11.0, 1.0),
    // washrooms
    (1.0, 40.0, 6.0, 1.0),
    (7.0, 40.0, 1.0, 10.0),
    (7.0, 52.0, 1.0, 3.0),
    // archive
    (15.0, 45.0, 5.0, 1.0),
    (23.0, 45.0, 2.0, 1.0),
    (14.0, 45.0, 1.0, 10.0),
    // equipment rooms
    (26.0, 48.0, 9.0, 1.0),
    (25.0, 42.0, 1.0, 7.0),
    (25.0, 27.0, 1.0, 12.0),
    (29.0, 37.0, 6.0, 1.0),
    (26.0, 29.0, 9.0, 1.0),
];

const WEST_FLOOR2_PARTITIONS: &[Rect] = &[
    // glass partition
    (10.0, 12.0, 34.0, 1.0),
    (44.0, 12.0, 1.0, 23.0),
    (10.0, 28.0, 14.0, 1.0),
    (37.0, 28.0, 7.0, 1.0),
    (23.0, 23.0, 1.0, 5.0),
    (23.0, 22.0, 15.0, 1.0),
    (37.0, 23.0, 1.0, 5.0),
    (10.0, 13.0, 1.0, 15.0),
    // switch room
    (24.0, 28.0, 11.0, 1.0),
    (27.0, 25.0, 1.0, 3.0),
    (33.0, 23.0, 1.0, 3.0),
    // chassis room
    (38.0, 34.0, 4.0, 1.0),
    (37.0, 29.0, 1.0, 6.0),
    // stairwell 2
    (45.0, 26.0, 4.0, 1.0),
    (49.0, 26.0, 1.0, 9.0),
    // bridge corridor extension
    (49.0, 22.0, 10.0, 1.0),
    (49.0, 16.0, 10.0, 1.0),
    (49.0, 17.0, 1.0, 5.0),
    // washroom 1
    (1.0, 12.0, 4.0, 1.0),
    (5.0, 7.0, 1.0, 21.0),
    (6.0, 7.0, 3.0, 1.0),
    (8.0, 1.0, 1.0, 2.0),
    (8.0, 5.0, 1.0, 2.0),
    // washroom 2
    (15.0, 1.0, 1.0, 2.0),
    (15.0, 5.0, 1.0, 2.0),
    (15.0, 7.0, 8.0, 1.0),
    (23.0, 1.0, 1.0, 9.0),
    // command room
    (37.0, 3.0, 1.0, 9.0),
    // monitoring room
    (38.0, 5.0, 7.0, 1.0),
    (44.0, 6.0, 1.0, 2.0),
    (44.0, 10.0, 1.0, 2.0),
    // server room
    (49.0, 6.0, 1.0, 7.0),
    (50.0, 12.0, 9.0, 1.0),
    (49.0, 5.0, 6.0, 1.0),
    (54.0, 1.0, 1.0, 4.0),
    // lift and kitchen
    (1.0, 33.0, 10.0, 1.0),
    (10.0, 36.0, 1.0, 3.0),
    (13.0, 33.0, 20.0, 1.0),
    (22.0, 36.0, 1.0, 3.0),
    (32.0, 34.0, 1.0, 5.0),
    // maintenance room
    (53.0, 29.0, 1.0, 8.0),
    (53.0, 28.0, 6.0, 1.0),
];

const EAST_FLOOR2_PARTITIONS: &[Rect] = &[
    // maintenance room
    (6.0, 50.0, 4.0, 1.0),
    (13.0, 50.0, 4.0, 1.0),
    (6.0, 36.0, 1.0, 3.0),
    (6.0, 44.0, 1.0, 6.0),
    (6.0, 35.0, 4.0, 1.0),
    (13.0, 35.0, 4.0, 1.0),
    (16.0, 36.0, 1.0, 14.0),
    // darkroom
    (20.0, 36.0, 1.0, 14.0),
    (20.0, 50.0, 4.0, 1.0),
    (27.0, 50.0, 4.0, 1.0),
    (20.0, 35.0, 11.0, 1.0),
    (30.0, 36.0, 1.0, 14.0),
    // manager's office
    (10.0, 28.0, 2.0, 1.0),
    (10.0, 18.0, 2.0, 1.0),
    (14.0, 18.0, 13.0, 1.0),
    (18.0, 21.0, 1.0, 7.0),
    (14.0, 28.0, 13.0, 1.0),
    (10.0, 10.0, 1.0, 18.0),
    (26.0, 10.0, 1.0, 18.0),
    (10.0, 9.0, 17.0, 1.0),
    // stairwells and balcony
    (30.0, 8.0, 5.0, 1.0),
    (26.0, 8.0, 2.0, 1.0),
    (1.0, 8.0, 5.0, 1.0),
    (9.0, 8.0, 2.0, 1.0),
    (30.0, 9.0, 1.0, 9.5),
    (29.0, 17.5, 1.0, 1.0),
    (27.0, 21.0, 4.0, 1.0),
    (5.0, 9.0, 1.0, 9.5),
];

/// Holes in the floor 2 slab: stair wells and the glazed atrium.
const SLAB_OPENINGS: &[(Wing, Rect)] = &[
    (Wing::West, (1.0, 13.0, 4.0, 15.0)),
    (Wing::West, (45.0, 27.0, 4.0, 8.0)),
    (Wing::East, (1.0, 9.0, 4.0, 8.0)),
    (Wing::East, (31.0, 9.0, 4.0, 8.0)),
    (Wing::West, (11.0, 13.0, 12.0, 15.0)),
    (Wing::West, (38.0, 13.0, 6.0, 15.0)),
    (Wing::West, (23.0, 13.0, 15.0, 9.0)),
];

/// Staircases from floor 1 to floor 2: `(wing, dx, dy, tread width, tread depth)`.
const STAIRCASES: &[(Wing, f64, f64, f64, f64)] = &[
    (Wing::West, 1.0, 20.0, 4.0, 2.5),
    (Wing::West, 45.0, 29.0, 4.0, 0.5),
    (Wing::East, 1.0, 9.0, 4.0, 4.0),
    (Wing::East, 31.0, 9.0, 4.0, 4.0),
];

/// Ordered fill operations for the whole building.
pub fn building_ops(layout: &BuildingLayout) -> Vec<FillOp> {
    let mut ops = Vec::new();

    // Ground base slab across the whole grid footprint
    ops.push(FillOp::fill(
        [0.0, 0.0, 0.0],
        [
            layout.grid_dimensions[0],
            layout.grid_dimensions[1],
            layout.base_thickness,
        ],
        CellState::Slab,
    ));

    let west = layout.west_anchor();
    let east = layout.east_anchor();
    push_wing(&mut ops, layout, west, layout.west_width, layout.west_depth);
    push_wing(&mut ops, layout, east, layout.east_width, layout.east_depth);

    for bridge in &layout.bridges {
        push_bridge(&mut ops, layout, bridge.offset_from_top, bridge.clear_width);
    }

    if layout.include_interiors {
        let anchor = |wing: Wing| match wing {
            Wing::West => west,
            Wing::East => east,
        };

        let slab_z = layout.floor2_elevation;
        for (wing, rect) in SLAB_OPENINGS {
            ops.push(rect_op(anchor(*wing), *rect, slab_z, layout.slab_thickness, CellState::Free));
        }

        for (wing, dx, dy, w, d) in STAIRCASES {
            let [ax, ay] = anchor(*wing);
            ops.push(FillOp::stairs(
                [ax + dx, ay + dy, layout.floor1_height()],
                [*w, *d, voxnav_core::STEP_HEIGHT],
                layout.stair_rise,
            ));
        }

        let f1 = layout.floor1_height();
        let f2 = layout.floor2_elevation;
        let h = layout.partition_height;
        push_partitions(&mut ops, west, WEST_FLOOR1_PARTITIONS, f1, h);
        push_partitions(&mut ops, east, EAST_FLOOR1_PARTITIONS, f1, h);
        push_partitions(&mut ops, west, WEST_FLOOR2_PARTITIONS, f2, h);
        push_partitions(&mut ops, east, EAST_FLOOR2_PARTITIONS, f2, h);
    }

    ops
}

/// Build a grid for `layout` and paint the building into it.
pub fn build_building(layout: &BuildingLayout) -> Result<VoxelGrid> {
    let ops = building_ops(layout);
    build_from_ops(layout, &ops)
}

/// Build a grid for `layout` and apply a precomputed op list.
pub fn build_from_ops(layout: &BuildingLayout, ops: &[FillOp]) -> Result<VoxelGrid> {
    let mut grid = VoxelGrid::new(Vector3::from(layout.grid_dimensions), layout.resolution)?;
    grid.set_markers(Point3::from(layout.start), Point3::from(layout.goal));
    let written = grid.apply_all(ops)?;

    let shape = grid.shape();
    info!(
        nx = shape.nx,
        ny = shape.ny,
        nz = shape.nz,
        ops = ops.len(),
        cells_written = written,
        "building painted"
    );
    Ok(grid)
}

/// Fog interior, four envelope walls and the floor 2 slab of one wing.
fn push_wing(ops: &mut Vec<FillOp>, layout: &BuildingLayout, anchor: [f64; 2], w: f64, d: f64) {
    let [x, y] = anchor;
    let h = layout.total_height;
    let t = layout.wall_thickness;
    let base = layout.base_thickness;

    ops.push(FillOp::fill([x, y, base], [w, d, h - base], CellState::Unknown));
    ops.push(FillOp::fill([x, y, 0.0], [w, t, h], CellState::PerimeterWall));
    ops.push(FillOp::fill([x, y + d - t, 0.0], [w, t, h], CellState::PerimeterWall));
    ops.push(FillOp::fill([x, y, 0.0], [t, d, h], CellState::PerimeterWall));
    ops.push(FillOp::fill([x + w - t, y, 0.0], [t, d, h], CellState::PerimeterWall));
    ops.push(FillOp::fill(
        [x, y, layout.floor2_elevation],
        [w, d, layout.slab_thickness],
        CellState::Slab,
    ));
}

/// Bridge deck, two railings and the doors cut through both wing walls.
fn push_bridge(ops: &mut Vec<FillOp>, layout: &BuildingLayout, offset: f64, clear: f64) {
    let t = layout.wall_thickness;
    let x = layout.base_x + layout.west_width;
    let y = layout.top_y() - offset;
    let z = layout.floor2_elevation;
    let deck_top = z + layout.slab_thickness;

    ops.push(FillOp::fill(
        [x, y - t, z],
        [layout.gap, clear + 2.0 * t, layout.slab_thickness],
        CellState::Slab,
    ));
    ops.push(FillOp::fill(
        [x, y - t, deck_top],
        [layout.gap, t, layout.railing_height],
        CellState::PerimeterWall,
    ));
    ops.push(FillOp::fill(
        [x, y + clear, deck_top],
        [layout.gap, t, layout.railing_height],
        CellState::PerimeterWall,
    ));

    let door = [t, clear, layout.bridge_door_height];
    ops.push(FillOp::fill([x - t, y, deck_top], door, CellState::Free));
    ops.push(FillOp::fill([layout.east_x(), y, deck_top], door, CellState::Free));
}

fn push_partitions(ops: &mut Vec<FillOp>, anchor: [f64; 2], rects: &[Rect], z: f64, h: f64) {
    ops.extend(
        rects
            .iter()
            .map(|rect| rect_op(anchor, *rect, z, h, CellState::InteriorWall)),
    );
}

fn rect_op(anchor: [f64; 2], rect: Rect, z: f64, h: f64, state: CellState) -> FillOp {
    let (dx, dy, w, d) = rect;
    FillOp::fill([anchor[0] + dx, anchor[1] + dy, z], [w, d, h], state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_op_counts() {
        let layout = BuildingLayout::default();
        let ops = building_ops(&layout);
        let partitions = WEST_FLOOR1_PARTITIONS.len()
            + EAST_FLOOR1_PARTITIONS.len()
            + WEST_FLOOR2_PARTITIONS.len()
            + EAST_FLOOR2_PARTITIONS.len();
        // base + 2 wings * 6 + 2 bridges * 5 + openings + stairs + partitions
        let expected = 1 + 12 + 10 + SLAB_OPENINGS.len() + STAIRCASES.len() + partitions;
        assert_eq!(ops.len(), expected);
    }

    #[test]
    fn test_shell_only_skips_interiors() {
        let layout = BuildingLayout {
            include_interiors: false,
            ..Default::default()
        };
        let ops = building_ops(&layout);
        assert_eq!(ops.len(), 1 + 12 + 10);
        assert!(ops
            .iter()
            .all(|op| !matches!(op, FillOp::Staircase { .. })));
    }

    #[test]
    fn test_base_slab_first() {
        let ops = building_ops(&BuildingLayout::default());
        assert_eq!(
            ops[0],
            FillOp::fill([0.0, 0.0, 0.0], [130.0, 80.0, 1.0], CellState::Slab)
        );
    }
}
