// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Box-fill and staircase invariants exercised through the public API.

use voxnav_core::{CellState, Point3, Vector3, VoxelGrid, VoxelIndex, STEP_HEIGHT};

fn grid(w: f64, d: f64, h: f64) -> VoxelGrid {
    VoxelGrid::new(Vector3::new(w, d, h), 0.5).unwrap()
}

#[test]
fn clipped_fill_never_leaves_grid() {
    let mut g = grid(10.0, 8.0, 6.0);
    let shape = g.shape();

    let report = g
        .fill_box(
            Point3::new(8.0, 6.0, 4.0),
            Vector3::new(50.0, 50.0, 50.0),
            CellState::PerimeterWall,
        )
        .unwrap();

    // x: 16..20, y: 12..16, z: 8..12
    assert_eq!(report.region.start, [16, 12, 8]);
    assert_eq!(report.region.end, [shape.nx, shape.ny, shape.nz]);
    assert_eq!(report.cells_written, 4 * 4 * 4);
    assert_eq!(g.count(CellState::PerimeterWall), 64);

    // Every written cell lies inside the clipped region
    for (idx, state) in g.iter() {
        if state == CellState::PerimeterWall {
            assert!(report.region.contains(idx));
        }
    }
}

#[test]
fn fill_entirely_outside_writes_nothing() {
    let mut g = grid(4.0, 4.0, 4.0);
    let report = g
        .fill_box(
            Point3::new(100.0, 0.0, 0.0),
            Vector3::new(2.0, 2.0, 2.0),
            CellState::Slab,
        )
        .unwrap();
    assert_eq!(report.cells_written, 0);
    assert_eq!(g.count(CellState::Unknown), g.shape().len());
}

#[test]
fn later_fill_wins_on_overlap() {
    let mut g = grid(10.0, 10.0, 10.0);
    g.fill_box(
        Point3::new(0.0, 0.0, 0.0),
        Vector3::new(4.0, 4.0, 4.0),
        CellState::InteriorWall,
    )
    .unwrap();
    g.fill_box(
        Point3::new(2.0, 2.0, 2.0),
        Vector3::new(4.0, 4.0, 4.0),
        CellState::Slab,
    )
    .unwrap();

    // Intersection [4,8)^3 is Slab
    assert_eq!(g.get(VoxelIndex::new(4, 4, 4)), Some(CellState::Slab));
    assert_eq!(g.get(VoxelIndex::new(7, 7, 7)), Some(CellState::Slab));
    // Only in the first fill: still InteriorWall
    assert_eq!(g.get(VoxelIndex::new(0, 0, 0)), Some(CellState::InteriorWall));
    assert_eq!(g.get(VoxelIndex::new(3, 7, 7)), Some(CellState::InteriorWall));

    assert_eq!(g.count(CellState::Slab), 8 * 8 * 8);
    assert_eq!(g.count(CellState::InteriorWall), 8 * 8 * 8 - 4 * 4 * 4);
}

#[test]
fn aligned_origin_maps_exactly() {
    let mut g = grid(20.0, 20.0, 20.0);
    for (i, origin) in [0.0, 0.5, 1.0, 3.5, 7.0, 12.5].iter().enumerate() {
        let report = g
            .fill_box(
                Point3::new(*origin, *origin, *origin),
                Vector3::new(1.0, 1.0, 1.0),
                CellState::ALL[2 + i % 4],
            )
            .unwrap();
        let expected = (*origin / 0.5) as usize;
        assert_eq!(report.region.start, [expected; 3]);
        assert_eq!(report.region.end, [expected + 2; 3]);
    }
}

#[test]
fn staircase_stacks_twelve_treads() {
    let mut g = grid(20.0, 20.0, 12.0);
    let origin = Point3::new(2.0, 3.0, 1.0);
    let reports = g
        .fill_staircase(origin, Vector3::new(4.0, 2.5, 0.5), 6.0)
        .unwrap();

    assert_eq!(reports.len(), 12);
    for (i, r) in reports.iter().enumerate() {
        let offset = (i as f64 * STEP_HEIGHT / 0.5) as usize;
        assert_eq!(r.region.start, [4, 6 + offset, 2 + offset]);
        assert_eq!(r.region.end, [12, 6 + offset + 5, 2 + offset + 1]);
    }

    // Top tread surface lands at the 2F walking height (1.0 + 6.0)
    let top = reports.last().unwrap();
    assert_eq!(top.region.end[2] as f64 * 0.5, 7.0);
}

#[test]
fn staircase_partial_rise_truncates() {
    let mut g = grid(10.0, 10.0, 10.0);
    let reports = g
        .fill_staircase(Point3::origin(), Vector3::new(1.0, 0.5, 0.5), 1.9)
        .unwrap();
    assert_eq!(reports.len(), 3);
    let none = g
        .fill_staircase(Point3::origin(), Vector3::new(1.0, 0.5, 0.5), 0.4)
        .unwrap();
    assert!(none.is_empty());
}

#[test]
fn staircase_ignores_step_height_component() {
    let mut g = grid(10.0, 10.0, 10.0);
    g.fill_staircase(Point3::origin(), Vector3::new(0.5, 0.5, 9.0), 1.0)
        .unwrap();
    // Two treads, one voxel each
    assert_eq!(g.count(CellState::StairTread), 2);
    assert_eq!(g.get(VoxelIndex::new(0, 0, 0)), Some(CellState::StairTread));
    assert_eq!(g.get(VoxelIndex::new(0, 1, 1)), Some(CellState::StairTread));
}
