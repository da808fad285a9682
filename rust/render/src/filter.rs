// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Grid-to-frame filtering.
//!
//! Walks every cell of a populated [`VoxelGrid`], applies the visibility
//! policy from [`crate::visibility`] and colors what survives. The pass is
//! read-only and has no cross-cell state, so x-slices are processed in
//! parallel and concatenated in index order.

use nalgebra::Point3;
#[cfg(not(target_arch = "wasm32"))]
use rayon::prelude::*;
use serde::Serialize;
use tracing::info;
use voxnav_core::{CellState, VoxelGrid, VoxelIndex};

use crate::color::{color_for, Rgb, GOAL_RED, START_GREEN};
use crate::visibility::{classify, HiddenReason, StoreyBands, Visibility, VisibilityConfig};

/// Radius of the start/goal markers in meters
pub const MARKER_RADIUS: f64 = 1.5;

/// One colored voxel handed to a renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RenderVoxel {
    /// Grid index of the voxel
    pub index: VoxelIndex,
    /// Metric center of the voxel
    pub position: Point3<f64>,
    pub color: Rgb,
    pub state: CellState,
}

/// Colored annotation point (start or goal).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Marker {
    pub position: Point3<f64>,
    pub color: Rgb,
    pub radius: f64,
}

/// Counters collected during a filter pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FilterStats {
    /// Solid cells examined
    pub scanned: usize,
    /// Cells emitted into the frame
    pub emitted: usize,
    pub hidden_perimeter: usize,
    pub hidden_base_slab: usize,
    pub hidden_floor1: usize,
    pub hidden_floor2: usize,
}

impl FilterStats {
    fn record(&mut self, visibility: Visibility) {
        match visibility {
            Visibility::Shown => {
                self.scanned += 1;
                self.emitted += 1;
            }
            Visibility::Hidden(HiddenReason::EmptySpace) => {}
            Visibility::Hidden(reason) => {
                self.scanned += 1;
                match reason {
                    HiddenReason::PerimeterToggle => self.hidden_perimeter += 1,
                    HiddenReason::BaseSlab => self.hidden_base_slab += 1,
                    HiddenReason::Floor1 => self.hidden_floor1 += 1,
                    HiddenReason::Floor2 => self.hidden_floor2 += 1,
                    HiddenReason::EmptySpace => {}
                }
            }
        }
    }

    fn merge(mut self, other: FilterStats) -> Self {
        self.scanned += other.scanned;
        self.emitted += other.emitted;
        self.hidden_perimeter += other.hidden_perimeter;
        self.hidden_base_slab += other.hidden_base_slab;
        self.hidden_floor1 += other.hidden_floor1;
        self.hidden_floor2 += other.hidden_floor2;
        self
    }

    /// Cells discarded by the visibility toggles.
    pub fn hidden(&self) -> usize {
        self.hidden_perimeter + self.hidden_base_slab + self.hidden_floor1 + self.hidden_floor2
    }
}

/// Everything a renderer needs to draw one pass.
#[derive(Debug, Clone, Serialize)]
pub struct RenderFrame {
    /// Visible voxels, ordered by grid index
    pub voxels: Vec<RenderVoxel>,
    pub start: Marker,
    pub goal: Marker,
    /// Voxel edge length (the grid resolution)
    pub voxel_size: f64,
    pub stats: FilterStats,
}

/// Result of a filter pass.
#[derive(Debug, Clone)]
pub enum FilterOutcome {
    /// At least one voxel survived
    Ready(RenderFrame),
    /// No voxel survived; the renderer should not be invoked
    NothingToRender(FilterStats),
}

impl FilterOutcome {
    pub fn stats(&self) -> FilterStats {
        match self {
            FilterOutcome::Ready(frame) => frame.stats,
            FilterOutcome::NothingToRender(stats) => *stats,
        }
    }

    pub fn frame(&self) -> Option<&RenderFrame> {
        match self {
            FilterOutcome::Ready(frame) => Some(frame),
            FilterOutcome::NothingToRender(_) => None,
        }
    }

    pub fn into_frame(self) -> Option<RenderFrame> {
        match self {
            FilterOutcome::Ready(frame) => Some(frame),
            FilterOutcome::NothingToRender(_) => None,
        }
    }
}

/// Turns an occupancy grid into a colored voxel frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct SceneRenderFilter {
    config: VisibilityConfig,
    bands: StoreyBands,
}

impl SceneRenderFilter {
    pub fn new(config: VisibilityConfig) -> Self {
        Self {
            config,
            bands: StoreyBands::default(),
        }
    }

    /// Override the floor band heights.
    pub fn with_bands(mut self, bands: StoreyBands) -> Self {
        self.bands = bands;
        self
    }

    pub fn config(&self) -> &VisibilityConfig {
        &self.config
    }

    pub fn bands(&self) -> &StoreyBands {
        &self.bands
    }

    /// Classify and color every solid cell of `grid`.
    pub fn filter(&self, grid: &VoxelGrid) -> FilterOutcome {
        let shape = grid.shape();

        #[cfg(not(target_arch = "wasm32"))]
        let slices: Vec<(Vec<RenderVoxel>, FilterStats)> = (0..shape.nx)
            .into_par_iter()
            .map(|x| self.filter_slice(grid, x))
            .collect();

        #[cfg(target_arch = "wasm32")]
        let slices: Vec<(Vec<RenderVoxel>, FilterStats)> = (0..shape.nx)
            .map(|x| self.filter_slice(grid, x))
            .collect();

        let total: usize = slices.iter().map(|(v, _)| v.len()).sum();
        let mut voxels = Vec::with_capacity(total);
        let mut stats = FilterStats::default();
        for (slice_voxels, slice_stats) in slices {
            voxels.extend(slice_voxels);
            stats = stats.merge(slice_stats);
        }

        info!(
            scanned = stats.scanned,
            emitted = stats.emitted,
            hidden = stats.hidden(),
            show_floor1 = self.config.show_floor1,
            show_floor2 = self.config.show_floor2,
            show_perimeter_wall = self.config.show_perimeter_wall,
            "filtered voxel grid"
        );

        if voxels.is_empty() {
            return FilterOutcome::NothingToRender(stats);
        }

        FilterOutcome::Ready(RenderFrame {
            voxels,
            start: Marker {
                position: grid.start(),
                color: START_GREEN,
                radius: MARKER_RADIUS,
            },
            goal: Marker {
                position: grid.goal(),
                color: GOAL_RED,
                radius: MARKER_RADIUS,
            },
            voxel_size: grid.resolution(),
            stats,
        })
    }

    fn filter_slice(&self, grid: &VoxelGrid, x: usize) -> (Vec<RenderVoxel>, FilterStats) {
        let shape = grid.shape();
        let resolution = grid.resolution();
        let mut voxels = Vec::new();
        let mut stats = FilterStats::default();
        let Some(slice) = grid.x_slice(x) else {
            return (voxels, stats);
        };

        for (offset, &state) in slice.iter().enumerate() {
            if !state.is_renderable() {
                continue;
            }
            let index = VoxelIndex::new(x, offset / shape.nz, offset % shape.nz);
            let visibility = classify(
                state,
                index.floor_height(resolution),
                &self.config,
                &self.bands,
            );
            stats.record(visibility);
            if visibility.is_shown() {
                voxels.push(RenderVoxel {
                    index,
                    position: index.center(resolution),
                    color: color_for(state),
                    state,
                });
            }
        }

        (voxels, stats)
    }
}

/// Filter `grid` with `config` and the default floor bands.
pub fn filter_grid(grid: &VoxelGrid, config: &VisibilityConfig) -> FilterOutcome {
    SceneRenderFilter::new(*config).filter(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use voxnav_core::{Point3, Vector3};

    fn column_grid() -> VoxelGrid {
        // 1x1 footprint, 12 m tall: base slab, 1F wall, 2F slab, perimeter cap
        let mut grid = VoxelGrid::new(Vector3::new(0.5, 0.5, 12.0), 0.5).unwrap();
        grid.fill_box(Point3::new(0.0, 0.0, 0.0), Vector3::new(0.5, 0.5, 1.0), CellState::Slab)
            .unwrap();
        grid.fill_box(
            Point3::new(0.0, 0.0, 1.0),
            Vector3::new(0.5, 0.5, 5.0),
            CellState::InteriorWall,
        )
        .unwrap();
        grid.fill_box(Point3::new(0.0, 0.0, 6.0), Vector3::new(0.5, 0.5, 1.0), CellState::Slab)
            .unwrap();
        grid.fill_box(
            Point3::new(0.0, 0.0, 11.0),
            Vector3::new(0.5, 0.5, 1.0),
            CellState::PerimeterWall,
        )
        .unwrap();
        grid
    }

    #[test]
    fn test_all_visible() {
        let outcome = filter_grid(&column_grid(), &VisibilityConfig::default());
        let frame = outcome.frame().unwrap();
        // 2 base + 10 wall + 2 slab + 2 perimeter
        assert_eq!(frame.voxels.len(), 16);
        assert_eq!(frame.stats.scanned, 16);
        assert_eq!(frame.stats.hidden(), 0);
        assert_relative_eq!(frame.voxel_size, 0.5);
    }

    #[test]
    fn test_voxel_positions_are_centers() {
        let outcome = filter_grid(&column_grid(), &VisibilityConfig::default());
        let frame = outcome.frame().unwrap();
        let first = frame.voxels[0];
        assert_eq!(first.index, VoxelIndex::new(0, 0, 0));
        assert_relative_eq!(first.position.x, 0.25);
        assert_relative_eq!(first.position.y, 0.25);
        assert_relative_eq!(first.position.z, 0.25);
        // Ordered by index
        assert!(frame.voxels.windows(2).all(|w| w[0].index < w[1].index));
    }

    #[test]
    fn test_hide_floor2_keeps_lower_cells() {
        let config = VisibilityConfig {
            show_floor2: false,
            ..Default::default()
        };
        let outcome = filter_grid(&column_grid(), &config);
        let frame = outcome.frame().unwrap();
        assert_eq!(frame.voxels.len(), 12);
        assert!(frame.voxels.iter().all(|v| v.index.floor_height(0.5) < 6.0));
        assert_eq!(frame.stats.hidden_floor2, 4);
    }

    #[test]
    fn test_hide_everything_reports_nothing() {
        let config = VisibilityConfig {
            show_floor1: false,
            show_floor2: false,
            show_perimeter_wall: true,
        };
        let outcome = filter_grid(&column_grid(), &config);
        assert!(outcome.frame().is_none());
        let stats = outcome.stats();
        assert_eq!(stats.emitted, 0);
        assert_eq!(stats.hidden_base_slab, 2);
        assert_eq!(stats.hidden_floor1, 10);
        assert_eq!(stats.hidden_floor2, 4);
    }

    #[test]
    fn test_markers_pass_through() {
        let mut grid = column_grid();
        grid.set_markers(Point3::new(0.1, 0.2, 0.3), Point3::new(0.4, 0.5, 0.6));
        let frame = filter_grid(&grid, &VisibilityConfig::default())
            .into_frame()
            .unwrap();
        assert_eq!(frame.start.position, Point3::new(0.1, 0.2, 0.3));
        assert_eq!(frame.goal.position, Point3::new(0.4, 0.5, 0.6));
        assert_eq!(frame.start.color, START_GREEN);
        assert_eq!(frame.goal.color, GOAL_RED);
    }

    #[test]
    fn test_custom_bands() {
        let filter = SceneRenderFilter::new(VisibilityConfig {
            show_floor2: false,
            ..Default::default()
        })
        .with_bands(StoreyBands {
            base_top: 1.0,
            floor2_elevation: 3.0,
        });
        let frame = filter.filter(&column_grid()).into_frame().unwrap();
        // base 2 + wall cells with z in [1, 3) = 4
        assert_eq!(frame.voxels.len(), 6);
    }
}
