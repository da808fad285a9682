// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Dense voxel occupancy grid.
//!
//! The grid is a single fixed-resolution 3D array. Architectural features
//! are painted into it with [`VoxelGrid::fill_box`], where later fills
//! overwrite earlier ones, so callers must apply fills in authoring order.

use nalgebra::{Point3, Vector3};
use tracing::trace;

use crate::coords::{point_to_index, size_to_extent, GridShape, IndexBox, VoxelIndex};
use crate::error::{Error, Result};
use crate::state::CellState;

/// Default voxel edge length in meters
pub const DEFAULT_RESOLUTION: f64 = 0.5;

/// Tread height used by [`VoxelGrid::fill_staircase`]
pub const STEP_HEIGHT: f64 = 0.5;

/// Result of a single box fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FillReport {
    /// Index box that was written, after clipping
    pub region: IndexBox,
    /// Number of cells overwritten
    pub cells_written: usize,
}

/// Dense 3D occupancy grid with a metric frame.
#[derive(Debug, Clone)]
pub struct VoxelGrid {
    resolution: f64,
    dimensions: Vector3<f64>,
    shape: GridShape,
    cells: Vec<CellState>,
    start: Point3<f64>,
    goal: Point3<f64>,
}

impl VoxelGrid {
    /// Create an all-`Unknown` grid covering `dimensions` at `resolution`.
    ///
    /// Fails if the resolution is not a positive finite number, any
    /// dimension is negative or not finite, or the cell count overflows.
    pub fn new(dimensions: Vector3<f64>, resolution: f64) -> Result<Self> {
        if !resolution.is_finite() || resolution <= 0.0 {
            return Err(Error::invalid(format!(
                "resolution must be positive and finite, got {}",
                resolution
            )));
        }
        check_non_negative("dimensions", &dimensions)?;

        let shape = GridShape::from_dimensions(&dimensions, resolution);
        let len = shape.checked_len().ok_or_else(|| {
            Error::invalid(format!(
                "grid too large: {} x {} x {} cells",
                shape.nx, shape.ny, shape.nz
            ))
        })?;
        Ok(Self {
            resolution,
            dimensions,
            shape,
            cells: vec![CellState::Unknown; len],
            start: Point3::new(20.0, 30.0, 1.0),
            goal: Point3::new(110.0, 40.0, 7.0),
        })
    }

    #[inline]
    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    #[inline]
    pub fn dimensions(&self) -> Vector3<f64> {
        self.dimensions
    }

    #[inline]
    pub fn shape(&self) -> GridShape {
        self.shape
    }

    #[inline]
    pub fn start(&self) -> Point3<f64> {
        self.start
    }

    #[inline]
    pub fn goal(&self) -> Point3<f64> {
        self.goal
    }

    /// Set the start and goal marker points. They are not grid-aligned.
    pub fn set_markers(&mut self, start: Point3<f64>, goal: Point3<f64>) {
        self.start = start;
        self.goal = goal;
    }

    /// State at `index`, or `None` outside the grid.
    #[inline]
    pub fn get(&self, index: VoxelIndex) -> Option<CellState> {
        if self.shape.contains(index) {
            Some(self.cells[self.shape.linear(index)])
        } else {
            None
        }
    }

    /// Metric center of the voxel at `index`.
    #[inline]
    pub fn index_to_center(&self, index: VoxelIndex) -> Point3<f64> {
        index.center(self.resolution)
    }

    /// Height of the voxel's lower face, used for floor banding.
    #[inline]
    pub fn index_floor_height(&self, index: VoxelIndex) -> f64 {
        index.floor_height(self.resolution)
    }

    /// Iterate over every cell with its index.
    pub fn iter(&self) -> impl Iterator<Item = (VoxelIndex, CellState)> + '_ {
        let shape = self.shape;
        self.cells
            .iter()
            .enumerate()
            .map(move |(offset, state)| (shape.unlinear(offset), *state))
    }

    /// One x-slice of the grid: the `ny * nz` cells with index `x`, in
    /// row-major order (z fastest). `None` when `x` is outside the grid.
    pub fn x_slice(&self, x: usize) -> Option<&[CellState]> {
        if x >= self.shape.nx {
            return None;
        }
        let stride = self.shape.ny * self.shape.nz;
        Some(&self.cells[x * stride..(x + 1) * stride])
    }

    /// Number of cells in each state, indexed by `CellState::as_u8`.
    pub fn state_histogram(&self) -> [usize; 6] {
        let mut counts = [0usize; 6];
        for state in &self.cells {
            counts[state.as_u8() as usize] += 1;
        }
        counts
    }

    /// Number of cells currently in `state`.
    pub fn count(&self, state: CellState) -> usize {
        self.state_histogram()[state.as_u8() as usize]
    }

    /// Overwrite an axis-aligned metric box with `state`.
    ///
    /// `origin` and `size` are converted to indices independently by
    /// truncating division. The end index is clamped to the grid shape, so
    /// boxes that extend past the grid are clipped and boxes entirely
    /// outside write nothing. Zero-size boxes are no-ops.
    pub fn fill_box(
        &mut self,
        origin: Point3<f64>,
        size: Vector3<f64>,
        state: CellState,
    ) -> Result<FillReport> {
        check_finite_point("origin", &origin)?;
        check_non_negative("size", &size)?;

        let start = point_to_index(&origin, self.resolution);
        let extent = size_to_extent(&size, self.resolution);
        let region = IndexBox::clipped(start, extent, self.shape);

        if region.is_empty() {
            trace!(?start, ?extent, %state, "fill_box clipped to nothing");
            return Ok(FillReport {
                region,
                cells_written: 0,
            });
        }

        let [x0, y0, z0] = region.start;
        let [x1, y1, z1] = region.end;
        for x in x0..x1 {
            for y in y0..y1 {
                let row = self.shape.linear(VoxelIndex::new(x, y, z0));
                self.cells[row..row + (z1 - z0)].fill(state);
            }
        }

        let cells_written = region.volume();
        trace!(?region, cells_written, %state, "fill_box");
        Ok(FillReport {
            region,
            cells_written,
        })
    }

    /// Paint a straight staircase rising `total_rise` meters.
    ///
    /// The rise is split into `trunc(total_rise / STEP_HEIGHT)` treads. Tread
    /// `i` is a `StairTread` box at `origin + (0, i*h, i*h)` with footprint
    /// `step_size.x` by `step_size.y` and height `h`, so the stair climbs at
    /// 45 degrees in the depth-height plane.
    ///
    /// Returns the report of every tread in order.
    pub fn fill_staircase(
        &mut self,
        origin: Point3<f64>,
        step_size: Vector3<f64>,
        total_rise: f64,
    ) -> Result<Vec<FillReport>> {
        if !total_rise.is_finite() || total_rise < 0.0 {
            return Err(Error::invalid(format!(
                "staircase rise must be non-negative and finite, got {}",
                total_rise
            )));
        }
        check_non_negative("step size", &step_size)?;

        let num_steps = (total_rise / STEP_HEIGHT) as usize;
        let tread = Vector3::new(step_size.x, step_size.y, STEP_HEIGHT);

        (0..num_steps)
            .map(|i| {
                let offset = i as f64 * STEP_HEIGHT;
                let step_origin = origin + Vector3::new(0.0, offset, offset);
                self.fill_box(step_origin, tread, CellState::StairTread)
            })
            .collect()
    }
}

fn check_non_negative(what: &str, v: &Vector3<f64>) -> Result<()> {
    if v.iter().any(|c| !c.is_finite() || *c < 0.0) {
        return Err(Error::invalid(format!(
            "{} components must be non-negative and finite, got ({}, {}, {})",
            what, v.x, v.y, v.z
        )));
    }
    Ok(())
}

fn check_finite_point(what: &str, p: &Point3<f64>) -> Result<()> {
    if p.iter().any(|c| !c.is_finite()) {
        return Err(Error::invalid(format!(
            "{} must be finite, got ({}, {}, {})",
            what, p.x, p.y, p.z
        )));
    }
    Ok(())
}
