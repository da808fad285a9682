// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Declarative fill operations.
//!
//! A scene is an ordered list of [`FillOp`]s. Order is significant: later
//! operations overwrite earlier ones wherever they overlap, which is how
//! openings are carved out of walls and slabs.

use nalgebra::{Point3, Vector3};
use tracing::debug;

use crate::error::Result;
use crate::grid::VoxelGrid;
use crate::state::CellState;

/// One authoring step applied to a [`VoxelGrid`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "op", rename_all = "snake_case"))]
pub enum FillOp {
    /// Overwrite a metric box with a single state
    Box {
        origin: Point3<f64>,
        size: Vector3<f64>,
        state: CellState,
    },
    /// Stack stair treads rising `rise` meters from `origin`
    Staircase {
        origin: Point3<f64>,
        step_size: Vector3<f64>,
        rise: f64,
    },
}

impl FillOp {
    /// Box fill from plain coordinate triples.
    pub fn fill(origin: [f64; 3], size: [f64; 3], state: CellState) -> Self {
        FillOp::Box {
            origin: Point3::from(origin),
            size: Vector3::from(size),
            state,
        }
    }

    /// Staircase from plain coordinate triples.
    pub fn stairs(origin: [f64; 3], step_size: [f64; 3], rise: f64) -> Self {
        FillOp::Staircase {
            origin: Point3::from(origin),
            step_size: Vector3::from(step_size),
            rise,
        }
    }

    /// Apply this operation, returning the number of cells written.
    pub fn apply(&self, grid: &mut VoxelGrid) -> Result<usize> {
        match self {
            FillOp::Box {
                origin,
                size,
                state,
            } => Ok(grid.fill_box(*origin, *size, *state)?.cells_written),
            FillOp::Staircase {
                origin,
                step_size,
                rise,
            } => Ok(grid
                .fill_staircase(*origin, *step_size, *rise)?
                .iter()
                .map(|r| r.cells_written)
                .sum()),
        }
    }
}

impl VoxelGrid {
    /// Apply a single operation.
    pub fn apply(&mut self, op: &FillOp) -> Result<usize> {
        op.apply(self)
    }

    /// Apply operations strictly in the given order.
    ///
    /// Stops at the first invalid operation; operations before it stay
    /// applied. Returns the total number of cell writes (overlapping writes
    /// are counted each time).
    pub fn apply_all(&mut self, ops: &[FillOp]) -> Result<usize> {
        let mut written = 0;
        for op in ops {
            written += op.apply(self)?;
        }
        debug!(ops = ops.len(), cells_written = written, "applied fill operations");
        Ok(written)
    }
}
