// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Voxnav Core
//!
//! Dense voxel occupancy grid for building-scale navigation testbeds.
//!
//! ## Overview
//!
//! - **Occupancy states**: a closed [`CellState`] enum (fog, free, walls,
//!   slabs, stair treads)
//! - **Metric frame**: truncating conversion between meters and voxel
//!   indices ([`coords`])
//! - **Box fill**: clipped, overwrite-wins painting of axis-aligned boxes
//!   and staircases ([`VoxelGrid::fill_box`], [`VoxelGrid::fill_staircase`])
//! - **Declarative scenes**: ordered [`FillOp`] lists applied with
//!   [`VoxelGrid::apply_all`]
//!
//! ## Quick Start
//!
//! ```rust
//! use voxnav_core::{CellState, FillOp, VoxelGrid, Vector3};
//!
//! let mut grid = VoxelGrid::new(Vector3::new(20.0, 10.0, 12.0), 0.5)?;
//! grid.apply_all(&[
//!     FillOp::fill([0.0, 0.0, 0.0], [20.0, 10.0, 1.0], CellState::Slab),
//!     FillOp::fill([0.0, 0.0, 0.0], [20.0, 1.0, 12.0], CellState::PerimeterWall),
//!     FillOp::stairs([2.0, 2.0, 1.0], [4.0, 0.5, 0.5], 6.0),
//! ])?;
//! assert_eq!(grid.count(CellState::StairTread), 12 * 8);
//! # Ok::<(), voxnav_core::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization of states, indices and fill operations

pub mod coords;
pub mod error;
pub mod grid;
pub mod ops;
pub mod state;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};

pub use coords::{GridShape, IndexBox, VoxelIndex};
pub use error::{Error, Result};
pub use grid::{FillReport, VoxelGrid, DEFAULT_RESOLUTION, STEP_HEIGHT};
pub use ops::FillOp;
pub use state::CellState;
