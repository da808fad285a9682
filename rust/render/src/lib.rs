// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Visibility filtering and render handoff for voxnav grids
//!
//! This crate turns a populated occupancy grid into a colored voxel frame:
//! 1. Skip empty space (fog and free cells)
//! 2. Apply the perimeter-wall toggle, then the per-floor toggles
//! 3. Color surviving voxels by state
//! 4. Hand the frame and the start/goal markers to a [`RenderBackend`]
//!
//! # Usage
//!
//! ```rust,ignore
//! use voxnav_render::{render_scene, JsonFrameWriter, VisibilityConfig};
//!
//! let config = VisibilityConfig { show_floor2: false, ..Default::default() };
//! let mut backend = JsonFrameWriter::new(std::io::stdout());
//! let status = render_scene(&grid, &config, &mut backend)?;
//! ```

pub mod backend;
pub mod color;
pub mod error;
pub mod export;
pub mod filter;
pub mod visibility;

pub use backend::{present_outcome, render_scene, RenderBackend, RenderStatus};
pub use color::{color_for, Rgb};
pub use error::{Error, Result};
pub use export::{JsonFrameWriter, ObjFrameWriter};
pub use filter::{
    filter_grid, FilterOutcome, FilterStats, Marker, RenderFrame, RenderVoxel,
    SceneRenderFilter, MARKER_RADIUS,
};
pub use visibility::{classify, HiddenReason, StoreyBands, Visibility, VisibilityConfig};
