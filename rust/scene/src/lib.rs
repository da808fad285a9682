// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Two-storey building scene for voxnav
//!
//! The building is plain data: [`building_ops`] returns the ordered fill
//! operations for a [`BuildingLayout`], and [`build_building`] applies them
//! to a fresh grid. The `voxnav` binary wires this to the render filter.
//!
//! # Usage
//!
//! ```rust,ignore
//! use voxnav_scene::{build_building, BuildingLayout};
//! use voxnav_render::{filter_grid, VisibilityConfig};
//!
//! let grid = build_building(&BuildingLayout::default())?;
//! let outcome = filter_grid(&grid, &VisibilityConfig::interior_only());
//! ```

pub mod building;
pub mod config;
pub mod error;
pub mod layout;

pub use building::{build_building, build_from_ops, building_ops};
pub use config::{OutputFormat, ViewerConfig, USAGE};
pub use error::{Error, Result};
pub use layout::{BridgeConfig, BuildingLayout};

use std::io::Write;
use std::path::Path;

use tracing::warn;
use voxnav_core::VoxelGrid;
use voxnav_render::{
    filter_grid, present_outcome, FilterOutcome, JsonFrameWriter, ObjFrameWriter, RenderStatus,
};

/// Read a layout JSON file. Missing fields take their default values.
pub fn load_layout(path: &Path) -> Result<BuildingLayout> {
    let text = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

/// A built scene: the layout used, its fill operations and the painted grid.
#[derive(Debug, Clone)]
pub struct SceneBuild {
    pub layout: BuildingLayout,
    pub ops: Vec<voxnav_core::FillOp>,
    pub grid: voxnav_core::VoxelGrid,
}

/// Resolve the layout for `config` (file, resolution and shell overrides)
/// and paint it.
pub fn build_scene(config: &ViewerConfig) -> Result<SceneBuild> {
    let mut layout = match &config.layout {
        Some(path) => load_layout(path)?,
        None => BuildingLayout::default(),
    };
    if let Some(resolution) = config.resolution {
        layout.resolution = resolution;
    }
    if config.shell_only {
        layout.include_interiors = false;
    }

    let ops = building_ops(&layout);
    let grid = build_from_ops(&layout, &ops)?;
    Ok(SceneBuild { layout, ops, grid })
}

/// Write `ops` as pretty JSON and flush, so buffered write errors surface.
pub fn dump_ops<W: Write>(ops: &[voxnav_core::FillOp], mut writer: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, ops)?;
    writer.flush()?;
    Ok(())
}

/// Filter `grid` and write the frame in the configured format.
///
/// `open` is only called when at least one voxel survives the filter, so a
/// pass with nothing to render never creates or truncates an output file.
pub fn export_frame<W, F>(grid: &VoxelGrid, config: &ViewerConfig, open: F) -> Result<RenderStatus>
where
    W: Write,
    F: FnOnce() -> std::io::Result<W>,
{
    let outcome = filter_grid(grid, &config.visibility);
    if let FilterOutcome::NothingToRender(stats) = &outcome {
        warn!(scanned = stats.scanned, "no voxels to render, output not opened");
        return Ok(RenderStatus::NothingToRender { stats: *stats });
    }

    let sink = open()?;
    let status = match config.format {
        OutputFormat::Json => {
            present_outcome(outcome, &mut JsonFrameWriter::new(sink).pretty(config.pretty))?
        }
        OutputFormat::Obj => present_outcome(outcome, &mut ObjFrameWriter::new(sink))?,
    };
    Ok(status)
}
