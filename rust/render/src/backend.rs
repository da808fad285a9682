// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Handoff from the filter to a rendering backend.

use tracing::{info, warn};
use voxnav_core::VoxelGrid;

use crate::error::Result;
use crate::filter::{FilterOutcome, FilterStats, RenderFrame, SceneRenderFilter};
use crate::visibility::VisibilityConfig;

/// A sink that displays or exports a filtered frame.
///
/// Backends are only invoked with non-empty frames.
pub trait RenderBackend {
    /// Short name used in logs and errors.
    fn name(&self) -> &str;

    /// Display or export one frame.
    fn present(&mut self, frame: &RenderFrame) -> Result<()>;
}

/// What happened during [`render_scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStatus {
    /// The backend received a frame with `voxels` entries
    Submitted { voxels: usize, stats: FilterStats },
    /// Every voxel was filtered out; the backend was not called
    NothingToRender { stats: FilterStats },
}

impl RenderStatus {
    pub fn stats(&self) -> FilterStats {
        match self {
            RenderStatus::Submitted { stats, .. } | RenderStatus::NothingToRender { stats } => {
                *stats
            }
        }
    }
}

/// Filter `grid` with `config` and hand the result to `backend`.
pub fn render_scene<B: RenderBackend + ?Sized>(
    grid: &VoxelGrid,
    config: &VisibilityConfig,
    backend: &mut B,
) -> Result<RenderStatus> {
    present_outcome(SceneRenderFilter::new(*config).filter(grid), backend)
}

/// Hand an already computed filter outcome to `backend`.
pub fn present_outcome<B: RenderBackend + ?Sized>(
    outcome: FilterOutcome,
    backend: &mut B,
) -> Result<RenderStatus> {
    match outcome {
        FilterOutcome::NothingToRender(stats) => {
            warn!(backend = backend.name(), "no voxels to render");
            Ok(RenderStatus::NothingToRender { stats })
        }
        FilterOutcome::Ready(frame) => {
            backend.present(&frame)?;
            info!(
                backend = backend.name(),
                voxels = frame.voxels.len(),
                "frame submitted"
            );
            Ok(RenderStatus::Submitted {
                voxels: frame.voxels.len(),
                stats: frame.stats,
            })
        }
    }
}
