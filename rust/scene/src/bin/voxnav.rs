// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CLI tool: build the two-storey voxel building and export a render frame
//!
//! Usage:
//!   voxnav [options]

use std::fs;
use std::io::{self, BufWriter, Write};

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;
use voxnav_render::RenderStatus;
use voxnav_scene::{build_scene, dump_ops, export_frame, ViewerConfig, USAGE};

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays free for the frame
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let config = ViewerConfig::from_env().with_args(std::env::args().skip(1))?;
    if config.show_help {
        print!("{}", USAGE);
        return Ok(());
    }

    info!(
        show_floor1 = config.visibility.show_floor1,
        show_floor2 = config.visibility.show_floor2,
        show_perimeter_wall = config.visibility.show_perimeter_wall,
        format = ?config.format,
        "starting voxnav"
    );

    let scene = build_scene(&config).context("failed to build scene")?;

    if let Some(path) = &config.dump_ops {
        let file = fs::File::create(path)
            .with_context(|| format!("cannot create op dump '{}'", path.display()))?;
        dump_ops(&scene.ops, BufWriter::new(file))
            .with_context(|| format!("cannot write op dump '{}'", path.display()))?;
        info!(path = %path.display(), ops = scene.ops.len(), "wrote fill operations");
    }

    // The output file is only created once there is a frame to write
    let open_sink = || -> io::Result<Box<dyn Write>> {
        match &config.output {
            Some(path) => {
                let file = fs::File::create(path).map_err(|e| {
                    io::Error::new(
                        e.kind(),
                        format!("cannot create output file '{}': {}", path.display(), e),
                    )
                })?;
                Ok(Box::new(BufWriter::new(file)))
            }
            None => Ok(Box::new(io::stdout().lock())),
        }
    };

    let status =
        export_frame(&scene.grid, &config, open_sink).context("render handoff failed")?;

    let stats = status.stats();
    if let RenderStatus::Submitted { voxels, .. } = status {
        info!(
            voxels,
            scanned = stats.scanned,
            hidden = stats.hidden(),
            "render frame written"
        );
    }

    Ok(())
}
