// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Viewer configuration from environment variables and command-line flags.

use std::path::PathBuf;

use voxnav_render::visibility::parse_flag;
use voxnav_render::VisibilityConfig;

use crate::error::{Error, Result};

/// Output encoding for the rendered frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Obj,
}

impl std::str::FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "obj" => Ok(OutputFormat::Obj),
            other => Err(Error::Usage(format!("unknown format '{}'", other))),
        }
    }
}

/// Everything the `voxnav` binary needs for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    pub visibility: VisibilityConfig,
    pub format: OutputFormat,
    /// Output file; stdout when unset
    pub output: Option<PathBuf>,
    /// Building layout JSON overriding the defaults
    pub layout: Option<PathBuf>,
    /// Override of the layout's voxel size
    pub resolution: Option<f64>,
    /// Paint only the envelope, slabs and bridges
    pub shell_only: bool,
    /// Write the fill operation list as JSON to this path
    pub dump_ops: Option<PathBuf>,
    pub pretty: bool,
    pub show_help: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            visibility: VisibilityConfig::default(),
            format: OutputFormat::Json,
            output: None,
            layout: None,
            resolution: None,
            shell_only: false,
            dump_ops: None,
            pretty: false,
            show_help: false,
        }
    }
}

impl ViewerConfig {
    /// Load configuration from environment variables.
    ///
    /// Reads the `VOXNAV_SHOW_*` toggles plus `VOXNAV_FORMAT`,
    /// `VOXNAV_OUTPUT` and `VOXNAV_RESOLUTION`. Unparseable values fall back
    /// to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            visibility: VisibilityConfig::from_env(),
            format: std::env::var("VOXNAV_FORMAT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.format),
            output: std::env::var("VOXNAV_OUTPUT").ok().map(PathBuf::from),
            resolution: std::env::var("VOXNAV_RESOLUTION")
                .ok()
                .and_then(|v| v.parse().ok()),
            pretty: std::env::var("VOXNAV_PRETTY")
                .ok()
                .and_then(|v| parse_flag(&v))
                .unwrap_or(defaults.pretty),
            ..defaults
        }
    }

    /// Apply command-line flags on top of this configuration.
    pub fn with_args<I, S>(mut self, args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut args = args.into_iter().map(Into::into);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-h" | "--help" => self.show_help = true,
                "--hide-floor1" => self.visibility.show_floor1 = false,
                "--hide-floor2" => self.visibility.show_floor2 = false,
                "--hide-perimeter" => self.visibility.show_perimeter_wall = false,
                "--shell-only" => self.shell_only = true,
                "--pretty" => self.pretty = true,
                "--format" => self.format = value(&arg, args.next())?.parse()?,
                "--output" => self.output = Some(PathBuf::from(value(&arg, args.next())?)),
                "--layout" => self.layout = Some(PathBuf::from(value(&arg, args.next())?)),
                "--dump-ops" => self.dump_ops = Some(PathBuf::from(value(&arg, args.next())?)),
                "--resolution" => {
                    let raw = value(&arg, args.next())?;
                    let r: f64 = raw
                        .parse()
                        .map_err(|_| Error::Usage(format!("invalid resolution '{}'", raw)))?;
                    self.resolution = Some(r);
                }
                other => return Err(Error::Usage(format!("unknown option '{}'", other))),
            }
        }
        Ok(self)
    }
}

fn value(flag: &str, next: Option<String>) -> Result<String> {
    next.ok_or_else(|| Error::Usage(format!("{} requires a value", flag)))
}

pub const USAGE: &str = "\
voxnav - build the two-storey voxel building and export a render frame

Usage:
  voxnav [options]

Options:
  --hide-floor1        Hide the base slab and floor 1
  --hide-floor2        Hide floor 2 and above
  --hide-perimeter     Hide exterior walls and railings
  --shell-only         Skip partitions, stairs and slab openings
  --format <json|obj>  Output encoding (default: json)
  --output <path>      Output file (default: stdout)
  --layout <path>      Building layout JSON
  --resolution <m>     Voxel edge length override
  --dump-ops <path>    Write the fill operation list as JSON
  --pretty             Indent JSON output
  -h, --help           Show this message

Environment:
  VOXNAV_SHOW_FLOOR1, VOXNAV_SHOW_FLOOR2, VOXNAV_SHOW_PERIMETER,
  VOXNAV_FORMAT, VOXNAV_OUTPUT, VOXNAV_RESOLUTION, VOXNAV_PRETTY, RUST_LOG
";
