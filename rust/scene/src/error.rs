// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for scene building and the viewer binary.

/// Result type alias for scene operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed command-line arguments.
    #[error("usage error: {0}")]
    Usage(String),

    /// Reading a layout file or opening an output sink failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A layout file was not valid JSON.
    #[error("invalid layout: {0}")]
    Layout(#[from] serde_json::Error),

    #[error(transparent)]
    Grid(#[from] voxnav_core::Error),

    #[error(transparent)]
    Render(#[from] voxnav_render::Error),
}
