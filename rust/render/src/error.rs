// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the render handoff.

/// Result type alias for render operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while presenting a frame.
///
/// Filtering itself cannot fail; an empty frame is reported through
/// [`crate::RenderStatus::NothingToRender`], not as an error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A backend rejected or failed to display the frame.
    #[error("backend '{backend}' failed: {message}")]
    Backend { backend: String, message: String },

    /// Writing exported geometry failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Encoding a frame as JSON failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
