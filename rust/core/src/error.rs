// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for grid construction.
//!
//! Clipping is never an error: fills that leave the grid are silently
//! truncated to its bounds. The only failure is malformed metric input that
//! would make an index range ill-defined.

/// Result type alias for grid operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building a voxel grid.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// A resolution, dimension, size or rise was negative, zero where a
    /// positive value is required, or not finite.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A raw state byte outside the defined occupancy states.
    #[error("unknown cell state: {0}")]
    UnknownState(u8),
}

impl Error {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }
}
