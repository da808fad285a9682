// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Conversion between metric space and grid-index space.
//!
//! Metric values map to indices by truncating division (`trunc(v / r)`),
//! rounding toward zero rather than toward negative infinity. Positions and
//! sizes are converted independently so that two fills sharing a boundary
//! in metric space also share it in index space.

use nalgebra::{Point3, Vector3};

/// Integer index of a voxel inside a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VoxelIndex {
    pub x: usize,
    pub y: usize,
    pub z: usize,
}

impl VoxelIndex {
    #[inline]
    pub fn new(x: usize, y: usize, z: usize) -> Self {
        Self { x, y, z }
    }

    /// Metric position of the voxel's center.
    #[inline]
    pub fn center(&self, resolution: f64) -> Point3<f64> {
        let half = resolution / 2.0;
        Point3::new(
            self.x as f64 * resolution + half,
            self.y as f64 * resolution + half,
            self.z as f64 * resolution + half,
        )
    }

    /// Height of the voxel's lower face.
    #[inline]
    pub fn floor_height(&self, resolution: f64) -> f64 {
        self.z as f64 * resolution
    }
}

impl From<[usize; 3]> for VoxelIndex {
    fn from(v: [usize; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

/// Number of voxels along each axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridShape {
    pub nx: usize,
    pub ny: usize,
    pub nz: usize,
}

impl GridShape {
    #[inline]
    pub fn new(nx: usize, ny: usize, nz: usize) -> Self {
        Self { nx, ny, nz }
    }

    /// Shape covering `dimensions` at `resolution`, truncating partial voxels.
    pub fn from_dimensions(dimensions: &Vector3<f64>, resolution: f64) -> Self {
        let [nx, ny, nz] = size_to_extent(dimensions, resolution);
        Self::new(nx.max(0) as usize, ny.max(0) as usize, nz.max(0) as usize)
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.nx * self.ny * self.nz
    }

    /// Total number of cells, or `None` if it does not fit in `usize`.
    pub fn checked_len(&self) -> Option<usize> {
        self.nx.checked_mul(self.ny)?.checked_mul(self.nz)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn as_array(&self) -> [usize; 3] {
        [self.nx, self.ny, self.nz]
    }

    #[inline]
    pub fn contains(&self, index: VoxelIndex) -> bool {
        index.x < self.nx && index.y < self.ny && index.z < self.nz
    }

    /// Row-major offset (z varies fastest, then y, then x).
    #[inline]
    pub fn linear(&self, index: VoxelIndex) -> usize {
        (index.x * self.ny + index.y) * self.nz + index.z
    }

    /// Inverse of [`GridShape::linear`].
    #[inline]
    pub fn unlinear(&self, offset: usize) -> VoxelIndex {
        let z = offset % self.nz;
        let rest = offset / self.nz;
        VoxelIndex::new(rest / self.ny, rest % self.ny, z)
    }
}

/// Convert one metric coordinate to an index by truncating toward zero.
#[inline]
pub fn metric_to_index(value: f64, resolution: f64) -> i64 {
    (value / resolution) as i64
}

/// Convert a metric point to (possibly out-of-range) signed indices.
#[inline]
pub fn point_to_index(point: &Point3<f64>, resolution: f64) -> [i64; 3] {
    [
        metric_to_index(point.x, resolution),
        metric_to_index(point.y, resolution),
        metric_to_index(point.z, resolution),
    ]
}

/// Convert a metric size to a voxel count per axis.
///
/// Uses the same truncation as positions, independently of where the size
/// is anchored.
#[inline]
pub fn size_to_extent(size: &Vector3<f64>, resolution: f64) -> [i64; 3] {
    [
        metric_to_index(size.x, resolution),
        metric_to_index(size.y, resolution),
        metric_to_index(size.z, resolution),
    ]
}

/// Half-open box of voxel indices `[start, end)` already clipped to a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexBox {
    pub start: [usize; 3],
    pub end: [usize; 3],
}

impl IndexBox {
    /// Clip the signed range `[start, start + extent)` to `[0, shape)`.
    ///
    /// The end is clamped to the shape. Cells below zero lie outside the
    /// grid and are dropped; nothing wraps around.
    pub fn clipped(start: [i64; 3], extent: [i64; 3], shape: GridShape) -> Self {
        let dims = shape.as_array();
        let mut lo = [0usize; 3];
        let mut hi = [0usize; 3];
        for axis in 0..3 {
            let limit = dims[axis] as i64;
            let end = start[axis].saturating_add(extent[axis]).min(limit);
            let begin = start[axis].max(0);
            if begin < end {
                lo[axis] = begin as usize;
                hi[axis] = end as usize;
            }
        }
        Self { start: lo, end: hi }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        (0..3).any(|axis| self.start[axis] >= self.end[axis])
    }

    /// Number of cells in the box.
    pub fn volume(&self) -> usize {
        if self.is_empty() {
            return 0;
        }
        (0..3).map(|axis| self.end[axis] - self.start[axis]).product()
    }

    pub fn contains(&self, index: VoxelIndex) -> bool {
        let idx = [index.x, index.y, index.z];
        (0..3).all(|axis| idx[axis] >= self.start[axis] && idx[axis] < self.end[axis])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_truncates_toward_zero() {
        assert_eq!(metric_to_index(1.24, 0.5), 2);
        assert_eq!(metric_to_index(0.49, 0.5), 0);
        assert_eq!(metric_to_index(-0.3, 0.5), 0);
        assert_eq!(metric_to_index(-0.7, 0.5), -1);
        assert_eq!(metric_to_index(9.5, 0.5), 19);
    }

    #[test]
    fn test_shape_from_dimensions() {
        let shape = GridShape::from_dimensions(&Vector3::new(130.0, 80.0, 30.0), 0.5);
        assert_eq!(shape, GridShape::new(260, 160, 60));
        assert_eq!(shape.len(), 260 * 160 * 60);

        let partial = GridShape::from_dimensions(&Vector3::new(1.3, 1.0, 0.4), 0.5);
        assert_eq!(partial, GridShape::new(2, 2, 0));
        assert!(partial.is_empty());
    }

    #[test]
    fn test_linear_roundtrip() {
        let shape = GridShape::new(4, 3, 5);
        let idx = VoxelIndex::new(2, 1, 4);
        let offset = shape.linear(idx);
        assert_eq!(offset, (2 * 3 + 1) * 5 + 4);
        assert_eq!(shape.unlinear(offset), idx);
    }

    #[test]
    fn test_center_and_floor_height() {
        let idx = VoxelIndex::new(0, 3, 2);
        let c = idx.center(0.5);
        assert_relative_eq!(c.x, 0.25);
        assert_relative_eq!(c.y, 1.75);
        assert_relative_eq!(c.z, 1.25);
        assert_relative_eq!(idx.floor_height(0.5), 1.0);
    }

    #[test]
    fn test_index_box_clamps_end_only() {
        let shape = GridShape::new(10, 10, 10);
        let b = IndexBox::clipped([8, 0, 0], [5, 2, 1], shape);
        assert_eq!(b.start, [8, 0, 0]);
        assert_eq!(b.end, [10, 2, 1]);
        assert_eq!(b.volume(), 4);
    }

    #[test]
    fn test_index_box_outside_is_empty() {
        let shape = GridShape::new(10, 10, 10);
        assert!(IndexBox::clipped([12, 0, 0], [3, 3, 3], shape).is_empty());
        assert!(IndexBox::clipped([-5, 0, 0], [3, 3, 3], shape).is_empty());
        assert_eq!(IndexBox::clipped([0, 0, 0], [0, 4, 4], shape).volume(), 0);
    }

    #[test]
    fn test_index_box_negative_start_never_wraps() {
        let shape = GridShape::new(10, 10, 10);
        let b = IndexBox::clipped([-2, 0, 0], [4, 1, 1], shape);
        assert_eq!(b.start, [0, 0, 0]);
        assert_eq!(b.end, [2, 1, 1]);
        assert!(!b.contains(VoxelIndex::new(9, 0, 0)));
    }
}
