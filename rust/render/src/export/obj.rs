// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wavefront OBJ export: one colored cube per voxel.
//!
//! Vertex colors use the widespread `v x y z r g b` extension. Coordinates
//! are converted from the grid's Z-up frame to the Y-up OBJ convention.

use std::io::Write;

use nalgebra::Point3;

use crate::backend::RenderBackend;
use crate::color::Rgb;
use crate::error::Result;
use crate::filter::RenderFrame;

/// Cube faces as corner indices, counter-clockwise seen from outside.
///
/// Corner `i` sits at offset `(i & 1, (i >> 1) & 1, (i >> 2) & 1)`.
const CUBE_FACES: [[u32; 4]; 6] = [
    [0, 4, 6, 2], // -x
    [1, 3, 7, 5], // +x
    [0, 1, 5, 4], // -y
    [2, 6, 7, 3], // +y
    [0, 2, 3, 1], // -z
    [4, 5, 7, 6], // +z
];

/// Writes each presented frame as an OBJ mesh.
pub struct ObjFrameWriter<W: Write> {
    writer: W,
    vertex_offset: u32,
}

impl<W: Write> ObjFrameWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            vertex_offset: 0,
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_cube(&mut self, center: Point3<f64>, edge: f64, color: Rgb) -> Result<()> {
        let half = edge / 2.0;
        for corner in 0..8u32 {
            let x = center.x + if corner & 1 == 0 { -half } else { half };
            let y = center.y + if corner & 2 == 0 { -half } else { half };
            let z = center.z + if corner & 4 == 0 { -half } else { half };
            // (x, y, z) -> (x, z, -y) is a rotation, so winding is preserved
            writeln!(
                self.writer,
                "v {:.4} {:.4} {:.4} {:.3} {:.3} {:.3}",
                x, z, -y, color.r, color.g, color.b
            )?;
        }
        for face in CUBE_FACES {
            let [a, b, c, d] = face.map(|i| i + self.vertex_offset + 1);
            writeln!(self.writer, "f {} {} {} {}", a, b, c, d)?;
        }
        self.vertex_offset += 8;
        Ok(())
    }
}

impl<W: Write> RenderBackend for ObjFrameWriter<W> {
    fn name(&self) -> &str {
        "obj"
    }

    fn present(&mut self, frame: &RenderFrame) -> Result<()> {
        writeln!(self.writer, "# Generated by voxnav")?;
        writeln!(
            self.writer,
            "# {} voxels, pitch {:.3} m",
            frame.voxels.len(),
            frame.voxel_size
        )?;
        writeln!(self.writer, "# Coordinate system: Y-up (OBJ convention)")?;
        writeln!(self.writer)?;

        writeln!(self.writer, "o voxels")?;
        for voxel in &frame.voxels {
            self.write_cube(voxel.position, frame.voxel_size, voxel.color)?;
        }

        for (name, marker) in [("start", &frame.start), ("goal", &frame.goal)] {
            writeln!(self.writer, "o {}", name)?;
            self.write_cube(marker.position, marker.radius * 2.0, marker.color)?;
        }

        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::filter_grid;
    use crate::visibility::VisibilityConfig;
    use voxnav_core::{CellState, Vector3, VoxelGrid};

    #[test]
    fn test_cube_per_voxel_plus_markers() {
        let mut grid = VoxelGrid::new(Vector3::new(2.0, 1.0, 1.0), 0.5).unwrap();
        grid.fill_box(Point3::origin(), Vector3::new(1.5, 0.5, 0.5), CellState::InteriorWall)
            .unwrap();
        let frame = filter_grid(&grid, &VisibilityConfig::default())
            .into_frame()
            .unwrap();
        assert_eq!(frame.voxels.len(), 3);

        let mut writer = ObjFrameWriter::new(Vec::new());
        writer.present(&frame).unwrap();
        let text = String::from_utf8(writer.into_inner()).unwrap();

        let vertices = text.lines().filter(|l| l.starts_with("v ")).count();
        let faces: Vec<_> = text.lines().filter(|l| l.starts_with("f ")).collect();
        assert_eq!(vertices, 8 * 5);
        assert_eq!(faces.len(), 6 * 5);
        // Last face references the last vertex
        assert!(faces.last().unwrap().split_whitespace().any(|t| t == "40"));
        assert!(text.contains("o start"));
        assert!(text.contains("o goal"));
    }

    #[test]
    fn test_faces_point_outward() {
        for face in CUBE_FACES {
            let corner = |i: u32| {
                nalgebra::Vector3::new(
                    (i & 1) as f64,
                    ((i >> 1) & 1) as f64,
                    ((i >> 2) & 1) as f64,
                )
            };
            let (a, b, c) = (corner(face[0]), corner(face[1]), corner(face[2]));
            let normal = (b - a).cross(&(c - b));
            let centroid = face.iter().map(|i| corner(*i)).sum::<nalgebra::Vector3<f64>>() / 4.0;
            let outward = centroid - nalgebra::Vector3::new(0.5, 0.5, 0.5);
            assert!(normal.dot(&outward) > 0.0);
        }
    }
}
