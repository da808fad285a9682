// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Occupancy states stored in each voxel.

use crate::error::Error;

/// Occupancy state of a single voxel.
///
/// The discriminants are the raw byte values used by the occupancy array.
/// `Unknown` and `Free` describe empty space and are never rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum CellState {
    /// Unexplored interior volume (fog)
    #[default]
    Unknown = 0,
    /// Known free space (also used to carve openings)
    Free = 1,
    /// Internal partition wall
    InteriorWall = 2,
    /// Exterior envelope wall, railings
    PerimeterWall = 3,
    /// Floor or ceiling slab, including the ground base slab
    Slab = 4,
    /// One tread of a staircase
    StairTread = 5,
}

impl CellState {
    /// All states in discriminant order.
    pub const ALL: [CellState; 6] = [
        CellState::Unknown,
        CellState::Free,
        CellState::InteriorWall,
        CellState::PerimeterWall,
        CellState::Slab,
        CellState::StairTread,
    ];

    /// Raw byte value of this state.
    #[inline]
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Whether a voxel in this state is solid structure that can be drawn.
    #[inline]
    pub fn is_renderable(self) -> bool {
        self.as_u8() > CellState::Free.as_u8()
    }

    pub fn name(self) -> &'static str {
        match self {
            CellState::Unknown => "unknown",
            CellState::Free => "free",
            CellState::InteriorWall => "interior_wall",
            CellState::PerimeterWall => "perimeter_wall",
            CellState::Slab => "slab",
            CellState::StairTread => "stair_tread",
        }
    }
}

impl TryFrom<u8> for CellState {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        CellState::ALL
            .get(value as usize)
            .copied()
            .ok_or(Error::UnknownState(value))
    }
}

impl From<CellState> for u8 {
    fn from(state: CellState) -> Self {
        state.as_u8()
    }
}

impl std::fmt::Display for CellState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_values() {
        for (i, state) in CellState::ALL.iter().enumerate() {
            assert_eq!(state.as_u8() as usize, i);
            assert_eq!(CellState::try_from(i as u8).unwrap(), *state);
        }
        assert_eq!(CellState::try_from(6), Err(Error::UnknownState(6)));
    }

    #[test]
    fn test_empty_space_not_renderable() {
        assert!(!CellState::Unknown.is_renderable());
        assert!(!CellState::Free.is_renderable());
        assert!(CellState::InteriorWall.is_renderable());
        assert!(CellState::PerimeterWall.is_renderable());
        assert!(CellState::Slab.is_renderable());
        assert!(CellState::StairTread.is_renderable());
    }
}
