// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-floor visibility policy.
//!
//! Each solid voxel is classified by its state and the height of its lower
//! face. The rules are evaluated in a fixed order:
//!
//! 1. Perimeter walls are hidden whenever `show_perimeter_wall` is off, at
//!    any height and regardless of the floor toggles.
//! 2. Voxels below the base slab top belong to floor 1.
//! 3. Voxels in `[base_top, floor2_elevation)` belong to floor 1.
//! 4. Voxels at or above `floor2_elevation` belong to floor 2.

use serde::{Deserialize, Serialize};
use voxnav_core::CellState;

/// Which parts of the building a render pass should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisibilityConfig {
    /// Show the base slab and everything on floor 1
    pub show_floor1: bool,
    /// Show the floor 2 slab and everything above it
    pub show_floor2: bool,
    /// Show exterior envelope walls and railings
    pub show_perimeter_wall: bool,
}

impl Default for VisibilityConfig {
    fn default() -> Self {
        Self {
            show_floor1: true,
            show_floor2: true,
            show_perimeter_wall: true,
        }
    }
}

impl VisibilityConfig {
    /// Load toggles from `VOXNAV_SHOW_FLOOR1`, `VOXNAV_SHOW_FLOOR2` and
    /// `VOXNAV_SHOW_PERIMETER`, falling back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            show_floor1: env_flag("VOXNAV_SHOW_FLOOR1").unwrap_or(defaults.show_floor1),
            show_floor2: env_flag("VOXNAV_SHOW_FLOOR2").unwrap_or(defaults.show_floor2),
            show_perimeter_wall: env_flag("VOXNAV_SHOW_PERIMETER")
                .unwrap_or(defaults.show_perimeter_wall),
        }
    }

    /// Everything visible except the exterior envelope.
    pub fn interior_only() -> Self {
        Self {
            show_perimeter_wall: false,
            ..Self::default()
        }
    }
}

fn env_flag(name: &str) -> Option<bool> {
    std::env::var(name).ok().and_then(|v| parse_flag(&v))
}

/// Parse a boolean toggle (`1/0`, `true/false`, `yes/no`, `on/off`).
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Height boundaries separating the base slab and the two floors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StoreyBands {
    /// Top of the ground base slab (floor 1 walking height)
    pub base_top: f64,
    /// Bottom of the floor 2 slab
    pub floor2_elevation: f64,
}

impl Default for StoreyBands {
    fn default() -> Self {
        Self {
            base_top: 1.0,
            floor2_elevation: 6.0,
        }
    }
}

/// Why a voxel was left out of a render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HiddenReason {
    /// Unknown or free space
    EmptySpace,
    /// Perimeter wall with `show_perimeter_wall` off
    PerimeterToggle,
    /// Base slab region with `show_floor1` off
    BaseSlab,
    /// Floor 1 band with `show_floor1` off
    Floor1,
    /// Floor 2 band with `show_floor2` off
    Floor2,
}

/// Outcome of classifying one voxel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Shown,
    Hidden(HiddenReason),
}

impl Visibility {
    #[inline]
    pub fn is_shown(self) -> bool {
        matches!(self, Visibility::Shown)
    }
}

/// Decide whether a voxel with lower-face height `floor_height` is drawn.
pub fn classify(
    state: CellState,
    floor_height: f64,
    config: &VisibilityConfig,
    bands: &StoreyBands,
) -> Visibility {
    if !state.is_renderable() {
        return Visibility::Hidden(HiddenReason::EmptySpace);
    }

    if state == CellState::PerimeterWall && !config.show_perimeter_wall {
        return Visibility::Hidden(HiddenReason::PerimeterToggle);
    }

    // The base slab follows show_floor1 and skips the floor 2 rule
    if floor_height < bands.base_top {
        return if config.show_floor1 {
            Visibility::Shown
        } else {
            Visibility::Hidden(HiddenReason::BaseSlab)
        };
    }

    if floor_height < bands.floor2_elevation {
        if !config.show_floor1 {
            return Visibility::Hidden(HiddenReason::Floor1);
        }
    } else if !config.show_floor2 {
        return Visibility::Hidden(HiddenReason::Floor2);
    }

    Visibility::Shown
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(f1: bool, f2: bool, perim: bool) -> VisibilityConfig {
        VisibilityConfig {
            show_floor1: f1,
            show_floor2: f2,
            show_perimeter_wall: perim,
        }
    }

    #[test]
    fn test_empty_space_always_hidden() {
        let bands = StoreyBands::default();
        for state in [CellState::Unknown, CellState::Free] {
            assert_eq!(
                classify(state, 2.0, &VisibilityConfig::default(), &bands),
                Visibility::Hidden(HiddenReason::EmptySpace)
            );
        }
    }

    #[test]
    fn test_perimeter_toggle_wins_at_every_height() {
        let bands = StoreyBands::default();
        let config = cfg(true, true, false);
        for z in [0.0, 0.5, 1.0, 5.5, 6.0, 11.5] {
            assert_eq!(
                classify(CellState::PerimeterWall, z, &config, &bands),
                Visibility::Hidden(HiddenReason::PerimeterToggle)
            );
        }
    }

    #[test]
    fn test_base_slab_follows_floor1_only() {
        let bands = StoreyBands::default();
        assert!(classify(CellState::Slab, 0.25, &cfg(true, false, true), &bands).is_shown());
        assert!(classify(CellState::Slab, 0.5, &cfg(true, true, true), &bands).is_shown());
        assert_eq!(
            classify(CellState::Slab, 0.5, &cfg(false, true, true), &bands),
            Visibility::Hidden(HiddenReason::BaseSlab)
        );
    }

    #[test]
    fn test_band_boundaries() {
        let bands = StoreyBands::default();
        let only_f2 = cfg(false, true, true);
        let only_f1 = cfg(true, false, true);

        assert_eq!(
            classify(CellState::InteriorWall, 1.0, &only_f2, &bands),
            Visibility::Hidden(HiddenReason::Floor1)
        );
        assert_eq!(
            classify(CellState::InteriorWall, 5.5, &only_f2, &bands),
            Visibility::Hidden(HiddenReason::Floor1)
        );
        assert!(classify(CellState::InteriorWall, 6.0, &only_f2, &bands).is_shown());

        assert!(classify(CellState::StairTread, 5.5, &only_f1, &bands).is_shown());
        assert_eq!(
            classify(CellState::Slab, 6.0, &only_f1, &bands),
            Visibility::Hidden(HiddenReason::Floor2)
        );
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("1"), Some(true));
        assert_eq!(parse_flag(" Yes "), Some(true));
        assert_eq!(parse_flag("off"), Some(false));
        assert_eq!(parse_flag("FALSE"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }

    #[test]
    fn test_interior_only() {
        let c = VisibilityConfig::interior_only();
        assert!(c.show_floor1 && c.show_floor2);
        assert!(!c.show_perimeter_wall);
    }
}
