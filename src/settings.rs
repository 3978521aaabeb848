//! Play-field settings
//!
//! Loaded from an optional JSON file; anything missing falls back to the
//! defaults in [`crate::consts`]. Validation happens before any maze is
//! generated so a bad file never produces a malformed grid.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{MazeError, Result};

/// Maze and play-field settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Field ===
    /// Total play-field width
    pub width: f32,
    /// Total play-field height
    pub height: f32,
    /// Number of cell rows
    pub rows: usize,
    /// Number of cell columns
    pub columns: usize,

    // === Geometry ===
    /// Internal wall thickness
    pub wall_thickness: f32,
    /// Perimeter thickness
    pub border_thickness: f32,
    /// Goal side as a fraction of the unit cell (0, 1]
    pub goal_scale: f32,
    /// Player radius as a fraction of the smaller cell side (0, 0.5]
    pub player_radius_scale: f32,

    // === Handling ===
    /// Velocity change per key press
    pub velocity_step: f32,
    /// Gravity applied once the maze is solved
    pub release_gravity_y: f32,

    /// Fixed seed for reproducible mazes (random when absent)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: FIELD_WIDTH,
            height: FIELD_HEIGHT,
            rows: DEFAULT_ROWS,
            columns: DEFAULT_COLUMNS,

            wall_thickness: WALL_THICKNESS,
            border_thickness: BORDER_THICKNESS,
            goal_scale: GOAL_SCALE,
            player_radius_scale: PLAYER_RADIUS_SCALE,

            velocity_step: VELOCITY_STEP,
            release_gravity_y: RELEASE_GRAVITY_Y,

            seed: None,
        }
    }
}

impl Settings {
    /// Settings for a `rows x columns` maze on the default field
    pub fn with_cells(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            ..Self::default()
        }
    }

    /// Size of one grid cell as `(unit_width, unit_height)`
    pub fn unit_size(&self) -> (f32, f32) {
        (
            self.width / self.columns.max(1) as f32,
            self.height / self.rows.max(1) as f32,
        )
    }

    /// Reject configurations that cannot produce a well-formed maze
    pub fn validate(&self) -> Result<()> {
        let cells = self.rows.checked_mul(self.columns);
        if !cells.is_some_and(|n| n > 0 && n <= isize::MAX as usize) {
            return Err(MazeError::InvalidDimensions {
                rows: self.rows,
                columns: self.columns,
            });
        }

        let (unit_width, unit_height) = self.unit_size();
        let positive = |v: f32| v.is_finite() && v > 0.0;
        if !positive(unit_width) || !positive(unit_height) {
            return Err(MazeError::InvalidCellSize {
                unit_width,
                unit_height,
            });
        }

        let checks = [
            ("wall_thickness", self.wall_thickness, positive(self.wall_thickness)),
            ("border_thickness", self.border_thickness, positive(self.border_thickness)),
            (
                "goal_scale",
                self.goal_scale,
                positive(self.goal_scale) && self.goal_scale <= 1.0,
            ),
            (
                "player_radius_scale",
                self.player_radius_scale,
                positive(self.player_radius_scale) && self.player_radius_scale <= 0.5,
            ),
            ("velocity_step", self.velocity_step, positive(self.velocity_step)),
            (
                "release_gravity_y",
                self.release_gravity_y,
                self.release_gravity_y.is_finite() && self.release_gravity_y != 0.0,
            ),
        ];
        for (name, value, ok) in checks {
            if !ok {
                return Err(MazeError::InvalidSetting { name, value });
            }
        }

        Ok(())
    }

    /// Parse settings from JSON and validate them
    pub fn from_json_str(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json_str(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Write settings as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        log::info!("Settings saved to {}", path.as_ref().display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.unit_size(), (50.0, 50.0));
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        let err = Settings::with_cells(0, 5).validate().unwrap_err();
        assert!(matches!(
            err,
            MazeError::InvalidDimensions { rows: 0, columns: 5 }
        ));
    }

    #[test]
    fn test_overflowing_dimensions_rejected() {
        let err = Settings::with_cells(usize::MAX, 2).validate().unwrap_err();
        assert!(matches!(
            err,
            MazeError::InvalidDimensions { rows: usize::MAX, columns: 2 }
        ));
        assert!(Settings::with_cells(3, usize::MAX).validate().is_err());
    }

    #[test]
    fn test_non_positive_cell_size_rejected() {
        let settings = Settings {
            width: 0.0,
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(MazeError::InvalidCellSize { .. })
        ));

        let settings = Settings {
            height: -10.0,
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(MazeError::InvalidCellSize { .. })
        ));
    }

    #[test]
    fn test_zero_release_gravity_rejected() {
        let settings = Settings {
            release_gravity_y: 0.0,
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(MazeError::InvalidSetting {
                name: "release_gravity_y",
                ..
            })
        ));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json_str(r#"{ "rows": 4, "columns": 6, "seed": 7 }"#).unwrap();
        assert_eq!(settings.rows, 4);
        assert_eq!(settings.columns, 6);
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.width, FIELD_WIDTH);
        assert_eq!(settings.unit_size(), (100.0, 150.0));
    }

    #[test]
    fn test_invalid_json_rejected() {
        assert!(matches!(
            Settings::from_json_str(r#"{ "rows": 0 }"#),
            Err(MazeError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            Settings::from_json_str("not json"),
            Err(MazeError::Json(_))
        ));
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join(format!("tumble_maze_settings_{}.json", std::process::id()));
        let settings = Settings {
            seed: Some(42),
            ..Settings::with_cells(3, 9)
        };
        settings.save(&path).unwrap();
        let loaded = Settings::load(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, settings);
    }
}
