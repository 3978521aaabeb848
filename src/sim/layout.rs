//! Layout mapping: grid walls to positioned bodies
//!
//! Turns a finished [`Grid`] into placement commands for the physics host.
//! Coordinates are screen-style: origin top-left, y grows downward.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::grid::{Cell, Grid};
use crate::error::{MazeError, Result};
use crate::settings::Settings;

/// Labels the win logic cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Wall,
    Goal,
    Player,
}

impl Label {
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Wall => "wall",
            Label::Goal => "goal",
            Label::Player => "player",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "wall" => Some(Label::Wall),
            "goal" => Some(Label::Goal),
            "player" => Some(Label::Player),
            _ => None,
        }
    }
}

/// Body geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    /// Axis-aligned rectangle, full width/height
    Rectangle { size: Vec2 },
    Circle { radius: f32 },
}

/// One body to create and add to the world
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodySpec {
    /// `None` for the outer boundary, which never collapses
    pub label: Option<Label>,
    pub center: Vec2,
    pub shape: Shape,
    pub is_static: bool,
}

impl BodySpec {
    pub fn rectangle(label: Option<Label>, center: Vec2, size: Vec2) -> Self {
        Self {
            label,
            center,
            shape: Shape::Rectangle { size },
            is_static: true,
        }
    }

    pub fn circle(label: Option<Label>, center: Vec2, radius: f32, is_static: bool) -> Self {
        Self {
            label,
            center,
            shape: Shape::Circle { radius },
            is_static,
        }
    }
}

/// Every body of a maze, in creation order:
/// perimeter, horizontal walls, vertical walls, goal, player
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub bodies: Vec<BodySpec>,
    pub unit_width: f32,
    pub unit_height: f32,
    /// Cell the player spawns in (top-left)
    pub player_cell: Cell,
    /// Cell holding the goal (bottom-right)
    pub goal_cell: Cell,
    /// Position of the goal in `bodies`
    pub goal_index: usize,
    /// Position of the player in `bodies`
    pub player_index: usize,
}

/// Number of boundary bodies at the front of [`Layout::bodies`]
pub const PERIMETER_BODIES: usize = 4;

impl Layout {
    /// Number of bodies carrying `label`
    pub fn count(&self, label: Option<Label>) -> usize {
        self.bodies.iter().filter(|b| b.label == label).count()
    }

    /// The outer boundary
    pub fn perimeter(&self) -> &[BodySpec] {
        &self.bodies[..PERIMETER_BODIES]
    }

    /// Internal maze walls
    pub fn walls(&self) -> impl Iterator<Item = &BodySpec> {
        self.bodies.iter().filter(|b| b.label == Some(Label::Wall))
    }

    pub fn goal(&self) -> Option<&BodySpec> {
        self.bodies.iter().find(|b| b.label == Some(Label::Goal))
    }

    pub fn player(&self) -> Option<&BodySpec> {
        self.bodies.iter().find(|b| b.label == Some(Label::Player))
    }
}

/// Map `grid` onto the play field described by `settings`.
///
/// Cell size comes from the field size divided by the grid's own row and
/// column counts. A wall body is emitted only where the wall is still up.
pub fn build_layout(grid: &Grid, settings: &Settings) -> Result<Layout> {
    let width = settings.width;
    let height = settings.height;
    let unit_width = width / grid.columns() as f32;
    let unit_height = height / grid.rows() as f32;
    let positive = |v: f32| v.is_finite() && v > 0.0;
    if !positive(unit_width) || !positive(unit_height) {
        return Err(MazeError::InvalidCellSize {
            unit_width,
            unit_height,
        });
    }

    let border = settings.border_thickness;
    let thickness = settings.wall_thickness;
    let mut bodies = Vec::with_capacity(PERIMETER_BODIES + grid.cell_count() * 2 + 2);

    // Perimeter, centered on each edge midpoint
    bodies.push(BodySpec::rectangle(None, Vec2::new(width / 2.0, 0.0), Vec2::new(width, border)));
    bodies.push(BodySpec::rectangle(None, Vec2::new(width / 2.0, height), Vec2::new(width, border)));
    bodies.push(BodySpec::rectangle(None, Vec2::new(0.0, height / 2.0), Vec2::new(border, height)));
    bodies.push(BodySpec::rectangle(None, Vec2::new(width, height / 2.0), Vec2::new(border, height)));

    for (row, column, open) in grid.horizontal_walls() {
        if open {
            continue;
        }
        bodies.push(BodySpec::rectangle(
            Some(Label::Wall),
            Vec2::new(
                column as f32 * unit_width + unit_width / 2.0,
                (row + 1) as f32 * unit_height,
            ),
            Vec2::new(unit_width, thickness),
        ));
    }

    for (row, column, open) in grid.vertical_walls() {
        if open {
            continue;
        }
        bodies.push(BodySpec::rectangle(
            Some(Label::Wall),
            Vec2::new(
                (column + 1) as f32 * unit_width,
                row as f32 * unit_height + unit_height / 2.0,
            ),
            Vec2::new(thickness, unit_height),
        ));
    }

    // Goal in the far corner
    let goal_index = bodies.len();
    bodies.push(BodySpec::rectangle(
        Some(Label::Goal),
        Vec2::new(width - unit_width / 2.0, height - unit_height / 2.0),
        Vec2::new(unit_width, unit_height) * settings.goal_scale,
    ));

    // Player in the opposite corner, the only dynamic body
    let radius = unit_width.min(unit_height) * settings.player_radius_scale;
    let player_index = bodies.len();
    bodies.push(BodySpec::circle(
        Some(Label::Player),
        Vec2::new(unit_width / 2.0, unit_height / 2.0),
        radius,
        false,
    ));

    log::debug!(
        "Layout: {} bodies, cell {}x{}",
        bodies.len(),
        unit_width,
        unit_height
    );

    Ok(Layout {
        bodies,
        unit_width,
        unit_height,
        player_cell: (0, 0),
        goal_cell: (grid.rows() - 1, grid.columns() - 1),
        goal_index,
        player_index,
    })
}
