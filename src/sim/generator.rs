//! Randomized depth-first maze carving
//!
//! The classic recursive backtracker, run on an explicit stack so large grids
//! can't overflow the call stack. Each stack frame keeps its own shuffled
//! neighbour list and a cursor into it, which reproduces the recursive visit
//! order (and RNG draw order) exactly.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use super::grid::{Cell, Grid};
use crate::error::{MazeError, Result};

/// Direction from a cell to one of its neighbours
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// Candidate order before shuffling
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Right, Direction::Down, Direction::Left];

    /// Row/column offset of the neighbour in this direction
    #[inline]
    pub fn offset(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
        }
    }
}

/// A generated perfect maze and the cell carving started from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    pub grid: Grid,
    pub start: Cell,
}

impl Maze {
    /// Generate a maze from a uniformly random start cell
    pub fn generate<R: Rng + ?Sized>(rows: usize, columns: usize, rng: &mut R) -> Result<Self> {
        if rows == 0 || columns == 0 {
            return Err(MazeError::InvalidDimensions { rows, columns });
        }
        let start = (rng.random_range(0..rows), rng.random_range(0..columns));
        Self::generate_from(rows, columns, start, rng)
    }

    /// Generate a maze carving outward from `start`
    pub fn generate_from<R: Rng + ?Sized>(
        rows: usize,
        columns: usize,
        start: Cell,
        rng: &mut R,
    ) -> Result<Self> {
        let mut grid = Grid::new(rows, columns)?;
        carve_passages(&mut grid, start, rng)?;

        let unvisited = grid.unvisited_count();
        if unvisited > 0 {
            log::error!("Carving from {:?} left {} cells unvisited", start, unvisited);
            return Err(MazeError::IncompleteGeneration { unvisited });
        }

        log::info!(
            "Generated {}x{} maze from ({}, {}), {} passages",
            rows,
            columns,
            start.0,
            start.1,
            grid.open_edge_count()
        );
        Ok(Self { grid, start })
    }
}

/// One cell on the carving stack
struct Frame {
    cell: Cell,
    neighbors: [Direction; 4],
    next: usize,
}

/// Mark `cell` visited and shuffle its candidate neighbours
fn enter<R: Rng + ?Sized>(grid: &mut Grid, cell: Cell, rng: &mut R) -> Frame {
    grid.mark_visited(cell);
    let mut neighbors = Direction::ALL;
    neighbors.shuffle(rng);
    Frame {
        cell,
        neighbors,
        next: 0,
    }
}

/// Open the wall between `(row, column)` and its neighbour in `dir`
fn remove_wall(grid: &mut Grid, (row, column): Cell, dir: Direction) {
    match dir {
        Direction::Up => grid.open_horizontal(row - 1, column),
        Direction::Down => grid.open_horizontal(row, column),
        Direction::Left => grid.open_vertical(row, column - 1),
        Direction::Right => grid.open_vertical(row, column),
    }
}

/// Carve passages depth-first from `start`.
///
/// Walls only come down when stepping into an unvisited cell, so the open
/// passages always form a tree. Calling this on an already visited cell does
/// nothing; a `start` outside the grid is rejected before anything is touched.
pub fn carve_passages<R: Rng + ?Sized>(grid: &mut Grid, start: Cell, rng: &mut R) -> Result<()> {
    if start.0 >= grid.rows() || start.1 >= grid.columns() {
        return Err(MazeError::StartOutOfBounds {
            row: start.0,
            column: start.1,
            rows: grid.rows(),
            columns: grid.columns(),
        });
    }
    if grid.is_visited(start) {
        return Ok(());
    }

    let mut stack = vec![enter(grid, start, rng)];
    while let Some(frame) = stack.last_mut() {
        let Some(&dir) = frame.neighbors.get(frame.next) else {
            // Dead end: backtrack
            stack.pop();
            continue;
        };
        frame.next += 1;

        let (dr, dc) = dir.offset();
        let (row, column) = (frame.cell.0 as isize + dr, frame.cell.1 as isize + dc);
        if !grid.contains(row, column) {
            continue;
        }
        let next = (row as usize, column as usize);
        if grid.is_visited(next) {
            continue;
        }

        let cell = frame.cell;
        remove_wall(grid, cell, dir);
        stack.push(enter(grid, next, rng));
    }
    Ok(())
}
