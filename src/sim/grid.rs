//! Grid model: visited cells plus the two wall matrices
//!
//! Walls are stored as "removed" flags: `true` means the passage is open.
//! - `horizontals[row][col]` separates `(row, col)` from `(row + 1, col)`
//! - `verticals[row][col]` separates `(row, col)` from `(row, col + 1)`

use std::collections::VecDeque;
use std::fmt;

use crate::error::{MazeError, Result};

/// A cell coordinate as `(row, column)`
pub type Cell = (usize, usize);

/// Rectangular maze grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    columns: usize,
    /// `rows * columns`, row-major
    visited: Vec<bool>,
    /// `(rows - 1) * columns`, row-major
    horizontals: Vec<bool>,
    /// `rows * (columns - 1)`, row-major
    verticals: Vec<bool>,
}

impl Grid {
    /// Create a grid with every wall present and no cell visited
    pub fn new(rows: usize, columns: usize) -> Result<Self> {
        let invalid = || MazeError::InvalidDimensions { rows, columns };
        let cells = rows
            .checked_mul(columns)
            .filter(|&n| n > 0 && n <= isize::MAX as usize)
            .ok_or_else(invalid)?;
        // Both wall matrices are smaller than the cell matrix
        Ok(Self {
            rows,
            columns,
            visited: vec![false; cells],
            horizontals: vec![false; cells - columns],
            verticals: vec![false; cells - rows],
        })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn columns(&self) -> usize {
        self.columns
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        self.rows * self.columns
    }

    #[inline]
    pub fn contains(&self, row: isize, column: isize) -> bool {
        row >= 0 && column >= 0 && (row as usize) < self.rows && (column as usize) < self.columns
    }

    /// Whether `cell` has been carved into; `false` outside the grid
    pub fn is_visited(&self, (row, column): Cell) -> bool {
        row < self.rows && column < self.columns && self.visited[row * self.columns + column]
    }

    /// Mark a cell visited. Cells never become unvisited again.
    pub(crate) fn mark_visited(&mut self, (row, column): Cell) {
        self.visited[row * self.columns + column] = true;
    }

    /// Whether the wall below `(row, column)` has been removed
    pub fn horizontal_open(&self, row: usize, column: usize) -> bool {
        self.horizontals[row * self.columns + column]
    }

    /// Whether the wall right of `(row, column)` has been removed
    pub fn vertical_open(&self, row: usize, column: usize) -> bool {
        self.verticals[row * (self.columns - 1) + column]
    }

    pub(crate) fn open_horizontal(&mut self, row: usize, column: usize) {
        self.horizontals[row * self.columns + column] = true;
    }

    pub(crate) fn open_vertical(&mut self, row: usize, column: usize) {
        self.verticals[row * (self.columns - 1) + column] = true;
    }

    /// Iterate `(row, column, open)` over the horizontal wall matrix
    pub fn horizontal_walls(&self) -> impl Iterator<Item = (usize, usize, bool)> + '_ {
        self.horizontals
            .iter()
            .enumerate()
            .map(move |(i, &open)| (i / self.columns, i % self.columns, open))
    }

    /// Iterate `(row, column, open)` over the vertical wall matrix
    pub fn vertical_walls(&self) -> impl Iterator<Item = (usize, usize, bool)> + '_ {
        let stride = self.columns - 1;
        self.verticals
            .iter()
            .enumerate()
            .map(move |(i, &open)| (i / stride, i % stride, open))
    }

    /// Number of removed walls across both matrices
    pub fn open_edge_count(&self) -> usize {
        self.horizontals.iter().chain(&self.verticals).filter(|&&open| open).count()
    }

    pub fn unvisited_count(&self) -> usize {
        self.visited.iter().filter(|&&v| !v).count()
    }

    /// Neighbours reachable from `cell` through a single open passage
    pub fn open_neighbors(&self, (row, column): Cell) -> Vec<Cell> {
        let mut out = Vec::with_capacity(4);
        if row > 0 && self.horizontal_open(row - 1, column) {
            out.push((row - 1, column));
        }
        if column + 1 < self.columns && self.vertical_open(row, column) {
            out.push((row, column + 1));
        }
        if row + 1 < self.rows && self.horizontal_open(row, column) {
            out.push((row + 1, column));
        }
        if column > 0 && self.vertical_open(row, column - 1) {
            out.push((row, column - 1));
        }
        out
    }

    /// BFS over open passages, returning the parent of each reached cell
    fn bfs(&self, from: Cell) -> Vec<Option<Cell>> {
        let mut parent = vec![None; self.cell_count()];
        let index = |(r, c): Cell| r * self.columns + c;
        parent[index(from)] = Some(from);

        let mut queue = VecDeque::from([from]);
        while let Some(cell) = queue.pop_front() {
            for next in self.open_neighbors(cell) {
                if parent[index(next)].is_none() {
                    parent[index(next)] = Some(cell);
                    queue.push_back(next);
                }
            }
        }
        parent
    }

    /// Number of cells reachable from `from` through open passages
    pub fn reachable_from(&self, from: Cell) -> usize {
        self.bfs(from).iter().filter(|p| p.is_some()).count()
    }

    /// Path of cells from `from` to `to` (inclusive), if connected.
    /// In a perfect maze this is the only simple path.
    pub fn path(&self, from: Cell, to: Cell) -> Option<Vec<Cell>> {
        let parent = self.bfs(from);
        let index = |(r, c): Cell| r * self.columns + c;
        parent[index(to)]?;

        let mut path = vec![to];
        let mut cell = to;
        while cell != from {
            cell = parent[index(cell)]?;
            path.push(cell);
        }
        path.reverse();
        Some(path)
    }

    /// Open passages form a spanning tree: `n - 1` edges and everything connected
    pub fn is_spanning_tree(&self) -> bool {
        self.open_edge_count() == self.cell_count() - 1 && self.reachable_from((0, 0)) == self.cell_count()
    }
}

/// ASCII rendering, one `+--+` box per cell
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "+{}", "---+".repeat(self.columns))?;
        for row in 0..self.rows {
            let mut cells = String::from("|");
            let mut floor = String::from("+");
            for column in 0..self.columns {
                let east_open = column + 1 < self.columns && self.vertical_open(row, column);
                cells.push_str(if east_open { "    " } else { "   |" });
                let south_open = row + 1 < self.rows && self.horizontal_open(row, column);
                floor.push_str(if south_open { "   +" } else { "---+" });
            }
            writeln!(f, "{cells}")?;
            writeln!(f, "{floor}")?;
        }
        Ok(())
    }
}
