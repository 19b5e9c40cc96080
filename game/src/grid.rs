use std::collections::HashMap;

use crate::color::ColorType;
use crate::position::Position;

/// A directional color constraint on a board cell, one per wall run crossing it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct CheckConstraint {
    pub(crate) color: ColorType,
    pub(crate) length: i32,
    /// Run extends along x (guarded by an up/down wall).
    pub(crate) horizontal: bool,
    /// Check group this slot belongs to, assigned once by the grouping pass.
    pub(crate) group: Option<usize>,
}

/// A playing block resting on a board cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Occupant {
    pub(crate) group: usize,
    pub(crate) block: usize,
    pub(crate) color: ColorType,
}

#[derive(Clone, Debug)]
pub(crate) struct BoardCell {
    pub(crate) pos: Position,
    pub(crate) constraints: Vec<CheckConstraint>,
    pub(crate) is_check_block: bool,
    pub(crate) occupant: Option<Occupant>,
}

impl BoardCell {
    pub(crate) fn new(pos: Position) -> Self {
        Self {
            pos,
            constraints: Vec::new(),
            is_check_block: false,
            occupant: None,
        }
    }

    pub(crate) fn add_constraint(&mut self, color: ColorType, length: i32, horizontal: bool) {
        self.constraints.push(CheckConstraint {
            color,
            length,
            horizontal,
            group: None,
        });
        self.is_check_block = true;
    }

    /// Group index per constraint slot, parallel to `constraints`.
    /// `None` until the grouping pass has assigned the slot.
    pub(crate) fn group_indices(&self) -> impl Iterator<Item = Option<usize>> + '_ {
        self.constraints.iter().map(|c| c.group)
    }

    /// Color of the first run with the given orientation.
    pub(crate) fn run_color(&self, horizontal: bool) -> ColorType {
        self.constraints
            .iter()
            .find(|c| c.horizontal == horizontal)
            .map_or(ColorType::None, |c| c.color)
    }
}

/// Sparse coordinate-keyed board. Iteration follows insertion order.
#[derive(Clone, Default)]
pub(crate) struct Grid {
    cells: HashMap<Position, BoardCell>,
    order: Vec<Position>,
}

impl Grid {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Returns false (and leaves the grid untouched) if the coordinate is taken.
    pub(crate) fn insert(&mut self, cell: BoardCell) -> bool {
        if self.cells.contains_key(&cell.pos) {
            return false;
        }
        self.order.push(cell.pos);
        self.cells.insert(cell.pos, cell);
        true
    }

    pub(crate) fn get(&self, pos: Position) -> Option<&BoardCell> {
        self.cells.get(&pos)
    }

    pub(crate) fn get_mut(&mut self, pos: Position) -> Option<&mut BoardCell> {
        self.cells.get_mut(&pos)
    }

    pub(crate) fn contains(&self, pos: Position) -> bool {
        self.cells.contains_key(&pos)
    }

    pub(crate) fn positions(&self) -> &[Position] {
        &self.order
    }

    pub(crate) fn cells(&self) -> impl Iterator<Item = &BoardCell> {
        self.order.iter().filter_map(|pos| self.cells.get(pos))
    }

    pub(crate) fn len(&self) -> usize {
        self.order.len()
    }

    pub(crate) fn max_x(&self) -> i32 {
        self.order.iter().map(|p| p.x).max().unwrap_or(0)
    }

    pub(crate) fn max_y(&self) -> i32 {
        self.order.iter().map(|p| p.y).max().unwrap_or(0)
    }

    pub(crate) fn occupant_at(&self, pos: Position) -> Option<Occupant> {
        self.cells.get(&pos).and_then(|cell| cell.occupant)
    }
}
