use std::collections::HashMap;

use crate::drag::{DragGroup, PlayingBlock};
use crate::grid::{BoardCell, Grid, Occupant};
use crate::position::{Position, PositionDelta};
use crate::stage::{BoardBlockData, PlayingBlockData, ShapeData};

mod grouping;
mod launch;
mod masking;
mod matching;
mod wall;

pub(crate) use matching::DestroyEffect;
pub(crate) use wall::WallTransform;
use wall::WallColorInfo;

/// Height playing blocks rest at above the board.
pub(crate) const PLAY_BLOCK_HEIGHT: f32 = 0.33;

/// Board cells, the constraints walls put on them, and the groups dropped onto them.
pub(crate) struct BoardModel {
    pub(crate) stage_index: usize,
    pub(crate) grid: Grid,
    /// Cells of each collinear same-colored run, indexed by group number.
    pub(crate) check_groups: Vec<Vec<Position>>,
    /// Wall-anchored constraint slots, in the order they were recorded.
    standard_blocks: Vec<(Position, usize)>,
    wall_colors: HashMap<Position, Vec<WallColorInfo>>,
    /// Largest x of any cell.
    pub(crate) width: i32,
    /// Largest y of any cell.
    pub(crate) height: i32,
    pub(crate) groups: Vec<DragGroup>,
}

impl BoardModel {
    pub(crate) fn new(stage_index: usize) -> Self {
        Self {
            stage_index,
            grid: Grid::new(),
            check_groups: Vec::new(),
            standard_blocks: Vec::new(),
            wall_colors: HashMap::new(),
            width: 0,
            height: 0,
            groups: Vec::new(),
        }
    }

    /// Forget everything and start building the given stage.
    pub(crate) fn initialize(&mut self, stage_index: usize) {
        *self = Self::new(stage_index);
    }

    /// Adds a board cell, copying every wall constraint recorded at its coordinate.
    /// Walls must be placed before the cells they border.
    pub(crate) fn set_board_block(&mut self, data: &BoardBlockData) -> bool {
        let pos = data.pos();
        if self.grid.contains(pos) {
            log::warn!("Duplicate board block at ({}, {})", pos.x, pos.y);
            return false;
        }

        let mut cell = BoardCell::new(pos);
        for info in self.wall_colors.get(&pos).into_iter().flatten() {
            self.standard_blocks.push((pos, cell.constraints.len()));
            cell.add_constraint(info.color, info.length, info.direction.is_horizontal_run());
        }
        self.grid.insert(cell)
    }

    pub(crate) fn set_board_size(&mut self) {
        self.width = self.grid.max_x();
        self.height = self.grid.max_y();
    }

    /// Creates an empty drag group for a playing block. Returns its id.
    pub(crate) fn set_play_block(&mut self, data: &PlayingBlockData) -> usize {
        let center = Position::new(data.center.x, data.center.y);
        let mut group = DragGroup::new(
            data.unique_index,
            center,
            center.to_world(PLAY_BLOCK_HEIGHT),
        );
        group.gimmicks = data
            .gimmicks
            .iter()
            .map(|g| g.gimmick_type.trim())
            .filter(|g| !g.is_empty() && *g != "None")
            .map(str::to_string)
            .collect();
        self.groups.push(group);
        self.groups.len() - 1
    }

    /// Adds one cell of a playing block to its group and puts it on the board.
    pub(crate) fn set_play_single_block(
        &mut self,
        group_id: usize,
        data: &PlayingBlockData,
        shape: &ShapeData,
    ) {
        let Some(group) = self.groups.get_mut(group_id) else {
            log::warn!("No drag group {} for block {}", group_id, data.unique_index);
            return;
        };
        let offset = PositionDelta::new(shape.offset.x, shape.offset.y);
        let block = PlayingBlock::new(data.color, group.center, offset);
        group.add_block(block);

        let occupant = Occupant {
            group: group_id,
            block: group.blocks.len() - 1,
            color: data.color,
        };
        match self.grid.get_mut(block.pos) {
            Some(cell) => cell.occupant = Some(occupant),
            None => log::warn!(
                "Playing block {} starts off the board at ({}, {})",
                data.unique_index,
                block.pos.x,
                block.pos.y
            ),
        }
    }

    pub(crate) fn group(&self, group_id: usize) -> Option<&DragGroup> {
        self.groups.get(group_id)
    }

    pub(crate) fn group_mut(&mut self, group_id: usize) -> Option<&mut DragGroup> {
        self.groups.get_mut(group_id)
    }

    /// Moves a group so its pivot rests on `center`, carrying board occupancy along.
    ///
    /// Refused, leaving everything in place, if any destination cell is held
    /// by another group.
    pub(crate) fn move_group(&mut self, group_id: usize, center: Position) -> bool {
        let Some(group) = self.groups.get(group_id) else {
            return false;
        };
        let blocked = group.blocks.iter().find_map(|block| {
            self.grid
                .occupant_at(center + block.offset)
                .filter(|occupant| occupant.group != group_id)
        });
        if let Some(other) = blocked {
            log::debug!(
                "Group {} cannot move to ({}, {}): cell held by group {}",
                group_id,
                center.x,
                center.y,
                other.group
            );
            return false;
        }

        self.vacate(group_id);
        let group = &mut self.groups[group_id];
        group.set_coordinate(center);
        group.position = center.to_world(group.position.y);
        self.occupy(group_id);
        true
    }

    /// Puts a group back over the cell it last rested on.
    pub(crate) fn snap_group(&mut self, group_id: usize) {
        if let Some(group) = self.groups.get_mut(group_id) {
            group.position = group.center.to_world(group.position.y);
        }
    }

    /// True once every drag group has been consumed.
    pub(crate) fn is_cleared(&self) -> bool {
        !self.groups.is_empty() && self.groups.iter().all(|g| !g.enabled)
    }

    fn vacate(&mut self, group_id: usize) {
        for block in &self.groups[group_id].blocks {
            if let Some(cell) = self.grid.get_mut(block.pos)
                && cell.occupant.is_some_and(|o| o.group == group_id)
            {
                cell.occupant = None;
            }
        }
    }

    fn occupy(&mut self, group_id: usize) {
        for (i, block) in self.groups[group_id].blocks.iter().enumerate() {
            let Some(cell) = self.grid.get_mut(block.pos) else {
                continue;
            };
            cell.occupant = Some(Occupant {
                group: group_id,
                block: i,
                color: block.color,
            });
        }
    }
}
