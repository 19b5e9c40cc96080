use std::ops::RangeInclusive;

use macroquad::math::{Quat, Vec3, vec3};

use crate::color::ColorType;
use crate::direction::Dir4;
use crate::grid::BoardCell;
use crate::position::{BLOCK_DISTANCE, Position};

use super::BoardModel;

/// Height the destroy effect starts at.
const EFFECT_HEIGHT: f32 = 0.55;
/// Launch offset away from the board along the launch direction.
const LAUNCH_FORWARD: f32 = 0.65;
/// Launch offset for side launches.
const LAUNCH_SIDE: f32 = 0.55;
/// Far end of a path scan when the group has no block in the scanned row.
const SCAN_LIMIT: i32 = 100;

/// What the view needs to animate a destroyed group.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct DestroyEffect {
    pub(crate) group: usize,
    pub(crate) color: ColorType,
    /// Extent of the group along the run it matched.
    pub(crate) block_length: i32,
    /// Signed travel, in cells, towards the nearer board edge.
    pub(crate) length: i32,
    pub(crate) direction: Dir4,
    pub(crate) rotation: Quat,
    pub(crate) start: Vec3,
    pub(crate) end: Vec3,
}

impl BoardModel {
    /// Evaluates dropping `block_idx` of a group onto `target`.
    ///
    /// Every constraint slot on the target whose color matches the block is
    /// tried in order. A slot that fails ends the evaluation; a slot that
    /// passes consumes the group and replaces any earlier effect, so only the
    /// last passing slot's effect is returned.
    pub(crate) fn check_adjacent_block(
        &mut self,
        target: Position,
        group_id: usize,
        block_idx: usize,
        destroy_start: Vec3,
    ) -> Option<DestroyEffect> {
        let cell = self.grid.get(target)?.clone();
        if !cell.is_check_block {
            return None;
        }
        let group = self.groups.get(group_id)?;
        if !group.enabled {
            return None;
        }
        let color = group.blocks.get(block_idx)?.color;

        let mut effect = None;
        for constraint in &cell.constraints {
            if constraint.color != color {
                continue;
            }

            let group = &self.groups[group_id];
            let (block_length, mut length) = if constraint.horizontal {
                (group.horizon, group.vertical)
            } else {
                (group.vertical, group.horizon)
            };
            if block_length > constraint.length {
                return effect;
            }
            if !self.check_can_destroy(&cell, group_id, color) {
                return effect;
            }

            self.consume_group(group_id, destroy_start);
            let group = &self.groups[group_id];

            let near_edge = if constraint.horizontal {
                cell.pos.y < self.height / 2
            } else {
                cell.pos.x < self.width / 2
            };
            if !near_edge {
                length = -length;
            }
            let travel = length as f32 * BLOCK_DISTANCE;
            let end = if constraint.horizontal {
                group.position - vec3(0.0, 0.0, travel)
            } else {
                group.position - vec3(travel, 0.0, 0.0)
            };

            let mut start = if constraint.horizontal {
                group.center_x()
            } else {
                group.center_z()
            };
            let direction = self.launch_direction(cell.pos.x, cell.pos.y, constraint.horizontal);
            let target_world = cell.pos.to_world(0.0);
            start.y = EFFECT_HEIGHT;
            match direction {
                Dir4::Up => start.z = target_world.z + LAUNCH_SIDE,
                Dir4::Down => start.z -= LAUNCH_FORWARD,
                Dir4::Left => start.x -= LAUNCH_SIDE,
                Dir4::Right => start.x = target_world.x + LAUNCH_FORWARD,
            }

            effect = Some(DestroyEffect {
                group: group_id,
                color,
                block_length,
                length,
                direction,
                rotation: Quat::from_rotation_y(direction.launch_yaw_degrees().to_radians()),
                start,
                end,
            });
        }
        effect
    }

    /// Disables a group, turns off its blocks and lifts it off the board.
    fn consume_group(&mut self, group_id: usize, position: Vec3) {
        self.vacate(group_id);
        let group = &mut self.groups[group_id];
        group.position = position;
        group.enabled = false;
        for block in &mut group.blocks {
            block.collider_off();
        }
    }

    /// Checks that the group fits inside the wall run it was dropped on and
    /// that nothing of another color sits between it and the run.
    fn check_can_destroy(&self, cell: &BoardCell, group_id: usize, color: ColorType) -> bool {
        let Some(group) = self.groups.get(group_id) else {
            return false;
        };
        if cell
            .group_indices()
            .any(|idx| idx.is_none_or(|idx| idx >= self.check_groups.len()))
        {
            return false;
        }
        let Some((pmin, pmax)) = group.bounds() else {
            return false;
        };

        let mut horizon_cells = Vec::new();
        let mut vertical_cells = Vec::new();
        for idx in cell.group_indices().flatten() {
            for &member in &self.check_groups[idx] {
                let Some(member_cell) = self.grid.get(member) else {
                    continue;
                };
                for constraint in &member_cell.constraints {
                    if constraint.horizontal {
                        horizon_cells.push(member);
                    } else {
                        vertical_cells.push(member);
                    }
                }
            }
        }

        let Some(matching) = cell.constraints.iter().find(|c| c.color == color) else {
            return false;
        };
        let half = BLOCK_DISTANCE / 2.0;

        if matching.horizontal {
            let (min_x, max_x) = horizon_cells
                .iter()
                .fold((self.width, -1), |(lo, hi), p| (lo.min(p.x), hi.max(p.x)));
            if (pmin.x as f32) < min_x as f32 - half || (pmax.x as f32) > max_x as f32 + half {
                return false;
            }

            let run_color = cell.run_color(true);
            horizon_cells.iter().all(|&member| {
                if member.x < pmin.x || member.x > pmax.x {
                    return true;
                }
                let in_row = group.blocks.iter().any(|b| b.pos.y == member.y);
                let rows = if member.y <= self.height / 2 {
                    // Bottom half: from the group (or the bottom edge) up to the run.
                    (if in_row { member.y } else { -1 })..=member.y
                } else {
                    member.y..=(if in_row { member.y } else { SCAN_LIMIT })
                };
                !self.path_blocked(rows.map(|y| Position::new(member.x, y)), run_color)
            })
        } else {
            let (min_y, max_y) = vertical_cells
                .iter()
                .fold((self.height, -1), |(lo, hi), p| (lo.min(p.y), hi.max(p.y)));
            if (pmin.y as f32) < min_y as f32 - half || (pmax.y as f32) > max_y as f32 + half {
                return false;
            }

            let run_color = cell.run_color(false);
            vertical_cells.iter().all(|&member| {
                if member.y < pmin.y || member.y > pmax.y {
                    return true;
                }
                let row_xs = || {
                    group
                        .blocks
                        .iter()
                        .filter(|b| b.pos.y == member.y)
                        .map(|b| b.pos.x)
                };
                let columns: RangeInclusive<i32> = if member.x <= self.width / 2 {
                    // Left half: from the group's rightmost block back to the run.
                    match row_xs().max() {
                        Some(from) => member.x..=from,
                        None => return true,
                    }
                } else {
                    row_xs().min().unwrap_or(SCAN_LIMIT)..=member.x
                };
                !self.path_blocked(columns.map(|x| Position::new(x, member.y)), run_color)
            })
        }
    }

    fn path_blocked(&self, mut path: impl Iterator<Item = Position>, run_color: ColorType) -> bool {
        path.any(|pos| {
            self.grid
                .occupant_at(pos)
                .is_some_and(|occupant| occupant.color != run_color)
        })
    }
}
