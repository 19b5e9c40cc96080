use crate::direction::Dir4;

use super::BoardModel;

impl BoardModel {
    /// Spreads each wall-anchored constraint over the rest of its run:
    /// rightwards for horizontal runs, towards larger y for vertical ones.
    pub(crate) fn set_standard_block(&mut self) {
        for i in 0..self.standard_blocks.len() {
            let (anchor, slot) = self.standard_blocks[i];
            let Some(constraint) = self
                .grid
                .get(anchor)
                .and_then(|cell| cell.constraints.get(slot))
                .copied()
            else {
                continue;
            };

            let spread = if constraint.horizontal {
                Dir4::Right
            } else {
                Dir4::Down
            };

            let mut pos = anchor;
            for _ in 1..constraint.length {
                pos = pos + spread.delta();
                if let Some(target) = self.grid.get_mut(pos) {
                    target.add_constraint(constraint.color, constraint.length, constraint.horizontal);
                }
            }
        }
    }

    /// Assigns every constraint slot to a check group.
    ///
    /// Cells are visited in insertion order. A slot joins the group of the
    /// same slot on its left (horizontal) or upper (vertical) neighbour when
    /// that slot has the same color and orientation and is already grouped;
    /// otherwise it opens a new group. The walk looks the opposite way from
    /// `set_standard_block`, so groups only ever grow rightwards/downwards.
    pub(crate) fn set_check_block_group(&mut self) {
        let positions = self.grid.positions().to_vec();
        for pos in positions {
            let slots = match self.grid.get(pos) {
                Some(cell) if cell.is_check_block => cell.constraints.len(),
                _ => continue,
            };

            for j in 0..slots {
                let constraint = match self.grid.get(pos) {
                    Some(cell) => cell.constraints[j],
                    None => continue,
                };
                if constraint.color.is_none() || constraint.group.is_some() {
                    continue;
                }

                let walk = if constraint.horizontal {
                    Dir4::Left
                } else {
                    Dir4::Up
                };
                let joined = self
                    .grid
                    .get(pos + walk.delta())
                    .and_then(|neighbor| neighbor.constraints.get(j))
                    .filter(|n| n.color == constraint.color && n.horizontal == constraint.horizontal)
                    .and_then(|n| n.group);

                let group = match joined {
                    Some(group) => group,
                    None => {
                        self.check_groups.push(Vec::new());
                        self.check_groups.len() - 1
                    }
                };
                self.check_groups[group].push(pos);
                if let Some(cell) = self.grid.get_mut(pos) {
                    cell.constraints[j].group = Some(group);
                }
            }
        }
    }
}
