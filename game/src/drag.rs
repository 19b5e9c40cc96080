use macroquad::math::{Vec3, vec3};

use crate::color::ColorType;
use crate::position::{BLOCK_DISTANCE, Position, PositionDelta};

/// One cell of a draggable polyomino.
#[derive(Clone, Copy, Debug)]
pub(crate) struct PlayingBlock {
    pub(crate) color: ColorType,
    pub(crate) pos: Position,
    pub(crate) offset: PositionDelta,
    /// Cleared once the block is consumed by a match.
    pub(crate) collider: bool,
}

impl PlayingBlock {
    pub(crate) fn new(color: ColorType, center: Position, offset: PositionDelta) -> Self {
        Self {
            color,
            pos: center + offset,
            offset,
            collider: true,
        }
    }

    pub(crate) fn collider_off(&mut self) {
        self.collider = false;
    }
}

/// A group of playing blocks that is dragged and dropped as one piece.
#[derive(Clone, Debug)]
pub(crate) struct DragGroup {
    pub(crate) unique_index: i32,
    pub(crate) gimmicks: Vec<String>,
    pub(crate) blocks: Vec<PlayingBlock>,
    /// Grid cell the group's pivot rests on.
    pub(crate) center: Position,
    /// World position of the pivot.
    pub(crate) position: Vec3,
    /// Extent along x.
    pub(crate) horizon: i32,
    /// Extent along y.
    pub(crate) vertical: i32,
    /// False once the group has been consumed by a match.
    pub(crate) enabled: bool,
}

impl DragGroup {
    pub(crate) fn new(unique_index: i32, center: Position, position: Vec3) -> Self {
        Self {
            unique_index,
            gimmicks: Vec::new(),
            blocks: Vec::new(),
            center,
            position,
            horizon: 1,
            vertical: 1,
            enabled: true,
        }
    }

    pub(crate) fn add_block(&mut self, block: PlayingBlock) {
        self.blocks.push(block);
        self.recompute_extents();
    }

    fn recompute_extents(&mut self) {
        if let Some((min, max)) = self.bounds() {
            self.horizon = max.x - min.x + 1;
            self.vertical = max.y - min.y + 1;
        }
    }

    /// Inclusive bounding box of the member coordinates.
    pub(crate) fn bounds(&self) -> Option<(Position, Position)> {
        let first = self.blocks.first()?.pos;
        let (mut min, mut max) = (first, first);
        for block in &self.blocks[1..] {
            min.x = min.x.min(block.pos.x);
            min.y = min.y.min(block.pos.y);
            max.x = max.x.max(block.pos.x);
            max.y = max.y.max(block.pos.y);
        }
        Some((min, max))
    }

    /// Re-derive every member coordinate from a new pivot cell.
    pub(crate) fn set_coordinate(&mut self, center: Position) {
        self.center = center;
        for block in &mut self.blocks {
            block.pos = center + block.offset;
        }
        self.recompute_extents();
    }

    pub(crate) fn block_world(&self, block: &PlayingBlock) -> Vec3 {
        self.position
            + vec3(
                block.offset.dx as f32 * BLOCK_DISTANCE,
                0.0,
                block.offset.dy as f32 * BLOCK_DISTANCE,
            )
    }

    /// Midpoint of the members along world x, at z = 0.
    pub(crate) fn center_x(&self) -> Vec3 {
        match self.world_span(|v| v.x) {
            Some((min, max)) => vec3((min + max) / 2.0, self.position.y, 0.0),
            None => Vec3::ZERO,
        }
    }

    /// Midpoint of the members along world z, at the pivot's x.
    pub(crate) fn center_z(&self) -> Vec3 {
        match self.world_span(|v| v.z) {
            Some((min, max)) => vec3(self.position.x, self.position.y, (min + max) / 2.0),
            None => Vec3::ZERO,
        }
    }

    fn world_span(&self, axis: impl Fn(Vec3) -> f32) -> Option<(f32, f32)> {
        self.blocks
            .iter()
            .map(|block| axis(self.block_world(block)))
            .fold(None, |span, v| match span {
                None => Some((v, v)),
                Some((min, max)) => Some((min.min(v), max.max(v))),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn l_piece() -> DragGroup {
        let center = Position::new(2, 2);
        let mut group = DragGroup::new(0, center, center.to_world(0.33));
        for (dx, dy) in [(0, 0), (0, 1), (0, 2), (1, 0)] {
            group.add_block(PlayingBlock::new(
                ColorType::Blue,
                center,
                PositionDelta::new(dx, dy),
            ));
        }
        group
    }

    #[test]
    fn extents_track_membership() {
        let center = Position::new(0, 0);
        let mut group = DragGroup::new(0, center, Vec3::ZERO);
        group.add_block(PlayingBlock::new(ColorType::Red, center, PositionDelta::new(0, 0)));
        assert_eq!((group.horizon, group.vertical), (1, 1));
        group.add_block(PlayingBlock::new(ColorType::Red, center, PositionDelta::new(2, 0)));
        assert_eq!((group.horizon, group.vertical), (3, 1));

        let group = l_piece();
        assert_eq!((group.horizon, group.vertical), (2, 3));
    }

    #[test]
    fn set_coordinate_moves_every_member() {
        let mut group = l_piece();
        group.set_coordinate(Position::new(5, 1));
        let coords: Vec<_> = group.blocks.iter().map(|b| b.pos).collect();
        assert_eq!(
            coords,
            vec![
                Position::new(5, 1),
                Position::new(5, 2),
                Position::new(5, 3),
                Position::new(6, 1)
            ]
        );
        assert_eq!(group.bounds(), Some((Position::new(5, 1), Position::new(6, 3))));
    }

    #[test]
    fn centers_use_member_world_positions() {
        let group = l_piece();
        let cx = group.center_x();
        assert!((cx.x - 2.5 * BLOCK_DISTANCE).abs() < 1e-5);
        assert_eq!(cx.z, 0.0);

        let cz = group.center_z();
        assert!((cz.z - 3.0 * BLOCK_DISTANCE).abs() < 1e-5);
        assert!((cz.x - 2.0 * BLOCK_DISTANCE).abs() < 1e-5);
    }

    #[test]
    fn empty_group_centers_are_zero() {
        let group = DragGroup::new(0, Position::new(3, 3), Position::new(3, 3).to_world(0.33));
        assert_eq!(group.center_x(), Vec3::ZERO);
        assert_eq!(group.center_z(), Vec3::ZERO);
        assert_eq!(group.bounds(), None);
    }
}
