use std::ops::{Add, Sub};

use macroquad::math::{Vec3, vec3};

/// World units between neighbouring board cells.
pub(crate) const BLOCK_DISTANCE: f32 = 0.79;

/// Board-local grid address. Cells live on the world X/Z plane.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct Position {
    pub(crate) x: i32,
    pub(crate) y: i32,
}

impl Position {
    pub(crate) fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// World-space position of this cell at the given height.
    pub(crate) fn to_world(self, height: f32) -> Vec3 {
        vec3(
            self.x as f32 * BLOCK_DISTANCE,
            height,
            self.y as f32 * BLOCK_DISTANCE,
        )
    }

    /// The cell directly below a world-space point.
    pub(crate) fn from_world(world: Vec3) -> Self {
        Self {
            x: (world.x / BLOCK_DISTANCE).round() as i32,
            y: (world.z / BLOCK_DISTANCE).round() as i32,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct PositionDelta {
    pub(crate) dx: i32,
    pub(crate) dy: i32,
}

impl PositionDelta {
    pub(crate) fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }
}

impl Add<PositionDelta> for Position {
    type Output = Position;

    fn add(self, delta: PositionDelta) -> Position {
        let x = self.x + delta.dx;
        let y = self.y + delta.dy;
        Position { x, y }
    }
}

impl Sub for Position {
    type Output = PositionDelta;

    fn sub(self, other: Position) -> PositionDelta {
        PositionDelta {
            dx: self.x - other.x,
            dy: self.y - other.y,
        }
    }
}
