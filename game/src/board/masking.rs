use macroquad::math::{Vec2, vec2};

use crate::position::Position;

use super::BoardModel;

/// Rings of border tiles drawn around the board.
const MASK_MARGIN: i32 = 3;
/// Border tiles next to the board are pushed out to clear the walls.
const MASK_WALL_OFFSET: f32 = 0.225;

impl BoardModel {
    /// Grid-space positions (x, y) of every cosmetic border tile.
    ///
    /// Covers `[-3, width + 3] x [-3, height + 3]` minus the board cells.
    pub(crate) fn masking_positions(&self) -> Vec<Vec2> {
        let (w, h) = (self.width, self.height);
        let mut positions = Vec::new();

        for i in -MASK_MARGIN..=w + MASK_MARGIN {
            for j in -MASK_MARGIN..=h + MASK_MARGIN {
                if self.grid.contains(Position::new(i, j)) {
                    continue;
                }

                let mut x = i as f32;
                let mut z = j as f32;
                if i == -1 && j <= h {
                    x -= MASK_WALL_OFFSET;
                }
                if i == w + 1 && j <= h + 1 {
                    x += MASK_WALL_OFFSET;
                }
                if j == -1 && i <= w {
                    z -= MASK_WALL_OFFSET;
                }
                if j == h + 1 && i <= w + 1 {
                    z += MASK_WALL_OFFSET;
                }

                positions.push(vec2(x, z));
            }
        }

        positions
    }
}
