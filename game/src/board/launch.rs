use crate::direction::Dir4;

use super::BoardModel;

impl BoardModel {
    pub(crate) fn launch_direction(&self, x: i32, y: i32, horizontal: bool) -> Dir4 {
        launch_direction(x, y, horizontal, self.width, self.height)
    }
}

/// Which way a destroyed group flies off the board from the edge cell (x, y).
///
/// Corners are resolved first, then the four edges in the order
/// left, bottom, right, top. Interior cells fall back to `Up`.
pub(crate) fn launch_direction(x: i32, y: i32, horizontal: bool, width: i32, height: i32) -> Dir4 {
    let pick = |h: Dir4, v: Dir4| if horizontal { h } else { v };

    if x == 0 && y == 0 {
        return pick(Dir4::Down, Dir4::Left);
    }
    if x == 0 && y == height {
        return pick(Dir4::Up, Dir4::Left);
    }
    if x == width && y == 0 {
        return pick(Dir4::Down, Dir4::Right);
    }
    if x == width && y == height {
        return pick(Dir4::Up, Dir4::Right);
    }

    if x == 0 || y == 0 {
        return pick(Dir4::Down, Dir4::Left);
    }
    if x == width {
        return pick(Dir4::Down, Dir4::Right);
    }
    if y == height {
        return pick(Dir4::Up, Dir4::Right);
    }

    Dir4::Up
}
