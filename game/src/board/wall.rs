use macroquad::math::{Quat, Vec3, vec3};

use crate::color::ColorType;
use crate::direction::{Axis, Dir4, WallDirection};
use crate::position::{BLOCK_DISTANCE, Position};
use crate::stage::WallData;

use super::BoardModel;

/// Where the view should put a wall.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct WallTransform {
    pub(crate) direction: WallDirection,
    pub(crate) color: ColorType,
    pub(crate) length: i32,
    pub(crate) position: Vec3,
    pub(crate) rotation: Quat,
    pub(crate) yaw_degrees: f32,
}

/// A colored single wall recorded against the cell it borders.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(super) struct WallColorInfo {
    pub(super) direction: Dir4,
    pub(super) color: ColorType,
    pub(super) length: i32,
}

impl BoardModel {
    /// Places a wall: records its match constraint and returns its world transform.
    ///
    /// Unknown directions and non-positive lengths are logged and leave the
    /// board untouched.
    pub(crate) fn set_wall(&mut self, wall: &WallData) -> Option<WallTransform> {
        let Some(direction) = WallDirection::from_name(&wall.direction) else {
            log::error!(
                "Unsupported wall direction {:?} at ({}, {})",
                wall.direction,
                wall.x,
                wall.y
            );
            return None;
        };
        if wall.length < 1 {
            log::error!(
                "Wall at ({}, {}) has invalid length {}",
                wall.x,
                wall.y,
                wall.length
            );
            return None;
        }

        let (dx, dz) = direction.edge_offset();
        let mut position = wall.pos().to_world(0.0) + vec3(dx, 0.0, dz);

        if let Some(destroy) = direction.destroy_direction()
            && !wall.color.is_none()
        {
            self.record_wall_color(wall.pos(), destroy, wall.color, wall.length);
        }

        if wall.length > 1 {
            let shift = (wall.length - 1) as f32 * BLOCK_DISTANCE * 0.5;
            match direction.span_axis() {
                Some(Axis::X) => position.x += shift,
                Some(Axis::Z) => position.z += shift,
                None => {}
            }
        }

        let yaw_degrees = direction.yaw_degrees();
        Some(WallTransform {
            direction,
            color: wall.color,
            length: wall.length,
            position,
            rotation: Quat::from_rotation_y(yaw_degrees.to_radians()),
            yaw_degrees,
        })
    }

    fn record_wall_color(&mut self, pos: Position, direction: Dir4, color: ColorType, length: i32) {
        let infos = self.wall_colors.entry(pos).or_default();
        match infos
            .iter_mut()
            .find(|info| info.direction == direction && info.color == color)
        {
            Some(existing) => existing.length = length,
            None => infos.push(WallColorInfo {
                direction,
                color,
                length,
            }),
        }
    }

    #[cfg(test)]
    pub(super) fn wall_colors_at(&self, pos: Position) -> &[WallColorInfo] {
        self.wall_colors.get(&pos).map_or(&[], Vec::as_slice)
    }
}
