use crate::position::PositionDelta;

/// Cardinal direction. `Up` walks towards smaller y on the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum Dir4 {
    Up,
    Down,
    Left,
    Right,
}

impl Dir4 {
    pub(crate) fn delta(self) -> PositionDelta {
        match self {
            Dir4::Up => PositionDelta::new(0, -1),
            Dir4::Down => PositionDelta::new(0, 1),
            Dir4::Left => PositionDelta::new(-1, 0),
            Dir4::Right => PositionDelta::new(1, 0),
        }
    }

    /// Walls on the top or bottom edge of a cell guard a run along x.
    pub(crate) fn is_horizontal_run(self) -> bool {
        matches!(self, Dir4::Up | Dir4::Down)
    }

    /// Yaw about the world Y axis for a destroy effect launched this way.
    pub(crate) fn launch_yaw_degrees(self) -> f32 {
        match self {
            Dir4::Up => 180.0,
            Dir4::Down => 0.0,
            Dir4::Left => 90.0,
            Dir4::Right => -90.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Axis {
    X,
    Z,
}

/// The 12 wall placements a stage can contain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum WallDirection {
    SingleUp,
    SingleDown,
    SingleLeft,
    SingleRight,
    LeftUp,
    LeftDown,
    RightUp,
    RightDown,
    OpenUp,
    OpenDown,
    OpenLeft,
    OpenRight,
}

impl WallDirection {
    pub(crate) fn all() -> [Self; 12] {
        use WallDirection::*;
        [
            SingleUp, SingleDown, SingleLeft, SingleRight, LeftUp, LeftDown, RightUp, RightDown,
            OpenUp, OpenDown, OpenLeft, OpenRight,
        ]
    }

    /// Name as written in stage files.
    pub(crate) fn name(self) -> &'static str {
        use WallDirection::*;
        match self {
            SingleUp => "Single_Up",
            SingleDown => "Single_Down",
            SingleLeft => "Single_Left",
            SingleRight => "Single_Right",
            LeftUp => "Left_Up",
            LeftDown => "Left_Down",
            RightUp => "Right_Up",
            RightDown => "Right_Down",
            OpenUp => "Open_Up",
            OpenDown => "Open_Down",
            OpenLeft => "Open_Left",
            OpenRight => "Open_Right",
        }
    }

    pub(crate) fn from_name(name: &str) -> Option<Self> {
        Self::all().into_iter().find(|dir| dir.name() == name.trim())
    }

    /// Only single walls constrain matching; corners and open walls are decoration.
    pub(crate) fn destroy_direction(self) -> Option<Dir4> {
        match self {
            Self::SingleUp => Some(Dir4::Up),
            Self::SingleDown => Some(Dir4::Down),
            Self::SingleLeft => Some(Dir4::Left),
            Self::SingleRight => Some(Dir4::Right),
            _ => None,
        }
    }

    /// Offset (dx, dz) in world units from the cell centre to the wall.
    pub(crate) fn edge_offset(self) -> (f32, f32) {
        use WallDirection::*;
        match self {
            SingleUp | OpenUp => (0.0, 0.5),
            SingleDown | OpenDown => (0.0, -0.5),
            SingleLeft | OpenLeft => (-0.5, 0.0),
            SingleRight | OpenRight => (0.5, 0.0),
            LeftUp => (-0.5, 0.5),
            LeftDown => (-0.5, -0.5),
            RightUp => (0.5, 0.5),
            RightDown => (0.5, -0.5),
        }
    }

    pub(crate) fn yaw_degrees(self) -> f32 {
        use WallDirection::*;
        match self {
            SingleUp | OpenUp | LeftUp => 180.0,
            SingleDown | OpenDown | LeftDown | RightDown => 0.0,
            SingleLeft | OpenLeft => 90.0,
            SingleRight | OpenRight => -90.0,
            RightUp => 270.0,
        }
    }

    /// Axis a wall longer than one cell is centred along. Corners never stretch.
    pub(crate) fn span_axis(self) -> Option<Axis> {
        use WallDirection::*;
        match self {
            SingleUp | SingleDown | OpenUp | OpenDown => Some(Axis::X),
            SingleLeft | SingleRight | OpenLeft | OpenRight => Some(Axis::Z),
            LeftUp | LeftDown | RightUp | RightDown => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for dir in WallDirection::all() {
            assert_eq!(WallDirection::from_name(dir.name()), Some(dir));
        }
        assert_eq!(WallDirection::from_name("Diagonal"), None);
    }

    #[test]
    fn only_single_walls_destroy() {
        let destroying: Vec<_> = WallDirection::all()
            .into_iter()
            .filter_map(WallDirection::destroy_direction)
            .collect();
        assert_eq!(
            destroying,
            vec![Dir4::Up, Dir4::Down, Dir4::Left, Dir4::Right]
        );
    }
}
