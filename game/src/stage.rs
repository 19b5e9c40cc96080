//! Serialized stage input: board cells, walls and the playing blocks to drag.

use serde::{Deserialize, Serialize};

use crate::color::ColorType;
use crate::position::Position;

mod parse;
pub(crate) use parse::StageError;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StageData {
    /// File stem the stage was loaded from.
    #[serde(skip)]
    pub(crate) id: String,
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) board_blocks: Vec<BoardBlockData>,
    #[serde(default)]
    pub(crate) walls: Vec<WallData>,
    #[serde(default)]
    pub(crate) playing_blocks: Vec<PlayingBlockData>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct BoardBlockData {
    pub(crate) x: i32,
    pub(crate) y: i32,
}

impl BoardBlockData {
    pub(crate) fn pos(&self) -> Position {
        Position::new(self.x, self.y)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct WallData {
    pub(crate) x: i32,
    pub(crate) y: i32,
    /// One of the `WallDirection` names; unknown names are rejected when the wall is placed.
    pub(crate) direction: String,
    #[serde(default)]
    pub(crate) color: ColorType,
    #[serde(default = "default_length")]
    pub(crate) length: i32,
}

fn default_length() -> i32 {
    1
}

impl WallData {
    pub(crate) fn pos(&self) -> Position {
        Position::new(self.x, self.y)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct GridPoint {
    pub(crate) x: i32,
    pub(crate) y: i32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PlayingBlockData {
    pub(crate) center: GridPoint,
    #[serde(default)]
    pub(crate) unique_index: i32,
    pub(crate) color: ColorType,
    #[serde(default)]
    pub(crate) gimmicks: Vec<GimmickData>,
    pub(crate) shapes: Vec<ShapeData>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GimmickData {
    pub(crate) gimmick_type: String,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub(crate) struct ShapeData {
    pub(crate) offset: GridPoint,
}
