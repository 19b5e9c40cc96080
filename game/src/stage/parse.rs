use csv::ReaderBuilder;

use super::{BoardBlockData, StageData};

#[derive(Debug, thiserror::Error)]
pub(crate) enum StageError {
    #[error("invalid board layout: {0}")]
    Layout(#[from] csv::Error),
    #[error("invalid stage metadata: {0}")]
    Metadata(#[from] serde_json::Error),
}

impl StageData {
    /// Builds a stage from a CSV board layout and its JSON metadata.
    ///
    /// The layout is a top-down picture of the board: `#` marks a board cell
    /// and the last row is y = 0. Cells are listed in ascending (y, x) order,
    /// which is the order the grouping pass expects to visit them in.
    pub(crate) fn parse(id: &str, csv_str: &str, json_str: &str) -> Result<Self, StageError> {
        let mut stage: StageData = serde_json::from_str(json_str)?;
        stage.id = id.to_string();
        stage.board_blocks = parse_layout(csv_str)?;
        Ok(stage)
    }
}

fn parse_layout(csv_str: &str) -> Result<Vec<BoardBlockData>, csv::Error> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(csv_str.as_bytes());

    let rows = reader
        .records()
        .collect::<Result<Vec<_>, _>>()?;

    let height = rows.len() as i32;
    let mut blocks = Vec::new();
    for (row, record) in rows.iter().enumerate() {
        let y = height - 1 - row as i32;
        for (x, field) in record.iter().enumerate() {
            if field.trim() == "#" {
                blocks.push(BoardBlockData { x: x as i32, y });
            }
        }
    }
    blocks.sort_by_key(|b| (b.y, b.x));
    Ok(blocks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::ColorType;

    const META: &str = r#"{
        "name": "Two Reds",
        "walls": [
            { "x": 0, "y": 0, "direction": "Single_Down", "color": "Red", "length": 2 },
            { "x": 2, "y": 1, "direction": "Right_Up" }
        ],
        "playingBlocks": [
            {
                "center": { "x": 1, "y": 1 },
                "uniqueIndex": 7,
                "color": "Red",
                "gimmicks": [{ "gimmickType": "None" }],
                "shapes": [{ "offset": { "x": 0, "y": 0 } }, { "offset": { "x": 1, "y": 0 } }]
            }
        ]
    }"#;

    #[test]
    fn layout_last_row_is_bottom() {
        let stage = StageData::parse("t", "#,.,#\n#,#,#", META).unwrap();
        let coords: Vec<_> = stage.board_blocks.iter().map(|b| (b.x, b.y)).collect();
        assert_eq!(coords, vec![(0, 0), (1, 0), (2, 0), (0, 1), (2, 1)]);
    }

    #[test]
    fn ragged_rows_are_allowed() {
        let stage = StageData::parse("t", "#\n#,#,#", META).unwrap();
        assert_eq!(stage.board_blocks.len(), 4);
        assert!(stage.board_blocks.contains(&BoardBlockData { x: 0, y: 1 }));
    }

    #[test]
    fn metadata_fields_and_defaults() {
        let stage = StageData::parse("01_two_reds", "#,#", META).unwrap();
        assert_eq!(stage.id, "01_two_reds");
        assert_eq!(stage.name, "Two Reds");

        assert_eq!(stage.walls[0].color, ColorType::Red);
        assert_eq!(stage.walls[0].length, 2);
        // Color and length fall back to None / 1.
        assert_eq!(stage.walls[1].color, ColorType::None);
        assert_eq!(stage.walls[1].length, 1);

        let block = &stage.playing_blocks[0];
        assert_eq!(block.unique_index, 7);
        assert_eq!(block.shapes.len(), 2);
        assert_eq!(block.gimmicks[0].gimmick_type, "None");
    }

    #[test]
    fn unknown_color_is_a_metadata_error() {
        let json = r#"{ "name": "x", "walls": [{ "x": 0, "y": 0, "direction": "Single_Up", "color": "Teal" }] }"#;
        let err = StageData::parse("x", "#", json).unwrap_err();
        assert!(matches!(err, StageError::Metadata(_)));
    }

    #[test]
    fn unknown_wall_direction_still_parses() {
        let json = r#"{ "name": "x", "walls": [{ "x": 0, "y": 0, "direction": "Sideways" }] }"#;
        let stage = StageData::parse("x", "#", json).unwrap();
        assert_eq!(stage.walls[0].direction, "Sideways");
    }
}
