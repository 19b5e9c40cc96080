//! Wires a stage into the board model and reports what to draw.

use macroquad::math::{Vec2, Vec3};

use crate::board::{BoardModel, DestroyEffect, PLAY_BLOCK_HEIGHT, WallTransform};
use crate::drag::DragGroup;
use crate::position::Position;
use crate::stage::StageData;

/// Everything the board asks its view to show.
pub(crate) trait BoardView {
    fn clear(&mut self);
    fn create_board_block(&mut self, pos: Position, world: Vec3);
    fn create_wall(&mut self, wall: WallTransform);
    fn create_playing_block(&mut self, group_id: usize, group: &DragGroup);
    fn create_destroy_effect(&mut self, effect: DestroyEffect);
    fn show_masking(&mut self, positions: &[Vec2]);
}

pub(crate) struct BoardPresenter<V> {
    pub(crate) model: BoardModel,
    pub(crate) view: V,
    stages: Vec<StageData>,
}

impl<V: BoardView> BoardPresenter<V> {
    pub(crate) fn new(view: V, stages: Vec<StageData>) -> Self {
        Self {
            model: BoardModel::new(0),
            view,
            stages,
        }
    }

    pub(crate) fn stage(&self) -> Option<&StageData> {
        self.stages.get(self.model.stage_index)
    }

    pub(crate) fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Builds the board for a stage. An unknown index leaves the current board alone.
    pub(crate) fn init(&mut self, stage_idx: usize) -> bool {
        let Some(stage) = self.stages.get(stage_idx) else {
            log::error!(
                "Stage index {} out of range ({} stages)",
                stage_idx,
                self.stages.len()
            );
            return false;
        };

        self.model.initialize(stage_idx);
        self.view.clear();

        // Walls first: cells pick up the constraints recorded at their coordinate.
        for wall in &stage.walls {
            if let Some(transform) = self.model.set_wall(wall) {
                self.view.create_wall(transform);
            }
        }
        for block in &stage.board_blocks {
            if self.model.set_board_block(block) {
                let pos = block.pos();
                self.view.create_board_block(pos, pos.to_world(0.0));
            }
        }
        self.model.set_standard_block();
        self.model.set_check_block_group();
        self.model.set_board_size();

        for data in &stage.playing_blocks {
            let group_id = self.model.set_play_block(data);
            for shape in &data.shapes {
                self.model.set_play_single_block(group_id, data, shape);
            }
            if let Some(group) = self.model.group(group_id) {
                self.view.create_playing_block(group_id, group);
            }
        }

        self.view.show_masking(&self.model.masking_positions());
        log::debug!(
            "Stage {} ({}) ready: {} cells ({} checked), {} check groups, {} playing blocks",
            stage.id,
            stage.name,
            self.model.grid.len(),
            self.model.grid.cells().filter(|c| c.is_check_block).count(),
            self.model.check_groups.len(),
            self.model.groups.len()
        );
        true
    }

    pub(crate) fn restart(&mut self) -> bool {
        self.init(self.model.stage_index)
    }

    pub(crate) fn go_to_next_stage(&mut self) -> bool {
        let next = self.model.stage_index + 1;
        next < self.stages.len() && self.init(next)
    }

    pub(crate) fn go_to_previous_stage(&mut self) -> bool {
        match self.model.stage_index.checked_sub(1) {
            Some(prev) => self.init(prev),
            None => false,
        }
    }

    /// Settles a dragged group at `drop_pos` and evaluates it against the walls.
    ///
    /// Returns the effects handed to the view. A drop that misses the board,
    /// or lands on cells held by another group, sends the group back to the
    /// cell it came from.
    pub(crate) fn handle_block_dropped(
        &mut self,
        group_id: usize,
        drop_pos: Vec3,
    ) -> Vec<DestroyEffect> {
        let Some(group) = self.model.group(group_id) else {
            log::warn!("Dropped unknown group {}", group_id);
            return Vec::new();
        };
        if !group.enabled {
            return Vec::new();
        }

        let target = Position::from_world(drop_pos);
        if !self.model.grid.contains(target) {
            log::warn!(
                "Group {} dropped off the board at ({}, {})",
                group_id,
                target.x,
                target.y
            );
            self.model.snap_group(group_id);
            return Vec::new();
        }

        if !self.model.move_group(group_id, target) {
            log::warn!(
                "Group {} dropped onto another group at ({}, {})",
                group_id,
                target.x,
                target.y
            );
            self.model.snap_group(group_id);
            return Vec::new();
        }
        let destroy_start = target.to_world(PLAY_BLOCK_HEIGHT);
        let block_count = self.model.group(group_id).map_or(0, |g| g.blocks.len());

        let mut effects = Vec::new();
        for block_idx in 0..block_count {
            if let Some(effect) =
                self.model
                    .check_adjacent_block(target, group_id, block_idx, destroy_start)
            {
                self.view.create_destroy_effect(effect);
                effects.push(effect);
            }
        }
        effects
    }

    pub(crate) fn is_cleared(&self) -> bool {
        self.model.is_cleared()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::direction::Dir4;
    use macroquad::math::vec3;

    #[derive(Default)]
    struct RecordingView {
        cleared: usize,
        cells: Vec<Position>,
        walls: Vec<WallTransform>,
        groups: Vec<usize>,
        effects: Vec<DestroyEffect>,
        masking: usize,
    }

    impl BoardView for RecordingView {
        fn clear(&mut self) {
            *self = Self {
                cleared: self.cleared + 1,
                ..Self::default()
            };
        }

        fn create_board_block(&mut self, pos: Position, _world: Vec3) {
            self.cells.push(pos);
        }

        fn create_wall(&mut self, wall: WallTransform) {
            self.walls.push(wall);
        }

        fn create_playing_block(&mut self, group_id: usize, _group: &DragGroup) {
            self.groups.push(group_id);
        }

        fn create_destroy_effect(&mut self, effect: DestroyEffect) {
            self.effects.push(effect);
        }

        fn show_masking(&mut self, positions: &[Vec2]) {
            self.masking = positions.len();
        }
    }

    const DOMINO: &str = r#"{
        "name": "Domino",
        "walls": [
            { "x": 1, "y": 0, "direction": "Single_Down", "color": "Red", "length": 2 },
            { "x": 3, "y": 3, "direction": "Right_Up" },
            { "x": 0, "y": 0, "direction": "Sideways", "color": "Red" }
        ],
        "playingBlocks": [
            {
                "center": { "x": 1, "y": 2 },
                "uniqueIndex": 0,
                "color": "Red",
                "shapes": [{ "offset": { "x": 0, "y": 0 } }, { "offset": { "x": 1, "y": 0 } }]
            }
        ]
    }"#;

    const SINGLE: &str = r#"{
        "name": "Single",
        "walls": [{ "x": 0, "y": 0, "direction": "Single_Left", "color": "Blue" }],
        "playingBlocks": [
            {
                "center": { "x": 1, "y": 1 },
                "color": "Blue",
                "shapes": [{ "offset": { "x": 0, "y": 0 } }]
            }
        ]
    }"#;

    const SQUARE: &str = "#,#,#,#\n#,#,#,#\n#,#,#,#\n#,#,#,#";

    fn presenter() -> BoardPresenter<RecordingView> {
        let stages = vec![
            StageData::parse("01_domino", SQUARE, DOMINO).unwrap(),
            StageData::parse("02_single", "#,#\n#,#", SINGLE).unwrap(),
        ];
        let mut presenter = BoardPresenter::new(RecordingView::default(), stages);
        assert!(presenter.init(0));
        presenter
    }

    fn world(x: i32, y: i32) -> Vec3 {
        Position::new(x, y).to_world(PLAY_BLOCK_HEIGHT)
    }

    #[test]
    fn init_reports_the_board_to_the_view() {
        let p = presenter();
        assert_eq!(p.view.cells.len(), 16);
        // The unknown wall direction is dropped, the rest are drawn.
        assert_eq!(p.view.walls.len(), 2);
        assert_eq!(p.view.groups, vec![0]);
        assert_eq!(p.view.masking, 10 * 10 - 16);
        assert_eq!((p.model.width, p.model.height), (3, 3));
        assert_eq!(p.model.check_groups.len(), 1);
        assert_eq!(p.stage().map(|s| s.name.as_str()), Some("Domino"));
    }

    #[test]
    fn invalid_stage_index_changes_nothing() {
        let mut p = presenter();
        assert!(!p.init(5));
        assert_eq!(p.model.stage_index, 0);
        assert_eq!(p.model.grid.len(), 16);
        assert_eq!(p.view.cleared, 1);
    }

    #[test]
    fn matching_drop_produces_an_effect() {
        let mut p = presenter();
        // Slightly off-centre still resolves to (1, 0).
        let effects = p.handle_block_dropped(0, world(1, 0) + vec3(0.2, 0.0, -0.1));
        assert_eq!(effects.len(), 1);
        assert_eq!(effects[0].direction, Dir4::Down);
        assert_eq!(effects[0].block_length, 2);
        assert_eq!(p.view.effects, effects);
        assert!(p.is_cleared());
    }

    #[test]
    fn non_matching_drop_moves_the_group() {
        let mut p = presenter();
        assert!(p.handle_block_dropped(0, world(0, 3)).is_empty());
        let group = p.model.group(0).unwrap();
        assert_eq!(group.center, Position::new(0, 3));
        assert!(group.enabled);
        assert_eq!(
            p.model.grid.occupant_at(Position::new(1, 3)).map(|o| o.block),
            Some(1)
        );
        assert!(p.model.grid.occupant_at(Position::new(1, 2)).is_none());
        assert!(!p.is_cleared());
    }

    #[test]
    fn drop_off_the_board_snaps_back() {
        let mut p = presenter();
        p.model.group_mut(0).unwrap().position = vec3(9.0, PLAY_BLOCK_HEIGHT, 9.0);

        assert!(p.handle_block_dropped(0, vec3(9.0, 0.0, 9.0)).is_empty());
        let group = p.model.group(0).unwrap();
        assert_eq!(group.center, Position::new(1, 2));
        assert!((group.position - world(1, 2)).length() < 1e-5);
        assert!(p.model.grid.occupant_at(Position::new(1, 2)).is_some());
    }

    #[test]
    fn drop_onto_another_group_snaps_back() {
        const CROWDED: &str = r#"{
            "name": "Crowded",
            "walls": [
                { "x": 1, "y": 0, "direction": "Single_Down", "color": "Red", "length": 2 }
            ],
            "playingBlocks": [
                {
                    "center": { "x": 1, "y": 2 },
                    "color": "Red",
                    "shapes": [{ "offset": { "x": 0, "y": 0 } }, { "offset": { "x": 1, "y": 0 } }]
                },
                {
                    "center": { "x": 2, "y": 0 },
                    "uniqueIndex": 1,
                    "color": "Blue",
                    "shapes": [{ "offset": { "x": 0, "y": 0 } }]
                }
            ]
        }"#;
        let stages = vec![StageData::parse("crowded", SQUARE, CROWDED).unwrap()];
        let mut p = BoardPresenter::new(RecordingView::default(), stages);
        assert!(p.init(0));

        assert!(p.handle_block_dropped(0, world(1, 0)).is_empty());
        let red = p.model.group(0).unwrap();
        assert!(red.enabled);
        assert_eq!(red.center, Position::new(1, 2));
        assert!((red.position - world(1, 2)).length() < 1e-5);
        assert_eq!(
            p.model.grid.occupant_at(Position::new(2, 0)).map(|o| o.group),
            Some(1)
        );
        assert!(p.model.grid.occupant_at(Position::new(1, 0)).is_none());
        assert!(p.view.effects.is_empty());

        // The covered group can still be moved, and once it is gone the drop lands.
        assert!(p.handle_block_dropped(1, world(3, 3)).is_empty());
        assert_eq!(p.handle_block_dropped(0, world(1, 0)).len(), 1);
    }

    #[test]
    fn consumed_group_ignores_further_drops() {
        let mut p = presenter();
        assert_eq!(p.handle_block_dropped(0, world(1, 0)).len(), 1);
        assert!(p.handle_block_dropped(0, world(2, 2)).is_empty());
        assert_eq!(p.view.effects.len(), 1);
        assert!(p.handle_block_dropped(7, world(1, 0)).is_empty());
    }

    #[test]
    fn stage_navigation_is_bounded() {
        let mut p = presenter();
        assert!(!p.go_to_previous_stage());
        assert!(p.go_to_next_stage());
        assert_eq!(p.model.stage_index, 1);
        assert_eq!(p.view.cells.len(), 4);
        assert!(!p.go_to_next_stage());
        assert_eq!(p.model.stage_index, 1);
        assert!(p.go_to_previous_stage());
        assert_eq!(p.model.stage_index, 0);
    }

    #[test]
    fn restart_rebuilds_the_stage() {
        let mut p = presenter();
        p.handle_block_dropped(0, world(1, 0));
        assert!(p.is_cleared());

        assert!(p.restart());
        assert!(!p.is_cleared());
        assert_eq!(p.model.group(0).unwrap().center, Position::new(1, 2));
        assert!(p.view.effects.is_empty());
        assert_eq!(p.view.cleared, 2);
    }
}
