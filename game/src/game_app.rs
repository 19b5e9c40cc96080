use std::collections::BTreeSet;

use macroquad::prelude::*;

use crate::board::PLAY_BLOCK_HEIGHT;
use crate::position::Position;
use crate::presenter::BoardPresenter;
use crate::render::{Layout, Scene, render};
use crate::stages;
use crate::storage::{load_cleared_stages, save_cleared_stages};

/// A group being dragged, and where it was grabbed relative to its pivot.
struct Drag {
    group: usize,
    grab_offset: Vec3,
}

pub struct App {
    presenter: BoardPresenter<Scene>,
    drag: Option<Drag>,
    cleared: BTreeSet<String>,
}

impl App {
    /// Opens the stage named `start`, or the first stage.
    pub fn new(start: Option<&str>) -> Self {
        let mut presenter = BoardPresenter::new(Scene::default(), stages::all().to_vec());
        let index = match start {
            Some(id) => stages::index_of(id).unwrap_or_else(|| {
                log::warn!("Unknown stage {}, starting from the first", id);
                0
            }),
            None => 0,
        };
        if !presenter.init(index) {
            log::error!("No playable stages");
        }
        Self {
            presenter,
            drag: None,
            cleared: load_cleared_stages(),
        }
    }

    fn layout(&self) -> Layout {
        Layout::new(&self.presenter.model)
    }

    fn pick_group(&self, world: Vec3) -> Option<usize> {
        let occupant = self
            .presenter
            .model
            .grid
            .occupant_at(Position::from_world(world))?;
        let group = self.presenter.model.group(occupant.group)?;
        let live = group
            .blocks
            .get(occupant.block)
            .is_some_and(|block| block.collider);
        (group.enabled && live).then_some(occupant.group)
    }

    fn handle_mouse(&mut self) {
        let layout = self.layout();
        let cursor = layout.screen_to_world(mouse_position().into(), PLAY_BLOCK_HEIGHT);

        if is_mouse_button_pressed(MouseButton::Left) && self.drag.is_none() {
            if let Some(group) = self.pick_group(cursor)
                && let Some(g) = self.presenter.model.group(group)
            {
                self.drag = Some(Drag {
                    group,
                    grab_offset: cursor - g.position,
                });
            }
        }

        let Some(drag) = &self.drag else {
            return;
        };
        let pivot = cursor - drag.grab_offset;
        if let Some(group) = self.presenter.model.group_mut(drag.group) {
            group.position = pivot;
        }

        if is_mouse_button_released(MouseButton::Left) {
            let group = drag.group;
            self.drag = None;
            self.presenter.handle_block_dropped(group, pivot);
            self.record_clear();
        }
    }

    fn record_clear(&mut self) {
        if !self.presenter.is_cleared() {
            return;
        }
        let Some(stage) = self.presenter.stage() else {
            return;
        };
        if self.cleared.insert(stage.id.clone()) {
            log::info!("Cleared stage {}", stage.id);
            save_cleared_stages(&self.cleared);
        }
    }

    fn handle_keys(&mut self) -> bool {
        if is_key_pressed(KeyCode::Escape) {
            return false;
        }
        let changed = if is_key_pressed(KeyCode::R) {
            self.presenter.restart()
        } else if is_key_pressed(KeyCode::N) {
            self.presenter.go_to_next_stage()
        } else if is_key_pressed(KeyCode::P) {
            self.presenter.go_to_previous_stage()
        } else {
            false
        };
        if changed {
            self.drag = None;
        }
        true
    }

    fn status(&self) -> String {
        let index = self.presenter.model.stage_index;
        let count = self.presenter.stage_count();
        let cleared = self
            .presenter
            .stage()
            .is_some_and(|s| self.cleared.contains(&s.id));
        let state = if self.presenter.is_cleared() && !self.presenter.view.is_animating() {
            "Stage clear! N for the next stage."
        } else {
            "Drag blocks onto the matching walls."
        };
        format!(
            "Stage {}/{}{} | {}\nR restart | N/P next/previous | Esc quit",
            index + 1,
            count,
            if cleared { " (cleared)" } else { "" },
            state
        )
    }

    /// Run one frame of the game loop. Returns false if the game should exit.
    pub fn tick(&mut self) -> bool {
        if !self.handle_keys() {
            return false;
        }
        self.handle_mouse();
        self.presenter.view.animate(get_frame_time());

        let title = self
            .presenter
            .stage()
            .map_or_else(String::new, |s| s.name.clone());
        render(
            &self.presenter.model,
            &self.presenter.view,
            &title,
            &self.status(),
        );
        true
    }
}
