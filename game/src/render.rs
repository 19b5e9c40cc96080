use macroquad::prelude::*;

use crate::board::{BoardModel, DestroyEffect, WallTransform};
use crate::color::ColorType;
use crate::direction::WallDirection;
use crate::drag::DragGroup;
use crate::position::{BLOCK_DISTANCE, Position};
use crate::presenter::BoardView;

const PADDING: f32 = 4.0;
const DIALOGUE_HEIGHT: f32 = 110.0;
const DIALOGUE_PADDING: f32 = 12.0;
/// Grid cells of border drawn around the board on each side.
const BORDER_CELLS: f32 = 3.5;
/// Destroy animations complete in one second.
const EFFECT_SPEED: f32 = 1.0;

fn block_color(color: ColorType) -> Color {
    match color {
        ColorType::None => Color::from_rgba(90, 90, 100, 255),
        ColorType::Red => Color::from_rgba(220, 60, 60, 255),
        ColorType::Orange => Color::from_rgba(235, 140, 50, 255),
        ColorType::Yellow => Color::from_rgba(235, 210, 60, 255),
        ColorType::Gray => Color::from_rgba(150, 150, 160, 255),
        ColorType::Purple => Color::from_rgba(150, 80, 200, 255),
        ColorType::Beige => Color::from_rgba(220, 200, 160, 255),
        ColorType::Blue => Color::from_rgba(60, 110, 225, 255),
        ColorType::Green => Color::from_rgba(70, 185, 90, 255),
    }
}

struct EffectAnimation {
    effect: DestroyEffect,
    progress: f32,
}

/// What the board has asked to be drawn.
#[derive(Default)]
pub(crate) struct Scene {
    cells: Vec<Position>,
    walls: Vec<WallTransform>,
    pieces: Vec<usize>,
    masking: Vec<Vec2>,
    effects: Vec<EffectAnimation>,
}

impl BoardView for Scene {
    fn clear(&mut self) {
        *self = Self::default();
    }

    fn create_board_block(&mut self, pos: Position, _world: Vec3) {
        self.cells.push(pos);
    }

    fn create_wall(&mut self, wall: WallTransform) {
        log::trace!(
            "{} wall at {:?}, yaw {}",
            wall.direction.name(),
            wall.position,
            wall.yaw_degrees
        );
        self.walls.push(wall);
    }

    fn create_playing_block(&mut self, group_id: usize, group: &DragGroup) {
        if !group.gimmicks.is_empty() {
            log::debug!(
                "Block {} has gimmicks {:?}, drawn as a plain block",
                group.unique_index,
                group.gimmicks
            );
        }
        self.pieces.push(group_id);
    }

    fn create_destroy_effect(&mut self, effect: DestroyEffect) {
        log::debug!(
            "Group {} ({} long) launched {:?}, travelling {} cells",
            effect.group,
            effect.block_length,
            effect.direction,
            effect.length
        );
        self.effects.push(EffectAnimation {
            effect,
            progress: 0.0,
        });
    }

    fn show_masking(&mut self, positions: &[Vec2]) {
        self.masking = positions.to_vec();
    }
}

impl Scene {
    pub(crate) fn is_animating(&self) -> bool {
        !self.effects.is_empty()
    }

    /// Advance destroy animations by dt seconds, dropping finished ones.
    pub(crate) fn animate(&mut self, dt: f32) {
        for anim in &mut self.effects {
            anim.progress = (anim.progress + dt * EFFECT_SPEED).min(1.0);
        }
        self.effects.retain(|anim| anim.progress < 1.0);
    }

    fn animation_for(&self, group_id: usize) -> Option<&EffectAnimation> {
        self.effects.iter().find(|anim| anim.effect.group == group_id)
    }
}

/// Maps grid units (x right, y up the screen) to pixels.
#[derive(Clone, Copy)]
pub(crate) struct Layout {
    cell: f32,
    origin: Vec2,
}

impl Layout {
    pub(crate) fn new(model: &BoardModel) -> Self {
        let cols = model.width as f32 + 1.0 + 2.0 * BORDER_CELLS;
        let rows = model.height as f32 + 1.0 + 2.0 * BORDER_CELLS;
        let avail_w = screen_width() - PADDING * 2.0;
        let avail_h = screen_height() - DIALOGUE_HEIGHT - PADDING * 2.0;
        let cell = (avail_w / cols).min(avail_h / rows);

        let grid_w = cols * cell;
        let left = (screen_width() - grid_w) / 2.0;
        // Screen position of grid (0, 0)'s centre.
        let origin = vec2(
            left + (BORDER_CELLS + 0.5) * cell,
            PADDING + (model.height as f32 + BORDER_CELLS + 0.5) * cell,
        );
        Self { cell, origin }
    }

    /// Centre of a grid-space point on screen.
    fn to_screen(self, grid: Vec2) -> Vec2 {
        vec2(
            self.origin.x + grid.x * self.cell,
            self.origin.y - grid.y * self.cell,
        )
    }

    pub(crate) fn world_to_screen(self, world: Vec3) -> Vec2 {
        self.to_screen(vec2(world.x, world.z) / BLOCK_DISTANCE)
    }

    pub(crate) fn screen_to_world(self, screen: Vec2, height: f32) -> Vec3 {
        let gx = (screen.x - self.origin.x) / self.cell;
        let gy = (self.origin.y - screen.y) / self.cell;
        vec3(gx * BLOCK_DISTANCE, height, gy * BLOCK_DISTANCE)
    }

    fn dialogue_y(self, model: &BoardModel) -> f32 {
        let rows = model.height as f32 + 1.0 + 2.0 * BORDER_CELLS;
        (PADDING * 2.0 + rows * self.cell).min(screen_height() - DIALOGUE_HEIGHT)
    }
}

fn draw_square(layout: Layout, grid: Vec2, scale: f32, color: Color) {
    let size = layout.cell * scale;
    let c = layout.to_screen(grid);
    draw_rectangle(c.x - size / 2.0, c.y - size / 2.0, size, size, color);
}

fn draw_wall(layout: Layout, wall: &WallTransform) {
    let c = layout.world_to_screen(wall.position);
    let thickness = layout.cell * 0.18;
    let color = if wall.color.is_none() {
        Color::from_rgba(120, 120, 135, 255)
    } else {
        block_color(wall.color)
    };

    match wall.direction.span_axis() {
        Some(_) => {
            let span = wall.length as f32 * layout.cell;
            // Unrotated walls run along world x.
            let along = wall.rotation * Vec3::X;
            let (w, h) = if along.x.abs() > along.z.abs() {
                (span, thickness)
            } else {
                (thickness, span)
            };
            draw_rectangle(c.x - w / 2.0, c.y - h / 2.0, w, h, color);
            if matches!(
                wall.direction,
                WallDirection::OpenUp
                    | WallDirection::OpenDown
                    | WallDirection::OpenLeft
                    | WallDirection::OpenRight
            ) {
                draw_rectangle_lines(c.x - w / 2.0, c.y - h / 2.0, w, h, 2.0, DARKGRAY);
            }
        }
        None => draw_rectangle(
            c.x - thickness / 2.0,
            c.y - thickness / 2.0,
            thickness,
            thickness,
            color,
        ),
    }
}

fn draw_group(layout: Layout, group: &DragGroup, pivot: Vec3, alpha: f32) {
    for block in &group.blocks {
        let world = pivot
            + vec3(
                block.offset.dx as f32 * BLOCK_DISTANCE,
                0.0,
                block.offset.dy as f32 * BLOCK_DISTANCE,
            );
        let c = layout.world_to_screen(world);
        let size = layout.cell * 0.86;
        let mut color = block_color(block.color);
        color.a = alpha;
        draw_rectangle(c.x - size / 2.0, c.y - size / 2.0, size, size, color);
        draw_rectangle_lines(
            c.x - size / 2.0,
            c.y - size / 2.0,
            size,
            size,
            2.0,
            Color::new(0.0, 0.0, 0.0, 0.4 * alpha),
        );
    }
}

/// Arrow at the launch point, pointing the way the group flies off.
fn draw_launch_arrow(layout: Layout, effect: &DestroyEffect, alpha: f32) {
    // A zero yaw launches towards -z.
    let heading = effect.rotation * Vec3::NEG_Z;
    let dir = vec2(heading.x, -heading.z).normalize_or_zero();
    let side = vec2(-dir.y, dir.x);
    let tip = layout.world_to_screen(effect.start);
    let size = layout.cell * 0.4;
    let mut color = block_color(effect.color);
    color.a = alpha;
    draw_triangle(
        tip + dir * size,
        tip - dir * size * 0.5 + side * size * 0.6,
        tip - dir * size * 0.5 - side * size * 0.6,
        color,
    );
}

pub(crate) fn render(model: &BoardModel, scene: &Scene, title: &str, status: &str) {
    let layout = Layout::new(model);

    clear_background(Color::from_rgba(30, 30, 40, 255));

    for &pos in &scene.masking {
        draw_square(layout, pos, 1.0, Color::from_rgba(45, 45, 58, 255));
    }
    for &pos in &scene.cells {
        let p = vec2(pos.x as f32, pos.y as f32);
        let shade = if (pos.x + pos.y) % 2 == 0 { 200 } else { 185 };
        draw_square(layout, p, 0.98, Color::from_rgba(shade, shade, shade + 10, 255));
    }
    for wall in &scene.walls {
        draw_wall(layout, wall);
    }

    for anim in &scene.effects {
        draw_launch_arrow(layout, &anim.effect, 1.0 - anim.progress);
    }

    for &group_id in &scene.pieces {
        let Some(group) = model.group(group_id) else {
            continue;
        };
        if group.enabled {
            draw_group(layout, group, group.position, 1.0);
        } else if let Some(anim) = scene.animation_for(group_id) {
            let pivot = group.position.lerp(anim.effect.end, anim.progress);
            draw_group(layout, group, pivot, 1.0 - anim.progress);
        }
    }

    render_dialogue(title, status, layout.dialogue_y(model));
}

fn render_dialogue(title: &str, status: &str, dialogue_y: f32) {
    let dialogue_height = screen_height() - dialogue_y;

    draw_rectangle(
        0.0,
        dialogue_y,
        screen_width(),
        dialogue_height,
        Color::from_rgba(20, 20, 30, 255),
    );
    draw_line(
        0.0,
        dialogue_y,
        screen_width(),
        dialogue_y,
        2.0,
        Color::from_rgba(60, 60, 80, 255),
    );

    let font_size: u16 = 26;
    let line_height = font_size as f32 * 1.2;
    let max_width = screen_width() - DIALOGUE_PADDING * 2.0;
    let color = Color::from_rgba(200, 200, 220, 255);

    let mut y = dialogue_y + DIALOGUE_PADDING + font_size as f32;
    draw_text(title, DIALOGUE_PADDING, y, font_size as f32, WHITE);
    y += line_height;
    for line in wrap_text(status, font_size, max_width) {
        draw_text(&line, DIALOGUE_PADDING, y, font_size as f32, color);
        y += line_height;
    }
}

fn wrap_text(text: &str, font_size: u16, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            let test = if line.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", line, word)
            };
            if measure_text(&test, None, font_size, 1.0).width > max_width && !line.is_empty() {
                lines.push(line);
                line = word.to_string();
            } else {
                line = test;
            }
        }
        lines.push(line);
    }
    lines
}
