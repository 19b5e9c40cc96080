pub(crate) mod board;
pub(crate) mod color;
pub(crate) mod direction;
pub(crate) mod drag;
pub(crate) mod grid;
pub(crate) mod position;
pub(crate) mod presenter;
pub(crate) mod render;
pub(crate) mod stage;
pub(crate) mod stages;
pub(crate) mod storage;

pub mod game_app;
