mod geometry;
mod input;
mod loop_runner;
mod rendering;
mod state;

pub use geometry::{Rect, Vec2};
pub use input::InputAction;
pub use loop_runner::{run_app, AppError, LoopConfig};
pub use rendering::{
    ImageId, ImageStore, Renderer, Rgba, COLOR_WHITE, SCREEN_HEIGHT, SCREEN_WIDTH,
    TEXT_GLYPH_ADVANCE, TEXT_LINE_ADVANCE,
};
pub use state::{InputSnapshot, State, StateCommand, StateStack};
