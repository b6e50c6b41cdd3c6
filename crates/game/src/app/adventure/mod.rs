use std::collections::VecDeque;
use std::fs;
use std::path::Path;

use engine::{
    ImageId, ImageStore, InputAction, InputSnapshot, Rect, Renderer, State, StateCommand, Vec2,
    COLOR_WHITE, SCREEN_HEIGHT, SCREEN_WIDTH, TEXT_GLYPH_ADVANCE, TEXT_LINE_ADVANCE,
};
use serde::Deserialize;
use tracing::{info, warn};

use super::pause::PauseState;

const PLAYER_NAME: &str = "player";
const PLAYER_IMAGE_PREFIX: &str = "actors/player";
const ACTOR_SPEED_PER_TICK: f32 = 1.0;
const ACTOR_FRAME_DURATION_SECONDS: f32 = 0.1;
const ACTOR_FRAME_SIZE: u32 = 32;
const DEFAULT_WALK_FRAME_COUNT: u32 = 8;
const DIALOG_REVEAL_INTERVAL_SECONDS: f32 = 0.05;
const DIALOG_MAX_ROWS: usize = 3;
const DIALOG_ROW_MAX_CHARS: usize = 37;
const DIALOG_BOX_RECT: Rect = Rect {
    x: 10,
    y: 260,
    w: 620,
    h: 90,
};
const DIALOG_TEXT_PADDING: i32 = 10;
const INTERACT_PROBE_DEPTH: i32 = 8;
const CAMERA_DEADZONE_MIN_FRACTION: f32 = 0.4;
const CAMERA_DEADZONE_MAX_FRACTION: f32 = 0.6;
const CAMERA_SPEED_PER_TICK: f32 = 2.0;
const MAX_SCRIPT_STEPS_PER_TICK: usize = 32;

type SceneLoadResult<T> = Result<T, String>;

include!("types.rs");
include!("actor.rs");
include!("dialog.rs");
include!("script.rs");
include!("loader.rs");
include!("scene_state.rs");
include!("scene_impl.rs");

#[cfg(test)]
mod tests {
    include!("tests.rs");
}
