use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::{info, warn};
use winit::dpi::LogicalSize;
use winit::event::{ElementState, Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::WindowBuilder;

use super::input::{ActionStates, InputAction, ACTION_COUNT};
use super::rendering::Renderer;
use super::state::{InputSnapshot, State, StateCommand, StateStack};
use crate::StartupError;

#[derive(Debug, Clone)]
pub struct LoopConfig {
    pub window_title: String,
    pub window_width: u32,
    pub window_height: u32,
    pub target_tps: u32,
    pub max_frame_delta_ms: u64,
    pub max_ticks_per_frame: u32,
    pub asset_root: PathBuf,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            window_title: "Adventure".to_string(),
            window_width: 1280,
            window_height: 720,
            target_tps: 60,
            max_frame_delta_ms: 250,
            max_ticks_per_frame: 5,
            asset_root: PathBuf::from("assets"),
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("startup failed: {0}")]
    Startup(#[from] StartupError),
    #[error("failed to create event loop: {0}")]
    CreateEventLoop(#[source] winit::error::EventLoopError),
    #[error("failed to create window: {0}")]
    CreateWindow(#[source] winit::error::OsError),
    #[error("failed to create renderer: {0}")]
    CreateRenderer(#[source] pixels::Error),
    #[error("event loop terminated with error: {0}")]
    EventLoopRun(#[source] winit::error::EventLoopError),
}

/// Fixed-timestep loop: simulation ticks at `target_tps`, one render per
/// frame. Simulation backlog beyond `max_ticks_per_frame` is dropped with
/// a warning so a long stall cannot spiral.
pub fn run_app(config: LoopConfig, initial_state: Box<dyn State>) -> Result<(), AppError> {
    let event_loop = EventLoop::new().map_err(AppError::CreateEventLoop)?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let window = Arc::new(
        WindowBuilder::new()
            .with_title(&config.window_title)
            .with_inner_size(LogicalSize::new(config.window_width, config.window_height))
            .build(&event_loop)
            .map_err(AppError::CreateWindow)?,
    );

    let mut renderer = Renderer::new(Arc::clone(&window), config.asset_root.clone())
        .map_err(AppError::CreateRenderer)?;

    let target_tps = config.target_tps.max(1);
    let fixed_dt = Duration::from_secs_f64(1.0 / f64::from(target_tps));
    let fixed_dt_seconds = fixed_dt.as_secs_f32();
    let max_frame_delta = Duration::from_millis(config.max_frame_delta_ms);
    let max_ticks_per_frame = config.max_ticks_per_frame.max(1);

    info!(
        window_title = config.window_title.as_str(),
        target_tps,
        max_ticks_per_frame,
        asset_root = %config.asset_root.display(),
        "loop_config"
    );

    let mut states = StateStack::new();
    let mut first = initial_state;
    first.load(&mut renderer);
    states.push(first);

    let mut input = InputCollector::default();
    let mut accumulator = Duration::ZERO;
    let mut last_frame_instant = Instant::now();
    let window_for_loop = Arc::clone(&window);

    event_loop
        .run(move |event, window_target| match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    input.mark_quit_requested();
                    window_target.exit();
                }
                WindowEvent::Resized(size) => {
                    if let Err(error) = renderer.resize(size.width, size.height) {
                        warn!(error = %error, "renderer_resize_failed");
                    }
                }
                WindowEvent::KeyboardInput {
                    event: key_event, ..
                } => {
                    input.apply_key(
                        action_for_physical_key(key_event.physical_key),
                        key_event.state == ElementState::Pressed,
                    );
                }
                WindowEvent::RedrawRequested => {
                    let now = Instant::now();
                    let raw_frame_dt = now.duration_since(last_frame_instant);
                    last_frame_instant = now;
                    accumulator += clamp_frame_delta(raw_frame_dt, max_frame_delta);

                    let plan = plan_sim_steps(accumulator, fixed_dt, max_ticks_per_frame);
                    accumulator = plan.remaining_accumulator;
                    if !plan.dropped_backlog.is_zero() {
                        warn!(
                            dropped_ms = plan.dropped_backlog.as_millis() as u64,
                            "sim_backlog_dropped"
                        );
                    }

                    for _ in 0..plan.ticks_to_run {
                        let snapshot = input.snapshot_for_tick();
                        match states.update_active(fixed_dt_seconds, &snapshot) {
                            StateCommand::None => {}
                            StateCommand::Push(mut next) => {
                                next.load(&mut renderer);
                                states.push(next);
                            }
                            StateCommand::Pop => {
                                states.pop();
                                if states.is_empty() {
                                    window_target.exit();
                                    return;
                                }
                            }
                            StateCommand::Quit => {
                                window_target.exit();
                                return;
                            }
                        }
                    }

                    renderer.clear();
                    states.render_all(&mut renderer);
                    if let Err(error) = renderer.present() {
                        warn!(error = %error, "renderer_draw_failed");
                        window_target.exit();
                    }
                }
                _ => {}
            },
            Event::AboutToWait => {
                window_for_loop.request_redraw();
            }
            Event::LoopExiting => {
                info!("shutdown");
            }
            _ => {}
        })
        .map_err(AppError::EventLoopRun)
}

#[derive(Debug, Default)]
struct InputCollector {
    quit_requested: bool,
    down: ActionStates,
    pressed: ActionStates,
    released: ActionStates,
    held: [bool; ACTION_COUNT],
}

impl InputCollector {
    fn mark_quit_requested(&mut self) {
        self.quit_requested = true;
    }

    /// Key repeats do not re-fire edges; only real transitions do.
    fn apply_key(&mut self, action: Option<InputAction>, is_pressed: bool) {
        let Some(action) = action else {
            return;
        };
        let index = action.index();
        if is_pressed {
            if !self.held[index] {
                self.pressed.set(action, true);
            }
            self.held[index] = true;
            self.down.set(action, true);
        } else {
            if self.held[index] {
                self.released.set(action, true);
            }
            self.held[index] = false;
            self.down.set(action, false);
        }
    }

    fn snapshot_for_tick(&mut self) -> InputSnapshot {
        let snapshot =
            InputSnapshot::new(self.quit_requested, self.down, self.pressed, self.released);
        self.pressed = ActionStates::default();
        self.released = ActionStates::default();
        snapshot
    }
}

fn action_for_physical_key(key: PhysicalKey) -> Option<InputAction> {
    match key {
        PhysicalKey::Code(KeyCode::KeyW) | PhysicalKey::Code(KeyCode::ArrowUp) => {
            Some(InputAction::MoveUp)
        }
        PhysicalKey::Code(KeyCode::KeyS) | PhysicalKey::Code(KeyCode::ArrowDown) => {
            Some(InputAction::MoveDown)
        }
        PhysicalKey::Code(KeyCode::KeyA) | PhysicalKey::Code(KeyCode::ArrowLeft) => {
            Some(InputAction::MoveLeft)
        }
        PhysicalKey::Code(KeyCode::KeyD) | PhysicalKey::Code(KeyCode::ArrowRight) => {
            Some(InputAction::MoveRight)
        }
        PhysicalKey::Code(KeyCode::KeyE) => Some(InputAction::Interact),
        PhysicalKey::Code(KeyCode::KeyP) => Some(InputAction::Pause),
        PhysicalKey::Code(KeyCode::Escape) => Some(InputAction::Quit),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy)]
struct StepPlan {
    ticks_to_run: u32,
    remaining_accumulator: Duration,
    dropped_backlog: Duration,
}

fn plan_sim_steps(
    mut accumulator: Duration,
    fixed_dt: Duration,
    max_ticks_per_frame: u32,
) -> StepPlan {
    let mut ticks_to_run = 0u32;

    while accumulator >= fixed_dt && ticks_to_run < max_ticks_per_frame {
        accumulator = accumulator.saturating_sub(fixed_dt);
        ticks_to_run = ticks_to_run.saturating_add(1);
    }

    if accumulator >= fixed_dt {
        StepPlan {
            ticks_to_run,
            remaining_accumulator: Duration::ZERO,
            dropped_backlog: accumulator,
        }
    } else {
        StepPlan {
            ticks_to_run,
            remaining_accumulator: accumulator,
            dropped_backlog: Duration::ZERO,
        }
    }
}

fn clamp_frame_delta(frame_dt: Duration, max_frame_delta: Duration) -> Duration {
    frame_dt.min(max_frame_delta)
}
