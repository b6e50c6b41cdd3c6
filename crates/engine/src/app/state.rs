use super::input::{ActionStates, InputAction};
use super::rendering::Renderer;

/// Immutable view of input for one simulation tick. Edge flags
/// (pressed/released) fire on the first tick after the key event only.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputSnapshot {
    quit_requested: bool,
    down: ActionStates,
    pressed: ActionStates,
    released: ActionStates,
}

impl InputSnapshot {
    pub(crate) fn new(
        quit_requested: bool,
        down: ActionStates,
        pressed: ActionStates,
        released: ActionStates,
    ) -> Self {
        Self {
            quit_requested,
            down,
            pressed,
            released,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    pub fn is_down(&self, action: InputAction) -> bool {
        self.down.is_down(action)
    }

    pub fn was_pressed(&self, action: InputAction) -> bool {
        self.pressed.is_down(action)
    }

    pub fn was_released(&self, action: InputAction) -> bool {
        self.released.is_down(action)
    }

    pub fn with_action_down(mut self, action: InputAction, is_down: bool) -> Self {
        self.down.set(action, is_down);
        self
    }

    pub fn with_action_pressed(mut self, action: InputAction, pressed: bool) -> Self {
        self.pressed.set(action, pressed);
        if pressed {
            self.down.set(action, true);
        }
        self
    }

    pub fn with_action_released(mut self, action: InputAction, released: bool) -> Self {
        self.released.set(action, released);
        if released {
            self.down.set(action, false);
        }
        self
    }

    pub fn with_quit_requested(mut self, quit_requested: bool) -> Self {
        self.quit_requested = quit_requested;
        self
    }
}

/// What a state asks the loop to do after one update tick.
pub enum StateCommand {
    None,
    Push(Box<dyn State>),
    Pop,
    Quit,
}

pub trait State {
    /// Called once when the state is pushed, before its first update.
    fn load(&mut self, _renderer: &mut Renderer) {}

    fn update(&mut self, fixed_dt_seconds: f32, input: &InputSnapshot) -> StateCommand;

    fn render(&mut self, renderer: &mut Renderer);

    /// States that return true are drawn on top of the state below them.
    fn render_previous(&self) -> bool {
        false
    }
}

/// Stack of game states. Only the top state updates; rendering walks down
/// past states that request the previous frame underneath.
#[derive(Default)]
pub struct StateStack {
    states: Vec<Box<dyn State>>,
}

impl StateStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, state: Box<dyn State>) {
        self.states.push(state);
    }

    pub fn pop(&mut self) -> bool {
        self.states.pop().is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn update_active(&mut self, fixed_dt_seconds: f32, input: &InputSnapshot) -> StateCommand {
        match self.states.last_mut() {
            Some(state) => state.update(fixed_dt_seconds, input),
            None => StateCommand::Quit,
        }
    }

    pub fn render_all(&mut self, renderer: &mut Renderer) {
        let start = self.first_render_index();
        for state in &mut self.states[start..] {
            state.render(renderer);
        }
    }

    fn first_render_index(&self) -> usize {
        let mut index = self.states.len().saturating_sub(1);
        while index > 0 && self.states[index].render_previous() {
            index -= 1;
        }
        index
    }
}
