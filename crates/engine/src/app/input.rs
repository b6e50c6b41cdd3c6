#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    Interact,
    Pause,
    Quit,
}

pub(crate) const ACTION_COUNT: usize = 7;

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct ActionStates {
    down: [bool; ACTION_COUNT],
}

impl ActionStates {
    pub(crate) fn set(&mut self, action: InputAction, is_down: bool) {
        self.down[action.index()] = is_down;
    }

    pub(crate) fn is_down(&self, action: InputAction) -> bool {
        self.down[action.index()]
    }
}

impl InputAction {
    pub(crate) const fn index(self) -> usize {
        match self {
            InputAction::MoveUp => 0,
            InputAction::MoveDown => 1,
            InputAction::MoveLeft => 2,
            InputAction::MoveRight => 3,
            InputAction::Interact => 4,
            InputAction::Pause => 5,
            InputAction::Quit => 6,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_states_track_down_flags_per_action() {
        let mut states = ActionStates::default();
        assert!(!states.is_down(InputAction::Interact));

        states.set(InputAction::Interact, true);
        states.set(InputAction::MoveLeft, true);
        assert!(states.is_down(InputAction::Interact));
        assert!(states.is_down(InputAction::MoveLeft));
        assert!(!states.is_down(InputAction::MoveRight));

        states.set(InputAction::Interact, false);
        assert!(!states.is_down(InputAction::Interact));
    }
}
