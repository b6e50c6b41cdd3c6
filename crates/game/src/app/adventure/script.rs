#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ScriptLine {
    /// Sets the actor's walk target; does not block.
    Move { actor: String, target: Vec2 },
    /// Blocks until the actor has no target left.
    WaitFor { actor: String },
    /// Sets the actor's facing; does not block.
    Turn {
        actor: String,
        direction: Direction,
    },
    /// Blocks for `duration` seconds, then re-arms for any later replay.
    Delay { duration: f32, timer: f32 },
    /// Opens the dialog once, then blocks until it is dismissed.
    Dialog {
        lines: Vec<DialogLine>,
        has_been_opened: bool,
    },
    /// Restarts the script from its first line.
    Loop,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct Script {
    /// Actors this script claims while playing (their patrols pause).
    pub(crate) required_actors: Vec<String>,
    /// Autoplay scripts begin on the scene's first update tick.
    pub(crate) autoplay: bool,
    pub(crate) lines: Vec<ScriptLine>,
    pub(crate) current_line_index: usize,
    pub(crate) playing: bool,
}

impl Script {
    pub(crate) fn is_finished(&self) -> bool {
        self.current_line_index >= self.lines.len()
    }

    pub(crate) fn restart(&mut self) {
        self.current_line_index = 0;
    }

    pub(crate) fn increment(&mut self) {
        self.current_line_index += 1;
    }
}
