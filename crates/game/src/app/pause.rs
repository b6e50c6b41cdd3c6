use engine::{
    InputAction, InputSnapshot, Renderer, State, StateCommand, COLOR_WHITE, SCREEN_HEIGHT,
    SCREEN_WIDTH, TEXT_GLYPH_ADVANCE, TEXT_LINE_ADVANCE,
};
use tracing::info;

const PAUSE_LABEL: &str = "PAUSED";
const PANEL_PADDING: i32 = 8;

/// Freezes gameplay underneath itself; dismissed with the pause key.
pub(crate) struct PauseState;

impl State for PauseState {
    fn update(&mut self, _fixed_dt_seconds: f32, input: &InputSnapshot) -> StateCommand {
        if input.quit_requested() || input.was_pressed(InputAction::Quit) {
            return StateCommand::Quit;
        }
        if input.was_pressed(InputAction::Pause) {
            info!("pause_dismissed");
            return StateCommand::Pop;
        }
        StateCommand::None
    }

    fn render(&mut self, renderer: &mut Renderer) {
        let text_width = PAUSE_LABEL.chars().count() as i32 * TEXT_GLYPH_ADVANCE;
        let x = (SCREEN_WIDTH as i32 - text_width) / 2;
        let y = (SCREEN_HEIGHT as i32 - TEXT_LINE_ADVANCE) / 2;
        renderer.draw_panel(
            x - PANEL_PADDING,
            y - PANEL_PADDING,
            text_width + 2 * PANEL_PADDING,
            TEXT_LINE_ADVANCE + 2 * PANEL_PADDING,
        );
        renderer.draw_text(PAUSE_LABEL, COLOR_WHITE, x, y);
    }

    fn render_previous(&self) -> bool {
        true
    }
}
