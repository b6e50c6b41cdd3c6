#[derive(Debug)]
pub(crate) struct AdventureScene {
    background_path: String,
    background: ImageId,
    map_size: Vec2,
    colliders: Vec<Rect>,
    scenery: Vec<Scenery>,
    actors: Vec<Actor>,
    player_index: usize,
    scripts: Vec<Script>,
    current_script: Option<usize>,
    autoplay_checked: bool,
    dialog: Dialog,
    /// Actor currently facing the player because its dialog is open.
    actor_being_spoken_to: Option<usize>,
    direction_key_held: [bool; 4],
    player_direction: Vec2,
    camera_offset: Vec2,
}

impl AdventureScene {
    #[allow(clippy::too_many_arguments)]
    fn new(
        background_path: String,
        map_size: Vec2,
        colliders: Vec<Rect>,
        scenery: Vec<Scenery>,
        actors: Vec<Actor>,
        player_index: usize,
        scripts: Vec<Script>,
    ) -> Self {
        Self {
            background_path,
            background: ImageId::default(),
            map_size,
            colliders,
            scenery,
            actors,
            player_index,
            scripts,
            current_script: None,
            autoplay_checked: false,
            dialog: Dialog::default(),
            actor_being_spoken_to: None,
            direction_key_held: [false; 4],
            player_direction: Vec2::ZERO,
            camera_offset: Vec2::ZERO,
        }
    }

    /// Fallback scene for when a scene file fails to load: just a player
    /// on an empty map.
    pub(crate) fn empty() -> Self {
        Self::new(
            String::new(),
            Vec2::new(SCREEN_WIDTH as f32, SCREEN_HEIGHT as f32),
            Vec::new(),
            Vec::new(),
            vec![Actor::new(PLAYER_NAME, PLAYER_IMAGE_PREFIX)],
            0,
            Vec::new(),
        )
    }

    fn find_actor(&self, name: &str) -> Option<usize> {
        let found = self.actors.iter().position(|actor| actor.name == name);
        if found.is_none() {
            warn!(actor = name, "actor_not_found_in_scene");
        }
        found
    }

    /// Starts a script. Only one script may play at a time; a second
    /// begin is logged and ignored.
    pub(crate) fn begin_script(&mut self, script_index: usize) {
        if script_index >= self.scripts.len() {
            warn!(script = script_index, "script_index_out_of_range");
            return;
        }
        if let Some(active) = self.current_script {
            warn!(
                requested = script_index,
                active, "script_already_playing_ignoring_begin"
            );
            return;
        }

        let required: Vec<usize> = self.scripts[script_index]
            .required_actors
            .clone()
            .iter()
            .filter_map(|name| self.find_actor(name))
            .collect();
        for actor_index in required {
            self.actors[actor_index].in_scene = true;
        }

        self.scripts[script_index].restart();
        self.scripts[script_index].playing = true;
        self.current_script = Some(script_index);
        info!(script = script_index, "script_started");
    }

    fn finish_script(&mut self, script_index: usize) {
        let required: Vec<usize> = self.scripts[script_index]
            .required_actors
            .clone()
            .iter()
            .filter_map(|name| self.find_actor(name))
            .collect();
        for actor_index in required {
            self.actors[actor_index].in_scene = false;
            self.actors[actor_index].target = None;
            self.actors[actor_index].velocity = Vec2::ZERO;
        }

        self.scripts[script_index].playing = false;
        self.current_script = None;
        info!(script = script_index, "script_finished");
    }

    /// Runs the active script for one tick. Non-blocking lines chain
    /// within the tick; the iteration cap guards all-non-blocking loops.
    fn step_current_script(&mut self, delta: f32) {
        let Some(script_index) = self.current_script else {
            return;
        };

        let mut steps = 0usize;
        loop {
            if steps >= MAX_SCRIPT_STEPS_PER_TICK {
                warn!(script = script_index, "script_step_budget_exhausted");
                break;
            }
            steps += 1;

            if self.scripts[script_index].is_finished() {
                self.finish_script(script_index);
                break;
            }

            let line_index = self.scripts[script_index].current_line_index;
            match self.scripts[script_index].lines[line_index].clone() {
                ScriptLine::Move { actor, target } => {
                    if let Some(actor_index) = self.find_actor(&actor) {
                        self.actors[actor_index].target = Some(target);
                    }
                    self.scripts[script_index].increment();
                }
                ScriptLine::WaitFor { actor } => {
                    match self.find_actor(&actor) {
                        Some(actor_index) if self.actors[actor_index].has_target() => break,
                        _ => self.scripts[script_index].increment(),
                    }
                }
                ScriptLine::Turn { actor, direction } => {
                    if let Some(actor_index) = self.find_actor(&actor) {
                        self.actors[actor_index].facing = direction;
                    }
                    self.scripts[script_index].increment();
                }
                ScriptLine::Delay { duration, .. } => {
                    let expired = {
                        let ScriptLine::Delay { timer, .. } =
                            &mut self.scripts[script_index].lines[line_index]
                        else {
                            unreachable!("line type cannot change between reads");
                        };
                        *timer -= delta;
                        if *timer > 0.0 {
                            false
                        } else {
                            *timer = duration;
                            true
                        }
                    };
                    if !expired {
                        break;
                    }
                    self.scripts[script_index].increment();
                }
                ScriptLine::Dialog {
                    lines,
                    has_been_opened,
                } => {
                    if !has_been_opened {
                        self.dialog.open(&lines);
                        self.actor_being_spoken_to = None;
                        if let ScriptLine::Dialog {
                            has_been_opened, ..
                        } = &mut self.scripts[script_index].lines[line_index]
                        {
                            *has_been_opened = true;
                        }
                        break;
                    }
                    if self.dialog.is_open() {
                        break;
                    }
                    if let ScriptLine::Dialog {
                        has_been_opened, ..
                    } = &mut self.scripts[script_index].lines[line_index]
                    {
                        *has_been_opened = false;
                    }
                    self.scripts[script_index].increment();
                }
                ScriptLine::Loop => {
                    self.scripts[script_index].restart();
                }
            }
        }
    }

    fn begin_autoplay_script(&mut self) {
        if let Some(script_index) = self.scripts.iter().position(|script| script.autoplay) {
            self.begin_script(script_index);
        }
    }

    /// WASD bookkeeping with opposite-key restore: releasing one key of
    /// an opposed pair falls back to the other if it is still held.
    fn handle_movement_input(&mut self, input: &InputSnapshot) {
        if input.was_pressed(InputAction::MoveUp) {
            self.player_direction.y = -1.0;
            self.direction_key_held[Direction::Up as usize] = true;
        }
        if input.was_pressed(InputAction::MoveDown) {
            self.player_direction.y = 1.0;
            self.direction_key_held[Direction::Down as usize] = true;
        }
        if input.was_pressed(InputAction::MoveLeft) {
            self.player_direction.x = -1.0;
            self.direction_key_held[Direction::Left as usize] = true;
        }
        if input.was_pressed(InputAction::MoveRight) {
            self.player_direction.x = 1.0;
            self.direction_key_held[Direction::Right as usize] = true;
        }

        if input.was_released(InputAction::MoveUp) {
            self.player_direction.y = if self.direction_key_held[Direction::Down as usize] {
                1.0
            } else {
                0.0
            };
            self.direction_key_held[Direction::Up as usize] = false;
        }
        if input.was_released(InputAction::MoveDown) {
            self.player_direction.y = if self.direction_key_held[Direction::Up as usize] {
                -1.0
            } else {
                0.0
            };
            self.direction_key_held[Direction::Down as usize] = false;
        }
        if input.was_released(InputAction::MoveLeft) {
            self.player_direction.x = if self.direction_key_held[Direction::Right as usize] {
                1.0
            } else {
                0.0
            };
            self.direction_key_held[Direction::Left as usize] = false;
        }
        if input.was_released(InputAction::MoveRight) {
            self.player_direction.x = if self.direction_key_held[Direction::Left as usize] {
                -1.0
            } else {
                0.0
            };
            self.direction_key_held[Direction::Right as usize] = false;
        }
    }

    fn reset_movement_input(&mut self) {
        self.direction_key_held = [false; 4];
        self.player_direction = Vec2::ZERO;
        self.actors[self.player_index].velocity = Vec2::ZERO;
    }

    /// Thin probe extending from the player's bounding box in the facing
    /// direction. Actors are checked before scenery, in roster order.
    fn interact_probe_rect(&self) -> Rect {
        let player_rect = self.actors[self.player_index].rect();
        match self.actors[self.player_index].facing {
            Direction::Up => Rect::new(
                player_rect.x,
                player_rect.y - INTERACT_PROBE_DEPTH,
                player_rect.w,
                INTERACT_PROBE_DEPTH,
            ),
            Direction::Down => Rect::new(
                player_rect.x,
                player_rect.y + player_rect.h,
                player_rect.w,
                INTERACT_PROBE_DEPTH,
            ),
            Direction::Left => Rect::new(
                player_rect.x - INTERACT_PROBE_DEPTH,
                player_rect.y,
                INTERACT_PROBE_DEPTH,
                player_rect.h,
            ),
            Direction::Right => Rect::new(
                player_rect.x + player_rect.w,
                player_rect.y,
                INTERACT_PROBE_DEPTH,
                player_rect.h,
            ),
        }
    }

    fn player_interact(&mut self) {
        let probe = self.interact_probe_rect();

        for actor_index in 0..self.actors.len() {
            if actor_index == self.player_index {
                continue;
            }
            if !probe.intersects(&self.actors[actor_index].rect()) {
                continue;
            }
            let lines = self.actors[actor_index].dialog.clone();
            if !lines.is_empty() {
                self.dialog.open(&lines);
                self.actor_being_spoken_to = Some(actor_index);
            }
            return;
        }

        for scenery_index in 0..self.scenery.len() {
            if !probe.intersects(&self.scenery[scenery_index].collider) {
                continue;
            }
            let lines = self.scenery[scenery_index].description.clone();
            if !lines.is_empty() {
                self.dialog.open(&lines);
                self.actor_being_spoken_to = None;
            }
            return;
        }
    }

    /// Portrait for the current dialog line, matched against the roster
    /// by speaker name. Scenery descriptions have no portrait.
    fn dialog_portrait(&self) -> Option<ImageId> {
        let speaker = self.dialog.speaker()?;
        if speaker.is_empty() {
            return None;
        }
        self.actors
            .iter()
            .find(|actor| actor.name.eq_ignore_ascii_case(speaker))
            .map(|actor| actor.profile_image)
    }

    /// Moves the camera at a fixed speed whenever the player leaves the
    /// center dead zone, then clamps to the map bounds.
    fn update_camera(&mut self) {
        let player_rect = self.actors[self.player_index].rect();
        let player_center = Vec2::new(
            player_rect.x as f32 + player_rect.w as f32 / 2.0,
            player_rect.y as f32 + player_rect.h as f32 / 2.0,
        );
        let screen_position = player_center - self.camera_offset;

        let min_x = SCREEN_WIDTH as f32 * CAMERA_DEADZONE_MIN_FRACTION;
        let max_x = SCREEN_WIDTH as f32 * CAMERA_DEADZONE_MAX_FRACTION;
        let min_y = SCREEN_HEIGHT as f32 * CAMERA_DEADZONE_MIN_FRACTION;
        let max_y = SCREEN_HEIGHT as f32 * CAMERA_DEADZONE_MAX_FRACTION;

        if screen_position.x < min_x {
            self.camera_offset.x -= (min_x - screen_position.x).min(CAMERA_SPEED_PER_TICK);
        } else if screen_position.x > max_x {
            self.camera_offset.x += (screen_position.x - max_x).min(CAMERA_SPEED_PER_TICK);
        }
        if screen_position.y < min_y {
            self.camera_offset.y -= (min_y - screen_position.y).min(CAMERA_SPEED_PER_TICK);
        } else if screen_position.y > max_y {
            self.camera_offset.y += (screen_position.y - max_y).min(CAMERA_SPEED_PER_TICK);
        }

        let max_offset_x = (self.map_size.x - SCREEN_WIDTH as f32).max(0.0);
        let max_offset_y = (self.map_size.y - SCREEN_HEIGHT as f32).max(0.0);
        self.camera_offset.x = self.camera_offset.x.clamp(0.0, max_offset_x);
        self.camera_offset.y = self.camera_offset.y.clamp(0.0, max_offset_y);
    }
}
