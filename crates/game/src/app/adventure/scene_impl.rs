impl State for AdventureScene {
    fn load(&mut self, renderer: &mut Renderer) {
        let images = renderer.images_mut();
        if !self.background_path.is_empty() {
            self.background = images.load_image(&self.background_path);
        }
        for actor in &mut self.actors {
            actor.load_images(images);
        }
        info!(
            background = self.background_path.as_str(),
            actor_count = self.actors.len(),
            collider_count = self.colliders.len(),
            scenery_count = self.scenery.len(),
            script_count = self.scripts.len(),
            "scene_loaded"
        );
    }

    fn update(&mut self, fixed_dt_seconds: f32, input: &InputSnapshot) -> StateCommand {
        if input.quit_requested() || input.was_pressed(InputAction::Quit) {
            return StateCommand::Quit;
        }
        if input.was_pressed(InputAction::Pause) {
            self.reset_movement_input();
            info!("paused");
            return StateCommand::Push(Box::new(PauseState));
        }

        if !self.autoplay_checked {
            self.autoplay_checked = true;
            self.begin_autoplay_script();
        }

        self.handle_movement_input(input);

        if self.dialog.is_open() {
            if input.was_pressed(InputAction::Interact) {
                self.dialog.advance();
            }
            self.actors[self.player_index].velocity = Vec2::ZERO;
        } else {
            self.actors[self.player_index].velocity = self.player_direction;
            if input.was_pressed(InputAction::Interact) {
                self.player_interact();
            }
        }

        self.step_current_script(fixed_dt_seconds);

        self.dialog.update(fixed_dt_seconds);
        if !self.dialog.is_open() {
            self.actor_being_spoken_to = None;
        }

        for actor_index in 0..self.actors.len() {
            if Some(actor_index) == self.actor_being_spoken_to {
                let player_position = self.actors[self.player_index].position;
                self.actors[actor_index].velocity = Vec2::ZERO;
                self.actors[actor_index].set_direction_towards(player_position);
                continue;
            }

            self.actors[actor_index].update(fixed_dt_seconds);

            // First hit per category, tested against the pre-resolution
            // rect, roster order keeps resolution deterministic.
            let actor_rect = self.actors[actor_index].rect();

            let hit_collider = self
                .colliders
                .iter()
                .find(|collider| actor_rect.intersects(collider))
                .copied();
            if let Some(collider) = hit_collider {
                self.actors[actor_index].handle_collision(&collider);
            }

            let hit_scenery = self
                .scenery
                .iter()
                .map(|entry| entry.collider)
                .find(|collider| actor_rect.intersects(collider));
            if let Some(collider) = hit_scenery {
                self.actors[actor_index].handle_collision(&collider);
            }

            let hit_actor = (0..self.actors.len())
                .filter(|other_index| *other_index != actor_index)
                .map(|other_index| self.actors[other_index].rect())
                .find(|other_rect| actor_rect.intersects(other_rect));
            if let Some(other_rect) = hit_actor {
                self.actors[actor_index].handle_collision(&other_rect);
            }

            // Collision response can land an actor exactly on its target;
            // release it so WaitFor lines unblock.
            if let Some(target) = self.actors[actor_index].target {
                if self.actors[actor_index].position == target {
                    self.actors[actor_index].target = None;
                    self.actors[actor_index].velocity = Vec2::ZERO;
                }
            }
        }

        // The camera tracks free-roam movement only; a cutscene that walks
        // the player somewhere leaves the view where it was.
        if !self.actors[self.player_index].in_scene {
            self.update_camera();
        }

        StateCommand::None
    }

    fn render(&mut self, renderer: &mut Renderer) {
        let (camera_x, camera_y) = self.camera_offset.rounded();
        renderer.draw_image(self.background, -camera_x, -camera_y);

        for actor in &self.actors {
            actor.render(renderer, self.camera_offset);
        }

        if self.dialog.is_open() {
            render_dialog(renderer, &self.dialog, self.dialog_portrait());
        }
    }
}

fn render_dialog(renderer: &mut Renderer, dialog: &Dialog, portrait: Option<ImageId>) {
    let rect = DIALOG_BOX_RECT;
    renderer.draw_panel(rect.x, rect.y, rect.w, rect.h);

    let mut text_x = rect.x + DIALOG_TEXT_PADDING;
    if let Some(portrait) = portrait {
        let (width, height) = renderer.images().frame_size_of(portrait);
        let portrait_y = rect.y + (rect.h - height as i32) / 2;
        renderer.draw_image(portrait, text_x, portrait_y);
        text_x += width as i32 + DIALOG_TEXT_PADDING;
    }

    if let Some(speaker) = dialog.speaker() {
        if !speaker.is_empty() {
            let panel_width =
                speaker.chars().count() as i32 * TEXT_GLYPH_ADVANCE + 2 * DIALOG_TEXT_PADDING;
            let panel_height = TEXT_LINE_ADVANCE + 6;
            let panel_y = rect.y - panel_height + 1;
            renderer.draw_panel(rect.x, panel_y, panel_width, panel_height);
            renderer.draw_text(
                speaker,
                COLOR_WHITE,
                rect.x + DIALOG_TEXT_PADDING,
                panel_y + 4,
            );
        }
    }

    for (row_index, row) in dialog.revealed_rows().iter().enumerate() {
        renderer.draw_text(
            row,
            COLOR_WHITE,
            text_x,
            rect.y + DIALOG_TEXT_PADDING + row_index as i32 * TEXT_LINE_ADVANCE,
        );
    }
}
