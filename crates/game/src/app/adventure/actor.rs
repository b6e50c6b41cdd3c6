#[derive(Debug, Clone)]
pub(crate) struct Actor {
    pub(crate) name: String,
    image_prefix: String,
    idle_image: ImageId,
    walk_image: ImageId,
    /// Portrait shown beside the dialog panel while this actor speaks.
    pub(crate) profile_image: ImageId,
    image: ImageId,
    flipped: bool,
    pub(crate) facing: Direction,
    pub(crate) position: Vec2,
    pub(crate) velocity: Vec2,
    /// Script-driven walk destination. Cleared on exact arrival.
    pub(crate) target: Option<Vec2>,
    pub(crate) path: Vec<PathNode>,
    path_index: usize,
    path_wait_timer: f32,
    pub(crate) dialog: Vec<DialogLine>,
    /// True while a script has claimed this actor; suppresses patrol.
    pub(crate) in_scene: bool,
    animation_frame: u32,
    animation_timer: f32,
    frame_size: (u32, u32),
    walk_frame_count: u32,
}

impl Actor {
    pub(crate) fn new(name: &str, image_prefix: &str) -> Self {
        Self {
            name: name.to_string(),
            image_prefix: image_prefix.to_string(),
            idle_image: ImageId::default(),
            walk_image: ImageId::default(),
            profile_image: ImageId::default(),
            image: ImageId::default(),
            flipped: false,
            facing: Direction::Down,
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            target: None,
            path: Vec::new(),
            path_index: 0,
            path_wait_timer: 0.0,
            dialog: Vec::new(),
            in_scene: false,
            animation_frame: 0,
            animation_timer: 0.0,
            frame_size: (ACTOR_FRAME_SIZE, ACTOR_FRAME_SIZE),
            walk_frame_count: DEFAULT_WALK_FRAME_COUNT,
        }
    }

    /// Resolves the idle/walk sheets and the dialog portrait from the
    /// actor's image prefix. The walk cycle length comes from the sheet,
    /// not a hardcoded count.
    pub(crate) fn load_images(&mut self, images: &mut ImageStore) {
        let idle_path = format!("{}_idle.png", self.image_prefix);
        let walk_path = format!("{}_walk.png", self.image_prefix);
        let profile_path = format!("{}_profile.png", self.image_prefix);
        self.idle_image =
            images.load_spritesheet(&idle_path, ACTOR_FRAME_SIZE, ACTOR_FRAME_SIZE);
        self.walk_image =
            images.load_spritesheet(&walk_path, ACTOR_FRAME_SIZE, ACTOR_FRAME_SIZE);
        self.profile_image = images.load_image(&profile_path);
        self.image = self.idle_image;
        self.frame_size = images.frame_size_of(self.idle_image);
        self.walk_frame_count = images.frame_count_of(self.walk_image);
    }

    pub(crate) fn rect(&self) -> Rect {
        let (x, y) = self.position.rounded();
        Rect::new(x, y, self.frame_size.0 as i32, self.frame_size.1 as i32)
    }

    pub(crate) fn has_target(&self) -> bool {
        self.target.is_some()
    }

    /// Control priority: script target while claimed, then patrol path,
    /// otherwise whatever velocity was set externally (the player).
    pub(crate) fn update(&mut self, delta: f32) {
        if self.in_scene {
            match self.target {
                Some(target) if self.position == target => {
                    self.target = None;
                    self.velocity = Vec2::ZERO;
                }
                Some(target) => self.set_velocity_towards(target),
                None => self.velocity = Vec2::ZERO,
            }
        } else if !self.path.is_empty() {
            let node = self.path[self.path_index].clone();
            if self.position != node.position {
                self.set_velocity_towards(node.position);
            } else if self.path_wait_timer > 0.0 {
                self.velocity = Vec2::ZERO;
                self.path_wait_timer -= delta;
                if let Some(direction) = node.direction {
                    self.facing = direction;
                }
            } else {
                self.velocity = Vec2::ZERO;
                self.path_index = (self.path_index + 1) % self.path.len();
                self.path_wait_timer = self.path[self.path_index].wait;
            }
        }

        self.position += self.velocity;

        if self.velocity.y > 0.0 {
            self.facing = Direction::Down;
        } else if self.velocity.y < 0.0 {
            self.facing = Direction::Up;
        } else if self.velocity.x > 0.0 {
            self.facing = Direction::Right;
        } else if self.velocity.x < 0.0 {
            self.facing = Direction::Left;
        }

        self.update_sprite(delta);
    }

    /// Per-axis step of exactly one pixel toward the target, so arrival
    /// lands on the target instead of oscillating around it.
    pub(crate) fn set_velocity_towards(&mut self, target_position: Vec2) {
        if self.position.x < target_position.x {
            self.velocity.x = ACTOR_SPEED_PER_TICK;
        } else if self.position.x > target_position.x {
            self.velocity.x = -ACTOR_SPEED_PER_TICK;
        } else {
            self.velocity.x = 0.0;
        }

        if self.position.y < target_position.y {
            self.velocity.y = ACTOR_SPEED_PER_TICK;
        } else if self.position.y > target_position.y {
            self.velocity.y = -ACTOR_SPEED_PER_TICK;
        } else {
            self.velocity.y = 0.0;
        }
    }

    /// Faces the dominant axis of the delta; ties favor horizontal.
    pub(crate) fn set_direction_towards(&mut self, target_position: Vec2) {
        if (self.position.x - target_position.x).abs()
            >= (self.position.y - target_position.y).abs()
        {
            if self.position.x >= target_position.x {
                self.facing = Direction::Left;
            } else {
                self.facing = Direction::Right;
            }
        } else if self.position.y >= target_position.y {
            self.facing = Direction::Up;
        } else {
            self.facing = Direction::Down;
        }
    }

    /// Undoes the last step, then re-applies each axis independently so
    /// the actor slides along the obstacle instead of sticking to it.
    pub(crate) fn handle_collision(&mut self, collider: &Rect) {
        self.position -= self.velocity;
        let self_rect = self.rect();
        let (velocity_x, velocity_y) = self.velocity.rounded();

        let mut x_rect = self_rect;
        x_rect.x += velocity_x;
        let x_caused_collision = x_rect.intersects(collider);

        let mut y_rect = self_rect;
        y_rect.y += velocity_y;
        let y_caused_collision = y_rect.intersects(collider);

        if !x_caused_collision {
            self.position.x += self.velocity.x;
        }
        if !y_caused_collision {
            self.position.y += self.velocity.y;
        }
    }

    fn update_sprite(&mut self, delta: f32) {
        if self.velocity.x == 0.0 && self.velocity.y == 0.0 {
            self.image = self.idle_image;
            self.flipped = false;
            self.animation_timer = ACTOR_FRAME_DURATION_SECONDS;
            self.animation_frame = self.facing.idle_frame();
        } else {
            self.image = self.walk_image;
            self.animation_timer -= delta;
            if self.animation_timer <= 0.0 {
                self.animation_timer += ACTOR_FRAME_DURATION_SECONDS;
                self.animation_frame = (self.animation_frame + 1) % self.walk_frame_count.max(1);
            }
            self.flipped = self.facing == Direction::Left;
        }
    }

    pub(crate) fn render(&self, renderer: &mut Renderer, camera_offset: Vec2) {
        let (x, y) = (self.position - camera_offset).rounded();
        renderer.draw_sprite_frame(self.image, self.animation_frame, 0, x, y, self.flipped);
    }
}
