use super::*;

const DT: f32 = 1.0 / 60.0;

fn dialog_line(speaker: &str, text: &str) -> DialogLine {
    DialogLine {
        speaker: speaker.to_string(),
        text: text.to_string(),
    }
}

fn player_at(x: f32, y: f32) -> Actor {
    let mut actor = Actor::new(PLAYER_NAME, PLAYER_IMAGE_PREFIX);
    actor.position = Vec2::new(x, y);
    actor
}

fn npc_at(name: &str, x: f32, y: f32) -> Actor {
    let mut actor = Actor::new(name, "actors/test");
    actor.position = Vec2::new(x, y);
    actor
}

fn script(requires: &[&str], lines: Vec<ScriptLine>) -> Script {
    Script {
        required_actors: requires.iter().map(|name| name.to_string()).collect(),
        autoplay: false,
        lines,
        current_line_index: 0,
        playing: false,
    }
}

fn scene_with(actors: Vec<Actor>, scripts: Vec<Script>) -> AdventureScene {
    let player_index = actors
        .iter()
        .position(|actor| actor.name == PLAYER_NAME)
        .expect("test scene needs a player actor");
    AdventureScene::new(
        String::new(),
        Vec2::new(SCREEN_WIDTH as f32, SCREEN_HEIGHT as f32),
        Vec::new(),
        Vec::new(),
        actors,
        player_index,
        scripts,
    )
}

fn pressed(action: InputAction) -> InputSnapshot {
    InputSnapshot::empty().with_action_pressed(action, true)
}

fn released(action: InputAction) -> InputSnapshot {
    InputSnapshot::empty().with_action_released(action, true)
}

fn advance_ticks(scene: &mut AdventureScene, ticks: usize) {
    for _ in 0..ticks {
        scene.update(DT, &InputSnapshot::empty());
    }
}

// -- actor --------------------------------------------------------------

#[test]
fn claimed_actor_walks_one_pixel_per_axis_toward_target() {
    let mut actor = npc_at("elder", 0.0, 0.0);
    actor.in_scene = true;
    actor.target = Some(Vec2::new(5.0, 3.0));

    for _ in 0..3 {
        actor.update(DT);
    }
    assert_eq!(actor.position, Vec2::new(3.0, 3.0));

    for _ in 0..2 {
        actor.update(DT);
    }
    assert_eq!(actor.position, Vec2::new(5.0, 3.0));
    assert!(actor.has_target());

    actor.update(DT);
    assert!(!actor.has_target());
    assert_eq!(actor.velocity, Vec2::ZERO);
}

#[test]
fn facing_prefers_the_vertical_axis_of_velocity() {
    let mut actor = npc_at("elder", 0.0, 0.0);

    actor.velocity = Vec2::new(1.0, 1.0);
    actor.update(DT);
    assert_eq!(actor.facing, Direction::Down);

    actor.velocity = Vec2::new(1.0, -1.0);
    actor.update(DT);
    assert_eq!(actor.facing, Direction::Up);

    actor.velocity = Vec2::new(-1.0, 0.0);
    actor.update(DT);
    assert_eq!(actor.facing, Direction::Left);
}

#[test]
fn unclaimed_actor_keeps_externally_set_velocity() {
    let mut actor = npc_at("elder", 0.0, 0.0);
    actor.velocity = Vec2::new(1.0, 0.0);

    actor.update(DT);
    actor.update(DT);

    assert_eq!(actor.position, Vec2::new(2.0, 0.0));
    assert_eq!(actor.facing, Direction::Right);
}

#[test]
fn patrol_walks_between_nodes_and_faces_the_wait_direction() {
    let mut actor = npc_at("elder", 0.0, 0.0);
    actor.path = vec![
        PathNode {
            position: Vec2::new(2.0, 0.0),
            direction: None,
            wait: 0.0,
        },
        PathNode {
            position: Vec2::ZERO,
            direction: Some(Direction::Up),
            wait: 0.2,
        },
    ];

    actor.update(DT);
    actor.update(DT);
    assert_eq!(actor.position, Vec2::new(2.0, 0.0));
    assert_eq!(actor.facing, Direction::Right);

    // Arrival tick advances to the second node and arms its wait.
    actor.update(DT);
    actor.update(DT);
    actor.update(DT);
    actor.update(DT);
    assert_eq!(actor.position, Vec2::ZERO);

    actor.update(DT);
    assert_eq!(actor.facing, Direction::Up);
    assert_eq!(actor.position, Vec2::ZERO);

    let mut ticks = 0;
    while actor.position == Vec2::ZERO && ticks < 100 {
        actor.update(DT);
        ticks += 1;
    }
    assert!(ticks < 100, "patrol should resume after the wait expires");
    assert_eq!(actor.facing, Direction::Right);
}

#[test]
fn walk_animation_cycles_through_the_sheet() {
    let mut actor = npc_at("elder", 0.0, 0.0);
    actor.velocity = Vec2::new(1.0, 0.0);

    // With delta equal to the frame duration, every tick advances a frame.
    for expected in 1..=9u32 {
        actor.update(ACTOR_FRAME_DURATION_SECONDS);
        assert_eq!(actor.animation_frame, expected % DEFAULT_WALK_FRAME_COUNT);
    }
    assert!(!actor.flipped);
}

#[test]
fn walking_left_mirrors_the_sprite() {
    let mut actor = npc_at("elder", 10.0, 0.0);
    actor.velocity = Vec2::new(-1.0, 0.0);
    actor.update(DT);
    assert!(actor.flipped);
}

#[test]
fn idle_frame_matches_the_facing_direction() {
    let cases = [
        (Direction::Right, 0),
        (Direction::Down, 1),
        (Direction::Left, 2),
        (Direction::Up, 3),
    ];
    for (facing, frame) in cases {
        let mut actor = npc_at("elder", 0.0, 0.0);
        actor.facing = facing;
        actor.update(DT);
        assert_eq!(actor.animation_frame, frame);
        assert!(!actor.flipped);
    }
}

#[test]
fn set_direction_towards_faces_the_dominant_axis() {
    let mut actor = npc_at("elder", 0.0, 0.0);

    actor.set_direction_towards(Vec2::new(5.0, 1.0));
    assert_eq!(actor.facing, Direction::Right);

    actor.set_direction_towards(Vec2::new(-5.0, 1.0));
    assert_eq!(actor.facing, Direction::Left);

    actor.set_direction_towards(Vec2::new(1.0, 5.0));
    assert_eq!(actor.facing, Direction::Down);

    actor.set_direction_towards(Vec2::new(1.0, -5.0));
    assert_eq!(actor.facing, Direction::Up);

    // Equal deltas favor the horizontal axis.
    actor.position = Vec2::new(10.0, 10.0);
    actor.set_direction_towards(Vec2::ZERO);
    assert_eq!(actor.facing, Direction::Left);
}

#[test]
fn collision_response_slides_along_the_open_axis() {
    let mut actor = npc_at("elder", 0.0, 0.0);
    actor.velocity = Vec2::new(1.0, 1.0);
    actor.update(DT);

    let wall = Rect::new(32, -100, 10, 200);
    assert!(actor.rect().intersects(&wall));

    actor.handle_collision(&wall);
    assert_eq!(actor.position, Vec2::new(0.0, 1.0));
}

#[test]
fn collision_response_stops_a_fully_blocked_step() {
    let mut actor = npc_at("elder", 0.0, 0.0);
    actor.velocity = Vec2::new(1.0, 1.0);
    actor.update(DT);

    let block = Rect::new(16, 16, 64, 64);
    actor.handle_collision(&block);
    assert_eq!(actor.position, Vec2::ZERO);
}

// -- dialog -------------------------------------------------------------

#[test]
fn dialog_reveals_one_character_per_interval() {
    let mut dialog = Dialog::default();
    dialog.open(&[dialog_line("Hero", "Hello")]);

    // The first character shows on the tick the line appears.
    assert_eq!(dialog.revealed_text(), "H");
    dialog.update(DIALOG_REVEAL_INTERVAL_SECONDS);
    assert_eq!(dialog.revealed_text(), "He");
    dialog.update(DIALOG_REVEAL_INTERVAL_SECONDS * 2.0);
    assert_eq!(dialog.revealed_text(), "Hell");
}

#[test]
fn advance_snaps_to_full_text_then_pops_the_line() {
    let mut dialog = Dialog::default();
    dialog.open(&[dialog_line("Hero", "Hello"), dialog_line("Elder", "Hi")]);

    dialog.advance();
    assert_eq!(dialog.revealed_text(), "Hello");
    assert!(dialog.is_open());

    dialog.advance();
    assert_eq!(dialog.speaker(), Some("Elder"));
    assert_eq!(dialog.revealed_text(), "H");

    dialog.advance();
    dialog.advance();
    assert!(!dialog.is_open());
}

#[test]
fn opening_with_no_lines_is_ignored() {
    let mut dialog = Dialog::default();
    dialog.open(&[]);
    assert!(!dialog.is_open());
}

#[test]
fn wrap_rows_breaks_at_word_boundaries() {
    let rows = wrap_rows("the quick brown fox", 10, 3);
    assert_eq!(rows, vec!["the quick".to_string(), "brown fox".to_string()]);
}

#[test]
fn wrap_rows_caps_the_row_count() {
    let text = "one two three four five six seven eight nine ten";
    let rows = wrap_rows(text, 9, 3);
    assert_eq!(rows.len(), 3);
    for row in &rows {
        assert!(row.chars().count() <= 9);
    }
}

#[test]
fn wrap_rows_hard_splits_overlong_words() {
    let text = "a".repeat(80);
    let rows = wrap_rows(&text, 37, 3);
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].len(), 37);
    assert_eq!(rows[1].len(), 37);
    assert_eq!(rows[2].len(), 6);
}

#[test]
fn wrap_rows_of_empty_text_is_empty() {
    assert!(wrap_rows("", 37, 3).is_empty());
}

// -- scripts ------------------------------------------------------------

#[test]
fn move_and_waitfor_walk_the_actor_then_release_it() {
    let mut scene = scene_with(
        vec![player_at(0.0, 0.0), npc_at("elder", 200.0, 200.0)],
        vec![script(
            &["elder"],
            vec![
                ScriptLine::Move {
                    actor: "elder".to_string(),
                    target: Vec2::new(203.0, 200.0),
                },
                ScriptLine::WaitFor {
                    actor: "elder".to_string(),
                },
            ],
        )],
    );

    scene.begin_script(0);
    assert!(scene.actors[1].in_scene);
    assert!(scene.scripts[0].playing);

    advance_ticks(&mut scene, 4);

    assert_eq!(scene.actors[1].position, Vec2::new(203.0, 200.0));
    assert!(!scene.actors[1].in_scene);
    assert!(!scene.scripts[0].playing);
    assert!(scene.current_script.is_none());
}

#[test]
fn non_blocking_lines_chain_within_a_single_tick() {
    let mut scene = scene_with(
        vec![player_at(0.0, 0.0), npc_at("elder", 200.0, 200.0)],
        vec![script(
            &["elder"],
            vec![
                ScriptLine::Turn {
                    actor: "elder".to_string(),
                    direction: Direction::Left,
                },
                ScriptLine::Delay {
                    duration: 1.0,
                    timer: 1.0,
                },
            ],
        )],
    );

    scene.begin_script(0);
    advance_ticks(&mut scene, 1);

    assert_eq!(scene.actors[1].facing, Direction::Left);
    assert_eq!(scene.scripts[0].current_line_index, 1);
    assert!(scene.scripts[0].playing);
}

#[test]
fn delay_blocks_then_rearms_for_replay() {
    let mut scene = scene_with(
        vec![player_at(0.0, 0.0), npc_at("elder", 200.0, 200.0)],
        vec![script(
            &["elder"],
            vec![
                ScriptLine::Delay {
                    duration: 0.1,
                    timer: 0.1,
                },
                ScriptLine::Turn {
                    actor: "elder".to_string(),
                    direction: Direction::Left,
                },
            ],
        )],
    );

    scene.begin_script(0);
    advance_ticks(&mut scene, 2);
    assert_eq!(scene.actors[1].facing, Direction::Down);

    advance_ticks(&mut scene, 6);
    assert_eq!(scene.actors[1].facing, Direction::Left);
    assert!(scene.current_script.is_none());

    let ScriptLine::Delay { timer, duration } = &scene.scripts[0].lines[0] else {
        panic!("first line should still be a delay");
    };
    assert_eq!(timer, duration);
}

#[test]
fn second_script_begin_is_ignored_while_one_plays() {
    let blocking = vec![ScriptLine::Delay {
        duration: 10.0,
        timer: 10.0,
    }];
    let mut scene = scene_with(
        vec![player_at(0.0, 0.0)],
        vec![script(&[], blocking.clone()), script(&[], blocking)],
    );

    scene.begin_script(0);
    scene.begin_script(1);

    assert_eq!(scene.current_script, Some(0));
    assert!(scene.scripts[0].playing);
    assert!(!scene.scripts[1].playing);
}

#[test]
fn begin_script_with_bad_index_is_a_no_op() {
    let mut scene = scene_with(vec![player_at(0.0, 0.0)], vec![]);
    scene.begin_script(3);
    assert!(scene.current_script.is_none());
}

#[test]
fn script_dialog_blocks_until_dismissed() {
    let mut scene = scene_with(
        vec![player_at(0.0, 0.0), npc_at("elder", 200.0, 200.0)],
        vec![script(
            &["elder"],
            vec![
                ScriptLine::Dialog {
                    lines: vec![dialog_line("Elder", "Hi")],
                    has_been_opened: false,
                },
                ScriptLine::Turn {
                    actor: "elder".to_string(),
                    direction: Direction::Left,
                },
            ],
        )],
    );

    scene.begin_script(0);
    advance_ticks(&mut scene, 1);
    assert!(scene.dialog.is_open());
    assert!(scene.actor_being_spoken_to.is_none());

    scene.update(DT, &pressed(InputAction::Interact));
    assert!(scene.dialog.is_open());
    assert_eq!(scene.dialog.revealed_text(), "Hi");

    scene.update(DT, &pressed(InputAction::Interact));
    assert!(!scene.dialog.is_open());
    assert_eq!(scene.actors[1].facing, Direction::Left);
    assert!(scene.current_script.is_none());

    let ScriptLine::Dialog {
        has_been_opened, ..
    } = &scene.scripts[0].lines[0]
    else {
        panic!("first line should still be a dialog");
    };
    assert!(!has_been_opened, "dialog line should re-arm after dismissal");
}

#[test]
fn all_non_blocking_loop_hits_the_step_budget_without_hanging() {
    let mut scene = scene_with(
        vec![player_at(0.0, 0.0), npc_at("elder", 200.0, 200.0)],
        vec![script(
            &["elder"],
            vec![
                ScriptLine::Turn {
                    actor: "elder".to_string(),
                    direction: Direction::Left,
                },
                ScriptLine::Loop,
            ],
        )],
    );

    scene.begin_script(0);
    advance_ticks(&mut scene, 1);

    assert!(scene.scripts[0].playing);
    assert_eq!(scene.current_script, Some(0));
}

#[test]
fn autoplay_script_begins_on_the_first_tick() {
    let mut blocking = script(
        &[],
        vec![ScriptLine::Delay {
            duration: 10.0,
            timer: 10.0,
        }],
    );
    blocking.autoplay = true;
    let mut scene = scene_with(vec![player_at(0.0, 0.0)], vec![blocking]);

    advance_ticks(&mut scene, 1);

    assert_eq!(scene.current_script, Some(0));
    assert!(scene.scripts[0].playing);
}

#[test]
fn script_lines_naming_missing_actors_are_skipped() {
    let mut scene = scene_with(
        vec![player_at(0.0, 0.0)],
        vec![script(
            &["ghost"],
            vec![
                ScriptLine::Move {
                    actor: "ghost".to_string(),
                    target: Vec2::new(5.0, 5.0),
                },
                ScriptLine::WaitFor {
                    actor: "ghost".to_string(),
                },
            ],
        )],
    );

    scene.begin_script(0);
    advance_ticks(&mut scene, 1);

    assert!(scene.current_script.is_none());
    assert!(!scene.scripts[0].playing);
}

// -- scene orchestration ------------------------------------------------

#[test]
fn player_direction_follows_movement_edges_with_opposite_restore() {
    let mut scene = scene_with(vec![player_at(100.0, 100.0)], vec![]);

    scene.update(DT, &pressed(InputAction::MoveUp));
    assert_eq!(scene.player_direction, Vec2::new(0.0, -1.0));
    assert_eq!(scene.actors[0].position, Vec2::new(100.0, 99.0));

    scene.update(DT, &pressed(InputAction::MoveDown));
    assert_eq!(scene.player_direction.y, 1.0);

    scene.update(DT, &released(InputAction::MoveDown));
    assert_eq!(scene.player_direction.y, -1.0);

    scene.update(DT, &released(InputAction::MoveUp));
    assert_eq!(scene.player_direction.y, 0.0);
}

#[test]
fn player_stops_against_a_static_collider() {
    let mut scene = scene_with(vec![player_at(0.0, 0.0)], vec![]);
    scene.colliders.push(Rect::new(40, -100, 10, 200));

    scene.update(DT, &pressed(InputAction::MoveRight));
    advance_ticks(&mut scene, 20);

    assert_eq!(scene.actors[0].position, Vec2::new(8.0, 0.0));
}

#[test]
fn player_stops_against_another_actor() {
    let mut scene = scene_with(
        vec![player_at(0.0, 0.0), npc_at("elder", 40.0, 0.0)],
        vec![],
    );

    scene.update(DT, &pressed(InputAction::MoveRight));
    advance_ticks(&mut scene, 20);

    assert_eq!(scene.actors[0].position, Vec2::new(8.0, 0.0));
    assert_eq!(scene.actors[1].position, Vec2::new(40.0, 0.0));
}

#[test]
fn interact_opens_actor_dialog_and_actor_faces_the_player() {
    let mut npc = npc_at("elder", 36.0, 0.0);
    npc.dialog = vec![dialog_line("Elder", "Hi")];
    let mut scene = scene_with(vec![player_at(0.0, 0.0), npc], vec![]);
    scene.actors[0].facing = Direction::Right;

    scene.update(DT, &pressed(InputAction::Interact));

    assert!(scene.dialog.is_open());
    assert_eq!(scene.dialog.speaker(), Some("Elder"));
    assert_eq!(scene.actor_being_spoken_to, Some(1));
    assert_eq!(scene.actors[1].facing, Direction::Left);
}

#[test]
fn load_images_registers_profile_art() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut images = ImageStore::new(dir.path().to_path_buf());
    let mut actor = npc_at("elder", 0.0, 0.0);

    actor.load_images(&mut images);

    assert_ne!(actor.profile_image, ImageId::default());
    assert_ne!(actor.profile_image, actor.idle_image);
    assert_ne!(actor.profile_image, actor.walk_image);
}

#[test]
fn dialog_portrait_matches_the_speaking_actor() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut images = ImageStore::new(dir.path().to_path_buf());
    let mut npc = npc_at("elder", 36.0, 0.0);
    npc.dialog = vec![dialog_line("Elder", "Hi")];
    npc.load_images(&mut images);
    let profile = npc.profile_image;

    let mut scene = scene_with(vec![player_at(0.0, 0.0), npc], vec![]);
    scene.actors[0].facing = Direction::Right;

    scene.update(DT, &pressed(InputAction::Interact));
    assert!(scene.dialog.is_open());
    assert_eq!(scene.dialog_portrait(), Some(profile));
}

#[test]
fn scenery_descriptions_have_no_portrait() {
    let mut scene = scene_with(vec![player_at(0.0, 0.0)], vec![]);
    scene.actors[0].facing = Direction::Right;
    scene.scenery.push(Scenery {
        collider: Rect::new(34, 0, 16, 32),
        description: vec![dialog_line("", "A crate.")],
    });

    scene.update(DT, &pressed(InputAction::Interact));
    assert!(scene.dialog.is_open());
    assert_eq!(scene.dialog_portrait(), None);
}

#[test]
fn interact_prefers_actors_over_scenery() {
    let mut npc = npc_at("elder", 36.0, 0.0);
    npc.dialog = vec![dialog_line("Elder", "Hi")];
    let mut scene = scene_with(vec![player_at(0.0, 0.0), npc], vec![]);
    scene.actors[0].facing = Direction::Right;
    scene.scenery.push(Scenery {
        collider: Rect::new(34, 0, 16, 32),
        description: vec![dialog_line("", "A crate.")],
    });

    scene.update(DT, &pressed(InputAction::Interact));

    assert_eq!(scene.dialog.speaker(), Some("Elder"));
    assert_eq!(scene.actor_being_spoken_to, Some(1));
}

#[test]
fn interact_falls_back_to_scenery_descriptions() {
    let mut scene = scene_with(vec![player_at(0.0, 0.0)], vec![]);
    scene.actors[0].facing = Direction::Right;
    scene.scenery.push(Scenery {
        collider: Rect::new(34, 0, 16, 32),
        description: vec![dialog_line("", "A crate.")],
    });

    scene.update(DT, &pressed(InputAction::Interact));

    assert!(scene.dialog.is_open());
    assert!(scene.actor_being_spoken_to.is_none());
}

#[test]
fn interact_misses_targets_outside_the_facing_probe() {
    let mut npc = npc_at("elder", 36.0, 0.0);
    npc.dialog = vec![dialog_line("Elder", "Hi")];
    let mut scene = scene_with(vec![player_at(0.0, 0.0), npc], vec![]);
    scene.actors[0].facing = Direction::Left;

    scene.update(DT, &pressed(InputAction::Interact));

    assert!(!scene.dialog.is_open());
}

#[test]
fn open_dialog_freezes_the_player_and_interact_advances_it() {
    let mut npc = npc_at("elder", 36.0, 0.0);
    npc.dialog = vec![dialog_line("Elder", "Hi")];
    let mut scene = scene_with(vec![player_at(0.0, 0.0), npc], vec![]);
    scene.actors[0].facing = Direction::Right;

    scene.update(DT, &pressed(InputAction::Interact));
    assert!(scene.dialog.is_open());

    scene.update(DT, &pressed(InputAction::MoveDown));
    assert_eq!(scene.actors[0].position, Vec2::ZERO);

    scene.update(DT, &pressed(InputAction::Interact));
    scene.update(DT, &pressed(InputAction::Interact));
    assert!(!scene.dialog.is_open());
    assert!(scene.actor_being_spoken_to.is_none());
}

#[test]
fn spoken_to_actor_pauses_its_patrol() {
    let mut npc = npc_at("elder", 36.0, 0.0);
    npc.dialog = vec![dialog_line("Elder", "Hi")];
    npc.path = vec![
        PathNode {
            position: Vec2::new(100.0, 0.0),
            direction: None,
            wait: 0.0,
        },
        PathNode {
            position: Vec2::new(36.0, 0.0),
            direction: None,
            wait: 0.0,
        },
    ];
    let mut scene = scene_with(vec![player_at(0.0, 0.0), npc], vec![]);
    scene.actors[0].facing = Direction::Right;

    scene.update(DT, &pressed(InputAction::Interact));
    assert!(scene.dialog.is_open());

    let position = scene.actors[1].position;
    advance_ticks(&mut scene, 10);
    assert_eq!(scene.actors[1].position, position);
}

#[test]
fn pause_key_pushes_an_overlay_and_clears_movement() {
    let mut scene = scene_with(vec![player_at(100.0, 100.0)], vec![]);
    scene.update(DT, &pressed(InputAction::MoveRight));
    assert_eq!(scene.player_direction.x, 1.0);

    let command = scene.update(DT, &pressed(InputAction::Pause));
    let StateCommand::Push(state) = command else {
        panic!("pause should push an overlay state");
    };
    assert!(state.render_previous());
    assert_eq!(scene.player_direction, Vec2::ZERO);
    assert_eq!(scene.actors[0].velocity, Vec2::ZERO);
}

#[test]
fn quit_edge_and_quit_request_both_stop_the_scene() {
    let mut scene = scene_with(vec![player_at(0.0, 0.0)], vec![]);
    assert!(matches!(
        scene.update(DT, &pressed(InputAction::Quit)),
        StateCommand::Quit
    ));
    assert!(matches!(
        scene.update(DT, &InputSnapshot::empty().with_quit_requested(true)),
        StateCommand::Quit
    ));
}

// -- camera -------------------------------------------------------------

#[test]
fn camera_holds_still_inside_the_dead_zone() {
    let mut scene = scene_with(vec![player_at(304.0, 164.0)], vec![]);
    scene.map_size = Vec2::new(1280.0, 720.0);

    advance_ticks(&mut scene, 10);

    assert_eq!(scene.camera_offset, Vec2::ZERO);
}

#[test]
fn camera_ignores_a_script_driven_player() {
    let mut scene = scene_with(
        vec![player_at(2000.0, 0.0)],
        vec![script(
            &[PLAYER_NAME],
            vec![ScriptLine::Delay {
                duration: 10.0,
                timer: 10.0,
            }],
        )],
    );
    scene.map_size = Vec2::new(1280.0, 720.0);

    scene.begin_script(0);
    assert!(scene.actors[scene.player_index].in_scene);

    advance_ticks(&mut scene, 100);
    assert_eq!(scene.camera_offset, Vec2::ZERO);
}

#[test]
fn camera_chases_the_player_and_clamps_to_the_map() {
    let mut scene = scene_with(vec![player_at(2000.0, 0.0)], vec![]);
    scene.map_size = Vec2::new(1280.0, 720.0);

    advance_ticks(&mut scene, 400);

    assert_eq!(scene.camera_offset.x, 640.0);
    assert_eq!(scene.camera_offset.y, 0.0);
}

// -- loading ------------------------------------------------------------

const VILLAGE_JSON: &str = r#"{
  "background": "maps/village.png",
  "map_size": [1280, 720],
  "colliders": [[0, 0, 16, 720]],
  "scenery": [
    {
      "collider": [300, 200, 32, 32],
      "description": [{"speaker": "", "text": "A mossy well."}]
    }
  ],
  "actors": [
    {
      "name": "elder",
      "image": "actors/elder",
      "position": [200, 120],
      "direction": "left",
      "dialog": [{"speaker": "Elder", "text": "Welcome."}],
      "path": [
        {"position": [200, 120], "direction": "down", "wait": 1.5},
        {"position": [260, 120]}
      ]
    }
  ],
  "scripts": [
    {
      "requires": ["elder"],
      "autoplay": true,
      "lines": [
        {"type": "move", "actor": "elder", "target": [220, 120]},
        {"type": "waitfor", "actor": "elder"},
        {"type": "turn", "actor": "elder", "direction": "down"},
        {"type": "delay", "duration": 0.5},
        {"type": "dialog", "lines": [{"speaker": "Elder", "text": "Hello."}]},
        {"type": "loop"}
      ]
    }
  ]
}"#;

#[test]
fn scene_file_round_trips_every_section() {
    let scene = AdventureScene::from_json_str(VILLAGE_JSON).expect("valid scene json");

    assert_eq!(scene.background_path, "maps/village.png");
    assert_eq!(scene.map_size, Vec2::new(1280.0, 720.0));
    assert_eq!(scene.colliders, vec![Rect::new(0, 0, 16, 720)]);

    assert_eq!(scene.scenery.len(), 1);
    assert_eq!(scene.scenery[0].collider, Rect::new(300, 200, 32, 32));
    assert_eq!(scene.scenery[0].description[0].text, "A mossy well.");

    // No actor named "player", so one is appended.
    assert_eq!(scene.actors.len(), 2);
    assert_eq!(scene.player_index, 1);
    assert_eq!(scene.actors[1].name, PLAYER_NAME);

    let elder = &scene.actors[0];
    assert_eq!(elder.name, "elder");
    assert_eq!(elder.position, Vec2::new(200.0, 120.0));
    assert_eq!(elder.facing, Direction::Left);
    assert_eq!(elder.dialog.len(), 1);
    assert_eq!(elder.path.len(), 2);
    assert_eq!(elder.path[0].direction, Some(Direction::Down));
    assert_eq!(elder.path[0].wait, 1.5);
    assert_eq!(elder.path[1].direction, None);
    assert_eq!(elder.path[1].wait, 0.0);

    assert_eq!(scene.scripts.len(), 1);
    let script = &scene.scripts[0];
    assert!(script.autoplay);
    assert_eq!(script.required_actors, vec!["elder".to_string()]);
    assert_eq!(script.lines.len(), 6);
    assert_eq!(
        script.lines[0],
        ScriptLine::Move {
            actor: "elder".to_string(),
            target: Vec2::new(220.0, 120.0),
        }
    );
    assert_eq!(
        script.lines[3],
        ScriptLine::Delay {
            duration: 0.5,
            timer: 0.5,
        }
    );
    assert_eq!(script.lines[5], ScriptLine::Loop);
}

#[test]
fn an_actor_named_player_is_used_as_the_player() {
    let json = r#"{
      "background": "maps/village.png",
      "map_size": [640, 360],
      "actors": [
        {"name": "player", "image": "actors/hero", "position": [50, 60]}
      ]
    }"#;
    let scene = AdventureScene::from_json_str(json).expect("valid scene json");

    assert_eq!(scene.actors.len(), 1);
    assert_eq!(scene.player_index, 0);
    assert_eq!(scene.actors[0].position, Vec2::new(50.0, 60.0));
}

#[test]
fn scene_file_loads_from_disk() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("village.json");
    fs::write(&path, VILLAGE_JSON).expect("write scene file");

    let scene = AdventureScene::from_file(&path).expect("load scene file");
    assert_eq!(scene.actors.len(), 2);
}

#[test]
fn missing_scene_file_reports_its_path() {
    let error = AdventureScene::from_file(Path::new("/nonexistent/scene.json"))
        .expect_err("missing file should not load");
    assert!(error.contains("scene.json"), "unexpected error: {error}");
}

#[test]
fn malformed_json_reports_an_error() {
    assert!(AdventureScene::from_json_str("{not json").is_err());
}

#[test]
fn missing_required_fields_name_the_offending_path() {
    let error = AdventureScene::from_json_str(r#"{"map_size": [640, 360]}"#)
        .expect_err("background is required");
    assert!(error.contains("background"), "unexpected error: {error}");
}

#[test]
fn unknown_direction_names_default_to_up() {
    let json = r#"{
      "background": "maps/village.png",
      "map_size": [640, 360],
      "actors": [
        {"name": "elder", "image": "actors/elder", "direction": "north"}
      ]
    }"#;
    let scene = AdventureScene::from_json_str(json).expect("valid scene json");
    assert_eq!(scene.actors[0].facing, Direction::Up);
}

#[test]
fn empty_scene_contains_only_the_player() {
    let scene = AdventureScene::empty();
    assert_eq!(scene.actors.len(), 1);
    assert_eq!(scene.actors[scene.player_index].name, PLAYER_NAME);
    assert!(scene.scripts.is_empty());
}

// -- end to end ---------------------------------------------------------

#[test]
fn autoplay_cutscene_runs_through_its_lines_and_loops() {
    let mut scene = AdventureScene::from_json_str(VILLAGE_JSON).expect("valid scene json");
    // Keep the appended player out of the elder's way.
    scene.actors[scene.player_index].position = Vec2::new(500.0, 300.0);

    advance_ticks(&mut scene, 25);
    assert_eq!(scene.current_script, Some(0));
    assert_eq!(scene.actors[0].position, Vec2::new(220.0, 120.0));
    assert!(scene.actors[0].in_scene);

    let mut ticks = 0;
    while !scene.dialog.is_open() && ticks < 200 {
        scene.update(DT, &InputSnapshot::empty());
        ticks += 1;
    }
    assert!(scene.dialog.is_open(), "cutscene dialog should open");
    assert_eq!(scene.actors[0].facing, Direction::Down);

    scene.update(DT, &pressed(InputAction::Interact));
    scene.update(DT, &pressed(InputAction::Interact));
    assert!(!scene.dialog.is_open());

    // The loop line restarts the script instead of finishing it.
    assert!(scene.scripts[0].playing);
    assert!(scene.scripts[0].current_line_index < 4);
}
