#[derive(Debug, Deserialize)]
struct SceneFile {
    background: String,
    map_size: [f32; 2],
    #[serde(default)]
    colliders: Vec<[i32; 4]>,
    #[serde(default)]
    scenery: Vec<SceneryFile>,
    #[serde(default)]
    actors: Vec<ActorFile>,
    #[serde(default)]
    scripts: Vec<ScriptFile>,
}

#[derive(Debug, Deserialize)]
struct SceneryFile {
    collider: [i32; 4],
    #[serde(default)]
    description: Vec<DialogLine>,
}

#[derive(Debug, Deserialize)]
struct ActorFile {
    name: String,
    image: String,
    #[serde(default)]
    position: [f32; 2],
    #[serde(default)]
    direction: Option<String>,
    #[serde(default)]
    dialog: Vec<DialogLine>,
    #[serde(default)]
    path: Vec<PathNodeFile>,
}

#[derive(Debug, Deserialize)]
struct PathNodeFile {
    position: [f32; 2],
    #[serde(default)]
    direction: Option<String>,
    #[serde(default)]
    wait: f32,
}

#[derive(Debug, Deserialize)]
struct ScriptFile {
    #[serde(default)]
    requires: Vec<String>,
    #[serde(default)]
    autoplay: bool,
    #[serde(default)]
    lines: Vec<ScriptLineFile>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum ScriptLineFile {
    Move { actor: String, target: [f32; 2] },
    Waitfor { actor: String },
    Turn { actor: String, direction: String },
    Delay { duration: f32 },
    Dialog { lines: Vec<DialogLine> },
    Loop,
}

fn vec2_from(array: [f32; 2]) -> Vec2 {
    Vec2::new(array[0], array[1])
}

fn rect_from(array: [i32; 4]) -> Rect {
    Rect::new(array[0], array[1], array[2], array[3])
}

impl AdventureScene {
    pub(crate) fn from_file(path: &Path) -> SceneLoadResult<Self> {
        let raw = fs::read_to_string(path)
            .map_err(|error| format!("failed to read scene file {}: {error}", path.display()))?;
        Self::from_json_str(&raw)
            .map_err(|error| format!("failed to parse scene file {}: {error}", path.display()))
    }

    pub(crate) fn from_json_str(raw: &str) -> SceneLoadResult<Self> {
        let mut deserializer = serde_json::Deserializer::from_str(raw);
        let file: SceneFile = serde_path_to_error::deserialize(&mut deserializer)
            .map_err(|error| format!("at {}: {}", error.path(), error.inner()))?;
        Ok(Self::from_scene_file(file))
    }

    fn from_scene_file(file: SceneFile) -> Self {
        let colliders = file.colliders.into_iter().map(rect_from).collect();

        let scenery = file
            .scenery
            .into_iter()
            .map(|entry| Scenery {
                collider: rect_from(entry.collider),
                description: entry.description,
            })
            .collect();

        let mut actors: Vec<Actor> = file
            .actors
            .into_iter()
            .map(|entry| {
                let mut actor = Actor::new(&entry.name, &entry.image);
                actor.position = vec2_from(entry.position);
                if let Some(direction) = entry.direction.as_deref() {
                    actor.facing = Direction::from_name(direction);
                }
                actor.dialog = entry.dialog;
                actor.path = entry
                    .path
                    .into_iter()
                    .map(|node| PathNode {
                        position: vec2_from(node.position),
                        direction: node.direction.as_deref().map(Direction::from_name),
                        wait: node.wait,
                    })
                    .collect();
                actor
            })
            .collect();

        let player_index = match actors.iter().position(|actor| actor.name == PLAYER_NAME) {
            Some(index) => index,
            None => {
                actors.push(Actor::new(PLAYER_NAME, PLAYER_IMAGE_PREFIX));
                actors.len() - 1
            }
        };

        let scripts = file
            .scripts
            .into_iter()
            .map(|entry| Script {
                required_actors: entry.requires,
                autoplay: entry.autoplay,
                lines: entry.lines.into_iter().map(script_line_from).collect(),
                current_line_index: 0,
                playing: false,
            })
            .collect();

        Self::new(
            file.background,
            vec2_from(file.map_size),
            colliders,
            scenery,
            actors,
            player_index,
            scripts,
        )
    }
}

fn script_line_from(line: ScriptLineFile) -> ScriptLine {
    match line {
        ScriptLineFile::Move { actor, target } => ScriptLine::Move {
            actor,
            target: vec2_from(target),
        },
        ScriptLineFile::Waitfor { actor } => ScriptLine::WaitFor { actor },
        ScriptLineFile::Turn { actor, direction } => ScriptLine::Turn {
            actor,
            direction: Direction::from_name(&direction),
        },
        ScriptLineFile::Delay { duration } => ScriptLine::Delay {
            duration,
            timer: duration,
        },
        ScriptLineFile::Dialog { lines } => ScriptLine::Dialog {
            lines,
            has_been_opened: false,
        },
        ScriptLineFile::Loop => ScriptLine::Loop,
    }
}
