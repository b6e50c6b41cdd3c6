#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Direction {
    Up = 0,
    Right = 1,
    Down = 2,
    Left = 3,
}

impl Direction {
    /// Unknown names degrade to Up with a logged error rather than
    /// failing the whole scene load.
    fn from_name(name: &str) -> Direction {
        match name {
            "up" => Direction::Up,
            "right" => Direction::Right,
            "down" => Direction::Down,
            "left" => Direction::Left,
            _ => {
                warn!(direction = name, "unknown_direction_defaulting_to_up");
                Direction::Up
            }
        }
    }

    /// Idle sheets hold one frame per facing: right, down, left, up.
    fn idle_frame(self) -> u32 {
        match self {
            Direction::Right => 0,
            Direction::Down => 1,
            Direction::Left => 2,
            Direction::Up => 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub(crate) struct DialogLine {
    pub(crate) speaker: String,
    pub(crate) text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PathNode {
    pub(crate) position: Vec2,
    pub(crate) direction: Option<Direction>,
    pub(crate) wait: f32,
}

#[derive(Debug, Clone)]
pub(crate) struct Scenery {
    pub(crate) collider: Rect,
    pub(crate) description: Vec<DialogLine>,
}
