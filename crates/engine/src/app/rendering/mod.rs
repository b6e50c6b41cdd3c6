mod font;
mod images;
mod renderer;

pub use font::{TEXT_GLYPH_ADVANCE, TEXT_LINE_ADVANCE};
pub use images::{ImageId, ImageStore};
pub use renderer::{Renderer, Rgba, COLOR_WHITE, SCREEN_HEIGHT, SCREEN_WIDTH};
