use std::path::PathBuf;
use std::sync::Arc;

use pixels::{Error, Pixels, SurfaceTexture};
use winit::window::Window;

use super::font::draw_text_clipped;
use super::images::{ImageId, ImageStore, LoadedImage};

pub const SCREEN_WIDTH: u32 = 640;
pub const SCREEN_HEIGHT: u32 = 360;

pub type Rgba = [u8; 4];

pub const COLOR_WHITE: Rgba = [255, 255, 255, 255];
const CLEAR_COLOR: Rgba = [0, 0, 0, 255];
const PANEL_FILL_COLOR: Rgba = [20, 22, 28, 255];
const PANEL_BORDER_COLOR: Rgba = [200, 200, 200, 255];

/// CPU renderer over a fixed logical framebuffer; `pixels` scales the
/// buffer to the window surface.
pub struct Renderer {
    window: Arc<Window>,
    pixels: Pixels<'static>,
    images: ImageStore,
}

impl Renderer {
    pub fn new(window: Arc<Window>, asset_root: PathBuf) -> Result<Self, Error> {
        let size = window.inner_size();
        let pixels = Self::build_pixels(Arc::clone(&window), size.width, size.height)?;
        Ok(Self {
            window,
            pixels,
            images: ImageStore::new(asset_root),
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), Error> {
        if width == 0 || height == 0 {
            return Ok(());
        }
        self.pixels = Self::build_pixels(Arc::clone(&self.window), width, height)?;
        Ok(())
    }

    fn build_pixels(
        window: Arc<Window>,
        surface_width: u32,
        surface_height: u32,
    ) -> Result<Pixels<'static>, Error> {
        let surface = SurfaceTexture::new(surface_width, surface_height, window);
        Pixels::new(SCREEN_WIDTH, SCREEN_HEIGHT, surface)
    }

    pub fn images(&self) -> &ImageStore {
        &self.images
    }

    pub fn images_mut(&mut self) -> &mut ImageStore {
        &mut self.images
    }

    pub fn clear(&mut self) {
        for chunk in self.pixels.frame_mut().chunks_exact_mut(4) {
            chunk.copy_from_slice(&CLEAR_COLOR);
        }
    }

    pub fn draw_image(&mut self, id: ImageId, x: i32, y: i32) {
        self.draw_sprite_frame(id, 0, 0, x, y, false);
    }

    pub fn draw_sprite_frame(
        &mut self,
        id: ImageId,
        frame_x: u32,
        frame_y: u32,
        x: i32,
        y: i32,
        hflip: bool,
    ) {
        let image = self.images.image(id);
        blit_frame(
            self.pixels.frame_mut(),
            SCREEN_WIDTH,
            SCREEN_HEIGHT,
            image,
            frame_x,
            frame_y,
            x,
            y,
            hflip,
        );
    }

    pub fn draw_text(&mut self, text: &str, color: Rgba, x: i32, y: i32) {
        draw_text_clipped(
            self.pixels.frame_mut(),
            SCREEN_WIDTH,
            SCREEN_HEIGHT,
            x,
            y,
            text,
            color,
        );
    }

    pub fn draw_filled_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Rgba) {
        draw_filled_rect(
            self.pixels.frame_mut(),
            SCREEN_WIDTH,
            SCREEN_HEIGHT,
            x,
            y,
            w,
            h,
            color,
        );
    }

    /// Filled box with a one-pixel light border, used for dialog and
    /// speaker boxes.
    pub fn draw_panel(&mut self, x: i32, y: i32, w: i32, h: i32) {
        let frame = self.pixels.frame_mut();
        draw_filled_rect(frame, SCREEN_WIDTH, SCREEN_HEIGHT, x, y, w, h, PANEL_FILL_COLOR);
        draw_rect_outline(frame, SCREEN_WIDTH, SCREEN_HEIGHT, x, y, w, h, PANEL_BORDER_COLOR);
    }

    pub fn present(&mut self) -> Result<(), Error> {
        self.pixels.render()
    }
}

pub(crate) fn write_pixel_rgba(frame: &mut [u8], width: usize, x: usize, y: usize, color: Rgba) {
    let Some(pixel_offset) = y.checked_mul(width).and_then(|row| row.checked_add(x)) else {
        return;
    };
    let Some(byte_offset) = pixel_offset.checked_mul(4) else {
        return;
    };
    let Some(end) = byte_offset.checked_add(4) else {
        return;
    };
    if end > frame.len() {
        return;
    }

    frame[byte_offset..end].copy_from_slice(&color);
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn draw_filled_rect(
    frame: &mut [u8],
    width: u32,
    height: u32,
    x: i32,
    y: i32,
    rect_width: i32,
    rect_height: i32,
    color: Rgba,
) {
    let start_x = x.max(0);
    let start_y = y.max(0);
    let end_x = (x + rect_width).min(width as i32);
    let end_y = (y + rect_height).min(height as i32);
    if end_x <= start_x || end_y <= start_y {
        return;
    }

    let width_usize = width as usize;
    for py in start_y..end_y {
        for px in start_x..end_x {
            write_pixel_rgba(frame, width_usize, px as usize, py as usize, color);
        }
    }
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn draw_rect_outline(
    frame: &mut [u8],
    width: u32,
    height: u32,
    x: i32,
    y: i32,
    rect_width: i32,
    rect_height: i32,
    color: Rgba,
) {
    if rect_width <= 1 || rect_height <= 1 {
        return;
    }
    draw_filled_rect(frame, width, height, x, y, rect_width, 1, color);
    draw_filled_rect(frame, width, height, x, y + rect_height - 1, rect_width, 1, color);
    draw_filled_rect(frame, width, height, x, y, 1, rect_height, color);
    draw_filled_rect(frame, width, height, x + rect_width - 1, y, 1, rect_height, color);
}

/// Copies one frame of a sprite strip into the framebuffer. Fully
/// transparent source pixels are skipped; destination pixels outside the
/// buffer are clipped.
#[allow(clippy::too_many_arguments)]
pub(crate) fn blit_frame(
    frame: &mut [u8],
    width: u32,
    height: u32,
    image: &LoadedImage,
    frame_x: u32,
    frame_y: u32,
    dest_x: i32,
    dest_y: i32,
    hflip: bool,
) {
    if width == 0 || height == 0 {
        return;
    }

    let frame_width = image.frame_width as i32;
    let frame_height = image.frame_height as i32;
    let frames_per_row = (image.width / image.frame_width).max(1);
    let frame_rows = (image.height / image.frame_height).max(1);
    let src_origin_x = (frame_x % frames_per_row) * image.frame_width;
    let src_origin_y = (frame_y % frame_rows) * image.frame_height;

    let width_i32 = width as i32;
    let height_i32 = height as i32;

    for row in 0..frame_height {
        let pixel_y = dest_y + row;
        if pixel_y < 0 || pixel_y >= height_i32 {
            continue;
        }
        for col in 0..frame_width {
            let pixel_x = dest_x + col;
            if pixel_x < 0 || pixel_x >= width_i32 {
                continue;
            }

            let src_col = if hflip { frame_width - 1 - col } else { col };
            let src_x = src_origin_x as usize + src_col as usize;
            let src_y = src_origin_y as usize + row as usize;
            let src_offset = (src_y * image.width as usize + src_x) * 4;
            let Some(pixel) = image.rgba.get(src_offset..src_offset + 4) else {
                continue;
            };
            if pixel[3] == 0 {
                continue;
            }
            write_pixel_rgba(
                frame,
                width as usize,
                pixel_x as usize,
                pixel_y as usize,
                [pixel[0], pixel[1], pixel[2], pixel[3]],
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_frame_strip() -> LoadedImage {
        // 4x2 image, two 2x2 frames. Frame 0 is red with one transparent
        // pixel at (1, 0); frame 1 is a green/blue column pair.
        let r = [255u8, 0, 0, 255];
        let g = [0u8, 255, 0, 255];
        let b = [0u8, 0, 255, 255];
        let t = [0u8, 0, 0, 0];
        let rows = [[r, t, g, b], [r, r, g, b]];
        let mut rgba = Vec::new();
        for row in rows {
            for pixel in row {
                rgba.extend_from_slice(&pixel);
            }
        }
        LoadedImage {
            width: 4,
            height: 2,
            frame_width: 2,
            frame_height: 2,
            rgba,
        }
    }

    fn pixel_at(frame: &[u8], width: u32, x: u32, y: u32) -> [u8; 4] {
        let offset = ((y * width + x) * 4) as usize;
        [
            frame[offset],
            frame[offset + 1],
            frame[offset + 2],
            frame[offset + 3],
        ]
    }

    #[test]
    fn blit_copies_the_requested_frame() {
        let image = two_frame_strip();
        let mut frame = vec![0u8; 8 * 8 * 4];
        blit_frame(&mut frame, 8, 8, &image, 1, 0, 0, 0, false);
        assert_eq!(pixel_at(&frame, 8, 0, 0), [0, 255, 0, 255]);
        assert_eq!(pixel_at(&frame, 8, 1, 0), [0, 0, 255, 255]);
    }

    #[test]
    fn blit_skips_transparent_pixels() {
        let image = two_frame_strip();
        let mut frame = vec![9u8; 8 * 8 * 4];
        blit_frame(&mut frame, 8, 8, &image, 0, 0, 0, 0, false);
        assert_eq!(pixel_at(&frame, 8, 0, 0), [255, 0, 0, 255]);
        // Transparent source pixel leaves the destination untouched.
        assert_eq!(pixel_at(&frame, 8, 1, 0), [9, 9, 9, 9]);
    }

    #[test]
    fn blit_hflip_mirrors_columns() {
        let image = two_frame_strip();
        let mut frame = vec![0u8; 8 * 8 * 4];
        blit_frame(&mut frame, 8, 8, &image, 1, 0, 0, 0, true);
        assert_eq!(pixel_at(&frame, 8, 0, 0), [0, 0, 255, 255]);
        assert_eq!(pixel_at(&frame, 8, 1, 0), [0, 255, 0, 255]);
    }

    #[test]
    fn blit_clips_outside_the_buffer() {
        let image = two_frame_strip();
        let mut frame = vec![0u8; 4 * 4 * 4];
        blit_frame(&mut frame, 4, 4, &image, 0, 0, -1, -1, false);
        blit_frame(&mut frame, 4, 4, &image, 0, 0, 3, 3, false);
        // Only the in-bounds corner pixels landed.
        assert_eq!(pixel_at(&frame, 4, 0, 0), [255, 0, 0, 255]);
        assert_eq!(pixel_at(&frame, 4, 3, 3), [255, 0, 0, 255]);
    }

    #[test]
    fn filled_rect_clamps_to_buffer_bounds() {
        let mut frame = vec![0u8; 4 * 4 * 4];
        draw_filled_rect(&mut frame, 4, 4, -2, -2, 10, 10, [7, 7, 7, 255]);
        assert_eq!(pixel_at(&frame, 4, 0, 0), [7, 7, 7, 255]);
        assert_eq!(pixel_at(&frame, 4, 3, 3), [7, 7, 7, 255]);
    }

    #[test]
    fn rect_outline_leaves_interior_untouched() {
        let mut frame = vec![0u8; 8 * 8 * 4];
        draw_rect_outline(&mut frame, 8, 8, 0, 0, 8, 8, [1, 2, 3, 255]);
        assert_eq!(pixel_at(&frame, 8, 0, 0), [1, 2, 3, 255]);
        assert_eq!(pixel_at(&frame, 8, 7, 7), [1, 2, 3, 255]);
        assert_eq!(pixel_at(&frame, 8, 4, 4), [0, 0, 0, 0]);
    }
}
