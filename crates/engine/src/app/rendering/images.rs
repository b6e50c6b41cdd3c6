use std::collections::HashMap;
use std::path::{Path, PathBuf};

use image::ImageReader;
use tracing::warn;

const PLACEHOLDER_SIZE: u32 = 32;
const PLACEHOLDER_COLOR: [u8; 4] = [255, 0, 255, 255];

/// Handle into an [`ImageStore`]. The default id always resolves to the
/// built-in placeholder image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ImageId(usize);

#[derive(Debug)]
pub(crate) struct LoadedImage {
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) frame_width: u32,
    pub(crate) frame_height: u32,
    pub(crate) rgba: Vec<u8>,
}

/// Decoded image assets, addressed by handle. Load failures are non-fatal:
/// the store logs a warning and hands back a placeholder so the game keeps
/// running with visibly wrong art instead of crashing.
pub struct ImageStore {
    asset_root: PathBuf,
    images: Vec<LoadedImage>,
    ids_by_path: HashMap<String, ImageId>,
}

impl ImageStore {
    pub fn new(asset_root: PathBuf) -> Self {
        Self {
            asset_root,
            images: vec![placeholder_image(PLACEHOLDER_SIZE, PLACEHOLDER_SIZE)],
            ids_by_path: HashMap::new(),
        }
    }

    /// Loads a single-frame image; the whole image is one frame.
    pub fn load_image(&mut self, relative_path: &str) -> ImageId {
        self.load_with_frame_size(relative_path, None)
    }

    /// Loads a horizontal sprite strip cut into `frame_width` x
    /// `frame_height` frames.
    pub fn load_spritesheet(
        &mut self,
        relative_path: &str,
        frame_width: u32,
        frame_height: u32,
    ) -> ImageId {
        self.load_with_frame_size(relative_path, Some((frame_width, frame_height)))
    }

    fn load_with_frame_size(
        &mut self,
        relative_path: &str,
        frame_size: Option<(u32, u32)>,
    ) -> ImageId {
        if let Some(id) = self.ids_by_path.get(relative_path) {
            return *id;
        }

        let resolved = self.asset_root.join(relative_path);
        let image = match load_rgba(&resolved, frame_size) {
            Ok(image) => image,
            Err(reason) => {
                warn!(
                    path = %resolved.display(),
                    reason = reason.as_str(),
                    "image_load_failed_using_placeholder"
                );
                let (frame_width, frame_height) =
                    frame_size.unwrap_or((PLACEHOLDER_SIZE, PLACEHOLDER_SIZE));
                placeholder_image(frame_width.max(1), frame_height.max(1))
            }
        };

        let id = ImageId(self.images.len());
        self.images.push(image);
        self.ids_by_path.insert(relative_path.to_string(), id);
        id
    }

    pub fn frame_size_of(&self, id: ImageId) -> (u32, u32) {
        let image = self.image(id);
        (image.frame_width, image.frame_height)
    }

    /// Frames per row of the strip; at least 1 even for undersized art.
    pub fn frame_count_of(&self, id: ImageId) -> u32 {
        let image = self.image(id);
        (image.width / image.frame_width).max(1)
    }

    pub(crate) fn image(&self, id: ImageId) -> &LoadedImage {
        self.images.get(id.0).unwrap_or(&self.images[0])
    }
}

fn load_rgba(path: &Path, frame_size: Option<(u32, u32)>) -> Result<LoadedImage, String> {
    let reader = ImageReader::open(path).map_err(|error| format!("file_open_failed:{error}"))?;
    let decoded = reader
        .decode()
        .map_err(|error| format!("decode_failed:{error}"))?;
    let image = decoded.to_rgba8();
    let width = image.width();
    let height = image.height();
    let (frame_width, frame_height) = match frame_size {
        Some((fw, fh)) => {
            if fw == 0 || fh == 0 || fw > width || fh > height {
                return Err(format!(
                    "bad_frame_size:{fw}x{fh}_for_image_{width}x{height}"
                ));
            }
            (fw, fh)
        }
        None => (width, height),
    };
    Ok(LoadedImage {
        width,
        height,
        frame_width,
        frame_height,
        rgba: image.into_raw(),
    })
}

fn placeholder_image(frame_width: u32, frame_height: u32) -> LoadedImage {
    let pixel_count = (frame_width * frame_height) as usize;
    let mut rgba = Vec::with_capacity(pixel_count * 4);
    for _ in 0..pixel_count {
        rgba.extend_from_slice(&PLACEHOLDER_COLOR);
    }
    LoadedImage {
        width: frame_width,
        height: frame_height,
        frame_width,
        frame_height,
        rgba,
    }
}
