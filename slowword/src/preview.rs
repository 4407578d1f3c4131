//! Preview of the inserted image.
//!
//! Holds at most one texture: the one for the document's current image.

use egui::{ColorImage, Context, TextureHandle, TextureOptions};
use std::path::{Path, PathBuf};

/// Preview textures never get a side longer than this, whatever the GPU allows.
pub const MAX_TEXTURE_SIZE: u32 = 4096;

/// Decode an image file into pixels egui can upload. Images with a side
/// longer than `max_side` are scaled down, keeping their aspect ratio.
pub fn decode(path: &Path, max_side: u32) -> Result<ColorImage, image::ImageError> {
    let mut rgba = image::open(path)?.to_rgba8();
    let (mut w, mut h) = rgba.dimensions();

    let max_side = max_side.max(1);
    if w > max_side || h > max_side {
        let longest = u64::from(w.max(h));
        let scaled = |side: u32| (u64::from(side) * u64::from(max_side) / longest).max(1) as u32;
        let (new_w, new_h) = (scaled(w), scaled(h));
        rgba = image::imageops::resize(&rgba, new_w, new_h, image::imageops::FilterType::Triangle);
        w = new_w;
        h = new_h;
    }

    Ok(ColorImage::from_rgba_unmultiplied([w as usize, h as usize], rgba.as_raw()))
}

/// Texture side limit for `ctx`: the renderer's maximum, capped at
/// [`MAX_TEXTURE_SIZE`].
fn texture_limit(ctx: &Context) -> u32 {
    let renderer = ctx.input(|i| i.max_texture_side);
    u32::try_from(renderer).unwrap_or(u32::MAX).min(MAX_TEXTURE_SIZE)
}

enum Slot {
    Empty,
    Loaded { path: PathBuf, texture: TextureHandle },
    Failed { path: PathBuf, reason: String },
}

pub struct ImagePreview {
    slot: Slot,
}

impl Default for ImagePreview {
    fn default() -> Self {
        Self::new()
    }
}

impl ImagePreview {
    pub fn new() -> Self {
        Self { slot: Slot::Empty }
    }

    fn current_path(&self) -> Option<&Path> {
        match &self.slot {
            Slot::Empty => None,
            Slot::Loaded { path, .. } | Slot::Failed { path, .. } => Some(path),
        }
    }

    /// Make the preview match `image`. Loads a new texture only when the
    /// path changed; the previous texture is dropped.
    pub fn sync(&mut self, ctx: &Context, image: Option<&Path>) {
        if self.current_path() == image {
            return;
        }
        self.slot = match image {
            None => Slot::Empty,
            Some(path) => match decode(path, texture_limit(ctx)) {
                Ok(pixels) => {
                    let texture = ctx.load_texture(
                        format!("slowword_preview_{}", path.display()),
                        pixels,
                        TextureOptions::LINEAR,
                    );
                    Slot::Loaded { path: path.to_path_buf(), texture }
                }
                Err(e) => {
                    log::warn!("cannot preview {}: {}", path.display(), e);
                    Slot::Failed { path: path.to_path_buf(), reason: e.to_string() }
                }
            },
        };
    }

    /// Draw the preview scaled to fit the available space.
    pub fn show(&self, ui: &mut egui::Ui) {
        match &self.slot {
            Slot::Empty => {
                ui.centered_and_justified(|ui| {
                    ui.label("no image");
                });
            }
            Slot::Failed { path, reason } => {
                ui.centered_and_justified(|ui| {
                    ui.label(format!("cannot preview {}\n{}", file_name(path), reason));
                });
            }
            Slot::Loaded { texture, .. } => {
                let fit = fit_size(texture.size_vec2(), ui.available_size());
                ui.centered_and_justified(|ui| {
                    ui.add(egui::Image::new((texture.id(), fit)));
                });
            }
        }
    }
}

/// Largest size with the image's aspect ratio that fits in `bounds`.
pub fn fit_size(image: egui::Vec2, bounds: egui::Vec2) -> egui::Vec2 {
    if image.x <= 0.0 || image.y <= 0.0 || bounds.x <= 0.0 || bounds.y <= 0.0 {
        return egui::Vec2::ZERO;
    }
    let scale = (bounds.x / image.x).min(bounds.y / image.y);
    image * scale
}

pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::vec2;

    #[test]
    fn test_fit_keeps_aspect() {
        assert_eq!(fit_size(vec2(400.0, 200.0), vec2(200.0, 200.0)), vec2(200.0, 100.0));
        assert_eq!(fit_size(vec2(100.0, 300.0), vec2(300.0, 150.0)), vec2(50.0, 150.0));
    }

    #[test]
    fn test_fit_upscales_small_images() {
        assert_eq!(fit_size(vec2(10.0, 10.0), vec2(100.0, 50.0)), vec2(50.0, 50.0));
    }

    #[test]
    fn test_fit_degenerate() {
        assert_eq!(fit_size(vec2(0.0, 10.0), vec2(100.0, 50.0)), egui::Vec2::ZERO);
        assert_eq!(fit_size(vec2(10.0, 10.0), vec2(0.0, 50.0)), egui::Vec2::ZERO);
    }

    #[test]
    fn test_decode_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dot.png");
        image::RgbaImage::from_pixel(3, 2, image::Rgba([0, 0, 0, 255])).save(&path).unwrap();
        let pixels = decode(&path, MAX_TEXTURE_SIZE).unwrap();
        assert_eq!(pixels.size, [3, 2]);
    }

    #[test]
    fn test_decode_scales_down_oversized() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("panorama.png");
        image::RgbaImage::from_pixel(MAX_TEXTURE_SIZE + 904, 250, image::Rgba([9, 9, 9, 255]))
            .save(&path)
            .unwrap();

        let pixels = decode(&path, MAX_TEXTURE_SIZE).unwrap();
        assert_eq!(pixels.size[0], MAX_TEXTURE_SIZE as usize);
        // 5000 x 250 scaled by 4096 / 5000
        assert_eq!(pixels.size[1], 204);
        assert_eq!(pixels.pixels.len(), pixels.size[0] * pixels.size[1]);

        let thin = decode(&path, 16).unwrap();
        assert_eq!(thin.size, [16, 1]);
    }

    #[test]
    fn test_sync_respects_renderer_limit() {
        let ctx = Context::default();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wide.png");
        let limit = texture_limit(&ctx);
        image::RgbaImage::from_pixel(limit + 10, 4, image::Rgba([0, 0, 0, 255]))
            .save(&path)
            .unwrap();

        let mut preview = ImagePreview::new();
        preview.sync(&ctx, Some(&path));
        match &preview.slot {
            Slot::Loaded { texture, .. } => assert!(texture.size()[0] <= limit as usize),
            _ => panic!("expected a loaded preview"),
        }
    }

    #[test]
    fn test_decode_garbage_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("junk.jpg");
        std::fs::write(&path, b"junk").unwrap();
        assert!(decode(&path, MAX_TEXTURE_SIZE).is_err());
    }

    #[test]
    fn test_sync_replaces_and_clears() {
        let ctx = Context::default();
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.png");
        image::RgbaImage::from_pixel(2, 2, image::Rgba([255, 0, 0, 255])).save(&a).unwrap();
        let b = dir.path().join("b.png");
        std::fs::write(&b, b"not an image").unwrap();

        let mut preview = ImagePreview::new();
        preview.sync(&ctx, Some(&a));
        assert!(matches!(preview.slot, Slot::Loaded { .. }));

        preview.sync(&ctx, Some(&b));
        assert!(matches!(preview.slot, Slot::Failed { .. }));
        assert_eq!(preview.current_path(), Some(b.as_path()));

        preview.sync(&ctx, None);
        assert!(matches!(preview.slot, Slot::Empty));
    }

    #[test]
    fn test_file_name() {
        assert_eq!(file_name(Path::new("/pics/cat.png")), "cat.png");
    }
}
