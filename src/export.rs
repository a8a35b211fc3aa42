//! Writing rendered figures to PNG.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use eframe::egui::{ColorImage, Rect};

/// A pending request to persist the next rendered frame.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveRequest {
    pub path: PathBuf,
    /// Set once the screenshot command has been sent.
    pub requested: bool,
}

impl SaveRequest {
    pub fn new(output_dir: &Path, file_name: &str) -> Self {
        Self {
            path: output_dir.join(file_name),
            requested: false,
        }
    }
}

/// Crop a viewport screenshot to the figure's rect (in points).
pub fn crop(screenshot: &ColorImage, figure_rect: Rect, pixels_per_point: f32) -> ColorImage {
    screenshot.region(&figure_rect, Some(pixels_per_point))
}

/// Encode `image` as PNG and write it to `path`, replacing any existing file.
pub fn save_png(path: &Path, image: &ColorImage) -> Result<()> {
    let [w, h] = image.size;
    if w == 0 || h == 0 {
        bail!("Refusing to save an empty {w}x{h} image");
    }
    let buffer = image::RgbaImage::from_raw(w as u32, h as u32, image.as_raw().to_vec())
        .context("image buffer does not match its size")?;
    buffer
        .save_with_format(path, image::ImageFormat::Png)
        .with_context(|| format!("writing {}", path.display()))?;
    log::info!("Saved figure to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::{Color32, pos2};

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("skill-lens-export-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn saved_png_decodes_to_the_same_size() {
        let dir = temp_dir();
        let request = SaveRequest::new(&dir, "Data Scientist Skills Distribution.png");
        let image = ColorImage::new([40, 30], Color32::WHITE);

        save_png(&request.path, &image).unwrap();

        let decoded = image::open(&request.path).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (40, 30));
        assert!(request.path.ends_with("Data Scientist Skills Distribution.png"));
    }

    #[test]
    fn empty_images_are_rejected() {
        let path = temp_dir().join("empty.png");
        let image = ColorImage::new([0, 0], Color32::WHITE);
        assert!(save_png(&path, &image).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn crop_scales_points_to_pixels() {
        let image = ColorImage::new([200, 100], Color32::BLACK);
        let rect = Rect::from_min_max(pos2(10.0, 10.0), pos2(60.0, 40.0));
        let cropped = crop(&image, rect, 2.0);
        assert_eq!(cropped.size, [100, 60]);
    }
}
