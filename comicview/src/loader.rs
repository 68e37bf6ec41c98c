//! Image loading for the reader
//!
//! Pages are decoded synchronously on the UI thread. Dimensions are
//! probed from the header first so absurdly large files can be refused
//! before any big allocation, and decoded images are resized down to
//! display resolution so the retained buffer stays bounded. The
//! original file is never modified.

use image::imageops::FilterType;
use std::path::Path;
use thiserror::Error;

/// Largest retained page dimensions; bigger images are downscaled.
pub const MAX_PAGE_WIDTH: u32 = 2048;
pub const MAX_PAGE_HEIGHT: u32 = 2048;

/// Edge length for shelf thumbnails.
pub const THUMBNAIL_SIZE: u32 = 256;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("i/o error: {0}")]
    Io(String),
    #[error("decode error: {0}")]
    Decode(String),
    #[error("image too large for available memory")]
    OutOfMemory,
    #[error("image {width}×{height} would need ~{estimated_mb}MB to decode")]
    TooLarge {
        width: u32,
        height: u32,
        estimated_mb: u64,
    },
}

/// A decoded page, ready for texture upload.
pub struct PageImage {
    /// RGBA bytes at display resolution
    pub rgba: Vec<u8>,
    pub width: u32,
    pub height: u32,
    /// Dimensions before any downscaling
    pub original_width: u32,
    pub original_height: u32,
}

impl PageImage {
    /// Decode a page at full display resolution.
    pub fn open(path: &Path) -> Result<Self, LoadError> {
        Self::open_with_limit(path, MAX_PAGE_WIDTH, MAX_PAGE_HEIGHT)
    }

    /// Decode a page at thumbnail resolution for shelf tiles.
    pub fn open_thumbnail(path: &Path) -> Result<Self, LoadError> {
        Self::open_with_limit(path, THUMBNAIL_SIZE, THUMBNAIL_SIZE)
    }

    fn open_with_limit(path: &Path, max_w: u32, max_h: u32) -> Result<Self, LoadError> {
        let (orig_w, orig_h) = read_dimensions(path)?;

        // Refuse images whose decoded buffer would exceed 1GB
        let estimated_bytes = orig_w as u64 * orig_h as u64 * 4;
        if estimated_bytes > 1_073_741_824 {
            return Err(LoadError::TooLarge {
                width: orig_w,
                height: orig_h,
                estimated_mb: estimated_bytes / (1024 * 1024),
            });
        }

        // Decode the full image; catch_unwind turns allocation panics
        // into a clean error instead of taking the process down
        let full_image = std::panic::catch_unwind(|| image::open(path))
            .map_err(|_| LoadError::OutOfMemory)?
            .map_err(|e| LoadError::Decode(e.to_string()))?;

        let (w, h) = fit_dimensions(orig_w, orig_h, max_w, max_h);

        let resized = if w < orig_w || h < orig_h {
            // The full-size buffer is dropped right after this
            full_image.resize_exact(w, h, FilterType::Triangle)
        } else {
            full_image
        };

        Ok(PageImage {
            rgba: resized.to_rgba8().into_raw(),
            width: w,
            height: h,
            original_width: orig_w,
            original_height: orig_h,
        })
    }
}

/// Read image dimensions from the file header without a full decode.
fn read_dimensions(path: &Path) -> Result<(u32, u32), LoadError> {
    let reader = image::ImageReader::open(path)
        .map_err(|e| LoadError::Io(e.to_string()))?
        .with_guessed_format()
        .map_err(|e| LoadError::Io(e.to_string()))?;

    reader
        .into_dimensions()
        .map_err(|e| LoadError::Decode(e.to_string()))
}

/// Calculate dimensions that fit within max_w × max_h while preserving
/// aspect ratio. Images already inside the box keep their size.
pub fn fit_dimensions(w: u32, h: u32, max_w: u32, max_h: u32) -> (u32, u32) {
    if w <= max_w && h <= max_h {
        return (w, h);
    }

    let scale_x = max_w as f64 / w as f64;
    let scale_y = max_h as f64 / h as f64;
    let scale = scale_x.min(scale_y);

    let new_w = (w as f64 * scale).round() as u32;
    let new_h = (h as f64 * scale).round() as u32;

    (new_w.max(1), new_h.max(1))
}
