//! I/O helpers for RGBA images and JSON.
//!
//! - `load_rgba_image`: read a PNG/JPEG/etc. into an owned 8-bit RGBA buffer.
//! - `save_rgba_png`: write an owned RGBA buffer to disk.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::{ImageRgba8, ImageView};
use crate::error::GelError;
use image::RgbaImage;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Owned 8-bit RGBA buffer with borrowed view conversion.
#[derive(Clone, Debug)]
pub struct RgbaImageBuf {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl RgbaImageBuf {
    /// Construct an owned buffer from tightly packed RGBA bytes.
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), width * height * 4);
        Self {
            width,
            height,
            data,
        }
    }

    /// Copy any image view into an owned buffer.
    pub fn from_view<I: ImageView + ?Sized>(image: &I) -> Self {
        let (w, h) = (image.width(), image.height());
        let mut data = Vec::with_capacity(w * h * 4);
        for y in 0..h {
            for x in 0..w {
                data.extend_from_slice(&image.pixel(x, y));
            }
        }
        Self::new(w, h, data)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Borrow as a read-only `ImageRgba8` view
    pub fn as_view(&self) -> ImageRgba8<'_> {
        ImageRgba8 {
            w: self.width,
            h: self.height,
            stride: self.width * 4,
            data: &self.data,
        }
    }

    /// Overwrite the pixel at `(x, y)`; coordinates outside the buffer are ignored.
    pub fn put(&mut self, x: i64, y: i64, rgba: [u8; 4]) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let i = (y as usize * self.width + x as usize) * 4;
        self.data[i..i + 4].copy_from_slice(&rgba);
    }
}

/// Load an image from disk and convert to 8-bit RGBA.
pub fn load_rgba_image(path: &Path) -> Result<RgbaImageBuf, GelError> {
    let img = image::open(path)
        .map_err(|source| GelError::Image {
            path: path.to_path_buf(),
            source,
        })?
        .into_rgba8();
    let width = img.width() as usize;
    let height = img.height() as usize;
    Ok(RgbaImageBuf::new(width, height, img.into_raw()))
}

/// Save an RGBA buffer; the format follows the file extension.
pub fn save_rgba_png(buffer: &RgbaImageBuf, path: &Path) -> Result<(), GelError> {
    ensure_parent_dir(path)?;
    let image = RgbaImage::from_raw(
        buffer.width as u32,
        buffer.height as u32,
        buffer.data.clone(),
    )
    .ok_or_else(|| GelError::Config("RGBA buffer does not match its dimensions".to_string()))?;
    image.save(path).map_err(|source| GelError::Image {
        path: path.to_path_buf(),
        source,
    })
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), GelError> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value).map_err(|source| GelError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, json).map_err(|source| GelError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn ensure_parent_dir(path: &Path) -> Result<(), GelError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| GelError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }
    Ok(())
}
