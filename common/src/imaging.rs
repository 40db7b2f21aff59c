//! Image normalization
//!
//! Fetched images are decoded and re-encoded as JPEG, PNG or GIF. Every other
//! (or undetectable) source format becomes JPEG.

use crate::error::Result;
use image::{DynamicImage, ImageFormat};
use std::io::Cursor;

/// MIME type offered for single-image downloads, whatever the source format
pub const IMAGE_MIME: &str = "image/jpeg";

/// Output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Jpeg,
    Png,
    Gif,
}

impl ImageKind {
    /// Map a detected format onto the supported set
    pub fn from_detected(format: Option<ImageFormat>) -> Self {
        match format {
            Some(ImageFormat::Png) => ImageKind::Png,
            Some(ImageFormat::Gif) => ImageKind::Gif,
            _ => ImageKind::Jpeg,
        }
    }

    fn format(self) -> ImageFormat {
        match self {
            ImageKind::Jpeg => ImageFormat::Jpeg,
            ImageKind::Png => ImageFormat::Png,
            ImageKind::Gif => ImageFormat::Gif,
        }
    }
}

impl std::fmt::Display for ImageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImageKind::Jpeg => write!(f, "JPEG"),
            ImageKind::Png => write!(f, "PNG"),
            ImageKind::Gif => write!(f, "GIF"),
        }
    }
}

/// Re-encoded image
#[derive(Debug, Clone)]
pub struct NormalizedImage {
    pub bytes: Vec<u8>,
    pub kind: ImageKind,
}

/// Decode `bytes` and re-encode them in a supported format
pub fn normalize_image(bytes: &[u8]) -> Result<NormalizedImage> {
    let kind = ImageKind::from_detected(image::guess_format(bytes).ok());
    let decoded = image::load_from_memory(bytes)?;

    // JPEG has no alpha channel, GIF frames are RGBA
    let prepared = match kind {
        ImageKind::Jpeg => DynamicImage::ImageRgb8(decoded.to_rgb8()),
        ImageKind::Gif => DynamicImage::ImageRgba8(decoded.to_rgba8()),
        ImageKind::Png => decoded,
    };

    let mut buf = Cursor::new(Vec::new());
    prepared.write_to(&mut buf, kind.format())?;

    Ok(NormalizedImage {
        bytes: buf.into_inner(),
        kind,
    })
}
