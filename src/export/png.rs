//! PNG export for generated texture images and height fields.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ImageEncoder, Luma, Rgba, RgbaImage};
use thiserror::Error;

use crate::texture::{HeightField, TextureImage};

/// Errors that can occur during PNG export.
#[derive(Error, Debug)]
pub enum PngExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Image size {0} exceeds PNG dimension limit")]
    OversizedImage(usize),
}

/// Options for PNG export.
#[derive(Debug, Clone)]
pub struct PngExportOptions {
    /// PNG compression type.
    pub compression: CompressionType,
    /// PNG filter type.
    pub filter: FilterType,
}

impl Default for PngExportOptions {
    fn default() -> Self {
        Self {
            compression: CompressionType::Default,
            filter: FilterType::Adaptive,
        }
    }
}

fn channel(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn side(size: usize) -> Result<u32, PngExportError> {
    u32::try_from(size).map_err(|_| PngExportError::OversizedImage(size))
}

/// Exports a texture image as an 8-bit RGBA PNG.
///
/// Channels are clamped to [0, 1] before quantization; the column-major
/// pixel layout is transposed into PNG row order.
pub fn export_texture_png(
    texture: &TextureImage,
    path: &Path,
    options: &PngExportOptions,
) -> Result<(), PngExportError> {
    let resolution = side(texture.size)?;

    let mut img = RgbaImage::new(resolution, resolution);
    for y in 0..resolution {
        for x in 0..resolution {
            let pixel = texture.get(x as usize, y as usize);
            img.put_pixel(
                x,
                y,
                Rgba([
                    channel(pixel.x),
                    channel(pixel.y),
                    channel(pixel.z),
                    channel(pixel.w),
                ]),
            );
        }
    }

    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let encoder = PngEncoder::new_with_quality(writer, options.compression, options.filter);
    encoder.write_image(
        img.as_raw(),
        resolution,
        resolution,
        image::ExtendedColorType::Rgba8,
    )?;

    Ok(())
}

/// Exports a height field as an 8-bit grayscale PNG.
pub fn export_height_png(
    field: &HeightField,
    path: &Path,
    options: &PngExportOptions,
) -> Result<(), PngExportError> {
    let resolution = side(field.size)?;

    let mut img = image::ImageBuffer::<Luma<u8>, Vec<u8>>::new(resolution, resolution);
    for y in 0..resolution {
        for x in 0..resolution {
            let value = field.get(x as usize, y as usize);
            img.put_pixel(x, y, Luma([channel(value)]));
        }
    }

    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let encoder = PngEncoder::new_with_quality(writer, options.compression, options.filter);
    encoder.write_image(
        img.as_raw(),
        resolution,
        resolution,
        image::ExtendedColorType::L8,
    )?;

    Ok(())
}
