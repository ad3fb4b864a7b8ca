//! Texture loading, nearest-neighbour resize and RGB565 packing.

use std::{fs::File, io::BufReader, path::Path};

use anyhow::{Context, Result};
use corelib::{BakeError, BakeResult};
use image::{ImageFormat, ImageReader, RgbImage};

pub const DEFAULT_WIDTH: u32 = 128;
pub const DEFAULT_HEIGHT: u32 = 128;

/// Packed 16-bit pixels, row-major, row 0 first.
#[derive(Clone, Debug, PartialEq)]
pub struct Rgb565Texture {
    pub pixels: Vec<u16>,
    pub width: u32,
    pub height: u32,
}

impl Rgb565Texture {
    /// Resize `img` to `width`x`height` and pack every pixel.
    pub fn from_image(img: &RgbImage, width: u32, height: u32) -> BakeResult<Self> {
        let resized = resize_nearest(img, width, height)?;
        let pixels = resized.pixels().map(|p| rgb565(p[0], p[1], p[2])).collect();
        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    /// Load, normalise to RGB, resize and pack in one go.
    pub fn load<P: AsRef<Path>>(path: P, width: u32, height: u32) -> Result<Self> {
        let rgb = load_rgb(path)?;
        Ok(Self::from_image(&rgb, width, height)?)
    }

    /// Check if the pixel count matches the dimensions.
    pub fn is_valid(&self) -> bool {
        self.width > 0
            && self.height > 0
            && self.pixels.len() == (self.width as usize) * (self.height as usize)
    }
}

/// Pack 8-bit RGB into RGB565 by truncating the low bits of each channel.
pub const fn rgb565(r: u8, g: u8, b: u8) -> u16 {
    (((r as u16) & 0xF8) << 8) | (((g as u16) & 0xFC) << 3) | ((b as u16) >> 3)
}

/// Open `path`, work out the image format and make sure its decoder was
/// compiled in. The returned reader is ready to decode.
pub fn check_decoder(path: &Path) -> Result<ImageReader<BufReader<File>>> {
    let reader = ImageReader::open(path)
        .with_context(|| format!("Failed to open image {}", path.display()))?
        .with_guessed_format()
        .with_context(|| format!("Failed to read image header {}", path.display()))?;

    let Some(format) = reader.format() else {
        return Err(BakeError::UnsupportedImageFormat {
            path: path.to_path_buf(),
            hint: "unrecognised image format".to_string(),
        }
        .into());
    };

    if !format.reading_enabled() {
        let hint = match decoder_feature(format) {
            Some(feature) => format!(
                "{format:?} decoding is not enabled; rebuild with `--features asset/{feature}`"
            ),
            None => format!("{format:?} decoding is not supported by this build"),
        };
        return Err(BakeError::UnsupportedImageFormat {
            path: path.to_path_buf(),
            hint,
        }
        .into());
    }

    Ok(reader)
}

fn decoder_feature(format: ImageFormat) -> Option<&'static str> {
    match format {
        ImageFormat::Png => Some("png"),
        ImageFormat::Jpeg => Some("jpeg"),
        ImageFormat::Bmp => Some("bmp"),
        ImageFormat::Gif => Some("gif"),
        ImageFormat::Tga => Some("tga"),
        _ => None,
    }
}

/// Load an image and flatten it to 8-bit RGB. Alpha is dropped, not blended.
pub fn load_rgb<P: AsRef<Path>>(path: P) -> Result<RgbImage> {
    let path = path.as_ref();
    let reader = check_decoder(path)?;
    log::debug!("Decoding {} as {:?}", path.display(), reader.format());

    let img = reader
        .decode()
        .with_context(|| format!("Failed to decode image {}", path.display()))?;

    let rgb = img.to_rgb8();
    let (width, height) = rgb.dimensions();
    log::debug!("Loaded image {}x{}", width, height);
    Ok(rgb)
}

/// Nearest-neighbour resize. Destination `d` samples source
/// `floor((d + 0.5) * src / dst)` on each axis; no blending.
pub fn resize_nearest(src: &RgbImage, width: u32, height: u32) -> BakeResult<RgbImage> {
    if width == 0 || height == 0 {
        return Err(BakeError::InvalidDimensions { width, height });
    }
    let (src_w, src_h) = src.dimensions();
    if src_w == 0 || src_h == 0 {
        return Err(BakeError::InvalidDimensions {
            width: src_w,
            height: src_h,
        });
    }

    let xs: Vec<u32> = (0..width).map(|d| nearest_source(d, width, src_w)).collect();
    let ys: Vec<u32> = (0..height).map(|d| nearest_source(d, height, src_h)).collect();

    Ok(RgbImage::from_fn(width, height, |x, y| {
        *src.get_pixel(xs[x as usize], ys[y as usize])
    }))
}

fn nearest_source(dst: u32, dst_len: u32, src_len: u32) -> u32 {
    let s = ((2 * u64::from(dst) + 1) * u64::from(src_len)) / (2 * u64::from(dst_len));
    (s as u32).min(src_len - 1)
}
