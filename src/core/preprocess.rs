//! Image decoding and tensor preparation.
//!
//! Order matters: channels are normalized to RGB before resizing, and the
//! resize filter is bicubic. Changing either shifts pixel values the model
//! was trained on without any visible failure.

use crate::domain::model::ImageTensor;
use crate::utils::error::Result;
use image::imageops::FilterType;
use image::DynamicImage;

/// Square input resolution the bundled model was trained on.
pub const IMAGE_SIZE: u32 = 224;

pub const CHANNELS: usize = 3;

/// 從上傳的位元組解碼影像，格式由內容判斷
pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage> {
    Ok(image::load_from_memory(bytes)?)
}

/// RGB 轉換 -> 縮放 -> 除以 255，輸出 (1, size, size, 3)
pub fn to_tensor(image: &DynamicImage, size: u32) -> ImageTensor {
    let rgb = image.to_rgb8();
    let resized = image::imageops::resize(&rgb, size, size, FilterType::CatmullRom);

    let side = size as usize;
    let mut data = Vec::with_capacity(side * side * CHANNELS);
    for pixel in resized.pixels() {
        data.extend(pixel.0.iter().map(|&v| v as f32 / 255.0));
    }

    ImageTensor {
        shape: [1, side, side, CHANNELS],
        data,
    }
}

pub fn preprocess(bytes: &[u8], size: u32) -> Result<ImageTensor> {
    let image = decode_image(bytes)?;
    tracing::debug!(
        width = image.width(),
        height = image.height(),
        color = ?image.color(),
        "Decoded upload"
    );
    Ok(to_tensor(&image, size))
}
