// SPDX-License-Identifier: MPL-2.0

//! Storage utilities for writing captured photos

use crate::errors::CaptureError;
use image::RgbImage;
use std::path::{Path, PathBuf};
use tracing::info;

const JPEG_QUALITY: u8 = 92;

/// `~/Pictures/camera-screen`, or the working directory when no home exists
pub fn default_photo_directory() -> PathBuf {
    dirs::picture_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join("camera-screen")
}

/// Timestamped file name, e.g. `IMG_20260118_142501_123.jpg`
pub fn photo_file_name() -> String {
    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S_%3f");
    format!("IMG_{}.jpg", timestamp)
}

/// Encode an RGB frame as JPEG
pub fn encode_jpeg(image: &RgbImage) -> Result<Vec<u8>, CaptureError> {
    let mut buffer = Vec::new();
    let mut cursor = std::io::Cursor::new(&mut buffer);

    let mut encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut cursor, JPEG_QUALITY);
    encoder
        .encode(
            image.as_raw(),
            image.width(),
            image.height(),
            image::ExtendedColorType::Rgb8,
        )
        .map_err(|e| CaptureError::EncodingFailed(e.to_string()))?;

    Ok(buffer)
}

/// Encode and write a frame into `output_dir`, returning the written path
pub async fn save_photo(image: RgbImage, output_dir: &Path) -> Result<PathBuf, CaptureError> {
    let filepath = output_dir.join(photo_file_name());
    info!(path = %filepath.display(), "Saving photo");

    let dir = output_dir.to_path_buf();
    let target = filepath.clone();
    tokio::task::spawn_blocking(move || {
        let data = encode_jpeg(&image)?;
        std::fs::create_dir_all(&dir)?;
        std::fs::write(&target, data)?;
        Ok::<_, CaptureError>(())
    })
    .await
    .map_err(|e| CaptureError::SaveFailed(format!("Save task error: {}", e)))??;

    info!(path = %filepath.display(), "Photo saved successfully");
    Ok(filepath)
}
