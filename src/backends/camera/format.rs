// SPDX-License-Identifier: GPL-3.0-only

//! Photo format selection

use super::types::PhotoFormat;
use crate::constants::AspectRatio;
use tracing::info;

/// Select the photo format to capture with
///
/// Always the maximum resolution, restricted to the preferred aspect ratio
/// when the device offers it.
///
/// Framerate preference among equal resolutions:
/// - Prefer 30-60 fps range (highest within it)
/// - Otherwise the highest available framerate
pub fn select_photo_format(formats: &[PhotoFormat], aspect: AspectRatio) -> Option<PhotoFormat> {
    if formats.is_empty() {
        return None;
    }

    let matching: Vec<PhotoFormat> = formats
        .iter()
        .filter(|f| aspect.matches(f.width, f.height))
        .copied()
        .collect();
    let pool = if matching.is_empty() {
        info!(?aspect, "No format matches preferred aspect ratio, using all formats");
        formats.to_vec()
    } else {
        matching
    };

    let max_pixels = pool.iter().map(PhotoFormat::pixels).max()?;
    let max_res: Vec<PhotoFormat> = pool
        .into_iter()
        .filter(|f| f.pixels() == max_pixels)
        .collect();

    let preferred = max_res
        .iter()
        .filter(|f| f.max_fps.is_some_and(|fps| (30..=60).contains(&fps)))
        .max_by_key(|f| f.max_fps);

    let selected = preferred
        .or_else(|| max_res.iter().max_by_key(|f| f.max_fps))
        .copied();

    if let Some(format) = &selected {
        info!(format = %format, "Selected photo format");
    }
    selected
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt(width: u32, height: u32, fps: Option<u32>) -> PhotoFormat {
        PhotoFormat {
            width,
            height,
            max_fps: fps,
        }
    }

    #[test]
    fn test_prefers_aspect_ratio_over_raw_size() {
        let formats = [fmt(3840, 2160, Some(30)), fmt(3264, 2448, Some(30))];
        assert_eq!(
            select_photo_format(&formats, AspectRatio::FourThree),
            Some(fmt(3264, 2448, Some(30)))
        );
    }

    #[test]
    fn test_falls_back_when_ratio_missing() {
        let formats = [fmt(1920, 1080, Some(30)), fmt(3840, 2160, Some(24))];
        assert_eq!(
            select_photo_format(&formats, AspectRatio::Square),
            Some(fmt(3840, 2160, Some(24)))
        );
    }

    #[test]
    fn test_prefers_fps_in_range() {
        let formats = [
            fmt(4032, 3024, Some(120)),
            fmt(4032, 3024, Some(30)),
            fmt(4032, 3024, Some(60)),
        ];
        assert_eq!(
            select_photo_format(&formats, AspectRatio::FourThree),
            Some(fmt(4032, 3024, Some(60)))
        );
    }

    #[test]
    fn test_empty_formats() {
        assert_eq!(select_photo_format(&[], AspectRatio::FourThree), None);
    }
}
