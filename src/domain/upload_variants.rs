use super::downscaler::{DownscaleError, Downscaler, EncodedImage};
use super::resize_params::{BoundingBox, Quality, ResizeTarget};
use std::thread;

/// 表示用画像の最大辺 (px)。
pub const DISPLAY_MAX_SIZE: u32 = 1200;
/// 表示用画像のJPEG品質。
pub const DISPLAY_QUALITY: f32 = 0.8;
/// サムネイルの最大辺 (px)。
pub const THUMBNAIL_MAX_SIZE: u32 = 400;
/// サムネイルのJPEG品質。
pub const THUMBNAIL_QUALITY: f32 = 0.7;

/// 表示用画像の縮小指定 (1200x1200, 品質 0.8)。
pub const DISPLAY_PRESET: ResizeTarget = ResizeTarget {
    bounds: BoundingBox::square_unchecked(DISPLAY_MAX_SIZE),
    quality: Quality::new_unchecked(DISPLAY_QUALITY),
};

/// サムネイルの縮小指定 (400x400, 品質 0.7)。
pub const THUMBNAIL_PRESET: ResizeTarget = ResizeTarget {
    bounds: BoundingBox::square_unchecked(THUMBNAIL_MAX_SIZE),
    quality: Quality::new_unchecked(THUMBNAIL_QUALITY),
};

/// 1枚のアップロードで生成する2種類の縮小指定。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UploadPresets {
    pub display: ResizeTarget,
    pub thumbnail: ResizeTarget,
}

impl UploadPresets {
    pub fn new(display: ResizeTarget, thumbnail: ResizeTarget) -> Self {
        Self { display, thumbnail }
    }
}

impl Default for UploadPresets {
    fn default() -> Self {
        Self::new(DISPLAY_PRESET, THUMBNAIL_PRESET)
    }
}

/// 1枚の元画像から生成した表示用画像とサムネイル。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadVariants {
    pub display: EncodedImage,
    pub thumbnail: EncodedImage,
}

/// 元画像から表示用とサムネイルの2種類を生成します。
///
/// 2回の縮小は状態を共有しないため、スコープ付きスレッドで並行に実行します。
/// どちらかが失敗した場合はそのエラーを返し、部分的な結果は返しません。
pub fn prepare_upload(
    downscaler: &Downscaler,
    source: &[u8],
    presets: &UploadPresets,
) -> Result<UploadVariants, DownscaleError> {
    let (display, thumbnail) = thread::scope(|s| {
        let thumbnail = s.spawn(|| downscaler.downscale_with(source, &presets.thumbnail));
        let display = downscaler.downscale_with(source, &presets.display);
        let thumbnail = thumbnail
            .join()
            .unwrap_or_else(|panic| std::panic::resume_unwind(panic));
        (display, thumbnail)
    });

    Ok(UploadVariants {
        display: display?,
        thumbnail: thumbnail?,
    })
}
