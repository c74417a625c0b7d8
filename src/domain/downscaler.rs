// アップロード前の画像縮小処理。
//
// 外接矩形に収まるようアスペクト比を保ったまま縮小し、JPEGとして再エンコードする。

use super::resize_params::{BoundingBox, Quality, ResampleFilter, ResizeTarget};
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ExtendedColorType, GenericImageView};
use thiserror::Error;

// --- エラー定義 ---

/// 縮小処理で発生するエラー。どちらの場合も出力は生成されません。
#[derive(Debug, Error)]
pub enum DownscaleError {
    /// 入力が画像として解釈できなかった（破損・未対応フォーマット）。
    #[error("画像のデコードに失敗しました: {0}")]
    Decode(#[source] image::ImageError),

    /// 縮小後のバッファをJPEGへエンコードできなかった。
    #[error("画像のエンコードに失敗しました: {0}")]
    Encode(#[source] image::ImageError),
}

// --- 構造体定義 ---

/// 縮小・再エンコード済みのJPEG画像。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    bytes: Vec<u8>,
    width: u32,
    height: u32,
}

impl EncodedImage {
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// (幅, 高さ) をまとめて取得。
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// 画像縮小器。呼び出し間で状態を持たないため、複数スレッドから同時に使えます。
#[derive(Debug, Clone, Copy, Default)]
pub struct Downscaler {
    filter: ResampleFilter,
}

impl Downscaler {
    pub fn new(filter: ResampleFilter) -> Self {
        Self { filter }
    }

    /// 画像データを外接矩形に収まるよう縮小し、JPEGとして再エンコードします。
    ///
    /// 入力が矩形内に収まっている場合は拡大せず、同じ寸法のまま再エンコードします。
    ///
    /// # 引数
    /// * `source`: 任意のデコード可能な画像のバイナリデータ。
    /// * `bounds`: 出力が収まるべき外接矩形。
    /// * `quality`: JPEGの品質係数。
    ///
    /// # 戻り値
    /// * `Ok(EncodedImage)`: 縮小・エンコードに成功した場合。
    /// * `Err(DownscaleError::Decode)`: 入力が画像として解釈できない場合。
    /// * `Err(DownscaleError::Encode)`: エンコーダがバッファを受け付けなかった場合。
    pub fn downscale(
        &self,
        source: &[u8],
        bounds: BoundingBox,
        quality: Quality,
    ) -> Result<EncodedImage, DownscaleError> {
        let decoded = image::load_from_memory(source).map_err(DownscaleError::Decode)?;
        let (width, height) = decoded.dimensions();
        let (target_width, target_height) = target_dimensions(width, height, bounds);

        log::debug!(
            "縮小: {}x{} -> {}x{} (bounds={}, quality={}, filter={:?})",
            width,
            height,
            target_width,
            target_height,
            bounds,
            quality,
            self.filter
        );

        let resized = if (target_width, target_height) == (width, height) {
            decoded
        } else {
            decoded.resize_exact(target_width, target_height, self.filter.to_filter_type())
        };

        let bytes = encode_jpeg(&resized, quality)?;
        Ok(EncodedImage {
            bytes,
            width: target_width,
            height: target_height,
        })
    }

    /// `ResizeTarget` を使って縮小します。
    pub fn downscale_with(
        &self,
        source: &[u8],
        target: &ResizeTarget,
    ) -> Result<EncodedImage, DownscaleError> {
        self.downscale(source, target.bounds, target.quality)
    }
}

/// 元の寸法と外接矩形から出力寸法を計算します。
///
/// 幅が高さより大きければ幅を、そうでなければ高さを基準軸として縮小率を決め、
/// 基準軸は矩形の辺にちょうど一致します。矩形が正方形でない場合に
/// もう一方の軸がはみ出したときは、その軸を基準に縮小し直します。
/// 拡大は行わず、各辺は最低1pxです。
pub fn target_dimensions(width: u32, height: u32, bounds: BoundingBox) -> (u32, u32) {
    let (max_width, max_height) = (bounds.max_width(), bounds.max_height());

    let (mut out_width, mut out_height) = if width > height {
        if width > max_width {
            (max_width, scale_side(height, max_width, width))
        } else {
            (width, height)
        }
    } else if height > max_height {
        (scale_side(width, max_height, height), max_height)
    } else {
        (width, height)
    };

    if out_width > max_width {
        out_width = max_width;
        out_height = scale_side(height, max_width, width);
    }
    if out_height > max_height {
        out_height = max_height;
        out_width = scale_side(width, max_height, height);
    }

    (out_width, out_height)
}

/// `side * bound / limiting` を四捨五入し、最低1にします。
#[inline]
fn scale_side(side: u32, bound: u32, limiting: u32) -> u32 {
    let scaled = (side as f64 * bound as f64 / limiting as f64).round() as u32;
    scaled.max(1)
}

/// JPEGはアルファを持たないため、RGB8に変換してからエンコードします。
fn encode_jpeg(image: &DynamicImage, quality: Quality) -> Result<Vec<u8>, DownscaleError> {
    let rgb = image.to_rgb8();
    let mut buf = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut buf, quality.to_jpeg_quality());
    encoder
        .encode(
            rgb.as_raw(),
            rgb.width(),
            rgb.height(),
            ExtendedColorType::Rgb8,
        )
        .map_err(DownscaleError::Encode)?;
    Ok(buf)
}

// --- テストモジュール ---

#[cfg(test)]
mod tests {
    use super::*;
    use image::codecs::png::PngEncoder;
    use image::{ImageEncoder, ImageFormat};

    // --- テスト用ヘルパー関数 ---
    fn create_dummy_png(width: u32, height: u32, color: u8) -> Vec<u8> {
        let buf = vec![color; (width * height * 3) as usize];
        let mut result = Vec::new();
        let encoder = PngEncoder::new(&mut result);
        encoder
            .write_image(&buf, width, height, ExtendedColorType::Rgb8)
            .expect("PNGのエンコードに失敗");
        result
    }

    fn create_dummy_rgba_png(width: u32, height: u32) -> Vec<u8> {
        let buf = vec![128u8; (width * height * 4) as usize];
        let mut result = Vec::new();
        PngEncoder::new(&mut result)
            .write_image(&buf, width, height, ExtendedColorType::Rgba8)
            .expect("PNGのエンコードに失敗");
        result
    }

    fn bounds(w: u32, h: u32) -> BoundingBox {
        BoundingBox::new(w, h).unwrap()
    }

    fn quality(q: f32) -> Quality {
        Quality::new(q).unwrap()
    }

    // --- target_dimensions ---

    #[test]
    fn landscape_limited_by_width() {
        assert_eq!(target_dimensions(3000, 2000, bounds(1200, 1200)), (1200, 800));
    }

    #[test]
    fn portrait_limited_by_height() {
        assert_eq!(target_dimensions(800, 1000, bounds(400, 400)), (320, 400));
    }

    #[test]
    fn within_bounds_is_noop() {
        assert_eq!(target_dimensions(300, 200, bounds(1200, 1200)), (300, 200));
        assert_eq!(target_dimensions(1200, 1200, bounds(1200, 1200)), (1200, 1200));
        assert_eq!(target_dimensions(1, 1, bounds(400, 400)), (1, 1));
    }

    #[test]
    fn square_input_uses_height_axis() {
        assert_eq!(target_dimensions(2000, 2000, bounds(1200, 1200)), (1200, 1200));
    }

    #[test]
    fn noop_is_idempotent() {
        let b = bounds(400, 400);
        let once = target_dimensions(320, 240, b);
        let twice = target_dimensions(once.0, once.1, b);
        assert_eq!(once, (320, 240));
        assert_eq!(once, twice);

        // 縮小後の寸法を再度同じ矩形に通しても変わらない
        let shrunk = target_dimensions(4032, 3024, b);
        assert_eq!(target_dimensions(shrunk.0, shrunk.1, b), shrunk);
    }

    #[test]
    fn extreme_ratios_stay_inside_box() {
        let b = bounds(400, 400);
        for (w, h) in [(10_000, 10), (10, 10_000), (1, 1), (10_000, 1), (1, 10_000)] {
            let (ow, oh) = target_dimensions(w, h, b);
            assert!(ow >= 1 && oh >= 1, "{}x{} -> {}x{}", w, h, ow, oh);
            assert!(ow <= 400 && oh <= 400, "{}x{} -> {}x{}", w, h, ow, oh);
        }
        assert_eq!(target_dimensions(10_000, 10, b), (400, 1));
        assert_eq!(target_dimensions(10, 10_000, b), (1, 400));
    }

    #[test]
    fn limiting_axis_hits_bound_and_ratio_is_kept() {
        let b = bounds(1200, 1200);
        for (w, h) in [(4032, 3024), (3024, 4032), (1921, 1081), (5000, 1234), (1300, 1299)] {
            let (ow, oh) = target_dimensions(w, h, b);
            if w > h {
                assert_eq!(ow, 1200);
                let expected = h as f64 * ow as f64 / w as f64;
                assert!((oh as f64 - expected).abs() <= 1.0);
            } else {
                assert_eq!(oh, 1200);
                let expected = w as f64 * oh as f64 / h as f64;
                assert!((ow as f64 - expected).abs() <= 1.0);
            }
        }
    }

    #[test]
    fn non_square_box_is_never_exceeded() {
        // 高さ基準では収まるが幅がはみ出すケース
        assert_eq!(target_dimensions(900, 1000, bounds(400, 2000)), (400, 444));
        // 幅基準で縮小しても高さがはみ出すケース
        assert_eq!(target_dimensions(3000, 2000, bounds(1200, 500)), (750, 500));
    }

    // --- downscale ---

    #[test]
    fn downscale_shrinks_and_encodes_jpeg() {
        let source = create_dummy_png(800, 1000, 200);
        let out = Downscaler::default()
            .downscale(&source, bounds(400, 400), quality(0.8))
            .unwrap();

        assert_eq!(out.dimensions(), (320, 400));
        assert_eq!(image::guess_format(out.bytes()).unwrap(), ImageFormat::Jpeg);
        let decoded = image::load_from_memory(out.bytes()).unwrap();
        assert_eq!(decoded.dimensions(), (320, 400));
    }

    #[test]
    fn downscale_within_bounds_keeps_dimensions() {
        let source = create_dummy_png(300, 200, 10);
        let out = Downscaler::default()
            .downscale(&source, bounds(1200, 1200), quality(0.8))
            .unwrap();

        assert_eq!(out.dimensions(), (300, 200));
        // 寸法は変わらなくても必ずJPEGに再エンコードされる
        assert_eq!(image::guess_format(out.bytes()).unwrap(), ImageFormat::Jpeg);
        let decoded = image::load_from_memory(out.bytes()).unwrap();
        assert_eq!(decoded.dimensions(), (300, 200));
    }

    #[test]
    fn downscale_again_is_stable() {
        let source = create_dummy_png(640, 480, 90);
        let downscaler = Downscaler::new(ResampleFilter::CatmullRom);
        let first = downscaler
            .downscale(&source, bounds(400, 400), quality(0.7))
            .unwrap();
        let second = downscaler
            .downscale(first.bytes(), bounds(400, 400), quality(0.7))
            .unwrap();
        assert_eq!(first.dimensions(), (400, 300));
        assert_eq!(second.dimensions(), first.dimensions());
    }

    #[test]
    fn downscale_drops_alpha() {
        let source = create_dummy_rgba_png(50, 20);
        let out = Downscaler::new(ResampleFilter::Lanczos3)
            .downscale(&source, bounds(25, 25), quality(0.9))
            .unwrap();
        assert_eq!(out.dimensions(), (25, 10));
        let decoded = image::load_from_memory(out.bytes()).unwrap();
        assert!(!decoded.color().has_alpha());
    }

    #[test]
    fn corrupt_input_is_decode_error() {
        let res = Downscaler::default().downscale(
            b"this is not an image",
            bounds(400, 400),
            quality(0.8),
        );
        assert!(matches!(res, Err(DownscaleError::Decode(_))));

        // PNGのシグネチャだけで中身が壊れているケース
        let mut truncated = create_dummy_png(10, 10, 0);
        truncated.truncate(20);
        let res = Downscaler::default().downscale(&truncated, bounds(400, 400), quality(0.8));
        assert!(matches!(res, Err(DownscaleError::Decode(_))));
    }

    #[test]
    fn oversized_output_is_encode_error() {
        // JPEGは1辺 65535px までしか扱えないため、縮小不要でもエンコードで失敗する
        let source = create_dummy_png(70_000, 1, 0);
        let res = Downscaler::default().downscale(
            &source,
            bounds(100_000, 100_000),
            quality(0.8),
        );
        assert!(matches!(res, Err(DownscaleError::Encode(_))));
    }

    #[test]
    fn empty_input_is_decode_error() {
        let res = Downscaler::default().downscale(&[], bounds(400, 400), quality(0.8));
        assert!(matches!(res, Err(DownscaleError::Decode(_))));
    }

    #[test]
    fn downscale_with_target() {
        let source = create_dummy_png(120, 60, 0);
        let target = ResizeTarget::new(bounds(60, 60), quality(0.5));
        let out = Downscaler::default().downscale_with(&source, &target).unwrap();
        assert_eq!(out.dimensions(), (60, 30));
    }
}
