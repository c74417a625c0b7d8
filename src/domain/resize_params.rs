//! 縮小処理のパラメータ（外接矩形・品質・リサンプリングフィルタ）を表現するモジュール。
//!
//! 値はすべてコンストラクタ（または `FromStr`）で検証されるため、
//! ここを通過したパラメータは縮小処理の中で再検証する必要がありません。

use image::imageops::FilterType;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// --- エラー定義 ---

/// パラメータの検証時に発生する設定エラー。
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("外接矩形の幅と高さは1以上である必要があります")]
    ZeroBound,

    #[error("品質は 0.0 より大きく 1.0 以下である必要があります: {0}")]
    QualityOutOfRange(f32),

    #[error("外接矩形の形式が不正です（例: 1200x800 または 400）: '{0}'")]
    InvalidBounds(String),

    #[error("品質の形式が不正です（例: 0.8）: '{0}'")]
    InvalidQuality(String),
}

// --- 外接矩形 ---

/// 出力画像が収まるべき外接矩形 (最大幅, 最大高さ)。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    max_width: u32,
    max_height: u32,
}

impl BoundingBox {
    /// 新しい `BoundingBox` を作成します。
    ///
    /// # 戻り値
    /// * `Ok(BoundingBox)`: 幅・高さがともに1以上の場合。
    /// * `Err(ConfigError::ZeroBound)`: どちらかが0の場合。
    pub fn new(max_width: u32, max_height: u32) -> Result<Self, ConfigError> {
        if max_width == 0 || max_height == 0 {
            return Err(ConfigError::ZeroBound);
        }
        Ok(Self {
            max_width,
            max_height,
        })
    }

    /// 正方形の外接矩形を作成します。
    pub fn square(size: u32) -> Result<Self, ConfigError> {
        Self::new(size, size)
    }

    /// 検証を省略して正方形の矩形を作成します。`size` は1以上であること。
    pub(crate) const fn square_unchecked(size: u32) -> Self {
        Self {
            max_width: size,
            max_height: size,
        }
    }

    pub fn max_width(&self) -> u32 {
        self.max_width
    }

    pub fn max_height(&self) -> u32 {
        self.max_height
    }
}

impl FromStr for BoundingBox {
    type Err = ConfigError;

    /// `"1200x800"` または `"400"`（正方形）の形式を受け付けます。
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let parse = |part: &str| {
            part.trim()
                .parse::<u32>()
                .map_err(|_| ConfigError::InvalidBounds(s.to_string()))
        };

        match trimmed.split_once(['x', 'X']) {
            Some((w, h)) => Self::new(parse(w)?, parse(h)?),
            None => Self::square(parse(trimmed)?),
        }
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.max_width, self.max_height)
    }
}

// --- 品質 ---

/// 非可逆エンコードの品質係数。範囲は (0.0, 1.0]。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quality(f32);

impl Quality {
    pub fn new(value: f32) -> Result<Self, ConfigError> {
        // NaN は比較がすべて false になるため、この条件で同時に弾かれる
        if value > 0.0 && value <= 1.0 {
            Ok(Self(value))
        } else {
            Err(ConfigError::QualityOutOfRange(value))
        }
    }

    /// 検証を省略して作成します。`value` は (0.0, 1.0] の範囲であること。
    pub(crate) const fn new_unchecked(value: f32) -> Self {
        Self(value)
    }

    pub fn value(&self) -> f32 {
        self.0
    }

    /// JPEGエンコーダの 1〜100 の品質値に変換します。
    pub fn to_jpeg_quality(&self) -> u8 {
        ((self.0 * 100.0).round() as u8).max(1)
    }
}

impl FromStr for Quality {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .trim()
            .parse::<f32>()
            .map_err(|_| ConfigError::InvalidQuality(s.to_string()))?;
        Self::new(value)
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// --- リサンプリングフィルタ ---

/// 縮小時に使うリサンプリングフィルタ。いずれもバイリニア以上の品質。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResampleFilter {
    #[default]
    Bilinear,
    CatmullRom,
    Lanczos3,
}

impl ResampleFilter {
    pub(crate) fn to_filter_type(self) -> FilterType {
        match self {
            ResampleFilter::Bilinear => FilterType::Triangle,
            ResampleFilter::CatmullRom => FilterType::CatmullRom,
            ResampleFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

// --- 1回分の縮小指定 ---

/// 1回の縮小で使う外接矩形と品質の組。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeTarget {
    pub bounds: BoundingBox,
    pub quality: Quality,
}

impl ResizeTarget {
    pub fn new(bounds: BoundingBox, quality: Quality) -> Self {
        Self { bounds, quality }
    }
}
