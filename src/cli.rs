use clap::{Parser, ValueEnum};
use gallery_resizer::domain::upload_variants::{DISPLAY_PRESET, THUMBNAIL_PRESET};
use gallery_resizer::domain::{BoundingBox, Quality, ResampleFilter, ResizeTarget, UploadPresets};
use std::path::PathBuf;

/// 写真を表示用とサムネイルの2サイズに縮小し、JPEGとして書き出すツール
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// 変換対象の画像ファイル、画像を含むフォルダ、またはZIPファイルのパス
    #[arg(required = true)]
    pub input_path: PathBuf,

    /// 出力先フォルダのパス (オプション: デフォルトは入力と同じフォルダ)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// 表示用画像の外接矩形 (例: 1200x1200 または 1200)
    #[arg(long, default_value_t = DISPLAY_PRESET.bounds)]
    pub display_bounds: BoundingBox,

    /// 表示用画像のJPEG品質 (0.0 より大きく 1.0 以下)
    #[arg(long, default_value_t = DISPLAY_PRESET.quality)]
    pub display_quality: Quality,

    /// サムネイルの外接矩形 (例: 400x400 または 400)
    #[arg(long, default_value_t = THUMBNAIL_PRESET.bounds)]
    pub thumbnail_bounds: BoundingBox,

    /// サムネイルのJPEG品質 (0.0 より大きく 1.0 以下)
    #[arg(long, default_value_t = THUMBNAIL_PRESET.quality)]
    pub thumbnail_quality: Quality,

    /// 縮小に使うリサンプリングフィルタ
    #[arg(long, value_enum, default_value_t = FilterArg::Bilinear)]
    pub filter: FilterArg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FilterArg {
    Bilinear,
    CatmullRom,
    Lanczos3,
}

impl From<FilterArg> for ResampleFilter {
    fn from(arg: FilterArg) -> Self {
        match arg {
            FilterArg::Bilinear => ResampleFilter::Bilinear,
            FilterArg::CatmullRom => ResampleFilter::CatmullRom,
            FilterArg::Lanczos3 => ResampleFilter::Lanczos3,
        }
    }
}

impl Args {
    /// 引数からアップロード用の縮小指定を組み立てます。
    pub fn presets(&self) -> UploadPresets {
        UploadPresets::new(
            ResizeTarget::new(self.display_bounds, self.display_quality),
            ResizeTarget::new(self.thumbnail_bounds, self.thumbnail_quality),
        )
    }
}
