use crate::domain::input_source::path_error::PathError;
use crate::domain::DownscaleError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/Oエラーが発生しました: {0}")]
    Io(#[from] std::io::Error),

    #[error("パス関連のエラー: {0}")]
    Path(#[from] PathError),

    #[error("画像の縮小に失敗しました: {0}")]
    Downscale(#[from] DownscaleError),

    #[error("処理対象が見つかりませんでした: {0}")]
    NoItemsProcessed(String),
}
