use super::path_error::PathError;
use super::source_image::SourceImage;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// 対応している画像の拡張子（小文字）。
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "webp", "tif", "tiff"];

/// パスが対応している画像ファイル名か、拡張子で簡易的に判定します。
///
/// ファイルシステムには触れないため、ZIPのエントリ名にも使えます。
pub fn is_image_path(path: &Path) -> bool {
    // `file_stem` がないとドットファイル (`.DS_Store` など) を誤判定するためチェック
    let has_stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .is_some_and(|s| !s.starts_with('.'));
    if !has_stem {
        return false;
    }
    match path.extension().and_then(|s| s.to_str()) {
        Some(ext) => IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()),
        None => false,
    }
}

/// 単一の画像ファイルへのパスを表現し、その妥当性を保証する構造体。
#[derive(Debug)]
pub struct ImageFilePath(PathBuf);

impl ImageFilePath {
    /// パスが存在し、ファイルであり、かつ画像の拡張子であることを検証する。
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, PathError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(PathError::InvalidPath(format!(
                "パス '{}' は存在しません。",
                path.display()
            )));
        }
        if !path.is_file() {
            return Err(PathError::InvalidPath(format!(
                "パス '{}' はファイルではありません。",
                path.display()
            )));
        }
        if !is_image_path(path) {
            return Err(PathError::UnsupportedType(format!(
                "パス '{}' は画像ファイルではありません。",
                path.display()
            )));
        }
        Ok(Self(path.to_path_buf()))
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// ファイルを読み込み、ファイル名を元にした `SourceImage` を返す。
    pub fn read(&self) -> Result<SourceImage, PathError> {
        let data = fs::read(&self.0)?;
        let name = self
            .0
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("untitled");
        Ok(SourceImage::new(name, data))
    }
}

impl fmt::Display for ImageFilePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}
