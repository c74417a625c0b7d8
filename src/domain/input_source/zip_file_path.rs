use super::image_file_path::is_image_path;
use super::path_error::PathError;
use super::source_image::SourceImage;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use zip::ZipArchive;

/// ZIPファイルへのパスを表現し、その妥当性を保証する構造体。
#[derive(Debug)]
pub struct ZipFilePath(PathBuf);

impl ZipFilePath {
    // --- Public Methods ---

    /// 新しい `ZipFilePath` インスタンスを生成する。
    ///
    /// パスが存在し、ファイルであり、かつ拡張子が `.zip` であることを検証する。
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, PathError> {
        let path = path.as_ref();

        // 存在し、かつファイルであることを検証
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

        if !has_zip_extension(path) {
            return Err(PathError::InvalidPath(format!(
                "パス '{}' は.zipファイルではありません。",
                path.display()
            )));
        }
        Ok(Self(path.to_path_buf()))
    }

    /// 内部の `Path` への参照を返す。
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// アーカイブ内の画像エントリをすべて読み込む。
    ///
    /// エントリ名でソートし、順序を安定させる。
    pub fn read_images(&self) -> Result<Vec<SourceImage>, PathError> {
        let mut archive = self.open_archive()?;

        let mut names: Vec<String> = archive
            .file_names()
            .filter(|name| !name.ends_with('/') && is_image_path(Path::new(name)))
            .map(str::to_string)
            .collect();
        names.sort();

        let mut images = Vec::with_capacity(names.len());
        for name in &names {
            let mut entry = Self::find_entry_in_archive(&mut archive, name)?;
            let data = Self::read_entry_content(&mut entry)?;
            images.push(SourceImage::new(name, data));
        }
        Ok(images)
    }

    // --- Private Helper Methods ---

    /// ZIPファイルを開き、ZipArchiveを生成する。
    fn open_archive(&self) -> Result<ZipArchive<File>, PathError> {
        let file = File::open(&self.0)?;
        ZipArchive::new(file).map_err(|e| PathError::Archive(format!("無効なZIPファイル: {}", e)))
    }

    /// アーカイブから指定されたエントリを見つける。
    fn find_entry_in_archive<'a>(
        archive: &'a mut ZipArchive<File>,
        name: &str,
    ) -> Result<zip::read::ZipFile<'a>, PathError> {
        archive
            .by_name(name)
            .map_err(|e| PathError::Archive(format!("エントリ '{}' を開けません: {}", name, e)))
    }

    /// エントリの内容を読み込む。
    fn read_entry_content(entry: &mut zip::read::ZipFile) -> Result<Vec<u8>, PathError> {
        let mut buffer = Vec::with_capacity(entry.size() as usize);
        entry
            .read_to_end(&mut buffer)
            .map_err(|e| PathError::Archive(format!("エントリの読み取りに失敗: {}", e)))?;
        Ok(buffer)
    }
}

/// 拡張子が `.zip`（大文字小文字を問わない）かどうか。
pub fn has_zip_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("zip"))
}

// Displayトレイトの実装（表示用）
impl fmt::Display for ZipFilePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}
