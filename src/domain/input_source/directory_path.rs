use super::image_file_path::is_image_path;
use super::path_error::PathError;
use super::source_image::SourceImage;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

// 構造体としてDirectoryPathを定義
#[derive(Debug)]
pub struct DirectoryPath {
    pub path: PathBuf,
}

impl DirectoryPath {
    // コンストラクタ: パスを受け取り、バリデーションを行う
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, PathError> {
        let path = path.as_ref();

        // パスが存在し、かつディレクトリであることを検証
        if !path.exists() {
            return Err(PathError::InvalidPath(format!(
                "パス '{}' は存在しません。",
                path.display()
            )));
        }
        if !path.is_dir() {
            return Err(PathError::InvalidPath(format!(
                "パス '{}' はディレクトリではありません。",
                path.display()
            )));
        }

        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    // 内部のPathBufへの参照を返す
    pub fn as_path(&self) -> &Path {
        &self.path
    }

    /// ディレクトリ配下（サブディレクトリを含む）の画像ファイルを列挙します。
    ///
    /// 読み取り順序はファイルシステム依存のため、パスでソートして返します。
    /// 読み取れないエントリはスキップされます。
    pub fn image_files(&self) -> Result<Vec<PathBuf>, PathError> {
        // ルート自体が読めない場合はエラーにする
        fs::read_dir(&self.path)?;

        let mut files: Vec<PathBuf> = WalkDir::new(&self.path)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file() && is_image_path(e.path()))
            .map(|e| e.into_path())
            .collect();
        files.sort();
        Ok(files)
    }

    /// ディレクトリ配下のファイルを読み込み、相対パスを名前とした `SourceImage` を返します。
    pub fn read_image(&self, file: &Path) -> Result<SourceImage, PathError> {
        let relative = file.strip_prefix(&self.path).unwrap_or(file);
        let data = fs::read(file)?;
        Ok(SourceImage::new(&relative.to_string_lossy(), data))
    }
}

// Displayトレイトの実装（表示用）
impl fmt::Display for DirectoryPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}
