use super::directory_path::DirectoryPath;
use super::image_file_path::ImageFilePath;
use super::path_error::PathError;
use super::zip_file_path::{has_zip_extension, ZipFilePath};
use std::path::Path;

/// 入力ソースを表現する列挙型。
/// 単一の画像ファイル、画像を含むディレクトリ、画像を含むZIPファイルのいずれかを保持する。
#[derive(Debug)]
pub enum InputSource {
    ImageFile(ImageFilePath),
    Directory(DirectoryPath),
    ZipFile(ZipFilePath),
}

impl InputSource {
    /// パスの種類を判定して `InputSource` を作成する。
    ///
    /// # 戻り値
    /// * `Err(PathError::InvalidPath)`: パスが存在しない場合。
    /// * `Err(PathError::UnsupportedType)`: 画像・ディレクトリ・ZIPのいずれでもない場合。
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, PathError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(PathError::InvalidPath(format!(
                "パス '{}' は存在しません。",
                path.display()
            )));
        }

        if path.is_dir() {
            DirectoryPath::new(path).map(InputSource::Directory)
        } else if has_zip_extension(path) {
            ZipFilePath::new(path).map(InputSource::ZipFile)
        } else {
            ImageFilePath::new(path).map(InputSource::ImageFile)
        }
    }

    pub fn as_path(&self) -> &Path {
        match self {
            InputSource::ImageFile(file) => file.as_path(),
            InputSource::Directory(dir) => dir.as_path(),
            InputSource::ZipFile(zip) => zip.as_path(),
        }
    }

    /// 出力先が指定されなかったときに使うディレクトリ。
    ///
    /// ディレクトリ入力ならそのディレクトリ自身、ファイル入力なら親ディレクトリ。
    pub fn default_output_dir(&self) -> &Path {
        match self {
            InputSource::Directory(dir) => dir.as_path(),
            other => other
                .as_path()
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new(".")),
        }
    }
}
