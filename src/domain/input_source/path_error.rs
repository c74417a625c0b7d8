use std::fmt;

// エラー型を定義
#[derive(Debug)]
pub enum PathError {
    InvalidPath(String),
    /// 画像ファイル・ディレクトリ・ZIPのいずれでもないパス
    UnsupportedType(String),
    IoError(std::io::Error),
    /// ZIPアーカイブの読み取りに失敗
    Archive(String),
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathError::InvalidPath(s) => write!(f, "無効なパスです: {}", s),
            PathError::UnsupportedType(s) => write!(f, "対応していない入力です: {}", s),
            PathError::IoError(e) => write!(f, "I/Oエラー: {}", e),
            PathError::Archive(s) => write!(f, "ZIPアーカイブのエラー: {}", s),
        }
    }
}

impl std::error::Error for PathError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PathError::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PathError {
    fn from(e: std::io::Error) -> Self {
        PathError::IoError(e)
    }
}
