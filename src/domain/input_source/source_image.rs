// 中間生成物である「元画像データ」を型で表現する
// 出力ファイル名の元になる名前と、デコード前のバイナリデータを保持する

use std::path::{Component, Path};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceImage {
    name: String,
    data: Vec<u8>,
}

impl SourceImage {
    /// 入力ルートからの相対パスとデータから作成します。
    ///
    /// 名前は拡張子を除いた相対パスで、区切り文字は `_` に置き換えられます。
    /// (例: `2024/trip/IMG_01.PNG` -> `2024_trip_IMG_01`)
    pub fn new(relative_path: &str, data: Vec<u8>) -> Self {
        Self {
            name: output_stem(relative_path),
            data,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

fn output_stem(relative_path: &str) -> String {
    // ZIPのエントリ名は常に `/` 区切りなので、Windows の `\` も同様に扱う
    let normalized = relative_path.replace('\\', "/");
    let path = Path::new(&normalized);

    let mut parts: Vec<String> = path
        .parent()
        .map(|parent| {
            parent
                .components()
                .filter_map(|c| match c {
                    Component::Normal(s) => s.to_str().map(str::to_string),
                    _ => None,
                })
                .collect()
        })
        .unwrap_or_default();

    if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
        parts.push(stem.to_string());
    }

    if parts.is_empty() {
        "untitled".to_string()
    } else {
        parts.join("_")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_strips_extension() {
        let img = SourceImage::new("photo.JPG", vec![1, 2, 3]);
        assert_eq!(img.name(), "photo");
        assert_eq!(img.data(), &[1, 2, 3]);
    }

    #[test]
    fn name_flattens_nested_paths() {
        assert_eq!(SourceImage::new("2024/trip/IMG_01.png", Vec::new()).name(), "2024_trip_IMG_01");
        assert_eq!(SourceImage::new("a\\b\\c.gif", Vec::new()).name(), "a_b_c");
        assert_eq!(SourceImage::new("./x/y.bmp", Vec::new()).name(), "x_y");
    }

    #[test]
    fn name_rejects_parent_components() {
        // `..` を含むZIPエントリでも出力先の外へは出ない
        assert_eq!(SourceImage::new("../../evil.png", Vec::new()).name(), "evil");
    }

    #[test]
    fn empty_name_falls_back() {
        assert_eq!(SourceImage::new("", Vec::new()).name(), "untitled");
    }
}
