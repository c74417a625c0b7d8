//! アプリケーションのメインワークフローを定義するモジュール。
//!
//! このモジュールは、UI層（`cli`）とドメイン層（`domain`）を仲介し、
//! 入力から元画像を集めて表示用とサムネイルを書き出す処理フローを実装します。

use crate::cli::Args;
use gallery_resizer::domain::input_source::input_source::InputSource;
use gallery_resizer::domain::input_source::source_image::SourceImage;
use gallery_resizer::domain::{prepare_upload, Downscaler, UploadPresets};
use gallery_resizer::error::AppError;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// 表示用画像の出力サブフォルダ名。
const PHOTOS_DIR: &str = "photos";
/// サムネイルの出力サブフォルダ名。
const THUMBNAILS_DIR: &str = "thumbnails";

/// 1回の実行結果の集計。
#[derive(Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub processed: usize,
    pub failed: usize,
}

// --- public な main 関数 ---

/// アプリケーションのメインロジックを実行します。
///
/// # 引数
/// * `args`: コマンドラインからパースされた引数 (`cli::Args`)。
///
/// # 戻り値
/// * `Ok(RunSummary)`: 1枚以上の画像を書き出せた場合。
/// * `Err(AppError)`: 入力が不正な場合や、1枚も書き出せなかった場合。
pub fn run(args: Args) -> Result<RunSummary, AppError> {
    // 1. 入力の種類を判定
    let source = InputSource::new(&args.input_path)?;

    // 2. 出力ディレクトリの決定と作成
    let output_root = args
        .output_dir
        .clone()
        .unwrap_or_else(|| source.default_output_dir().to_path_buf());
    let output = OutputDirs::create(&output_root)?;

    let downscaler = Downscaler::new(args.filter.into());
    let presets = args.presets();
    log::info!(
        "処理を開始します: {} -> {} (表示用 {} / 品質 {}, サムネイル {} / 品質 {})",
        source.as_path().display(),
        output_root.display(),
        presets.display.bounds,
        presets.display.quality,
        presets.thumbnail.bounds,
        presets.thumbnail.quality
    );

    let mut writer = VariantWriter {
        downscaler,
        presets,
        output: &output,
        used_names: HashSet::new(),
    };
    let mut summary = RunSummary::default();

    // 3. 入力ごとに元画像を集めて処理
    match &source {
        InputSource::ImageFile(file) => {
            // 単一ファイルの失敗はそのまま呼び出し元へ返す
            let image = file.read()?;
            writer.write(&image)?;
            summary.processed += 1;
        }
        InputSource::Directory(dir) => {
            for path in dir.image_files()? {
                // 出力先が入力フォルダ配下にある場合、前回の出力を再処理しない
                if output.contains(&path)? {
                    continue;
                }
                let result = dir
                    .read_image(&path)
                    .map_err(AppError::from)
                    .and_then(|image| writer.write(&image));
                record(&mut summary, &path.display().to_string(), result);
            }
        }
        InputSource::ZipFile(zip) => {
            for image in zip.read_images()? {
                let result = writer.write(&image);
                record(&mut summary, image.name(), result);
            }
        }
    }

    // 4. 最終結果の判定
    log::info!(
        "すべての処理が完了しました: 成功 {} 件, 失敗 {} 件",
        summary.processed,
        summary.failed
    );
    if summary.processed == 0 {
        Err(AppError::NoItemsProcessed(
            source.as_path().display().to_string(),
        ))
    } else {
        Ok(summary)
    }
}

// --- private なヘルパー ---

/// 1枚ごとの処理結果を集計します。失敗しても処理は止めません。
fn record(summary: &mut RunSummary, label: &str, result: Result<(), AppError>) {
    match result {
        Ok(()) => summary.processed += 1,
        Err(e) => {
            log::warn!("'{}' の処理中にエラーが発生したためスキップします: {}", label, e);
            summary.failed += 1;
        }
    }
}

/// `photos/` と `thumbnails/` の出力先。
struct OutputDirs {
    photos: PathBuf,
    thumbnails: PathBuf,
}

impl OutputDirs {
    fn create(root: &Path) -> Result<Self, AppError> {
        let photos = root.join(PHOTOS_DIR);
        let thumbnails = root.join(THUMBNAILS_DIR);
        fs::create_dir_all(&photos)?;
        fs::create_dir_all(&thumbnails)?;
        // 入力と出力が相対・絶対の異なる表記でも比較できるよう正規化する
        Ok(Self {
            photos: fs::canonicalize(&photos)?,
            thumbnails: fs::canonicalize(&thumbnails)?,
        })
    }

    fn contains(&self, path: &Path) -> Result<bool, AppError> {
        let path = fs::canonicalize(path)?;
        Ok(path.starts_with(&self.photos) || path.starts_with(&self.thumbnails))
    }
}

/// 元画像から2種類の縮小画像を生成して書き出す。
struct VariantWriter<'a> {
    downscaler: Downscaler,
    presets: UploadPresets,
    output: &'a OutputDirs,
    used_names: HashSet<String>,
}

impl VariantWriter<'_> {
    fn write(&mut self, image: &SourceImage) -> Result<(), AppError> {
        let variants = prepare_upload(&self.downscaler, image.data(), &self.presets)?;

        let file_name = format!("{}.jpg", self.unique_name(image.name()));
        let photo_path = self.output.photos.join(&file_name);
        let thumbnail_path = self.output.thumbnails.join(&file_name);
        fs::write(&photo_path, variants.display.bytes())?;
        if let Err(e) = fs::write(&thumbnail_path, variants.thumbnail.bytes()) {
            // サムネイルのない表示用画像を残さない
            if let Err(remove_err) = fs::remove_file(&photo_path) {
                log::warn!(
                    "'{}' の削除に失敗しました: {}",
                    photo_path.display(),
                    remove_err
                );
            }
            return Err(e.into());
        }

        let (dw, dh) = variants.display.dimensions();
        let (tw, th) = variants.thumbnail.dimensions();
        log::info!(
            "  -> 完了: {} (表示用 {}x{}, サムネイル {}x{})",
            file_name,
            dw,
            dh,
            tw,
            th
        );
        Ok(())
    }

    /// 同じ名前が既に使われていれば `_2`, `_3`, ... を付けて重複を避けます。
    fn unique_name(&mut self, name: &str) -> String {
        let mut candidate = name.to_string();
        let mut counter = 2;
        while self.used_names.contains(&candidate) {
            candidate = format!("{}_{}", name, counter);
            counter += 1;
        }
        self.used_names.insert(candidate.clone());
        candidate
    }
}
