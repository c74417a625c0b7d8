//! アップロード用の写真を準備するライブラリ。
//!
//! 任意の画像を外接矩形に収まるようアスペクト比を保ったまま縮小し、
//! JPEGとして再エンコードします。1枚の写真からは表示用（最大1200px）と
//! サムネイル（最大400px）の2種類を生成します。

pub mod domain;
pub mod error;
