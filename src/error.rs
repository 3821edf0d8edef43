//! エラー型定義モジュール

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// 設定エラー
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IOエラー: {0}")]
    IoError(#[from] io::Error),

    #[error("TOML解析エラー: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("ディレクトリ作成エラー: {0}")]
    DirectoryCreationError(io::Error),

    #[error("設定値が不正です: {0}")]
    InvalidValue(String),
}

/// ログストアエラー
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IOエラー: {0}")]
    IoError(#[from] io::Error),

    #[error("ヘッダー行がありません: {}", .0.display())]
    MissingHeader(PathBuf),
}

/// 入力バリデーションエラー
///
/// メッセージはそのままコンソールに表示される
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Date must use the MM/DD/YYYY format")]
    InvalidDate(String),

    #[error("Must enter a Title")]
    EmptyTitle,

    #[error("time spent must be a number")]
    InvalidMinutes(String),

    #[error("Must enter a string to search for")]
    EmptyQuery,
}

/// 対話シェルエラー
#[derive(Error, Debug)]
pub enum ShellError {
    #[error("コンソールIOエラー: {0}")]
    IoError(#[from] io::Error),

    #[error("ログストアエラー: {0}")]
    StoreError(#[from] StoreError),

    #[error("入力が終了しました")]
    EndOfInput,
}
