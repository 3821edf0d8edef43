//! ログストアモジュール
//!
//! フラットなテキストファイル1つに作業エントリを追記する。
//! 行はパイプ区切りのカラムとして読み込み、各カラムは4フィールドを
//! カンマで連結した文字列になっている。

use crate::entry::{parse_fields, Entry, Fields};
use crate::error::StoreError;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// ヘッダー行
pub const HEADER: &str = "date,title,time spent,notes";

/// 行内のカラム区切り文字
const COLUMN_DELIMITER: char = '|';

/// 保存済みの1行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    columns: Vec<String>,
}

impl Row {
    /// 1行のテキストをカラムに分割
    pub fn parse(line: &str) -> Self {
        Self {
            columns: line.split(COLUMN_DELIMITER).map(str::to_string).collect(),
        }
    }

    /// 表示用テキスト（カラムを ", " で連結）
    pub fn text(&self) -> String {
        self.columns.join(", ")
    }

    /// 各カラムを位置ベースで解析
    pub fn column_fields(&self) -> impl Iterator<Item = Fields<'_>> {
        self.columns.iter().map(|column| parse_fields(column))
    }
}

/// ファイル全体の読み込み結果
#[derive(Debug, Clone)]
pub struct LogContents {
    pub header: Row,
    pub rows: Vec<Row>,
}

/// ログストア
pub struct LogStore {
    path: PathBuf,
}

impl LogStore {
    /// 新しいLogStoreを作成
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// ファイルがなければヘッダー付きで作成する
    ///
    /// 既存ファイルには一切触れない
    pub fn ensure_initialized(&self) -> Result<(), StoreError> {
        let mut file = match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
        {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                debug!("ログファイルは既に存在します: {}", self.path.display());
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        writeln!(file, "{}", HEADER)?;
        info!("ログファイルを作成しました: {}", self.path.display());
        Ok(())
    }

    /// エントリを1行追記
    pub fn append(&self, entry: &Entry) -> Result<(), StoreError> {
        let mut file = OpenOptions::new().append(true).open(&self.path)?;
        writeln!(file, "{}", entry.to_record())?;
        file.flush()?;

        info!("エントリを追加しました: {} ({})", entry.title, entry.date);
        Ok(())
    }

    /// 全行を読み込む
    ///
    /// ファイルが存在しない場合はエラーを返す
    pub fn read_all(&self) -> Result<LogContents, StoreError> {
        let content = fs::read_to_string(&self.path)?;

        // lines() は \r\n も行末として扱う
        let mut lines = content.lines().filter(|line| !line.is_empty());

        let header = lines
            .next()
            .map(Row::parse)
            .ok_or_else(|| StoreError::MissingHeader(self.path.clone()))?;
        let rows: Vec<Row> = lines.map(Row::parse).collect();

        debug!("{}行を読み込みました", rows.len());
        Ok(LogContents { header, rows })
    }
}
