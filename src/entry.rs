//! エントリモジュール
//!
//! 作業エントリの型、入力バリデーション、保存済みカラムの位置ベース解析を扱う。

use crate::error::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;

/// MM/DD/YYYY の構文パターン（暦の妥当性は見ない）
static DATE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{2})/(\d{2})/(\d{4})").expect("日付パターンは固定文字列")
});

/// 作業エントリ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub date: String,
    pub title: String,
    pub minutes: u64,
    pub notes: String,
}

impl Entry {
    /// 保存用の1行表現（カンマ区切り、最小限のクォート）
    pub fn to_record(&self) -> String {
        let minutes = self.minutes.to_string();
        [
            self.date.as_str(),
            self.title.as_str(),
            minutes.as_str(),
            self.notes.as_str(),
        ]
        .iter()
        .map(|field| quote_field(field))
        .collect::<Vec<_>>()
        .join(",")
    }
}

/// カンマ・ダブルクォート・改行を含むフィールドだけをクォートする
fn quote_field(field: &str) -> String {
    if field.contains([',', '"', '\r', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// 日付入力を検証
///
/// 最初に見つかった MM/DD/YYYY 部分だけを残し、前後の文字は捨てる。
pub fn parse_date(input: &str) -> Result<String, ValidationError> {
    let input = input.trim();
    let caps = DATE_PATTERN
        .captures(input)
        .ok_or_else(|| ValidationError::InvalidDate(input.to_string()))?;
    Ok(format!("{}/{}/{}", &caps[1], &caps[2], &caps[3]))
}

/// タイトル入力を検証
pub fn parse_title(input: &str) -> Result<String, ValidationError> {
    if input.is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    Ok(input.to_string())
}

/// 作業時間（分）入力を検証
pub fn parse_minutes(input: &str) -> Result<u64, ValidationError> {
    input
        .trim()
        .parse::<u64>()
        .map_err(|_| ValidationError::InvalidMinutes(input.to_string()))
}

/// 保存済みカラムから取り出したフィールド
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fields<'a> {
    pub date: &'a str,
    pub title: &'a str,
    pub minutes: &'a str,
    pub notes: &'a str,
}

impl Fields<'_> {
    /// 検索対象テキスト（タイトル + 空白 + メモ）
    pub fn search_text(&self) -> String {
        format!("{} {}", self.title, self.notes)
    }
}

/// カラム文字列を先頭から3つのカンマ位置で分割する
///
/// フィールド単位の分割ではないため、タイトルやメモにカンマが含まれると
/// 以降の境界がずれる。既存ファイルとの互換のためこの挙動を保つ。
/// カンマが足りない場合、残りのフィールドは空文字列になる。
pub fn parse_fields(element: &str) -> Fields<'_> {
    let (date, rest) = split_at_comma(element);
    let (title, rest) = rest.map(split_at_comma).unwrap_or(("", None));
    let (minutes, rest) = rest.map(split_at_comma).unwrap_or(("", None));
    let notes = rest.unwrap_or("");

    Fields {
        date,
        title,
        minutes,
        notes,
    }
}

fn split_at_comma(s: &str) -> (&str, Option<&str>) {
    match s.find(',') {
        Some(index) => (&s[..index], Some(&s[index + 1..])),
        None => (s, None),
    }
}
