//! 検索モジュール
//!
//! 日付・作業時間・部分文字列・正規表現の4種類の検索。
//! インデックスは持たず、毎回全行を走査する。

use crate::entry::parse_fields;
use crate::error::ValidationError;
use crate::store::Row;
use regex::Regex;
use tracing::debug;

/// 正規表現検索のヒット
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegexMatch {
    /// 行のインデックス（ファイル順）
    pub index: usize,
    /// その行でマッチした部分文字列をすべて連結したもの
    pub matched: String,
}

/// 全カラムの日付一覧（ファイル順、重複あり）
pub fn date_candidates(rows: &[Row]) -> Vec<String> {
    rows.iter()
        .flat_map(|row| row.column_fields())
        .map(|fields| fields.date.to_string())
        .collect()
}

/// 全カラムの作業時間一覧（ファイル順、重複あり）
pub fn time_candidates(rows: &[Row]) -> Vec<String> {
    rows.iter()
        .flat_map(|row| row.column_fields())
        .map(|fields| fields.minutes.to_string())
        .collect()
}

/// 日付検索の開始位置
///
/// 入力が一覧のいずれかと完全一致した場合のみ、その日付を含む最初の行を返す
pub fn locate_date(rows: &[Row], candidates: &[String], query: &str) -> Option<usize> {
    if !candidates.iter().any(|date| date == query) {
        return None;
    }
    // 日付フィールドではなく行テキスト全体で探す。前の行のメモに同じ日付が
    // 書かれていると、ページャーはその行の日付から始まる（既存の挙動）。
    rows.iter().position(|row| row.text().contains(query))
}

/// 作業時間検索の開始位置
///
/// 数値としての一致ではなく部分文字列一致（"12" は "120" や "512" にも当たる）
pub fn locate_time(rows: &[Row], query: &str) -> Option<usize> {
    rows.iter().position(|row| minutes_of(row).contains(query))
}

/// 日付が一致する行
pub fn rows_with_date<'a>(rows: &'a [Row], date: &str) -> Vec<&'a Row> {
    rows.iter()
        .filter(|row| row.column_fields().any(|fields| fields.date == date))
        .collect()
}

/// 作業時間が一致する行
///
/// 部分一致は開始位置の検索（[`locate_time`]）だけで、一覧表示は完全一致
pub fn rows_with_minutes<'a>(rows: &'a [Row], minutes: &str) -> Vec<&'a Row> {
    rows.iter()
        .filter(|row| minutes_of(row) == minutes)
        .collect()
}

/// 行ごとの検索対象テキスト（タイトル + 空白 + メモ）
pub fn search_texts(rows: &[Row]) -> Vec<String> {
    rows.iter()
        .map(|row| parse_fields(&row.text()).search_text())
        .collect()
}

/// 部分文字列検索（大文字小文字を区別）
///
/// ヒットした行のインデックスをファイル順に返す
pub fn find_exact(rows: &[Row], query: &str) -> Result<Vec<usize>, ValidationError> {
    if query.is_empty() {
        return Err(ValidationError::EmptyQuery);
    }

    let found: Vec<usize> = search_texts(rows)
        .iter()
        .enumerate()
        .filter(|(_, text)| text.contains(query))
        .map(|(index, _)| index)
        .collect();

    debug!("部分文字列検索: {:?} -> {}件", query, found.len());
    Ok(found)
}

/// 正規表現検索
///
/// テキスト中のどこかに1つでもマッチすればヒット
pub fn find_regex(rows: &[Row], pattern: &Regex) -> Vec<RegexMatch> {
    let found: Vec<RegexMatch> = search_texts(rows)
        .iter()
        .enumerate()
        .filter_map(|(index, text)| {
            let mut matches = pattern.find_iter(text).peekable();
            matches.peek()?;
            Some(RegexMatch {
                index,
                matched: matches.map(|m| m.as_str()).collect(),
            })
        })
        .collect();

    debug!("正規表現検索: {} -> {}件", pattern.as_str(), found.len());
    found
}

fn minutes_of(row: &Row) -> String {
    parse_fields(&row.text()).minutes.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(lines: &[&str]) -> Vec<Row> {
        lines.iter().map(|line| Row::parse(line)).collect()
    }

    fn sample_rows() -> Vec<Row> {
        rows(&["01/01/2020,Fix bug,30,urgent", "02/02/2020,Write docs,45,"])
    }

    #[test]
    fn test_date_candidates_keep_duplicates() {
        let rows = rows(&[
            "01/01/2020,a,1,",
            "01/01/2020,b,2,",
            "02/02/2020,c,3,",
        ]);
        assert_eq!(
            date_candidates(&rows),
            vec!["01/01/2020", "01/01/2020", "02/02/2020"]
        );
    }

    #[test]
    fn test_time_candidates() {
        assert_eq!(time_candidates(&sample_rows()), vec!["30", "45"]);
    }

    #[test]
    fn test_locate_date() {
        let rows = sample_rows();
        let dates = date_candidates(&rows);
        assert_eq!(locate_date(&rows, &dates, "02/02/2020"), Some(1));
        assert_eq!(locate_date(&rows, &dates, "03/03/2020"), None);
    }

    #[test]
    fn test_locate_date_requires_exact_candidate() {
        let rows = sample_rows();
        let dates = date_candidates(&rows);
        // 行テキストの一部でも日付一覧になければ見つからない扱い
        assert_eq!(locate_date(&rows, &dates, "02/02"), None);
    }

    #[test]
    fn test_time_search_is_substring_match() {
        let rows = rows(&[
            "01/01/2020,a,12,",
            "01/01/2020,b,120,",
            "01/01/2020,c,512,",
            "01/01/2020,d,99,",
        ]);
        assert_eq!(locate_time(&rows, "12"), Some(0));
        assert_eq!(locate_time(&rows, "51"), Some(2));
        assert_eq!(locate_time(&rows, "99"), Some(3));
        assert_eq!(locate_time(&rows, "7"), None);
    }

    #[test]
    fn test_rows_with_minutes_is_exact() {
        let rows = rows(&[
            "01/01/2020,a,12,",
            "01/01/2020,b,120,",
            "01/01/2020,c,12,",
        ]);
        let hits: Vec<String> = rows_with_minutes(&rows, "12")
            .iter()
            .map(|row| row.text())
            .collect();
        assert_eq!(hits, vec!["01/01/2020,a,12,", "01/01/2020,c,12,"]);
    }

    #[test]
    fn test_locate_date_uses_row_text() {
        let rows = rows(&[
            "01/01/2020,a,1,moved to 02/02/2020",
            "02/02/2020,b,2,",
        ]);
        let dates = date_candidates(&rows);
        assert_eq!(locate_date(&rows, &dates, "02/02/2020"), Some(0));
    }

    #[test]
    fn test_rows_with_date() {
        let rows = rows(&[
            "01/01/2020,a,1,",
            "02/02/2020,b,2,",
            "01/01/2020,c,3,",
        ]);
        let hits = rows_with_date(&rows, "01/01/2020");
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[1].text(), "01/01/2020,c,3,");
    }

    #[test]
    fn test_search_texts() {
        assert_eq!(
            search_texts(&sample_rows()),
            vec!["Fix bug urgent", "Write docs "]
        );
    }

    #[test]
    fn test_find_exact() {
        let rows = sample_rows();
        assert_eq!(find_exact(&rows, "bug").unwrap(), vec![0]);
        assert!(find_exact(&rows, "zzz").unwrap().is_empty());
    }

    #[test]
    fn test_find_exact_is_case_sensitive() {
        assert!(find_exact(&sample_rows(), "BUG").unwrap().is_empty());
    }

    #[test]
    fn test_find_exact_spans_title_and_notes() {
        assert_eq!(find_exact(&sample_rows(), "bug urg").unwrap(), vec![0]);
    }

    #[test]
    fn test_find_exact_empty_query() {
        assert_eq!(
            find_exact(&sample_rows(), ""),
            Err(ValidationError::EmptyQuery)
        );
    }

    #[test]
    fn test_find_regex() {
        let rows = sample_rows();
        let found = find_regex(&rows, &Regex::new("^Fix").unwrap());
        assert_eq!(
            found,
            vec![RegexMatch {
                index: 0,
                matched: "Fix".to_string(),
            }]
        );
    }

    #[test]
    fn test_find_regex_concatenates_all_matches() {
        let rows = sample_rows();
        let found = find_regex(&rows, &Regex::new("[a-z]r").unwrap());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].index, 0);
        assert_eq!(found[0].matched, "ur");

        let found = find_regex(&rows, &Regex::new(r"\w{4}").unwrap());
        assert_eq!(found[0].matched, "urge");
        assert_eq!(found[1].matched, "Writdocs");
    }

    #[test]
    fn test_find_regex_no_match() {
        assert!(find_regex(&sample_rows(), &Regex::new("^zzz").unwrap()).is_empty());
    }
}
