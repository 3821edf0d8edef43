//! 対話シェルモジュール
//!
//! メインメニュー → 追加 / 検索メニュー → 各検索 → ページャー → 結果表示 → メインメニュー
//! の状態遷移をループで回す。入力エラー時は各フローの先頭からやり直す。

use crate::entry::{self, Entry};
use crate::error::ShellError;
use crate::pager::{BrowsePager, PagerStep};
use crate::screen::Screen;
use crate::search;
use crate::store::{LogContents, LogStore, Row};
use regex::Regex;
use std::io::{BufRead, Write};
use tracing::{debug, info, warn};

const RETURN_PROMPT: &str = "Press a key to return to menu: ";

/// 対話シェル
pub struct Shell<R, W> {
    store: LogStore,
    screen: Screen,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    /// 新しいShellを作成
    pub fn new(store: LogStore, screen: Screen, input: R, output: W) -> Self {
        Self {
            store,
            screen,
            input,
            output,
        }
    }

    /// セッションを実行
    ///
    /// メニューで "c" が選ばれるか入力が終了すると正常終了する
    pub fn run(&mut self) -> Result<(), ShellError> {
        self.store.ensure_initialized()?;

        match self.main_menu() {
            Err(ShellError::EndOfInput) => {
                info!("入力が終了したためセッションを終了します");
                Ok(())
            }
            result => result,
        }
    }

    fn main_menu(&mut self) -> Result<(), ShellError> {
        loop {
            self.clear()?;
            writeln!(self.output, "WORK LOG")?;
            writeln!(self.output, "What would you like to do?")?;
            writeln!(self.output, "a) Add new entry")?;
            writeln!(self.output, "b) Search in existing entries")?;
            writeln!(self.output, "c) Quit the program")?;

            match self.read_command()?.as_str() {
                "a" => self.add_entry()?,
                "b" => self.search_menu()?,
                "c" => {
                    info!("セッションを終了します");
                    return Ok(());
                }
                other => debug!("不明なメニュー入力: {:?}", other),
            }
        }
    }

    fn add_entry(&mut self) -> Result<(), ShellError> {
        loop {
            self.clear()?;

            let date = match entry::parse_date(
                &self.prompt("Enter the Date \nPlease use MM/DD/YYYY: ")?,
            ) {
                Ok(date) => date,
                Err(e) => {
                    self.retry(&e)?;
                    continue;
                }
            };
            let title = match entry::parse_title(&self.prompt("Enter the Title: ")?) {
                Ok(title) => title,
                Err(e) => {
                    self.retry(&e)?;
                    continue;
                }
            };
            let minutes =
                match entry::parse_minutes(&self.prompt("Enter the time spent (minutes): ")?) {
                    Ok(minutes) => minutes,
                    Err(e) => {
                        self.retry(&e)?;
                        continue;
                    }
                };
            let notes = self.prompt("Enter any additional notes (Optional): ")?;

            let entry = Entry {
                date,
                title,
                minutes,
                notes,
            };

            self.clear()?;
            self.store.append(&entry)?;
            self.prompt("Entry has been added. Press a key to return to menu. ")?;
            return Ok(());
        }
    }

    fn search_menu(&mut self) -> Result<(), ShellError> {
        self.clear()?;
        writeln!(self.output, "Search Options:")?;
        writeln!(self.output, "a) Find by Date")?;
        writeln!(self.output, "b) Find by Time Spent")?;
        writeln!(self.output, "c) Find by Exact Search")?;
        writeln!(self.output, "d) Find by Regex Pattern")?;

        match self.read_command()?.as_str() {
            "a" => self.find_by_date(),
            "b" => self.find_by_time(),
            "c" => self.find_by_exact(),
            "d" => self.find_by_regex(),
            other => {
                debug!("不明な検索メニュー入力: {:?}", other);
                Ok(())
            }
        }
    }

    fn find_by_date(&mut self) -> Result<(), ShellError> {
        let (log, dates, start) = loop {
            self.clear()?;
            let Some(log) = self.load_log()? else {
                return Ok(());
            };

            let dates = search::date_candidates(&log.rows);
            writeln!(self.output, "The following are valid dates: ")?;
            for date in &dates {
                writeln!(self.output, "{}", date)?;
            }

            let query = self.prompt("\nEnter the Date (Must be valid)\nUse MM/DD/YYYY: ")?;
            if let Some(start) = search::locate_date(&log.rows, &dates, &query) {
                break (log, dates, start);
            }
            debug!("日付が一覧にありません: {:?}", query);
        };

        let date = self.browse(
            dates,
            start,
            "Hit 'n' for next date \nHit 'v' to view the entries",
            "",
        )?;

        self.clear()?;
        writeln!(self.output, "Here are the entries of that date:")?;
        let matches = search::rows_with_date(&log.rows, &date);
        self.print_entries(&log.header, &matches)?;
        self.prompt(RETURN_PROMPT)?;
        Ok(())
    }

    fn find_by_time(&mut self) -> Result<(), ShellError> {
        let (log, times, start) = loop {
            self.clear()?;
            let Some(log) = self.load_log()? else {
                return Ok(());
            };

            let times = search::time_candidates(&log.rows);
            writeln!(self.output, "The following are valid times: ")?;
            for time in &times {
                writeln!(self.output, "{} minutes", time)?;
            }

            let query =
                self.prompt("\nEnter the desired Time (Must be valid, Number only): ")?;
            if let Some(start) = search::locate_time(&log.rows, &query) {
                break (log, times, start);
            }
            debug!("作業時間が見つかりません: {:?}", query);
        };

        let minutes = self.browse(
            times,
            start,
            "Hit 'n' for next amount of time\nHit 'v' to view the entries",
            " minutes",
        )?;

        self.clear()?;
        writeln!(self.output, "Here are the entries of that time")?;
        let matches = search::rows_with_minutes(&log.rows, &minutes);
        self.print_entries(&log.header, &matches)?;
        self.prompt(RETURN_PROMPT)?;
        Ok(())
    }

    fn find_by_exact(&mut self) -> Result<(), ShellError> {
        loop {
            self.clear()?;
            let Some(log) = self.load_log()? else {
                return Ok(());
            };

            writeln!(self.output, "The following are valid title/notes: ")?;
            for text in search::search_texts(&log.rows) {
                writeln!(self.output, "{}", text)?;
            }

            let query = self.prompt("\nEnter the string to search for (Must be valid): ")?;
            let found = match search::find_exact(&log.rows, &query) {
                Ok(found) => found,
                Err(e) => {
                    writeln!(self.output, "Error: {}", e)?;
                    self.prompt("press 'ENTER'")?;
                    continue;
                }
            };
            if found.is_empty() {
                self.prompt("Error: string not in entries\npress 'ENTER'")?;
                continue;
            }

            self.clear()?;
            let matches: Vec<&Row> = found.iter().map(|&index| &log.rows[index]).collect();
            self.print_entries(&log.header, &matches)?;
            self.prompt(RETURN_PROMPT)?;
            return Ok(());
        }
    }

    /// 正規表現検索
    ///
    /// 他の検索と違い、ヒットなしでも再入力させずにメインメニューへ戻る
    fn find_by_regex(&mut self) -> Result<(), ShellError> {
        self.clear()?;
        let Some(log) = self.load_log()? else {
            return Ok(());
        };

        let pattern = self.prompt("Enter the desired Regular Expression to search for: ")?;
        let regex = match Regex::new(&pattern) {
            Ok(regex) => regex,
            Err(e) => {
                warn!("正規表現が不正です: {}", e);
                writeln!(self.output, "Invalid Regular Expression: {}", e)?;
                self.prompt(RETURN_PROMPT)?;
                return Ok(());
            }
        };
        let found = search::find_regex(&log.rows, &regex);

        self.clear()?;
        writeln!(self.output, "{}\n", log.header.text())?;
        for (count, hit) in found.iter().enumerate() {
            writeln!(
                self.output,
                "Entry {}: {}",
                count + 1,
                log.rows[hit.index].text()
            )?;
            writeln!(self.output, "Matched: {}\n", hit.matched)?;
        }
        if found.is_empty() {
            writeln!(
                self.output,
                "No entries were found with that Regular Expression"
            )?;
        }
        self.prompt(RETURN_PROMPT)?;
        Ok(())
    }

    /// 候補を1件ずつ表示し、"v" で選ばれた値を返す
    fn browse(
        &mut self,
        items: Vec<String>,
        start: usize,
        help: &str,
        suffix: &str,
    ) -> Result<String, ShellError> {
        let mut pager = BrowsePager::new(items, start);
        loop {
            self.clear()?;
            writeln!(self.output, "{}", help)?;
            writeln!(
                self.output,
                "\n{}{}",
                pager.current().unwrap_or_default(),
                suffix
            )?;

            let input = self.read_line()?;
            if pager.handle(&input) == PagerStep::View {
                return Ok(pager.current().unwrap_or_default().to_string());
            }
        }
    }

    /// ログを読み込む（エントリがなければメニューへ戻る）
    fn load_log(&mut self) -> Result<Option<LogContents>, ShellError> {
        let log = self.store.read_all()?;
        if log.rows.is_empty() {
            writeln!(self.output, "There are no entries in the log yet")?;
            self.prompt(RETURN_PROMPT)?;
            return Ok(None);
        }
        Ok(Some(log))
    }

    fn print_entries(&mut self, header: &Row, rows: &[&Row]) -> Result<(), ShellError> {
        writeln!(self.output, "{}\n", header.text())?;
        for (count, row) in rows.iter().enumerate() {
            writeln!(self.output, "Entry {}: {}\n", count + 1, row.text())?;
        }
        Ok(())
    }

    fn retry(&mut self, error: &dyn std::error::Error) -> Result<(), ShellError> {
        writeln!(self.output, "{}", error)?;
        self.prompt("Press ENTER to try again")?;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), ShellError> {
        self.screen.clear(&mut self.output)?;
        Ok(())
    }

    fn prompt(&mut self, message: &str) -> Result<String, ShellError> {
        write!(self.output, "{}", message)?;
        self.read_line()
    }

    /// メニュー入力（前後の空白を除いて小文字化）
    fn read_command(&mut self) -> Result<String, ShellError> {
        Ok(self.read_line()?.trim().to_lowercase())
    }

    fn read_line(&mut self) -> Result<String, ShellError> {
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(ShellError::EndOfInput);
        }
        Ok(line.trim_end_matches(['\n', '\r']).to_string())
    }
}
