//! ブラウズページャーモジュール

/// ページャーへの入力の解釈結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagerStep {
    /// 次の候補へ進んだ
    Next,
    /// 現在の候補で一覧を表示する
    View,
    /// 認識できない入力（同じ候補を再表示）
    Ignored,
}

/// 候補を1件ずつ表示するカーソル
///
/// 前に戻る操作はなく、末尾を越えると先頭に戻る
#[derive(Debug, Clone)]
pub struct BrowsePager {
    items: Vec<String>,
    cursor: usize,
}

impl BrowsePager {
    /// 新しいBrowsePagerを作成
    ///
    /// 開始位置が範囲外の場合は先頭から始める
    pub fn new(items: Vec<String>, start: usize) -> Self {
        let cursor = if start < items.len() { start } else { 0 };
        Self { items, cursor }
    }

    #[cfg(test)]
    fn cursor(&self) -> usize {
        self.cursor
    }

    /// 現在の候補
    pub fn current(&self) -> Option<&str> {
        self.items.get(self.cursor).map(String::as_str)
    }

    /// 入力を処理する（"n" で次へ、"v" で確定）
    pub fn handle(&mut self, input: &str) -> PagerStep {
        match input.trim().to_lowercase().as_str() {
            "n" => {
                self.advance();
                PagerStep::Next
            }
            "v" => PagerStep::View,
            _ => PagerStep::Ignored,
        }
    }

    fn advance(&mut self) {
        self.cursor += 1;
        if self.cursor >= self.items.len() {
            self.cursor = 0;
        }
    }
}
