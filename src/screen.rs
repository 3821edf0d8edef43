//! 画面制御モジュール

use std::io::{self, Write};

/// 画面消去とカーソルを左上へ戻すANSIシーケンス
const CLEAR_SEQUENCE: &str = "\x1B[2J\x1B[1;1H";

/// ターミナル画面の消去
#[derive(Debug, Clone, Copy)]
pub struct Screen {
    enabled: bool,
}

impl Screen {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// 画面を消去（無効時は何もしない）
    pub fn clear<W: Write>(&self, out: &mut W) -> io::Result<()> {
        if self.enabled {
            out.write_all(CLEAR_SEQUENCE.as_bytes())?;
            out.flush()?;
        }
        Ok(())
    }
}
