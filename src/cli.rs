//! CLIモジュール

use crate::config::{CliArgs, Config};
use crate::screen::Screen;
use crate::shell::Shell;
use crate::store::LogStore;
use anyhow::Result;
use clap::Parser;
use std::io;
use std::path::PathBuf;
use tracing::info;

/// Work Log - ターミナル向け作業ログツール
#[derive(Parser, Debug)]
#[command(name = "worklog")]
#[command(about = "ターミナル向け作業ログツール", long_about = None)]
pub struct Cli {
    /// ログファイルのパス（デフォルト: ./log.csv）
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// 画面遷移時にターミナルをクリアしない
    #[arg(long)]
    pub no_clear: bool,
}

/// CLIエントリポイント
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let cli_args = CliArgs {
        file: cli.file,
        no_clear: cli.no_clear,
    };
    let config = Config::load(&cli_args)?;

    let store = LogStore::new(config.log_path.clone());
    info!("ログファイル: {}", store.path().display());

    let stdin = io::stdin();
    let mut shell = Shell::new(
        store,
        Screen::new(config.clear_screen),
        stdin.lock(),
        io::stdout(),
    );
    shell.run()?;

    Ok(())
}
