//! Work Log - ターミナル向け作業ログツール

mod cli;
mod config;
mod entry;
mod error;
mod logging;
mod pager;
mod screen;
mod search;
mod shell;
mod store;

use anyhow::Result;

fn main() -> Result<()> {
    logging::init();
    cli::run()
}
