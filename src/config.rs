//! 設定モジュール

use crate::error::ConfigError;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

/// ログファイルのデフォルト名（カレントディレクトリ基準）
const DEFAULT_LOG_FILE: &str = "log.csv";

/// アプリケーション設定
#[derive(Debug, Clone)]
pub struct Config {
    /// ログファイルパス
    pub log_path: PathBuf,
    /// 画面遷移ごとにターミナルをクリアするか
    pub clear_screen: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_path: PathBuf::from(DEFAULT_LOG_FILE),
            clear_screen: true,
        }
    }
}

/// TOML設定ファイル用構造体
#[derive(Debug, Deserialize, Default)]
struct FileConfig {
    log_path: Option<String>,
    clear_screen: Option<bool>,
}

/// CLI引数
#[derive(Debug, Default)]
pub struct CliArgs {
    pub file: Option<PathBuf>,
    pub no_clear: bool,
}

impl Config {
    /// 設定を読み込む
    ///
    /// 優先順位: CLI引数 > 設定ファイル > デフォルト値
    pub fn load(cli_args: &CliArgs) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        if let Some(config_path) = Self::config_file_path() {
            if config_path.exists() {
                let content = fs::read_to_string(&config_path)?;
                let file_config: FileConfig = toml::from_str(&content)?;
                config.merge_file_config(&file_config);
            }
        }

        config.merge_cli_args(cli_args);
        config.validate()?;
        config.ensure_directories()?;

        Ok(config)
    }

    /// 設定ファイルのパスを取得
    fn config_file_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".work-log").join("config.toml"))
    }

    /// ファイル設定をマージ
    fn merge_file_config(&mut self, file_config: &FileConfig) {
        if let Some(ref path) = file_config.log_path {
            self.log_path = PathBuf::from(path);
        }
        if let Some(clear) = file_config.clear_screen {
            self.clear_screen = clear;
        }
    }

    /// CLI引数をマージ
    fn merge_cli_args(&mut self, cli_args: &CliArgs) {
        if let Some(ref path) = cli_args.file {
            self.log_path = path.clone();
        }
        if cli_args.no_clear {
            self.clear_screen = false;
        }
    }

    /// 設定値をバリデート
    fn validate(&self) -> Result<(), ConfigError> {
        if self.log_path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue(
                "log_path must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// ログファイルの親ディレクトリを作成
    fn ensure_directories(&self) -> Result<(), ConfigError> {
        if let Some(parent) = self.log_path.parent() {
            // "log.csv" のような相対パスでは親が空になる
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(ConfigError::DirectoryCreationError)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.log_path, PathBuf::from("log.csv"));
        assert!(config.clear_screen);
    }

    #[test]
    fn test_cli_args_override() {
        let mut config = Config::default();
        let cli_args = CliArgs {
            file: Some(PathBuf::from("/tmp/work.csv")),
            no_clear: true,
        };
        config.merge_cli_args(&cli_args);
        assert_eq!(config.log_path, PathBuf::from("/tmp/work.csv"));
        assert!(!config.clear_screen);
    }

    #[test]
    fn test_file_config_merge() {
        let mut config = Config::default();
        let file_config: FileConfig =
            toml::from_str("log_path = \"/tmp/test.csv\"\nclear_screen = false\n").unwrap();
        config.merge_file_config(&file_config);
        assert_eq!(config.log_path, PathBuf::from("/tmp/test.csv"));
        assert!(!config.clear_screen);
    }

    #[test]
    fn test_cli_overrides_file() {
        let mut config = Config::default();
        let file_config = FileConfig {
            log_path: Some("/tmp/from-file.csv".to_string()),
            ..Default::default()
        };
        config.merge_file_config(&file_config);

        let cli_args = CliArgs {
            file: Some(PathBuf::from("/tmp/from-cli.csv")),
            no_clear: false,
        };
        config.merge_cli_args(&cli_args);

        // CLIが優先
        assert_eq!(config.log_path, PathBuf::from("/tmp/from-cli.csv"));
        // ファイル設定がない項目はデフォルトのまま
        assert!(config.clear_screen);
    }

    #[test]
    fn test_validate_empty_log_path() {
        let mut config = Config::default();
        config.log_path = PathBuf::new();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue(_))
        ));
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.log_path = temp_dir.path().join("nested").join("log.csv");

        assert!(config.ensure_directories().is_ok());
        assert!(config.log_path.parent().unwrap().exists());
    }

    #[test]
    fn test_ensure_directories_relative_path() {
        let config = Config::default();
        assert!(config.ensure_directories().is_ok());
    }
}
