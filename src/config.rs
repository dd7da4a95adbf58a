//! 設定
//!
//! JSON設定ファイルとコマンドライン指定を統合したタブレット設定

use crate::error::{ConfigError, Result, TabletError};
use crate::logging::LogLevel;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// 1行あたりのグリフ数の上限
pub const MAX_CHARS_PER_ROW: usize = 1024;

/// タブレット設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TabletConfig {
    /// 1行あたりのグリフ数
    pub chars_per_row: usize,
    /// カーソル点滅周期（ミリ秒）
    pub blink_interval_ms: u64,
    /// 翻訳結果の保存先
    pub translation_path: PathBuf,
    /// パターンダンプの保存先
    pub patterns_path: PathBuf,
    /// 起動時に読み込む入力ファイル
    pub default_input: PathBuf,
    /// 入力ファイルが無い場合の初期テキスト
    pub fallback_text: String,
    /// ログ出力先（未指定時は `~/.yautja-log/tablet.log`）
    pub log_path: Option<PathBuf>,
    /// ログレベル
    pub log_level: String,
}

impl Default for TabletConfig {
    fn default() -> Self {
        Self {
            chars_per_row: 20,
            blink_interval_ms: 500,
            translation_path: PathBuf::from("output.txt"),
            patterns_path: PathBuf::from("patterns.txt"),
            default_input: PathBuf::from("input.txt"),
            fallback_text: "HELLO".to_string(),
            log_path: None,
            log_level: "info".to_string(),
        }
    }
}

/// コマンドラインからの上書き指定
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    /// 読み込むテキストファイル
    pub input: Option<PathBuf>,
    /// 起動時に読み込むパターンダンプ
    pub patterns: Option<PathBuf>,
    /// 設定ファイル
    pub config_path: Option<PathBuf>,
    pub chars_per_row: Option<usize>,
    pub log_path: Option<PathBuf>,
}

impl ConfigOverrides {
    /// コマンドライン引数を解釈（プログラム名は含めない）
    ///
    /// `[--config PATH] [--patterns PATH] [--width N] [--log PATH] [INPUT]`
    pub fn from_args<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut overrides = ConfigOverrides::default();
        let mut iter = args.into_iter();

        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--config" | "-c" => {
                    overrides.config_path = Some(PathBuf::from(required_value(&arg, iter.next())?))
                }
                "--patterns" | "-p" => {
                    overrides.patterns = Some(PathBuf::from(required_value(&arg, iter.next())?))
                }
                "--log" => {
                    overrides.log_path = Some(PathBuf::from(required_value(&arg, iter.next())?))
                }
                "--width" | "-w" => {
                    let value = required_value(&arg, iter.next())?;
                    let width = value.parse::<usize>().map_err(|_| ConfigError::InvalidValue {
                        key: "chars_per_row".to_string(),
                        value: value.clone(),
                    })?;
                    overrides.chars_per_row = Some(width);
                }
                flag if flag.starts_with('-') => {
                    return Err(ConfigError::InvalidValue {
                        key: "argument".to_string(),
                        value: flag.to_string(),
                    }
                    .into());
                }
                _ => overrides.input = Some(PathBuf::from(&arg)),
            }
        }

        Ok(overrides)
    }
}

fn required_value(flag: &str, value: Option<String>) -> Result<String> {
    value.ok_or_else(|| {
        ConfigError::InvalidValue {
            key: flag.to_string(),
            value: String::new(),
        }
        .into()
    })
}

impl TabletConfig {
    /// JSONファイルから読み込み
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|err| TabletError::File(crate::error::FileError::from_io(&err, path)))?;
        Self::from_json(&content, path)
    }

    /// JSON文字列から解釈
    pub fn from_json(content: &str, origin: &Path) -> Result<Self> {
        let config: TabletConfig =
            serde_json::from_str(content).map_err(|err| ConfigError::InvalidFile {
                path: origin.display().to_string(),
                message: err.to_string(),
            })?;
        config.validate()?;
        Ok(config.expanded())
    }

    /// 既定の設定ファイル（存在すれば読み込み、無ければ既定値）
    pub fn load_default() -> Result<Self> {
        match default_config_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    /// 値の検証
    pub fn validate(&self) -> Result<()> {
        if self.chars_per_row == 0 || self.chars_per_row > MAX_CHARS_PER_ROW {
            return Err(ConfigError::InvalidValue {
                key: "chars_per_row".to_string(),
                value: self.chars_per_row.to_string(),
            }
            .into());
        }
        if self.blink_interval_ms == 0 {
            return Err(ConfigError::InvalidValue {
                key: "blink_interval_ms".to_string(),
                value: self.blink_interval_ms.to_string(),
            }
            .into());
        }
        if LogLevel::parse(&self.log_level).is_none() {
            return Err(ConfigError::InvalidValue {
                key: "log_level".to_string(),
                value: self.log_level.clone(),
            }
            .into());
        }
        Ok(())
    }

    /// `~` と環境変数をパスに展開
    pub fn expanded(mut self) -> Self {
        self.translation_path = expand_path(&self.translation_path);
        self.patterns_path = expand_path(&self.patterns_path);
        self.default_input = expand_path(&self.default_input);
        self.log_path = self.log_path.as_deref().map(expand_path);
        self
    }

    /// コマンドライン指定を上書き
    pub fn merged_with(&self, overrides: &ConfigOverrides) -> Result<TabletConfig> {
        let merged = TabletConfig {
            chars_per_row: overrides.chars_per_row.unwrap_or(self.chars_per_row),
            default_input: overrides
                .input
                .as_deref()
                .map(expand_path)
                .unwrap_or_else(|| self.default_input.clone()),
            log_path: overrides
                .log_path
                .as_deref()
                .map(expand_path)
                .or_else(|| self.log_path.clone()),
            ..self.clone()
        };
        merged.validate()?;
        Ok(merged)
    }

    pub fn blink_interval(&self) -> Duration {
        Duration::from_millis(self.blink_interval_ms)
    }

    pub fn log_level(&self) -> LogLevel {
        LogLevel::parse(&self.log_level).unwrap_or(LogLevel::Info)
    }

    /// ログ出力先
    pub fn resolve_log_path(&self) -> Option<PathBuf> {
        match &self.log_path {
            Some(path) => Some(path.clone()),
            None => default_log_path(),
        }
    }
}

/// `~/.config/yautja/config.json`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("yautja").join("config.json"))
}

fn default_log_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".yautja-log").join("tablet.log"))
}

/// `~` と環境変数を展開（展開失敗時はそのまま）
pub fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    match shellexpand::full(&raw) {
        Ok(expanded) => PathBuf::from(expanded.as_ref()),
        Err(err) => {
            log::warn!("failed to expand path {}: {}", raw, err);
            path.to_path_buf()
        }
    }
}
