//! ロギングシステム
//!
//! `log` ファサードの出力先。TUI表示中は標準エラーを使わずファイルへ追記する

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

/// ログレベル
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl LogLevel {
    fn tag(self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
        }
    }

    /// 設定文字列から解釈（未知の値は `None`）
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "debug" | "trace" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" | "warning" => Some(LogLevel::Warning),
            "error" => Some(LogLevel::Error),
            _ => None,
        }
    }

    fn from_log(level: log::Level) -> Self {
        match level {
            log::Level::Error => LogLevel::Error,
            log::Level::Warn => LogLevel::Warning,
            log::Level::Info => LogLevel::Info,
            log::Level::Debug | log::Level::Trace => LogLevel::Debug,
        }
    }

    fn to_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Warning => log::LevelFilter::Warn,
            LogLevel::Error => log::LevelFilter::Error,
        }
    }
}

/// ロガー
///
/// * 標準エラー出力とファイル追記を個別に有効化できる
/// * `log::Log` を実装し、`init` でグローバルロガーとして登録する
#[derive(Debug)]
pub struct Logger {
    level: LogLevel,
    output_stderr: bool,
    output_file: Option<PathBuf>,
    write_lock: Mutex<()>,
}

impl Logger {
    /// デフォルト構築
    pub fn new(level: LogLevel) -> Self {
        Self {
            level,
            output_stderr: true,
            output_file: None,
            write_lock: Mutex::new(()),
        }
    }

    /// 開発者向けロガー
    pub fn for_development() -> Self {
        Self::new(LogLevel::Debug)
    }

    /// ログレベルを取得
    pub fn level(&self) -> LogLevel {
        self.level
    }

    /// ログレベルを変更
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// ファイル出力を設定
    pub fn with_file_output<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.output_file = Some(path.into());
        self
    }

    /// 標準エラー出力を無効化（TUI表示中・テスト向け）
    pub fn without_stderr(mut self) -> Self {
        self.output_stderr = false;
        self
    }

    fn should_log(&self, level: LogLevel) -> bool {
        level >= self.level
    }

    fn write_line(&self, message: &str) {
        let _guard = self.write_lock.lock();

        if self.output_stderr {
            eprintln!("{}", message);
        }

        if let Some(path) = &self.output_file {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(path) {
                let _ = writeln!(file, "{}", message);
            }
        }
    }

    /// 任意のログレベルでメッセージを出力
    pub fn log_message(&self, level: LogLevel, target: &str, message: impl AsRef<str>) {
        if self.should_log(level) {
            self.write_line(&format!("{} [{}]: {}", level.tag(), target, message.as_ref()));
        }
    }
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        self.should_log(LogLevel::from_log(metadata.level()))
    }

    fn log(&self, record: &log::Record<'_>) {
        if self.enabled(record.metadata()) {
            self.log_message(
                LogLevel::from_log(record.level()),
                record.target(),
                record.args().to_string(),
            );
        }
    }

    fn flush(&self) {}
}

/// グローバルロガーとして登録（二度目以降は無視）
pub fn init(logger: Logger) {
    let filter = logger.level().to_filter();
    if log::set_boxed_logger(Box::new(logger)).is_ok() {
        log::set_max_level(filter);
    }
}
