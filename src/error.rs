//! エラーハンドリングシステム
//!
//! タブレット全体で使用される統一されたエラー型とユーティリティを定義
//! 編集中の不正操作は状態を変えずに拒否し、I/O失敗は利用者向けに表示する

use std::time::{Duration, Instant};
use thiserror::Error;

/// アプリケーション全体のエラー型
#[derive(Error, Debug, Clone)]
pub enum TabletError {
    /// ファイル操作エラー
    #[error("File operation failed: {0}")]
    File(#[from] FileError),

    /// ドキュメント操作エラー
    #[error("Document operation failed: {0}")]
    Document(#[from] DocumentError),

    /// UI操作エラー
    #[error("UI operation failed: {0}")]
    Ui(#[from] UiError),

    /// 設定エラー
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// ファイル操作固有のエラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FileError {
    #[error("File not found: {path}")]
    NotFound { path: String },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: String },

    #[error("Invalid path: {path}")]
    InvalidPath { path: String },

    #[error("Invalid pattern dump at line {line}: {message}")]
    InvalidPatternDump { line: usize, message: String },

    #[error("IO error: {message}")]
    Io { message: String },
}

impl FileError {
    /// `std::io::Error` をパス付きで分類
    pub fn from_io(error: &std::io::Error, path: &std::path::Path) -> Self {
        let path = path.display().to_string();
        match error.kind() {
            std::io::ErrorKind::NotFound => FileError::NotFound { path },
            std::io::ErrorKind::PermissionDenied => FileError::PermissionDenied { path },
            _ => FileError::Io {
                message: format!("{}: {}", path, error),
            },
        }
    }
}

/// ドキュメント操作固有のエラー（不正操作。状態は変更されない）
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    #[error("Slot {index} is out of range (len {len})")]
    SlotOutOfRange { index: usize, len: usize },

    #[error("Insert position {index} is out of range (len {len})")]
    InsertOutOfRange { index: usize, len: usize },

    #[error("Segment {segment} is out of range")]
    SegmentOutOfRange { segment: usize },

    #[error("Slot {index} is a line break and has no segments")]
    LineBreakSlot { index: usize },
}

/// UI操作固有のエラー
#[derive(Error, Debug, Clone)]
pub enum UiError {
    #[error("Terminal initialization failed")]
    TerminalInit,

    #[error("Rendering failed: {component}")]
    RenderingFailed { component: String },
}

/// 設定固有のエラー
#[derive(Error, Debug, Clone)]
pub enum ConfigError {
    #[error("Invalid configuration file: {path}: {message}")]
    InvalidFile { path: String, message: String },

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

/// エラーレベル分類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorLevel {
    Info,
    Warning,
    Error,
    Fatal,
}

/// エラー表示情報
#[derive(Debug, Clone)]
pub struct ErrorDisplay {
    /// エラーメッセージ
    pub message: String,
    /// エラーレベル
    pub level: ErrorLevel,
    /// 表示開始時刻
    pub start_time: Instant,
    /// 表示持続時間
    pub duration: Duration,
}

impl ErrorDisplay {
    pub fn new(error: &TabletError) -> Self {
        let (message, level) = Self::format_error(error);
        Self::with_level(message, level)
    }

    /// 任意メッセージの表示（保存完了通知など）
    pub fn info(message: impl Into<String>) -> Self {
        Self::with_level(message.into(), ErrorLevel::Info)
    }

    fn with_level(message: String, level: ErrorLevel) -> Self {
        Self {
            message,
            level,
            start_time: Instant::now(),
            duration: Duration::from_secs(5),
        }
    }

    fn format_error(error: &TabletError) -> (String, ErrorLevel) {
        match error {
            TabletError::File(FileError::NotFound { path }) => {
                (format!("ファイルが見つかりません: {}", path), ErrorLevel::Error)
            }
            TabletError::File(FileError::PermissionDenied { path }) => {
                (format!("アクセス権限がありません: {}", path), ErrorLevel::Error)
            }
            TabletError::File(FileError::InvalidPath { path }) => {
                (format!("無効なパスです: {}", path), ErrorLevel::Error)
            }
            TabletError::File(FileError::InvalidPatternDump { line, message }) => (
                format!("パターンファイルの{}行目が不正です: {}", line, message),
                ErrorLevel::Error,
            ),
            TabletError::Document(DocumentError::LineBreakSlot { index }) => (
                format!("改行スロット {} のセグメントは編集できません", index),
                ErrorLevel::Warning,
            ),
            TabletError::Document(err) => {
                (format!("無効な操作です: {}", err), ErrorLevel::Warning)
            }
            TabletError::Ui(UiError::TerminalInit) => {
                ("ターミナル初期化に失敗しました".to_string(), ErrorLevel::Fatal)
            }
            _ => (format!("エラーが発生しました: {}", error), ErrorLevel::Error),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.start_time.elapsed() >= self.duration
    }
}

/// パニックハンドラの設定
///
/// ターミナルを通常モードに戻してからパニック情報を出力する
pub fn setup_panic_handler() {
    std::panic::set_hook(Box::new(|panic_info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(std::io::stdout(), crossterm::terminal::LeaveAlternateScreen);

        let location = panic_info
            .location()
            .map(|loc| format!("{}:{}", loc.file(), loc.line()))
            .unwrap_or_else(|| "unknown".to_string());

        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s
        } else {
            "Unknown panic payload"
        };

        log::error!("PANIC at {}: {}", location, message);
        eprintln!("PANIC at {}: {}", location, message);
        eprintln!("Stack trace: {}", std::backtrace::Backtrace::capture());

        std::process::exit(1);
    }));
}

/// プロジェクト標準のResult型
pub type Result<T> = std::result::Result<T, TabletError>;

// std::io::Error から TabletError への変換
impl From<std::io::Error> for TabletError {
    fn from(error: std::io::Error) -> Self {
        TabletError::File(FileError::Io {
            message: error.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_creation() {
        let error = TabletError::File(FileError::NotFound {
            path: "input.txt".to_string(),
        });
        let display = ErrorDisplay::new(&error);

        assert_eq!(display.level, ErrorLevel::Error);
        assert!(display.message.contains("ファイルが見つかりません"));
        assert!(!display.is_expired());
    }

    #[test]
    fn test_error_display_expiry() {
        let mut display = ErrorDisplay::info("saved");

        assert!(!display.is_expired());

        // 時間経過をシミュレート
        display.start_time = Instant::now() - Duration::from_secs(6);
        assert!(display.is_expired());
    }

    #[test]
    fn test_line_break_rejection_is_warning() {
        let error = TabletError::Document(DocumentError::LineBreakSlot { index: 3 });
        let display = ErrorDisplay::new(&error);

        assert_eq!(display.level, ErrorLevel::Warning);
        assert!(display.message.contains('3'));
    }

    #[test]
    fn test_io_error_classification() {
        let path = std::path::Path::new("missing.txt");
        let not_found = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert_eq!(
            FileError::from_io(&not_found, path),
            FileError::NotFound {
                path: "missing.txt".to_string()
            }
        );

        let denied = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "no");
        assert!(matches!(
            FileError::from_io(&denied, path),
            FileError::PermissionDenied { .. }
        ));
    }
}
