//! ファイル操作モジュール
//!
//! 入力テキスト、翻訳結果、パターンダンプの読み書き

pub mod io;
pub mod operations;

pub use io::{normalize, read_file, write_file, DefaultFileOperations, FileOperations};
pub use operations::{TabletStorage, TextSource};
