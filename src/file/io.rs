//! ファイルI/O操作
//!
//! UTF-8テキストファイルの読み込みと保存機能

use crate::error::{FileError, Result, TabletError};
use std::fs;
use std::path::Path;

const UTF8_BOM: char = '\u{feff}';

/// ファイル操作のトレイト
pub trait FileOperations {
    /// ファイルからテキストを読み込み
    fn read_file(&self, path: &Path) -> Result<String>;

    /// テキストをファイルに書き込み
    fn write_file(&self, path: &Path, content: &str) -> Result<()>;

    /// ファイルが存在するかチェック
    fn file_exists(&self, path: &Path) -> bool {
        path.is_file()
    }
}

/// ファイル操作の実装
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultFileOperations;

impl FileOperations for DefaultFileOperations {
    fn read_file(&self, path: &Path) -> Result<String> {
        if path.is_dir() {
            return Err(TabletError::File(FileError::InvalidPath {
                path: path.display().to_string(),
            }));
        }

        let bytes = fs::read(path).map_err(|err| FileError::from_io(&err, path))?;
        let content = String::from_utf8(bytes).map_err(|_| {
            TabletError::File(FileError::Io {
                message: format!("{}: UTF-8ではありません", path.display()),
            })
        })?;

        Ok(normalize(&content))
    }

    fn write_file(&self, path: &Path, content: &str) -> Result<()> {
        if path.as_os_str().is_empty() || path.is_dir() {
            return Err(TabletError::File(FileError::InvalidPath {
                path: path.display().to_string(),
            }));
        }

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|err| FileError::from_io(&err, parent))?;
            }
        }

        // 一時ファイルに書き込んでからアトミックに移動
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, content).map_err(|err| FileError::from_io(&err, &temp_path))?;
        if let Err(err) = fs::rename(&temp_path, path) {
            let _ = fs::remove_file(&temp_path);
            return Err(FileError::from_io(&err, path).into());
        }

        log::debug!("wrote {} bytes to {}", content.len(), path.display());
        Ok(())
    }
}

/// BOM除去と復帰文字(CR)の除去
pub fn normalize(content: &str) -> String {
    content.strip_prefix(UTF8_BOM).unwrap_or(content).replace('\r', "")
}

/// ファイル読み込みの便利関数
pub fn read_file(path: &Path) -> Result<String> {
    DefaultFileOperations.read_file(path)
}

/// ファイル書き込みの便利関数
pub fn write_file(path: &Path, content: &str) -> Result<()> {
    DefaultFileOperations.write_file(path, content)
}
