//! タブレットのファイル操作
//!
//! 入力テキストの読み込み、翻訳結果とパターンダンプの保存

use crate::buffer::Document;
use crate::error::{FileError, Result, TabletError};
use crate::file::io::{DefaultFileOperations, FileOperations};
use crate::glyph::GlyphCodec;
use crate::translate::{parse_pattern_dump, pattern_dump, translate};
use std::path::Path;

/// ドキュメントの読み込み元
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextSource {
    /// テキストファイルから読み込んだ
    File(std::path::PathBuf),
    /// パターンダンプから読み込んだ
    Patterns(std::path::PathBuf),
    /// 既定テキストを使った
    Fallback,
}

/// タブレット用ストレージ
#[derive(Debug, Clone, Default)]
pub struct TabletStorage<F: FileOperations = DefaultFileOperations> {
    ops: F,
}

impl TabletStorage<DefaultFileOperations> {
    pub fn new() -> Self {
        Self {
            ops: DefaultFileOperations,
        }
    }
}

impl<F: FileOperations> TabletStorage<F> {
    pub fn with_operations(ops: F) -> Self {
        Self { ops }
    }

    /// 入力テキストを読み込み
    pub fn load_text(&self, path: &Path) -> Result<String> {
        let text = self.ops.read_file(path)?;
        log::info!("loaded {} chars from {}", text.chars().count(), path.display());
        Ok(text)
    }

    /// 起動時テキストを決定
    ///
    /// 指定ファイル、既定入力ファイル、既定テキストの順に試す。
    /// 明示指定されたファイルが読めない場合はエラー。
    pub fn startup_text(
        &self,
        explicit: Option<&Path>,
        default_input: &Path,
        fallback: &str,
    ) -> Result<(String, TextSource)> {
        if let Some(path) = explicit {
            let text = self.load_text(path)?;
            return Ok((text, TextSource::File(path.to_path_buf())));
        }

        if self.ops.file_exists(default_input) {
            match self.load_text(default_input) {
                Ok(text) => return Ok((text, TextSource::File(default_input.to_path_buf()))),
                Err(err) => log::warn!("default input unreadable, using fallback: {}", err),
            }
        }

        Ok((fallback.to_string(), TextSource::Fallback))
    }

    /// 翻訳結果を保存
    pub fn save_translation(
        &self,
        document: &Document,
        codec: &GlyphCodec,
        path: &Path,
    ) -> Result<()> {
        let text = translate(document, codec);
        self.ops.write_file(path, &text)?;
        log::info!("saved translation ({} slots) to {}", document.len(), path.display());
        Ok(())
    }

    /// パターンダンプを保存
    pub fn save_patterns(&self, document: &Document, path: &Path) -> Result<()> {
        self.ops.write_file(path, &pattern_dump(document))?;
        log::info!("saved {} patterns to {}", document.len(), path.display());
        Ok(())
    }

    /// パターンダンプを読み込み
    pub fn load_patterns(&self, path: &Path) -> Result<Document> {
        let text = self.ops.read_file(path)?;
        parse_pattern_dump(&text).map_err(|err| match err {
            FileError::InvalidPatternDump { line, message } => {
                TabletError::File(FileError::InvalidPatternDump {
                    line,
                    message: format!("{}: {}", path.display(), message),
                })
            }
            other => TabletError::File(other),
        })
    }
}
