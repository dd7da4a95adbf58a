//! 文字スロット
//!
//! ドキュメントの1位置を表す。改行スロットはセグメントを持たない

use crate::error::DocumentError;
use crate::glyph::{GlyphCodec, Pattern};

/// グリフを保持するスロット
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphSlot {
    /// 現在のセグメントパターン（編集で自由に変化する）
    pub pattern: Pattern,
    /// 初期化に使った元の文字（表示専用。翻訳には使わない）
    pub source: Option<char>,
}

impl GlyphSlot {
    pub fn from_char(ch: char, codec: &GlyphCodec) -> Self {
        Self {
            pattern: codec.encode(ch),
            source: Some(ch),
        }
    }

    pub fn from_pattern(pattern: Pattern) -> Self {
        Self {
            pattern,
            source: None,
        }
    }

    /// セグメントを反転し、元の文字との対応を外す
    pub fn toggle(&mut self, segment: usize) -> Result<(), DocumentError> {
        self.pattern.toggle(segment)?;
        self.source = None;
        Ok(())
    }
}

/// ドキュメント内の1スロット
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacterSlot {
    /// 改行（パターンなし、セグメント編集不可）
    LineBreak,
    /// グリフ
    Glyph(GlyphSlot),
}

impl CharacterSlot {
    /// 文字からスロットを作成（`\n` は改行スロット）
    pub fn from_char(ch: char, codec: &GlyphCodec) -> Self {
        if ch == '\n' {
            CharacterSlot::LineBreak
        } else {
            CharacterSlot::Glyph(GlyphSlot::from_char(ch, codec))
        }
    }

    pub fn from_pattern(pattern: Pattern) -> Self {
        CharacterSlot::Glyph(GlyphSlot::from_pattern(pattern))
    }

    pub fn is_line_break(&self) -> bool {
        matches!(self, CharacterSlot::LineBreak)
    }

    pub fn pattern(&self) -> Option<&Pattern> {
        match self {
            CharacterSlot::LineBreak => None,
            CharacterSlot::Glyph(glyph) => Some(&glyph.pattern),
        }
    }

    pub fn source_char(&self) -> Option<char> {
        match self {
            CharacterSlot::LineBreak => None,
            CharacterSlot::Glyph(glyph) => glyph.source,
        }
    }
}
