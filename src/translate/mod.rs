//! 翻訳モジュール
//!
//! ドキュメントの現在のパターンから平文とパターンダンプを生成する

pub mod dump;

pub use dump::{parse_pattern_dump, pattern_dump};

use crate::buffer::{CharacterSlot, Document};
use crate::glyph::{Decoded, GlyphCodec};

/// パターン -> テキスト変換器
///
/// 元の入力文字ではなく、編集後のパターンをデコードする。
#[derive(Debug, Clone, Copy)]
pub struct Translator<'a> {
    codec: &'a GlyphCodec,
}

impl<'a> Translator<'a> {
    pub fn new(codec: &'a GlyphCodec) -> Self {
        Self { codec }
    }

    /// 1スロットを翻訳（改行スロットは `\n`）
    pub fn translate_slot(&self, slot: &CharacterSlot) -> char {
        match slot {
            CharacterSlot::LineBreak => '\n',
            CharacterSlot::Glyph(glyph) => self.codec.decode(&glyph.pattern).to_char(),
        }
    }

    /// ドキュメント全体を翻訳
    pub fn translate(&self, document: &Document) -> String {
        document.iter().map(|slot| self.translate_slot(slot)).collect()
    }

    /// デコードできないグリフスロットの位置
    pub fn unknown_slots(&self, document: &Document) -> Vec<usize> {
        document
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| {
                slot.pattern()
                    .filter(|pattern| self.codec.decode(pattern) == Decoded::Unknown)
                    .map(|_| index)
            })
            .collect()
    }
}

/// 便利関数
pub fn translate(document: &Document, codec: &GlyphCodec) -> String {
    Translator::new(codec).translate(document)
}
