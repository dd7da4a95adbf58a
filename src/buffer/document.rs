//! グリフドキュメント
//!
//! 文字スロットの順序付き列。範囲チェックはこのモジュールに集約する

use super::slot::{CharacterSlot, GlyphSlot};
use crate::error::DocumentError;
use crate::glyph::GlyphCodec;

/// 固定幅の行レイアウト
///
/// 行・列は位置のみから決まり、改行スロットは行を折り返さない。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowLayout {
    width: usize,
}

impl RowLayout {
    /// 1行あたりのスロット数を指定して作成（0は1として扱う）
    pub fn new(width: usize) -> Self {
        Self {
            width: width.max(1),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// インデックスから (行, 列) を計算
    pub fn row_col(&self, index: usize) -> (usize, usize) {
        (index / self.width, index % self.width)
    }

    /// (行, 列) からインデックスを計算
    pub fn index_of(&self, row: usize, column: usize) -> usize {
        row * self.width + column
    }

    /// 最終行（空ドキュメントでは `None`）
    pub fn last_row(&self, len: usize) -> Option<usize> {
        len.checked_sub(1).map(|last| last / self.width)
    }

    /// 表示行数
    pub fn row_count(&self, len: usize) -> usize {
        len.div_ceil(self.width)
    }
}

impl Default for RowLayout {
    fn default() -> Self {
        Self::new(20)
    }
}

/// 文字スロットの列
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    slots: Vec<CharacterSlot>,
}

impl Document {
    /// 空のドキュメントを作成
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// テキストからドキュメントを作成
    ///
    /// `\r` は除去し、`\n` は改行スロットになる。
    pub fn from_text(text: &str, codec: &GlyphCodec) -> Self {
        let slots = text
            .chars()
            .filter(|&ch| ch != '\r')
            .map(|ch| CharacterSlot::from_char(ch, codec))
            .collect();
        Self { slots }
    }

    pub fn from_slots(slots: Vec<CharacterSlot>) -> Self {
        Self { slots }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&CharacterSlot> {
        self.slots.get(index)
    }

    pub fn slots(&self) -> &[CharacterSlot] {
        &self.slots
    }

    pub fn iter(&self) -> impl Iterator<Item = &CharacterSlot> {
        self.slots.iter()
    }

    pub fn glyph_count(&self) -> usize {
        self.slots.iter().filter(|slot| !slot.is_line_break()).count()
    }

    pub fn line_break_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_line_break()).count()
    }

    fn check_slot(&self, index: usize) -> Result<(), DocumentError> {
        if index < self.slots.len() {
            Ok(())
        } else {
            Err(DocumentError::SlotOutOfRange {
                index,
                len: self.slots.len(),
            })
        }
    }

    /// グリフスロットへの可変参照（改行・範囲外は拒否）
    fn glyph_slot_mut(&mut self, index: usize) -> Result<&mut GlyphSlot, DocumentError> {
        self.check_slot(index)?;
        match &mut self.slots[index] {
            CharacterSlot::Glyph(glyph) => Ok(glyph),
            CharacterSlot::LineBreak => Err(DocumentError::LineBreakSlot { index }),
        }
    }

    /// 1セグメントを反転
    pub fn toggle_segment(&mut self, index: usize, segment: usize) -> Result<(), DocumentError> {
        self.glyph_slot_mut(index)?.toggle(segment)
    }

    /// グリフスロットのパターンを文字のパターンで置き換え
    pub fn set_character(
        &mut self,
        index: usize,
        ch: char,
        codec: &GlyphCodec,
    ) -> Result<(), DocumentError> {
        *self.glyph_slot_mut(index)? = GlyphSlot::from_char(ch, codec);
        Ok(())
    }

    /// スロットを挿入（`index == len` は末尾追加）
    pub fn insert_at(&mut self, index: usize, slot: CharacterSlot) -> Result<(), DocumentError> {
        if index > self.slots.len() {
            return Err(DocumentError::InsertOutOfRange {
                index,
                len: self.slots.len(),
            });
        }
        self.slots.insert(index, slot);
        Ok(())
    }

    /// スロットを削除して返す
    pub fn remove_at(&mut self, index: usize) -> Result<CharacterSlot, DocumentError> {
        self.check_slot(index)?;
        Ok(self.slots.remove(index))
    }

    /// スロットを上書きして以前の内容を返す（改行スロットも上書き可能）
    pub fn replace_at(
        &mut self,
        index: usize,
        slot: CharacterSlot,
    ) -> Result<CharacterSlot, DocumentError> {
        self.check_slot(index)?;
        Ok(std::mem::replace(&mut self.slots[index], slot))
    }
}
