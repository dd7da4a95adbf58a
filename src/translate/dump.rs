//! パターンダンプ
//!
//! 1スロット1行。改行スロットは空行、グリフは `0`/`1` の16文字。

use crate::buffer::{CharacterSlot, Document};
use crate::error::FileError;
use crate::glyph::Pattern;

/// ドキュメントをパターンダンプ形式に変換
pub fn pattern_dump(document: &Document) -> String {
    let mut out = String::with_capacity(document.len() * 17);
    for slot in document.iter() {
        if let Some(pattern) = slot.pattern() {
            out.push_str(&pattern.to_bit_string());
        }
        out.push('\n');
    }
    out
}

/// パターンダンプからドキュメントを復元
pub fn parse_pattern_dump(text: &str) -> Result<Document, FileError> {
    let mut slots = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let line = line.trim_end_matches('\r');
        if line.is_empty() {
            slots.push(CharacterSlot::LineBreak);
            continue;
        }
        let pattern: Pattern = line.parse().map_err(|err| FileError::InvalidPatternDump {
            line: index + 1,
            message: format!("{}", err),
        })?;
        slots.push(CharacterSlot::from_pattern(pattern));
    }
    Ok(Document::from_slots(slots))
}
