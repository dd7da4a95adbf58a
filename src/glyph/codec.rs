//! グリフコーデック
//!
//! 文字と16セグメントパターンの双方向変換テーブル

use super::pattern::{Pattern, SEGMENT_COUNT};
use std::collections::HashMap;
use std::fmt;

/// 正規文字とパターンの組
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphEntry {
    pub ch: char,
    pub pattern: Pattern,
}

impl GlyphEntry {
    pub const fn new(ch: char, bits: [u8; SEGMENT_COUNT]) -> Self {
        Self {
            ch,
            pattern: Pattern::from_bits(bits),
        }
    }
}

/// 標準グリフテーブル（数字、英大文字、空白の順で登録）
pub const CANONICAL_GLYPHS: [GlyphEntry; 37] = [
    GlyphEntry::new('0', [1, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 1]),
    GlyphEntry::new('1', [1, 0, 1, 0, 0, 1, 1, 0, 0, 0, 1, 0, 1, 0, 0, 0]),
    GlyphEntry::new('2', [1, 0, 1, 1, 0, 1, 1, 0, 0, 0, 1, 0, 0, 0, 0, 1]),
    GlyphEntry::new('3', [0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 1, 0, 1, 0, 0, 1]),
    GlyphEntry::new('4', [0, 0, 1, 1, 0, 1, 0, 0, 0, 0, 1, 0, 1, 0, 0, 1]),
    GlyphEntry::new('5', [1, 0, 0, 0, 0, 1, 1, 0, 0, 1, 1, 0, 1, 0, 0, 1]),
    GlyphEntry::new('6', [0, 0, 0, 1, 0, 1, 0, 0, 0, 1, 1, 0, 1, 0, 0, 1]),
    GlyphEntry::new('7', [1, 0, 0, 0, 0, 1, 1, 0, 0, 1, 1, 0, 1, 0, 0, 0]),
    GlyphEntry::new('8', [1, 0, 1, 1, 0, 1, 1, 0, 0, 0, 1, 0, 1, 0, 0, 1]),
    GlyphEntry::new('9', [1, 0, 1, 1, 0, 1, 1, 0, 0, 1, 1, 0, 1, 0, 0, 1]),
    GlyphEntry::new('A', [1, 1, 0, 1, 0, 0, 0, 0, 0, 1, 0, 0, 1, 0, 0, 0]),
    GlyphEntry::new('B', [1, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]),
    GlyphEntry::new('C', [1, 0, 1, 1, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 1]),
    GlyphEntry::new('D', [1, 0, 1, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 1]),
    GlyphEntry::new('E', [1, 0, 0, 1, 0, 0, 0, 0, 0, 1, 0, 0, 1, 0, 0, 1]),
    GlyphEntry::new('F', [1, 0, 1, 1, 0, 0, 0, 0, 0, 1, 0, 0, 1, 0, 0, 1]),
    GlyphEntry::new('G', [1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]),
    GlyphEntry::new('H', [1, 0, 0, 1, 0, 0, 0, 0, 0, 1, 0, 0, 1, 0, 0, 0]),
    GlyphEntry::new('I', [0, 0, 0, 1, 0, 0, 0, 0, 0, 1, 0, 0, 1, 0, 0, 1]),
    GlyphEntry::new('J', [1, 1, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 1, 0, 0, 1]),
    GlyphEntry::new('K', [1, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0]),
    GlyphEntry::new('L', [1, 1, 0, 1, 0, 0, 0, 0, 0, 1, 0, 0, 1, 0, 0, 1]),
    GlyphEntry::new('M', [1, 1, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]),
    GlyphEntry::new('N', [1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]),
    GlyphEntry::new('O', [1, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 1, 0, 0, 1]),
    GlyphEntry::new('P', [1, 1, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 1]),
    GlyphEntry::new('Q', [1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 1]),
    GlyphEntry::new('R', [1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0]),
    GlyphEntry::new('S', [0, 1, 1, 1, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 1]),
    GlyphEntry::new('T', [0, 0, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 1]),
    GlyphEntry::new('U', [1, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0]),
    GlyphEntry::new('V', [1, 1, 1, 1, 0, 0, 0, 0, 0, 1, 0, 0, 1, 0, 0, 0]),
    GlyphEntry::new('W', [1, 1, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1]),
    GlyphEntry::new('X', [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 1]),
    GlyphEntry::new('Y', [0, 0, 1, 1, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 1]),
    GlyphEntry::new('Z', [1, 1, 1, 1, 0, 0, 0, 0, 0, 1, 0, 0, 1, 0, 0, 1]),
    GlyphEntry::new(' ', [0; SEGMENT_COUNT]),
];

/// デコード結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoded {
    Char(char),
    /// どの正規文字にも一致しない
    Unknown,
}

impl Decoded {
    /// 未知パターンの表示文字
    pub const UNKNOWN_CHAR: char = '?';

    pub fn to_char(self) -> char {
        match self {
            Decoded::Char(ch) => ch,
            Decoded::Unknown => Self::UNKNOWN_CHAR,
        }
    }
}

impl fmt::Display for Decoded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// 文字 <-> パターンの変換テーブル
///
/// 構築後は不変。逆引きは単射とは限らず、同一パターンが複数登録された場合は
/// 最後に登録された文字が優先される。
#[derive(Debug, Clone)]
pub struct GlyphCodec {
    entries: Vec<GlyphEntry>,
    forward: HashMap<char, Pattern>,
    reverse: HashMap<Pattern, char>,
}

impl GlyphCodec {
    /// 標準テーブルからコーデックを構築
    pub fn standard() -> Self {
        Self::from_entries(CANONICAL_GLYPHS)
    }

    /// 任意のエントリ列からコーデックを構築
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = GlyphEntry>,
    {
        let entries: Vec<GlyphEntry> = entries.into_iter().collect();
        let mut forward = HashMap::with_capacity(entries.len());
        let mut reverse = HashMap::with_capacity(entries.len());

        for entry in &entries {
            forward.insert(entry.ch, entry.pattern);
            if let Some(previous) = reverse.insert(entry.pattern, entry.ch) {
                log::debug!(
                    "glyph pattern {} shared by {:?} and {:?}; decoding to {:?}",
                    entry.pattern,
                    previous,
                    entry.ch,
                    entry.ch
                );
            }
        }

        Self {
            entries,
            forward,
            reverse,
        }
    }

    /// 文字をパターンに変換（大文字化して検索、未登録は全消灯）
    pub fn encode(&self, ch: char) -> Pattern {
        single_uppercase(ch)
            .and_then(|upper| self.forward.get(&upper))
            .copied()
            .unwrap_or_else(Pattern::blank)
    }

    /// パターンを文字に変換
    pub fn decode(&self, pattern: &Pattern) -> Decoded {
        self.reverse
            .get(pattern)
            .copied()
            .map(Decoded::Char)
            .unwrap_or(Decoded::Unknown)
    }

    /// 登録済みの文字か
    pub fn is_canonical(&self, ch: char) -> bool {
        single_uppercase(ch).is_some_and(|upper| self.forward.contains_key(&upper))
    }

    /// 登録順のエントリ
    pub fn entries(&self) -> &[GlyphEntry] {
        &self.entries
    }
}

/// 大文字化が1文字に収まる場合のみ返す（'ß' -> "SS" などは未登録扱い）
fn single_uppercase(ch: char) -> Option<char> {
    let mut upper = ch.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(first), None) => Some(first),
        _ => None,
    }
}

impl Default for GlyphCodec {
    fn default() -> Self {
        Self::standard()
    }
}
