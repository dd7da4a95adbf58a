//! グリフモジュール
//!
//! 16セグメントパターンと文字変換テーブルを提供

pub mod codec;
pub mod pattern;

// 公開API
pub use codec::{Decoded, GlyphCodec, GlyphEntry, CANONICAL_GLYPHS};
pub use pattern::{Pattern, PatternParseError, SEGMENT_COUNT};
