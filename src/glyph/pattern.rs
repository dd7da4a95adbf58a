//! セグメントパターン
//!
//! 16セグメントの点灯状態を固定長配列で保持する

use crate::error::DocumentError;
use std::fmt;
use std::str::FromStr;

/// 1グリフあたりのセグメント数
pub const SEGMENT_COUNT: usize = 16;

/// 16セグメントの点灯パターン
///
/// インデックス 0-7 は上側の星形、8-15 は下側の星形（いずれも北から時計回り）。
/// 長さは型で固定されているため、編集によって16以外になることはない。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Pattern([bool; SEGMENT_COUNT]);

impl Pattern {
    /// 全セグメント消灯のパターン
    pub const fn blank() -> Self {
        Self([false; SEGMENT_COUNT])
    }

    /// 0/1 の配列からパターンを作成（0以外は点灯）
    pub const fn from_bits(bits: [u8; SEGMENT_COUNT]) -> Self {
        let mut segments = [false; SEGMENT_COUNT];
        let mut i = 0;
        while i < SEGMENT_COUNT {
            segments[i] = bits[i] != 0;
            i += 1;
        }
        Self(segments)
    }

    /// セグメント状態を取得（範囲外は `None`）
    pub fn get(&self, segment: usize) -> Option<bool> {
        self.0.get(segment).copied()
    }

    /// セグメントを反転
    pub fn toggle(&mut self, segment: usize) -> Result<(), DocumentError> {
        let state = self
            .0
            .get_mut(segment)
            .ok_or(DocumentError::SegmentOutOfRange { segment })?;
        *state = !*state;
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.0.iter().copied()
    }

    /// 点灯しているセグメント数
    pub fn lit_count(&self) -> usize {
        self.0.iter().filter(|&&lit| lit).count()
    }

    pub fn is_blank(&self) -> bool {
        self.lit_count() == 0
    }

    /// パターンダンプ形式（`0`/`1` の16文字）に変換
    pub fn to_bit_string(&self) -> String {
        self.0.iter().map(|&lit| if lit { '1' } else { '0' }).collect()
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_bit_string())
    }
}

/// パターン文字列の解析エラー
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatternParseError {
    #[error("expected {SEGMENT_COUNT} segments, found {0}")]
    Length(usize),
    #[error("invalid segment character {0:?}")]
    InvalidChar(char),
}

impl FromStr for Pattern {
    type Err = PatternParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let count = s.chars().count();
        if count != SEGMENT_COUNT {
            return Err(PatternParseError::Length(count));
        }

        let mut segments = [false; SEGMENT_COUNT];
        for (slot, ch) in segments.iter_mut().zip(s.chars()) {
            *slot = match ch {
                '0' => false,
                '1' => true,
                other => return Err(PatternParseError::InvalidChar(other)),
            };
        }
        Ok(Self(segments))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_pattern() {
        let pattern = Pattern::blank();
        assert!(pattern.is_blank());
        assert_eq!(pattern.to_bit_string(), "0000000000000000");
    }

    #[test]
    fn test_toggle_is_self_inverse() {
        let original = Pattern::from_bits([1, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 1]);
        let mut pattern = original;
        pattern.toggle(4).unwrap();
        assert_ne!(pattern, original);
        assert_eq!(pattern.get(4), Some(true));
        pattern.toggle(4).unwrap();
        assert_eq!(pattern, original);
    }

    #[test]
    fn test_toggle_out_of_range() {
        let mut pattern = Pattern::blank();
        assert_eq!(
            pattern.toggle(SEGMENT_COUNT),
            Err(DocumentError::SegmentOutOfRange { segment: 16 })
        );
        assert!(pattern.is_blank());
    }

    #[test]
    fn test_parse_bit_string() {
        let pattern: Pattern = "1001000000001001".parse().unwrap();
        assert_eq!(pattern.lit_count(), 4);
        assert_eq!(pattern.to_string(), "1001000000001001");

        assert_eq!("101".parse::<Pattern>(), Err(PatternParseError::Length(3)));
        assert_eq!(
            "100100000000100x".parse::<Pattern>(),
            Err(PatternParseError::InvalidChar('x'))
        );
    }
}
