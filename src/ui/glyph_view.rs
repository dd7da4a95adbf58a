//! グリフ表示
//!
//! 16セグメントを上下2つの3x3の星として文字セルに配置する。
//! セグメント番号は各星で 北, 北東, 東, 南東, 南, 南西, 西, 北西 の順。

use crate::glyph::{Pattern, SEGMENT_COUNT};
use ratatui::layout::Rect;

/// 1グリフの表示幅（区切りの1列を含む）
pub const GLYPH_CELL_WIDTH: u16 = 4;
/// 1グリフ行の表示高さ（区切りの1行を含む）
pub const GLYPH_CELL_HEIGHT: u16 = 7;
/// 星1つの一辺
const STAR_SIZE: u16 = 3;
/// 改行スロットの表示記号
pub const LINE_BREAK_SYMBOL: char = '⏎';

/// 方向ごとの (列, 行) と表示記号
const STAR_LAYOUT: [(u16, u16, char); 8] = [
    (1, 0, '|'),
    (2, 0, '/'),
    (2, 1, '-'),
    (2, 2, '\\'),
    (1, 2, '|'),
    (0, 2, '/'),
    (0, 1, '-'),
    (0, 0, '\\'),
];

const SEGMENTS_PER_STAR: usize = SEGMENT_COUNT / 2;

/// グリフの1文字分
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphCell {
    pub symbol: char,
    /// 対応するセグメント（星の中心は `None`）
    pub segment: Option<usize>,
    pub lit: bool,
}

/// セグメントの表示位置（グリフ左上からの列, 行）
pub fn segment_position(segment: usize) -> Option<(u16, u16)> {
    if segment >= SEGMENT_COUNT {
        return None;
    }
    let star = (segment / SEGMENTS_PER_STAR) as u16;
    let (col, row, _) = STAR_LAYOUT[segment % SEGMENTS_PER_STAR];
    Some((col, row + star * STAR_SIZE))
}

/// グリフ内の位置からセグメントを求める
pub fn segment_at(col: u16, row: u16) -> Option<usize> {
    if col >= STAR_SIZE || row >= STAR_SIZE * 2 {
        return None;
    }
    let star = (row / STAR_SIZE) as usize;
    let local_row = row % STAR_SIZE;
    STAR_LAYOUT
        .iter()
        .position(|&(c, r, _)| c == col && r == local_row)
        .map(|direction| star * SEGMENTS_PER_STAR + direction)
}

/// パターンを 6行x3列 のセルに展開
pub fn glyph_cells(pattern: &Pattern) -> [[GlyphCell; 3]; 6] {
    let hub = |star: usize| GlyphCell {
        symbol: '+',
        segment: None,
        lit: (star * SEGMENTS_PER_STAR..(star + 1) * SEGMENTS_PER_STAR)
            .any(|seg| pattern.get(seg).unwrap_or(false)),
    };

    let mut cells = [[hub(0); 3]; 6];
    for row in cells.iter_mut().skip(STAR_SIZE as usize) {
        *row = [hub(1); 3];
    }

    for segment in 0..SEGMENT_COUNT {
        let (_, _, symbol) = STAR_LAYOUT[segment % SEGMENTS_PER_STAR];
        if let Some((col, row)) = segment_position(segment) {
            cells[row as usize][col as usize] = GlyphCell {
                symbol,
                segment: Some(segment),
                lit: pattern.get(segment).unwrap_or(false),
            };
        }
    }
    cells
}

/// 文字列としての表示（消灯セグメントは空白）
pub fn glyph_rows(pattern: &Pattern) -> [String; 6] {
    glyph_cells(pattern).map(|row| {
        row.iter()
            .map(|cell| match (cell.segment, cell.lit) {
                (Some(_), true) => cell.symbol,
                (None, true) => '+',
                _ => ' ',
            })
            .collect()
    })
}

/// グリッド領域の幾何情報
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridGeometry {
    pub area: Rect,
    pub top_row: usize,
    pub chars_per_row: usize,
}

impl GridGeometry {
    pub fn new(area: Rect, top_row: usize, chars_per_row: usize) -> Self {
        Self {
            area,
            top_row,
            chars_per_row: chars_per_row.max(1),
        }
    }

    /// 画面に収まるグリフ行数
    pub fn visible_rows(&self) -> usize {
        (self.area.height / GLYPH_CELL_HEIGHT).max(1) as usize
    }

    /// 画面に収まる列数
    pub fn visible_columns(&self) -> usize {
        ((self.area.width / GLYPH_CELL_WIDTH) as usize).min(self.chars_per_row)
    }

    /// スロットの左上座標（画面外なら `None`）
    pub fn cell_origin(&self, index: usize) -> Option<(u16, u16)> {
        let row = index / self.chars_per_row;
        let col = index % self.chars_per_row;
        if row < self.top_row
            || row >= self.top_row + self.visible_rows()
            || col >= self.visible_columns()
        {
            return None;
        }
        let x = self.area.x + col as u16 * GLYPH_CELL_WIDTH;
        let y = self.area.y + (row - self.top_row) as u16 * GLYPH_CELL_HEIGHT;
        Some((x, y))
    }

    /// 画面座標から (スロット, セグメント) を求める
    pub fn hit_test(&self, column: u16, row: u16, len: usize) -> Option<(usize, usize)> {
        if column < self.area.x || row < self.area.y {
            return None;
        }
        let dx = column - self.area.x;
        let dy = row - self.area.y;
        let grid_col = (dx / GLYPH_CELL_WIDTH) as usize;
        let grid_row = (dy / GLYPH_CELL_HEIGHT) as usize;
        if grid_col >= self.visible_columns() || grid_row >= self.visible_rows() {
            return None;
        }

        let index = (self.top_row + grid_row) * self.chars_per_row + grid_col;
        if index >= len {
            return None;
        }
        segment_at(dx % GLYPH_CELL_WIDTH, dy % GLYPH_CELL_HEIGHT).map(|segment| (index, segment))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glyph::GlyphCodec;

    #[test]
    fn test_segment_positions_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for segment in 0..SEGMENT_COUNT {
            let pos = segment_position(segment).unwrap();
            assert!(seen.insert(pos), "segment {} overlaps", segment);
            assert_eq!(segment_at(pos.0, pos.1), Some(segment));
        }
        assert_eq!(segment_position(SEGMENT_COUNT), None);
    }

    #[test]
    fn test_hub_is_not_a_segment() {
        assert_eq!(segment_at(1, 1), None);
        assert_eq!(segment_at(1, 4), None);
        assert_eq!(segment_at(3, 0), None);
        assert_eq!(segment_at(0, 6), None);
    }

    #[test]
    fn test_glyph_rows_for_zero() {
        // '0' は 北, 南東 (上) と 南, 北西 (下)
        let codec = GlyphCodec::standard();
        let rows = glyph_rows(&codec.encode('0'));
        assert_eq!(rows[0], " | ");
        assert_eq!(rows[1], " + ");
        assert_eq!(rows[2], "  \\");
        assert_eq!(rows[3], "\\  ");
        assert_eq!(rows[5], " | ");
    }

    #[test]
    fn test_blank_glyph_is_empty() {
        let rows = glyph_rows(&Pattern::blank());
        assert!(rows.iter().all(|row| row.trim().is_empty()));
    }

    #[test]
    fn test_hit_test_maps_to_slot_and_segment() {
        let geometry = GridGeometry::new(Rect::new(2, 1, 40, 21), 0, 3);
        // 2番目のスロットの上の星の東
        assert_eq!(geometry.hit_test(2 + 4 + 2, 1 + 1, 5), Some((1, 2)));
        // 2行目の最初のスロット、下の星の北
        assert_eq!(geometry.hit_test(2 + 1, 1 + 7 + 3, 5), Some((3, 8)));
        // 存在しないスロット
        assert_eq!(geometry.hit_test(2 + 8, 1 + 7, 5), None);
        // 領域外
        assert_eq!(geometry.hit_test(0, 0, 5), None);
    }

    #[test]
    fn test_cell_origin_respects_scroll() {
        let geometry = GridGeometry::new(Rect::new(0, 0, 80, 14), 1, 4);
        assert_eq!(geometry.visible_rows(), 2);
        assert_eq!(geometry.cell_origin(0), None);
        assert_eq!(geometry.cell_origin(5), Some((4, 0)));
        assert_eq!(geometry.cell_origin(12), None);
    }
}
