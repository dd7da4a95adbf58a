//! カーソル位置管理
//!
//! ドキュメント内の単一カーソルと、その移動・編集遷移を管理

use super::document::{Document, RowLayout};
use super::slot::CharacterSlot;
use crate::glyph::GlyphCodec;

/// カーソル位置（次に入力で上書きされるスロット）
///
/// 常に `0 <= position < max(1, len)` を満たす。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    position: usize,
}

impl Cursor {
    /// 原点に配置したカーソルを作成
    pub fn new() -> Self {
        Self { position: 0 }
    }

    /// 指定位置のカーソルを作成（範囲は `clamp` で調整すること）
    pub fn at(position: usize) -> Self {
        Self { position }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// カーソルを原点に戻す
    pub fn reset(&mut self) {
        self.position = 0;
    }

    /// ドキュメント長に合わせて位置を丸める
    pub fn clamp(&mut self, len: usize) {
        self.position = self.position.min(len.saturating_sub(1));
    }

    /// 不変条件を満たしているか
    pub fn is_within(&self, len: usize) -> bool {
        self.position < len.max(1)
    }
}

/// カーソル移動の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CursorMovement {
    Left,
    Right,
    Up,
    Down,
}

/// カーソル遷移の計算器
///
/// 呼び出し間で状態を持たない。移動・編集ともに同じ丸め規則を使う。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CursorController {
    layout: RowLayout,
}

impl CursorController {
    pub fn new(layout: RowLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> RowLayout {
        self.layout
    }

    /// カーソルを移動し、動いたかどうかを返す
    pub fn move_cursor(&self, cursor: &mut Cursor, len: usize, movement: CursorMovement) -> bool {
        let before = cursor.position;
        let target = match movement {
            CursorMovement::Left => self.left(before),
            CursorMovement::Right => self.right(before, len),
            CursorMovement::Up => self.up(before),
            CursorMovement::Down => self.down(before, len),
        };
        cursor.position = target;
        cursor.clamp(len);
        cursor.position != before
    }

    fn left(&self, position: usize) -> usize {
        position.saturating_sub(1)
    }

    fn right(&self, position: usize, len: usize) -> usize {
        if position + 1 < len {
            position + 1
        } else {
            position
        }
    }

    fn up(&self, position: usize) -> usize {
        let (row, column) = self.layout.row_col(position);
        if row == 0 {
            return position;
        }
        self.layout.index_of(row - 1, column)
    }

    fn down(&self, position: usize, len: usize) -> usize {
        let Some(last_row) = self.layout.last_row(len) else {
            return position;
        };
        let (row, column) = self.layout.row_col(position);
        if row >= last_row {
            return position;
        }
        // 最終行が短い場合は末尾スロットに丸める
        self.layout.index_of(row + 1, column).min(len - 1)
    }

    /// カーソル直前のスロットを削除してカーソルを1戻す（先頭では何もしない）
    pub fn backspace(&self, cursor: &mut Cursor, document: &mut Document) -> Option<CharacterSlot> {
        if cursor.position == 0 {
            return None;
        }
        let removed = document.remove_at(cursor.position - 1).ok()?;
        cursor.position -= 1;
        cursor.clamp(document.len());
        Some(removed)
    }

    /// カーソル位置のスロットを文字で上書きし、末尾でなければ1進める
    ///
    /// 制御文字は無視する。空ドキュメントでは最初のスロットを作成する。
    pub fn type_character(
        &self,
        cursor: &mut Cursor,
        document: &mut Document,
        ch: char,
        codec: &GlyphCodec,
    ) -> bool {
        if ch.is_control() {
            return false;
        }

        let slot = CharacterSlot::from_char(ch, codec);
        if document.is_empty() {
            if document.insert_at(0, slot).is_err() {
                return false;
            }
            cursor.reset();
            return true;
        }

        cursor.clamp(document.len());
        if document.replace_at(cursor.position, slot).is_err() {
            return false;
        }
        cursor.position = self.right(cursor.position, document.len());
        true
    }

    /// カーソル位置に改行スロットを挿入し、1進める
    pub fn insert_line_break(&self, cursor: &mut Cursor, document: &mut Document) -> bool {
        cursor.clamp(document.len());
        if document.insert_at(cursor.position, CharacterSlot::LineBreak).is_err() {
            return false;
        }
        cursor.position = self.right(cursor.position, document.len());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(text: &str, width: usize) -> (Document, CursorController, GlyphCodec) {
        let codec = GlyphCodec::standard();
        (
            Document::from_text(text, &codec),
            CursorController::new(RowLayout::new(width)),
            codec,
        )
    }

    #[test]
    fn test_cursor_creation() {
        let cursor = Cursor::new();
        assert_eq!(cursor.position(), 0);
        assert!(cursor.is_within(0));
    }

    #[test]
    fn test_left_right_edges() {
        let (document, controller, _) = setup("ABC", 20);
        let mut cursor = Cursor::new();

        assert!(!controller.move_cursor(&mut cursor, document.len(), CursorMovement::Left));
        assert_eq!(cursor.position(), 0);

        assert!(controller.move_cursor(&mut cursor, document.len(), CursorMovement::Right));
        assert!(controller.move_cursor(&mut cursor, document.len(), CursorMovement::Right));
        assert_eq!(cursor.position(), 2);

        // 最終スロットでは動かない
        assert!(!controller.move_cursor(&mut cursor, document.len(), CursorMovement::Right));
        assert_eq!(cursor.position(), 2);
    }

    #[test]
    fn test_right_on_empty_document() {
        let controller = CursorController::default();
        let mut cursor = Cursor::new();
        assert!(!controller.move_cursor(&mut cursor, 0, CursorMovement::Right));
        assert!(!controller.move_cursor(&mut cursor, 0, CursorMovement::Down));
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn test_line_navigation() {
        let (document, controller, _) = setup("ABCDEFGHIJ", 4);
        let mut cursor = Cursor::at(5);

        assert!(controller.move_cursor(&mut cursor, document.len(), CursorMovement::Up));
        assert_eq!(cursor.position(), 1);
        assert!(!controller.move_cursor(&mut cursor, document.len(), CursorMovement::Up));

        assert!(controller.move_cursor(&mut cursor, document.len(), CursorMovement::Down));
        assert_eq!(cursor.position(), 5);

        // 最終行（IJ）は短いので末尾に丸める
        let mut cursor = Cursor::at(7);
        assert!(controller.move_cursor(&mut cursor, document.len(), CursorMovement::Down));
        assert_eq!(cursor.position(), 9);
        assert!(!controller.move_cursor(&mut cursor, document.len(), CursorMovement::Down));
    }

    #[test]
    fn test_line_breaks_do_not_wrap_rows() {
        let (document, controller, _) = setup("A\nBCDE", 3);
        let mut cursor = Cursor::at(1);
        assert!(controller.move_cursor(&mut cursor, document.len(), CursorMovement::Down));
        assert_eq!(cursor.position(), 4);
    }

    #[test]
    fn test_backspace() {
        let (mut document, controller, _) = setup("ABC", 20);
        let mut cursor = Cursor::new();
        assert_eq!(controller.backspace(&mut cursor, &mut document), None);
        assert_eq!(document.len(), 3);
        assert_eq!(cursor.position(), 0);

        let mut cursor = Cursor::at(2);
        let removed = controller.backspace(&mut cursor, &mut document).unwrap();
        assert_eq!(removed.source_char(), Some('B'));
        assert_eq!(document.len(), 2);
        assert_eq!(cursor.position(), 1);
    }

    #[test]
    fn test_type_character_overwrites_and_advances() {
        let (mut document, controller, codec) = setup("HELLO", 20);
        let mut cursor = Cursor::new();

        assert!(controller.type_character(&mut cursor, &mut document, 'Z', &codec));
        assert_eq!(cursor.position(), 1);
        assert_eq!(document.len(), 5);
        assert_eq!(document.get(0).unwrap().pattern(), Some(&codec.encode('Z')));

        // 末尾では上書きのみで進まない
        let mut cursor = Cursor::at(4);
        assert!(controller.type_character(&mut cursor, &mut document, 'X', &codec));
        assert_eq!(cursor.position(), 4);
        assert_eq!(document.len(), 5);
    }

    #[test]
    fn test_type_character_ignores_control() {
        let (mut document, controller, codec) = setup("AB", 20);
        let before = document.clone();
        let mut cursor = Cursor::new();
        assert!(!controller.type_character(&mut cursor, &mut document, '\u{7}', &codec));
        assert!(!controller.type_character(&mut cursor, &mut document, '\n', &codec));
        assert_eq!(document, before);
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn test_type_character_replaces_line_break() {
        let (mut document, controller, codec) = setup("A\nB", 20);
        let mut cursor = Cursor::at(1);
        assert!(controller.type_character(&mut cursor, &mut document, 'Q', &codec));
        assert_eq!(document.line_break_count(), 0);
        assert_eq!(cursor.position(), 2);
    }

    #[test]
    fn test_type_into_empty_document() {
        let (mut document, controller, codec) = setup("", 20);
        let mut cursor = Cursor::new();
        assert!(controller.type_character(&mut cursor, &mut document, 'A', &codec));
        assert_eq!(document.len(), 1);
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn test_insert_line_break() {
        let (mut document, controller, _) = setup("AB", 20);
        let mut cursor = Cursor::at(1);
        assert!(controller.insert_line_break(&mut cursor, &mut document));
        assert_eq!(document.len(), 3);
        assert!(document.get(1).unwrap().is_line_break());
        assert_eq!(cursor.position(), 2);
    }
}
