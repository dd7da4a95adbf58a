//! 編集エンジン
//!
//! ドキュメントとカーソルを束ね、外部イベントを1つのプリミティブに振り分ける

use crate::buffer::{Cursor, CursorController, CursorMovement, Document, RowLayout};
use crate::error::DocumentError;
use crate::glyph::GlyphCodec;
use std::sync::Arc;

/// 編集イベント
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditEvent {
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    /// カーソル直前のスロットを削除
    Backspace,
    /// カーソル位置を上書きして進める
    Type(char),
    /// カーソル位置に改行スロットを挿入
    InsertLineBreak,
    /// 任意スロットのセグメント反転（クリック相当）
    ToggleSegment { slot: usize, segment: usize },
    /// カーソル位置のセグメント反転
    ToggleSegmentAtCursor(usize),
    /// 任意スロットの文字設定
    SetCharacter { slot: usize, ch: char },
    /// 新しいテキストを読み込み、カーソルを原点に戻す
    Load(String),
}

/// イベント適用の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// ドキュメントが変更された
    Changed,
    /// カーソルのみ移動した
    Moved,
    /// 何も起きなかった（端での移動など）
    Unchanged,
    /// 不正操作として拒否された（状態は不変）
    Rejected(DocumentError),
}

impl EditOutcome {
    pub fn needs_redraw(&self) -> bool {
        matches!(self, EditOutcome::Changed | EditOutcome::Moved)
    }
}

fn movement_outcome(moved: bool) -> EditOutcome {
    if moved {
        EditOutcome::Moved
    } else {
        EditOutcome::Unchanged
    }
}

fn change_outcome(changed: bool) -> EditOutcome {
    if changed {
        EditOutcome::Changed
    } else {
        EditOutcome::Unchanged
    }
}

fn edit_result(result: Result<(), DocumentError>) -> EditOutcome {
    match result {
        Ok(()) => EditOutcome::Changed,
        Err(err) => {
            log::debug!("edit rejected: {}", err);
            EditOutcome::Rejected(err)
        }
    }
}

/// ドキュメントとカーソルにイベントを適用する
///
/// 適用後は必ずカーソルを丸める。
fn dispatch(
    document: &mut Document,
    cursor: &mut Cursor,
    event: EditEvent,
    codec: &GlyphCodec,
    controller: &CursorController,
) -> EditOutcome {
    let len = document.len();
    let outcome = match event {
        EditEvent::MoveLeft => {
            movement_outcome(controller.move_cursor(cursor, len, CursorMovement::Left))
        }
        EditEvent::MoveRight => {
            movement_outcome(controller.move_cursor(cursor, len, CursorMovement::Right))
        }
        EditEvent::MoveUp => {
            movement_outcome(controller.move_cursor(cursor, len, CursorMovement::Up))
        }
        EditEvent::MoveDown => {
            movement_outcome(controller.move_cursor(cursor, len, CursorMovement::Down))
        }
        EditEvent::Backspace => change_outcome(controller.backspace(cursor, document).is_some()),
        EditEvent::Type(ch) => {
            change_outcome(controller.type_character(cursor, document, ch, codec))
        }
        EditEvent::InsertLineBreak => {
            change_outcome(controller.insert_line_break(cursor, document))
        }
        EditEvent::ToggleSegment { slot, segment } => {
            edit_result(document.toggle_segment(slot, segment))
        }
        EditEvent::ToggleSegmentAtCursor(segment) => {
            edit_result(document.toggle_segment(cursor.position(), segment))
        }
        EditEvent::SetCharacter { slot, ch } => {
            edit_result(document.set_character(slot, ch, codec))
        }
        EditEvent::Load(text) => {
            *document = Document::from_text(&text, codec);
            cursor.reset();
            EditOutcome::Changed
        }
    };

    cursor.clamp(document.len());
    debug_assert!(cursor.is_within(document.len()));
    outcome
}

/// 値レベルの遷移関数
///
/// `apply(Document, Cursor, Event) -> (Document, Cursor)` としてそのまま検証できる。
pub fn apply(
    mut document: Document,
    mut cursor: Cursor,
    event: EditEvent,
    codec: &GlyphCodec,
    layout: RowLayout,
) -> (Document, Cursor, EditOutcome) {
    let controller = CursorController::new(layout);
    let outcome = dispatch(&mut document, &mut cursor, event, codec, &controller);
    (document, cursor, outcome)
}

/// 編集セッション
///
/// ドキュメントとカーソルを排他的に所有する。
#[derive(Debug, Clone)]
pub struct EditEngine {
    codec: Arc<GlyphCodec>,
    document: Document,
    cursor: Cursor,
    controller: CursorController,
}

impl EditEngine {
    /// 空のドキュメントで作成
    pub fn new(codec: Arc<GlyphCodec>, layout: RowLayout) -> Self {
        Self {
            codec,
            document: Document::new(),
            cursor: Cursor::new(),
            controller: CursorController::new(layout),
        }
    }

    /// テキストを読み込んだ状態で作成
    pub fn with_text(codec: Arc<GlyphCodec>, layout: RowLayout, text: &str) -> Self {
        let mut engine = Self::new(codec, layout);
        engine.load_text(text);
        engine
    }

    /// イベントを適用
    pub fn apply(&mut self, event: EditEvent) -> EditOutcome {
        dispatch(
            &mut self.document,
            &mut self.cursor,
            event,
            &self.codec,
            &self.controller,
        )
    }

    /// テキストを読み込み、カーソルを原点に戻す
    pub fn load_text(&mut self, text: &str) {
        self.document = Document::from_text(text, &self.codec);
        self.cursor.reset();
        log::info!("loaded document with {} slots", self.document.len());
    }

    /// 既存のドキュメントに置き換え（パターンダンプ読み込みなど）
    pub fn load_document(&mut self, document: Document) {
        self.document = document;
        self.cursor.reset();
        log::info!("loaded document with {} slots", self.document.len());
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn codec(&self) -> &GlyphCodec {
        &self.codec
    }

    pub fn layout(&self) -> RowLayout {
        self.controller.layout()
    }

    /// カーソルの (行, 列)
    pub fn cursor_row_col(&self) -> (usize, usize) {
        self.layout().row_col(self.cursor.position())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translate::translate;

    fn engine(text: &str) -> EditEngine {
        EditEngine::with_text(Arc::new(GlyphCodec::standard()), RowLayout::new(20), text)
    }

    #[test]
    fn test_type_advances_cursor() {
        let mut engine = engine("HELLO");
        assert_eq!(engine.apply(EditEvent::Type('Z')), EditOutcome::Changed);
        assert_eq!(engine.cursor().position(), 1);
        assert_eq!(translate(engine.document(), engine.codec()), "ZELLO");
    }

    #[test]
    fn test_backspace_at_origin_is_noop() {
        let mut engine = engine("HELLO");
        assert_eq!(engine.apply(EditEvent::Backspace), EditOutcome::Unchanged);
        assert_eq!(engine.document().len(), 5);
        assert_eq!(engine.cursor().position(), 0);
    }

    #[test]
    fn test_toggle_line_break_rejected() {
        let mut engine = engine("A\nB");
        let before = engine.document().clone();
        let outcome = engine.apply(EditEvent::ToggleSegment { slot: 1, segment: 3 });
        assert_eq!(
            outcome,
            EditOutcome::Rejected(DocumentError::LineBreakSlot { index: 1 })
        );
        assert_eq!(engine.document(), &before);
    }

    #[test]
    fn test_toggle_at_cursor() {
        let mut engine = engine("0");
        assert_eq!(engine.apply(EditEvent::ToggleSegmentAtCursor(1)), EditOutcome::Changed);
        assert_eq!(translate(engine.document(), engine.codec()), "P");
    }

    #[test]
    fn test_set_character_event() {
        let mut engine = engine("AB");
        assert_eq!(
            engine.apply(EditEvent::SetCharacter { slot: 1, ch: '7' }),
            EditOutcome::Changed
        );
        assert_eq!(translate(engine.document(), engine.codec()), "A7");
        assert!(matches!(
            engine.apply(EditEvent::SetCharacter { slot: 9, ch: '7' }),
            EditOutcome::Rejected(DocumentError::SlotOutOfRange { .. })
        ));
    }

    #[test]
    fn test_load_resets_cursor() {
        let mut engine = engine("HELLO");
        engine.apply(EditEvent::MoveRight);
        engine.apply(EditEvent::MoveRight);
        assert_eq!(engine.apply(EditEvent::Load("AB".to_string())), EditOutcome::Changed);
        assert_eq!(engine.cursor().position(), 0);
        assert_eq!(engine.document().len(), 2);
    }

    #[test]
    fn test_backspace_keeps_cursor_in_bounds() {
        let mut engine = engine("ABC");
        engine.apply(EditEvent::MoveRight);
        engine.apply(EditEvent::MoveRight);
        assert_eq!(engine.apply(EditEvent::Backspace), EditOutcome::Changed);
        assert_eq!(engine.cursor().position(), 1);
        assert_eq!(translate(engine.document(), engine.codec()), "AC");
        assert!(engine.cursor().is_within(engine.document().len()));
    }

    #[test]
    fn test_pure_apply() {
        let codec = GlyphCodec::standard();
        let document = Document::from_text("HELLO", &codec);
        let (document, cursor, outcome) = apply(
            document,
            Cursor::new(),
            EditEvent::Type('Z'),
            &codec,
            RowLayout::default(),
        );
        assert_eq!(outcome, EditOutcome::Changed);
        assert_eq!(cursor.position(), 1);
        assert_eq!(document.get(0).unwrap().pattern(), Some(&codec.encode('Z')));
    }

    #[test]
    fn test_cursor_row_col() {
        let mut engine = EditEngine::with_text(
            Arc::new(GlyphCodec::standard()),
            RowLayout::new(3),
            "ABCDEFG",
        );
        engine.apply(EditEvent::MoveDown);
        engine.apply(EditEvent::MoveRight);
        assert_eq!(engine.cursor_row_col(), (1, 1));
    }
}
