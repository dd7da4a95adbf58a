//! エディタモジュール
//!
//! 編集エンジンとカーソル点滅の統合モジュール

pub mod blink;
pub mod engine;

// 公開API
pub use blink::CursorBlink;
pub use engine::{apply, EditEngine, EditEvent, EditOutcome};

// 互換性のため、bufferモジュールから必要な型を再エクスポート
pub use crate::buffer::{Cursor, CursorMovement, Document, RowLayout};
