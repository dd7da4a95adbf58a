//! バッファ管理モジュール
//!
//! グリフスロットの列、カーソル位置、カーソル遷移を提供

pub mod cursor;
pub mod document;
pub mod slot;

// 公開API
pub use cursor::{Cursor, CursorController, CursorMovement};
pub use document::{Document, RowLayout};
pub use slot::{CharacterSlot, GlyphSlot};
pub use crate::error::DocumentError;
