//! yautja-tablet - 16セグメントのヤウージャ文字タブレット
//!
//! テキストをグリフとして表示し、セグメント単位で編集して平文に戻す

// コアモジュール
pub mod config;
pub mod error;
pub mod frontend;
pub mod logging;

// データ層
pub mod buffer;
pub mod file;
pub mod glyph;

// 編集層
pub mod editor;
pub mod translate;

// ロジック層
pub mod app;
pub mod input;

// 表示層
pub mod ui;

// 公開API
pub use app::Tablet;
pub use buffer::{CharacterSlot, Cursor, CursorController, CursorMovement, Document, RowLayout};
pub use config::{ConfigOverrides, TabletConfig};
pub use editor::{apply, EditEngine, EditEvent, EditOutcome};
pub use error::{Result, TabletError};
pub use frontend::TuiApplication;
pub use glyph::{Decoded, GlyphCodec, Pattern, SEGMENT_COUNT};
pub use translate::{translate, Translator};
