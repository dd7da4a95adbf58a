//! 入力処理モジュール
//!
//! キーバインドとイベントハンドリングを提供

pub mod event_handler;
pub mod keybinding;

// 公開API
pub use event_handler::{InputHandler, InputResult};
pub use keybinding::{Action, InputMode, Key, KeyCode, KeyModifiers, TabletKeyMap};
