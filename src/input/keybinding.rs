//! キーバインドシステム
//!
//! ターミナルのキー入力をタブレット操作に変換する

use crate::editor::EditEvent;
use crossterm::event::{
    KeyCode as CrosstermKeyCode, KeyEvent, KeyEventKind, KeyModifiers as CrosstermModifiers,
};
use std::collections::HashMap;

/// キー入力の内部表現
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Key {
    /// 修飾キー
    pub modifiers: KeyModifiers,
    /// 基本キー
    pub code: KeyCode,
}

/// 修飾キーの組み合わせ
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct KeyModifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

/// 基本キーコード
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Enter,
    Backspace,
    Tab,
    Up,
    Down,
    Left,
    Right,
    Esc,
    Unknown,
}

impl Key {
    /// 修飾なしのキー
    pub fn plain(code: KeyCode) -> Self {
        Self {
            modifiers: KeyModifiers::default(),
            code,
        }
    }

    /// Ctrl + 文字
    pub fn ctrl(ch: char) -> Self {
        Self {
            modifiers: KeyModifiers {
                ctrl: true,
                ..KeyModifiers::default()
            },
            code: KeyCode::Char(ch),
        }
    }

    /// 修飾なし、またはShiftのみの文字入力か
    fn printable_char(&self) -> Option<char> {
        match self.code {
            KeyCode::Char(ch)
                if !self.modifiers.ctrl && !self.modifiers.alt && !ch.is_control() =>
            {
                Some(ch)
            }
            _ => None,
        }
    }
}

impl From<KeyEvent> for Key {
    fn from(event: KeyEvent) -> Self {
        let modifiers = KeyModifiers {
            ctrl: event.modifiers.contains(CrosstermModifiers::CONTROL),
            alt: event.modifiers.contains(CrosstermModifiers::ALT),
            shift: event.modifiers.contains(CrosstermModifiers::SHIFT),
        };

        let code = match event.code {
            // Ctrl付きの文字は小文字に揃える
            CrosstermKeyCode::Char(c) if modifiers.ctrl => KeyCode::Char(c.to_ascii_lowercase()),
            CrosstermKeyCode::Char(c) => KeyCode::Char(c),
            CrosstermKeyCode::Enter => KeyCode::Enter,
            CrosstermKeyCode::Backspace => KeyCode::Backspace,
            CrosstermKeyCode::Tab => KeyCode::Tab,
            CrosstermKeyCode::Up => KeyCode::Up,
            CrosstermKeyCode::Down => KeyCode::Down,
            CrosstermKeyCode::Left => KeyCode::Left,
            CrosstermKeyCode::Right => KeyCode::Right,
            CrosstermKeyCode::Esc => KeyCode::Esc,
            _ => KeyCode::Unknown,
        };

        Key { modifiers, code }
    }
}

/// 入力モード
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputMode {
    /// 文字入力でグリフを上書き
    #[default]
    Text,
    /// 16進数字でカーソル位置のセグメントを反転
    Segment,
}

impl InputMode {
    pub fn toggled(self) -> Self {
        match self {
            InputMode::Text => InputMode::Segment,
            InputMode::Segment => InputMode::Text,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            InputMode::Text => "TEXT",
            InputMode::Segment => "SEGMENT",
        }
    }
}

/// タブレット操作
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// 編集イベント
    Edit(EditEvent),
    /// 翻訳結果を保存
    SaveTranslation,
    /// パターンダンプを保存
    SavePatterns,
    /// 入力ファイルを再読み込み
    Reload,
    /// 入力モード切り替え
    ToggleMode,
    /// 終了
    Quit,
}

/// キーマップ
///
/// 固定バインドを先に引き、残りの文字入力はモードに応じて解釈する。
#[derive(Debug, Clone)]
pub struct TabletKeyMap {
    bindings: HashMap<Key, Action>,
}

impl TabletKeyMap {
    pub fn new() -> Self {
        let mut bindings = HashMap::with_capacity(16);

        // 移動系
        bindings.insert(Key::plain(KeyCode::Left), Action::Edit(EditEvent::MoveLeft));
        bindings.insert(Key::plain(KeyCode::Right), Action::Edit(EditEvent::MoveRight));
        bindings.insert(Key::plain(KeyCode::Up), Action::Edit(EditEvent::MoveUp));
        bindings.insert(Key::plain(KeyCode::Down), Action::Edit(EditEvent::MoveDown));

        // 編集系
        bindings.insert(Key::plain(KeyCode::Backspace), Action::Edit(EditEvent::Backspace));
        bindings.insert(Key::plain(KeyCode::Enter), Action::Edit(EditEvent::InsertLineBreak));
        bindings.insert(Key::plain(KeyCode::Tab), Action::ToggleMode);

        // ファイル操作
        bindings.insert(Key::ctrl('s'), Action::SaveTranslation);
        bindings.insert(Key::ctrl('p'), Action::SavePatterns);
        bindings.insert(Key::ctrl('r'), Action::Reload);

        // 終了
        bindings.insert(Key::ctrl('q'), Action::Quit);
        bindings.insert(Key::ctrl('c'), Action::Quit);
        bindings.insert(Key::plain(KeyCode::Esc), Action::Quit);

        Self { bindings }
    }

    /// キーを操作に変換（割り当てが無ければ `None`）
    pub fn lookup(&self, key: &Key, mode: InputMode) -> Option<Action> {
        if let Some(action) = self.bindings.get(key) {
            return Some(action.clone());
        }

        // Shift付き矢印なども移動として扱う
        if key.modifiers.shift && !key.modifiers.ctrl && !key.modifiers.alt {
            if let Some(action) = self.bindings.get(&Key::plain(key.code.clone())) {
                return Some(action.clone());
            }
        }

        let ch = key.printable_char()?;
        match mode {
            InputMode::Text => Some(Action::Edit(EditEvent::Type(ch))),
            InputMode::Segment => ch
                .to_digit(16)
                .map(|segment| Action::Edit(EditEvent::ToggleSegmentAtCursor(segment as usize))),
        }
    }

    /// crossterm のキーイベントを直接変換（リリースイベントは無視）
    pub fn process_key_event(&self, event: KeyEvent, mode: InputMode) -> Option<Action> {
        if event.kind == KeyEventKind::Release {
            return None;
        }
        self.lookup(&Key::from(event), mode)
    }
}

impl Default for TabletKeyMap {
    fn default() -> Self {
        Self::new()
    }
}
