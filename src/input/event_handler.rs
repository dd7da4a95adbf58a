//! イベントハンドリング
//!
//! キーボード・マウス入力やターミナルイベントの処理

use super::keybinding::{Action, InputMode, TabletKeyMap};
use crate::error::{Result, TabletError, UiError};
use crossterm::event::{self, Event, MouseButton, MouseEventKind};
use std::time::Duration;

/// 入力処理結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputResult {
    /// 操作に変換された
    Action(Action),
    /// 画面上のクリック（セル座標）
    Click { column: u16, row: u16 },
    /// 端末サイズ変更
    Resize { cols: u16, rows: u16 },
    /// 入力なし
    Timeout,
    /// 無視
    Ignored,
}

/// 入力ハンドラー
#[derive(Debug, Clone)]
pub struct InputHandler {
    /// キーマップ
    keymap: TabletKeyMap,
    /// 入力タイムアウト
    timeout: Duration,
}

impl InputHandler {
    /// 新しい入力ハンドラーを作成
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_millis(16))
    }

    /// タイムアウト付きで入力ハンドラーを作成
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            keymap: TabletKeyMap::new(),
            timeout,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// 入力イベントを待って処理
    pub fn handle_input(&self, mode: InputMode) -> Result<InputResult> {
        if !event::poll(self.timeout).map_err(input_error)? {
            return Ok(InputResult::Timeout);
        }
        let event = event::read().map_err(input_error)?;
        Ok(self.translate(event, mode))
    }

    /// ターミナルイベントを変換
    pub fn translate(&self, event: Event, mode: InputMode) -> InputResult {
        match event {
            Event::Key(key_event) => match self.keymap.process_key_event(key_event, mode) {
                Some(action) => InputResult::Action(action),
                None => {
                    log::debug!("unbound key: {:?}", key_event);
                    InputResult::Ignored
                }
            },
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::Down(MouseButton::Left) => InputResult::Click {
                    column: mouse.column,
                    row: mouse.row,
                },
                _ => InputResult::Ignored,
            },
            Event::Resize(cols, rows) => InputResult::Resize { cols, rows },
            Event::FocusGained | Event::FocusLost | Event::Paste(_) => InputResult::Ignored,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

fn input_error(err: std::io::Error) -> TabletError {
    TabletError::Ui(UiError::RenderingFailed {
        component: format!("input: {}", err),
    })
}
