//! テーマ
//!
//! タブレット表示のカラー設定

use crate::error::ErrorLevel;
use ratatui::style::{Color, Modifier, Style};
use std::collections::HashMap;

/// UIコンポーネントの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentType {
    /// 点灯セグメント
    SegmentOn,
    /// 消灯セグメント
    SegmentOff,
    /// 星の中心
    Hub,
    /// 改行スロット
    LineBreak,
    /// カーソル位置のグリフ枠
    CursorGlyph,
    /// 翻訳文字
    Translation,
    /// 翻訳できない文字
    Unknown,
    /// 点滅キャレット
    Caret,
    /// ステータスライン
    StatusLine,
    /// 見出し
    Title,
    /// 情報メッセージ
    Info,
    /// 警告メッセージ
    Warning,
    /// エラーメッセージ
    Error,
}

/// カラー設定
#[derive(Debug, Clone)]
pub struct ColorScheme {
    /// 前景色
    pub foreground: Color,
    /// 背景色
    pub background: Color,
    /// 修飾子（太字、下線など）
    pub modifiers: Modifier,
}

impl ColorScheme {
    pub fn new(foreground: Color, background: Color) -> Self {
        Self {
            foreground,
            background,
            modifiers: Modifier::empty(),
        }
    }

    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifiers = modifier;
        self
    }

    pub fn to_style(&self) -> Style {
        Style::default()
            .fg(self.foreground)
            .bg(self.background)
            .add_modifier(self.modifiers)
    }
}

/// テーマ設定
#[derive(Debug, Clone)]
pub struct Theme {
    /// コンポーネント別のカラー設定
    pub colors: HashMap<ComponentType, ColorScheme>,
}

impl Theme {
    /// 黒地に赤いグリフの既定テーマ
    pub fn tablet() -> Self {
        let mut colors = HashMap::new();
        let bg = Color::Black;

        colors.insert(
            ComponentType::SegmentOn,
            ColorScheme::new(Color::Red, bg).with_modifier(Modifier::BOLD),
        );
        colors.insert(ComponentType::SegmentOff, ColorScheme::new(Color::DarkGray, bg));
        colors.insert(ComponentType::Hub, ColorScheme::new(Color::Red, bg));
        colors.insert(ComponentType::LineBreak, ColorScheme::new(Color::Gray, bg));
        colors.insert(
            ComponentType::CursorGlyph,
            ColorScheme::new(Color::Red, Color::Rgb(40, 0, 0)),
        );
        colors.insert(ComponentType::Translation, ColorScheme::new(Color::Cyan, bg));
        colors.insert(ComponentType::Unknown, ColorScheme::new(Color::Yellow, bg));
        colors.insert(ComponentType::Caret, ColorScheme::new(Color::Black, Color::Cyan));
        colors.insert(ComponentType::StatusLine, ColorScheme::new(Color::White, Color::DarkGray));
        colors.insert(
            ComponentType::Title,
            ColorScheme::new(Color::Red, bg).with_modifier(Modifier::BOLD),
        );
        colors.insert(ComponentType::Info, ColorScheme::new(Color::Green, Color::DarkGray));
        colors.insert(ComponentType::Warning, ColorScheme::new(Color::Yellow, Color::DarkGray));
        colors.insert(
            ComponentType::Error,
            ColorScheme::new(Color::LightRed, Color::DarkGray).with_modifier(Modifier::BOLD),
        );

        Self { colors }
    }

    /// 特定のコンポーネントのスタイルを取得
    pub fn style(&self, component: ComponentType) -> Style {
        self.colors
            .get(&component)
            .map(|cs| cs.to_style())
            .unwrap_or_else(|| Style::default().fg(Color::White).bg(Color::Black))
    }

    /// カラー設定を差し替え
    pub fn set_color(&mut self, component: ComponentType, color_scheme: ColorScheme) {
        self.colors.insert(component, color_scheme);
    }

    /// メッセージレベルに応じたスタイル
    pub fn message_style(&self, level: ErrorLevel) -> Style {
        match level {
            ErrorLevel::Info => self.style(ComponentType::Info),
            ErrorLevel::Warning => self.style(ComponentType::Warning),
            ErrorLevel::Error | ErrorLevel::Fatal => self.style(ComponentType::Error),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::tablet()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_styles_differ() {
        let theme = Theme::tablet();
        assert_eq!(theme.style(ComponentType::SegmentOn).fg, Some(Color::Red));
        assert_eq!(theme.style(ComponentType::SegmentOff).fg, Some(Color::DarkGray));
    }

    #[test]
    fn test_custom_color() {
        let mut theme = Theme::tablet();
        theme.set_color(ComponentType::SegmentOn, ColorScheme::new(Color::Green, Color::Black));
        assert_eq!(theme.style(ComponentType::SegmentOn).fg, Some(Color::Green));
        assert_eq!(
            theme.message_style(ErrorLevel::Fatal),
            theme.style(ComponentType::Error)
        );
    }
}
