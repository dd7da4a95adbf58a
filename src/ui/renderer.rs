//! タブレット描画
//!
//! グリフグリッド、翻訳ペイン、ステータスラインを描画する

use crate::buffer::{CharacterSlot, Cursor, Document, RowLayout};
use crate::error::ErrorDisplay;
use crate::glyph::GlyphCodec;
use crate::input::InputMode;
use crate::translate::Translator;
use crate::ui::glyph_view::{
    glyph_cells, GridGeometry, GLYPH_CELL_HEIGHT, GLYPH_CELL_WIDTH, LINE_BREAK_SYMBOL,
};
use crate::ui::theme::{ComponentType, Theme};
use crate::ui::viewport::ViewportManager;
use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use std::io;

/// 翻訳ペインで文字を置く行（グリフ行内のオフセット）
const TRANSLATION_ROW_OFFSET: u16 = 2;

/// 描画に必要な状態のスナップショット
#[derive(Debug, Clone, Copy)]
pub struct RenderView<'a> {
    pub document: &'a Document,
    pub codec: &'a GlyphCodec,
    pub cursor: Cursor,
    pub layout: RowLayout,
    pub blink_visible: bool,
    pub mode: InputMode,
    pub file_label: &'a str,
    pub message: Option<&'a ErrorDisplay>,
}

/// タブレットレンダラー
#[derive(Debug, Clone, Default)]
pub struct TabletRenderer {
    theme: Theme,
    viewport: ViewportManager,
    geometry: Option<GridGeometry>,
}

impl TabletRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn viewport(&self) -> &ViewportManager {
        &self.viewport
    }

    /// ターミナルに1フレーム描画
    pub fn render<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        view: &RenderView<'_>,
    ) -> io::Result<()> {
        terminal.draw(|frame| self.draw(frame, view))?;
        Ok(())
    }

    /// フレーム描画
    pub fn draw(&mut self, frame: &mut Frame<'_>, view: &RenderView<'_>) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(GLYPH_CELL_HEIGHT),
                Constraint::Length(1),
            ])
            .split(frame.area());

        self.render_title(frame, chunks[0]);

        let grid_width = grid_block_width(view.layout.width());
        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(grid_width), Constraint::Min(10)])
            .split(chunks[1]);

        let grid_block = Block::default()
            .borders(Borders::ALL)
            .title("Yautja")
            .border_style(self.theme.style(ComponentType::Title));
        let grid_area = grid_block.inner(body[0]);
        frame.render_widget(grid_block, body[0]);

        let translation_block = Block::default()
            .borders(Borders::ALL)
            .title("Translated ASCII")
            .border_style(self.theme.style(ComponentType::Translation));
        let translation_area = translation_block.inner(body[1]);
        frame.render_widget(translation_block, body[1]);

        let geometry = self.update_viewport(grid_area, view);
        self.geometry = Some(geometry);

        let buffer = frame.buffer_mut();
        self.render_glyphs(buffer, &geometry, view);
        self.render_translation(buffer, translation_area, &geometry, view);

        self.render_status_line(frame, chunks[2], view);
    }

    /// カーソル行が見えるようスクロール位置を決める
    fn update_viewport(&mut self, grid_area: Rect, view: &RenderView<'_>) -> GridGeometry {
        let sizing = GridGeometry::new(grid_area, 0, view.layout.width());
        self.viewport.set_height(sizing.visible_rows());
        self.viewport.clamp_to(view.layout.row_count(view.document.len()));
        let (cursor_row, _) = view.layout.row_col(view.cursor.position());
        if self.viewport.ensure_visible(cursor_row) {
            log::debug!("viewport scrolled to row {}", self.viewport.top_row());
        }
        GridGeometry::new(grid_area, self.viewport.top_row(), view.layout.width())
    }

    fn visible_indices(geometry: &GridGeometry, len: usize) -> std::ops::Range<usize> {
        let start = (geometry.top_row * geometry.chars_per_row).min(len);
        let end = ((geometry.top_row + geometry.visible_rows()) * geometry.chars_per_row).min(len);
        start..end
    }

    fn render_glyphs(&self, buffer: &mut Buffer, geometry: &GridGeometry, view: &RenderView<'_>) {
        for index in Self::visible_indices(geometry, view.document.len()) {
            let Some((x, y)) = geometry.cell_origin(index) else {
                continue;
            };
            let is_cursor = index == view.cursor.position();

            match view.document.get(index) {
                Some(CharacterSlot::Glyph(glyph)) => {
                    for (row, cells) in glyph_cells(&glyph.pattern).iter().enumerate() {
                        for (col, cell) in cells.iter().enumerate() {
                            let component = match (cell.segment, cell.lit) {
                                (_, false) => ComponentType::SegmentOff,
                                (Some(_), true) => ComponentType::SegmentOn,
                                (None, true) => ComponentType::Hub,
                            };
                            let symbol = if cell.segment.is_none() && !cell.lit {
                                '·'
                            } else {
                                cell.symbol
                            };
                            let mut style = self.theme.style(component);
                            if is_cursor {
                                style = style.bg(self.cursor_background());
                            }
                            put_char(buffer, x + col as u16, y + row as u16, symbol, style);
                        }
                    }
                }
                Some(CharacterSlot::LineBreak) => {
                    let mut style = self.theme.style(ComponentType::LineBreak);
                    if is_cursor {
                        style = style.bg(self.cursor_background());
                    }
                    put_char(buffer, x + 1, y + TRANSLATION_ROW_OFFSET, LINE_BREAK_SYMBOL, style);
                }
                None => {}
            }
        }
    }

    fn cursor_background(&self) -> ratatui::style::Color {
        self.theme
            .style(ComponentType::CursorGlyph)
            .bg
            .unwrap_or(ratatui::style::Color::Reset)
    }

    fn render_translation(
        &self,
        buffer: &mut Buffer,
        area: Rect,
        geometry: &GridGeometry,
        view: &RenderView<'_>,
    ) {
        let translator = Translator::new(view.codec);
        let caret_style = self.theme.style(ComponentType::Caret);

        for index in Self::visible_indices(geometry, view.document.len()) {
            let (row, col) = view.layout.row_col(index);
            if col as u16 >= area.width {
                continue;
            }
            let x = area.x + col as u16;
            let y = area.y
                + (row - geometry.top_row) as u16 * GLYPH_CELL_HEIGHT
                + TRANSLATION_ROW_OFFSET;
            if y >= area.y + area.height {
                continue;
            }

            let Some(slot) = view.document.get(index) else {
                continue;
            };
            let (symbol, mut style) = match translator.translate_slot(slot) {
                '\n' => (LINE_BREAK_SYMBOL, self.theme.style(ComponentType::LineBreak)),
                '?' => ('?', self.theme.style(ComponentType::Unknown)),
                ch => (ch, self.theme.style(ComponentType::Translation)),
            };
            if index == view.cursor.position() && view.blink_visible {
                style = caret_style;
            }
            put_char(buffer, x, y, symbol, style);
        }

        // 空ドキュメントでも挿入位置を示す
        if view.document.is_empty()
            && view.blink_visible
            && area.width > 0
            && area.height > TRANSLATION_ROW_OFFSET
        {
            put_char(buffer, area.x, area.y + TRANSLATION_ROW_OFFSET, ' ', caret_style);
        }
    }

    fn render_title(&self, frame: &mut Frame<'_>, area: Rect) {
        let title = Paragraph::new(Line::from(vec![
            Span::styled(" Yautja tablet ", self.theme.style(ComponentType::Title)),
            Span::raw(" Tab: mode  Enter: break  C-s: save  C-p: patterns  C-r: reload  C-q: quit"),
        ]));
        frame.render_widget(title, area);
    }

    fn render_status_line(&self, frame: &mut Frame<'_>, area: Rect, view: &RenderView<'_>) {
        let status_style = self.theme.style(ComponentType::StatusLine);
        let (row, col) = view.layout.row_col(view.cursor.position());
        let unknown = Translator::new(view.codec).unknown_slots(view.document).len();

        let mut spans = vec![Span::styled(
            format!(
                " {}  Slot: {}/{}  Row: {}, Col: {}  Unknown: {}  {} ",
                view.mode.label(),
                if view.document.is_empty() { 0 } else { view.cursor.position() + 1 },
                view.document.len(),
                row + 1,
                col + 1,
                unknown,
                view.file_label,
            ),
            status_style,
        )];

        if let Some(message) = view.message.filter(|message| !message.is_expired()) {
            spans.push(Span::styled(
                format!(" {} ", message.message),
                self.theme.message_style(message.level),
            ));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)).style(status_style), area);
    }

    /// 直前の描画結果に基づくクリック位置の解決
    pub fn hit_test(&self, column: u16, row: u16, len: usize) -> Option<(usize, usize)> {
        self.geometry
            .as_ref()
            .and_then(|geometry| geometry.hit_test(column, row, len))
    }
}

/// グリッド枠の幅（左右の枠線を含む）
fn grid_block_width(chars_per_row: usize) -> u16 {
    u16::try_from(chars_per_row)
        .unwrap_or(u16::MAX)
        .saturating_mul(GLYPH_CELL_WIDTH)
        .saturating_add(2)
}

fn put_char(buffer: &mut Buffer, x: u16, y: u16, symbol: char, style: Style) {
    if let Some(cell) = buffer.cell_mut((x, y)) {
        cell.set_char(symbol).set_style(style);
    }
}
