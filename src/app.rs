//! メインアプリケーション構造体
//!
//! 編集エンジン、ファイル入出力、表示状態を束ねたタブレットのセッション

use crate::buffer::RowLayout;
use crate::config::TabletConfig;
use crate::editor::{CursorBlink, EditEngine, EditEvent, EditOutcome};
use crate::error::{ErrorDisplay, Result, TabletError};
use crate::file::{TabletStorage, TextSource};
use crate::glyph::GlyphCodec;
use crate::input::{Action, InputMode};
use crate::ui::RenderView;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

const FALLBACK_LABEL: &str = "(built-in)";

/// タブレットのセッション
///
/// 端末に依存しない状態遷移のみを持ち、描画とイベント取得はフロントエンドが行う。
#[derive(Debug)]
pub struct Tablet {
    config: TabletConfig,
    engine: EditEngine,
    blink: CursorBlink,
    mode: InputMode,
    storage: TabletStorage,
    /// 現在のテキストの読み込み元
    source: TextSource,
    file_label: String,
    message: Option<ErrorDisplay>,
    running: bool,
}

impl Tablet {
    /// 空のドキュメントで作成
    pub fn new(config: TabletConfig, codec: Arc<GlyphCodec>) -> Self {
        let layout = RowLayout::new(config.chars_per_row);
        let blink = CursorBlink::new(config.blink_interval());
        Self {
            engine: EditEngine::new(codec, layout),
            blink,
            mode: InputMode::Text,
            storage: TabletStorage::new(),
            source: TextSource::Fallback,
            file_label: FALLBACK_LABEL.to_string(),
            message: None,
            running: true,
            config,
        }
    }

    /// 起動時の読み込みを行って作成
    ///
    /// 指定ファイル、既定入力ファイル、既定テキストの順に試す。
    pub fn start(config: TabletConfig, explicit: Option<&Path>) -> Result<Self> {
        let mut tablet = Self::new(config, Arc::new(GlyphCodec::standard()));
        let (text, source) = tablet.storage.startup_text(
            explicit,
            &tablet.config.default_input,
            &tablet.config.fallback_text,
        )?;
        tablet.engine.load_text(&text);
        tablet.set_source(source);
        Ok(tablet)
    }

    fn set_source(&mut self, source: TextSource) {
        self.file_label = match &source {
            TextSource::File(path) | TextSource::Patterns(path) => path.display().to_string(),
            TextSource::Fallback => FALLBACK_LABEL.to_string(),
        };
        self.source = source;
    }

    /// テキストファイルを読み込む
    ///
    /// 失敗した場合はドキュメントとカーソルを変更しない。
    pub fn load_file(&mut self, path: &Path) -> Result<()> {
        let text = self.storage.load_text(path)?;
        self.engine.load_text(&text);
        self.set_source(TextSource::File(path.to_path_buf()));
        self.blink.reset(Instant::now());
        Ok(())
    }

    /// パターンダンプを読み込む
    pub fn load_patterns(&mut self, path: &Path) -> Result<()> {
        let document = self.storage.load_patterns(path)?;
        self.engine.load_document(document);
        self.set_source(TextSource::Patterns(path.to_path_buf()));
        self.blink.reset(Instant::now());
        Ok(())
    }

    /// 読み込み元から再読み込み
    pub fn reload(&mut self) -> Result<()> {
        match self.source.clone() {
            TextSource::File(path) => self.load_file(&path),
            TextSource::Patterns(path) => self.load_patterns(&path),
            TextSource::Fallback => {
                let text = self.config.fallback_text.clone();
                self.engine.load_text(&text);
                Ok(())
            }
        }
    }

    /// 翻訳結果を保存
    pub fn save_translation(&self) -> Result<PathBuf> {
        let path = self.config.translation_path.clone();
        self.storage
            .save_translation(self.engine.document(), self.engine.codec(), &path)?;
        Ok(path)
    }

    /// パターンダンプを保存
    pub fn save_patterns(&self) -> Result<PathBuf> {
        let path = self.config.patterns_path.clone();
        self.storage.save_patterns(self.engine.document(), &path)?;
        Ok(path)
    }

    /// 編集イベントを適用し、拒否された場合はメッセージを出す
    pub fn apply_edit(&mut self, event: EditEvent, now: Instant) -> EditOutcome {
        let outcome = self.engine.apply(event);
        match &outcome {
            EditOutcome::Rejected(err) => {
                self.message = Some(ErrorDisplay::new(&TabletError::Document(err.clone())));
            }
            outcome if outcome.needs_redraw() => self.blink.reset(now),
            _ => {}
        }
        outcome
    }

    /// 操作を実行
    pub fn handle_action(&mut self, action: Action, now: Instant) {
        match action {
            Action::Edit(event) => {
                self.apply_edit(event, now);
            }
            Action::SaveTranslation => {
                let result = self.save_translation();
                self.report(
                    result.map(|path| format!("翻訳を保存しました: {}", path.display())),
                );
            }
            Action::SavePatterns => {
                let result = self.save_patterns();
                self.report(
                    result.map(|path| format!("パターンを保存しました: {}", path.display())),
                );
            }
            Action::Reload => {
                let result = self.reload();
                let label = self.file_label.clone();
                self.report(result.map(|()| format!("再読み込みしました: {}", label)));
            }
            Action::ToggleMode => {
                self.mode = self.mode.toggled();
                log::debug!("input mode: {}", self.mode.label());
            }
            Action::Quit => {
                log::info!("quit requested");
                self.running = false;
            }
        }
    }

    /// クリックされたセグメントを反転
    pub fn handle_click(&mut self, slot: usize, segment: usize, now: Instant) -> EditOutcome {
        self.apply_edit(EditEvent::ToggleSegment { slot, segment }, now)
    }

    fn report(&mut self, result: Result<String>) {
        self.message = Some(match result {
            Ok(message) => {
                log::info!("{}", message);
                ErrorDisplay::info(message)
            }
            Err(err) => {
                log::warn!("operation failed: {}", err);
                ErrorDisplay::new(&err)
            }
        });
    }

    /// 周期処理（点滅と期限切れメッセージの破棄）。再描画が必要なら true
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut dirty = self.blink.tick(now);
        if self.message.as_ref().is_some_and(|message| message.is_expired()) {
            self.message = None;
            dirty = true;
        }
        dirty
    }

    /// 描画用スナップショット
    pub fn render_view(&self) -> RenderView<'_> {
        RenderView {
            document: self.engine.document(),
            codec: self.engine.codec(),
            cursor: self.engine.cursor(),
            layout: self.engine.layout(),
            blink_visible: self.blink.is_visible(),
            mode: self.mode,
            file_label: &self.file_label,
            message: self.message.as_ref(),
        }
    }

    pub fn engine(&self) -> &EditEngine {
        &self.engine
    }

    pub fn config(&self) -> &TabletConfig {
        &self.config
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    pub fn source(&self) -> &TextSource {
        &self.source
    }

    pub fn message(&self) -> Option<&ErrorDisplay> {
        self.message.as_ref()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}
