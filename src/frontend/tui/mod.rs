//! ターミナルフロントエンド
//!
//! crossterm のイベントを読み、タブレットに渡して ratatui で描画する

use crate::app::Tablet;
use crate::error::{Result, TabletError, UiError};
use crate::input::{InputHandler, InputResult};
use crate::ui::TabletRenderer;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::stdout;
use std::time::{Duration, Instant};

pub struct TuiApplication {
    tablet: Tablet,
    renderer: TabletRenderer,
    input: InputHandler,
}

impl TuiApplication {
    pub fn new(tablet: Tablet) -> Self {
        Self {
            tablet,
            renderer: TabletRenderer::new(),
            input: InputHandler::with_timeout(Duration::from_millis(16)),
        }
    }

    pub fn tablet(&self) -> &Tablet {
        &self.tablet
    }

    pub fn run(&mut self) -> Result<()> {
        enter_terminal()?;

        let backend = CrosstermBackend::new(stdout());
        let mut terminal =
            Terminal::new(backend).map_err(|err| terminal_error("terminal init", err))?;
        terminal.hide_cursor().map_err(|err| terminal_error("hide cursor", err))?;

        let loop_result = self.event_loop(&mut terminal);
        let show_cursor_result = terminal
            .show_cursor()
            .map_err(|err| terminal_error("show cursor", err));
        drop(terminal);
        let cleanup_result = leave_terminal();

        loop_result.and(show_cursor_result).and(cleanup_result)
    }

    fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<()> {
        let mut dirty = true;

        while self.tablet.is_running() {
            dirty |= self.tablet.tick(Instant::now());
            if dirty {
                self.render(terminal)?;
                dirty = false;
            }

            match self.input.handle_input(self.tablet.mode())? {
                InputResult::Action(action) => {
                    self.tablet.handle_action(action, Instant::now());
                    dirty = true;
                }
                InputResult::Click { column, row } => {
                    let len = self.tablet.engine().document().len();
                    if let Some((slot, segment)) = self.renderer.hit_test(column, row, len) {
                        self.tablet.handle_click(slot, segment, Instant::now());
                        dirty = true;
                    }
                }
                InputResult::Resize { .. } => dirty = true,
                InputResult::Timeout | InputResult::Ignored => {}
            }
        }

        Ok(())
    }

    fn render<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        let view = self.tablet.render_view();
        self.renderer
            .render(terminal, &view)
            .map_err(|err| terminal_error("render", err))
    }
}

fn enter_terminal() -> Result<()> {
    enable_raw_mode().map_err(|_| TabletError::Ui(UiError::TerminalInit))?;
    let mut out = stdout();
    execute!(out, EnterAlternateScreen, EnableMouseCapture)
        .map_err(|err| terminal_error("enter alternate screen", err))?;
    Ok(())
}

fn leave_terminal() -> Result<()> {
    let mut out = stdout();
    execute!(out, DisableMouseCapture, LeaveAlternateScreen)
        .map_err(|err| terminal_error("leave alternate screen", err))?;
    disable_raw_mode().map_err(|err| terminal_error("disable raw mode", err))?;
    Ok(())
}

fn terminal_error(context: &str, err: impl std::fmt::Display) -> TabletError {
    TabletError::Ui(UiError::RenderingFailed {
        component: format!("{}: {}", context, err),
    })
}
