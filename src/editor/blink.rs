//! カーソル点滅
//!
//! 表示フラグのみを反転する周期タイマー。ドキュメントやカーソルには触れない

use std::time::{Duration, Instant};

/// カーソル点滅状態
#[derive(Debug, Clone)]
pub struct CursorBlink {
    visible: bool,
    interval: Duration,
    last_toggle: Instant,
}

impl CursorBlink {
    pub fn new(interval: Duration) -> Self {
        Self {
            visible: true,
            interval,
            last_toggle: Instant::now(),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// 周期が経過していれば表示を反転し、反転したかを返す
    pub fn tick(&mut self, now: Instant) -> bool {
        if now.saturating_duration_since(self.last_toggle) < self.interval {
            return false;
        }
        self.visible = !self.visible;
        self.last_toggle = now;
        true
    }

    /// 入力直後はカーソルを表示状態に戻す
    pub fn reset(&mut self, now: Instant) {
        self.visible = true;
        self.last_toggle = now;
    }

    /// 次の反転までの残り時間
    pub fn time_until_toggle(&self, now: Instant) -> Duration {
        self.interval
            .saturating_sub(now.saturating_duration_since(self.last_toggle))
    }
}

impl Default for CursorBlink {
    fn default() -> Self {
        Self::new(Duration::from_millis(500))
    }
}
