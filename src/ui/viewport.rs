//! ビューポート管理
//!
//! 画面に表示するグリフ行のスクロール位置を管理する。

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportManager {
    /// 表示の開始行
    top_row: usize,
    /// 表示可能な行数
    height: usize,
}

impl ViewportManager {
    pub fn new(height: usize) -> Self {
        Self {
            top_row: 0,
            height: height.max(1),
        }
    }

    /// 表示可能な行数を更新
    pub fn set_height(&mut self, height: usize) {
        self.height = height.max(1);
    }

    /// カーソル行が画面内に収まるようスクロールする
    ///
    /// 戻り値はスクロールが発生したかどうか
    pub fn ensure_visible(&mut self, cursor_row: usize) -> bool {
        if cursor_row < self.top_row {
            self.top_row = cursor_row;
            true
        } else if cursor_row >= self.top_row + self.height {
            self.top_row = cursor_row + 1 - self.height;
            true
        } else {
            false
        }
    }

    /// ドキュメントが縮んだ場合に開始行を戻す
    pub fn clamp_to(&mut self, row_count: usize) {
        let max_top = row_count.saturating_sub(self.height);
        self.top_row = self.top_row.min(max_top);
    }

    /// 現在の表示開始行を取得
    pub fn top_row(&self) -> usize {
        self.top_row
    }

    /// 表示領域の高さを取得
    pub fn height(&self) -> usize {
        self.height
    }

    /// 行が表示範囲内か
    pub fn is_visible(&self, row: usize) -> bool {
        row >= self.top_row && row < self.top_row + self.height
    }
}

impl Default for ViewportManager {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_visible_scrolls_up() {
        let mut viewport = ViewportManager::new(3);
        viewport.ensure_visible(5);
        assert_eq!(viewport.top_row(), 3);

        assert!(viewport.ensure_visible(1));
        assert_eq!(viewport.top_row(), 1);
    }

    #[test]
    fn test_ensure_visible_scrolls_down() {
        let mut viewport = ViewportManager::new(4);
        assert!(!viewport.ensure_visible(3));
        assert!(viewport.ensure_visible(10));
        assert!(viewport.is_visible(10));
        assert!(!viewport.is_visible(6));
    }

    #[test]
    fn test_clamp_after_shrink() {
        let mut viewport = ViewportManager::new(2);
        viewport.ensure_visible(9);
        viewport.clamp_to(3);
        assert_eq!(viewport.top_row(), 1);
    }
}
