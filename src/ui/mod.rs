//! UIモジュール
//!
//! ratatuiベースのターミナルUI機能

pub mod glyph_view;
pub mod renderer;
pub mod theme;
pub mod viewport;

// 公開API
pub use glyph_view::{glyph_cells, glyph_rows, GlyphCell, GridGeometry};
pub use renderer::{RenderView, TabletRenderer};
pub use theme::{ColorScheme, ComponentType, Theme};
pub use viewport::ViewportManager;
