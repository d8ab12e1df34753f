use ratatui::style::Color;

/// Logical grid dimensions passed through the game as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }
}

/// Default board size in cells.
pub const DEFAULT_GRID: GridSize = GridSize {
    width: 16,
    height: 15,
};

/// Segment count of a freshly started snake.
pub const START_LENGTH: usize = 4;

/// Points granted per food eaten.
pub const POINTS_PER_FOOD: u32 = 10;

/// Foods needed per level increase.
pub const FOODS_PER_LEVEL: u32 = 5;

/// Base tick delay in milliseconds before the level penalty.
pub const BASE_TICK_INTERVAL_MS: u64 = 200;

/// Tick delay never drops below this.
pub const MIN_TICK_INTERVAL_MS: u64 = 80;

/// Milliseconds shaved off the tick delay per level.
pub const TICK_STEP_PER_LEVEL_MS: u64 = 10;

/// How long the UI thread waits for a key before redrawing.
pub const INPUT_POLL_INTERVAL_MS: u64 = 16;

/// Terminal columns used to draw one grid cell, so cells look square.
pub const CELL_WIDTH: u16 = 2;

/// Solid glyph for one grid cell.
pub const GLYPH_CELL: &str = "██";

/// Colors applied to all visual elements.
#[derive(Debug)]
pub struct Theme {
    pub snake_head: Color,
    pub snake_body: Color,
    pub food: Color,
    pub play_bg: Color,
    pub border_fg: Color,
    pub hud_text: Color,
    pub overlay_title: Color,
    pub overlay_hint: Color,
}

/// Green snake, red food on black.
pub const THEME_CLASSIC: Theme = Theme {
    snake_head: Color::Green,
    snake_body: Color::Rgb(50, 150, 50),
    food: Color::Red,
    play_bg: Color::Black,
    border_fg: Color::DarkGray,
    hud_text: Color::White,
    overlay_title: Color::White,
    overlay_hint: Color::Gray,
};
