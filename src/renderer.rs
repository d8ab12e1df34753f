use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Block;

use crate::config::{CELL_WIDTH, GLYPH_CELL, GridSize, Theme};
use crate::snake::Position;
use crate::snapshot::Snapshot;
use crate::ui::hud::render_hud;
use crate::ui::overlay::render_end_overlay;

/// Renders the full game frame from one snapshot.
pub fn render(frame: &mut Frame<'_>, snapshot: &Snapshot, theme: &Theme) {
    let area = frame.area();
    let play_area = render_hud(frame, area, snapshot, theme);

    let block = Block::bordered()
        .border_style(Style::new().fg(theme.border_fg))
        .style(Style::new().bg(theme.play_bg));
    let inner = block.inner(play_area);
    frame.render_widget(block, play_area);

    render_food(frame, inner, snapshot, theme);
    render_snake(frame, inner, snapshot, theme);

    if !snapshot.running {
        render_end_overlay(frame, play_area, snapshot, theme);
    }
}

fn render_food(frame: &mut Frame<'_>, inner: Rect, snapshot: &Snapshot, theme: &Theme) {
    let Some((x, y)) = logical_to_terminal(inner, snapshot.bounds, snapshot.food) else {
        return;
    };

    let style = Style::new().fg(theme.food).bg(theme.play_bg);
    frame.buffer_mut().set_string(x, y, GLYPH_CELL, style);
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, snapshot: &Snapshot, theme: &Theme) {
    let head_style = Style::new().fg(theme.snake_head).bg(theme.play_bg);
    let body_style = Style::new().fg(theme.snake_body).bg(theme.play_bg);

    let buffer = frame.buffer_mut();
    for (index, segment) in snapshot.snake.iter().enumerate() {
        let Some((x, y)) = logical_to_terminal(inner, snapshot.bounds, *segment) else {
            continue;
        };

        let style = if index == 0 { head_style } else { body_style };
        buffer.set_string(x, y, GLYPH_CELL, style);
    }
}

fn logical_to_terminal(inner: Rect, bounds: GridSize, position: Position) -> Option<(u16, u16)> {
    if !position.is_within_bounds(bounds) {
        return None;
    }

    let x_offset = u16::try_from(position.x).ok()?.checked_mul(CELL_WIDTH)?;
    let y_offset = u16::try_from(position.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x.saturating_add(CELL_WIDTH) > inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
