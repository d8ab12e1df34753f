use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::config::{CELL_WIDTH, Theme};
use crate::snapshot::Snapshot;

/// Renders the status line under the board and returns the bordered board area.
///
/// The board is anchored top-left and sized to the grid; the status row
/// spans the full width below it.
#[must_use]
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, snapshot: &Snapshot, theme: &Theme) -> Rect {
    let board_width = snapshot
        .bounds
        .width
        .saturating_mul(CELL_WIDTH)
        .saturating_add(2);
    let board_height = snapshot.bounds.height.saturating_add(2);

    let [board_row, status_area, _] = Layout::vertical([
        Constraint::Length(board_height),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .areas(area);
    let [play_area, _] =
        Layout::horizontal([Constraint::Length(board_width), Constraint::Min(0)]).areas(board_row);

    frame.render_widget(
        Paragraph::new(status_line(snapshot, theme)).style(Style::default().fg(theme.hud_text)),
        status_area,
    );

    play_area
}

/// `Score: S | Level: L | Length: N`
fn status_line(snapshot: &Snapshot, theme: &Theme) -> Line<'static> {
    let value_style = Style::default()
        .fg(theme.hud_text)
        .add_modifier(Modifier::BOLD);

    Line::from(vec![
        Span::raw("Score: "),
        Span::styled(snapshot.score.to_string(), value_style),
        Span::raw("  |  Level: "),
        Span::styled(snapshot.level.to_string(), value_style),
        Span::raw("  |  Length: "),
        Span::styled(snapshot.length().to_string(), value_style),
    ])
}
