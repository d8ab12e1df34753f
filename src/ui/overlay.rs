use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::config::Theme;
use crate::game::{DeathReason, GameStatus};
use crate::snapshot::Snapshot;

const POPUP_WIDTH: u16 = 30;
const POPUP_HEIGHT: u16 = 11;

/// Draws the end-of-game popup with final stats and the restart prompt.
pub fn render_end_overlay(frame: &mut Frame<'_>, area: Rect, snapshot: &Snapshot, theme: &Theme) {
    let popup = centered_popup(area, POPUP_WIDTH, POPUP_HEIGHT);
    frame.render_widget(Clear, popup);

    let title = match snapshot.status {
        GameStatus::Victory => "YOU WIN!",
        _ => "GAME OVER!",
    };
    let cause = match snapshot.death_reason {
        Some(DeathReason::WallCollision) => "Hit the wall",
        Some(DeathReason::SelfCollision) => "Bit yourself",
        None => "",
    };

    let title_style = Style::default()
        .fg(theme.overlay_title)
        .add_modifier(Modifier::BOLD);
    let lines = vec![
        Line::styled(title, title_style),
        Line::from(cause),
        Line::from(""),
        Line::from(format!("Final Score: {}", snapshot.score)),
        Line::from(format!("Level: {}", snapshot.level)),
        Line::from(format!("Length: {}", snapshot.length())),
        Line::from(""),
        Line::styled(
            "Press SPACE to restart",
            Style::default().fg(theme.overlay_hint),
        ),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().border_style(Style::default().fg(theme.border_fg))),
        popup,
    );
}

fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);

    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
