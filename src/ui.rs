//! Layout and drawing: menu, board, sidebar, pause and game-over overlays,
//! high-score table.

use crate::app::{MenuItem, MenuState, Screen};
use crate::round::{RoundSnapshot, RoundState};
use crate::score::{self, HighScore};
use crate::selector::GridGeometry;
use crate::theme::Theme;
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

/// Cell footprint in terminal cells: wide enough for a bordered digit.
pub const CELL_WIDTH: u16 = 7;
pub const CELL_HEIGHT: u16 = 3;
const SIDEBAR_WIDTH: u16 = 22;

/// Seconds left at which the timer turns to the warning colour.
const TIMER_WARN_SECS: u64 = 10;

/// Where the board lands for this frame: centred, with room for the sidebar
/// on the right. Shared by drawing and mouse mapping so both agree.
pub fn grid_geometry(area: Rect, size: u16) -> GridGeometry {
    let panel_w = size * CELL_WIDTH;
    let panel_h = size * CELL_HEIGHT;
    let total_w = panel_w + SIDEBAR_WIDTH;
    GridGeometry {
        origin_x: area.x + area.width.saturating_sub(total_w) / 2,
        origin_y: area.y + area.height.saturating_sub(panel_h) / 2,
        cell_width: CELL_WIDTH,
        cell_height: CELL_HEIGHT,
        size,
    }
}

/// Draw the current screen. Returns the board geometry so the event loop can
/// map mouse positions to grid indices (zeroed outside of play).
pub fn draw(
    f: &mut Frame,
    screen: Screen,
    round: Option<&RoundSnapshot>,
    menu: &MenuState,
    scores: &[HighScore],
    theme: &Theme,
) -> GridGeometry {
    let area = f.area();
    f.render_widget(
        Block::default().style(Style::default().bg(theme.bg)),
        area,
    );
    match screen {
        Screen::Menu => {
            draw_menu(f, menu, theme, area);
            GridGeometry::default()
        }
        Screen::Scores => {
            draw_scores(f, scores, theme, area);
            GridGeometry::default()
        }
        Screen::Playing => match round {
            Some(snapshot) => draw_game(f, snapshot, theme, area),
            None => GridGeometry::default(),
        },
    }
}

fn draw_menu(f: &mut Frame, menu: &MenuState, theme: &Theme, area: Rect) {
    let mut lines = vec![
        Line::styled(
            "N U M L I N K",
            Style::default()
                .fg(theme.title)
                .add_modifier(Modifier::BOLD),
        ),
        Line::raw(""),
        Line::styled(
            "link numbers, beat the clock",
            Style::default().fg(theme.main_fg),
        ),
        Line::raw(""),
    ];
    for (i, item) in MenuItem::ALL.iter().enumerate() {
        let label = match item {
            MenuItem::Play => "Play",
            MenuItem::Scores => "High scores",
            MenuItem::Quit => "Quit",
        };
        let line = if i == menu.selected {
            Line::styled(
                format!("> {label} <"),
                Style::default()
                    .fg(theme.selected_border)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Line::styled(label.to_string(), Style::default().fg(theme.main_fg))
        };
        lines.push(line);
    }
    lines.push(Line::raw(""));
    lines.push(Line::styled(
        "up/down move · enter select · q quit",
        Style::default().fg(theme.main_fg).add_modifier(Modifier::DIM),
    ));

    let rect = centered_rect(area, 44, lines.len() as u16);
    f.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        rect,
    );
}

fn draw_game(f: &mut Frame, snapshot: &RoundSnapshot, theme: &Theme, area: Rect) -> GridGeometry {
    let size = snapshot.size as u16;
    let geometry = grid_geometry(area, size);

    for (i, slot) in snapshot.cells.iter().enumerate() {
        let Some(cell) = slot else { continue };
        let col = (i as u16) % size;
        let row = (i as u16) / size;
        let rect = Rect {
            x: geometry.origin_x + col * CELL_WIDTH,
            y: geometry.origin_y + row * CELL_HEIGHT,
            width: CELL_WIDTH,
            height: CELL_HEIGHT,
        }
        .intersection(area);
        if rect.width < 3 || rect.height < 3 {
            continue;
        }
        let (border, bg) = if cell.selected {
            (theme.selected_border, theme.selected_bg)
        } else {
            (theme.cell_border, theme.cell_bg)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .style(Style::default().bg(bg));
        let value = Paragraph::new(cell.value.to_string())
            .alignment(Alignment::Center)
            .style(
                Style::default()
                    .fg(theme.main_fg)
                    .add_modifier(Modifier::BOLD),
            )
            .block(block);
        f.render_widget(value, rect);
    }

    draw_sidebar(f, snapshot, theme, area, &geometry);

    match snapshot.state {
        RoundState::Running => {}
        RoundState::Paused => draw_banner(f, "Paused", theme, area, &geometry, size),
        RoundState::Finished => draw_banner(f, "Game over", theme, area, &geometry, size),
    }
    geometry
}

fn draw_sidebar(
    f: &mut Frame,
    snapshot: &RoundSnapshot,
    theme: &Theme,
    area: Rect,
    geometry: &GridGeometry,
) {
    let rect = Rect {
        x: geometry.origin_x + geometry.size * CELL_WIDTH + 2,
        y: geometry.origin_y,
        width: SIDEBAR_WIDTH.saturating_sub(2),
        height: geometry.size * CELL_HEIGHT,
    }
    .intersection(area);
    if rect.width == 0 || rect.height == 0 {
        return;
    }

    let timer_style = if snapshot.remaining_secs < TIMER_WARN_SECS {
        Style::default().fg(theme.warn).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.main_fg)
    };
    let help = match snapshot.state {
        RoundState::Running => "p pause · esc exit",
        RoundState::Paused => "p resume · esc exit",
        RoundState::Finished => "r replay · esc exit",
    };
    let lines = vec![
        Line::styled(
            format!("Score: {}", snapshot.score),
            Style::default()
                .fg(theme.main_fg)
                .add_modifier(Modifier::BOLD),
        ),
        Line::raw(""),
        Line::styled(
            format!("Time left: {}", snapshot.remaining_secs),
            timer_style,
        ),
        Line::raw(""),
        Line::styled(
            help,
            Style::default().fg(theme.main_fg).add_modifier(Modifier::DIM),
        ),
    ];
    f.render_widget(Paragraph::new(lines), rect);
}

/// Centre a one-line banner over the board, clearing what's under it.
fn draw_banner(
    f: &mut Frame,
    text: &str,
    theme: &Theme,
    area: Rect,
    geometry: &GridGeometry,
    size: u16,
) {
    let panel = Rect {
        x: geometry.origin_x,
        y: geometry.origin_y,
        width: size * CELL_WIDTH,
        height: size * CELL_HEIGHT,
    };
    let rect = Rect {
        x: panel.x,
        y: panel.y + panel.height / 2,
        width: panel.width,
        height: 1,
    }
    .intersection(area);
    if rect.width == 0 {
        return;
    }
    f.render_widget(Clear, rect);
    f.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .style(
                Style::default()
                    .fg(theme.title)
                    .add_modifier(Modifier::BOLD)
                    .bg(theme.bg),
            ),
        rect,
    );
}

fn draw_scores(f: &mut Frame, scores: &[HighScore], theme: &Theme, area: Rect) {
    let mut lines = vec![
        Line::styled(
            "High scores",
            Style::default()
                .fg(theme.title)
                .add_modifier(Modifier::BOLD),
        ),
        Line::raw(""),
    ];
    if scores.is_empty() {
        lines.push(Line::styled(
            "No scores yet. Play a round!",
            Style::default().fg(theme.main_fg),
        ));
    } else {
        let now = score::unix_now();
        for (rank, entry) in scores.iter().enumerate() {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("{:>2}. ", rank + 1),
                    Style::default().fg(theme.main_fg).add_modifier(Modifier::DIM),
                ),
                Span::styled(
                    format!(
                        "{:<7} {:>4}s {:>7} ",
                        format!("{0} x {0}", entry.size),
                        entry.duration,
                        entry.score
                    ),
                    Style::default().fg(theme.main_fg),
                ),
                Span::styled(
                    age_label(now, entry.timestamp),
                    Style::default().fg(theme.main_fg).add_modifier(Modifier::DIM),
                ),
            ]));
        }
    }
    lines.push(Line::raw(""));
    lines.push(Line::styled(
        "esc back",
        Style::default().fg(theme.main_fg).add_modifier(Modifier::DIM),
    ));

    let rect = centered_rect(area, 40, lines.len() as u16);
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), rect);
}

/// Coarse age for the score table.
fn age_label(now: u64, timestamp: u64) -> String {
    let days = now.saturating_sub(timestamp) / 86_400;
    if days == 0 {
        "today".to_string()
    } else {
        format!("{days}d ago")
    }
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geometry_centres_board_and_sidebar() {
        let area = Rect::new(0, 0, 80, 24);
        let geom = grid_geometry(area, 3);
        // Panel 21 wide + 22 sidebar = 43; centred in 80 leaves x = 18.
        assert_eq!(geom.origin_x, 18);
        // Panel 9 tall centred in 24 leaves y = 7.
        assert_eq!(geom.origin_y, 7);
        assert_eq!(geom.cell_width, CELL_WIDTH);
        assert_eq!(geom.size, 3);
    }

    #[test]
    fn geometry_survives_tiny_terminals() {
        let area = Rect::new(0, 0, 10, 5);
        let geom = grid_geometry(area, 6);
        assert_eq!(geom.origin_x, 0);
        assert_eq!(geom.origin_y, 0);
    }

    #[test]
    fn age_labels_are_day_granular() {
        assert_eq!(age_label(1000, 1000), "today");
        assert_eq!(age_label(100_000, 10_000), "1d ago");
        assert_eq!(age_label(1_000_000, 0), "11d ago");
    }
}
