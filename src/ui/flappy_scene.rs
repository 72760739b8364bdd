//! UI rendering for the Flappy Dart playfield.

use crate::core::config::GameConfig;
use crate::flappy::{GameSession, RunPhase, RunState};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// What occupies one terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Sky,
    Bird,
    Obstacle,
    Ground,
}

/// Extra context the scene shows next to the live session.
pub struct SceneInfo<'a> {
    pub difficulty: &'a str,
    /// Best score recorded before the current run, if any.
    pub best_score: Option<u32>,
}

/// Classify the playfield point `(px, py)` in pixels.
pub fn cell_at(px: f64, py: f64, run: &RunState, config: &GameConfig) -> Cell {
    if py >= config.usable_height() {
        return Cell::Ground;
    }

    let bird = &run.bird;
    if px >= config.bird_x
        && px < config.bird_x + config.bird_width
        && py >= bird.y
        && py < bird.y + config.bird_height
    {
        return Cell::Bird;
    }

    let solid = run.obstacles.iter().any(|o| {
        px >= o.x && px < o.right(config) && (py < o.gap_top() || py >= o.gap_bottom(config))
    });
    if solid {
        Cell::Obstacle
    } else {
        Cell::Sky
    }
}

/// Render the whole game screen.
pub fn render_flappy(frame: &mut Frame, area: Rect, session: &GameSession, info: &SceneInfo) {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Flappy Dart ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(1)])
        .split(inner);

    render_play_area(frame, chunks[0], session);
    render_status_bar(frame, chunks[1], session, info);

    if let RunPhase::Over { score } = session.phase() {
        render_game_over(frame, chunks[0], score, info.best_score);
    }
}

/// Scale the pixel playfield onto the available cells.
fn render_play_area(frame: &mut Frame, area: Rect, session: &GameSession) {
    let width = area.width as usize;
    let height = area.height as usize;
    if width == 0 || height == 0 {
        return;
    }

    let config = session.config();
    let run = session.run();
    let x_scale = config.playfield_width / width as f64;
    let y_scale = config.playfield_height / height as f64;
    let dying = session.phase() == RunPhase::Dying;

    let mut lines = Vec::with_capacity(height);
    for row in 0..height {
        let py = (row as f64 + 0.5) * y_scale;
        let spans: Vec<Span> = (0..width)
            .map(|col| {
                let px = (col as f64 + 0.5) * x_scale;
                match cell_at(px, py, run, config) {
                    Cell::Sky => Span::raw(" "),
                    Cell::Bird if dying => Span::styled("x", Style::default().fg(Color::Red)),
                    Cell::Bird => Span::styled(
                        bird_glyph(run.bird.velocity),
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Cell::Obstacle => Span::styled("█", Style::default().fg(Color::Green)),
                    Cell::Ground => Span::styled("▒", Style::default().fg(Color::Rgb(139, 90, 43))),
                }
            })
            .collect();
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn bird_glyph(velocity: f64) -> &'static str {
    if velocity < -0.5 {
        "▲"
    } else if velocity > 4.0 {
        "▼"
    } else {
        "►"
    }
}

fn render_status_bar(frame: &mut Frame, area: Rect, session: &GameSession, info: &SceneInfo) {
    let (message, color) = match session.phase() {
        RunPhase::NotStarted => ("Press Space to start!".to_string(), Color::Yellow),
        RunPhase::Running => (format!("Score: {}", session.score()), Color::Green),
        RunPhase::Dying => (format!("Score: {}", session.score()), Color::Red),
        RunPhase::Over { score } => (format!("Final score: {}", score), Color::Red),
    };

    let best = info
        .best_score
        .map_or_else(|| "-".to_string(), |b| b.to_string());

    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", message),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {} | Best: {} ", info.difficulty, best),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            " [Space] Flap  [R] Restart  [Q] Quit",
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_game_over(frame: &mut Frame, area: Rect, score: u32, best: Option<u32>) {
    let width = 34.min(area.width);
    let height = 7.min(area.height);
    let popup = Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    };

    frame.render_widget(Clear, popup);
    let block = Block::default()
        .title(" CRASH! ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let new_best = best.map_or(true, |b| score > b);
    let mut lines = vec![
        Line::from(format!("You passed {} obstacles.", score)),
        Line::from(""),
    ];
    if new_best && score > 0 {
        lines.push(Line::from(Span::styled(
            "New best!",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )));
    } else if let Some(best) = best {
        lines.push(Line::from(format!("Best: {}", best)));
    }
    lines.push(Line::from(Span::styled(
        "[Space/R] Play again",
        Style::default().fg(Color::DarkGray),
    )));

    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        inner,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flappy::Obstacle;

    fn run_with_obstacle(config: &GameConfig) -> RunState {
        let mut run = RunState::new(config);
        run.obstacles.push(Obstacle {
            x: 200.0,
            top_height: 150.0,
            bottom_height: config.usable_height() - config.gap_height - 150.0,
            passed: false,
        });
        run
    }

    #[test]
    fn test_ground_below_usable_height() {
        let config = GameConfig::default();
        let run = RunState::new(&config);
        assert_eq!(cell_at(10.0, 650.0, &run, &config), Cell::Ground);
    }

    #[test]
    fn test_bird_cell() {
        let config = GameConfig::default();
        let run = RunState::new(&config);
        let py = run.bird.y + 1.0;
        assert_eq!(cell_at(config.bird_x + 1.0, py, &run, &config), Cell::Bird);
    }

    #[test]
    fn test_obstacle_segments_and_gap() {
        let config = GameConfig::default();
        let run = run_with_obstacle(&config);
        assert_eq!(cell_at(210.0, 100.0, &run, &config), Cell::Obstacle);
        assert_eq!(cell_at(210.0, 250.0, &run, &config), Cell::Sky);
        assert_eq!(cell_at(210.0, 500.0, &run, &config), Cell::Obstacle);
        assert_eq!(cell_at(300.0, 100.0, &run, &config), Cell::Sky);
    }

    #[test]
    fn test_bird_glyph_follows_velocity() {
        assert_eq!(bird_glyph(-9.0), "▲");
        assert_eq!(bird_glyph(0.0), "►");
        assert_eq!(bird_glyph(10.0), "▼");
    }
}
