use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::app::GamePhase;
use crate::entities::{Bullet, Enemy, Player};
use crate::sim::{FIELD_HEIGHT, FIELD_WIDTH};

/// View struct that holds all game state needed for rendering.
pub struct RenderView<'a> {
    pub phase: GamePhase,
    pub player: &'a Player,
    pub bullets: &'a [Bullet],
    pub enemies: &'a [Enemy],
    pub score: u32,
    pub area: Rect,
}

/// Handles all rendering responsibilities for the game.
///
/// The simulation lives in a logical 800x600 field; everything here is
/// projected onto whatever terminal area is available, so gameplay is
/// independent of the window size.
pub struct GameRenderer;

impl Default for GameRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl GameRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Main render method that dispatches to state-specific renderers.
    pub fn render(&self, frame: &mut Frame, view: &RenderView) {
        match view.phase {
            GamePhase::Playing => self.render_game(frame, view),
            GamePhase::Paused => self.render_paused(frame, view),
            GamePhase::GameOver => self.render_game_over(frame, view),
        }
    }

    fn render_game(&self, frame: &mut Frame, view: &RenderView) {
        let area = view.area;

        // Player: solid block scaled from its 50x50 square
        self.render_square(
            frame,
            area,
            view.player.x,
            view.player.y,
            Player::SIZE,
            Color::Blue,
        );

        // Enemies
        for enemy in view.enemies {
            self.render_square(frame, area, enemy.x, enemy.y, Enemy::SIZE, Color::Red);
        }

        // Bullets: single cell each, direct buffer access
        let buffer = frame.buffer_mut();
        for bullet in view.bullets {
            // A bullet straddling the field top draws nothing until removed
            if bullet.y < 0 {
                continue;
            }
            let x = scale(bullet.x, FIELD_WIDTH, area.width);
            let y = scale(bullet.y, FIELD_HEIGHT, area.height);
            if x < area.width && y < area.height {
                buffer.set_string(
                    area.x + x,
                    area.y + y,
                    "|",
                    Style::default().fg(Color::Yellow),
                );
            }
        }

        // Score overlay at the top
        let score_line = Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", view.score),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
        ]);
        let score_area = Rect {
            x: area.x + 1,
            y: area.y,
            width: area.width.saturating_sub(2),
            height: 1,
        };
        frame.render_widget(Paragraph::new(score_line), score_area);

        // Controls hint at bottom
        let controls = Line::from(vec![Span::styled(
            "[A/D or Arrows: Move] [Space: Fire] [P: Pause] [Q: Quit]",
            Style::default().fg(Color::DarkGray),
        )]);
        let controls_area = Rect {
            x: area.x + 1,
            y: area.y + area.height.saturating_sub(1),
            width: area.width.saturating_sub(2),
            height: 1,
        };
        frame.render_widget(Paragraph::new(controls).centered(), controls_area);
    }

    /// Draws one logical square as a filled block of terminal cells.
    fn render_square(
        &self,
        frame: &mut Frame,
        area: Rect,
        x: i32,
        y: i32,
        size: i32,
        color: Color,
    ) {
        let cell_x = scale(x, FIELD_WIDTH, area.width);
        let cell_y = scale(y, FIELD_HEIGHT, area.height);
        let cell_w = scale(size, FIELD_WIDTH, area.width).max(1);
        let cell_h = scale(size, FIELD_HEIGHT, area.height).max(1);

        if cell_x + cell_w > area.width || cell_y + cell_h > area.height {
            return;
        }

        let row = "\u{2588}".repeat(cell_w as usize);
        let text: Vec<Line> = (0..cell_h)
            .map(|_| Line::from(row.clone()).style(Style::default().fg(color)))
            .collect();

        let square_area = Rect {
            x: area.x + cell_x,
            y: area.y + cell_y,
            width: cell_w,
            height: cell_h,
        };
        frame.render_widget(Paragraph::new(text), square_area);
    }

    /// Renders the pause screen with overlay.
    fn render_paused(&self, frame: &mut Frame, view: &RenderView) {
        // First render the game screen
        self.render_game(frame, view);

        let area = view.area;
        let pause_text = vec![
            Line::from(""),
            Line::from("PAUSED").centered().bold().yellow(),
            Line::from(""),
            Line::from("Press P to resume").centered().white(),
        ];

        let pause_area = Rect {
            x: area.width.saturating_sub(30) / 2,
            y: area.height.saturating_sub(6) / 2,
            width: 30.min(area.width),
            height: 6.min(area.height),
        };

        frame.render_widget(
            Paragraph::new(pause_text)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Yellow)),
                )
                .alignment(Alignment::Center),
            pause_area,
        );
    }

    /// Renders the game over screen.
    fn render_game_over(&self, frame: &mut Frame, view: &RenderView) {
        // Keep the final frame visible behind the message, colliding enemy
        // included
        self.render_game(frame, view);

        let area = view.area;
        let game_over_text = vec![
            Line::from(""),
            Line::from(format!("Game Over! Score: {}", view.score))
                .centered()
                .red()
                .bold(),
            Line::from(""),
            Line::from("Press R to restart").centered().white(),
            Line::from("Press Q to quit").centered().white(),
        ];

        let box_area = Rect {
            x: area.width.saturating_sub(34) / 2,
            y: area.height.saturating_sub(7) / 2,
            width: 34.min(area.width),
            height: 7.min(area.height),
        };

        frame.render_widget(
            Paragraph::new(game_over_text)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Red)),
                )
                .alignment(Alignment::Center),
            box_area,
        );
    }
}

/// Projects a logical field coordinate onto a span of terminal cells.
fn scale(logical: i32, logical_max: i32, cells: u16) -> u16 {
    let clamped = logical.clamp(0, logical_max) as u32;
    (clamped * cells as u32 / logical_max as u32) as u16
}
