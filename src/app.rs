use color_eyre::Result;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::time::{Duration, Instant};

use crate::input::{InputAction, InputManager};
use crate::renderer::{GameRenderer, RenderView};
use crate::sim::Simulation;

/// Nominal tick budget: 60 simulation steps per second.
const TICK: Duration = Duration::from_micros(16_667);

/// What the host is currently doing with the simulation. The simulation's
/// own game-over flag is authoritative; this phase only controls which
/// screen is drawn and whether the tick loop keeps stepping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Playing,
    Paused,
    GameOver,
}

/// The main application which holds the state and logic of the application.
pub struct App {
    running: bool,
    phase: GamePhase,
    sim: Simulation,
    input: InputManager,
    renderer: GameRenderer,
    last_tick: Instant,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new() -> Self {
        Self {
            running: true,
            phase: GamePhase::Playing,
            sim: Simulation::new(),
            input: InputManager::new(),
            renderer: GameRenderer::new(),
            last_tick: Instant::now(),
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>) -> Result<()> {
        while self.running {
            // Render the frame
            terminal.draw(|frame| {
                let view = RenderView {
                    phase: self.phase,
                    player: &self.sim.player,
                    bullets: &self.sim.bullets,
                    enemies: &self.sim.enemies,
                    score: self.sim.score,
                    area: frame.area(),
                };
                self.renderer.render(frame, &view);
            })?;

            // Apply input, then advance the simulation one tick
            let actions = self.input.poll(self.phase)?;
            self.process_actions(&actions);

            if self.phase == GamePhase::Playing {
                self.sim.step();
                if self.sim.game_over {
                    self.phase = GamePhase::GameOver;
                }
            }

            // Sleep off the rest of the tick budget so the simulation runs
            // at its nominal 60 Hz
            let elapsed = self.last_tick.elapsed();
            if elapsed < TICK {
                std::thread::sleep(TICK - elapsed);
            }
            self.last_tick = Instant::now();
        }
        Ok(())
    }

    /// Process input actions and update game state accordingly.
    fn process_actions(&mut self, actions: &[InputAction]) {
        for action in actions {
            match action {
                InputAction::Quit => {
                    self.running = false;
                }
                InputAction::Pause => {
                    self.phase = GamePhase::Paused;
                }
                InputAction::Resume => {
                    self.phase = GamePhase::Playing;
                }
                InputAction::Restart => {
                    *self = Self::new();
                }
                InputAction::MoveLeftPressed => {
                    self.sim.set_move_left(true);
                }
                InputAction::MoveLeftReleased => {
                    self.sim.set_move_left(false);
                }
                InputAction::MoveRightPressed => {
                    self.sim.set_move_right(true);
                }
                InputAction::MoveRightReleased => {
                    self.sim.set_move_right(false);
                }
                InputAction::Fire => {
                    self.sim.fire();
                }
            }
        }
    }
}
