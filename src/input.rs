use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

use crate::app::GamePhase;

/// Represents semantic game actions that can be triggered by input.
///
/// Movement comes through as press/release edges so the simulation's input
/// latches stay authoritative; `Fire` is a one-shot per key event, which
/// makes a held space bar fire at the terminal's key-repeat rate rather
/// than every tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    MoveLeftPressed,
    MoveLeftReleased,
    MoveRightPressed,
    MoveRightReleased,
    Fire,
    Pause,
    Resume,
    Restart,
    Quit,
}

/// Polls crossterm events and translates raw key events into game actions.
///
/// Release events require the keyboard enhancement flags pushed at startup;
/// without them a latch stays set until the game ends, same as any terminal
/// game without release reporting.
#[derive(Debug, Default)]
pub struct InputManager {
    actions: Vec<InputAction>,
}

impl InputManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drains all pending input events and returns the actions for this
    /// frame, in arrival order.
    pub fn poll(&mut self, phase: GamePhase) -> color_eyre::Result<Vec<InputAction>> {
        self.actions.clear();

        // Poll for all available events without blocking
        while event::poll(Duration::from_millis(0))? {
            match event::read()? {
                Event::Key(key_event) => {
                    self.handle_key_event(key_event, phase);
                }
                Event::Mouse(_) => {
                    // Mouse events currently ignored
                }
                Event::Resize(_, _) => {
                    // The renderer rescales from the frame area every draw
                }
                _ => {}
            }
        }

        Ok(std::mem::take(&mut self.actions))
    }

    fn handle_key_event(&mut self, key_event: KeyEvent, phase: GamePhase) {
        match key_event.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                self.handle_key_press(key_event, phase);
            }
            KeyEventKind::Release => {
                self.handle_key_release(key_event.code);
            }
        }
    }

    fn handle_key_press(&mut self, key_event: KeyEvent, phase: GamePhase) {
        // Quit keys work in any state
        if matches!(
            key_event.code,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc
        ) || (key_event.code == KeyCode::Char('c')
            && key_event.modifiers.contains(KeyModifiers::CONTROL))
        {
            self.actions.push(InputAction::Quit);
            return;
        }

        // State-specific one-shot actions
        match phase {
            GamePhase::Playing => {
                if matches!(key_event.code, KeyCode::Char('p') | KeyCode::Char('P')) {
                    self.actions.push(InputAction::Pause);
                    return;
                }
            }
            GamePhase::Paused => {
                if matches!(key_event.code, KeyCode::Char('p') | KeyCode::Char('P')) {
                    self.actions.push(InputAction::Resume);
                    return;
                }
            }
            GamePhase::GameOver => {
                if matches!(key_event.code, KeyCode::Char('r') | KeyCode::Char('R')) {
                    self.actions.push(InputAction::Restart);
                }
                return;
            }
        }

        if phase == GamePhase::Playing {
            match key_event.code {
                KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => {
                    self.actions.push(InputAction::MoveLeftPressed);
                }
                KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => {
                    self.actions.push(InputAction::MoveRightPressed);
                }
                KeyCode::Char(' ') => {
                    self.actions.push(InputAction::Fire);
                }
                _ => {}
            }
        }
    }

    fn handle_key_release(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => {
                self.actions.push(InputAction::MoveLeftReleased);
            }
            KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => {
                self.actions.push(InputAction::MoveRightReleased);
            }
            _ => {}
        }
    }
}
