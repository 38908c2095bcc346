use sdl2::event::Event;
use sdl2::keyboard::Keycode;

use crate::drive::Controls;

pub struct InputHandler {
    key_states: [bool; 4], // Up, Down, Left, Right
}

impl InputHandler {
    pub fn new() -> Self {
        InputHandler {
            key_states: [false; 4],
        }
    }

    // Track held arrows and return the command triggered by this event
    pub fn process_event(&mut self, event: &Event) -> InputAction {
        match event {
            Event::Quit { .. } => InputAction::Exit,
            Event::KeyDown {
                keycode: Some(keycode),
                repeat,
                ..
            } => {
                if let Some(slot) = Self::arrow_slot(*keycode) {
                    self.key_states[slot] = true;
                    return InputAction::None;
                }

                // Holding a command key must not toggle it every frame
                if *repeat {
                    return InputAction::None;
                }

                match keycode {
                    Keycode::Escape => InputAction::Exit,
                    Keycode::P => InputAction::TogglePause,
                    Keycode::R => InputAction::Reset,
                    Keycode::H => InputAction::ShowHelp,
                    _ => InputAction::None,
                }
            }
            Event::KeyUp {
                keycode: Some(keycode),
                ..
            } => {
                if let Some(slot) = Self::arrow_slot(*keycode) {
                    self.key_states[slot] = false;
                }
                InputAction::None
            }
            _ => InputAction::None,
        }
    }

    pub fn controls(&self) -> Controls {
        Controls {
            accelerate: self.key_states[0],
            brake: self.key_states[1],
            left: self.key_states[2],
            right: self.key_states[3],
        }
    }

    /// Forget held keys, e.g. when the window loses focus and the key-up
    /// events go elsewhere.
    pub fn release_all(&mut self) {
        self.key_states = [false; 4];
    }

    fn arrow_slot(keycode: Keycode) -> Option<usize> {
        match keycode {
            Keycode::Up => Some(0),
            Keycode::Down => Some(1),
            Keycode::Left => Some(2),
            Keycode::Right => Some(3),
            _ => None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    None,
    TogglePause,
    Reset,
    ShowHelp,
    Exit,
}

pub fn print_controls() {
    println!("╔══════════════════════════════════════╗");
    println!("║            DRIVE CONTROLS            ║");
    println!("╠══════════════════════════════════════╣");
    println!("║ ↑ Arrow Up    │ Accelerate           ║");
    println!("║ ↓ Arrow Down  │ Brake                ║");
    println!("║ ← Arrow Left  │ Steer left           ║");
    println!("║ → Arrow Right │ Steer right          ║");
    println!("║ P             │ Toggle pause         ║");
    println!("║ R             │ Reset car            ║");
    println!("║ H             │ Show this help       ║");
    println!("║ Esc           │ Exit                 ║");
    println!("╟──────────────────────────────────────╢");
    println!("║ --font <file.ttf>  HUD font          ║");
    println!("╚══════════════════════════════════════╝");
}
