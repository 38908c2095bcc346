use std::time::Duration;

use sdl2::event::{Event, WindowEvent};
use sdl2::render::Canvas;
use sdl2::video::Window;
use tracing::{debug, info};

use crate::combo::ComboRoad;
use crate::config::{Config, DemoMode, DriveSettings};
use crate::drive::DriveState;
use crate::hud::Hud;
use crate::input::{print_controls, InputAction, InputHandler};
use crate::scene::DriveScene;

// Don't try to catch up on more than this many ticks after a stall
const MAX_TICKS_PER_FRAME: u32 = 5;
const STATE_LOG_SECS: f64 = 5.0;

/// What each demo draws. The drive state is shared, the presentation is not.
pub trait RoadView {
    /// Pull the latest state into the view; `elapsed` is simulated seconds.
    fn sync(&mut self, drive: &DriveState, elapsed: f32);
    fn resize(&mut self, width: u32, height: u32);
    fn render(&self, canvas: &mut Canvas<Window>) -> Result<(), String>;
}

pub struct Game<'ttf> {
    view: Box<dyn RoadView>,
    drive: DriveState,
    settings: DriveSettings,
    input: InputHandler,
    hud: Hud<'ttf>,
    paused: bool,
    running: bool,
    tick: Duration,
    accumulator: Duration,
    elapsed: f32,
    ticks: u64,
    log_every: u64,
}

impl<'ttf> Game<'ttf> {
    pub fn new(config: &Config, hud: Hud<'ttf>) -> Self {
        let view: Box<dyn RoadView> = match config.mode {
            DemoMode::Scene => Box::new(DriveScene::new(config.width, config.height)),
            DemoMode::Combo => Box::new(ComboRoad::new(rand::random())),
        };
        Self::with_view(config, view, hud)
    }

    pub fn with_view(config: &Config, view: Box<dyn RoadView>, hud: Hud<'ttf>) -> Self {
        let tick = Duration::from_secs_f64(1.0 / config.fps as f64);
        Game {
            view,
            drive: DriveState::new(),
            settings: config.drive,
            input: InputHandler::new(),
            hud,
            paused: false,
            running: true,
            tick,
            accumulator: Duration::ZERO,
            elapsed: 0.0,
            ticks: 0,
            log_every: (STATE_LOG_SECS / tick.as_secs_f64()).round().max(1.0) as u64,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn drive(&self) -> &DriveState {
        &self.drive
    }

    pub fn handle_event(&mut self, event: &Event) {
        if let Event::Window { win_event, .. } = event {
            match win_event {
                WindowEvent::Resized(w, h) | WindowEvent::SizeChanged(w, h) => {
                    debug!(width = w, height = h, "viewport resized");
                    self.view.resize((*w).max(1) as u32, (*h).max(1) as u32);
                }
                WindowEvent::FocusLost => self.input.release_all(),
                _ => {}
            }
            return;
        }

        match self.input.process_event(event) {
            InputAction::None => {}
            InputAction::Exit => self.running = false,
            InputAction::TogglePause => {
                self.paused = !self.paused;
                info!(paused = self.paused, "pause toggled");
            }
            InputAction::Reset => {
                self.drive.reset();
                info!("car reset");
            }
            InputAction::ShowHelp => print_controls(),
        }
    }

    /// Runs as many fixed ticks as `frame_time` covers.
    pub fn advance(&mut self, frame_time: Duration) {
        self.accumulator += frame_time;
        let budget = self.tick * MAX_TICKS_PER_FRAME;
        if self.accumulator > budget {
            self.accumulator = budget;
        }

        while self.accumulator >= self.tick {
            self.accumulator -= self.tick;
            if self.paused {
                continue;
            }
            self.drive.step(self.input.controls(), &self.settings);
            self.elapsed += self.tick.as_secs_f32();
            self.ticks += 1;

            if self.ticks % self.log_every == 0 {
                debug!(
                    position = self.drive.position,
                    player_x = self.drive.player_x,
                    speed = self.drive.speed,
                    "drive state"
                );
            }
        }
    }

    pub fn readout(&self) -> String {
        self.drive.readout(&self.settings)
    }

    pub fn render(&mut self, canvas: &mut Canvas<Window>) -> Result<(), String> {
        self.view.sync(&self.drive, self.elapsed);
        self.view.render(canvas)?;

        let readout = self.readout();
        self.hud.render(canvas, &readout, self.paused)?;

        canvas.present();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Cli;
    use clap::Parser;
    use sdl2::keyboard::{Keycode, Mod};
    use std::cell::Cell;
    use std::rc::Rc;

    fn config(args: &[&str]) -> Config {
        let cli = Cli::parse_from(std::iter::once("endless_drive").chain(args.iter().copied()));
        Config::try_from(cli).unwrap()
    }

    fn game(mode: &str) -> Game<'static> {
        Game::new(&config(&["--mode", mode]), Hud::title_only("test"))
    }

    struct SizeRecorder(Rc<Cell<Option<(u32, u32)>>>);

    impl RoadView for SizeRecorder {
        fn sync(&mut self, _drive: &DriveState, _elapsed: f32) {}

        fn resize(&mut self, width: u32, height: u32) {
            self.0.set(Some((width, height)));
        }

        fn render(&self, _canvas: &mut Canvas<Window>) -> Result<(), String> {
            Ok(())
        }
    }

    fn window_event(win_event: WindowEvent) -> Event {
        Event::Window {
            timestamp: 0,
            window_id: 0,
            win_event,
        }
    }

    fn key(keycode: Keycode, down: bool) -> Event {
        if down {
            Event::KeyDown {
                timestamp: 0,
                window_id: 0,
                keycode: Some(keycode),
                scancode: None,
                keymod: Mod::NOMOD,
                repeat: false,
            }
        } else {
            Event::KeyUp {
                timestamp: 0,
                window_id: 0,
                keycode: Some(keycode),
                scancode: None,
                keymod: Mod::NOMOD,
                repeat: false,
            }
        }
    }

    #[test]
    fn holding_up_reaches_top_speed() {
        let mut game = game("scene");
        game.handle_event(&key(Keycode::Up, true));
        for _ in 0..120 {
            game.advance(Duration::from_secs_f64(1.0 / 60.0));
        }
        assert_eq!(game.drive().speed, 5.0);
        assert_eq!(game.readout(), "Speed: 250 km/h");
        assert!(game.drive().position > 0.0);
    }

    #[test]
    fn pause_freezes_the_car() {
        let mut game = game("combo");
        game.handle_event(&key(Keycode::Up, true));
        game.advance(Duration::from_millis(100));
        let before = *game.drive();

        game.handle_event(&key(Keycode::P, true));
        assert!(game.is_paused());
        game.advance(Duration::from_millis(100));
        assert_eq!(*game.drive(), before);
    }

    #[test]
    fn stalls_only_catch_up_a_few_ticks() {
        let mut game = game("combo");
        game.handle_event(&key(Keycode::Up, true));
        game.advance(Duration::from_secs(10));
        // at most MAX_TICKS_PER_FRAME ticks of 0.5 each
        assert!(game.drive().speed <= 0.5 * MAX_TICKS_PER_FRAME as f32 + 1e-4);
    }

    #[test]
    fn reset_and_exit() {
        let mut game = game("scene");
        game.handle_event(&key(Keycode::Up, true));
        game.advance(Duration::from_millis(200));
        game.handle_event(&key(Keycode::Up, false));
        game.handle_event(&key(Keycode::R, true));
        assert_eq!(*game.drive(), DriveState::default());

        assert!(game.is_running());
        game.handle_event(&key(Keycode::Escape, true));
        assert!(!game.is_running());
    }

    #[test]
    fn focus_loss_releases_keys() {
        let mut game = game("scene");
        game.handle_event(&key(Keycode::Up, true));
        game.handle_event(&window_event(WindowEvent::FocusLost));
        game.advance(Duration::from_millis(100));
        assert_eq!(game.drive().speed, 0.0);
    }

    #[test]
    fn window_resize_reaches_the_view() {
        let size = Rc::new(Cell::new(None));
        let view = Box::new(SizeRecorder(size.clone()));
        let mut game = Game::with_view(&config(&[]), view, Hud::title_only("test"));

        game.handle_event(&window_event(WindowEvent::Resized(1600, 900)));
        assert_eq!(size.get(), Some((1600, 900)));

        // a minimised window reports zero, which must not reach the camera
        game.handle_event(&window_event(WindowEvent::SizeChanged(0, 0)));
        assert_eq!(size.get(), Some((1, 1)));
    }

    #[test]
    fn state_log_interval_follows_tick_rate() {
        assert_eq!(Game::new(&config(&[]), Hud::title_only("t")).log_every, 300);
        let slow = Game::new(&config(&["--fps", "30"]), Hud::title_only("t"));
        assert_eq!(slow.log_every, 150);
    }
}
