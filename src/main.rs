use std::time::{Duration, Instant};

use clap::Parser;
use sdl2::messagebox::{show_simple_message_box, MessageBoxFlag};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod combo;
mod config;
mod constants;
mod drive;
mod error;
mod game;
mod hud;
mod input;
mod raster;
mod scene;

use config::{Cli, Config};
use error::DriveError;
use game::Game;
use hud::Hud;
use input::print_controls;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();

    let config = Config::try_from(cli)?;
    info!(mode = ?config.mode, width = config.width, height = config.height, "starting");

    if let Err(e) = run(&config) {
        error!("{}", e);
        alert(&e);
        return Err(e.into());
    }
    Ok(())
}

/// Last-resort report for failures the user would otherwise never see,
/// e.g. a missing video driver.
fn alert(err: &DriveError) {
    let message = format!("Endless Drive could not run:\n\n{}", err);
    let shown = show_simple_message_box(
        MessageBoxFlag::ERROR,
        "Endless Drive",
        &message,
        None::<&sdl2::video::Window>,
    );
    if let Err(e) = shown {
        warn!("could not show alert dialog: {:?}", e);
    }
}

fn run(config: &Config) -> Result<(), DriveError> {
    let sdl_context = sdl2::init()?;
    let video_subsystem = sdl_context.video()?;

    let window = video_subsystem
        .window(config.mode.title(), config.width, config.height)
        .position_centered()
        .resizable()
        .build()
        .map_err(|e| DriveError::Sdl(e.to_string()))?;

    let mut canvas_builder = window.into_canvas().accelerated();
    if config.vsync {
        canvas_builder = canvas_builder.present_vsync();
    }
    let mut canvas = canvas_builder
        .build()
        .map_err(|e| DriveError::Sdl(e.to_string()))?;

    let ttf_context = match sdl2::ttf::init() {
        Ok(ctx) => Some(ctx),
        Err(e) => {
            warn!("SDL2_ttf unavailable: {}", e);
            None
        }
    };
    let hud = Hud::new(ttf_context.as_ref(), &config.font_path, config.mode.title());
    if !hud.has_font() {
        info!("speed shown in the window title; pass --font <file.ttf> for the in-window readout");
    }

    let mut game = Game::new(config, hud);
    let mut event_pump = sdl_context.event_pump()?;

    print_controls();

    let frame_budget = Duration::from_secs_f64(1.0 / config.fps as f64);
    let mut last_frame = Instant::now();

    while game.is_running() {
        let now = Instant::now();
        let frame_time = now.duration_since(last_frame);
        last_frame = now;

        for event in event_pump.poll_iter() {
            game.handle_event(&event);
        }

        game.advance(frame_time);
        game.render(&mut canvas)?;

        // vsync already paces presentation; otherwise sleep off the rest
        if !config.vsync {
            let spent = now.elapsed();
            if spent < frame_budget {
                std::thread::sleep(frame_budget - spent);
            }
        }
    }

    info!(
        distance = game.drive().position,
        paused = game.is_paused(),
        "drive finished"
    );
    Ok(())
}
