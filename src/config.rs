use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::constants::{DEFAULT_FONT_PATH, FPS, WINDOW_HEIGHT, WINDOW_WIDTH};
use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DemoMode {
    /// Car on a scrolling road, rendered from a 3D scene graph
    Scene,
    /// Pseudo-3D segmented road projected onto the 2D canvas
    Combo,
}

impl DemoMode {
    pub fn title(&self) -> &'static str {
        match self {
            DemoMode::Scene => "Endless Drive - Scene",
            DemoMode::Combo => "Endless Drive - Combo Road",
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "endless_drive", about = "Endless driving demos")]
pub struct Cli {
    /// Which demo to run
    #[arg(short, long, value_enum, default_value_t = DemoMode::Scene)]
    pub mode: DemoMode,

    #[arg(long, default_value_t = WINDOW_WIDTH)]
    pub width: u32,

    #[arg(long, default_value_t = WINDOW_HEIGHT)]
    pub height: u32,

    /// Simulation ticks per second
    #[arg(long, default_value_t = FPS)]
    pub fps: u32,

    /// TTF font used for the speed readout
    #[arg(long, default_value = DEFAULT_FONT_PATH)]
    pub font: PathBuf,

    #[arg(long)]
    pub no_vsync: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub mode: DemoMode,
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    pub font_path: PathBuf,
    pub vsync: bool,
    pub drive: DriveSettings,
}

impl TryFrom<Cli> for Config {
    type Error = ConfigError;

    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        if cli.width == 0 || cli.height == 0 {
            return Err(ConfigError::ZeroDimension {
                width: cli.width,
                height: cli.height,
            });
        }
        if !(1..=240).contains(&cli.fps) {
            return Err(ConfigError::FpsOutOfRange(cli.fps));
        }

        Ok(Config {
            mode: cli.mode,
            width: cli.width,
            height: cli.height,
            fps: cli.fps,
            font_path: cli.font,
            vsync: !cli.no_vsync,
            drive: DriveSettings::for_mode(cli.mode),
        })
    }
}

/// Tuning of the speed/steering integrator. All rates are per tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriveSettings {
    pub max_speed: f32,
    pub acceleration: f32,
    pub deceleration: f32,
    pub friction: f32,
    pub steer_step: f32,
    pub lateral_limit: f32,
    pub kmh_per_unit: f32,
}

impl DriveSettings {
    pub fn for_mode(mode: DemoMode) -> Self {
        match mode {
            DemoMode::Scene => DriveSettings {
                max_speed: 5.0,
                acceleration: 0.1,
                deceleration: 0.1,
                friction: 0.95,
                steer_step: 0.3,
                lateral_limit: 8.0,
                kmh_per_unit: 50.0,
            },
            DemoMode::Combo => DriveSettings {
                max_speed: 300.0,
                acceleration: 0.5,
                deceleration: 0.3,
                friction: 0.95,
                steer_step: 5.0,
                lateral_limit: crate::constants::COMBO_ROAD_WIDTH / 2.0,
                kmh_per_unit: 1.0,
            },
        }
    }
}
