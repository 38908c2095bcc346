pub const WINDOW_WIDTH: u32 = 1024;
pub const WINDOW_HEIGHT: u32 = 768;
pub const FPS: u32 = 60;

pub const DEFAULT_FONT_PATH: &str = "assets/fonts/font.ttf";
pub const FONT_SIZE: u16 = 24;

// Scene demo road
pub const ROAD_LENGTH: f32 = 2000.0;
pub const ROAD_WIDTH: f32 = 20.0;
pub const ROAD_SEGMENTS: usize = 3;
pub const ROAD_LINE_SPACING: usize = 20;
pub const GRASS_WIDTH: f32 = 200.0;

// Combo demo road
pub const COMBO_ROAD_WIDTH: f32 = 2000.0;
pub const SEGMENT_LENGTH: f32 = 200.0;
pub const SEGMENTS_PER_ROAD: usize = 500;
pub const CAMERA_HEIGHT: f32 = 1000.0;
pub const CAMERA_DEPTH: f32 = 0.84;
pub const DRAW_DISTANCE: usize = 25;
pub const RUMBLE_FRACTION: f32 = 1.0 / 6.0;
pub const LANE_MARKER_FRACTION: f32 = 1.0 / 40.0;
