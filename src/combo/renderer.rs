use rand::rngs::StdRng;
use rand::SeedableRng;
use sdl2::pixels::Color;
use sdl2::render::Canvas;
use sdl2::video::Window;

use super::projection::Projected;
use super::road::{SegmentQuad, Track, Tree};
use crate::constants::{LANE_MARKER_FRACTION, RUMBLE_FRACTION};
use crate::drive::DriveState;
use crate::game::RoadView;
use crate::raster::{fill_polygon, fill_rect};

const SKY: Color = Color::RGB(0x87, 0xCE, 0xEB);
const GROUND: Color = Color::RGB(0x65, 0x43, 0x21);
const TRUNK: Color = Color::RGB(139, 69, 19);
const LEAVES: Color = Color::RGB(34, 139, 34);

/// Pseudo-3D road drawn segment by segment onto the 2D canvas.
pub struct ComboRoad {
    track: Track,
    drive: DriveState,
}

impl ComboRoad {
    pub fn new(seed: u64) -> Self {
        ComboRoad {
            track: Track::generate(&mut StdRng::seed_from_u64(seed)),
            drive: DriveState::default(),
        }
    }

    fn render_segment(&self, canvas: &mut Canvas<Window>, quad: &SegmentQuad) -> Result<(), String> {
        let (near, far) = (&quad.near, &quad.far);

        fill_polygon(canvas, &trapezoid(near, far, 1.0 + RUMBLE_FRACTION), quad.colors.rumble)?;
        fill_polygon(canvas, &trapezoid(near, far, 1.0), quad.colors.road)?;
        if let Some(lane) = quad.colors.lane {
            fill_polygon(canvas, &trapezoid(near, far, LANE_MARKER_FRACTION), lane)?;
        }
        Ok(())
    }

    fn render_tree(&self, canvas: &mut Canvas<Window>, tree: &Tree, base: &Projected) -> Result<(), String> {
        let (_, height) = canvas.output_size()?;
        // world units to pixels at this depth, matching the road projection
        let to_pixels = base.scale * height as f32 / 2.0;
        let tall = tree.height * to_pixels;
        if tall < 1.0 {
            return Ok(());
        }
        let trunk_w = tall * 0.12;
        let crown_w = tall * 0.6;

        fill_rect(canvas, base.x - trunk_w / 2.0, base.y - tall * 0.4, trunk_w, tall * 0.4, TRUNK)?;
        fill_polygon(
            canvas,
            &[
                (base.x - crown_w / 2.0, base.y - tall * 0.3),
                (base.x + crown_w / 2.0, base.y - tall * 0.3),
                (base.x, base.y - tall),
            ],
            LEAVES,
        )
    }

    fn render_player(&self, canvas: &mut Canvas<Window>) -> Result<(), String> {
        let (width, height) = canvas.output_size()?;
        let w = width as f32 * 0.14;
        let h = w * 0.45;
        let x = (width as f32 - w) / 2.0;
        let y = height as f32 - h - height as f32 * 0.04;

        // wheels, body, cabin, rear lights
        let wheel = w * 0.18;
        fill_rect(canvas, x - wheel * 0.15, y + h * 0.55, wheel, h * 0.45, Color::RGB(20, 20, 20))?;
        fill_rect(canvas, x + w - wheel * 0.85, y + h * 0.55, wheel, h * 0.45, Color::RGB(20, 20, 20))?;
        fill_rect(canvas, x, y + h * 0.3, w, h * 0.55, Color::RGB(220, 0, 0))?;
        fill_polygon(
            canvas,
            &[
                (x + w * 0.2, y + h * 0.3),
                (x + w * 0.3, y),
                (x + w * 0.7, y),
                (x + w * 0.8, y + h * 0.3),
            ],
            Color::RGB(160, 0, 0),
        )?;
        fill_rect(canvas, x + w * 0.33, y + h * 0.06, w * 0.34, h * 0.2, Color::RGB(40, 40, 60))?;
        fill_rect(canvas, x + w * 0.05, y + h * 0.42, w * 0.14, h * 0.12, Color::RGB(255, 200, 0))?;
        fill_rect(canvas, x + w * 0.81, y + h * 0.42, w * 0.14, h * 0.12, Color::RGB(255, 200, 0))?;
        Ok(())
    }
}

impl RoadView for ComboRoad {
    fn sync(&mut self, drive: &DriveState, _elapsed: f32) {
        self.drive = *drive;
    }

    fn resize(&mut self, _width: u32, _height: u32) {
        // projection reads the canvas size every frame
    }

    fn render(&self, canvas: &mut Canvas<Window>) -> Result<(), String> {
        let (width, height) = canvas.output_size()?;

        canvas.set_draw_color(SKY);
        canvas.clear();
        fill_rect(canvas, 0.0, height as f32 / 2.0, width as f32, height as f32 / 2.0, GROUND)?;

        let quads = self.track.visible_segments(&self.drive, width, height);
        for quad in quads.iter().rev() {
            self.render_segment(canvas, quad)?;
            if let Some((tree, base)) = &quad.tree {
                self.render_tree(canvas, tree, base)?;
            }
        }

        self.render_player(canvas)
    }
}

/// Quad between two projected road edges, `fraction` of the road wide.
fn trapezoid(near: &Projected, far: &Projected, fraction: f32) -> [(f32, f32); 4] {
    let (nw, fw) = (near.half_width * fraction, far.half_width * fraction);
    [
        (near.x - nw, near.y),
        (near.x + nw, near.y),
        (far.x + fw, far.y),
        (far.x - fw, far.y),
    ]
}
