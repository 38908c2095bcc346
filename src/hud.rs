use std::path::{Path, PathBuf};

use sdl2::pixels::Color;
use sdl2::rect::Rect;
use sdl2::render::{BlendMode, Canvas, TextureCreator, TextureQuery};
use sdl2::surface::Surface;
use sdl2::ttf::{Font, Sdl2TtfContext};
use sdl2::video::{Window, WindowContext};
use tracing::{info, warn};

use crate::constants::FONT_SIZE;
use crate::error::DriveError;

const MARGIN: i32 = 12;

// Tried in order when the configured font is missing
const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Speed readout in the top-left corner. Without a usable font the text
/// goes to the window title instead.
pub struct Hud<'ttf> {
    font: Option<Font<'ttf, 'static>>,
    texture_creator: Option<TextureCreator<WindowContext>>,
    rendered: Option<(String, Surface<'static>)>,
    title_prefix: String,
    shown_title: String,
}

impl<'ttf> Hud<'ttf> {
    pub fn new(ttf: Option<&'ttf Sdl2TtfContext>, font_path: &Path, title_prefix: &str) -> Self {
        let mut hud = Hud::title_only(title_prefix);
        hud.font = ttf.and_then(|ctx| {
            let Some(path) = resolve_font(font_path, SYSTEM_FONTS) else {
                warn!(
                    path = %font_path.display(),
                    "no font found; speed readout falls back to the window title"
                );
                return None;
            };
            match load_font(ctx, &path) {
                Ok(font) => {
                    info!(path = %path.display(), "loaded HUD font");
                    Some(font)
                }
                Err(e) => {
                    warn!("{}; speed readout falls back to the window title", e);
                    None
                }
            }
        });
        hud
    }

    /// A HUD that only ever writes the window title.
    pub fn title_only(title_prefix: &str) -> Self {
        Hud {
            font: None,
            texture_creator: None,
            rendered: None,
            title_prefix: title_prefix.to_string(),
            shown_title: String::new(),
        }
    }

    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    pub fn title_for(&self, readout: &str, paused: bool) -> String {
        if paused {
            format!("{} | {} | PAUSED", self.title_prefix, readout)
        } else {
            format!("{} | {}", self.title_prefix, readout)
        }
    }

    pub fn render(&mut self, canvas: &mut Canvas<Window>, readout: &str, paused: bool) -> Result<(), String> {
        let Some(font) = &self.font else {
            let title = self.title_for(readout, paused);
            if title != self.shown_title {
                canvas.window_mut().set_title(&title).map_err(|e| e.to_string())?;
                self.shown_title = title;
            }
            return Ok(());
        };

        let text = if paused {
            format!("{}  (paused)", readout)
        } else {
            readout.to_string()
        };

        let cached = self.rendered.as_ref().map(|(shown, _)| shown.as_str());
        if needs_raster(cached, &text) {
            let surface = font
                .render(&text)
                .blended(Color::RGB(255, 255, 255))
                .map_err(|e| e.to_string())?;
            self.rendered = Some((text, surface));
        }
        let Some((_, surface)) = &self.rendered else {
            return Ok(());
        };

        let texture_creator = self
            .texture_creator
            .get_or_insert_with(|| canvas.texture_creator());
        let texture = texture_creator
            .create_texture_from_surface(surface)
            .map_err(|e| e.to_string())?;
        let TextureQuery { width, height, .. } = texture.query();

        // backing panel keeps the text readable over sky and road
        canvas.set_blend_mode(BlendMode::Blend);
        canvas.set_draw_color(Color::RGBA(0, 0, 0, 140));
        canvas.fill_rect(Rect::new(
            MARGIN - 6,
            MARGIN - 4,
            width + 12,
            height + 8,
        ))?;
        canvas.set_blend_mode(BlendMode::None);

        canvas.copy(&texture, None, Some(Rect::new(MARGIN, MARGIN, width, height)))?;
        Ok(())
    }
}

// The font is only rasterised again when the readout text changes
fn needs_raster(cached: Option<&str>, text: &str) -> bool {
    cached != Some(text)
}

/// The requested font when it exists, otherwise the first installed fallback.
pub fn resolve_font(requested: &Path, fallbacks: &[&str]) -> Option<PathBuf> {
    if requested.is_file() {
        return Some(requested.to_path_buf());
    }
    fallbacks.iter().map(PathBuf::from).find(|p| p.is_file())
}

fn load_font<'ttf>(ctx: &'ttf Sdl2TtfContext, path: &Path) -> Result<Font<'ttf, 'static>, DriveError> {
    ctx.load_font(path, FONT_SIZE)
        .map_err(|e| DriveError::Font(format!("{}: {}", path.display(), e)))
}
