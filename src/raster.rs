use sdl2::pixels::Color;
use sdl2::render::{BlendMode, Canvas};
use sdl2::video::Window;

/// One horizontal run of pixels, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub y: i32,
    pub x0: i32,
    pub x1: i32,
}

/// Scanline coverage of a polygon, clipped to a `width` x `height` target.
///
/// Samples each row at its centre and pairs edge crossings with the
/// even-odd rule, so concave outlines work too. Degenerate or fully
/// off-screen polygons yield nothing.
pub fn polygon_spans(points: &[(f32, f32)], width: u32, height: u32) -> Vec<Span> {
    let mut spans = Vec::new();
    if points.len() < 3 || width == 0 || height == 0 {
        return spans;
    }
    if points.iter().any(|(x, y)| !x.is_finite() || !y.is_finite()) {
        return spans;
    }

    let min_y = points.iter().map(|p| p.1).fold(f32::INFINITY, f32::min);
    let max_y = points.iter().map(|p| p.1).fold(f32::NEG_INFINITY, f32::max);

    let first_row = (min_y - 0.5).ceil().max(0.0) as i32;
    let last_row = ((max_y - 0.5).floor() as i32).min(height as i32 - 1);
    if first_row > last_row {
        return spans;
    }

    let mut crossings: Vec<f32> = Vec::with_capacity(points.len());
    for row in first_row..=last_row {
        let sample_y = row as f32 + 0.5;
        crossings.clear();

        for i in 0..points.len() {
            let (ax, ay) = points[i];
            let (bx, by) = points[(i + 1) % points.len()];
            let crosses = (ay <= sample_y && sample_y < by) || (by <= sample_y && sample_y < ay);
            if crosses {
                crossings.push(ax + (sample_y - ay) * (bx - ax) / (by - ay));
            }
        }
        crossings.sort_by(|a, b| a.total_cmp(b));

        for pair in crossings.chunks_exact(2) {
            let x0 = ((pair[0] - 0.5).ceil() as i32).max(0);
            let x1 = (((pair[1] - 0.5).ceil() as i32) - 1).min(width as i32 - 1);
            if x0 <= x1 {
                spans.push(Span { y: row, x0, x1 });
            }
        }
    }

    spans
}

/// Fills a polygon, alpha-blending when `color.a < 255`.
pub fn fill_polygon(
    canvas: &mut Canvas<Window>,
    points: &[(f32, f32)],
    color: Color,
) -> Result<(), String> {
    let (width, height) = canvas.output_size()?;
    let spans = polygon_spans(points, width, height);
    if spans.is_empty() {
        return Ok(());
    }

    canvas.set_blend_mode(if color.a < 255 {
        BlendMode::Blend
    } else {
        BlendMode::None
    });
    canvas.set_draw_color(color);
    for span in spans {
        canvas.draw_line((span.x0, span.y), (span.x1, span.y))?;
    }
    canvas.set_blend_mode(BlendMode::None);

    Ok(())
}

/// Axis-aligned rectangle from floating point corners, clipped by SDL.
pub fn fill_rect(
    canvas: &mut Canvas<Window>,
    x: f32,
    y: f32,
    w: f32,
    h: f32,
    color: Color,
) -> Result<(), String> {
    fill_polygon(canvas, &[(x, y), (x + w, y), (x + w, y + h), (x, y + h)], color)
}
