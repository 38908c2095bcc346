use std::cmp::Ordering;

use glam::Vec3;
use sdl2::pixels::Color;
use sdl2::render::Canvas;
use sdl2::video::Window;

use super::camera::PerspectiveCamera;
use super::graph::{RenderLayer, SceneGraph, WorldFace};
use super::lighting::Lighting;
use super::mesh::centroid;
use crate::raster::fill_polygon;

const SHADOW_LIFT: f32 = 0.02;

/// A screen-space polygon ready to be filled.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawPolygon {
    pub points: Vec<(f32, f32)>,
    pub color: Color,
    pub layer: RenderLayer,
    pub depth: f32,
}

pub struct SceneRenderer {
    pub background: Color,
    pub lighting: Lighting,
    pub shadow_color: Color,
}

impl SceneRenderer {
    pub fn new(background: Color, lighting: Lighting) -> Self {
        SceneRenderer {
            background,
            lighting,
            shadow_color: Color::RGBA(0, 0, 0, 90),
        }
    }

    pub fn render(
        &self,
        canvas: &mut Canvas<Window>,
        graph: &SceneGraph,
        camera: &PerspectiveCamera,
    ) -> Result<(), String> {
        let (width, height) = canvas.output_size()?;

        canvas.set_draw_color(self.background);
        canvas.clear();

        for polygon in self.draw_list(graph, camera, width, height) {
            fill_polygon(canvas, &polygon.points, polygon.color)?;
        }

        Ok(())
    }

    /// Painter's-order list: layer first, then far to near inside a layer.
    pub fn draw_list(
        &self,
        graph: &SceneGraph,
        camera: &PerspectiveCamera,
        width: u32,
        height: u32,
    ) -> Vec<DrawPolygon> {
        let view = camera.view_matrix();
        let mut list = Vec::new();

        for face in graph.world_faces() {
            if face.cast_shadow {
                self.emit_shadow(&face, camera, width, height, &mut list);
            }

            let centre = centroid(&face.vertices);
            let to_eye = camera.position - centre;
            let facing = face.normal.dot(to_eye);
            if facing <= 0.0 && !face.double_sided {
                continue;
            }
            // A double-sided face seen from behind is lit like its front
            let normal = if facing < 0.0 { -face.normal } else { face.normal };

            let distance = -view.transform_point3(centre).z;
            let color = self.lighting.shade(&face.material, normal, to_eye, distance);
            if color.a == 0 {
                continue;
            }
            push_polygon(&face.vertices, color, face.layer, camera, width, height, &mut list);
        }

        list.sort_by(|a, b| {
            a.layer
                .cmp(&b.layer)
                .then(b.depth.partial_cmp(&a.depth).unwrap_or(Ordering::Equal))
        });
        list
    }

    // Only faces lit by the sun contribute, so a closed mesh darkens its
    // footprint exactly once.
    fn emit_shadow(
        &self,
        face: &WorldFace,
        camera: &PerspectiveCamera,
        width: u32,
        height: u32,
        list: &mut Vec<DrawPolygon>,
    ) {
        if face.normal.dot(self.lighting.sun.direction()) <= 0.0 {
            return;
        }
        if let Some(flat) = self.lighting.project_shadow(&face.vertices, SHADOW_LIFT) {
            let color = Color::RGBA(
                self.shadow_color.r,
                self.shadow_color.g,
                self.shadow_color.b,
                (self.shadow_color.a as f32 * face.material.opacity).round() as u8,
            );
            push_polygon(&flat, color, RenderLayer::Shadow, camera, width, height, list);
        }
    }
}

fn push_polygon(
    world: &[Vec3],
    color: Color,
    layer: RenderLayer,
    camera: &PerspectiveCamera,
    width: u32,
    height: u32,
    list: &mut Vec<DrawPolygon>,
) {
    let view = camera.view_matrix();
    let in_view: Vec<Vec3> = world.iter().map(|v| view.transform_point3(*v)).collect();
    if in_view.iter().all(|v| -v.z > camera.far) {
        return;
    }

    let clipped = clip_near(&in_view, camera.near);
    if clipped.len() < 3 {
        return;
    }

    let depth = clipped.iter().map(|v| -v.z).sum::<f32>() / clipped.len() as f32;
    let points = clipped
        .iter()
        .map(|v| camera.view_to_screen(*v, width, height))
        .collect();

    list.push(DrawPolygon {
        points,
        color,
        layer,
        depth,
    });
}

/// Sutherland-Hodgman against the near plane. View space looks down -z,
/// so a point is kept when `-z >= near`.
pub fn clip_near(polygon: &[Vec3], near: f32) -> Vec<Vec3> {
    let inside = |v: &Vec3| -v.z >= near;
    let mut out = Vec::with_capacity(polygon.len() + 2);

    for (i, current) in polygon.iter().enumerate() {
        let previous = &polygon[(i + polygon.len() - 1) % polygon.len()];
        match (inside(previous), inside(current)) {
            (true, true) => out.push(*current),
            (true, false) => out.push(intersect(*previous, *current, near)),
            (false, true) => {
                out.push(intersect(*previous, *current, near));
                out.push(*current);
            }
            (false, false) => {}
        }
    }

    out
}

fn intersect(a: Vec3, b: Vec3, near: f32) -> Vec3 {
    let t = (-near - a.z) / (b.z - a.z);
    a.lerp(b, t)
}
