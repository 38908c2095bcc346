use std::f32::consts::{PI, TAU};

use glam::Vec3;

/// A planar polygon in mesh-local space, wound counter-clockwise when seen
/// from outside.
#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    pub vertices: Vec<Vec3>,
}

impl Face {
    pub fn new(vertices: Vec<Vec3>) -> Self {
        Face { vertices }
    }

    /// Newell's method; robust for quads that are slightly non-planar.
    pub fn normal(&self) -> Vec3 {
        let mut n = Vec3::ZERO;
        for (i, a) in self.vertices.iter().enumerate() {
            let b = self.vertices[(i + 1) % self.vertices.len()];
            n.x += (a.y - b.y) * (a.z + b.z);
            n.y += (a.z - b.z) * (a.x + b.x);
            n.z += (a.x - b.x) * (a.y + b.y);
        }
        n.normalize_or_zero()
    }

}

pub fn centroid(points: &[Vec3]) -> Vec3 {
    points.iter().copied().sum::<Vec3>() / points.len().max(1) as f32
}

/// Polygon soup for one primitive. Dimensions follow the usual scene-graph
/// conventions: everything is centred on the origin, and round shapes
/// stand along +y.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub faces: Vec<Face>,
    /// Planes are visible from both sides; solids get back-face culled.
    pub double_sided: bool,
}

impl Mesh {
    pub fn cuboid(width: f32, height: f32, depth: f32) -> Self {
        let (x, y, z) = (width / 2.0, height / 2.0, depth / 2.0);
        let v = |sx: f32, sy: f32, sz: f32| Vec3::new(sx * x, sy * y, sz * z);

        let faces = vec![
            // +x
            Face::new(vec![v(1., -1., 1.), v(1., -1., -1.), v(1., 1., -1.), v(1., 1., 1.)]),
            // -x
            Face::new(vec![v(-1., -1., -1.), v(-1., -1., 1.), v(-1., 1., 1.), v(-1., 1., -1.)]),
            // +y
            Face::new(vec![v(-1., 1., 1.), v(1., 1., 1.), v(1., 1., -1.), v(-1., 1., -1.)]),
            // -y
            Face::new(vec![v(-1., -1., -1.), v(1., -1., -1.), v(1., -1., 1.), v(-1., -1., 1.)]),
            // +z
            Face::new(vec![v(-1., -1., 1.), v(1., -1., 1.), v(1., 1., 1.), v(-1., 1., 1.)]),
            // -z
            Face::new(vec![v(1., -1., -1.), v(-1., -1., -1.), v(-1., 1., -1.), v(1., 1., -1.)]),
        ];

        Mesh {
            faces,
            double_sided: false,
        }
    }

    /// Flat rectangle in the xy plane facing +z, split into a grid so that
    /// per-face fog and clipping stay smooth over long distances.
    pub fn plane(width: f32, height: f32, width_segments: usize, height_segments: usize) -> Self {
        let width_segments = width_segments.max(1);
        let height_segments = height_segments.max(1);
        let cell_w = width / width_segments as f32;
        let cell_h = height / height_segments as f32;
        let (x0, y0) = (-width / 2.0, -height / 2.0);

        let mut faces = Vec::with_capacity(width_segments * height_segments);
        for iy in 0..height_segments {
            for ix in 0..width_segments {
                let left = x0 + ix as f32 * cell_w;
                let bottom = y0 + iy as f32 * cell_h;
                faces.push(Face::new(vec![
                    Vec3::new(left, bottom, 0.0),
                    Vec3::new(left + cell_w, bottom, 0.0),
                    Vec3::new(left + cell_w, bottom + cell_h, 0.0),
                    Vec3::new(left, bottom + cell_h, 0.0),
                ]));
            }
        }

        Mesh {
            faces,
            double_sided: true,
        }
    }

    pub fn sphere(radius: f32, width_segments: usize, height_segments: usize) -> Self {
        let width_segments = width_segments.max(3);
        let height_segments = height_segments.max(2);

        let point = |ix: usize, iy: usize| {
            let phi = ix as f32 / width_segments as f32 * TAU;
            let theta = iy as f32 / height_segments as f32 * PI;
            Vec3::new(
                -radius * phi.cos() * theta.sin(),
                radius * theta.cos(),
                radius * phi.sin() * theta.sin(),
            )
        };

        let mut faces = Vec::with_capacity(width_segments * height_segments);
        for iy in 0..height_segments {
            for ix in 0..width_segments {
                let quad = [
                    point(ix, iy),
                    point(ix, iy + 1),
                    point(ix + 1, iy + 1),
                    point(ix + 1, iy),
                ];
                let mut vertices: Vec<Vec3> = Vec::with_capacity(4);
                for p in quad {
                    if !vertices.iter().any(|q| q.distance_squared(p) < 1e-12) {
                        vertices.push(p);
                    }
                }
                if vertices.len() >= 3 {
                    faces.push(Face::new(vertices));
                }
            }
        }

        Mesh {
            faces,
            double_sided: false,
        }
    }

    pub fn cylinder(radius_top: f32, radius_bottom: f32, height: f32, segments: usize) -> Self {
        let segments = segments.max(3);
        let half = height / 2.0;
        let ring = |radius: f32, y: f32, i: usize| {
            let angle = i as f32 / segments as f32 * TAU;
            Vec3::new(radius * angle.sin(), y, radius * angle.cos())
        };

        let mut faces = Vec::with_capacity(segments + 2);
        for i in 0..segments {
            let mut side = vec![ring(radius_bottom, -half, i), ring(radius_bottom, -half, i + 1)];
            let top_next = ring(radius_top, half, i + 1);
            let top = ring(radius_top, half, i);
            if radius_top > 0.0 {
                side.push(top_next);
                side.push(top);
            } else {
                side.push(top);
            }
            faces.push(Face::new(side));
        }

        if radius_top > 0.0 {
            faces.push(Face::new(
                (0..segments).map(|i| ring(radius_top, half, i)).collect(),
            ));
        }
        if radius_bottom > 0.0 {
            faces.push(Face::new(
                (0..segments).rev().map(|i| ring(radius_bottom, -half, i)).collect(),
            ));
        }

        Mesh {
            faces,
            double_sided: false,
        }
    }

    pub fn cone(radius: f32, height: f32, segments: usize) -> Self {
        Self::cylinder(0.0, radius, height, segments)
    }
}
