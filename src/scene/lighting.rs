use glam::Vec3;
use sdl2::pixels::Color;

use super::graph::Material;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    pub color: Color,
    pub intensity: f32,
}

/// Parallel light shining from `position` towards the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    pub color: Color,
    pub intensity: f32,
    pub position: Vec3,
    pub cast_shadow: bool,
}

impl DirectionalLight {
    /// Unit vector pointing from the surface towards the light.
    pub fn direction(&self) -> Vec3 {
        self.position.normalize_or_zero()
    }
}

/// Linear distance fog.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fog {
    pub color: Color,
    pub near: f32,
    pub far: f32,
}

impl Fog {
    pub fn factor(&self, distance: f32) -> f32 {
        if self.far <= self.near {
            return if distance >= self.far { 1.0 } else { 0.0 };
        }
        ((distance - self.near) / (self.far - self.near)).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lighting {
    pub ambient: AmbientLight,
    pub sun: DirectionalLight,
    pub fog: Option<Fog>,
}

impl Lighting {
    /// Phong-style shading of a flat face.
    ///
    /// `to_eye` points from the face towards the camera; `distance` is the
    /// view depth used for fog. Alpha carries the material opacity.
    pub fn shade(&self, material: &Material, normal: Vec3, to_eye: Vec3, distance: f32) -> Color {
        let base = to_rgb(material.color);
        let ambient = to_rgb(self.ambient.color) * self.ambient.intensity;

        let l = self.sun.direction();
        let diffuse = to_rgb(self.sun.color) * self.sun.intensity * normal.dot(l).max(0.0);

        let mut rgb = base * (ambient + diffuse);

        if let Some(specular) = material.specular {
            let half = (l + to_eye.normalize_or_zero()).normalize_or_zero();
            let highlight = normal.dot(half).max(0.0).powf(material.shininess.max(1.0));
            rgb += to_rgb(specular) * to_rgb(self.sun.color) * self.sun.intensity * highlight;
        }

        rgb = rgb.clamp(Vec3::ZERO, Vec3::ONE);

        if let Some(fog) = &self.fog {
            rgb = rgb.lerp(to_rgb(fog.color), fog.factor(distance));
        }

        from_rgb(rgb, material.opacity)
    }

    /// Flattens `vertices` onto the `y = 0` plane along the sun direction.
    /// Points at or below the ground, or a sun at the horizon, give `None`.
    pub fn project_shadow(&self, vertices: &[Vec3], lift: f32) -> Option<Vec<Vec3>> {
        let l = self.sun.direction();
        if !self.sun.cast_shadow || l.y <= 1e-4 {
            return None;
        }
        if vertices.iter().all(|v| v.y <= 0.0) {
            return None;
        }
        Some(
            vertices
                .iter()
                .map(|v| {
                    let t = v.y.max(0.0) / l.y;
                    Vec3::new(v.x - l.x * t, lift, v.z - l.z * t)
                })
                .collect(),
        )
    }
}

pub fn to_rgb(color: Color) -> Vec3 {
    Vec3::new(color.r as f32, color.g as f32, color.b as f32) / 255.0
}

pub fn from_rgb(rgb: Vec3, opacity: f32) -> Color {
    let c = (rgb.clamp(Vec3::ZERO, Vec3::ONE) * 255.0).round();
    Color::RGBA(c.x as u8, c.y as u8, c.z as u8, (opacity.clamp(0.0, 1.0) * 255.0).round() as u8)
}

pub fn hex(rgb: u32) -> Color {
    Color::RGB((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
}
