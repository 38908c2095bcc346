use glam::{Mat4, Vec3, Vec4};

/// Perspective camera that always looks at a target point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveCamera {
    pub position: Vec3,
    pub target: Vec3,
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl PerspectiveCamera {
    pub fn new(fov: f32, aspect: f32, near: f32, far: f32) -> Self {
        PerspectiveCamera {
            position: Vec3::ZERO,
            target: Vec3::Z,
            fov,
            aspect,
            near,
            far,
        }
    }

    pub fn look_at(&mut self, target: Vec3) {
        self.target = target;
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov.to_radians(), self.aspect, self.near, self.far)
    }

    /// Projects a view-space point (already in front of the near plane) to
    /// pixel coordinates.
    pub fn view_to_screen(&self, view: Vec3, width: u32, height: u32) -> (f32, f32) {
        let clip = self.projection_matrix() * Vec4::new(view.x, view.y, view.z, 1.0);
        let ndc_x = clip.x / clip.w;
        let ndc_y = clip.y / clip.w;
        (
            (ndc_x + 1.0) * 0.5 * width as f32,
            (1.0 - ndc_y) * 0.5 * height as f32,
        )
    }

    /// World point to pixels, or `None` when it sits behind the near plane.
    #[cfg(test)]
    pub fn project(&self, world: Vec3, width: u32, height: u32) -> Option<(f32, f32)> {
        let view = self.view_matrix().transform_point3(world);
        if -view.z < self.near {
            return None;
        }
        Some(self.view_to_screen(view, width, height))
    }
}
