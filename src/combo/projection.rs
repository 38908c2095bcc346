use crate::constants::CAMERA_DEPTH;

/// Viewer position in road space. `z` is the forward distance travelled and
/// needs the extra precision once the odometer gets large.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoadCamera {
    pub x: f32,
    pub y: f32,
    pub z: f64,
}

/// A road-space point on screen. `half_width` is half of `road_width`
/// at that depth, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    pub x: f32,
    pub y: f32,
    pub half_width: f32,
    pub scale: f32,
}

/// Pseudo-3D projection of `(x, y, z)` for a `width` x `height` screen.
///
/// Returns `None` for points level with or behind the camera.
pub fn project(
    x: f32,
    y: f32,
    z: f64,
    camera: &RoadCamera,
    width: u32,
    height: u32,
    road_width: f32,
) -> Option<Projected> {
    let dz = (z - camera.z) as f32;
    if dz <= 0.0 {
        return None;
    }

    let scale = CAMERA_DEPTH / dz;
    let half_w = width as f32 / 2.0;
    let half_h = height as f32 / 2.0;

    Some(Projected {
        x: half_w + scale * (x - camera.x) * half_w,
        y: half_h - scale * (y - camera.y) * half_h,
        half_width: scale * (road_width / 2.0) * half_w,
        scale,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{CAMERA_HEIGHT, COMBO_ROAD_WIDTH};

    fn camera(x: f32) -> RoadCamera {
        RoadCamera {
            x,
            y: CAMERA_HEIGHT,
            z: 0.0,
        }
    }

    #[test]
    fn road_converges_on_horizon() {
        let near = project(0.0, 0.0, 1000.0, &camera(0.0), 800, 600, COMBO_ROAD_WIDTH).unwrap();
        let far = project(0.0, 0.0, 100_000.0, &camera(0.0), 800, 600, COMBO_ROAD_WIDTH).unwrap();

        assert_eq!(near.x, 400.0);
        assert!(near.y > far.y);
        assert!(far.y > 300.0 && far.y < 305.0);
        assert!(near.half_width > far.half_width);
    }

    #[test]
    fn matches_closed_form() {
        let p = project(0.0, 0.0, 840.0, &camera(0.0), 800, 600, COMBO_ROAD_WIDTH).unwrap();
        // scale = 0.84 / 840 = 0.001
        assert!((p.scale - 0.001).abs() < 1e-9);
        assert!((p.y - 600.0).abs() < 1e-3);
        assert!((p.half_width - 400.0).abs() < 1e-3);
    }

    #[test]
    fn moving_right_shifts_road_left() {
        let centred = project(0.0, 0.0, 2000.0, &camera(0.0), 800, 600, COMBO_ROAD_WIDTH).unwrap();
        let shifted = project(0.0, 0.0, 2000.0, &camera(500.0), 800, 600, COMBO_ROAD_WIDTH).unwrap();
        assert!(shifted.x < centred.x);
    }

    #[test]
    fn points_behind_camera_are_rejected() {
        let mut cam = camera(0.0);
        cam.z = 5000.0;
        assert!(project(0.0, 0.0, 5000.0, &cam, 800, 600, COMBO_ROAD_WIDTH).is_none());
        assert!(project(0.0, 0.0, 4000.0, &cam, 800, 600, COMBO_ROAD_WIDTH).is_none());
    }
}
