use rand::Rng;
use sdl2::pixels::Color;

use super::projection::{project, Projected, RoadCamera};
use crate::constants::{
    CAMERA_HEIGHT, COMBO_ROAD_WIDTH, DRAW_DISTANCE, SEGMENTS_PER_ROAD, SEGMENT_LENGTH,
};
use crate::drive::DriveState;

const ROAD_LIGHT: Color = Color::RGB(0x90, 0x90, 0x90);
const ROAD_DARK: Color = Color::RGB(0x80, 0x80, 0x80);
const RUMBLE_RED: Color = Color::RGB(0xC0, 0x20, 0x20);
const RUMBLE_WHITE: Color = Color::RGB(0xF0, 0xF0, 0xF0);
const LANE_MARKER: Color = Color::RGB(0xFF, 0xFF, 0xFF);

// Anything closer than this would project far below the screen anyway
const NEAR_CLIP: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentColors {
    pub road: Color,
    pub rumble: Color,
    pub lane: Option<Color>,
}

impl SegmentColors {
    /// Stripes alternate by absolute segment index so they scroll with the
    /// road instead of sitting still on screen.
    pub fn for_index(index: u64) -> Self {
        let even = index % 2 == 0;
        SegmentColors {
            road: if even { ROAD_LIGHT } else { ROAD_DARK },
            rumble: if even { RUMBLE_RED } else { RUMBLE_WHITE },
            lane: if even { Some(LANE_MARKER) } else { None },
        }
    }
}

/// Roadside scenery, placed relative to the road centre in world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tree {
    pub offset: f32,
    pub height: f32,
}

/// Segment `index` between its near and far edges on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentQuad {
    pub index: u64,
    pub near: Projected,
    pub far: Projected,
    pub colors: SegmentColors,
    pub tree: Option<(Tree, Projected)>,
}

/// A looping strip of segments with scenery decided once up front.
pub struct Track {
    trees: Vec<Option<Tree>>,
}

impl Track {
    pub fn generate<R: Rng>(rng: &mut R) -> Self {
        let trees = (0..SEGMENTS_PER_ROAD)
            .map(|_| {
                if !rng.gen_bool(0.3) {
                    return None;
                }
                let side = if rng.gen_bool(0.5) { -1.0 } else { 1.0 };
                let distance = rng.gen_range(1.2..2.5) * COMBO_ROAD_WIDTH / 2.0;
                Some(Tree {
                    offset: side * distance,
                    height: rng.gen_range(900.0..1600.0),
                })
            })
            .collect();
        Track { trees }
    }

    pub fn tree_at(&self, index: u64) -> Option<Tree> {
        self.trees[(index % self.trees.len() as u64) as usize]
    }

    pub fn camera_for(drive: &DriveState) -> RoadCamera {
        RoadCamera {
            x: drive.player_x,
            y: CAMERA_HEIGHT,
            z: drive.position,
        }
    }

    /// Segments from the camera out to the draw distance, nearest first.
    pub fn visible_segments(&self, drive: &DriveState, width: u32, height: u32) -> Vec<SegmentQuad> {
        let camera = Self::camera_for(drive);
        let length = SEGMENT_LENGTH as f64;
        let base = (drive.position.max(0.0) / length).floor() as u64;

        let mut quads = Vec::with_capacity(DRAW_DISTANCE);
        for n in 0..DRAW_DISTANCE as u64 {
            let index = base + n;
            let near_z = (index as f64 * length).max(camera.z + NEAR_CLIP);
            let far_z = (index + 1) as f64 * length;

            let (Some(near), Some(far)) = (
                project(0.0, 0.0, near_z, &camera, width, height, COMBO_ROAD_WIDTH),
                project(0.0, 0.0, far_z, &camera, width, height, COMBO_ROAD_WIDTH),
            ) else {
                continue;
            };

            let tree = self.tree_at(index).and_then(|tree| {
                project(tree.offset, 0.0, far_z, &camera, width, height, COMBO_ROAD_WIDTH)
                    .map(|base| (tree, base))
            });

            quads.push(SegmentQuad {
                index,
                near,
                far,
                colors: SegmentColors::for_index(index),
                tree,
            });
        }
        quads
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn track() -> Track {
        Track::generate(&mut StdRng::seed_from_u64(7))
    }

    #[test]
    fn draws_up_to_draw_distance() {
        let quads = track().visible_segments(&DriveState::default(), 800, 600);
        assert_eq!(quads.len(), DRAW_DISTANCE);
        assert_eq!(quads[0].index, 0);
        assert_eq!(quads.last().unwrap().index, DRAW_DISTANCE as u64 - 1);
    }

    #[test]
    fn segments_recede_towards_horizon() {
        let drive = DriveState {
            position: 12_345.0,
            ..DriveState::default()
        };
        let quads = track().visible_segments(&drive, 800, 600);
        assert_eq!(quads[0].index, 61);
        for quad in &quads {
            assert!(quad.near.y >= quad.far.y);
            assert!(quad.near.half_width >= quad.far.half_width);
            assert!(quad.far.y > 300.0);
        }
        for pair in quads.windows(2) {
            assert_eq!(pair[0].far, pair[1].near);
        }
    }

    #[test]
    fn stripes_follow_absolute_index() {
        let t = track();
        let a = t.visible_segments(&DriveState::default(), 800, 600);
        let b = t.visible_segments(
            &DriveState {
                position: SEGMENT_LENGTH as f64,
                ..DriveState::default()
            },
            800,
            600,
        );
        // the segment that was second is now first, with the same colours
        assert_eq!(a[1].index, b[0].index);
        assert_eq!(a[1].colors, b[0].colors);
        assert_ne!(SegmentColors::for_index(0), SegmentColors::for_index(1));
    }

    #[test]
    fn odd_segments_are_dark() {
        assert_eq!(SegmentColors::for_index(0).road, ROAD_LIGHT);
        assert_eq!(SegmentColors::for_index(1).road, ROAD_DARK);
        assert_eq!(SegmentColors::for_index(501).road, ROAD_DARK);
        assert_eq!(SegmentColors::for_index(0).rumble, RUMBLE_RED);
        assert!(SegmentColors::for_index(0).lane.is_some());
        assert!(SegmentColors::for_index(1).lane.is_none());
    }

    #[test]
    fn trees_stay_off_the_road() {
        let t = track();
        let mut count = 0;
        for i in 0..SEGMENTS_PER_ROAD as u64 {
            if let Some(tree) = t.tree_at(i) {
                count += 1;
                assert!(tree.offset.abs() > COMBO_ROAD_WIDTH / 2.0);
            }
        }
        assert!(count > 0);
        // layout repeats every lap
        assert_eq!(t.tree_at(3), t.tree_at(3 + SEGMENTS_PER_ROAD as u64));
    }
}
