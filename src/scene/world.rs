use std::f32::consts::FRAC_PI_2;

use glam::Vec3;
use sdl2::render::Canvas;
use sdl2::video::Window;

use super::camera::PerspectiveCamera;
use super::graph::{Material, MeshNode, NodeId, RenderLayer, SceneGraph, Transform};
use super::lighting::{hex, AmbientLight, DirectionalLight, Fog, Lighting};
use super::mesh::Mesh;
use super::renderer::SceneRenderer;
use crate::constants::{GRASS_WIDTH, ROAD_LENGTH, ROAD_LINE_SPACING, ROAD_SEGMENTS, ROAD_WIDTH};
use crate::drive::DriveState;
use crate::game::RoadView;

const SKY: u32 = 0x87CEEB;
const CHARACTER_HEIGHT: f32 = 1.0;
const HAIR_Z: f32 = -0.1;

/// The camera looks down +z, which puts world +x on the left of the
/// screen. Steering right has to move the car towards -x.
pub fn lateral(player_x: f32) -> f32 {
    -player_x
}

/// Car and road assembled from primitives, plus the camera chasing it.
pub struct DriveScene {
    graph: SceneGraph,
    camera: PerspectiveCamera,
    renderer: SceneRenderer,
    road: NodeId,
    car: NodeId,
    driver: NodeId,
    passenger: NodeId,
    hair: NodeId,
}

impl DriveScene {
    pub fn new(width: u32, height: u32) -> Self {
        let mut graph = SceneGraph::new();

        let road = create_road(&mut graph);
        let (car, driver, passenger, hair) = create_car(&mut graph);

        let mut camera = PerspectiveCamera::new(75.0, 1.0, 0.1, 2000.0);
        camera.set_viewport(width, height);
        camera.position = Vec3::new(0.0, 5.0, -10.0);
        camera.look_at(Vec3::ZERO);

        let lighting = Lighting {
            ambient: AmbientLight {
                color: hex(0xFFFFFF),
                intensity: 0.7,
            },
            sun: DirectionalLight {
                color: hex(0xFFFFFF),
                intensity: 1.0,
                position: Vec3::new(100.0, 100.0, 50.0),
                cast_shadow: true,
            },
            fog: Some(Fog {
                color: hex(SKY),
                near: 100.0,
                far: 1000.0,
            }),
        };

        tracing::debug!(nodes = graph.len(), "scene built");
        for id in [road, car, driver, passenger] {
            let node = graph.node(id);
            tracing::debug!(node = %node.name, children = graph.children(id).len(), "assembled");
        }

        DriveScene {
            graph,
            camera,
            renderer: SceneRenderer::new(hex(SKY), lighting),
            road,
            car,
            driver,
            passenger,
            hair,
        }
    }

    #[cfg(test)]
    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    #[cfg(test)]
    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    fn animate_characters(&mut self, time: f32) {
        self.graph.node_mut(self.driver).transform.position.y =
            CHARACTER_HEIGHT + (time * 2.0).sin() * 0.05;
        self.graph.node_mut(self.passenger).transform.position.y =
            CHARACTER_HEIGHT + (time * 2.0).cos() * 0.05;
        self.graph.node_mut(self.hair).transform.position.z = HAIR_Z + (time * 3.0).sin() * 0.05;
    }
}

impl RoadView for DriveScene {
    fn sync(&mut self, drive: &DriveState, elapsed: f32) {
        let x = lateral(drive.player_x);

        self.graph.node_mut(self.car).transform.position.x = x;
        self.graph.node_mut(self.road).transform.position.z =
            -(drive.position.rem_euclid(ROAD_LENGTH as f64) as f32);

        self.camera.position = Vec3::new(x * 0.5, 5.0, -10.0);
        self.camera.look_at(Vec3::new(x, 0.0, 20.0));

        self.animate_characters(elapsed);
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.camera.set_viewport(width, height);
    }

    fn render(&self, canvas: &mut Canvas<Window>) -> Result<(), String> {
        self.renderer.render(canvas, &self.graph, &self.camera)
    }
}

fn solid(mesh: Mesh, color: u32, layer: RenderLayer) -> MeshNode {
    MeshNode {
        mesh,
        material: Material::phong(hex(color)),
        layer,
        cast_shadow: false,
    }
}

fn create_road(graph: &mut SceneGraph) -> NodeId {
    let road = graph.add_group(None, "road", Transform::default());
    for i in 0..ROAD_SEGMENTS {
        create_road_segment(graph, road, i);
    }
    road
}

// The first segment sits behind the car so the strip under the camera is
// never bare while the road wraps.
fn create_road_segment(graph: &mut SceneGraph, road: NodeId, index: usize) {
    let segment = graph.add_group(
        Some(road),
        &format!("segment {}", index),
        Transform::at(0.0, 0.0, (index as f32 - 1.0) * ROAD_LENGTH),
    );
    let rows = (ROAD_LENGTH as usize) / ROAD_LINE_SPACING;

    graph.add_mesh(
        Some(segment),
        "asphalt",
        Transform::at(0.0, 0.0, ROAD_LENGTH / 2.0).rotated_x(-FRAC_PI_2),
        solid(Mesh::plane(ROAD_WIDTH, ROAD_LENGTH, 1, rows), 0x404040, RenderLayer::Road),
    );

    let line = Mesh::cuboid(0.3, 0.1, 5.0);
    for row in 0..rows {
        graph.add_mesh(
            Some(segment),
            "centre line",
            Transform::at(0.0, 0.05, (row * ROAD_LINE_SPACING) as f32),
            solid(line.clone(), 0xFFFFFF, RenderLayer::Marking),
        );
    }

    graph.add_mesh(
        Some(segment),
        "grass",
        Transform::at(0.0, -0.1, ROAD_LENGTH / 2.0).rotated_x(-FRAC_PI_2),
        solid(Mesh::plane(GRASS_WIDTH, ROAD_LENGTH, 4, rows), 0x1AB82C, RenderLayer::Ground),
    );
}

fn create_car(graph: &mut SceneGraph) -> (NodeId, NodeId, NodeId, NodeId) {
    let car = graph.add_group(None, "car", Transform::default());

    graph.add_mesh(
        Some(car),
        "body",
        Transform::at(0.0, 0.5, 0.0),
        MeshNode {
            mesh: Mesh::cuboid(2.4, 0.5, 4.8),
            material: Material::phong(hex(0xFF0000)).with_specular(hex(0x555555), 30.0),
            layer: RenderLayer::Object,
            cast_shadow: true,
        },
    );

    graph.add_mesh(
        Some(car),
        "windshield",
        Transform::at(0.0, 1.0, -0.3),
        MeshNode {
            mesh: Mesh::cuboid(2.0, 0.4, 1.8),
            material: Material::phong(hex(0x222222)).with_opacity(0.7),
            layer: RenderLayer::Object,
            cast_shadow: true,
        },
    );

    let driver = create_driver(graph, car);
    let (passenger, hair) = create_passenger(graph, car);

    (car, driver, passenger, hair)
}

fn create_driver(graph: &mut SceneGraph, car: NodeId) -> NodeId {
    let driver = graph.add_group(Some(car), "driver", Transform::at(-0.4, CHARACTER_HEIGHT, 0.0));
    let part = |mesh, color| solid(mesh, color, RenderLayer::Object);

    graph.add_mesh(Some(driver), "overalls", Transform::default(), part(Mesh::cuboid(0.4, 0.5, 0.4), 0x0000FF));
    graph.add_mesh(Some(driver), "shirt", Transform::at(0.0, 0.3, 0.0), part(Mesh::cuboid(0.4, 0.3, 0.4), 0xFF0000));
    graph.add_mesh(Some(driver), "head", Transform::at(0.0, 0.6, 0.0), part(Mesh::sphere(0.25, 16, 16), 0xFFC896));
    graph.add_mesh(Some(driver), "cap", Transform::at(0.0, 0.75, 0.0), part(Mesh::cuboid(0.35, 0.12, 0.35), 0xFF0000));

    driver
}

fn create_passenger(graph: &mut SceneGraph, car: NodeId) -> (NodeId, NodeId) {
    let passenger = graph.add_group(Some(car), "passenger", Transform::at(0.4, CHARACTER_HEIGHT, 0.0));
    let part = |mesh, color| solid(mesh, color, RenderLayer::Object);

    graph.add_mesh(Some(passenger), "dress", Transform::default(), part(Mesh::cone(0.3, 0.8, 8), 0xFFB6C1));
    graph.add_mesh(
        Some(passenger),
        "crown",
        Transform::at(0.0, 0.9, 0.0),
        part(Mesh::cylinder(0.15, 0.2, 0.15, 8), 0xFFD700),
    );
    let hair = graph.add_mesh(
        Some(passenger),
        "hair",
        Transform::at(0.0, 0.7, HAIR_Z),
        part(Mesh::cuboid(0.45, 0.35, 0.15), 0xF5D76E),
    );

    (passenger, hair)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::graph::RenderLayer;

    fn scene() -> DriveScene {
        DriveScene::new(800, 600)
    }

    #[test]
    fn builds_three_segments_with_lines() {
        let scene = scene();
        let road = scene.graph().find("road").unwrap();
        assert_eq!(scene.graph().children(road).len(), ROAD_SEGMENTS);

        let first = scene.graph().children(road)[0];
        assert_eq!(scene.graph().node(first).transform.position.z, -ROAD_LENGTH);
        let segment = scene.graph().children(road)[1];
        assert_eq!(scene.graph().node(segment).transform.position.z, 0.0);
        // asphalt + 100 dashes + grass
        assert_eq!(scene.graph().children(segment).len(), 102);
    }

    #[test]
    fn car_is_assembled_from_primitives() {
        let scene = scene();
        let car = scene.graph().find("car").unwrap();
        // body, windshield, driver, passenger
        assert_eq!(scene.graph().children(car).len(), 4);
        let driver = scene.graph().find("driver").unwrap();
        assert_eq!(scene.graph().children(driver).len(), 4);
        let passenger = scene.graph().find("passenger").unwrap();
        assert_eq!(scene.graph().children(passenger).len(), 3);

        let windshield = scene.graph().find("windshield").unwrap();
        let material = scene.graph().node(windshield).mesh.as_ref().unwrap().material;
        assert!((material.opacity - 0.7).abs() < 1e-6);
    }

    #[test]
    fn sync_follows_drive_state() {
        let mut scene = scene();
        let drive = DriveState {
            position: 2500.0,
            player_x: 4.0,
            speed: 3.0,
        };
        scene.sync(&drive, 0.0);

        let car = scene.graph().find("car").unwrap();
        assert_eq!(scene.graph().node(car).transform.position.x, -4.0);
        let road = scene.graph().find("road").unwrap();
        assert_eq!(scene.graph().node(road).transform.position.z, -500.0);

        assert_eq!(scene.camera().position, Vec3::new(-2.0, 5.0, -10.0));
        assert_eq!(scene.camera().target, Vec3::new(-4.0, 0.0, 20.0));
    }

    #[test]
    fn steering_right_moves_car_right_on_screen() {
        let mut scene = scene();
        let centre = scene.camera().project(Vec3::new(0.0, 0.5, 0.0), 800, 600).unwrap();

        scene.sync(
            &DriveState {
                player_x: 6.0,
                ..DriveState::default()
            },
            0.0,
        );
        // camera pans less than the car moves, so the car drifts right
        let car = scene.graph().find("car").unwrap();
        let car_pos = scene.graph().node(car).transform.position + Vec3::new(0.0, 0.5, 0.0);
        let moved = scene.camera().project(car_pos, 800, 600).unwrap();
        assert!(moved.0 > centre.0);
    }

    #[test]
    fn characters_bob_over_time() {
        let mut scene = scene();
        scene.sync(&DriveState::default(), std::f32::consts::FRAC_PI_4);

        let driver = scene.graph().find("driver").unwrap();
        let passenger = scene.graph().find("passenger").unwrap();
        let hair = scene.graph().find("hair").unwrap();
        assert!((scene.graph().node(driver).transform.position.y - 1.05).abs() < 1e-5);
        assert!((scene.graph().node(passenger).transform.position.y - 1.0).abs() < 1e-5);
        let expected_hair = HAIR_Z + (3.0 * std::f32::consts::FRAC_PI_4).sin() * 0.05;
        assert!((scene.graph().node(hair).transform.position.z - expected_hair).abs() < 1e-6);
    }

    #[test]
    fn resize_updates_camera_aspect() {
        let mut scene = scene();
        assert!((scene.camera().aspect - 4.0 / 3.0).abs() < 1e-6);
        scene.resize(1600, 900);
        assert!((scene.camera().aspect - 16.0 / 9.0).abs() < 1e-6);
    }

    #[test]
    fn draw_list_contains_every_layer() {
        let scene = scene();
        let list = scene.renderer.draw_list(scene.graph(), scene.camera(), 800, 600);
        for layer in [
            RenderLayer::Ground,
            RenderLayer::Road,
            RenderLayer::Marking,
            RenderLayer::Shadow,
            RenderLayer::Object,
        ] {
            assert!(list.iter().any(|p| p.layer == layer), "missing {:?}", layer);
        }
    }
}
