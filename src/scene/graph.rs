use glam::{EulerRot, Mat4, Quat, Vec3};
use sdl2::pixels::Color;

use super::mesh::Mesh;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// Draw order bucket. Coplanar layers (grass, asphalt, paint, shadows)
/// can't be depth-sorted against each other, so they are drawn in this
/// order with objects on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RenderLayer {
    Ground,
    Road,
    Marking,
    Shadow,
    Object,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub color: Color,
    pub specular: Option<Color>,
    pub shininess: f32,
    pub opacity: f32,
}

impl Material {
    pub fn phong(color: Color) -> Self {
        Material {
            color,
            specular: None,
            shininess: 30.0,
            opacity: 1.0,
        }
    }

    pub fn with_specular(mut self, specular: Color, shininess: f32) -> Self {
        self.specular = Some(specular);
        self.shininess = shininess;
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    /// Euler angles in radians, applied x then y then z.
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Transform {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn at(x: f32, y: f32, z: f32) -> Self {
        Transform {
            position: Vec3::new(x, y, z),
            ..Transform::default()
        }
    }

    pub fn rotated_x(mut self, radians: f32) -> Self {
        self.rotation.x = radians;
        self
    }

    pub fn matrix(&self) -> Mat4 {
        let rotation = Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z);
        Mat4::from_scale_rotation_translation(self.scale, rotation, self.position)
    }
}

#[derive(Debug, Clone)]
pub struct MeshNode {
    pub mesh: Mesh,
    pub material: Material,
    pub layer: RenderLayer,
    pub cast_shadow: bool,
}

#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,
    pub transform: Transform,
    pub mesh: Option<MeshNode>,
    children: Vec<NodeId>,
}

/// A face after flattening the hierarchy into world space.
#[derive(Debug, Clone)]
pub struct WorldFace {
    pub vertices: Vec<Vec3>,
    pub normal: Vec3,
    pub material: Material,
    pub layer: RenderLayer,
    pub double_sided: bool,
    pub cast_shadow: bool,
}

/// Arena-backed scene graph. Groups are nodes without a mesh.
#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    nodes: Vec<Node>,
    roots: Vec<NodeId>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_group(&mut self, parent: Option<NodeId>, name: &str, transform: Transform) -> NodeId {
        self.insert(parent, name, transform, None)
    }

    pub fn add_mesh(
        &mut self,
        parent: Option<NodeId>,
        name: &str,
        transform: Transform,
        mesh: MeshNode,
    ) -> NodeId {
        self.insert(parent, name, transform, Some(mesh))
    }

    fn insert(
        &mut self,
        parent: Option<NodeId>,
        name: &str,
        transform: Transform,
        mesh: Option<MeshNode>,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            name: name.to_string(),
            transform,
            mesh,
            children: Vec::new(),
        });
        match parent {
            Some(parent) => self.nodes[parent.0].children.push(id),
            None => self.roots.push(id),
        }
        id
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    #[cfg(test)]
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.nodes.iter().position(|n| n.name == name).map(NodeId)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Every mesh face, transformed into world space.
    pub fn world_faces(&self) -> Vec<WorldFace> {
        let mut faces = Vec::new();
        for root in &self.roots {
            self.collect(*root, Mat4::IDENTITY, &mut faces);
        }
        faces
    }

    fn collect(&self, id: NodeId, parent: Mat4, out: &mut Vec<WorldFace>) {
        let node = &self.nodes[id.0];
        let world = parent * node.transform.matrix();

        if let Some(mesh_node) = &node.mesh {
            let normal_matrix = world.inverse().transpose();
            for face in &mesh_node.mesh.faces {
                out.push(WorldFace {
                    vertices: face.vertices.iter().map(|v| world.transform_point3(*v)).collect(),
                    normal: normal_matrix.transform_vector3(face.normal()).normalize_or_zero(),
                    material: mesh_node.material,
                    layer: mesh_node.layer,
                    double_sided: mesh_node.mesh.double_sided,
                    cast_shadow: mesh_node.cast_shadow,
                });
            }
        }

        for child in &node.children {
            self.collect(*child, world, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn unit_box() -> MeshNode {
        MeshNode {
            mesh: Mesh::cuboid(1.0, 1.0, 1.0),
            material: Material::phong(Color::RGB(255, 0, 0)),
            layer: RenderLayer::Object,
            cast_shadow: true,
        }
    }

    #[test]
    fn child_inherits_parent_translation() {
        let mut graph = SceneGraph::new();
        let group = graph.add_group(None, "car", Transform::at(10.0, 0.0, 0.0));
        graph.add_mesh(Some(group), "body", Transform::at(0.0, 1.0, 0.0), unit_box());

        let faces = graph.world_faces();
        assert_eq!(faces.len(), 6);
        let centre: Vec3 = faces.iter().map(|f| f.vertices.iter().copied().sum::<Vec3>() / 4.0).sum::<Vec3>() / 6.0;
        assert!((centre - Vec3::new(10.0, 1.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn moving_group_moves_children() {
        let mut graph = SceneGraph::new();
        let group = graph.add_group(None, "road", Transform::default());
        graph.add_mesh(Some(group), "line", Transform::default(), unit_box());

        graph.node_mut(group).transform.position.z = -500.0;
        let faces = graph.world_faces();
        assert!(faces.iter().all(|f| f.vertices.iter().all(|v| (v.z + 500.0).abs() <= 0.5 + 1e-4)));
    }

    #[test]
    fn rotated_plane_faces_up() {
        let mut graph = SceneGraph::new();
        graph.add_mesh(
            None,
            "ground",
            Transform::default().rotated_x(-FRAC_PI_2),
            MeshNode {
                mesh: Mesh::plane(20.0, 100.0, 1, 1),
                material: Material::phong(Color::RGB(64, 64, 64)),
                layer: RenderLayer::Road,
                cast_shadow: false,
            },
        );
        let faces = graph.world_faces();
        assert!((faces[0].normal - Vec3::Y).length() < 1e-5);
        // plane height runs along -z..+z after the rotation
        let max_z = faces[0].vertices.iter().map(|v| v.z).fold(f32::MIN, f32::max);
        assert!((max_z - 50.0).abs() < 1e-3);
        assert!(faces[0].double_sided);
    }

    #[test]
    fn find_by_name_and_children() {
        let mut graph = SceneGraph::new();
        let car = graph.add_group(None, "car", Transform::default());
        let body = graph.add_mesh(Some(car), "body", Transform::default(), unit_box());
        assert_eq!(graph.find("body"), Some(body));
        assert_eq!(graph.find("missing"), None);
        assert_eq!(graph.children(car), &[body]);
        assert_eq!(graph.len(), 2);
    }
}
