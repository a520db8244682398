use glam::{EulerRot, Mat4, Quat, Vec3};
use log::debug;

use super::picking::{nearest, PickHit};
use crate::geometry::MeshData;
use crate::math::{intersect_sphere, Rgb, Ray};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshId(usize);

impl MeshId {
    pub fn index(&self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub usize);

/// Translation, XYZ Euler rotation (radians) and scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn at(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::default()
        }
    }

    pub fn matrix(&self) -> Mat4 {
        let rotation = Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z);
        Mat4::from_scale_rotation_translation(self.scale, rotation, self.translation)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Blend {
    Opaque,
    Alpha,
    Additive,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub color: Rgb,
    pub emissive: Rgb,
    pub opacity: f32,
    pub blend: Blend,
    /// Skip lighting, output color + emissive directly
    pub unlit: bool,
    pub texture: Option<TextureId>,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: Rgb::WHITE,
            emissive: Rgb::BLACK,
            opacity: 1.0,
            blend: Blend::Opaque,
            unlit: false,
            texture: None,
        }
    }
}

impl Material {
    pub fn lit(color: Rgb) -> Self {
        Self {
            color,
            ..Self::default()
        }
    }

    pub fn unlit(color: Rgb) -> Self {
        Self {
            color,
            unlit: true,
            ..Self::default()
        }
    }

    pub fn with_opacity(mut self, opacity: f32, blend: Blend) -> Self {
        self.opacity = opacity;
        self.blend = blend;
        self
    }

    pub fn with_emissive(mut self, emissive: Rgb) -> Self {
        self.emissive = emissive;
        self
    }

    pub fn with_texture(mut self, texture: TextureId) -> Self {
        self.texture = Some(texture);
        self
    }

    pub fn is_transparent(&self) -> bool {
        self.blend != Blend::Opaque
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    pub name: &'static str,
    pub parent: Option<NodeId>,
    pub transform: Transform,
    pub mesh: Option<MeshId>,
    pub material: Material,
    pub visible: bool,
    /// Identifier reported when a ray cast hits this node
    pub pick_id: Option<&'static str>,
}

impl Node {
    pub fn group(name: &'static str) -> Self {
        Self {
            name,
            parent: None,
            transform: Transform::default(),
            mesh: None,
            material: Material::default(),
            visible: true,
            pick_id: None,
        }
    }

    pub fn mesh(name: &'static str, mesh: MeshId, material: Material) -> Self {
        Self {
            mesh: Some(mesh),
            material,
            ..Self::group(name)
        }
    }

    pub fn with_parent(mut self, parent: NodeId) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn pickable(mut self, id: &'static str) -> Self {
        self.pick_id = Some(id);
        self
    }
}

struct MeshSlot {
    data: MeshData,
    bounding_radius: f32,
    version: u64,
}

/// Something to draw this frame
#[derive(Debug, Clone)]
pub struct DrawItem<'a> {
    pub node: NodeId,
    pub mesh: MeshId,
    pub world: Mat4,
    pub material: &'a Material,
}

/// Flat arena of nodes with parent links, plus the CPU meshes they reference
#[derive(Default)]
pub struct SceneGraph {
    nodes: Vec<Node>,
    meshes: Vec<MeshSlot>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_mesh(&mut self, data: MeshData) -> MeshId {
        let bounding_radius = data.bounding_radius();
        self.meshes.push(MeshSlot {
            data,
            bounding_radius,
            version: 0,
        });
        MeshId(self.meshes.len() - 1)
    }

    /// Swap the geometry behind `id`; the GPU copy is refreshed on next sync
    pub fn replace_mesh(&mut self, id: MeshId, data: MeshData) {
        if let Some(slot) = self.meshes.get_mut(id.0) {
            slot.bounding_radius = data.bounding_radius();
            slot.data = data;
            slot.version += 1;
        }
    }

    pub fn mesh(&self, id: MeshId) -> Option<&MeshData> {
        self.meshes.get(id.0).map(|s| &s.data)
    }

    pub fn mesh_version(&self, id: MeshId) -> Option<u64> {
        self.meshes.get(id.0).map(|s| s.version)
    }

    pub fn mesh_ids(&self) -> impl Iterator<Item = MeshId> {
        (0..self.meshes.len()).map(MeshId)
    }

    pub fn add(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn find_pickable(&self, pick_id: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|n| n.pick_id == Some(pick_id))
            .map(NodeId)
    }

    pub fn world_matrix(&self, id: NodeId) -> Mat4 {
        let node = &self.nodes[id.0];
        let local = node.transform.matrix();
        match node.parent {
            Some(parent) => self.world_matrix(parent) * local,
            None => local,
        }
    }

    /// Visible only if the node and all its ancestors are
    pub fn is_visible(&self, id: NodeId) -> bool {
        let node = &self.nodes[id.0];
        node.visible && node.parent.map_or(true, |p| self.is_visible(p))
    }

    /// Opaque items first, then transparent items back to front from `eye`
    pub fn draw_list(&self, eye: Vec3) -> Vec<DrawItem<'_>> {
        let mut items: Vec<DrawItem<'_>> = self
            .nodes
            .iter()
            .enumerate()
            .filter_map(|(i, node)| {
                let id = NodeId(i);
                let mesh = node.mesh?;
                self.is_visible(id).then(|| DrawItem {
                    node: id,
                    mesh,
                    world: self.world_matrix(id),
                    material: &node.material,
                })
            })
            .collect();

        let depth = |item: &DrawItem<'_>| item.world.w_axis.truncate().distance_squared(eye);
        items.sort_by(|a, b| {
            match (a.material.is_transparent(), b.material.is_transparent()) {
                (false, true) => std::cmp::Ordering::Less,
                (true, false) => std::cmp::Ordering::Greater,
                (false, false) => std::cmp::Ordering::Equal,
                (true, true) => depth(b).total_cmp(&depth(a)),
            }
        });
        items
    }

    /// Cast `ray` against visible pickable nodes: bounding sphere first, then
    /// the mesh triangles. Nearest hit wins.
    pub fn pick(&self, ray: &Ray) -> Option<PickHit<&'static str>> {
        let hits = self.nodes.iter().enumerate().filter_map(|(i, node)| {
            let id = NodeId(i);
            let pick_id = node.pick_id?;
            let slot = self.meshes.get(node.mesh?.0)?;
            if !self.is_visible(id) {
                return None;
            }

            let world = self.world_matrix(id);
            let (scale, _, center) = world.to_scale_rotation_translation();
            let radius = slot.bounding_radius * scale.max_element();
            intersect_sphere(ray, center, radius)?;

            let inverse = world.inverse();
            let local = ray.transformed(&inverse);
            let t_local = slot.data.intersect_local(&local)?;
            let hit = world.transform_point3(local.at(t_local));
            Some(PickHit {
                id: pick_id,
                distance: hit.distance(ray.origin),
            })
        });

        let hit = nearest(hits);
        if let Some(h) = &hit {
            debug!("picked {} at {:.2}", h.id, h.distance);
        }
        hit
    }
}
