use glam::{Mat4, Vec3};
use std::f32::consts::{PI, TAU};

use crate::catalog::ShapeKind;
use crate::math::{intersect_triangle, Ray};
use crate::types::Vertex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topology {
    Triangles,
    Points,
}

/// CPU-side geometry, uploaded by `render::GpuMesh`
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    pub topology: Topology,
}

impl MeshData {
    fn empty() -> Self {
        Self {
            vertices: Vec::new(),
            indices: Vec::new(),
            topology: Topology::Triangles,
        }
    }

    pub fn triangle_count(&self) -> usize {
        match self.topology {
            Topology::Triangles => self.indices.len() / 3,
            Topology::Points => 0,
        }
    }

    /// Radius of the smallest origin-centered sphere enclosing every vertex
    pub fn bounding_radius(&self) -> f32 {
        self.vertices
            .iter()
            .map(|v| v.position().length())
            .fold(0.0, f32::max)
    }

    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.indices.chunks_exact(3).map(|tri| {
            [
                self.vertices[tri[0] as usize].position(),
                self.vertices[tri[1] as usize].position(),
                self.vertices[tri[2] as usize].position(),
            ]
        })
    }

    /// Nearest triangle hit of a ray given in the mesh's local space
    pub fn intersect_local(&self, ray: &Ray) -> Option<f32> {
        self.triangles()
            .filter_map(|[a, b, c]| intersect_triangle(ray, a, b, c))
            .min_by(f32::total_cmp)
    }

    /// Append a flat-shaded convex polygon, wound to face away from `interior`
    fn push_face(&mut self, points: &[Vec3], interior: Vec3) {
        if points.len() < 3 {
            return;
        }
        let centroid = points.iter().copied().sum::<Vec3>() / points.len() as f32;
        let mut normal = (points[1] - points[0])
            .cross(points[2] - points[0])
            .normalize_or_zero();
        let reversed = normal.dot(centroid - interior) < 0.0;
        if reversed {
            normal = -normal;
        }

        let base = self.vertices.len() as u32;
        let n = points.len();
        for (i, p) in points.iter().enumerate() {
            let angle = i as f32 / n as f32 * TAU;
            let uv = [0.5 + 0.5 * angle.cos(), 0.5 + 0.5 * angle.sin()];
            self.vertices.push(Vertex::new(*p, normal, uv));
        }
        for i in 1..(n as u32 - 1) {
            if reversed {
                self.indices.extend_from_slice(&[base, base + i + 1, base + i]);
            } else {
                self.indices.extend_from_slice(&[base, base + i, base + i + 1]);
            }
        }
    }
}

/// The explorer's mesh for a shape at scale 1
pub fn shape_mesh(kind: ShapeKind) -> MeshData {
    match kind {
        ShapeKind::Cube => cuboid(1.0),
        ShapeKind::Sphere => uv_sphere(0.9, 32, 24),
        ShapeKind::Pyramid => frustum(0.0, 1.0, 1.2, 4, true),
        ShapeKind::Prism => triangular_prism(0.9, 0.8, 1.0),
        ShapeKind::Cylinder => frustum(0.6, 0.6, 1.4, 32, false),
        ShapeKind::Dodecahedron => dodecahedron(0.9),
    }
}

pub fn cuboid(size: f32) -> MeshData {
    let h = size * 0.5;
    let mut mesh = MeshData::empty();
    let corner = |x: f32, y: f32, z: f32| Vec3::new(x * h, y * h, z * h);
    let faces = [
        [corner(1., -1., -1.), corner(1., 1., -1.), corner(1., 1., 1.), corner(1., -1., 1.)],
        [corner(-1., -1., 1.), corner(-1., 1., 1.), corner(-1., 1., -1.), corner(-1., -1., -1.)],
        [corner(-1., 1., -1.), corner(-1., 1., 1.), corner(1., 1., 1.), corner(1., 1., -1.)],
        [corner(-1., -1., 1.), corner(-1., -1., -1.), corner(1., -1., -1.), corner(1., -1., 1.)],
        [corner(-1., -1., 1.), corner(1., -1., 1.), corner(1., 1., 1.), corner(-1., 1., 1.)],
        [corner(1., -1., -1.), corner(-1., -1., -1.), corner(-1., 1., -1.), corner(1., 1., -1.)],
    ];
    for face in &faces {
        mesh.push_face(face, Vec3::ZERO);
    }
    mesh
}

/// Latitude/longitude sphere; `uv.y` is 0 at the north pole
pub fn uv_sphere(radius: f32, width_segments: u32, height_segments: u32) -> MeshData {
    let w = width_segments.max(3);
    let h = height_segments.max(2);
    let mut mesh = MeshData::empty();

    for iy in 0..=h {
        let v = iy as f32 / h as f32;
        for ix in 0..=w {
            let u = ix as f32 / w as f32;
            let dir = Vec3::new(
                -(u * TAU).cos() * (v * PI).sin(),
                (v * PI).cos(),
                (u * TAU).sin() * (v * PI).sin(),
            );
            mesh.vertices.push(Vertex::new(dir * radius, dir, [u, v]));
        }
    }

    let row = w + 1;
    for iy in 0..h {
        for ix in 0..w {
            let a = iy * row + ix + 1;
            let b = iy * row + ix;
            let c = (iy + 1) * row + ix;
            let d = (iy + 1) * row + ix + 1;
            if iy != 0 {
                mesh.indices.extend_from_slice(&[a, b, d]);
            }
            if iy != h - 1 {
                mesh.indices.extend_from_slice(&[b, c, d]);
            }
        }
    }
    mesh
}

/// Cone or cylinder centered on the origin along +Y. `flat` shades each side
/// segment with its own normal.
pub fn frustum(
    radius_top: f32,
    radius_bottom: f32,
    height: f32,
    segments: u32,
    flat: bool,
) -> MeshData {
    let segments = segments.max(3);
    let half = height * 0.5;
    let slope = (radius_bottom - radius_top) / height.max(f32::EPSILON);
    let mut mesh = MeshData::empty();

    let rim = |r: f32, theta: f32, y: f32| Vec3::new(r * theta.sin(), y, r * theta.cos());
    let side_normal =
        |theta: f32| Vec3::new(theta.sin(), slope, theta.cos()).normalize_or_zero();

    for i in 0..segments {
        let t0 = i as f32 / segments as f32;
        let t1 = (i + 1) as f32 / segments as f32;
        let (a0, a1) = (t0 * TAU, t1 * TAU);
        let (n0, n1) = if flat {
            let mid = side_normal((a0 + a1) * 0.5);
            (mid, mid)
        } else {
            (side_normal(a0), side_normal(a1))
        };

        let base = mesh.vertices.len() as u32;
        mesh.vertices.push(Vertex::new(rim(radius_top, a0, half), n0, [t0, 0.0]));
        mesh.vertices.push(Vertex::new(rim(radius_bottom, a0, -half), n0, [t0, 1.0]));
        mesh.vertices.push(Vertex::new(rim(radius_bottom, a1, -half), n1, [t1, 1.0]));
        mesh.vertices.push(Vertex::new(rim(radius_top, a1, half), n1, [t1, 0.0]));
        if radius_top > 0.0 {
            mesh.indices.extend_from_slice(&[base, base + 1, base + 3]);
        }
        if radius_bottom > 0.0 {
            mesh.indices.extend_from_slice(&[base + 1, base + 2, base + 3]);
        }
    }

    for (radius, y) in [(radius_top, half), (radius_bottom, -half)] {
        if radius <= 0.0 {
            continue;
        }
        let cap: Vec<Vec3> = (0..segments)
            .map(|i| rim(radius, i as f32 / segments as f32 * TAU, y))
            .collect();
        mesh.push_face(&cap, Vec3::ZERO);
    }
    mesh
}

/// Triangular prism with an isosceles cross-section in the XZ plane
pub fn triangular_prism(edge: f32, height: f32, depth: f32) -> MeshData {
    let (a, hy, hz) = (edge * 0.5, height * 0.5, depth * 0.5);
    let bottom = [
        Vec3::new(-a, -hy, -hz),
        Vec3::new(a, -hy, -hz),
        Vec3::new(0.0, -hy, hz),
    ];
    let top = bottom.map(|p| Vec3::new(p.x, hy, p.z));
    let interior = (bottom.iter().chain(top.iter()).copied().sum::<Vec3>()) / 6.0;

    let mut mesh = MeshData::empty();
    mesh.push_face(&bottom, interior);
    mesh.push_face(&top, interior);
    for i in 0..3 {
        let j = (i + 1) % 3;
        mesh.push_face(&[bottom[i], bottom[j], top[j], top[i]], interior);
    }
    mesh
}

/// Regular dodecahedron with the given circumradius
pub fn dodecahedron(radius: f32) -> MeshData {
    let phi = (1.0 + 5f32.sqrt()) * 0.5;
    let inv = 1.0 / phi;

    let mut corners = Vec::with_capacity(20);
    for x in [-1.0, 1.0] {
        for y in [-1.0, 1.0] {
            for z in [-1.0, 1.0] {
                corners.push(Vec3::new(x, y, z));
            }
        }
    }
    for a in [-1.0, 1.0] {
        for b in [-1.0, 1.0] {
            corners.push(Vec3::new(0.0, a * inv, b * phi));
            corners.push(Vec3::new(a * inv, b * phi, 0.0));
            corners.push(Vec3::new(a * phi, 0.0, b * inv));
        }
    }
    let scale = radius / 3f32.sqrt();
    for c in &mut corners {
        *c *= scale;
    }

    // Face normals point at the vertices of the dual icosahedron
    let mut normals = Vec::with_capacity(12);
    for a in [-1.0, 1.0] {
        for b in [-1.0, 1.0] {
            normals.push(Vec3::new(0.0, a * phi, b).normalize());
            normals.push(Vec3::new(a * phi, b, 0.0).normalize());
            normals.push(Vec3::new(b, 0.0, a * phi).normalize());
        }
    }

    let mut mesh = MeshData::empty();
    for n in normals {
        let mut face: Vec<Vec3> = corners.clone();
        face.sort_by(|p, q| q.dot(n).total_cmp(&p.dot(n)));
        face.truncate(5);

        let center = face.iter().copied().sum::<Vec3>() / 5.0;
        let u = (face[0] - center).normalize();
        let v = n.cross(u);
        face.sort_by(|p, q| {
            let ap = (*p - center).dot(v).atan2((*p - center).dot(u));
            let aq = (*q - center).dot(v).atan2((*q - center).dot(u));
            ap.total_cmp(&aq)
        });
        mesh.push_face(&face, Vec3::ZERO);
    }
    mesh
}

/// Flat annulus in the XZ plane, visible from both sides
pub fn ring(inner: f32, outer: f32, segments: u32) -> MeshData {
    let segments = segments.max(3);
    let mut mesh = MeshData::empty();
    for i in 0..=segments {
        let t = i as f32 / segments as f32;
        let (s, c) = (t * TAU).sin_cos();
        mesh.vertices.push(Vertex::new(Vec3::new(c * inner, 0.0, s * inner), Vec3::Y, [t, 0.0]));
        mesh.vertices.push(Vertex::new(Vec3::new(c * outer, 0.0, s * outer), Vec3::Y, [t, 1.0]));
    }
    for i in 0..segments {
        let b = i * 2;
        mesh.indices.extend_from_slice(&[b, b + 1, b + 3, b, b + 3, b + 2]);
    }
    mesh
}

/// Square in the XZ plane facing +Y
pub fn plane(size: f32) -> MeshData {
    let h = size * 0.5;
    let mut mesh = MeshData::empty();
    mesh.push_face(
        &[
            Vec3::new(-h, 0.0, -h),
            Vec3::new(-h, 0.0, h),
            Vec3::new(h, 0.0, h),
            Vec3::new(h, 0.0, -h),
        ],
        Vec3::NEG_Y,
    );
    mesh
}

pub fn points(positions: &[Vec3]) -> MeshData {
    MeshData {
        vertices: positions
            .iter()
            .map(|p| Vertex::new(*p, Vec3::ZERO, [0.0, 0.0]))
            .collect(),
        indices: Vec::new(),
        topology: Topology::Points,
    }
}

/// Apply a transform to positions and normals in place
pub fn transform_mesh(mesh: &mut MeshData, m: Mat4) {
    let normal_m = m.inverse().transpose();
    for v in &mut mesh.vertices {
        v.position = m.transform_point3(v.position()).to_array();
        v.normal = normal_m
            .transform_vector3(Vec3::from_array(v.normal))
            .normalize_or_zero()
            .to_array();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn indices_in_range(mesh: &MeshData) -> bool {
        mesh.indices.iter().all(|&i| (i as usize) < mesh.vertices.len())
    }

    #[test]
    fn every_shape_builds_valid_indices() {
        for kind in ShapeKind::ALL {
            let mesh = shape_mesh(kind);
            assert!(mesh.triangle_count() > 0, "{kind}");
            assert!(indices_in_range(&mesh), "{kind}");
        }
    }

    #[test]
    fn cube_has_twelve_triangles() {
        assert_eq!(cuboid(1.0).triangle_count(), 12);
        assert!((cuboid(1.0).bounding_radius() - 0.75f32.sqrt()).abs() < 1e-5);
    }

    #[test]
    fn dodecahedron_faces_are_pentagons() {
        let mesh = dodecahedron(0.9);
        assert_eq!(mesh.vertices.len(), 12 * 5);
        assert_eq!(mesh.triangle_count(), 12 * 3);
        assert!((mesh.bounding_radius() - 0.9).abs() < 1e-4);
    }

    #[test]
    fn flat_faces_point_outward() {
        for mesh in [cuboid(1.0), dodecahedron(1.0), triangular_prism(0.9, 0.8, 1.0)] {
            let interior = mesh.vertices.iter().map(|v| v.position()).sum::<Vec3>()
                / mesh.vertices.len() as f32;
            for v in &mesh.vertices {
                let n = Vec3::from_array(v.normal);
                assert!(n.dot(v.position() - interior) > 0.0);
            }
        }
    }

    #[test]
    fn pyramid_has_no_degenerate_top_triangles() {
        let mesh = frustum(0.0, 1.0, 1.2, 4, true);
        // 4 sides + 2 triangles of the square base
        assert_eq!(mesh.triangle_count(), 6);
    }

    #[test]
    fn sphere_ray_hits_surface() {
        let mesh = uv_sphere(1.0, 32, 24);
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);
        let t = mesh.intersect_local(&ray).unwrap();
        assert!((t - 4.0).abs() < 0.02);
    }

    #[test]
    fn points_have_no_triangles() {
        let mesh = points(&[Vec3::ONE, Vec3::ZERO]);
        assert_eq!(mesh.topology, Topology::Points);
        assert_eq!(mesh.triangle_count(), 0);
    }
}
