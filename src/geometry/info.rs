use std::f32::consts::PI;

use crate::catalog::ShapeKind;

/// Topology counts and volume of a shape at a given size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeInfo {
    pub faces: u32,
    pub vertices: u32,
    pub edges: u32,
    pub volume: f32,
}

impl ShapeInfo {
    pub const ZERO: ShapeInfo = ShapeInfo {
        faces: 0,
        vertices: 0,
        edges: 0,
        volume: 0.0,
    };

    /// Info by shape name; unknown names give `ZERO`
    pub fn from_name(name: &str, size: f32) -> ShapeInfo {
        name.parse::<ShapeKind>()
            .map(|kind| geometry_info(kind, size))
            .unwrap_or(ShapeInfo::ZERO)
    }

    /// Volume with two decimals
    pub fn volume_label(&self) -> String {
        format!("{:.2}", self.volume)
    }
}

/// `size` is the base unit: cube side, sphere/cylinder radius, pyramid base and
/// height, prism edge and height, dodecahedron edge.
pub fn geometry_info(kind: ShapeKind, size: f32) -> ShapeInfo {
    let s = size;
    match kind {
        ShapeKind::Cube => ShapeInfo {
            faces: 6,
            vertices: 8,
            edges: 12,
            volume: s * s * s,
        },
        // a smooth sphere has no faces, vertices or edges to count
        ShapeKind::Sphere => ShapeInfo {
            volume: 4.0 / 3.0 * PI * s.powi(3),
            ..ShapeInfo::ZERO
        },
        ShapeKind::Pyramid => ShapeInfo {
            faces: 5,
            vertices: 5,
            edges: 8,
            volume: s * s * s / 3.0,
        },
        ShapeKind::Prism => {
            let base_area = 3f32.sqrt() / 4.0 * s * s;
            ShapeInfo {
                faces: 5,
                vertices: 6,
                edges: 9,
                volume: base_area * s,
            }
        }
        ShapeKind::Cylinder => {
            let h = 1.5 * s;
            ShapeInfo {
                faces: 3,
                vertices: 0,
                edges: 2,
                volume: PI * s * s * h,
            }
        }
        ShapeKind::Dodecahedron => ShapeInfo {
            faces: 12,
            vertices: 20,
            edges: 30,
            volume: (15.0 + 7.0 * 5f32.sqrt()) / 4.0 * s.powi(3),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_at_unit_scale() {
        let info = geometry_info(ShapeKind::Cube, 1.0);
        assert_eq!((info.faces, info.vertices, info.edges), (6, 8, 12));
        assert_eq!(info.volume_label(), "1.00");
    }

    #[test]
    fn sphere_has_no_topology() {
        let info = geometry_info(ShapeKind::Sphere, 1.0);
        assert_eq!((info.faces, info.vertices, info.edges), (0, 0, 0));
        assert_eq!(info.volume_label(), "4.19");
    }

    #[test]
    fn dodecahedron_coefficient() {
        let info = geometry_info(ShapeKind::Dodecahedron, 1.0);
        assert!((info.volume - 7.663_119).abs() < 1e-4);
    }

    #[test]
    fn unknown_name_is_zero() {
        assert_eq!(ShapeInfo::from_name("Torus", 1.0), ShapeInfo::ZERO);
        assert_eq!(ShapeInfo::from_name("prism", 1.0).vertices, 6);
    }
}
