mod info;
pub mod mesh;

pub use info::{geometry_info, ShapeInfo};
pub use mesh::{shape_mesh, MeshData, Topology};
