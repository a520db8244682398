pub mod depth;
pub mod gpu_mesh;
pub mod lighting;
pub mod mesh_pipeline;
pub mod overlay;
pub mod scene_gpu;
pub mod surface;
pub mod texture;

pub use depth::DepthBuffer;
pub use gpu_mesh::GpuMesh;
pub use lighting::{Light, LightKind, LightRig};
pub use mesh_pipeline::MeshPipeline;
pub use overlay::EguiOverlay;
pub use scene_gpu::{SceneFrame, SceneGpu};
pub use surface::WindowSurface;
pub use texture::{DecodedImage, GpuTexture, TextureError, TextureLoader, TextureSource};
