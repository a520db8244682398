use glam::{Mat4, Vec3};

pub const MAX_LIGHTS: usize = 4;

/// Mesh vertex as uploaded to the GPU
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl Vertex {
    pub const ATTRIBUTES: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x2];

    pub fn new(position: Vec3, normal: Vec3, uv: [f32; 2]) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
            uv,
        }
    }

    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// One light slot. `position.w` is 0 for directional lights (xyz is the
/// direction the light comes from) and 1 for point lights.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightUniform {
    pub position: [f32; 4],
    /// rgb premultiplied by intensity, w = range (0 = infinite)
    pub color: [f32; 4],
}

/// Per-frame scene constants
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GlobalsUniform {
    pub view_proj: [[f32; 4]; 4],
    pub camera_position: [f32; 4],
    pub ambient: [f32; 4],
    pub lights: [LightUniform; MAX_LIGHTS],
    pub light_count: u32,
    pub _pad: [u32; 3],
}

impl Default for GlobalsUniform {
    fn default() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            camera_position: [0.0; 4],
            ambient: [0.0; 4],
            lights: [LightUniform::default(); MAX_LIGHTS],
            light_count: 0,
            _pad: [0; 3],
        }
    }
}

pub const FLAG_TEXTURED: u32 = 1;
pub const FLAG_UNLIT: u32 = 2;

/// Per-node transform and material
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct NodeUniform {
    pub model: [[f32; 4]; 4],
    pub normal_matrix: [[f32; 4]; 4],
    /// rgb + opacity
    pub color: [f32; 4],
    /// rgb, w unused
    pub emissive: [f32; 4],
    pub flags: u32,
    pub _pad: [u32; 3],
}

impl NodeUniform {
    pub fn new(model: Mat4, color: [f32; 4], emissive: [f32; 3], flags: u32) -> Self {
        let normal = model.inverse().transpose();
        Self {
            model: model.to_cols_array_2d(),
            normal_matrix: normal.to_cols_array_2d(),
            color,
            emissive: [emissive[0], emissive[1], emissive[2], 0.0],
            flags,
            _pad: [0; 3],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_sizes_are_16_byte_aligned() {
        assert_eq!(std::mem::size_of::<GlobalsUniform>() % 16, 0);
        assert_eq!(std::mem::size_of::<NodeUniform>() % 16, 0);
        assert_eq!(std::mem::size_of::<LightUniform>(), 32);
    }

    #[test]
    fn vertex_stride() {
        assert_eq!(std::mem::size_of::<Vertex>(), 32);
    }
}
