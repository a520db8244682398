use crate::core::resources::Disposable;
use crate::core::window::WindowDimensions;

/// Depth target sized to the surface, owned by one mounted scene
pub struct DepthBuffer {
    texture: Disposable<wgpu::Texture>,
    pub view: wgpu::TextureView,
    size: WindowDimensions,
}

impl DepthBuffer {
    pub const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
    pub const CLEAR_VALUE: f32 = 1.0;
    pub const COMPARE_FUNCTION: wgpu::CompareFunction = wgpu::CompareFunction::Less;

    /// Zero dimensions fall back to 800×600
    pub fn new(device: &wgpu::Device, size: WindowDimensions) -> Self {
        let size = size.or_fallback();
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("depth-buffer"),
            size: wgpu::Extent3d {
                width: size.width,
                height: size.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        Self {
            texture: Disposable::new(texture),
            view,
            size,
        }
    }

    /// No-op if the size is unchanged
    pub fn resize(&mut self, device: &wgpu::Device, size: WindowDimensions) {
        if self.size == size.or_fallback() && !self.texture.is_disposed() {
            return;
        }
        *self = Self::new(device, size);
    }

    pub fn size(&self) -> WindowDimensions {
        self.size
    }

    pub fn dispose(&mut self) {
        self.texture.dispose();
    }

    pub fn is_disposed(&self) -> bool {
        self.texture.is_disposed()
    }
}
