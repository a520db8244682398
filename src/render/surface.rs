use anyhow::{bail, Result};
use log::warn;
use wgpu::{Surface, SurfaceConfiguration};

use crate::core::gpu_context::GpuContext;
use crate::core::window::WindowDimensions;

/// The window's swapchain: configuration plus frame acquisition with
/// recovery from lost or outdated surfaces
pub struct WindowSurface {
    surface: Surface<'static>,
    config: SurfaceConfiguration,
}

impl WindowSurface {
    pub fn new(surface: Surface<'static>, gpu: &GpuContext, size: WindowDimensions) -> Self {
        let config = create_surface_config(&surface, gpu.adapter(), size.or_fallback());
        surface.configure(gpu.device(), &config);
        Self { surface, config }
    }

    pub fn format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    pub fn size(&self) -> WindowDimensions {
        WindowDimensions::new(self.config.width, self.config.height)
    }

    /// Minimized windows report zero; keep the last configuration then
    pub fn resize(&mut self, gpu: &GpuContext, size: WindowDimensions) {
        if size.is_empty() {
            return;
        }
        self.config.width = size.width;
        self.config.height = size.height;
        self.surface.configure(gpu.device(), &self.config);
    }

    /// Next frame to draw into. `Ok(None)` means skip this frame: the surface
    /// was reconfigured or timed out.
    pub fn acquire(&mut self, gpu: &GpuContext) -> Result<Option<wgpu::SurfaceTexture>> {
        match self.surface.get_current_texture() {
            Ok(frame) => Ok(Some(frame)),
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                warn!("surface lost or outdated, reconfiguring");
                self.surface.configure(gpu.device(), &self.config);
                Ok(None)
            }
            Err(wgpu::SurfaceError::Timeout) => {
                warn!("surface timed out");
                Ok(None)
            }
            Err(wgpu::SurfaceError::OutOfMemory) => bail!("surface out of memory"),
            Err(err) => bail!("failed to acquire surface texture: {}", err),
        }
    }
}

fn create_surface_config(
    surface: &Surface<'_>,
    adapter: &wgpu::Adapter,
    size: WindowDimensions,
) -> SurfaceConfiguration {
    let surface_caps = surface.get_capabilities(adapter);
    let surface_format = surface_caps
        .formats
        .iter()
        .find(|f| f.is_srgb())
        .copied()
        .unwrap_or(surface_caps.formats[0]);

    SurfaceConfiguration {
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        format: surface_format,
        width: size.width,
        height: size.height,
        present_mode: wgpu::PresentMode::Fifo,
        alpha_mode: surface_caps.alpha_modes[0],
        view_formats: vec![],
        desired_maximum_frame_latency: 2,
    }
}
