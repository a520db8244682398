use wgpu::util::DeviceExt;

use crate::core::resources::Disposable;
use crate::geometry::{MeshData, Topology};
use crate::types::Vertex;

/// Vertex + index buffers uploaded from a `MeshData`
pub struct GpuMesh {
    vertex_buffer: Disposable<wgpu::Buffer>,
    index_buffer: Disposable<wgpu::Buffer>,
    index_count: u32,
    vertex_count: u32,
    pub topology: Topology,
    /// Scene graph mesh version this upload reflects
    pub version: u64,
}

impl GpuMesh {
    pub fn upload(device: &wgpu::Device, mesh: &MeshData, version: u64, label: &str) -> Self {
        // zero-sized buffers cannot be sliced; pad and rely on the counts
        let padding = [Vertex::default()];
        let vertices: &[Vertex] = if mesh.vertices.is_empty() { &padding } else { &mesh.vertices };
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let indices: &[u32] = if mesh.indices.is_empty() { &[0] } else { &mesh.indices };
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            vertex_buffer: Disposable::new(vertex_buffer),
            index_buffer: Disposable::new(index_buffer),
            index_count: mesh.indices.len() as u32,
            vertex_count: mesh.vertices.len() as u32,
            topology: mesh.topology,
            version,
        }
    }

    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    /// Bind and draw: indexed for triangles, a plain vertex range for points.
    /// Does nothing once disposed.
    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        let (Some(vertices), Some(indices)) = (self.vertex_buffer.get(), self.index_buffer.get()) else {
            return;
        };
        pass.set_vertex_buffer(0, vertices.slice(..));
        match self.topology {
            Topology::Triangles if self.index_count > 0 => {
                pass.set_index_buffer(indices.slice(..), wgpu::IndexFormat::Uint32);
                pass.draw_indexed(0..self.index_count, 0, 0..1);
            }
            Topology::Points if self.vertex_count > 0 => pass.draw(0..self.vertex_count, 0..1),
            _ => {}
        }
    }

    /// Release both buffers now. Returns false if already released.
    pub fn dispose(&mut self) -> bool {
        let vertices = self.vertex_buffer.dispose();
        let indices = self.index_buffer.dispose();
        vertices || indices
    }

    pub fn is_disposed(&self) -> bool {
        self.vertex_buffer.is_disposed() && self.index_buffer.is_disposed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::gpu_context::test_context;
    use crate::geometry::mesh::cuboid;

    #[test]
    fn upload_and_dispose_once() {
        let Some(gpu) = test_context() else {
            return;
        };
        let mut mesh = GpuMesh::upload(gpu.device(), &cuboid(1.0), 3, "cube");
        assert_eq!(mesh.index_count(), 36);
        assert_eq!(mesh.version, 3);
        assert!(mesh.dispose());
        assert!(!mesh.dispose());
        assert!(mesh.is_disposed());
    }

    #[test]
    fn point_cloud_keeps_vertex_count() {
        let Some(gpu) = test_context() else {
            return;
        };
        let cloud = crate::geometry::mesh::points(&[glam::Vec3::X, glam::Vec3::Y]);
        let mesh = GpuMesh::upload(gpu.device(), &cloud, 0, "stars");
        assert_eq!(mesh.vertex_count(), 2);
        assert_eq!(mesh.index_count(), 0);
    }
}
