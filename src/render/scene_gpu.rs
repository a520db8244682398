use log::debug;
use wgpu::util::DeviceExt;

use crate::camera::OrbitCamera;
use crate::core::gpu_context::GpuContext;
use crate::core::resources::Disposable;
use crate::core::scene_graph::{Material, SceneGraph, TextureId};
use crate::core::window::WindowDimensions;
use crate::math::Rgb;
use crate::types::{NodeUniform, FLAG_TEXTURED, FLAG_UNLIT};

use super::depth::DepthBuffer;
use super::gpu_mesh::GpuMesh;
use super::lighting::LightRig;
use super::mesh_pipeline::MeshPipeline;
use super::texture::{DecodedImage, GpuTexture};

struct UniformSlot {
    buffer: Disposable<wgpu::Buffer>,
    bind_group: wgpu::BindGroup,
}

impl UniformSlot {
    fn new(device: &wgpu::Device, layout: &wgpu::BindGroupLayout, contents: &[u8], label: &str) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });
        Self {
            buffer: Disposable::new(buffer),
            bind_group,
        }
    }

    fn write(&self, queue: &wgpu::Queue, contents: &[u8]) {
        if let Some(buffer) = self.buffer.get() {
            queue.write_buffer(buffer, 0, contents);
        }
    }
}

struct TextureSlot {
    texture: GpuTexture,
    bind_group: wgpu::BindGroup,
}

/// What one frame of a scene draws
pub struct SceneFrame<'a> {
    pub graph: &'a SceneGraph,
    pub camera: &'a OrbitCamera,
    pub lights: &'a LightRig,
    pub clear: Rgb,
}

/// Every GPU object one mounted scene owns: pipelines, depth target, uniforms,
/// meshes and textures. Built on mount, torn down on unmount.
pub struct SceneGpu {
    pipeline: MeshPipeline,
    depth: DepthBuffer,
    globals: UniformSlot,
    meshes: Vec<Option<GpuMesh>>,
    nodes: Vec<Option<UniformSlot>>,
    textures: Vec<TextureSlot>,
    white: TextureSlot,
    disposed: bool,
}

impl SceneGpu {
    pub fn new(gpu: &GpuContext, color_format: wgpu::TextureFormat, size: WindowDimensions) -> Self {
        let device = gpu.device();
        let pipeline = MeshPipeline::new(device, color_format);
        let depth = DepthBuffer::new(device, size);
        let globals = UniformSlot::new(
            device,
            &pipeline.globals_layout,
            bytemuck::bytes_of(&crate::types::GlobalsUniform::default()),
            "Globals Uniform",
        );

        let white_texture = GpuTexture::white(device, gpu.queue());
        let white = TextureSlot {
            bind_group: pipeline.texture_bind_group(device, &white_texture.view),
            texture: white_texture,
        };

        Self {
            pipeline,
            depth,
            globals,
            meshes: Vec::new(),
            nodes: Vec::new(),
            textures: Vec::new(),
            white,
            disposed: false,
        }
    }

    pub fn resize(&mut self, device: &wgpu::Device, size: WindowDimensions) {
        self.depth.resize(device, size);
    }

    pub fn add_texture(&mut self, gpu: &GpuContext, image: &DecodedImage, label: &str) -> TextureId {
        let texture = GpuTexture::from_image(gpu.device(), gpu.queue(), image, label);
        let bind_group = self.pipeline.texture_bind_group(gpu.device(), &texture.view);
        self.textures.push(TextureSlot { texture, bind_group });
        TextureId(self.textures.len() - 1)
    }

    /// Upload meshes that are new or whose version changed since the last
    /// sync. Replaced buffers are released immediately.
    pub fn sync(&mut self, gpu: &GpuContext, graph: &SceneGraph) {
        let device = gpu.device();
        for id in graph.mesh_ids() {
            let (Some(data), Some(version)) = (graph.mesh(id), graph.mesh_version(id)) else {
                continue;
            };
            let index = id.index();
            if self.meshes.len() <= index {
                self.meshes.resize_with(index + 1, || None);
            }
            let stale = self.meshes[index].as_ref().map_or(true, |m| m.version != version);
            if stale {
                if let Some(mut old) = self.meshes[index].take() {
                    old.dispose();
                    debug!("re-uploading mesh {} (version {})", index, version);
                }
                self.meshes[index] = Some(GpuMesh::upload(device, data, version, "Scene Mesh"));
            }
        }

        if self.nodes.len() < graph.len() {
            self.nodes.resize_with(graph.len(), || None);
        }
    }

    /// Draw the graph into `target`, clearing it to the frame's color first
    pub fn render(
        &mut self,
        gpu: &GpuContext,
        encoder: &mut wgpu::CommandEncoder,
        target: &wgpu::TextureView,
        frame: SceneFrame<'_>,
    ) {
        if self.disposed {
            return;
        }
        let SceneFrame {
            graph,
            camera,
            lights,
            clear,
        } = frame;
        self.sync(gpu, graph);

        let queue = gpu.queue();
        let eye = camera.eye();
        self.globals
            .write(queue, bytemuck::bytes_of(&lights.globals(camera.view_proj(), eye)));

        let items = graph.draw_list(eye);
        for item in &items {
            let uniform = self.node_uniform(item.world, item.material);
            let slot = &mut self.nodes[item.node.index()];
            match slot {
                Some(slot) => slot.write(queue, bytemuck::bytes_of(&uniform)),
                None => {
                    *slot = Some(UniformSlot::new(
                        gpu.device(),
                        &self.pipeline.node_layout,
                        bytemuck::bytes_of(&uniform),
                        graph.node(item.node).name,
                    ))
                }
            }
        }

        let [r, g, b] = clear.to_linear();
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Scene Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color {
                        r: r as f64,
                        g: g as f64,
                        b: b as f64,
                        a: 1.0,
                    }),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.depth.view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(DepthBuffer::CLEAR_VALUE),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            occlusion_query_set: None,
            timestamp_writes: None,
        });

        pass.set_bind_group(0, &self.globals.bind_group, &[]);
        for item in &items {
            let (Some(Some(mesh)), Some(Some(node))) =
                (self.meshes.get(item.mesh.index()), self.nodes.get(item.node.index()))
            else {
                continue;
            };
            let texture = item
                .material
                .texture
                .and_then(|t| self.textures.get(t.0))
                .unwrap_or(&self.white);

            pass.set_pipeline(self.pipeline.pipeline_for(item.material, mesh.topology));
            pass.set_bind_group(1, &node.bind_group, &[]);
            pass.set_bind_group(2, &texture.bind_group, &[]);
            mesh.draw(&mut pass);
        }
    }

    fn node_uniform(&self, world: glam::Mat4, material: &Material) -> NodeUniform {
        let [r, g, b] = material.color.to_linear();
        let mut flags = 0;
        if material.texture.is_some_and(|t| t.0 < self.textures.len()) {
            flags |= FLAG_TEXTURED;
        }
        if material.unlit {
            flags |= FLAG_UNLIT;
        }
        NodeUniform::new(world, [r, g, b, material.opacity], material.emissive.to_linear(), flags)
    }

    /// GPU meshes currently holding live buffers
    pub fn live_mesh_count(&self) -> usize {
        self.meshes
            .iter()
            .flatten()
            .filter(|m| !m.is_disposed())
            .count()
    }

    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    pub fn depth_size(&self) -> WindowDimensions {
        self.depth.size()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Release every buffer and texture. Safe to call more than once.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        for mesh in self.meshes.iter_mut().flatten() {
            mesh.dispose();
        }
        for node in self.nodes.iter_mut().flatten() {
            node.buffer.dispose();
        }
        for slot in &mut self.textures {
            slot.texture.dispose();
        }
        self.white.texture.dispose();
        self.globals.buffer.dispose();
        self.depth.dispose();
        self.disposed = true;
        debug!("scene GPU resources released");
    }
}

impl Drop for SceneGpu {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::gpu_context::test_context;
    use crate::core::scene_graph::Node;
    use crate::geometry::mesh::{cuboid, uv_sphere};

    #[test]
    fn replaced_mesh_is_reuploaded_and_old_buffers_released() {
        let Some(gpu) = test_context() else {
            return;
        };
        let mut graph = SceneGraph::new();
        let mesh = graph.add_mesh(cuboid(1.0));
        graph.add(Node::mesh("shape", mesh, Material::default()));

        let mut scene = SceneGpu::new(&gpu, wgpu::TextureFormat::Rgba8UnormSrgb, WindowDimensions::new(64, 64));
        scene.sync(&gpu, &graph);
        assert_eq!(scene.live_mesh_count(), 1);

        graph.replace_mesh(mesh, uv_sphere(0.9, 8, 6));
        scene.sync(&gpu, &graph);
        assert_eq!(scene.live_mesh_count(), 1);
        assert_eq!(scene.meshes[0].as_ref().map(|m| m.version), Some(1));
    }

    #[test]
    fn dispose_is_idempotent() {
        let Some(gpu) = test_context() else {
            return;
        };
        let mut graph = SceneGraph::new();
        graph.add_mesh(cuboid(1.0));
        let mut scene = SceneGpu::new(&gpu, wgpu::TextureFormat::Rgba8UnormSrgb, WindowDimensions::new(0, 0));
        assert_eq!(scene.depth_size(), WindowDimensions::new(800, 600));
        scene.sync(&gpu, &graph);
        scene.add_texture(&gpu, &DecodedImage::solid(Rgb::WHITE), "t");

        scene.dispose();
        scene.dispose();
        assert!(scene.is_disposed());
        assert_eq!(scene.live_mesh_count(), 0);
    }
}
