use crate::core::scene_graph::{Blend, Material};
use crate::geometry::Topology;
use crate::types::{GlobalsUniform, NodeUniform, Vertex};

use super::depth::DepthBuffer;

const ADDITIVE_BLENDING: wgpu::BlendState = wgpu::BlendState {
    color: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::SrcAlpha,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    },
    alpha: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::Zero,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    },
};

/// The lit mesh shader compiled into one pipeline per blend mode, plus a
/// point-list variant. Bind groups: 0 globals, 1 node, 2 texture.
pub struct MeshPipeline {
    pub globals_layout: wgpu::BindGroupLayout,
    pub node_layout: wgpu::BindGroupLayout,
    pub texture_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    opaque: wgpu::RenderPipeline,
    alpha: wgpu::RenderPipeline,
    additive: wgpu::RenderPipeline,
    points: wgpu::RenderPipeline,
}

impl MeshPipeline {
    pub fn new(device: &wgpu::Device, color_format: wgpu::TextureFormat) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Mesh Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../mesh.wgsl").into()),
        });

        let globals_layout = uniform_layout::<GlobalsUniform>(
            device,
            "Globals Bind Group Layout",
            wgpu::ShaderStages::VERTEX_FRAGMENT,
        );
        let node_layout =
            uniform_layout::<NodeUniform>(device, "Node Bind Group Layout", wgpu::ShaderStages::VERTEX_FRAGMENT);
        let texture_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Texture Bind Group Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Mesh Texture Sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Mesh Pipeline Layout"),
            bind_group_layouts: &[&globals_layout, &node_layout, &texture_layout],
            push_constant_ranges: &[],
        });

        let build = |label: &str, blend: wgpu::BlendState, depth_write: bool, topology: wgpu::PrimitiveTopology| {
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(&layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &[Vertex::layout()],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: color_format,
                        blend: Some(blend),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: Default::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    // open shapes (rings, planes, the cone apex) must show both sides
                    cull_mode: None,
                    polygon_mode: wgpu::PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },
                depth_stencil: Some(wgpu::DepthStencilState {
                    format: DepthBuffer::FORMAT,
                    depth_write_enabled: depth_write,
                    depth_compare: DepthBuffer::COMPARE_FUNCTION,
                    stencil: wgpu::StencilState::default(),
                    bias: wgpu::DepthBiasState::default(),
                }),
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            })
        };

        let triangles = wgpu::PrimitiveTopology::TriangleList;
        let opaque = build("Mesh Pipeline (opaque)", wgpu::BlendState::REPLACE, true, triangles);
        let alpha = build("Mesh Pipeline (alpha)", wgpu::BlendState::ALPHA_BLENDING, false, triangles);
        let additive = build("Mesh Pipeline (additive)", ADDITIVE_BLENDING, false, triangles);
        let points = build(
            "Mesh Pipeline (points)",
            wgpu::BlendState::ALPHA_BLENDING,
            false,
            wgpu::PrimitiveTopology::PointList,
        );

        Self {
            globals_layout,
            node_layout,
            texture_layout,
            sampler,
            opaque,
            alpha,
            additive,
            points,
        }
    }

    pub fn pipeline_for(&self, material: &Material, topology: Topology) -> &wgpu::RenderPipeline {
        match (topology, material.blend) {
            (Topology::Points, _) => &self.points,
            (Topology::Triangles, Blend::Opaque) => &self.opaque,
            (Topology::Triangles, Blend::Alpha) => &self.alpha,
            (Topology::Triangles, Blend::Additive) => &self.additive,
        }
    }

    pub fn texture_bind_group(&self, device: &wgpu::Device, view: &wgpu::TextureView) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Texture Bind Group"),
            layout: &self.texture_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        })
    }
}

fn uniform_layout<T>(device: &wgpu::Device, label: &str, visibility: wgpu::ShaderStages) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some(label),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: wgpu::BufferSize::new(std::mem::size_of::<T>() as u64),
            },
            count: None,
        }],
    })
}
