use glam::Vec3;
use log::debug;

use crate::camera::OrbitCamera;
use crate::catalog::{shape_detail, ShapeDetail, ShapeKind};
use crate::core::controller::Controller;
use crate::core::gpu_context::GpuContext;
use crate::core::lifecycle::Teardown;
use crate::core::scene_graph::{Blend, Material, MeshId, Node, NodeId, SceneGraph, Transform};
use crate::core::timer::per_frame;
use crate::core::window::WindowDimensions;
use crate::geometry::mesh::plane;
use crate::geometry::{geometry_info, shape_mesh, ShapeInfo};
use crate::math::Rgb;
use crate::prefs::Preferences;
use crate::render::{Light, LightRig, SceneFrame, SceneGpu};
use crate::traits::{FrameContext, Visualization};
use crate::ui;

use super::{MountContext, ViewKind};

pub const DEFAULT_COLOR: Rgb = Rgb::from_u32(0x60a5fa);
pub const DEFAULT_SCALE: f32 = 1.0;
pub const MIN_SCALE: f32 = 0.4;
pub const MAX_SCALE: f32 = 2.0;
pub const BACKGROUND: Rgb = Rgb::from_u32(0x0a0a0f);
/// Radians per frame at 60 Hz
pub const SPIN_PER_FRAME: f32 = 0.01;

/// The explorer's controls
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExplorerState {
    pub shape: ShapeKind,
    pub color: Rgb,
    pub scale: f32,
    pub auto_rotate: bool,
}

impl Default for ExplorerState {
    fn default() -> Self {
        Self {
            shape: ShapeKind::Cube,
            color: DEFAULT_COLOR,
            scale: DEFAULT_SCALE,
            auto_rotate: false,
        }
    }
}

impl ExplorerState {
    pub fn from_preferences(prefs: &Preferences) -> Self {
        let mut state = Self {
            shape: prefs.explorer_shape,
            color: Rgb::parse_hex(&prefs.explorer_color).unwrap_or(DEFAULT_COLOR),
            ..Self::default()
        };
        state.set_scale(prefs.explorer_scale);
        state
    }

    pub fn info(&self) -> ShapeInfo {
        geometry_info(self.shape, self.scale)
    }

    pub fn detail(&self) -> &'static ShapeDetail {
        shape_detail(self.shape)
    }

    /// Clamped to `[MIN_SCALE, MAX_SCALE]`; non-finite input is ignored
    pub fn set_scale(&mut self, scale: f32) {
        if scale.is_finite() {
            self.scale = scale.clamp(MIN_SCALE, MAX_SCALE);
        }
    }

    /// e.g. "1.50×"
    pub fn scale_label(&self) -> String {
        format!("{:.2}×", self.scale)
    }

    /// e.g. "#60A5FA"
    pub fn color_label(&self) -> String {
        self.color.to_hex().to_uppercase()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Scene content for the explorer: one shape on a faint ground plane.
///
/// Control changes are applied in place: geometry is rebuilt only when the
/// shape changes, everything else edits the existing node.
pub struct ExplorerModel {
    pub state: ExplorerState,
    applied: ExplorerState,
    graph: SceneGraph,
    camera: OrbitCamera,
    lights: LightRig,
    shape_mesh: MeshId,
    shape_node: NodeId,
    spin: f32,
    mesh_builds: u32,
}

impl ExplorerModel {
    pub fn new(state: ExplorerState, size: WindowDimensions) -> Self {
        let size = size.or_fallback();
        let mut graph = SceneGraph::new();

        let shape_mesh = graph.add_mesh(shape_mesh(state.shape));
        let shape_node = graph.add(Node::mesh("shape", shape_mesh, shape_material(state.color)));

        let ground = graph.add_mesh(plane(8.0));
        graph.add(
            Node::mesh("ground", ground, Material::unlit(Rgb::BLACK).with_opacity(0.15, Blend::Alpha))
                .with_transform(Transform::at(Vec3::new(0.0, -1.0, 0.0))),
        );

        let mut camera = OrbitCamera::new(Vec3::new(0.0, 1.5, 4.0), Vec3::ZERO, 50.0)
            .with_damping(0.05)
            .with_distance_limits(1.5, 20.0)
            .with_pan(false);
        camera.set_aspect(size.width as f32, size.height as f32);
        camera.auto_rotate = state.auto_rotate;

        let lights = LightRig::new(Rgb::from_u32(0x404060), 0.4)
            .with(Light::directional(Vec3::new(5.0, 10.0, 7.5), Rgb::WHITE, 0.8))
            .with(Light::directional(Vec3::new(-5.0, -5.0, -5.0), Rgb::from_u32(0x6688ff), 0.3))
            .with(Light::point(Vec3::new(3.0, 3.0, 3.0), Rgb::from_u32(0x4466ff), 0.4, 20.0))
            .with(Light::point(Vec3::new(-3.0, -3.0, -3.0), Rgb::from_u32(0xff4466), 0.2, 20.0));

        let mut model = Self {
            state,
            applied: state,
            graph,
            camera,
            lights,
            shape_mesh,
            shape_node,
            spin: 0.0,
            mesh_builds: 1,
        };
        model.sync_transform();
        model
    }

    /// Push control changes onto the scene without rebuilding it
    pub fn apply_changes(&mut self) {
        let state = self.state;
        if state == self.applied {
            return;
        }

        if state.shape != self.applied.shape {
            self.graph.replace_mesh(self.shape_mesh, shape_mesh(state.shape));
            self.mesh_builds += 1;
            debug!("explorer shape -> {}", state.shape);
        }
        if state.color != self.applied.color {
            self.graph.node_mut(self.shape_node).material = shape_material(state.color);
        }
        // auto-rotate spins the mesh and orbits the camera around it
        self.camera.auto_rotate = state.auto_rotate;
        self.applied = state;
        self.sync_transform();
    }

    pub fn orbit(&mut self, input: &dyn Controller, viewport_height: f32) {
        self.camera.apply_input(input, viewport_height);
    }

    pub fn update(&mut self, delta: f32) {
        self.apply_changes();
        if self.state.auto_rotate {
            self.spin += per_frame(SPIN_PER_FRAME, delta);
            self.sync_transform();
        }
        self.camera.update(delta);
    }

    /// Default controls, no spin, initial camera with auto-rotate off
    pub fn reset(&mut self) {
        self.state.reset();
        self.spin = 0.0;
        self.apply_changes();
        self.sync_transform();
        self.camera.reset();
    }

    pub fn set_aspect(&mut self, size: WindowDimensions) {
        let size = size.or_fallback();
        self.camera.set_aspect(size.width as f32, size.height as f32);
    }

    fn sync_transform(&mut self) {
        self.graph.node_mut(self.shape_node).transform = Transform {
            translation: Vec3::ZERO,
            rotation: Vec3::new(0.0, self.spin, 0.0),
            scale: Vec3::splat(self.applied.scale),
        };
    }

    pub fn shape_transform(&self) -> Transform {
        self.graph.node(self.shape_node).transform
    }

    pub fn shape_material(&self) -> &Material {
        &self.graph.node(self.shape_node).material
    }

    /// How many times geometry was built, including the initial one
    pub fn mesh_builds(&self) -> u32 {
        self.mesh_builds
    }

    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn frame(&self) -> SceneFrame<'_> {
        SceneFrame {
            graph: &self.graph,
            camera: &self.camera,
            lights: &self.lights,
            clear: BACKGROUND,
        }
    }
}

fn shape_material(color: Rgb) -> Material {
    Material::lit(color).with_emissive(color.scaled(0.1))
}

/// Mounted geometry explorer
pub struct ExplorerView {
    model: ExplorerModel,
    gpu: SceneGpu,
}

impl ExplorerView {
    pub fn new(ctx: &MountContext) -> Self {
        let model = ExplorerModel::new(ExplorerState::from_preferences(&ctx.prefs), ctx.size);
        let mut gpu = SceneGpu::new(&ctx.gpu, ctx.color_format, ctx.size);
        gpu.sync(&ctx.gpu, model.graph());
        Self { model, gpu }
    }
}

impl Teardown for ExplorerView {
    fn teardown(&mut self) {
        self.gpu.dispose();
    }
}

impl Visualization for ExplorerView {
    fn kind(&self) -> ViewKind {
        ViewKind::Geometry
    }

    fn update(&mut self, frame: &FrameContext<'_>) {
        if frame.pointer_free {
            self.model.orbit(frame.input, frame.surface.height);
        }
        self.model.update(frame.delta);
        // swap geometry now so replaced buffers are released this frame
        self.gpu.sync(frame.gpu, self.model.graph());
    }

    fn render(&mut self, gpu: &GpuContext, encoder: &mut wgpu::CommandEncoder, target: &wgpu::TextureView) {
        self.gpu.render(gpu, encoder, target, self.model.frame());
    }

    fn ui(&mut self, ctx: &egui::Context) {
        if let Some(ui::explorer::ExplorerAction::Reset) = ui::explorer::show(ctx, &mut self.model.state) {
            self.model.reset();
        }
    }

    fn resize(&mut self, gpu: &GpuContext, size: WindowDimensions) {
        self.model.set_aspect(size);
        self.gpu.resize(gpu.device(), size);
    }

    fn reset(&mut self) {
        self.model.reset();
    }

    fn store_preferences(&self, prefs: &mut Preferences) {
        let state = &self.model.state;
        prefs.explorer_shape = state.shape;
        prefs.explorer_color = state.color.to_hex();
        prefs.explorer_scale = state.scale;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> ExplorerModel {
        ExplorerModel::new(ExplorerState::default(), WindowDimensions::new(800, 600))
    }

    #[test]
    fn color_change_does_not_rebuild_geometry() {
        let mut m = model();
        m.state.color = Rgb::from_u32(0xff0000);
        m.update(1.0 / 60.0);
        assert_eq!(m.mesh_builds(), 1);
        assert_eq!(m.shape_material().color, Rgb::from_u32(0xff0000));
        let e = m.shape_material().emissive;
        assert!((e.r - 0.1).abs() < 1e-6 && e.g == 0.0);
    }

    #[test]
    fn shape_change_rebuilds_once() {
        let mut m = model();
        m.state.shape = ShapeKind::Dodecahedron;
        m.update(1.0 / 60.0);
        m.update(1.0 / 60.0);
        assert_eq!(m.mesh_builds(), 2);
        assert_eq!(m.graph().mesh_version(m.shape_mesh), Some(1));
    }

    #[test]
    fn scale_is_uniform_and_clamped() {
        let mut m = model();
        m.state.set_scale(5.0);
        m.update(0.0);
        assert_eq!(m.shape_transform().scale, Vec3::splat(MAX_SCALE));
        m.state.set_scale(f32::NAN);
        assert_eq!(m.state.scale, MAX_SCALE);
    }

    #[test]
    fn auto_rotate_spins_a_hundredth_per_frame() {
        let mut m = model();
        m.update(1.0 / 60.0);
        assert_eq!(m.shape_transform().rotation.y, 0.0);

        m.state.auto_rotate = true;
        for _ in 0..10 {
            m.update(1.0 / 60.0);
        }
        assert!((m.shape_transform().rotation.y - 0.1).abs() < 1e-4);
    }

    #[test]
    fn reset_restores_defaults_and_clears_spin() {
        let mut m = model();
        m.state = ExplorerState {
            shape: ShapeKind::Sphere,
            color: Rgb::from_u32(0x00ff00),
            scale: 1.5,
            auto_rotate: true,
        };
        m.update(0.5);
        assert_eq!(m.state.scale_label(), "1.50×");

        m.reset();
        assert_eq!(m.state, ExplorerState::default());
        assert_eq!(m.state.scale_label(), "1.00×");
        assert_eq!(m.state.shape.name(), "Cube");
        assert_eq!(m.shape_transform().rotation, Vec3::ZERO);
        assert_eq!(m.shape_material().color, DEFAULT_COLOR);
    }

    #[test]
    fn labels() {
        let state = ExplorerState::default();
        assert_eq!(state.color_label(), "#60A5FA");
        assert_eq!(state.info().volume_label(), "1.00");
    }

    #[test]
    fn preferences_seed_state() {
        let prefs = Preferences {
            explorer_shape: ShapeKind::Prism,
            explorer_color: "#ff8800".into(),
            explorer_scale: 9.0,
            ..Preferences::default()
        };
        let state = ExplorerState::from_preferences(&prefs);
        assert_eq!(state.shape, ShapeKind::Prism);
        assert_eq!(state.color, Rgb::from_u32(0xff8800));
        assert_eq!(state.scale, MAX_SCALE);
        assert!(!state.auto_rotate);
    }

    #[test]
    fn auto_rotate_orbits_the_camera_until_reset() {
        let mut m = model();
        let start = m.camera().eye();
        m.state.auto_rotate = true;
        for _ in 0..600 {
            m.update(1.0 / 60.0);
        }
        assert!(m.camera().auto_rotate);
        assert!((m.camera().eye() - start).length() > 0.5);

        m.reset();
        assert!(!m.camera().auto_rotate);
        let rested = m.camera().eye();
        for _ in 0..60 {
            m.update(1.0 / 60.0);
        }
        assert!((m.camera().eye() - rested).length() < 1e-5);
        assert!((rested - start).length() < 1e-4);
    }
}
