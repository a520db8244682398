use std::f32::consts::PI;
use std::path::PathBuf;
use std::time::Duration;

use glam::{Vec2, Vec3};
use log::{debug, info};

use crate::camera::OrbitCamera;
use crate::catalog::{planet, planet_texture_path, PlanetRecord, ORBITS, SATURN_RINGS};
use crate::core::clock::Clock;
use crate::core::controller::Controller;
use crate::core::gpu_context::GpuContext;
use crate::core::lifecycle::Teardown;
use crate::core::loading::LoadTracker;
use crate::core::picking::to_ndc;
use crate::core::scene_graph::{Blend, Material, Node, NodeId, SceneGraph, TextureId, Transform};
use crate::core::timer::Countdown;
use crate::core::window::WindowDimensions;
use crate::geometry::mesh::{ring, uv_sphere};
use crate::math::Rgb;
use crate::render::{Light, LightRig, SceneFrame, SceneGpu, TextureLoader, TextureSource};
use crate::traits::{FrameContext, Visualization};
use crate::ui;

use super::{MountContext, ViewKind};

pub const BACKGROUND: Rgb = Rgb::from_u32(0x000011);
pub const SUN_RADIUS: f32 = 4.0;
pub const GLOW_RADIUS: f32 = 4.5;
pub const HIGHLIGHT_SCALE: f32 = 1.2;
pub const HIGHLIGHT_SECONDS: f32 = 0.25;
/// Orbit and spin speeds are authored per tenth of a second
const MOTION_RATE: f32 = 10.0;
const SAFETY_TIMEOUT: Duration = Duration::from_secs(6);

struct PlanetNodes {
    id: &'static str,
    radius: f32,
    pivot: NodeId,
    body: NodeId,
}

struct Highlight {
    body: NodeId,
    radius: f32,
    timer: Countdown,
}

/// Sun, glow shell, eight orbiting planets and their orbit rings
pub struct SolarModel {
    graph: SceneGraph,
    camera: OrbitCamera,
    lights: LightRig,
    planets: Vec<PlanetNodes>,
    glow: NodeId,
    selected: Option<&'static PlanetRecord>,
    highlight: Option<Highlight>,
    time: f32,
}

impl SolarModel {
    pub fn new(size: WindowDimensions) -> Self {
        let size = size.or_fallback();
        let mut graph = SceneGraph::new();
        let sphere = graph.add_mesh(uv_sphere(1.0, 32, 32));

        graph.add(Node::mesh("sun", sphere, Material::unlit(Rgb::from_u32(0xffff00))).with_transform(Transform {
            scale: Vec3::splat(SUN_RADIUS),
            ..Transform::default()
        }));
        let glow = graph.add(
            Node::mesh(
                "sun-glow",
                sphere,
                Material::unlit(Rgb::from_u32(0xffff00)).with_opacity(0.35, Blend::Additive),
            )
            .with_transform(Transform {
                scale: Vec3::splat(GLOW_RADIUS),
                ..Transform::default()
            }),
        );

        let saturn_ring = graph.add_mesh(ring(SATURN_RINGS.inner, SATURN_RINGS.outer, 64));
        let mut planets = Vec::with_capacity(ORBITS.len());
        for orbit in ORBITS.iter() {
            let path = graph.add_mesh(ring(orbit.distance - 0.1, orbit.distance + 0.1, 128));
            graph.add(Node::mesh(
                "orbit",
                path,
                Material::unlit(Rgb::from_u32(0x7777aa)).with_opacity(0.3, Blend::Alpha),
            ));

            let pivot = graph.add(Node::group("pivot"));
            // the anchor keeps rings upright while the body spins
            let anchor = graph.add(
                Node::group("anchor")
                    .with_parent(pivot)
                    .with_transform(Transform::at(Vec3::new(orbit.distance, 0.0, 0.0))),
            );
            let material = Material::lit(Rgb::from_u32(orbit.fallback_color))
                .with_emissive(Rgb::from_u32(0x222222).scaled(0.5));
            let body = graph.add(
                Node::mesh(orbit.id, sphere, material)
                    .with_parent(anchor)
                    .with_transform(Transform {
                        scale: Vec3::splat(orbit.radius),
                        ..Transform::default()
                    })
                    .pickable(orbit.id),
            );

            if orbit.id == SATURN_RINGS.planet {
                graph.add(
                    Node::mesh(
                        "rings",
                        saturn_ring,
                        Material::lit(Rgb::from_u32(SATURN_RINGS.color))
                            .with_opacity(SATURN_RINGS.opacity, Blend::Alpha),
                    )
                    .with_parent(anchor)
                    .with_transform(Transform {
                        rotation: Vec3::new(0.0, 0.0, SATURN_RINGS.tilt_degrees.to_radians()),
                        scale: Vec3::splat(orbit.radius),
                        ..Transform::default()
                    }),
                );
            }

            planets.push(PlanetNodes {
                id: orbit.id,
                radius: orbit.radius,
                pivot,
                body,
            });
        }

        let mut camera = OrbitCamera::new(Vec3::new(0.0, 30.0, 80.0), Vec3::ZERO, 75.0)
            .with_damping(0.05)
            .with_distance_limits(10.0, 250.0)
            .with_max_polar(0.9 * PI)
            .with_clip(0.1, 2000.0);
        camera.set_aspect(size.width as f32, size.height as f32);

        let lights = LightRig::new(Rgb::from_u32(0x404040), 0.375)
            .with(Light::point(Vec3::ZERO, Rgb::from_u32(0xffffee), 1.5, 500.0))
            .with(Light::directional(Vec3::new(10.0, 10.0, 5.0), Rgb::WHITE, 0.75));

        Self {
            graph,
            camera,
            lights,
            planets,
            glow,
            selected: None,
            highlight: None,
            time: 0.0,
        }
    }

    pub fn orbit(&mut self, input: &dyn Controller, viewport_height: f32) {
        self.camera.apply_input(input, viewport_height);
    }

    pub fn update(&mut self, delta: f32) {
        self.time += delta;

        let pulse = 1.0 + (self.time * 2.0).sin() * 0.05;
        self.graph.node_mut(self.glow).transform.scale = Vec3::splat(GLOW_RADIUS * pulse);

        for (nodes, orbit) in self.planets.iter().zip(ORBITS.iter()) {
            self.graph.node_mut(nodes.pivot).transform.rotation.y += orbit.speed * delta * MOTION_RATE;
            self.graph.node_mut(nodes.body).transform.rotation.y += orbit.rotation_speed * delta * MOTION_RATE;
        }

        if let Some(highlight) = &mut self.highlight {
            if highlight.timer.tick(delta) {
                self.graph.node_mut(highlight.body).transform.scale = Vec3::splat(highlight.radius);
                self.highlight = None;
            }
        }

        self.camera.update(delta);
    }

    /// Ray-cast from `ndc`; a hit selects and highlights the planet, a miss
    /// clears the selection
    pub fn click(&mut self, ndc: Vec2) -> Option<&'static PlanetRecord> {
        let ray = self.camera.ray_from_ndc(ndc);
        let hit = self.graph.pick(&ray).and_then(|h| planet(h.id));

        match hit {
            Some(record) => {
                debug!("selected planet {}", record.id);
                self.highlight(record.id);
                self.selected = Some(record);
            }
            None => self.selected = None,
        }
        hit
    }

    fn highlight(&mut self, id: &str) {
        self.end_highlight();
        let Some(nodes) = self.planets.iter().find(|p| p.id == id) else {
            return;
        };
        self.graph.node_mut(nodes.body).transform.scale = Vec3::splat(nodes.radius * HIGHLIGHT_SCALE);
        self.highlight = Some(Highlight {
            body: nodes.body,
            radius: nodes.radius,
            timer: Countdown::new(HIGHLIGHT_SECONDS),
        });
    }

    fn end_highlight(&mut self) {
        if let Some(highlight) = self.highlight.take() {
            self.graph.node_mut(highlight.body).transform.scale = Vec3::splat(highlight.radius);
        }
    }

    pub fn selected(&self) -> Option<&'static PlanetRecord> {
        self.selected
    }

    pub fn close_info(&mut self) {
        self.selected = None;
    }

    /// Initial camera, info panel hidden
    pub fn reset(&mut self) {
        self.camera.reset();
        self.selected = None;
        self.end_highlight();
    }

    /// Swap the planet's fallback color for a texture
    pub fn set_planet_texture(&mut self, id: &str, texture: TextureId) {
        if let Some(nodes) = self.planets.iter().find(|p| p.id == id) {
            let material = &mut self.graph.node_mut(nodes.body).material;
            material.texture = Some(texture);
            material.color = Rgb::WHITE;
        }
    }

    pub fn planet_position(&self, id: &str) -> Option<Vec3> {
        let nodes = self.planets.iter().find(|p| p.id == id)?;
        Some(self.graph.world_matrix(nodes.body).transform_point3(Vec3::ZERO))
    }

    pub fn planet_scale(&self, id: &str) -> Option<f32> {
        let nodes = self.planets.iter().find(|p| p.id == id)?;
        Some(self.graph.node(nodes.body).transform.scale.x)
    }

    pub fn set_aspect(&mut self, size: WindowDimensions) {
        let size = size.or_fallback();
        self.camera.set_aspect(size.width as f32, size.height as f32);
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

/// Mounted solar system
pub struct SolarView {
    model: SolarModel,
    gpu: SceneGpu,
    loader: TextureLoader<&'static str>,
    tracker: LoadTracker,
    clock: Clock,
}

impl SolarView {
    pub fn new(ctx: &MountContext) -> Self {
        let model = SolarModel::new(ctx.size);
        let mut gpu = SceneGpu::new(&ctx.gpu, ctx.color_format, ctx.size);
        gpu.sync(&ctx.gpu, model.graph());

        let mut loader = TextureLoader::new(ctx.offline, ctx.texture_timeout);
        for orbit in ORBITS.iter() {
            let path: PathBuf = planet_texture_path(&ctx.asset_dir, orbit.id);
            loader.request(orbit.id, vec![TextureSource::File(path)]);
        }

        Self {
            model,
            gpu,
            loader,
            tracker: LoadTracker::new(ORBITS.len()).with_safety_timeout(SAFETY_TIMEOUT),
            clock: Clock::new(),
        }
    }

    fn receive_textures(&mut self, gpu: &GpuContext) {
        for loaded in self.loader.drain() {
            match loaded.result {
                Ok(image) => {
                    let texture = self.gpu.add_texture(gpu, &image, loaded.key);
                    self.model.set_planet_texture(loaded.key, texture);
                    self.tracker.item_loaded();
                }
                Err(_) => self.tracker.item_failed(),
            }
        }

        let was_loaded = self.tracker.is_loaded();
        if self.tracker.poll(self.clock.elapsed()) && !was_loaded {
            if self.tracker.timed_out() {
                info!("solar system shown after safety timeout");
            } else {
                info!(
                    "solar system loaded ({} of {} textures fell back)",
                    self.tracker.failed(),
                    self.tracker.total()
                );
            }
        }
    }
}

impl Teardown for SolarView {
    fn teardown(&mut self) {
        self.gpu.dispose();
    }
}

impl Visualization for SolarView {
    fn kind(&self) -> ViewKind {
        ViewKind::Solar
    }

    fn update(&mut self, frame: &FrameContext<'_>) {
        self.receive_textures(frame.gpu);
        if frame.pointer_free {
            self.model.orbit(frame.input, frame.surface.height);
        }
        if let Some(click) = frame.click {
            self.model.click(to_ndc(click, frame.surface));
        }
        self.model.update(frame.delta);
    }

    fn render(&mut self, gpu: &GpuContext, encoder: &mut wgpu::CommandEncoder, target: &wgpu::TextureView) {
        self.gpu.render(gpu, encoder, target, self.model.frame());
    }

    fn ui(&mut self, ctx: &egui::Context) {
        if !self.tracker.is_loaded() {
            let percent = self.tracker.progress_percent();
            ui::common::loading_overlay(
                ctx,
                "Cargando sistema solar...",
                &format!("Descargando texturas: {percent}%"),
                Some(percent),
            );
        }
        match ui::solar::show(ctx, self.model.selected()) {
            Some(ui::solar::SolarAction::ResetView) => self.model.reset(),
            Some(ui::solar::SolarAction::CloseInfo) => self.model.close_info(),
            None => {}
        }
    }

    fn resize(&mut self, gpu: &GpuContext, size: WindowDimensions) {
        self.model.set_aspect(size);
        self.gpu.resize(gpu.device(), size);
    }

    fn reset(&mut self) {
        self.model.reset();
    }
}
