use std::path::Path;
use std::time::Duration;

use glam::{Vec2, Vec3};
use log::{debug, info};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::camera::OrbitCamera;
use crate::catalog::{continent, ContinentRecord, CONTINENTS};
use crate::core::clock::Clock;
use crate::core::controller::Controller;
use crate::core::gpu_context::GpuContext;
use crate::core::lifecycle::Teardown;
use crate::core::loading::LoadTracker;
use crate::core::picking::to_ndc;
use crate::core::scene_graph::{Blend, Material, Node, NodeId, SceneGraph, TextureId, Transform};
use crate::core::timer::per_frame;
use crate::core::window::WindowDimensions;
use crate::geometry::mesh::{points, uv_sphere};
use crate::math::Rgb;
use crate::prefs::Preferences;
use crate::quiz::{Feedback, Quiz};
use crate::render::{Light, LightRig, SceneFrame, SceneGpu, TextureLoader, TextureSource};
use crate::traits::{FrameContext, Visualization};
use crate::ui;
use crate::ui::globe::GlobeAction;

use super::{MountContext, ViewKind};

pub const BACKGROUND: Rgb = Rgb::from_u32(0x000011);
/// Earth color while the day map is missing
pub const OCEAN_FALLBACK: Rgb = Rgb::from_u32(0x1e5aa8);
pub const STAR_COUNT: usize = 5000;
pub const STAR_SPREAD: f32 = 1000.0;
const STAR_SEED: u64 = 0x5747_4152;
pub const SUN_ORBIT_RADIUS: f32 = 5.0;
pub const MARKER_RADIUS: f32 = 0.04;
pub const MARKER_LIFT: f32 = 1.02;

const EARTH_SPIN: f32 = 0.001;
const CLOUD_SPIN: f32 = 0.0015;
const STAR_SPIN: f32 = 0.00005;

const MIN_DISPLAY: Duration = Duration::from_secs(1);
const SAFETY_TIMEOUT: Duration = Duration::from_secs(8);

const TEXTURE_BASE: &str = "https://raw.githubusercontent.com/mrdoob/three.js/dev/examples/textures/planets";
const DAY_MAP: &str = "earth_atmos_2048.jpg";
const DAY_MAP_LARGE: &str = "earth_atmos_4096.jpg";
const CLOUD_MAP: &str = "earth_clouds_1024.png";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EarthTexture {
    Day,
    Clouds,
}

/// Local copy first, then the remote maps in order
fn texture_sources(asset_dir: &Path, kind: EarthTexture) -> Vec<TextureSource> {
    let files: &[&str] = match kind {
        EarthTexture::Day => &[DAY_MAP, DAY_MAP_LARGE],
        EarthTexture::Clouds => &[CLOUD_MAP],
    };
    let mut sources = vec![TextureSource::File(asset_dir.join("textures").join("earth").join(files[0]))];
    sources.extend(files.iter().map(|f| TextureSource::Url(format!("{TEXTURE_BASE}/{f}"))));
    sources
}

/// Panel state: selected continent, fact carousel and quiz
#[derive(Debug, Clone, PartialEq)]
pub struct GlobeState {
    pub selected: Option<&'static ContinentRecord>,
    pub fact_index: usize,
    pub quiz: Option<Quiz>,
    pub clouds_enabled: bool,
}

impl Default for GlobeState {
    fn default() -> Self {
        Self {
            selected: None,
            fact_index: 0,
            quiz: None,
            clouds_enabled: true,
        }
    }
}

impl GlobeState {
    /// Select a continent, starting its facts from the first and closing any quiz
    pub fn select(&mut self, record: &'static ContinentRecord) {
        self.selected = Some(record);
        self.fact_index = 0;
        self.quiz = None;
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
        self.fact_index = 0;
        self.quiz = None;
    }

    /// Advance the carousel, wrapping to the first fact
    pub fn next_fact(&mut self) {
        if let Some(record) = self.selected {
            self.fact_index = (self.fact_index + 1) % record.fun_facts.len();
        }
    }

    pub fn current_fact(&self) -> Option<&'static str> {
        self.selected.map(|r| r.fun_facts[self.fact_index % r.fun_facts.len()])
    }

    /// Roll a new quiz for the selected continent; also used for "new quiz"
    pub fn start_quiz<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if let Some(record) = self.selected {
            self.quiz = Some(Quiz::generate(record, rng));
        }
    }

    pub fn close_quiz(&mut self) {
        self.quiz = None;
    }

    pub fn answer(&mut self, option: &str) -> Option<Feedback> {
        self.quiz.as_mut()?.answer(option).cloned()
    }
}

/// Earth with clouds, continent markers, an orbiting sun and a star field
pub struct GlobeModel {
    pub state: GlobeState,
    graph: SceneGraph,
    camera: OrbitCamera,
    lights: LightRig,
    earth: NodeId,
    clouds: NodeId,
    sun: NodeId,
    stars: NodeId,
    clouds_ready: bool,
    day_loaded: bool,
    time: f32,
    rng: ChaCha8Rng,
}

impl GlobeModel {
    pub fn new(size: WindowDimensions, clouds_enabled: bool, rng: ChaCha8Rng) -> Self {
        let size = size.or_fallback();
        let mut graph = SceneGraph::new();

        let sphere = graph.add_mesh(uv_sphere(1.0, 64, 48));
        let earth = graph.add(Node::mesh("earth", sphere, Material::lit(OCEAN_FALLBACK)).pickable("earth"));

        let cloud_mesh = graph.add_mesh(uv_sphere(1.01, 64, 48));
        let clouds = graph.add(
            Node::mesh("clouds", cloud_mesh, Material::lit(Rgb::WHITE).with_opacity(0.4, Blend::Alpha))
                .with_transform(Transform {
                    rotation: Vec3::new(0.1, 0.0, 0.0),
                    ..Transform::default()
                }),
        );
        // hidden until the cloud map arrives
        graph.node_mut(clouds).visible = false;

        let marker = graph.add_mesh(uv_sphere(MARKER_RADIUS, 16, 12));
        for record in CONTINENTS.iter() {
            let color = Rgb::parse_hex(record.color).unwrap_or(Rgb::WHITE);
            graph.add(
                Node::mesh("marker", marker, Material::unlit(color))
                    .with_parent(earth)
                    .with_transform(Transform::at(marker_position(record)))
                    .pickable(record.name),
            );
        }

        let sun_mesh = graph.add_mesh(uv_sphere(0.2, 32, 32));
        let sun = graph.add(
            Node::mesh("sun", sun_mesh, Material::unlit(Rgb::from_u32(0xffff00)))
                .with_transform(Transform::at(sun_position(0.0))),
        );

        let star_mesh = graph.add_mesh(points(&star_field(STAR_SEED)));
        let stars = graph.add(Node::mesh("stars", star_mesh, Material::unlit(Rgb::WHITE)));

        let mut camera = OrbitCamera::new(Vec3::new(0.0, 0.0, 2.5), Vec3::ZERO, 75.0)
            .with_damping(0.05)
            .with_distance_limits(1.5, 8.0)
            .with_pan(false)
            .with_clip(0.1, 3000.0);
        camera.set_aspect(size.width as f32, size.height as f32);

        let mut model = Self {
            state: GlobeState {
                clouds_enabled,
                ..GlobeState::default()
            },
            graph,
            camera,
            lights: LightRig::new(Rgb::from_u32(0x333333), 0.3),
            earth,
            clouds,
            sun,
            stars,
            clouds_ready: false,
            day_loaded: false,
            time: 0.0,
            rng,
        };
        model.sync_sun();
        model
    }

    pub fn orbit(&mut self, input: &dyn Controller, viewport_height: f32) {
        self.camera.apply_input(input, viewport_height);
    }

    pub fn update(&mut self, delta: f32) {
        self.time += delta;

        if self.state.selected.is_none() {
            self.graph.node_mut(self.earth).transform.rotation.y += per_frame(EARTH_SPIN, delta);
            self.graph.node_mut(self.clouds).transform.rotation.y += per_frame(CLOUD_SPIN, delta);
        }

        let star_spin = per_frame(STAR_SPIN, delta);
        let stars = &mut self.graph.node_mut(self.stars).transform.rotation;
        stars.x += star_spin;
        stars.y += star_spin;

        self.sync_sun();
        self.graph.node_mut(self.clouds).visible = self.clouds_ready && self.state.clouds_enabled;
        self.camera.update(delta);
    }

    fn sync_sun(&mut self) {
        let position = sun_position(self.time);
        self.graph.node_mut(self.sun).transform.translation = position;
        self.lights.lights = vec![
            Light::directional(position, Rgb::WHITE, 1.5),
            Light::point(position, Rgb::from_u32(0xffffcc), 0.8, 100.0),
        ];
    }

    /// Ray-cast from `ndc`. A marker selects its continent; the bare globe or
    /// empty space clears the selection.
    pub fn click(&mut self, ndc: Vec2) -> Option<&'static ContinentRecord> {
        let ray = self.camera.ray_from_ndc(ndc);
        let hit = self.graph.pick(&ray).and_then(|h| continent(h.id));
        match hit {
            Some(record) => {
                debug!("selected continent {}", record.name);
                self.state.select(record);
            }
            None => self.state.clear_selection(),
        }
        hit
    }

    pub fn start_quiz(&mut self) {
        self.state.start_quiz(&mut self.rng);
    }

    pub fn toggle_clouds(&mut self) {
        self.state.clouds_enabled = !self.state.clouds_enabled;
    }

    pub fn apply(&mut self, action: GlobeAction) {
        match action {
            GlobeAction::ResetView => self.reset(),
            GlobeAction::ToggleClouds => self.toggle_clouds(),
            GlobeAction::Select(record) => self.state.select(record),
            GlobeAction::CloseInfo => self.state.clear_selection(),
            GlobeAction::NextFact => self.state.next_fact(),
            GlobeAction::StartQuiz => self.start_quiz(),
            GlobeAction::Answer(option) => {
                self.state.answer(option);
            }
            GlobeAction::CloseQuiz => self.state.close_quiz(),
        }
    }

    /// Initial camera and earth orientation, panels closed
    pub fn reset(&mut self) {
        self.camera.reset();
        self.graph.node_mut(self.earth).transform.rotation = Vec3::ZERO;
        self.state.clear_selection();
    }

    pub fn set_day_texture(&mut self, texture: TextureId) {
        let material = &mut self.graph.node_mut(self.earth).material;
        material.texture = Some(texture);
        material.color = Rgb::WHITE;
        self.day_loaded = true;
    }

    pub fn set_cloud_texture(&mut self, texture: TextureId) {
        self.graph.node_mut(self.clouds).material.texture = Some(texture);
        self.clouds_ready = true;
    }

    pub fn day_loaded(&self) -> bool {
        self.day_loaded
    }

    pub fn clouds_visible(&self) -> bool {
        self.graph.node(self.clouds).visible
    }

    pub fn earth_rotation(&self) -> f32 {
        self.graph.node(self.earth).transform.rotation.y
    }

    pub fn sun_position(&self) -> Vec3 {
        self.graph.node(self.sun).transform.translation
    }

    /// World position of a continent's marker
    pub fn marker_world_position(&self, name: &str) -> Option<Vec3> {
        let id = self.graph.find_pickable(name)?;
        Some(self.graph.world_matrix(id).transform_point3(Vec3::ZERO))
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

    pub fn lights(&self) -> &LightRig {
        &self.lights
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

/// Marker just above the surface along the continent's direction
pub fn marker_position(record: &ContinentRecord) -> Vec3 {
    Vec3::from_array(record.position).normalize_or_zero() * MARKER_LIFT
}

/// The sun circles the globe at height 3, a tenth of a radian per second
pub fn sun_position(time: f32) -> Vec3 {
    let angle = time * 0.1;
    Vec3::new(angle.cos() * SUN_ORBIT_RADIUS, 3.0, angle.sin() * SUN_ORBIT_RADIUS)
}

/// Uniformly scattered stars in a cube of half-width `STAR_SPREAD`
pub fn star_field(seed: u64) -> Vec<Vec3> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..STAR_COUNT)
        .map(|_| {
            Vec3::new(
                rng.random_range(-STAR_SPREAD..STAR_SPREAD),
                rng.random_range(-STAR_SPREAD..STAR_SPREAD),
                rng.random_range(-STAR_SPREAD..STAR_SPREAD),
            )
        })
        .collect()
}

/// Mounted globe
pub struct GlobeView {
    model: GlobeModel,
    gpu: SceneGpu,
    loader: TextureLoader<EarthTexture>,
    tracker: LoadTracker,
    clock: Clock,
}

impl GlobeView {
    pub fn new(ctx: &MountContext) -> Self {
        let model = GlobeModel::new(ctx.size, ctx.prefs.clouds_enabled, ChaCha8Rng::from_os_rng());
        let mut gpu = SceneGpu::new(&ctx.gpu, ctx.color_format, ctx.size);
        gpu.sync(&ctx.gpu, model.graph());

        let mut loader = TextureLoader::new(ctx.offline, ctx.texture_timeout);
        loader.request(EarthTexture::Day, texture_sources(&ctx.asset_dir, EarthTexture::Day));
        loader.request(EarthTexture::Clouds, texture_sources(&ctx.asset_dir, EarthTexture::Clouds));

        Self {
            model,
            gpu,
            loader,
            // only the day map gates the overlay
            tracker: LoadTracker::new(1)
                .with_min_display(MIN_DISPLAY)
                .with_safety_timeout(SAFETY_TIMEOUT),
            clock: Clock::new(),
        }
    }

    fn receive_textures(&mut self, gpu: &GpuContext) {
        for loaded in self.loader.drain() {
            match (loaded.key, loaded.result) {
                (EarthTexture::Day, Ok(image)) => {
                    let texture = self.gpu.add_texture(gpu, &image, "Earth Day");
                    self.model.set_day_texture(texture);
                    self.tracker.item_loaded();
                }
                (EarthTexture::Day, Err(_)) => self.tracker.item_failed(),
                (EarthTexture::Clouds, Ok(image)) => {
                    let texture = self.gpu.add_texture(gpu, &image, "Earth Clouds");
                    self.model.set_cloud_texture(texture);
                }
                (EarthTexture::Clouds, Err(_)) => {}
            }
        }

        let was_loaded = self.tracker.is_loaded();
        if self.tracker.poll(self.clock.elapsed()) && !was_loaded {
            info!(
                "globe ready (day map {})",
                if self.model.day_loaded() { "loaded" } else { "missing" }
            );
        }
    }
}

impl Teardown for GlobeView {
    fn teardown(&mut self) {
        self.gpu.dispose();
    }
}

impl Visualization for GlobeView {
    fn kind(&self) -> ViewKind {
        ViewKind::Globe
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
            ui::common::loading_overlay(ctx, "Cargando la Tierra real...", "Usando imágenes de la NASA", None);
        }
        if let Some(action) = ui::globe::show(ctx, &self.model.state, self.model.day_loaded()) {
            self.model.apply(action);
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
        prefs.clouds_enabled = self.model.state.clouds_enabled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::continent_by_index;

    fn model() -> GlobeModel {
        GlobeModel::new(WindowDimensions::new(800, 600), true, ChaCha8Rng::seed_from_u64(9))
    }

    fn facing_camera(m: &GlobeModel) -> &'static ContinentRecord {
        // the continent whose marker is nearest the camera is never occluded
        let eye = m.camera().eye();
        CONTINENTS
            .iter()
            .min_by(|a, b| {
                let da = m.marker_world_position(a.name).unwrap().distance(eye);
                let db = m.marker_world_position(b.name).unwrap().distance(eye);
                da.total_cmp(&db)
            })
            .unwrap()
    }

    #[test]
    fn clicking_a_marker_selects_its_continent() {
        let mut m = model();
        let record = facing_camera(&m);
        let pos = m.marker_world_position(record.name).unwrap();
        let ndc = m.camera().view_proj().project_point3(pos).truncate();

        assert_eq!(m.click(ndc).map(|r| r.name), Some(record.name));
        assert_eq!(m.state.selected.map(|r| r.name), Some(record.name));
        assert_eq!(m.state.current_fact(), Some(record.fun_facts[0]));
    }

    #[test]
    fn clicking_space_clears_selection() {
        let mut m = model();
        m.state.select(continent_by_index(0).unwrap());
        assert!(m.click(Vec2::new(0.95, 0.95)).is_none());
        assert!(m.state.selected.is_none());
    }

    #[test]
    fn facts_wrap_around() {
        let mut state = GlobeState::default();
        state.next_fact();
        assert_eq!(state.fact_index, 0);

        let record = continent_by_index(3).unwrap();
        state.select(record);
        for _ in 0..4 {
            state.next_fact();
        }
        assert_eq!(state.current_fact(), Some(record.fun_facts[0]));
    }

    #[test]
    fn selecting_closes_quiz_and_restarts_facts() {
        let mut m = model();
        m.state.select(continent_by_index(1).unwrap());
        m.state.next_fact();
        m.start_quiz();
        assert!(m.state.quiz.is_some());

        m.apply(GlobeAction::Select(continent_by_index(2).unwrap()));
        assert!(m.state.quiz.is_none());
        assert_eq!(m.state.fact_index, 0);
    }

    #[test]
    fn quiz_needs_a_selection() {
        let mut m = model();
        m.start_quiz();
        assert!(m.state.quiz.is_none());
        assert!(m.state.answer("León").is_none());
    }

    #[test]
    fn earth_spins_only_without_selection() {
        let mut m = model();
        m.update(1.0 / 60.0);
        assert!((m.earth_rotation() - 0.001).abs() < 1e-6);

        m.state.select(continent_by_index(0).unwrap());
        m.update(1.0 / 60.0);
        assert!((m.earth_rotation() - 0.001).abs() < 1e-6);
    }

    #[test]
    fn reset_clears_panels_and_rotation() {
        let mut m = model();
        m.update(1.0);
        m.state.select(continent_by_index(0).unwrap());
        m.start_quiz();

        m.apply(GlobeAction::ResetView);
        assert!(m.state.selected.is_none());
        assert!(m.state.quiz.is_none());
        assert_eq!(m.earth_rotation(), 0.0);
    }

    #[test]
    fn clouds_wait_for_texture_and_toggle() {
        let mut m = model();
        m.update(0.0);
        assert!(!m.clouds_visible());

        m.set_cloud_texture(TextureId(0));
        m.update(0.0);
        assert!(m.clouds_visible());

        m.toggle_clouds();
        m.update(0.0);
        assert!(!m.clouds_visible());
    }

    #[test]
    fn sun_orbits_and_drives_lights() {
        let mut m = model();
        assert!((m.sun_position() - Vec3::new(5.0, 3.0, 0.0)).length() < 1e-5);
        m.update(10.0);
        let expected = sun_position(10.0);
        assert!((m.sun_position() - expected).length() < 1e-5);
        assert_eq!(m.lights().lights.len(), 2);
        assert!(m
            .lights()
            .lights
            .iter()
            .any(|l| l.kind == crate::render::LightKind::Point { position: expected, range: 100.0 }));
    }

    #[test]
    fn star_field_is_seeded_and_bounded() {
        let a = star_field(1);
        assert_eq!(a.len(), STAR_COUNT);
        assert_eq!(a, star_field(1));
        assert!(a.iter().all(|p| p.abs().max_element() <= STAR_SPREAD));
    }

    #[test]
    fn markers_sit_above_the_surface() {
        for record in CONTINENTS.iter() {
            assert!((marker_position(record).length() - MARKER_LIFT).abs() < 1e-5);
        }
    }

    #[test]
    fn day_map_has_local_then_remote_fallbacks() {
        let sources = texture_sources(Path::new("assets"), EarthTexture::Day);
        assert_eq!(sources.len(), 3);
        assert!(!sources[0].is_remote());
        assert!(sources[1].to_string().ends_with(DAY_MAP));
        assert!(sources[2].to_string().ends_with(DAY_MAP_LARGE));
    }
}
