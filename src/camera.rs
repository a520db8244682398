use glam::{Mat4, Vec2, Vec3};
use std::f32::consts::{PI, TAU};

use crate::core::controller::{Button, Controller};
use crate::core::timer::per_frame;
use crate::math::Ray;

const POLAR_EPSILON: f32 = 1e-4;
const ZOOM_STEP: f32 = 0.95;

/// Pose an orbit camera returns to on `reset()`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitPose {
    pub target: Vec3,
    pub theta: f32,
    pub phi: f32,
    pub radius: f32,
}

impl OrbitPose {
    /// Spherical pose of `eye` around `target`. `phi` is measured from +Y.
    pub fn looking_at(eye: Vec3, target: Vec3) -> Self {
        let offset = eye - target;
        let radius = offset.length().max(1e-3);
        Self {
            target,
            theta: offset.x.atan2(offset.z),
            phi: (offset.y / radius).clamp(-1.0, 1.0).acos(),
            radius,
        }
    }

    pub fn eye(&self) -> Vec3 {
        let sin_phi = self.phi.sin();
        self.target
            + self.radius
                * Vec3::new(
                    sin_phi * self.theta.sin(),
                    self.phi.cos(),
                    sin_phi * self.theta.cos(),
                )
    }
}

/// Pending user input not yet applied; bled off by the damping factor.
#[derive(Debug, Clone, Copy)]
struct OrbitDelta {
    theta: f32,
    phi: f32,
    scale: f32,
    pan: Vec3,
}

impl Default for OrbitDelta {
    fn default() -> Self {
        Self {
            theta: 0.0,
            phi: 0.0,
            scale: 1.0,
            pan: Vec3::ZERO,
        }
    }
}

/// Target-centered camera with damped rotate/zoom/pan
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    pose: OrbitPose,
    initial: OrbitPose,
    delta: OrbitDelta,

    pub fov_y: f32,
    pub aspect: f32,
    pub z_near: f32,
    pub z_far: f32,

    /// Fraction of pending input applied per update; 1.0 disables damping
    pub damping: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub min_polar: f32,
    pub max_polar: f32,
    pub enable_pan: bool,
    pub auto_rotate: bool,
    /// Full turns per minute at 60 updates per second
    pub auto_rotate_speed: f32,
}

impl OrbitCamera {
    pub fn new(eye: Vec3, target: Vec3, fov_y_degrees: f32) -> Self {
        let pose = OrbitPose::looking_at(eye, target);
        Self {
            pose,
            initial: pose,
            delta: OrbitDelta::default(),
            fov_y: fov_y_degrees.to_radians(),
            aspect: 4.0 / 3.0,
            z_near: 0.1,
            z_far: 1000.0,
            damping: 1.0,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            min_polar: 0.0,
            max_polar: PI,
            enable_pan: true,
            auto_rotate: false,
            auto_rotate_speed: 2.0,
        }
    }

    pub fn with_damping(mut self, damping: f32) -> Self {
        self.damping = damping.clamp(0.0, 1.0);
        self
    }

    pub fn with_distance_limits(mut self, min: f32, max: f32) -> Self {
        self.min_distance = min;
        self.max_distance = max;
        self.pose.radius = self.pose.radius.clamp(min, max);
        self.initial = self.pose;
        self
    }

    pub fn with_max_polar(mut self, max_polar: f32) -> Self {
        self.max_polar = max_polar;
        self
    }

    pub fn with_pan(mut self, enable: bool) -> Self {
        self.enable_pan = enable;
        self
    }

    pub fn with_clip(mut self, near: f32, far: f32) -> Self {
        self.z_near = near;
        self.z_far = far;
        self
    }

    pub fn pose(&self) -> OrbitPose {
        self.pose
    }

    pub fn eye(&self) -> Vec3 {
        self.pose.eye()
    }

    pub fn target(&self) -> Vec3 {
        self.pose.target
    }

    pub fn distance(&self) -> f32 {
        self.pose.radius
    }

    /// Rotate by a pointer drag in pixels; a drag across the full viewport height
    /// is one full turn.
    pub fn rotate(&mut self, dx: f32, dy: f32, viewport_height: f32) {
        let height = viewport_height.max(1.0);
        self.delta.theta -= TAU * dx / height;
        self.delta.phi -= TAU * dy / height;
    }

    /// Positive `steps` zooms in
    pub fn zoom(&mut self, steps: f32) {
        self.delta.scale *= ZOOM_STEP.powf(steps);
    }

    pub fn pan(&mut self, dx: f32, dy: f32, viewport_height: f32) {
        if !self.enable_pan {
            return;
        }
        let height = viewport_height.max(1.0);
        let world_per_pixel = 2.0 * self.pose.radius * (self.fov_y * 0.5).tan() / height;
        let forward = (self.pose.target - self.eye()).normalize_or_zero();
        let right = forward.cross(Vec3::Y).normalize_or_zero();
        let up = right.cross(forward);
        self.delta.pan += (-right * dx + up * dy) * world_per_pixel;
    }

    /// Left drag orbits, right drag pans (or orbits when panning is off), the
    /// wheel zooms
    pub fn apply_input(&mut self, input: &dyn Controller, viewport_height: f32) {
        let (dx, dy) = input.mouse_delta();
        if dx != 0.0 || dy != 0.0 {
            if input.is_down(Button::MouseRight) && self.enable_pan {
                self.pan(dx, dy, viewport_height);
            } else if input.is_down(Button::MouseLeft) || input.is_down(Button::MouseRight) {
                self.rotate(dx, dy, viewport_height);
            }
        }
        let scroll = input.scroll_delta();
        if scroll != 0.0 {
            self.zoom(scroll);
        }
    }

    pub fn set_aspect(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }

    /// Apply one frame of pending input. Call once per frame with the frame
    /// time in seconds.
    pub fn update(&mut self, delta: f32) {
        if self.auto_rotate {
            self.pose.theta -= per_frame(TAU / 60.0 / 60.0 * self.auto_rotate_speed, delta);
        }

        let f = self.damping;
        self.pose.theta += self.delta.theta * f;
        self.pose.phi += self.delta.phi * f;
        self.pose.phi = self
            .pose
            .phi
            .clamp(self.min_polar, self.max_polar)
            .clamp(POLAR_EPSILON, PI - POLAR_EPSILON);

        let scale = 1.0 + (self.delta.scale - 1.0) * f;
        self.pose.radius = (self.pose.radius * scale).clamp(self.min_distance, self.max_distance);
        self.pose.target += self.delta.pan * f;

        if f >= 1.0 {
            self.delta = OrbitDelta::default();
        } else {
            self.delta.theta *= 1.0 - f;
            self.delta.phi *= 1.0 - f;
            self.delta.scale = 1.0 + (self.delta.scale - 1.0) * (1.0 - f);
            self.delta.pan *= 1.0 - f;
        }
    }

    /// Back to the pose the camera was created with, dropping pending motion
    pub fn reset(&mut self) {
        self.pose = self.initial;
        self.delta = OrbitDelta::default();
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), self.pose.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect.max(1e-3), self.z_near, self.z_far)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// World-space ray through a point in normalized device coordinates
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let inv = self.view_proj().inverse();
        let near = inv.project_point3(ndc.extend(0.0));
        let far = inv.project_point3(ndc.extend(1.0));
        Ray::new(near, far - near)
    }
}
