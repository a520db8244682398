use glam::{Mat4, Vec3};
use log::warn;

use crate::math::Rgb;
use crate::types::{GlobalsUniform, LightUniform, MAX_LIGHTS};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightKind {
    /// Light arriving from `toward`, i.e. the light sits along this direction
    Directional { toward: Vec3 },
    /// Range 0 means no falloff
    Point { position: Vec3, range: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub kind: LightKind,
    pub color: Rgb,
    pub intensity: f32,
}

impl Light {
    pub fn directional(toward: Vec3, color: Rgb, intensity: f32) -> Self {
        Self {
            kind: LightKind::Directional { toward },
            color,
            intensity,
        }
    }

    pub fn point(position: Vec3, color: Rgb, intensity: f32, range: f32) -> Self {
        Self {
            kind: LightKind::Point { position, range },
            color,
            intensity,
        }
    }

    pub fn to_uniform(&self) -> LightUniform {
        let [r, g, b] = self.color.to_linear();
        let (position, range) = match self.kind {
            LightKind::Directional { toward } => (toward.normalize_or_zero().extend(0.0), 0.0),
            LightKind::Point { position, range } => (position.extend(1.0), range),
        };
        LightUniform {
            position: position.to_array(),
            color: [r * self.intensity, g * self.intensity, b * self.intensity, range],
        }
    }
}

/// Ambient term plus up to `MAX_LIGHTS` lights
#[derive(Debug, Clone, PartialEq)]
pub struct LightRig {
    pub ambient: Rgb,
    pub ambient_intensity: f32,
    pub lights: Vec<Light>,
}

impl LightRig {
    pub fn new(ambient: Rgb, ambient_intensity: f32) -> Self {
        Self {
            ambient,
            ambient_intensity,
            lights: Vec::new(),
        }
    }

    pub fn with(mut self, light: Light) -> Self {
        self.lights.push(light);
        self
    }

    /// Pack into the per-frame uniform. Lights beyond `MAX_LIGHTS` are dropped.
    pub fn globals(&self, view_proj: Mat4, eye: Vec3) -> GlobalsUniform {
        if self.lights.len() > MAX_LIGHTS {
            warn!("{} lights requested, only {} are rendered", self.lights.len(), MAX_LIGHTS);
        }

        let mut globals = GlobalsUniform {
            view_proj: view_proj.to_cols_array_2d(),
            camera_position: eye.extend(1.0).to_array(),
            ..GlobalsUniform::default()
        };
        let [r, g, b] = self.ambient.to_linear();
        let k = self.ambient_intensity;
        globals.ambient = [r * k, g * k, b * k, 1.0];

        for (slot, light) in globals.lights.iter_mut().zip(&self.lights) {
            *slot = light.to_uniform();
        }
        globals.light_count = self.lights.len().min(MAX_LIGHTS) as u32;
        globals
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directional_has_zero_w() {
        let u = Light::directional(Vec3::new(0.0, 2.0, 0.0), Rgb::WHITE, 0.5).to_uniform();
        assert_eq!(u.position, [0.0, 1.0, 0.0, 0.0]);
        assert_eq!(u.color, [0.5, 0.5, 0.5, 0.0]);
    }

    #[test]
    fn point_carries_range() {
        let u = Light::point(Vec3::new(1.0, 2.0, 3.0), Rgb::WHITE, 2.0, 300.0).to_uniform();
        assert_eq!(u.position, [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(u.color[3], 300.0);
    }

    #[test]
    fn extra_lights_are_truncated() {
        let mut rig = LightRig::new(Rgb::WHITE, 0.3);
        for i in 0..6 {
            rig = rig.with(Light::point(Vec3::X * i as f32, Rgb::WHITE, 1.0, 0.0));
        }
        let globals = rig.globals(Mat4::IDENTITY, Vec3::ZERO);
        assert_eq!(globals.light_count, MAX_LIGHTS as u32);
        assert!((globals.ambient[0] - 0.3).abs() < 1e-6);
    }
}
