mod color;
mod ray;

pub use color::{hsv_to_rgb, srgb_to_linear, Rgb};
pub use ray::{intersect_sphere, intersect_triangle, Ray};
