pub mod camera;
pub mod catalog;
pub mod cli;
pub mod core;
pub mod geometry;
pub mod math;
pub mod prefs;
pub mod quiz;
pub mod render;
pub mod scenes;
pub mod traits;
pub mod types;
pub mod ui;

pub use catalog::ShapeKind;
pub use geometry::{geometry_info, ShapeInfo};
pub use scenes::ViewKind;
