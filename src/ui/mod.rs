//! egui panels drawn over the 3D views. Panels never touch scene state
//! directly: they edit plain state structs or return an action for the view
//! to apply.

pub mod common;
pub mod explorer;
pub mod globe;
pub mod solar;
