pub mod visualization;

pub use visualization::{FrameContext, Visualization};
