pub mod clock;
pub mod controller;
pub mod frame_loop;
pub mod gpu_context;
pub mod input_adapter;
pub mod lifecycle;
pub mod loading;
pub mod picking;
pub mod resources;
pub mod scene_graph;
pub mod timer;
pub mod window;

pub use clock::Clock;
pub use controller::{Button, Controller};
pub use gpu_context::GpuContext;
pub use lifecycle::{Lifecycle, Teardown};
pub use scene_graph::SceneGraph;
