//! WebGPU rendering module
//!
//! Flat-coloured triangle lists built from the scene each frame.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use shapes::scene_vertices;
pub use vertex::Vertex;
