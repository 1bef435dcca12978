//! WebGPU rendering module
//!
//! `scene` decides what to draw, `shapes` turns it into triangles and
//! `pipeline` puts them on the surface with one transform per frame.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::{DrawCmd, Scene, build_scene};
pub use vertex::Vertex;

use crate::error::RenderError;
use crate::transform::Transform;

/// Something that can show a finished frame
pub trait FrameSink {
    fn present(&mut self, scene: &Scene, transform: &Transform) -> Result<(), RenderError>;
}
