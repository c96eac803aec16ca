//! The sample renderers.
//!
//! Each one compiles its program, uploads static vertex data once, and issues
//! a single draw per frame.

mod common;
mod instanced_quads;
mod perspective_triangle;
mod rotating_quad;
mod textured_quad;

pub use instanced_quads::{GridLayout, InstancedQuads, QuadInstance};
pub use perspective_triangle::PerspectiveTriangle;
pub use rotating_quad::RotatingQuad;
pub use textured_quad::TexturedQuad;
