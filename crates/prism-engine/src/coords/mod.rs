//! Geometry types shared between the runtime and the sample renderers.
//!
//! Sample geometry lives directly in clip space; the only CPU-side quantity
//! the renderers need is the drawable size.

mod viewport;

pub use viewport::Viewport;
