//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and Window, and wires them to the GPU layer.
//! The GPU context follows the platform lifecycle: it is created on resume and
//! torn down on suspend, which is when mobile platforms destroy the surface.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig, RuntimeCtx};
