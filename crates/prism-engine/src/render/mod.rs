//! GPU rendering subsystem.
//!
//! Each sample renderer owns its GPU resources (pipeline, buffers, texture)
//! from construction until `release`, and issues its draw into the frame's
//! render target.
//!
//! Convention:
//! - Sample geometry is authored directly in clip space (x/y in [-1, 1]).
//! - Matrices are column-major and target wgpu's [0, 1] depth range.

mod animation;
mod ctx;
mod error;
pub mod mesh;
mod renderer;
mod resources;
pub mod samples;
pub mod shader;
pub mod texture;
pub mod transform;

pub use animation::Spin;
pub use ctx::{RenderCtx, RenderTarget};
pub use error::RendererError;
pub use renderer::{create_renderer, FrameState, Renderer, SampleKind, SampleOptions};
pub use resources::{ContextGuard, GpuResources};
