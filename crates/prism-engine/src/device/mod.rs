//! GPU device + surface management.
//!
//! This module is responsible for:
//! - creating the wgpu Instance/Adapter/Device/Queue
//! - creating & configuring the Surface (swapchain)
//! - acquiring frames and providing encoders/views for rendering
//! - identifying each created context so resources can tell whether the
//!   context that owns them is still the current one

mod context;
mod error;
mod frame;
mod init;
mod surface;

pub use context::{ContextId, Gpu};
pub use error::SurfaceErrorAction;
pub use frame::GpuFrame;
pub use init::GpuInit;
