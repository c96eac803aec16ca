//! Prism engine crate.
//!
//! Owns the platform + GPU runtime and the sample renderers drawn on top of it.

pub mod device;
pub mod window;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod render;
pub mod paint;
