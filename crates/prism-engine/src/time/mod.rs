//! Frame timing.
//!
//! One `FrameClock` lives with the window; `tick()` is called once per
//! presented frame and the resulting `FrameTime` drives sample animation.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
