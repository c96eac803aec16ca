use winit::event::WindowEvent;
use winit::window::WindowId;

use crate::render::RenderCtx;

use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by higher layers.
pub trait App {
    /// Called for window events.
    fn on_window_event(&mut self, window_id: WindowId, event: &WindowEvent) -> AppControl {
        let _ = (window_id, event);
        AppControl::Continue
    }

    /// Called after a GPU context has been created and made current.
    ///
    /// Invoked again after every resume that follows a suspend.
    fn on_context_created(&mut self, ctx: &RenderCtx<'_>) {
        let _ = ctx;
    }

    /// Called right before the GPU context is dropped.
    ///
    /// The context is still current here; anything created against it should be
    /// released now.
    fn on_context_lost(&mut self, ctx: &RenderCtx<'_>) {
        let _ = ctx;
    }

    /// Called once per rendered frame.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;
}
